//! Parse dictionary files into a [`Dictionary`].
//!
//! ## Directives
//!
//! ```text
//! ATTRIBUTE  <name> <code> <type>
//! VALUE      <attribute-name> <label> <value>
//! VENDOR     <id> <name>        (or <name> <id>)
//! VENDORATTR <vendor> <name> <code> <type>
//! $INCLUDE   <path>
//! ```
//!
//! Directive names are case-insensitive except `VENDOR`, which must be upper case. Blank lines
//! and lines starting with `#` are skipped; fields after the ones a directive needs are ignored.
//!
//! Input is read as bytes; invalid UTF-8 is replaced with U+FFFD rather than failing the file.
//!
//! Every line is handled in isolation: a malformed, duplicate or unresolved definition is
//! reported as a [`Diagnostic`] and parsing continues with the next line. Only a missing
//! `$INCLUDE` target or an I/O failure aborts the parse.
//!
//! `VENDOR` accepts its two fields in either order. This is a compatibility leniency for
//! existing dictionaries and applies to that directive only.

use crate::attribute::{AttributeType, ValueType};
use crate::diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
use crate::dictionary::{Dictionary, DictionaryError};
use pest::Parser;
use pest_derive::Parser as PestParser;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(PestParser)]
#[grammar = "grammar.pest"]
struct LineParser;

/// Failure that aborts the parse of a file (and of every file including it).
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("included file '{}' not found, line {line}", path.display())]
    MissingInclude { path: PathBuf, line: usize },
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
}

/// Reason a single line was rejected. Recovered by skipping the line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineError {
    #[error("syntax error: {directive} expects {expected} field(s), found {found}")]
    FieldCount {
        directive: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("syntax error: invalid {field} '{value}'")]
    InvalidNumber { field: &'static str, value: String },
    #[error("ignored {0}")]
    Duplicate(#[from] DictionaryError),
    #[error("unknown attribute '{0}'")]
    UnresolvedAttribute(String),
    #[error("unknown vendor '{0}'")]
    UnresolvedVendor(String),
}

impl LineError {
    pub fn kind(&self) -> DiagnosticKind {
        match self {
            LineError::FieldCount { .. } | LineError::InvalidNumber { .. } => DiagnosticKind::Syntax,
            LineError::Duplicate(_) => DiagnosticKind::Duplicate,
            LineError::UnresolvedAttribute(_) | LineError::UnresolvedVendor(_) => {
                DiagnosticKind::UnresolvedReference
            }
        }
    }
}

enum DirectiveError {
    Line(LineError),
    Abort(ParseError),
}

impl From<LineError> for DirectiveError {
    fn from(e: LineError) -> Self {
        DirectiveError::Line(e)
    }
}

impl From<DictionaryError> for DirectiveError {
    fn from(e: DictionaryError) -> Self {
        DirectiveError::Line(LineError::Duplicate(e))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    Attribute,
    Value,
    Include,
    VendorAttr,
    Vendor,
}

impl Directive {
    fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword.eq_ignore_ascii_case("ATTRIBUTE") {
            Some(Directive::Attribute)
        } else if keyword.eq_ignore_ascii_case("VALUE") {
            Some(Directive::Value)
        } else if keyword.eq_ignore_ascii_case("$INCLUDE") {
            Some(Directive::Include)
        } else if keyword.eq_ignore_ascii_case("VENDORATTR") {
            Some(Directive::VendorAttr)
        } else if keyword == "VENDOR" {
            Some(Directive::Vendor)
        } else {
            None
        }
    }
}

/// Parse dictionary source into a new dictionary. Diagnostics are only logged.
pub fn parse(source: &str) -> Result<Dictionary, ParseError> {
    let mut dictionary = Dictionary::new();
    parse_into(source, &mut dictionary)?;
    Ok(dictionary)
}

/// Parse dictionary source into an existing dictionary, returning the diagnostics.
pub fn parse_into(source: &str, dictionary: &mut Dictionary) -> Result<Vec<Diagnostic>, ParseError> {
    parse_reader(source.as_bytes(), dictionary)
}

pub fn parse_reader<R: BufRead>(
    reader: R,
    dictionary: &mut Dictionary,
) -> Result<Vec<Diagnostic>, ParseError> {
    let mut diagnostics = Diagnostics::default();
    parse_reader_with(reader, dictionary, &mut diagnostics)?;
    Ok(diagnostics.into_vec())
}

/// Like [`parse_reader`], but diagnostics go to a caller-owned collector, so the ones recorded
/// before an aborting error are still available after it.
pub fn parse_reader_with<R: BufRead>(
    reader: R,
    dictionary: &mut Dictionary,
    diagnostics: &mut Diagnostics,
) -> Result<(), ParseError> {
    parse_lines(reader, dictionary, diagnostics)
}

/// Parse a dictionary file from the local filesystem.
pub fn parse_file(
    path: impl AsRef<Path>,
    dictionary: &mut Dictionary,
) -> Result<Vec<Diagnostic>, ParseError> {
    let file = File::open(path.as_ref())?;
    parse_reader(BufReader::new(file), dictionary)
}

fn parse_lines<R: BufRead>(
    reader: R,
    dictionary: &mut Dictionary,
    diagnostics: &mut Diagnostics,
) -> Result<(), ParseError> {
    let mut reader = reader;
    let mut buf = Vec::new();
    for line_no in 0.. {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Bytes that are not UTF-8 (Latin-1 comments, mostly) are replaced, not rejected.
        let line = String::from_utf8_lossy(&buf);
        let text = line.trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }
        let tokens = match tokenize(text) {
            Ok(t) => t,
            Err(message) => {
                diagnostics.push(diagnostic(line_no, text, DiagnosticKind::Syntax, Severity::Error, message));
                continue;
            }
        };
        let (keyword, fields) = match tokens.split_first() {
            Some(split) => split,
            None => continue,
        };
        let directive = match Directive::from_keyword(keyword) {
            Some(d) => d,
            None => {
                diagnostics.push(diagnostic(
                    line_no,
                    text,
                    DiagnosticKind::UnknownDirective,
                    Severity::Warning,
                    format!("unknown line type: {}", keyword),
                ));
                continue;
            }
        };
        let result = match directive {
            Directive::Attribute => attribute_line(dictionary, fields),
            Directive::Value => value_line(dictionary, fields),
            Directive::Vendor => vendor_line(dictionary, fields),
            Directive::VendorAttr => vendor_attribute_line(dictionary, fields),
            Directive::Include => include_line(dictionary, fields, line_no, diagnostics),
        };
        match result {
            Ok(()) => {}
            Err(DirectiveError::Line(e)) => {
                diagnostics.push(diagnostic(line_no, text, e.kind(), Severity::Error, e.to_string()));
            }
            Err(DirectiveError::Abort(e)) => return Err(e),
        }
    }
    Ok(())
}

fn diagnostic(
    line: usize,
    text: &str,
    kind: DiagnosticKind,
    severity: Severity,
    message: String,
) -> Diagnostic {
    Diagnostic {
        line,
        text: text.to_string(),
        kind,
        severity,
        message,
    }
}

/// Split one trimmed, non-comment line into its keyword and fields.
fn tokenize(text: &str) -> Result<Vec<&str>, String> {
    let line = LineParser::parse(Rule::line, text)
        .map_err(|e| format!("Parse error: {}", e))?
        .next()
        .ok_or("Empty parse")?;
    let mut tokens = Vec::new();
    for inner in line.into_inner() {
        if inner.as_rule() == Rule::directive {
            tokens.extend(inner.into_inner().map(|p| p.as_str()));
        }
    }
    Ok(tokens)
}

fn require(directive: &'static str, fields: &[&str], expected: usize) -> Result<(), LineError> {
    if fields.len() < expected {
        return Err(LineError::FieldCount {
            directive,
            expected,
            found: fields.len(),
        });
    }
    Ok(())
}

fn parse_decimal(field: &'static str, value: &str) -> Result<i32, LineError> {
    value.parse().map_err(|_| LineError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// Decimal, or hexadecimal with a `0x` prefix.
fn parse_number(field: &'static str, value: &str) -> Result<i32, LineError> {
    match value.strip_prefix("0x") {
        Some(hex) => i32::from_str_radix(hex, 16).map_err(|_| LineError::InvalidNumber {
            field,
            value: value.to_string(),
        }),
        None => parse_decimal(field, value),
    }
}

fn attribute_line(dictionary: &mut Dictionary, fields: &[&str]) -> Result<(), DirectiveError> {
    require("ATTRIBUTE", fields, 3)?;
    let name = fields[0];
    let code = parse_decimal("code", fields[1])?;
    let value_type = ValueType::resolve(code, fields[2]);
    dictionary.add_attribute_type(AttributeType::new(code, name, value_type))?;
    Ok(())
}

fn value_line(dictionary: &mut Dictionary, fields: &[&str]) -> Result<(), DirectiveError> {
    require("VALUE", fields, 3)?;
    let (attribute_name, label) = (fields[0], fields[1]);
    let attribute = dictionary
        .attribute_type_by_name_mut(attribute_name)
        .ok_or_else(|| LineError::UnresolvedAttribute(attribute_name.to_string()))?;
    let value = parse_number("value", fields[2])?;
    attribute.add_enumeration(value, label);
    Ok(())
}

fn vendor_line(dictionary: &mut Dictionary, fields: &[&str]) -> Result<(), DirectiveError> {
    require("VENDOR", fields, 2)?;
    let (id, name) = match fields[0].parse::<i32>() {
        Ok(id) => (id, fields[1]),
        Err(_) => (parse_decimal("vendor id", fields[1])?, fields[0]),
    };
    dictionary.add_vendor(id, name)?;
    Ok(())
}

fn vendor_attribute_line(dictionary: &mut Dictionary, fields: &[&str]) -> Result<(), DirectiveError> {
    require("VENDORATTR", fields, 4)?;
    let vendor_id = match fields[0].parse::<i32>() {
        Ok(id) => id,
        Err(_) => dictionary
            .vendor_id(fields[0])
            .ok_or_else(|| LineError::UnresolvedVendor(fields[0].to_string()))?,
    };
    let name = fields[1];
    let code = parse_number("code", fields[2])?;
    let value_type = ValueType::from_type_name(fields[3]);
    dictionary.add_attribute_type(AttributeType::vendor(vendor_id, code, name, value_type))?;
    Ok(())
}

/// Parse the named file into the same dictionary. Line numbers restart at zero inside it.
fn include_line(
    dictionary: &mut Dictionary,
    fields: &[&str],
    line: usize,
    diagnostics: &mut Diagnostics,
) -> Result<(), DirectiveError> {
    if fields.len() != 1 {
        return Err(LineError::FieldCount {
            directive: "$INCLUDE",
            expected: 1,
            found: fields.len(),
        }
        .into());
    }
    let path = PathBuf::from(fields[0]);
    if !path.exists() {
        return Err(DirectiveError::Abort(ParseError::MissingInclude { path, line }));
    }
    let file = File::open(&path).map_err(|e| DirectiveError::Abort(e.into()))?;
    parse_lines(BufReader::new(file), dictionary, diagnostics).map_err(DirectiveError::Abort)
}
