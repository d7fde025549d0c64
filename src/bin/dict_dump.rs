//! Dump a RADIUS dictionary: every vendor, attribute type and enumeration.
//!
//! Usage:
//!   dict_dump [OPTIONS] [DICTIONARY ...]
//!
//! All given files are parsed into one dictionary, in order. With no files the built-in default
//! dictionary is dumped.
//!
//! Options:
//!   --summary, -s      Only print counts
//!   --diagnostics, -d  Print per-line diagnostics to stderr
//!
//! Log output is controlled with `RUST_LOG` (e.g. `RUST_LOG=raddict=warn`).

use raddict::{builtin_dictionary, parse_file, Diagnostic, Dictionary, Severity};
use std::path::Path;

fn print_diagnostic(path: &str, d: &Diagnostic) {
    let severity_str = match d.severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
    };
    eprintln!("{}:{}: {}: {} [{}]", path, d.line, severity_str, d.message, d.text);
}

fn print_dictionary(dict: &Dictionary) {
    for v in dict.vendors() {
        println!("VENDOR\t{}\t{}", v.id, v.name);
    }
    for at in dict.attribute_types() {
        let scope = match at.vendor_id {
            Some(id) => dict.vendor_name(id).map(str::to_string).unwrap_or_else(|| id.to_string()),
            None => "-".to_string(),
        };
        println!("{}\t{}\t{}\t{}", scope, at.code, at.name, at.value_type);
        for (value, label) in at.enumerations() {
            println!("\t\t{}\t{}", value, label);
        }
    }
}

fn print_summary(dict: &Dictionary) {
    let vendor_attrs = dict.attribute_types().filter(|a| a.vendor_id.is_some()).count();
    let enums: usize = dict.attribute_types().map(|a| a.enumerations().count()).sum();
    println!(
        "{} attribute type(s) ({} vendor-specific), {} vendor(s), {} enumeration value(s)",
        dict.len(),
        vendor_attrs,
        dict.vendors().len(),
        enums
    );
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let summary = if let Some(pos) = args.iter().position(|a| a == "--summary" || a == "-s") {
        args.remove(pos);
        true
    } else {
        false
    };
    let show_diagnostics =
        if let Some(pos) = args.iter().position(|a| a == "--diagnostics" || a == "-d") {
            args.remove(pos);
            true
        } else {
            false
        };

    let mut owned = Dictionary::new();
    let dict = if args.is_empty() {
        builtin_dictionary()
    } else {
        let mut has_error = false;
        let mut total_diagnostics = 0usize;
        for path in &args {
            match parse_file(Path::new(path), &mut owned) {
                Ok(diagnostics) => {
                    total_diagnostics += diagnostics.len();
                    if show_diagnostics {
                        for d in &diagnostics {
                            print_diagnostic(path, d);
                        }
                    }
                }
                Err(e) => {
                    eprintln!("{}: {}", path, e);
                    has_error = true;
                }
            }
        }
        if total_diagnostics > 0 {
            eprintln!("dict_dump: {} line(s) skipped", total_diagnostics);
        }
        if has_error {
            std::process::exit(1);
        }
        &owned
    };

    if summary {
        print_summary(dict);
    } else {
        print_dictionary(dict);
    }
    Ok(())
}
