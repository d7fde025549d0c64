//! # raddict — RADIUS dictionary parser and attribute registry
//!
//! Reads dictionary files describing RADIUS attribute codes, their value types, vendor-specific
//! attributes and enumeration values, and builds a [`Dictionary`] that a packet codec can query
//! by name or by numeric code.
//!
//! ## Dictionary format
//!
//! ```text
//! # comment
//! ATTRIBUTE  User-Name     1    string
//! ATTRIBUTE  Service-Type  6    integer
//! VALUE      Service-Type  Login-User  1
//! VENDOR     9    Cisco
//! VENDORATTR 9    Cisco-AVPair  1  string
//! $INCLUDE   /etc/raddict/dictionary.local
//! ```
//!
//! Type names: `string`, `octets`, `integer` (also `integer8`, `integer16`, `date`), `ipaddr`.
//! Anything else is treated as `octets`. Attribute code 26 is always Vendor-Specific.
//!
//! ## Usage
//!
//! ```
//! let dict = raddict::parse("ATTRIBUTE User-Name 1 string\n").expect("parse");
//! let user_name = dict.attribute_type(1, None).expect("User-Name");
//! assert_eq!(user_name.value_type, raddict::ValueType::String);
//!
//! let default = raddict::default_dictionary();
//! assert!(default.attribute_type_by_name("Framed-IP-Address").is_some());
//! ```

pub mod attribute;
pub mod default;
pub mod diagnostics;
pub mod dictionary;
pub mod parser;
pub mod util;

pub use attribute::{AttributeType, ValueError, ValueType, VENDOR_SPECIFIC};
pub use default::{
    builtin_dictionary, default_dictionary, set_default_dictionary, BootstrapError,
    DefaultDictionary, OverrideAlreadySet,
};
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics, Severity};
pub use dictionary::{Dictionary, DictionaryError, Vendor};
pub use parser::{
    parse, parse_file, parse_into, parse_reader, parse_reader_with, LineError, ParseError,
};
