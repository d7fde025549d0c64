//! Attribute types: the shape of one protocol field as declared by a dictionary.

use crate::util::{escape, hex_string};
use byteorder::{BigEndian, ByteOrder};
use std::collections::BTreeMap;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Attribute code of the Vendor-Specific wrapper attribute.
pub const VENDOR_SPECIFIC: i32 = 26;

/// Value representation of an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    String,
    Octets,
    /// 32-bit unsigned big-endian integer (also `date`, `integer8`, `integer16`).
    Integer,
    IpAddr,
    /// Wrapper carrying vendor sub-attributes.
    VendorSpecific,
    /// Attribute not described by any dictionary.
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("{value_type} value must be {expected} bytes (got {len})")]
    Length {
        value_type: ValueType,
        expected: &'static str,
        len: usize,
    },
    #[error("string value is not valid UTF-8")]
    Utf8,
}

impl ValueType {
    /// Map a dictionary type token to a value type. Unrecognized names are octets.
    pub fn from_type_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "string" => ValueType::String,
            "octets" => ValueType::Octets,
            "integer" | "integer8" | "integer16" | "date" => ValueType::Integer,
            "ipaddr" => ValueType::IpAddr,
            _ => ValueType::Octets,
        }
    }

    /// Value type of a global attribute: code 26 is always the vendor-specific wrapper.
    pub fn resolve(code: i32, type_name: &str) -> Self {
        if code == VENDOR_SPECIFIC {
            ValueType::VendorSpecific
        } else {
            Self::from_type_name(type_name)
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Octets => "octets",
            ValueType::Integer => "integer",
            ValueType::IpAddr => "ipaddr",
            ValueType::VendorSpecific => "vsa",
            ValueType::Unknown => "unknown",
        }
    }

    /// Check that raw attribute data has the shape this type requires.
    pub fn validate(&self, data: &[u8]) -> Result<(), ValueError> {
        match self {
            ValueType::Integer if data.len() != 4 => Err(ValueError::Length {
                value_type: *self,
                expected: "4",
                len: data.len(),
            }),
            ValueType::IpAddr if data.len() != 4 && data.len() != 16 => Err(ValueError::Length {
                value_type: *self,
                expected: "4 or 16",
                len: data.len(),
            }),
            ValueType::String if std::str::from_utf8(data).is_err() => Err(ValueError::Utf8),
            _ => Ok(()),
        }
    }

    /// Render raw attribute data for display. Data that fails validation is shown as hex.
    pub fn format(&self, data: &[u8]) -> String {
        if self.validate(data).is_err() {
            return hex_string(data);
        }
        match self {
            ValueType::String => escape(data),
            ValueType::Integer => BigEndian::read_u32(data).to_string(),
            ValueType::IpAddr if data.len() == 4 => {
                Ipv4Addr::from(BigEndian::read_u32(data)).to_string()
            }
            ValueType::IpAddr => Ipv6Addr::from(BigEndian::read_u128(data)).to_string(),
            ValueType::Octets | ValueType::VendorSpecific | ValueType::Unknown => hex_string(data),
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One attribute definition. `vendor_id` is `None` for the global scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeType {
    pub code: i32,
    pub vendor_id: Option<i32>,
    pub name: String,
    pub value_type: ValueType,
    enumerations: BTreeMap<i32, String>,
}

impl AttributeType {
    pub fn new(code: i32, name: impl Into<String>, value_type: ValueType) -> Self {
        AttributeType {
            code,
            vendor_id: None,
            name: name.into(),
            value_type,
            enumerations: BTreeMap::new(),
        }
    }

    pub fn vendor(vendor_id: i32, code: i32, name: impl Into<String>, value_type: ValueType) -> Self {
        AttributeType {
            vendor_id: Some(vendor_id),
            ..Self::new(code, name, value_type)
        }
    }

    /// Map `value` to `label`. A value that already has a label is relabeled.
    pub fn add_enumeration(&mut self, value: i32, label: impl Into<String>) {
        self.enumerations.insert(value, label.into());
    }

    pub fn enumeration_label(&self, value: i32) -> Option<&str> {
        self.enumerations.get(&value).map(String::as_str)
    }

    pub fn enumeration_value(&self, label: &str) -> Option<i32> {
        self.enumerations
            .iter()
            .find(|(_, l)| l.as_str() == label)
            .map(|(&v, _)| v)
    }

    /// Enumerations in ascending value order.
    pub fn enumerations(&self) -> impl Iterator<Item = (i32, &str)> {
        self.enumerations.iter().map(|(&v, l)| (v, l.as_str()))
    }

    pub fn is_vendor_specific(&self) -> bool {
        self.value_type == ValueType::VendorSpecific
    }

    /// Like [`ValueType::format`], but integers with an enumeration label print the label.
    pub fn format_value(&self, data: &[u8]) -> String {
        if self.value_type == ValueType::Integer && data.len() == 4 {
            let value = BigEndian::read_u32(data) as i32;
            if let Some(label) = self.enumeration_label(value) {
                return label.to_string();
            }
        }
        self.value_type.format(data)
    }
}
