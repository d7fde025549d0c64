//! In-memory registry of attribute types and vendors.
//!
//! Attribute codes are scoped: the global scope (`vendor_id == None`) and each vendor scope are
//! separate namespaces, so code 1 may exist once globally and once per vendor. Attribute names
//! are unique across all scopes. The registry is append-only.

use crate::attribute::AttributeType;
use std::collections::HashMap;

/// A vendor declared with `VENDOR`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vendor {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DictionaryError {
    #[error("duplicate attribute name '{0}'")]
    DuplicateAttributeName(String),
    #[error("duplicate attribute code {code}{}", scope_suffix(.vendor_id))]
    DuplicateAttributeCode { vendor_id: Option<i32>, code: i32 },
    #[error("duplicate vendor id {0}")]
    DuplicateVendorId(i32),
    #[error("duplicate vendor name '{0}'")]
    DuplicateVendorName(String),
}

fn scope_suffix(vendor_id: &Option<i32>) -> String {
    match vendor_id {
        Some(v) => format!(" for vendor {}", v),
        None => String::new(),
    }
}

#[derive(Debug, Default, Clone)]
pub struct Dictionary {
    attributes: Vec<AttributeType>,
    by_scoped_code: HashMap<(Option<i32>, i32), usize>,
    by_name: HashMap<String, usize>,
    vendors_by_id: HashMap<i32, Vendor>,
    vendors_by_name: HashMap<String, i32>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an attribute type. Rejects a name or scoped code that is already taken.
    pub fn add_attribute_type(&mut self, attribute: AttributeType) -> Result<(), DictionaryError> {
        let key = (attribute.vendor_id, attribute.code);
        if self.by_name.contains_key(&attribute.name) {
            return Err(DictionaryError::DuplicateAttributeName(attribute.name));
        }
        if self.by_scoped_code.contains_key(&key) {
            return Err(DictionaryError::DuplicateAttributeCode {
                vendor_id: attribute.vendor_id,
                code: attribute.code,
            });
        }
        let index = self.attributes.len();
        self.by_scoped_code.insert(key, index);
        self.by_name.insert(attribute.name.clone(), index);
        self.attributes.push(attribute);
        Ok(())
    }

    pub fn add_vendor(&mut self, id: i32, name: impl Into<String>) -> Result<(), DictionaryError> {
        let name = name.into();
        if self.vendors_by_id.contains_key(&id) {
            return Err(DictionaryError::DuplicateVendorId(id));
        }
        if self.vendors_by_name.contains_key(&name) {
            return Err(DictionaryError::DuplicateVendorName(name));
        }
        self.vendors_by_name.insert(name.clone(), id);
        self.vendors_by_id.insert(id, Vendor { id, name });
        Ok(())
    }

    /// Look up by code in the global scope (`vendor_id == None`) or a vendor scope.
    pub fn attribute_type(&self, code: i32, vendor_id: Option<i32>) -> Option<&AttributeType> {
        self.by_scoped_code
            .get(&(vendor_id, code))
            .map(|&i| &self.attributes[i])
    }

    pub fn attribute_type_by_name(&self, name: &str) -> Option<&AttributeType> {
        self.by_name.get(name).map(|&i| &self.attributes[i])
    }

    /// Mutable access for enumeration insertion. Code, scope and name must not be changed
    /// through this reference.
    pub fn attribute_type_by_name_mut(&mut self, name: &str) -> Option<&mut AttributeType> {
        match self.by_name.get(name) {
            Some(&i) => Some(&mut self.attributes[i]),
            None => None,
        }
    }

    pub fn vendor(&self, id: i32) -> Option<&Vendor> {
        self.vendors_by_id.get(&id)
    }

    pub fn vendor_name(&self, id: i32) -> Option<&str> {
        self.vendors_by_id.get(&id).map(|v| v.name.as_str())
    }

    pub fn vendor_id(&self, name: &str) -> Option<i32> {
        self.vendors_by_name.get(name).copied()
    }

    /// Enumeration label of `value` for the attribute at (`code`, `vendor_id`).
    pub fn enumeration_label(&self, code: i32, vendor_id: Option<i32>, value: i32) -> Option<&str> {
        self.attribute_type(code, vendor_id)?.enumeration_label(value)
    }

    /// Attribute types in registration order.
    pub fn attribute_types(&self) -> impl Iterator<Item = &AttributeType> {
        self.attributes.iter()
    }

    /// Vendors in ascending id order.
    pub fn vendors(&self) -> Vec<&Vendor> {
        let mut vendors: Vec<&Vendor> = self.vendors_by_id.values().collect();
        vendors.sort_by_key(|v| v.id);
        vendors
    }

    /// Number of attribute types.
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// True when no attribute types are registered. Vendors are not counted.
    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::ValueType;

    #[test]
    fn rejected_attribute_leaves_registry_unchanged() {
        let mut d = Dictionary::new();
        d.add_attribute_type(AttributeType::new(1, "User-Name", ValueType::String))
            .expect("add");
        let err = d
            .add_attribute_type(AttributeType::new(1, "Other", ValueType::String))
            .unwrap_err();
        assert_eq!(
            err,
            DictionaryError::DuplicateAttributeCode { vendor_id: None, code: 1 }
        );
        assert!(d.attribute_type_by_name("Other").is_none());
        assert_eq!(d.len(), 1);
    }

    #[test]
    fn vendor_name_must_be_unique() {
        let mut d = Dictionary::new();
        d.add_vendor(9, "Cisco").expect("add");
        assert_eq!(d.add_vendor(9, "Acme"), Err(DictionaryError::DuplicateVendorId(9)));
        assert_eq!(
            d.add_vendor(10, "Cisco"),
            Err(DictionaryError::DuplicateVendorName("Cisco".to_string()))
        );
        assert_eq!(d.vendor_id("Acme"), None);
        assert!(d.vendor(10).is_none());
    }

    #[test]
    fn vendors_alone_leave_dictionary_empty() {
        let mut d = Dictionary::new();
        d.add_vendor(9, "Cisco").expect("add");
        assert_eq!(d.len(), 0);
        assert!(d.is_empty());
        assert_eq!(d.vendors().len(), 1);
    }

    #[test]
    fn duplicate_code_message_names_scope() {
        let err = DictionaryError::DuplicateAttributeCode { vendor_id: Some(9), code: 1 };
        assert_eq!(err.to_string(), "duplicate attribute code 1 for vendor 9");
    }
}
