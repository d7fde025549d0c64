//! Dictionary parsing: directives, lookups, and per-line recovery.

use raddict::{parse, parse_into, DiagnosticKind, Dictionary, Severity, ValueType};

const BASIC: &str = r#"
# RFC 2865 subset
ATTRIBUTE  User-Name        1   string
ATTRIBUTE  User-Password    2   octets
ATTRIBUTE  NAS-IP-Address   4   ipaddr
ATTRIBUTE  Service-Type     6   integer
ATTRIBUTE  Event-Timestamp  55  date

VALUE  Service-Type  Login-User   1
VALUE  Service-Type  Framed-User  0x02
"#;

// ==================== ATTRIBUTE ====================

#[test]
fn attribute_lookup_by_name_and_code() {
    let d = parse(BASIC).expect("parse");
    let by_name = d.attribute_type_by_name("User-Name").expect("by name");
    let by_code = d.attribute_type(1, None).expect("by code");
    assert_eq!(by_name, by_code);
    assert_eq!(by_name.value_type, ValueType::String);
    assert_eq!(by_name.vendor_id, None);
    assert_eq!(d.attribute_type(4, None).map(|a| a.value_type), Some(ValueType::IpAddr));
    assert_eq!(d.attribute_type(55, None).map(|a| a.value_type), Some(ValueType::Integer));
    assert_eq!(d.len(), 5);
}

#[test]
fn attribute_type_names_are_case_insensitive() {
    let d = parse("ATTRIBUTE A 1 STRING\nATTRIBUTE B 2 IpAddr\nATTRIBUTE C 3 Integer8\n")
        .expect("parse");
    assert_eq!(d.attribute_type(1, None).map(|a| a.value_type), Some(ValueType::String));
    assert_eq!(d.attribute_type(2, None).map(|a| a.value_type), Some(ValueType::IpAddr));
    assert_eq!(d.attribute_type(3, None).map(|a| a.value_type), Some(ValueType::Integer));
}

#[test]
fn unknown_type_name_is_octets() {
    let d = parse("ATTRIBUTE Framed-IPv6-Prefix 97 ipv6prefix\n").expect("parse");
    assert_eq!(
        d.attribute_type_by_name("Framed-IPv6-Prefix").map(|a| a.value_type),
        Some(ValueType::Octets)
    );
}

#[test]
fn code_26_is_always_vendor_specific() {
    let d = parse("ATTRIBUTE Foo 26 integer\n").expect("parse");
    let foo = d.attribute_type(26, None).expect("Foo");
    assert_eq!(foo.value_type, ValueType::VendorSpecific);
    assert!(foo.is_vendor_specific());
}

#[test]
fn directive_names_ignore_case() {
    let d = parse("attribute User-Name 1 string\nvalue User-Name Bob 7\n").expect("parse");
    assert_eq!(d.enumeration_label(1, None, 7), Some("Bob"));
}

// ==================== VALUE ====================

#[test]
fn value_decimal_and_hex() {
    let d = parse(BASIC).expect("parse");
    let st = d.attribute_type_by_name("Service-Type").expect("Service-Type");
    assert_eq!(st.enumeration_label(1), Some("Login-User"));
    assert_eq!(st.enumeration_label(2), Some("Framed-User"));
    assert_eq!(st.enumeration_value("Framed-User"), Some(2));
    assert_eq!(d.enumeration_label(6, None, 1), Some("Login-User"));
    assert_eq!(d.enumeration_label(6, None, 3), None);
}

#[test]
fn value_for_undefined_attribute_is_skipped() {
    let src = "VALUE Service-Type Login-User 1\nATTRIBUTE Service-Type 6 integer\nVALUE Service-Type Framed-User 2\n";
    let mut d = Dictionary::new();
    let diags = parse_into(src, &mut d).expect("parse");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].line, 0);
    assert_eq!(diags[0].kind, DiagnosticKind::UnresolvedReference);
    assert_eq!(diags[0].text, "VALUE Service-Type Login-User 1");
    let st = d.attribute_type_by_name("Service-Type").expect("defined later");
    assert_eq!(st.enumeration_label(1), None);
    assert_eq!(st.enumeration_label(2), Some("Framed-User"));
}

#[test]
fn repeated_enumeration_value_last_write_wins() {
    let d = parse("ATTRIBUTE Prompt 76 integer\nVALUE Prompt No-Echo 0\nVALUE Prompt Silent 0\n")
        .expect("parse");
    let prompt = d.attribute_type_by_name("Prompt").expect("Prompt");
    assert_eq!(prompt.enumeration_label(0), Some("Silent"));
    assert_eq!(prompt.enumerations().count(), 1);
}

// ==================== VENDOR / VENDORATTR ====================

#[test]
fn vendor_fields_in_either_order() {
    for src in ["VENDOR 9 Cisco\n", "VENDOR Cisco 9\n"] {
        let d = parse(src).expect("parse");
        assert_eq!(d.vendor_name(9), Some("Cisco"), "{}", src);
        assert_eq!(d.vendor_id("Cisco"), Some(9), "{}", src);
        assert_eq!(d.vendor(9).map(|v| v.id), Some(9));
    }
}

#[test]
fn vendor_directive_is_case_sensitive() {
    let mut d = Dictionary::new();
    let diags = parse_into("Vendor 9 Cisco\n", &mut d).expect("parse");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::UnknownDirective);
    assert_eq!(diags[0].severity, Severity::Warning);
    assert_eq!(d.vendor(9), None);
}

#[test]
fn vendor_attribute_scope_is_separate_from_global() {
    let src = r#"
ATTRIBUTE  User-Name     1  string
VENDOR     9  Cisco
VENDORATTR 9  Cisco-AVPair  1  string
VENDORATTR Cisco  Cisco-Timer  0x10  integer
"#;
    let d = parse(src).expect("parse");
    let global = d.attribute_type(1, None).expect("global");
    let vendor = d.attribute_type(1, Some(9)).expect("vendor");
    assert_eq!(global.name, "User-Name");
    assert_eq!(vendor.name, "Cisco-AVPair");
    assert_eq!(vendor.vendor_id, Some(9));
    assert_eq!(d.attribute_type_by_name("Cisco-AVPair"), Some(vendor));
    let timer = d.attribute_type(16, Some(9)).expect("hex code, vendor by name");
    assert_eq!(timer.value_type, ValueType::Integer);
    assert!(d.attribute_type(16, None).is_none());
}

#[test]
fn vendor_attribute_with_unknown_vendor_name_is_skipped() {
    let mut d = Dictionary::new();
    let diags = parse_into("VENDORATTR Acme Acme-Foo 1 string\nATTRIBUTE Bar 2 string\n", &mut d)
        .expect("parse");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::UnresolvedReference);
    assert!(d.attribute_type_by_name("Acme-Foo").is_none());
    assert!(d.attribute_type_by_name("Bar").is_some());
}

#[test]
fn vendor_code_26_is_not_forced() {
    let d = parse("VENDORATTR 311 MS-CHAP2-Success 26 octets\n").expect("parse");
    assert_eq!(
        d.attribute_type(26, Some(311)).map(|a| a.value_type),
        Some(ValueType::Octets)
    );
}

// ==================== Recovery ====================

#[test]
fn bad_lines_do_not_abort_the_file() {
    let src = r#"
ATTRIBUTE  User-Name  1  string
ATTRIBUTE  Short  2
ATTRIBUTE  NotANumber  x  string
ATTRIBUTE  User-Name  3  string
ATTRIBUTE  Other-Name  1  string
BEGIN-VENDOR  Cisco
VENDOR  Acme  Widgets
VENDORATTR  9  Foo  0xZZ  string
ATTRIBUTE  Reply-Message  18  string
"#;
    let mut d = Dictionary::new();
    let diags = parse_into(src, &mut d).expect("parse");
    let kinds: Vec<_> = diags.iter().map(|m| (m.line, m.kind)).collect();
    assert_eq!(
        kinds,
        vec![
            (2, DiagnosticKind::Syntax),
            (3, DiagnosticKind::Syntax),
            (4, DiagnosticKind::Duplicate),
            (5, DiagnosticKind::Duplicate),
            (6, DiagnosticKind::UnknownDirective),
            (7, DiagnosticKind::Syntax),
            (8, DiagnosticKind::Syntax),
        ]
    );
    assert_eq!(d.len(), 2);
    assert_eq!(d.attribute_type(1, None).map(|a| a.name.as_str()), Some("User-Name"));
    assert!(d.attribute_type(3, None).is_none());
    assert!(d.attribute_type_by_name("Reply-Message").is_some());
}

#[test]
fn duplicate_vendor_id_is_rejected() {
    let mut d = Dictionary::new();
    let diags = parse_into("VENDOR 9 Cisco\nVENDOR 9 Other\n", &mut d).expect("parse");
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].kind, DiagnosticKind::Duplicate);
    assert_eq!(d.vendor_name(9), Some("Cisco"));
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let mut d = Dictionary::new();
    let diags = parse_into("\n   \n# ATTRIBUTE X 1 string\n\t# indented comment\n", &mut d)
        .expect("parse");
    assert!(diags.is_empty());
    assert!(d.is_empty());
}

#[test]
fn formats_values_through_dictionary() {
    let d = parse(BASIC).expect("parse");
    let st = d.attribute_type(6, None).expect("Service-Type");
    assert_eq!(st.format_value(&[0, 0, 0, 2]), "Framed-User");
    let nas = d.attribute_type(4, None).expect("NAS-IP-Address");
    assert_eq!(nas.format_value(&[10, 0, 0, 1]), "10.0.0.1");
}
