//! Parser fuzz target: feed arbitrary text to the dictionary parser.
//! Lines without `$INCLUDE` must never fail or panic; every bad line becomes a diagnostic.
//! Build with: cargo fuzz run parser_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    if s.to_ascii_uppercase().contains("$INCLUDE") {
        return;
    }
    let mut dict = raddict::Dictionary::new();
    let diagnostics = raddict::parse_into(s, &mut dict).expect("no include, no abort");
    for d in &diagnostics {
        assert!(!d.text.is_empty());
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run parser_fuzz");
}
