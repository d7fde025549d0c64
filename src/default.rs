//! Process-wide default dictionary.
//!
//! The built-in dictionary is parsed from the bundled `resources/default_dictionary` on first
//! access, exactly once even under concurrent first access. An application may install its own
//! dictionary once; from then on every call to [`default_dictionary`] returns it. The first
//! installed override wins and there is no way to remove it.

use crate::dictionary::Dictionary;
use crate::parser::{parse_into, ParseError};
use std::sync::OnceLock;

/// Contents of the bundled default dictionary.
pub const DEFAULT_DICTIONARY_SOURCE: &str = include_str!("../resources/default_dictionary");

/// The bundled dictionary could not be loaded. Nothing can work without it.
#[derive(Debug, thiserror::Error)]
#[error("default dictionary unavailable: {0}")]
pub struct BootstrapError(#[from] ParseError);

/// An override was already installed; the rejected dictionary is handed back.
#[derive(Debug, thiserror::Error)]
#[error("default dictionary override already set")]
pub struct OverrideAlreadySet(pub Dictionary);

/// Lifecycle of a default dictionary: a lazily built instance plus a one-time override slot.
#[derive(Debug)]
pub struct DefaultDictionary {
    source: &'static str,
    builtin: OnceLock<Dictionary>,
    custom: OnceLock<Dictionary>,
}

impl DefaultDictionary {
    pub const fn new(source: &'static str) -> Self {
        DefaultDictionary {
            source,
            builtin: OnceLock::new(),
            custom: OnceLock::new(),
        }
    }

    /// The override if one is installed, else the built-in dictionary.
    pub fn get(&self) -> &Dictionary {
        match self.custom.get() {
            Some(d) => d,
            None => self.builtin(),
        }
    }

    /// The built-in dictionary, ignoring any override.
    ///
    /// # Panics
    ///
    /// If the bundled source fails to load ([`BootstrapError`]).
    pub fn builtin(&self) -> &Dictionary {
        self.builtin.get_or_init(|| match load_builtin(self.source) {
            Ok(d) => d,
            Err(e) => panic!("{}", e),
        })
    }

    pub fn install_override(&self, dictionary: Dictionary) -> Result<(), OverrideAlreadySet> {
        self.custom.set(dictionary).map_err(OverrideAlreadySet)
    }

    pub fn has_override(&self) -> bool {
        self.custom.get().is_some()
    }
}

/// Parse `source` into a fresh dictionary for use as a default.
pub fn load_builtin(source: &str) -> Result<Dictionary, BootstrapError> {
    let mut dictionary = Dictionary::new();
    let diagnostics = parse_into(source, &mut dictionary)?;
    log::debug!(
        target: "raddict",
        "default dictionary loaded: {} attribute types, {} vendors, {} diagnostics",
        dictionary.len(),
        dictionary.vendors().len(),
        diagnostics.len()
    );
    Ok(dictionary)
}

static DEFAULT: DefaultDictionary = DefaultDictionary::new(DEFAULT_DICTIONARY_SOURCE);

/// The process-wide default dictionary.
pub fn default_dictionary() -> &'static Dictionary {
    DEFAULT.get()
}

/// The process-wide built-in dictionary, ignoring any override.
pub fn builtin_dictionary() -> &'static Dictionary {
    DEFAULT.builtin()
}

/// Replace the process-wide default for all later [`default_dictionary`] calls.
pub fn set_default_dictionary(dictionary: Dictionary) -> Result<(), OverrideAlreadySet> {
    DEFAULT.install_override(dictionary)
}
