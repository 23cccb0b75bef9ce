//! Output mode selection.

use std::ffi::OsStr;

/// Set by mackerel-agent when it asks a plugin for graph definitions.
pub const META_ENV: &str = "MACKEREL_AGENT_PLUGIN_META";

/// What a single run emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Current metric values, one line per metric.
    Values,
    /// Graph definitions as JSON.
    Definitions,
}

impl Mode {
    /// Read the mode from the process environment.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var_os(META_ENV).as_deref())
    }

    /// Any non-empty flag value selects definitions, UTF-8 or not.
    pub fn from_value(value: Option<&OsStr>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Mode::Definitions,
            _ => Mode::Values,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mode::Values => "values",
            Mode::Definitions => "definitions",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_is_values() {
        assert_eq!(Mode::from_value(None), Mode::Values);
    }

    #[test]
    fn test_empty_is_values() {
        assert_eq!(Mode::from_value(Some(OsStr::new(""))), Mode::Values);
    }

    #[test]
    fn test_non_empty_is_definitions() {
        assert_eq!(Mode::from_value(Some(OsStr::new("1"))), Mode::Definitions);
        assert_eq!(Mode::from_value(Some(OsStr::new("false"))), Mode::Definitions);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_is_definitions() {
        use std::os::unix::ffi::OsStrExt;

        let value = OsStr::from_bytes(&[0x66, 0x6f, 0xff]);
        assert!(value.to_str().is_none());
        assert_eq!(Mode::from_value(Some(value)), Mode::Definitions);
    }
}
