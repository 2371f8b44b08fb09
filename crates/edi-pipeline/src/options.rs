//! Per-request processing options

use serde::{Deserialize, Serialize};

/// Switches for the optional pipeline stages and response extras
///
/// Every switch is off by default; a request without options only tokenizes
/// and extracts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingOptions {
    /// Run structural validation before extraction
    pub validate_format: bool,
    /// Run business-rule validation after extraction
    pub validate_business_rules: bool,
    /// Add a summary message with segment count and detected version
    pub include_parsing_details: bool,
    /// Return the tokenized segments with a successful outcome
    pub include_raw_segments: bool,
}

impl ProcessingOptions {
    /// Options with every switch on
    #[must_use]
    pub fn all() -> Self {
        Self {
            validate_format: true,
            validate_business_rules: true,
            include_parsing_details: true,
            include_raw_segments: true,
        }
    }

    /// Options running both validation stages and nothing else
    #[must_use]
    pub fn validating() -> Self {
        Self {
            validate_format: true,
            validate_business_rules: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_keys_default_to_off() {
        let options: ProcessingOptions =
            serde_json::from_str(r#"{"validate_format": true}"#).unwrap();

        assert!(options.validate_format);
        assert!(!options.validate_business_rules);
        assert!(!options.include_raw_segments);
    }

    #[test]
    fn test_presets() {
        let empty: ProcessingOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, ProcessingOptions::default());
        assert!(ProcessingOptions::all().include_parsing_details);
        assert!(!ProcessingOptions::validating().include_raw_segments);
    }
}
