use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use super::{detect_style, format_mac_address, MacStyle};

/// Every rendering of one candidate string, as shown to the user when a
/// MAC is detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacReport {
    pub input: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detected_style: Option<MacStyle>,
    /// Empty when the input does not hold exactly 12 hex digits.
    pub formats: BTreeMap<MacStyle, String>,
}

impl MacReport {
    pub fn new(input: &str) -> Self {
        let detected_style = detect_style(input);

        // Formatting only needs 12 hex digits, so loosely written input
        // ("aa bb cc dd ee ff") still gets renderings even though it is not
        // recognised as a MAC.
        let formats = MacStyle::ALL
            .iter()
            .filter_map(|&style| {
                format_mac_address(input, style)
                    .ok()
                    .map(|rendered| (style, rendered))
            })
            .collect();

        Self {
            input: input.to_string(),
            valid: detected_style.is_some(),
            detected_style,
            formats,
        }
    }

    pub fn rendering(&self, style: MacStyle) -> Option<&str> {
        self.formats.get(&style).map(String::as_str)
    }
}

impl fmt::Display for MacReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.detected_style {
            Some(style) => writeln!(f, "Detected MAC address: {} ({style})", self.input)?,
            None => writeln!(f, "Not a MAC address: {}", self.input)?,
        }

        for style in MacStyle::ALL {
            let rendered = self
                .rendering(style)
                .map(str::to_string)
                .unwrap_or_else(|| style.template());
            writeln!(f, "  {:<14} {}", style.name(), rendered)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_for_valid_mac() {
        let report = MacReport::new("00-1a-2b-3c-4d-5e");

        assert!(report.valid);
        assert_eq!(report.detected_style, Some(MacStyle::Dashes));
        assert_eq!(report.rendering(MacStyle::Colons), Some("00:1a:2b:3c:4d:5e"));
        assert_eq!(report.rendering(MacStyle::NoDelimiters), Some("001a2b3c4d5e"));
        assert_eq!(report.rendering(MacStyle::DotSeparated), Some("001a.2b3c.4d5e"));
    }

    #[test]
    fn test_report_for_invalid_text() {
        let report = MacReport::new("hello world");

        assert!(!report.valid);
        assert!(report.detected_style.is_none());
        assert!(report.formats.is_empty());

        let text = report.to_string();
        assert!(text.starts_with("Not a MAC address"));
        assert!(text.contains("XX:XX:XX:XX:XX:XX"));
    }

    #[test]
    fn test_report_for_loose_input() {
        let report = MacReport::new("aa bb cc dd ee ff");

        assert!(!report.valid);
        assert_eq!(report.rendering(MacStyle::Colons), Some("aa:bb:cc:dd:ee:ff"));
    }

    #[test]
    fn test_report_json_shape() {
        let report = MacReport::new("AABBCCDDEEFF");
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["valid"], true);
        assert_eq!(json["detected_style"], "no_delimiters");
        assert_eq!(json["formats"]["dot_separated"], "AABB.CCDD.EEFF");
        assert_eq!(json["formats"]["colons"], "AA:BB:CC:DD:EE:FF");
    }
}
