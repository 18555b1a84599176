//! MAC address detection and reformatting.
//!
//! Everything here works on text. A MAC is never decoded into bytes, so the
//! case of the hex digits the user copied survives every conversion.

pub mod report;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use report::MacReport;

use crate::MAC_HEX_DIGITS;

lazy_static! {
    /// XX:XX:XX:XX:XX:XX
    static ref COLON_PAIRS: Regex =
        Regex::new(r"^(?:[0-9A-Fa-f]{2}:){5}[0-9A-Fa-f]{2}$").unwrap();

    /// XX-XX-XX-XX-XX-XX
    static ref DASH_PAIRS: Regex =
        Regex::new(r"^(?:[0-9A-Fa-f]{2}-){5}[0-9A-Fa-f]{2}$").unwrap();

    /// XXXXXXXXXXXX
    static ref BARE_DIGITS: Regex = Regex::new(r"^[0-9A-Fa-f]{12}$").unwrap();

    /// XXXX.XXXX.XXXX (Cisco)
    static ref DOTTED_QUADS: Regex =
        Regex::new(r"^(?:[0-9A-Fa-f]{4}\.){2}[0-9A-Fa-f]{4}$").unwrap();
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MacError {
    #[error("Not a MAC address: expected 12 hex digits, found {} ({digits:?})", .digits.len())]
    InvalidLength { digits: String },
}

impl MacError {
    /// The stripped hex digits, i.e. what a caller that ignores the error
    /// would have been handed.
    pub fn degraded(&self) -> &str {
        match self {
            MacError::InvalidLength { digits } => digits,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown MAC style '{0}' (expected colons, dashes, no_delimiters or dot_separated)")]
pub struct ParseStyleError(pub String);

/// Delimiter and grouping convention for rendering a MAC.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacStyle {
    #[default]
    Colons,
    Dashes,
    NoDelimiters,
    DotSeparated,
}

impl MacStyle {
    pub const ALL: [MacStyle; 4] = [
        MacStyle::Colons,
        MacStyle::Dashes,
        MacStyle::NoDelimiters,
        MacStyle::DotSeparated,
    ];

    pub fn delimiter(self) -> &'static str {
        match self {
            MacStyle::Colons => ":",
            MacStyle::Dashes => "-",
            MacStyle::NoDelimiters => "",
            MacStyle::DotSeparated => ".",
        }
    }

    /// Number of hex digits between delimiters.
    pub fn group_width(self) -> usize {
        match self {
            MacStyle::DotSeparated => 4,
            _ => 2,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MacStyle::Colons => "colons",
            MacStyle::Dashes => "dashes",
            MacStyle::NoDelimiters => "no_delimiters",
            MacStyle::DotSeparated => "dot_separated",
        }
    }

    /// Placeholder rendering, e.g. `XX:XX:XX:XX:XX:XX`.
    pub fn template(self) -> String {
        let groups = vec!["X".repeat(self.group_width()); MAC_HEX_DIGITS / self.group_width()];
        groups.join(self.delimiter())
    }
}

impl fmt::Display for MacStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MacStyle {
    type Err = ParseStyleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "colons" | "colon" => Ok(MacStyle::Colons),
            "dashes" | "dash" => Ok(MacStyle::Dashes),
            "no_delimiters" | "none" | "bare" => Ok(MacStyle::NoDelimiters),
            "dot_separated" | "dots" | "dot" | "cisco" => Ok(MacStyle::DotSeparated),
            other => Err(ParseStyleError(other.to_string())),
        }
    }
}

/// Returns true iff the trimmed text is a MAC address in one of the
/// accepted surface syntaxes.
///
/// The whole string must match; a MAC embedded in a sentence does not count.
/// Colon and dash separators may not be mixed within one address.
pub fn is_mac_address(text: &str) -> bool {
    detect_style(text).is_some()
}

/// Reports which style `text` is already written in, if it is a MAC at all.
pub fn detect_style(text: &str) -> Option<MacStyle> {
    let trimmed = text.trim();

    if COLON_PAIRS.is_match(trimmed) {
        Some(MacStyle::Colons)
    } else if DASH_PAIRS.is_match(trimmed) {
        Some(MacStyle::Dashes)
    } else if BARE_DIGITS.is_match(trimmed) {
        Some(MacStyle::NoDelimiters)
    } else if DOTTED_QUADS.is_match(trimmed) {
        Some(MacStyle::DotSeparated)
    } else {
        None
    }
}

/// Removes every character that is not an ASCII hex digit.
pub fn strip_non_hex(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_hexdigit()).collect()
}

/// Renders `mac` in `style`.
///
/// Any delimiters (or other junk) in the input are discarded first. If what
/// remains is not exactly 12 hex digits the result is
/// [`MacError::InvalidLength`] carrying those digits.
pub fn format_mac_address(mac: &str, style: MacStyle) -> Result<String, MacError> {
    let digits = strip_non_hex(mac);
    if digits.len() != MAC_HEX_DIGITS {
        return Err(MacError::InvalidLength { digits });
    }

    let width = style.group_width();
    let groups: Vec<&str> = (0..MAC_HEX_DIGITS)
        .step_by(width)
        .map(|start| &digits[start..start + width])
        .collect();

    Ok(groups.join(style.delimiter()))
}

/// Lowercases text that is entirely uppercase, uppercases everything else.
///
/// Text without any cased characters counts as "not uppercase", and so does
/// text containing a titlecase letter such as `ǅ`.
pub fn convert_case(text: &str) -> String {
    if is_all_upper(text) {
        text.to_lowercase()
    } else {
        text.to_uppercase()
    }
}

fn is_all_upper(text: &str) -> bool {
    let mut has_cased = false;
    for c in text.chars() {
        if c.is_lowercase() || is_titlecase(c) {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

/// Letters like `ǅ` are neither upper nor lower but change under both
/// mappings.
fn is_titlecase(c: char) -> bool {
    !c.is_uppercase()
        && !c.is_lowercase()
        && c.to_lowercase().ne(std::iter::once(c))
        && c.to_uppercase().ne(std::iter::once(c))
}
