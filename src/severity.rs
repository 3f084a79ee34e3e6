//! Burn severity classification contract.
//!
//! The integer codes 1–5 and their label/color pairs are a fixed external
//! contract shared with the analysis service; consumers must reproduce them
//! exactly for visual consistency. Anything else maps to `Unknown`.

use serde::{Deserialize, Serialize};

/// Ordinal burn severity class assigned per area unit by the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Low,
    Moderate,
    High,
    VeryHigh,
    Extreme,
    /// Code 0, absent, or out of range.
    Unknown,
}

impl Severity {
    /// The five known classes in ascending order, without `Unknown`.
    pub const CLASSES: [Severity; 5] = [
        Severity::Low,
        Severity::Moderate,
        Severity::High,
        Severity::VeryHigh,
        Severity::Extreme,
    ];

    /// Decode a service-provided severity code. Total: every input maps
    /// somewhere, out-of-range codes to `Unknown`.
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Severity::Low,
            2 => Severity::Moderate,
            3 => Severity::High,
            4 => Severity::VeryHigh,
            5 => Severity::Extreme,
            _ => Severity::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Severity::Low => "Low",
            Severity::Moderate => "Moderate",
            Severity::High => "High",
            Severity::VeryHigh => "Very High",
            Severity::Extreme => "Extreme",
            Severity::Unknown => "Unknown",
        }
    }

    /// Marker color for this class.
    pub fn color(self) -> &'static str {
        match self {
            Severity::Low => "#69B34C",
            Severity::Moderate => "#FAB733",
            Severity::High => "#FF8E15",
            Severity::VeryHigh => "#FF4E11",
            Severity::Extreme => "#FF0D0D",
            Severity::Unknown => "#CCCCCC",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_codes_map_to_contract_colors() {
        assert_eq!(Severity::from_code(1).color(), "#69B34C");
        assert_eq!(Severity::from_code(2).color(), "#FAB733");
        assert_eq!(Severity::from_code(3).color(), "#FF8E15");
        assert_eq!(Severity::from_code(4).color(), "#FF4E11");
        assert_eq!(Severity::from_code(5).color(), "#FF0D0D");
    }

    #[test]
    fn test_unknown_codes_map_to_neutral() {
        assert_eq!(Severity::from_code(0).color(), "#CCCCCC");
        assert_eq!(Severity::from_code(99).color(), "#CCCCCC");
        assert_eq!(Severity::from_code(-1).color(), "#CCCCCC");
    }

    #[test]
    fn test_labels() {
        assert_eq!(Severity::from_code(4).label(), "Very High");
        assert_eq!(Severity::from_code(0).label(), "Unknown");
    }

    #[test]
    fn test_classes_exclude_unknown() {
        assert_eq!(Severity::CLASSES.len(), 5);
        assert!(!Severity::CLASSES.contains(&Severity::Unknown));
    }
}
