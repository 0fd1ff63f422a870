//! Material-handling machinery classes and the aisle widths they need.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::LayoutError;

/// Vehicle class operating in the warehouse aisles.
///
/// The active class decides the minimum safe width between facing shelf
/// rows. Exactly one class is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MachineryClass {
    /// Pallet jack
    Transpaleta,
    /// Walkie stacker
    Apilador,
    /// Reach truck
    #[default]
    Retractil,
    /// Counterbalance forklift
    Contrapesada,
    /// Very-narrow-aisle turret truck
    Trilateral,
}

impl MachineryClass {
    /// Every class, in catalogue order.
    pub const ALL: [MachineryClass; 5] = [
        MachineryClass::Transpaleta,
        MachineryClass::Apilador,
        MachineryClass::Retractil,
        MachineryClass::Contrapesada,
        MachineryClass::Trilateral,
    ];

    /// Minimum aisle width in metres.
    pub fn min_aisle_width(&self) -> f64 {
        match self {
            Self::Transpaleta => 1.8,
            Self::Apilador => 2.3,
            Self::Retractil => 2.8,
            Self::Contrapesada => 3.6,
            Self::Trilateral => 1.7,
        }
    }

    /// Identifier used in configuration files and on the command line.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Transpaleta => "transpaleta",
            Self::Apilador => "apilador",
            Self::Retractil => "retractil",
            Self::Contrapesada => "contrapesada",
            Self::Trilateral => "trilateral",
        }
    }

    /// Human readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Transpaleta => "Pallet jack",
            Self::Apilador => "Stacker",
            Self::Retractil => "Reach truck",
            Self::Contrapesada => "Counterbalance forklift",
            Self::Trilateral => "Turret truck (VNA)",
        }
    }
}

impl std::fmt::Display for MachineryClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for MachineryClass {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('á', "a");
        Self::ALL
            .into_iter()
            .find(|class| class.id() == normalized)
            .ok_or_else(|| LayoutError::UnknownMachinery(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_reach_truck() {
        assert_eq!(MachineryClass::default(), MachineryClass::Retractil);
        assert_eq!(MachineryClass::default().min_aisle_width(), 2.8);
    }

    #[test]
    fn test_parse_accepts_accents_and_case() {
        assert_eq!(
            "Retráctil".parse::<MachineryClass>().unwrap(),
            MachineryClass::Retractil
        );
        assert_eq!(
            " TRILATERAL ".parse::<MachineryClass>().unwrap(),
            MachineryClass::Trilateral
        );
        assert!("forklift".parse::<MachineryClass>().is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_ids() {
        let json = serde_json::to_string(&MachineryClass::Contrapesada).unwrap();
        assert_eq!(json, "\"contrapesada\"");
        let back: MachineryClass = serde_json::from_str("\"apilador\"").unwrap();
        assert_eq!(back, MachineryClass::Apilador);
    }
}
