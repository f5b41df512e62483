//! Catalog loading and validation.
//!
//! The building and upgrade catalogs are JSON embedded at compile time,
//! parsed into typed specs and validated before the simulation ever sees
//! them. Any invalid record aborts startup with a `ConfigError`; no untyped
//! data reaches the game state.

use serde::Deserialize;
use thiserror::Error;

/// One building record from `assets/buildings.json`.
#[derive(Clone, Debug, Deserialize)]
pub struct BuildingSpec {
    pub name: String,
    pub starting_price: f64,
    pub price_multiplier: f64,
    pub base_production: f64,
}

/// One upgrade record from `assets/upgrades.json`.
#[derive(Clone, Debug, Deserialize)]
pub struct UpgradeSpec {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub effect: EffectSpec,
    pub condition: ConditionSpec,
}

/// What an upgrade does when it becomes owned.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum EffectSpec {
    /// Multiply the named building's production by `1 + multiplier`.
    Building { building: String, multiplier: f64 },
    /// Multiply the base click yield by `1 + multiplier`.
    Click { multiplier: f64 },
    /// Add `multiplier` to the flat atoms-per-second boost.
    Aps { multiplier: f64 },
}

/// Threshold gating an upgrade's visibility and purchasability.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ConditionSpec {
    /// Owned count of the named building reaches `count`.
    Building { building: String, count: u32 },
    /// Total clicks reach `count`.
    Click { count: u64 },
    /// Lifetime atoms produced reach `count`.
    Atoms { count: f64 },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("catalog is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("duplicate building name {0:?}")]
    DuplicateBuilding(String),
    #[error("building {0:?}: price and production must be positive")]
    NonPositiveNumber(String),
    #[error("building {0:?}: price multiplier must be greater than 1")]
    GrowthTooLow(String),
    #[error("upgrade {0:?}: price must be positive and finite")]
    BadUpgradePrice(String),
    #[error("upgrade {upgrade:?} references unknown building {building:?}")]
    UnknownBuilding { upgrade: String, building: String },
}

const BUILDINGS_JSON: &str = include_str!("../../assets/buildings.json");
const UPGRADES_JSON: &str = include_str!("../../assets/upgrades.json");

/// Parse and validate the embedded catalogs.
pub fn load_catalogs() -> Result<(Vec<BuildingSpec>, Vec<UpgradeSpec>), ConfigError> {
    let buildings: Vec<BuildingSpec> = serde_json::from_str(BUILDINGS_JSON)?;
    let upgrades: Vec<UpgradeSpec> = serde_json::from_str(UPGRADES_JSON)?;
    validate(&buildings, &upgrades)?;
    Ok((buildings, upgrades))
}

/// Fail-fast validation of a pair of catalogs.
pub fn validate(buildings: &[BuildingSpec], upgrades: &[UpgradeSpec]) -> Result<(), ConfigError> {
    let mut names: Vec<&str> = Vec::with_capacity(buildings.len());
    for b in buildings {
        if names.contains(&b.name.as_str()) {
            return Err(ConfigError::DuplicateBuilding(b.name.clone()));
        }
        names.push(&b.name);

        if !(b.starting_price > 0.0 && b.starting_price.is_finite())
            || !(b.base_production > 0.0 && b.base_production.is_finite())
        {
            return Err(ConfigError::NonPositiveNumber(b.name.clone()));
        }
        if !(b.price_multiplier > 1.0 && b.price_multiplier.is_finite()) {
            return Err(ConfigError::GrowthTooLow(b.name.clone()));
        }
    }

    for u in upgrades {
        if !(u.price > 0.0 && u.price.is_finite()) {
            return Err(ConfigError::BadUpgradePrice(u.name.clone()));
        }
        // An upgrade may reference a building from both sides; check each.
        if let EffectSpec::Building { building, .. } = &u.effect {
            if !names.contains(&building.as_str()) {
                return Err(ConfigError::UnknownBuilding {
                    upgrade: u.name.clone(),
                    building: building.clone(),
                });
            }
        }
        if let ConditionSpec::Building { building, .. } = &u.condition {
            if !names.contains(&building.as_str()) {
                return Err(ConfigError::UnknownBuilding {
                    upgrade: u.name.clone(),
                    building: building.clone(),
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn building(name: &str) -> BuildingSpec {
        BuildingSpec {
            name: name.into(),
            starting_price: 15.0,
            price_multiplier: 1.15,
            base_production: 0.1,
        }
    }

    #[test]
    fn embedded_catalogs_are_valid() {
        let (buildings, upgrades) = load_catalogs().expect("embedded catalogs must validate");
        assert!(!buildings.is_empty());
        assert!(!upgrades.is_empty());
    }

    #[test]
    fn duplicate_building_rejected() {
        let err = validate(&[building("Electron"), building("Electron")], &[]).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateBuilding(n) if n == "Electron"));
    }

    #[test]
    fn non_positive_price_rejected() {
        let mut b = building("Electron");
        b.starting_price = 0.0;
        assert!(matches!(
            validate(&[b], &[]).unwrap_err(),
            ConfigError::NonPositiveNumber(_)
        ));
    }

    #[test]
    fn flat_price_curve_rejected() {
        let mut b = building("Electron");
        b.price_multiplier = 1.0;
        assert!(matches!(
            validate(&[b], &[]).unwrap_err(),
            ConfigError::GrowthTooLow(_)
        ));
    }

    #[test]
    fn unknown_effect_target_rejected() {
        let u = UpgradeSpec {
            name: "Ghost".into(),
            description: String::new(),
            price: 10.0,
            effect: EffectSpec::Building {
                building: "Missing".into(),
                multiplier: 1.0,
            },
            condition: ConditionSpec::Click { count: 1 },
        };
        let err = validate(&[building("Electron")], &[u]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownBuilding { .. }));
    }

    #[test]
    fn unknown_condition_target_rejected() {
        let u = UpgradeSpec {
            name: "Ghost".into(),
            description: String::new(),
            price: 10.0,
            effect: EffectSpec::Click { multiplier: 1.0 },
            condition: ConditionSpec::Building {
                building: "Missing".into(),
                count: 5,
            },
        };
        let err = validate(&[building("Electron")], &[u]).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownBuilding { .. }));
    }

    #[test]
    fn tagged_effect_parses_from_json() {
        let e: EffectSpec =
            serde_json::from_str(r#"{"kind":"building","building":"Electron","multiplier":1.5}"#)
                .unwrap();
        assert_eq!(
            e,
            EffectSpec::Building {
                building: "Electron".into(),
                multiplier: 1.5
            }
        );

        let c: ConditionSpec = serde_json::from_str(r#"{"kind":"atoms","count":1000.0}"#).unwrap();
        assert_eq!(c, ConditionSpec::Atoms { count: 1000.0 });
    }
}
