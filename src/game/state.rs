//! Game state definitions: buildings, upgrades, and the economy counters.
//!
//! The five big quantities (balance, lifetime production, click yield, APS,
//! APS boost) are `BigDecimal` so a long session can outgrow f64. Prices and
//! per-unit rates stay f64, as in the catalogs.

use bigdecimal::{BigDecimal, Zero};

use crate::game::config::{
    self, BuildingSpec, ConditionSpec, ConfigError, EffectSpec, UpgradeSpec,
};
use crate::game::Buyable;
use crate::num;

/// Building-count tiers generated for every building in the catalog.
pub const BUILDING_TIER_LEVELS: [u32; 12] =
    [15, 25, 50, 100, 200, 300, 400, 500, 750, 1000, 1500, 2000];

/// Lifetime of a floating click label, in frames (~1s at 60fps).
pub const CLICK_LABEL_LIFE: u32 = 60;

/// Cap on live click labels.
const MAX_PARTICLES: usize = 50;

/// Cap on retained log entries.
const MAX_LOG: usize = 50;

/// A production unit: repeatable purchase with a geometric price curve.
#[derive(Clone, Debug)]
pub struct Building {
    pub name: String,
    pub starting_price: f64,
    pub price_multiplier: f64,
    pub base_production: f64,
    /// Units owned; increases only via purchase.
    pub owned: u32,
    /// Accumulated from owned upgrades targeting this building (starts 1.0).
    pub production_multiplier: f64,
}

impl Building {
    fn from_spec(spec: &BuildingSpec) -> Self {
        Self {
            name: spec.name.clone(),
            starting_price: spec.starting_price,
            price_multiplier: spec.price_multiplier,
            base_production: spec.base_production,
            owned: 0,
            production_multiplier: 1.0,
        }
    }

    /// Production contribution before the global boost.
    pub fn total_atoms_per_second(&self) -> f64 {
        self.owned as f64 * self.base_production * self.production_multiplier
    }

    /// Price of the next unit: grows geometrically with units owned.
    /// `powf` so extreme owned counts overflow to infinity instead of
    /// wrapping the exponent.
    pub fn current_price(&self) -> f64 {
        self.starting_price * self.price_multiplier.powf(f64::from(self.owned))
    }

    pub fn can_be_bought(&self, atoms: &BigDecimal) -> bool {
        num::affordable(atoms, self.current_price())
    }
}

impl Buyable for Building {
    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> f64 {
        self.current_price()
    }

    fn can_be_bought(&self, atoms: &BigDecimal) -> bool {
        Building::can_be_bought(self, atoms)
    }

    fn label(&self) -> String {
        format!(
            "{} ×{} — {} atoms",
            self.name,
            self.owned,
            crate::game::logic::format_number(self.current_price())
        )
    }
}

/// A one-time purchase. Lifecycle: locked → unlocked → owned; both flags are
/// monotonic and `owned` implies `unlocked`.
#[derive(Clone, Debug)]
pub struct Upgrade {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub effect: EffectSpec,
    pub condition: ConditionSpec,
    pub unlocked: bool,
    pub owned: bool,
    /// Position among unlocked-and-unowned upgrades ordered by ascending
    /// price; recomputed every tick, None while hidden.
    pub visible_rank: Option<u16>,
}

impl Upgrade {
    fn from_spec(spec: UpgradeSpec) -> Self {
        Self {
            name: spec.name,
            description: spec.description,
            price: spec.price,
            effect: spec.effect,
            condition: spec.condition,
            unlocked: false,
            owned: false,
            visible_rank: None,
        }
    }

    /// Only unlocked, unowned upgrades are shown and purchasable.
    pub fn is_visible(&self) -> bool {
        self.unlocked && !self.owned
    }
}

impl Buyable for Upgrade {
    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> f64 {
        self.price
    }

    fn can_be_bought(&self, atoms: &BigDecimal) -> bool {
        self.is_visible() && num::affordable(atoms, self.price)
    }

    fn label(&self) -> String {
        format!(
            "{} — {} atoms",
            self.name,
            crate::game::logic::format_number(self.price)
        )
    }
}

/// A floating "+N" click label: position and remaining lifetime only, advanced
/// once per tick by the display layer.
#[derive(Clone, Debug)]
pub struct Particle {
    pub text: String,
    /// Column offset from the terminal's horizontal center.
    pub col_offset: i16,
    /// Remaining lifetime in frames.
    pub life: u32,
    pub max_life: u32,
}

/// In-game message log entry.
#[derive(Clone, Debug)]
pub struct LogEntry {
    pub text: String,
    pub important: bool,
}

/// Full economy state. Owned by a single orchestrator; the UI reads it only
/// through `snapshot()` and mutates it only through `logic` calls.
pub struct GameState {
    pub atoms_count: BigDecimal,
    pub total_atoms_produced: BigDecimal,
    pub total_clicks: u64,
    pub atoms_per_clicks: BigDecimal,
    /// Fraction of APS converted into bonus click yield.
    pub atoms_per_clicks_aps_boost: f64,
    pub atoms_per_second: BigDecimal,
    /// Flat additive production bonus accumulated from upgrades.
    pub atoms_per_second_boost: BigDecimal,
    /// Multiplicative factor applied to every building's output.
    pub buildings_global_boost: f64,
    pub buildings: Vec<Building>,
    pub upgrades: Vec<Upgrade>,
    pub particles: Vec<Particle>,
    pub log: Vec<LogEntry>,
    /// Whether the upgrades panel is shown instead of buildings.
    pub show_upgrades: bool,
    /// Frame counter for UI animation.
    pub frame: u32,
    /// Simple RNG state for particle jitter.
    rng_state: u32,
}

impl GameState {
    /// Build from the embedded catalogs. Fails fast on invalid configuration.
    pub fn new() -> Result<Self, ConfigError> {
        let (buildings, upgrades) = config::load_catalogs()?;
        Self::from_catalogs(buildings, upgrades)
    }

    /// Build from explicit catalogs (validated here as well, so test fixtures
    /// go through the same gate).
    pub fn from_catalogs(
        buildings: Vec<BuildingSpec>,
        upgrades: Vec<UpgradeSpec>,
    ) -> Result<Self, ConfigError> {
        config::validate(&buildings, &upgrades)?;

        let mut all_upgrades: Vec<Upgrade> =
            upgrades.into_iter().map(Upgrade::from_spec).collect();
        for spec in &buildings {
            all_upgrades.extend(building_tier_upgrades(spec).into_iter().map(Upgrade::from_spec));
        }
        all_upgrades.extend(click_milestones().into_iter().map(Upgrade::from_spec));
        all_upgrades.extend(atoms_milestones().into_iter().map(Upgrade::from_spec));

        Ok(Self {
            atoms_count: BigDecimal::zero(),
            total_atoms_produced: BigDecimal::zero(),
            total_clicks: 0,
            atoms_per_clicks: BigDecimal::from(1u32),
            atoms_per_clicks_aps_boost: 0.0,
            atoms_per_second: BigDecimal::zero(),
            atoms_per_second_boost: BigDecimal::zero(),
            buildings_global_boost: 1.0,
            buildings: buildings.iter().map(Building::from_spec).collect(),
            upgrades: all_upgrades,
            particles: Vec::new(),
            log: vec![LogEntry {
                text: "Welcome! Click the atom.".into(),
                important: true,
            }],
            show_upgrades: false,
            frame: 0,
            rng_state: 42,
        })
    }

    /// Click yield: base yield plus a fraction of APS, rounded UP to the
    /// nearest hundredth (×100, ceiling, ÷100 — never down).
    pub fn total_atoms_per_clicks(&self) -> BigDecimal {
        let aps_share = match num::big(self.atoms_per_clicks_aps_boost) {
            Some(boost) => &self.atoms_per_second * &boost,
            None => BigDecimal::zero(),
        };
        num::ceil_hundredths(&(&self.atoms_per_clicks + &aps_share))
    }

    pub fn building_index(&self, name: &str) -> Option<usize> {
        self.buildings.iter().position(|b| b.name == name)
    }

    /// Upgrade indices ordered by visible rank.
    pub fn visible_upgrade_indices(&self) -> Vec<usize> {
        let mut visible: Vec<usize> = (0..self.upgrades.len())
            .filter(|&i| self.upgrades[i].visible_rank.is_some())
            .collect();
        visible.sort_by_key(|&i| self.upgrades[i].visible_rank);
        visible
    }

    pub fn add_log(&mut self, text: &str, important: bool) {
        self.log.push(LogEntry {
            text: text.to_string(),
            important,
        });
        if self.log.len() > MAX_LOG {
            self.log.remove(0);
        }
    }

    pub fn push_particle(&mut self, particle: Particle) {
        self.particles.push(particle);
        if self.particles.len() > MAX_PARTICLES {
            self.particles.remove(0);
        }
    }

    /// Xorshift step for cosmetic jitter.
    pub fn next_random(&mut self) -> u32 {
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng_state = x;
        x
    }

    /// Read-only view for the display layer: plain strings and numbers only.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            atoms: num::whole(&self.atoms_count),
            atoms_per_second: num::trunc_hundredths(&self.atoms_per_second),
            atoms_per_click: self.total_atoms_per_clicks().to_string(),
            clicks_per_second: self.particles.len(),
            buildings: self
                .buildings
                .iter()
                .map(|b| BuildingView {
                    name: b.name.clone(),
                    owned: b.owned,
                    price: b.current_price(),
                    label: Buyable::label(b),
                    can_be_bought: Buyable::can_be_bought(b, &self.atoms_count),
                    production: b.total_atoms_per_second() * self.buildings_global_boost,
                })
                .collect(),
            upgrades: self
                .visible_upgrade_indices()
                .into_iter()
                .map(|i| {
                    let u = &self.upgrades[i];
                    UpgradeView {
                        name: u.name.clone(),
                        description: u.description.clone(),
                        price: u.price,
                        label: Buyable::label(u),
                        can_be_bought: Buyable::can_be_bought(u, &self.atoms_count),
                    }
                })
                .collect(),
        }
    }
}

/// Plain-data view handed to the render layer.
pub struct Snapshot {
    /// Integer part of the balance.
    pub atoms: String,
    /// Truncated to two decimals.
    pub atoms_per_second: String,
    /// Exact two-decimal string from the ceiling rule.
    pub atoms_per_click: String,
    /// Live floating labels, shown as "clicks per second".
    pub clicks_per_second: usize,
    pub buildings: Vec<BuildingView>,
    /// Visible upgrades ordered by rank.
    pub upgrades: Vec<UpgradeView>,
}

pub struct BuildingView {
    pub name: String,
    pub owned: u32,
    pub price: f64,
    /// `Buyable::label`, ready for the purchase list.
    pub label: String,
    pub can_be_bought: bool,
    pub production: f64,
}

pub struct UpgradeView {
    pub name: String,
    pub description: String,
    pub price: f64,
    /// `Buyable::label`, ready for the purchase list.
    pub label: String,
    pub can_be_bought: bool,
}

/// Building-count tiers for one building: at each level, a boost priced along
/// the building's own price curve.
pub fn building_tier_upgrades(spec: &BuildingSpec) -> Vec<UpgradeSpec> {
    BUILDING_TIER_LEVELS
        .iter()
        .map(|&level| UpgradeSpec {
            name: format!("{} {}.", level, spec.name),
            description: format!("Buy {} {}.", level, spec.name),
            price: (spec.starting_price
                * spec.price_multiplier.powi(level as i32)
                * ((level * 10) as f64).ln())
            .round(),
            effect: EffectSpec::Building {
                building: spec.name.clone(),
                multiplier: level as f64 / 10.0,
            },
            condition: ConditionSpec::Building {
                building: spec.name.clone(),
                count: level,
            },
        })
        .collect()
}

/// Click-count milestones: 100, 1000, … below 1e8.
pub fn click_milestones() -> Vec<UpgradeSpec> {
    let mut specs = Vec::new();
    let mut level: u64 = 100;
    while level < 100_000_000 {
        specs.push(UpgradeSpec {
            name: format!("{} clicks !", level),
            description: format!("You have clicked {} times.", level),
            price: (level * 10) as f64,
            effect: EffectSpec::Click {
                multiplier: (level as f64).log10(),
            },
            condition: ConditionSpec::Click { count: level },
        });
        level *= 10;
    }
    specs
}

/// Lifetime-production milestones: 1000, 10000, … below 1e21.
pub fn atoms_milestones() -> Vec<UpgradeSpec> {
    let mut specs = Vec::new();
    let mut level: f64 = 1000.0;
    while level < 1e21 {
        specs.push(UpgradeSpec {
            name: format!("{} atoms generated.", level),
            description: format!("You have generated {} total atoms.", level),
            price: level * 10.0,
            effect: EffectSpec::Aps {
                multiplier: level.log10(),
            },
            condition: ConditionSpec::Atoms { count: level },
        });
        level *= 10.0;
    }
    specs
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn spec(name: &str, price: f64, rate: f64) -> BuildingSpec {
        BuildingSpec {
            name: name.into(),
            starting_price: price,
            price_multiplier: 1.15,
            base_production: rate,
        }
    }

    #[test]
    fn building_initial_price() {
        let b = Building::from_spec(&spec("Electron", 15.0, 0.1));
        assert!((b.current_price() - 15.0).abs() < 0.001);
    }

    #[test]
    fn building_price_scales_geometrically() {
        let mut b = Building::from_spec(&spec("Electron", 15.0, 0.1));
        b.owned = 1;
        assert!((b.current_price() - 15.0 * 1.15).abs() < 0.01);
        b.owned = 10;
        assert!((b.current_price() - 15.0 * 1.15_f64.powi(10)).abs() < 0.1);
    }

    #[test]
    fn building_production_linear_in_owned() {
        let mut b = Building::from_spec(&spec("Proton", 100.0, 1.0));
        assert!((b.total_atoms_per_second() - 0.0).abs() < f64::EPSILON);
        b.owned = 5;
        assert!((b.total_atoms_per_second() - 5.0).abs() < 0.001);
        b.production_multiplier = 2.0;
        assert!((b.total_atoms_per_second() - 10.0).abs() < 0.001);
    }

    #[test]
    fn overflowed_price_is_never_affordable() {
        let mut b = Building::from_spec(&spec("Electron", 15.0, 0.1));
        b.owned = u32::MAX;
        assert!(b.current_price().is_infinite());
        let huge = BigDecimal::from_str("1e400").unwrap();
        assert!(!Building::can_be_bought(&b, &huge));
    }

    #[test]
    fn generated_building_tier_formula() {
        let electron = spec("Electron", 15.0, 0.1);
        let tiers = building_tier_upgrades(&electron);
        assert_eq!(tiers.len(), BUILDING_TIER_LEVELS.len());

        let first = &tiers[0];
        assert_eq!(first.name, "15 Electron.");
        assert_eq!(first.description, "Buy 15 Electron.");
        let expected = (15.0 * 1.15_f64.powi(15) * 150.0_f64.ln()).round();
        assert!((first.price - expected).abs() < f64::EPSILON);
        assert_eq!(
            first.effect,
            EffectSpec::Building {
                building: "Electron".into(),
                multiplier: 1.5
            }
        );
        assert_eq!(
            first.condition,
            ConditionSpec::Building {
                building: "Electron".into(),
                count: 15
            }
        );

        let last = tiers.last().unwrap();
        assert_eq!(
            last.condition,
            ConditionSpec::Building {
                building: "Electron".into(),
                count: 2000
            }
        );
        assert_eq!(
            last.effect,
            EffectSpec::Building {
                building: "Electron".into(),
                multiplier: 200.0
            }
        );
    }

    #[test]
    fn generated_click_milestones() {
        let specs = click_milestones();
        // 100 .. 1e7 inclusive, decades
        assert_eq!(specs.len(), 6);
        assert_eq!(specs[0].condition, ConditionSpec::Click { count: 100 });
        assert_eq!(
            specs.last().unwrap().condition,
            ConditionSpec::Click { count: 10_000_000 }
        );

        // level 1000 → price 10000, multiplier log10(1000) = 3
        let thousand = &specs[1];
        assert_eq!(thousand.name, "1000 clicks !");
        assert!((thousand.price - 10_000.0).abs() < f64::EPSILON);
        assert_eq!(thousand.effect, EffectSpec::Click { multiplier: 3.0 });
    }

    #[test]
    fn generated_atoms_milestones() {
        let specs = atoms_milestones();
        // 1e3 .. 1e20 inclusive, decades
        assert_eq!(specs.len(), 18);
        assert_eq!(specs[0].condition, ConditionSpec::Atoms { count: 1000.0 });
        assert!((specs[0].price - 10_000.0).abs() < f64::EPSILON);
        assert_eq!(specs[0].effect, EffectSpec::Aps { multiplier: 3.0 });
        assert_eq!(
            specs.last().unwrap().condition,
            ConditionSpec::Atoms { count: 1e20 }
        );
        assert_eq!(
            specs.last().unwrap().effect,
            EffectSpec::Aps { multiplier: 20.0 }
        );
    }

    #[test]
    fn state_includes_generated_tiers() {
        let state = GameState::from_catalogs(vec![spec("Electron", 15.0, 0.1)], vec![]).unwrap();
        // 12 building tiers + 6 click milestones + 18 atoms milestones
        assert_eq!(state.upgrades.len(), 12 + 6 + 18);
        assert!(state.upgrades.iter().all(|u| !u.unlocked && !u.owned));
    }

    #[test]
    fn base_click_yield_is_one() {
        let state = GameState::from_catalogs(vec![], vec![]).unwrap();
        assert_eq!(state.total_atoms_per_clicks().to_string(), "1.00");
    }

    #[test]
    fn click_yield_includes_aps_share() {
        let mut state = GameState::from_catalogs(vec![], vec![]).unwrap();
        state.atoms_per_second = BigDecimal::from(10u32);
        state.atoms_per_clicks_aps_boost = 0.5;
        // 1 + 10 * 0.5 = 6.00
        assert_eq!(state.total_atoms_per_clicks().to_string(), "6.00");
    }

    #[test]
    fn click_yield_rounds_upward() {
        let mut state = GameState::from_catalogs(vec![], vec![]).unwrap();
        state.atoms_per_second = BigDecimal::from(1u32);
        state.atoms_per_clicks_aps_boost = 0.001;
        // 1.001 rounds UP to 1.01, never to 1.00
        assert_eq!(state.total_atoms_per_clicks().to_string(), "1.01");
    }

    #[test]
    fn log_is_capped() {
        let mut state = GameState::from_catalogs(vec![], vec![]).unwrap();
        for i in 0..80 {
            state.add_log(&format!("msg {i}"), false);
        }
        assert!(state.log.len() <= 50);
    }

    #[test]
    fn particles_are_capped() {
        let mut state = GameState::from_catalogs(vec![], vec![]).unwrap();
        for i in 0..80 {
            state.push_particle(Particle {
                text: format!("+{i}"),
                col_offset: 0,
                life: CLICK_LABEL_LIFE,
                max_life: CLICK_LABEL_LIFE,
            });
        }
        assert!(state.particles.len() <= 50);
    }

    #[test]
    fn snapshot_is_plain_data() {
        let mut state =
            GameState::from_catalogs(vec![spec("Electron", 15.0, 0.1)], vec![]).unwrap();
        state.atoms_count = BigDecimal::from_str("1234.9").unwrap();
        state.buildings[0].owned = 3;

        let snap = state.snapshot();
        assert_eq!(snap.atoms, "1234");
        assert_eq!(snap.buildings.len(), 1);
        assert_eq!(snap.buildings[0].owned, 3);
        assert!(snap.buildings[0].can_be_bought);
        assert!(snap.upgrades.is_empty(), "nothing unlocked yet");
    }

    #[test]
    fn buyable_labels_cover_both_kinds() {
        let state = GameState::from_catalogs(vec![spec("Electron", 15.0, 0.1)], vec![]).unwrap();
        let b: &dyn Buyable = &state.buildings[0];
        assert!(b.label().contains("Electron"));
        let u: &dyn Buyable = &state.upgrades[0];
        assert!(u.label().contains("atoms"));
    }
}
