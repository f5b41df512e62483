//! Economy logic — pure functions over `GameState`, fully testable.
//!
//! Purchase attempts are boolean no-ops when invalid: the UI gates on
//! `can_be_bought`, but every operation re-validates against the live state
//! since the UI may act on a stale snapshot.

use bigdecimal::{BigDecimal, Zero};

use super::config::{ConditionSpec, EffectSpec};
use super::state::{GameState, Particle, CLICK_LABEL_LIFE};
use crate::num;

/// Manual click at `col_offset` columns from center: grant the click yield,
/// bump the counters, spawn a floating label with a little jitter.
pub fn click(state: &mut GameState, col_offset: i16) {
    let grant = state.total_atoms_per_clicks();
    state.atoms_count = &state.atoms_count + &grant;
    state.total_atoms_produced = &state.total_atoms_produced + &grant;
    state.total_clicks += 1;

    let jitter = (state.next_random() % 11) as i16 - 5;
    state.push_particle(Particle {
        text: format!("+{grant}"),
        col_offset: col_offset.saturating_add(jitter),
        life: CLICK_LABEL_LIFE,
        max_life: CLICK_LABEL_LIFE,
    });
}

/// One simulation step per host frame. Order is fixed: animation state, then
/// APS recomputation, then accumulation, then unlock evaluation — a threshold
/// crossed by this frame's production unlocks on this same frame.
pub fn tick(state: &mut GameState, frames_per_second: f64) {
    state.frame = state.frame.wrapping_add(1);
    for p in &mut state.particles {
        p.life = p.life.saturating_sub(1);
    }
    state.particles.retain(|p| p.life > 0);

    calculate_aps(state);

    if frames_per_second > 0.0 {
        if let Some(rate) = num::big(frames_per_second) {
            let step = &state.atoms_per_second / &rate;
            state.atoms_count = &state.atoms_count + &step;
            state.total_atoms_produced = &state.total_atoms_produced + &step;
        }
    }

    refresh_upgrades(state);
}

/// Recompute atoms-per-second from the buildings plus the flat boost. An
/// empty building set reduces to zero, not a failure.
pub fn calculate_aps(state: &mut GameState) {
    let from_buildings: f64 = state
        .buildings
        .iter()
        .map(|b| b.total_atoms_per_second() * state.buildings_global_boost)
        .sum();
    let base = num::big(from_buildings).unwrap_or_else(BigDecimal::zero);
    state.atoms_per_second = &base + &state.atoms_per_second_boost;
}

/// Unlock pass plus visible re-ranking. Conditions are evaluated every tick
/// for upgrades not yet unlocked; an unlocked flag never reverts. Visible
/// upgrades are ranked by ascending price, catalog order breaking ties.
pub fn refresh_upgrades(state: &mut GameState) {
    for i in 0..state.upgrades.len() {
        if state.upgrades[i].unlocked {
            continue;
        }
        if condition_met(state, &state.upgrades[i].condition.clone()) {
            state.upgrades[i].unlocked = true;
            let name = state.upgrades[i].name.clone();
            state.add_log(&format!("✦ Unlocked: {name}"), true);
        }
    }

    let mut order: Vec<usize> = (0..state.upgrades.len()).collect();
    order.sort_by(|&a, &b| state.upgrades[a].price.total_cmp(&state.upgrades[b].price));
    let mut rank: u16 = 0;
    for i in order {
        let upgrade = &mut state.upgrades[i];
        upgrade.visible_rank = if upgrade.is_visible() {
            let r = rank;
            rank += 1;
            Some(r)
        } else {
            None
        };
    }
}

fn condition_met(state: &GameState, condition: &ConditionSpec) -> bool {
    match condition {
        ConditionSpec::Building { building, count } => state
            .building_index(building)
            .map_or(false, |i| state.buildings[i].owned >= *count),
        ConditionSpec::Click { count } => state.total_clicks >= *count,
        ConditionSpec::Atoms { count } => {
            num::big(*count).map_or(false, |c| state.total_atoms_produced >= c)
        }
    }
}

/// Buy one unit of the building at `index`. Silent no-op when the index is
/// bad or funds are short; boundary is inclusive (balance == price buys).
pub fn buy_building(state: &mut GameState, index: usize) -> bool {
    let Some(building) = state.buildings.get(index) else {
        return false;
    };
    let Some(cost) = num::big(building.current_price()) else {
        return false;
    };
    if state.atoms_count < cost {
        return false;
    }

    state.atoms_count = &state.atoms_count - &cost;
    state.buildings[index].owned += 1;
    let text = format!(
        "Bought {} ({} owned)",
        state.buildings[index].name, state.buildings[index].owned
    );
    state.add_log(&text, false);
    true
}

/// Buy the upgrade at catalog `index`. Valid only when unlocked, unowned, and
/// affordable; the effect is applied exactly once, irreversibly.
pub fn buy_upgrade(state: &mut GameState, index: usize) -> bool {
    let Some(upgrade) = state.upgrades.get(index) else {
        return false;
    };
    if !upgrade.unlocked || upgrade.owned {
        return false;
    }
    let Some(cost) = num::big(upgrade.price) else {
        return false;
    };
    if state.atoms_count < cost {
        return false;
    }

    state.atoms_count = &state.atoms_count - &cost;
    state.upgrades[index].owned = true;
    apply_effect(state, index);
    let name = state.upgrades[index].name.clone();
    state.add_log(&format!("✦ {name} purchased!"), true);
    true
}

/// Buy a visible upgrade by its display rank.
pub fn buy_upgrade_by_rank(state: &mut GameState, rank: u16) -> bool {
    match state
        .upgrades
        .iter()
        .position(|u| u.visible_rank == Some(rank))
    {
        Some(index) => buy_upgrade(state, index),
        None => false,
    }
}

/// Apply a freshly-owned upgrade's effect. Building boosts stack
/// multiplicatively on the target; click boosts multiply the base yield;
/// aps boosts add to the flat bonus.
fn apply_effect(state: &mut GameState, index: usize) {
    match state.upgrades[index].effect.clone() {
        EffectSpec::Building {
            building,
            multiplier,
        } => {
            if let Some(i) = state.building_index(&building) {
                state.buildings[i].production_multiplier *= 1.0 + multiplier;
            }
        }
        EffectSpec::Click { multiplier } => {
            if let Some(factor) = num::big(1.0 + multiplier) {
                state.atoms_per_clicks = &state.atoms_per_clicks * &factor;
            }
        }
        EffectSpec::Aps { multiplier } => {
            if let Some(bonus) = num::big(multiplier) {
                state.atoms_per_second_boost = &state.atoms_per_second_boost + &bonus;
            }
        }
    }
}

/// Format a price for display: comma groups, scientific past 1e15.
pub fn format_number(n: f64) -> String {
    if n < 0.0 {
        return format!("-{}", format_number(-n));
    }
    if !n.is_finite() || n >= 1e15 {
        return format!("{n:.3e}");
    }
    let int_part = n.floor() as u64;
    let frac = n - int_part as f64;

    let s = int_part.to_string();
    let mut grouped = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();

    if frac > 0.05 {
        format!("{}.{}", grouped, (frac * 10.0).round() as u8)
    } else {
        grouped
    }
}
