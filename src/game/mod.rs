//! The atom clicker game: state, logic, catalogs, and rendering glue.

pub mod actions;
pub mod config;
pub mod logic;
pub mod render;
pub mod state;

use std::cell::RefCell;
use std::rc::Rc;

use bigdecimal::BigDecimal;
use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::Frame;

use crate::input::{ClickState, InputEvent};
use self::config::ConfigError;
use self::state::GameState;

/// Contract shared by everything that can be purchased with atoms.
pub trait Buyable {
    fn name(&self) -> &str;
    /// Current price in atoms.
    fn price(&self) -> f64;
    /// Whether the given balance covers the price (boundary inclusive).
    fn can_be_bought(&self, atoms: &BigDecimal) -> bool;
    /// One-line label for the purchase list.
    fn label(&self) -> String;
}

pub struct AtomGame {
    pub state: GameState,
}

impl AtomGame {
    /// Load catalogs and build the initial state. Fails fast on invalid
    /// configuration.
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Self {
            state: GameState::new()?,
        })
    }

    /// Handle an input event. Returns true if the event was consumed.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(key) => self.handle_key(*key),
            InputEvent::Click { action, col_offset } => self.handle_action(*action, *col_offset),
        }
    }

    fn handle_key(&mut self, key: char) -> bool {
        match key {
            'c' => {
                logic::click(&mut self.state, 0);
                true
            }
            'u' => {
                self.state.show_upgrades = !self.state.show_upgrades;
                true
            }
            '1'..='9' if !self.state.show_upgrades => {
                let index = (key as u8 - b'1') as usize;
                logic::buy_building(&mut self.state, index);
                true
            }
            'a'..='l' if self.state.show_upgrades => {
                let rank = (key as u8 - b'a') as u16;
                logic::buy_upgrade_by_rank(&mut self.state, rank);
                true
            }
            _ => false,
        }
    }

    fn handle_action(&mut self, action: u16, col_offset: i16) -> bool {
        match action {
            actions::CLICK_ATOM => {
                logic::click(&mut self.state, col_offset);
                true
            }
            actions::TOGGLE_PANEL => {
                self.state.show_upgrades = !self.state.show_upgrades;
                true
            }
            a if (actions::BUY_BUILDING_BASE..actions::BUY_UPGRADE_BASE).contains(&a) => {
                let index = (a - actions::BUY_BUILDING_BASE) as usize;
                logic::buy_building(&mut self.state, index);
                true
            }
            a if a >= actions::BUY_UPGRADE_BASE => {
                let rank = a - actions::BUY_UPGRADE_BASE;
                logic::buy_upgrade_by_rank(&mut self.state, rank);
                true
            }
            _ => false,
        }
    }

    /// Advance one frame at the measured frame rate.
    pub fn tick(&mut self, frames_per_second: f64) {
        logic::tick(&mut self.state, frames_per_second);
    }

    pub fn render(&self, f: &mut Frame, area: Rect, click_state: &Rc<RefCell<ClickState>>) {
        render::render(&self.state, f, area, click_state);
    }
}
