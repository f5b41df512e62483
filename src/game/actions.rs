//! Semantic action IDs for click targets.
//!
//! Each constant is a distinct clickable action in the UI, registered during
//! render and dispatched via `InputEvent::Click`.

// ── Core actions ────────────────────────────────────────────────
pub const CLICK_ATOM: u16 = 0;
pub const TOGGLE_PANEL: u16 = 1;

// ── Building purchase (base + building index) ───────────────────
pub const BUY_BUILDING_BASE: u16 = 100;

// ── Upgrade purchase (base + visible rank) ──────────────────────
pub const BUY_UPGRADE_BASE: u16 = 200;
