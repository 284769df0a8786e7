//! HUD and menu overlay model
//!
//! `HudView` is what the DOM overlay shows for a snapshot: padded score,
//! hearts, combo callout and which panel (title or game over) is up. The web
//! host diffs it against the last applied view and only touches the DOM on
//! change.

use crate::sim::{ComboTier, Lifecycle, Snapshot};

/// Element ids the web host creates and updates
pub mod ids {
    pub const ROOT: &str = "nd-overlay";
    pub const BACK: &str = "nd-back";
    pub const SCORE: &str = "nd-score";
    pub const HEARTS: &str = "nd-hearts";
    pub const COMBO: &str = "nd-combo";
    pub const COMBO_VALUE: &str = "nd-combo-value";
    pub const START_PANEL: &str = "nd-start";
    pub const BEGIN: &str = "nd-begin";
    pub const GAME_OVER_PANEL: &str = "nd-game-over";
    pub const FINAL_SCORE: &str = "nd-final-score";
    pub const EXIT: &str = "nd-exit";
    pub const RETRY: &str = "nd-retry";
}

/// Class that hides an overlay element
pub const HIDDEN: &str = "nd-hidden";

/// Injected once with the overlay so the crate needs no page stylesheet
pub const STYLESHEET: &str = "
#nd-overlay { position: fixed; inset: 0; pointer-events: none; font-family: monospace; color: #fff; user-select: none; }
#nd-overlay .nd-hidden { display: none !important; }
#nd-overlay button { pointer-events: auto; cursor: pointer; font: inherit; font-weight: bold; letter-spacing: 0.15em; }
#nd-back { position: absolute; top: 24px; left: 24px; width: 40px; height: 40px; border: none; border-radius: 50%; background: rgba(255,255,255,0.1); color: #fff; }
.nd-score-box { position: absolute; top: 24px; left: 80px; display: flex; flex-direction: column; }
.nd-label { font-size: 12px; opacity: 0.5; text-transform: uppercase; letter-spacing: 0.2em; }
#nd-score { font-size: 24px; font-weight: bold; font-variant-numeric: tabular-nums; }
#nd-hearts { position: absolute; top: 24px; right: 24px; font-size: 28px; letter-spacing: 4px; }
.nd-heart { color: rgba(255,255,255,0.2); }
.nd-heart.nd-full { color: #ef4444; }
#nd-combo { position: absolute; top: 50%; left: 50%; transform: translate(-50%, -50%); display: flex; flex-direction: column; align-items: center; }
#nd-combo-value { font-size: 96px; font-weight: 900; font-style: italic; text-shadow: 0 0 20px rgba(255,255,255,0.5); }
#nd-combo.nd-tier-hot #nd-combo-value { color: #fef08a; }
#nd-combo.nd-tier-blazing #nd-combo-value { color: #fbbf24; }
.nd-panel { position: absolute; inset: 0; display: flex; flex-direction: column; align-items: center; justify-content: center; gap: 16px; pointer-events: auto; }
#nd-start { background: rgba(0,0,0,0.8); }
#nd-game-over { background: rgba(69,10,10,0.9); }
.nd-title { font-size: 64px; font-weight: 900; font-style: italic; margin: 0; }
.nd-cyan { color: #22d3ee; }
.nd-hint { opacity: 0.6; text-align: center; line-height: 1.6; }
.nd-primary { padding: 16px 32px; border: none; background: #fff; color: #000; }
.nd-secondary { padding: 12px 24px; border: 1px solid rgba(255,255,255,0.2); background: transparent; color: #fff; }
.nd-row { display: flex; gap: 16px; }
";

/// Everything the overlay displays for one snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudView {
    /// Six-digit zero-padded score
    pub score: String,
    /// One entry per heart, `true` while that health point remains
    pub hearts: Vec<bool>,
    /// Combo callout, only above 1
    pub combo: Option<u32>,
    pub combo_class: &'static str,
    pub start_visible: bool,
    pub game_over_visible: bool,
    pub final_score: String,
}

impl HudView {
    pub fn new(snapshot: &Snapshot) -> Self {
        let hearts = (0..snapshot.max_health)
            .map(|i| i < snapshot.health)
            .collect();
        let combo = (snapshot.combo_tier != ComboTier::None).then_some(snapshot.combo);

        Self {
            score: format!("{:06}", snapshot.score),
            hearts,
            combo,
            combo_class: tier_class(snapshot.combo_tier),
            start_visible: snapshot.lifecycle == Lifecycle::Start,
            game_over_visible: snapshot.lifecycle == Lifecycle::GameOver,
            final_score: format!("SCORE: {}", snapshot.score),
        }
    }
}

impl From<&Snapshot> for HudView {
    fn from(snapshot: &Snapshot) -> Self {
        Self::new(snapshot)
    }
}

/// CSS class for the combo callout color
pub fn tier_class(tier: ComboTier) -> &'static str {
    match tier {
        ComboTier::None => HIDDEN,
        ComboTier::Normal => "nd-tier-normal",
        ComboTier::Hot => "nd-tier-hot",
        ComboTier::Blazing => "nd-tier-blazing",
    }
}
