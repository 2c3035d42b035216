pub mod history;
pub mod parse;
pub mod state;

pub use history::{HistoryLog, StatSnapshot};
pub use parse::parse_non_negative_int;
pub use state::{Preset, RateTier, StatState, WinLossRatio, PRESETS};
