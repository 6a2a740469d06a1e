pub mod alert;
pub mod analysis;
pub mod prefs;
pub mod session;

pub use alert::AlertRule;
pub use analysis::{AnalysisResult, TrendSignals, WatchlistItem};
pub use prefs::{AlertPreferences, PrefChange, Sensitivity};
pub use session::SessionState;
