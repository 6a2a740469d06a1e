use std::collections::BTreeMap;

use super::prefs::AlertPreferences;

/// In-memory state for one page load.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    /// v0 rule: Pro means an alert email has been captured.
    pub is_pro: bool,
    pub user_id: String,
    /// Working copy of the stored preferences, keyed by uppercase ticker.
    pub alert_prefs_by_ticker: BTreeMap<String, AlertPreferences>,
}
