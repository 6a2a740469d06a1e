//! Browser-local persistence of the alert email, the pseudo user id and
//! the per-ticker alert preferences.

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::Value;

use crate::models::AlertPreferences;

use super::local_store::LocalStorage;

pub const USER_ID_KEY: &str = "ft_user_id";
pub const ALERT_EMAIL_KEY: &str = "ft_alert_email";
pub const ALERT_PREFS_KEY: &str = "ft_alert_prefs_v1";

pub const MAX_EMAIL_LEN: usize = 200;

pub fn new_user_id() -> String {
    format!(
        "ft_{:x}_{}",
        rand::random::<u64>(),
        Utc::now().timestamp_millis()
    )
}

pub fn load_or_create_user_id(store: &mut LocalStorage) -> String {
    if let Some(existing) = store.get(USER_ID_KEY).filter(|s| !s.is_empty()) {
        return existing.to_string();
    }
    let id = new_user_id();
    store.set(USER_ID_KEY, id.clone());
    id
}

/// Trimmed, lower-cased and shaped like an address, or nothing.
pub fn clean_email(raw: &str) -> Option<String> {
    let e = raw.trim().to_lowercase();
    if e.is_empty() || e.chars().count() >= MAX_EMAIL_LEN || !e.contains('@') {
        return None;
    }
    Some(e)
}

pub fn stored_alert_email(store: &LocalStorage) -> Option<String> {
    store.get(ALERT_EMAIL_KEY).and_then(clean_email)
}

pub fn store_alert_email(store: &mut LocalStorage, email: &str) {
    store.set(ALERT_EMAIL_KEY, email.trim().to_lowercase());
}

pub fn load_alert_prefs(store: &LocalStorage) -> BTreeMap<String, AlertPreferences> {
    let Some(raw) = store.get(ALERT_PREFS_KEY) else {
        return BTreeMap::new();
    };

    let parsed: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(e) => {
            tracing::warn!("ignoring unreadable {}: {}", ALERT_PREFS_KEY, e);
            return BTreeMap::new();
        }
    };

    let Some(obj) = parsed.as_object() else {
        return BTreeMap::new();
    };

    obj.iter()
        .filter_map(|(k, v)| {
            let ticker = k.trim().to_uppercase();
            if ticker.is_empty() {
                return None;
            }
            Some((ticker, AlertPreferences::normalize(Some(v))))
        })
        .collect()
}

pub fn save_alert_prefs(store: &mut LocalStorage, prefs: &BTreeMap<String, AlertPreferences>) {
    match serde_json::to_string(prefs) {
        Ok(json) => store.set(ALERT_PREFS_KEY, json),
        Err(e) => tracing::warn!("could not serialize alert prefs: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Sensitivity;

    #[test]
    fn user_id_is_created_once() {
        let mut store = LocalStorage::default();
        let first = load_or_create_user_id(&mut store);
        assert!(first.starts_with("ft_"));
        let second = load_or_create_user_id(&mut store);
        assert_eq!(first, second);
        let writes = store.take_journal();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].key, USER_ID_KEY);
    }

    #[test]
    fn email_is_stored_lowercase_and_trimmed() {
        let mut store = LocalStorage::default();
        store_alert_email(&mut store, "  Jane@Example.COM ");
        assert_eq!(store.get(ALERT_EMAIL_KEY), Some("jane@example.com"));
        assert_eq!(stored_alert_email(&store).as_deref(), Some("jane@example.com"));
    }

    #[test]
    fn invalid_stored_email_reads_as_none() {
        let long = format!("{}@x.io", "a".repeat(200));
        for bad in ["", "   ", "no-at-sign", long.as_str()] {
            let store = LocalStorage::from_snapshot([(ALERT_EMAIL_KEY, bad)]);
            assert_eq!(stored_alert_email(&store), None, "{bad:?}");
        }
    }

    #[test]
    fn prefs_load_normalizes_keys_and_values() {
        let raw = r#"{ " aapl ": { "healthDelta": { "sensitivity": "LOW" } }, "": {}, "tsla": 5 }"#;
        let store = LocalStorage::from_snapshot([(ALERT_PREFS_KEY, raw)]);
        let prefs = load_alert_prefs(&store);
        assert_eq!(prefs.len(), 2);
        assert_eq!(prefs["AAPL"].health_delta.sensitivity, Sensitivity::Low);
        assert_eq!(prefs["TSLA"], AlertPreferences::default());
    }

    #[test]
    fn unreadable_prefs_load_empty() {
        for raw in ["{not json", "[1,2]", "null"] {
            let store = LocalStorage::from_snapshot([(ALERT_PREFS_KEY, raw)]);
            assert!(load_alert_prefs(&store).is_empty());
        }
    }

    #[test]
    fn prefs_round_trip_through_storage() {
        let mut store = LocalStorage::default();
        let mut prefs = BTreeMap::new();
        let mut p = AlertPreferences::default();
        p.trend_pressure = true;
        prefs.insert("NVDA".to_string(), p.clone());
        save_alert_prefs(&mut store, &prefs);
        assert_eq!(load_alert_prefs(&store)["NVDA"], p);
    }
}
