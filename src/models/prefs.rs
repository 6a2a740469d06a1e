use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const DEFAULT_THRESHOLD_BELOW: f64 = 60.0;
pub const DEFAULT_THRESHOLD_ABOVE: f64 = 75.0;
pub const DEFAULT_DIGEST_CADENCE: &str = "daily";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sensitivity {
    Low,
    #[default]
    Med,
    High,
}

impl Sensitivity {
    pub const ALL: [Sensitivity; 3] = [Sensitivity::Low, Sensitivity::Med, Sensitivity::High];

    /// Anything that is not literally "low" or "high" (case-insensitive) is "med".
    pub fn from_loose(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "low" => Sensitivity::Low,
            "high" => Sensitivity::High,
            _ => Sensitivity::Med,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sensitivity::Low => "low",
            Sensitivity::Med => "med",
            Sensitivity::High => "high",
        }
    }

    // segmented control caption
    pub fn label(self) -> &'static str {
        match self {
            Sensitivity::Low => "Low",
            Sensitivity::Med => "Med",
            Sensitivity::High => "High",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthDelta {
    pub enabled: bool,
    pub sensitivity: Sensitivity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub enabled: bool,
    pub below: f64,
    pub above: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Digest {
    pub enabled: bool,
    pub cadence: String,
}

/// Per-ticker alert preferences. Stored in camelCase so existing
/// `ft_alert_prefs_v1` entries keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertPreferences {
    pub regime_shift: bool,
    pub health_delta: HealthDelta,
    pub trend_pressure: bool,
    pub thresholds: Thresholds,
    pub digest: Digest,
}

impl Default for AlertPreferences {
    fn default() -> Self {
        Self {
            regime_shift: true,
            health_delta: HealthDelta {
                enabled: true,
                sensitivity: Sensitivity::Med,
            },
            trend_pressure: false,
            thresholds: Thresholds {
                enabled: false,
                below: DEFAULT_THRESHOLD_BELOW,
                above: DEFAULT_THRESHOLD_ABOVE,
            },
            digest: Digest {
                enabled: false,
                cadence: DEFAULT_DIGEST_CADENCE.to_string(),
            },
        }
    }
}

/// A single edit coming from an alert preferences card.
#[derive(Debug, Clone, PartialEq)]
pub enum PrefChange {
    RegimeShift(bool),
    HealthDeltaEnabled(bool),
    Sensitivity(Sensitivity),
    TrendPressure(bool),
    ThresholdsEnabled(bool),
    ThresholdBelow(f64),
    ThresholdAbove(f64),
}

impl AlertPreferences {
    /// Builds a fully populated value out of whatever was stored or submitted.
    ///
    /// Missing or mistyped fields fall back to defaults, booleans follow
    /// JavaScript truthiness, thresholds follow `Number()` coercion and are
    /// clamped into 0..=100.
    pub fn normalize(raw: Option<&Value>) -> Self {
        let base = Self::default();
        let Some(obj) = raw.and_then(Value::as_object) else {
            return base;
        };

        let sub = |key: &str| obj.get(key).and_then(Value::as_object);

        let regime_shift = obj.get("regimeShift").map(truthy).unwrap_or(base.regime_shift);
        let trend_pressure = obj
            .get("trendPressure")
            .map(truthy)
            .unwrap_or(base.trend_pressure);

        let health_delta = match sub("healthDelta") {
            Some(hd) => HealthDelta {
                enabled: hd.get("enabled").map(truthy).unwrap_or(base.health_delta.enabled),
                sensitivity: match hd.get("sensitivity") {
                    Some(v) if truthy(v) => Sensitivity::from_loose(&js_string(v)),
                    _ => Sensitivity::Med,
                },
            },
            None => base.health_delta.clone(),
        };

        let thresholds = match sub("thresholds") {
            Some(th) => Thresholds {
                enabled: th.get("enabled").map(truthy).unwrap_or(base.thresholds.enabled),
                below: threshold_or(th.get("below"), DEFAULT_THRESHOLD_BELOW),
                above: threshold_or(th.get("above"), DEFAULT_THRESHOLD_ABOVE),
            },
            None => base.thresholds.clone(),
        };

        let digest = match sub("digest") {
            Some(d) => Digest {
                enabled: d.get("enabled").map(truthy).unwrap_or(base.digest.enabled),
                cadence: d
                    .get("cadence")
                    .and_then(Value::as_str)
                    .filter(|s| !s.trim().is_empty())
                    .unwrap_or(DEFAULT_DIGEST_CADENCE)
                    .to_string(),
            },
            None => base.digest.clone(),
        };

        Self {
            regime_shift,
            health_delta,
            trend_pressure,
            thresholds,
            digest,
        }
    }

    /// Re-normalizes an already typed value (clamps thresholds, fixes cadence).
    pub fn normalized(self) -> Self {
        let value = serde_json::to_value(&self).unwrap_or(Value::Null);
        Self::normalize(Some(&value))
    }

    /// Applies one card edit, mirroring how each control rebuilds the
    /// preference object before handing it to the update handler.
    pub fn with_change(&self, change: &PrefChange) -> Self {
        let mut next = self.clone();
        match *change {
            PrefChange::RegimeShift(v) => next.regime_shift = v,
            PrefChange::HealthDeltaEnabled(v) => next.health_delta.enabled = v,
            PrefChange::Sensitivity(s) => {
                // picking a sensitivity implies the delta alert is on
                next.health_delta.enabled = true;
                next.health_delta.sensitivity = s;
            }
            PrefChange::TrendPressure(v) => next.trend_pressure = v,
            PrefChange::ThresholdsEnabled(v) => next.thresholds.enabled = v,
            PrefChange::ThresholdBelow(n) => next.thresholds.below = n,
            PrefChange::ThresholdAbove(n) => next.thresholds.above = n,
        }
        next
    }
}

fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0 && !f.is_nan()).unwrap_or(false),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn js_string(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// `Number(x)` for the JSON value space; `None` stands in for NaN.
pub fn js_number(v: &Value) -> Option<f64> {
    match v {
        Value::Null => Some(0.0),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_js_number(s),
        Value::Array(items) => match items.as_slice() {
            [] => Some(0.0),
            [single] => js_number(single),
            _ => None,
        },
        Value::Object(_) => None,
    }
}

pub fn parse_js_number(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return Some(0.0);
    }
    t.parse::<f64>().ok()
}

fn threshold_or(v: Option<&Value>, fallback: f64) -> f64 {
    let n = match v {
        // a missing key keeps the default
        None => return fallback,
        Some(v) => js_number(v),
    };
    match n {
        Some(n) if n.is_finite() => n.clamp(0.0, 100.0),
        _ => fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_none_gives_defaults() {
        let p = AlertPreferences::normalize(None);
        assert_eq!(p, AlertPreferences::default());
        assert_eq!(p.health_delta.sensitivity, Sensitivity::Med);
        assert!(!p.thresholds.enabled);
        assert_eq!(p.thresholds.below, 60.0);
        assert_eq!(p.thresholds.above, 75.0);
    }

    #[test]
    fn normalize_fills_partial_objects() {
        let raw = json!({ "trendPressure": true, "healthDelta": { "enabled": false } });
        let p = AlertPreferences::normalize(Some(&raw));
        assert!(p.trend_pressure);
        assert!(p.regime_shift);
        assert!(!p.health_delta.enabled);
        assert_eq!(p.health_delta.sensitivity, Sensitivity::Med);
        assert_eq!(p.digest.cadence, "daily");
    }

    #[test]
    fn sensitivity_is_clamped() {
        let raw = json!({ "healthDelta": { "enabled": true, "sensitivity": "HIGH" } });
        assert_eq!(
            AlertPreferences::normalize(Some(&raw)).health_delta.sensitivity,
            Sensitivity::High
        );

        let raw = json!({ "healthDelta": { "sensitivity": "extreme" } });
        assert_eq!(
            AlertPreferences::normalize(Some(&raw)).health_delta.sensitivity,
            Sensitivity::Med
        );
    }

    #[test]
    fn thresholds_coerce_like_number() {
        let raw = json!({ "thresholds": { "enabled": 1, "below": "42", "above": "abc" } });
        let p = AlertPreferences::normalize(Some(&raw));
        assert!(p.thresholds.enabled);
        assert_eq!(p.thresholds.below, 42.0);
        assert_eq!(p.thresholds.above, 75.0);

        let raw = json!({ "thresholds": { "below": 250, "above": -5 } });
        let p = AlertPreferences::normalize(Some(&raw));
        assert_eq!(p.thresholds.below, 100.0);
        assert_eq!(p.thresholds.above, 0.0);
    }

    #[test]
    fn normalize_is_idempotent() {
        let inputs = [
            json!(null),
            json!("junk"),
            json!({}),
            json!({ "regimeShift": 0, "digest": { "cadence": 7 } }),
            json!({ "healthDelta": { "sensitivity": "low" }, "thresholds": { "below": "", "above": 300 } }),
        ];
        for raw in inputs {
            let once = AlertPreferences::normalize(Some(&raw));
            let value = serde_json::to_value(&once).unwrap();
            let twice = AlertPreferences::normalize(Some(&value));
            assert_eq!(once, twice, "not idempotent for {raw}");
        }
    }

    #[test]
    fn serializes_in_stored_shape() {
        let v = serde_json::to_value(AlertPreferences::default()).unwrap();
        assert_eq!(v["regimeShift"], json!(true));
        assert_eq!(v["healthDelta"]["sensitivity"], json!("med"));
        assert_eq!(v["thresholds"]["below"], json!(60.0));
        assert_eq!(v["digest"]["cadence"], json!("daily"));
    }

    #[test]
    fn picking_sensitivity_enables_delta() {
        let mut p = AlertPreferences::default();
        p.health_delta.enabled = false;
        let next = p.with_change(&PrefChange::Sensitivity(Sensitivity::Low));
        assert!(next.health_delta.enabled);
        assert_eq!(next.health_delta.sensitivity, Sensitivity::Low);
    }
}
