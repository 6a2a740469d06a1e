use serde_json::Value;

pub const DEFAULT_PRESSURE: &str = "Stable";

/// Canonical trend signals, resolved once when a payload is decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct TrendSignals {
    pub regime: Option<String>,
    pub health: Option<f64>,
    pub delta_1d: Option<f64>,
    pub pressure: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RegimeKind {
    Uptrend,
    Sideways,
    Downtrend,
    Other,
}

impl RegimeKind {
    pub fn classify(label: &str) -> Self {
        let l = label.to_lowercase();
        if l.contains("uptrend") {
            RegimeKind::Uptrend
        } else if l.contains("downtrend") {
            RegimeKind::Downtrend
        } else if l.contains("sideways") {
            RegimeKind::Sideways
        } else {
            RegimeKind::Other
        }
    }

    pub fn css_class(&self) -> Option<&'static str> {
        match self {
            RegimeKind::Uptrend => Some("momentum--uptrend"),
            RegimeKind::Downtrend => Some("momentum--downtrend"),
            RegimeKind::Sideways => Some("momentum--sideways"),
            RegimeKind::Other => None,
        }
    }
}

impl TrendSignals {
    pub fn from_payload(obj: &Value) -> Self {
        let signals = obj.get("signals").filter(|v| v.is_object());
        let momentum = obj.get("momentum").filter(|v| v.is_object());

        let sig_str = |k: &str| signals.and_then(|s| s.get(k)).and_then(Value::as_str);
        let sig_num = |k: &str| signals.and_then(|s| s.get(k)).and_then(Value::as_f64);
        let mom = |k: &str| momentum.and_then(|m| m.get(k));

        let regime = sig_str("regime")
            .map(str::to_string)
            .or_else(|| mom("label").and_then(display_value));

        let health = sig_num("trend_score").or_else(|| mom("score").and_then(Value::as_f64));
        let delta_1d = sig_num("delta_1d")
            .or_else(|| mom("delta_since_close").and_then(Value::as_f64));

        // the legacy block wins for pressure, and "None" from the new block means unset
        let pressure = mom("momentum_decay")
            .and_then(Value::as_str)
            .or_else(|| sig_str("momentum_decay").filter(|s| *s != "None"))
            .unwrap_or(DEFAULT_PRESSURE)
            .to_string();

        Self {
            regime,
            health,
            delta_1d,
            pressure,
        }
    }

    pub fn regime_label(&self) -> &str {
        self.regime.as_deref().unwrap_or("—")
    }

    pub fn regime_kind(&self) -> RegimeKind {
        RegimeKind::classify(self.regime_label())
    }
}

/// Server-owned analysis of one ticker. Consumed once per render.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub ticker: String,
    pub company_name: Option<String>,
    pub signals: TrendSignals,
    pub summary: Option<String>,
}

impl AnalysisResult {
    pub fn from_value(v: &Value) -> Self {
        Self {
            ticker: upper_field(v, "ticker"),
            company_name: text_field(v, "company_name"),
            signals: TrendSignals::from_payload(v),
            summary: text_field(v, "summary"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatchlistItem {
    pub ticker: String,
    pub signals: TrendSignals,
    pub summary: Option<String>,
}

impl WatchlistItem {
    pub fn from_value(v: &Value) -> Self {
        Self {
            ticker: upper_field(v, "ticker"),
            signals: TrendSignals::from_payload(v),
            summary: text_field(v, "summary"),
        }
    }
}

fn text_field(v: &Value, key: &str) -> Option<String> {
    v.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn upper_field(v: &Value, key: &str) -> String {
    v.get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_uppercase()
}

// label text as it would be interpolated; null/empty count as absent
fn display_value(v: &Value) -> Option<String> {
    match v {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

/// Renders a number the way the cards always have: integers without a
/// fractional part, everything else in shortest form.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn prefers_signals_block() {
        let v = json!({
            "ticker": "aapl",
            "signals": { "regime": "Uptrend", "trend_score": 82, "delta_1d": -3.5, "momentum_decay": "Cooling" },
            "momentum": { "label": "Sideways", "score": 10 }
        });
        let r = AnalysisResult::from_value(&v);
        assert_eq!(r.ticker, "AAPL");
        assert_eq!(r.signals.regime.as_deref(), Some("Uptrend"));
        assert_eq!(r.signals.health, Some(82.0));
        assert_eq!(r.signals.delta_1d, Some(-3.5));
        assert_eq!(r.signals.pressure, "Cooling");
    }

    #[test]
    fn falls_back_to_momentum_block() {
        let v = json!({
            "ticker": "TSLA",
            "momentum": { "label": "Downtrend", "score": 31, "delta_since_close": 4, "momentum_decay": "Breaking down" }
        });
        let s = AnalysisResult::from_value(&v).signals;
        assert_eq!(s.regime_label(), "Downtrend");
        assert_eq!(s.regime_kind(), RegimeKind::Downtrend);
        assert_eq!(s.health, Some(31.0));
        assert_eq!(s.delta_1d, Some(4.0));
        assert_eq!(s.pressure, "Breaking down");
    }

    #[test]
    fn none_pressure_reads_as_stable() {
        let v = json!({ "signals": { "regime": "Sideways", "momentum_decay": "None" } });
        assert_eq!(TrendSignals::from_payload(&v).pressure, "Stable");
    }

    #[test]
    fn missing_blocks_render_placeholders() {
        let s = TrendSignals::from_payload(&json!({ "ticker": "X" }));
        assert_eq!(s.regime_label(), "—");
        assert_eq!(s.health, None);
        assert_eq!(s.regime_kind(), RegimeKind::Other);
    }

    #[test]
    fn formats_numbers_like_the_cards() {
        assert_eq!(format_number(72.0), "72");
        assert_eq!(format_number(-12.0), "-12");
        assert_eq!(format_number(3.25), "3.25");
    }
}
