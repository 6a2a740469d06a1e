use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server-owned alert rule. Fetched, never stored locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertRule {
    #[serde(default)]
    pub ticker: String,

    #[serde(default)]
    pub enabled: bool,
}

impl AlertRule {
    /// Lenient decode: a non-string ticker reads as blank, `enabled` is truthy-checked.
    pub fn from_value(v: &Value) -> Self {
        let ticker = match v.get("ticker") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => String::new(),
        };
        let enabled = match v.get("enabled") {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0),
            Some(Value::String(s)) => !s.is_empty(),
            Some(Value::Array(_)) | Some(Value::Object(_)) => true,
            _ => false,
        };
        Self { ticker, enabled }
    }

    pub fn normalized_ticker(&self) -> String {
        self.ticker.trim().to_uppercase()
    }
}

/// Enabled rules first, then by ticker.
pub fn rule_order(a: &AlertRule, b: &AlertRule) -> Ordering {
    b.enabled
        .cmp(&a.enabled)
        .then_with(|| a.ticker.cmp(&b.ticker))
}

pub fn sort_rules(rules: &mut [AlertRule]) {
    rules.sort_by(rule_order);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn enabled_rules_sort_first() {
        let mut rules = vec![
            AlertRule { ticker: "TSLA".into(), enabled: false },
            AlertRule { ticker: "MSFT".into(), enabled: true },
            AlertRule { ticker: "AAPL".into(), enabled: true },
            AlertRule { ticker: "AMD".into(), enabled: false },
        ];
        sort_rules(&mut rules);
        let order: Vec<_> = rules.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(order, ["AAPL", "MSFT", "AMD", "TSLA"]);
    }

    #[test]
    fn lenient_decode() {
        let r = AlertRule::from_value(&json!({ "ticker": " nvda ", "enabled": 1 }));
        assert!(r.enabled);
        assert_eq!(r.normalized_ticker(), "NVDA");

        let r = AlertRule::from_value(&json!({ "enabled": null }));
        assert!(!r.enabled);
        assert_eq!(r.normalized_ticker(), "");
    }
}
