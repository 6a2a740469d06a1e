use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;

use crate::models::{AlertRule, AnalysisResult, WatchlistItem};

pub const PRO_REQUIRED: &str = "PRO_REQUIRED";

/// Uniform failure of a backend call. `Display` is the user-facing message.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success answer; `message` is the server's when it sent one.
    #[error("{message}")]
    Status { message: String },

    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{message}")]
    Decode {
        message: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{message}")]
    Url { message: String },
}

/// Result of `POST /api/watchlist/add`.
#[derive(Debug, Clone, PartialEq)]
pub enum AddOutcome {
    Added,
    /// Free-tier cap reached; carries the server's message when it sent one.
    ProRequired(Option<String>),
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WaitlistRequest {
    pub email: Option<String>,
    pub user_id: Option<String>,
    pub intent: String,
    pub source: String,
}

/// Thin wrapper over the analysis/alerts backend.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // `{base}/{prefix}/{segment}` with the segment percent-encoded
    fn endpoint_with_segment(&self, prefix: &str, segment: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.endpoint(prefix)).map_err(|e| ApiError::Url {
            message: format!("bad backend url: {e}"),
        })?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Url {
                message: "backend url cannot take a path".to_string(),
            })?
            .push(segment);
        Ok(url)
    }

    async fn send(&self, req: RequestBuilder, fallback: &str) -> Result<Response, ApiError> {
        let res = req.send().await.map_err(|e| ApiError::Transport {
            message: fallback.to_string(),
            source: e,
        })?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            let message = error_message(&body).unwrap_or_else(|| fallback.to_string());
            tracing::debug!("backend returned {}: {}", status, message);
            return Err(ApiError::Status { message });
        }

        Ok(res)
    }

    async fn json_body(res: Response, fallback: &str) -> Result<Value, ApiError> {
        res.json::<Value>().await.map_err(|e| ApiError::Decode {
            message: fallback.to_string(),
            source: e,
        })
    }

    pub async fn analyze(&self, ticker: &str) -> Result<AnalysisResult, ApiError> {
        const FALLBACK: &str = "Could not analyze that ticker.";
        let req = self
            .http
            .post(self.endpoint("/api/analyze"))
            .json(&json!({ "ticker": ticker }));
        let res = self.send(req, FALLBACK).await?;
        let body = Self::json_body(res, FALLBACK).await?;
        Ok(AnalysisResult::from_value(&body))
    }

    pub async fn list_watchlist(&self) -> Result<Vec<WatchlistItem>, ApiError> {
        const FALLBACK: &str = "Could not load your watchlist.";
        let res = self
            .send(self.http.get(self.endpoint("/api/watchlist")), FALLBACK)
            .await?;
        let body = Self::json_body(res, FALLBACK).await?;
        Ok(body
            .as_array()
            .map(|items| items.iter().map(WatchlistItem::from_value).collect())
            .unwrap_or_default())
    }

    pub async fn add_to_watchlist(&self, ticker: &str) -> Result<AddOutcome, ApiError> {
        const FALLBACK: &str = "Could not add that ticker to your watchlist.";
        let req = self
            .http
            .post(self.endpoint("/api/watchlist/add"))
            .json(&json!({ "ticker": ticker }));
        let res = self.send(req, FALLBACK).await?;
        let body = Self::json_body(res, FALLBACK).await?;

        if body.get("code").and_then(Value::as_str) == Some(PRO_REQUIRED) {
            let message = body
                .get("error")
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string);
            return Ok(AddOutcome::ProRequired(message));
        }
        Ok(AddOutcome::Added)
    }

    pub async fn remove_from_watchlist(&self, ticker: &str) -> Result<(), ApiError> {
        const FALLBACK: &str = "Could not remove that ticker from your watchlist.";
        let req = self
            .http
            .post(self.endpoint("/api/watchlist/remove"))
            .json(&json!({ "ticker": ticker }));
        self.send(req, FALLBACK).await?;
        Ok(())
    }

    pub async fn list_alerts(&self, email: &str) -> Result<Vec<AlertRule>, ApiError> {
        const FALLBACK: &str = "Could not load alerts.";
        let req = self
            .http
            .get(self.endpoint("/api/alerts"))
            .query(&[("email", email)]);
        let res = self.send(req, FALLBACK).await?;
        let body = Self::json_body(res, FALLBACK).await?;
        Ok(rules_from(body.get("rules")))
    }

    pub async fn set_alert_enabled(
        &self,
        email: &str,
        ticker: &str,
        enabled: bool,
    ) -> Result<AlertRule, ApiError> {
        const FALLBACK: &str = "Could not update alert.";
        let url = self.endpoint_with_segment("/api/alerts", &ticker.trim().to_uppercase())?;
        let req = self
            .http
            .patch(url)
            .query(&[("email", email)])
            .json(&json!({ "enabled": enabled }));
        let res = self.send(req, FALLBACK).await?;
        let body = Self::json_body(res, FALLBACK).await?;
        Ok(AlertRule::from_value(&body))
    }

    pub async fn delete_alert(&self, email: &str, ticker: &str) -> Result<(), ApiError> {
        const FALLBACK: &str = "Could not delete alert.";
        let url = self.endpoint_with_segment("/api/alerts", &ticker.trim().to_uppercase())?;
        let req = self.http.delete(url).query(&[("email", email)]);
        self.send(req, FALLBACK).await?;
        Ok(())
    }

    /// Legacy rule upsert still used by the result card's "Enable alerts".
    pub async fn upsert_alert(
        &self,
        email: &str,
        ticker: &str,
        enabled: bool,
    ) -> Result<AlertRule, ApiError> {
        const FALLBACK: &str = "Could not save alert.";
        let req = self
            .http
            .post(self.endpoint("/alerts/upsert"))
            .json(&json!({ "email": email, "ticker": ticker, "enabled": enabled }));
        let res = self.send(req, FALLBACK).await?;
        let body = Self::json_body(res, FALLBACK).await?;
        Ok(AlertRule::from_value(&body))
    }

    /// Older status listing. Not wired into the alerts page; see DESIGN.md.
    pub async fn alerts_status(&self) -> Result<Vec<AlertRule>, ApiError> {
        const FALLBACK: &str = "Could not load alert status.";
        let res = self
            .send(self.http.get(self.endpoint("/alerts/status")), FALLBACK)
            .await?;
        let body = Self::json_body(res, FALLBACK).await?;

        if body.is_array() {
            return Ok(rules_from(Some(&body)));
        }
        let list = ["rules", "alerts", "items"]
            .iter()
            .find_map(|k| body.get(*k).filter(|v| v.is_array()));
        Ok(rules_from(list))
    }

    pub async fn join_waitlist(&self, req: &WaitlistRequest) -> Result<(), ApiError> {
        const FALLBACK: &str = "Could not join the waitlist right now.";
        let req = self.http.post(self.endpoint("/api/waitlist")).json(req);
        self.send(req, FALLBACK).await?;
        Ok(())
    }
}

fn rules_from(v: Option<&Value>) -> Vec<AlertRule> {
    v.and_then(Value::as_array)
        .map(|items| items.iter().map(AlertRule::from_value).collect())
        .unwrap_or_default()
}

/// Pulls the user-facing message out of an error body: `detail` first, then
/// `error`; a string is used verbatim, an array of `{msg}` is joined.
pub fn error_message(body: &str) -> Option<String> {
    let v: Value = serde_json::from_str(body).ok()?;
    ["detail", "error"]
        .iter()
        .find_map(|k| v.get(*k).and_then(message_from))
}

fn message_from(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Array(items) if !items.is_empty() => Some(
            items
                .iter()
                .map(|d| d.get("msg").and_then(Value::as_str).unwrap_or(""))
                .collect::<Vec<_>>()
                .join(" "),
        ),
        _ => None,
    }
}

/// Comma-separated request building: trims, upper-cases and drops blanks.
pub fn parse_ticker_input(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
        .collect()
}
