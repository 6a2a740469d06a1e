use serde_json::json;

use crate::AppState;

pub const APP_TITLE: &str = "FriendlyTicker";
pub const LIVE_PATH: &str = "/live";

/// The page the browser boots from. The live session fills `#app` once the
/// socket is up.
pub fn render_shell(state: &AppState) -> Result<String, String> {
    let body = state
        .hbs
        .render("pages/home", &json!({}))
        .map_err(|e| e.to_string())?;
    render_full(state, APP_TITLE, body)
}

pub fn render_full(state: &AppState, title: &str, body_html: String) -> Result<String, String> {
    let ctx = json!({
        "title": title,
        "body": body_html,
        "live_path": LIVE_PATH,
    });

    state
        .hbs
        .render("layouts/base", &ctx)
        .map_err(|e| e.to_string())
}
