use axum::{
    extract::State,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse},
};
use serde_json::json;

use crate::{render, AppState};

pub async fn home(State(state): State<AppState>) -> impl IntoResponse {
    match render::render_shell(&state) {
        Ok(page) => (StatusCode::OK, Html(page)).into_response(),
        Err(e) => {
            tracing::error!("shell render failed: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(e)).into_response()
        }
    }
}

pub async fn not_found(State(state): State<AppState>, uri: Uri) -> impl IntoResponse {
    let body = match state
        .hbs
        .render("pages/not_found", &json!({ "path": uri.path() }))
    {
        Ok(body) => body,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, Html(e.to_string())).into_response(),
    };

    match render::render_full(&state, "404", body) {
        Ok(page) => (StatusCode::NOT_FOUND, Html(page)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, Html(e)).into_response(),
    }
}

pub async fn health() -> impl IntoResponse {
    (StatusCode::OK, Html("ok".to_string()))
}
