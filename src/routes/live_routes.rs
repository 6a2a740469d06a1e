use axum::{Router, routing::get};
use crate::{AppState, ws};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/live", get(ws::live))
}
