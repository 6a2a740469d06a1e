mod common;

use common::{FakeBackend, Session};
use friendlyticker::views::components::modal;
use serde_json::json;

fn item(ticker: &str) -> serde_json::Value {
    json!({ "ticker": ticker, "signals": { "regime": "Sideways", "trend_score": 50 } })
}

async fn analyzed(backend: &FakeBackend, ticker: &str) -> Session {
    backend.reply(
        "POST",
        "/api/analyze",
        200,
        json!({ "ticker": ticker, "signals": { "regime": "Uptrend" } }),
    );
    let mut s = Session::start(backend, &[], "#/analyze");
    let input = s.app.shell().ticker_input;
    s.type_into(input, ticker);
    s.submit(s.app.shell().analyze_form);

    let result = s.app.shell().analyze_result;
    assert!(s.pump_until(|app| !app.document().children(result).is_empty()).await);
    s
}

fn add_button(s: &Session) -> friendlyticker::views::dom::NodeId {
    let result = s.app.shell().analyze_result;
    s.app.document().find_all_by_class(result, "result-card__watchlist-btn")[0]
}

#[tokio::test]
async fn prefetch_renders_items_and_hides_empty_state() {
    let backend = FakeBackend::start().await;
    backend.reply("GET", "/api/watchlist", 200, json!([item("AAPL"), item("MSFT")]));

    let mut s = Session::start(&backend, &[], "#/watchlist");
    let list = s.app.shell().watchlist_list;
    assert!(s.pump_until(|app| app.document().children(list).len() == 2).await);

    assert!(!s.visible("watchlist-empty-state"));
    assert!(s.app.document().text_content(list).contains("MSFT"));
}

#[tokio::test]
async fn prefetch_failure_is_silent() {
    let backend = FakeBackend::start().await;
    backend.reply("GET", "/api/watchlist", 503, json!({ "detail": "down" }));

    let mut s = Session::start(&backend, &[], "#/watchlist");
    s.pump_for(std::time::Duration::from_millis(200)).await;

    assert_eq!(s.message(), "");
    assert!(s.visible("watchlist-empty-state"));
}

#[tokio::test]
async fn add_success_refreshes_the_list() {
    let backend = FakeBackend::start().await;
    let mut s = analyzed(&backend, "AAPL").await;

    backend.reply("POST", "/api/watchlist/add", 200, json!({ "ok": true }));
    backend.reply("GET", "/api/watchlist", 200, json!([item("AAPL")]));
    s.click(add_button(&s));

    let list = s.app.shell().watchlist_list;
    assert!(s.pump_until(|app| app.document().children(list).len() == 1).await);
    assert_eq!(s.message(), "Added to your watchlist.");
    assert_eq!(
        backend.requests_to("POST", "/api/watchlist/add")[0].body,
        json!({ "ticker": "AAPL" })
    );
}

#[tokio::test]
async fn pro_required_opens_the_upsell() {
    let backend = FakeBackend::start().await;
    let mut s = analyzed(&backend, "NVDA").await;

    backend.reply(
        "POST",
        "/api/watchlist/add",
        200,
        json!({ "code": "PRO_REQUIRED", "error": "Free plan holds 3 tickers." }),
    );
    s.click(add_button(&s));

    assert!(s.pump_until(|app| modal::is_open(app.document())).await);
    assert_eq!(s.message(), "Free plan holds 3 tickers.");
}

#[tokio::test]
async fn lock_hint_follows_list_size() {
    let backend = FakeBackend::start().await;
    backend.reply(
        "GET",
        "/api/watchlist",
        200,
        json!([item("AAPL"), item("MSFT"), item("TSLA")]),
    );

    let mut s = Session::start(&backend, &[], "#/watchlist");
    let list = s.app.shell().watchlist_list;
    assert!(s.pump_until(|app| app.document().children(list).len() == 3).await);
    assert!(s.visible("watchlist-lock-hint"));

    // removing one drops below the free limit
    backend.reply("POST", "/api/watchlist/remove", 200, json!({ "ok": true }));
    backend.reply("GET", "/api/watchlist", 200, json!([item("AAPL"), item("MSFT")]));
    let remove = s.app.document().find_all_by_class(list, "watchlist-item__remove-btn")[0];
    s.click(remove);

    assert!(s.pump_until(|app| app.document().children(list).len() == 2).await);
    assert!(!s.visible("watchlist-lock-hint"));
    assert_eq!(s.message(), "Removed from your watchlist.");
}
