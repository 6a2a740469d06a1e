mod common;

use std::time::Duration;

use common::{FakeBackend, Session};
use serde_json::json;

fn analysis(ticker: &str) -> serde_json::Value {
    json!({
        "ticker": ticker,
        "signals": { "regime": "Uptrend", "trend_score": 72, "delta_1d": 3, "momentum_decay": "Cooling" },
        "summary": "Holding up well."
    })
}

#[tokio::test(start_paused = true)]
async fn multi_ticker_input_is_rejected_without_a_request() {
    let backend = FakeBackend::start().await;
    let mut s = Session::start(&backend, &[], "#/analyze");

    let input = s.app.shell().ticker_input;
    let form = s.app.shell().analyze_form;
    s.type_into(input, "AAPL TSLA");
    s.submit(form);

    assert_eq!(
        s.message(),
        "Enter one ticker at a time (e.g., AAPL). Multi-ticker scan is coming."
    );

    s.type_into(input, "AAPL,TSLA");
    s.submit(form);
    s.pump_for(Duration::from_millis(100)).await;

    assert!(backend.requests_to("POST", "/api/analyze").is_empty());
}

#[tokio::test]
async fn empty_input_asks_for_a_ticker() {
    let backend = FakeBackend::start().await;
    let mut s = Session::start(&backend, &[], "");

    let form = s.app.shell().analyze_form;
    s.submit(form);

    assert_eq!(s.message(), "Please enter a stock ticker, like AAPL or TSLA.");
}

#[tokio::test]
async fn single_ticker_is_uppercased_and_rendered() {
    let backend = FakeBackend::start().await;
    backend.reply("POST", "/api/analyze", 200, analysis("AAPL"));
    let mut s = Session::start(&backend, &[], "#/analyze");

    let input = s.app.shell().ticker_input;
    let button = s.app.shell().analyze_button;
    s.type_into(input, "  aapl ");
    s.submit(s.app.shell().analyze_form);

    // loading state while the request is in flight
    assert!(s.app.document().is_disabled(button));
    assert_eq!(s.app.document().text(button), "Analyzing…");

    let result = s.app.shell().analyze_result;
    assert!(s.pump_until(|app| !app.document().children(result).is_empty()).await);

    let calls = backend.requests_to("POST", "/api/analyze");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body, json!({ "ticker": "AAPL" }));

    let card = s.app.document().text_content(result);
    assert!(card.contains("AAPL"));
    assert!(card.contains("Regime: Uptrend"));
    assert!(card.contains("Trend Health: 72/100"));
    assert!(!s.app.document().is_disabled(button));
    assert_eq!(s.app.document().text(button), "Analyze");
}

#[tokio::test]
async fn backend_failure_shows_generic_error_and_restores_button() {
    let backend = FakeBackend::start().await;
    backend.reply("POST", "/api/analyze", 500, json!({ "detail": "boom" }));
    let mut s = Session::start(&backend, &[], "#/analyze");

    let input = s.app.shell().ticker_input;
    let button = s.app.shell().analyze_button;
    s.type_into(input, "MSFT");
    s.submit(s.app.shell().analyze_form);

    assert!(s.pump_until(|app| !app.document().is_disabled(button)).await);
    assert_eq!(
        s.message(),
        "Something went wrong while analyzing that ticker. Try again."
    );
}

#[tokio::test(start_paused = true)]
async fn message_clears_four_seconds_after_the_latest_one() {
    let backend = FakeBackend::start().await;
    let mut s = Session::start(&backend, &[], "#/analyze");

    let input = s.app.shell().ticker_input;
    let form = s.app.shell().analyze_form;
    s.submit(form);
    assert_eq!(s.message(), "Please enter a stock ticker, like AAPL or TSLA.");

    s.pump_for(Duration::from_millis(2000)).await;
    s.type_into(input, "AAPL,TSLA");
    s.submit(form);

    // the first message's timer is stale by now
    s.pump_for(Duration::from_millis(2500)).await;
    assert_eq!(
        s.message(),
        "Enter one ticker at a time (e.g., AAPL). Multi-ticker scan is coming."
    );

    s.pump_for(Duration::from_millis(1600)).await;
    assert_eq!(s.message(), "");
    let el = s.node("global-message");
    assert!(!s.app.document().has_class(el, "global-message--visible"));
}

#[tokio::test(start_paused = true)]
async fn typed_value_survives_a_background_render() {
    let backend = FakeBackend::start().await;
    let mut s = Session::start(&backend, &[], "#/analyze");

    let input = s.app.shell().ticker_input;
    s.submit(s.app.shell().analyze_form);
    s.flush();

    // typing alone is not echoed back to the page
    s.type_into(input, "AAPL");
    assert_eq!(s.rendered(), None);

    // the error toast times out and the page is re-rendered
    s.pump_for(Duration::from_millis(4100)).await;
    assert_eq!(s.message(), "");
    let html = s.rendered().expect("dismissal re-renders");
    assert!(html.contains(r#"value="AAPL""#));
}
