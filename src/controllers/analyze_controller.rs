use crate::models::AnalysisResult;
use crate::services::api_client::{parse_ticker_input, ApiError};
use crate::views::components::result_card;

use super::{App, AppEvent};

pub const MULTI_TICKER_MESSAGE: &str =
    "Enter one ticker at a time (e.g., AAPL). Multi-ticker scan is coming.";
pub const EMPTY_TICKER_MESSAGE: &str = "Please enter a stock ticker, like AAPL or TSLA.";
pub const ANALYZE_FAILED_MESSAGE: &str =
    "Something went wrong while analyzing that ticker. Try again.";

const LOADING_LABEL: &str = "Analyzing…";
const DEFAULT_LABEL: &str = "Analyze";

impl App {
    pub(crate) fn submit_analyze(&mut self) {
        // a run is still in flight; its button is disabled
        if self.doc.is_disabled(self.shell.analyze_button) {
            return;
        }

        self.clear_message();

        let raw = self.doc.value(self.shell.ticker_input).trim().to_string();

        // single ticker only, even though the request builder below splits on commas
        if raw.contains(',') || raw.chars().any(char::is_whitespace) {
            self.show_error(MULTI_TICKER_MESSAGE);
            return;
        }

        let tickers = parse_ticker_input(&raw);
        if tickers.is_empty() {
            self.show_error(EMPTY_TICKER_MESSAGE);
            return;
        }

        self.set_loading(true);
        self.doc.clear_children(self.shell.analyze_result);
        self.analyze_next(tickers);
    }

    /// Analyzes the head of the queue; the completion event continues with
    /// the rest, so tickers are requested one after another.
    fn analyze_next(&mut self, mut queue: Vec<String>) {
        if queue.is_empty() {
            self.set_loading(false);
            return;
        }
        let ticker = queue.remove(0);
        self.spawn_call(move |api| async move {
            let result = api.analyze(&ticker).await;
            AppEvent::Analyzed {
                ticker,
                result,
                remaining: queue,
            }
        });
    }

    pub(crate) fn on_analyzed(
        &mut self,
        ticker: String,
        result: Result<AnalysisResult, ApiError>,
        remaining: Vec<String>,
    ) {
        match result {
            Ok(analysis) => {
                self.render_analyze_result(&analysis);
                self.analyze_next(remaining);
            }
            Err(e) => {
                tracing::warn!("analyze {} failed: {}", ticker, e);
                self.show_error(ANALYZE_FAILED_MESSAGE);
                self.set_loading(false);
            }
        }
    }

    fn render_analyze_result(&mut self, analysis: &AnalysisResult) {
        tracing::info!(
            target: "analytics",
            event = "analysis_viewed",
            ticker = %analysis.ticker,
            user_id = %self.state.user_id,
        );
        let card = result_card::result_card(&mut self.doc, analysis);
        self.doc.append(self.shell.analyze_result, card);
    }

    fn set_loading(&mut self, loading: bool) {
        let button = self.shell.analyze_button;
        if loading {
            self.doc.set_disabled(button, true);
            self.analyze_label = Some(self.doc.text(button).to_string());
            self.doc.set_text(button, LOADING_LABEL);
        } else {
            self.doc.set_disabled(button, false);
            let label = self
                .analyze_label
                .take()
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| DEFAULT_LABEL.to_string());
            self.doc.set_text(button, &label);
        }
    }
}
