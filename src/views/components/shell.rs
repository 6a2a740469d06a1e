use crate::router::Route;
use crate::views::dom::{Document, El, NodeId};

/// Fixed containers of the page, looked up once at start-up.
#[derive(Debug, Clone, Copy)]
pub struct Shell {
    pub sidebar: NodeId,
    pub global_message: NodeId,

    pub analyze_view: NodeId,
    pub analyze_form: NodeId,
    pub ticker_input: NodeId,
    pub analyze_button: NodeId,
    pub analyze_result: NodeId,

    pub watchlist_view: NodeId,
    pub watchlist_list: NodeId,
    pub watchlist_empty: NodeId,

    pub alerts_view: NodeId,
    pub pro_view: NodeId,
    pub faq_view: NodeId,
    pub contact_view: NodeId,
}

impl Shell {
    pub fn view(&self, route: Route) -> NodeId {
        match route {
            Route::Analyze => self.analyze_view,
            Route::Watchlist => self.watchlist_view,
            Route::Alerts => self.alerts_view,
            Route::Pro => self.pro_view,
            Route::Faq => self.faq_view,
            Route::Contact => self.contact_view,
        }
    }
}

/// Builds the static page skeleton under the document root. Every view
/// starts hidden; the router unhides one.
pub fn mount(doc: &mut Document) -> Shell {
    let root = doc.root();
    let layout = doc.append_new(root, El::new("div").class("app-layout"));
    let sidebar = doc.append_new(layout, El::new("aside").id("sidebar"));
    let main = doc.append_new(layout, El::new("main").class("main"));

    let global_message = doc.append_new(
        main,
        El::new("div")
            .id("global-message")
            .class("global-message")
            .attr("role", "status")
            .attr("aria-live", "polite"),
    );

    let view = |doc: &mut Document, route: Route| {
        doc.append_new(
            main,
            El::new("section").id(route.view_id()).class("view").hidden(true),
        )
    };

    // analyze
    let analyze_view = view(doc, Route::Analyze);
    let analyze_form = doc.append_new(
        analyze_view,
        El::new("form").id("analyze-form").class("analyze-form").attr("autocomplete", "off"),
    );
    let ticker_input = doc.append_new(
        analyze_form,
        El::new("input")
            .id("ticker-input")
            .class("analyze-form__input")
            .attr("type", "text")
            .attr("placeholder", "Enter a ticker, like AAPL")
            .attr("aria-label", "Ticker symbol")
            .value(""),
    );
    let analyze_button = doc.append_new(
        analyze_form,
        El::new("button")
            .id("analyze-button")
            .class("analyze-form__button")
            .attr("type", "submit")
            .text("Analyze"),
    );
    let analyze_result = doc.append_new(
        analyze_view,
        El::new("div").id("analyze-result").class("analyze-result"),
    );

    // watchlist
    let watchlist_view = view(doc, Route::Watchlist);
    super::intro_panel(
        doc,
        watchlist_view,
        "Watchlist",
        "Tickers you saved from an analysis.",
    );
    let watchlist_empty = doc.append_new(
        watchlist_view,
        El::new("div")
            .id("watchlist-empty-state")
            .class("panel__text panel__text--muted")
            .text("Your watchlist is empty. Analyze a ticker and add it here."),
    );
    let watchlist_list = doc.append_new(
        watchlist_view,
        El::new("div").id("watchlist-list").class("watchlist-list"),
    );

    Shell {
        sidebar,
        global_message,
        analyze_view,
        analyze_form,
        ticker_input,
        analyze_button,
        analyze_result,
        watchlist_view,
        watchlist_list,
        watchlist_empty,
        alerts_view: view(doc, Route::Alerts),
        pro_view: view(doc, Route::Pro),
        faq_view: view(doc, Route::Faq),
        contact_view: view(doc, Route::Contact),
    }
}
