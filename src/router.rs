use std::fmt;

/// The six views, addressed by `#/<name>` fragments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Analyze,
    Watchlist,
    Alerts,
    Pro,
    Faq,
    Contact,
}

impl Route {
    pub const ALL: [Route; 6] = [
        Route::Analyze,
        Route::Watchlist,
        Route::Alerts,
        Route::Pro,
        Route::Faq,
        Route::Contact,
    ];

    /// Resolves a fragment with or without its leading `#`. An empty path
    /// and `/` both mean the analyze view.
    pub fn parse(fragment: &str) -> Option<Route> {
        let path = fragment.strip_prefix('#').unwrap_or(fragment);
        match path {
            "" | "/" | "/analyze" => Some(Route::Analyze),
            "/watchlist" => Some(Route::Watchlist),
            "/alerts" => Some(Route::Alerts),
            "/pro" => Some(Route::Pro),
            "/faq" => Some(Route::Faq),
            "/contact" => Some(Route::Contact),
            _ => None,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Analyze => "/analyze",
            Route::Watchlist => "/watchlist",
            Route::Alerts => "/alerts",
            Route::Pro => "/pro",
            Route::Faq => "/faq",
            Route::Contact => "/contact",
        }
    }

    pub fn fragment(self) -> String {
        format!("#{}", self.path())
    }

    /// Id of the container that holds this view.
    pub fn view_id(self) -> &'static str {
        match self {
            Route::Analyze => "analyze-view",
            Route::Watchlist => "watchlist-view",
            Route::Alerts => "alerts-view",
            Route::Pro => "pro-view",
            Route::Faq => "faq-view",
            Route::Contact => "contact-view",
        }
    }

    pub fn nav_label(self) -> &'static str {
        match self {
            Route::Analyze => "Analyze",
            Route::Watchlist => "Watchlist",
            Route::Alerts => "Alerts",
            Route::Pro => "Pro",
            Route::Faq => "FAQ",
            Route::Contact => "Contact",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// True for the fragments that get rewritten to `#/analyze` on load.
pub fn is_blank_fragment(fragment: &str) -> bool {
    fragment.is_empty() || fragment == "#"
}
