use crate::events::{Action, EventKind};
use crate::views::dom::{Document, El, NodeId};

pub struct FaqItem {
    pub id: &'static str,
    pub q: &'static str,
    pub a: &'static str,
    pub details: &'static str,
    pub example: &'static str,
}

pub struct FaqSection {
    pub title: &'static str,
    pub items: &'static [FaqItem],
}

pub const FAQ_SECTIONS: &[FaqSection] = &[
    FaqSection {
        title: "Basics",
        items: &[
            FaqItem {
                id: "basics-what-is-friendlyticker",
                q: "What is FriendlyTicker?",
                a: "FriendlyTicker is a decision-support app that translates trend signals into plain English so you can make calmer, faster calls.",
                details: "You run an analysis on a ticker and we show the current trend regime plus a few “health” signals that help you interpret whether the move looks stable, weakening, or changing.",
                example: "Example: “Uptrend + high Trend Health + positive Daily Change” usually reads like “trend is intact and strengthening.”",
            },
            FaqItem {
                id: "basics-problem",
                q: "What problem does it solve?",
                a: "It helps you spot trend strength and trend changes without needing to interpret a dozen indicators.",
                details: "Instead of watching charts all day, you get a quick read on: (1) what regime we’re in, (2) how healthy that regime looks, and (3) whether that health is improving or fading.",
                example: "Example: If price is flat but Trend Health drops, that can signal weakening before a breakdown becomes obvious.",
            },
            FaqItem {
                id: "basics-not-advice",
                q: "Is this buy/sell advice?",
                a: "No. It’s educational decision-support, not financial advice.",
                details: "We’re summarizing signals from the model. You choose how (or whether) to act, and you should always consider risk, timeframe, and your own plan.",
                example: "Example: A strong uptrend can still be a bad entry if you’re chasing a spike or your risk is wrong.",
            },
        ],
    },
    FaqSection {
        title: "Signals",
        items: &[
            FaqItem {
                id: "signals-trend-regime",
                q: "What is Trend Regime?",
                a: "A simple label for overall price behavior: Uptrend, Sideways, or Downtrend.",
                details: "Trend Regime is the model’s best read on the dominant structure of recent price action. It answers the question: what type of environment is this stock currently in?",
                example: "Example: Sideways means price is chopping in a range, not trending cleanly in either direction.",
            },
            FaqItem {
                id: "signals-trend-health",
                q: "What is Trend Health (0–100)?",
                a: "A 0–100 score describing how intact and stable the current Trend Regime looks.",
                details: "Higher values mean the regime is clean and internally consistent. Lower values mean more noise, conflict, or early signs that the regime may be weakening or unstable.",
                example: "Example: Uptrend + Trend Health 82 suggests a strong, clean trend. Uptrend + 38 suggests the uptrend exists, but is fragile or choppy.",
            },
            FaqItem {
                id: "signals-health-change",
                q: "Why does Daily Change in Trend Health matter?",
                a: "It shows whether trend health is improving or deteriorating since the last update.",
                details: "Trend damage often appears as a drop in health before the Trend Regime itself changes. A negative daily change can be early weakness; a positive change can signal strengthening.",
                example: "Example: Uptrend + Trend Health 70 but Daily Change −12 means the uptrend still exists, but it just weakened meaningfully.",
            },
            FaqItem {
                id: "signals-trend-pressure",
                q: "What is Trend Pressure?",
                a: "A read on whether momentum is pushing the trend forward or working against it.",
                details: "Trend Pressure reflects whether buying or selling pressure is supporting the current regime, cooling off, or actively breaking it down. This value comes from backend signals only.",
                example: "Example: “Cooling” suggests momentum is fading. “Breaking down” suggests pressure is now working against the trend.",
            },
            FaqItem {
                id: "signals-as-of",
                q: "How often does it update / what does “as of” mean?",
                a: "Signals update when you run an analysis. “As of” shows when the backend last computed them.",
                details: "If you don’t rerun analysis, you’re viewing the most recent snapshot, not live data. Alerts and Pro features handle background monitoring.",
                example: "Example: If the timestamp is from yesterday, rerun analysis to refresh the signals.",
            },
        ],
    },
    FaqSection {
        title: "Alerts & Pro",
        items: &[
            FaqItem {
                id: "alerts-trigger",
                q: "What triggers alerts?",
                a: "Alerts trigger when a saved ticker hits the conditions you selected (evaluated by the backend).",
                details: "In Pro, the idea is: you choose what you care about (regime change, health dropping, momentum breakdown, etc.), and the scheduler checks those conditions without you needing to babysit the app.",
                example: "Example: “Alert me if Trend Regime flips to Downtrend” or “if Daily Change in Health drops below −10.”",
            },
            FaqItem {
                id: "alerts-no-price-move",
                q: "Why did I get an alert if price didn’t move much?",
                a: "Because some alerts are driven by signal changes, not big visible price moves.",
                details: "Trend Health / momentum can deteriorate internally while price still looks quiet. That’s often the point of the alert: catching weakening early.",
                example: "Example: Price is flat, but Trend Health drops sharply → you get warned before the chart looks “bad.”",
            },
            FaqItem {
                id: "pro-whats-in-it",
                q: "What’s in Pro?",
                a: "More watchlist slots, alerts, batch scans, and deeper context. Payments come later.",
                details: "Pro is focused on saving time: monitor more tickers, get notified instead of checking manually, and get richer explanations around what changed.",
                example: "Example: Instead of analyzing 20 tickers one-by-one, you run a batch scan and only drill into the ones that changed.",
            },
        ],
    },
];

/// Accordion with at most one item open.
pub fn faq_accordion(doc: &mut Document, open_id: Option<&str>) -> NodeId {
    let wrapper = doc.create(El::new("div").class("faq-accordion"));

    for section in FAQ_SECTIONS {
        doc.append_new(wrapper, El::new("h3").class("faq-section-title").text(section.title));

        for item in section.items {
            let open = open_id == Some(item.id);
            let panel_id = format!("faq-panel-{}", item.id);

            let row = doc.append_new(
                wrapper,
                El::button("")
                    .class("faq-row")
                    .attr("aria-expanded", if open { "true" } else { "false" })
                    .attr("aria-controls", &panel_id),
            );
            doc.append_new(row, El::new("span").class("faq-q").text(item.q));
            let mut chevron = El::new("span").class("faq-chevron").text("›");
            if open {
                chevron = chevron.class("open");
            }
            doc.append_new(row, chevron);
            doc.on(row, EventKind::Click, Action::ToggleFaq(item.id.to_string()));

            let mut panel_el = El::new("div").class("faq-panel").id(&panel_id);
            if open {
                panel_el = panel_el.class("open");
            }
            let panel = doc.append_new(wrapper, panel_el);
            let answer = doc.append_new(panel, El::new("div").class("faq-a"));
            doc.append_new(answer, El::new("div").class("faq-a-main").text(item.a));
            doc.append_new(answer, El::new("div").class("faq-a-details").text(item.details));
            doc.append_new(answer, El::new("div").class("faq-a-example").text(item.example));
        }
    }
    wrapper
}

pub fn render_faq_view(doc: &mut Document, mount: NodeId, open_id: Option<&str>) {
    doc.clear_children(mount);
    super::intro_panel(doc, mount, "FAQ", "Quick answers about what the signals mean.");
    let card = doc.append_new(mount, El::new("section").class("card"));
    let accordion = faq_accordion(doc, open_id);
    doc.append(card, accordion);
}
