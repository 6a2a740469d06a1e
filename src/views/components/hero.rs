use crate::views::dom::{Document, El, NodeId};

const POINTS: [(&str, &str); 3] = [
    ("Direction", "Uptrend · Sideways · Downtrend"),
    ("Trend Health (0–100)", "How intact the trend still is"),
    ("Momentum", "Strength building or fading"),
];

/// Marketing block shown above the analyze form. Created detached.
pub fn hero(doc: &mut Document) -> NodeId {
    let section = doc.create(El::new("section").class("hero"));
    doc.append_new(
        section,
        El::new("h1").text("Know When a Stock’s Trend Is Still Worth Trading"),
    );
    doc.append_new(
        section,
        El::new("p").text(
            "FriendlyTicker turns price action into a clear direction, a simple health score, \
             and a quick momentum read, so you know when to stay in or step aside.",
        ),
    );

    let points = doc.append_new(section, El::new("div").class("heroPoints"));
    for (title, body) in POINTS {
        let point = doc.append_new(points, El::new("div").class("heroPoint"));
        doc.append_new(point, El::new("div").class("heroPointTitle").text(title));
        doc.append_new(point, El::new("div").class("heroPointBody").text(body));
    }
    section
}
