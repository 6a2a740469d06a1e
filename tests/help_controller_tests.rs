mod common;

use std::time::Duration;

use common::{FakeBackend, Session};
use friendlyticker::controllers::HostEffect;
use friendlyticker::events::UiEvent;
use friendlyticker::views::components::contact::{COPY_BUTTON_ID, COPY_TOAST_ID};

fn open_faq_panels(s: &Session) -> Vec<String> {
    let doc = s.app.document();
    doc.find_all_in(s.app.shell().faq_view, &|el| {
        el.classes.iter().any(|c| c == "faq-panel") && el.classes.iter().any(|c| c == "open")
    })
    .into_iter()
    .filter_map(|n| doc.get(n).and_then(|e| e.id.clone()))
    .collect()
}

#[tokio::test]
async fn faq_keeps_at_most_one_item_open() {
    let backend = FakeBackend::start().await;
    let mut s = Session::start(&backend, &[], "#/faq");

    let rows = s
        .app
        .document()
        .find_all_by_class(s.app.shell().faq_view, "faq-row");
    s.click(rows[0]);
    assert_eq!(open_faq_panels(&s).len(), 1);

    // the view re-renders, so look the rows up again
    let rows = s
        .app
        .document()
        .find_all_by_class(s.app.shell().faq_view, "faq-row");
    s.click(rows[2]);
    let open = open_faq_panels(&s);
    assert_eq!(open.len(), 1);

    let rows = s
        .app
        .document()
        .find_all_by_class(s.app.shell().faq_view, "faq-row");
    s.click(rows[2]);
    assert!(open_faq_panels(&s).is_empty());

    // leaving and coming back starts collapsed
    let rows = s
        .app
        .document()
        .find_all_by_class(s.app.shell().faq_view, "faq-row");
    s.click(rows[1]);
    s.hash_change("#/contact");
    s.hash_change("#/faq");
    assert!(open_faq_panels(&s).is_empty());
}

#[tokio::test(start_paused = true)]
async fn copy_email_confirms_then_restores() {
    let backend = FakeBackend::start().await;
    let mut s = Session::start(&backend, &[], "#/contact");
    s.flush();

    s.click_id(COPY_BUTTON_ID);
    assert!(s.flush().contains(&HostEffect::Clipboard {
        text: "friendlyticker@gmail.com".into()
    }));

    s.ui(UiEvent::Clipboard { ok: true });
    let button = s.node(COPY_BUTTON_ID);
    assert_eq!(s.text(COPY_BUTTON_ID), "Copied!");
    assert!(s.app.document().is_disabled(button));
    assert_eq!(s.text(COPY_TOAST_ID), "Email copied to clipboard");

    s.pump_for(Duration::from_millis(1100)).await;
    assert!(s.app.document().is_disabled(button));

    assert!(s.pump_until(|app| !app.document().is_disabled(button)).await);
    assert_eq!(s.text(COPY_BUTTON_ID), "Copy email");
    assert_eq!(s.text(COPY_TOAST_ID), "");
}

#[tokio::test(start_paused = true)]
async fn copy_failure_shows_the_address() {
    let backend = FakeBackend::start().await;
    let mut s = Session::start(&backend, &[], "#/contact");

    s.click_id(COPY_BUTTON_ID);
    s.ui(UiEvent::Clipboard { ok: false });
    s.pump_for(Duration::from_millis(1500)).await;

    assert_eq!(
        s.text(COPY_TOAST_ID),
        "Couldn’t copy. Email: friendlyticker@gmail.com"
    );
    assert!(!s.app.document().is_disabled(s.node(COPY_BUTTON_ID)));
}
