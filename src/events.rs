use serde::Deserialize;

use crate::models::Sensitivity;
use crate::router::Route;
use crate::views::dom::NodeId;

/// DOM event types the live bridge forwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Input,
    Change,
    Submit,
    KeyDown,
}

/// Which control on an alert preferences card fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefControl {
    RegimeShift,
    HealthDelta,
    Sensitivity(Sensitivity),
    TrendPressure,
    Thresholds,
    Below,
    Above,
}

/// What a registered listener does. Listeners are data, so the registry can
/// be inspected, deduplicated and purged along with the nodes they hang off.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(Route),
    SubmitAnalyze,
    AddToWatchlist(String),
    RemoveFromWatchlist(String),
    EnableAlerts(String),
    OpenProModal(String),
    CloseProModal,
    /// closes the modal only when the overlay itself was the target
    OverlayClick,
    SubmitWaitlist,
    EscapeKey,
    /// delegated on the alerts list: opens the upsell from a card's CTA
    AlertsListClick,
    Pref { ticker: String, control: PrefControl },
    ToggleRule(String),
    RemoveRule(String),
    ToggleAdvanced { panel: NodeId },
    ToggleFaq(String),
    CopyContactEmail,
}

/// One message from the page's live bridge.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    Click {
        node: NodeId,
    },
    Input {
        node: NodeId,
        value: String,
    },
    Change {
        node: NodeId,
        #[serde(default)]
        value: Option<String>,
        #[serde(default)]
        checked: Option<bool>,
    },
    Submit {
        node: NodeId,
    },
    Keydown {
        key: String,
    },
    Focus {
        #[serde(default)]
        node: Option<NodeId>,
    },
    #[serde(rename = "hashchange")]
    HashChange {
        fragment: String,
    },
    Prompt {
        token: u64,
        #[serde(default)]
        value: Option<String>,
    },
    Clipboard {
        ok: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_bridge_messages() {
        let ev: UiEvent = serde_json::from_str(r#"{"type":"click","node":12}"#).unwrap();
        assert_eq!(ev, UiEvent::Click { node: NodeId(12) });

        let ev: UiEvent =
            serde_json::from_str(r##"{"type":"hashchange","fragment":"#/faq"}"##).unwrap();
        assert_eq!(ev, UiEvent::HashChange { fragment: "#/faq".into() });

        let ev: UiEvent =
            serde_json::from_str(r#"{"type":"change","node":3,"checked":true}"#).unwrap();
        assert_eq!(
            ev,
            UiEvent::Change { node: NodeId(3), value: None, checked: Some(true) }
        );

        let ev: UiEvent = serde_json::from_str(r#"{"type":"prompt","token":1,"value":null}"#).unwrap();
        assert_eq!(ev, UiEvent::Prompt { token: 1, value: None });
    }
}
