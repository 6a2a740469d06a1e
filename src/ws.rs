//! The live session: one [`App`] per browser tab, driven over a websocket.

use std::collections::HashMap;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};

use crate::config::Settings;
use crate::controllers::{App, AppEvent, AppInit, HostEffect};
use crate::events::UiEvent;
use crate::services::api_client::ApiClient;
use crate::services::local_store::LocalStorage;
use crate::AppState;

pub const PING_INTERVAL: Duration = Duration::from_secs(25);

/// First frame the bridge sends after connecting, `{"type":"hello",..}`.
#[derive(Debug, Deserialize)]
pub struct Hello {
    #[serde(default)]
    pub hash: String,
    #[serde(default)]
    pub hostname: String,
    /// the `ft_*` keys currently in localStorage
    #[serde(default)]
    pub storage: HashMap<String, String>,
}

// GET /live
pub async fn live(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| run_session(socket, state.settings))
}

async fn run_session(mut socket: WebSocket, settings: Settings) {
    let Some(hello) = wait_for_hello(&mut socket).await else {
        tracing::debug!("live client left before saying hello");
        return;
    };

    let api_base = settings.api_base_for_host(&hello.hostname);
    tracing::info!(
        "live session started: host={} api={} hash={:?}",
        hello.hostname,
        api_base,
        hello.hash
    );

    let (tx, mut rx) = mpsc::unbounded_channel::<AppEvent>();
    let mut app = App::start(
        AppInit {
            api: ApiClient::new(api_base),
            storage: LocalStorage::from_snapshot(hello.storage),
            fragment: hello.hash,
        },
        tx,
    );

    if send_effects(&mut socket, &mut app).await.is_err() {
        return;
    }

    let mut ping = interval(PING_INTERVAL);

    loop {
        tokio::select! {
            _ = ping.tick() => {
                if socket.send(Message::Ping(b"ping".to_vec())).await.is_err() {
                    break;
                }
                continue;
            }

            Some(event) = rx.recv() => app.handle(event),

            client_msg = socket.recv() => {
                match client_msg {
                    Some(Ok(Message::Text(txt))) => match serde_json::from_str::<UiEvent>(&txt) {
                        Ok(ui) => app.handle(AppEvent::Ui(ui)),
                        Err(e) => {
                            tracing::warn!("unreadable live message: {}", e);
                            continue;
                        }
                    },
                    Some(Ok(Message::Close(_))) | None => break,
                    Some(Ok(_)) => continue,
                    Some(Err(_)) => break,
                }
            }
        }

        if send_effects(&mut socket, &mut app).await.is_err() {
            break;
        }
    }

    tracing::info!("live session closed");
    let _ = socket.close().await;
}

async fn wait_for_hello(socket: &mut WebSocket) -> Option<Hello> {
    while let Some(msg) = socket.recv().await {
        match msg {
            Ok(Message::Text(txt)) => match serde_json::from_str::<Hello>(&txt) {
                Ok(hello) => return Some(hello),
                Err(e) => tracing::warn!("expected hello, got: {}", e),
            },
            Ok(Message::Close(_)) | Err(_) => return None,
            Ok(_) => {}
        }
    }
    None
}

async fn send_effects(socket: &mut WebSocket, app: &mut App) -> Result<(), axum::Error> {
    for effect in app.flush() {
        let frame = encode_effect(&effect);
        socket.send(Message::Text(frame)).await?;
    }
    Ok(())
}

fn encode_effect(effect: &HostEffect) -> String {
    serde_json::to_string(effect).unwrap_or_else(|e| {
        tracing::error!("could not encode host effect: {}", e);
        String::from("{}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::views::dom::NodeId;

    #[test]
    fn hello_decodes_with_missing_fields() {
        let hello: Hello =
            serde_json::from_str(r##"{"type":"hello","hash":"#/faq","storage":{"ft_user_id":"ft_1"}}"##)
                .unwrap();
        assert_eq!(hello.hash, "#/faq");
        assert_eq!(hello.hostname, "");
        assert_eq!(hello.storage.get("ft_user_id").map(String::as_str), Some("ft_1"));
    }

    #[test]
    fn effects_are_tagged_json() {
        let json = encode_effect(&HostEffect::Render {
            html: "<p></p>".into(),
            focus: Some(NodeId(7)),
        });
        assert_eq!(json, r#"{"type":"render","html":"<p></p>","focus":7}"#);

        let json = encode_effect(&HostEffect::SetHash {
            fragment: "#/alerts".into(),
        });
        assert_eq!(json, r##"{"type":"set_hash","fragment":"#/alerts"}"##);
    }
}
