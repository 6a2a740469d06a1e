#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, Uri},
    response::IntoResponse,
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::mpsc::{self, UnboundedReceiver};

use friendlyticker::controllers::{App, AppEvent, AppInit, HostEffect};
use friendlyticker::events::UiEvent;
use friendlyticker::services::api_client::ApiClient;
use friendlyticker::services::local_store::LocalStorage;
use friendlyticker::views::dom::NodeId;

/// One request as the fake backend saw it.
#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: String,
    pub body: Value,
}

#[derive(Clone, Default)]
struct FakeState {
    requests: Arc<Mutex<Vec<Recorded>>>,
    replies: Arc<Mutex<HashMap<(String, String), (u16, Value)>>>,
}

/// Stand-in for the analysis backend on an ephemeral port. Unknown routes
/// answer 404 with a `detail` body.
pub struct FakeBackend {
    pub base: String,
    state: FakeState,
}

impl FakeBackend {
    pub async fn start() -> Self {
        let state = FakeState::default();
        let app = Router::new().fallback(record).with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let backend = Self {
            base: format!("http://{}", addr),
            state,
        };
        backend.reply("GET", "/api/watchlist", 200, json!([]));
        backend
    }

    pub fn reply(&self, method: &str, path: &str, status: u16, body: Value) {
        self.state
            .replies
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body));
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.state.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: &str, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }
}

async fn record(
    State(st): State<FakeState>,
    method: Method,
    uri: Uri,
    body: Bytes,
) -> impl IntoResponse {
    let key = (method.to_string(), uri.path().to_string());
    st.requests.lock().unwrap().push(Recorded {
        method: key.0.clone(),
        path: key.1.clone(),
        query: uri.query().unwrap_or_default().to_string(),
        body: serde_json::from_slice(&body).unwrap_or(Value::Null),
    });

    let (status, body) = st
        .replies
        .lock()
        .unwrap()
        .get(&key)
        .cloned()
        .unwrap_or((404, json!({ "detail": "not found" })));
    (StatusCode::from_u16(status).unwrap(), Json(body))
}

/// An `App` plus the receiving end of its event channel, pumped by hand.
pub struct Session {
    pub app: App,
    rx: UnboundedReceiver<AppEvent>,
    /// storage writes seen by `flush` so far
    stored: Vec<(String, String)>,
}

impl Session {
    pub fn start(backend: &FakeBackend, storage: &[(&str, &str)], fragment: &str) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = App::start(
            AppInit {
                api: ApiClient::new(backend.base.clone()),
                storage: LocalStorage::from_snapshot(storage.iter().copied()),
                fragment: fragment.to_string(),
            },
            tx,
        );
        Self {
            app,
            rx,
            stored: Vec::new(),
        }
    }

    pub fn ui(&mut self, event: UiEvent) {
        self.app.handle(AppEvent::Ui(event));
    }

    pub fn click(&mut self, node: NodeId) {
        self.ui(UiEvent::Click { node });
    }

    pub fn click_id(&mut self, id: &str) {
        let node = self.node(id);
        self.click(node);
    }

    pub fn type_into(&mut self, node: NodeId, value: &str) {
        self.ui(UiEvent::Input {
            node,
            value: value.to_string(),
        });
    }

    pub fn submit(&mut self, node: NodeId) {
        self.ui(UiEvent::Submit { node });
    }

    pub fn hash_change(&mut self, fragment: &str) {
        self.ui(UiEvent::HashChange {
            fragment: fragment.to_string(),
        });
    }

    /// Handles queued app events until `pred` holds. False on timeout.
    pub async fn pump_until(&mut self, pred: impl Fn(&App) -> bool) -> bool {
        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        while !pred(&self.app) {
            match tokio::time::timeout_at(deadline, self.rx.recv()).await {
                Ok(Some(event)) => self.app.handle(event),
                _ => return false,
            }
        }
        true
    }

    /// Handles whatever arrives during `window`.
    pub async fn pump_for(&mut self, window: Duration) {
        let deadline = tokio::time::Instant::now() + window;
        while let Ok(Some(event)) = tokio::time::timeout_at(deadline, self.rx.recv()).await {
            self.app.handle(event);
        }
    }

    pub fn flush(&mut self) -> Vec<HostEffect> {
        let effects = self.app.flush();
        for e in &effects {
            if let HostEffect::StorageSet { key, value } = e {
                self.stored.push((key.clone(), value.clone()));
            }
        }
        effects
    }

    /// How many times the browser was told to write `key`.
    pub fn storage_writes(&mut self, key: &str) -> usize {
        self.flush();
        self.stored.iter().filter(|(k, _)| k == key).count()
    }

    /// Html of the render the browser would get now, if any.
    pub fn rendered(&mut self) -> Option<String> {
        self.flush().into_iter().find_map(|e| match e {
            HostEffect::Render { html, .. } => Some(html),
            _ => None,
        })
    }

    pub fn node(&self, id: &str) -> NodeId {
        self.app
            .document()
            .find_by_id(id)
            .unwrap_or_else(|| panic!("no element #{id}"))
    }

    pub fn text(&self, id: &str) -> String {
        self.app.document().text_content(self.node(id))
    }

    pub fn message(&self) -> String {
        self.text("global-message")
    }

    pub fn visible(&self, id: &str) -> bool {
        self.app
            .document()
            .find_by_id(id)
            .is_some_and(|n| !self.app.document().is_hidden(n))
    }
}
