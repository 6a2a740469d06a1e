use std::net::SocketAddr;

use tracing_subscriber::EnvFilter;

use friendlyticker::{config, routes, templates, AppState};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("friendlyticker=info,analytics=info")),
        )
        .init();

    let settings = config::load();

    let state = AppState {
        hbs: templates::build_handlebars().expect("page templates"),
        settings: settings.clone(),
    };

    let app = routes::app(state);

    let addr = SocketAddr::from((
        settings
            .host
            .parse::<std::net::IpAddr>()
            .expect("HOST must be an IP address"),
        settings.port,
    ));
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.expect("bind");
    axum::serve(listener, app).await.expect("server");
}
