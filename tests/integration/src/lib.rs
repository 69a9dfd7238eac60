use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};

use medifind_server::distance::FixedDistance;
use medifind_server::repository::InMemoryCatalog;
use medifind_server::routes::build_router;
use medifind_server::seed;
use medifind_server::state::AppState;

pub mod harness;

pub type Socket = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub const TIMEOUT: Duration = Duration::from_secs(5);

/// Every pharmacy is this far away in spawned servers.
pub const FIXED_DISTANCE_KM: f64 = 2.0;

/// Start a seeded server on an ephemeral port and return its address.
pub async fn spawn_server() -> SocketAddr {
    init_tracing();
    let state = AppState::new(
        Arc::new(InMemoryCatalog::new(seed::demo())),
        Arc::new(FixedDistance(FIXED_DISTANCE_KM)),
        16,
    );
    let app = build_router(Arc::new(state), None);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "test server stopped");
        }
    });
    addr
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// Open a WebSocket to the server's real-time endpoint.
pub async fn connect_ws(addr: SocketAddr) -> Socket {
    connect_ws_at(addr, "/ws").await
}

/// Open a WebSocket at `path`; the server also accepts upgrades at `/`.
pub async fn connect_ws_at(addr: SocketAddr, path: &str) -> Socket {
    let url = format!("ws://{addr}{path}");
    let (socket, _) = tokio_tungstenite::connect_async(url.as_str())
        .await
        .unwrap_or_else(|e| panic!("Failed to connect to {url}: {e}"));
    socket
}

/// Next JSON text frame, or `None` if nothing arrives within `timeout`.
pub async fn recv_json(socket: &mut Socket, timeout: Duration) -> Option<serde_json::Value> {
    let deadline = tokio::time::Instant::now() + timeout;
    loop {
        let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
        match tokio::time::timeout(remaining, socket.next()).await {
            Ok(Some(Ok(Message::Text(text)))) => {
                return serde_json::from_str(text.as_str()).ok();
            }
            Ok(Some(Ok(_))) => continue,
            Ok(Some(Err(_))) | Ok(None) | Err(_) => return None,
        }
    }
}
