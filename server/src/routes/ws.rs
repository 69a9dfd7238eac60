use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;

use medifind_common::alert::RealtimeEvent;

use crate::state::AppState;

/// Upgrade to a WebSocket that relays every real-time event.
///
/// The subscription is taken before the upgrade completes, so an event
/// published right after the handshake is not missed.
pub async fn upgrade(State(state): State<Arc<AppState>>, ws: WebSocketUpgrade) -> Response {
    accept(ws, &state)
}

pub fn accept(ws: WebSocketUpgrade, state: &AppState) -> Response {
    let events = BroadcastStream::new(state.broadcaster.subscribe());
    ws.on_upgrade(move |socket| relay(socket, events))
}

async fn relay(socket: WebSocket, mut events: BroadcastStream<RealtimeEvent>) {
    let (mut sink, mut incoming) = socket.split();
    tracing::info!("realtime client connected");

    loop {
        tokio::select! {
            event = events.next() => match event {
                Some(Ok(event)) => {
                    let payload = match serde_json::to_string(&event) {
                        Ok(payload) => payload,
                        Err(e) => {
                            tracing::warn!(error = %e, "failed to encode realtime event");
                            continue;
                        }
                    };
                    if sink.send(Message::Text(payload.into())).await.is_err() {
                        break;
                    }
                }
                Some(Err(BroadcastStreamRecvError::Lagged(skipped))) => {
                    tracing::warn!(skipped, "realtime client lagging, events dropped");
                }
                None => break,
            },
            message = incoming.next() => match message {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                // Clients have nothing to say on this channel.
                Some(Ok(_)) => {}
            },
        }
    }

    tracing::info!("realtime client disconnected");
}
