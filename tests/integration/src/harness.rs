use std::net::SocketAddr;

use reqwest::StatusCode;
use serde_json::{json, Value};

use crate::{connect_ws, connect_ws_at, recv_json, spawn_server, Socket, TIMEOUT};

/// A running server plus an HTTP client pointed at it.
pub struct TestHarness {
    pub addr: SocketAddr,
    pub http: reqwest::Client,
}

impl TestHarness {
    pub async fn setup() -> Self {
        Self {
            addr: spawn_server().await,
            http: reqwest::Client::new(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Value) {
        let resp = self
            .http
            .get(self.url(path))
            .send()
            .await
            .unwrap_or_else(|e| panic!("GET {path} failed: {e}"));
        decode(resp).await
    }

    pub async fn send(&self, method: reqwest::Method, path: &str, body: Value) -> (StatusCode, Value) {
        let resp = self
            .http
            .request(method, self.url(path))
            .json(&body)
            .send()
            .await
            .unwrap_or_else(|e| panic!("{path} failed: {e}"));
        decode(resp).await
    }

    /// Register a price alert and return its id.
    pub async fn create_alert(&self, medicine_id: u32, max_price: f64, email: &str) -> u64 {
        let (status, body) = self
            .send(
                reqwest::Method::POST,
                "/api/alerts/price",
                json!({ "medicine_id": medicine_id, "max_price": max_price, "email": email }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        body["alert"]["id"].as_u64().expect("alert id")
    }

    /// Set a pharmacy's price for a medicine and return how many alerts fired.
    pub async fn set_price(&self, pharmacy_id: u32, medicine_id: u32, price: f64) -> u64 {
        let (status, body) = self
            .send(
                reqwest::Method::PUT,
                &format!("/api/admin/inventory/{pharmacy_id}/medicine/{medicine_id}"),
                json!({ "price": price }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["alerts_triggered"].as_u64().expect("alerts_triggered")
    }

    pub async fn subscriber(&self) -> Subscriber {
        Subscriber {
            socket: connect_ws(self.addr).await,
        }
    }

    /// Subscriber connected at the site root, where a served frontend connects.
    pub async fn root_subscriber(&self) -> Subscriber {
        Subscriber {
            socket: connect_ws_at(self.addr, "/").await,
        }
    }
}

async fn decode(resp: reqwest::Response) -> (StatusCode, Value) {
    let status = resp.status();
    let body = resp.json().await.unwrap_or(Value::Null);
    (status, body)
}

/// A WebSocket client listening for real-time events.
pub struct Subscriber {
    pub socket: Socket,
}

impl Subscriber {
    pub async fn recv_event(&mut self) -> Value {
        recv_json(&mut self.socket, TIMEOUT)
            .await
            .expect("Expected a real-time event")
    }

    /// True if nothing arrives within `wait`.
    pub async fn stays_quiet(&mut self, wait: std::time::Duration) -> bool {
        recv_json(&mut self.socket, wait).await.is_none()
    }
}
