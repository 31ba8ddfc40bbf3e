use axum::{
    extract::{
        State, WebSocketUpgrade,
        ws::{Message, WebSocket},
    },
    response::IntoResponse,
};
use futures::{SinkExt, StreamExt};

use crate::app::SharedState;

/// WebSocket upgrade handler.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<SharedState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: SharedState) {
    let (mut to_client, mut from_client) = socket.split();
    let mut events = state.subscribe_ws();

    let client_id = uuid::Uuid::new_v4().to_string();
    let welcome = serde_json::json!({
        "type": "connected",
        "data": { "clientId": client_id }
    });
    if to_client
        .send(Message::Text(welcome.to_string().into()))
        .await
        .is_err()
    {
        return;
    }

    tracing::info!(client_id, "WebSocket client connected");

    // Fan server events out to this client
    let mut send_task = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            if to_client.send(Message::Text(event.into())).await.is_err() {
                break;
            }
        }
    });

    // Handle messages coming back from the client
    let ws_tx = state.ws_sender().clone();
    let cid = client_id.clone();
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = from_client.next().await {
            match msg {
                Message::Text(text) => handle_client_message(&text, &ws_tx),
                Message::Close(_) => break,
                _ => {}
            }
        }
        tracing::info!(client_id = cid, "WebSocket client disconnected");
    });

    tokio::select! {
        _ = &mut send_task => recv_task.abort(),
        _ = &mut recv_task => send_task.abort(),
    }
}

/// Answer pings at the application level; anything else is relayed to every
/// connected client (display screens use this to mirror UI state).
fn handle_client_message(text: &str, ws_tx: &tokio::sync::broadcast::Sender<String>) {
    let msg_type = serde_json::from_str::<serde_json::Value>(text)
        .ok()
        .and_then(|msg| msg.get("type").and_then(|t| t.as_str()).map(str::to_string));

    if msg_type.as_deref() == Some("ping") {
        let pong = serde_json::json!({ "type": "pong" });
        let _ = ws_tx.send(pong.to_string());
        return;
    }

    let _ = ws_tx.send(text.to_string());
}
