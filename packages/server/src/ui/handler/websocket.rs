//! WebSocket connection handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade, rejection::WebSocketUpgradeRejection},
    },
    response::{IntoResponse, Response},
};
use futures_util::{
    sink::SinkExt,
    stream::{SplitSink, StreamExt},
};

use crate::{
    domain::SessionId,
    infrastructure::{
        dto::websocket::ClientMessage,
        transport::{CloseSignal, OutboundFrame, PusherReceiver, WebSocketTransport},
    },
    ui::state::AppState,
};

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Root and fallback route: upgrade when the client asks for a WebSocket,
/// otherwise answer with the plain-text banner.
pub async fn root_handler(
    ws: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match ws {
        Ok(ws) => ws.on_upgrade(move |socket| handle_socket(socket, state)),
        Err(_) => super::banner().await.into_response(),
    }
}

/// Spawns the writer task draining the session's outbound queue into the socket.
///
/// The task ends when the queue is dropped or a write fails; either way the
/// session's transport reads as closed from then on.
fn pusher_loop(
    mut rx: PusherReceiver,
    mut sender: SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(frame) = rx.recv().await {
            let message = match frame {
                OutboundFrame::Text(text) => Message::Text(text.into()),
                OutboundFrame::Ping => Message::Ping(Bytes::new()),
            };
            if sender.send(message).await.is_err() {
                break;
            }
        }
    })
}

/// Spawns the reader task dispatching inbound frames of session `id`.
fn receiver_loop(
    mut receiver: futures_util::stream::SplitStream<WebSocket>,
    state: Arc<AppState>,
    id: SessionId,
    close: CloseSignal,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::warn!("WebSocket error on session '{}': {}", id, e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => match ClientMessage::parse(text.as_str()) {
                    Some(message) => {
                        let usecase = &state.handle_message_usecase;
                        if let Err(e) = usecase.execute(id, message.into()).await {
                            tracing::debug!("Message dropped: {}", e);
                        }
                    }
                    None => state.handle_message_usecase.mark_alive(&id).await,
                },
                Message::Binary(_) | Message::Ping(_) | Message::Pong(_) => {
                    state.handle_message_usecase.mark_alive(&id).await;
                }
                Message::Close(_) => {
                    close.mark_closing();
                    tracing::debug!("Session '{}' requested close", id);
                    break;
                }
            }
        }
    })
}

async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (sender, receiver) = socket.split();
    let (transport, rx, close) = WebSocketTransport::channel();

    let id = state
        .connect_session_usecase
        .execute(Box::new(transport))
        .await;

    let mut send_task = pusher_loop(rx, sender);
    let mut recv_task = receiver_loop(receiver, state.clone(), id, close);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state.disconnect_session_usecase.execute(id).await;
}
