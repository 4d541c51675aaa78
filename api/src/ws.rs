//! WebSocket relay for live community updates.

use axum::{
    extract::{
        ws::{rejection::WebSocketUpgradeRejection, Message, WebSocket, WebSocketUpgrade},
        Query, State,
    },
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, error, warn};

use crate::{
    error::ApiError,
    notify::{topic_channel, Notification},
    AppState,
};

#[derive(Deserialize)]
pub struct SubscribeParams {
    topic: Option<String>,
}

/// GET /api/community/ws?topic=<id>
///
/// Streams broadcast events, plus the events of one topic when `topic` is
/// given.
pub async fn subscribe(
    State(state): State<AppState>,
    Query(params): Query<SubscribeParams>,
    upgrade: Result<WebSocketUpgrade, WebSocketUpgradeRejection>,
) -> Result<Response, ApiError> {
    let receiver = state
        .community
        .notifier()
        .subscribe()
        .ok_or(ApiError::NotificationsDisabled)?;
    let upgrade = match upgrade {
        Ok(upgrade) => upgrade,
        Err(rejection) => return Ok(rejection.into_response()),
    };
    let channel = params.topic.as_deref().map(topic_channel);
    Ok(upgrade.on_upgrade(move |socket| relay(socket, receiver, channel)))
}

async fn relay(
    mut socket: WebSocket,
    mut receiver: broadcast::Receiver<Notification>,
    channel: Option<String>,
) {
    debug!(?channel, "subscriber connected");
    loop {
        tokio::select! {
            incoming = socket.recv() => match incoming {
                None | Some(Ok(Message::Close(_))) => break,
                Some(Err(e)) => {
                    debug!(error = %e, "subscriber socket failed");
                    break;
                }
                // subscribers only listen
                Some(Ok(_)) => {}
            },
            published = receiver.recv() => match published {
                Ok(notification) if notification.reaches(channel.as_deref()) => {
                    let text = match serde_json::to_string(&notification.event) {
                        Ok(text) => text,
                        Err(e) => {
                            error!(event = notification.name(), error = %e, "event not serialisable");
                            continue;
                        }
                    };
                    if socket.send(Message::Text(text.into())).await.is_err() {
                        break;
                    }
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, ?channel, "subscriber lagging, events dropped");
                }
                Err(RecvError::Closed) => break,
            },
        }
    }
    debug!(?channel, "subscriber disconnected");
}
