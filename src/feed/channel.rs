//! Push channel client with fixed-delay reconnection

use std::time::Duration;

use futures_util::StreamExt;
use log::{debug, error, info, warn};
use tokio::sync::{mpsc::UnboundedSender, watch};
use tokio_tungstenite::{connect_async, tungstenite::Message};

use super::message::PushMessage;
use super::FeedEvent;
use crate::errors::Result;

/// WebSocket subscriber for live order updates
///
/// `run` keeps the connection alive until shutdown is signalled: every close
/// or failed connect is followed by the same fixed delay and another
/// attempt, with no retry limit.
#[derive(Debug, Clone)]
pub struct PushChannel {
    url: String,
    reconnect_delay: Duration,
}

/// Why a single connection ended
enum Disconnect {
    /// Remote closed or the stream ended
    Closed,
    /// Nobody is listening for events any more
    ReceiverGone,
}

impl PushChannel {
    pub fn new(url: impl Into<String>, reconnect_delay: Duration) -> Self {
        Self {
            url: url.into(),
            reconnect_delay,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Connect, forward events, and reconnect until shutdown
    ///
    /// Returns when `shutdown` flips to `true` (or its sender is dropped) or
    /// when `events` has no receiver left.
    pub async fn run(self, events: UnboundedSender<FeedEvent>, mut shutdown: watch::Receiver<bool>) {
        loop {
            if *shutdown.borrow() || events.is_closed() {
                break;
            }

            let outcome = tokio::select! {
                _ = shutdown.changed() => break,
                outcome = self.connect_and_listen(&events) => outcome,
            };

            match outcome {
                Ok(Disconnect::ReceiverGone) => break,
                Ok(Disconnect::Closed) => info!("Push channel disconnected"),
                Err(e) => error!("Push channel error: {}", e),
            }

            if events.send(FeedEvent::Disconnected).is_err() {
                break;
            }

            debug!("Reconnecting to push channel in {:?}", self.reconnect_delay);
            tokio::select! {
                _ = shutdown.changed() => break,
                _ = tokio::time::sleep(self.reconnect_delay) => {}
            }
        }

        debug!("Push channel task stopped");
    }

    async fn connect_and_listen(&self, events: &UnboundedSender<FeedEvent>) -> Result<Disconnect> {
        let (mut stream, _) = connect_async(self.url.as_str()).await?;
        info!("Push channel connected to {}", self.url);

        if events.send(FeedEvent::Connected).is_err() {
            return Ok(Disconnect::ReceiverGone);
        }

        while let Some(frame) = stream.next().await {
            match frame? {
                Message::Text(text) => {
                    if let Some(event) = Self::handle_text(&text) {
                        if events.send(event).is_err() {
                            return Ok(Disconnect::ReceiverGone);
                        }
                    }
                }
                Message::Close(frame) => {
                    debug!("Push channel close frame: {:?}", frame);
                    return Ok(Disconnect::Closed);
                }
                Message::Binary(data) => {
                    debug!("Ignoring {} byte binary frame", data.len());
                }
                _ => {}
            }
        }

        Ok(Disconnect::Closed)
    }

    /// Turn a text frame into an event; malformed frames are logged and dropped
    fn handle_text(text: &str) -> Option<FeedEvent> {
        match PushMessage::parse(text) {
            Ok(message) => message.map(FeedEvent::from),
            Err(e) => {
                warn!("Error parsing push message: {}", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use futures_util::SinkExt;
    use tokio::net::TcpListener;
    use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
    use tokio::time::timeout;
    use tokio_tungstenite::accept_async;

    use super::*;
    use crate::order::OrderStatus;

    const ORDER: &str = r#"{"id":1,"assigned_person":"John Marwin","toy_name":"Robot","status":"PENDING","total_amount":250}"#;

    async fn next(receiver: &mut UnboundedReceiver<FeedEvent>) -> FeedEvent {
        timeout(Duration::from_secs(5), receiver.recv())
            .await
            .unwrap()
            .unwrap()
    }

    #[test]
    fn test_handle_text() {
        assert!(matches!(PushChannel::handle_text(ORDER), Some(FeedEvent::Order(_))));
        assert_eq!(PushChannel::handle_text(r#"{"type":"clear"}"#), Some(FeedEvent::Cleared));
        assert_eq!(PushChannel::handle_text(""), None);
        assert_eq!(PushChannel::handle_text("garbage"), None);
    }

    #[tokio::test]
    async fn test_forwards_messages_and_reconnects() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let accepted = Arc::new(AtomicU32::new(0));

        let counter = accepted.clone();
        tokio::spawn(async move {
            while let Ok((tcp, _)) = listener.accept().await {
                let connection = counter.fetch_add(1, Ordering::SeqCst);
                let mut ws = accept_async(tcp).await.unwrap();
                if connection == 0 {
                    ws.send(Message::Text(ORDER.to_string())).await.unwrap();
                    ws.send(Message::Text("{broken".to_string())).await.unwrap();
                    ws.send(Message::Text(r#"{"type":"clear"}"#.to_string())).await.unwrap();
                    ws.close(None).await.unwrap();
                } else {
                    // Hold the second connection open
                    while ws.next().await.is_some() {}
                }
            }
        });

        let (sender, mut receiver) = unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let channel = PushChannel::new(format!("ws://{}/ws", addr), Duration::from_millis(50));
        let task = tokio::spawn(channel.run(sender, shutdown_rx));

        assert_eq!(next(&mut receiver).await, FeedEvent::Connected);
        match next(&mut receiver).await {
            FeedEvent::Order(order) => assert_eq!(order.status, OrderStatus::Pending),
            other => panic!("Expected order, got {:?}", other),
        }
        assert_eq!(next(&mut receiver).await, FeedEvent::Cleared);
        assert_eq!(next(&mut receiver).await, FeedEvent::Disconnected);
        assert_eq!(next(&mut receiver).await, FeedEvent::Connected);
        assert_eq!(accepted.load(Ordering::SeqCst), 2);

        shutdown_tx.send(true).unwrap();
        timeout(Duration::from_secs(5), task).await.unwrap().unwrap();
    }

    #[tokio::test]
    async fn test_shutdown_during_reconnect_delay() {
        // Nothing listens here, so every attempt fails
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let (sender, mut receiver) = unbounded_channel();
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let channel = PushChannel::new(format!("ws://{}/ws", addr), Duration::from_secs(3600));
        let task = tokio::spawn(channel.run(sender, shutdown_rx));

        let event = timeout(Duration::from_secs(5), receiver.recv()).await.unwrap();
        assert_eq!(event, Some(FeedEvent::Disconnected));

        shutdown_tx.send(true).unwrap();
        timeout(Duration::from_secs(5), task).await.unwrap().unwrap();
    }
}
