//! Runtime for the conversation view
//!
//! Owns the `ChatState`, feeds events through the pure transition function,
//! executes the resulting effects, and publishes every change to observers.

use super::client::ProxyClient;
use super::{transition, ChatState, Effect, Event, KeyPress};
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{broadcast, mpsc, watch};

const EVENT_CHANNEL_SIZE: usize = 64;
const UPDATE_CHANNEL_SIZE: usize = 64;

/// Published to observers after every applied transition
#[derive(Debug, Clone)]
pub struct ViewUpdate {
    pub state: ChatState,
    /// The conversation changed; bring the newest turn into view
    pub scroll_to_latest: bool,
}

/// The runtime task has exited
#[derive(Debug, Error)]
#[error("Chat runtime is no longer running")]
pub struct RuntimeStopped;

/// Event loop that owns one conversation view
pub struct ChatRuntime<C>
where
    C: ProxyClient + 'static,
{
    state: ChatState,
    client: Arc<C>,
    event_rx: mpsc::Receiver<Event>,
    /// Weak so the loop ends once every handle and in-flight call is gone
    event_tx: mpsc::WeakSender<Event>,
    broadcast_tx: broadcast::Sender<ViewUpdate>,
    state_tx: watch::Sender<ChatState>,
}

impl<C> ChatRuntime<C>
where
    C: ProxyClient + 'static,
{
    /// Start a runtime with a fresh conversation on the current tokio runtime
    pub fn spawn(client: C) -> ChatHandle {
        let (event_tx, event_rx) = mpsc::channel(EVENT_CHANNEL_SIZE);
        let (broadcast_tx, _) = broadcast::channel(UPDATE_CHANNEL_SIZE);
        let (state_tx, state_rx) = watch::channel(ChatState::new());

        let runtime = Self {
            state: ChatState::new(),
            client: Arc::new(client),
            event_rx,
            event_tx: event_tx.downgrade(),
            broadcast_tx: broadcast_tx.clone(),
            state_tx,
        };
        tokio::spawn(runtime.run());

        ChatHandle {
            event_tx,
            broadcast_tx,
            state_rx,
        }
    }

    async fn run(mut self) {
        tracing::info!("Starting chat runtime");

        while let Some(event) = self.event_rx.recv().await {
            self.process_event(event);
        }

        tracing::info!("Chat runtime stopped");
    }

    fn process_event(&mut self, event: Event) {
        if let Event::ReplyFailed { reason } = &event {
            tracing::warn!(reason = %reason, "Chat proxy call failed");
        }

        let result = match transition(&self.state, event) {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!(error = %e, "Event ignored");
                return;
            }
        };

        self.state = result.new_state;

        let mut render = false;
        let mut scroll_to_latest = false;
        for effect in result.effects {
            match effect {
                Effect::SendMessage { text } => self.send_message(text),
                Effect::ScrollToLatest => scroll_to_latest = true,
                Effect::Render => render = true,
            }
        }

        self.state_tx.send_replace(self.state.clone());
        if render || scroll_to_latest {
            // No subscribers is fine
            let _ = self.broadcast_tx.send(ViewUpdate {
                state: self.state.clone(),
                scroll_to_latest,
            });
        }
    }

    /// Spawn the proxy call; its outcome comes back as an event
    fn send_message(&self, text: String) {
        let Some(event_tx) = self.event_tx.upgrade() else {
            return;
        };
        let client = self.client.clone();

        tokio::spawn(async move {
            tracing::debug!(chars = text.chars().count(), "Sending message to chat proxy");
            let event = match client.send_message(&text).await {
                Ok(reply) => Event::ReplyReceived { text: reply },
                Err(e) => Event::ReplyFailed {
                    reason: e.to_string(),
                },
            };
            let _ = event_tx.send(event).await;
        });
    }
}

/// Cloneable front door to a running conversation view
#[derive(Clone)]
pub struct ChatHandle {
    event_tx: mpsc::Sender<Event>,
    broadcast_tx: broadcast::Sender<ViewUpdate>,
    state_rx: watch::Receiver<ChatState>,
}

impl ChatHandle {
    /// Submit `text` as the next user turn. Blank text, or a submit while a
    /// reply is pending, is ignored.
    pub async fn submit(&self, text: impl Into<String>) -> Result<(), RuntimeStopped> {
        self.send(Event::Submit { text: text.into() }).await
    }

    pub async fn key_press(&self, key: KeyPress) -> Result<(), RuntimeStopped> {
        self.send(Event::KeyPress(key)).await
    }

    async fn send(&self, event: Event) -> Result<(), RuntimeStopped> {
        self.event_tx.send(event).await.map_err(|_| RuntimeStopped)
    }

    /// Receive a `ViewUpdate` for every change from now on
    pub fn subscribe(&self) -> broadcast::Receiver<ViewUpdate> {
        self.broadcast_tx.subscribe()
    }

    /// Latest published state
    pub fn snapshot(&self) -> ChatState {
        self.state_rx.borrow().clone()
    }

    /// Wait until the published state satisfies `predicate`
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&ChatState) -> bool,
    ) -> Result<ChatState, RuntimeStopped> {
        let mut rx = self.state_rx.clone();
        let state = rx.wait_for(predicate).await.map_err(|_| RuntimeStopped)?;
        Ok(state.clone())
    }
}
