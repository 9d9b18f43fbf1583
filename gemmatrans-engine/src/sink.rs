use serde::Serialize;
use tokio::sync::mpsc;

/// What a session reports to its host, in delivery order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "payload")]
pub enum Notification {
    #[serde(rename = "translation:chunk")]
    Chunk(String),
    #[serde(rename = "translation:done")]
    Done,
    #[serde(rename = "translation:error")]
    Error(String),
}

impl Notification {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Notification::Chunk(_))
    }
}

/// Receives a session's notifications.
///
/// A session calls `chunk` zero or more times, then exactly one of `done` or
/// `error`, then nothing. Implementations must return quickly; they run on
/// the session's task between body reads.
pub trait NotificationSink: Send + Sync {
    fn chunk(&self, text: &str);
    fn done(&self);
    fn error(&self, message: &str);
}

/// Forwards notifications over an unbounded channel.
///
/// A dropped receiver is not an error: the session still runs to completion,
/// its notifications are discarded.
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: mpsc::UnboundedSender<Notification>,
}

impl ChannelSink {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn send(&self, n: Notification) {
        if self.tx.send(n).is_err() {
            log::debug!("notification receiver dropped");
        }
    }
}

impl NotificationSink for ChannelSink {
    fn chunk(&self, text: &str) {
        self.send(Notification::Chunk(text.to_string()));
    }

    fn done(&self) {
        self.send(Notification::Done);
    }

    fn error(&self, message: &str) {
        self.send(Notification::Error(message.to_string()));
    }
}
