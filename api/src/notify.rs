//! Best-effort fan-out of community events.
//!
//! Publishing never blocks and never fails the caller: with no live
//! subscribers the event is dropped, and deployments that do not want live
//! updates get a [`NoopNotifier`].

use lawsphere_shared::CommunityEvent;
use tokio::sync::broadcast;
use tracing::debug;

pub const DEFAULT_CAPACITY: usize = 256;

/// An event plus the channel it is scoped to; `None` reaches everyone.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub channel: Option<String>,
    pub event: CommunityEvent,
}

impl Notification {
    pub fn broadcast(event: CommunityEvent) -> Self {
        Self {
            channel: None,
            event,
        }
    }

    pub fn to_topic(topic_id: &str, event: CommunityEvent) -> Self {
        Self {
            channel: Some(topic_channel(topic_id)),
            event,
        }
    }

    /// Whether a subscriber listening on `channel` (plus the broadcast
    /// channel) should receive this notification.
    pub fn reaches(&self, channel: Option<&str>) -> bool {
        match self.channel.as_deref() {
            None => true,
            Some(scoped) => channel == Some(scoped),
        }
    }

    pub fn name(&self) -> &'static str {
        match self.event {
            CommunityEvent::NewTopic(_) => "new-topic",
            CommunityEvent::NewReply { .. } => "new-reply",
            CommunityEvent::TopicVoteUpdate { .. } => "topic-vote-update",
            CommunityEvent::ReplyVoteUpdate { .. } => "reply-vote-update",
        }
    }
}

pub fn topic_channel(topic_id: &str) -> String {
    format!("topic-{topic_id}")
}

pub trait Notifier: Send + Sync {
    /// Fire and forget.
    fn publish(&self, notification: Notification);

    /// A live feed of every published notification, or `None` when
    /// delivery is switched off.
    fn subscribe(&self) -> Option<broadcast::Receiver<Notification>>;
}

pub struct BroadcastNotifier {
    sender: broadcast::Sender<Notification>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl Notifier for BroadcastNotifier {
    fn publish(&self, notification: Notification) {
        let name = notification.name();
        let channel = notification.channel.clone();
        match self.sender.send(notification) {
            Ok(receivers) => debug!(event = name, ?channel, receivers, "emitted event"),
            Err(_) => debug!(event = name, ?channel, "event not emitted: no subscribers"),
        }
    }

    fn subscribe(&self) -> Option<broadcast::Receiver<Notification>> {
        Some(self.sender.subscribe())
    }
}

#[derive(Debug, Default)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn publish(&self, _notification: Notification) {}

    fn subscribe(&self) -> Option<broadcast::Receiver<Notification>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vote(topic_id: &str) -> CommunityEvent {
        CommunityEvent::TopicVoteUpdate {
            topic_id: topic_id.to_string(),
            vote_score: 1,
        }
    }

    #[test]
    fn publishing_without_subscribers_is_silent() {
        BroadcastNotifier::default().publish(Notification::broadcast(vote("1")));
        NoopNotifier.publish(Notification::broadcast(vote("1")));
        assert!(NoopNotifier.subscribe().is_none());
    }

    #[tokio::test]
    async fn subscribers_receive_published_events() {
        let notifier = BroadcastNotifier::new(4);
        let mut rx = notifier.subscribe().expect("subscription");

        notifier.publish(Notification::to_topic("9", vote("9")));

        let received = rx.recv().await.expect("event");
        assert_eq!(received.channel.as_deref(), Some("topic-9"));
        assert_eq!(received.name(), "topic-vote-update");
    }

    #[test]
    fn scoped_events_reach_only_their_channel() {
        let scoped = Notification::to_topic("1", vote("1"));
        assert!(scoped.reaches(Some("topic-1")));
        assert!(!scoped.reaches(Some("topic-2")));
        assert!(!scoped.reaches(None));
        assert!(Notification::broadcast(vote("1")).reaches(Some("topic-2")));
    }
}
