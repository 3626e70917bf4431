/// Copy-path side action and the transient notifications it produces.
///
/// The clipboard itself is owned by the UI toolkit, so the engine only sees
/// it through [`ClipboardSink`]. Failures never propagate further than a
/// notification.
use crate::error::Result;
use crate::model::{FileTree, NodeIndex};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How long a notification stays visible.
pub const NOTIFICATION_TTL: Duration = Duration::from_secs(2);

/// Anything that can receive text for the system clipboard.
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
    pub created: Instant,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Success, message.into())
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(NotificationKind::Error, message.into())
    }

    fn new(kind: NotificationKind, message: String) -> Self {
        Self {
            kind,
            message,
            created: Instant::now(),
        }
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.created) >= NOTIFICATION_TTL
    }
}

/// Copy the absolute path of `node` and describe the outcome.
pub fn copy_node_path(sink: &mut dyn ClipboardSink, tree: &FileTree, node: NodeIndex) -> Notification {
    let path = &tree.node(node).path;
    match sink.set_text(path) {
        Ok(()) => {
            debug!("Copied {path} to clipboard");
            Notification::success(format!("Path copied: {path}"))
        }
        Err(e) => {
            warn!("Clipboard copy failed: {e}");
            Notification::error(format!("Could not copy path: {e}"))
        }
    }
}

/// Non-blocking notification queue; expired entries are dropped lazily.
#[derive(Debug, Default)]
pub struct Notifications {
    items: Vec<Notification>,
}

impl Notifications {
    pub fn push(&mut self, notification: Notification) {
        self.items.push(notification);
    }

    /// Drop expired notifications and return the ones still visible.
    pub fn active(&mut self, now: Instant) -> &[Notification] {
        self.items.retain(|n| !n.is_expired(now));
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::model::SnapshotNode;

    #[derive(Default)]
    struct RecordingSink {
        copied: Vec<String>,
        fail: bool,
    }

    impl ClipboardSink for RecordingSink {
        fn set_text(&mut self, text: &str) -> Result<()> {
            if self.fail {
                return Err(Error::Clipboard("no display".into()));
            }
            self.copied.push(text.to_string());
            Ok(())
        }
    }

    fn tree() -> FileTree {
        FileTree::from_snapshot(SnapshotNode::dir(
            "/r",
            vec![SnapshotNode::file("/r/a.txt", 1)],
        ))
    }

    #[test]
    fn test_copy_success() {
        let tree = tree();
        let mut sink = RecordingSink::default();
        let node = tree.find_by_path("/r/a.txt").unwrap();

        let n = copy_node_path(&mut sink, &tree, node);
        assert_eq!(n.kind, NotificationKind::Success);
        assert_eq!(sink.copied, vec!["/r/a.txt".to_string()]);
    }

    #[test]
    fn test_copy_failure_becomes_notification() {
        let tree = tree();
        let mut sink = RecordingSink {
            fail: true,
            ..Default::default()
        };

        let n = copy_node_path(&mut sink, &tree, tree.root);
        assert_eq!(n.kind, NotificationKind::Error);
        assert!(n.message.contains("no display"));
        assert!(sink.copied.is_empty());
    }

    #[test]
    fn test_notifications_expire() {
        let mut queue = Notifications::default();
        let n = Notification::success("done");
        let created = n.created;
        queue.push(n);

        assert_eq!(queue.active(created).len(), 1);
        assert_eq!(queue.active(created + Duration::from_millis(1999)).len(), 1);
        assert!(queue.active(created + NOTIFICATION_TTL).is_empty());
        assert!(queue.is_empty());
    }
}
