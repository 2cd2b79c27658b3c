use std::io::Write;

use anyhow::Result;
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::state::Notification;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationPermission {
    #[default]
    Default,
    Granted,
    Denied,
}

/// Desktop notification sink. Permission is asked for at most once, when the timer is first
/// started, and notifications are only raised once it was granted.
#[cfg_attr(test, automock)]
pub trait Notifier: Send {
    fn permission(&self) -> NotificationPermission;

    fn request_permission(&mut self) -> NotificationPermission;

    fn notify(&self, notification: &Notification) -> Result<()>;
}

/// Rings the terminal bell and prints to stderr. A terminal can always show the message, so a
/// pending request is granted right away.
pub struct TerminalNotifier {
    permission: NotificationPermission,
}

impl TerminalNotifier {
    pub fn new(permission: NotificationPermission) -> Self {
        Self { permission }
    }
}

impl Notifier for TerminalNotifier {
    fn permission(&self) -> NotificationPermission {
        self.permission
    }

    fn request_permission(&mut self) -> NotificationPermission {
        if self.permission == NotificationPermission::Default {
            info!("Granting terminal notifications");
            self.permission = NotificationPermission::Granted;
        }
        self.permission
    }

    fn notify(&self, notification: &Notification) -> Result<()> {
        let mut stderr = std::io::stderr().lock();
        writeln!(stderr, "\x07{} {}", notification.title, notification.body)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{NotificationPermission, Notifier, TerminalNotifier};

    #[test]
    fn terminal_grants_pending_requests_only() {
        let mut pending = TerminalNotifier::new(NotificationPermission::Default);
        assert_eq!(pending.request_permission(), NotificationPermission::Granted);

        let mut denied = TerminalNotifier::new(NotificationPermission::Denied);
        assert_eq!(denied.request_permission(), NotificationPermission::Denied);
        assert_eq!(denied.permission(), NotificationPermission::Denied);
    }
}
