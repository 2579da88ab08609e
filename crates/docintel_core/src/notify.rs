use std::fmt;
use std::time::Duration;

/// Banners remove themselves after this delay unless dismissed first.
pub const AUTO_DISMISS_AFTER: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(u64);

impl NotificationId {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "alert-{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Info => "alert-info",
            Severity::Success => "alert-success",
            Severity::Warning => "alert-warning",
            Severity::Danger => "alert-danger",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub severity: Severity,
}

/// Dismissible banners, most recent first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NotificationCenter {
    next_id: u64,
    banners: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a banner ahead of all existing ones and returns its id.
    pub fn notify(&mut self, message: impl Into<String>, severity: Severity) -> NotificationId {
        self.next_id += 1;
        let id = NotificationId(self.next_id);
        self.banners.insert(
            0,
            Notification {
                id,
                message: message.into(),
                severity,
            },
        );
        id
    }

    /// Removes a banner. Returns `false` if it was already gone.
    pub fn dismiss(&mut self, id: NotificationId) -> bool {
        let before = self.banners.len();
        self.banners.retain(|banner| banner.id != id);
        self.banners.len() != before
    }

    pub fn banners(&self) -> &[Notification] {
        &self.banners
    }

    pub fn is_empty(&self) -> bool {
        self.banners.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newest_banner_is_first() {
        let mut center = NotificationCenter::new();
        let first = center.notify("one", Severity::Info);
        let second = center.notify("two", Severity::Danger);
        let ids: Vec<_> = center.banners().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![second, first]);
    }

    #[test]
    fn dismiss_is_idempotent() {
        let mut center = NotificationCenter::new();
        let id = center.notify("gone soon", Severity::Success);
        assert!(center.dismiss(id));
        assert!(!center.dismiss(id));
        assert!(center.is_empty());
    }
}
