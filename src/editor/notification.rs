use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_NOTIFICATION_TTL_SECS: u64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Info => "info",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub severity: Severity,
    pub message: String,
    pub raised_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Notification {
    pub fn is_visible_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn css_class(&self) -> String {
        format!("status-message status-{}", self.severity.as_str())
    }
}

/// The status banner. A new notification replaces whatever is showing and
/// dismisses itself once its time-to-live has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    ttl: Duration,
    current: Option<Notification>,
}

impl Default for Banner {
    fn default() -> Self {
        Self::new(Duration::seconds(DEFAULT_NOTIFICATION_TTL_SECS as i64))
    }
}

impl Banner {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn show(&mut self, severity: Severity, message: impl Into<String>) -> &Notification {
        self.show_at(severity, message, Utc::now())
    }

    pub fn show_at(
        &mut self,
        severity: Severity,
        message: impl Into<String>,
        now: DateTime<Utc>,
    ) -> &Notification {
        self.current.insert(Notification {
            severity,
            message: message.into(),
            raised_at: now,
            expires_at: now + self.ttl,
        })
    }

    /// The last notification raised, expired or not.
    pub fn latest(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    pub fn visible_at(&self, now: DateTime<Utc>) -> Option<&Notification> {
        self.current
            .as_ref()
            .filter(|notification| notification.is_visible_at(now))
    }

    /// Drops an expired notification; returns whether anything was removed.
    pub fn dismiss_expired(&mut self, now: DateTime<Utc>) -> bool {
        if self
            .current
            .as_ref()
            .is_some_and(|notification| !notification.is_visible_at(now))
        {
            self.current = None;
            return true;
        }
        false
    }
}
