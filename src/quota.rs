// Per-session message quota for the assistant chat.
//
// The quota is a plain value: check it, and on success replace it with the
// value `record` returns. Nothing is stored behind the caller's back, so a
// session is whatever MessageQuota the caller is holding.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Messages allowed per session.
pub const MAX_MESSAGES_PER_SESSION: u32 = 50;
/// Minimum gap between two messages.
pub const MESSAGE_DELAY_MS: i64 = 1000;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageQuota {
    pub count: u32,
    pub last_sent: Option<DateTime<Utc>>,
}

/// Outcome of a quota check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDecision {
    Allowed,
    /// The session has used all of its messages
    SessionLimit { max: u32 },
    /// Sent too recently; retry after `wait_secs` (rounded up)
    TooSoon { wait_secs: i64 },
}

impl QuotaDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, QuotaDecision::Allowed)
    }

    /// User-facing reason for a refusal.
    pub fn reason(&self) -> Option<String> {
        match self {
            QuotaDecision::Allowed => None,
            QuotaDecision::SessionLimit { max } => Some(format!(
                "You've reached the session limit of {max} messages. Start a new session to continue."
            )),
            QuotaDecision::TooSoon { wait_secs } => Some(format!(
                "Please wait {wait_secs}s before sending another message."
            )),
        }
    }
}

impl MessageQuota {
    pub fn check(&self, now: DateTime<Utc>) -> QuotaDecision {
        if self.count >= MAX_MESSAGES_PER_SESSION {
            return QuotaDecision::SessionLimit {
                max: MAX_MESSAGES_PER_SESSION,
            };
        }

        if let Some(last) = self.last_sent {
            let elapsed = now - last;
            let delay = Duration::milliseconds(MESSAGE_DELAY_MS);
            if elapsed < delay {
                let remaining_ms = (delay - elapsed).num_milliseconds();
                return QuotaDecision::TooSoon {
                    wait_secs: (remaining_ms + 999) / 1000,
                };
            }
        }

        QuotaDecision::Allowed
    }

    /// The quota after sending a message at `now`.
    #[must_use]
    pub fn record(self, now: DateTime<Utc>) -> Self {
        Self {
            count: self.count.saturating_add(1),
            last_sent: Some(now),
        }
    }

    pub fn remaining(&self) -> u32 {
        MAX_MESSAGES_PER_SESSION.saturating_sub(self.count)
    }

    #[must_use]
    pub fn reset(self) -> Self {
        Self::default()
    }
}
