//! MessageStatus - Delivery lifecycle of a message

use serde::{Deserialize, Serialize};

/// Delivery status of a message
///
/// `pending` is the initial state. The dispatch layer moves a message to
/// `sent` or `failed`; a failed message may be retried. `sent` is final and
/// nothing moves back to `pending`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Pending,
    Sent,
    Failed,
}

impl MessageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageStatus::Pending => "pending",
            MessageStatus::Sent => "sent",
            MessageStatus::Failed => "failed",
        }
    }

    pub fn can_transition_to(&self, next: MessageStatus) -> bool {
        Self::sources_for(next).contains(self)
    }

    /// States from which `next` is reachable
    pub fn sources_for(next: MessageStatus) -> &'static [MessageStatus] {
        match next {
            MessageStatus::Pending => &[],
            MessageStatus::Sent | MessageStatus::Failed => {
                &[MessageStatus::Pending, MessageStatus::Failed]
            }
        }
    }
}

impl std::fmt::Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MessageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(MessageStatus::Pending),
            "sent" => Ok(MessageStatus::Sent),
            "failed" => Ok(MessageStatus::Failed),
            _ => Err(format!("Unknown message status: {}", s)),
        }
    }
}
