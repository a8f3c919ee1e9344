//! WebhookDeletePolicy - What happens to messages when their webhook goes

/// Behaviour of `messages.webhook_id` when the referenced webhook is deleted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WebhookDeletePolicy {
    /// Refuse the delete while messages still reference the webhook
    Restrict,
    /// Delete the referencing messages together with the webhook
    Cascade,
    /// Keep the messages and clear their `webhook_id`
    #[default]
    SetNull,
}

impl std::fmt::Display for WebhookDeletePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WebhookDeletePolicy::Restrict => write!(f, "restrict"),
            WebhookDeletePolicy::Cascade => write!(f, "cascade"),
            WebhookDeletePolicy::SetNull => write!(f, "set_null"),
        }
    }
}

impl std::str::FromStr for WebhookDeletePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "restrict" => Ok(WebhookDeletePolicy::Restrict),
            "cascade" => Ok(WebhookDeletePolicy::Cascade),
            "set_null" => Ok(WebhookDeletePolicy::SetNull),
            _ => Err(format!("Unknown webhook delete policy: {}", s)),
        }
    }
}
