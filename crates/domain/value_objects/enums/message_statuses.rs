use std::fmt::Display;

use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};

/// Inbox workflow is unread -> read -> replied, but any status may be set
/// directly; transitions are not guarded.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    #[default]
    Unread,
    Read,
    Replied,
}

impl Display for MessageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = match self {
            MessageStatus::Unread => "unread",
            MessageStatus::Read => "read",
            MessageStatus::Replied => "replied",
        };
        write!(f, "{}", status)
    }
}

impl MessageStatus {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "unread" => Ok(MessageStatus::Unread),
            "read" => Ok(MessageStatus::Read),
            "replied" => Ok(MessageStatus::Replied),
            other => bail!("Unknown message status: {}", other),
        }
    }
}
