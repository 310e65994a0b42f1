use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub subject: String,
    pub message: String,
    pub time: String,
    pub read: bool,
    pub archived: bool,
    pub favorite: bool,
}

impl Notification {
    pub fn new(
        id: impl Into<String>,
        kind: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
        time: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            subject: subject.into(),
            message: message.into(),
            time: time.into(),
            read: false,
            archived: false,
            favorite: false,
        }
    }

    pub fn toggle(&mut self, flag: NotificationFlag) {
        match flag {
            NotificationFlag::Read => self.read = !self.read,
            NotificationFlag::Favorite => self.favorite = !self.favorite,
            NotificationFlag::Archived => self.archived = !self.archived,
        }
    }
}

/// User-toggleable state of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationFlag {
    Read,
    Favorite,
    Archived,
}

impl NotificationFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationFlag::Read => "read",
            NotificationFlag::Favorite => "favorite",
            NotificationFlag::Archived => "archived",
        }
    }
}

/// Named predicate bucket used by the notification list tabs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tab {
    #[default]
    All,
    Unread,
    Read,
    Favorite,
    Archive,
}

impl Tab {
    pub const ALL: [Tab; 5] = [Tab::All, Tab::Unread, Tab::Read, Tab::Favorite, Tab::Archive];

    pub fn matches(&self, notification: &Notification) -> bool {
        match self {
            Tab::All => true,
            Tab::Unread => !notification.read,
            Tab::Read => notification.read,
            Tab::Favorite => notification.favorite,
            Tab::Archive => notification.archived,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tab::All => "all",
            Tab::Unread => "unread",
            Tab::Read => "read",
            Tab::Favorite => "favorite",
            Tab::Archive => "archive",
        }
    }
}

impl fmt::Display for Tab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tab {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tab::ALL
            .into_iter()
            .find(|tab| tab.as_str() == s.trim())
            .ok_or_else(|| format!("unknown tab: {}", s))
    }
}
