//! Tab/query filtering and client-style pagination of the notification list.

use serde::{Deserialize, Serialize};

use crate::domain::notification::{Notification, Tab};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationPage {
    pub visible: Vec<Notification>,
    pub has_more: bool,
    /// Size of the filtered list before pagination.
    pub total: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TabCounts {
    pub all: usize,
    pub unread: usize,
    pub read: usize,
    pub favorite: usize,
    pub archive: usize,
}

impl TabCounts {
    pub fn get(&self, tab: Tab) -> usize {
        match tab {
            Tab::All => self.all,
            Tab::Unread => self.unread,
            Tab::Read => self.read,
            Tab::Favorite => self.favorite,
            Tab::Archive => self.archive,
        }
    }

    fn slot(&mut self, tab: Tab) -> &mut usize {
        match tab {
            Tab::All => &mut self.all,
            Tab::Unread => &mut self.unread,
            Tab::Read => &mut self.read,
            Tab::Favorite => &mut self.favorite,
            Tab::Archive => &mut self.archive,
        }
    }
}

pub fn matches_query(notification: &Notification, query: &str) -> bool {
    query.is_empty()
        || notification
            .subject
            .to_lowercase()
            .contains(&query.to_lowercase())
}

pub fn filter<'a>(records: &'a [Notification], tab: Tab, query: &str) -> Vec<&'a Notification> {
    records
        .iter()
        .filter(|n| tab.matches(n))
        .filter(|n| matches_query(n, query))
        .collect()
}

/// Cumulative pagination: page `n` shows the first `n * page_size` matches.
pub fn apply(
    records: &[Notification],
    tab: Tab,
    query: &str,
    page: usize,
    page_size: usize,
) -> NotificationPage {
    let filtered = filter(records, tab, query);
    let limit = page.saturating_mul(page_size);

    let visible: Vec<Notification> = filtered.iter().take(limit).map(|n| (*n).clone()).collect();
    let has_more = filtered.len() > visible.len();

    NotificationPage {
        visible,
        has_more,
        total: filtered.len(),
    }
}

pub fn counts(records: &[Notification]) -> TabCounts {
    records.iter().fold(TabCounts::default(), |mut acc, n| {
        for tab in Tab::ALL {
            if tab.matches(n) {
                *acc.slot(tab) += 1;
            }
        }
        acc
    })
}

/// Pagination state of one notification list view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationListState {
    #[serde(default)]
    pub tab: Tab,
    #[serde(default)]
    pub query: String,
    #[serde(default = "first_page")]
    pub page: usize,
}

fn first_page() -> usize {
    1
}

impl Default for NotificationListState {
    fn default() -> Self {
        Self {
            tab: Tab::All,
            query: String::new(),
            page: first_page(),
        }
    }
}

impl NotificationListState {
    pub fn new(tab: Tab, query: impl Into<String>) -> Self {
        Self {
            tab,
            query: query.into(),
            page: first_page(),
        }
    }

    pub fn set_tab(&mut self, tab: Tab) {
        if self.tab != tab {
            self.tab = tab;
            self.page = first_page();
        }
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        if self.query != query {
            self.query = query;
            self.page = first_page();
        }
    }

    /// Advances one page when the last rendered page reported more results.
    pub fn load_more(&mut self, current: &NotificationPage) -> bool {
        if current.has_more {
            self.page += 1;
        }
        current.has_more
    }

    pub fn apply(&self, records: &[Notification], page_size: usize) -> NotificationPage {
        apply(records, self.tab, &self.query, self.page.max(first_page()), page_size)
    }
}
