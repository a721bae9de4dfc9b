use std::collections::VecDeque;

use chrono::{DateTime, Local};

use crate::error::Rejection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Destructive,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub at: DateTime<Local>,
}

impl Toast {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
            at: Local::now(),
        }
    }

    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Destructive,
            at: Local::now(),
        }
    }
}

impl From<Rejection> for Toast {
    fn from(rejection: Rejection) -> Self {
        Toast::destructive(rejection.title(), rejection.to_string())
    }
}

/// Most recent toasts first; older ones drop off past `limit`.
#[derive(Debug, Clone)]
pub struct Toasts {
    items: VecDeque<Toast>,
    limit: usize,
}

impl Default for Toasts {
    fn default() -> Self {
        Self::with_limit(DEFAULT_TOAST_LIMIT)
    }
}

pub const DEFAULT_TOAST_LIMIT: usize = 5;

impl Toasts {
    pub fn with_limit(limit: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(limit),
            limit: limit.max(1),
        }
    }

    pub fn push(&mut self, toast: Toast) {
        self.items.push_front(toast);
        while self.items.len() > self.limit {
            self.items.pop_back();
        }
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.items.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Toast> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn dismiss(&mut self) -> Option<Toast> {
        self.items.pop_front()
    }
}

pub fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "[INFO]",
        Severity::Destructive => "[WARN]",
    }
}
