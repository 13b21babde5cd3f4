//! User-facing success and failure notices.

use async_trait::async_trait;
use std::sync::Mutex;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Variant {
    Default,
    Destructive,
}

/// A transient notification ("toast")
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub variant: Variant,
    pub title: String,
    pub description: Option<String>,
}

impl Notice {
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            variant: Variant::Default,
            title: title.into(),
            description: None,
        }
    }

    pub fn failure(title: impl Into<String>) -> Self {
        Self {
            variant: Variant::Destructive,
            title: title.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == Variant::Destructive
    }
}

/// Where notices go
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notice: Notice);
}

/// Writes notices to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notice: Notice) {
        let description = notice.description.as_deref().unwrap_or("");
        if notice.is_destructive() {
            warn!("❌ {} {}", notice.title, description);
        } else {
            info!("✅ {} {}", notice.title, description);
        }
    }
}

/// Keeps notices in memory for later display
#[derive(Debug, Default)]
pub struct CollectingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl CollectingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything collected so far
    pub fn drain(&self) -> Vec<Notice> {
        match self.notices.lock() {
            Ok(mut guard) => std::mem::take(&mut *guard),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

#[async_trait]
impl Notifier for CollectingNotifier {
    async fn notify(&self, notice: Notice) {
        match self.notices.lock() {
            Ok(mut guard) => guard.push(notice),
            Err(poisoned) => poisoned.into_inner().push(notice),
        }
    }
}
