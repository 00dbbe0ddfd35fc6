//! Transient success/error banners shown above a form.
use crate::ui::lock;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

impl BannerKind {
    /// CSS class the adapter puts on the rendered node.
    pub fn css_class(&self) -> &'static str {
        match self {
            BannerKind::Success => "success-notification",
            BannerKind::Error => "error-notification",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub id: Uuid,
    pub kind: BannerKind,
    pub message: String,
}

/// The element banners are inserted into, newest first.
#[derive(Clone, Debug, Default)]
pub struct BannerContainer {
    banners: Arc<Mutex<Vec<Banner>>>,
}

impl BannerContainer {
    fn insert_first(&self, banner: Banner) {
        lock(&self.banners).insert(0, banner);
    }

    /// Returns `false` if the banner was already gone.
    pub fn remove(&self, id: Uuid) -> bool {
        let mut banners = lock(&self.banners);
        let before = banners.len();
        banners.retain(|b| b.id != id);
        banners.len() != before
    }

    pub fn banners(&self) -> Vec<Banner> {
        lock(&self.banners).clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.banners).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct BannerHandle {
    id: Uuid,
    dismissal: JoinHandle<()>,
}

impl BannerHandle {
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Resolves once the banner has been taken down.
    pub async fn dismissed(self) {
        if let Err(e) = self.dismissal.await {
            tracing::warn!(
                banner_id = %self.id,
                error.message = %e,
                "Banner dismissal task failed"
            );
        }
    }
}

#[derive(Clone, Debug)]
pub struct NotificationPresenter {
    display_for: Duration,
}

impl NotificationPresenter {
    pub fn new(display_for: Duration) -> Self {
        Self { display_for }
    }

    /// Inserts a banner at the top of `container` and schedules its removal.
    ///
    /// Every call gets its own banner and its own timer; nothing is merged or
    /// queued. Must be called from within a tokio runtime.
    pub fn show(
        &self,
        kind: BannerKind,
        message: impl Into<String>,
        container: &BannerContainer,
    ) -> BannerHandle {
        let banner = Banner {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
        };
        let id = banner.id;
        tracing::debug!(
            banner_id = %id,
            kind = kind.css_class(),
            message = %banner.message,
            "Showing banner"
        );
        container.insert_first(banner);

        let container = container.clone();
        let display_for = self.display_for;
        let dismissal = tokio::spawn(async move {
            tokio::time::sleep(display_for).await;
            container.remove(id);
        });
        BannerHandle { id, dismissal }
    }
}

impl Default for NotificationPresenter {
    fn default() -> Self {
        Self::new(Duration::from_millis(5000))
    }
}
