//! In-memory comic service.

use crate::error::ServiceError;
use crate::models::{LibraryUpdate, PageType};
use crate::services::{ComicService, ServiceFuture};
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

/// A call received by [`InMemoryComicService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComicCall {
    /// `get_page_types`
    GetPageTypes,
    /// `set_page_type`
    SetPageType {
        /// Page being classified
        page_id: u64,
        /// Requested type
        page_type: PageType,
    },
    /// `mark_page_as_deleted`
    MarkPageAsDeleted(u64),
    /// `mark_page_as_undeleted`
    MarkPageAsUndeleted(u64),
    /// `get_library_updates`
    GetLibraryUpdates {
        /// Lower bound sent by the caller
        since: DateTime<Utc>,
        /// Timeout sent by the caller
        timeout: Duration,
    },
    /// `remove_comic`
    RemoveComic(u64),
    /// `rescan_library`
    RescanLibrary {
        /// Newest comic date sent by the caller
        last_comic_date: DateTime<Utc>,
        /// Timeout sent by the caller
        timeout: Duration,
    },
}

#[derive(Debug, Default)]
struct Inner {
    page_types: Vec<PageType>,
    library_update: LibraryUpdate,
    rescan_count: u32,
    failing: HashSet<&'static str>,
    calls: Vec<ComicCall>,
}

/// Comic service answering from memory.
///
/// Operations named with [`fail`](Self::fail) answer with
/// `ServiceError::Rejected { status: 500, .. }`.
#[derive(Debug, Clone, Default)]
pub struct InMemoryComicService {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryComicService {
    /// Create an empty service.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Page types returned by `get_page_types`.
    #[must_use]
    pub fn with_page_types(self, page_types: Vec<PageType>) -> Self {
        self.inner.lock().page_types = page_types;
        self
    }

    /// Update returned by every `get_library_updates` call.
    #[must_use]
    pub fn with_library_update(self, update: LibraryUpdate) -> Self {
        self.inner.lock().library_update = update;
        self
    }

    /// Count returned by `rescan_library`.
    #[must_use]
    pub fn with_rescan_count(self, rescan_count: u32) -> Self {
        self.inner.lock().rescan_count = rescan_count;
        self
    }

    /// Make `operation` fail from now on.
    pub fn fail(&self, operation: &'static str) {
        self.inner.lock().failing.insert(operation);
    }

    /// Calls received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<ComicCall> {
        self.inner.lock().calls.clone()
    }

    fn record(&self, operation: &'static str, call: ComicCall) -> Result<(), ServiceError> {
        let mut inner = self.inner.lock();
        inner.calls.push(call);
        if inner.failing.contains(operation) {
            return Err(ServiceError::Rejected {
                status: 500,
                message: format!("{operation} failed"),
            });
        }
        Ok(())
    }
}

impl ComicService for InMemoryComicService {
    fn get_page_types(&self) -> ServiceFuture<'_, Vec<PageType>> {
        Box::pin(async move {
            self.record("get_page_types", ComicCall::GetPageTypes)?;
            Ok(self.inner.lock().page_types.clone())
        })
    }

    fn set_page_type(&self, page_id: u64, page_type: PageType) -> ServiceFuture<'_, ()> {
        Box::pin(async move { self.record("set_page_type", ComicCall::SetPageType { page_id, page_type }) })
    }

    fn mark_page_as_deleted(&self, page_id: u64) -> ServiceFuture<'_, ()> {
        Box::pin(async move { self.record("mark_page_as_deleted", ComicCall::MarkPageAsDeleted(page_id)) })
    }

    fn mark_page_as_undeleted(&self, page_id: u64) -> ServiceFuture<'_, ()> {
        Box::pin(async move {
            self.record("mark_page_as_undeleted", ComicCall::MarkPageAsUndeleted(page_id))
        })
    }

    fn get_image_url_for_id(&self, page_id: u64) -> String {
        format!("/api/pages/{page_id}/content")
    }

    fn get_display_name_for_page_type(&self, page_type: &PageType) -> String {
        page_type
            .name
            .split('-')
            .map(|word| {
                let mut chars = word.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_uppercase().chain(chars).collect()
                })
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn get_library_updates(
        &self,
        since: DateTime<Utc>,
        timeout: Duration,
    ) -> ServiceFuture<'_, LibraryUpdate> {
        Box::pin(async move {
            self.record("get_library_updates", ComicCall::GetLibraryUpdates { since, timeout })?;
            Ok(self.inner.lock().library_update.clone())
        })
    }

    fn remove_comic(&self, comic_id: u64) -> ServiceFuture<'_, ()> {
        Box::pin(async move { self.record("remove_comic", ComicCall::RemoveComic(comic_id)) })
    }

    fn rescan_library(
        &self,
        last_comic_date: DateTime<Utc>,
        timeout: Duration,
    ) -> ServiceFuture<'_, u32> {
        Box::pin(async move {
            self.record(
                "rescan_library",
                ComicCall::RescanLibrary {
                    last_comic_date,
                    timeout,
                },
            )?;
            Ok(self.inner.lock().rescan_count)
        })
    }
}
