//! Lazily established, process-wide connection handle.
use std::future::Future;

use tokio::sync::OnceCell;

use crate::error::AppResult;

/// Holds a handle that is created on first use and reused afterwards.
///
/// Concurrent first callers wait on the same attempt. A failed attempt leaves
/// the cell empty so the next caller tries again.
pub struct LazyConnection<T> {
    cell: OnceCell<T>,
}

impl<T> LazyConnection<T> {
    pub fn new() -> Self {
        Self { cell: OnceCell::new() }
    }

    pub fn is_connected(&self) -> bool {
        self.cell.initialized()
    }

    pub fn get(&self) -> Option<&T> {
        self.cell.get()
    }

    pub async fn get_or_connect<F, Fut>(&self, connect: F) -> AppResult<&T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        self.cell.get_or_try_init(connect).await
    }
}

impl<T> Default for LazyConnection<T> {
    fn default() -> Self {
        Self::new()
    }
}
