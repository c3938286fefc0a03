//! Persistence for generated images.
pub mod connection;
pub mod mongo;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{ImageRecord, NewImage};

pub use connection::LazyConnection;
pub use mongo::MongoImageStore;

#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Establish the backing connection if it is not up yet. Idempotent.
    async fn ensure_connected(&self) -> AppResult<()>;

    /// Insert one record; the store assigns its id and creation time.
    async fn create(&self, image: &NewImage) -> AppResult<ImageRecord>;

    /// Every stored record, most recent first.
    async fn list_all(&self) -> AppResult<Vec<ImageRecord>>;
}
