//! MongoDB-backed image store.
//!
//! Records live in the `images` collection as
//! `{ _id, url, prompt, createdAt }`. The client is created on first use and
//! shared by every request afterwards.
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, oid::ObjectId, DateTime as BsonDateTime},
    options::{FindOptions, IndexOptions},
    Client as MongoClient, Collection, IndexModel,
};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{ImageRecord, NewImage};
use crate::store::{ImageStore, LazyConnection};

pub const IMAGES_COLLECTION: &str = "images";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ImageDocument {
    #[serde(rename = "_id")]
    id: ObjectId,
    url: String,
    prompt: String,
    // Older documents were written without a timestamp.
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    created_at: Option<BsonDateTime>,
}

impl ImageDocument {
    fn new(image: &NewImage) -> Self {
        Self {
            id: ObjectId::new(),
            url: image.url.clone(),
            prompt: image.prompt.clone(),
            created_at: Some(BsonDateTime::now()),
        }
    }

    fn into_record(self) -> ImageRecord {
        let created_at = self.created_at.unwrap_or_else(|| self.id.timestamp());
        ImageRecord {
            id: self.id.to_hex(),
            url: self.url,
            prompt: self.prompt,
            created_at: created_at.to_chrono(),
        }
    }
}

pub struct MongoImageStore {
    uri: Option<String>,
    database: String,
    connection: LazyConnection<Collection<ImageDocument>>,
}

impl MongoImageStore {
    pub fn new(uri: Option<String>, database: impl Into<String>) -> Self {
        Self { uri, database: database.into(), connection: LazyConnection::new() }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.mongodb_uri.clone(), config.mongodb_database.clone())
    }

    pub fn is_connected(&self) -> bool {
        self.connection.is_connected()
    }

    async fn collection(&self) -> AppResult<&Collection<ImageDocument>> {
        self.connection.get_or_connect(|| self.connect()).await
    }

    async fn connect(&self) -> AppResult<Collection<ImageDocument>> {
        let uri = self
            .uri
            .as_deref()
            .ok_or_else(|| AppError::Config("MONGODB_URI is not set".to_string()))?;

        tracing::info!("Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to create MongoDB client: {}", e);
            AppError::from(e)
        })?;
        let db = client.default_database().unwrap_or_else(|| client.database(&self.database));

        db.run_command(doc! { "ping": 1 }, None).await.map_err(|e| {
            tracing::error!("MongoDB ping failed: {}", e);
            AppError::from(e)
        })?;

        let collection = db.collection::<ImageDocument>(IMAGES_COLLECTION);
        let created_at_index = IndexModel::builder()
            .keys(doc! { "createdAt": -1 })
            .options(
                IndexOptions::builder()
                    .name("created_at_desc".to_string())
                    .build(),
            )
            .build();
        collection.create_index(created_at_index, None).await.map_err(|e| {
            tracing::error!("Failed to create createdAt index: {}", e);
            AppError::from(e)
        })?;

        tracing::info!(database = %db.name(), "Connected to MongoDB");
        Ok(collection)
    }
}

#[async_trait]
impl ImageStore for MongoImageStore {
    async fn ensure_connected(&self) -> AppResult<()> {
        self.collection().await.map(|_| ())
    }

    async fn create(&self, image: &NewImage) -> AppResult<ImageRecord> {
        if !image.is_complete() {
            return Err(AppError::Validation(
                "image records need a non-empty url and prompt".to_string(),
            ));
        }
        let collection = self.collection().await?;
        let document = ImageDocument::new(image);
        collection.insert_one(&document, None).await.map_err(|e| {
            tracing::error!("Failed to insert image record: {}", e);
            AppError::from(e)
        })?;
        tracing::debug!(id = %document.id, "Stored image record");
        Ok(document.into_record())
    }

    async fn list_all(&self) -> AppResult<Vec<ImageRecord>> {
        let collection = self.collection().await?;
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1, "_id": -1 })
            .build();
        let cursor = collection.find(None, options).await?;
        let documents: Vec<ImageDocument> = cursor.try_collect().await?;
        Ok(documents.into_iter().map(ImageDocument::into_record).collect())
    }
}
