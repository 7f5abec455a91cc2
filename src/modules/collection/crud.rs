use async_trait::async_trait;
use bson::{doc, Document};
use futures::TryStreamExt;
use mongodb::Database;

/// The collection-level operations the pruner needs from a database.
#[async_trait]
pub trait CollectionStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn database_name(&self) -> &str;

    /// Names of every collection, in the order the server returns them.
    async fn list_collection_names(&self) -> Result<Vec<String>, Self::Error>;

    async fn drop_collection(&self, name: &str) -> Result<(), Self::Error>;

    async fn create_collection(&self, name: &str) -> Result<(), Self::Error>;

    /// Fails when the current user cannot read from `name`.
    async fn check_access(&self, name: &str) -> Result<(), Self::Error>;
}

#[derive(Clone)]
pub struct MongoCollectionStore {
    db: Database,
}

impl MongoCollectionStore {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }
}

#[async_trait]
impl CollectionStore for MongoCollectionStore {
    type Error = mongodb::error::Error;

    fn database_name(&self) -> &str {
        self.db.name()
    }

    async fn list_collection_names(&self) -> Result<Vec<String>, Self::Error> {
        let cursor = self.db.list_collections().await?;
        let specs: Vec<_> = cursor.try_collect().await?;

        Ok(specs.into_iter().map(|spec| spec.name).collect())
    }

    async fn drop_collection(&self, name: &str) -> Result<(), Self::Error> {
        self.db.collection::<Document>(name).drop().await
    }

    async fn create_collection(&self, name: &str) -> Result<(), Self::Error> {
        self.db.create_collection(name).await
    }

    async fn check_access(&self, name: &str) -> Result<(), Self::Error> {
        self.db
            .collection::<Document>(name)
            .find_one(doc! {})
            .await
            .map(|_| ())
    }
}
