use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, Document};
use mongodb::error::Result;
use mongodb::results::{DeleteResult, InsertOneResult};
use mongodb::{Collection, Database};

/// Typed handle over the `favorites` collection.
///
/// A favorite soft-references an artwork by its id string; nothing here
/// enforces that the artwork still exists.
#[derive(Clone)]
pub struct FavoriteStore {
    collection: Collection<Document>,
}

impl FavoriteStore {
    pub fn new(db: &Database, name: &str) -> Self {
        Self {
            collection: db.collection(name),
        }
    }

    pub async fn list(&self) -> Result<Vec<Document>> {
        self.collection
            .find(doc! {}, None)
            .await?
            .try_collect()
            .await
    }

    /// Existence check backing the dedup-on-create behavior. Check and
    /// insert are two round trips, so concurrent identical requests can
    /// still both insert.
    pub async fn find_by_artwork(&self, artwork_id: &str) -> Result<Option<Document>> {
        self.collection
            .find_one(doc! { "artworkId": artwork_id }, None)
            .await
    }

    pub async fn insert(&self, favorite: Document) -> Result<InsertOneResult> {
        self.collection.insert_one(favorite, None).await
    }

    pub async fn delete_by_artwork(&self, artwork_id: &str) -> Result<DeleteResult> {
        self.collection
            .delete_one(doc! { "artworkId": artwork_id }, None)
            .await
    }

    pub async fn delete_by_id(&self, id: ObjectId) -> Result<DeleteResult> {
        self.collection.delete_one(doc! { "_id": id }, None).await
    }

    pub async fn count(&self) -> Result<u64> {
        self.collection.count_documents(doc! {}, None).await
    }
}
