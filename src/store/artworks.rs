use crate::query::ExplorePlan;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{doc, DateTime, Document};
use mongodb::error::Result;
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};
use mongodb::results::{DeleteResult, InsertOneResult, UpdateResult};
use mongodb::{Collection, Database};

/// How many items the recent-artworks listing returns.
pub const RECENT_LIMIT: i64 = 6;

/// Typed handle over the `artwork` collection.
#[derive(Clone)]
pub struct ArtworkStore {
    collection: Collection<Document>,
}

impl ArtworkStore {
    pub fn new(db: &Database, name: &str) -> Self {
        Self {
            collection: db.collection(name),
        }
    }

    /// All artworks, optionally narrowed to one owner's email.
    pub async fn list(&self, email: Option<&str>) -> Result<Vec<Document>> {
        let filter = match email {
            Some(email) => doc! { "userEmail": email },
            None => doc! {},
        };
        self.collection.find(filter, None).await?.try_collect().await
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Document>> {
        self.collection.find_one(doc! { "_id": id }, None).await
    }

    /// Latest public artworks, newest first.
    pub async fn recent(&self) -> Result<Vec<Document>> {
        let options = FindOptions::builder()
            .sort(doc! { "createdAt": -1 })
            .limit(RECENT_LIMIT)
            .build();
        self.collection
            .find(doc! { "visibility": "Public" }, options)
            .await?
            .try_collect()
            .await
    }

    /// Run an explore plan: one count round trip for the page total,
    /// one find for the page itself.
    pub async fn explore(&self, plan: &ExplorePlan) -> Result<(Vec<Document>, u64)> {
        let total = self
            .collection
            .count_documents(plan.filter.clone(), None)
            .await?;

        let options = FindOptions::builder()
            .sort(plan.sort.clone())
            .skip(plan.skip)
            .limit(plan.limit)
            .build();
        let artworks = self
            .collection
            .find(plan.filter.clone(), options)
            .await?
            .try_collect()
            .await?;

        Ok((artworks, total))
    }

    pub async fn insert(&self, artwork: Document) -> Result<InsertOneResult> {
        self.collection.insert_one(artwork, None).await
    }

    /// Write a fully merged document back over the stored one.
    pub async fn replace(&self, id: ObjectId, artwork: Document) -> Result<UpdateResult> {
        self.collection
            .replace_one(doc! { "_id": id }, artwork, None)
            .await
    }

    /// Flip the like flag and move the counter in the same direction,
    /// returning the post-update document.
    pub async fn set_like(&self, id: ObjectId, currently_liked: bool) -> Result<Option<Document>> {
        let update = doc! {
            "$set": { "liked": !currently_liked },
            "$inc": { "likes": like_delta(currently_liked) },
        };
        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        self.collection
            .find_one_and_update(doc! { "_id": id }, update, options)
            .await
    }

    pub async fn delete(&self, id: ObjectId) -> Result<DeleteResult> {
        self.collection.delete_one(doc! { "_id": id }, None).await
    }

    pub async fn count(&self) -> Result<u64> {
        self.collection.count_documents(doc! {}, None).await
    }
}

/// Counter movement for a toggle: +1 when the flag goes up, -1 when it
/// comes back down.
pub fn like_delta(currently_liked: bool) -> i64 {
    if currently_liked {
        -1
    } else {
        1
    }
}

/// Shallow-merge patch fields over an existing document and stamp a fresh
/// `updatedAt`. The store-assigned `_id` is never overwritten.
pub fn merge_patch(existing: &Document, patch: Document) -> Document {
    let mut merged = existing.clone();
    for (key, value) in patch {
        if key == "_id" {
            continue;
        }
        merged.insert(key, value);
    }
    merged.insert("updatedAt", DateTime::now());
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::Bson;

    #[test]
    fn merge_overwrites_only_supplied_fields() {
        let existing = doc! {
            "title": "Dusk",
            "category": "Painting",
            "price": 120,
            "userEmail": "a@b.c",
        };
        let merged = merge_patch(&existing, doc! { "price": 90, "title": "Dusk II" });

        assert_eq!(merged.get_str("title").unwrap(), "Dusk II");
        assert_eq!(merged.get_i32("price").unwrap(), 90);
        assert_eq!(merged.get_str("category").unwrap(), "Painting");
        assert_eq!(merged.get_str("userEmail").unwrap(), "a@b.c");
    }

    #[test]
    fn merge_always_stamps_updated_at() {
        let merged = merge_patch(&doc! { "title": "Dusk" }, doc! {});
        assert!(matches!(merged.get("updatedAt"), Some(Bson::DateTime(_))));
    }

    #[test]
    fn merge_never_replaces_the_id() {
        let id = ObjectId::new();
        let existing = doc! { "_id": id, "title": "Dusk" };
        let merged = merge_patch(&existing, doc! { "_id": "spoofed", "title": "x" });
        assert_eq!(merged.get_object_id("_id").unwrap(), id);
    }

    #[test]
    fn like_delta_is_self_inverse() {
        let likes = 10_i64;
        let after_like = likes + like_delta(false);
        let after_unlike = after_like + like_delta(true);
        assert_eq!(after_like, 11);
        assert_eq!(after_unlike, likes);
    }
}
