use bson::oid::ObjectId;
use bson::{doc, Bson, Document};
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use crate::models::{Event, EventDocument, EventPatch, NewEvent};
use crate::utils::error::AppError;

const EVENTS_COLLECTION: &str = "events";

/// Storage operations for event records. The only component that talks
/// to MongoDB; everything else goes through it.
#[derive(Clone)]
pub struct EventRepository {
    collection: Collection<EventDocument>,
}

impl EventRepository {
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection(EVENTS_COLLECTION),
        }
    }

    /// Inserts a validated event, stamping creation and update times.
    pub async fn create(&self, new_event: NewEvent) -> Result<Event, AppError> {
        let now = Utc::now();
        let mut document = EventDocument {
            id: None,
            title: new_event.title,
            description: new_event.description,
            date: new_event.date,
            location: new_event.location,
            category: new_event.category,
            attendees: new_event.attendees,
            created_at: now,
            updated_at: now,
        };

        let result = self.collection.insert_one(&document).await?;
        document.id = result.inserted_id.as_object_id();

        Ok(Event::from(document))
    }

    /// Returns every stored event in storage order.
    pub async fn list_all(&self) -> Result<Vec<Event>, AppError> {
        let cursor = self.collection.find(doc! {}).await?;
        let documents: Vec<EventDocument> = cursor.try_collect().await?;

        Ok(documents.into_iter().map(Event::from).collect())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Event, AppError> {
        let object_id = parse_object_id(id)?;
        let document = self
            .collection
            .find_one(doc! { "_id": object_id })
            .await?
            .ok_or_else(|| not_found(id))?;

        Ok(Event::from(document))
    }

    /// Applies the patch on top of the stored record and refreshes
    /// `updatedAt`, as a single findOneAndUpdate so a missing id never
    /// leaves a partial write behind.
    pub async fn update(&self, id: &str, patch: EventPatch) -> Result<Event, AppError> {
        let object_id = parse_object_id(id)?;

        let mut set = Document::new();
        if let Some(title) = patch.title {
            set.insert("title", title);
        }
        if let Some(description) = patch.description {
            set.insert("description", description);
        }
        if let Some(date) = patch.date {
            set.insert("date", Bson::DateTime(date.into()));
        }
        if let Some(location) = patch.location {
            set.insert("location", location);
        }
        if let Some(category) = patch.category {
            set.insert("category", category.as_str());
        }
        if let Some(attendees) = patch.attendees {
            set.insert("attendees", attendees);
        }
        set.insert("updatedAt", Bson::DateTime(Utc::now().into()));

        let document = self
            .collection
            .find_one_and_update(doc! { "_id": object_id }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| not_found(id))?;

        Ok(Event::from(document))
    }

    /// Removes the record and hands back what was deleted. A second
    /// delete of the same id reports `NotFound`.
    pub async fn delete(&self, id: &str) -> Result<Event, AppError> {
        let object_id = parse_object_id(id)?;
        let document = self
            .collection
            .find_one_and_delete(doc! { "_id": object_id })
            .await?
            .ok_or_else(|| not_found(id))?;

        Ok(Event::from(document))
    }
}

fn parse_object_id(id: &str) -> Result<ObjectId, AppError> {
    ObjectId::parse_str(id)
        .map_err(|_| AppError::InvalidId(format!("'{}' is not a valid event id", id)))
}

fn not_found(id: &str) -> AppError {
    AppError::NotFound(format!("Event with id '{}' was not found", id))
}
