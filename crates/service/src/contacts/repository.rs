use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use super::domain::{Contact, ContactFields, ContactId};
use crate::errors::ServiceError;

/// Persistence primitives for contacts.
///
/// Implementations enforce mobile uniqueness themselves: `insert` and
/// `update_by_id` fail with `ServiceError::Conflict` when another record
/// already holds the mobile, even under concurrent writers.
#[async_trait]
pub trait ContactStore: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Contact>, ServiceError>;
    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ServiceError>;
    async fn find_by_mobile(&self, mobile: &str) -> Result<Option<Contact>, ServiceError>;
    async fn insert(&self, fields: ContactFields) -> Result<Contact, ServiceError>;
    /// Replace every field; `Ok(None)` when the id is unknown.
    async fn update_by_id(&self, id: ContactId, fields: ContactFields) -> Result<Option<Contact>, ServiceError>;
    /// Remove and return the last snapshot; `Ok(None)` when the id is unknown.
    async fn delete_by_id(&self, id: ContactId) -> Result<Option<Contact>, ServiceError>;
}

/// SeaORM-backed store. Uniqueness comes from the `uniq_contact_mobile` index.
pub struct SeaOrmContactStore {
    pub db: DatabaseConnection,
}

impl SeaOrmContactStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ContactStore for SeaOrmContactStore {
    async fn find_all(&self) -> Result<Vec<Contact>, ServiceError> {
        let rows = models::contact::list(&self.db).await?;
        Ok(rows.into_iter().map(Contact::from).collect())
    }

    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ServiceError> {
        Ok(models::contact::find(&self.db, id.as_uuid()).await?.map(Contact::from))
    }

    async fn find_by_mobile(&self, mobile: &str) -> Result<Option<Contact>, ServiceError> {
        Ok(models::contact::find_by_mobile(&self.db, mobile).await?.map(Contact::from))
    }

    async fn insert(&self, fields: ContactFields) -> Result<Contact, ServiceError> {
        Ok(models::contact::create(&self.db, fields.into()).await?.into())
    }

    async fn update_by_id(&self, id: ContactId, fields: ContactFields) -> Result<Option<Contact>, ServiceError> {
        Ok(models::contact::replace(&self.db, id.as_uuid(), fields.into()).await?.map(Contact::from))
    }

    async fn delete_by_id(&self, id: ContactId) -> Result<Option<Contact>, ServiceError> {
        Ok(models::contact::delete(&self.db, id.as_uuid()).await?.map(Contact::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn seaorm_store_roundtrip() -> Result<(), anyhow::Error> {
        let Some(db) = get_db().await? else { return Ok(()) };
        let store = SeaOrmContactStore::new(db);

        let mobile = format!("svc-{}", ContactId::new());
        let fields = ContactFields { name: "Store".into(), mobile: mobile.clone(), ..Default::default() };
        let created = store.insert(fields.clone()).await?;
        assert_eq!(store.find_by_id(created.id).await?, Some(created.clone()));
        assert_eq!(store.find_by_mobile(&mobile).await?.map(|c| c.id), Some(created.id));

        let dup = store.insert(fields).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));

        assert_eq!(store.delete_by_id(created.id).await?, Some(created.clone()));
        assert_eq!(store.find_by_id(created.id).await?, None);
        Ok(())
    }
}
