use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use super::domain::{Contact, ContactId, ContactInput};
use super::repository::ContactStore;
use super::{DELETE_NOT_FOUND, GET_NOT_FOUND, MOBILE_EXISTS, UPDATE_NOT_FOUND};
use crate::errors::ServiceError;

/// Application service encapsulating the contact business rules.
///
/// Each operation is a single best-effort attempt against the injected
/// store; nothing is retried. Identifiers arrive as raw path strings and are
/// parsed here so malformed ones surface as `ServiceError::InvalidId`.
pub struct ContactService<S: ?Sized> {
    store: Arc<S>,
}

impl<S: ContactStore + ?Sized> ContactService<S> {
    pub fn new(store: Arc<S>) -> Self { Self { store } }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<Contact>, ServiceError> {
        let all = self.store.find_all().await?;
        debug!(count = all.len(), "listed contacts");
        Ok(all)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: &str) -> Result<Contact, ServiceError> {
        let id: ContactId = id.parse()?;
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(GET_NOT_FOUND))
    }

    /// Validate, reject a taken mobile, then insert.
    #[instrument(skip_all)]
    pub async fn create(&self, input: ContactInput) -> Result<Contact, ServiceError> {
        let fields = input.validate()?;
        if let Some(existing) = self.store.find_by_mobile(&fields.mobile).await? {
            warn!(existing = %existing.id, "create rejected: mobile already in use");
            return Err(ServiceError::Conflict(MOBILE_EXISTS.into()));
        }
        // the store re-checks under its own constraint; a racing create lands here as Conflict
        let created = self.store.insert(fields).await?;
        info!(id = %created.id, "contact created");
        Ok(created)
    }

    /// Validate, require an existing record, then replace all its fields.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: &str, input: ContactInput) -> Result<Contact, ServiceError> {
        let fields = input.validate()?;
        let id: ContactId = id.parse()?;
        if self.store.find_by_id(id).await?.is_none() {
            return Err(ServiceError::not_found(UPDATE_NOT_FOUND));
        }
        let updated = self
            .store
            .update_by_id(id, fields)
            .await?
            .ok_or_else(|| ServiceError::not_found(UPDATE_NOT_FOUND))?;
        info!(id = %updated.id, "contact updated");
        Ok(updated)
    }

    /// Remove a record and return its last snapshot.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<Contact, ServiceError> {
        let id: ContactId = id.parse()?;
        if self.store.find_by_id(id).await?.is_none() {
            return Err(ServiceError::not_found(DELETE_NOT_FOUND));
        }
        let deleted = self
            .store
            .delete_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found(DELETE_NOT_FOUND))?;
        info!(id = %deleted.id, "contact deleted");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contacts::domain::ContactFields;
    use crate::contacts::file_store::FileContactStore;
    use async_trait::async_trait;

    async fn file_service() -> Result<(ContactService<dyn ContactStore>, std::path::PathBuf), ServiceError> {
        let path = std::env::temp_dir().join(format!("contact_service_{}.json", uuid::Uuid::new_v4()));
        let store: Arc<dyn ContactStore> = Arc::new(FileContactStore::open(&path).await?);
        Ok((ContactService::new(store), path))
    }

    fn input(name: &str, mobile: &str) -> ContactInput {
        ContactInput { name: Some(name.into()), mobile: Some(mobile.into()), ..Default::default() }
    }

    #[tokio::test]
    async fn get_after_create_returns_input_plus_id() -> Result<(), anyhow::Error> {
        let (svc, path) = file_service().await?;
        let body = ContactInput {
            email: Some("a@x.com".into()),
            company: Some("Acme".into()),
            title: Some("CEO".into()),
            group_id: Some("g-1".into()),
            image_url: Some("https://img/a.png".into()),
            ..input("Alice", "111")
        };
        let created = svc.create(body.clone()).await?;
        let fetched = svc.get(&created.id.to_string()).await?;
        assert_eq!(fetched, created);
        assert_eq!(fetched, Contact::from_fields(created.id, body.validate()?));
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn scenario_duplicate_then_delete() -> Result<(), anyhow::Error> {
        let (svc, path) = file_service().await?;
        let alice = svc.create(ContactInput { email: Some("a@x.com".into()), ..input("Alice", "111") }).await?;
        let id = alice.id.to_string();

        let bob = svc.create(input("Bob", "111")).await;
        assert!(matches!(bob, Err(ServiceError::Conflict(ref m)) if m == MOBILE_EXISTS));
        assert_eq!(svc.list().await?.len(), 1);

        assert_eq!(svc.get(&id).await?.name, "Alice");
        assert_eq!(svc.delete(&id).await?, alice);
        assert!(matches!(svc.get(&id).await, Err(ServiceError::NotFound(ref m)) if m == GET_NOT_FOUND));
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_replaces_instead_of_merging() -> Result<(), anyhow::Error> {
        let (svc, path) = file_service().await?;
        let created = svc
            .create(ContactInput {
                email: Some("a@x.com".into()),
                company: Some("Acme".into()),
                ..input("Alice", "111")
            })
            .await?;
        let id = created.id.to_string();

        let updated = svc.update(&id, ContactInput { title: Some("CTO".into()), ..input("Alicia", "112") }).await?;
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.email, None);
        assert_eq!(updated.company, None);
        assert_eq!(updated.title.as_deref(), Some("CTO"));
        assert_eq!(svc.get(&id).await?, updated);
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_on_missing_id() -> Result<(), anyhow::Error> {
        let (svc, path) = file_service().await?;
        let ghost = ContactId::new().to_string();

        let upd = svc.update(&ghost, input("Ghost", "999")).await;
        assert!(matches!(upd, Err(ServiceError::NotFound(ref m)) if m == UPDATE_NOT_FOUND));
        let del = svc.delete(&ghost).await;
        assert!(matches!(del, Err(ServiceError::NotFound(ref m)) if m == DELETE_NOT_FOUND));
        assert!(svc.list().await?.is_empty());
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    #[tokio::test]
    async fn validation_runs_before_id_parsing() -> Result<(), anyhow::Error> {
        let (svc, path) = file_service().await?;
        let res = svc.update("garbage", ContactInput::default()).await;
        assert!(matches!(res, Err(ServiceError::Validation(ref v)) if v.len() == 2));
        let res = svc.update("garbage", input("A", "1")).await;
        assert!(matches!(res, Err(ServiceError::InvalidId(_))));
        assert!(matches!(svc.get("garbage").await, Err(ServiceError::InvalidId(_))));
        let _ = tokio::fs::remove_file(&path).await;
        Ok(())
    }

    /// Store whose every call fails, standing in for a dropped connection.
    struct BrokenStore;

    #[async_trait]
    impl ContactStore for BrokenStore {
        async fn find_all(&self) -> Result<Vec<Contact>, ServiceError> { Err(ServiceError::Db("connection reset".into())) }
        async fn find_by_id(&self, _: ContactId) -> Result<Option<Contact>, ServiceError> { Err(ServiceError::Db("connection reset".into())) }
        async fn find_by_mobile(&self, _: &str) -> Result<Option<Contact>, ServiceError> { Err(ServiceError::Db("connection reset".into())) }
        async fn insert(&self, _: ContactFields) -> Result<Contact, ServiceError> { Err(ServiceError::Db("connection reset".into())) }
        async fn update_by_id(&self, _: ContactId, _: ContactFields) -> Result<Option<Contact>, ServiceError> { Err(ServiceError::Db("connection reset".into())) }
        async fn delete_by_id(&self, _: ContactId) -> Result<Option<Contact>, ServiceError> { Err(ServiceError::Db("connection reset".into())) }
    }

    #[tokio::test]
    async fn store_failures_surface_unchanged() {
        let svc = ContactService::new(Arc::new(BrokenStore));
        let err = svc.list().await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));
        assert_eq!(err.to_string(), "connection reset");
        assert!(matches!(svc.create(input("A", "1")).await, Err(ServiceError::Db(_))));
    }
}
