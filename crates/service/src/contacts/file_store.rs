use std::{path::PathBuf, sync::Arc};

use async_trait::async_trait;

use super::domain::{Contact, ContactFields, ContactId};
use super::repository::ContactStore;
use super::MOBILE_EXISTS;
use crate::errors::ServiceError;
use crate::storage::json_map_store::JsonMapStore;

/// Contacts kept in one JSON file. The uniqueness check and the write happen
/// under the same lock, so two concurrent creates with one mobile cannot both
/// succeed.
#[derive(Clone)]
pub struct FileContactStore {
    inner: Arc<JsonMapStore<ContactId, Contact>>,
}

impl FileContactStore {
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ServiceError> {
        Ok(Self { inner: JsonMapStore::open(path).await? })
    }
}

fn mobile_taken<'a>(mut others: impl Iterator<Item = &'a Contact>, mobile: &str, except: Option<ContactId>) -> bool {
    others.any(|c| c.mobile == mobile && Some(c.id) != except)
}

#[async_trait]
impl ContactStore for FileContactStore {
    async fn find_all(&self) -> Result<Vec<Contact>, ServiceError> {
        Ok(self.inner.values().await)
    }

    async fn find_by_id(&self, id: ContactId) -> Result<Option<Contact>, ServiceError> {
        Ok(self.inner.get(&id).await)
    }

    async fn find_by_mobile(&self, mobile: &str) -> Result<Option<Contact>, ServiceError> {
        Ok(self.inner.find(|c| c.mobile == mobile).await)
    }

    async fn insert(&self, fields: ContactFields) -> Result<Contact, ServiceError> {
        self.inner
            .update_map(move |map| {
                if mobile_taken(map.values(), &fields.mobile, None) {
                    return Err(ServiceError::Conflict(MOBILE_EXISTS.into()));
                }
                let contact = Contact::from_fields(ContactId::new(), fields);
                map.insert(contact.id, contact.clone());
                Ok(contact)
            })
            .await
    }

    async fn update_by_id(&self, id: ContactId, fields: ContactFields) -> Result<Option<Contact>, ServiceError> {
        self.inner
            .update_map(move |map| {
                if !map.contains_key(&id) {
                    return Ok(None);
                }
                if mobile_taken(map.values(), &fields.mobile, Some(id)) {
                    return Err(ServiceError::Conflict(MOBILE_EXISTS.into()));
                }
                let contact = Contact::from_fields(id, fields);
                map.insert(id, contact.clone());
                Ok(Some(contact))
            })
            .await
    }

    async fn delete_by_id(&self, id: ContactId) -> Result<Option<Contact>, ServiceError> {
        self.inner.update_map(move |map| Ok(map.shift_remove(&id))).await
    }
}
