//! Contacts: domain types, input validation, store backends and the service.

pub mod domain;
pub mod validation;
pub mod repository;
pub mod file_store;
pub mod service;

pub use domain::{Contact, ContactFields, ContactId, ContactInput};
pub use repository::{ContactStore, SeaOrmContactStore};
pub use file_store::FileContactStore;
pub use service::ContactService;

/// Client-facing messages. Existing clients match on these strings verbatim.
pub const GET_NOT_FOUND: &str = "NO contact found";
pub const UPDATE_NOT_FOUND: &str = "Contact is not found...";
pub const DELETE_NOT_FOUND: &str = "No contact found";
pub const MOBILE_EXISTS: &str = "Mobile is Already exists";

pub const MSG_CREATED: &str = "Contact is Created";
pub const MSG_UPDATED: &str = "Contact is Updated";
pub const MSG_DELETED: &str = "Contact is Deleted";
