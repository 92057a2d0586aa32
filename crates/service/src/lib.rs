//! Service layer providing the contact CRUD operations on top of a pluggable store.
//! - Separates business rules (validation, mobile uniqueness) from data access.
//! - Ships a Postgres store (via `models`) and a JSON-file store.

pub mod errors;
pub mod storage;
pub mod contacts;
#[cfg(test)]
pub mod test_support;
