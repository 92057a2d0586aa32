//! Storage abstractions for service layer
//!
//! Reusable file-backed stores for data small enough to live in one JSON file.

pub mod json_map_store;
