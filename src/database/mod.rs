//! SQLite-backed JSON document store
//!
//! The game data model is schemaless collections of JSON documents (players,
//! items, listings, trades), so instead of one table per entity there is a
//! single `documents` table keyed by collection name. Filtering on document
//! fields goes through SQLite's JSON1 `json_extract`.

pub mod connection;
pub mod documents;

pub use connection::Database;
