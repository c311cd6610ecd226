//! Meeting archive adapters

pub mod schema;
mod sqlite;

pub use sqlite::SqliteArchiveStore;
