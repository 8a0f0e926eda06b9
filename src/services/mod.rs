//! Request-handling services.

pub mod error;
pub mod ingest;
pub mod query;

pub use error::ApiError;
pub use ingest::IngestService;
pub use query::{QueryParams, QueryService, MAX_QUERY_LIMIT};
