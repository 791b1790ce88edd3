//! Persistent record of ranked seating preferences, keyed by display name.

pub mod error;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod registry;
pub mod schema;
pub mod submission;

pub use diesel_async::pooled_connection::deadpool::Pool;
pub use diesel_async::AsyncPgConnection;
pub use error::{DatabaseError, RegistryError};
pub use memory::MemoryRegistry;
pub use models::{Placement, Record};
pub use postgres::{get_database_connection, get_database_connection_from_env, PgRegistry};
pub use registry::Registry;
pub use submission::{Submission, ValidationError};
