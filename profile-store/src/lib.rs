//! Database collaborator for the learning backend.
//!
//! - [`ProfileStore`]: profiles, generated quizzes and graded attempts.
//!   [`SupabaseStore`] talks PostgREST; [`InMemoryStore`] keeps everything
//!   in process for development and tests.
//! - [`AuthVerifier`]: bearer-token → user. [`SupabaseAuth`] in production,
//!   [`DevAuth`] when no database is configured.
//! - [`analytics::summarize_attempts`]: reporting over attempt history.

pub mod analytics;
pub mod auth;
pub mod errors;
pub mod memory;
pub mod models;
pub mod store;
pub mod supabase;

pub use auth::{AuthVerifier, AuthenticatedUser, DevAuth, SupabaseAuth};
pub use errors::{AuthError, StoreError};
pub use memory::InMemoryStore;
pub use store::ProfileStore;
pub use supabase::{SupabaseConfig, SupabaseStore};
