//! In-memory store
//!
//! Used by `database_target = "memory"`, the `--memory` flag, and the
//! integration tests.

pub mod store;

pub use store::{InMemoryFamilyStore, NOMINAL_REQUEST_CHARGE};
