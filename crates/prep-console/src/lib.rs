//! Admin console core for the exam prep platform.
//!
//! This crate holds the in-memory directory of console operators and the
//! dashboard analytics. Nothing here touches HTTP or the database, so the
//! rules can be exercised directly from unit tests.

pub mod analytics;
pub mod directory;
pub mod error;
pub mod model;

pub use analytics::Analytics;
pub use directory::AdminDirectory;
pub use error::{ConsoleError, ParseEnumError};
