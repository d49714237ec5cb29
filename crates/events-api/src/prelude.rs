//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```
//! use sp_events_api::prelude::*;
//!
//! // Now you have access to:
//! // - EventsClient, EventsClientBuilder (API client)
//! // - Error, ApiError, Result (error handling)
//! // - Event, Favorite, Session, AuthUser (data models)
//! ```

// Client types
pub use crate::client::{EventsClient, EventsClientBuilder};

// Error types
pub use crate::error::{ApiError, Error, Result};

// Data models
pub use crate::models::{parse_timestamp, AuthUser, Event, Favorite, Session};

// Table names
pub use crate::tables::{EVENTS_TABLE, FAVORITES_TABLE};
