//! Client library for the SP Events hosted backend.
//!
//! The backend is a hosted Supabase project: events and favorites live in
//! PostgREST tables under `/rest/v1`, sessions come from the identity
//! provider under `/auth/v1`.
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use sp_events_api::prelude::*;
//! ```
//!
//! This re-exports [`client::EventsClient`], its builder, error types and the
//! data models.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod prelude;
mod retry;
pub mod tables;
