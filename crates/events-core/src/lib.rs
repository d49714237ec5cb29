//! Event filtering, favorites and browse state for SP Events.
//!
//! This crate holds the application logic that sits between the hosted
//! backend client ([`sp_events_api`]) and a front end:
//!
//! - [`filter`]: the pure filter predicate engine
//! - [`favorites`]: the user's favorite set
//! - [`lookup`]: finding an event by id prefix
//! - [`state`]: immutable snapshots advanced by a pure reducer
//! - [`store`]: the store abstraction, implemented for the HTTP client and in memory
//! - [`browser`]: the controller that awaits the store and reduces the outcome

pub mod browser;
pub mod favorites;
pub mod filter;
pub mod lookup;
pub mod notify;
pub mod session;
pub mod state;
pub mod store;

pub use browser::{BrowserError, EventBrowser, FavoriteToggle};
pub use favorites::FavoriteSet;
pub use filter::{EventFilter, FilterSpec};
pub use lookup::{find_event, EventLookup};
pub use notify::{Notification, NotificationLevel};
pub use session::{Route, SessionState};
pub use state::{Action, AppState};
pub use store::{EventStore, MemoryStore, StoreOp};
