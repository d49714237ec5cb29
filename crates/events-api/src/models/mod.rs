//! Data types stored in the hosted backend.

mod event;
mod favorite;
mod session;

pub use event::*;
pub use favorite::*;
pub use session::*;
