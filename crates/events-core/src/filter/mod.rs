//! Event filter predicate engine.
//!
//! A [`FilterSpec`] holds every user-selected criterion; [`EventFilter`]
//! keeps, in their original order, the events that satisfy all active ones.
//!
//! # Criteria
//!
//! - **search**: case-insensitive substring of the title, description or organizer
//! - **category**: exact label match, or [`ALL_CATEGORIES`] for no restriction
//! - **location**: case-insensitive substring; events without a location fail
//! - **price**: `price_min >= low` and `price_max <= high`; a missing or zero
//!   price always passes
//! - **dates**: `from <= date_start <= to`; events without a start date pass
//!
//! # Example
//!
//! ```
//! use sp_events_api::models::Event;
//! use sp_events_core::filter::{EventFilter, FilterSpec, PriceRange};
//!
//! let mut concert = Event::new("1", "Orquestra Sinfônica");
//! concert.price_min = Some(50.0);
//! concert.price_max = Some(100.0);
//!
//! let cheap = FilterSpec::default().with_price_range(PriceRange::new(0.0, Some(40.0)).unwrap());
//! assert!(!EventFilter::new(&cheap).matches(&concert));
//! ```

mod category;
mod date;
mod error;
mod evaluator;
mod price;
mod spec;

pub use category::{
    is_known_category, suggest_category, CategoryFilter, ALL_CATEGORIES, CATEGORIES,
};
pub use date::{parse_date_from, parse_date_to, parse_time_zone, DEFAULT_TIME_ZONE};
pub use error::{FilterError, FilterResult};
pub use evaluator::{filter_events, EventFilter};
pub use price::{PriceRange, PRICE_SLIDER_MAX};
pub use spec::FilterSpec;
