//! Filter evaluation against events.
//!
//! # Example
//!
//! ```
//! use sp_events_api::models::Event;
//! use sp_events_core::filter::{EventFilter, FilterSpec};
//!
//! let events = vec![
//!     Event::new("1", "Jazz Night"),
//!     Event::new("2", "Rock no Parque"),
//! ];
//!
//! let spec = FilterSpec::default().with_search("jazz");
//! let matching = EventFilter::new(&spec).filter_events(&events);
//!
//! assert_eq!(matching.len(), 1);
//! assert_eq!(matching[0].id, "1");
//! ```

use sp_events_api::models::{parse_timestamp, Event};

use super::spec::FilterSpec;

/// Evaluates a [`FilterSpec`] against events.
///
/// The search and location needles are lowercased once at construction.
/// Evaluation is pure: it never consults the clock or any other state.
#[derive(Debug)]
pub struct EventFilter<'a> {
    spec: &'a FilterSpec,
    search: String,
    location: String,
}

impl<'a> EventFilter<'a> {
    /// Creates an evaluator for `spec`.
    pub fn new(spec: &'a FilterSpec) -> Self {
        Self {
            spec,
            search: spec.search.to_lowercase(),
            location: spec.location.to_lowercase(),
        }
    }

    /// Returns true if the event satisfies every criterion.
    pub fn matches(&self, event: &Event) -> bool {
        self.search_matches(event)
            && self.spec.category.matches(event.category.as_deref())
            && self.location_matches(event)
            && self
                .spec
                .price_range
                .admits(event.price_min, event.price_max)
            && self.date_matches(event)
    }

    /// Filters a slice of events, keeping their relative order.
    pub fn filter_events<'b>(&self, events: &'b [Event]) -> Vec<&'b Event> {
        events.iter().filter(|event| self.matches(event)).collect()
    }

    /// Title, description or organizer contains the search text.
    fn search_matches(&self, event: &Event) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let contains = |text: &str| text.to_lowercase().contains(&self.search);

        contains(&event.title)
            || event.description.as_deref().is_some_and(contains)
            || event.organizer.as_deref().is_some_and(contains)
    }

    /// An event without a location fails an active location criterion.
    fn location_matches(&self, event: &Event) -> bool {
        if self.location.is_empty() {
            return true;
        }
        event
            .location
            .as_deref()
            .is_some_and(|location| location.to_lowercase().contains(&self.location))
    }

    /// An event without a start date passes; one whose start date cannot be
    /// read fails any active bound.
    fn date_matches(&self, event: &Event) -> bool {
        let (from, to) = (self.spec.date_from, self.spec.date_to);
        if from.is_none() && to.is_none() {
            return true;
        }

        let raw = match event.date_start.as_deref().map(str::trim) {
            None | Some("") => return true,
            Some(raw) => raw,
        };
        let Some(start) = parse_timestamp(raw) else {
            return false;
        };

        from.map_or(true, |from| start >= from) && to.map_or(true, |to| start <= to)
    }
}

/// Convenience wrapper: the events of `events` that satisfy `spec`.
pub fn filter_events<'b>(events: &'b [Event], spec: &FilterSpec) -> Vec<&'b Event> {
    EventFilter::new(spec).filter_events(events)
}

#[cfg(test)]
#[path = "evaluator_tests.rs"]
mod tests;
