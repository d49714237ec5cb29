//! Event lookup by id or id prefix.
//!
//! Front ends show shortened ids, so users may refer to an event by any
//! unique prefix of its id.

use sp_events_api::models::Event;

/// Minimum prefix length accepted for a lookup.
pub const MIN_PREFIX_LEN: usize = 4;

/// Outcome of [`find_event`].
#[derive(Debug, PartialEq)]
pub enum EventLookup<'a> {
    /// Exactly one event matches.
    Found(&'a Event),
    /// Several events share the prefix; holds their ids.
    Ambiguous(Vec<&'a str>),
    NotFound,
}

/// Finds the event whose id equals `id_or_prefix`, or failing that the only
/// event whose id starts with it.
pub fn find_event<'a>(events: &'a [Event], id_or_prefix: &str) -> EventLookup<'a> {
    let needle = id_or_prefix.trim();
    if needle.is_empty() {
        return EventLookup::NotFound;
    }
    if let Some(event) = events.iter().find(|event| event.id == needle) {
        return EventLookup::Found(event);
    }
    if needle.chars().count() < MIN_PREFIX_LEN {
        return EventLookup::NotFound;
    }

    let matches: Vec<&Event> = events
        .iter()
        .filter(|event| event.id.starts_with(needle))
        .collect();

    match matches.as_slice() {
        [] => EventLookup::NotFound,
        [only] => EventLookup::Found(*only),
        many => EventLookup::Ambiguous(many.iter().map(|&event| event.id.as_str()).collect()),
    }
}
