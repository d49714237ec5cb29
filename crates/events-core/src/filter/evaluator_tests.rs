//! Tests for filter evaluation.

use super::*;
use crate::filter::{CategoryFilter, PriceRange};
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;

// ==================== Test Helpers ====================

fn make_event(id: &str, title: &str) -> Event {
    Event::new(id, title)
}

fn priced(id: &str, min: Option<f64>, max: Option<f64>) -> Event {
    let mut event = make_event(id, "Priced");
    event.price_min = min;
    event.price_max = max;
    event
}

fn dated(id: &str, date_start: &str) -> Event {
    let mut event = make_event(id, "Dated");
    event.date_start = Some(date_start.to_string());
    event
}

fn utc(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn range(low: f64, high: f64) -> PriceRange {
    PriceRange::new(low, Some(high)).unwrap()
}

// ==================== Search Tests ====================

#[test]
fn test_search_matches_title_case_insensitive() {
    let spec = FilterSpec::default().with_search("JAZZ");
    let filter = EventFilter::new(&spec);

    assert!(filter.matches(&make_event("1", "Noite de Jazz")));
    assert!(!filter.matches(&make_event("2", "Rock no Parque")));
}

#[test]
fn test_search_matches_description_and_organizer() {
    let spec = FilterSpec::default().with_search("sesc");
    let filter = EventFilter::new(&spec);

    let mut by_description = make_event("1", "Oficina");
    by_description.description = Some("Realizada no SESC Pompeia".to_string());

    let mut by_organizer = make_event("2", "Concerto");
    by_organizer.organizer = Some("Sesc São Paulo".to_string());

    assert!(filter.matches(&by_description));
    assert!(filter.matches(&by_organizer));
}

#[test]
fn test_search_ignores_location_and_category() {
    let spec = FilterSpec::default().with_search("paulista");
    let filter = EventFilter::new(&spec);

    let mut event = make_event("1", "Exposição");
    event.location = Some("Avenida Paulista".to_string());
    event.category = Some("paulista".to_string());

    assert!(!filter.matches(&event));
}

#[test]
fn test_search_handles_accented_text() {
    let spec = FilterSpec::default().with_search("MÚSICA");
    let filter = EventFilter::new(&spec);

    assert!(filter.matches(&make_event("1", "Festival de música")));
}

// ==================== Category Tests ====================

#[test]
fn test_category_exact_match() {
    let spec = FilterSpec::default().with_category(CategoryFilter::parse("Teatro"));
    let filter = EventFilter::new(&spec);

    let mut teatro = make_event("1", "Hamlet");
    teatro.category = Some("Teatro".to_string());
    let mut lowercase = make_event("2", "Macbeth");
    lowercase.category = Some("teatro".to_string());
    let uncategorized = make_event("3", "Sem categoria");

    assert!(filter.matches(&teatro));
    assert!(!filter.matches(&lowercase));
    assert!(!filter.matches(&uncategorized));
}

#[test]
fn test_category_sentinel_matches_everything() {
    let spec = FilterSpec::default().with_category(CategoryFilter::parse("Todos"));
    let filter = EventFilter::new(&spec);

    let mut event = make_event("1", "Qualquer");
    event.category = Some("Outro".to_string());

    assert!(filter.matches(&event));
    assert!(filter.matches(&make_event("2", "Sem categoria")));
}

// ==================== Location Tests ====================

#[test]
fn test_location_substring_case_insensitive() {
    let spec = FilterSpec::default().with_location("pinheiros");
    let filter = EventFilter::new(&spec);

    let mut event = make_event("1", "Feira");
    event.location = Some("Largo da Batata, Pinheiros".to_string());

    assert!(filter.matches(&event));
}

#[test]
fn test_location_missing_is_excluded_when_active() {
    let spec = FilterSpec::default().with_location("centro");
    let filter = EventFilter::new(&spec);

    assert!(!filter.matches(&make_event("1", "Sem local")));
}

#[test]
fn test_location_inactive_keeps_events_without_location() {
    let spec = FilterSpec::default();
    assert!(EventFilter::new(&spec).matches(&make_event("1", "Sem local")));
}

// ==================== Price Tests ====================

#[test]
fn test_price_outside_narrow_range_is_excluded() {
    let spec = FilterSpec::default().with_price_range(range(0.0, 40.0));
    let filter = EventFilter::new(&spec);

    assert!(!filter.matches(&priced("1", Some(50.0), Some(100.0))));
}

#[test]
fn test_price_inside_slider_range_is_kept() {
    let spec = FilterSpec::default().with_price_range(range(0.0, 500.0));
    let filter = EventFilter::new(&spec);

    assert!(filter.matches(&priced("1", Some(50.0), Some(100.0))));
}

#[test]
fn test_price_absent_always_passes() {
    let spec = FilterSpec::default().with_price_range(range(30.0, 40.0));
    let filter = EventFilter::new(&spec);

    assert!(filter.matches(&priced("1", None, None)));
}

#[test]
fn test_price_free_event_passes_raised_floor() {
    let spec = FilterSpec::default().with_price_range(range(30.0, 40.0));
    let filter = EventFilter::new(&spec);

    assert!(filter.matches(&priced("1", Some(0.0), Some(0.0))));
}

#[test]
fn test_price_low_bound_only_checks_min() {
    let spec = FilterSpec::default().with_price_range(PriceRange::new(60.0, None).unwrap());
    let filter = EventFilter::new(&spec);

    assert!(!filter.matches(&priced("1", Some(50.0), Some(100.0))));
    assert!(filter.matches(&priced("2", Some(60.0), Some(1000.0))));
}

// ==================== Date Tests ====================

#[test]
fn test_date_range_inclusive_bounds() {
    let spec = FilterSpec::default()
        .with_dates(Some(utc(2025, 5, 1, 0)), Some(utc(2025, 5, 31, 0)))
        .unwrap();
    let filter = EventFilter::new(&spec);

    assert!(filter.matches(&dated("1", "2025-05-01T00:00:00Z")));
    assert!(filter.matches(&dated("2", "2025-05-31T00:00:00+00:00")));
    assert!(filter.matches(&dated("3", "2025-05-15T20:00:00-03:00")));
    assert!(!filter.matches(&dated("4", "2025-04-30T23:59:59Z")));
    assert!(!filter.matches(&dated("5", "2025-06-01T00:00:00Z")));
}

#[test]
fn test_date_offsets_are_compared_as_instants() {
    // 22:00 in São Paulo on the 31st is already June in UTC.
    let spec = FilterSpec::default()
        .with_dates(None, Some(utc(2025, 5, 31, 23)))
        .unwrap();
    let filter = EventFilter::new(&spec);

    assert!(!filter.matches(&dated("1", "2025-05-31T22:00:00-03:00")));
    assert!(filter.matches(&dated("2", "2025-05-31T19:00:00-03:00")));
}

#[test]
fn test_date_missing_start_always_passes() {
    let spec = FilterSpec::default()
        .with_dates(Some(utc(2025, 5, 1, 0)), Some(utc(2025, 5, 2, 0)))
        .unwrap();
    let filter = EventFilter::new(&spec);

    assert!(filter.matches(&make_event("1", "Sem data")));
    assert!(filter.matches(&dated("2", "   ")));
}

#[test]
fn test_date_unparsable_start_excluded_only_when_bounded() {
    let bounded = FilterSpec::default()
        .with_dates(Some(utc(2025, 5, 1, 0)), None)
        .unwrap();
    let unbounded = FilterSpec::default();

    let event = dated("1", "amanhã à noite");
    assert!(!EventFilter::new(&bounded).matches(&event));
    assert!(EventFilter::new(&unbounded).matches(&event));
}

#[test]
fn test_date_naive_start_read_as_utc() {
    let spec = FilterSpec::default()
        .with_dates(Some(utc(2025, 5, 10, 12)), None)
        .unwrap();
    let filter = EventFilter::new(&spec);

    assert!(filter.matches(&dated("1", "2025-05-10T12:00:00")));
    assert!(!filter.matches(&dated("2", "2025-05-10T11:59:00")));
}

#[test]
fn test_date_minute_precision_and_bare_day_starts_kept() {
    let from = crate::filter::parse_date_from("2025-05-01", Tz::UTC).unwrap();
    let to = crate::filter::parse_date_to("2025-05-31", Tz::UTC).unwrap();
    let spec = FilterSpec::default().with_dates(Some(from), Some(to)).unwrap();
    let events = vec![
        dated("minute", "2025-05-10T20:00Z"),
        dated("day", "2025-05-10"),
        dated("basic-offset", "2025-05-10T20:00:00-0300"),
        dated("june", "2025-06-01"),
    ];

    let kept: Vec<&str> = EventFilter::new(&spec)
        .filter_events(&events)
        .iter()
        .map(|e| e.id.as_str())
        .collect();
    assert_eq!(kept, vec!["minute", "day", "basic-offset"]);
}

// ==================== Combination Tests ====================

#[test]
fn test_all_criteria_must_hold() {
    let spec = FilterSpec::default()
        .with_search("samba")
        .with_category(CategoryFilter::parse("Música"))
        .with_location("lapa");
    let filter = EventFilter::new(&spec);

    let mut full = make_event("1", "Roda de Samba");
    full.category = Some("Música".to_string());
    full.location = Some("Lapa".to_string());

    let mut wrong_category = full.clone();
    wrong_category.id = "2".to_string();
    wrong_category.category = Some("Dança".to_string());

    assert!(filter.matches(&full));
    assert!(!filter.matches(&wrong_category));
}

#[test]
fn test_filter_events_free_function() {
    let events = vec![make_event("1", "Jazz"), make_event("2", "Rock")];
    let spec = FilterSpec::default().with_search("rock");

    let ids: Vec<&str> = filter_events(&events, &spec)
        .iter()
        .map(|event| event.id.as_str())
        .collect();
    assert_eq!(ids, vec!["2"]);
}
