//! Tests for utility functions

use std::time::Duration;

use fakeping::core::Category;
use fakeping::util::{Clock, ManualClock};

#[test]
fn test_manual_clock_drives_now() {
    let clock = ManualClock::new();
    let start = clock.now();
    clock.advance(Duration::from_millis(75));
    assert_eq!(clock.now() - start, Duration::from_millis(75));
}

#[test]
fn test_category_tokens_round_trip_through_display() {
    for category in Category::DELAYABLE {
        let parsed: Category = category.to_string().parse().unwrap();
        assert_eq!(parsed, category);
    }
}

#[test]
fn test_category_labels() {
    assert_eq!(Category::BlockBreak.label(), "Block Breaking");
    assert_eq!(Category::ItemUse.command_name(), "items");
}

#[test]
fn test_init_tracing_is_idempotent() {
    fakeping::util::init_tracing();
    fakeping::util::init_tracing();
    tracing::info!("tracing initialized twice without panicking");
}

#[test]
fn test_default_log_filter_parses() {
    let filter = tracing_subscriber::EnvFilter::try_new(fakeping::util::DEFAULT_LOG_FILTER);
    assert!(filter.is_ok());
}
