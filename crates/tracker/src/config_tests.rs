// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;

#[test]
fn defaults_are_ten_minutes_sixty_seconds_and_the_named_task() {
    let config = TrackerConfig::new(3);
    assert_eq!(config.reclaim_idle_after, Duration::from_secs(600));
    assert_eq!(config.cleanup_interval, Duration::from_secs(60));
    assert_eq!(config.cleanup_task_name, "CleanupTrackedErrors");
}

#[test]
fn rejects_zero_attempts() {
    let config = TrackerConfig::new(0);
    assert_eq!(
        config.validate(),
        Err(TrackerError::InvalidArgument(
            "max_delivery_attempts must be at least 1".to_string()
        ))
    );
}

#[test]
fn accepts_one_attempt() {
    assert!(TrackerConfig::new(1).validate().is_ok());
}

#[test]
fn builder_overrides_stick() {
    let config = TrackerConfig::new(5)
        .with_reclaim_idle_after(Duration::from_millis(1))
        .with_cleanup_interval(Duration::from_millis(10))
        .with_cleanup_task_name("custom");

    assert_eq!(config.reclaim_idle_after, Duration::from_millis(1));
    assert_eq!(config.cleanup_interval, Duration::from_millis(10));
    assert_eq!(config.cleanup_task_name, "custom");
}
