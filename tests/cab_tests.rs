//! Cab tests - throttle integration and the reverse interlock

use tui_rails::core::{Cab, Car, Consist, TrackMap};
use tui_rails::types::{TrackPosition, CAB_ACCEL, CAB_MAX_SPEED};

#[test]
fn test_speed_is_clamped_to_the_top_speed() {
    let mut cab = Cab::new();
    cab.throttle_up();

    for _ in 0..1000 {
        cab.tick(16.0);
        assert!(cab.speed() <= CAB_MAX_SPEED);
    }
    assert_eq!(cab.speed(), CAB_MAX_SPEED);
}

#[test]
fn test_braking_stops_at_zero() {
    let mut cab = Cab::new();
    cab.throttle_up();
    while cab.speed() < CAB_MAX_SPEED {
        cab.tick(16.0);
    }

    cab.throttle_down();
    for _ in 0..1000 {
        cab.tick(16.0);
        assert!(cab.speed() >= 0.0);
    }
    assert_eq!(cab.speed(), 0.0);
}

#[test]
fn test_acceleration_rate() {
    let mut cab = Cab::new();
    cab.throttle_up();
    cab.tick(1000.0);
    assert!((cab.speed() - CAB_ACCEL).abs() < 1e-9);
}

#[test]
fn test_reverse_is_ignored_while_moving() {
    let mut cab = Cab::new();
    cab.throttle_up();
    cab.tick(100.0);
    assert!(cab.speed() > 0.0);

    cab.reverse();
    assert!(cab.forward());

    // Brake back to standstill; now the interlock releases.
    cab.throttle_down();
    for _ in 0..200 {
        cab.tick(16.0);
    }
    cab.reverse();
    assert!(!cab.forward());
}

#[test]
fn test_reversed_cab_drives_the_train_backwards() {
    let map = TrackMap::from_layout(&["ggg"; 12], &[" s "; 12], &["   "; 12]);
    let mut consist = Consist::new(Car::new(0, TrackPosition::centered(1, 5)), vec![]);
    let mut cab = Cab::new();

    cab.reverse();
    cab.throttle_up();
    cab.tick(1000.0);

    let before = consist.lead().pose(&map).position.y;
    consist.lead_mut().set_speed(cab.signed_speed());
    consist.tick(&map, 16.0);
    let after = consist.lead().pose(&map).position.y;

    assert!(after < before);
    assert!((before - after - CAB_ACCEL * 16.0 / 1000.0).abs() < 1e-9);
}
