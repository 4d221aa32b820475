// Host-side tests for pure input functions.
// The web crate is wasm-only, so we include the pure-Rust module directly.

#![allow(dead_code)]
mod input {
    include!("../src/input.rs");
}

use input::*;

#[test]
fn primary_button_rotates() {
    assert_eq!(drag_mode_for(0, false), DragMode::Rotate);
}

#[test]
fn secondary_button_or_shift_pans() {
    assert_eq!(drag_mode_for(2, false), DragMode::Pan);
    assert_eq!(drag_mode_for(0, true), DragMode::Pan);
}

#[test]
fn client_coordinates_are_made_local() {
    assert_eq!(client_to_local(110.0, 45.0, 10.0, 5.0), [100.0, 40.0]);
}

#[test]
fn moves_without_press_do_not_drag() {
    let mut t = DragTracker::default();
    assert!(!t.is_active());
    assert!(t.on_move(5.0, 5.0).is_none());
    assert!(!t.release(5.0, 5.0));
}

#[test]
fn drag_reports_incremental_deltas() {
    let mut t = DragTracker::default();
    t.press(10.0, 10.0, DragMode::Rotate);
    assert_eq!(t.on_move(13.0, 14.0), Some((DragMode::Rotate, 3.0, 4.0)));
    assert_eq!(t.on_move(13.0, 10.0), Some((DragMode::Rotate, 0.0, -4.0)));
}

#[test]
fn short_press_is_a_click() {
    let mut t = DragTracker::default();
    t.press(50.0, 50.0, DragMode::Rotate);
    let _ = t.on_move(51.0, 51.0);
    assert!(t.release(52.0, 50.0));
    assert!(!t.is_active());
}

#[test]
fn long_drag_is_not_a_click() {
    let mut t = DragTracker::default();
    t.press(0.0, 0.0, DragMode::Pan);
    let _ = t.on_move(30.0, 0.0);
    // returning to the start still counts the distance travelled
    assert!(!t.release(0.0, 0.0));
}

#[test]
fn cancel_ends_the_gesture() {
    let mut t = DragTracker::default();
    t.press(0.0, 0.0, DragMode::Rotate);
    t.cancel();
    assert!(!t.is_active());
    assert!(t.on_move(1.0, 1.0).is_none());
}
