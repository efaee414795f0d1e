//! Tests for BoundingBox operations.

use weather_common::bbox::BoundingBox;
use weather_common::Point;

// ============================================================================
// Constructor tests
// ============================================================================

#[test]
fn test_bbox_new() {
    let bbox = BoundingBox::new(-180.0, -90.0, 180.0, 90.0);
    assert_eq!(bbox.min_x, -180.0);
    assert_eq!(bbox.min_y, -90.0);
    assert_eq!(bbox.max_x, 180.0);
    assert_eq!(bbox.max_y, 90.0);
}

#[test]
fn test_bbox_enclosing() {
    let bbox = BoundingBox::enclosing([
        Point::new(1.0, 5.0),
        Point::new(-2.0, 3.0),
        Point::new(4.0, -1.0),
    ])
    .unwrap();
    assert_eq!(bbox, BoundingBox::new(-2.0, -1.0, 4.0, 5.0));
}

#[test]
fn test_bbox_enclosing_empty() {
    assert!(BoundingBox::enclosing(Vec::<Point>::new()).is_none());
}

#[test]
fn test_bbox_center() {
    let bbox = BoundingBox::new(-120.0, 35.0, -110.0, 42.0);
    assert_eq!(bbox.center(), Point::new(-115.0, 38.5));
}

// ============================================================================
// Containment tests
// ============================================================================

#[test]
fn test_bbox_contains_edges_inclusive() {
    let bbox = BoundingBox::new(0.0, 0.0, 3.0, 3.0);
    assert!(bbox.contains(&Point::new(1.5, 1.5)));
    assert!(bbox.contains(&Point::new(0.0, 0.0)));
    assert!(bbox.contains(&Point::new(3.0, 3.0)));
    assert!(!bbox.contains(&Point::new(-0.1, 1.0)));
    assert!(!bbox.contains(&Point::new(1.0, 3.1)));
}

