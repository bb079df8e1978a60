//! Utility types and helpers for geometry and colour names.
//!
//! This module provides:
//! - [`Point`] in canvas/scene coordinates
//! - [`Rect`], the integer rectangle used for bounds and dirty tracking
//! - Drag-box geometry shared by the shape builder
//! - Colour name and hex parsing used by the configuration layer

use crate::draw::{Color, color::*};
use serde::{Deserialize, Serialize};

// ============================================================================
// Points
// ============================================================================

/// A position in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        (other.x - self.x).hypot(other.y - self.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

// ============================================================================
// Drag Geometry
// ============================================================================

/// Normalised box spanned by a drag from `origin` to `pointer`.
///
/// Returns `(left, top, width, height)` with non-negative extents, so dragging
/// in any direction yields the same rectangle.
pub fn drag_box(origin: Point, pointer: Point) -> (f64, f64, f64, f64) {
    let left = pointer.x.min(origin.x);
    let top = pointer.y.min(origin.y);
    let width = (pointer.x - origin.x).abs();
    let height = (pointer.y - origin.y).abs();
    (left, top, width, height)
}

// ============================================================================
// Rectangles
// ============================================================================

/// Largest magnitude a covering rectangle edge may have; twice it still fits in `i32`.
pub const COORD_LIMIT: f64 = (i32::MAX / 2) as f64;

/// Axis-aligned rectangle helper used for bounds and dirty region tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    ///
    /// Extents wider than `i32::MAX` are clamped.
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        let width = span(min_x, max_x);
        let height = span(min_y, max_y);
        Self::new(min_x, min_y, width, height)
    }

    /// Builds the smallest integer rectangle covering the given float bounds.
    ///
    /// Degenerate extents are widened to one pixel so zero-size shapes still
    /// own a hit/dirty area. Coordinates are clamped to +/-`COORD_LIMIT`.
    pub fn covering(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Option<Self> {
        let limit = |value: f64| value.clamp(-COORD_LIMIT, COORD_LIMIT);
        let mut min_x = limit(min_x.floor()) as i32;
        let mut min_y = limit(min_y.floor()) as i32;
        let mut max_x = limit(max_x.ceil()) as i32;
        let mut max_y = limit(max_y.ceil()) as i32;
        if min_x == max_x {
            max_x = max_x.saturating_add(1);
            min_x = max_x - 1;
        }
        if min_y == max_y {
            max_y = max_y.saturating_add(1);
            min_y = max_y - 1;
        }
        Self::from_min_max(min_x, min_y, max_x, max_y)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Returns true if the point lies inside the rectangle (max edges exclusive).
    pub fn contains(&self, point: Point) -> bool {
        point.x >= f64::from(self.x)
            && point.y >= f64::from(self.y)
            && point.x < self.right()
            && point.y < self.bottom()
    }

    /// Exclusive right edge.
    pub fn right(&self) -> f64 {
        f64::from(self.x) + f64::from(self.width)
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> f64 {
        f64::from(self.y) + f64::from(self.height)
    }

    /// Returns a copy grown by `amount` on every side.
    pub fn inflated(&self, amount: i32) -> Rect {
        Rect {
            x: self.x.saturating_sub(amount),
            y: self.y.saturating_sub(amount),
            width: self.width.saturating_add(amount.saturating_mul(2)),
            height: self.height.saturating_add(amount.saturating_mul(2)),
        }
    }
}

// ============================================================================
// Color Parsing
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system and gesture scripts.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black", "transparent"
/// - Hex strings `#rrggbb` and `#rrggbbaa`
pub fn name_to_color(name: &str) -> Option<Color> {
    let name = name.trim();
    if name.starts_with('#') {
        return hex_to_color(name);
    }
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "transparent" => Some(TRANSPARENT),
        _ => None,
    }
}

/// Parses `#rrggbb` or `#rrggbbaa` into a [`Color`].
pub fn hex_to_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if !digits.is_ascii() || !(digits.len() == 6 || digits.len() == 8) {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .ok()
            .map(|v| v as f64 / 255.0)
    };
    let alpha = if digits.len() == 8 { channel(6)? } else { 1.0 };
    Some(Color::new(channel(0)?, channel(2)?, channel(4)?, alpha))
}

/// Distance from `min` to `max`, clamped to `0..=i32::MAX`.
fn span(min: i32, max: i32) -> i32 {
    (i64::from(max) - i64::from(min)).clamp(0, i64::from(i32::MAX)) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_box_normalises_any_direction() {
        let origin = Point::new(50.0, 40.0);
        assert_eq!(
            drag_box(origin, Point::new(10.0, 90.0)),
            (10.0, 40.0, 40.0, 50.0)
        );
        assert_eq!(
            drag_box(origin, Point::new(80.0, 20.0)),
            (50.0, 20.0, 30.0, 20.0)
        );
    }

    #[test]
    fn covering_widens_degenerate_extents() {
        let rect = Rect::covering(10.0, 10.0, 10.0, 10.0).unwrap();
        assert_eq!(rect, Rect::new(10, 10, 1, 1).unwrap());

        let rect = Rect::covering(1.2, 2.7, 3.1, 4.0).unwrap();
        assert_eq!(rect, Rect::new(1, 2, 3, 2).unwrap());
    }

    #[test]
    fn covering_huge_bounds_saturates() {
        let rect = Rect::covering(-6.0e10, -6.0e10, 6.0e10, 6.0e10).unwrap();
        assert_eq!(f64::from(rect.x), -COORD_LIMIT);
        assert_eq!(rect.right(), COORD_LIMIT);
        assert!(rect.contains(Point::new(0.0, 0.0)));

        let edge = Rect::covering(3.0e9, 3.0e9, 3.0e9, 3.0e9).unwrap();
        assert_eq!(edge.right(), COORD_LIMIT + 1.0);
        assert_eq!(edge.width, 1);

        let grown = Rect::from_min_max(i32::MIN, 0, i32::MAX, 10)
            .unwrap()
            .inflated(4);
        assert_eq!(grown.x, i32::MIN);
        assert_eq!(grown.width, i32::MAX);
    }

    #[test]
    fn rect_contains_excludes_max_edge() {
        let rect = Rect::new(0, 0, 10, 10).unwrap();
        assert!(rect.contains(Point::new(0.0, 0.0)));
        assert!(rect.contains(Point::new(9.5, 9.5)));
        assert!(!rect.contains(Point::new(10.0, 5.0)));
    }

    #[test]
    fn name_and_hex_color_parsing() {
        assert_eq!(name_to_color("Red").unwrap(), RED);
        assert_eq!(name_to_color("transparent").unwrap(), TRANSPARENT);
        assert_eq!(name_to_color("#ff0000").unwrap(), RED);

        let translucent = name_to_color("#00000080").unwrap();
        assert!((translucent.a - 128.0 / 255.0).abs() < 1e-9);

        assert!(name_to_color("chartreuse").is_none());
        assert!(name_to_color("#12345").is_none());
        assert!(name_to_color("#gg0000").is_none());
    }

    #[test]
    fn point_distance_is_euclidean() {
        assert_eq!(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0);
    }
}
