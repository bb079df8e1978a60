//! Free-drawing brushes: the pencil and the eraser.

use crate::draw::color::TRANSPARENT;
use crate::draw::{Color, Shape, ShapeStyle};
use crate::util::{Point, Rect};

/// Default eraser width in canvas units.
pub const DEFAULT_ERASER_WIDTH: f64 = 10.0;

/// Brush used while the canvas is in free-drawing mode.
#[derive(Debug, Clone, PartialEq)]
pub enum Brush {
    Pencil(PencilBrush),
    Eraser(EraserBrush),
}

impl Brush {
    /// Style used to preview the stroke while it is being drawn.
    pub fn preview_style(&self) -> ShapeStyle {
        match self {
            Brush::Pencil(pencil) => pencil.stroke_style(),
            Brush::Eraser(eraser) => ShapeStyle {
                stroke: Color::new(0.5, 0.5, 0.5, 0.4),
                stroke_width: eraser.width,
                fill: TRANSPARENT,
                opacity: 1.0,
                erasable: false,
            },
        }
    }
}

/// Pencil: commits the stroke as a free-hand shape.
#[derive(Debug, Clone, PartialEq)]
pub struct PencilBrush {
    /// Width, color and erasable flag come from the current style
    pub style: ShapeStyle,
}

impl PencilBrush {
    pub fn new(style: ShapeStyle) -> Self {
        Self { style }
    }

    fn stroke_style(&self) -> ShapeStyle {
        ShapeStyle {
            fill: TRANSPARENT,
            ..self.style
        }
    }

    /// Builds the free-hand shape for a finished stroke.
    ///
    /// Consecutive duplicates are dropped; fewer than two distinct points
    /// produce nothing.
    pub fn finish(&self, points: &[Point]) -> Option<Shape> {
        let mut path: Vec<Point> = Vec::with_capacity(points.len());
        for point in points {
            if path.last() != Some(point) {
                path.push(*point);
            }
        }
        if path.len() < 2 {
            return None;
        }
        Some(Shape::freehand(path, self.stroke_style()))
    }
}

/// Eraser: removes erasable objects touched by the stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EraserBrush {
    pub width: f64,
}

impl Default for EraserBrush {
    fn default() -> Self {
        Self {
            width: DEFAULT_ERASER_WIDTH,
        }
    }
}

impl EraserBrush {
    pub fn new(width: f64) -> Self {
        Self { width }
    }

    /// Returns true if the stroke passes within half the eraser width of the
    /// shape's bounds and the shape may be erased.
    ///
    /// Every segment between consecutive stroke points is checked, so a fast
    /// stroke that jumps across a small shape still erases it.
    pub fn hits(&self, shape: &Shape, points: &[Point]) -> bool {
        if !shape.style().erasable {
            return false;
        }
        let Some(bounds) = shape.coords().or_else(|| shape.bounding_box()) else {
            return false;
        };
        let reach = self.width.max(0.0) / 2.0;
        match points {
            [] => false,
            [point] => distance_to_rect(*point, bounds) <= reach,
            _ => points
                .windows(2)
                .any(|pair| segment_distance_to_rect(pair[0], pair[1], bounds) <= reach),
        }
    }
}

fn distance_to_rect(point: Point, rect: Rect) -> f64 {
    let dx = (f64::from(rect.x) - point.x)
        .max(0.0)
        .max(point.x - rect.right());
    let dy = (f64::from(rect.y) - point.y)
        .max(0.0)
        .max(point.y - rect.bottom());
    dx.hypot(dy)
}

/// Shortest distance between the segment `a..b` and the rectangle.
fn segment_distance_to_rect(a: Point, b: Point, rect: Rect) -> f64 {
    if segment_crosses_rect(a, b, rect) {
        return 0.0;
    }
    let min = Point::new(f64::from(rect.x), f64::from(rect.y));
    let max = Point::new(rect.right(), rect.bottom());
    let corners = [
        min,
        Point::new(max.x, min.y),
        max,
        Point::new(min.x, max.y),
    ];
    let from_corners = corners
        .iter()
        .map(|corner| distance_to_segment(*corner, a, b))
        .fold(f64::INFINITY, f64::min);
    from_corners
        .min(distance_to_rect(a, rect))
        .min(distance_to_rect(b, rect))
}

/// Liang-Barsky clip: true if any part of `a..b` lies inside the rectangle.
fn segment_crosses_rect(a: Point, b: Point, rect: Rect) -> bool {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    let edges = [
        (-dx, a.x - f64::from(rect.x)),
        (dx, rect.right() - a.x),
        (-dy, a.y - f64::from(rect.y)),
        (dy, rect.bottom() - a.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            if q < 0.0 {
                return false;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return false;
        }
    }
    true
}

fn distance_to_segment(point: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let length_sq = dx * dx + dy * dy;
    if length_sq == 0.0 {
        return point.distance(a);
    }
    let t = (((point.x - a.x) * dx + (point.y - a.y) * dy) / length_sq).clamp(0.0, 1.0);
    point.distance(Point::new(a.x + t * dx, a.y + t * dy))
}
