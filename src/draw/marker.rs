//! Directional marker (arrowhead) painting.
//!
//! Arrow shapes get a fixed-size triangle at their terminal endpoint. The
//! triangle is painted in the shape's scaled local frame, so the context is
//! first un-scaled to keep the marker from stretching with the shape.
//!
//! Geometry is computed by [`marker_geometry`], a pure function of the
//! endpoints, scale and style; [`DirectionalMarker`] applies it to a context.

use super::color::Color;
use super::shape::{Shape, ShapeType};
use super::style::ShapeStyle;
use crate::util::Point;
use std::collections::HashMap;
use std::rc::Rc;

/// Marker length along the line direction.
pub const MARKER_LENGTH: f64 = 10.0;
/// Half of the marker's base width.
pub const MARKER_HALF_WIDTH: f64 = 5.0;

/// Triangle vertices in the marker frame: tip at the origin pointing along +x.
pub const VERTICES: [(f64, f64); 3] = [
    (0.0, 0.0),
    (-MARKER_LENGTH, MARKER_HALF_WIDTH),
    (-MARKER_LENGTH, -MARKER_HALF_WIDTH),
];

/// Custom paint step run after a shape's own rendering.
///
/// The context is in the shape's local frame (centred, scaled) when `paint`
/// is called.
pub trait CustomPaintable {
    fn paint(&self, ctx: &cairo::Context, shape: &Shape);
}

/// Everything needed to paint one marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerGeometry {
    /// Factors undoing the shape's scale
    pub inverse_scale: (f64, f64),
    /// Offset from the shape centre to the terminal endpoint, in unscaled units
    pub translation: (f64, f64),
    /// Direction of the line on screen, in radians
    pub angle: f64,
    pub line_width: f64,
    pub stroke: Color,
    pub fill: Color,
}

impl MarkerGeometry {
    /// Marker triangle in the compensated frame (after un-scaling, before the
    /// translation and rotation are applied to the context).
    pub fn screen_vertices(&self) -> [(f64, f64); 3] {
        let (sin, cos) = self.angle.sin_cos();
        let (tx, ty) = self.translation;
        VERTICES.map(|(x, y)| (tx + x * cos - y * sin, ty + x * sin + y * cos))
    }
}

/// Computes the marker for a segment from `start` to `end` under `scale`.
pub fn marker_geometry(
    start: Point,
    end: Point,
    scale: (f64, f64),
    style: &ShapeStyle,
) -> MarkerGeometry {
    let scale_x = sanitize_scale(scale.0);
    let scale_y = sanitize_scale(scale.1);

    let dx = (end.x - start.x) * scale_x;
    let dy = (end.y - start.y) * scale_y;

    MarkerGeometry {
        inverse_scale: (1.0 / scale_x, 1.0 / scale_y),
        translation: (dx / 2.0, dy / 2.0),
        angle: dy.atan2(dx),
        line_width: style.stroke_width,
        stroke: style.stroke,
        fill: style.fill,
    }
}

fn sanitize_scale(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        1.0
    }
}

/// Saves the context on creation and restores it when dropped.
pub struct SavedState<'a> {
    ctx: &'a cairo::Context,
}

impl<'a> SavedState<'a> {
    pub fn new(ctx: &'a cairo::Context) -> Self {
        ctx.save().ok();
        Self { ctx }
    }
}

impl Drop for SavedState<'_> {
    fn drop(&mut self) {
        self.ctx.restore().ok();
    }
}

/// Paints a marker: stroke first, then fill, on the same closed path.
pub fn paint_marker(ctx: &cairo::Context, geometry: &MarkerGeometry, opacity: f64) {
    let _saved = SavedState::new(ctx);

    ctx.scale(geometry.inverse_scale.0, geometry.inverse_scale.1);
    ctx.translate(geometry.translation.0, geometry.translation.1);
    ctx.rotate(geometry.angle);

    ctx.new_path();
    let [tip, left, right] = VERTICES;
    ctx.move_to(tip.0, tip.1);
    ctx.line_to(left.0, left.1);
    ctx.line_to(right.0, right.1);
    ctx.close_path();

    ctx.set_line_width(geometry.line_width);
    ctx.set_line_join(cairo::LineJoin::Miter);
    geometry.stroke.apply(ctx, opacity);
    let _ = ctx.stroke_preserve();
    geometry.fill.apply(ctx, opacity);
    let _ = ctx.fill();
}

/// Arrowhead painter registered for [`ShapeType::Arrow`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DirectionalMarker;

impl CustomPaintable for DirectionalMarker {
    fn paint(&self, ctx: &cairo::Context, shape: &Shape) {
        let Some((start, end)) = shape.geometry().endpoints() else {
            return;
        };
        let geometry = marker_geometry(start, end, shape.scale(), shape.style());
        paint_marker(ctx, &geometry, shape.style().opacity);
    }
}

/// Paint overrides keyed by shape type.
#[derive(Clone)]
pub struct PaintOverrides {
    painters: HashMap<ShapeType, Rc<dyn CustomPaintable>>,
}

impl PaintOverrides {
    /// Registry with no overrides at all.
    pub fn empty() -> Self {
        Self {
            painters: HashMap::new(),
        }
    }

    pub fn register(&mut self, shape_type: ShapeType, painter: Rc<dyn CustomPaintable>) {
        self.painters.insert(shape_type, painter);
    }

    pub fn unregister(&mut self, shape_type: ShapeType) -> bool {
        self.painters.remove(&shape_type).is_some()
    }

    pub fn get(&self, shape_type: ShapeType) -> Option<&dyn CustomPaintable> {
        self.painters.get(&shape_type).map(|painter| painter.as_ref())
    }
}

impl Default for PaintOverrides {
    fn default() -> Self {
        let mut overrides = Self::empty();
        overrides.register(ShapeType::Arrow, Rc::new(DirectionalMarker));
        overrides
    }
}

impl std::fmt::Debug for PaintOverrides {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaintOverrides")
            .field("types", &self.painters.keys().collect::<Vec<_>>())
            .finish()
    }
}
