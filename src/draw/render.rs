//! Cairo-based rendering functions for shapes.

use super::color::Color;
use super::font::FontDescriptor;
use super::marker::{PaintOverrides, SavedState};
use super::shape::{Shape, ShapeKind};
use super::style::ShapeStyle;
use crate::util::{Point, Rect};
use std::f64::consts::PI;

/// Fills the whole surface with the canvas background.
///
/// Transparent backgrounds clear the surface instead.
pub fn render_background(ctx: &cairo::Context, color: Color) {
    let _saved = SavedState::new(ctx);
    if color.is_transparent() {
        ctx.set_operator(cairo::Operator::Clear);
    } else {
        ctx.set_source_rgba(color.r, color.g, color.b, color.a);
    }
    let _ = ctx.paint();
}

/// Renders shapes in order (first shape = bottom layer).
pub fn render_shapes<'a>(
    ctx: &cairo::Context,
    shapes: impl IntoIterator<Item = &'a Shape>,
    overrides: &PaintOverrides,
) {
    for shape in shapes {
        render_shape(ctx, shape, overrides);
    }
}

/// Renders a single shape, then any paint override registered for its type.
///
/// The shape is drawn in its local frame: translated to its origin and scaled.
/// Line-like shapes additionally move to the segment midpoint, which is the
/// frame overrides receive for them.
pub fn render_shape(ctx: &cairo::Context, shape: &Shape, overrides: &PaintOverrides) {
    let _saved = SavedState::new(ctx);
    let origin = shape.origin();
    let (scale_x, scale_y) = shape.scale();
    ctx.translate(origin.x, origin.y);
    ctx.scale(scale_x, scale_y);

    let style = shape.style();
    match shape.geometry() {
        ShapeKind::Rect { width, height, .. } => {
            ctx.rectangle(0.0, 0.0, *width, *height);
            paint_path(ctx, style);
        }
        ShapeKind::Triangle { width, height, .. } => {
            ctx.move_to(width / 2.0, 0.0);
            ctx.line_to(*width, *height);
            ctx.line_to(0.0, *height);
            ctx.close_path();
            paint_path(ctx, style);
        }
        ShapeKind::Circle { radius, .. } => {
            ctx.new_sub_path();
            ctx.arc(*radius, *radius, *radius, 0.0, 2.0 * PI);
            paint_path(ctx, style);
        }
        ShapeKind::Ellipse { rx, ry, .. } => {
            if *rx > 0.0 && *ry > 0.0 {
                {
                    let _unit = SavedState::new(ctx);
                    ctx.translate(*rx, *ry);
                    ctx.scale(*rx, *ry);
                    ctx.new_sub_path();
                    ctx.arc(0.0, 0.0, 1.0, 0.0, 2.0 * PI);
                }
                paint_path(ctx, style);
            }
        }
        ShapeKind::Line { x1, y1, x2, y2 } | ShapeKind::Arrow { x1, y1, x2, y2 } => {
            let dx = x2 - x1;
            let dy = y2 - y1;
            ctx.translate(dx.abs() / 2.0, dy.abs() / 2.0);
            ctx.move_to(-dx / 2.0, -dy / 2.0);
            ctx.line_to(dx / 2.0, dy / 2.0);
            ctx.set_line_cap(cairo::LineCap::Butt);
            stroke_path(ctx, style);
        }
        ShapeKind::Text {
            text,
            font_size,
            padding,
            font,
            border,
            editing,
            ..
        } => {
            render_text(ctx, text, *font_size, font, style);
            if *editing {
                let (width, height) = shape.local_size();
                render_editing_border(ctx, width, height, *padding, *border);
            }
        }
        ShapeKind::Freehand { points } => {
            let local: Vec<Point> = points
                .iter()
                .map(|p| Point::new(p.x - origin.x, p.y - origin.y))
                .collect();
            render_freehand_borrowed(ctx, &local, style);
        }
    }

    if let Some(painter) = overrides.get(shape.shape_type()) {
        painter.paint(ctx, shape);
    }
}

/// Fills (when the fill is visible) and then strokes the current path.
fn paint_path(ctx: &cairo::Context, style: &ShapeStyle) {
    if !style.fill.is_transparent() {
        style.fill.apply(ctx, style.opacity);
        let _ = ctx.fill_preserve();
    }
    stroke_path(ctx, style);
}

fn stroke_path(ctx: &cairo::Context, style: &ShapeStyle) {
    if style.stroke_width > 0.0 && !style.stroke.is_transparent() {
        style.stroke.apply(ctx, style.opacity);
        ctx.set_line_width(style.stroke_width);
        ctx.set_line_join(cairo::LineJoin::Miter);
        let _ = ctx.stroke();
    } else {
        ctx.new_path();
    }
}

/// Render a free-hand stroke (round-capped polyline through points).
///
/// Takes a borrowed slice so the live brush preview can render without
/// cloning its point buffer.
pub fn render_freehand_borrowed(ctx: &cairo::Context, points: &[Point], style: &ShapeStyle) {
    let Some(first) = points.first() else {
        return;
    };

    style.stroke.apply(ctx, style.opacity);
    ctx.set_line_width(style.stroke_width);
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(first.x, first.y);
    if points.len() == 1 {
        // A single point still leaves a dot with round caps.
        ctx.line_to(first.x, first.y);
    }
    for point in &points[1..] {
        ctx.line_to(point.x, point.y);
    }

    let _ = ctx.stroke();
}

/// Renders text with Pango at the local origin using the style's fill color.
pub fn render_text(
    ctx: &cairo::Context,
    text: &str,
    font_size: f64,
    font: &FontDescriptor,
    style: &ShapeStyle,
) {
    if text.is_empty() || style.fill.is_transparent() {
        return;
    }

    let _saved = SavedState::new(ctx);
    ctx.set_antialias(cairo::Antialias::Best);

    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = pango::FontDescription::from_string(&font.to_pango_string(font_size));
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);

    style.fill.apply(ctx, style.opacity);
    ctx.move_to(0.0, 0.0);
    pangocairo::functions::show_layout(ctx, &layout);
}

fn render_editing_border(ctx: &cairo::Context, width: f64, height: f64, padding: f64, color: Color) {
    ctx.rectangle(
        -padding,
        -padding,
        width + padding * 2.0,
        height + padding * 2.0,
    );
    color.apply(ctx, 1.0);
    ctx.set_line_width(1.0);
    let _ = ctx.stroke();
}

/// Dashed outline drawn around the active object.
///
/// `zoom` keeps the outline one device pixel wide under the viewport transform.
pub fn render_selection_outline(ctx: &cairo::Context, rect: Rect, zoom: f64) {
    let _saved = SavedState::new(ctx);
    let width = 1.0 / zoom.max(f64::EPSILON);
    ctx.set_source_rgba(0.2, 0.5, 1.0, 0.9);
    ctx.set_line_width(width);
    ctx.set_dash(&[4.0 * width, 3.0 * width], 0.0);
    ctx.rectangle(
        rect.x as f64,
        rect.y as f64,
        rect.width as f64,
        rect.height as f64,
    );
    let _ = ctx.stroke();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED, TRANSPARENT, WHITE};

    fn surface(width: i32, height: i32) -> (cairo::ImageSurface, cairo::Context) {
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        (surface, ctx)
    }

    /// Returns (a, r, g, b) of a pixel; ARGB32 is stored as native-endian u32.
    fn pixel(surface: &mut cairo::ImageSurface, x: usize, y: usize) -> (u8, u8, u8, u8) {
        surface.flush();
        let stride = surface.stride() as usize;
        let data = surface.data().unwrap();
        let offset = y * stride + x * 4;
        let value = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        (
            (value >> 24) as u8,
            (value >> 16) as u8,
            (value >> 8) as u8,
            value as u8,
        )
    }

    fn style(stroke: Color, fill: Color, width: f64) -> ShapeStyle {
        ShapeStyle {
            stroke,
            fill,
            stroke_width: width,
            ..ShapeStyle::default()
        }
    }

    #[test]
    fn background_fills_surface() {
        let (mut surface, ctx) = surface(8, 8);
        render_background(&ctx, WHITE);
        drop(ctx);
        assert_eq!(pixel(&mut surface, 4, 4), (255, 255, 255, 255));
    }

    #[test]
    fn filled_rect_paints_interior() {
        let (mut surface, ctx) = surface(40, 40);
        let shape = Shape::rect(10.0, 10.0, 20.0, 20.0, style(RED, BLUE, 2.0));
        render_shape(&ctx, &shape, &PaintOverrides::default());
        drop(ctx);
        assert_eq!(pixel(&mut surface, 20, 20), (255, 0, 0, 255));
        assert_eq!(pixel(&mut surface, 10, 20), (255, 255, 0, 0));
        assert_eq!(pixel(&mut surface, 2, 2).0, 0);
    }

    #[test]
    fn scale_stretches_from_origin() {
        let (mut surface, ctx) = surface(60, 20);
        let mut shape = Shape::rect(0.0, 0.0, 10.0, 10.0, style(TRANSPARENT, BLUE, 0.0));
        shape.set_scale(4.0, 1.0);
        render_shape(&ctx, &shape, &PaintOverrides::default());
        drop(ctx);
        assert_eq!(pixel(&mut surface, 35, 5), (255, 0, 0, 255));
        assert_eq!(pixel(&mut surface, 45, 5).0, 0);
    }

    #[test]
    fn arrow_marker_is_filled_near_endpoint() {
        let (mut surface, ctx) = surface(120, 40);
        let shape = Shape::arrow(10.0, 20.0, 110.0, 20.0, style(RED, BLUE, 1.0));
        render_shape(&ctx, &shape, &PaintOverrides::default());
        drop(ctx);
        // Inside the triangle, off the line itself.
        assert_eq!(pixel(&mut surface, 103, 21), (255, 0, 0, 255));
        // Beyond the tip nothing is painted.
        assert_eq!(pixel(&mut surface, 115, 20).0, 0);
    }

    #[test]
    fn arrow_without_override_has_no_marker() {
        let (mut surface, ctx) = surface(120, 40);
        let shape = Shape::arrow(10.0, 20.0, 110.0, 20.0, style(RED, BLUE, 1.0));
        render_shape(&ctx, &shape, &PaintOverrides::empty());
        drop(ctx);
        assert_eq!(pixel(&mut surface, 103, 21).0, 0);
    }

    #[test]
    fn zero_size_ellipse_is_skipped_without_error() {
        let (_surface, ctx) = surface(10, 10);
        let shape = Shape::ellipse(5.0, 5.0, 0.0, 0.0, style(RED, TRANSPARENT, 2.0));
        render_shape(&ctx, &shape, &PaintOverrides::default());
        assert!(ctx.status().is_ok());
    }

    #[test]
    fn freehand_draws_polyline() {
        let (mut surface, ctx) = surface(30, 30);
        let points = vec![Point::new(5.0, 15.0), Point::new(25.0, 15.0)];
        let shape = Shape::freehand(points, style(RED, TRANSPARENT, 4.0));
        render_shape(&ctx, &shape, &PaintOverrides::default());
        drop(ctx);
        assert_eq!(pixel(&mut surface, 15, 15), (255, 255, 0, 0));
    }
}
