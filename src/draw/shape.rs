//! Shape definitions for the drawing board.

use super::color::Color;
use super::font::FontDescriptor;
use super::marker::MARKER_HALF_WIDTH;
use super::style::ShapeStyle;
use crate::util::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Line height multiplier used for text layout and empty-text bounds.
const TEXT_LINE_HEIGHT: f64 = 1.16;
/// Width reserved for the caret of an empty text object.
const TEXT_CARET_WIDTH: f64 = 2.0;

/// Discriminant of [`ShapeKind`], used to key paint overrides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    Rect,
    Triangle,
    Circle,
    Ellipse,
    Line,
    Arrow,
    Text,
    Freehand,
}

/// Geometry of a shape, one variant per primitive.
///
/// Box-like shapes are positioned by their top-left corner; line-like shapes by
/// their two endpoints.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeKind {
    /// Axis-aligned rectangle
    Rect {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
    /// Isosceles triangle with its apex at the top-centre of the box
    Triangle {
        left: f64,
        top: f64,
        width: f64,
        height: f64,
    },
    /// Circle whose bounding square (side `2 * radius`) starts at left/top
    Circle { left: f64, top: f64, radius: f64 },
    /// Ellipse whose bounding box (`2 * rx` by `2 * ry`) starts at left/top
    Ellipse { left: f64, top: f64, rx: f64, ry: f64 },
    /// Straight segment
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// Segment with a directional marker at (x2, y2)
    Arrow { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// Text box anchored at its top-left corner
    Text {
        left: f64,
        top: f64,
        text: String,
        font_size: f64,
        padding: f64,
        font: FontDescriptor,
        /// Border color shown while editing
        border: Color,
        #[serde(skip)]
        editing: bool,
    },
    /// Free-hand polyline produced by the pencil brush
    Freehand { points: Vec<Point> },
}

impl ShapeKind {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ShapeKind::Rect { .. } => ShapeType::Rect,
            ShapeKind::Triangle { .. } => ShapeType::Triangle,
            ShapeKind::Circle { .. } => ShapeType::Circle,
            ShapeKind::Ellipse { .. } => ShapeType::Ellipse,
            ShapeKind::Line { .. } => ShapeType::Line,
            ShapeKind::Arrow { .. } => ShapeType::Arrow,
            ShapeKind::Text { .. } => ShapeType::Text,
            ShapeKind::Freehand { .. } => ShapeType::Freehand,
        }
    }

    /// Returns the endpoints of line-like shapes.
    pub fn endpoints(&self) -> Option<(Point, Point)> {
        match self {
            ShapeKind::Line { x1, y1, x2, y2 } | ShapeKind::Arrow { x1, y1, x2, y2 } => {
                Some((Point::new(*x1, *y1), Point::new(*x2, *y2)))
            }
            _ => None,
        }
    }
}

/// Options applied to new text objects.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOptions {
    /// Font size in canvas units
    pub font_size: f64,
    /// Padding between the text and its editing border
    pub padding: f64,
    /// Font family/weight/style
    pub font: FontDescriptor,
}

impl Default for TextOptions {
    fn default() -> Self {
        Self {
            font_size: 18.0,
            padding: 5.0,
            font: FontDescriptor::default(),
        }
    }
}

/// A drawable object: geometry, style, scale and cached bounds.
///
/// Geometry is changed through [`Shape::geometry_mut`], which marks the cached
/// bounds stale; callers then run [`Shape::set_coords`] before hit-testing.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Shape {
    kind: ShapeKind,
    style: ShapeStyle,
    #[serde(default = "unit_scale")]
    scale_x: f64,
    #[serde(default = "unit_scale")]
    scale_y: f64,
    #[serde(skip)]
    coords: Option<Rect>,
}

fn unit_scale() -> f64 {
    1.0
}

impl Shape {
    /// Creates a shape with unit scale and fresh bounds.
    pub fn new(kind: ShapeKind, style: ShapeStyle) -> Self {
        let mut shape = Self {
            kind,
            style,
            scale_x: 1.0,
            scale_y: 1.0,
            coords: None,
        };
        shape.set_coords();
        shape
    }

    pub fn rect(left: f64, top: f64, width: f64, height: f64, style: ShapeStyle) -> Self {
        Self::new(
            ShapeKind::Rect {
                left,
                top,
                width,
                height,
            },
            style,
        )
    }

    pub fn triangle(left: f64, top: f64, width: f64, height: f64, style: ShapeStyle) -> Self {
        Self::new(
            ShapeKind::Triangle {
                left,
                top,
                width,
                height,
            },
            style,
        )
    }

    pub fn circle(left: f64, top: f64, radius: f64, style: ShapeStyle) -> Self {
        Self::new(ShapeKind::Circle { left, top, radius }, style)
    }

    pub fn ellipse(left: f64, top: f64, rx: f64, ry: f64, style: ShapeStyle) -> Self {
        Self::new(ShapeKind::Ellipse { left, top, rx, ry }, style)
    }

    pub fn line(x1: f64, y1: f64, x2: f64, y2: f64, style: ShapeStyle) -> Self {
        Self::new(ShapeKind::Line { x1, y1, x2, y2 }, style)
    }

    pub fn arrow(x1: f64, y1: f64, x2: f64, y2: f64, style: ShapeStyle) -> Self {
        Self::new(ShapeKind::Arrow { x1, y1, x2, y2 }, style)
    }

    /// Creates a text object. The text is painted with the style's fill color.
    pub fn text(
        left: f64,
        top: f64,
        text: impl Into<String>,
        options: &TextOptions,
        style: ShapeStyle,
    ) -> Self {
        Self::new(
            ShapeKind::Text {
                left,
                top,
                text: text.into(),
                font_size: options.font_size,
                padding: options.padding,
                font: options.font.clone(),
                border: style.fill,
                editing: false,
            },
            style,
        )
    }

    pub fn freehand(points: Vec<Point>, style: ShapeStyle) -> Self {
        Self::new(ShapeKind::Freehand { points }, style)
    }

    pub fn geometry(&self) -> &ShapeKind {
        &self.kind
    }

    /// Mutable access to the geometry; invalidates the cached bounds.
    pub fn geometry_mut(&mut self) -> &mut ShapeKind {
        self.coords = None;
        &mut self.kind
    }

    pub fn shape_type(&self) -> ShapeType {
        self.kind.shape_type()
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn set_style(&mut self, style: ShapeStyle) {
        self.style = style;
        self.coords = None;
    }

    pub fn scale(&self) -> (f64, f64) {
        (self.scale_x, self.scale_y)
    }

    /// Sets the scale factors. Non-positive or non-finite factors are ignored.
    pub fn set_scale(&mut self, scale_x: f64, scale_y: f64) {
        if !(scale_x.is_finite() && scale_y.is_finite() && scale_x > 0.0 && scale_y > 0.0) {
            log::warn!("Ignoring invalid scale ({scale_x}, {scale_y})");
            return;
        }
        self.scale_x = scale_x;
        self.scale_y = scale_y;
        self.coords = None;
    }

    /// Cached bounds from the last [`Shape::set_coords`], `None` when stale.
    pub fn coords(&self) -> Option<Rect> {
        self.coords
    }

    /// Recalculates the cached bounds after a geometry change.
    pub fn set_coords(&mut self) {
        self.coords = self.bounding_box();
    }

    /// Returns true while a text object is in editing state.
    pub fn is_editing(&self) -> bool {
        matches!(self.kind, ShapeKind::Text { editing: true, .. })
    }

    pub fn enter_editing(&mut self) {
        if let ShapeKind::Text { editing, .. } = &mut self.kind {
            *editing = true;
        }
    }

    pub fn exit_editing(&mut self) {
        if let ShapeKind::Text { editing, .. } = &mut self.kind {
            *editing = false;
        }
    }

    pub fn text_content(&self) -> Option<&str> {
        match &self.kind {
            ShapeKind::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    /// Replaces the content of a text object; returns false for other shapes.
    pub fn set_text(&mut self, content: &str) -> bool {
        match &mut self.kind {
            ShapeKind::Text { text, .. } => {
                *text = content.to_string();
                self.coords = None;
                true
            }
            _ => false,
        }
    }

    /// Top-left anchor of the shape's local frame; scale is applied around it.
    pub fn origin(&self) -> Point {
        match &self.kind {
            ShapeKind::Rect { left, top, .. }
            | ShapeKind::Triangle { left, top, .. }
            | ShapeKind::Circle { left, top, .. }
            | ShapeKind::Ellipse { left, top, .. }
            | ShapeKind::Text { left, top, .. } => Point::new(*left, *top),
            ShapeKind::Line { x1, y1, x2, y2 } | ShapeKind::Arrow { x1, y1, x2, y2 } => {
                Point::new(x1.min(*x2), y1.min(*y2))
            }
            ShapeKind::Freehand { points } => points_extent(points)
                .map(|(min, _)| min)
                .unwrap_or_default(),
        }
    }

    /// Unscaled width and height of the geometry (stroke excluded).
    pub fn local_size(&self) -> (f64, f64) {
        match &self.kind {
            ShapeKind::Rect { width, height, .. } | ShapeKind::Triangle { width, height, .. } => {
                (*width, *height)
            }
            ShapeKind::Circle { radius, .. } => (radius * 2.0, radius * 2.0),
            ShapeKind::Ellipse { rx, ry, .. } => (rx * 2.0, ry * 2.0),
            ShapeKind::Line { x1, y1, x2, y2 } | ShapeKind::Arrow { x1, y1, x2, y2 } => {
                ((x2 - x1).abs(), (y2 - y1).abs())
            }
            ShapeKind::Text {
                text,
                font_size,
                font,
                ..
            } => measure_text(text, *font_size, font),
            ShapeKind::Freehand { points } => points_extent(points)
                .map(|(min, max)| (max.x - min.x, max.y - min.y))
                .unwrap_or((0.0, 0.0)),
        }
    }

    /// Returns the axis-aligned bounding box, expanded to cover stroke width
    /// and scale. Returns `None` only for shapes without geometry (an empty
    /// free-hand path).
    pub fn bounding_box(&self) -> Option<Rect> {
        if let ShapeKind::Freehand { points } = &self.kind {
            if points.is_empty() {
                return None;
            }
        }

        let origin = self.origin();
        let (width, height) = self.local_size();
        let half_stroke = self.style.stroke_width.max(0.0) / 2.0;
        let mut pad_x = half_stroke * self.scale_x;
        let mut pad_y = half_stroke * self.scale_y;

        if self.shape_type() == ShapeType::Arrow {
            // The marker is painted in unscaled units around the endpoint.
            let marker_pad = MARKER_HALF_WIDTH + half_stroke;
            pad_x = pad_x.max(marker_pad);
            pad_y = pad_y.max(marker_pad);
        }

        Rect::covering(
            origin.x - pad_x,
            origin.y - pad_y,
            origin.x + width * self.scale_x + pad_x,
            origin.y + height * self.scale_y + pad_y,
        )
    }

    /// Hit-tests against the cached bounds, falling back to fresh bounds when
    /// the cache is stale.
    pub fn contains_point(&self, point: Point) -> bool {
        self.coords
            .or_else(|| self.bounding_box())
            .is_some_and(|rect| rect.contains(point))
    }

    /// Moves the shape by the given offset.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        match self.geometry_mut() {
            ShapeKind::Rect { left, top, .. }
            | ShapeKind::Triangle { left, top, .. }
            | ShapeKind::Circle { left, top, .. }
            | ShapeKind::Ellipse { left, top, .. }
            | ShapeKind::Text { left, top, .. } => {
                *left += dx;
                *top += dy;
            }
            ShapeKind::Line { x1, y1, x2, y2 } | ShapeKind::Arrow { x1, y1, x2, y2 } => {
                *x1 += dx;
                *y1 += dy;
                *x2 += dx;
                *y2 += dy;
            }
            ShapeKind::Freehand { points } => {
                for point in points.iter_mut() {
                    point.x += dx;
                    point.y += dy;
                }
            }
        }
        self.set_coords();
    }
}

fn points_extent(points: &[Point]) -> Option<(Point, Point)> {
    let first = points.first()?;
    let mut min = *first;
    let mut max = *first;
    for point in &points[1..] {
        min.x = min.x.min(point.x);
        min.y = min.y.min(point.y);
        max.x = max.x.max(point.x);
        max.y = max.y.max(point.y);
    }
    Some((min, max))
}

/// Measures the laid-out size of a text object.
///
/// Empty text still occupies a caret-wide, single-line box.
pub(crate) fn measure_text(text: &str, font_size: f64, font: &FontDescriptor) -> (f64, f64) {
    let line_height = font_size * TEXT_LINE_HEIGHT;
    if text.is_empty() {
        return (TEXT_CARET_WIDTH, line_height);
    }

    // Use a tiny image surface for measurement; the layout is all we need.
    let measured = cairo::ImageSurface::create(cairo::Format::ARgb32, 1, 1)
        .ok()
        .and_then(|surface| cairo::Context::new(&surface).ok())
        .map(|ctx| {
            let layout = pangocairo::functions::create_layout(&ctx);
            let font_desc = pango::FontDescription::from_string(&font.to_pango_string(font_size));
            layout.set_font_description(Some(&font_desc));
            layout.set_text(text);
            let (_ink, logical) = layout.extents();
            let scale = pango::SCALE as f64;
            (logical.width() as f64 / scale, logical.height() as f64 / scale)
        });

    match measured {
        Some((width, height)) => (width.max(TEXT_CARET_WIDTH), height.max(line_height)),
        None => {
            let lines = text.lines().count().max(1) as f64;
            let longest = text.lines().map(|l| l.chars().count()).max().unwrap_or(0) as f64;
            (longest * font_size * 0.6, lines * line_height)
        }
    }
}
