//! The in-crate canvas: object list, selection, viewport and rendering.

use super::brush::Brush;
use super::events::{CanvasEvent, EventBus};
use super::host::{Cursor, HostCanvas, InteractionMode, ObjectId};
use crate::draw::marker::SavedState;
use crate::draw::render::{render_background, render_freehand_borrowed, render_selection_outline};
use crate::draw::{Color, DirtyTracker, PaintOverrides, Shape, render_shapes};
use crate::session::SceneSnapshot;
use crate::util::{Point, Rect};
use log::{debug, warn};

/// In-progress selection drag.
#[derive(Debug, Clone, Copy)]
struct TransformSession {
    id: ObjectId,
    last: Point,
    moved: bool,
}

/// Ordered collection of shapes plus the state of the surface showing them.
///
/// Object order is paint order: the first object is the bottom layer.
#[derive(Debug)]
pub struct Canvas {
    objects: Vec<(ObjectId, Shape)>,
    next_id: u64,
    active: Option<ObjectId>,
    mode: InteractionMode,
    brush: Option<Brush>,
    stroke: Vec<Point>,
    transform: Option<TransformSession>,
    cursor: Cursor,
    zoom: f64,
    pan: (f64, f64),
    background: Color,
    width: u32,
    height: u32,
    needs_redraw: bool,
    render_requests: u64,
    dirty: DirtyTracker,
    events: EventBus,
    overrides: PaintOverrides,
}

impl Canvas {
    /// Creates an empty canvas of the given surface size.
    pub fn new(width: u32, height: u32, background: Color) -> Self {
        Self {
            objects: Vec::new(),
            next_id: 1,
            active: None,
            mode: InteractionMode::Drawing,
            brush: None,
            stroke: Vec::new(),
            transform: None,
            cursor: Cursor::Default,
            zoom: 1.0,
            pan: (0.0, 0.0),
            background,
            width,
            height,
            needs_redraw: true,
            render_requests: 0,
            dirty: DirtyTracker::new(),
            events: EventBus::new(),
            overrides: PaintOverrides::default(),
        }
    }

    // ------------------------------------------------------------------
    // Objects
    // ------------------------------------------------------------------

    /// Objects in paint order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &Shape)> {
        self.objects.iter().map(|(id, shape)| (*id, shape))
    }

    pub fn get(&self, id: ObjectId) -> Option<&Shape> {
        self.objects
            .iter()
            .find(|(object_id, _)| *object_id == id)
            .map(|(_, shape)| shape)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Removes every object, emitting `ObjectRemoved` for each.
    pub fn remove_all(&mut self) {
        self.transform = None;
        self.active = None;
        for (id, _) in std::mem::take(&mut self.objects) {
            self.events.emit(&CanvasEvent::ObjectRemoved(id));
        }
        self.request_render();
    }

    /// Removes every object and resets the viewport.
    pub fn clear(&mut self) {
        self.remove_all();
        self.stroke.clear();
        self.zoom = 1.0;
        self.pan = (0.0, 0.0);
        debug!("Canvas cleared");
    }

    /// Replaces the content of a text object.
    pub fn set_text(&mut self, id: ObjectId, text: &str) -> bool {
        let Some(before) = self.get(id).and_then(Shape::coords) else {
            return self.set_text_unbounded(id, text);
        };
        self.mark_scene_rect(before);
        self.set_text_unbounded(id, text)
    }

    fn set_text_unbounded(&mut self, id: ObjectId, text: &str) -> bool {
        let Some(shape) = self.object_mut(id) else {
            return false;
        };
        if !shape.set_text(text) {
            return false;
        }
        shape.set_coords();
        let after = shape.coords();
        self.mark_scene_bounds(after);
        self.needs_redraw = true;
        self.events.emit(&CanvasEvent::ObjectModified(id));
        true
    }

    /// Moves an object by the given offset and reports the change.
    pub fn translate_object(&mut self, id: ObjectId, dx: f64, dy: f64) -> bool {
        self.modify_object(id, |shape| shape.translate(dx, dy))
    }

    /// Sets an object's scale factors and reports the change.
    pub fn scale_object(&mut self, id: ObjectId, scale_x: f64, scale_y: f64) -> bool {
        self.modify_object(id, |shape| {
            shape.set_scale(scale_x, scale_y);
            shape.set_coords();
        })
    }

    fn modify_object(&mut self, id: ObjectId, change: impl FnOnce(&mut Shape)) -> bool {
        let Some(shape) = self.object_mut(id) else {
            return false;
        };
        let before = shape.coords();
        change(shape);
        let after = shape.coords();
        self.mark_scene_bounds(before);
        self.mark_scene_bounds(after);
        self.needs_redraw = true;
        self.events.emit(&CanvasEvent::ObjectModified(id));
        true
    }

    // ------------------------------------------------------------------
    // Selection
    // ------------------------------------------------------------------

    /// Returns the topmost object whose bounds contain the scene point.
    pub fn hit_test(&self, point: Point) -> Option<ObjectId> {
        self.objects
            .iter()
            .rev()
            .find(|(_, shape)| shape.contains_point(point))
            .map(|(id, _)| *id)
    }

    /// Clears the selection, leaving text editing if it was active.
    pub fn discard_active_object(&mut self) {
        self.set_active_object(None);
    }

    /// Returns true while the active object is a text box being edited.
    pub fn is_editing_text(&self) -> bool {
        self.active
            .and_then(|id| self.get(id))
            .is_some_and(Shape::is_editing)
    }

    /// Starts a selection drag: selects the topmost object under `point`.
    pub fn begin_transform(&mut self, point: Point) {
        let hit = self.hit_test(point);
        self.set_active_object(hit);
        self.transform = hit.map(|id| TransformSession {
            id,
            last: point,
            moved: false,
        });
    }

    /// Moves the object grabbed by [`Canvas::begin_transform`].
    pub fn update_transform(&mut self, point: Point) {
        let Some(session) = self.transform else {
            return;
        };
        let dx = point.x - session.last.x;
        let dy = point.y - session.last.y;
        if dx == 0.0 && dy == 0.0 {
            return;
        }
        let Some(shape) = self.object_mut(session.id) else {
            self.transform = None;
            return;
        };
        let before = shape.coords();
        shape.translate(dx, dy);
        let after = shape.coords();
        self.mark_scene_bounds(before);
        self.mark_scene_bounds(after);
        self.needs_redraw = true;
        self.transform = Some(TransformSession {
            last: point,
            moved: true,
            ..session
        });
    }

    /// Returns true while an object grabbed by [`Canvas::begin_transform`] follows the pointer.
    pub fn is_transforming(&self) -> bool {
        self.transform.is_some()
    }

    /// Finishes a selection drag, reporting the move if anything moved.
    pub fn end_transform(&mut self) {
        if let Some(session) = self.transform.take() {
            if session.moved {
                self.events.emit(&CanvasEvent::ObjectModified(session.id));
            }
        }
    }

    // ------------------------------------------------------------------
    // Interaction mode and brushes
    // ------------------------------------------------------------------

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: InteractionMode) {
        if self.mode != mode {
            debug!("Interaction mode {:?} -> {:?}", self.mode, mode);
            self.mode = mode;
            self.stroke.clear();
            self.transform = None;
        }
    }

    pub fn brush(&self) -> Option<&Brush> {
        self.brush.as_ref()
    }

    pub fn set_brush(&mut self, brush: Option<Brush>) {
        self.brush = brush;
    }

    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Starts a brush stroke at the scene point.
    pub fn brush_down(&mut self, point: Point) {
        if self.brush.is_none() {
            return;
        }
        self.stroke.clear();
        self.stroke.push(point);
        self.needs_redraw = true;
    }

    /// Extends the current brush stroke.
    pub fn brush_move(&mut self, point: Point) {
        if self.brush.is_none() || self.stroke.is_empty() {
            return;
        }
        if let Some(last) = self.stroke.last().copied() {
            let reach = self.brush_reach();
            let segment = Rect::covering(
                last.x.min(point.x),
                last.y.min(point.y),
                last.x.max(point.x),
                last.y.max(point.y),
            )
            .map(|rect| rect.inflated(reach));
            self.mark_scene_bounds(segment);
        }
        self.stroke.push(point);
        self.needs_redraw = true;
    }

    /// Commits the current brush stroke.
    pub fn brush_up(&mut self) {
        let points = std::mem::take(&mut self.stroke);
        if points.is_empty() {
            return;
        }
        self.request_render();

        match self.brush.clone() {
            Some(Brush::Pencil(pencil)) => {
                if let Some(shape) = pencil.finish(&points) {
                    let id = self.add(shape);
                    debug!("Pencil stroke committed as {id}");
                    self.events.emit(&CanvasEvent::PathCreated(id));
                }
            }
            Some(Brush::Eraser(eraser)) => {
                let doomed: Vec<ObjectId> = self
                    .objects
                    .iter()
                    .filter(|(_, shape)| eraser.hits(shape, &points))
                    .map(|(id, _)| *id)
                    .collect();
                for id in doomed {
                    self.remove(id);
                }
            }
            None => {}
        }
    }

    fn brush_reach(&self) -> i32 {
        let width = match &self.brush {
            Some(Brush::Pencil(pencil)) => pencil.style.stroke_width,
            Some(Brush::Eraser(eraser)) => eraser.width,
            None => 0.0,
        };
        (width / 2.0).ceil() as i32 + 1
    }

    // ------------------------------------------------------------------
    // Viewport
    // ------------------------------------------------------------------

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn pan(&self) -> (f64, f64) {
        self.pan
    }

    /// Sets the zoom level keeping the screen point `point` fixed.
    pub fn zoom_to_point(&mut self, point: Point, zoom: f64) {
        if !zoom.is_finite() || zoom <= 0.0 {
            warn!("Ignoring invalid zoom ratio {zoom}");
            return;
        }
        let anchor = self.to_scene(point);
        self.zoom = zoom;
        self.pan = (point.x - anchor.x * zoom, point.y - anchor.y * zoom);
        debug!("Zoom set to {zoom:.3}");
        self.request_render();
    }

    /// Sets the zoom level around the centre of the surface.
    pub fn zoom_centered(&mut self, zoom: f64) {
        let center = Point::new(self.width as f64 / 2.0, self.height as f64 / 2.0);
        self.zoom_to_point(center, zoom);
    }

    /// Restores zoom 1.0 with no panning.
    pub fn reset_viewport(&mut self) {
        self.zoom = 1.0;
        self.pan = (0.0, 0.0);
        self.request_render();
    }

    /// Converts a screen point to scene coordinates.
    pub fn to_scene(&self, point: Point) -> Point {
        Point::new(
            (point.x - self.pan.0) / self.zoom,
            (point.y - self.pan.1) / self.zoom,
        )
    }

    /// Converts a scene point to screen coordinates.
    pub fn to_screen(&self, point: Point) -> Point {
        Point::new(
            point.x * self.zoom + self.pan.0,
            point.y * self.zoom + self.pan.1,
        )
    }

    // ------------------------------------------------------------------
    // Surface
    // ------------------------------------------------------------------

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn set_background(&mut self, color: Color) {
        self.background = color;
        self.request_render();
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.request_render();
    }

    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Number of repaint requests received so far.
    pub fn render_requests(&self) -> u64 {
        self.render_requests
    }

    /// Drains pending dirty rectangles (screen space) for the current size.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        let width = self.width.min(i32::MAX as u32) as i32;
        let height = self.height.min(i32::MAX as u32) as i32;
        self.dirty.take_regions(width, height)
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    pub fn paint_overrides(&self) -> &PaintOverrides {
        &self.overrides
    }

    pub fn paint_overrides_mut(&mut self) -> &mut PaintOverrides {
        &mut self.overrides
    }

    fn mark_scene_bounds(&mut self, rect: Option<Rect>) {
        if let Some(rect) = rect {
            self.mark_scene_rect(rect);
        }
    }

    fn mark_scene_rect(&mut self, rect: Rect) {
        let min = self.to_screen(Point::new(f64::from(rect.x), f64::from(rect.y)));
        let max = self.to_screen(Point::new(rect.right(), rect.bottom()));
        self.dirty
            .mark_bounds(Rect::covering(min.x, min.y, max.x, max.y));
    }

    // ------------------------------------------------------------------
    // Rendering
    // ------------------------------------------------------------------

    /// Paints the whole scene and emits `AfterRender`.
    pub fn render(&mut self, ctx: &cairo::Context) {
        render_background(ctx, self.background);
        {
            let _viewport = SavedState::new(ctx);
            ctx.translate(self.pan.0, self.pan.1);
            ctx.scale(self.zoom, self.zoom);

            render_shapes(
                ctx,
                self.objects.iter().map(|(_, shape)| shape),
                &self.overrides,
            );

            if let Some(brush) = &self.brush {
                if !self.stroke.is_empty() {
                    render_freehand_borrowed(ctx, &self.stroke, &brush.preview_style());
                }
            }

            if let Some(shape) = self.active.and_then(|id| self.get(id)) {
                if !shape.is_editing() {
                    if let Some(bounds) = shape.coords().or_else(|| shape.bounding_box()) {
                        render_selection_outline(ctx, bounds, self.zoom);
                    }
                }
            }
        }
        self.needs_redraw = false;
        self.events.emit(&CanvasEvent::AfterRender);
    }

    // ------------------------------------------------------------------
    // Snapshots
    // ------------------------------------------------------------------

    /// Captures the objects, background and viewport.
    pub fn snapshot(&self) -> SceneSnapshot {
        SceneSnapshot {
            background: self.background,
            zoom: self.zoom,
            pan: self.pan,
            objects: self.objects.iter().map(|(_, shape)| shape.clone()).collect(),
        }
    }

    /// Replaces the scene with a snapshot. Objects receive fresh ids.
    pub fn restore(&mut self, snapshot: SceneSnapshot) {
        self.remove_all();
        self.background = snapshot.background;
        if snapshot.zoom.is_finite() && snapshot.zoom > 0.0 {
            self.zoom = snapshot.zoom;
            self.pan = snapshot.pan;
        } else {
            warn!("Snapshot zoom {} is invalid; keeping 1.0", snapshot.zoom);
            self.zoom = 1.0;
            self.pan = (0.0, 0.0);
        }
        for mut shape in snapshot.objects {
            shape.exit_editing();
            shape.set_coords();
            self.add(shape);
        }
        self.request_render();
    }
}

impl HostCanvas for Canvas {
    fn add(&mut self, shape: Shape) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.mark_scene_bounds(shape.coords().or_else(|| shape.bounding_box()));
        self.objects.push((id, shape));
        self.needs_redraw = true;
        self.events.emit(&CanvasEvent::ObjectAdded(id));
        id
    }

    fn remove(&mut self, id: ObjectId) -> Option<Shape> {
        let index = self.objects.iter().position(|(object_id, _)| *object_id == id)?;
        let (_, shape) = self.objects.remove(index);
        if self.active == Some(id) {
            self.active = None;
        }
        if self.transform.is_some_and(|session| session.id == id) {
            self.transform = None;
        }
        self.mark_scene_bounds(shape.coords().or_else(|| shape.bounding_box()));
        self.needs_redraw = true;
        self.events.emit(&CanvasEvent::ObjectRemoved(id));
        Some(shape)
    }

    fn object_mut(&mut self, id: ObjectId) -> Option<&mut Shape> {
        self.objects
            .iter_mut()
            .find(|(object_id, _)| *object_id == id)
            .map(|(_, shape)| shape)
    }

    fn active_object(&self) -> Option<ObjectId> {
        self.active
    }

    fn set_active_object(&mut self, id: Option<ObjectId>) {
        let id = id.filter(|id| self.get(*id).is_some());
        if self.active == id {
            return;
        }
        if let Some(previous) = self.active {
            if let Some(shape) = self.object_mut(previous) {
                shape.exit_editing();
            }
        }
        self.active = id;
        self.needs_redraw = true;
        self.dirty.mark_full();
    }

    fn request_render(&mut self) {
        self.needs_redraw = true;
        self.render_requests += 1;
        self.dirty.mark_full();
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.cursor = cursor;
    }

    fn gesture_completed(&mut self) {
        self.events.emit(&CanvasEvent::GestureCompleted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::brush::{EraserBrush, PencilBrush};
    use crate::draw::color::WHITE;
    use crate::draw::{ShapeKind, ShapeStyle};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn canvas() -> Canvas {
        Canvas::new(200, 100, WHITE)
    }

    fn record(canvas: &Canvas) -> Rc<RefCell<Vec<CanvasEvent>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        canvas
            .events()
            .subscribe(move |event| sink.borrow_mut().push(*event));
        seen
    }

    #[test]
    fn ids_increase_and_events_fire() {
        let mut canvas = canvas();
        let seen = record(&canvas);
        let a = canvas.add(Shape::rect(0.0, 0.0, 5.0, 5.0, ShapeStyle::default()));
        let b = canvas.add(Shape::rect(1.0, 1.0, 5.0, 5.0, ShapeStyle::default()));
        assert!(b > a);
        assert!(canvas.remove(a).is_some());
        assert!(canvas.remove(a).is_none());
        assert_eq!(
            *seen.borrow(),
            vec![
                CanvasEvent::ObjectAdded(a),
                CanvasEvent::ObjectAdded(b),
                CanvasEvent::ObjectRemoved(a)
            ]
        );
    }

    #[test]
    fn hit_test_prefers_topmost() {
        let mut canvas = canvas();
        let bottom = canvas.add(Shape::rect(0.0, 0.0, 50.0, 50.0, ShapeStyle::default()));
        let top = canvas.add(Shape::rect(10.0, 10.0, 10.0, 10.0, ShapeStyle::default()));
        assert_eq!(canvas.hit_test(Point::new(15.0, 15.0)), Some(top));
        assert_eq!(canvas.hit_test(Point::new(40.0, 40.0)), Some(bottom));
        assert_eq!(canvas.hit_test(Point::new(150.0, 90.0)), None);
    }

    #[test]
    fn transform_moves_selected_object() {
        let mut canvas = canvas();
        let seen = record(&canvas);
        let id = canvas.add(Shape::rect(0.0, 0.0, 20.0, 20.0, ShapeStyle::default()));
        canvas.begin_transform(Point::new(5.0, 5.0));
        assert_eq!(canvas.active_object(), Some(id));
        canvas.update_transform(Point::new(15.0, 25.0));
        canvas.end_transform();

        assert_eq!(
            canvas.get(id).unwrap().geometry(),
            &ShapeKind::Rect {
                left: 10.0,
                top: 20.0,
                width: 20.0,
                height: 20.0
            }
        );
        assert_eq!(seen.borrow().last(), Some(&CanvasEvent::ObjectModified(id)));

        canvas.begin_transform(Point::new(190.0, 90.0));
        assert_eq!(canvas.active_object(), None);
    }

    #[test]
    fn zoom_to_point_keeps_anchor_fixed() {
        let mut canvas = canvas();
        let anchor = Point::new(50.0, 40.0);
        let before = canvas.to_scene(anchor);
        canvas.zoom_to_point(anchor, 2.0);
        let after = canvas.to_scene(anchor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
        assert_eq!(canvas.zoom(), 2.0);

        canvas.zoom_to_point(anchor, 0.0);
        canvas.zoom_to_point(anchor, f64::NAN);
        assert_eq!(canvas.zoom(), 2.0);
    }

    #[test]
    fn zoom_centered_uses_surface_centre() {
        let mut canvas = canvas();
        canvas.zoom_centered(2.0);
        let centre = canvas.to_scene(Point::new(100.0, 50.0));
        assert!((centre.x - 100.0).abs() < 1e-9);
        assert!((centre.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn pencil_stroke_becomes_path() {
        let mut canvas = canvas();
        let seen = record(&canvas);
        canvas.set_mode(InteractionMode::FreeDrawing);
        canvas.set_brush(Some(Brush::Pencil(PencilBrush::new(ShapeStyle::default()))));
        canvas.brush_down(Point::new(10.0, 10.0));
        canvas.brush_move(Point::new(20.0, 20.0));
        canvas.brush_up();

        assert_eq!(canvas.len(), 1);
        let (id, _) = canvas.objects().next().unwrap();
        assert!(seen.borrow().contains(&CanvasEvent::PathCreated(id)));
    }

    #[test]
    fn single_point_stroke_adds_nothing() {
        let mut canvas = canvas();
        canvas.set_brush(Some(Brush::Pencil(PencilBrush::new(ShapeStyle::default()))));
        canvas.brush_down(Point::new(10.0, 10.0));
        canvas.brush_up();
        assert!(canvas.is_empty());
    }

    #[test]
    fn eraser_removes_touched_objects() {
        let mut canvas = canvas();
        let near = canvas.add(Shape::rect(0.0, 0.0, 10.0, 10.0, ShapeStyle::default()));
        let far = canvas.add(Shape::rect(100.0, 50.0, 10.0, 10.0, ShapeStyle::default()));
        canvas.set_brush(Some(Brush::Eraser(EraserBrush::default())));
        canvas.brush_down(Point::new(5.0, 5.0));
        canvas.brush_move(Point::new(6.0, 6.0));
        canvas.brush_up();
        assert!(canvas.get(near).is_none());
        assert!(canvas.get(far).is_some());
    }

    #[test]
    fn request_render_marks_full_damage() {
        let mut canvas = canvas();
        canvas.take_dirty_regions();
        canvas.request_render();
        assert_eq!(canvas.render_requests(), 1);
        assert_eq!(
            canvas.take_dirty_regions(),
            vec![Rect::new(0, 0, 200, 100).unwrap()]
        );
    }

    #[test]
    fn adding_marks_screen_bounds() {
        let mut canvas = canvas();
        canvas.take_dirty_regions();
        canvas.zoom_to_point(Point::new(0.0, 0.0), 2.0);
        canvas.take_dirty_regions();
        canvas.add(Shape::rect(10.0, 10.0, 10.0, 10.0, ShapeStyle {
            stroke_width: 0.0,
            ..ShapeStyle::default()
        }));
        assert_eq!(
            canvas.take_dirty_regions(),
            vec![Rect::new(20, 20, 20, 20).unwrap()]
        );
    }

    #[test]
    fn discarding_selection_leaves_text_editing() {
        let mut canvas = canvas();
        let mut text = Shape::text(0.0, 0.0, "", &Default::default(), ShapeStyle::default());
        text.enter_editing();
        let id = canvas.add(text);
        canvas.set_active_object(Some(id));
        assert!(canvas.is_editing_text());
        canvas.discard_active_object();
        assert!(!canvas.get(id).unwrap().is_editing());
        assert!(!canvas.is_editing_text());
    }

    #[test]
    fn render_emits_after_render() {
        let mut canvas = canvas();
        let seen = record(&canvas);
        canvas.add(Shape::arrow(10.0, 10.0, 90.0, 50.0, ShapeStyle::default()));
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, 200, 100).unwrap();
        let ctx = cairo::Context::new(&surface).unwrap();
        canvas.render(&ctx);
        assert!(!canvas.needs_redraw());
        assert_eq!(seen.borrow().last(), Some(&CanvasEvent::AfterRender));
    }

    #[test]
    fn snapshot_round_trip_restores_objects() {
        let mut canvas = canvas();
        canvas.add(Shape::circle(5.0, 5.0, 10.0, ShapeStyle::default()));
        canvas.zoom_centered(1.5);
        let snapshot = canvas.snapshot();

        let mut other = Canvas::new(200, 100, WHITE);
        other.restore(snapshot);
        assert_eq!(other.len(), 1);
        assert_eq!(other.zoom(), 1.5);
        let (_, shape) = other.objects().next().unwrap();
        assert!(shape.coords().is_some());
    }
}
