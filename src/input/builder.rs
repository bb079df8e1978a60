//! Drag-to-shape builder.
//!
//! Turns one pointer gesture (press, moves, release) into exactly one shape
//! registered on a [`HostCanvas`]. The shape is created at zero size on press
//! and resized on every move; release only ends the session.

use crate::canvas::{Cursor, HostCanvas, ObjectId};
use crate::draw::color::TRANSPARENT;
use crate::draw::{Shape, ShapeKind, ShapeStyle, TextOptions};
use crate::input::Tool;
use crate::util::{Point, drag_box};
use log::{debug, trace};

/// State of the gesture currently being tracked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer position at gesture start
    pub origin: Point,
    /// Tool active when the gesture started
    pub tool: Tool,
    /// Shape being resized, if the tool pre-created one
    pub active: Option<ObjectId>,
}

/// Drag-to-shape state machine. Holds at most one [`DragSession`].
#[derive(Debug, Default)]
pub struct DragShapeBuilder {
    session: Option<DragSession>,
}

impl DragShapeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Returns true while a gesture is in progress.
    pub fn in_progress(&self) -> bool {
        self.session.is_some()
    }

    /// Starts a gesture at `pointer`.
    ///
    /// Does nothing while the host reports a selected object. Shape tools
    /// register a zero-size shape at the pointer; text boxes are additionally
    /// selected and put into editing state.
    pub fn on_gesture_start<H: HostCanvas + ?Sized>(
        &mut self,
        host: &mut H,
        pointer: Point,
        tool: Tool,
        style: ShapeStyle,
        text: &TextOptions,
    ) {
        if host.active_object().is_some() {
            trace!("Gesture start ignored: an object is selected");
            return;
        }
        if self.session.is_some() {
            self.on_gesture_end(host);
        }

        let active = initial_shape(tool, pointer, style, text).map(|shape| {
            let is_text = shape.shape_type() == crate::draw::ShapeType::Text;
            let id = host.add(shape);
            if is_text {
                host.set_active_object(Some(id));
                if let Some(shape) = host.object_mut(id) {
                    shape.enter_editing();
                }
                host.set_cursor(Cursor::Text);
                host.request_render();
            }
            id
        });

        debug!(
            "Gesture started with {tool} at ({:.1}, {:.1}){}",
            pointer.x,
            pointer.y,
            active.map(|id| format!(", shape {id}")).unwrap_or_default()
        );
        self.session = Some(DragSession {
            origin: pointer,
            tool,
            active,
        });
    }

    /// Resizes the active shape to follow `pointer` and repaints.
    pub fn on_gesture_update<H: HostCanvas + ?Sized>(&mut self, host: &mut H, pointer: Point) {
        let Some(DragSession {
            origin,
            active: Some(id),
            ..
        }) = self.session
        else {
            return;
        };
        let Some(shape) = host.object_mut(id) else {
            return;
        };

        resize_to_pointer(shape, origin, pointer);
        shape.set_coords();
        trace!("Shape {id} follows pointer to ({:.1}, {:.1})", pointer.x, pointer.y);
        host.request_render();
    }

    /// Ends the gesture. The session is cleared whether or not the pointer moved.
    pub fn on_gesture_end<H: HostCanvas + ?Sized>(&mut self, host: &mut H) {
        if let Some(session) = self.session.take() {
            debug!("Gesture with {} finished", session.tool);
        }
        host.gesture_completed();
    }

    /// Abandons an in-progress gesture as if the pointer had been released.
    pub fn abort<H: HostCanvas + ?Sized>(&mut self, host: &mut H) {
        if self.session.is_some() {
            self.on_gesture_end(host);
        }
    }
}

/// Zero-size shape a tool creates at gesture start, `None` for brush-like tools.
pub fn initial_shape(
    tool: Tool,
    origin: Point,
    style: ShapeStyle,
    text: &TextOptions,
) -> Option<Shape> {
    let Point { x, y } = origin;
    let shape = match tool {
        Tool::Rectangle => Shape::rect(x, y, 0.0, 0.0, style),
        Tool::Triangle => Shape::triangle(x, y, 0.0, 0.0, style),
        Tool::Circle => Shape::circle(x, y, 0.0, style),
        Tool::Ellipse => Shape::ellipse(x, y, 0.0, 0.0, style),
        Tool::Line => Shape::line(x, y, x, y, style),
        Tool::Arrow => Shape::arrow(x, y, x, y, style),
        Tool::Text => Shape::text(x, y, "", text, text_style(style)),
        Tool::FreeHand | Tool::Select | Tool::Erase | Tool::None => return None,
    };
    Some(shape)
}

/// Text is painted fully opaque with the stroke color as its fill and has no outline.
pub fn text_style(style: ShapeStyle) -> ShapeStyle {
    ShapeStyle {
        stroke: TRANSPARENT,
        stroke_width: 0.0,
        fill: style.stroke,
        opacity: 1.0,
        erasable: style.erasable,
    }
}

/// Applies the drag geometry for `origin`..`pointer` to the shape.
fn resize_to_pointer(shape: &mut Shape, origin: Point, pointer: Point) {
    let (min_x, min_y, width, height) = drag_box(origin, pointer);
    match shape.geometry_mut() {
        ShapeKind::Rect {
            left,
            top,
            width: w,
            height: h,
        }
        | ShapeKind::Triangle {
            left,
            top,
            width: w,
            height: h,
        } => {
            *left = min_x;
            *top = min_y;
            *w = width;
            *h = height;
        }
        ShapeKind::Circle { left, top, radius } => {
            *left = min_x;
            *top = min_y;
            *radius = origin.distance(pointer) / 2.0;
        }
        ShapeKind::Ellipse { left, top, rx, ry } => {
            *left = min_x;
            *top = min_y;
            *rx = width / 2.0;
            *ry = height / 2.0;
        }
        ShapeKind::Line { x2, y2, .. } | ShapeKind::Arrow { x2, y2, .. } => {
            *x2 = pointer.x;
            *y2 = pointer.y;
        }
        ShapeKind::Text { .. } | ShapeKind::Freehand { .. } => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::canvas::CanvasEvent;
    use crate::draw::color::WHITE;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn canvas() -> Canvas {
        Canvas::new(400, 300, WHITE)
    }

    fn drag(canvas: &mut Canvas, tool: Tool, from: (f64, f64), to: (f64, f64)) -> ObjectId {
        let mut builder = DragShapeBuilder::new();
        builder.on_gesture_start(
            canvas,
            from.into(),
            tool,
            ShapeStyle::default(),
            &TextOptions::default(),
        );
        let id = builder.session().and_then(|s| s.active).expect("shape created");
        builder.on_gesture_update(canvas, Point::new((from.0 + to.0) / 3.0, 7.0));
        builder.on_gesture_update(canvas, to.into());
        builder.on_gesture_end(canvas);
        assert!(!builder.in_progress());
        id
    }

    #[test]
    fn rectangle_and_triangle_follow_drag_box() {
        let cases = [
            ((10.0, 10.0), (60.0, 40.0)),
            ((60.0, 40.0), (10.0, 10.0)),
            ((60.0, 10.0), (10.0, 40.0)),
        ];
        for tool in [Tool::Rectangle, Tool::Triangle] {
            for (from, to) in cases {
                let mut canvas = canvas();
                let id = drag(&mut canvas, tool, from, to);
                let (left, top, width, height) = match canvas.get(id).unwrap().geometry() {
                    ShapeKind::Rect {
                        left,
                        top,
                        width,
                        height,
                    }
                    | ShapeKind::Triangle {
                        left,
                        top,
                        width,
                        height,
                    } => (*left, *top, *width, *height),
                    other => panic!("unexpected geometry {other:?}"),
                };
                assert_eq!((left, top, width, height), (10.0, 10.0, 50.0, 30.0));
            }
        }
    }

    #[test]
    fn circle_radius_is_half_the_drag_distance() {
        let mut canvas = canvas();
        let id = drag(&mut canvas, Tool::Circle, (40.0, 40.0), (10.0, 0.0));
        assert_eq!(
            canvas.get(id).unwrap().geometry(),
            &ShapeKind::Circle {
                left: 10.0,
                top: 0.0,
                radius: 25.0
            }
        );
    }

    #[test]
    fn ellipse_radii_are_half_the_extents() {
        let mut canvas = canvas();
        let id = drag(&mut canvas, Tool::Ellipse, (0.0, 0.0), (30.0, -20.0));
        assert_eq!(
            canvas.get(id).unwrap().geometry(),
            &ShapeKind::Ellipse {
                left: 0.0,
                top: -20.0,
                rx: 15.0,
                ry: 10.0
            }
        );
    }

    #[test]
    fn line_and_arrow_keep_first_endpoint() {
        for tool in [Tool::Line, Tool::Arrow] {
            let mut canvas = canvas();
            let id = drag(&mut canvas, tool, (5.0, 6.0), (80.0, 90.0));
            let (start, end) = canvas.get(id).unwrap().geometry().endpoints().unwrap();
            assert_eq!(start, Point::new(5.0, 6.0));
            assert_eq!(end, Point::new(80.0, 90.0));
        }
    }

    #[test]
    fn zero_movement_leaves_shape_and_frees_session() {
        let mut canvas = canvas();
        let mut builder = DragShapeBuilder::new();
        let style = ShapeStyle::default();
        let text = TextOptions::default();

        builder.on_gesture_start(&mut canvas, Point::new(10.0, 10.0), Tool::Rectangle, style, &text);
        builder.on_gesture_end(&mut canvas);
        assert_eq!(canvas.len(), 1);
        assert!(builder.session().is_none());
        let (_, shape) = canvas.objects().next().unwrap();
        assert_eq!(
            shape.geometry(),
            &ShapeKind::Rect {
                left: 10.0,
                top: 10.0,
                width: 0.0,
                height: 0.0
            }
        );

        builder.on_gesture_start(&mut canvas, Point::new(50.0, 50.0), Tool::Line, style, &text);
        assert!(builder.in_progress());
        builder.on_gesture_end(&mut canvas);
        assert_eq!(canvas.len(), 2);
    }

    #[test]
    fn start_over_selection_is_a_no_op() {
        let mut canvas = canvas();
        let existing = canvas.add(Shape::rect(0.0, 0.0, 20.0, 20.0, ShapeStyle::default()));
        canvas.set_active_object(Some(existing));

        let mut builder = DragShapeBuilder::new();
        builder.on_gesture_start(
            &mut canvas,
            Point::new(5.0, 5.0),
            Tool::Rectangle,
            ShapeStyle::default(),
            &TextOptions::default(),
        );
        assert!(builder.session().is_none());
        assert_eq!(canvas.len(), 1);
    }

    #[test]
    fn text_is_selected_and_editing() {
        let mut canvas = canvas();
        let mut builder = DragShapeBuilder::new();
        builder.on_gesture_start(
            &mut canvas,
            Point::new(30.0, 40.0),
            Tool::Text,
            ShapeStyle::default(),
            &TextOptions::default(),
        );
        let id = builder.session().and_then(|s| s.active).unwrap();
        assert_eq!(canvas.active_object(), Some(id));
        assert_eq!(canvas.cursor(), Cursor::Text);

        let shape = canvas.get(id).unwrap();
        assert!(shape.is_editing());
        assert_eq!(shape.style().fill, ShapeStyle::default().stroke);
        assert!(shape.style().stroke.is_transparent());

        builder.on_gesture_update(&mut canvas, Point::new(90.0, 90.0));
        match canvas.get(id).unwrap().geometry() {
            ShapeKind::Text { left, top, .. } => assert_eq!((*left, *top), (30.0, 40.0)),
            other => panic!("unexpected geometry {other:?}"),
        }
    }

    #[test]
    fn text_ignores_style_opacity() {
        let style = ShapeStyle {
            opacity: 0.3,
            erasable: false,
            ..ShapeStyle::default()
        };
        let text = text_style(style);
        assert_eq!(text.opacity, 1.0);
        assert_eq!(text.fill, style.stroke);
        assert!(!text.erasable);

        let shape = initial_shape(
            Tool::Text,
            Point::new(0.0, 0.0),
            style,
            &TextOptions::default(),
        )
        .unwrap();
        assert_eq!(shape.style().opacity, 1.0);
    }

    #[test]
    fn brush_tools_create_nothing() {
        for tool in [Tool::FreeHand, Tool::Erase, Tool::Select, Tool::None] {
            let mut canvas = canvas();
            let mut builder = DragShapeBuilder::new();
            builder.on_gesture_start(
                &mut canvas,
                Point::new(1.0, 1.0),
                tool,
                ShapeStyle::default(),
                &TextOptions::default(),
            );
            builder.on_gesture_update(&mut canvas, Point::new(9.0, 9.0));
            builder.on_gesture_end(&mut canvas);
            assert!(canvas.is_empty());
        }
    }

    #[test]
    fn every_update_requests_a_render() {
        let mut canvas = canvas();
        let mut builder = DragShapeBuilder::new();
        builder.on_gesture_start(
            &mut canvas,
            Point::new(0.0, 0.0),
            Tool::Ellipse,
            ShapeStyle::default(),
            &TextOptions::default(),
        );
        let before = canvas.render_requests();
        for step in 1..=5 {
            builder.on_gesture_update(&mut canvas, Point::new(step as f64, step as f64));
        }
        assert_eq!(canvas.render_requests(), before + 5);
    }

    #[test]
    fn end_emits_completion_without_session() {
        let mut canvas = canvas();
        let completions = Rc::new(RefCell::new(0));
        let counter = completions.clone();
        canvas.events().subscribe(move |event| {
            if *event == CanvasEvent::GestureCompleted {
                *counter.borrow_mut() += 1;
            }
        });

        let mut builder = DragShapeBuilder::new();
        builder.on_gesture_end(&mut canvas);
        builder.abort(&mut canvas);
        assert_eq!(*completions.borrow(), 1);
    }

    #[test]
    fn update_after_shape_removed_is_ignored() {
        let mut canvas = canvas();
        let mut builder = DragShapeBuilder::new();
        builder.on_gesture_start(
            &mut canvas,
            Point::new(0.0, 0.0),
            Tool::Rectangle,
            ShapeStyle::default(),
            &TextOptions::default(),
        );
        let id = builder.session().and_then(|s| s.active).unwrap();
        canvas.remove(id);
        let before = canvas.render_requests();
        builder.on_gesture_update(&mut canvas, Point::new(10.0, 10.0));
        assert_eq!(canvas.render_requests(), before);
    }
}
