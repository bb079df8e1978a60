//! Input state: tool, style and the canvas they act on.

use crate::canvas::{
    Brush, Canvas, CanvasEvent, Cursor, EraserBrush, HostCanvas, InteractionMode, PencilBrush,
};
use crate::config::{Action, Config, KeyBinding};
use crate::draw::{Shape, ShapeStyle, StyleOverrides, TextOptions};
use crate::input::{builder::DragShapeBuilder, modifiers::Modifiers, tool::Tool};
use anyhow::Result;
use log::debug;
use std::collections::HashMap;

/// Main input state containing everything a drawing session needs.
///
/// Owns the canvas, the active tool and style, and the drag shape builder.
/// Pointer and keyboard events are translated into builder, brush, selection
/// and hotkey operations on the canvas.
pub struct InputState {
    /// The drawing surface
    pub canvas: Canvas,
    /// Current modifier key state
    pub modifiers: Modifiers,
    /// Active tool
    pub(super) tool: Tool,
    /// Style applied to new shapes and the pencil brush
    pub(super) style: ShapeStyle,
    /// Options applied to new text boxes
    pub(super) text: TextOptions,
    /// Eraser brush width
    pub(super) eraser_width: f64,
    /// Zoom factor applied per zoom in/out action
    pub(super) zoom_step: f64,
    /// Drag-to-shape state machine
    pub(super) builder: DragShapeBuilder,
    /// Whether the primary button is held
    pub(super) pointer_down: bool,
    /// Copied object waiting to be pasted
    pub(super) clipboard: Option<Shape>,
    /// Keybinding action map for efficient lookup
    action_map: HashMap<KeyBinding, Action>,
}

impl InputState {
    /// Creates an input state around an existing canvas.
    ///
    /// # Arguments
    /// * `canvas` - Surface to draw on
    /// * `initial_tool` - Tool active at startup
    /// * `style` - Style applied to new shapes
    /// * `text` - Options for new text boxes
    /// * `eraser_width` - Eraser brush width
    /// * `zoom_step` - Zoom factor per zoom in/out action
    /// * `action_map` - Keybinding action map
    pub fn with_defaults(
        canvas: Canvas,
        initial_tool: Tool,
        style: ShapeStyle,
        text: TextOptions,
        eraser_width: f64,
        zoom_step: f64,
        action_map: HashMap<KeyBinding, Action>,
    ) -> Self {
        let mut state = Self {
            canvas,
            modifiers: Modifiers::new(),
            tool: initial_tool,
            style,
            text,
            eraser_width,
            zoom_step,
            builder: DragShapeBuilder::new(),
            pointer_down: false,
            clipboard: None,
            action_map,
        };
        state.apply_tool_mode();
        state
    }

    /// Builds the canvas and input state described by a config.
    ///
    /// # Errors
    /// Returns an error if the keybindings are invalid or conflict.
    pub fn from_config(config: &Config) -> Result<Self> {
        let action_map = config
            .keybindings
            .build_action_map()
            .map_err(anyhow::Error::msg)?;
        let canvas = Canvas::new(config.canvas.width, config.canvas.height, config.background());
        Ok(Self::with_defaults(
            canvas,
            config.canvas.initial_tool,
            config.shape_style(),
            config.text_options(),
            config.eraser.width,
            config.canvas.zoom_step,
            action_map,
        ))
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }

    pub fn text_options(&self) -> &TextOptions {
        &self.text
    }

    /// Returns true while a pointer gesture is being tracked by the builder.
    pub fn gesture_in_progress(&self) -> bool {
        self.builder.in_progress()
    }

    /// Switches the active tool.
    ///
    /// Selecting the current tool again does nothing. Otherwise any gesture in
    /// progress is aborted first, so its shape stops following the pointer.
    pub fn set_tool(&mut self, tool: Tool) {
        if tool == self.tool {
            return;
        }

        self.builder.abort(&mut self.canvas);
        self.canvas.end_transform();
        self.pointer_down = false;

        let old = self.tool;
        self.tool = tool;
        self.apply_tool_mode();

        debug!("Tool changed from {old} to {tool}");
        self.canvas
            .events()
            .emit(&CanvasEvent::ToolChanged { old, new: tool });
    }

    /// Resets the canvas to drawing mode and configures it for the active tool.
    fn apply_tool_mode(&mut self) {
        self.canvas.set_mode(InteractionMode::Drawing);
        self.canvas.set_brush(None);
        self.canvas.set_cursor(Cursor::Default);

        match self.tool {
            Tool::FreeHand => {
                self.canvas
                    .set_brush(Some(Brush::Pencil(PencilBrush::new(self.style))));
                self.canvas.set_mode(InteractionMode::FreeDrawing);
            }
            Tool::Erase => {
                self.canvas
                    .set_brush(Some(Brush::Eraser(EraserBrush::new(self.eraser_width))));
                self.canvas.set_mode(InteractionMode::FreeDrawing);
            }
            Tool::Select => {
                self.canvas.set_mode(InteractionMode::Selection);
                self.canvas.set_cursor(Cursor::Auto);
            }
            Tool::None => {}
            _ => self.canvas.set_cursor(Cursor::Crosshair),
        }
    }

    /// Cursor shown for the active tool when nothing overrides it.
    pub(super) fn tool_cursor(&self) -> Cursor {
        match self.tool {
            Tool::FreeHand | Tool::Erase | Tool::None => Cursor::Default,
            Tool::Select => Cursor::Auto,
            _ => Cursor::Crosshair,
        }
    }

    /// Merges overrides into the current style.
    ///
    /// Only shapes created afterwards use the new style; the pencil brush is
    /// refreshed immediately.
    pub fn set_style(&mut self, overrides: &StyleOverrides) {
        self.style = self.style.merged(overrides);
        if self.tool == Tool::FreeHand {
            self.canvas
                .set_brush(Some(Brush::Pencil(PencilBrush::new(self.style))));
        }
        debug!("Style updated: {:?}", self.style);
    }

    /// Replaces the content of the selected text box.
    pub fn set_active_text(&mut self, text: &str) -> bool {
        match self.canvas.active_object() {
            Some(id) => self.canvas.set_text(id, text),
            None => false,
        }
    }

    /// Sets the scale factors of the selected object.
    pub fn scale_active(&mut self, scale_x: f64, scale_y: f64) -> bool {
        match self.canvas.active_object() {
            Some(id) => self.canvas.scale_object(id, scale_x, scale_y),
            None => false,
        }
    }

    /// Look up an action for the given key and the held modifiers.
    pub(super) fn find_action(&self, key_str: &str) -> Option<Action> {
        self.action_map
            .iter()
            .find(|(binding, _)| {
                binding.matches(
                    key_str,
                    self.modifiers.ctrl,
                    self.modifiers.shift,
                    self.modifiers.alt,
                )
            })
            .map(|(_, action)| *action)
    }

    /// Renders the canvas.
    pub fn render(&mut self, ctx: &cairo::Context) {
        self.canvas.render(ctx);
    }
}
