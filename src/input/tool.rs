//! Drawing tool selection.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Drawing tool selection.
///
/// The active tool determines what a pointer drag does: shape tools build a
/// shape that follows the pointer, free-hand and erase hand the gesture to a
/// brush, select moves existing objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tool {
    /// Axis-aligned rectangle from corner to corner
    Rectangle,
    /// Triangle inscribed in the dragged box
    Triangle,
    /// Circle whose diameter is the drag distance
    Circle,
    /// Ellipse inscribed in the dragged box
    Ellipse,
    /// Straight segment from press to pointer
    Line,
    /// Segment with a directional marker at the pointer end
    Arrow,
    /// Text box placed at the press point
    Text,
    /// Free-hand pencil brush
    #[default]
    #[serde(alias = "pencil")]
    FreeHand,
    /// Selection and move of existing objects
    Select,
    /// Eraser brush
    #[serde(alias = "eraser")]
    Erase,
    /// No tool: drags do nothing
    None,
}

impl Tool {
    /// Every tool, in menu order.
    pub const ALL: [Tool; 11] = [
        Tool::Rectangle,
        Tool::Triangle,
        Tool::Circle,
        Tool::Ellipse,
        Tool::Line,
        Tool::Arrow,
        Tool::Text,
        Tool::FreeHand,
        Tool::Select,
        Tool::Erase,
        Tool::None,
    ];

    /// Returns true if pressing with this tool pre-creates a shape.
    pub fn shape_tool(self) -> bool {
        matches!(
            self,
            Tool::Rectangle
                | Tool::Triangle
                | Tool::Circle
                | Tool::Ellipse
                | Tool::Line
                | Tool::Arrow
                | Tool::Text
        )
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tool::Rectangle => "rectangle",
            Tool::Triangle => "triangle",
            Tool::Circle => "circle",
            Tool::Ellipse => "ellipse",
            Tool::Line => "line",
            Tool::Arrow => "arrow",
            Tool::Text => "text",
            Tool::FreeHand => "free-hand",
            Tool::Select => "select",
            Tool::Erase => "erase",
            Tool::None => "none",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tool {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        match name.as_str() {
            "pencil" => return Ok(Tool::FreeHand),
            "eraser" => return Ok(Tool::Erase),
            _ => {}
        }
        Tool::ALL
            .into_iter()
            .find(|tool| tool.as_str() == name)
            .ok_or_else(|| format!("Unknown tool '{s}'"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for tool in Tool::ALL {
            assert_eq!(tool.to_string().parse::<Tool>(), Ok(tool));
        }
    }

    #[test]
    fn aliases_are_accepted() {
        assert_eq!("pencil".parse::<Tool>(), Ok(Tool::FreeHand));
        assert_eq!("Eraser".parse::<Tool>(), Ok(Tool::Erase));
        assert!("laser".parse::<Tool>().is_err());
    }

    #[test]
    fn only_shape_tools_precreate_shapes() {
        let shape_tools: Vec<Tool> = Tool::ALL.into_iter().filter(|t| t.shape_tool()).collect();
        assert_eq!(shape_tools.len(), 7);
        assert!(!Tool::FreeHand.shape_tool());
        assert!(!Tool::Select.shape_tool());
        assert!(!Tool::Erase.shape_tool());
        assert!(!Tool::None.shape_tool());
    }
}
