use serde::Serialize;

use crate::types::{Color, Point};

/// Sink for the primitive drawing operations issued by the symbol engine.
///
/// Implementors are handed to the engine per call; the engine never keeps
/// a reference and issues commands strictly in order (outer shape first).
pub trait DrawingSurface {
    fn fill_circle(&mut self, center: Point, radius: f64, thickness: f64, color: Color);
    fn draw_circle(&mut self, center: Point, radius: f64, thickness: f64);
    fn fill_polygon(&mut self, points: &[Point], color: Color);
    fn draw_polygon(&mut self, points: &[Point], thickness: f64);
    /// Color used for the inner shape of a symbol.
    fn current_color(&self) -> Color;
}

/// One recorded drawing operation.
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    FillCircle {
        center: Point,
        radius: f64,
        thickness: f64,
        color: Color,
    },
    DrawCircle {
        center: Point,
        radius: f64,
        thickness: f64,
    },
    FillPolygon {
        points: Vec<Point>,
        color: Color,
    },
    DrawPolygon {
        points: Vec<Point>,
        thickness: f64,
    },
}

impl DrawCommand {
    /// Filled commands paint an area, the others only stroke an outline.
    pub fn is_fill(&self) -> bool {
        matches!(
            self,
            DrawCommand::FillCircle { .. } | DrawCommand::FillPolygon { .. }
        )
    }
}

/// Surface that records every command instead of painting.
#[derive(Serialize, Clone, Debug, Default)]
pub struct RecordingSurface {
    pub color: Color,
    pub commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_color(color: Color) -> Self {
        Self {
            color,
            commands: Vec::new(),
        }
    }

    /// Drop recorded commands, keeping the current color.
    pub fn clear(&mut self) {
        self.commands.clear();
    }
}

impl DrawingSurface for RecordingSurface {
    fn fill_circle(&mut self, center: Point, radius: f64, thickness: f64, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            thickness,
            color,
        });
    }

    fn draw_circle(&mut self, center: Point, radius: f64, thickness: f64) {
        self.commands.push(DrawCommand::DrawCircle {
            center,
            radius,
            thickness,
        });
    }

    fn fill_polygon(&mut self, points: &[Point], color: Color) {
        self.commands.push(DrawCommand::FillPolygon {
            points: points.to_vec(),
            color,
        });
    }

    fn draw_polygon(&mut self, points: &[Point], thickness: f64) {
        self.commands.push(DrawCommand::DrawPolygon {
            points: points.to_vec(),
            thickness,
        });
    }

    fn current_color(&self) -> Color {
        self.color
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut s = RecordingSurface::with_color(Color::rgb(1, 2, 3));
        s.fill_circle(Point::new(0.0, 0.0), 2.0, 0.5, Color::WHITE);
        s.draw_polygon(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0)], 0.5);
        assert_eq!(s.commands.len(), 2);
        assert!(s.commands[0].is_fill());
        assert!(!s.commands[1].is_fill());
        assert_eq!(s.current_color(), Color::rgb(1, 2, 3));
        s.clear();
        assert!(s.commands.is_empty());
        assert_eq!(s.current_color(), Color::rgb(1, 2, 3));
    }

    #[test]
    fn test_command_json_tag() {
        let cmd = DrawCommand::DrawCircle {
            center: Point::new(1.0, 2.0),
            radius: 3.0,
            thickness: 0.5,
        };
        let v = serde_json::to_value(&cmd).unwrap();
        assert_eq!(v["op"], "draw_circle");
        assert_eq!(v["center"]["x"], 1.0);
        assert_eq!(v["radius"], 3.0);
    }
}
