//! Command tree for the DBN language.
//!
//! A [`Program`] is an ordered list of [`Command`]s. `Repeat` owns its body,
//! so the tree is a plain forest with no sharing.

use serde::Serialize;

/// A single executable instruction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Command {
    Pen { size: f64 },
    Paper { value: f64 },
    Color { value: f64 },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Rect { x1: f64, y1: f64, x2: f64, y2: f64 },
    Circle { x: f64, y: f64, r: f64 },
    FillRect { x1: f64, y1: f64, x2: f64, y2: f64 },
    FillCircle { x: f64, y: f64, r: f64 },
    SetVariable { name: String, value: f64 },
    Repeat { count: f64, body: Vec<Command> },
    Comment,
}

impl Command {
    /// Short lowercase name, used in traces.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Pen { .. } => "pen",
            Command::Paper { .. } => "paper",
            Command::Color { .. } => "color",
            Command::Line { .. } => "line",
            Command::Rect { .. } => "rect",
            Command::Circle { .. } => "circle",
            Command::FillRect { .. } => "fillrect",
            Command::FillCircle { .. } => "fillcircle",
            Command::SetVariable { .. } => "set",
            Command::Repeat { .. } => "repeat",
            Command::Comment => "comment",
        }
    }
}

/// A complete parsed program.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Program(Vec<Command>);

impl Program {
    pub fn new(commands: Vec<Command>) -> Self {
        Self(commands)
    }

    pub fn commands(&self) -> &[Command] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
