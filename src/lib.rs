//! An interpreter for a small DBN-style drawing language.

pub mod config;
pub mod dsl;
pub mod exec;
pub mod surface;

pub use dsl::{Command, Interpreter, Program, SyntaxError};
pub use exec::{execute, Executor};
pub use surface::{Canvas, DrawingSurface, RecordingSurface, SurfaceCall};
