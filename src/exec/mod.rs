//! Tree-walking executor.
//!
//! Walks a [`Program`] left to right, forwarding drawing commands to a
//! [`DrawingSurface`] and unrolling `repeat` bodies. `set` fills a variable
//! table that nothing in the language reads back yet.

use std::collections::BTreeMap;

use tracing::{trace, warn};

use crate::dsl::ast::{Command, Program};
use crate::surface::DrawingSurface;

/// Variable name to last assigned value. Names are case-sensitive.
pub type Variables = BTreeMap<String, f64>;

#[derive(Debug, Default, Clone)]
pub struct Executor {
    variables: Variables,
}

impl Executor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `program` against `surface`. The variable table is cleared first;
    /// clearing the surface is up to the caller.
    pub fn execute<S>(&mut self, program: &Program, surface: &mut S)
    where
        S: DrawingSurface + ?Sized,
    {
        self.variables.clear();
        self.execute_block(program.commands(), surface);
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn variable(&self, name: &str) -> Option<f64> {
        self.variables.get(name).copied()
    }

    fn execute_block<S>(&mut self, commands: &[Command], surface: &mut S)
    where
        S: DrawingSurface + ?Sized,
    {
        for command in commands {
            self.execute_command(command, surface);
        }
    }

    fn execute_command<S>(&mut self, command: &Command, surface: &mut S)
    where
        S: DrawingSurface + ?Sized,
    {
        trace!(command = command.name(), "execute");

        match command {
            Command::Pen { size } => surface.set_pen_size(*size),
            Command::Paper { value } => surface.set_paper(*value),
            Command::Color { value } => surface.set_color(*value),
            Command::Line { x1, y1, x2, y2 } => surface.draw_line(*x1, *y1, *x2, *y2),
            Command::Rect { x1, y1, x2, y2 } => surface.draw_rect(*x1, *y1, *x2, *y2),
            Command::Circle { x, y, r } => surface.draw_circle(*x, *y, *r),
            Command::FillRect { x1, y1, x2, y2 } => surface.fill_rect(*x1, *y1, *x2, *y2),
            Command::FillCircle { x, y, r } => surface.fill_circle(*x, *y, *r),
            Command::SetVariable { name, value } => {
                self.variables.insert(name.clone(), *value);
            }
            Command::Repeat { count, body } => {
                for _ in 0..iterations(*count) {
                    self.execute_block(body, surface);
                }
            }
            Command::Comment => {}
        }
    }
}

/// `floor(count)` iterations; zero or negative runs nothing.
fn iterations(count: f64) -> u64 {
    if !count.is_finite() {
        warn!(count, "repeat count is not finite, skipping body");
        return 0;
    }
    let n = count.floor();
    if n <= 0.0 {
        0
    } else {
        n as u64
    }
}

/// Run `program` with a fresh executor and return it for inspection.
pub fn execute<S>(program: &Program, surface: &mut S) -> Executor
where
    S: DrawingSurface + ?Sized,
{
    let mut executor = Executor::new();
    executor.execute(program, surface);
    executor
}
