//! Command converter
//!
//! Folds parsed [`PathCommand`]s into the restricted [`OutputCommand`]
//! dialect. Relative coordinates are resolved, horizontal and vertical lines
//! become lines, quadratics are degree-elevated to cubics, smooth curves get
//! their reflected control point and arcs are approximated with cubics.
//!
//! Every conversion builds its own [`ConverterState`], so a single
//! [`PathConverter`] can be shared freely between threads.

use tracing::debug;

use crate::arc::{ArcApproximation, EndpointArc};
use crate::command::{OutputCommand, PathCommand};
use crate::error::{MalformedPathError, MalformedReason, Result};
use crate::format::{format_commands, FormatOptions};
use crate::parser::parse_spanned;
use crate::point::Point;

/// What the previous command left behind for smooth-curve reflection
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LastSegment {
    /// Start of the path
    #[default]
    None,
    Move,
    Line,
    /// A cubic, smooth cubic or non-degenerate arc; `S` reflects its control
    Cubic,
    /// A quadratic or smooth quadratic; `T` reflects its control
    Quadratic,
    Close,
}

/// Running state of one conversion
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ConverterState {
    pub current: Point,
    pub subpath_start: Point,
    /// Second control point of the last cubic, or the control point of the last quadratic
    pub last_control: Point,
    pub last: LastSegment,
}

impl ConverterState {
    pub fn new() -> Self {
        Self::default()
    }

    fn resolve(&self, relative: bool, p: Point) -> Point {
        if relative {
            self.current + p
        } else {
            p
        }
    }

    fn reflected_control(&self, after: LastSegment) -> Point {
        if self.last == after {
            self.last_control.reflect_through(self.current)
        } else {
            self.current
        }
    }

    /// Convert one command, appending its output to `out`
    pub fn apply(&mut self, command: &PathCommand, out: &mut Vec<OutputCommand>) {
        match *command {
            PathCommand::MoveTo { relative, to } => {
                self.current = self.resolve(relative, to);
                self.subpath_start = self.current;
                self.last = LastSegment::Move;
                out.push(OutputCommand::MoveTo(self.current));
            }
            PathCommand::LineTo { relative, to } => {
                let to = self.resolve(relative, to);
                self.line_to(to, out);
            }
            PathCommand::HorizontalLineTo { relative, x } => {
                let x = if relative { self.current.x + x } else { x };
                self.line_to(Point::new(x, self.current.y), out);
            }
            PathCommand::VerticalLineTo { relative, y } => {
                let y = if relative { self.current.y + y } else { y };
                self.line_to(Point::new(self.current.x, y), out);
            }
            PathCommand::CubicTo {
                relative,
                ctrl1,
                ctrl2,
                to,
            } => {
                let ctrl1 = self.resolve(relative, ctrl1);
                let ctrl2 = self.resolve(relative, ctrl2);
                let to = self.resolve(relative, to);
                self.cubic_to(ctrl1, ctrl2, to, out);
            }
            PathCommand::SmoothCubicTo {
                relative,
                ctrl2,
                to,
            } => {
                let ctrl1 = self.reflected_control(LastSegment::Cubic);
                let ctrl2 = self.resolve(relative, ctrl2);
                let to = self.resolve(relative, to);
                self.cubic_to(ctrl1, ctrl2, to, out);
            }
            PathCommand::QuadraticTo { relative, ctrl, to } => {
                let ctrl = self.resolve(relative, ctrl);
                let to = self.resolve(relative, to);
                self.quadratic_to(ctrl, to, out);
            }
            PathCommand::SmoothQuadraticTo { relative, to } => {
                let ctrl = self.reflected_control(LastSegment::Quadratic);
                let to = self.resolve(relative, to);
                self.quadratic_to(ctrl, to, out);
            }
            PathCommand::ArcTo {
                relative,
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                to,
            } => {
                let arc = EndpointArc {
                    from: self.current,
                    to: self.resolve(relative, to),
                    rx,
                    ry,
                    rotation,
                    large_arc,
                    sweep,
                };
                self.arc_to(&arc, out);
            }
            PathCommand::ClosePath => {
                self.current = self.subpath_start;
                self.last = LastSegment::Close;
                out.push(OutputCommand::Close);
            }
        }
    }

    fn line_to(&mut self, to: Point, out: &mut Vec<OutputCommand>) {
        self.current = to;
        self.last = LastSegment::Line;
        out.push(OutputCommand::LineTo(to));
    }

    fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point, out: &mut Vec<OutputCommand>) {
        self.current = to;
        self.last_control = ctrl2;
        self.last = LastSegment::Cubic;
        out.push(OutputCommand::CubicTo { ctrl1, ctrl2, to });
    }

    /// Degree-elevate a quadratic: C1 = P0 + 2/3 (Q - P0), C2 = P2 + 2/3 (Q - P2)
    fn quadratic_to(&mut self, ctrl: Point, to: Point, out: &mut Vec<OutputCommand>) {
        let from = self.current;
        let ctrl1 = from.lerp(ctrl, 2.0 / 3.0);
        let ctrl2 = to.lerp(ctrl, 2.0 / 3.0);
        self.current = to;
        self.last_control = ctrl;
        self.last = LastSegment::Quadratic;
        out.push(OutputCommand::CubicTo { ctrl1, ctrl2, to });
    }

    fn arc_to(&mut self, arc: &EndpointArc, out: &mut Vec<OutputCommand>) {
        match arc.to_cubics() {
            ArcApproximation::Omitted => {
                debug!(x = arc.to.x, y = arc.to.y, "arc ends at its start point, omitted");
            }
            ArcApproximation::Line(to) => {
                debug!(rx = arc.rx, ry = arc.ry, "zero-radius arc drawn as a line");
                self.line_to(to, out);
            }
            ArcApproximation::Cubics(segments) => {
                debug!(segments = segments.len(), "arc approximated with cubics");
                for segment in segments {
                    self.cubic_to(segment.ctrl1, segment.ctrl2, segment.to, out);
                }
            }
        }
    }
}

/// Convert parsed commands to the restricted dialect with a fresh state
///
/// Coordinates are not range checked here; very large relative offsets can
/// resolve to infinity. [`PathConverter`] rejects such paths.
pub fn convert_commands(commands: &[PathCommand]) -> Vec<OutputCommand> {
    let mut state = ConverterState::new();
    let mut out = Vec::with_capacity(commands.len());
    for command in commands {
        state.apply(command, &mut out);
    }
    out
}

/// Converts path data to the restricted absolute `M L C Z` dialect
///
/// Holds only formatting options; all conversion state lives in the call.
#[derive(Clone, Copy, Debug, Default)]
pub struct PathConverter {
    options: FormatOptions,
}

impl PathConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: FormatOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FormatOptions {
        &self.options
    }

    /// Parse and convert path data, returning the restricted commands
    ///
    /// Fails with [`MalformedReason::CoordinateOverflow`] at the offending
    /// command when a resolved coordinate is not finite.
    pub fn convert_to_commands(&self, path: &str) -> Result<Vec<OutputCommand>> {
        let commands = parse_spanned(path)?;
        let mut state = ConverterState::new();
        let mut out = Vec::with_capacity(commands.len());

        for spanned in commands {
            let emitted = out.len();
            state.apply(&spanned.command, &mut out);
            if !out[emitted..].iter().all(OutputCommand::is_finite) {
                let start = spanned.span.start;
                return Err(MalformedPathError::new(
                    start,
                    &path[spanned.span],
                    MalformedReason::CoordinateOverflow,
                ));
            }
        }
        Ok(out)
    }

    /// Parse, convert and serialize path data
    ///
    /// Either the whole path converts or an error describing the first
    /// malformed token is returned.
    pub fn convert(&self, path: &str) -> Result<String> {
        let output = self.convert_to_commands(path)?;
        Ok(format_commands(&output, &self.options))
    }
}

/// Convert path data with default formatting
pub fn convert_path(path: &str) -> Result<String> {
    PathConverter::new().convert(path)
}
