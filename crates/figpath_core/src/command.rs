//! Path command types
//!
//! [`PathCommand`] is the parsed form of the general path mini-language, one
//! value per parameter group. [`OutputCommand`] is the restricted dialect the
//! converter emits: absolute move, line, cubic and close only.

use smallvec::SmallVec;

use crate::point::Point;

/// Parameter list of a single command, never longer than an arc's seven
pub type Params = SmallVec<[f64; 7]>;

// ─────────────────────────────────────────────────────────────────────────────
// Command kinds
// ─────────────────────────────────────────────────────────────────────────────

/// The ten command kinds of the path mini-language
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CommandKind {
    MoveTo,
    LineTo,
    HorizontalLineTo,
    VerticalLineTo,
    CubicTo,
    SmoothCubicTo,
    QuadraticTo,
    SmoothQuadraticTo,
    ArcTo,
    ClosePath,
}

impl CommandKind {
    /// Look up a command letter, returning the kind and whether it is relative
    pub fn from_letter(letter: char) -> Option<(Self, bool)> {
        let kind = match letter.to_ascii_uppercase() {
            'M' => CommandKind::MoveTo,
            'L' => CommandKind::LineTo,
            'H' => CommandKind::HorizontalLineTo,
            'V' => CommandKind::VerticalLineTo,
            'C' => CommandKind::CubicTo,
            'S' => CommandKind::SmoothCubicTo,
            'Q' => CommandKind::QuadraticTo,
            'T' => CommandKind::SmoothQuadraticTo,
            'A' => CommandKind::ArcTo,
            'Z' => CommandKind::ClosePath,
            _ => return None,
        };
        Some((kind, letter.is_ascii_lowercase()))
    }

    /// Number of parameters in one group of this command
    pub const fn arity(self) -> usize {
        match self {
            CommandKind::MoveTo | CommandKind::LineTo | CommandKind::SmoothQuadraticTo => 2,
            CommandKind::HorizontalLineTo | CommandKind::VerticalLineTo => 1,
            CommandKind::CubicTo => 6,
            CommandKind::SmoothCubicTo | CommandKind::QuadraticTo => 4,
            CommandKind::ArcTo => 7,
            CommandKind::ClosePath => 0,
        }
    }

    /// The command letter, lowercase when relative
    pub fn letter(self, relative: bool) -> char {
        let upper = match self {
            CommandKind::MoveTo => 'M',
            CommandKind::LineTo => 'L',
            CommandKind::HorizontalLineTo => 'H',
            CommandKind::VerticalLineTo => 'V',
            CommandKind::CubicTo => 'C',
            CommandKind::SmoothCubicTo => 'S',
            CommandKind::QuadraticTo => 'Q',
            CommandKind::SmoothQuadraticTo => 'T',
            CommandKind::ArcTo => 'A',
            CommandKind::ClosePath => 'Z',
        };
        if relative {
            upper.to_ascii_lowercase()
        } else {
            upper
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Parsed commands
// ─────────────────────────────────────────────────────────────────────────────

/// One command of the general path language with exactly one parameter group
///
/// Coordinates are stored as written; for relative commands they are offsets
/// from the current point at the start of the command.
#[derive(Clone, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo {
        relative: bool,
        to: Point,
    },
    LineTo {
        relative: bool,
        to: Point,
    },
    HorizontalLineTo {
        relative: bool,
        x: f64,
    },
    VerticalLineTo {
        relative: bool,
        y: f64,
    },
    CubicTo {
        relative: bool,
        ctrl1: Point,
        ctrl2: Point,
        to: Point,
    },
    SmoothCubicTo {
        relative: bool,
        ctrl2: Point,
        to: Point,
    },
    QuadraticTo {
        relative: bool,
        ctrl: Point,
        to: Point,
    },
    SmoothQuadraticTo {
        relative: bool,
        to: Point,
    },
    ArcTo {
        relative: bool,
        rx: f64,
        ry: f64,
        /// Rotation of the ellipse's x axis, in degrees
        rotation: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    ClosePath,
}

impl PathCommand {
    /// Build a command from one parameter group
    ///
    /// Returns `None` when `params.len()` differs from `kind.arity()`. Arc flags
    /// are taken as `!= 0.0`; the parser validates them beforehand.
    pub fn from_params(kind: CommandKind, relative: bool, params: &[f64]) -> Option<Self> {
        if params.len() != kind.arity() {
            return None;
        }
        let p = params;
        let command = match kind {
            CommandKind::MoveTo => PathCommand::MoveTo {
                relative,
                to: Point::new(p[0], p[1]),
            },
            CommandKind::LineTo => PathCommand::LineTo {
                relative,
                to: Point::new(p[0], p[1]),
            },
            CommandKind::HorizontalLineTo => PathCommand::HorizontalLineTo { relative, x: p[0] },
            CommandKind::VerticalLineTo => PathCommand::VerticalLineTo { relative, y: p[0] },
            CommandKind::CubicTo => PathCommand::CubicTo {
                relative,
                ctrl1: Point::new(p[0], p[1]),
                ctrl2: Point::new(p[2], p[3]),
                to: Point::new(p[4], p[5]),
            },
            CommandKind::SmoothCubicTo => PathCommand::SmoothCubicTo {
                relative,
                ctrl2: Point::new(p[0], p[1]),
                to: Point::new(p[2], p[3]),
            },
            CommandKind::QuadraticTo => PathCommand::QuadraticTo {
                relative,
                ctrl: Point::new(p[0], p[1]),
                to: Point::new(p[2], p[3]),
            },
            CommandKind::SmoothQuadraticTo => PathCommand::SmoothQuadraticTo {
                relative,
                to: Point::new(p[0], p[1]),
            },
            CommandKind::ArcTo => PathCommand::ArcTo {
                relative,
                rx: p[0],
                ry: p[1],
                rotation: p[2],
                large_arc: p[3] != 0.0,
                sweep: p[4] != 0.0,
                to: Point::new(p[5], p[6]),
            },
            CommandKind::ClosePath => PathCommand::ClosePath,
        };
        Some(command)
    }

    pub fn kind(&self) -> CommandKind {
        match self {
            PathCommand::MoveTo { .. } => CommandKind::MoveTo,
            PathCommand::LineTo { .. } => CommandKind::LineTo,
            PathCommand::HorizontalLineTo { .. } => CommandKind::HorizontalLineTo,
            PathCommand::VerticalLineTo { .. } => CommandKind::VerticalLineTo,
            PathCommand::CubicTo { .. } => CommandKind::CubicTo,
            PathCommand::SmoothCubicTo { .. } => CommandKind::SmoothCubicTo,
            PathCommand::QuadraticTo { .. } => CommandKind::QuadraticTo,
            PathCommand::SmoothQuadraticTo { .. } => CommandKind::SmoothQuadraticTo,
            PathCommand::ArcTo { .. } => CommandKind::ArcTo,
            PathCommand::ClosePath => CommandKind::ClosePath,
        }
    }

    pub fn is_relative(&self) -> bool {
        match *self {
            PathCommand::MoveTo { relative, .. }
            | PathCommand::LineTo { relative, .. }
            | PathCommand::HorizontalLineTo { relative, .. }
            | PathCommand::VerticalLineTo { relative, .. }
            | PathCommand::CubicTo { relative, .. }
            | PathCommand::SmoothCubicTo { relative, .. }
            | PathCommand::QuadraticTo { relative, .. }
            | PathCommand::SmoothQuadraticTo { relative, .. }
            | PathCommand::ArcTo { relative, .. } => relative,
            PathCommand::ClosePath => false,
        }
    }

    /// The command letter as it would be written
    pub fn letter(&self) -> char {
        self.kind().letter(self.is_relative())
    }

    /// The parameter group in source order
    pub fn params(&self) -> Params {
        let flag = |b: bool| if b { 1.0 } else { 0.0 };
        match *self {
            PathCommand::MoveTo { to, .. }
            | PathCommand::LineTo { to, .. }
            | PathCommand::SmoothQuadraticTo { to, .. } => SmallVec::from_slice(&[to.x, to.y]),
            PathCommand::HorizontalLineTo { x, .. } => SmallVec::from_slice(&[x]),
            PathCommand::VerticalLineTo { y, .. } => SmallVec::from_slice(&[y]),
            PathCommand::CubicTo {
                ctrl1, ctrl2, to, ..
            } => SmallVec::from_slice(&[ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y]),
            PathCommand::SmoothCubicTo { ctrl2: ctrl, to, .. }
            | PathCommand::QuadraticTo { ctrl, to, .. } => {
                SmallVec::from_slice(&[ctrl.x, ctrl.y, to.x, to.y])
            }
            PathCommand::ArcTo {
                rx,
                ry,
                rotation,
                large_arc,
                sweep,
                to,
                ..
            } => SmallVec::from_slice(&[
                rx,
                ry,
                rotation,
                flag(large_arc),
                flag(sweep),
                to.x,
                to.y,
            ]),
            PathCommand::ClosePath => SmallVec::new(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Restricted output commands
// ─────────────────────────────────────────────────────────────────────────────

/// A command of the restricted dialect, always in absolute coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OutputCommand {
    MoveTo(Point),
    LineTo(Point),
    CubicTo { ctrl1: Point, ctrl2: Point, to: Point },
    Close,
}

impl OutputCommand {
    pub fn letter(&self) -> char {
        match self {
            OutputCommand::MoveTo(_) => 'M',
            OutputCommand::LineTo(_) => 'L',
            OutputCommand::CubicTo { .. } => 'C',
            OutputCommand::Close => 'Z',
        }
    }

    /// End point of the segment, `None` for close (it ends at the subpath start)
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            OutputCommand::MoveTo(p) | OutputCommand::LineTo(p) => Some(p),
            OutputCommand::CubicTo { to, .. } => Some(to),
            OutputCommand::Close => None,
        }
    }

    /// Whether every coordinate is a finite number
    pub fn is_finite(&self) -> bool {
        self.coords().iter().all(|v| v.is_finite())
    }

    /// Coordinates in output order
    pub fn coords(&self) -> Params {
        match *self {
            OutputCommand::MoveTo(p) | OutputCommand::LineTo(p) => SmallVec::from_slice(&[p.x, p.y]),
            OutputCommand::CubicTo { ctrl1, ctrl2, to } => {
                SmallVec::from_slice(&[ctrl1.x, ctrl1.y, ctrl2.x, ctrl2.y, to.x, to.y])
            }
            OutputCommand::Close => SmallVec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_letters_round_trip() {
        for letter in "MmLlHhVvCcSsQqTtAaZz".chars() {
            let (kind, relative) = CommandKind::from_letter(letter).unwrap();
            assert_eq!(kind.letter(relative), letter);
        }
        assert!(CommandKind::from_letter('B').is_none());
        assert!(CommandKind::from_letter('e').is_none());
    }

    #[test]
    fn test_from_params_checks_arity() {
        assert!(PathCommand::from_params(CommandKind::LineTo, false, &[1.0]).is_none());
        assert!(PathCommand::from_params(CommandKind::ClosePath, false, &[1.0]).is_none());
        assert_eq!(
            PathCommand::from_params(CommandKind::ClosePath, true, &[]),
            Some(PathCommand::ClosePath)
        );
    }

    #[test]
    fn test_params_preserve_source_order() {
        let params = [10.0, 5.0, 30.0, 1.0, 0.0, 4.0, 8.0];
        let arc = PathCommand::from_params(CommandKind::ArcTo, true, &params).unwrap();
        assert_eq!(arc.params().as_slice(), &params);
        assert_eq!(arc.letter(), 'a');
        assert!(arc.is_relative());
    }

    #[test]
    fn test_output_end_point() {
        let cubic = OutputCommand::CubicTo {
            ctrl1: Point::new(1.0, 2.0),
            ctrl2: Point::new(3.0, 4.0),
            to: Point::new(5.0, 6.0),
        };
        assert_eq!(cubic.end_point(), Some(Point::new(5.0, 6.0)));
        assert_eq!(OutputCommand::Close.end_point(), None);
        assert_eq!(cubic.coords().len(), 6);
        assert!(cubic.is_finite());
        assert!(!OutputCommand::LineTo(Point::new(f64::INFINITY, 0.0)).is_finite());
    }
}
