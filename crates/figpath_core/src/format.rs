//! Serialization of restricted commands back to path data

use std::fmt;

use crate::command::OutputCommand;

/// Number formatting options for emitted path data
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Maximum number of fraction digits; `None` keeps the shortest
    /// representation that round-trips the value exactly
    pub precision: Option<usize>,
}

impl FormatOptions {
    pub fn with_precision(precision: usize) -> Self {
        Self {
            precision: Some(precision),
        }
    }
}

/// Format a coordinate as plain decimal text (never exponent notation)
pub fn format_number(value: f64, options: &FormatOptions) -> String {
    let text = match options.precision {
        None => format!("{}", value),
        Some(precision) => {
            let fixed = format!("{:.*}", precision, value);
            if fixed.contains('.') {
                fixed.trim_end_matches('0').trim_end_matches('.').to_string()
            } else {
                fixed
            }
        }
    };

    // Negative zero, or a small negative value rounded to zero
    if text.trim_start_matches('-').chars().all(|c| c == '0') {
        "0".to_string()
    } else {
        text
    }
}

/// Render one command as `<letter> <coords...>`
pub fn format_command(command: &OutputCommand, options: &FormatOptions) -> String {
    let mut text = String::from(command.letter());
    for value in command.coords() {
        text.push(' ');
        text.push_str(&format_number(value, options));
    }
    text
}

/// Join commands into a space separated path string
pub fn format_commands(commands: &[OutputCommand], options: &FormatOptions) -> String {
    commands
        .iter()
        .map(|command| format_command(command, options))
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for OutputCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_command(self, &FormatOptions::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::point::Point;

    #[test]
    fn test_shortest_representation() {
        let opts = FormatOptions::default();
        assert_eq!(format_number(12.0, &opts), "12");
        assert_eq!(format_number(-3.25, &opts), "-3.25");
        assert_eq!(format_number(0.1 + 0.2, &opts), "0.30000000000000004");
    }

    #[test]
    fn test_no_exponent_notation() {
        let opts = FormatOptions::default();
        assert_eq!(format_number(1e21, &opts), "1000000000000000000000");
        assert_eq!(format_number(1.5e-7, &opts), "0.00000015");
    }

    #[test]
    fn test_negative_zero() {
        let opts = FormatOptions::default();
        assert_eq!(format_number(-0.0, &opts), "0");
        assert_eq!(format_number(-0.0001, &FormatOptions::with_precision(2)), "0");
    }

    #[test]
    fn test_precision_trims_trailing_zeros() {
        let opts = FormatOptions::with_precision(3);
        assert_eq!(format_number(17.0710678, &opts), "17.071");
        assert_eq!(format_number(2.5, &opts), "2.5");
        assert_eq!(format_number(40.0, &opts), "40");
        assert_eq!(format_number(12.3456, &FormatOptions::with_precision(0)), "12");
    }

    #[test]
    fn test_format_commands() {
        let commands = [
            OutputCommand::MoveTo(Point::new(0.0, 0.0)),
            OutputCommand::LineTo(Point::new(10.0, -0.5)),
            OutputCommand::CubicTo {
                ctrl1: Point::new(1.0, 2.0),
                ctrl2: Point::new(3.0, 4.0),
                to: Point::new(5.0, 6.0),
            },
            OutputCommand::Close,
        ];
        assert_eq!(
            format_commands(&commands, &FormatOptions::default()),
            "M 0 0 L 10 -0.5 C 1 2 3 4 5 6 Z"
        );
        assert_eq!(commands[2].to_string(), "C 1 2 3 4 5 6");
        assert_eq!(format_commands(&[], &FormatOptions::default()), "");
    }

    #[test]
    fn test_format_command_uses_precision() {
        let line = OutputCommand::LineTo(Point::new(1.23456, -0.00001));
        assert_eq!(format_command(&line, &FormatOptions::with_precision(2)), "L 1.23 0");
        assert_eq!(format_command(&OutputCommand::Close, &FormatOptions::default()), "Z");
    }
}
