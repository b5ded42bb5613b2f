//! Path data parser
//!
//! Parsing happens in two steps. A single lexical pass splits the input into
//! command letters and numbers (numbers are matched greedily with nom's float
//! recognizer, so `10-5` is two numbers and `1.5.5` is `1.5` then `.5`). The
//! token stream is then grouped: each letter takes every number up to the next
//! letter, and the group is split into one [`PathCommand`] per parameter group.
//!
//! Extra coordinate pairs after a move are implicit line commands of the same
//! absoluteness, following the SVG path grammar.

use std::ops::Range;

use nom::number::complete::recognize_float;
use tracing::debug;

use crate::command::{CommandKind, PathCommand};
use crate::error::{MalformedPathError, MalformedReason, Result};

/// A lexical unit of path data
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Token<'a> {
    Command {
        kind: CommandKind,
        relative: bool,
        offset: usize,
    },
    Number {
        value: f64,
        offset: usize,
        text: &'a str,
    },
}

/// A parsed command with the byte range of the source text it came from
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SpannedCommand {
    pub command: PathCommand,
    pub span: Range<usize>,
}

fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == ','
}

/// Split path data into command and number tokens
pub(crate) fn tokenize(input: &str) -> Result<Vec<Token<'_>>> {
    let mut tokens = Vec::new();
    let mut rest = input;

    loop {
        rest = rest.trim_start_matches(is_separator);
        let offset = input.len() - rest.len();
        let Some(c) = rest.chars().next() else {
            break;
        };

        if c.is_alphabetic() {
            let (kind, relative) = CommandKind::from_letter(c).ok_or_else(|| {
                MalformedPathError::new(offset, c.to_string(), MalformedReason::UnknownCommand(c))
            })?;
            tokens.push(Token::Command {
                kind,
                relative,
                offset,
            });
            rest = &rest[c.len_utf8()..];
            continue;
        }

        let (remaining, text) = recognize_float::<_, nom::error::Error<&str>>(rest)
            .map_err(|_| invalid_number(rest, offset))?;
        let value: f64 = text.parse().map_err(|_| invalid_number(rest, offset))?;
        if !value.is_finite() {
            return Err(MalformedPathError::new(
                offset,
                text,
                MalformedReason::NonFiniteNumber,
            ));
        }
        tokens.push(Token::Number {
            value,
            offset,
            text,
        });
        rest = remaining;
    }

    Ok(tokens)
}

/// Error for an unlexable token, reporting everything up to the next separator
fn invalid_number(rest: &str, offset: usize) -> MalformedPathError {
    let end = rest
        .char_indices()
        .skip(1)
        .find(|&(_, c)| is_separator(c) || c.is_alphabetic())
        .map_or(rest.len(), |(i, _)| i);
    MalformedPathError::new(offset, &rest[..end], MalformedReason::InvalidNumber)
}

/// Parse path data into commands, one per parameter group
///
/// An empty (or whitespace-only) string parses to an empty list.
pub fn parse_path(input: &str) -> Result<Vec<PathCommand>> {
    Ok(parse_spanned(input)?
        .into_iter()
        .map(|spanned| spanned.command)
        .collect())
}

/// Parse path data, keeping the source range of every command
///
/// The first command of a group spans its letter; repeats span only their own
/// numbers.
pub(crate) fn parse_spanned(input: &str) -> Result<Vec<SpannedCommand>> {
    let tokens = tokenize(input)?;
    let mut commands = Vec::with_capacity(tokens.len() / 2);
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        let (kind, relative, offset) = match *token {
            Token::Command {
                kind,
                relative,
                offset,
            } => (kind, relative, offset),
            Token::Number { offset, text, .. } => {
                return Err(MalformedPathError::new(
                    offset,
                    text,
                    MalformedReason::MissingCommand,
                ));
            }
        };

        let mut group: Vec<(f64, usize, &str)> = Vec::new();
        while let Some(&&Token::Number {
            value,
            offset,
            text,
        }) = iter.peek()
        {
            group.push((value, offset, text));
            iter.next();
        }

        push_group(&mut commands, input, kind, relative, offset, &group)?;
    }

    debug!(
        commands = commands.len(),
        bytes = input.len(),
        "parsed path data"
    );
    Ok(commands)
}

/// Split one letter's numbers into commands of exactly the kind's arity
fn push_group(
    commands: &mut Vec<SpannedCommand>,
    input: &str,
    kind: CommandKind,
    relative: bool,
    offset: usize,
    group: &[(f64, usize, &str)],
) -> Result<()> {
    let letter = kind.letter(relative);
    let arity = kind.arity();
    let end = group
        .last()
        .map_or(offset + letter.len_utf8(), |&(_, o, text)| o + text.len());
    let arity_error = || {
        MalformedPathError::new(
            offset,
            &input[offset..end],
            MalformedReason::ArityMismatch {
                command: letter,
                expected: arity,
                found: group.len(),
            },
        )
    };

    if arity == 0 {
        if !group.is_empty() {
            return Err(arity_error());
        }
        commands.push(SpannedCommand {
            command: PathCommand::ClosePath,
            span: offset..offset + letter.len_utf8(),
        });
        return Ok(());
    }

    if group.is_empty() || group.len() % arity != 0 {
        return Err(arity_error());
    }

    let values: Vec<f64> = group.iter().map(|&(value, _, _)| value).collect();
    for (index, chunk) in values.chunks_exact(arity).enumerate() {
        if kind == CommandKind::ArcTo {
            for flag_index in [3, 4] {
                let (value, flag_offset, text) = group[index * arity + flag_index];
                if value != 0.0 && value != 1.0 {
                    return Err(MalformedPathError::new(
                        flag_offset,
                        text,
                        MalformedReason::InvalidFlag {
                            command: letter,
                            value,
                        },
                    ));
                }
            }
        }

        let group_kind = if kind == CommandKind::MoveTo && index > 0 {
            CommandKind::LineTo
        } else {
            kind
        };
        let command =
            PathCommand::from_params(group_kind, relative, chunk).ok_or_else(arity_error)?;
        let (_, last_offset, last_text) = group[index * arity + arity - 1];
        let start = if index == 0 {
            offset
        } else {
            group[index * arity].1
        };
        commands.push(SpannedCommand {
            command,
            span: start..last_offset + last_text.len(),
        });
    }

    Ok(())
}
