//! Path command model and serialization

use std::fmt::Write;

use crate::geometry::Point;

/// Kind of a path-data command, independent of its absolute/relative variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    MoveTo,
    LineTo,
    Horizontal,
    Vertical,
    CurveTo,
    Arc,
    Close,
}

impl CommandKind {
    /// Map a command letter to its kind and relative flag
    pub fn from_letter(letter: char) -> Option<(CommandKind, bool)> {
        let kind = match letter.to_ascii_uppercase() {
            'M' => CommandKind::MoveTo,
            'L' => CommandKind::LineTo,
            'H' => CommandKind::Horizontal,
            'V' => CommandKind::Vertical,
            'C' => CommandKind::CurveTo,
            'A' => CommandKind::Arc,
            'Z' => CommandKind::Close,
            _ => return None,
        };
        Some((kind, letter.is_ascii_lowercase()))
    }

    /// Uppercase (absolute) letter
    pub fn letter(self) -> char {
        match self {
            CommandKind::MoveTo => 'M',
            CommandKind::LineTo => 'L',
            CommandKind::Horizontal => 'H',
            CommandKind::Vertical => 'V',
            CommandKind::CurveTo => 'C',
            CommandKind::Arc => 'A',
            CommandKind::Close => 'Z',
        }
    }

    /// Number of arguments in one argument group
    pub fn group_size(self) -> usize {
        match self {
            CommandKind::MoveTo | CommandKind::LineTo => 2,
            CommandKind::Horizontal | CommandKind::Vertical => 1,
            CommandKind::CurveTo => 6,
            CommandKind::Arc => 7,
            CommandKind::Close => 0,
        }
    }
}

/// A single path command with one argument group
#[derive(Debug, Clone, PartialEq)]
pub struct PathCommand {
    pub kind: CommandKind,
    pub relative: bool,
    pub args: Vec<f64>,
}

impl PathCommand {
    pub fn new(kind: CommandKind, relative: bool, args: Vec<f64>) -> Self {
        Self {
            kind,
            relative,
            args,
        }
    }

    /// Absolute command shorthand
    pub fn absolute(kind: CommandKind, args: Vec<f64>) -> Self {
        Self::new(kind, false, args)
    }

    /// Letter as it appears in path data
    pub fn letter(&self) -> char {
        let letter = self.kind.letter();
        if self.relative {
            letter.to_ascii_lowercase()
        } else {
            letter
        }
    }
}

/// Serialize commands back into path data.
///
/// Numbers use the shortest representation that parses back to the same
/// value; arc flags are written as `0`/`1`.
pub fn serialize(commands: &[PathCommand]) -> String {
    let mut d = String::new();
    for (i, cmd) in commands.iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        d.push(cmd.letter());
        for (index, arg) in cmd.args.iter().enumerate() {
            let is_flag = cmd.kind == CommandKind::Arc && (index == 3 || index == 4);
            if is_flag {
                d.push_str(if *arg != 0.0 { " 1" } else { " 0" });
            } else {
                // Adding 0.0 folds -0 into 0
                let _ = write!(d, " {}", arg + 0.0);
            }
        }
    }
    d
}

/// Resolve relative commands against a running cursor.
///
/// `Z` returns the cursor to the start of the current subpath. `H`/`V`
/// become `L` so the result only contains M, L, C, A and Z.
pub fn to_absolute(commands: &[PathCommand]) -> Vec<PathCommand> {
    let mut current = Point::new(0.0, 0.0);
    let mut subpath_start = current;
    let mut result = Vec::with_capacity(commands.len());

    for cmd in commands {
        let offset = if cmd.relative { current } else { Point::new(0.0, 0.0) };
        let absolute = match cmd.kind {
            CommandKind::MoveTo | CommandKind::LineTo | CommandKind::CurveTo => {
                let args: Vec<f64> = cmd
                    .args
                    .chunks_exact(2)
                    .flat_map(|pair| [pair[0] + offset.x, pair[1] + offset.y])
                    .collect();
                current = Point::new(args[args.len() - 2], args[args.len() - 1]);
                if cmd.kind == CommandKind::MoveTo {
                    subpath_start = current;
                }
                PathCommand::absolute(cmd.kind, args)
            }
            CommandKind::Horizontal => {
                current = Point::new(cmd.args[0] + offset.x, current.y);
                PathCommand::absolute(CommandKind::LineTo, vec![current.x, current.y])
            }
            CommandKind::Vertical => {
                current = Point::new(current.x, cmd.args[0] + offset.y);
                PathCommand::absolute(CommandKind::LineTo, vec![current.x, current.y])
            }
            CommandKind::Arc => {
                let mut args = cmd.args.clone();
                args[5] += offset.x;
                args[6] += offset.y;
                current = Point::new(args[5], args[6]);
                PathCommand::absolute(CommandKind::Arc, args)
            }
            CommandKind::Close => {
                current = subpath_start;
                PathCommand::absolute(CommandKind::Close, Vec::new())
            }
        };
        result.push(absolute);
    }

    result
}
