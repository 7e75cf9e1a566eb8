//! Path-data parser using chumsky

use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::error::ParseError;
use crate::path::command::{CommandKind, PathCommand};
use crate::path::lexer::{self, Span, Token};

/// A command letter with its flat argument list, before validation
#[derive(Debug, Clone, PartialEq)]
struct RawCommand {
    letter: char,
    args: Vec<f64>,
    span: Span,
}

/// Parse path data into commands.
///
/// Argument groups following the first are split into separate commands of
/// the same kind; extra pairs after a moveto become linetos.
pub fn parse(input: &str) -> Result<Vec<PathCommand>, ParseError> {
    let len = input.len();
    let tokens = lexer::lex(input)?;

    let token_stream = Stream::from_iter(tokens.into_iter().map(|(tok, span)| (tok, span.into())))
        .map((len..len).into(), |(t, s): (_, _)| (t, s));

    let raw = path_parser()
        .parse(token_stream)
        .into_result()
        .map_err(|errs| {
            errs.into_iter()
                .next()
                .map(ParseError::from)
                .unwrap_or_else(|| ParseError::Syntax {
                    span: 0..len,
                    message: "Invalid path data".to_string(),
                    expected: Vec::new(),
                })
        })?;

    let mut commands = Vec::new();
    for cmd in raw {
        expand(cmd, &mut commands)?;
    }
    Ok(commands)
}

/// Helper to extract span range from chumsky's MapExtra
fn span_range(e: &impl chumsky::span::Span<Offset = usize>) -> std::ops::Range<usize> {
    e.start()..e.end()
}

fn path_parser<'a, I>() -> impl Parser<'a, I, Vec<RawCommand>, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = SimpleSpan>,
{
    let letter = select! {
        Token::Letter(c) => c,
    };

    let number = select! {
        Token::Number(n) => n,
    };

    let command = letter
        .then(number.repeated().collect::<Vec<_>>())
        .map_with(|(letter, args), e| RawCommand {
            letter,
            args,
            span: span_range(&e.span()),
        });

    command.repeated().collect().then_ignore(end())
}

/// Validate a raw command and split it into one command per argument group
fn expand(raw: RawCommand, out: &mut Vec<PathCommand>) -> Result<(), ParseError> {
    let (kind, relative) =
        CommandKind::from_letter(raw.letter).ok_or_else(|| ParseError::UnknownCommand {
            span: raw.span.clone(),
            letter: raw.letter,
        })?;

    let group_size = kind.group_size();
    let count_error = || ParseError::ArgumentCount {
        span: raw.span.clone(),
        letter: raw.letter,
        group_size,
        found: raw.args.len(),
    };

    if group_size == 0 {
        if !raw.args.is_empty() {
            return Err(count_error());
        }
        out.push(PathCommand::new(kind, relative, Vec::new()));
        return Ok(());
    }

    if raw.args.is_empty() || raw.args.len() % group_size != 0 {
        return Err(count_error());
    }

    for (i, group) in raw.args.chunks_exact(group_size).enumerate() {
        let kind = if kind == CommandKind::MoveTo && i > 0 {
            CommandKind::LineTo
        } else {
            kind
        };
        out.push(PathCommand::new(kind, relative, group.to_vec()));
    }
    Ok(())
}
