//! Error types for path-data parsing

use ariadne::{Color, Label, Report, ReportKind, Source};
use thiserror::Error;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error at {span:?}: {message}")]
    Syntax {
        span: Span,
        message: String,
        expected: Vec<String>,
    },

    #[error("Invalid character '{text}' at {span:?}")]
    InvalidToken { span: Span, text: String },

    #[error("Unknown path command '{letter}' at {span:?}")]
    UnknownCommand { span: Span, letter: char },

    #[error("Command '{letter}' at {span:?} takes groups of {group_size} arguments, found {found}")]
    ArgumentCount {
        span: Span,
        letter: char,
        group_size: usize,
        found: usize,
    },
}

impl ParseError {
    /// Source span of the offending input
    pub fn span(&self) -> &Span {
        match self {
            ParseError::Syntax { span, .. }
            | ParseError::InvalidToken { span, .. }
            | ParseError::UnknownCommand { span, .. }
            | ParseError::ArgumentCount { span, .. } => span,
        }
    }

    /// Format the error with source context using ariadne
    pub fn format(&self, source: &str, filename: &str) -> String {
        let message = self.to_string();
        let detail = match self {
            ParseError::Syntax { expected, .. } if !expected.is_empty() => {
                format!("{}\nExpected: {}", message, expected.join(", "))
            }
            _ => message.clone(),
        };

        let span = self.span().clone();
        let mut buf = Vec::new();
        let written = Report::build(ReportKind::Error, filename, span.start)
            .with_message(&message)
            .with_label(
                Label::new((filename, span))
                    .with_message(detail)
                    .with_color(Color::Red),
            )
            .finish()
            .write((filename, Source::from(source)), &mut buf);

        match written {
            Ok(()) => String::from_utf8_lossy(&buf).into_owned(),
            Err(_) => message,
        }
    }
}

impl<'a> From<chumsky::error::Rich<'a, crate::path::lexer::Token>> for ParseError {
    fn from(err: chumsky::error::Rich<'a, crate::path::lexer::Token>) -> Self {
        use chumsky::error::RichReason;

        let message = match err.reason() {
            RichReason::ExpectedFound { found, .. } => {
                let found_str = match found {
                    Some(tok) => format_token(tok),
                    None => "end of input".to_string(),
                };
                format!("Unexpected {}", found_str)
            }
            RichReason::Custom(msg) => msg.to_string(),
        };

        let expected: Vec<String> = err
            .expected()
            .filter_map(|e| match e {
                chumsky::error::RichPattern::Token(tok) => Some(format_token(tok)),
                chumsky::error::RichPattern::Label(label) => Some(label.to_string()),
                chumsky::error::RichPattern::EndOfInput => Some("end of input".to_string()),
                _ => None,
            })
            .collect();

        ParseError::Syntax {
            span: err.span().into_range(),
            message,
            expected,
        }
    }
}

/// Format a token for human-readable error messages
fn format_token(tok: &crate::path::lexer::Token) -> String {
    use crate::path::lexer::Token;
    match tok {
        Token::Letter(c) => format!("command '{}'", c),
        Token::Number(n) => format!("number {}", n),
    }
}
