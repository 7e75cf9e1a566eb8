//! Lexer for SVG path data using logos

use logos::Logos;

use crate::error::ParseError;

/// Byte range in source text
pub type Span = std::ops::Range<usize>;

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r,]+")]
pub enum Token {
    // Any single letter; unknown letters are rejected by the validator so the
    // error can name the offending command
    #[regex(r"[A-Za-z]", |lex| lex.slice().chars().next())]
    Letter(char),

    // Sign, integer/decimal/leading-dot mantissa and optional exponent.
    // "10-5" lexes as two numbers since a sign can only start a number.
    // Literals that overflow to infinity are rejected.
    #[regex(r"[-+]?([0-9]+\.?[0-9]*|\.[0-9]+)([eE][-+]?[0-9]+)?", |lex| lex.slice().parse::<f64>().ok().filter(|n| n.is_finite()))]
    Number(f64),
}

/// Lex path data into tokens with spans
///
/// Unlike a DSL lexer that can skip garbage, path data is machine-written, so
/// any unrecognized character is reported rather than dropped.
pub fn lex(input: &str) -> Result<Vec<(Token, Span)>, ParseError> {
    Token::lexer(input)
        .spanned()
        .map(|(tok, span)| match tok {
            Ok(t) => Ok((t, span)),
            Err(()) => Err(ParseError::InvalidToken {
                text: input[span.clone()].to_string(),
                span,
            }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        lex(input).unwrap().into_iter().map(|(t, _)| t).collect()
    }

    #[test]
    fn test_letters_and_numbers() {
        assert_eq!(
            tokens("M130,10 L 5 6"),
            vec![
                Token::Letter('M'),
                Token::Number(130.0),
                Token::Number(10.0),
                Token::Letter('L'),
                Token::Number(5.0),
                Token::Number(6.0),
            ]
        );
    }

    #[test]
    fn test_adjacent_signed_numbers() {
        assert_eq!(
            tokens("10-5.5-.25"),
            vec![
                Token::Number(10.0),
                Token::Number(-5.5),
                Token::Number(-0.25),
            ]
        );
    }

    #[test]
    fn test_exponent() {
        assert_eq!(tokens("1e2 2.5E-1"), vec![Token::Number(100.0), Token::Number(0.25)]);
    }

    #[test]
    fn test_lowercase_letters() {
        assert_eq!(
            tokens("m 0 0 z"),
            vec![
                Token::Letter('m'),
                Token::Number(0.0),
                Token::Number(0.0),
                Token::Letter('z'),
            ]
        );
    }

    #[test]
    fn test_overflowing_number_is_rejected() {
        let err = lex("M 0 0 L 1e400 0").unwrap_err();
        assert!(
            matches!(err, ParseError::InvalidToken { ref text, ref span } if text == "1e400" && span.start == 8),
            "{err:?}"
        );
        assert_eq!(tokens("1e300"), vec![Token::Number(1e300)]);
    }

    #[test]
    fn test_invalid_character() {
        let err = lex("M 0 0 # 1").unwrap_err();
        match err {
            ParseError::InvalidToken { text, span } => {
                assert_eq!(text, "#");
                assert_eq!(span, 6..7);
            }
            other => panic!("Expected InvalidToken, got {:?}", other),
        }
    }
}
