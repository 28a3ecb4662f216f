// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Scanner and parser for dimensioned-value expressions like
//! `12 kg*m/s^2` or `(2+3)*4mm`.
//!
//! The parser is recursive descent, one function per precedence level.
//! There is no AST: each reduction applies the [`Quantity`] operators
//! directly, and the result is threaded through return values, so a
//! parse is reentrant and safe to run from any number of threads.

use crate::catalog;
use crate::types::{Quantity, QuantityError};
use std::error::Error;
use std::fmt;
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone)]
pub enum Token {
    Ident(String),
    /// Integer, fraction, and exponent parts of a numeric literal.
    Decimal(String, Option<String>, Option<String>),
    Plus,
    Minus,
    Asterisk,
    Slash,
    Caret,
    LPar,
    RPar,
    Eof,
    Error(String),
}

fn describe(token: &Token) -> String {
    match *token {
        Token::Ident(ref id) => format!("`{}`", id),
        Token::Decimal(_, _, _) => "number".to_owned(),
        Token::Plus => "`+`".to_owned(),
        Token::Minus => "`-`".to_owned(),
        Token::Asterisk => "`*`".to_owned(),
        Token::Slash => "`/`".to_owned(),
        Token::Caret => "`^`".to_owned(),
        Token::LPar => "`(`".to_owned(),
        Token::RPar => "`)`".to_owned(),
        Token::Eof => "eof".to_owned(),
        Token::Error(ref e) => format!("<{}>", e),
    }
}

/// A failed parse. Raised at the point of detection and propagated to
/// the caller; there is no partial result.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    /// Malformed token: unknown character or broken numeric literal.
    Lex(String),
    /// Token stream does not match the grammar.
    Syntax(String),
    /// An identifier that names no catalog unit.
    UnknownUnit {
        name: String,
        suggestion: Option<String>,
    },
    /// A reduction failed a dimensional check, e.g. `5m + 3kg`.
    Quantity(QuantityError),
}

impl fmt::Display for ParseError {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ParseError::Lex(ref e) => write!(fmt, "{}", e),
            ParseError::Syntax(ref e) => write!(fmt, "{}", e),
            ParseError::UnknownUnit {
                ref name,
                ref suggestion,
            } => match suggestion {
                Some(s) => write!(fmt, "No such unit {}, did you mean {}?", name, s),
                None => write!(fmt, "No such unit {}", name),
            },
            ParseError::Quantity(ref e) => write!(fmt, "{}", e),
        }
    }
}

impl Error for ParseError {}

impl From<QuantityError> for ParseError {
    fn from(err: QuantityError) -> ParseError {
        ParseError::Quantity(err)
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '°' || c == '_'
}

#[derive(Clone)]
pub struct TokenIterator<'a>(Peekable<Chars<'a>>);

impl<'a> TokenIterator<'a> {
    pub fn new(input: &'a str) -> TokenIterator<'a> {
        TokenIterator(input.chars().peekable())
    }
}

impl<'a> Iterator for TokenIterator<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.0.peek().is_none() {
            return Some(Token::Eof);
        }
        let res = match self.0.next().unwrap() {
            ' ' | '\t' | '\n' | '\r' => return self.next(),
            '(' => Token::LPar,
            ')' => Token::RPar,
            '+' => Token::Plus,
            '-' | '\u{2212}' => Token::Minus,
            '/' => Token::Slash,
            '^' => Token::Caret,
            '*' => {
                if self.0.peek() == Some(&'*') {
                    self.0.next();
                    Token::Caret
                } else {
                    Token::Asterisk
                }
            }
            x @ '0'..='9' | x @ '.' => {
                let mut integer = String::new();
                let mut frac = None;
                let mut exp = None;

                // integer component
                if x != '.' {
                    integer.push(x);
                    while let Some(c) = self.0.peek().cloned() {
                        match c {
                            '0'..='9' => integer.push(self.0.next().unwrap()),
                            '\u{2009}' | '_' => {
                                self.0.next();
                            }
                            _ => break,
                        }
                    }
                } else {
                    integer.push('0');
                }
                // fractional component
                if x == '.' || self.0.peek() == Some(&'.') {
                    let mut buf = String::new();
                    if x != '.' {
                        self.0.next();
                    }
                    while let Some(c) = self.0.peek().cloned() {
                        match c {
                            '0'..='9' => buf.push(self.0.next().unwrap()),
                            '\u{2009}' | '_' => {
                                self.0.next();
                            }
                            _ => break,
                        }
                    }
                    if buf.is_empty() {
                        return Some(Token::Error(
                            "Malformed number literal: No digits after decimal point".to_owned(),
                        ));
                    }
                    frac = Some(buf);
                }
                // exponent
                if let Some('e') = self.0.peek().cloned().map(|c| c.to_ascii_lowercase()) {
                    let mut buf = String::new();
                    self.0.next();
                    if let Some(c) = self.0.peek().cloned() {
                        match c {
                            '-' => {
                                buf.push(self.0.next().unwrap());
                            }
                            '+' => {
                                self.0.next();
                            }
                            _ => (),
                        }
                    }
                    while let Some(c) = self.0.peek().cloned() {
                        match c {
                            '0'..='9' => buf.push(self.0.next().unwrap()),
                            '\u{2009}' | '_' => {
                                self.0.next();
                            }
                            _ => break,
                        }
                    }
                    if buf.is_empty() {
                        return Some(Token::Error(
                            "Malformed number literal: No digits after exponent".to_owned(),
                        ));
                    }
                    exp = Some(buf);
                }
                Token::Decimal(integer, frac, exp)
            }
            x if is_ident_start(x) => {
                let mut buf = String::new();
                buf.push(x);
                while let Some(c) = self.0.peek().cloned() {
                    if c.is_alphanumeric() || c == '_' {
                        buf.push(self.0.next().unwrap());
                    } else {
                        break;
                    }
                }
                Token::Ident(buf)
            }
            x => Token::Error(format!("Unknown character `{}`", x)),
        };
        Some(res)
    }
}

pub type Iter<'a> = Peekable<TokenIterator<'a>>;

/// Assembles the scanned literal parts into a magnitude.
fn number_from_parts(
    integer: &str,
    frac: Option<&str>,
    exp: Option<&str>,
) -> Result<f64, ParseError> {
    use std::str::FromStr;

    let mut buf = integer.to_owned();
    if let Some(frac) = frac {
        buf.push('.');
        buf.push_str(frac);
    }
    if let Some(exp) = exp {
        buf.push('e');
        buf.push_str(exp);
    }
    f64::from_str(&buf)
        .map_err(|e| ParseError::Lex(format!("Malformed number literal `{}`: {}", buf, e)))
}

fn lookup_unit(name: &str) -> Result<Quantity, ParseError> {
    catalog::lookup(name).ok_or_else(|| ParseError::UnknownUnit {
        name: name.to_owned(),
        suggestion: catalog::suggest(name).map(|s| s.to_owned()),
    })
}

fn parse_atom(iter: &mut Iter<'_>) -> Result<Quantity, ParseError> {
    match iter.next().unwrap() {
        Token::Decimal(integer, frac, exp) => {
            let value = number_from_parts(
                &integer,
                frac.as_ref().map(|s| &**s),
                exp.as_ref().map(|s| &**s),
            )?;
            let num = Quantity::dimensionless(value);
            // `5 kg` is sugar for `5 * kg`
            match iter.peek() {
                Some(&Token::Ident(_)) => match iter.next() {
                    Some(Token::Ident(name)) => Ok(num * lookup_unit(&name)?),
                    _ => unreachable!(),
                },
                _ => Ok(num),
            }
        }
        Token::Ident(name) => lookup_unit(&name),
        Token::Minus => Ok(-parse_atom(iter)?),
        Token::Plus => parse_atom(iter),
        Token::LPar => {
            let res = parse_sum(iter)?;
            match iter.next().unwrap() {
                Token::RPar => Ok(res),
                Token::Error(e) => Err(ParseError::Lex(e)),
                x => Err(ParseError::Syntax(format!(
                    "Expected `)`, got {}",
                    describe(&x)
                ))),
            }
        }
        Token::Error(e) => Err(ParseError::Lex(e)),
        x => Err(ParseError::Syntax(format!(
            "Expected term, got {}",
            describe(&x)
        ))),
    }
}

fn parse_factor(iter: &mut Iter<'_>) -> Result<Quantity, ParseError> {
    let mut left = parse_atom(iter)?;
    while let Token::Caret = *iter.peek().unwrap() {
        iter.next();
        let right = parse_atom(iter)?;
        left = left.pow(&right)?;
    }
    Ok(left)
}

fn parse_term(iter: &mut Iter<'_>) -> Result<Quantity, ParseError> {
    let mut left = parse_factor(iter)?;
    loop {
        match *iter.peek().unwrap() {
            Token::Asterisk => {
                iter.next();
                left = left * parse_factor(iter)?;
            }
            Token::Slash => {
                iter.next();
                left = left / parse_factor(iter)?;
            }
            _ => return Ok(left),
        }
    }
}

fn parse_sum(iter: &mut Iter<'_>) -> Result<Quantity, ParseError> {
    let mut left = parse_term(iter)?;
    loop {
        match *iter.peek().unwrap() {
            Token::Plus => {
                iter.next();
                left = (left + parse_term(iter)?)?;
            }
            Token::Minus => {
                iter.next();
                left = (left - parse_term(iter)?)?;
            }
            _ => return Ok(left),
        }
    }
}

/// Parses a complete expression into a single [`Quantity`]. Trailing
/// tokens after the expression are a syntax error.
pub fn parse(input: &str) -> Result<Quantity, ParseError> {
    let mut iter = TokenIterator::new(input).peekable();
    let res = parse_sum(&mut iter)?;
    match iter.next().unwrap() {
        Token::Eof => Ok(res),
        // a malformed token after the expression is still a lex error,
        // not a syntax error about it
        Token::Error(e) => Err(ParseError::Lex(e)),
        x => Err(ParseError::Syntax(format!(
            "Expected eof, got {}",
            describe(&x)
        ))),
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::types::Unit;

    fn run(input: &str) -> String {
        match parse(input) {
            Ok(q) => q.to_user_string(),
            Err(e) => format!("<{}>", e),
        }
    }

    #[test]
    fn bare_number_unit() {
        assert_eq!(parse("1kg"), Ok(Quantity::new(1.0, Unit::MASS)));
        assert_eq!(parse("5 m"), Ok(Quantity::new(5000.0, Unit::LENGTH)));
    }

    #[test]
    fn add_assoc() {
        assert_eq!(run("1 + 2 - 3 + 4"), "4");
        assert_eq!(run("5m + 3m"), "8000 mm");
    }

    #[test]
    fn precedence() {
        assert_eq!(run("2 + 3 * 4"), "14");
        assert_eq!(run("(2 + 3) * 4"), "20");
        assert_eq!(run("12 / 3 / 2"), "2");
        assert_eq!(run("2 * 3 ^ 2"), "18");
    }

    #[test]
    fn pow_left_assoc() {
        // factor := factor ^ atom reduces left to right
        assert_eq!(run("2 ^ 3 ^ 2"), "64");
        assert_eq!(run("2 ** 3"), "8");
    }

    #[test]
    fn unary_signs() {
        assert_eq!(run("-5m"), "-5000 mm");
        assert_eq!(run("+5"), "5");
        assert_eq!(run("2 ^ -1"), "0.5");
        assert_eq!(run("--1"), "1");
    }

    #[test]
    fn compound_units() {
        assert_eq!(parse("12 kg*m/s^2"), Ok(Quantity::new(12000.0, Unit::FORCE)));
        assert_eq!(parse("1 N"), Ok(Quantity::new(1000.0, Unit::FORCE)));
    }

    #[test]
    fn mismatch_aborts() {
        assert_eq!(
            parse("5m + 3kg"),
            Err(ParseError::Quantity(QuantityError::UnitMismatch {
                left: Unit::LENGTH,
                right: Unit::MASS,
            }))
        );
    }

    #[test]
    fn unit_in_exponent() {
        assert_eq!(
            parse("2m ^ 3s"),
            Err(ParseError::Quantity(QuantityError::InvalidExponent(
                Unit::TIME
            )))
        );
    }

    #[test]
    fn unknown_unit_suggests() {
        assert_eq!(
            run("5 metre"),
            "<No such unit metre, did you mean meter?>"
        );
    }

    #[test]
    fn number_lex() {
        assert_eq!(
            run("1e"),
            "<Malformed number literal: No digits after exponent>"
        );
        assert_eq!(
            run("1."),
            "<Malformed number literal: No digits after decimal point>"
        );
        assert_eq!(run(".5"), "0.5");
        assert_eq!(run("1.5e3"), "1500");
        assert_eq!(run("1e-2"), "0.01");
        assert_eq!(run("1_000"), "1000");
    }

    #[test]
    fn unknown_character() {
        // a lex error is a lex error in every token position
        assert_eq!(run("@"), "<Unknown character `@`>");
        assert_eq!(run("5 @"), "<Unknown character `@`>");
        assert_eq!(run("(5 @"), "<Unknown character `@`>");
        assert_eq!(
            parse("5 @"),
            Err(ParseError::Lex("Unknown character `@`".to_owned()))
        );
    }

    #[test]
    fn stacked_pow_stays_bounded() {
        assert_eq!(
            parse("2m^30000^30000^30000"),
            Err(ParseError::Quantity(QuantityError::ExponentOutOfRange(
                30000.0
            )))
        );
    }

    #[test]
    fn syntax_errors() {
        assert_eq!(run("(5"), "<Expected `)`, got eof>");
        assert_eq!(run("5 +"), "<Expected term, got eof>");
        assert_eq!(run("5 5"), "<Expected eof, got number>");
        assert_eq!(run(""), "<Expected term, got eof>");
    }

    #[test]
    fn unicode_units() {
        assert_eq!(parse("5µm"), Ok(Quantity::new(5.0e-3, Unit::LENGTH)));
        assert_eq!(parse("90°"), Ok(Quantity::new(90.0, Unit::ANGLE)));
    }
}
