//! Recursive-descent expression evaluator.
//!
//! ```text
//! expr    := term (('+' | '-') term)*
//! term    := unary (('*' | '/' | '%' | '&' | '|') unary)*
//! unary   := '-'? factor
//! factor  := literal | '(' expr ')'
//! literal := ('0' | '1' | '2' | 'T' | 't')+
//! ```
//!
//! `unary`'s own leading `-` already covers a negative literal, so
//! `literal` has no separate `-digits` alternative — one negation path
//! instead of two redundant ones. A literal containing `T`/`t` parses as
//! balanced ternary; otherwise it parses as unsigned ternary (a bare digit
//! run like `12` has no sign marker of its own, so it defaults to the
//! unsigned radix).

use crate::add;
use crate::bigint::BigInt;
use crate::convert::{self, Radix};
use crate::error::{Error, Result};
use crate::logic;
use crate::Kernel;

struct Parser<'a> {
    chars: Vec<char>,
    pos: usize,
    kernel: &'a Kernel,
}

fn is_literal_char(c: char) -> bool {
    matches!(c, '0' | '1' | '2' | 'T' | 't')
}

impl<'a> Parser<'a> {
    fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.pos += 1;
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    fn parse_expr(&mut self) -> Result<BigInt> {
        let mut lhs = self.parse_term()?;
        loop {
            self.skip_ws();
            match self.peek() {
                Some('+') => {
                    self.bump();
                    let rhs = self.parse_term()?;
                    lhs = add::add(&lhs, &rhs, &self.kernel.config)?;
                }
                Some('-') => {
                    self.bump();
                    let rhs = self.parse_term()?;
                    lhs = add::sub(&lhs, &rhs, &self.kernel.config)?;
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    fn parse_term(&mut self) -> Result<BigInt> {
        let mut lhs = self.parse_unary()?;
        loop {
            self.skip_ws();
            match self.peek() {
                Some('*') => {
                    self.bump();
                    let rhs = self.parse_unary()?;
                    lhs = self.kernel.mul(&lhs, &rhs)?;
                }
                Some('/') => {
                    self.bump();
                    let rhs = self.parse_unary()?;
                    lhs = self.kernel.divmod(&lhs, &rhs)?.0;
                }
                Some('%') => {
                    self.bump();
                    let rhs = self.parse_unary()?;
                    lhs = self.kernel.modulus(&lhs, &rhs)?;
                }
                Some('&') => {
                    self.bump();
                    let rhs = self.parse_unary()?;
                    lhs = logic::and(&lhs, &rhs, &self.kernel.config)?;
                }
                Some('|') => {
                    self.bump();
                    let rhs = self.parse_unary()?;
                    lhs = logic::or(&lhs, &rhs, &self.kernel.config)?;
                }
                _ => break,
            }
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<BigInt> {
        self.skip_ws();
        if self.peek() == Some('-') {
            self.bump();
            let v = self.parse_unary()?;
            return Ok(v.neg());
        }
        self.parse_factor()
    }

    fn parse_factor(&mut self) -> Result<BigInt> {
        self.skip_ws();
        match self.peek() {
            Some('(') => {
                self.bump();
                let v = self.parse_expr()?;
                self.skip_ws();
                match self.bump() {
                    Some(')') => Ok(v),
                    _ => Err(Error::ParseError {
                        pos: self.pos,
                        detail: "expected ')'".to_string(),
                    }),
                }
            }
            Some(c) if is_literal_char(c) => self.parse_literal(),
            Some(c) => Err(Error::ParseError {
                pos: self.pos,
                detail: format!("unexpected character '{c}'"),
            }),
            None => Err(Error::ParseError {
                pos: self.pos,
                detail: "unexpected end of input".to_string(),
            }),
        }
    }

    fn parse_literal(&mut self) -> Result<BigInt> {
        let start = self.pos;
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if is_literal_char(c) {
                text.push(c);
                self.pos += 1;
            } else {
                break;
            }
        }
        let radix = if text.chars().any(|c| c == 'T' || c == 't') {
            Radix::BalancedTernary
        } else {
            Radix::Ternary
        };
        convert::parse(&text, radix, &self.kernel.config).map_err(|e| match e {
            Error::InvalidInput { detail, .. } => Error::ParseError { pos: start, detail },
            other => other,
        })
    }
}

/// Evaluates a single infix expression to a [`BigInt`].
pub fn eval(kernel: &Kernel, text: &str) -> Result<BigInt> {
    let mut parser = Parser {
        chars: text.chars().collect(),
        pos: 0,
        kernel,
    };
    parser.skip_ws();
    let result = parser.parse_expr()?;
    parser.skip_ws();
    if parser.pos != parser.chars.len() {
        return Err(Error::ParseError {
            pos: parser.pos,
            detail: format!("unexpected trailing input '{}'", parser.chars[parser.pos]),
        });
    }
    Ok(result)
}
