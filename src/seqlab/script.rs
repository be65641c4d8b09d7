//! # Workbench Statements
//!
//! Scripts are plain text, one statement per line. `#` starts a comment, blank
//! lines are skipped and commas count as whitespace, so `[1, 2, 3]` and
//! `[1 2 3]` read the same.
//!
//! ```text
//! let arr = [1 2 3 4 5]
//! let s = slice arr 1 4
//! expect items s [2 3 4]
//! expect cap s 4
//! expect fails range slice arr 2 1
//! ```
//!
//! Statements:
//!
//! | form                          | effect                                   |
//! |-------------------------------|------------------------------------------|
//! | `let NAME = EXPR`             | bind or rebind a name                    |
//! | `EXPR`                        | evaluate and show without binding        |
//! | `set NAME INDEX VALUE`        | write one element                        |
//! | `get NAME INDEX`              | read one element                         |
//! | `print NAME`                  | show a binding                           |
//! | `call NAME`                   | invoke an accumulator                    |
//! | `expect ...`                  | see [`Expectation`]                      |
//!
//! Expressions: `nil`, `[v ...]`, `make LEN [CAP]`, `slice NAME START END`,
//! `append NAME v ...`, `copy NAME`, `accumulator START STEP`.
//!
//! Indexes are parsed as signed integers. Negative values are legal syntax
//! and are rejected with a typed bounds error when the statement runs.
//!
//! `expect fails KIND STATEMENT` runs the wrapped statement for real. If it
//! unexpectedly succeeds its effects stay: a wrapped `set` writes to the
//! store, a wrapped `append` or `make` is evaluated and shown. Wrapping `let`
//! or another `expect` is a parse error, so a failure check never rebinds a
//! name.

use crate::error::{Result, SeqlabError};
use crate::seq::SeqErrorKind;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Nil,
    Literal(Vec<i64>),
    Make { len: usize, cap: Option<usize> },
    Slice { source: String, start: i64, end: i64 },
    Append { source: String, values: Vec<i64> },
    Copy { source: String },
    Accumulator { start: i64, step: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expectation {
    Len { target: String, expected: usize },
    Cap { target: String, expected: usize },
    Items { target: String, expected: Vec<i64> },
    Get { target: String, index: i64, expected: i64 },
    Value { target: String, expected: i64 },
    Shared { left: String, right: String },
    Distinct { left: String, right: String },
    Fails { kind: SeqErrorKind, statement: Box<Statement> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Let { name: String, expr: Expr },
    Eval(Expr),
    Set { target: String, index: i64, value: i64 },
    Get { target: String, index: i64 },
    Print { target: String },
    Call { target: String },
    Expect(Expectation),
}

/// A statement with the line it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub number: usize,
    pub source: String,
    pub statement: Statement,
}

/// Parses a whole script. The first malformed line aborts with its number.
pub fn parse_script(source: &str) -> Result<Vec<Line>> {
    let mut lines = Vec::new();
    for (i, raw) in source.lines().enumerate() {
        let text = strip_comment(raw).trim();
        if text.is_empty() {
            continue;
        }
        let statement = text.parse::<Statement>().map_err(|message| SeqlabError::Parse {
            line: i + 1,
            message,
        })?;
        lines.push(Line {
            number: i + 1,
            source: text.to_string(),
            statement,
        });
    }
    Ok(lines)
}

fn strip_comment(line: &str) -> &str {
    match line.find('#') {
        Some(pos) => &line[..pos],
        None => line,
    }
}

fn tokenize(s: &str) -> Vec<String> {
    s.replace(',', " ")
        .replace('[', " [ ")
        .replace(']', " ] ")
        .replace('=', " = ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Cursor over the tokens of one statement.
struct Tokens {
    items: Vec<String>,
    pos: usize,
}

impl Tokens {
    fn new(s: &str) -> Self {
        Self {
            items: tokenize(s),
            pos: 0,
        }
    }

    fn next(&mut self, what: &str) -> std::result::Result<String, String> {
        let token = self
            .items
            .get(self.pos)
            .cloned()
            .ok_or_else(|| format!("expected {}", what))?;
        self.pos += 1;
        Ok(token)
    }

    fn peek(&self) -> Option<&str> {
        self.items.get(self.pos).map(String::as_str)
    }

    fn name(&mut self) -> std::result::Result<String, String> {
        let token = self.next("a name")?;
        if is_name(&token) {
            Ok(token)
        } else {
            Err(format!("invalid name: {}", token))
        }
    }

    fn int(&mut self, what: &str) -> std::result::Result<i64, String> {
        let token = self.next(what)?;
        token
            .parse()
            .map_err(|_| format!("expected {}, found {}", what, token))
    }

    fn count(&mut self, what: &str) -> std::result::Result<usize, String> {
        let token = self.next(what)?;
        token
            .parse()
            .map_err(|_| format!("expected non-negative {}, found {}", what, token))
    }

    fn keyword(&mut self, expected: &str) -> std::result::Result<(), String> {
        let token = self.next(&format!("'{}'", expected))?;
        if token == expected {
            Ok(())
        } else {
            Err(format!("expected '{}', found {}", expected, token))
        }
    }

    /// `[v ...]`
    fn list(&mut self) -> std::result::Result<Vec<i64>, String> {
        self.keyword("[")?;
        let mut values = Vec::new();
        loop {
            match self.peek() {
                Some("]") => {
                    self.pos += 1;
                    return Ok(values);
                }
                Some(_) => values.push(self.int("a value")?),
                None => return Err("unterminated list, expected ']'".to_string()),
            }
        }
    }

    /// Remaining tokens as values.
    fn values(&mut self) -> std::result::Result<Vec<i64>, String> {
        let mut values = Vec::new();
        while self.peek().is_some() {
            values.push(self.int("a value")?);
        }
        Ok(values)
    }

    fn rest(&self) -> String {
        self.items[self.pos..].join(" ")
    }

    fn finish(&self) -> std::result::Result<(), String> {
        match self.peek() {
            None => Ok(()),
            Some(extra) => Err(format!("unexpected trailing input: {}", extra)),
        }
    }
}

fn is_name(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}

fn parse_expr(tokens: &mut Tokens) -> std::result::Result<Expr, String> {
    if tokens.peek() == Some("[") {
        return tokens.list().map(Expr::Literal);
    }
    let head = tokens.next("an expression")?;
    match head.as_str() {
        "nil" => Ok(Expr::Nil),
        "make" => {
            let len = tokens.count("length")?;
            let cap = match tokens.peek() {
                Some(_) => Some(tokens.count("capacity")?),
                None => None,
            };
            Ok(Expr::Make { len, cap })
        }
        "slice" => Ok(Expr::Slice {
            source: tokens.name()?,
            start: tokens.int("start")?,
            end: tokens.int("end")?,
        }),
        "append" => Ok(Expr::Append {
            source: tokens.name()?,
            values: tokens.values()?,
        }),
        "copy" => Ok(Expr::Copy {
            source: tokens.name()?,
        }),
        "accumulator" => Ok(Expr::Accumulator {
            start: tokens.int("start")?,
            step: tokens.int("step")?,
        }),
        other => Err(format!("unknown statement: {}", other)),
    }
}

fn parse_expectation(tokens: &mut Tokens) -> std::result::Result<Expectation, String> {
    let what = tokens.next("an expectation")?;
    match what.as_str() {
        "len" => Ok(Expectation::Len {
            target: tokens.name()?,
            expected: tokens.count("length")?,
        }),
        "cap" => Ok(Expectation::Cap {
            target: tokens.name()?,
            expected: tokens.count("capacity")?,
        }),
        "items" => Ok(Expectation::Items {
            target: tokens.name()?,
            expected: tokens.list()?,
        }),
        "get" => Ok(Expectation::Get {
            target: tokens.name()?,
            index: tokens.int("index")?,
            expected: tokens.int("value")?,
        }),
        "value" => Ok(Expectation::Value {
            target: tokens.name()?,
            expected: tokens.int("value")?,
        }),
        "shared" => Ok(Expectation::Shared {
            left: tokens.name()?,
            right: tokens.name()?,
        }),
        "distinct" => Ok(Expectation::Distinct {
            left: tokens.name()?,
            right: tokens.name()?,
        }),
        "fails" => {
            let kind = tokens.next("a failure kind")?.parse()?;
            let inner = tokens.rest();
            tokens.pos = tokens.items.len();
            let statement = inner.parse::<Statement>()?;
            match statement {
                Statement::Expect(_) => {
                    return Err("expect fails cannot wrap another expectation".to_string())
                }
                Statement::Let { .. } => {
                    return Err(
                        "expect fails cannot wrap let; use the bare expression".to_string()
                    )
                }
                _ => {}
            }
            Ok(Expectation::Fails {
                kind,
                statement: Box::new(statement),
            })
        }
        other => Err(format!("unknown expectation: {}", other)),
    }
}

impl FromStr for Statement {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut tokens = Tokens::new(s);
        let statement = match tokens.peek() {
            None => return Err("empty statement".to_string()),
            Some("let") => {
                tokens.pos += 1;
                let name = tokens.name()?;
                tokens.keyword("=")?;
                Statement::Let {
                    name,
                    expr: parse_expr(&mut tokens)?,
                }
            }
            Some("set") => {
                tokens.pos += 1;
                Statement::Set {
                    target: tokens.name()?,
                    index: tokens.int("index")?,
                    value: tokens.int("value")?,
                }
            }
            Some("get") => {
                tokens.pos += 1;
                Statement::Get {
                    target: tokens.name()?,
                    index: tokens.int("index")?,
                }
            }
            Some("print") => {
                tokens.pos += 1;
                Statement::Print {
                    target: tokens.name()?,
                }
            }
            Some("call") => {
                tokens.pos += 1;
                Statement::Call {
                    target: tokens.name()?,
                }
            }
            Some("expect") => {
                tokens.pos += 1;
                Statement::Expect(parse_expectation(&mut tokens)?)
            }
            Some(_) => Statement::Eval(parse_expr(&mut tokens)?),
        };
        tokens.finish()?;
        Ok(statement)
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, values: &[i64]) -> fmt::Result {
    write!(f, "[")?;
    for (i, v) in values.iter().enumerate() {
        if i > 0 {
            write!(f, " ")?;
        }
        write!(f, "{}", v)?;
    }
    write!(f, "]")
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Nil => write!(f, "nil"),
            Expr::Literal(values) => write_list(f, values),
            Expr::Make { len, cap: None } => write!(f, "make {}", len),
            Expr::Make {
                len,
                cap: Some(cap),
            } => write!(f, "make {} {}", len, cap),
            Expr::Slice { source, start, end } => write!(f, "slice {} {} {}", source, start, end),
            Expr::Append { source, values } => {
                write!(f, "append {}", source)?;
                for v in values {
                    write!(f, " {}", v)?;
                }
                Ok(())
            }
            Expr::Copy { source } => write!(f, "copy {}", source),
            Expr::Accumulator { start, step } => write!(f, "accumulator {} {}", start, step),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Let { name, expr } => write!(f, "let {} = {}", name, expr),
            Statement::Eval(expr) => write!(f, "{}", expr),
            Statement::Set {
                target,
                index,
                value,
            } => write!(f, "set {} {} {}", target, index, value),
            Statement::Get { target, index } => write!(f, "get {} {}", target, index),
            Statement::Print { target } => write!(f, "print {}", target),
            Statement::Call { target } => write!(f, "call {}", target),
            Statement::Expect(expectation) => write!(f, "expect {}", expectation),
        }
    }
}

impl fmt::Display for Expectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expectation::Len { target, expected } => write!(f, "len {} {}", target, expected),
            Expectation::Cap { target, expected } => write!(f, "cap {} {}", target, expected),
            Expectation::Items { target, expected } => {
                write!(f, "items {} ", target)?;
                write_list(f, expected)
            }
            Expectation::Get {
                target,
                index,
                expected,
            } => write!(f, "get {} {} {}", target, index, expected),
            Expectation::Value { target, expected } => write!(f, "value {} {}", target, expected),
            Expectation::Shared { left, right } => write!(f, "shared {} {}", left, right),
            Expectation::Distinct { left, right } => write!(f, "distinct {} {}", left, right),
            Expectation::Fails { kind, statement } => write!(f, "fails {} {}", kind, statement),
        }
    }
}
