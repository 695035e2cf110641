//! Per-output elementwise transform expressions.
//!
//! A transform describes what the innermost loop body stores into one
//! output position. `$k` is the current element of input k, `@k` is the
//! current accumulated value of output k (both 1-based), and numbers are
//! f64 literals. Supported operators are `+ - * /`, unary minus, and
//! parentheses; division is true division even between integers.
//!
//! The default transform for output k is `@k + $1 * $2 * ... * $n`, the
//! sum-of-products Einstein convention.

use alloc::boxed::Box;
use alloc::format;
use alloc::string::String;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::iter::Peekable;
use core::str::Chars;

use serde::{Deserialize, Serialize};

use crate::error::{EinsumError, EinsumResult};
use crate::tensor::Value;

/// Binary operator in a transform expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    fn symbol(self) -> char {
        match self {
            BinOp::Add => '+',
            BinOp::Sub => '-',
            BinOp::Mul => '*',
            BinOp::Div => '/',
        }
    }
}

/// An elementwise transform expression tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TransformExpr {
    /// `$k`: the current element of input k (1-based).
    Input(usize),
    /// `@k`: the current accumulated value of output k (1-based).
    Output(usize),
    /// A numeric literal.
    Literal(f64),
    /// Unary negation.
    Neg(Box<TransformExpr>),
    /// A binary operation.
    Binary {
        op: BinOp,
        lhs: Box<TransformExpr>,
        rhs: Box<TransformExpr>,
    },
}

impl TransformExpr {
    /// Builds the default transform for output `output` of an operation
    /// with `num_inputs` inputs: `@output + $1 * $2 * ... * $n`.
    pub fn sum_of_products(num_inputs: usize, output: usize) -> TransformExpr {
        let mut product = TransformExpr::Input(1);
        for k in 2..=num_inputs {
            product = TransformExpr::Binary {
                op: BinOp::Mul,
                lhs: Box::new(product),
                rhs: Box::new(TransformExpr::Input(k)),
            };
        }
        TransformExpr::Binary {
            op: BinOp::Add,
            lhs: Box::new(TransformExpr::Output(output)),
            rhs: Box::new(product),
        }
    }

    /// Checks that every `$`/`@` reference is within range.
    pub fn validate(&self, num_inputs: usize, num_outputs: usize) -> EinsumResult<()> {
        match self {
            TransformExpr::Input(k) => {
                if *k == 0 || *k > num_inputs {
                    return Err(EinsumError::parse(format!(
                        "transform references input ${} but there are {} inputs",
                        k, num_inputs
                    )));
                }
                Ok(())
            }
            TransformExpr::Output(k) => {
                if *k == 0 || *k > num_outputs {
                    return Err(EinsumError::parse(format!(
                        "transform references output @{} but there are {} outputs",
                        k, num_outputs
                    )));
                }
                Ok(())
            }
            TransformExpr::Literal(_) => Ok(()),
            TransformExpr::Neg(inner) => inner.validate(num_inputs, num_outputs),
            TransformExpr::Binary { lhs, rhs, .. } => {
                lhs.validate(num_inputs, num_outputs)?;
                rhs.validate(num_inputs, num_outputs)
            }
        }
    }

    /// Evaluates the expression over the current input elements and output
    /// accumulator values.
    pub fn eval(&self, inputs: &[Value], outputs: &[Value]) -> Value {
        match self {
            TransformExpr::Input(k) => inputs[k - 1],
            TransformExpr::Output(k) => outputs[k - 1],
            TransformExpr::Literal(x) => Value::F64(*x),
            TransformExpr::Neg(inner) => -inner.eval(inputs, outputs),
            TransformExpr::Binary { op, lhs, rhs } => {
                let a = lhs.eval(inputs, outputs);
                let b = rhs.eval(inputs, outputs);
                match op {
                    BinOp::Add => a + b,
                    BinOp::Sub => a - b,
                    BinOp::Mul => a * b,
                    BinOp::Div => a / b,
                }
            }
        }
    }
}

impl PartialEq for TransformExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TransformExpr::Input(a), TransformExpr::Input(b)) => a == b,
            (TransformExpr::Output(a), TransformExpr::Output(b)) => a == b,
            (TransformExpr::Literal(a), TransformExpr::Literal(b)) => {
                a.to_bits() == b.to_bits()
            }
            (TransformExpr::Neg(a), TransformExpr::Neg(b)) => a == b,
            (
                TransformExpr::Binary { op, lhs, rhs },
                TransformExpr::Binary {
                    op: op2,
                    lhs: lhs2,
                    rhs: rhs2,
                },
            ) => op == op2 && lhs == lhs2 && rhs == rhs2,
            _ => false,
        }
    }
}

impl Eq for TransformExpr {}

impl Hash for TransformExpr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            TransformExpr::Input(k) | TransformExpr::Output(k) => k.hash(state),
            TransformExpr::Literal(x) => x.to_bits().hash(state),
            TransformExpr::Neg(inner) => inner.hash(state),
            TransformExpr::Binary { op, lhs, rhs } => {
                op.hash(state);
                lhs.hash(state);
                rhs.hash(state);
            }
        }
    }
}

impl fmt::Display for TransformExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformExpr::Input(k) => write!(f, "${}", k),
            TransformExpr::Output(k) => write!(f, "@{}", k),
            TransformExpr::Literal(x) => write!(f, "{}", x),
            TransformExpr::Neg(inner) => write!(f, "-{}", inner),
            TransformExpr::Binary { op, lhs, rhs } => {
                write!(f, "({} {} {})", lhs, op.symbol(), rhs)
            }
        }
    }
}

/// Parses one transform expression.
pub fn parse_transform(source: &str) -> EinsumResult<TransformExpr> {
    let mut parser = ExprParser {
        chars: source.chars().peekable(),
    };
    parser.skip_whitespace();
    if parser.chars.peek().is_none() {
        return Err(EinsumError::parse("empty transform expression"));
    }
    let expr = parser.expression()?;
    parser.skip_whitespace();
    if let Some(&c) = parser.chars.peek() {
        return Err(EinsumError::parse(format!(
            "unexpected character '{}' in transform expression",
            c
        )));
    }
    Ok(expr)
}

struct ExprParser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl ExprParser<'_> {
    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some(c) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn expression(&mut self) -> EinsumResult<TransformExpr> {
        let mut lhs = self.term()?;
        loop {
            self.skip_whitespace();
            let op = match self.chars.peek() {
                Some('+') => BinOp::Add,
                Some('-') => BinOp::Sub,
                _ => return Ok(lhs),
            };
            self.chars.next();
            let rhs = self.term()?;
            lhs = TransformExpr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn term(&mut self) -> EinsumResult<TransformExpr> {
        let mut lhs = self.factor()?;
        loop {
            self.skip_whitespace();
            let op = match self.chars.peek() {
                Some('*') => BinOp::Mul,
                Some('/') => BinOp::Div,
                _ => return Ok(lhs),
            };
            self.chars.next();
            let rhs = self.factor()?;
            lhs = TransformExpr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }
    }

    fn factor(&mut self) -> EinsumResult<TransformExpr> {
        self.skip_whitespace();
        if let Some('-') = self.chars.peek() {
            self.chars.next();
            return Ok(TransformExpr::Neg(Box::new(self.factor()?)));
        }
        self.primary()
    }

    fn primary(&mut self) -> EinsumResult<TransformExpr> {
        self.skip_whitespace();
        match self.chars.peek() {
            Some('(') => {
                self.chars.next();
                let inner = self.expression()?;
                self.skip_whitespace();
                if self.chars.next() != Some(')') {
                    return Err(EinsumError::parse("unbalanced parenthesis in transform"));
                }
                Ok(inner)
            }
            Some('$') => {
                self.chars.next();
                Ok(TransformExpr::Input(self.ordinal('$')?))
            }
            Some('@') => {
                self.chars.next();
                Ok(TransformExpr::Output(self.ordinal('@')?))
            }
            Some(c) if c.is_ascii_digit() => self.number(),
            Some(&c) => Err(EinsumError::parse(format!(
                "unexpected character '{}' in transform expression",
                c
            ))),
            None => Err(EinsumError::parse(
                "transform expression ended unexpectedly",
            )),
        }
    }

    fn ordinal(&mut self, sigil: char) -> EinsumResult<usize> {
        let mut digits = String::new();
        while matches!(self.chars.peek(), Some(c) if c.is_ascii_digit()) {
            digits.push(self.chars.next().unwrap_or('0'));
        }
        let value: usize = digits
            .parse()
            .map_err(|_| EinsumError::parse(format!("'{}' must be followed by a number", sigil)))?;
        if value == 0 {
            return Err(EinsumError::parse(format!(
                "'{}' references are 1-based, got {}0",
                sigil, sigil
            )));
        }
        Ok(value)
    }

    fn number(&mut self) -> EinsumResult<TransformExpr> {
        let mut text = String::new();
        let mut seen_dot = false;
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_digit() || (c == '.' && !seen_dot) {
                seen_dot |= c == '.';
                text.push(c);
                self.chars.next();
            } else {
                break;
            }
        }
        let value: f64 = text
            .parse()
            .map_err(|_| EinsumError::parse(format!("invalid number '{}' in transform", text)))?;
        Ok(TransformExpr::Literal(value))
    }
}
