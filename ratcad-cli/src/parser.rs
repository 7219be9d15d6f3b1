//! The infix polynomial grammar of spec.md §6: `+ - * /` at the usual
//! precedences, `^` for nonnegative-integer-literal exponentiation,
//! parenthesization, rational literals (`a/b` or a plain integer), and
//! identifiers bound to the caller's declared variable order. Built with
//! `nom` combinators in the style of the retrieval pack's own expression
//! parsers rather than a hand-rolled state machine.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, digit1, multispace0},
    combinator::{map, opt, recognize},
    multi::{fold_many0, many0_count},
    sequence::{delimited, pair, preceded},
};

use ratcad_nzq::{Integer, Rational};

/// An expression tree over rational-literal leaves and named variables.
/// Evaluated against a [`crate::eval::VariableBinding`] to produce a
/// [`ratcad_rings::MultivariatePoly`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
    Constant(Rational),
    Variable(String),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    /// `a / b`: the divisor must evaluate to a nonzero constant (§6's
    /// grammar only gives rationals a `/` form; polynomial division is not
    /// part of the expression language).
    Div(Box<Expr>, Box<Expr>),
    /// `base ^ exponent`, exponent a nonnegative integer literal.
    Pow(Box<Expr>, u32),
}

/// The relational operator of a constraint line (§6: `polynomial relop 0`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelOp {
    Lt,
    Eq,
    Gt,
}

fn ws<'a, O>(
    mut inner: impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>> {
    move |input: &'a str| {
        let (input, _) = multispace0(input)?;
        let (input, out) = inner.parse(input)?;
        let (input, _) = multispace0(input)?;
        Ok((input, out))
    }
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0_count(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

fn integer_literal(input: &str) -> IResult<&str, &str> {
    recognize(pair(opt(char('-')), digit1)).parse(input)
}

/// `a/b` or a plain integer, per §6 ("rationals are written `a/b`").
fn rational_literal(input: &str) -> IResult<&str, Rational> {
    let (input, num) = integer_literal(input)?;
    let (input, den) = opt(preceded(char('/'), digit1)).parse(input)?;
    let numerator: Integer = num.parse().map_err(|_| {
        nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Digit))
    })?;
    let rational = match den {
        Some(d) => {
            let denominator: Integer = d.parse().map_err(|_| {
                nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Digit))
            })?;
            Rational::from_integers(numerator, denominator)
        }
        None => Rational::from(numerator),
    };
    Ok((input, rational))
}

fn atom(input: &str) -> IResult<&str, Expr> {
    ws(alt((
        map(rational_literal, Expr::Constant),
        map(identifier, |s: &str| Expr::Variable(s.to_string())),
        delimited(ws(char('(')), expr, ws(char(')'))),
        map(preceded(ws(char('-')), atom), |e| Expr::Neg(Box::new(e))),
    )))
    .parse(input)
}

/// `atom (^ nonneg-int-literal)?`, non-associative (a second `^` would need
/// parentheses, matching the spec's "nonneg integer literal exponent only").
fn power(input: &str) -> IResult<&str, Expr> {
    let (input, base) = atom(input)?;
    let (input, exp) = opt(preceded(ws(char('^')), ws(digit1))).parse(input)?;
    match exp {
        Some(digits) => {
            let n: u32 = digits.parse().map_err(|_| {
                nom::Err::Error(nom::error::Error::new(input, nom::error::ErrorKind::Digit))
            })?;
            Ok((input, Expr::Pow(Box::new(base), n)))
        }
        None => Ok((input, base)),
    }
}

fn term(input: &str) -> IResult<&str, Expr> {
    let (input, first) = power(input)?;
    fold_many0(
        pair(ws(alt((char('*'), char('/')))), power),
        move || first.clone(),
        |acc, (op, rhs)| match op {
            '*' => Expr::Mul(Box::new(acc), Box::new(rhs)),
            _ => Expr::Div(Box::new(acc), Box::new(rhs)),
        },
    )
    .parse(input)
}

pub fn expr(input: &str) -> IResult<&str, Expr> {
    let (input, first) = term(input)?;
    fold_many0(
        pair(ws(alt((char('+'), char('-')))), term),
        move || first.clone(),
        |acc, (op, rhs)| match op {
            '+' => Expr::Add(Box::new(acc), Box::new(rhs)),
            _ => Expr::Sub(Box::new(acc), Box::new(rhs)),
        },
    )
    .parse(input)
}

fn relop(input: &str) -> IResult<&str, RelOp> {
    ws(alt((
        map(char('<'), |_| RelOp::Lt),
        map(char('='), |_| RelOp::Eq),
        map(char('>'), |_| RelOp::Gt),
    )))
    .parse(input)
}

/// A full constraint line: `polynomial relop 0`.
pub fn constraint_line(input: &str) -> IResult<&str, (Expr, RelOp)> {
    let (input, e) = expr(input)?;
    let (input, op) = relop(input)?;
    let (input, _) = ws(char('0')).parse(input)?;
    Ok((input, (e, op)))
}

/// The variable-order header line: comma-separated identifiers.
pub fn variable_order_line(input: &str) -> IResult<&str, Vec<String>> {
    let (input, first) = ws(identifier).parse(input)?;
    let (input, rest) = nom::multi::many0(preceded(ws(char(',')), ws(identifier))).parse(input)?;
    let mut names = vec![first.to_string()];
    names.extend(rest.into_iter().map(|s| s.to_string()));
    Ok((input, names))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_plain_integer() {
        let (rest, e) = expr("42").unwrap();
        assert_eq!(rest, "");
        assert_eq!(e, Expr::Constant(Rational::from(42)));
    }

    #[test]
    fn parses_a_rational_literal() {
        let (_, e) = expr("3/4").unwrap();
        assert_eq!(e, Expr::Constant(Rational::from_integers(3, 4)));
    }

    #[test]
    fn parses_sum_with_precedence() {
        let (_, e) = expr("x + 2*y").unwrap();
        match e {
            Expr::Add(lhs, rhs) => {
                assert_eq!(*lhs, Expr::Variable("x".to_string()));
                assert!(matches!(*rhs, Expr::Mul(_, _)));
            }
            other => panic!("expected Add, got {other:?}"),
        }
    }

    #[test]
    fn parses_exponentiation() {
        let (_, e) = expr("x^4").unwrap();
        assert_eq!(e, Expr::Pow(Box::new(Expr::Variable("x".to_string())), 4));
    }

    #[test]
    fn parses_parenthesized_expression() {
        let (_, e) = expr("(x + 1) * (x - 1)").unwrap();
        assert!(matches!(e, Expr::Mul(_, _)));
    }

    #[test]
    fn parses_unary_minus() {
        let (_, e) = expr("-x^2 + 1").unwrap();
        assert!(matches!(e, Expr::Add(_, _)));
    }

    #[test]
    fn parses_a_constraint_line() {
        let (rest, (_, op)) = constraint_line("x^2 + y^2 - 1 = 0").unwrap();
        assert_eq!(rest.trim(), "");
        assert_eq!(op, RelOp::Eq);
    }

    #[test]
    fn parses_a_variable_order_header() {
        let (_, names) = variable_order_line("x, y, z").unwrap();
        assert_eq!(names, vec!["x", "y", "z"]);
    }
}
