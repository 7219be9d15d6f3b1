//! Evaluate a parsed [`crate::parser::Expr`] into a
//! [`ratcad_rings::MultivariatePoly`] over a declared [`VariableOrder`].

use ratcad_cad::VariableOrder;
use ratcad_nzq::Rational;
use ratcad_rings::MultivariatePoly;

use crate::error::CliError;
use crate::parser::Expr;

pub fn eval(expr: &Expr, order: &VariableOrder) -> Result<MultivariatePoly, CliError> {
    let nvars = order.len();
    match expr {
        Expr::Constant(q) => Ok(MultivariatePoly::constant(nvars, q.clone())),
        Expr::Variable(name) => {
            let idx = order.index_of(name).ok_or_else(|| {
                CliError::MalformedInput(format!("variable {name} not in the declared order"))
            })?;
            Ok(MultivariatePoly::variable(nvars, idx))
        }
        Expr::Neg(inner) => Ok(eval(inner, order)?.neg()),
        Expr::Add(lhs, rhs) => Ok(eval(lhs, order)?.add(&eval(rhs, order)?)),
        Expr::Sub(lhs, rhs) => Ok(eval(lhs, order)?.sub(&eval(rhs, order)?)),
        Expr::Mul(lhs, rhs) => Ok(eval(lhs, order)?.mul(&eval(rhs, order)?)),
        Expr::Div(lhs, rhs) => {
            let lhs_poly = eval(lhs, order)?;
            let rhs_poly = eval(rhs, order)?;
            let Some((exp, coeff)) = rhs_poly.leading_monomial() else {
                return Err(CliError::MalformedInput("division by zero".to_string()));
            };
            if !rhs_poly.is_constant() || exp.iter().any(|&e| e != 0) {
                return Err(CliError::MalformedInput(
                    "division by a non-constant polynomial is not supported".to_string(),
                ));
            }
            Ok(lhs_poly.scale(&(Rational::ONE / coeff)))
        }
        Expr::Pow(base, exp) => {
            let base_poly = eval(base, order)?;
            let mut result = MultivariatePoly::constant(nvars, Rational::ONE);
            for _ in 0..*exp {
                result = result.mul(&base_poly);
            }
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::expr;

    fn order() -> VariableOrder {
        VariableOrder::new(vec!["x".to_string(), "y".to_string()]).unwrap()
    }

    #[test]
    fn evaluates_a_simple_sum() {
        let (_, e) = expr("x + y").unwrap();
        let poly = eval(&e, &order()).unwrap();
        assert_eq!(poly.degree_in(0), 1);
        assert_eq!(poly.degree_in(1), 1);
    }

    #[test]
    fn evaluates_a_power() {
        let (_, e) = expr("x^3").unwrap();
        let poly = eval(&e, &order()).unwrap();
        assert_eq!(poly.degree_in(0), 3);
    }

    #[test]
    fn rejects_an_unknown_variable() {
        let (_, e) = expr("z").unwrap();
        assert!(eval(&e, &order()).is_err());
    }

    #[test]
    fn evaluates_division_by_a_rational_constant() {
        let (_, e) = expr("x / 2").unwrap();
        let poly = eval(&e, &order()).unwrap();
        let expected = MultivariatePoly::variable(2, 0).scale(&Rational::from_integers(1, 2));
        assert_eq!(poly, expected);
    }

    #[test]
    fn rejects_division_by_a_non_constant() {
        let (_, e) = expr("x / y").unwrap();
        assert!(eval(&e, &order()).is_err());
    }
}
