//! Parse a driver input (variable-order header, then one constraint per
//! line) and run it through [`ratcad_cad::Cad`] (§6).

use log::debug;
use ratcad_cad::{Cad, CancellationToken, CheckOutcome, Constraint, Settings, Sign, VariableOrder};

use crate::error::CliError;
use crate::eval::eval;
use crate::parser::{RelOp, constraint_line, variable_order_line};

fn sign_of(op: RelOp) -> Sign {
    match op {
        RelOp::Lt => Sign::Negative,
        RelOp::Eq => Sign::Zero,
        RelOp::Gt => Sign::Positive,
    }
}

/// Parse `input` and run `Cad::check` against it, polling `token` for
/// cancellation (§5).
pub fn run(
    input: &str,
    settings: Settings,
    token: &CancellationToken,
) -> Result<CheckOutcome, CliError> {
    let mut lines = input.lines();
    let header = lines
        .next()
        .ok_or_else(|| CliError::MalformedInput("empty input: expected a variable order line".to_string()))?;
    let (rest, names) = variable_order_line(header)
        .map_err(|e| CliError::MalformedInput(format!("invalid variable order: {e:?}")))?;
    if !rest.trim().is_empty() {
        return Err(CliError::MalformedInput(format!(
            "unexpected trailing text after variable order: {rest}"
        )));
    }
    let order = VariableOrder::new(names).map_err(|e| CliError::MalformedInput(e.to_string()))?;

    let mut cad = Cad::new(order.clone(), settings).map_err(CliError::from)?;
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            break;
        }
        let (rest, (expr, op)) = constraint_line(trimmed)
            .map_err(|e| CliError::MalformedInput(format!("invalid constraint line {trimmed:?}: {e:?}")))?;
        if !rest.trim().is_empty() {
            return Err(CliError::MalformedInput(format!(
                "unexpected trailing text after constraint: {rest}"
            )));
        }
        let poly = eval(&expr, &order)?;
        debug!("parsed constraint {poly} {op:?} 0");
        cad.add_polynomial(Constraint::new(poly, sign_of(op)))
            .map_err(CliError::from)?;
    }

    cad.check(token).map_err(CliError::from)
}

/// Render a [`CheckOutcome`] in the grammar of §6: `sat` followed by each
/// coordinate, `unsat`, or `cancelled`.
pub fn render(outcome: &CheckOutcome) -> String {
    match outcome {
        CheckOutcome::Sat(point) => {
            let coords = point
                .iter()
                .map(|ran| ran.to_string())
                .collect::<Vec<_>>()
                .join(", ");
            format!("sat\n{coords}")
        }
        CheckOutcome::Unsat => "unsat".to_string(),
        CheckOutcome::Cancelled => "cancelled".to_string(),
    }
}

pub fn exit_code(outcome: &CheckOutcome) -> u8 {
    match outcome {
        CheckOutcome::Sat(_) | CheckOutcome::Unsat => 0,
        CheckOutcome::Cancelled => 2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_sat_for_a_single_equation() {
        let input = "x\nx^2 - 2 = 0\n";
        let token = CancellationToken::new();
        let outcome = run(input, Settings::default(), &token).unwrap();
        assert!(matches!(outcome, CheckOutcome::Sat(_)));
    }

    #[test]
    fn reports_unsat_for_an_impossible_system() {
        let input = "x\nx^2 + 1 = 0\n";
        let token = CancellationToken::new();
        let outcome = run(input, Settings::default(), &token).unwrap();
        assert!(matches!(outcome, CheckOutcome::Unsat));
    }

    #[test]
    fn rejects_a_constraint_over_an_undeclared_variable() {
        let input = "x\ny = 0\n";
        let token = CancellationToken::new();
        assert!(run(input, Settings::default(), &token).is_err());
    }

    #[test]
    fn reports_sat_for_the_two_variable_example_system() {
        let input = "x, y\n144*y^2 + 96*x^2*y + 9*x^4 + 105*x^2 + 70*x - 98 = 0\nx*y^2 + 6*x*y + x^3 + 9*x = 0\n";
        let token = CancellationToken::new();
        let outcome = run(input, Settings::default(), &token).unwrap();
        assert!(matches!(outcome, CheckOutcome::Sat(_)));
    }

    #[test]
    fn render_matches_the_display_grammar() {
        let input = "x\nx^2 - 2 = 0\n";
        let token = CancellationToken::new();
        let outcome = run(input, Settings::default(), &token).unwrap();
        let rendered = render(&outcome);
        assert!(rendered.starts_with("sat"));
    }
}
