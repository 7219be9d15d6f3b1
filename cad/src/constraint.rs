//! A constraint (§3): a polynomial, a required sign, and the variable order
//! it is stated over. Evaluating a constraint at a full sample yields a
//! definite sign, which the DFS in [`crate::engine`] compares against
//! `required`.

use std::fmt;

use ratcad_rings::{MultivariatePoly, RealAlgebraicNumber};

/// The sign a constraint requires its polynomial to take. Named (not a raw
/// `i32`) so `Display` can render the `<, =, >` grammar of §6 directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    Negative,
    Zero,
    Positive,
}

impl Sign {
    pub fn matches(&self, observed: i32) -> bool {
        match self {
            Sign::Negative => observed < 0,
            Sign::Zero => observed == 0,
            Sign::Positive => observed > 0,
        }
    }
}

impl fmt::Display for Sign {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Sign::Negative => "<",
            Sign::Zero => "=",
            Sign::Positive => ">",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    poly: MultivariatePoly,
    sign: Sign,
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} 0", self.poly, self.sign)
    }
}

impl Constraint {
    pub fn new(poly: MultivariatePoly, sign: Sign) -> Self {
        Self { poly, sign }
    }

    pub fn poly(&self) -> &MultivariatePoly {
        &self.poly
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// Evaluate this constraint's sign at a full sample point (one RAN per
    /// variable, in the polynomial's variable order) and report whether it
    /// matches the required sign.
    pub fn is_satisfied_at(&self, point: &[RealAlgebraicNumber]) -> bool {
        self.sign.matches(self.poly.sign_at_point(point))
    }
}
