use malachite_base::num::arithmetic::traits::{
    Abs as MalachiteAbs, DivMod as MalachiteDivMod, Gcd as MalachiteGcd, Sign as MalachiteSign,
};
use malachite_base::num::basic::traits::{NegativeOne, One, Zero};
use std::{
    cmp::Ordering,
    ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use crate::natural::Natural;
use crate::traits::{Abs, DivMod};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Integer(malachite_nz::integer::Integer);

impl Integer {
    pub(crate) fn from_malachite(value: malachite_nz::integer::Integer) -> Self {
        Self(value)
    }
    pub(crate) fn to_malachite(self) -> malachite_nz::integer::Integer {
        self.0
    }
    pub(crate) fn to_malachite_ref(&self) -> &malachite_nz::integer::Integer {
        &self.0
    }
}

impl std::fmt::Display for Integer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Integer {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        malachite_nz::integer::Integer::from_str(s)
            .map(Self)
            .map_err(|_| ())
    }
}

macro_rules! from_int {
    ($t:ty) => {
        impl From<$t> for Integer {
            fn from(value: $t) -> Self {
                Self(malachite_nz::integer::Integer::from(value))
            }
        }
    };
}
from_int!(i8);
from_int!(i16);
from_int!(i32);
from_int!(i64);
from_int!(u8);
from_int!(u16);
from_int!(u32);
from_int!(u64);

impl From<usize> for Integer {
    fn from(value: usize) -> Self {
        Self(malachite_nz::integer::Integer::from(value as u64))
    }
}

impl From<Natural> for Integer {
    fn from(value: Natural) -> Self {
        Self(malachite_nz::integer::Integer::from(value.to_malachite()))
    }
}
impl From<&Natural> for Integer {
    fn from(value: &Natural) -> Self {
        Self(malachite_nz::integer::Integer::from(
            value.to_malachite_ref().clone(),
        ))
    }
}

impl TryFrom<&Integer> for usize {
    type Error = ();

    fn try_from(value: &Integer) -> Result<Self, Self::Error> {
        usize::try_from(&value.0).map_err(|_| ())
    }
}

impl Integer {
    pub const ZERO: Self = Self(malachite_nz::integer::Integer::ZERO);
    pub const ONE: Self = Self(malachite_nz::integer::Integer::ONE);
    pub const NEGATIVE_ONE: Self = Self(malachite_nz::integer::Integer::NEGATIVE_ONE);

    pub fn is_zero(&self) -> bool {
        self == &Integer::ZERO
    }

    /// -1, 0 or 1 according to sign.
    pub fn sign(&self) -> i32 {
        match self.0.sign() {
            Ordering::Less => -1,
            Ordering::Equal => 0,
            Ordering::Greater => 1,
        }
    }

    pub fn gcd(&self, other: &Self) -> Natural {
        Natural::from_malachite((&self.0).unsigned_abs().gcd(&(&other.0).unsigned_abs()))
    }

    pub fn lcm_list(integers: Vec<Integer>) -> Natural {
        let mut ans = Natural::ONE;
        for n in integers {
            let g = ans.gcd(&n.clone().abs().try_into().unwrap_or(Natural::ZERO));
            let nn: Natural = n.abs().try_into().unwrap_or(Natural::ZERO);
            if nn.is_zero() {
                continue;
            }
            ans = if g.is_zero() {
                nn
            } else {
                (&ans * &nn) / g
            };
        }
        ans
    }
}

impl TryFrom<Integer> for Natural {
    type Error = ();

    fn try_from(value: Integer) -> Result<Self, Self::Error> {
        if value.sign() < 0 {
            Err(())
        } else {
            Ok(Natural::from_malachite(value.0.unsigned_abs()))
        }
    }
}

impl Abs for Integer {
    fn abs(self) -> Self {
        Self(MalachiteAbs::abs(self.0))
    }
}

impl Neg for Integer {
    type Output = Integer;
    fn neg(self) -> Integer {
        Integer(-self.0)
    }
}
impl Neg for &Integer {
    type Output = Integer;
    fn neg(self) -> Integer {
        Integer(-&self.0)
    }
}

impl DivMod for Integer {
    fn div_mod(&self, other: &Self) -> (Self, Self) {
        let (q, r) = self.0.clone().div_mod(other.0.clone());
        (Self(q), Self(r))
    }
}

macro_rules! bin_op {
    ($trait:ident, $method:ident) => {
        impl $trait<&Integer> for &Integer {
            type Output = Integer;
            fn $method(self, rhs: &Integer) -> Integer {
                Integer((&self.0).$method(&rhs.0))
            }
        }
        impl $trait for Integer {
            type Output = Integer;
            fn $method(self, rhs: Integer) -> Integer {
                Integer(self.0.$method(rhs.0))
            }
        }
    };
}
bin_op!(Add, add);
bin_op!(Sub, sub);
bin_op!(Mul, mul);

impl Div for Integer {
    type Output = Integer;
    fn div(self, rhs: Integer) -> Integer {
        let (q, r) = self.div_mod(&rhs);
        debug_assert!(r.is_zero());
        q
    }
}
impl Div<&Integer> for &Integer {
    type Output = Integer;
    fn div(self, rhs: &Integer) -> Integer {
        let (q, r) = self.div_mod(rhs);
        debug_assert!(r.is_zero());
        q
    }
}

impl AddAssign<&Integer> for Integer {
    fn add_assign(&mut self, rhs: &Integer) {
        self.0 += &rhs.0;
    }
}
impl SubAssign<&Integer> for Integer {
    fn sub_assign(&mut self, rhs: &Integer) {
        self.0 -= &rhs.0;
    }
}
impl MulAssign<&Integer> for Integer {
    fn mul_assign(&mut self, rhs: &Integer) {
        self.0 *= &rhs.0;
    }
}
