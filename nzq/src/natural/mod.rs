use malachite_base::num::arithmetic::traits::{DivMod as MalachiteDivMod, Gcd as MalachiteGcd};
use malachite_base::num::basic::traits::{One, Two, Zero};
use std::{
    ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign},
    str::FromStr,
};

use crate::traits::DivMod;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Natural(malachite_nz::natural::Natural);

impl Natural {
    pub(crate) fn from_malachite(value: malachite_nz::natural::Natural) -> Self {
        Self(value)
    }
    pub(crate) fn to_malachite(self) -> malachite_nz::natural::Natural {
        self.0
    }
    pub(crate) fn to_malachite_ref(&self) -> &malachite_nz::natural::Natural {
        &self.0
    }
}

impl std::fmt::Display for Natural {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Natural {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        malachite_nz::natural::Natural::from_str(s)
            .map(Self)
            .map_err(|_| ())
    }
}

impl From<u8> for Natural {
    fn from(value: u8) -> Self {
        Self(malachite_nz::natural::Natural::from(value))
    }
}
impl From<u16> for Natural {
    fn from(value: u16) -> Self {
        Self(malachite_nz::natural::Natural::from(value))
    }
}
impl From<u32> for Natural {
    fn from(value: u32) -> Self {
        Self(malachite_nz::natural::Natural::from(value))
    }
}
impl From<u64> for Natural {
    fn from(value: u64) -> Self {
        Self(malachite_nz::natural::Natural::from(value))
    }
}
impl From<usize> for Natural {
    fn from(value: usize) -> Self {
        Self(malachite_nz::natural::Natural::from(value as u64))
    }
}

impl TryFrom<&Natural> for usize {
    type Error = ();

    fn try_from(value: &Natural) -> Result<Self, Self::Error> {
        usize::try_from(&value.0).map_err(|_| ())
    }
}

impl Natural {
    pub const ZERO: Self = Self(malachite_nz::natural::Natural::ZERO);
    pub const ONE: Self = Self(malachite_nz::natural::Natural::ONE);
    pub const TWO: Self = Self(malachite_nz::natural::Natural::TWO);

    pub fn is_zero(&self) -> bool {
        self == &Natural::ZERO
    }

    pub fn gcd(&self, other: &Self) -> Self {
        Self((&self.0).gcd(&other.0))
    }

    pub fn lcm(&self, other: &Self) -> Self {
        if self.is_zero() || other.is_zero() {
            Natural::ZERO
        } else {
            (self * other) / self.gcd(other)
        }
    }

    pub fn lcm_list(naturals: Vec<Natural>) -> Self {
        let mut ans = Natural::ONE;
        for n in naturals {
            ans = ans.lcm(&n);
        }
        ans
    }
}

impl DivMod for Natural {
    fn div_mod(&self, other: &Self) -> (Self, Self) {
        let (q, r) = (self.0.clone()).div_mod(other.0.clone());
        (Self(q), Self(r))
    }
}

impl Add<&Natural> for &Natural {
    type Output = Natural;
    fn add(self, rhs: &Natural) -> Natural {
        Natural(&self.0 + &rhs.0)
    }
}
impl Add for Natural {
    type Output = Natural;
    fn add(self, rhs: Natural) -> Natural {
        Natural(self.0 + rhs.0)
    }
}
impl AddAssign<&Natural> for Natural {
    fn add_assign(&mut self, rhs: &Natural) {
        self.0 += &rhs.0;
    }
}

impl Sub<&Natural> for &Natural {
    type Output = Natural;
    fn sub(self, rhs: &Natural) -> Natural {
        Natural(&self.0 - &rhs.0)
    }
}
impl Sub for Natural {
    type Output = Natural;
    fn sub(self, rhs: Natural) -> Natural {
        Natural(self.0 - rhs.0)
    }
}
impl SubAssign<&Natural> for Natural {
    fn sub_assign(&mut self, rhs: &Natural) {
        self.0 -= &rhs.0;
    }
}

impl Mul<&Natural> for &Natural {
    type Output = Natural;
    fn mul(self, rhs: &Natural) -> Natural {
        Natural(&self.0 * &rhs.0)
    }
}
impl Mul for Natural {
    type Output = Natural;
    fn mul(self, rhs: Natural) -> Natural {
        Natural(self.0 * rhs.0)
    }
}
impl MulAssign<&Natural> for Natural {
    fn mul_assign(&mut self, rhs: &Natural) {
        self.0 *= &rhs.0;
    }
}

impl std::ops::Div<&Natural> for &Natural {
    type Output = Natural;
    fn div(self, rhs: &Natural) -> Natural {
        Natural(&self.0 / &rhs.0)
    }
}
impl std::ops::Div for Natural {
    type Output = Natural;
    fn div(self, rhs: Natural) -> Natural {
        Natural(self.0 / rhs.0)
    }
}
