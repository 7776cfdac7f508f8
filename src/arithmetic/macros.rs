//! Macros generating the per-curve Montgomery field and scalar types.
//!
//! Each invocation expands to a self-contained element type over `[u64; N]`
//! with the full constant-time operation set and operator lattice. The curve
//! modules supply the precomputed Montgomery parameters (`R mod m`,
//! `R^2 mod m`, `-m^-1 mod 2^64`).

/// Implements a prime field element type in Montgomery form.
macro_rules! impl_mont_field_element {
    (
        name: $name:ident,
        limbs: $limbs:expr,
        num_bytes: $bytes:expr,
        byte_order: $order:tt,
        modulus: $modulus:expr,
        n0: $n0:expr,
        r1: $r1:expr,
        r2: $r2:expr,
        doc: $doc:expr,
    ) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug)]
        pub struct $name(pub(crate) [u64; $limbs]);

        impl $name {
            /// The field modulus as little-endian limbs.
            pub(crate) const MODULUS: [u64; $limbs] = $modulus;

            /// `-m^-1 mod 2^64`, the Montgomery reduction factor.
            const N0: u64 = $n0;

            /// `R^2 mod m`, used to enter the Montgomery domain.
            const R2: [u64; $limbs] = $r2;

            /// The modulus minus two, the Fermat inversion exponent.
            const MODULUS_MINUS_2: [u64; $limbs] =
                crate::arithmetic::limb::sub_word_const(Self::MODULUS, 2);

            /// Additive identity.
            pub const ZERO: Self = Self([0u64; $limbs]);

            /// Multiplicative identity (`R mod m`).
            pub const ONE: Self = Self($r1);

            /// Canonical serialized length in bytes.
            pub const NUM_BYTES: usize = $bytes;

            /// Wraps raw limbs already in Montgomery form.
            pub(crate) const fn from_montgomery(limbs: [u64; $limbs]) -> Self {
                Self(limbs)
            }

            /// Converts a canonical little-endian limb value into the
            /// Montgomery domain. The value must be fully reduced.
            pub(crate) fn from_canonical(limbs: [u64; $limbs]) -> Self {
                Self(crate::arithmetic::limb::mont_mul(
                    &limbs,
                    &Self::R2,
                    &Self::MODULUS,
                    Self::N0,
                ))
            }

            /// Leaves the Montgomery domain, returning canonical limbs.
            pub(crate) fn to_canonical(&self) -> [u64; $limbs] {
                let mut one = [0u64; $limbs];
                one[0] = 1;
                crate::arithmetic::limb::mont_mul(&self.0, &one, &Self::MODULUS, Self::N0)
            }

            /// Returns `self + rhs mod m`.
            pub fn add(&self, rhs: &Self) -> Self {
                Self(crate::arithmetic::limb::add_mod(
                    &self.0,
                    &rhs.0,
                    &Self::MODULUS,
                ))
            }

            /// Returns `self - rhs mod m`.
            pub fn sub(&self, rhs: &Self) -> Self {
                Self(crate::arithmetic::limb::sub_mod(
                    &self.0,
                    &rhs.0,
                    &Self::MODULUS,
                ))
            }

            /// Returns `-self mod m`.
            pub fn neg(&self) -> Self {
                Self::ZERO.sub(self)
            }

            /// Returns `self * rhs mod m`.
            pub fn mul(&self, rhs: &Self) -> Self {
                Self(crate::arithmetic::limb::mont_mul(
                    &self.0,
                    &rhs.0,
                    &Self::MODULUS,
                    Self::N0,
                ))
            }

            /// Returns `self * self mod m`.
            pub fn square(&self) -> Self {
                self.mul(self)
            }

            /// Returns `2 * self mod m`.
            pub fn double(&self) -> Self {
                self.add(self)
            }

            /// Exponentiation by a little-endian limb exponent.
            ///
            /// Variable-time in the exponent only; every caller passes a
            /// per-curve compile-time constant, so the branch pattern is
            /// fixed at build time.
            pub fn pow_vartime(&self, exp: &[u64; $limbs]) -> Self {
                let mut res = Self::ONE;
                let mut i = $limbs;
                while i > 0 {
                    i -= 1;
                    for j in (0..64).rev() {
                        res = res.square();
                        if ((exp[i] >> j) & 1) == 1 {
                            res = res.mul(self);
                        }
                    }
                }
                res
            }

            /// Returns the multiplicative inverse, or `None` for zero.
            pub fn invert(&self) -> subtle::CtOption<Self> {
                subtle::CtOption::new(self.pow_vartime(&Self::MODULUS_MINUS_2), !self.is_zero())
            }

            /// Whether this is the additive identity.
            pub fn is_zero(&self) -> subtle::Choice {
                crate::arithmetic::limb::ct_is_zero(&self.0)
            }

            /// Parity of the canonical representative.
            pub fn is_odd(&self) -> subtle::Choice {
                subtle::Choice::from((self.to_canonical()[0] & 1) as u8)
            }
        }

        $crate::arithmetic::macros::impl_mont_field_element!(@byteio $name, $order, $bytes, $limbs);

        impl Default for $name {
            fn default() -> Self {
                Self::ZERO
            }
        }

        impl subtle::ConditionallySelectable for $name {
            fn conditional_select(a: &Self, b: &Self, choice: subtle::Choice) -> Self {
                Self(crate::arithmetic::limb::select(&a.0, &b.0, choice))
            }
        }

        impl subtle::ConstantTimeEq for $name {
            fn ct_eq(&self, other: &Self) -> subtle::Choice {
                crate::arithmetic::limb::ct_eq(&self.0, &other.0)
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                subtle::ConstantTimeEq::ct_eq(self, other).into()
            }
        }

        impl Eq for $name {}

        impl zeroize::Zeroize for $name {
            fn zeroize(&mut self) {
                zeroize::Zeroize::zeroize(&mut self.0)
            }
        }

        impl crate::arithmetic::field::PrimeField for $name {
            const ZERO: Self = Self::ZERO;
            const ONE: Self = Self::ONE;
            const NUM_BYTES: usize = Self::NUM_BYTES;

            fn from_bytes(bytes: &[u8]) -> subtle::CtOption<Self> {
                Self::from_bytes(bytes)
            }

            fn to_bytes(&self, out: &mut [u8]) {
                Self::to_bytes(self, out)
            }

            fn square(&self) -> Self {
                Self::square(self)
            }

            fn invert(&self) -> subtle::CtOption<Self> {
                Self::invert(self)
            }

            fn is_odd(&self) -> subtle::Choice {
                Self::is_odd(self)
            }

            fn is_zero(&self) -> subtle::Choice {
                Self::is_zero(self)
            }
        }

        $crate::arithmetic::macros::impl_mont_field_element!(@ops $name);
    };

    (@byteio $name:ident, be, $bytes:expr, $limbs:expr) => {
        impl $name {
            /// Parses the canonical big-endian encoding.
            ///
            /// Returns `None` for inputs of the wrong length or with value
            /// `>=` the modulus.
            pub fn from_bytes(bytes: &[u8]) -> subtle::CtOption<Self> {
                if bytes.len() != Self::NUM_BYTES {
                    return subtle::CtOption::new(Self::ZERO, subtle::Choice::from(0u8));
                }
                let limbs: [u64; $limbs] = crate::arithmetic::limb::from_be_bytes(bytes);
                let in_range = crate::arithmetic::limb::ct_lt(&limbs, &Self::MODULUS);
                subtle::CtOption::new(Self::from_canonical(limbs), in_range)
            }

            /// Writes the canonical big-endian encoding.
            pub fn to_bytes(&self, out: &mut [u8]) {
                assert_eq!(out.len(), Self::NUM_BYTES);
                crate::arithmetic::limb::to_be_bytes(&self.to_canonical(), out);
            }
        }
    };

    (@byteio $name:ident, le, $bytes:expr, $limbs:expr) => {
        impl $name {
            /// Parses the canonical little-endian encoding.
            ///
            /// Returns `None` for inputs of the wrong length or with value
            /// `>=` the modulus.
            pub fn from_bytes(bytes: &[u8]) -> subtle::CtOption<Self> {
                if bytes.len() != Self::NUM_BYTES {
                    return subtle::CtOption::new(Self::ZERO, subtle::Choice::from(0u8));
                }
                let limbs: [u64; $limbs] = crate::arithmetic::limb::from_le_bytes(bytes);
                let in_range = crate::arithmetic::limb::ct_lt(&limbs, &Self::MODULUS);
                subtle::CtOption::new(Self::from_canonical(limbs), in_range)
            }

            /// Writes the canonical little-endian encoding.
            pub fn to_bytes(&self, out: &mut [u8]) {
                assert_eq!(out.len(), Self::NUM_BYTES);
                crate::arithmetic::limb::to_le_bytes(&self.to_canonical(), out);
            }
        }
    };

    (@ops $name:ident) => {
        impl core::ops::Add<$name> for $name {
            type Output = $name;

            fn add(self, other: $name) -> $name {
                $name::add(&self, &other)
            }
        }

        impl core::ops::Add<&$name> for $name {
            type Output = $name;

            fn add(self, other: &$name) -> $name {
                $name::add(&self, other)
            }
        }

        impl core::ops::Add<&$name> for &$name {
            type Output = $name;

            fn add(self, other: &$name) -> $name {
                $name::add(self, other)
            }
        }

        impl core::ops::AddAssign<$name> for $name {
            fn add_assign(&mut self, other: $name) {
                *self = $name::add(self, &other);
            }
        }

        impl core::ops::AddAssign<&$name> for $name {
            fn add_assign(&mut self, other: &$name) {
                *self = $name::add(self, other);
            }
        }

        impl core::ops::Sub<$name> for $name {
            type Output = $name;

            fn sub(self, other: $name) -> $name {
                $name::sub(&self, &other)
            }
        }

        impl core::ops::Sub<&$name> for $name {
            type Output = $name;

            fn sub(self, other: &$name) -> $name {
                $name::sub(&self, other)
            }
        }

        impl core::ops::Sub<&$name> for &$name {
            type Output = $name;

            fn sub(self, other: &$name) -> $name {
                $name::sub(self, other)
            }
        }

        impl core::ops::SubAssign<$name> for $name {
            fn sub_assign(&mut self, other: $name) {
                *self = $name::sub(self, &other);
            }
        }

        impl core::ops::SubAssign<&$name> for $name {
            fn sub_assign(&mut self, other: &$name) {
                *self = $name::sub(self, other);
            }
        }

        impl core::ops::Mul<$name> for $name {
            type Output = $name;

            fn mul(self, other: $name) -> $name {
                $name::mul(&self, &other)
            }
        }

        impl core::ops::Mul<&$name> for $name {
            type Output = $name;

            fn mul(self, other: &$name) -> $name {
                $name::mul(&self, other)
            }
        }

        impl core::ops::Mul<&$name> for &$name {
            type Output = $name;

            fn mul(self, other: &$name) -> $name {
                $name::mul(self, other)
            }
        }

        impl core::ops::MulAssign<$name> for $name {
            fn mul_assign(&mut self, other: $name) {
                *self = $name::mul(self, &other);
            }
        }

        impl core::ops::MulAssign<&$name> for $name {
            fn mul_assign(&mut self, other: &$name) {
                *self = $name::mul(self, other);
            }
        }

        impl core::ops::Neg for $name {
            type Output = $name;

            fn neg(self) -> $name {
                $name::neg(&self)
            }
        }

        impl core::ops::Neg for &$name {
            type Output = $name;

            fn neg(self) -> $name {
                $name::neg(self)
            }
        }
    };
}

/// Implements a scalar field (curve order) element type: the Montgomery field
/// plus wide reduction, the high-half predicate, and bit access.
macro_rules! impl_mont_scalar {
    (
        name: $name:ident,
        limbs: $limbs:expr,
        num_bytes: $bytes:expr,
        num_bits: $bits:expr,
        byte_order: $order:tt,
        modulus: $modulus:expr,
        n0: $n0:expr,
        r1: $r1:expr,
        r2: $r2:expr,
        half_modulus: $half:expr,
        doc: $doc:expr,
    ) => {
        $crate::arithmetic::macros::impl_mont_field_element!(
            name: $name,
            limbs: $limbs,
            num_bytes: $bytes,
            byte_order: $order,
            modulus: $modulus,
            n0: $n0,
            r1: $r1,
            r2: $r2,
            doc: $doc,
        );

        impl $name {
            /// Bit length of the group order.
            pub const NUM_BITS: usize = $bits;

            /// `n >> 1` as canonical limbs, the low-S threshold.
            const FRAC_MODULUS_2: [u64; $limbs] = $half;

            /// Converts a small integer.
            pub fn from_u64(k: u64) -> Self {
                let mut limbs = [0u64; $limbs];
                limbs[0] = k;
                Self::from_canonical(limbs)
            }

            /// Interprets up to `2 * NUM_BYTES` bytes as an integer and
            /// reduces it modulo the group order.
            ///
            /// Folds the value as `lo + hi * R` with two Montgomery
            /// multiplications by `R^2`, so inputs as wide as `R^2` reduce
            /// without a division.
            pub fn reduce_bytes(bytes: &[u8]) -> Self {
                debug_assert!(bytes.len() <= 2 * Self::NUM_BYTES);
                let wide: [u64; 2 * $limbs] =
                    $crate::arithmetic::macros::impl_mont_scalar!(@parse $order, bytes);
                let mut lo = [0u64; $limbs];
                let mut hi = [0u64; $limbs];
                for i in 0..$limbs {
                    lo[i] = wide[i];
                    hi[i] = wide[$limbs + i];
                }
                let lo_m =
                    crate::arithmetic::limb::mont_mul(&lo, &Self::R2, &Self::MODULUS, Self::N0);
                let hi_m =
                    crate::arithmetic::limb::mont_mul(&hi, &Self::R2, &Self::MODULUS, Self::N0);
                let hi_rm =
                    crate::arithmetic::limb::mont_mul(&hi_m, &Self::R2, &Self::MODULUS, Self::N0);
                Self(crate::arithmetic::limb::add_mod(
                    &lo_m,
                    &hi_rm,
                    &Self::MODULUS,
                ))
            }

            /// Returns bit `index` of the canonical representative.
            pub fn bit(&self, index: usize) -> subtle::Choice {
                debug_assert!(index < 64 * $limbs);
                let limbs = self.to_canonical();
                subtle::Choice::from(((limbs[index / 64] >> (index % 64)) & 1) as u8)
            }

            /// Whether the canonical value exceeds `n / 2`.
            pub fn is_high(&self) -> subtle::Choice {
                crate::arithmetic::limb::ct_gt(&self.to_canonical(), &Self::FRAC_MODULUS_2)
            }
        }

        impl crate::arithmetic::scalar::Reduce for $name {
            const NUM_BITS: usize = Self::NUM_BITS;

            fn reduce_bytes(bytes: &[u8]) -> Self {
                Self::reduce_bytes(bytes)
            }

            fn bit(&self, index: usize) -> subtle::Choice {
                Self::bit(self, index)
            }
        }

        impl crate::arithmetic::scalar::IsHigh for $name {
            fn is_high(&self) -> subtle::Choice {
                Self::is_high(self)
            }
        }

        impl From<u64> for $name {
            fn from(k: u64) -> Self {
                Self::from_u64(k)
            }
        }
    };

    (@parse be, $bytes:expr) => {
        crate::arithmetic::limb::from_be_bytes($bytes)
    };

    (@parse le, $bytes:expr) => {
        crate::arithmetic::limb::from_le_bytes($bytes)
    };
}

pub(crate) use impl_mont_field_element;
pub(crate) use impl_mont_scalar;
