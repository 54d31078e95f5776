//! Prime-field arithmetic for the number-theoretic transform.
//!
//! Each field is `Z/pZ` for a prime `p = c * 2^k + 1 < 2^62`, so that the
//! multiplicative group holds roots of unity of every power-of-two order up
//! to `2^k`. Multiplication uses Montgomery reduction with `R = 2^64`;
//! additions and subtractions keep values fully reduced in `[0, p)`.

/// Montgomery context for one NTT-friendly prime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrimeField {
    modulus: u64,
    generator: u64,
    two_adicity: u32,
    /// `-p^{-1} mod 2^64`.
    neg_inv: u64,
    /// `R mod p`, i.e. one in Montgomery form.
    r: u64,
    /// `R^2 mod p`.
    r2: u64,
}

/// `a * b mod m`, for table setup and constants.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub const fn mul_mod(a: u64, b: u64, m: u64) -> u64 {
    ((a as u128 * b as u128) % m as u128) as u64
}

/// `base^exp mod m` by square-and-multiply.
#[must_use]
pub const fn pow_mod(base: u64, mut exp: u64, m: u64) -> u64 {
    let mut result = 1 % m;
    let mut base = base % m;
    while exp > 0 {
        if exp & 1 == 1 {
            result = mul_mod(result, base, m);
        }
        base = mul_mod(base, base, m);
        exp >>= 1;
    }
    result
}

impl PrimeField {
    /// Build the context for `modulus`, whose multiplicative group is generated
    /// by `generator` and whose order `modulus - 1` is divisible by `2^two_adicity`.
    #[must_use]
    pub const fn new(modulus: u64, generator: u64, two_adicity: u32) -> Self {
        assert!(modulus % 2 == 1 && modulus < 1 << 62);

        // Newton iteration doubles the number of correct low bits: 3 -> 96.
        let mut inv = modulus;
        let mut i = 0;
        while i < 5 {
            inv = inv.wrapping_mul(2u64.wrapping_sub(modulus.wrapping_mul(inv)));
            i += 1;
        }

        let r = ((u64::MAX % modulus) + 1) % modulus;
        Self {
            modulus,
            generator,
            two_adicity,
            neg_inv: inv.wrapping_neg(),
            r,
            r2: mul_mod(r, r, modulus),
        }
    }

    /// The prime `p`.
    #[must_use]
    pub const fn modulus(&self) -> u64 {
        self.modulus
    }

    /// Largest `k` with `2^k | p - 1`.
    #[must_use]
    pub const fn two_adicity(&self) -> u32 {
        self.two_adicity
    }

    /// `R^2 mod p`.
    #[must_use]
    pub const fn r2(&self) -> u64 {
        self.r2
    }

    /// Montgomery form of one.
    #[must_use]
    pub const fn one(&self) -> u64 {
        self.r
    }

    /// Montgomery form of `x` (any word, reduced first).
    #[must_use]
    pub const fn encode(&self, x: u64) -> u64 {
        mul_mod(x % self.modulus, self.r, self.modulus)
    }

    /// Plain value of a Montgomery-form residue.
    #[must_use]
    pub fn decode(&self, x: u64) -> u64 {
        self.mul(x, 1)
    }

    /// Reduce an arbitrary word into `[0, p)`.
    #[inline]
    #[must_use]
    pub fn reduce(&self, x: u64) -> u64 {
        x % self.modulus
    }

    /// Montgomery product `a * b * R^{-1} mod p`, for `a, b < p`.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn mul(&self, a: u64, b: u64) -> u64 {
        let t = u128::from(a) * u128::from(b);
        let m = (t as u64).wrapping_mul(self.neg_inv);
        // t < p^2 < 2^124 and m * p < 2^126, so the sum cannot overflow.
        let u = ((t + u128::from(m) * u128::from(self.modulus)) >> 64) as u64;
        if u >= self.modulus {
            u - self.modulus
        } else {
            u
        }
    }

    /// `a + b mod p`, for `a, b < p`.
    #[inline]
    #[must_use]
    pub fn add(&self, a: u64, b: u64) -> u64 {
        let sum = a + b;
        if sum >= self.modulus {
            sum - self.modulus
        } else {
            sum
        }
    }

    /// `a - b mod p`, for `a, b < p`.
    #[inline]
    #[must_use]
    pub fn sub(&self, a: u64, b: u64) -> u64 {
        if a >= b {
            a - b
        } else {
            a + self.modulus - b
        }
    }

    /// Primitive root of unity of order `len` (a power of two), in plain form.
    #[must_use]
    pub fn root_of_unity(&self, len: usize) -> u64 {
        assert!(len.is_power_of_two(), "transform length must be a power of two");
        assert!(
            len.trailing_zeros() <= self.two_adicity,
            "transform length 2^{} exceeds field capacity 2^{}",
            len.trailing_zeros(),
            self.two_adicity
        );
        pow_mod(self.generator, (self.modulus - 1) / len as u64, self.modulus)
    }

    /// `len^{-1} mod p` for a power-of-two `len`, in plain form.
    #[must_use]
    pub fn inverse_len(&self, len: usize) -> u64 {
        debug_assert!(len.is_power_of_two());
        // len * (p - (p - 1) / len) = len * p - (p - 1) = 1 (mod p)
        self.modulus - (self.modulus - 1) / len as u64
    }
}

/// `29 * 2^57 + 1`, generator 3.
pub const P1: u64 = 0x3a00_0000_0000_0001;
/// `69 * 2^55 + 1`, generator 5.
pub const P2: u64 = 0x2280_0000_0000_0001;
/// `27 * 2^56 + 1`, generator 5.
pub const P3: u64 = 0x1b00_0000_0000_0001;

/// The three transform primes. Their product exceeds `2^183`.
pub const FIELDS: [PrimeField; 3] = [
    PrimeField::new(P1, 3, 57),
    PrimeField::new(P2, 5, 55),
    PrimeField::new(P3, 5, 56),
];

/// Largest transform length supported by every field.
pub const MAX_LOG_TRANSFORM_LEN: u32 = 55;
