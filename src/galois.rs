//! Galois field GF(2^8) arithmetic for Reed-Solomon coding
//!
//! This module implements 8-bit Galois field arithmetic using the generator
//! polynomial 0x11D (x⁸ + x⁴ + x³ + x² + 1) with generator element 2.
//!
//! Addition and subtraction are XOR. Multiplication and division go through
//! precomputed log/exp tables; the full 64 KiB product table is also
//! materialized because the coding loops dereference it directly per byte.

use crate::error::{Error, Result};
use std::sync::OnceLock;

/// Generator polynomial for GF(2^8): x⁸ + x⁴ + x³ + x² + 1
const GF8_POLYNOMIAL: u32 = 0x11D;

/// Number of elements in the field
pub const FIELD_SIZE: usize = 256;

/// Precomputed logarithm, exponent, and multiplication tables
pub struct GaloisTables {
    /// `log[a]` = discrete log of `a` base 2; `log[0]` is never read
    pub log: [u8; FIELD_SIZE],
    /// `exp[i]` = 2^i, with `exp[255] == exp[0] == 1`
    pub exp: [u8; FIELD_SIZE],
    /// Full product table: `mul[a][b] == multiply(a, b)`
    pub mul: Box<[[u8; FIELD_SIZE]; FIELD_SIZE]>,
}

impl GaloisTables {
    fn new() -> Self {
        let mut log = [0u8; FIELD_SIZE];
        let mut exp = [0u8; FIELD_SIZE];

        let mut value = 1u32;
        for power in 0..255 {
            exp[power] = value as u8;
            log[value as usize] = power as u8;

            value <<= 1;
            if value & 0x100 != 0 {
                value ^= GF8_POLYNOMIAL;
            }
        }
        // 2^255 wraps around to 1
        exp[255] = 1;

        let mut mul = Box::new([[0u8; FIELD_SIZE]; FIELD_SIZE]);
        for a in 1..FIELD_SIZE {
            for b in 1..FIELD_SIZE {
                let log_sum = (log[a] as usize + log[b] as usize) % 255;
                mul[a][b] = exp[log_sum];
            }
        }

        GaloisTables { log, exp, mul }
    }
}

/// Global field tables, built once and read-only afterwards
static TABLES: OnceLock<GaloisTables> = OnceLock::new();

/// Get the global field tables
pub fn tables() -> &'static GaloisTables {
    TABLES.get_or_init(GaloisTables::new)
}

/// Add two field elements (XOR)
#[inline]
pub fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Subtract one field element from another (same as addition)
#[inline]
pub fn sub(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Multiply two field elements
#[inline]
pub fn multiply(a: u8, b: u8) -> u8 {
    if a == 0 || b == 0 {
        return 0;
    }

    let t = tables();
    let log_sum = (t.log[a as usize] as usize + t.log[b as usize] as usize) % 255;
    t.exp[log_sum]
}

/// Divide one field element by another
///
/// Returns `Error::DivisionByZero` when `b == 0`.
#[inline]
pub fn divide(a: u8, b: u8) -> Result<u8> {
    if b == 0 {
        return Err(Error::DivisionByZero);
    }
    if a == 0 {
        return Ok(0);
    }

    let t = tables();
    let log_diff = (t.log[a as usize] as isize - t.log[b as usize] as isize + 255) % 255;
    Ok(t.exp[log_diff as usize])
}

/// Raise a field element to a power
///
/// `exp(a, 0) == 1` for every `a`; `exp(0, n) == 0` for `n > 0`.
#[inline]
pub fn exp(a: u8, n: usize) -> u8 {
    if n == 0 {
        return 1;
    }
    if a == 0 {
        return 0;
    }

    let t = tables();
    let mut log_result = t.log[a as usize] as usize * n;
    while log_result >= 255 {
        log_result -= 255;
    }
    t.exp[log_result]
}
