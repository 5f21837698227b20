//! Validações e helpers de aritmética larga do pool.
//! `mul_div` e `isqrt` são exatos e determinísticos — o suprimento de
//! shares é definido por raiz inteira exata, então aproximação por float
//! dessincronizaria a contabilidade entre implementações.

use super::error::{AmmError, Result};
use super::error_catalog::AmmErrorCode;
use super::types::{Amount, U256};

#[inline]
pub fn ensure_nonzero(amount: Amount) -> Result<()> {
    if amount == 0 {
        Err(AmmError::new(AmmErrorCode::ZeroAmount))
    } else {
        Ok(())
    }
}

#[inline]
pub fn checked_add(a: Amount, b: Amount) -> Result<Amount> {
    a.checked_add(b)
        .ok_or_else(|| AmmError::new(AmmErrorCode::OverflowNumeric))
}

#[inline]
pub fn checked_sub(a: Amount, b: Amount) -> Result<Amount> {
    a.checked_sub(b)
        .ok_or_else(|| AmmError::new(AmmErrorCode::OverflowNumeric))
}

#[inline]
pub fn mul_u128_to_u256(a: Amount, b: Amount) -> U256 {
    U256::from(a) * U256::from(b)
}

#[inline]
pub fn u256_to_u128_checked(v: U256) -> Result<Amount> {
    if v > U256::from(u128::MAX) {
        Err(AmmError::new(AmmErrorCode::OverflowNumeric))
    } else {
        Ok(v.as_u128())
    }
}

/// `floor(a*b/d)` com intermediário de 256 bits: nunca estoura no produto,
/// mesmo com `a*b` acima de u128.
pub fn mul_div(a: Amount, b: Amount, d: Amount) -> Result<Amount> {
    if d == 0 {
        return Err(AmmError::new(AmmErrorCode::DivideByZero));
    }
    let q = mul_u128_to_u256(a, b) / U256::from(d);
    u256_to_u128_checked(q)
}

/// `floor(sqrt(n))` por busca binária inteira, exato para todo `n`.
/// `mid` é calculado por diferença para não estourar perto de `U256::MAX`.
pub fn isqrt_u256(n: U256) -> U256 {
    if n.is_zero() {
        return U256::zero();
    }
    let mut low = U256::one();
    let mut high = n;
    while low < high {
        let mid = low + ((high - low + U256::one()) >> 1);
        // mid*mid <= n  <=>  mid <= n/mid, sem estourar o quadrado
        if mid <= n / mid {
            low = mid;
        } else {
            high = mid - U256::one();
        }
    }
    low
}

/// `floor(sqrt(x*y))`: o suprimento canônico de shares do pool.
/// A raiz do produto de dois u128 sempre cabe em u128.
pub fn sqrt_k(x: Amount, y: Amount) -> Result<Amount> {
    u256_to_u128_checked(isqrt_u256(mul_u128_to_u256(x, y)))
}

// -------------------------
// TESTES
// -------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_ensure_nonzero() {
        assert!(ensure_nonzero(1).is_ok());
        assert_eq!(
            ensure_nonzero(0).unwrap_err().code,
            AmmErrorCode::ZeroAmount
        );
    }

    #[test]
    fn t_checked_add_sub_over_under_flow() {
        assert_eq!(checked_add(1, 2).unwrap(), 3);
        assert_eq!(
            checked_add(u128::MAX, 1).unwrap_err().code,
            AmmErrorCode::OverflowNumeric
        );
        assert_eq!(checked_sub(5, 3).unwrap(), 2);
        assert_eq!(
            checked_sub(0, 1).unwrap_err().code,
            AmmErrorCode::OverflowNumeric
        );
    }

    #[test]
    fn t_mul_div_is_floor() {
        // 7*3/2 = 10.5 -> 10
        assert_eq!(mul_div(7, 3, 2).unwrap(), 10);
        // produto acima de u128 com resultado representável
        assert_eq!(mul_div(u128::MAX, 1000, 1000).unwrap(), u128::MAX);
    }

    #[test]
    fn t_mul_div_divide_by_zero() {
        assert_eq!(
            mul_div(1, 1, 0).unwrap_err().code,
            AmmErrorCode::DivideByZero
        );
    }

    #[test]
    fn t_mul_div_overflow_on_result() {
        assert_eq!(
            mul_div(u128::MAX, 2, 1).unwrap_err().code,
            AmmErrorCode::OverflowNumeric
        );
    }

    #[test]
    fn t_isqrt_small_and_edges() {
        assert_eq!(isqrt_u256(U256::zero()), U256::zero());
        assert_eq!(isqrt_u256(U256::one()), U256::one());
        assert_eq!(isqrt_u256(U256::from(2u8)), U256::one());
        assert_eq!(isqrt_u256(U256::from(3u8)), U256::one());
        assert_eq!(isqrt_u256(U256::from(4u8)), U256::from(2u8));
        // n² e n²-1
        assert_eq!(isqrt_u256(U256::from(144u8)), U256::from(12u8));
        assert_eq!(isqrt_u256(U256::from(143u8)), U256::from(11u8));
    }

    #[test]
    fn t_isqrt_large_is_floor() {
        // raiz do quadrado do maior u128 é o próprio u128
        let m = U256::from(u128::MAX);
        assert_eq!(isqrt_u256(m * m), m);
        assert_eq!(isqrt_u256(m * m - U256::one()), m - U256::one());
    }

    #[test]
    fn t_sqrt_k_golden() {
        // valores do pool de referência
        assert_eq!(sqrt_k(100_000, 25_000).unwrap(), 50_000);
        assert_eq!(sqrt_k(101_000, 25_000).unwrap(), 50_249);
        assert_eq!(sqrt_k(2, 2).unwrap(), 2);
        assert_eq!(sqrt_k(u128::MAX, u128::MAX).unwrap(), u128::MAX);
    }
}
