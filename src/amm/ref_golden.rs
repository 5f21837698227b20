//! Referência de alta precisão ("goldens") em BigUint/BigRational para o
//! pool CPMM com taxa de 0,3% no input.
//!
//! Objetivos:
//! 1. Reproduzir a **política de arredondamento** do core (floor único no
//!    swap, floor no payout, raiz inteira no suprimento) em aritmética
//!    arbitrária, servindo de oráculo independente do caminho U256.
//! 2. Calcular os resultados **contínuos** (sem quantização) do swap.
//! 3. Medir o desvio do invariante, `Δk/k`, do core discreto.
//!
//! Esta referência não entra no caminho de produção — serve só para
//! testes e geração de goldens.

use super::error::Result;
use super::error_catalog::AmmErrorCode;
use super::swap;
use super::types::Amount;
use crate::amm_bail;

use num_bigint::{BigInt, BigUint};
use num_integer::Roots;
use num_rational::BigRational;
use num_traits::ToPrimitive;

#[inline]
fn bu(v: Amount) -> BigUint {
    BigUint::from(v)
}

#[inline]
fn rat(n: Amount, d: Amount) -> BigRational {
    BigRational::new(BigInt::from(n), BigInt::from(d))
}

#[inline]
fn bu_to_u128(v: &BigUint) -> Result<Amount> {
    v.to_u128()
        .ok_or_else(|| crate::amm_err!(AmmErrorCode::OverflowNumeric))
}

/// amountOut com a **política do core**: `floor(dx·997·r_out /
/// (r_in·1000 + dx·997))`, divisão única, em BigUint.
pub fn policy_swap_out(
    reserve_in: Amount,
    reserve_out: Amount,
    amount_in: Amount,
) -> Result<Amount> {
    if reserve_in == 0 || reserve_out == 0 {
        amm_bail!(AmmErrorCode::InsufficientReserve);
    }
    if amount_in == 0 {
        amm_bail!(AmmErrorCode::ZeroAmount);
    }
    let with_fee = bu(amount_in) * bu(997);
    let numerator = &with_fee * bu(reserve_out);
    let denominator = bu(reserve_in) * bu(1000) + &with_fee;
    bu_to_u128(&(numerator / denominator))
}

/// amountOut contínuo (sem quantização): taxa exata de 3/1000 sobre o
/// input e identidade do produto constante em racionais.
pub fn continuous_swap_out(
    reserve_in: Amount,
    reserve_out: Amount,
    amount_in: Amount,
) -> Result<BigRational> {
    if reserve_in == 0 || reserve_out == 0 {
        amm_bail!(AmmErrorCode::InsufficientReserve);
    }
    if amount_in == 0 {
        amm_bail!(AmmErrorCode::ZeroAmount);
    }
    let net = rat(amount_in, 1) * rat(997, 1000);
    let x = rat(reserve_in, 1);
    let y = rat(reserve_out, 1);
    let k = x.clone() * y.clone();
    let y_star = k / (x + net);
    Ok(y - y_star)
}

/// Suprimento canônico em BigUint: `floor(sqrt(a·b))`.
pub fn policy_supply(reserve_a: Amount, reserve_b: Amount) -> Result<Amount> {
    bu_to_u128(&(bu(reserve_a) * bu(reserve_b)).sqrt())
}

/// Payout de withdraw com a política do core, em BigUint:
/// `implied = floor(new_total²/other)`, `payout = floor((r−implied)·997/1000)`.
pub fn policy_withdraw_payout(
    reserve: Amount,
    other_reserve: Amount,
    new_total: Amount,
) -> Result<Amount> {
    if other_reserve == 0 {
        amm_bail!(AmmErrorCode::DivideByZero);
    }
    let implied = bu(new_total) * bu(new_total) / bu(other_reserve);
    if implied > bu(reserve) {
        amm_bail!(AmmErrorCode::InvariantViolation);
    }
    let gross = bu(reserve) - implied;
    bu_to_u128(&(gross * bu(997) / bu(1000)))
}

/// `(k1 − k0)/k0` após um swap do core, em racional (com sinal).
pub fn dk_over_k_after_swap(
    reserve_in: Amount,
    reserve_out: Amount,
    amount_in: Amount,
    amount_out: Amount,
) -> BigRational {
    let k0 = BigInt::from(reserve_in) * BigInt::from(reserve_out);
    let k1 = (BigInt::from(reserve_in) + BigInt::from(amount_in))
        * (BigInt::from(reserve_out) - BigInt::from(amount_out));
    BigRational::new(k1 - k0.clone(), k0)
}
