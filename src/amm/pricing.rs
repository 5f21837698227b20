//! Cotações para UI e roteadores: spot, preço de execução, slippage e
//! mínimo aceitável com tolerância. Tudo leitura pura sobre a matemática
//! do swap — nada aqui mexe no estado do pool.

use super::error::Result;
use super::error_catalog::AmmErrorCode;
use super::guardrails::{mul_div, mul_u128_to_u256, u256_to_u128_checked};
use super::swap::get_amount_out;
use super::types::{Amount, U256};
use crate::amm_bail;

/// Escala fixa dos preços cotados (1e18).
pub const PRICE_SCALE: Amount = 1_000_000_000_000_000_000;
/// Escala de partes por milhão para slippage e tolerâncias.
pub const PPM_SCALE: u32 = 1_000_000;

/// Preço à vista de 1 unidade de entrada em unidades de saída, em
/// [`PRICE_SCALE`]: `floor(r_out·1e18 / r_in)`.
pub fn spot_price(reserve_in: Amount, reserve_out: Amount) -> Result<Amount> {
    if reserve_in == 0 || reserve_out == 0 {
        amm_bail!(AmmErrorCode::InsufficientReserve, reserve_in => reserve_in, reserve_out => reserve_out);
    }
    mul_div(reserve_out, PRICE_SCALE, reserve_in)
}

/// Preço efetivo de execução para `amount_in` bruto (taxa incluída):
/// `floor(out·1e18 / amount_in)`.
pub fn execution_price(
    reserve_in: Amount,
    reserve_out: Amount,
    amount_in: Amount,
) -> Result<Amount> {
    let out = get_amount_out(reserve_in, reserve_out, amount_in)?;
    mul_div(out, PRICE_SCALE, amount_in)
}

/// Slippage relativo em PPM entre o spot e o preço de execução (≥ 0).
pub fn slippage_ppm(reserve_in: Amount, reserve_out: Amount, amount_in: Amount) -> Result<u32> {
    let spot = spot_price(reserve_in, reserve_out)?;
    let exec = execution_price(reserve_in, reserve_out, amount_in)?;
    if exec >= spot {
        return Ok(0);
    }
    let num = (U256::from(spot) - U256::from(exec)) * U256::from(PPM_SCALE);
    let q = u256_to_u128_checked(num / U256::from(spot))?;
    Ok(if q > u128::from(PPM_SCALE) {
        PPM_SCALE
    } else {
        q as u32
    })
}

/// Mínimo de saída aceito pela UI dada uma tolerância em PPM:
/// `floor(out·(1e6 − tol)/1e6)`.
pub fn min_out_with_tolerance(
    reserve_in: Amount,
    reserve_out: Amount,
    amount_in: Amount,
    tolerance_ppm: u32,
) -> Result<Amount> {
    let out = get_amount_out(reserve_in, reserve_out, amount_in)?;
    let tol = tolerance_ppm.min(PPM_SCALE);
    let factor = u128::from(PPM_SCALE - tol);
    let q = mul_u128_to_u256(out, factor) / U256::from(PPM_SCALE);
    u256_to_u128_checked(q)
}
