//! Função pura de swap (CPMM x·y=k) com taxa de 0,3% sobre o input.
//!
//! `amount_out = floor(dx·997·r_out / (r_in·1000 + dx·997))`
//!
//! A divisão acontece **uma única vez**, no final — nunca em dois floors
//! sequenciais (taxa e depois preço), que divergem em até uma unidade.

use super::error::Result;
use super::error_catalog::AmmErrorCode;
use super::fee::{swap_input_with_fee, FEE_DENOMINATOR};
use super::guardrails::{checked_add, ensure_nonzero, u256_to_u128_checked};
use super::types::{Amount, U256};
use crate::amm_bail;

/// Calcula o `amount_out` ao enviar `amount_in` do ativo de entrada.
/// Falha com `InsufficientLiquidity` se a saída é zero ou se esvaziaria
/// (ou excederia) a reserva oposta.
pub fn get_amount_out(
    reserve_in: Amount,
    reserve_out: Amount,
    amount_in: Amount,
) -> Result<Amount> {
    if reserve_in == 0 || reserve_out == 0 {
        amm_bail!(AmmErrorCode::InsufficientReserve, reserve_in => reserve_in, reserve_out => reserve_out);
    }
    ensure_nonzero(amount_in)?;
    // a reserva de entrada pós-swap precisa caber em u128
    checked_add(reserve_in, amount_in)?;

    let amount_in_with_fee = swap_input_with_fee(amount_in);
    let numerator = amount_in_with_fee * U256::from(reserve_out);
    let denominator = U256::from(reserve_in) * U256::from(FEE_DENOMINATOR) + amount_in_with_fee;
    let amount_out = u256_to_u128_checked(numerator / denominator)?;

    if amount_out == 0 || amount_out >= reserve_out {
        amm_bail!(
            AmmErrorCode::InsufficientLiquidity,
            amount_out => amount_out,
            reserve_out => reserve_out,
        );
    }
    Ok(amount_out)
}
