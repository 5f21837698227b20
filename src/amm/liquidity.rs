//! Liquidez single-sided: o suprimento de shares é ressincronizado com
//! `floor(sqrt(rA·rB))` a cada deposit; em withdraw o lado sacado é levado
//! à reserva implícita pelo invariante e o payout sofre a taxa de 0,3%,
//! que permanece no pool valorizando as shares restantes.

use super::error::Result;
use super::error_catalog::AmmErrorCode;
use super::fee::apply_fee;
use super::guardrails::{ensure_nonzero, mul_div, sqrt_k};
use super::types::Amount;
use crate::amm_err;

/// Mint inicial de shares: `floor(sqrt(a·b))`. Requer ambos positivos.
pub fn initial_mint(a: Amount, b: Amount) -> Result<Amount> {
    ensure_nonzero(a)?;
    ensure_nonzero(b)?;
    sqrt_k(a, b)
}

/// Resultado de um cálculo de depósito single-sided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DepositOutcome {
    /// Suprimento total após a ressincronização.
    pub new_total: Amount,
    /// Shares mintadas ao depositante (`new_total - total`; pode ser 0).
    pub minted: Amount,
}

/// Deposit: com a reserva do lado já somada de `amount`, o novo total é
/// `floor(sqrt(updated·other))` e o mint é a diferença para o total atual.
/// A diferença nunca é negativa (aumentar um fator não reduz o produto);
/// pode ser 0 por truncamento para depósitos pequenos — isso é legal, o
/// depositante paga e recebe 0 shares.
pub fn deposit_mint(
    updated_reserve: Amount,
    other_reserve: Amount,
    total_shares: Amount,
) -> Result<DepositOutcome> {
    let new_total = sqrt_k(updated_reserve, other_reserve)?;
    let minted = new_total
        .checked_sub(total_shares)
        .ok_or_else(|| amm_err!(AmmErrorCode::InvariantViolation, new_total => new_total, total => total_shares))?;
    Ok(DepositOutcome { new_total, minted })
}

/// Resultado de um cálculo de saque single-sided.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WithdrawOutcome {
    /// Suprimento total após o burn.
    pub new_total: Amount,
    /// Valor bruto liberado pelo invariante (`reserve - implied`).
    pub gross: Amount,
    /// Valor pago ao sacador: `floor(gross·997/1000)`. A reserva do lado
    /// sacado diminui exatamente `payout`, não `gross`.
    pub payout: Amount,
}

/// Withdraw: `new_total = total - burn`; a reserva implícita do lado
/// sacado é `floor(new_total² / other)`; o excedente bruto sofre a taxa.
/// O invariante de raiz quadrada **não** é restaurado — por construção.
pub fn withdraw_amounts(
    reserve: Amount,
    other_reserve: Amount,
    burn_shares: Amount,
    total_shares: Amount,
) -> Result<WithdrawOutcome> {
    ensure_nonzero(burn_shares)?;
    let new_total = total_shares
        .checked_sub(burn_shares)
        .ok_or_else(|| amm_err!(AmmErrorCode::InsufficientShares, requested => burn_shares, total => total_shares))?;
    let implied = mul_div(new_total, new_total, other_reserve)?;
    let gross = reserve
        .checked_sub(implied)
        .ok_or_else(|| amm_err!(AmmErrorCode::InvariantViolation, implied => implied, reserve => reserve))?;
    let payout = apply_fee(gross)?;
    Ok(WithdrawOutcome {
        new_total,
        gross,
        payout,
    })
}
