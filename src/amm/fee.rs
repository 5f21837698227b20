//! Política de taxa do pool: fração fixa 997/1000 (0,3%), imutável por
//! toda a vida do pool.

use super::error::Result;
use super::guardrails::mul_div;
use super::types::{Amount, U256};

pub const FEE_NUMERATOR: u64 = 997;
pub const FEE_DENOMINATOR: u64 = 1000;

/// Parcela paga após a taxa: `floor(amount * 997 / 1000)`.
/// Usada pelo payout de withdraw; a diferença fica retida no pool.
pub fn apply_fee(amount: Amount) -> Result<Amount> {
    mul_div(amount, FEE_NUMERATOR as u128, FEE_DENOMINATOR as u128)
}

/// Input do swap já descontado da taxa, **sem** floor intermediário:
/// `amount * 997` em U256. A fórmula do swap divide uma única vez no final.
pub fn swap_input_with_fee(amount: Amount) -> U256 {
    U256::from(amount) * U256::from(FEE_NUMERATOR)
}
