//! Pré-validação pura: mapeia inputs brutos de swap para o código de
//! erro que o motor levantaria, sem executar nada. Útil para UI
//! desabilitar ações antes de submeter a operação.

use crate::amm::error::AmmError;
use crate::amm::error_catalog::AmmErrorCode;
use crate::amm::fee::FEE_DENOMINATOR;
use crate::amm::types::U256;

/// Determina o código de erro para um swap a partir dos inputs brutos.
/// `None` significa que o swap passaria nas validações do motor.
pub fn from_swap_inputs(amount_in: u128, reserves: (u128, u128)) -> Option<AmmErrorCode> {
    let (reserve_in, reserve_out) = reserves;
    if amount_in == 0 {
        return Some(AmmErrorCode::ZeroAmount);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Some(AmmErrorCode::NotInitialized);
    }
    if reserve_in.checked_add(amount_in).is_none() {
        return Some(AmmErrorCode::OverflowNumeric);
    }
    let with_fee = U256::from(amount_in) * U256::from(997u64);
    let numerator = with_fee * U256::from(reserve_out);
    let denominator = U256::from(reserve_in) * U256::from(FEE_DENOMINATOR) + with_fee;
    let out = numerator / denominator;
    if out.is_zero() || out >= U256::from(reserve_out) {
        return Some(AmmErrorCode::InsufficientLiquidity);
    }
    None
}

/// Constrói um [`AmmError`] diretamente de um código.
pub fn to_error(code: AmmErrorCode) -> AmmError {
    AmmError::new(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_zero_amount() {
        assert_eq!(
            from_swap_inputs(0, (100, 100)),
            Some(AmmErrorCode::ZeroAmount)
        );
    }

    #[test]
    fn detects_uninitialized_reserves() {
        assert_eq!(
            from_swap_inputs(1, (0, 100)),
            Some(AmmErrorCode::NotInitialized)
        );
        assert_eq!(
            from_swap_inputs(1, (100, 0)),
            Some(AmmErrorCode::NotInitialized)
        );
    }

    #[test]
    fn detects_overflow() {
        assert_eq!(
            from_swap_inputs(1, (u128::MAX, 100)),
            Some(AmmErrorCode::OverflowNumeric)
        );
    }

    #[test]
    fn detects_dust_input() {
        assert_eq!(
            from_swap_inputs(1, (1_000_000, 10)),
            Some(AmmErrorCode::InsufficientLiquidity)
        );
    }

    #[test]
    fn ok_path_matches_engine() {
        assert_eq!(from_swap_inputs(10_000, (100_000, 25_000)), None);
    }
}
