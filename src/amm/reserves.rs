//! As duas reservas do pool e sua mutação guardada. Depois de
//! `initialize` ambas são estritamente positivas para sempre: `decrease`
//! recusa qualquer operação que levaria uma reserva a zero ou abaixo.
//! Nenhuma mutação direta fora do motor do pool.

use super::error::Result;
use super::guardrails::{checked_add, checked_sub};
use super::error_catalog::AmmErrorCode;
use super::types::{Amount, Side};
use crate::amm_bail;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReserveState {
    a: Amount,
    b: Amount,
}

impl ReserveState {
    pub fn new(a: Amount, b: Amount) -> Self {
        Self { a, b }
    }

    pub fn get(&self, side: Side) -> Amount {
        match side {
            Side::A => self.a,
            Side::B => self.b,
        }
    }

    pub fn pair(&self) -> (Amount, Amount) {
        (self.a, self.b)
    }

    pub fn increase(&mut self, side: Side, amount: Amount) -> Result<()> {
        let updated = checked_add(self.get(side), amount)?;
        self.set(side, updated);
        Ok(())
    }

    /// Diminui a reserva; falha se `amount` alcançaria ou excederia o
    /// valor atual (a reserva resultante deve ficar > 0).
    pub fn decrease(&mut self, side: Side, amount: Amount) -> Result<()> {
        let current = self.get(side);
        if amount >= current {
            amm_bail!(
                AmmErrorCode::InsufficientReserve,
                reserve => current,
                requested => amount,
            );
        }
        self.set(side, checked_sub(current, amount)?);
        Ok(())
    }

    fn set(&mut self, side: Side, value: Amount) {
        match side {
            Side::A => self.a = value,
            Side::B => self.b = value,
        }
    }
}

// -------------------------
// TESTES
// -------------------------
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_increase_decrease() {
        let mut r = ReserveState::new(100, 200);
        r.increase(Side::A, 50).unwrap();
        r.decrease(Side::B, 150).unwrap();
        assert_eq!(r.pair(), (150, 50));
    }

    #[test]
    fn t_decrease_to_zero_rejected() {
        let mut r = ReserveState::new(100, 200);
        let err = r.decrease(Side::A, 100).unwrap_err();
        assert_eq!(err.code, AmmErrorCode::InsufficientReserve);
        assert_eq!(r.pair(), (100, 200));
    }

    #[test]
    fn t_decrease_above_reserve_rejected() {
        let mut r = ReserveState::new(100, 200);
        let err = r.decrease(Side::B, 201).unwrap_err();
        assert_eq!(err.code, AmmErrorCode::InsufficientReserve);
    }

    #[test]
    fn t_decrease_zero_keeps_positive_reserve() {
        let mut r = ReserveState::new(1, 1);
        r.decrease(Side::A, 0).unwrap();
        assert_eq!(r.get(Side::A), 1);
    }

    #[test]
    fn t_increase_overflow() {
        let mut r = ReserveState::new(u128::MAX, 1);
        let err = r.increase(Side::A, 1).unwrap_err();
        assert_eq!(err.code, AmmErrorCode::OverflowNumeric);
    }
}
