//! Ledger fungível das shares do pool: saldos por conta + suprimento
//! total. Invariante: a soma dos saldos é igual ao total, sempre.
//! Montantes zero são no-ops legais.

use std::collections::BTreeMap;

use super::error::Result;
use super::error_catalog::AmmErrorCode;
use super::guardrails::checked_add;
use super::types::{AccountId, Amount};
use crate::amm_bail;

#[derive(Clone, Debug, Default)]
pub struct ShareLedger {
    balances: BTreeMap<AccountId, Amount>,
    total: Amount,
}

impl ShareLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance_of(&self, account: AccountId) -> Amount {
        self.balances.get(&account).copied().unwrap_or(0)
    }

    pub fn total_supply(&self) -> Amount {
        self.total
    }

    /// Credita `amount` à conta e ao total. `amount == 0` é no-op.
    pub fn mint(&mut self, account: AccountId, amount: Amount) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        // total >= saldo individual, então o total estoura primeiro
        self.total = checked_add(self.total, amount)?;
        let entry = self.balances.entry(account).or_insert(0);
        *entry += amount;
        Ok(())
    }

    /// Debita `amount` da conta e do total. `amount == 0` é no-op.
    pub fn burn(&mut self, account: AccountId, amount: Amount) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        let balance = self.balance_of(account);
        if balance < amount {
            amm_bail!(
                AmmErrorCode::InsufficientShares,
                account => account,
                balance => balance,
                requested => amount,
            );
        }
        let remaining = balance - amount;
        if remaining == 0 {
            self.balances.remove(&account);
        } else {
            self.balances.insert(account, remaining);
        }
        self.total -= amount;
        Ok(())
    }

    /// Move `amount` entre contas sem alterar o total.
    pub fn transfer(&mut self, from: AccountId, to: AccountId, amount: Amount) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        let balance = self.balance_of(from);
        if balance < amount {
            amm_bail!(
                AmmErrorCode::InsufficientShares,
                account => from,
                balance => balance,
                requested => amount,
            );
        }
        if from == to {
            return Ok(());
        }
        let remaining = balance - amount;
        if remaining == 0 {
            self.balances.remove(&from);
        } else {
            self.balances.insert(from, remaining);
        }
        // saldo destino não estoura: soma total cabe no total já mintado
        *self.balances.entry(to).or_insert(0) += amount;
        Ok(())
    }
}

// -------------------------
// TESTES
// -------------------------
#[cfg(test)]
mod tests {
    use super::*;

    fn sum(ledger: &ShareLedger, accounts: &[AccountId]) -> Amount {
        accounts.iter().map(|a| ledger.balance_of(*a)).sum()
    }

    #[test]
    fn t_mint_burn_conservation() {
        let mut ledger = ShareLedger::new();
        ledger.mint(1, 500).unwrap();
        ledger.mint(2, 300).unwrap();
        ledger.burn(1, 200).unwrap();
        assert_eq!(ledger.total_supply(), 600);
        assert_eq!(sum(&ledger, &[1, 2]), ledger.total_supply());
    }

    #[test]
    fn t_burn_insufficient() {
        let mut ledger = ShareLedger::new();
        ledger.mint(1, 10).unwrap();
        let err = ledger.burn(1, 11).unwrap_err();
        assert_eq!(err.code, AmmErrorCode::InsufficientShares);
        // falha não muda nada
        assert_eq!(ledger.balance_of(1), 10);
        assert_eq!(ledger.total_supply(), 10);
    }

    #[test]
    fn t_zero_amounts_are_noops() {
        let mut ledger = ShareLedger::new();
        ledger.mint(1, 0).unwrap();
        ledger.burn(1, 0).unwrap();
        ledger.transfer(1, 2, 0).unwrap();
        assert_eq!(ledger.total_supply(), 0);
        assert_eq!(ledger.balance_of(1), 0);
    }

    #[test]
    fn t_transfer_moves_without_changing_total() {
        let mut ledger = ShareLedger::new();
        ledger.mint(1, 100).unwrap();
        ledger.transfer(1, 2, 40).unwrap();
        assert_eq!(ledger.balance_of(1), 60);
        assert_eq!(ledger.balance_of(2), 40);
        assert_eq!(ledger.total_supply(), 100);

        let err = ledger.transfer(2, 1, 41).unwrap_err();
        assert_eq!(err.code, AmmErrorCode::InsufficientShares);
    }

    #[test]
    fn t_self_transfer_is_noop() {
        let mut ledger = ShareLedger::new();
        ledger.mint(1, 100).unwrap();
        ledger.transfer(1, 1, 100).unwrap();
        assert_eq!(ledger.balance_of(1), 100);
        assert_eq!(ledger.total_supply(), 100);
    }

    #[test]
    fn t_mint_overflow() {
        let mut ledger = ShareLedger::new();
        ledger.mint(1, u128::MAX).unwrap();
        let err = ledger.mint(2, 1).unwrap_err();
        assert_eq!(err.code, AmmErrorCode::OverflowNumeric);
    }
}
