//! Capacidade externa de transferência de tokens. Os dois ativos do par
//! vivem em ledgers fora do core; o pool só exige semântica tudo-ou-nada
//! com erros distinguíveis (saldo, allowance ou rejeição genérica).

use std::collections::BTreeMap;

use super::error::Result;
use super::error_catalog::AmmErrorCode;
use super::guardrails::checked_add;
use super::types::{AccountId, Amount, TokenId};
use crate::amm_bail;

/// Seam entre o motor do pool e os ledgers de token externos.
/// Cada chamada ou tem efeito completo ou falha sem efeito algum.
pub trait TokenTransfer {
    /// Puxa `amount` do token de `from` para a custódia do pool.
    fn transfer_in(&mut self, token: TokenId, from: AccountId, amount: Amount) -> Result<()>;
    /// Paga `amount` do token da custódia do pool para `to`.
    fn transfer_out(&mut self, token: TokenId, to: AccountId, amount: Amount) -> Result<()>;
}

/// Ledger de tokens em memória com semântica mint/approve/transferFrom,
/// usado pelo binário de demonstração e pelos testes de integração.
#[derive(Clone, Debug)]
pub struct InMemoryTokenLedger {
    pool_account: AccountId,
    balances: BTreeMap<(TokenId, AccountId), Amount>,
    /// Allowances concedidas ao pool, por (token, dono).
    allowances: BTreeMap<(TokenId, AccountId), Amount>,
}

impl InMemoryTokenLedger {
    pub fn new(pool_account: AccountId) -> Self {
        Self {
            pool_account,
            balances: BTreeMap::new(),
            allowances: BTreeMap::new(),
        }
    }

    pub fn pool_account(&self) -> AccountId {
        self.pool_account
    }

    pub fn balance_of(&self, token: TokenId, account: AccountId) -> Amount {
        self.balances.get(&(token, account)).copied().unwrap_or(0)
    }

    pub fn allowance(&self, token: TokenId, owner: AccountId) -> Amount {
        self.allowances.get(&(token, owner)).copied().unwrap_or(0)
    }

    pub fn mint(&mut self, token: TokenId, account: AccountId, amount: Amount) -> Result<()> {
        let updated = checked_add(self.balance_of(token, account), amount)?;
        self.balances.insert((token, account), updated);
        Ok(())
    }

    /// Define (substitui) a allowance do dono para o pool.
    pub fn approve(&mut self, token: TokenId, owner: AccountId, amount: Amount) {
        self.allowances.insert((token, owner), amount);
    }

    fn credit(&mut self, token: TokenId, account: AccountId, amount: Amount) -> Result<()> {
        let updated = checked_add(self.balance_of(token, account), amount)?;
        self.balances.insert((token, account), updated);
        Ok(())
    }
}

impl TokenTransfer for InMemoryTokenLedger {
    fn transfer_in(&mut self, token: TokenId, from: AccountId, amount: Amount) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        let balance = self.balance_of(token, from);
        if balance < amount {
            amm_bail!(
                AmmErrorCode::InsufficientBalance,
                token => token.0,
                account => from,
                balance => balance,
                requested => amount,
            );
        }
        let allowance = self.allowance(token, from);
        if allowance < amount {
            amm_bail!(
                AmmErrorCode::InsufficientAllowance,
                token => token.0,
                account => from,
                allowance => allowance,
                requested => amount,
            );
        }
        // crédito primeiro: se estourar, nada foi debitado ainda
        self.credit(token, self.pool_account, amount)?;
        self.balances.insert((token, from), balance - amount);
        self.allowances.insert((token, from), allowance - amount);
        Ok(())
    }

    fn transfer_out(&mut self, token: TokenId, to: AccountId, amount: Amount) -> Result<()> {
        if amount == 0 {
            return Ok(());
        }
        let custody = self.balance_of(token, self.pool_account);
        if custody < amount {
            amm_bail!(
                AmmErrorCode::InsufficientBalance,
                token => token.0,
                account => self.pool_account,
                balance => custody,
                requested => amount,
            );
        }
        self.credit(token, to, amount)?;
        self.balances
            .insert((token, self.pool_account), self.balance_of(token, self.pool_account) - amount);
        Ok(())
    }
}
