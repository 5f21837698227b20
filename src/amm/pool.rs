//! Motor do pool: compõe reservas, ledger de shares e a capacidade
//! externa de transferência.
//!
//! Cada operação segue a mesma ordem: validar → computar → transferências
//! externas → commit do estado local. Toda etapa falível vem antes da
//! primeira escrita de estado, então qualquer falha (inclusive do ledger
//! externo) deixa reservas, suprimento e saldos de shares intactos. O
//! `&mut self` serializa as mutações: uma operação termina antes da
//! próxima começar.

use tracing::debug;

use super::error::Result;
use super::error_catalog::AmmErrorCode;
use super::ledger::ShareLedger;
use super::liquidity::{deposit_mint, initial_mint, withdraw_amounts};
use super::guardrails::{checked_add, ensure_nonzero};
use super::reserves::ReserveState;
use super::swap::get_amount_out;
use super::token::TokenTransfer;
use super::types::{AccountId, Amount, Side, TokenId};
use crate::amm_bail;

/// Pool de produto constante de dois ativos, emissor das próprias shares.
#[derive(Clone, Debug)]
pub struct PoolEngine {
    token_a: TokenId,
    token_b: TokenId,
    reserves: ReserveState,
    shares: ShareLedger,
    initialized: bool,
}

impl PoolEngine {
    /// Cria o pool vazio (reservas e suprimento zero, não inicializado).
    /// O par é fixo pela vida inteira do pool e precisa ser distinto.
    pub fn new(token_a: TokenId, token_b: TokenId) -> Result<Self> {
        if token_a == token_b {
            amm_bail!(AmmErrorCode::DuplicateToken, token => token_a.0);
        }
        Ok(Self {
            token_a,
            token_b,
            reserves: ReserveState::new(0, 0),
            shares: ShareLedger::new(),
            initialized: false,
        })
    }

    pub fn token_a(&self) -> TokenId {
        self.token_a
    }

    pub fn token_b(&self) -> TokenId {
        self.token_b
    }

    /// Reservas atuais `(reserve_a, reserve_b)`. Leitura pura.
    pub fn get_reserves(&self) -> (Amount, Amount) {
        self.reserves.pair()
    }

    /// Suprimento total de shares. Leitura pura.
    pub fn total_supply(&self) -> Amount {
        self.shares.total_supply()
    }

    /// Saldo de shares de uma conta. Leitura pura.
    pub fn balance_of(&self, account: AccountId) -> Amount {
        self.shares.balance_of(account)
    }

    /// Transferência de shares entre contas (o pool é o emissor do próprio
    /// token de liquidez); não toca reservas nem suprimento.
    pub fn transfer_shares(
        &mut self,
        from: AccountId,
        to: AccountId,
        amount: Amount,
    ) -> Result<()> {
        self.shares.transfer(from, to, amount)
    }

    fn ensure_active(&self) -> Result<()> {
        if !self.initialized {
            amm_bail!(AmmErrorCode::NotInitialized);
        }
        Ok(())
    }

    fn side_of(&self, token: TokenId) -> Result<Side> {
        if token == self.token_a {
            Ok(Side::A)
        } else if token == self.token_b {
            Ok(Side::B)
        } else {
            amm_bail!(AmmErrorCode::UnknownAsset, token => token.0);
        }
    }

    fn token_of(&self, side: Side) -> TokenId {
        match side {
            Side::A => self.token_a,
            Side::B => self.token_b,
        }
    }

    /// Transição única `Uninitialized → Active`: puxa os dois montantes do
    /// chamador e minta `floor(sqrt(a·b))` shares para ele. Se o segundo
    /// pull falhar, o primeiro é estornado antes do erro propagar.
    pub fn initialize<L: TokenTransfer>(
        &mut self,
        tokens: &mut L,
        caller: AccountId,
        amount_a: Amount,
        amount_b: Amount,
    ) -> Result<Amount> {
        if self.initialized {
            amm_bail!(AmmErrorCode::AlreadyInitialized);
        }
        ensure_nonzero(amount_a)?;
        ensure_nonzero(amount_b)?;
        let minted = initial_mint(amount_a, amount_b)?;

        tokens.transfer_in(self.token_a, caller, amount_a)?;
        if let Err(err) = tokens.transfer_in(self.token_b, caller, amount_b) {
            // estorno best-effort do primeiro pull; estado local intacto
            let _ = tokens.transfer_out(self.token_a, caller, amount_a);
            return Err(err);
        }

        self.reserves = ReserveState::new(amount_a, amount_b);
        self.shares.mint(caller, minted)?;
        self.initialized = true;
        debug!(amount_a, amount_b, minted, "pool inicializado");
        Ok(minted)
    }

    /// Depósito single-sided: a reserva do lado recebe `amount` e o
    /// suprimento é ressincronizado com `floor(sqrt(rA·rB))`. Retorna as
    /// shares mintadas — que podem ser 0 por truncamento (o depositante
    /// paga mesmo assim; comportamento intencional).
    pub fn deposit<L: TokenTransfer>(
        &mut self,
        tokens: &mut L,
        caller: AccountId,
        asset: TokenId,
        amount: Amount,
    ) -> Result<Amount> {
        self.ensure_active()?;
        let side = self.side_of(asset)?;
        ensure_nonzero(amount)?;

        let updated = checked_add(self.reserves.get(side), amount)?;
        let other = self.reserves.get(side.other());
        let outcome = deposit_mint(updated, other, self.shares.total_supply())?;

        tokens.transfer_in(asset, caller, amount)?;

        self.reserves.increase(side, amount)?;
        self.shares.mint(caller, outcome.minted)?;
        debug!(
            token = asset.0,
            amount,
            minted = outcome.minted,
            new_total = outcome.new_total,
            "depósito aplicado"
        );
        Ok(outcome.minted)
    }

    /// Saque single-sided: queima `share_amount`, leva o lado sacado à
    /// reserva implícita do invariante e paga `floor(gross·997/1000)`.
    /// Os 0,3% restantes ficam no pool. Retorna o payout.
    pub fn withdraw<L: TokenTransfer>(
        &mut self,
        tokens: &mut L,
        caller: AccountId,
        asset: TokenId,
        share_amount: Amount,
    ) -> Result<Amount> {
        self.ensure_active()?;
        let side = self.side_of(asset)?;
        ensure_nonzero(share_amount)?;

        let balance = self.shares.balance_of(caller);
        if balance < share_amount {
            amm_bail!(
                AmmErrorCode::InsufficientShares,
                account => caller,
                balance => balance,
                requested => share_amount,
            );
        }
        let reserve = self.reserves.get(side);
        let other = self.reserves.get(side.other());
        let outcome = withdraw_amounts(reserve, other, share_amount, self.shares.total_supply())?;
        // o commit não pode falhar: o decrease é validado antes do pagamento
        if outcome.payout >= reserve {
            amm_bail!(
                AmmErrorCode::InsufficientReserve,
                reserve => reserve,
                requested => outcome.payout,
            );
        }

        tokens.transfer_out(asset, caller, outcome.payout)?;

        self.shares.burn(caller, share_amount)?;
        self.reserves.decrease(side, outcome.payout)?;
        debug!(
            token = asset.0,
            burned = share_amount,
            payout = outcome.payout,
            retained = outcome.gross - outcome.payout,
            "saque aplicado"
        );
        Ok(outcome.payout)
    }

    /// Swap exato-na-entrada sob produto constante com taxa de 0,3%.
    /// `total_shares` não muda; o produto das reservas nunca diminui.
    /// Se o pagamento de saída falhar, o pull de entrada é estornado.
    pub fn swap<L: TokenTransfer>(
        &mut self,
        tokens: &mut L,
        caller: AccountId,
        asset_in: TokenId,
        amount_in: Amount,
    ) -> Result<Amount> {
        self.ensure_active()?;
        let side_in = self.side_of(asset_in)?;
        ensure_nonzero(amount_in)?;

        let reserve_in = self.reserves.get(side_in);
        let reserve_out = self.reserves.get(side_in.other());
        let amount_out = get_amount_out(reserve_in, reserve_out, amount_in)?;
        let token_out = self.token_of(side_in.other());

        tokens.transfer_in(asset_in, caller, amount_in)?;
        if let Err(err) = tokens.transfer_out(token_out, caller, amount_out) {
            let _ = tokens.transfer_out(asset_in, caller, amount_in);
            return Err(err);
        }

        self.reserves.increase(side_in, amount_in)?;
        self.reserves.decrease(side_in.other(), amount_out)?;
        debug!(
            token_in = asset_in.0,
            amount_in,
            amount_out,
            "swap executado"
        );
        Ok(amount_out)
    }
}

// -------------------------
// TESTES
// -------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use crate::amm::token::InMemoryTokenLedger;

    const POOL: AccountId = 0;
    const OWNER: AccountId = 1;
    const TOKEN_A: TokenId = TokenId(1);
    const TOKEN_B: TokenId = TokenId(2);

    /// Pool de referência: reservas (100000, 25000), suprimento 50000.
    fn setup() -> (PoolEngine, InMemoryTokenLedger) {
        let mut tokens = InMemoryTokenLedger::new(POOL);
        tokens.mint(TOKEN_A, OWNER, 1_000_000).unwrap();
        tokens.mint(TOKEN_B, OWNER, 1_000_000).unwrap();
        tokens.approve(TOKEN_A, OWNER, 1_000_000);
        tokens.approve(TOKEN_B, OWNER, 1_000_000);

        let mut pool = PoolEngine::new(TOKEN_A, TOKEN_B).unwrap();
        pool.initialize(&mut tokens, OWNER, 100_000, 25_000).unwrap();
        (pool, tokens)
    }

    #[test]
    fn t_duplicate_pair_rejected() {
        let err = PoolEngine::new(TOKEN_A, TOKEN_A).unwrap_err();
        assert_eq!(err.code, AmmErrorCode::DuplicateToken);
    }

    #[test]
    fn t_initialize_mints_sqrt_of_product() {
        let (pool, tokens) = setup();
        assert_eq!(pool.get_reserves(), (100_000, 25_000));
        assert_eq!(pool.total_supply(), 50_000);
        assert_eq!(pool.balance_of(OWNER), 50_000);
        // custódia do pool recebeu os dois montantes
        assert_eq!(tokens.balance_of(TOKEN_A, POOL), 100_000);
        assert_eq!(tokens.balance_of(TOKEN_B, POOL), 25_000);
    }

    #[test]
    fn t_initialize_twice_rejected() {
        let (mut pool, mut tokens) = setup();
        let err = pool
            .initialize(&mut tokens, OWNER, 1_000, 1_000)
            .unwrap_err();
        assert_eq!(err.code, AmmErrorCode::AlreadyInitialized);
    }

    #[test]
    fn t_operations_require_initialize() {
        let mut tokens = InMemoryTokenLedger::new(POOL);
        let mut pool = PoolEngine::new(TOKEN_A, TOKEN_B).unwrap();
        for err in [
            pool.deposit(&mut tokens, OWNER, TOKEN_A, 10).unwrap_err(),
            pool.withdraw(&mut tokens, OWNER, TOKEN_A, 10).unwrap_err(),
            pool.swap(&mut tokens, OWNER, TOKEN_A, 10).unwrap_err(),
        ] {
            assert_eq!(err.code, AmmErrorCode::NotInitialized);
        }
    }

    #[test]
    fn t_deposit_resyncs_supply() {
        let (mut pool, mut tokens) = setup();
        let minted = pool.deposit(&mut tokens, OWNER, TOKEN_A, 1_000).unwrap();
        assert_eq!(minted, 249);
        assert_eq!(pool.get_reserves(), (101_000, 25_000));
        assert_eq!(pool.total_supply(), 50_249);
        assert_eq!(pool.balance_of(OWNER), 50_249);
        assert_eq!(tokens.balance_of(TOKEN_A, OWNER), 900_000 - 1_000);
    }

    #[test]
    fn t_withdraw_pays_with_fee_retained() {
        let (mut pool, mut tokens) = setup();
        let payout = pool.withdraw(&mut tokens, OWNER, TOKEN_A, 1_000).unwrap();
        assert_eq!(payout, 3_948);
        assert_eq!(pool.get_reserves(), (96_052, 25_000));
        assert_eq!(pool.total_supply(), 49_000);
        assert_eq!(tokens.balance_of(TOKEN_A, OWNER), 900_000 + 3_948);
    }

    #[test]
    fn t_swap_golden_vector() {
        let (mut pool, mut tokens) = setup();
        let out = pool.swap(&mut tokens, OWNER, TOKEN_A, 10_000).unwrap();
        assert_eq!(out, 2_266);
        assert_eq!(pool.get_reserves(), (110_000, 22_734));
        // suprimento inalterado por swap
        assert_eq!(pool.total_supply(), 50_000);
        assert_eq!(tokens.balance_of(TOKEN_B, OWNER), 975_000 + 2_266);
    }

    #[test]
    fn t_unknown_asset_rejected() {
        let (mut pool, mut tokens) = setup();
        let other = TokenId(99);
        for err in [
            pool.deposit(&mut tokens, OWNER, other, 10).unwrap_err(),
            pool.withdraw(&mut tokens, OWNER, other, 10).unwrap_err(),
            pool.swap(&mut tokens, OWNER, other, 10).unwrap_err(),
        ] {
            assert_eq!(err.code, AmmErrorCode::UnknownAsset);
        }
    }

    #[test]
    fn t_zero_amounts_rejected() {
        let (mut pool, mut tokens) = setup();
        for err in [
            pool.deposit(&mut tokens, OWNER, TOKEN_A, 0).unwrap_err(),
            pool.withdraw(&mut tokens, OWNER, TOKEN_A, 0).unwrap_err(),
            pool.swap(&mut tokens, OWNER, TOKEN_A, 0).unwrap_err(),
        ] {
            assert_eq!(err.code, AmmErrorCode::ZeroAmount);
        }
    }

    #[test]
    fn t_withdraw_above_balance_rejected() {
        let (mut pool, mut tokens) = setup();
        let err = pool
            .withdraw(&mut tokens, OWNER, TOKEN_A, 50_001)
            .unwrap_err();
        assert_eq!(err.code, AmmErrorCode::InsufficientShares);
        assert_eq!(pool.get_reserves(), (100_000, 25_000));
    }

    #[test]
    fn t_share_transfer_between_accounts() {
        let (mut pool, _tokens) = setup();
        const OTHER: AccountId = 7;
        pool.transfer_shares(OWNER, OTHER, 20_000).unwrap();
        assert_eq!(pool.balance_of(OWNER), 30_000);
        assert_eq!(pool.balance_of(OTHER), 20_000);
        assert_eq!(pool.total_supply(), 50_000);
    }

    #[test]
    fn t_reads_are_idempotent() {
        let (pool, _tokens) = setup();
        for _ in 0..3 {
            assert_eq!(pool.get_reserves(), (100_000, 25_000));
            assert_eq!(pool.total_supply(), 50_000);
            assert_eq!(pool.balance_of(OWNER), 50_000);
        }
    }

    #[test]
    fn t_initialize_refunds_first_pull_on_second_failure() {
        let mut tokens = InMemoryTokenLedger::new(POOL);
        tokens.mint(TOKEN_A, OWNER, 1_000_000).unwrap();
        tokens.approve(TOKEN_A, OWNER, 1_000_000);
        // sem saldo/allowance do token B: o segundo pull falha
        let mut pool = PoolEngine::new(TOKEN_A, TOKEN_B).unwrap();
        let err = pool
            .initialize(&mut tokens, OWNER, 100_000, 25_000)
            .unwrap_err();
        assert_eq!(err.code, AmmErrorCode::InsufficientBalance);
        // estado do pool e saldo do chamador intactos
        assert_eq!(pool.get_reserves(), (0, 0));
        assert_eq!(pool.total_supply(), 0);
        assert_eq!(tokens.balance_of(TOKEN_A, OWNER), 1_000_000);
    }
}
