//! Tipos básicos do pool (inteiros exatos, sem escala) + U256 para
//! intermediários. Nenhum caminho do core usa ponto flutuante.

use uint::construct_uint;
construct_uint! {
    /// Inteiro de 256 bits para contas intermediárias seguras.
    pub struct U256(4);
}

/// Montante de token ou de shares, em unidades brutas do ativo.
pub type Amount = u128;

/// Conta no ledger de shares e nos ledgers de token externos.
pub type AccountId = u64;

/// Identidade de um token externo ao pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenId(pub u32);

/// Lado do par dentro do pool.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    /// O lado oposto do par.
    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}
