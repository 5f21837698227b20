//! Catálogo imutável de erros do pool.
use core::fmt;

/// Código de erro do pool.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub enum AmmErrorCode {
    /// Operações com montante zero onde positivo é exigido.
    ZeroAmount,
    /// Operação de mutação antes de `initialize`.
    NotInitialized,
    /// Segunda chamada a `initialize`.
    AlreadyInitialized,
    /// Token que não pertence ao par do pool.
    UnknownAsset,
    /// Par construído com o mesmo token nos dois lados.
    DuplicateToken,
    /// Mutação deixaria uma reserva em zero ou abaixo.
    InsufficientReserve,
    /// Burn ou transfer excede o saldo de shares da conta.
    InsufficientShares,
    /// Swap sem saída útil ou que esvaziaria a reserva oposta.
    InsufficientLiquidity,
    /// Estado inconsistente detectado (guarda defensiva).
    InvariantViolation,
    /// Overflow ou underflow em cálculos numéricos.
    OverflowNumeric,
    /// Divisão com denominador zero.
    DivideByZero,
    /// Conta sem saldo do token no ledger externo.
    InsufficientBalance,
    /// Allowance concedida ao pool menor que o montante pedido.
    InsufficientAllowance,
    /// O ledger externo rejeitou a transferência.
    TransferRejected,
}

impl AmmErrorCode {
    /// Código textual estável do erro.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::ZeroAmount => "AMM-0001",
            Self::NotInitialized => "AMM-0002",
            Self::AlreadyInitialized => "AMM-0003",
            Self::UnknownAsset => "AMM-0004",
            Self::DuplicateToken => "AMM-0005",
            Self::InsufficientReserve => "AMM-0006",
            Self::InsufficientShares => "AMM-0007",
            Self::InsufficientLiquidity => "AMM-0008",
            Self::InvariantViolation => "AMM-0009",
            Self::OverflowNumeric => "AMM-0010",
            Self::DivideByZero => "AMM-0011",
            Self::InsufficientBalance => "AMM-0012",
            Self::InsufficientAllowance => "AMM-0013",
            Self::TransferRejected => "AMM-0014",
        }
    }

    /// Título curto em português.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::ZeroAmount => "Quantidade zerada",
            Self::NotInitialized => "Pool não inicializado",
            Self::AlreadyInitialized => "Pool já inicializado",
            Self::UnknownAsset => "Ativo desconhecido",
            Self::DuplicateToken => "Par degenerado",
            Self::InsufficientReserve => "Reserva insuficiente",
            Self::InsufficientShares => "Saldo de shares insuficiente",
            Self::InsufficientLiquidity => "Liquidez insuficiente",
            Self::InvariantViolation => "Invariante violado",
            Self::OverflowNumeric => "Overflow numérico",
            Self::DivideByZero => "Divisão por zero",
            Self::InsufficientBalance => "Saldo insuficiente",
            Self::InsufficientAllowance => "Allowance insuficiente",
            Self::TransferRejected => "Transferência rejeitada",
        }
    }

    /// Mensagem base em português.
    pub const fn message_pt(&self) -> &'static str {
        match self {
            Self::ZeroAmount => "amount deve ser > 0",
            Self::NotInitialized => "operação requer pool inicializado",
            Self::AlreadyInitialized => "initialize só pode ser chamado uma vez",
            Self::UnknownAsset => "token não pertence ao par do pool",
            Self::DuplicateToken => "os dois tokens do par devem ser distintos",
            Self::InsufficientReserve => "reserva não pode chegar a zero",
            Self::InsufficientShares => "saldo de shares menor que o pedido",
            Self::InsufficientLiquidity => "swap sem saída ou esvaziaria a reserva oposta",
            Self::InvariantViolation => "estado inconsistente detectado",
            Self::OverflowNumeric => "overflow/underflow numérico",
            Self::DivideByZero => "denominador deve ser > 0",
            Self::InsufficientBalance => "conta não tem saldo do token",
            Self::InsufficientAllowance => "allowance ao pool menor que amount",
            Self::TransferRejected => "ledger externo rejeitou a transferência",
        }
    }

    /// Retorna todas as variantes em ordem estável.
    pub fn all() -> &'static [AmmErrorCode] {
        const ALL: &[AmmErrorCode] = &[
            AmmErrorCode::ZeroAmount,
            AmmErrorCode::NotInitialized,
            AmmErrorCode::AlreadyInitialized,
            AmmErrorCode::UnknownAsset,
            AmmErrorCode::DuplicateToken,
            AmmErrorCode::InsufficientReserve,
            AmmErrorCode::InsufficientShares,
            AmmErrorCode::InsufficientLiquidity,
            AmmErrorCode::InvariantViolation,
            AmmErrorCode::OverflowNumeric,
            AmmErrorCode::DivideByZero,
            AmmErrorCode::InsufficientBalance,
            AmmErrorCode::InsufficientAllowance,
            AmmErrorCode::TransferRejected,
        ];
        ALL
    }
}

impl fmt::Display for AmmErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Mensagem padrão na localidade ativa (pt-BR).
pub fn default_locale_message(code: AmmErrorCode) -> &'static str {
    code.message_pt()
}
