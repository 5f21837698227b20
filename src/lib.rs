//! Núcleo de contabilidade de um pool CPMM (x·y=k) de dois ativos:
//! ledger de shares sob invariante de raiz quadrada, depósitos e saques
//! single-sided e swaps com taxa fixa de 0,3% sobre o input.
//!
//! Toda a aritmética é inteira e exata (floor explícito, U256 nos
//! intermediários); os tokens do par vivem fora do core e entram apenas
//! pela capacidade [`amm::token::TokenTransfer`].

pub mod amm;
pub mod telemetry;

pub use amm::types::U256;
