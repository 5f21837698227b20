pub mod types;
pub mod guardrails;
pub mod fee;
pub mod swap;
pub mod liquidity;
pub mod ledger;
pub mod reserves;
pub mod token;
pub mod pool;
pub mod pricing;
pub mod ref_golden; // oráculo de testes, fora do caminho de produção

// módulos unificados de erro
pub mod error_catalog;
pub mod error;
pub mod error_map;
