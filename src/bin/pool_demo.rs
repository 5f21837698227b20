use anyhow::Result;
use num_traits::ToPrimitive;
use opentelemetry::KeyValue;
use std::time::Instant;

use pool_engine_core::amm::pool::PoolEngine;
use pool_engine_core::amm::ref_golden;
use pool_engine_core::amm::token::InMemoryTokenLedger;
use pool_engine_core::amm::types::TokenId;
use pool_engine_core::telemetry;

const POOL_ACCOUNT: u64 = 0;
const ALICE: u64 = 1;

const TOKEN_A: TokenId = TokenId(1);
const TOKEN_B: TokenId = TokenId(2);

fn record_op<F>(tel: &telemetry::Telemetry, name: &'static str, op_id: u32, f: F) -> Result<()>
where
    F: FnOnce() -> pool_engine_core::amm::error::Result<()>,
{
    let span = telemetry::make_info_span(name, op_id, "pool_demo");
    let _guard = span.enter();

    let t0 = Instant::now();
    f()?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;

    tel.op_latency_ms
        .record(elapsed_ms, &[KeyValue::new("op", name)]);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let tel = telemetry::init("pool-engine-core")?;

    let mut ledger = InMemoryTokenLedger::new(POOL_ACCOUNT);
    ledger.mint(TOKEN_A, ALICE, 10_000_000)?;
    ledger.mint(TOKEN_B, ALICE, 10_000_000)?;
    ledger.approve(TOKEN_A, ALICE, 10_000_000);
    ledger.approve(TOKEN_B, ALICE, 10_000_000);

    let mut pool = PoolEngine::new(TOKEN_A, TOKEN_B)?;

    record_op(&tel, "initialize", 0, || {
        let minted = pool.initialize(&mut ledger, ALICE, 1_000_000, 2_000_000)?;
        tracing::info!(minted, "pool inicializado");
        Ok(())
    })?;

    record_op(&tel, "deposit", 1, || {
        let minted = pool.deposit(&mut ledger, ALICE, TOKEN_A, 10_000)?;
        tracing::info!(minted, "depósito lado A");
        Ok(())
    })?;

    record_op(&tel, "withdraw", 2, || {
        let payout = pool.withdraw(&mut ledger, ALICE, TOKEN_B, 10_000)?;
        tracing::info!(payout, "saque lado B");
        Ok(())
    })?;

    for (i, token_in) in [TOKEN_A, TOKEN_B].into_iter().enumerate() {
        let (ra, rb) = pool.get_reserves();
        let (r_in, r_out) = if token_in == TOKEN_A { (ra, rb) } else { (rb, ra) };
        let amount_in: u128 = 10_000;

        let mut amount_out = 0u128;
        record_op(&tel, "swap", 3 + i as u32, || {
            amount_out = pool.swap(&mut ledger, ALICE, token_in, amount_in)?;
            tracing::info!(amount_in, amount_out, token_in = token_in.0, "swap executado");
            Ok(())
        })?;

        // desvio relativo do invariante k após o swap (sempre >= 0 com a taxa)
        let rel = ref_golden::dk_over_k_after_swap(r_in, r_out, amount_in, amount_out)
            .to_f64()
            .unwrap_or(0.0);
        tel.invariant_error_rel
            .record(rel, &[KeyValue::new("op", "swap")]);
    }

    let (ra, rb) = pool.get_reserves();
    tracing::info!(
        reserve_a = ra,
        reserve_b = rb,
        total_shares = pool.total_supply(),
        "estado final do pool"
    );

    tel.shutdown();
    Ok(())
}
