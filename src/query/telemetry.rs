//! Query timing and the per-request audit trail.
//!
//! Audit lines go to the `patient_visits::audit` target, which the logger
//! routes to its own file.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub const AUDIT_TARGET: &str = "patient_visits::audit";
const DEFAULT_SLOW_QUERY_MS: u64 = 500;

static SLOW_QUERY_MS: AtomicU64 = AtomicU64::new(DEFAULT_SLOW_QUERY_MS);

pub fn set_slow_query_ms(ms: u64) {
    SLOW_QUERY_MS.store(ms, Ordering::Relaxed);
}

#[must_use]
pub fn slow_query_ms() -> u64 {
    SLOW_QUERY_MS.load(Ordering::Relaxed)
}

/// Record one completed operation: an audit line, plus a warning if it was slow.
pub fn record(op: &str, detail: &str, scanned: usize, matched: usize, elapsed: Duration) {
    let ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    log::info!(
        target: AUDIT_TARGET,
        "{{\"op\":\"{op}\",\"criteria\":{detail},\"scanned\":{scanned},\"matched\":{matched},\"duration_ms\":{ms}}}"
    );
    if ms >= slow_query_ms() {
        log::warn!("slow {op}: {ms} ms over {scanned} records (criteria {detail})");
    }
}
