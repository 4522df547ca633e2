//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use crate::graph::ExprId;

#[inline]
pub fn ensure_listed<T>(slot: Option<T>) -> T {
    slot.expect("index: expression listed twice (listing should skip seen nodes)")
}

#[inline]
pub fn ensure_renumbered(slot: Option<ExprId>, old: ExprId) -> ExprId {
    slot.unwrap_or_else(|| {
        panic!("index: child {old} was never listed (unresolved reference after resolve?)")
    })
}

#[inline]
pub fn unreachable_ref(id: ExprId) -> ! {
    panic!("{id} is an unresolved reference (resolve should have replaced it)")
}
