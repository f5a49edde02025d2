//! Value and tax aggregation over the two sides of a trade.
//!
//! Tax on a side is paid by whoever sends those items: offered-side tax
//! by the user, requested-side tax by the counterparty. Every `net_*`
//! field is `requested - offered`, so a positive net value is a gain for
//! the user and a positive net tax means the counterparty pays more tax.

use crate::domain::LedgerEntry;
use serde::Serialize;

/// Totals for one ledger pair. Recomputed on every change, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReconciliationResult {
    pub value_offered: i64,
    pub value_requested: i64,
    pub gem_tax_offered: i64,
    pub gem_tax_requested: i64,
    pub gold_tax_offered: i64,
    pub gold_tax_requested: i64,
    pub net_value: i64,
    pub net_gem_tax: i64,
    pub net_gold_tax: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct SideTotals {
    value: i64,
    gem_tax: i64,
    gold_tax: i64,
}

impl SideTotals {
    fn of(entries: &[LedgerEntry]) -> Self {
        entries.iter().fold(Self::default(), |acc, entry| SideTotals {
            value: acc.value + entry.value(),
            gem_tax: acc.gem_tax + entry.gem_tax(),
            gold_tax: acc.gold_tax + entry.gold_tax(),
        })
    }
}

/// Aggregate both sides. Pure: identical inputs give identical results.
pub fn reconcile(offered: &[LedgerEntry], requested: &[LedgerEntry]) -> ReconciliationResult {
    let give = SideTotals::of(offered);
    let get = SideTotals::of(requested);

    ReconciliationResult {
        value_offered: give.value,
        value_requested: get.value,
        gem_tax_offered: give.gem_tax,
        gem_tax_requested: get.gem_tax,
        gold_tax_offered: give.gold_tax,
        gold_tax_requested: get.gold_tax,
        net_value: get.value - give.value,
        net_gem_tax: get.gem_tax - give.gem_tax,
        net_gold_tax: get.gold_tax - give.gold_tax,
    }
}
