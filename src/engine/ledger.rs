use crate::domain::{Item, LedgerEntry, Quantity, TradeSide};
use tracing::debug;

use super::reconciliation::{reconcile, ReconciliationResult};

/// The two sides of a trade being assembled in one session.
///
/// Entries keep insertion order and the same item may appear more than
/// once on a side; each occurrence is tracked independently.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TradeLedger {
    offered: Vec<LedgerEntry>,
    requested: Vec<LedgerEntry>,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `item` with quantity 1.
    pub fn add_item(&mut self, side: TradeSide, item: Item) {
        debug!(%side, item = %item.id, "ledger add");
        self.side_mut(side).push(LedgerEntry::new(item));
    }

    /// Remove the entry at `index`. Stale indices are ignored.
    pub fn remove_item(&mut self, side: TradeSide, index: usize) {
        let entries = self.side_mut(side);
        if index < entries.len() {
            entries.remove(index);
            debug!(%side, index, "ledger remove");
        }
    }

    /// Set the quantity at `index`, clamped into `[1, 999]`. Stale indices are ignored.
    pub fn set_quantity(&mut self, side: TradeSide, index: usize, requested: i64) {
        if let Some(entry) = self.side_mut(side).get_mut(index) {
            entry.quantity = Quantity::clamped(requested);
            debug!(%side, index, quantity = entry.quantity.get(), "ledger quantity");
        }
    }

    /// Empty both sides.
    pub fn reset(&mut self) {
        self.offered.clear();
        self.requested.clear();
        debug!("ledger reset");
    }

    pub fn entries(&self, side: TradeSide) -> &[LedgerEntry] {
        match side {
            TradeSide::Offered => &self.offered,
            TradeSide::Requested => &self.requested,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.offered.is_empty() && self.requested.is_empty()
    }

    pub fn reconcile(&self) -> ReconciliationResult {
        reconcile(&self.offered, &self.requested)
    }

    fn side_mut(&mut self, side: TradeSide) -> &mut Vec<LedgerEntry> {
        match side {
            TradeSide::Offered => &mut self.offered,
            TradeSide::Requested => &mut self.requested,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scarf() -> Item {
        Item::new("1", "Scarf", 13)
    }

    fn serum() -> Item {
        Item::new("2", "Armour Serum", 15)
    }

    #[test]
    fn test_add_appends_with_quantity_one() {
        let mut ledger = TradeLedger::new();
        ledger.add_item(TradeSide::Offered, scarf());
        ledger.add_item(TradeSide::Offered, serum());

        let offered = ledger.entries(TradeSide::Offered);
        assert_eq!(offered.len(), 2);
        assert_eq!(offered[0].item.name, "Scarf");
        assert_eq!(offered[1].item.name, "Armour Serum");
        assert!(offered.iter().all(|e| e.quantity.get() == 1));
        assert!(ledger.entries(TradeSide::Requested).is_empty());
    }

    #[test]
    fn test_duplicates_are_independent_entries() {
        let mut ledger = TradeLedger::new();
        ledger.add_item(TradeSide::Requested, scarf());
        ledger.add_item(TradeSide::Requested, scarf());
        ledger.set_quantity(TradeSide::Requested, 1, 4);

        let requested = ledger.entries(TradeSide::Requested);
        assert_eq!(requested.len(), 2);
        assert_eq!(requested[0].quantity.get(), 1);
        assert_eq!(requested[1].quantity.get(), 4);
    }

    #[test]
    fn test_remove_preserves_order_of_rest() {
        let mut ledger = TradeLedger::new();
        ledger.add_item(TradeSide::Offered, scarf());
        ledger.add_item(TradeSide::Offered, serum());
        ledger.add_item(TradeSide::Offered, scarf());
        ledger.remove_item(TradeSide::Offered, 1);

        let ids: Vec<&str> = ledger
            .entries(TradeSide::Offered)
            .iter()
            .map(|e| e.item.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "1"]);
    }

    #[test]
    fn test_out_of_range_index_is_noop() {
        let mut ledger = TradeLedger::new();
        ledger.add_item(TradeSide::Offered, scarf());
        let before = ledger.clone();

        ledger.remove_item(TradeSide::Offered, 1);
        ledger.remove_item(TradeSide::Requested, 0);
        ledger.set_quantity(TradeSide::Offered, 7, 50);
        ledger.set_quantity(TradeSide::Requested, 0, 50);

        assert_eq!(ledger, before);
    }

    #[test]
    fn test_set_quantity_clamps() {
        let mut ledger = TradeLedger::new();
        ledger.add_item(TradeSide::Offered, scarf());

        for (requested, expected) in [
            (-5, 1),
            (0, 1),
            (1, 1),
            (500, 500),
            (999, 999),
            (1000, 999),
            (10000, 999),
        ] {
            ledger.set_quantity(TradeSide::Offered, 0, requested);
            assert_eq!(
                ledger.entries(TradeSide::Offered)[0].quantity.get(),
                expected,
                "requested {}",
                requested
            );
        }
    }

    #[test]
    fn test_reset_empties_both_sides() {
        let mut ledger = TradeLedger::new();
        ledger.add_item(TradeSide::Offered, scarf());
        ledger.add_item(TradeSide::Requested, serum());
        assert!(!ledger.is_empty());

        ledger.reset();
        assert!(ledger.is_empty());
        assert_eq!(ledger.reconcile(), ReconciliationResult::default());
    }
}
