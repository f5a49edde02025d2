//! Pure computation engine(s) for the trade calculator and restock timer.
//!
//! Nothing in here performs I/O; the restock countdown receives its
//! clock from the caller.

pub mod fairness;
pub mod items;
pub mod ledger;
pub mod reconciliation;
pub mod restock;
pub mod value_changes;

pub use fairness::{FairnessLabel, FairnessView, TaxPayer};
pub use items::{distinct_categories, filter_and_sort_items, ItemQuery, SortOrder};
pub use ledger::TradeLedger;
pub use reconciliation::{reconcile, ReconciliationResult};
pub use restock::{
    resolve_time_zone, seconds_until_next_reset, Clock, Countdown, FixedClock, RestockCountdown,
    RestockError, RestockSchedule, SystemClock,
};
pub use value_changes::{filter_and_sort, ValueChangeQuery, ValueChangeSort};
