//! Display-oriented view of a reconciliation: label, bar and tax payers.

use serde::Serialize;

use super::reconciliation::ReconciliationResult;

/// Outcome of a trade from the acting user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FairnessLabel {
    /// Both sides are worthless or empty.
    None,
    Fair,
    Win,
    Lose,
}

/// Which party carries the larger tax bill for one currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TaxPayer {
    You,
    Counterparty,
    Even,
}

impl TaxPayer {
    /// Interpret a `requested - offered` net tax.
    pub fn from_net(net_tax: i64) -> Self {
        match net_tax.signum() {
            1 => TaxPayer::Counterparty,
            -1 => TaxPayer::You,
            _ => TaxPayer::Even,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FairnessView {
    pub label: FairnessLabel,
    /// 0 is a maximal loss, 50 is balanced, 100 is a maximal win.
    pub bar_position: f64,
    pub gem_tax_payer: TaxPayer,
    pub gold_tax_payer: TaxPayer,
}

impl FairnessView {
    pub fn from_result(result: &ReconciliationResult) -> Self {
        Self {
            label: label_for(result),
            bar_position: bar_position(result),
            gem_tax_payer: TaxPayer::from_net(result.net_gem_tax),
            gold_tax_payer: TaxPayer::from_net(result.net_gold_tax),
        }
    }
}

pub fn label_for(result: &ReconciliationResult) -> FairnessLabel {
    let has_trade = result.value_offered > 0 || result.value_requested > 0;
    if !has_trade {
        FairnessLabel::None
    } else if result.net_value == 0 {
        FairnessLabel::Fair
    } else if result.net_value > 0 {
        FairnessLabel::Win
    } else {
        FairnessLabel::Lose
    }
}

/// Net value normalized by the larger side, mapped onto `[0, 100]`.
pub fn bar_position(result: &ReconciliationResult) -> f64 {
    let max_span = result.value_offered.max(result.value_requested).max(1);
    let normalized = (result.net_value as f64 / max_span as f64).clamp(-1.0, 1.0);
    50.0 + normalized * 50.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(value_offered: i64, value_requested: i64) -> ReconciliationResult {
        ReconciliationResult {
            value_offered,
            value_requested,
            net_value: value_requested - value_offered,
            ..Default::default()
        }
    }

    #[test]
    fn test_labels_follow_net_value_sign() {
        assert_eq!(label_for(&result(100, 150)), FairnessLabel::Win);
        assert_eq!(label_for(&result(150, 100)), FairnessLabel::Lose);
        assert_eq!(label_for(&result(80, 80)), FairnessLabel::Fair);
        assert_eq!(label_for(&result(0, 0)), FairnessLabel::None);
    }

    #[test]
    fn test_bar_is_centered_when_balanced() {
        assert_eq!(bar_position(&result(80, 80)), 50.0);
        assert_eq!(bar_position(&result(0, 0)), 50.0);
    }

    #[test]
    fn test_bar_interpolates_linearly() {
        assert_eq!(bar_position(&result(100, 150)), 50.0 + (50.0 / 150.0) * 50.0);
        assert_eq!(bar_position(&result(200, 100)), 25.0);
    }

    #[test]
    fn test_bar_saturates_at_both_ends() {
        assert_eq!(bar_position(&result(0, i64::MAX / 2)), 100.0);
        assert_eq!(bar_position(&result(i64::MAX / 2, 0)), 0.0);
        for (give, get) in [(0, 1), (1, 0), (3, 1_000_000_000), (1_000_000_000, 3)] {
            let bar = bar_position(&result(give, get));
            assert!((0.0..=100.0).contains(&bar), "bar {} out of range", bar);
        }
    }

    #[test]
    fn test_tax_payer_matches_net_convention() {
        assert_eq!(TaxPayer::from_net(5), TaxPayer::Counterparty);
        assert_eq!(TaxPayer::from_net(-5), TaxPayer::You);
        assert_eq!(TaxPayer::from_net(0), TaxPayer::Even);
    }

    #[test]
    fn test_label_serialization() {
        assert_eq!(serde_json::to_string(&FairnessLabel::None).unwrap(), "\"NONE\"");
        assert_eq!(serde_json::to_string(&FairnessLabel::Win).unwrap(), "\"WIN\"");
    }
}
