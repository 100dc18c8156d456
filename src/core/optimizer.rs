use crate::core::expiry::days_until_expiry;
use crate::domain::model::{PortfolioPlan, Voucher};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Keep,
    Trade,
    Sell,
}

/// Decides what to do with one voucher from its remaining lifetime.
///
/// | days left | test            | action |
/// |-----------|-----------------|--------|
/// | < 15      | discount > 20%  | keep   |
/// | < 15      | otherwise       | sell   |
/// | 15..45    | value > $75     | trade  |
/// | 15..45    | otherwise       | keep   |
/// | >= 45     | discount > 30%  | keep   |
/// | >= 45     | otherwise       | trade  |
pub fn classify(voucher: &Voucher, days_left: i64) -> (Action, &'static str) {
    if days_left < 15 {
        if voucher.discount_percentage > 20.0 {
            (Action::Keep, "High discount and expiring soon - use immediately!")
        } else {
            (Action::Sell, "Low discount and expiring soon - sell quickly to recover value.")
        }
    } else if days_left < 45 {
        if voucher.original_value > 75.0 {
            (Action::Trade, "High value with moderate time left - perfect for trading!")
        } else {
            (Action::Keep, "Good voucher to keep for personal use.")
        }
    } else if voucher.discount_percentage > 30.0 {
        (Action::Keep, "Excellent discount - hold onto this one!")
    } else {
        (Action::Trade, "Plenty of time left - great for trading to get better deals.")
    }
}

pub fn optimize_voucher_portfolio(vouchers: &[Voucher], now: DateTime<Utc>) -> Result<PortfolioPlan> {
    let mut plan = PortfolioPlan::default();

    for voucher in vouchers {
        let days_left = days_until_expiry(voucher, now)?;
        let (action, reason) = classify(voucher, days_left);

        match action {
            Action::Keep => plan.keep.push(voucher.clone()),
            Action::Trade => plan.trade.push(voucher.clone()),
            Action::Sell => plan.sell.push(voucher.clone()),
        }
        plan.reasons.insert(voucher.id.clone(), reason.to_string());
    }

    tracing::debug!(
        "Portfolio plan: keep={}, trade={}, sell={}",
        plan.keep.len(),
        plan.trade.len(),
        plan.sell.len()
    );

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Category;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 15, 0, 0, 0).unwrap()
    }

    fn voucher(id: &str, value: f64, discount: f64, days: i64) -> Voucher {
        let expiry = (now() + Duration::days(days)).format("%Y-%m-%d").to_string();
        let mut v = Voucher::new(id, "Target", Category::Food, value, value * 0.8, &expiry);
        v.discount_percentage = discount;
        v
    }

    #[test]
    fn test_decision_table() {
        let cases = [
            (voucher("k1", 50.0, 25.0, 10), Action::Keep),
            (voucher("s1", 50.0, 20.0, 14), Action::Sell),
            (voucher("t1", 80.0, 10.0, 15), Action::Trade),
            (voucher("k2", 75.0, 10.0, 44), Action::Keep),
            (voucher("k3", 20.0, 31.0, 45), Action::Keep),
            (voucher("t2", 20.0, 30.0, 90), Action::Trade),
        ];

        for (v, expected) in &cases {
            let days = days_until_expiry(v, now()).unwrap();
            assert_eq!(classify(v, days).0, *expected, "voucher {}", v.id);
        }
    }

    #[test]
    fn test_plan_is_exhaustive_and_exclusive() {
        let vouchers: Vec<Voucher> = (0..24)
            .map(|i| {
                voucher(
                    &format!("v{}", i),
                    40.0 + (i % 4) as f64 * 20.0,
                    (i % 5) as f64 * 10.0,
                    -5 + i as i64 * 6,
                )
            })
            .collect();

        let plan = optimize_voucher_portfolio(&vouchers, now()).unwrap();

        assert_eq!(plan.keep.len() + plan.trade.len() + plan.sell.len(), vouchers.len());
        assert_eq!(plan.reasons.len(), vouchers.len());
        for v in &vouchers {
            let hits = [&plan.keep, &plan.trade, &plan.sell]
                .iter()
                .filter(|bucket| bucket.iter().any(|b| b.id == v.id))
                .count();
            assert_eq!(hits, 1);
            assert!(plan.reasons.contains_key(&v.id));
        }
    }

    #[test]
    fn test_reasons_follow_bucket() {
        let vouchers = vec![voucher("sell-me", 30.0, 5.0, 3), voucher("trade-me", 120.0, 10.0, 30)];

        let plan = optimize_voucher_portfolio(&vouchers, now()).unwrap();

        assert_eq!(plan.sell[0].id, "sell-me");
        assert_eq!(plan.trade[0].id, "trade-me");
        assert_eq!(
            plan.reasons["sell-me"],
            "Low discount and expiring soon - sell quickly to recover value."
        );
        assert_eq!(
            plan.reasons["trade-me"],
            "High value with moderate time left - perfect for trading!"
        );
    }

    #[test]
    fn test_expired_vouchers_fall_into_short_horizon() {
        let plan = optimize_voucher_portfolio(&[voucher("old", 30.0, 50.0, -20)], now()).unwrap();
        assert_eq!(plan.keep.len(), 1);
    }
}
