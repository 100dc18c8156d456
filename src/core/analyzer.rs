use crate::core::expiry::expiry_window_end;
use crate::domain::model::{Category, Voucher, VoucherAnalysis};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

const LOW_DISCOUNT_THRESHOLD: f64 = 10.0;
const HIGH_VALUE_THRESHOLD: f64 = 100.0;
const CELEBRATE_SAVINGS_THRESHOLD: f64 = 50.0;

pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Aggregates a portfolio and derives advisory messages.
///
/// Messages are appended in a fixed order: expiring soon, low discount,
/// high value, savings milestone, category concentration.
pub fn analyze_vouchers(vouchers: &[Voucher], now: DateTime<Utc>) -> Result<VoucherAnalysis> {
    let total_value: f64 = vouchers.iter().map(|v| v.original_value).sum();
    let total_savings: f64 = vouchers.iter().map(Voucher::savings).sum();
    let average_discount = if vouchers.is_empty() {
        0.0
    } else {
        vouchers.iter().map(|v| v.discount_percentage).sum::<f64>() / vouchers.len() as f64
    };

    let window_end = expiry_window_end(now);
    let mut expiring_count = 0;
    for voucher in vouchers {
        let expires_at = voucher.expires_at()?;
        if expires_at > now && expires_at <= window_end {
            expiring_count += 1;
        }
    }

    let mut recommendations = Vec::new();

    if expiring_count > 0 {
        recommendations.push(format!(
            "⚠️ You have {} voucher{} expiring within 30 days. Consider using or trading them soon!",
            expiring_count,
            if expiring_count > 1 { "s" } else { "" }
        ));
    }

    let low_discount = vouchers
        .iter()
        .filter(|v| v.discount_percentage < LOW_DISCOUNT_THRESHOLD)
        .count();
    if low_discount > 0 {
        recommendations.push(format!(
            "💡 {} of your vouchers have less than 10% discount. You might find better deals in the marketplace.",
            low_discount
        ));
    }

    let high_value = vouchers
        .iter()
        .filter(|v| v.original_value > HIGH_VALUE_THRESHOLD)
        .count();
    if high_value > 0 {
        recommendations.push(format!(
            "🌟 You have {} high-value vouchers (>$100). These are great for trading!",
            high_value
        ));
    }

    if total_savings > CELEBRATE_SAVINGS_THRESHOLD {
        recommendations.push(format!(
            "🎉 Congratulations! You've saved ${:.2} on your vouchers. Keep it up!",
            total_savings
        ));
    }

    if let Some((category, count)) = dominant_category(vouchers) {
        if count * 2 > vouchers.len() {
            recommendations.push(format!(
                "📊 Most of your vouchers are in the {} category. Consider diversifying to get more trading opportunities.",
                category
            ));
        }
    }

    tracing::debug!(
        "Analyzed {} vouchers: value={:.2}, savings={:.2}, expiring={}",
        vouchers.len(),
        total_value,
        total_savings,
        expiring_count
    );

    Ok(VoucherAnalysis {
        total_value,
        total_savings,
        average_discount: round2(average_discount),
        expiring_count,
        recommendations,
    })
}

fn dominant_category(vouchers: &[Voucher]) -> Option<(Category, usize)> {
    let mut counts: BTreeMap<Category, usize> = BTreeMap::new();
    for voucher in vouchers {
        *counts.entry(voucher.category).or_default() += 1;
    }
    counts.into_iter().max_by_key(|(_, count)| *count)
}
