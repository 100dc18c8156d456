use crate::domain::model::{Category, DiscountCalculation, DiscountLine, Voucher};
use crate::utils::error::Result;
use crate::utils::validation::{validate_positive_number, validate_range, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Constraints applied when several vouchers are combined against one purchase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StackingRules {
    pub max_stackable: usize,
    pub allow_same_category: bool,
    /// Upper bound on the combined discount, as a percentage of the base amount.
    pub max_total_discount: f64,
}

impl Default for StackingRules {
    fn default() -> Self {
        Self {
            max_stackable: 3,
            allow_same_category: false,
            max_total_discount: 50.0,
        }
    }
}

impl Validate for StackingRules {
    fn validate(&self) -> Result<()> {
        validate_positive_number("stacking.max_stackable", self.max_stackable, 1)?;
        validate_range("stacking.max_total_discount", self.max_total_discount, 0.0, 100.0)?;
        Ok(())
    }
}

/// Simulates redeeming `vouchers` together against `base_amount`.
///
/// Only verified vouchers take part. When more than `max_stackable` qualify,
/// the highest discounts win. Unless same-category stacking is allowed, the
/// first voucher of each category wins. A voucher whose face value exceeds
/// what is left of the purchase is skipped. The combined discount is finally
/// capped at `max_total_discount` percent of the base; per-voucher lines keep
/// their uncapped amounts. Every rule that removes or limits something leaves
/// a warning instead of failing.
pub fn calculate_multi_voucher_discount(
    base_amount: f64,
    vouchers: &[Voucher],
    rules: &StackingRules,
) -> DiscountCalculation {
    let mut warnings = Vec::new();
    let mut discount_breakdown = Vec::new();

    let mut applicable: Vec<&Voucher> = vouchers.iter().filter(|v| v.is_verified).collect();

    if applicable.len() > rules.max_stackable {
        // stable: equal discounts keep their input order
        applicable.sort_by(|a, b| b.discount_percentage.total_cmp(&a.discount_percentage));
        applicable.truncate(rules.max_stackable);
        warnings.push(format!(
            "Only {} vouchers can be stacked. Using the best {}.",
            rules.max_stackable, rules.max_stackable
        ));
    }

    if !rules.allow_same_category {
        let mut used: HashSet<Category> = HashSet::new();
        applicable.retain(|v| {
            if used.insert(v.category) {
                true
            } else {
                warnings.push(format!(
                    "Skipping {} - category {} already used.",
                    v.brand_name, v.category
                ));
                false
            }
        });
    }

    let mut remaining = base_amount;
    let mut total_discount = 0.0;

    for voucher in applicable {
        if voucher.original_value > remaining {
            warnings.push(format!(
                "{} voucher value (${}) exceeds remaining amount (${:.2}).",
                voucher.brand_name, voucher.original_value, remaining
            ));
            continue;
        }

        let discount = voucher.savings();
        total_discount += discount;
        remaining -= voucher.original_value;

        discount_breakdown.push(DiscountLine {
            voucher: voucher.brand_name.clone(),
            discount,
        });
    }

    let discount_percentage = if base_amount > 0.0 {
        total_discount / base_amount * 100.0
    } else {
        0.0
    };

    if discount_percentage > rules.max_total_discount {
        let adjusted = base_amount * rules.max_total_discount / 100.0;
        warnings.push(format!(
            "Total discount capped at {}%. Adjusted from ${:.2} to ${:.2}.",
            rules.max_total_discount, total_discount, adjusted
        ));
        total_discount = adjusted;
    }

    for warning in &warnings {
        tracing::debug!("Stacking: {}", warning);
    }

    DiscountCalculation {
        original_total: base_amount,
        final_total: (base_amount - total_discount).max(0.0),
        total_discount,
        discount_breakdown,
        warnings,
    }
}
