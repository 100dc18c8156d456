use crate::core::expiry::days_until_expiry;
use crate::core::wishlist::same_brand;
use crate::domain::model::{Category, Voucher};
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

const HOT_DEAL_MIN_DISCOUNT: f64 = 25.0;
const HOT_DEAL_LIMIT: usize = 3;
const NEW_CATEGORY_LIMIT: usize = 2;
const TRADEABLE_MIN_DAYS: i64 = 60;
const TRADEABLE_MIN_VALUE: f64 = 50.0;

/// Cross-references the user's vouchers with the marketplace.
///
/// Produces, in order: the best verified deals, one line per listing from a
/// preferred brand, categories the user does not hold yet, and a nudge to
/// trade long-dated high-value vouchers.
pub fn generate_smart_recommendations(
    user_vouchers: &[Voucher],
    marketplace: &[Voucher],
    preferred_brands: &[String],
    now: DateTime<Utc>,
) -> Result<Vec<String>> {
    let mut recommendations = Vec::new();

    let mut hot_deals: Vec<&Voucher> = marketplace
        .iter()
        .filter(|v| v.is_verified && v.discount_percentage > HOT_DEAL_MIN_DISCOUNT)
        .collect();
    hot_deals.sort_by(|a, b| b.discount_percentage.total_cmp(&a.discount_percentage));
    hot_deals.truncate(HOT_DEAL_LIMIT);

    if !hot_deals.is_empty() {
        let listed: Vec<String> = hot_deals
            .iter()
            .map(|v| format!("{} ({}% off)", v.brand_name, v.discount_percentage))
            .collect();
        recommendations.push(format!("🔥 Hot deals available: {}", listed.join(", ")));
    }

    for listing in marketplace {
        if preferred_brands.iter().any(|brand| same_brand(brand, &listing.brand_name)) {
            recommendations.push(format!(
                "❤️ Your wishlist brand {} is available at {}% off!",
                listing.brand_name, listing.discount_percentage
            ));
        }
    }

    let owned: HashSet<Category> = user_vouchers.iter().map(|v| v.category).collect();
    let mut new_categories: Vec<Category> = Vec::new();
    for listing in marketplace {
        if !owned.contains(&listing.category) && !new_categories.contains(&listing.category) {
            new_categories.push(listing.category);
        }
    }
    new_categories.truncate(NEW_CATEGORY_LIMIT);

    if !new_categories.is_empty() {
        let names: Vec<&str> = new_categories.iter().map(Category::as_str).collect();
        recommendations.push(format!(
            "🆕 Explore new categories: {} vouchers are trending!",
            names.join(", ")
        ));
    }

    let mut tradeable = 0;
    for voucher in user_vouchers {
        if days_until_expiry(voucher, now)? > TRADEABLE_MIN_DAYS
            && voucher.original_value > TRADEABLE_MIN_VALUE
        {
            tradeable += 1;
        }
    }

    if tradeable > 0 {
        recommendations.push(format!(
            "🔄 You have {} great vouchers for trading. Check the Exchange page for smart matches!",
            tradeable
        ));
    }

    Ok(recommendations)
}
