use crate::domain::model::{Voucher, WishlistItem, WishlistMatch};

/// Brand equality used everywhere a listing is compared to a user preference.
pub fn same_brand(a: &str, b: &str) -> bool {
    a.trim().eq_ignore_ascii_case(b.trim())
}

/// Summarises marketplace listings that satisfy each wishlist entry.
///
/// A listing matches when its brand equals the entry's brand (ignoring case
/// and surrounding whitespace) and, if the entry has a price ceiling, it sells
/// at or below it. Entries without any match are left out.
pub fn match_wishlist(items: &[WishlistItem], marketplace: &[Voucher]) -> Vec<WishlistMatch> {
    let mut matches = Vec::new();

    for item in items {
        let candidates: Vec<&Voucher> = marketplace
            .iter()
            .filter(|v| same_brand(&v.brand_name, &item.brand_name))
            .filter(|v| item.max_price.map_or(true, |max| v.selling_price <= max))
            .collect();

        if candidates.is_empty() {
            continue;
        }

        let lowest_price = candidates
            .iter()
            .map(|v| v.selling_price)
            .fold(f64::INFINITY, f64::min);
        let best_discount = candidates
            .iter()
            .map(|v| v.discount_percentage)
            .fold(0.0, f64::max);

        matches.push(WishlistMatch {
            wishlist_id: item.id.clone(),
            brand: item.brand_name.clone(),
            count: candidates.len(),
            lowest_price,
            best_discount,
        });
    }

    tracing::debug!("{} of {} wishlist entries have listings", matches.len(), items.len());
    matches
}

/// Brands the user asked to be notified about.
pub fn preferred_brands(items: &[WishlistItem]) -> Vec<String> {
    items
        .iter()
        .filter(|item| item.notify)
        .map(|item| item.brand_name.clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Category;

    fn item(id: &str, brand: &str, category: Category, max_price: Option<f64>, notify: bool) -> WishlistItem {
        WishlistItem {
            id: id.to_string(),
            brand_name: brand.to_string(),
            category,
            max_price,
            notify,
        }
    }

    fn wishlist() -> Vec<WishlistItem> {
        vec![
            item("1", "Apple", Category::Tech, Some(150.0), true),
            item("2", "Sephora", Category::Health, Some(75.0), true),
            item("3", "Whole Foods", Category::Food, Some(50.0), false),
        ]
    }

    #[test]
    fn test_match_wishlist_summarises_listings() {
        let market = vec![
            Voucher::new("m1", "Apple", Category::Tech, 150.0, 120.0, "2026-01-01"),
            Voucher::new("m2", "apple ", Category::Tech, 200.0, 140.0, "2026-01-01"),
            Voucher::new("m3", "Apple", Category::Tech, 300.0, 240.0, "2026-01-01"),
            Voucher::new("m4", "Sephora", Category::Health, 80.0, 80.0, "2026-01-01"),
        ];

        let matches = match_wishlist(&wishlist(), &market);

        assert_eq!(matches.len(), 1);
        let apple = &matches[0];
        assert_eq!(apple.wishlist_id, "1");
        assert_eq!(apple.count, 2);
        assert_eq!(apple.lowest_price, 120.0);
        assert_eq!(apple.best_discount, 30.0);
    }

    #[test]
    fn test_no_price_ceiling_accepts_any_price() {
        let items = vec![item("9", "Nike", Category::Fashion, None, false)];
        let market = vec![Voucher::new("m", "Nike", Category::Fashion, 500.0, 450.0, "2026-01-01")];

        let matches = match_wishlist(&items, &market);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].lowest_price, 450.0);
    }

    #[test]
    fn test_preferred_brands_only_notifying_entries() {
        assert_eq!(preferred_brands(&wishlist()), vec!["Apple", "Sephora"]);
    }
}
