use crate::utils::error::{AnalyticsError, Result};
use crate::utils::validation::{parse_expiry_date, validate_non_empty_string, Validate};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tech,
    Food,
    Fashion,
    Travel,
    Entertainment,
    Health,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Tech,
        Category::Food,
        Category::Fashion,
        Category::Travel,
        Category::Entertainment,
        Category::Health,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tech => "tech",
            Category::Food => "food",
            Category::Fashion => "fashion",
            Category::Travel => "travel",
            Category::Entertainment => "entertainment",
            Category::Health => "health",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| AnalyticsError::ValidationError {
                message: format!("Unknown voucher category '{}'", s),
            })
    }
}

/// A voucher listing as supplied by a [`VoucherSource`](crate::domain::ports::VoucherSource).
///
/// Analytics only ever read vouchers. `expiry_date` stays in its wire form and
/// is parsed on demand so that malformed dates surface as
/// [`AnalyticsError::InvalidDate`] naming the offending voucher.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: String,
    pub brand_name: String,
    pub category: Category,
    pub original_value: f64,
    pub selling_price: f64,
    pub discount_percentage: f64,
    pub expiry_date: String,
    pub is_verified: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Missing or empty cells read as `None`; see [`Voucher::view_count`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Voucher {
    /// Builds a verified voucher, deriving the discount from value and price.
    pub fn new(
        id: &str,
        brand_name: &str,
        category: Category,
        original_value: f64,
        selling_price: f64,
        expiry_date: &str,
    ) -> Self {
        let discount_percentage = if original_value > 0.0 {
            ((original_value - selling_price) / original_value * 100.0).round()
        } else {
            0.0
        };

        Self {
            id: id.to_string(),
            brand_name: brand_name.to_string(),
            category,
            original_value,
            selling_price,
            discount_percentage,
            expiry_date: expiry_date.to_string(),
            is_verified: true,
            seller_id: None,
            status: None,
            views: None,
            created_at: None,
        }
    }

    pub fn view_count(&self) -> u32 {
        self.views.unwrap_or(0)
    }

    pub fn savings(&self) -> f64 {
        self.original_value - self.selling_price
    }

    pub fn expiry(&self) -> Result<NaiveDate> {
        parse_expiry_date(&self.id, &self.expiry_date)
    }

    /// Expiry instant: midnight UTC at the start of the expiry day.
    pub fn expires_at(&self) -> Result<DateTime<Utc>> {
        Ok(self.expiry()?.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

impl Validate for Voucher {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("voucher.id", &self.id)?;
        validate_non_empty_string("voucher.brand_name", &self.brand_name)?;

        for (field, amount) in [
            ("original_value", self.original_value),
            ("selling_price", self.selling_price),
        ] {
            if !(amount >= 0.0 && amount.is_finite()) {
                return Err(AnalyticsError::ValidationError {
                    message: format!(
                        "Voucher '{}' has invalid {}: {}",
                        self.id, field, amount
                    ),
                });
            }
        }

        if !(0.0..=100.0).contains(&self.discount_percentage) {
            return Err(AnalyticsError::ValidationError {
                message: format!(
                    "Voucher '{}' has discount {}% outside 0-100",
                    self.id, self.discount_percentage
                ),
            });
        }

        self.expiry()?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoucherAnalysis {
    pub total_value: f64,
    pub total_savings: f64,
    pub average_discount: f64,
    pub expiring_count: usize,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountLine {
    pub voucher: String,
    pub discount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscountCalculation {
    pub original_total: f64,
    pub final_total: f64,
    pub total_discount: f64,
    pub discount_breakdown: Vec<DiscountLine>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpiryStatus {
    pub expired: Vec<Voucher>,
    pub expiring_soon: Vec<Voucher>,
    pub safe: Vec<Voucher>,
}

impl ExpiryStatus {
    pub fn len(&self) -> usize {
        self.expired.len() + self.expiring_soon.len() + self.safe.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPlan {
    pub keep: Vec<Voucher>,
    pub trade: Vec<Voucher>,
    pub sell: Vec<Voucher>,
    pub reasons: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: String,
    pub brand_name: String,
    pub category: Category,
    #[serde(default)]
    pub max_price: Option<f64>,
    #[serde(default)]
    pub notify: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistMatch {
    pub wishlist_id: String,
    pub brand: String,
    pub count: usize,
    pub lowest_price: f64,
    pub best_discount: f64,
}

/// Which view of the portfolio to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Totals, average discount and advisory messages
    Summary,
    /// Expired / expiring soon / safe buckets
    Expiry,
    /// Combine vouchers against a purchase amount
    Stack,
    /// Marketplace recommendations
    Recommend,
    /// Keep / trade / sell plan
    Optimize,
    /// Wishlist matches in the marketplace
    Wishlist,
    /// Everything above except stacking
    Full,
}

/// Everything the engine derives from one portfolio snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    pub generated_at: DateTime<Utc>,
    pub analysis: VoucherAnalysis,
    pub expiry: ExpiryStatus,
    pub plan: PortfolioPlan,
    pub recommendations: Vec<String>,
    pub wishlist_matches: Vec<WishlistMatch>,
}
