use crate::adapters::FileVoucherSource;
use crate::core::analyzer::analyze_vouchers;
use crate::core::expiry::check_expiry_status;
use crate::core::optimizer::optimize_voucher_portfolio;
use crate::core::recommend::generate_smart_recommendations;
use crate::core::stacking::{calculate_multi_voucher_discount, StackingRules};
use crate::core::wishlist::{match_wishlist, preferred_brands, same_brand};
use crate::domain::model::{
    DiscountCalculation, PortfolioReport, ReportKind, Voucher, WishlistItem,
};
use crate::domain::ports::{ConfigProvider, VoucherSource};
use crate::utils::error::{AnalyticsError, Result};
use chrono::{DateTime, Utc};

/// Runs every analysis over a user portfolio and a marketplace snapshot.
///
/// Both snapshots come from injected [`VoucherSource`]s and `now` is supplied
/// by the caller, so a run is reproducible for fixed inputs.
pub struct AnalyticsEngine<U: VoucherSource, M: VoucherSource> {
    user_vouchers: U,
    marketplace: M,
    preferred_brands: Vec<String>,
    wishlist: Vec<WishlistItem>,
}

impl<U: VoucherSource, M: VoucherSource> AnalyticsEngine<U, M> {
    pub fn new(user_vouchers: U, marketplace: M) -> Self {
        Self {
            user_vouchers,
            marketplace,
            preferred_brands: Vec::new(),
            wishlist: Vec::new(),
        }
    }

    pub fn with_preferred_brands(mut self, brands: Vec<String>) -> Self {
        self.preferred_brands = brands;
        self
    }

    pub fn with_wishlist(mut self, wishlist: Vec<WishlistItem>) -> Self {
        self.wishlist = wishlist;
        self
    }

    /// Explicit preferences plus every wishlist brand flagged for notification.
    pub fn effective_preferred_brands(&self) -> Vec<String> {
        let mut brands = self.preferred_brands.clone();
        for brand in preferred_brands(&self.wishlist) {
            if !brands.iter().any(|known| same_brand(known, &brand)) {
                brands.push(brand);
            }
        }
        brands
    }

    pub async fn load_user_vouchers(&self) -> Result<Vec<Voucher>> {
        let vouchers = self.user_vouchers.load().await?;
        tracing::debug!("User source '{}' returned {} vouchers", self.user_vouchers.name(), vouchers.len());
        Ok(vouchers)
    }

    pub async fn load_marketplace(&self) -> Result<Vec<Voucher>> {
        let vouchers = self.marketplace.load().await?;
        tracing::debug!("Marketplace source '{}' returned {} vouchers", self.marketplace.name(), vouchers.len());
        Ok(vouchers)
    }

    pub async fn run(&self, now: DateTime<Utc>) -> Result<PortfolioReport> {
        tracing::info!("Starting portfolio analysis as of {}", now.to_rfc3339());

        let user = self.load_user_vouchers().await?;
        let market = self.load_marketplace().await?;

        let analysis = analyze_vouchers(&user, now)?;
        let expiry = check_expiry_status(&user, now)?;
        let plan = optimize_voucher_portfolio(&user, now)?;
        let recommendations =
            generate_smart_recommendations(&user, &market, &self.effective_preferred_brands(), now)?;
        let wishlist_matches = match_wishlist(&self.wishlist, &market);

        tracing::info!(
            "✅ Analysis complete: {} vouchers, {} expiring soon, {} recommendations",
            user.len(),
            expiry.expiring_soon.len(),
            analysis.recommendations.len() + recommendations.len()
        );

        Ok(PortfolioReport {
            generated_at: now,
            analysis,
            expiry,
            plan,
            recommendations,
            wishlist_matches,
        })
    }

    /// Prices a purchase of `base_amount` paid with the user's vouchers.
    pub async fn quote(&self, base_amount: f64, rules: &StackingRules) -> Result<DiscountCalculation> {
        let user = self.load_user_vouchers().await?;
        let calculation = calculate_multi_voucher_discount(base_amount, &user, rules);

        tracing::info!(
            "💰 Quote for ${:.2}: discount ${:.2}, pay ${:.2} ({} warnings)",
            calculation.original_total,
            calculation.total_discount,
            calculation.final_total,
            calculation.warnings.len()
        );
        Ok(calculation)
    }

    /// Produces one report as JSON. `amount` is required for [`ReportKind::Stack`].
    pub async fn report(
        &self,
        kind: ReportKind,
        now: DateTime<Utc>,
        amount: Option<f64>,
        rules: &StackingRules,
    ) -> Result<serde_json::Value> {
        tracing::debug!("Building {:?} report", kind);

        let value = match kind {
            ReportKind::Summary => {
                let user = self.load_user_vouchers().await?;
                serde_json::to_value(analyze_vouchers(&user, now)?)?
            }
            ReportKind::Expiry => {
                let user = self.load_user_vouchers().await?;
                serde_json::to_value(check_expiry_status(&user, now)?)?
            }
            ReportKind::Stack => {
                let amount = amount.ok_or_else(|| AnalyticsError::MissingConfigError {
                    field: "--amount".to_string(),
                })?;
                serde_json::to_value(self.quote(amount, rules).await?)?
            }
            ReportKind::Recommend => {
                let user = self.load_user_vouchers().await?;
                let market = self.load_marketplace().await?;
                let brands = self.effective_preferred_brands();
                serde_json::to_value(generate_smart_recommendations(&user, &market, &brands, now)?)?
            }
            ReportKind::Optimize => {
                let user = self.load_user_vouchers().await?;
                serde_json::to_value(optimize_voucher_portfolio(&user, now)?)?
            }
            ReportKind::Wishlist => {
                let market = self.load_marketplace().await?;
                serde_json::to_value(match_wishlist(&self.wishlist, &market))?
            }
            ReportKind::Full => serde_json::to_value(self.run(now).await?)?,
        };

        Ok(value)
    }
}

impl AnalyticsEngine<FileVoucherSource, Option<FileVoucherSource>> {
    /// Wires file sources and preferences from configuration. The marketplace is optional.
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let user_path = config
            .user_vouchers_path()
            .ok_or_else(|| AnalyticsError::MissingConfigError {
                field: "sources.user_vouchers".to_string(),
            })?;
        let marketplace = config.marketplace_path().map(FileVoucherSource::new);

        Ok(Self::new(FileVoucherSource::new(user_path), marketplace)
            .with_preferred_brands(config.preferred_brands().to_vec())
            .with_wishlist(config.wishlist().to_vec()))
    }
}
