pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{FileVoucherSource, InMemoryVoucherSource};
pub use config::AnalyticsConfig;
pub use core::analyzer::analyze_vouchers;
pub use core::engine::AnalyticsEngine;
pub use core::expiry::{check_expiry_status, days_until_expiry};
pub use core::optimizer::optimize_voucher_portfolio;
pub use core::recommend::generate_smart_recommendations;
pub use core::stacking::{calculate_multi_voucher_discount, StackingRules};
pub use core::wishlist::{match_wishlist, preferred_brands};
pub use domain::model::{Category, ReportKind, Voucher, WishlistItem};
pub use utils::error::{AnalyticsError, Result};
