pub mod analyzer;
pub mod engine;
pub mod expiry;
pub mod optimizer;
pub mod recommend;
pub mod stacking;
pub mod wishlist;

pub use crate::domain::model::{
    DiscountCalculation, ExpiryStatus, PortfolioPlan, PortfolioReport, Voucher, VoucherAnalysis,
};
pub use crate::domain::ports::{ConfigProvider, VoucherSource};
pub use crate::utils::error::Result;
