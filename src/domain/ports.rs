use crate::core::stacking::StackingRules;
use crate::domain::model::{Voucher, WishlistItem};
use crate::utils::error::Result;

/// Where voucher snapshots come from: a file, a fixture, eventually a backend.
pub trait VoucherSource: Send + Sync {
    fn name(&self) -> &str;
    fn load(&self) -> impl std::future::Future<Output = Result<Vec<Voucher>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn user_vouchers_path(&self) -> Option<&str>;
    fn marketplace_path(&self) -> Option<&str>;
    fn stacking_rules(&self) -> StackingRules;
    fn preferred_brands(&self) -> &[String];
    fn wishlist(&self) -> &[WishlistItem];
}
