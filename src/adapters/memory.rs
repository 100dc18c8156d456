use crate::domain::model::Voucher;
use crate::domain::ports::VoucherSource;
use crate::utils::error::Result;

/// Fixed in-memory snapshot. Useful for fixtures and embedding callers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryVoucherSource {
    name: String,
    vouchers: Vec<Voucher>,
}

impl InMemoryVoucherSource {
    pub fn new(name: &str, vouchers: Vec<Voucher>) -> Self {
        Self {
            name: name.to_string(),
            vouchers,
        }
    }
}

impl VoucherSource for InMemoryVoucherSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> Result<Vec<Voucher>> {
        Ok(self.vouchers.clone())
    }
}

/// An absent source behaves like an empty snapshot.
impl<S: VoucherSource> VoucherSource for Option<S> {
    fn name(&self) -> &str {
        match self {
            Some(source) => source.name(),
            None => "none",
        }
    }

    async fn load(&self) -> Result<Vec<Voucher>> {
        match self {
            Some(source) => source.load().await,
            None => {
                tracing::warn!("No voucher source configured, using an empty snapshot");
                Ok(Vec::new())
            }
        }
    }
}
