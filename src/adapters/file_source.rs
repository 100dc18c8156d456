use crate::domain::model::Voucher;
use crate::domain::ports::VoucherSource;
use crate::utils::error::{AnalyticsError, Result};
use crate::utils::validation::Validate;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Json,
    Csv,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(AnalyticsError::UnsupportedSourceFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

/// Reads a voucher snapshot from a `.json` array or a headed `.csv` file.
#[derive(Debug, Clone)]
pub struct FileVoucherSource {
    path: PathBuf,
    label: String,
}

impl FileVoucherSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let label = path.display().to_string();
        Self { path, label }
    }
}

pub fn parse_vouchers(data: &[u8], format: SourceFormat) -> Result<Vec<Voucher>> {
    let vouchers: Vec<Voucher> = match format {
        SourceFormat::Json => serde_json::from_slice(data)?,
        SourceFormat::Csv => {
            let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(data);
            reader
                .deserialize::<Voucher>()
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    for voucher in &vouchers {
        voucher.validate()?;
    }

    Ok(vouchers)
}

impl VoucherSource for FileVoucherSource {
    fn name(&self) -> &str {
        &self.label
    }

    async fn load(&self) -> Result<Vec<Voucher>> {
        let format = SourceFormat::from_path(&self.path)?;
        tracing::debug!("Reading {:?} vouchers from {}", format, self.label);

        let data = tokio::fs::read(&self.path).await?;
        let vouchers = parse_vouchers(&data, format)?;

        tracing::info!("📥 Loaded {} vouchers from {}", vouchers.len(), self.label);
        Ok(vouchers)
    }
}
