use crate::config::toml_config::AnalyticsConfig;
use crate::domain::model::ReportKind;
use crate::utils::error::{AnalyticsError, Result};
use crate::utils::validation::{validate_range, Validate};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "voucher-analytics")]
#[command(about = "Portfolio analytics, discount stacking and recommendations for vouchers")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// User voucher file (.json or .csv), overrides sources.user_vouchers
    #[arg(long)]
    pub vouchers: Option<String>,

    /// Marketplace voucher file (.json or .csv), overrides sources.marketplace
    #[arg(long)]
    pub marketplace: Option<String>,

    #[arg(short, long, value_enum, default_value = "full")]
    pub report: ReportKind,

    /// Purchase amount for the stack report
    #[arg(long)]
    pub amount: Option<f64>,

    /// Evaluation time (RFC 3339 or YYYY-MM-DD); defaults to the current time
    #[arg(long)]
    pub now: Option<String>,

    #[arg(long)]
    pub max_stackable: Option<usize>,

    #[arg(long)]
    pub allow_same_category: bool,

    #[arg(long)]
    pub max_total_discount: Option<f64>,

    /// Extra preferred brands, comma separated
    #[arg(long, value_delimiter = ',')]
    pub preferred_brands: Vec<String>,

    /// Write the JSON report to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

impl CliConfig {
    /// Loads the TOML file if one was given, then applies flag overrides.
    pub fn resolve(&self) -> Result<AnalyticsConfig> {
        let mut config = match &self.config {
            Some(path) => AnalyticsConfig::from_file(path)?,
            None => AnalyticsConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut AnalyticsConfig) {
        if let Some(path) = &self.vouchers {
            config.sources.user_vouchers = Some(path.clone());
        }
        if let Some(path) = &self.marketplace {
            config.sources.marketplace = Some(path.clone());
        }
        if let Some(max) = self.max_stackable {
            config.stacking.max_stackable = max;
        }
        if self.allow_same_category {
            config.stacking.allow_same_category = true;
        }
        if let Some(max) = self.max_total_discount {
            config.stacking.max_total_discount = max;
        }
        for brand in &self.preferred_brands {
            if !config.preferences.preferred_brands.contains(brand) {
                config.preferences.preferred_brands.push(brand.clone());
            }
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if self.report == ReportKind::Stack {
            let amount = self.amount.ok_or_else(|| AnalyticsError::MissingConfigError {
                field: "--amount".to_string(),
            })?;
            validate_range("--amount", amount, 0.0, f64::MAX)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_file_values() {
        let cli = CliConfig::parse_from([
            "voucher-analytics",
            "--vouchers",
            "mine.csv",
            "--max-stackable",
            "5",
            "--allow-same-category",
            "--preferred-brands",
            "Apple,Nike",
        ]);
        let mut config = AnalyticsConfig::default();
        config.preferences.preferred_brands = vec!["Apple".to_string()];

        cli.apply_overrides(&mut config);

        assert_eq!(config.sources.user_vouchers.as_deref(), Some("mine.csv"));
        assert_eq!(config.stacking.max_stackable, 5);
        assert!(config.stacking.allow_same_category);
        assert_eq!(config.stacking.max_total_discount, 50.0);
        assert_eq!(config.preferences.preferred_brands, vec!["Apple", "Nike"]);
        assert_eq!(cli.report, ReportKind::Full);
    }

    #[test]
    fn test_stack_report_requires_amount() {
        let cli = CliConfig::parse_from(["voucher-analytics", "--report", "stack"]);
        assert!(matches!(
            cli.validate(),
            Err(AnalyticsError::MissingConfigError { .. })
        ));

        let cli = CliConfig::parse_from(["voucher-analytics", "-r", "stack", "--amount", "200"]);
        assert!(cli.validate().is_ok());
    }
}
