use crate::core::stacking::StackingRules;
use crate::domain::model::WishlistItem;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{AnalyticsError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub sources: SourcesConfig,
    pub stacking: StackingRules,
    pub preferences: PreferencesConfig,
    pub wishlist: Vec<WishlistItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    pub user_vouchers: Option<String>,
    pub marketplace: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferencesConfig {
    pub preferred_brands: Vec<String>,
}

impl AnalyticsConfig {
    /// 從 TOML 檔案載入分析配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AnalyticsError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay verbatim.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AnalyticsError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(path) = &self.sources.user_vouchers {
            validate_path("sources.user_vouchers", path)?;
        }
        if let Some(path) = &self.sources.marketplace {
            validate_path("sources.marketplace", path)?;
        }

        self.stacking.validate()?;

        for brand in &self.preferences.preferred_brands {
            validate_non_empty_string("preferences.preferred_brands", brand)?;
        }

        for item in &self.wishlist {
            validate_non_empty_string("wishlist.brand_name", &item.brand_name)?;
            if let Some(max) = item.max_price {
                if !(max >= 0.0) {
                    return Err(AnalyticsError::InvalidConfigValueError {
                        field: "wishlist.max_price".to_string(),
                        value: max.to_string(),
                        reason: "Price ceiling cannot be negative".to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}

impl ConfigProvider for AnalyticsConfig {
    fn user_vouchers_path(&self) -> Option<&str> {
        self.sources.user_vouchers.as_deref()
    }

    fn marketplace_path(&self) -> Option<&str> {
        self.sources.marketplace.as_deref()
    }

    fn stacking_rules(&self) -> StackingRules {
        self.stacking.clone()
    }

    fn preferred_brands(&self) -> &[String] {
        &self.preferences.preferred_brands
    }

    fn wishlist(&self) -> &[WishlistItem] {
        &self.wishlist
    }
}

impl Validate for AnalyticsConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
