use chrono::{DateTime, TimeZone, Utc};
use std::path::Path;
use tempfile::TempDir;
use voucher_analytics::{AnalyticsConfig, AnalyticsEngine, AnalyticsError, StackingRules};

const USER_VOUCHERS: &str = r#"[
  {"id": "my1", "brand_name": "Amazon", "category": "tech", "original_value": 100,
   "selling_price": 85, "discount_percentage": 15, "expiry_date": "2025-12-31",
   "is_verified": true, "seller_id": "currentUser", "status": "active"},
  {"id": "my3", "brand_name": "Starbucks", "category": "food", "original_value": 50,
   "selling_price": 40, "discount_percentage": 20, "expiry_date": "2025-11-01",
   "is_verified": true}
]"#;

const MARKETPLACE: &str = "\
id,brand_name,category,original_value,selling_price,discount_percentage,expiry_date,is_verified,views
m1,Apple,tech,150,120,20,2026-01-15,true,45
m2,Uber,travel,75,52.5,30,2025-10-20,true,23
m3,Zara,fashion,80,68,15,2025-12-15,false,12
";

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 15, 12, 0, 0).unwrap()
}

fn write(dir: &Path, name: &str, content: &str) -> String {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path.to_str().unwrap().to_string()
}

fn config_for(user: &str, marketplace: Option<&str>) -> AnalyticsConfig {
    let mut toml_content = format!("[sources]\nuser_vouchers = '{}'\n", user);
    if let Some(market) = marketplace {
        toml_content.push_str(&format!("marketplace = '{}'\n", market));
    }
    toml_content.push_str(
        r#"
[preferences]
preferred_brands = ["Zara"]

[[wishlist]]
id = "1"
brand_name = "apple"
category = "tech"
max_price = 150.0
notify = true
"#,
    );
    AnalyticsConfig::from_toml_str(&toml_content).unwrap()
}

#[tokio::test]
async fn test_full_report_from_files() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let user = write(temp_dir.path(), "mine.json", USER_VOUCHERS);
    let market = write(temp_dir.path(), "market.csv", MARKETPLACE);

    let config = config_for(&user, Some(&market));
    let engine = AnalyticsEngine::from_config(&config)?;
    let report = engine.run(now()).await?;

    assert_eq!(report.analysis.total_value, 150.0);
    assert_eq!(report.analysis.total_savings, 25.0);
    assert_eq!(report.analysis.expiring_count, 1);
    assert_eq!(report.expiry.expiring_soon.len(), 1);
    assert_eq!(report.expiry.expiring_soon[0].id, "my3");
    assert_eq!(report.expiry.safe.len(), 1);
    assert_eq!(report.plan.keep.len() + report.plan.trade.len() + report.plan.sell.len(), 2);

    assert_eq!(report.wishlist_matches.len(), 1);
    assert_eq!(report.wishlist_matches[0].lowest_price, 120.0);
    assert_eq!(report.wishlist_matches[0].best_discount, 20.0);

    assert!(report.recommendations[0].contains("Uber (30% off)"));
    assert!(report
        .recommendations
        .iter()
        .any(|r| r.contains("wishlist brand Zara")));
    // the wishlist spells the brand "apple", the listing says "Apple"
    assert!(report
        .recommendations
        .iter()
        .any(|r| r.contains("wishlist brand Apple is available at 20% off")));
    assert!(report
        .recommendations
        .iter()
        .any(|r| r.contains("travel, fashion")));

    let json = serde_json::to_value(&report)?;
    assert_eq!(json["generated_at"], "2025-10-15T12:00:00Z");
    Ok(())
}

#[tokio::test]
async fn test_quote_against_file_portfolio() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let user = write(temp_dir.path(), "mine.json", USER_VOUCHERS);

    let engine = AnalyticsEngine::from_config(&config_for(&user, None))?;

    let calc = engine.quote(200.0, &StackingRules::default()).await?;
    assert_eq!(calc.total_discount, 25.0);
    assert_eq!(calc.final_total, 175.0);
    assert!(calc.warnings.is_empty());

    let rules = StackingRules {
        max_total_discount: 10.0,
        ..StackingRules::default()
    };
    let capped = engine.quote(200.0, &rules).await?;
    assert_eq!(capped.total_discount, 20.0);
    assert_eq!(capped.final_total, 180.0);
    assert_eq!(capped.discount_breakdown.len(), 2);
    assert_eq!(capped.warnings.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_missing_marketplace_is_empty_snapshot() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let user = write(temp_dir.path(), "mine.json", USER_VOUCHERS);

    let engine = AnalyticsEngine::from_config(&config_for(&user, None))?;
    let report = engine.run(now()).await?;

    assert!(report.wishlist_matches.is_empty());
    // only the tradeable nudge for the long-dated Amazon voucher remains
    assert_eq!(report.recommendations.len(), 1);
    assert!(report.recommendations[0].contains("1 great vouchers"));
    Ok(())
}

#[tokio::test]
async fn test_malformed_expiry_fails_the_run() -> anyhow::Result<()> {
    let temp_dir = TempDir::new()?;
    let user = write(
        temp_dir.path(),
        "mine.json",
        r#"[{"id": "bad", "brand_name": "Nike", "category": "fashion", "original_value": 60,
            "selling_price": 50, "discount_percentage": 17, "expiry_date": "31/12/2025",
            "is_verified": true}]"#,
    );

    let engine = AnalyticsEngine::from_config(&config_for(&user, None))?;
    let err = engine.run(now()).await.unwrap_err();

    match err {
        AnalyticsError::InvalidDate { voucher_id, value } => {
            assert_eq!(voucher_id, "bad");
            assert_eq!(value, "31/12/2025");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    Ok(())
}

#[test]
fn test_user_source_is_required() {
    let config = AnalyticsConfig::default();
    assert!(matches!(
        AnalyticsEngine::from_config(&config),
        Err(AnalyticsError::MissingConfigError { .. })
    ));
}
