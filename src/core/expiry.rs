use crate::domain::model::{ExpiryStatus, Voucher};
use crate::utils::error::Result;
use chrono::{DateTime, Duration, Utc};

/// Look-ahead window used for "expiring soon" checks.
pub const EXPIRY_WINDOW_DAYS: i64 = 30;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

pub fn expiry_window_end(now: DateTime<Utc>) -> DateTime<Utc> {
    now + Duration::days(EXPIRY_WINDOW_DAYS)
}

/// Whole days left before the voucher expires, rounded up. Negative once expired.
pub fn days_until_expiry(voucher: &Voucher, now: DateTime<Utc>) -> Result<i64> {
    let millis = (voucher.expires_at()? - now).num_milliseconds();
    Ok((millis as f64 / MILLIS_PER_DAY).ceil() as i64)
}

/// Splits vouchers into expired / expiring within the window / safe, keeping input order.
pub fn check_expiry_status(vouchers: &[Voucher], now: DateTime<Utc>) -> Result<ExpiryStatus> {
    let window_end = expiry_window_end(now);
    let mut status = ExpiryStatus::default();

    for voucher in vouchers {
        let expires_at = voucher.expires_at()?;

        if expires_at < now {
            status.expired.push(voucher.clone());
        } else if expires_at <= window_end {
            status.expiring_soon.push(voucher.clone());
        } else {
            status.safe.push(voucher.clone());
        }
    }

    tracing::debug!(
        "Expiry check: {} expired, {} expiring soon, {} safe",
        status.expired.len(),
        status.expiring_soon.len(),
        status.safe.len()
    );

    Ok(status)
}
