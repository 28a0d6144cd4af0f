//! Asset depreciation formulas.
//!
//! Book value is a function of time since purchase. Monthly depreciation is
//! not its derivative: the declining-balance charge is taken from the asset's
//! stored `current_value`, which is only as fresh as the last time someone
//! edited the asset. The two figures are reported side by side and must not
//! be reconciled silently.
//!
//! Inputs are assumed valid (`useful_life > 0`, rate in 0..=100); the asset
//! service rejects anything else before it is stored.

use chrono::{DateTime, Utc};
use shared::{parse_iso_date, Asset, AssetValuation, DepreciationMethod};

const MILLIS_PER_YEAR: f64 = 365.25 * 24.0 * 60.0 * 60.0 * 1000.0;

/// Fractional years between the purchase date (midnight UTC) and `as_of`.
///
/// Never negative: an asset purchased in the future has owned zero years. An
/// unparseable purchase date, which can only arrive through a restore, also
/// counts as zero.
pub fn years_owned(purchase_date: &str, as_of: DateTime<Utc>) -> f64 {
    let Some(purchased) = parse_iso_date(purchase_date)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|midnight| midnight.and_utc())
    else {
        return 0.0;
    };
    let elapsed = (as_of - purchased).num_milliseconds() as f64;
    (elapsed / MILLIS_PER_YEAR).max(0.0)
}

pub fn straight_line_value(purchase_price: f64, useful_life: f64, years_owned: f64) -> f64 {
    let annual = purchase_price / useful_life;
    let elapsed = years_owned.min(useful_life);
    (purchase_price - annual * elapsed).max(0.0)
}

/// Continuous exponent: value decays smoothly instead of in annual steps
pub fn declining_balance_value(purchase_price: f64, rate_percent: f64, years_owned: f64) -> f64 {
    purchase_price * (1.0 - rate_percent / 100.0).powf(years_owned)
}

pub fn book_value(asset: &Asset, as_of: DateTime<Utc>) -> f64 {
    let years = years_owned(&asset.purchase_date, as_of);
    match asset.depreciation_method {
        DepreciationMethod::StraightLine => {
            straight_line_value(asset.purchase_price, asset.useful_life, years)
        }
        DepreciationMethod::DecliningBalance => {
            declining_balance_value(asset.purchase_price, asset.depreciation_rate, years)
        }
    }
}

pub fn monthly_depreciation(asset: &Asset) -> f64 {
    match asset.depreciation_method {
        DepreciationMethod::StraightLine => asset.purchase_price / asset.useful_life / 12.0,
        DepreciationMethod::DecliningBalance => {
            asset.current_value * (asset.depreciation_rate / 100.0) / 12.0
        }
    }
}

pub fn valuation(asset: &Asset, as_of: DateTime<Utc>) -> AssetValuation {
    AssetValuation {
        asset_id: asset.id.clone(),
        name: asset.name.clone(),
        years_owned: years_owned(&asset.purchase_date, as_of),
        book_value: book_value(asset, as_of),
        monthly_depreciation: monthly_depreciation(asset),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use shared::{AssetCategory, AssetStatus};

    fn asset(method: DepreciationMethod, price: f64, rate: f64, life: f64) -> Asset {
        Asset {
            id: "asset-1".to_string(),
            name: "Tractor".to_string(),
            category: AssetCategory::Vehicle,
            purchase_date: "2020-01-01".to_string(),
            purchase_price: price,
            current_value: price,
            depreciation_rate: rate,
            depreciation_method: method,
            useful_life: life,
            notes: None,
            status: AssetStatus::Active,
            created_at: "2020-01-01T00:00:00.000Z".to_string(),
            updated_at: "2020-01-01T00:00:00.000Z".to_string(),
        }
    }

    fn purchased() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
    }

    fn years_later(years: f64) -> DateTime<Utc> {
        purchased() + Duration::milliseconds((years * MILLIS_PER_YEAR) as i64)
    }

    #[test]
    fn test_straight_line_halfway() {
        let tractor = asset(DepreciationMethod::StraightLine, 120000.0, 0.0, 10.0);
        let value = book_value(&tractor, years_later(5.0));
        assert!((value - 60000.0).abs() <= 1.0, "got {value}");
    }

    #[test]
    fn test_straight_line_never_below_zero() {
        let tractor = asset(DepreciationMethod::StraightLine, 120000.0, 0.0, 10.0);
        assert_eq!(book_value(&tractor, years_later(10.0)), 0.0);
        assert_eq!(book_value(&tractor, years_later(37.5)), 0.0);
    }

    #[test]
    fn test_declining_balance_one_year() {
        let truck = asset(DepreciationMethod::DecliningBalance, 100000.0, 20.0, 5.0);
        let value = book_value(&truck, years_later(1.0));
        assert!((value - 80000.0).abs() <= 1.0, "got {value}");
    }

    #[test]
    fn test_declining_balance_is_continuous() {
        let value = declining_balance_value(100000.0, 20.0, 0.5);
        assert!(value < 100000.0 && value > 80000.0);
    }

    #[test]
    fn test_future_purchase_owns_zero_years() {
        assert_eq!(years_owned("2030-01-01", purchased()), 0.0);
        assert_eq!(years_owned("not-a-date", purchased()), 0.0);
        let tractor = asset(DepreciationMethod::StraightLine, 120000.0, 0.0, 10.0);
        assert_eq!(book_value(&tractor, purchased() - Duration::days(30)), 120000.0);
    }

    #[test]
    fn test_monthly_depreciation_uses_current_value_for_declining_balance() {
        let tractor = asset(DepreciationMethod::StraightLine, 120000.0, 0.0, 10.0);
        assert_eq!(monthly_depreciation(&tractor), 1000.0);

        let mut truck = asset(DepreciationMethod::DecliningBalance, 100000.0, 12.0, 5.0);
        truck.current_value = 50000.0;
        assert_eq!(monthly_depreciation(&truck), 500.0);
    }

    #[test]
    fn test_valuation_reports_both_figures() {
        let tractor = asset(DepreciationMethod::StraightLine, 120000.0, 0.0, 10.0);
        let valuation = valuation(&tractor, years_later(2.0));
        assert_eq!(valuation.asset_id, "asset-1");
        assert!((valuation.years_owned - 2.0).abs() < 1e-6);
        assert!((valuation.book_value - 96000.0).abs() <= 1.0);
        assert_eq!(valuation.monthly_depreciation, 1000.0);
    }
}
