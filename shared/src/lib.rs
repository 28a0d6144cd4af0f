use chrono::{Datelike, Local, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Calendar dates are always stored as zero-padded `YYYY-MM-DD` strings so that
/// lexicographic order equals chronological order.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Generate a new record identifier.
///
/// UUIDv7 keeps the "timestamp plus random suffix" shape (ids sort by creation
/// time) with 74 random bits, so rapid successive inserts do not collide.
pub fn generate_id() -> String {
    uuid::Uuid::now_v7().to_string()
}

/// Current instant as an ISO-8601 timestamp with millisecond precision, e.g.
/// `2025-06-14T10:30:00.000Z`
pub fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Today's local calendar date as `YYYY-MM-DD`
pub fn today() -> String {
    format_date(Local::now().date_naive())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse a strict `YYYY-MM-DD` date. The value must be exactly the canonical
/// form of the date it names, so `2025-6-1`, ` 2025-6-01` and `+2025-6-01`
/// are rejected even though chrono alone would accept them.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .filter(|date| format_date(*date) == value)
}

/// Deserialize helper for patch fields that can clear an optional value:
/// a missing key leaves the field alone, `null` clears it.
pub fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Deserialize helper for backup collections: `null` reads as empty.
pub fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Inclusive range of `YYYY-MM-DD` dates compared as strings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// First to last day of the calendar month containing `date`
    pub fn month_of(date: NaiveDate) -> Self {
        let first = date.with_day(1).unwrap_or(date);
        let (year, month) = if first.month() == 12 {
            (first.year() + 1, 1)
        } else {
            (first.year(), first.month() + 1)
        };
        let last = NaiveDate::from_ymd_opt(year, month, 1)
            .and_then(|next| next.pred_opt())
            .unwrap_or(first);
        Self::new(format_date(first), format_date(last))
    }

    /// The calendar month containing today's local date
    pub fn current_month() -> Self {
        Self::month_of(Local::now().date_naive())
    }

    pub fn contains(&self, date: &str) -> bool {
        date >= self.start.as_str() && date <= self.end.as_str()
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..={}", self.start, self.end)
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// A single cashbook entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    /// Calendar date of the transaction (YYYY-MM-DD)
    pub date: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    pub description: String,
    /// Always a non-negative magnitude; the direction comes from `transaction_type`
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl Transaction {
    /// Signed contribution of this transaction to the cash balance
    pub fn signed_amount(&self) -> f64 {
        match self.transaction_type {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    pub date: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub transaction_type: Option<TransactionType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub activity_id: Option<Option<String>>,
}

// ---------------------------------------------------------------------------
// Employees and labor
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub role: String,
    pub daily_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub status: EmployeeStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmployeeStatus {
    Active,
    Inactive,
}

impl EmployeeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmployeeStatus::Active => "active",
            EmployeeStatus::Inactive => "inactive",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    pub name: String,
    pub role: String,
    pub daily_rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub status: EmployeeStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub daily_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub phone: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<EmployeeStatus>,
}

/// A day (or part of one) worked by an employee.
///
/// `employee_id` and `activity_id` are soft references: they are never checked
/// against the employee or activity stores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborEntry {
    pub id: String,
    pub date: String,
    pub employee_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    pub labor_type: LaborType,
    pub hours_worked: f64,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaborType {
    /// Charged to a single activity
    Direct,
    /// General farm work spread across activities
    Shared,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLaborEntry {
    pub date: String,
    pub employee_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    pub labor_type: LaborType,
    pub hours_worked: f64,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborEntryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub activity_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labor_type: Option<LaborType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hours_worked: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

/// A labor entry with its references resolved for display
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaborEntryView {
    #[serde(flatten)]
    pub entry: LaborEntry,
    /// Employee name, or "Unknown" when the employee no longer exists
    pub employee_name: String,
    /// Activity name, or "General" for unassigned or dangling activities
    pub activity_name: String,
}

// ---------------------------------------------------------------------------
// Activities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub status: ActivityStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityType {
    Crop,
    Livestock,
    Service,
    Other,
}

impl ActivityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::Crop => "crop",
            ActivityType::Livestock => "livestock",
            ActivityType::Service => "service",
            ActivityType::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivityStatus {
    Active,
    Completed,
    Cancelled,
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Active => "active",
            ActivityStatus::Completed => "completed",
            ActivityStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivity {
    pub name: String,
    #[serde(rename = "type")]
    pub activity_type: ActivityType,
    pub status: ActivityStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub activity_type: Option<ActivityType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ActivityStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub start_date: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub end_date: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

/// Production, loss, income or expense logged against an activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    pub id: String,
    pub activity_id: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewActivityRecord {
    pub activity_id: String,
    pub date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loss: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecordPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub quantity: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub unit: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub loss: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub income: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub expense: Option<Option<f64>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityProfitability {
    pub activity_id: String,
    pub income: f64,
    pub expenses: f64,
    pub profit: f64,
}

/// Profitability of a named activity, used for dashboard rankings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityPerformance {
    pub activity_id: String,
    pub name: String,
    pub status: ActivityStatus,
    pub income: f64,
    pub expenses: f64,
    pub profit: f64,
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub category: AssetCategory,
    pub purchase_date: String,
    pub purchase_price: f64,
    pub current_value: f64,
    /// Annual rate in percent, used by the declining-balance method
    pub depreciation_rate: f64,
    pub depreciation_method: DepreciationMethod,
    /// Useful life in years, used by the straight-line method
    pub useful_life: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: AssetStatus,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetCategory {
    Equipment,
    Vehicle,
    Building,
    Land,
    Other,
}

impl AssetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetCategory::Equipment => "equipment",
            AssetCategory::Vehicle => "vehicle",
            AssetCategory::Building => "building",
            AssetCategory::Land => "land",
            AssetCategory::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DepreciationMethod {
    StraightLine,
    DecliningBalance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetStatus {
    Active,
    Disposed,
    Sold,
}

impl AssetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetStatus::Active => "active",
            AssetStatus::Disposed => "disposed",
            AssetStatus::Sold => "sold",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAsset {
    pub name: String,
    pub category: AssetCategory,
    pub purchase_date: String,
    pub purchase_price: f64,
    pub current_value: f64,
    pub depreciation_rate: f64,
    pub depreciation_method: DepreciationMethod,
    pub useful_life: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub status: AssetStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<AssetCategory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depreciation_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub depreciation_method: Option<DepreciationMethod>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub useful_life: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetStatus>,
}

/// Depreciation figures for one asset at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetValuation {
    pub asset_id: String,
    pub name: String,
    pub years_owned: f64,
    pub book_value: f64,
    pub monthly_depreciation: f64,
}

// ---------------------------------------------------------------------------
// Rentals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rental {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    pub asset_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renter_name: Option<String>,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub monthly_rate: f64,
    pub status: RentalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Active,
    Completed,
    Cancelled,
}

impl RentalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RentalStatus::Active => "active",
            RentalStatus::Completed => "completed",
            RentalStatus::Cancelled => "cancelled",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRental {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_id: Option<String>,
    pub asset_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renter_name: Option<String>,
    pub start_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    pub monthly_rate: f64,
    pub status: RentalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalPatch {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub asset_id: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub renter_name: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub end_date: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<RentalStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub notes: Option<Option<String>>,
}

/// Money received against a rental. Payments are immutable once recorded, so
/// they only carry a creation timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalPayment {
    pub id: String,
    pub rental_id: String,
    pub date: String,
    pub amount: f64,
    /// Free-text label such as "June 2025"
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRentalPayment {
    pub rental_id: String,
    pub date: String,
    pub amount: f64,
    pub period: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Expected (active rental rates) vs. received (payments dated this month)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalIncomeOverview {
    pub expected: f64,
    pub received: f64,
    pub outstanding: f64,
}

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmSettings {
    pub id: String,
    pub farm_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// ISO 4217 code used for display only
    pub currency: String,
    /// Month and day the fiscal year starts on (MM-DD)
    pub fiscal_year_start: String,
    pub updated_at: String,
}

impl FarmSettings {
    /// Key of the single settings row
    pub const SINGLETON_ID: &'static str = "main";

    pub fn defaults(updated_at: String) -> Self {
        Self {
            id: Self::SINGLETON_ID.to_string(),
            farm_name: "My Farm".to_string(),
            owner_name: None,
            address: None,
            phone: None,
            email: None,
            currency: "UGX".to_string(),
            fiscal_year_start: "01-01".to_string(),
            updated_at,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FarmSettingsPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub farm_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub owner_name: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub address: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub phone: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable")]
    pub email: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fiscal_year_start: Option<String>,
}

// ---------------------------------------------------------------------------
// Summaries and reports
// ---------------------------------------------------------------------------

/// Income, expenses and profit over a set of transactions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashSummary {
    pub income: f64,
    pub expenses: f64,
    pub profit: f64,
}

impl CashSummary {
    pub fn from_transactions<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Self {
        let (income, expenses) =
            transactions
                .into_iter()
                .fold((0.0, 0.0), |(income, expenses), t| match t.transaction_type {
                    TransactionType::Income => (income + t.amount, expenses),
                    TransactionType::Expense => (income, expenses + t.amount),
                });
        Self {
            income,
            expenses,
            profit: income - expenses,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryAmount {
    pub category: String,
    pub amount: f64,
}

/// Profit & loss statement over an inclusive date range
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfitAndLoss {
    pub period: DateRange,
    pub income: Vec<CategoryAmount>,
    pub expenses: Vec<CategoryAmount>,
    pub total_income: f64,
    /// Expense categories plus labor cost plus depreciation
    pub total_expenses: f64,
    pub labor_cost: f64,
    pub depreciation: f64,
    pub net_profit: f64,
    pub generated_at: String,
}

/// Headline figures for the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardOverview {
    pub cash_balance: f64,
    pub month_to_date: CashSummary,
    pub labor_cost_this_month: f64,
    pub top_activities: Vec<ActivityPerformance>,
    pub worst_activity: Option<ActivityPerformance>,
}

// ---------------------------------------------------------------------------
// Backup
// ---------------------------------------------------------------------------

/// Portable snapshot of every store. Field names are part of the backup
/// format and must not change. A store that is missing or `null` reads as
/// empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExportDocument {
    #[serde(deserialize_with = "null_as_empty")]
    pub transactions: Vec<Transaction>,
    #[serde(deserialize_with = "null_as_empty")]
    pub employees: Vec<Employee>,
    #[serde(deserialize_with = "null_as_empty")]
    pub labor_entries: Vec<LaborEntry>,
    #[serde(deserialize_with = "null_as_empty")]
    pub activities: Vec<Activity>,
    #[serde(deserialize_with = "null_as_empty")]
    pub activity_records: Vec<ActivityRecord>,
    #[serde(deserialize_with = "null_as_empty")]
    pub assets: Vec<Asset>,
    #[serde(deserialize_with = "null_as_empty")]
    pub rentals: Vec<Rental>,
    #[serde(deserialize_with = "null_as_empty")]
    pub rental_payments: Vec<RentalPayment>,
    #[serde(deserialize_with = "null_as_empty")]
    pub settings: Vec<FarmSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreCount {
    pub store: String,
    pub records: usize,
}

/// Outcome of a successful restore
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    pub stores: Vec<StoreCount>,
    pub total_records: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transaction(transaction_type: TransactionType, amount: f64) -> Transaction {
        Transaction {
            id: generate_id(),
            date: "2025-06-14".to_string(),
            transaction_type,
            category: "Sales".to_string(),
            description: String::new(),
            amount,
            activity_id: None,
            created_at: now_timestamp(),
            updated_at: now_timestamp(),
        }
    }

    #[test]
    fn test_parse_iso_date_requires_zero_padding() {
        assert!(parse_iso_date("2025-06-01").is_some());
        assert!(parse_iso_date("2025-6-1").is_none());
        assert!(parse_iso_date("2025-02-30").is_none());
        assert!(parse_iso_date("14/06/2025").is_none());
        assert!(parse_iso_date("2025- 6-01").is_none());
        assert!(parse_iso_date("+2025-6-01").is_none());
        assert!(parse_iso_date(" 2025-6-01").is_none());
        assert!(parse_iso_date("2025-06-01 ").is_none());
    }

    #[test]
    fn test_month_of_handles_december_and_leap_years() {
        let december = DateRange::month_of(NaiveDate::from_ymd_opt(2024, 12, 15).unwrap());
        assert_eq!(december, DateRange::new("2024-12-01", "2024-12-31"));

        let february = DateRange::month_of(NaiveDate::from_ymd_opt(2024, 2, 10).unwrap());
        assert_eq!(february, DateRange::new("2024-02-01", "2024-02-29"));
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let range = DateRange::new("2025-06-01", "2025-06-30");
        assert!(range.contains("2025-06-01"));
        assert!(range.contains("2025-06-30"));
        assert!(!range.contains("2025-05-31"));
        assert!(!range.contains("2025-07-01"));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let ids: std::collections::HashSet<String> = (0..1000).map(|_| generate_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_cash_summary_from_transactions() {
        let transactions = vec![
            transaction(TransactionType::Income, 5000.0),
            transaction(TransactionType::Expense, 1200.0),
            transaction(TransactionType::Income, 300.0),
        ];
        let summary = CashSummary::from_transactions(&transactions);
        assert_eq!(summary.income, 5300.0);
        assert_eq!(summary.expenses, 1200.0);
        assert_eq!(summary.profit, 4100.0);
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let mut t = transaction(TransactionType::Expense, 10.0);
        t.activity_id = Some("act-1".to_string());
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["type"], "expense");
        assert_eq!(json["activityId"], "act-1");
        assert!(json.get("createdAt").is_some());

        t.activity_id = None;
        let json = serde_json::to_value(&t).unwrap();
        assert!(json.get("activityId").is_none());

        let method = serde_json::to_value(DepreciationMethod::DecliningBalance).unwrap();
        assert_eq!(method, "declining-balance");
    }

    #[test]
    fn test_patch_distinguishes_missing_from_null() {
        let patch: TransactionPatch = serde_json::from_str(r#"{"activityId": null}"#).unwrap();
        assert_eq!(patch.activity_id, Some(None));

        let patch: TransactionPatch = serde_json::from_str(r#"{"amount": 12.5}"#).unwrap();
        assert_eq!(patch.activity_id, None);
        assert_eq!(patch.amount, Some(12.5));

        let json = serde_json::to_value(&TransactionPatch {
            activity_id: Some(None),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({ "activityId": null }));
    }

    #[test]
    fn test_export_document_defaults_missing_stores() {
        let doc: ExportDocument = serde_json::from_str(r#"{"unknown": 1}"#).unwrap();
        assert!(doc.transactions.is_empty());
        assert!(doc.settings.is_empty());
        assert!(doc.exported_at.is_none());
    }

    #[test]
    fn test_export_document_reads_null_stores_as_empty() {
        let doc: ExportDocument =
            serde_json::from_str(r#"{"transactions": null, "assets": null, "settings": []}"#).unwrap();
        assert!(doc.transactions.is_empty());
        assert!(doc.assets.is_empty());
        assert!(doc.settings.is_empty());
    }
}
