//! Profit & loss statement and dashboard overview.
//!
//! Both compose the other services and inherit their read-skew: figures are
//! gathered by independent reads, not from one snapshot.

use anyhow::Result;
use shared::{
    now_timestamp, CategoryAmount, DashboardOverview, DateRange, ProfitAndLoss, TransactionType,
};
use std::collections::BTreeMap;
use tracing::info;

use super::{ActivityService, AssetService, CashbookService, LaborService};

const TOP_ACTIVITIES: usize = 3;

#[derive(Clone)]
pub struct ReportService {
    cashbook: CashbookService,
    labor: LaborService,
    assets: AssetService,
    activities: ActivityService,
}

impl ReportService {
    pub fn new(
        cashbook: CashbookService,
        labor: LaborService,
        assets: AssetService,
        activities: ActivityService,
    ) -> Self {
        Self {
            cashbook,
            labor,
            assets,
            activities,
        }
    }

    /// Income and expenses in `range` grouped by category, with labor for the
    /// same range and the current monthly depreciation charged as expenses.
    pub async fn profit_and_loss(&self, range: &DateRange) -> Result<ProfitAndLoss> {
        info!("Generating profit & loss for {}", range);

        let transactions = self.cashbook.transactions_in_range(range).await?;
        let labor_cost = self.labor.total_labor_cost(range).await?;
        let depreciation = self.assets.total_depreciation_this_month().await?;

        let mut income_by_category: BTreeMap<String, f64> = BTreeMap::new();
        let mut expenses_by_category: BTreeMap<String, f64> = BTreeMap::new();
        for transaction in &transactions {
            let side = match transaction.transaction_type {
                TransactionType::Income => &mut income_by_category,
                TransactionType::Expense => &mut expenses_by_category,
            };
            *side.entry(transaction.category.clone()).or_default() += transaction.amount;
        }

        let income = into_category_amounts(income_by_category);
        let expenses = into_category_amounts(expenses_by_category);
        let total_income: f64 = income.iter().map(|item| item.amount).sum();
        let total_expenses: f64 =
            expenses.iter().map(|item| item.amount).sum::<f64>() + labor_cost + depreciation;
        let net_profit = total_income - total_expenses;

        info!(
            "Profit & loss for {}: income={:.2}, expenses={:.2}, net={:.2}",
            range, total_income, total_expenses, net_profit
        );

        Ok(ProfitAndLoss {
            period: range.clone(),
            income,
            expenses,
            total_income,
            total_expenses,
            labor_cost,
            depreciation,
            net_profit,
            generated_at: now_timestamp(),
        })
    }

    pub async fn dashboard_overview(&self) -> Result<DashboardOverview> {
        let cash_balance = self.cashbook.cash_balance().await?;
        let month_to_date = self.cashbook.month_to_date_summary().await?;
        let labor_cost_this_month = self
            .labor
            .total_labor_cost(&DateRange::current_month())
            .await?;

        let ranking = self.activities.activity_ranking().await?;
        let worst_activity = ranking.last().cloned();
        let top_activities = ranking.into_iter().take(TOP_ACTIVITIES).collect();

        Ok(DashboardOverview {
            cash_balance,
            month_to_date,
            labor_cost_this_month,
            top_activities,
            worst_activity,
        })
    }
}

fn into_category_amounts(totals: BTreeMap<String, f64>) -> Vec<CategoryAmount> {
    totals
        .into_iter()
        .map(|(category, amount)| CategoryAmount { category, amount })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::DbConnection;
    use shared::{
        ActivityStatus, ActivityType, AssetCategory, AssetStatus, DepreciationMethod, LaborType,
        NewActivity, NewActivityRecord, NewAsset, NewLaborEntry, NewTransaction,
    };

    struct Fixture {
        reports: ReportService,
        cashbook: CashbookService,
        labor: LaborService,
        assets: AssetService,
        activities: ActivityService,
    }

    async fn setup_test() -> Fixture {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        let cashbook = CashbookService::new(db.clone());
        let labor = LaborService::new(db.clone());
        let assets = AssetService::new(db.clone());
        let activities = ActivityService::new(db);
        let reports = ReportService::new(
            cashbook.clone(),
            labor.clone(),
            assets.clone(),
            activities.clone(),
        );
        Fixture {
            reports,
            cashbook,
            labor,
            assets,
            activities,
        }
    }

    fn transaction(date: &str, kind: TransactionType, category: &str, amount: f64) -> NewTransaction {
        NewTransaction {
            date: date.to_string(),
            transaction_type: kind,
            category: category.to_string(),
            description: String::new(),
            amount,
            activity_id: None,
        }
    }

    #[tokio::test]
    async fn test_profit_and_loss_groups_categories() {
        let f = setup_test().await;
        let entries = [
            ("2025-06-02", TransactionType::Income, "Milk", 3000.0),
            ("2025-06-09", TransactionType::Income, "Milk", 2000.0),
            ("2025-06-15", TransactionType::Income, "Maize", 10000.0),
            ("2025-06-20", TransactionType::Expense, "Feed", 1500.0),
            ("2025-07-01", TransactionType::Expense, "Feed", 99999.0),
        ];
        for (date, kind, category, amount) in entries {
            f.cashbook
                .create_transaction(transaction(date, kind, category, amount))
                .await
                .unwrap();
        }
        f.labor
            .create_labor_entry(NewLaborEntry {
                date: "2025-06-10".to_string(),
                employee_id: "e1".to_string(),
                activity_id: None,
                labor_type: LaborType::Shared,
                hours_worked: 8.0,
                amount: 500.0,
                notes: None,
            })
            .await
            .unwrap();
        f.assets
            .create_asset(NewAsset {
                name: "Tractor".to_string(),
                category: AssetCategory::Vehicle,
                purchase_date: "2020-01-01".to_string(),
                purchase_price: 120000.0,
                current_value: 100000.0,
                depreciation_rate: 0.0,
                depreciation_method: DepreciationMethod::StraightLine,
                useful_life: 10.0,
                notes: None,
                status: AssetStatus::Active,
            })
            .await
            .unwrap();

        let report = f
            .reports
            .profit_and_loss(&DateRange::new("2025-06-01", "2025-06-30"))
            .await
            .unwrap();

        assert_eq!(
            report.income,
            vec![
                CategoryAmount {
                    category: "Maize".to_string(),
                    amount: 10000.0
                },
                CategoryAmount {
                    category: "Milk".to_string(),
                    amount: 5000.0
                },
            ]
        );
        assert_eq!(report.expenses.len(), 1);
        assert_eq!(report.total_income, 15000.0);
        assert_eq!(report.labor_cost, 500.0);
        assert_eq!(report.depreciation, 1000.0);
        assert_eq!(report.total_expenses, 3000.0);
        assert_eq!(report.net_profit, 12000.0);
    }

    #[tokio::test]
    async fn test_dashboard_ranks_activities() {
        let f = setup_test().await;
        let mut ids = Vec::new();
        for (name, income, expense) in [
            ("Maize", 9000.0, 1000.0),
            ("Beans", 500.0, 2500.0),
            ("Dairy", 4000.0, 1000.0),
            ("Poultry", 1500.0, 1000.0),
        ] {
            let activity = f
                .activities
                .create_activity(NewActivity {
                    name: name.to_string(),
                    activity_type: ActivityType::Crop,
                    status: ActivityStatus::Active,
                    start_date: None,
                    end_date: None,
                    notes: None,
                })
                .await
                .unwrap();
            f.activities
                .create_record(NewActivityRecord {
                    activity_id: activity.id.clone(),
                    date: "2025-06-01".to_string(),
                    income: Some(income),
                    expense: Some(expense),
                    ..Default::default()
                })
                .await
                .unwrap();
            ids.push(activity.id);
        }

        let overview = f.reports.dashboard_overview().await.unwrap();
        let top: Vec<&str> = overview.top_activities.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(top, vec!["Maize", "Dairy", "Poultry"]);
        let worst = overview.worst_activity.unwrap();
        assert_eq!(worst.name, "Beans");
        assert_eq!(worst.profit, -2000.0);
        assert_eq!(overview.cash_balance, 0.0);
    }

    #[tokio::test]
    async fn test_dashboard_without_activities() {
        let f = setup_test().await;
        let overview = f.reports.dashboard_overview().await.unwrap();
        assert!(overview.top_activities.is_empty());
        assert!(overview.worst_activity.is_none());
    }
}
