//! Cashbook: transactions, the running cash balance and period summaries.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use shared::{CashSummary, DateRange, NewTransaction, Transaction, TransactionPatch};
use tracing::{info, warn};

use super::validation;
use super::IndexFilter;
use crate::storage::{DbConnection, TransactionRepository};

/// Service for cash transactions and the summaries derived from them
#[derive(Clone)]
pub struct CashbookService {
    transactions: TransactionRepository,
}

impl CashbookService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            transactions: TransactionRepository::new(db),
        }
    }

    pub async fn list_transactions(&self, filter: Option<&IndexFilter>) -> Result<Vec<Transaction>> {
        let transactions = match filter {
            Some(filter) => {
                self.transactions
                    .get_by_index(&filter.index, &filter.value)
                    .await?
            }
            None => self.transactions.get_all().await?,
        };
        info!("Found {} transactions", transactions.len());
        Ok(transactions)
    }

    pub async fn get_transaction(&self, id: &str) -> Result<Option<Transaction>> {
        let transaction = self.transactions.get_by_id(id).await?;
        if transaction.is_none() {
            warn!("Transaction not found: {}", id);
        }
        Ok(transaction)
    }

    pub async fn create_transaction(&self, data: NewTransaction) -> Result<Transaction> {
        info!(
            "Creating {} transaction: date={}, category={}, amount={:.2}",
            data.transaction_type.as_str(),
            data.date,
            data.category,
            data.amount
        );

        validation::date("date", &data.date)?;
        validation::non_empty("category", &data.category)?;
        validation::amount("amount", data.amount)?;

        let transaction = self.transactions.add(&data).await?;
        info!("Created transaction with ID: {}", transaction.id);
        Ok(transaction)
    }

    pub async fn update_transaction(
        &self,
        id: &str,
        patch: TransactionPatch,
    ) -> Result<Option<Transaction>> {
        info!("Updating transaction: {}", id);

        if let Some(date) = &patch.date {
            validation::date("date", date)?;
        }
        if let Some(category) = &patch.category {
            validation::non_empty("category", category)?;
        }
        validation::optional_amount("amount", patch.amount)?;

        let updated = self.transactions.update(id, &patch).await?;
        if updated.is_none() {
            warn!("Transaction not found: {}", id);
        }
        Ok(updated)
    }

    pub async fn delete_transaction(&self, id: &str) -> Result<()> {
        info!("Deleting transaction: {}", id);
        self.transactions.delete(id).await?;
        Ok(())
    }

    pub async fn transactions_in_range(&self, range: &DateRange) -> Result<Vec<Transaction>> {
        validation::date_range(range)?;
        Ok(self.transactions.get_by_date_range(range).await?)
    }

    /// Transactions dated exactly `date`
    pub async fn transactions_on(&self, date: &str) -> Result<Vec<Transaction>> {
        validation::date("date", date)?;
        Ok(self.transactions.get_by_date(date).await?)
    }

    /// Sum of every transaction ever recorded, expenses negated
    pub async fn cash_balance(&self) -> Result<f64> {
        let transactions = self.transactions.get_all().await?;
        let balance: f64 = transactions.iter().map(Transaction::signed_amount).sum();
        info!("Cash balance over {} transactions: {:.2}", transactions.len(), balance);
        Ok(balance)
    }

    /// Income, expenses and profit for the current calendar month
    pub async fn month_to_date_summary(&self) -> Result<CashSummary> {
        self.month_summary(Local::now().date_naive()).await
    }

    /// Income, expenses and profit for the calendar month containing `date`
    pub async fn month_summary(&self, date: NaiveDate) -> Result<CashSummary> {
        self.period_summary(&DateRange::month_of(date)).await
    }

    pub async fn period_summary(&self, range: &DateRange) -> Result<CashSummary> {
        let transactions = self.transactions_in_range(range).await?;
        let summary = CashSummary::from_transactions(&transactions);
        info!(
            "Cash summary for {}: income={:.2}, expenses={:.2}, profit={:.2}",
            range, summary.income, summary.expenses, summary.profit
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationError;
    use crate::storage::StorageError;
    use shared::{format_date, TransactionType};

    async fn setup_test() -> CashbookService {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        CashbookService::new(db)
    }

    fn transaction(date: &str, transaction_type: TransactionType, amount: f64) -> NewTransaction {
        NewTransaction {
            date: date.to_string(),
            transaction_type,
            category: "General".to_string(),
            description: String::new(),
            amount,
            activity_id: None,
        }
    }

    #[tokio::test]
    async fn test_cash_balance_negates_expenses() {
        let service = setup_test().await;
        let entries = [
            ("2024-12-30", TransactionType::Expense, 700.0),
            ("2025-01-15", TransactionType::Income, 5000.0),
            ("2025-02-01", TransactionType::Expense, 1250.5),
            ("2023-06-01", TransactionType::Income, 100.0),
        ];
        for (date, kind, amount) in entries {
            service.create_transaction(transaction(date, kind, amount)).await.unwrap();
        }

        let balance = service.cash_balance().await.unwrap();
        assert!((balance - 3149.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_empty_ledger_balance_is_zero() {
        let service = setup_test().await;
        assert_eq!(service.cash_balance().await.unwrap(), 0.0);
    }

    #[tokio::test]
    async fn test_month_summary_excludes_prior_month() {
        let service = setup_test().await;
        service
            .create_transaction(transaction("2025-05-31", TransactionType::Income, 999.0))
            .await
            .unwrap();
        service
            .create_transaction(transaction("2025-06-01", TransactionType::Income, 4000.0))
            .await
            .unwrap();
        service
            .create_transaction(transaction("2025-06-30", TransactionType::Expense, 1500.0))
            .await
            .unwrap();

        let june = NaiveDate::from_ymd_opt(2025, 6, 14).unwrap();
        let summary = service.month_summary(june).await.unwrap();
        assert_eq!(
            summary,
            CashSummary {
                income: 4000.0,
                expenses: 1500.0,
                profit: 2500.0
            }
        );
    }

    #[tokio::test]
    async fn test_month_to_date_ignores_backdated_entry_added_today() {
        let service = setup_test().await;
        let today = Local::now().date_naive();
        let last_month = DateRange::month_of(today).start;
        let last_month = NaiveDate::parse_from_str(&last_month, shared::DATE_FORMAT)
            .unwrap()
            .pred_opt()
            .unwrap();

        service
            .create_transaction(transaction(&format_date(last_month), TransactionType::Income, 50.0))
            .await
            .unwrap();
        service
            .create_transaction(transaction(&format_date(today), TransactionType::Income, 20.0))
            .await
            .unwrap();

        let summary = service.month_to_date_summary().await.unwrap();
        assert_eq!(summary.income, 20.0);
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected_before_writing() {
        let service = setup_test().await;

        let err = service
            .create_transaction(transaction("2025-6-1", TransactionType::Income, 10.0))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::InvalidDate { .. })
        ));

        let err = service
            .create_transaction(transaction("2025-06-01", TransactionType::Expense, -10.0))
            .await
            .unwrap_err();
        assert!(err.downcast_ref::<ValidationError>().is_some());

        for date in [" 2025-6-01", "+2025-6-01", "2025- 6-01"] {
            let err = service
                .create_transaction(transaction(date, TransactionType::Income, 10.0))
                .await
                .unwrap_err();
            assert!(
                matches!(
                    err.downcast_ref::<ValidationError>(),
                    Some(ValidationError::InvalidDate { .. })
                ),
                "accepted {date:?}"
            );
        }

        assert!(service.list_transactions(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_inverted_range_is_rejected() {
        let service = setup_test().await;
        let range = DateRange::new("2025-06-30", "2025-06-01");
        let err = service.period_summary(&range).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ValidationError>(),
            Some(ValidationError::InvertedRange { .. })
        ));
    }

    #[tokio::test]
    async fn test_transactions_on_single_day() {
        let service = setup_test().await;
        for date in ["2025-06-13", "2025-06-14", "2025-06-14", "2025-06-15"] {
            service
                .create_transaction(transaction(date, TransactionType::Income, 1.0))
                .await
                .unwrap();
        }

        let day = service.transactions_on("2025-06-14").await.unwrap();
        assert_eq!(day.len(), 2);
        assert!(day.iter().all(|t| t.date == "2025-06-14"));
        assert!(service.transactions_on("2025-6-14").await.is_err());
    }

    #[tokio::test]
    async fn test_list_with_unknown_index_fails() {
        let service = setup_test().await;
        let filter = IndexFilter {
            index: "by-colour".to_string(),
            value: "red".to_string(),
        };
        let err = service.list_transactions(Some(&filter)).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StorageError>(),
            Some(StorageError::UnknownIndex { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_missing_transaction_returns_none() {
        let service = setup_test().await;
        let patch = TransactionPatch {
            amount: Some(5.0),
            ..Default::default()
        };
        assert!(service.update_transaction("missing", patch).await.unwrap().is_none());
    }
}
