//! Equipment and land rented out, and the payments received for it.

use anyhow::Result;
use chrono::{Local, NaiveDate};
use shared::{
    DateRange, NewRental, NewRentalPayment, Rental, RentalIncomeOverview, RentalPatch,
    RentalPayment,
};
use tracing::{info, warn};

use super::validation;
use super::IndexFilter;
use crate::storage::{DbConnection, RentalPaymentRepository, RentalRepository};

#[derive(Clone)]
pub struct RentalService {
    rentals: RentalRepository,
    payments: RentalPaymentRepository,
}

impl RentalService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            rentals: RentalRepository::new(db.clone()),
            payments: RentalPaymentRepository::new(db),
        }
    }

    pub async fn list_rentals(&self, filter: Option<&IndexFilter>) -> Result<Vec<Rental>> {
        let rentals = match filter {
            Some(filter) => self.rentals.get_by_index(&filter.index, &filter.value).await?,
            None => self.rentals.get_all().await?,
        };
        info!("Found {} rentals", rentals.len());
        Ok(rentals)
    }

    pub async fn get_rental(&self, id: &str) -> Result<Option<Rental>> {
        let rental = self.rentals.get_by_id(id).await?;
        if rental.is_none() {
            warn!("Rental not found: {}", id);
        }
        Ok(rental)
    }

    pub async fn create_rental(&self, data: NewRental) -> Result<Rental> {
        info!(
            "Creating rental: asset={}, monthly_rate={:.2}",
            data.asset_name, data.monthly_rate
        );

        validation::non_empty("assetName", &data.asset_name)?;
        validation::date("startDate", &data.start_date)?;
        validation::optional_date("endDate", data.end_date.as_deref())?;
        validation::amount("monthlyRate", data.monthly_rate)?;

        let rental = self.rentals.add(&data).await?;
        info!("Created rental with ID: {}", rental.id);
        Ok(rental)
    }

    pub async fn update_rental(&self, id: &str, patch: RentalPatch) -> Result<Option<Rental>> {
        info!("Updating rental: {}", id);

        if let Some(asset_name) = &patch.asset_name {
            validation::non_empty("assetName", asset_name)?;
        }
        if let Some(start_date) = &patch.start_date {
            validation::date("startDate", start_date)?;
        }
        validation::optional_date("endDate", patch.end_date.as_ref().and_then(|d| d.as_deref()))?;
        validation::optional_amount("monthlyRate", patch.monthly_rate)?;

        let updated = self.rentals.update(id, &patch).await?;
        if updated.is_none() {
            warn!("Rental not found: {}", id);
        }
        Ok(updated)
    }

    /// Payments recorded against the rental are kept
    pub async fn delete_rental(&self, id: &str) -> Result<()> {
        info!("Deleting rental: {}", id);
        self.rentals.delete(id).await?;
        Ok(())
    }

    pub async fn list_payments(&self, filter: Option<&IndexFilter>) -> Result<Vec<RentalPayment>> {
        let payments = match filter {
            Some(filter) => self.payments.get_by_index(&filter.index, &filter.value).await?,
            None => self.payments.get_all().await?,
        };
        info!("Found {} rental payments", payments.len());
        Ok(payments)
    }

    pub async fn payments_for_rental(&self, rental_id: &str) -> Result<Vec<RentalPayment>> {
        Ok(self.payments.get_by_rental(rental_id).await?)
    }

    pub async fn get_payment(&self, id: &str) -> Result<Option<RentalPayment>> {
        let payment = self.payments.get_by_id(id).await?;
        if payment.is_none() {
            warn!("Rental payment not found: {}", id);
        }
        Ok(payment)
    }

    pub async fn record_payment(&self, data: NewRentalPayment) -> Result<RentalPayment> {
        info!(
            "Recording rental payment: rental={}, date={}, amount={:.2}",
            data.rental_id, data.date, data.amount
        );

        validation::non_empty("rentalId", &data.rental_id)?;
        validation::date("date", &data.date)?;
        validation::amount("amount", data.amount)?;
        validation::non_empty("period", &data.period)?;

        let payment = self.payments.add(&data).await?;
        info!("Recorded rental payment with ID: {}", payment.id);
        Ok(payment)
    }

    pub async fn delete_payment(&self, id: &str) -> Result<()> {
        info!("Deleting rental payment: {}", id);
        self.payments.delete(id).await?;
        Ok(())
    }

    /// Expected monthly income: the rate of every active rental
    pub async fn monthly_rental_income(&self) -> Result<f64> {
        let rentals = self.rentals.get_active().await?;
        Ok(rentals.iter().map(|rental| rental.monthly_rate).sum())
    }

    /// Payments dated in the current calendar month
    pub async fn total_rental_income_this_month(&self) -> Result<f64> {
        self.rental_income_for_month(Local::now().date_naive()).await
    }

    /// Payments dated in the calendar month containing `date`
    pub async fn rental_income_for_month(&self, date: NaiveDate) -> Result<f64> {
        let payments = self
            .payments
            .get_by_date_range(&DateRange::month_of(date))
            .await?;
        Ok(payments.iter().map(|payment| payment.amount).sum())
    }

    pub async fn rental_income_overview(&self) -> Result<RentalIncomeOverview> {
        let expected = self.monthly_rental_income().await?;
        let received = self.total_rental_income_this_month().await?;
        info!(
            "Rental income this month: expected={:.2}, received={:.2}",
            expected, received
        );
        Ok(RentalIncomeOverview {
            expected,
            received,
            outstanding: (expected - received).max(0.0),
        })
    }
}
