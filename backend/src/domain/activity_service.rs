//! Farm activities, their production records, and profitability.

use anyhow::Result;
use shared::{
    Activity, ActivityPatch, ActivityPerformance, ActivityProfitability, ActivityRecord,
    ActivityRecordPatch, NewActivity, NewActivityRecord,
};
use tracing::{info, warn};

use super::validation;
use super::IndexFilter;
use crate::storage::{ActivityRecordRepository, ActivityRepository, DbConnection};

#[derive(Clone)]
pub struct ActivityService {
    activities: ActivityRepository,
    records: ActivityRecordRepository,
}

impl ActivityService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            activities: ActivityRepository::new(db.clone()),
            records: ActivityRecordRepository::new(db),
        }
    }

    pub async fn list_activities(&self, filter: Option<&IndexFilter>) -> Result<Vec<Activity>> {
        let activities = match filter {
            Some(filter) => self.activities.get_by_index(&filter.index, &filter.value).await?,
            None => self.activities.get_all().await?,
        };
        info!("Found {} activities", activities.len());
        Ok(activities)
    }

    pub async fn active_activities(&self) -> Result<Vec<Activity>> {
        Ok(self.activities.get_active().await?)
    }

    pub async fn get_activity(&self, id: &str) -> Result<Option<Activity>> {
        let activity = self.activities.get_by_id(id).await?;
        if activity.is_none() {
            warn!("Activity not found: {}", id);
        }
        Ok(activity)
    }

    pub async fn create_activity(&self, data: NewActivity) -> Result<Activity> {
        info!("Creating {} activity: {}", data.activity_type.as_str(), data.name);

        validation::non_empty("name", &data.name)?;
        validation::optional_date("startDate", data.start_date.as_deref())?;
        validation::optional_date("endDate", data.end_date.as_deref())?;

        let activity = self.activities.add(&data).await?;
        info!("Created activity: {} with ID: {}", activity.name, activity.id);
        Ok(activity)
    }

    pub async fn update_activity(&self, id: &str, patch: ActivityPatch) -> Result<Option<Activity>> {
        info!("Updating activity: {}", id);

        if let Some(name) = &patch.name {
            validation::non_empty("name", name)?;
        }
        validation::optional_date("startDate", patch.start_date.as_ref().and_then(|d| d.as_deref()))?;
        validation::optional_date("endDate", patch.end_date.as_ref().and_then(|d| d.as_deref()))?;

        let updated = self.activities.update(id, &patch).await?;
        if updated.is_none() {
            warn!("Activity not found: {}", id);
        }
        Ok(updated)
    }

    /// Records, labor and transactions tagged with the activity are kept
    pub async fn delete_activity(&self, id: &str) -> Result<()> {
        info!("Deleting activity: {}", id);
        self.activities.delete(id).await?;
        Ok(())
    }

    pub async fn list_records(&self, filter: Option<&IndexFilter>) -> Result<Vec<ActivityRecord>> {
        let records = match filter {
            Some(filter) => self.records.get_by_index(&filter.index, &filter.value).await?,
            None => self.records.get_all().await?,
        };
        info!("Found {} activity records", records.len());
        Ok(records)
    }

    pub async fn records_for_activity(&self, activity_id: &str) -> Result<Vec<ActivityRecord>> {
        Ok(self.records.get_by_activity(activity_id).await?)
    }

    pub async fn get_record(&self, id: &str) -> Result<Option<ActivityRecord>> {
        let record = self.records.get_by_id(id).await?;
        if record.is_none() {
            warn!("Activity record not found: {}", id);
        }
        Ok(record)
    }

    pub async fn create_record(&self, data: NewActivityRecord) -> Result<ActivityRecord> {
        info!("Recording activity data: activity={}, date={}", data.activity_id, data.date);

        validation::non_empty("activityId", &data.activity_id)?;
        validation::date("date", &data.date)?;
        validation::optional_amount("quantity", data.quantity)?;
        validation::optional_amount("loss", data.loss)?;
        validation::optional_amount("income", data.income)?;
        validation::optional_amount("expense", data.expense)?;

        let record = self.records.add(&data).await?;
        info!("Created activity record with ID: {}", record.id);
        Ok(record)
    }

    pub async fn update_record(
        &self,
        id: &str,
        patch: ActivityRecordPatch,
    ) -> Result<Option<ActivityRecord>> {
        info!("Updating activity record: {}", id);

        if let Some(activity_id) = &patch.activity_id {
            validation::non_empty("activityId", activity_id)?;
        }
        if let Some(date) = &patch.date {
            validation::date("date", date)?;
        }
        validation::optional_amount("quantity", patch.quantity.flatten())?;
        validation::optional_amount("loss", patch.loss.flatten())?;
        validation::optional_amount("income", patch.income.flatten())?;
        validation::optional_amount("expense", patch.expense.flatten())?;

        let updated = self.records.update(id, &patch).await?;
        if updated.is_none() {
            warn!("Activity record not found: {}", id);
        }
        Ok(updated)
    }

    pub async fn delete_record(&self, id: &str) -> Result<()> {
        info!("Deleting activity record: {}", id);
        self.records.delete(id).await?;
        Ok(())
    }

    /// Income and expenses summed over every record of the activity. Missing
    /// figures count as zero.
    pub async fn activity_profitability(&self, activity_id: &str) -> Result<ActivityProfitability> {
        let records = self.records.get_by_activity(activity_id).await?;
        let income: f64 = records.iter().filter_map(|record| record.income).sum();
        let expenses: f64 = records.iter().filter_map(|record| record.expense).sum();

        info!(
            "Profitability for activity {}: income={:.2}, expenses={:.2}",
            activity_id, income, expenses
        );

        Ok(ActivityProfitability {
            activity_id: activity_id.to_string(),
            income,
            expenses,
            profit: income - expenses,
        })
    }

    /// Every activity with its profitability, most profitable first
    pub async fn activity_ranking(&self) -> Result<Vec<ActivityPerformance>> {
        let activities = self.activities.get_all().await?;
        let mut ranking = Vec::with_capacity(activities.len());
        for activity in activities {
            let profitability = self.activity_profitability(&activity.id).await?;
            ranking.push(ActivityPerformance {
                activity_id: activity.id,
                name: activity.name,
                status: activity.status,
                income: profitability.income,
                expenses: profitability.expenses,
                profit: profitability.profit,
            });
        }
        ranking.sort_by(|a, b| b.profit.total_cmp(&a.profit));
        Ok(ranking)
    }
}
