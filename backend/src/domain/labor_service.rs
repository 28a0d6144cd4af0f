//! Employees, labor entries and labor cost totals.

use anyhow::Result;
use std::collections::HashMap;
use shared::{
    DateRange, Employee, EmployeePatch, LaborEntry, LaborEntryPatch, LaborEntryView, NewEmployee,
    NewLaborEntry,
};
use tracing::{info, warn};

use super::validation;
use super::IndexFilter;
use crate::storage::{ActivityRepository, DbConnection, EmployeeRepository, LaborEntryRepository};

const UNKNOWN_EMPLOYEE: &str = "Unknown";
const GENERAL_ACTIVITY: &str = "General";

/// Service for the workforce: employees and the labor they log
#[derive(Clone)]
pub struct LaborService {
    employees: EmployeeRepository,
    labor: LaborEntryRepository,
    activities: ActivityRepository,
}

impl LaborService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            employees: EmployeeRepository::new(db.clone()),
            labor: LaborEntryRepository::new(db.clone()),
            activities: ActivityRepository::new(db),
        }
    }

    // Employees

    pub async fn list_employees(&self, filter: Option<&IndexFilter>) -> Result<Vec<Employee>> {
        let employees = match filter {
            Some(filter) => self.employees.get_by_index(&filter.index, &filter.value).await?,
            None => self.employees.get_all().await?,
        };
        info!("Found {} employees", employees.len());
        Ok(employees)
    }

    pub async fn active_employees(&self) -> Result<Vec<Employee>> {
        Ok(self.employees.get_active().await?)
    }

    pub async fn get_employee(&self, id: &str) -> Result<Option<Employee>> {
        let employee = self.employees.get_by_id(id).await?;
        if employee.is_none() {
            warn!("Employee not found: {}", id);
        }
        Ok(employee)
    }

    pub async fn create_employee(&self, data: NewEmployee) -> Result<Employee> {
        info!("Creating employee: name={}, role={}", data.name, data.role);

        validation::non_empty("name", &data.name)?;
        validation::amount("dailyRate", data.daily_rate)?;

        let employee = self.employees.add(&data).await?;
        info!("Created employee: {} with ID: {}", employee.name, employee.id);
        Ok(employee)
    }

    pub async fn update_employee(&self, id: &str, patch: EmployeePatch) -> Result<Option<Employee>> {
        info!("Updating employee: {}", id);

        if let Some(name) = &patch.name {
            validation::non_empty("name", name)?;
        }
        validation::optional_amount("dailyRate", patch.daily_rate)?;

        let updated = self.employees.update(id, &patch).await?;
        if updated.is_none() {
            warn!("Employee not found: {}", id);
        }
        Ok(updated)
    }

    pub async fn delete_employee(&self, id: &str) -> Result<()> {
        info!("Deleting employee: {}", id);
        self.employees.delete(id).await?;
        Ok(())
    }

    // Labor entries

    pub async fn list_labor_entries(&self, filter: Option<&IndexFilter>) -> Result<Vec<LaborEntry>> {
        let entries = match filter {
            Some(filter) => self.labor.get_by_index(&filter.index, &filter.value).await?,
            None => self.labor.get_all().await?,
        };
        info!("Found {} labor entries", entries.len());
        Ok(entries)
    }

    pub async fn get_labor_entry(&self, id: &str) -> Result<Option<LaborEntry>> {
        let entry = self.labor.get_by_id(id).await?;
        if entry.is_none() {
            warn!("Labor entry not found: {}", id);
        }
        Ok(entry)
    }

    pub async fn labor_entries_in_range(&self, range: &DateRange) -> Result<Vec<LaborEntry>> {
        validation::date_range(range)?;
        Ok(self.labor.get_by_date_range(range).await?)
    }

    pub async fn labor_entries_on(&self, date: &str) -> Result<Vec<LaborEntry>> {
        validation::date("date", date)?;
        Ok(self.labor.get_by_date(date).await?)
    }

    pub async fn create_labor_entry(&self, data: NewLaborEntry) -> Result<LaborEntry> {
        info!(
            "Logging labor: employee={}, date={}, hours={}, amount={:.2}",
            data.employee_id, data.date, data.hours_worked, data.amount
        );

        validation::date("date", &data.date)?;
        validation::non_empty("employeeId", &data.employee_id)?;
        validation::amount("hoursWorked", data.hours_worked)?;
        validation::amount("amount", data.amount)?;

        let entry = self.labor.add(&data).await?;
        info!("Created labor entry with ID: {}", entry.id);
        Ok(entry)
    }

    pub async fn update_labor_entry(
        &self,
        id: &str,
        patch: LaborEntryPatch,
    ) -> Result<Option<LaborEntry>> {
        info!("Updating labor entry: {}", id);

        if let Some(date) = &patch.date {
            validation::date("date", date)?;
        }
        if let Some(employee_id) = &patch.employee_id {
            validation::non_empty("employeeId", employee_id)?;
        }
        validation::optional_amount("hoursWorked", patch.hours_worked)?;
        validation::optional_amount("amount", patch.amount)?;

        let updated = self.labor.update(id, &patch).await?;
        if updated.is_none() {
            warn!("Labor entry not found: {}", id);
        }
        Ok(updated)
    }

    pub async fn delete_labor_entry(&self, id: &str) -> Result<()> {
        info!("Deleting labor entry: {}", id);
        self.labor.delete(id).await?;
        Ok(())
    }

    // Aggregations

    /// Total labor charged to one activity, across all dates
    pub async fn labor_cost(&self, activity_id: &str) -> Result<f64> {
        let entries = self.labor.get_by_activity(activity_id).await?;
        Ok(entries.iter().map(|entry| entry.amount).sum())
    }

    /// Total labor dated within `range`, both ends inclusive
    pub async fn total_labor_cost(&self, range: &DateRange) -> Result<f64> {
        let entries = self.labor_entries_in_range(range).await?;
        let total: f64 = entries.iter().map(|entry| entry.amount).sum();
        info!("Labor cost for {}: {:.2} over {} entries", range, total, entries.len());
        Ok(total)
    }

    /// Labor entries in `range` with employee and activity names resolved.
    /// Dangling references fall back to "Unknown" and "General".
    pub async fn labor_entries_with_names(&self, range: &DateRange) -> Result<Vec<LaborEntryView>> {
        let entries = self.labor_entries_in_range(range).await?;
        let employees: HashMap<String, String> = self
            .employees
            .get_all()
            .await?
            .into_iter()
            .map(|employee| (employee.id, employee.name))
            .collect();
        let activities: HashMap<String, String> = self
            .activities
            .get_all()
            .await?
            .into_iter()
            .map(|activity| (activity.id, activity.name))
            .collect();

        let mut views: Vec<LaborEntryView> = entries
            .into_iter()
            .map(|entry| {
                let employee_name = employees
                    .get(&entry.employee_id)
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_EMPLOYEE.to_string());
                let activity_name = entry
                    .activity_id
                    .as_ref()
                    .and_then(|id| activities.get(id))
                    .cloned()
                    .unwrap_or_else(|| GENERAL_ACTIVITY.to_string());
                LaborEntryView {
                    entry,
                    employee_name,
                    activity_name,
                }
            })
            .collect();
        views.sort_by(|a, b| b.entry.date.cmp(&a.entry.date));
        Ok(views)
    }
}
