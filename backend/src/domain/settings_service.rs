use anyhow::Result;
use shared::{FarmSettings, FarmSettingsPatch};
use tracing::info;

use super::validation;
use crate::storage::{DbConnection, SettingsRepository};

#[derive(Clone)]
pub struct SettingsService {
    settings: SettingsRepository,
}

impl SettingsService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            settings: SettingsRepository::new(db),
        }
    }

    pub async fn get_settings(&self) -> Result<FarmSettings> {
        Ok(self.settings.get().await?)
    }

    pub async fn update_settings(&self, patch: FarmSettingsPatch) -> Result<FarmSettings> {
        info!("Updating farm settings");

        if let Some(farm_name) = &patch.farm_name {
            validation::non_empty("farmName", farm_name)?;
        }
        if let Some(currency) = &patch.currency {
            validation::currency(currency)?;
        }
        if let Some(fiscal_year_start) = &patch.fiscal_year_start {
            validation::fiscal_year_start(fiscal_year_start)?;
        }

        let settings = self.settings.update(&patch).await?;
        info!("Farm settings updated: {}", settings.farm_name);
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_invalid_currency_leaves_settings_untouched() {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        let service = SettingsService::new(db);

        let patch = FarmSettingsPatch {
            currency: Some("shillings".to_string()),
            ..Default::default()
        };
        assert!(service.update_settings(patch).await.is_err());
        assert_eq!(service.get_settings().await.unwrap().currency, "UGX");

        let patch = FarmSettingsPatch {
            currency: Some("KES".to_string()),
            fiscal_year_start: Some("07-01".to_string()),
            ..Default::default()
        };
        let updated = service.update_settings(patch).await.unwrap();
        assert_eq!(updated.currency, "KES");
        assert_eq!(updated.fiscal_year_start, "07-01");
        assert_eq!(updated.id, FarmSettings::SINGLETON_ID);
    }
}
