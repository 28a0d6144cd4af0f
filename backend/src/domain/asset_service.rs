//! Assets and their valuations. Book value and monthly depreciation come from
//! [`super::depreciation`]; this service only chooses which assets to sum.

use anyhow::Result;
use chrono::{DateTime, Utc};
use shared::{Asset, AssetPatch, AssetValuation, NewAsset};
use tracing::{info, warn};

use super::depreciation;
use super::validation;
use super::IndexFilter;
use crate::storage::{AssetRepository, DbConnection};

/// Service for farm assets and their depreciation
#[derive(Clone)]
pub struct AssetService {
    assets: AssetRepository,
}

impl AssetService {
    pub fn new(db: DbConnection) -> Self {
        Self {
            assets: AssetRepository::new(db),
        }
    }

    pub async fn list_assets(&self, filter: Option<&IndexFilter>) -> Result<Vec<Asset>> {
        let assets = match filter {
            Some(filter) => self.assets.get_by_index(&filter.index, &filter.value).await?,
            None => self.assets.get_all().await?,
        };
        info!("Found {} assets", assets.len());
        Ok(assets)
    }

    pub async fn get_asset(&self, id: &str) -> Result<Option<Asset>> {
        let asset = self.assets.get_by_id(id).await?;
        if asset.is_none() {
            warn!("Asset not found: {}", id);
        }
        Ok(asset)
    }

    pub async fn create_asset(&self, data: NewAsset) -> Result<Asset> {
        info!(
            "Creating asset: name={}, category={}, price={:.2}",
            data.name,
            data.category.as_str(),
            data.purchase_price
        );

        validation::non_empty("name", &data.name)?;
        validation::date("purchaseDate", &data.purchase_date)?;
        validation::amount("purchasePrice", data.purchase_price)?;
        validation::amount("currentValue", data.current_value)?;
        validation::depreciation_rate(data.depreciation_rate)?;
        validation::useful_life(data.useful_life)?;

        let asset = self.assets.add(&data).await?;
        info!("Created asset: {} with ID: {}", asset.name, asset.id);
        Ok(asset)
    }

    pub async fn update_asset(&self, id: &str, patch: AssetPatch) -> Result<Option<Asset>> {
        info!("Updating asset: {}", id);

        if let Some(name) = &patch.name {
            validation::non_empty("name", name)?;
        }
        if let Some(purchase_date) = &patch.purchase_date {
            validation::date("purchaseDate", purchase_date)?;
        }
        validation::optional_amount("purchasePrice", patch.purchase_price)?;
        validation::optional_amount("currentValue", patch.current_value)?;
        if let Some(rate) = patch.depreciation_rate {
            validation::depreciation_rate(rate)?;
        }
        if let Some(useful_life) = patch.useful_life {
            validation::useful_life(useful_life)?;
        }

        let updated = self.assets.update(id, &patch).await?;
        if updated.is_none() {
            warn!("Asset not found: {}", id);
        }
        Ok(updated)
    }

    pub async fn delete_asset(&self, id: &str) -> Result<()> {
        info!("Deleting asset: {}", id);
        self.assets.delete(id).await?;
        Ok(())
    }

    pub async fn asset_valuation(&self, id: &str, as_of: DateTime<Utc>) -> Result<Option<AssetValuation>> {
        let asset = self.assets.get_by_id(id).await?;
        Ok(asset.map(|asset| depreciation::valuation(&asset, as_of)))
    }

    /// Valuations for every active asset
    pub async fn valuations(&self, as_of: DateTime<Utc>) -> Result<Vec<AssetValuation>> {
        let assets = self.assets.get_active().await?;
        Ok(assets
            .iter()
            .map(|asset| depreciation::valuation(asset, as_of))
            .collect())
    }

    /// Sum of the stored current value of active assets
    pub async fn total_asset_value(&self) -> Result<f64> {
        let assets = self.assets.get_active().await?;
        let total: f64 = assets.iter().map(|asset| asset.current_value).sum();
        info!("Total value of {} active assets: {:.2}", assets.len(), total);
        Ok(total)
    }

    /// Depreciation charged this month across active assets
    pub async fn total_depreciation_this_month(&self) -> Result<f64> {
        let assets = self.assets.get_active().await?;
        Ok(assets.iter().map(depreciation::monthly_depreciation).sum())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ValidationError;
    use shared::{AssetCategory, AssetStatus, DepreciationMethod};

    async fn setup_test() -> AssetService {
        let db = DbConnection::in_memory().await.expect("Failed to create test database");
        AssetService::new(db)
    }

    fn tractor() -> NewAsset {
        NewAsset {
            name: "Tractor".to_string(),
            category: AssetCategory::Vehicle,
            purchase_date: "2020-01-01".to_string(),
            purchase_price: 120000.0,
            current_value: 90000.0,
            depreciation_rate: 10.0,
            depreciation_method: DepreciationMethod::StraightLine,
            useful_life: 10.0,
            notes: None,
            status: AssetStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_zero_useful_life_rejected() {
        let service = setup_test().await;
        let err = service
            .create_asset(NewAsset {
                useful_life: 0.0,
                ..tractor()
            })
            .await
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<ValidationError>(),
            Some(&ValidationError::NonPositiveUsefulLife)
        );

        let asset = service.create_asset(tractor()).await.unwrap();
        let patch = AssetPatch {
            useful_life: Some(-2.0),
            ..Default::default()
        };
        assert!(service.update_asset(&asset.id, patch).await.is_err());
        assert_eq!(service.get_asset(&asset.id).await.unwrap().unwrap().useful_life, 10.0);
    }

    #[tokio::test]
    async fn test_totals_only_count_active_assets() {
        let service = setup_test().await;
        service.create_asset(tractor()).await.unwrap();
        service
            .create_asset(NewAsset {
                name: "Pickup".to_string(),
                current_value: 40000.0,
                depreciation_method: DepreciationMethod::DecliningBalance,
                depreciation_rate: 24.0,
                ..tractor()
            })
            .await
            .unwrap();
        service
            .create_asset(NewAsset {
                name: "Sold plough".to_string(),
                status: AssetStatus::Sold,
                ..tractor()
            })
            .await
            .unwrap();

        assert_eq!(service.total_asset_value().await.unwrap(), 130000.0);
        // 120000 / 10 / 12 + 40000 * 0.24 / 12
        let monthly = service.total_depreciation_this_month().await.unwrap();
        assert!((monthly - 1800.0).abs() < 1e-9);
        assert_eq!(service.valuations(Utc::now()).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_valuation_of_missing_asset_is_none() {
        let service = setup_test().await;
        assert!(service.asset_valuation("missing", Utc::now()).await.unwrap().is_none());
    }
}
