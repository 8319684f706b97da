//! Inventory endpoints

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use super::Envelope;
use crate::http::{ApiClient, ApiError};

/// Listing state of an inventory item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryStatus {
    #[serde(alias = "active")]
    Active,
    #[serde(alias = "inactive")]
    Inactive,
}

/// Shopper segment an item is listed under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    #[serde(rename = "M")]
    Men,
    #[serde(rename = "W")]
    Women,
    Kids,
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Segment::Men => "Men",
            Segment::Women => "Women",
            Segment::Kids => "Kids",
        };
        f.write_str(label)
    }
}

/// A stocked product
///
/// Field names follow the camelCase form; the snake_case names some
/// endpoints return are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    #[serde(default, alias = "iD", alias = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(alias = "product_name")]
    pub product_name: String,
    #[serde(default)]
    pub brand: String,
    #[serde(default, alias = "inventory_master_id")]
    pub inventory_master_id: Option<i64>,
    #[serde(default, alias = "available_sizes")]
    pub available_sizes: Option<String>,
    #[serde(default, alias = "available_colour")]
    pub available_colour: Option<String>,
    #[serde(default, alias = "price")]
    pub prices: f64,
    #[serde(default, alias = "is_return_acceptable")]
    pub is_return_acceptable: bool,
    #[serde(default, alias = "is_available_on_rent")]
    pub is_available_on_rent: bool,
    #[serde(default, alias = "product_images")]
    pub product_images: Option<String>,
    #[serde(default, alias = "combo_details")]
    pub combo_details: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "fabric_material")]
    pub fabric_material: Option<String>,
    #[serde(default)]
    pub status: Option<InventoryStatus>,
    #[serde(default)]
    pub category: Option<Segment>,
    #[serde(default, alias = "available_online")]
    pub available_online: bool,
}

/// Filter for the online rental listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalFilter {
    pub sizes: Vec<String>,
    /// Inclusive rental price bounds
    pub price_range: Option<(u32, u32)>,
    pub page: u32,
    pub limit: u32,
}

impl Default for RentalFilter {
    fn default() -> Self {
        Self {
            sizes: Vec::new(),
            price_range: None,
            page: 1,
            limit: 10,
        }
    }
}

impl RentalFilter {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            ..Self::default()
        }
    }

    pub fn with_size(mut self, size: impl Into<String>) -> Self {
        self.sizes.push(size.into());
        self
    }

    pub fn with_price_range(mut self, min: u32, max: u32) -> Self {
        self.price_range = Some((min.min(max), min.max(max)));
        self
    }

    /// `?sizes=..&rentalPriceRange=min-max&page=..&limit=..`, unset filters left out
    pub fn to_query_string(&self) -> String {
        let mut params = Vec::new();
        if !self.sizes.is_empty() {
            let sizes: Vec<_> = self
                .sizes
                .iter()
                .map(|size| urlencoding::encode(size).into_owned())
                .collect();
            params.push(format!("sizes={}", sizes.join(",")));
        }
        if let Some((min, max)) = self.price_range {
            params.push(format!("rentalPriceRange={}-{}", min, max));
        }
        params.push(format!("page={}", self.page));
        params.push(format!("limit={}", self.limit));
        format!("?{}", params.join("&"))
    }
}

/// Client for `/inventory`
#[derive(Clone)]
pub struct InventoryApi {
    client: ApiClient,
}

impl InventoryApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn path(&self, suffix: &str) -> String {
        format!("{}{}", self.client.config().endpoints.inventory, suffix)
    }

    pub async fn list(&self) -> Result<Vec<InventoryItem>, ApiError> {
        let items: Envelope<Vec<InventoryItem>> =
            self.client.get(&self.path("/get-all/inventories")).await?;
        Ok(items.into_inner())
    }

    /// Items listed for online rental that match `filter`
    pub async fn online_rentals(
        &self,
        filter: &RentalFilter,
    ) -> Result<Vec<InventoryItem>, ApiError> {
        let path = self.path(&format!("/online-rentals/filter{}", filter.to_query_string()));
        let items: Envelope<Vec<InventoryItem>> = self.client.get(&path).await?;
        Ok(items.into_inner())
    }

    pub async fn get(&self, id: i64) -> Result<InventoryItem, ApiError> {
        let item: Envelope<InventoryItem> = self.client.get(&self.path(&format!("/{}", id))).await?;
        Ok(item.into_inner())
    }

    pub async fn create(&self, item: &InventoryItem) -> Result<Value, ApiError> {
        self.client.post(&self.path("/create"), item).await
    }

    /// Replace the item under an inventory master id
    pub async fn update(&self, master_id: i64, item: &InventoryItem) -> Result<Value, ApiError> {
        let path = self.path(&format!("/update/inventoryMasterId/{}", master_id));
        self.client.put(&path, item).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&self.path(&format!("/{}", id))).await
    }

    /// Flip a boolean flag of the item, named by `field`
    pub async fn toggle(&self, id: i64, field: &str) -> Result<Value, ApiError> {
        let path = self.path(&format!("/toggle/{}", id));
        self.client.patch(&path, &json!({ "field": field })).await
    }

    pub async fn enable_online(&self, id: i64) -> Result<Value, ApiError> {
        let path = self.path(&format!("/enable-online/{}", id));
        self.client.post(&path, &json!({})).await
    }

    pub async fn enable_rental(&self, id: i64) -> Result<Value, ApiError> {
        let path = self.path(&format!("/enable-rental/{}", id));
        self.client.post(&path, &json!({})).await
    }
}
