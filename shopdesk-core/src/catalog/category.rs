//! Category endpoints

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{ListQuery, Page, Pagination};
use crate::http::{ApiClient, ApiError};

/// A product category
///
/// The backend sends PascalCase column names; they are read here and
/// written back out in camelCase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all(serialize = "camelCase"))]
pub struct Category {
    #[serde(rename(deserialize = "ID"))]
    pub id: i64,
    #[serde(rename(deserialize = "Name"))]
    pub name: String,
    #[serde(rename(deserialize = "Image"), default)]
    pub image: Option<String>,
    #[serde(rename(deserialize = "Icon"), default)]
    pub icon: Option<String>,
    #[serde(rename(deserialize = "Parent_ID"), default)]
    pub parent_id: Option<i64>,
    #[serde(rename(deserialize = "Status"), default)]
    pub status: String,
    #[serde(rename(deserialize = "Created_At"), default)]
    pub created_at: Option<String>,
    #[serde(rename(deserialize = "Updated_At"), default)]
    pub updated_at: Option<String>,
}

/// Body for creating a category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    pub icon: String,
    pub parent_id: Option<i64>,
    pub status: String,
    pub image: Option<String>,
}

impl NewCategory {
    /// An active top-level category
    pub fn new(name: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            icon: icon.into(),
            parent_id: None,
            status: "active".to_string(),
            image: None,
        }
    }

    pub fn with_parent(mut self, parent_id: i64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }
}

#[derive(Debug, Deserialize)]
struct CategoryListResponse {
    data: Vec<Category>,
    pagination: Pagination,
}

/// Client for `/categories`
#[derive(Clone)]
pub struct CategoryApi {
    client: ApiClient,
}

impl CategoryApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    fn base(&self) -> &str {
        &self.client.config().endpoints.categories
    }

    /// One page of categories matching the search term
    pub async fn list(&self, query: &ListQuery) -> Result<Page<Category>, ApiError> {
        let path = format!("{}{}", self.base(), query.to_query_string());
        let response: CategoryListResponse = self.client.get(&path).await?;
        Ok(Page {
            items: response.data,
            pagination: response.pagination,
        })
    }

    /// Create a category; the backend's reply is returned as is
    pub async fn create(&self, category: &NewCategory) -> Result<Value, ApiError> {
        self.client.post(self.base(), category).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.client.delete(&format!("{}/{}", self.base(), id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_backend_row() {
        let category: Category = serde_json::from_value(json!({
            "ID": 4,
            "Name": "Home & Garden",
            "Image": null,
            "Icon": "home",
            "Parent_ID": 1,
            "Status": "active",
            "Created_At": "2024-03-20T10:00:00Z",
            "Updated_At": "2024-03-21T10:00:00Z"
        }))
        .unwrap();

        assert_eq!(category.id, 4);
        assert_eq!(category.parent_id, Some(1));
        assert_eq!(category.icon.as_deref(), Some("home"));
        assert!(category.image.is_none());
    }

    #[test]
    fn serializes_camel_case() {
        let category = Category {
            id: 1,
            name: "Books".into(),
            image: None,
            icon: None,
            parent_id: None,
            status: "active".into(),
            created_at: None,
            updated_at: None,
        };
        let value = serde_json::to_value(&category).unwrap();
        assert_eq!(value["parentId"], Value::Null);
        assert_eq!(value["name"], "Books");
    }

    #[test]
    fn new_category_body() {
        let body = serde_json::to_value(NewCategory::new("Shoes", "shoe").with_parent(2)).unwrap();
        assert_eq!(
            body,
            json!({"name": "Shoes", "icon": "shoe", "parentId": 2, "status": "active", "image": null})
        );
    }
}
