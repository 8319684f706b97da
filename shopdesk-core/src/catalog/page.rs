//! Shared response envelopes and pagination

use serde::{Deserialize, Serialize};

/// Body that is either wrapped as `{"data": ...}` or bare
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Wrapped { data: T },
    Bare(T),
}

impl<T> Envelope<T> {
    pub fn into_inner(self) -> T {
        match self {
            Envelope::Wrapped { data } | Envelope::Bare(data) => data,
        }
    }
}

/// Pagination block of list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Pagination,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.pagination.page < self.pagination.total_pages
    }
}

/// Page, size, and search term of a listing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: String::new(),
        }
    }
}

impl ListQuery {
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
            search: String::new(),
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    /// `?page=..&limit=..&q=..`
    pub fn to_query_string(&self) -> String {
        format!(
            "?page={}&limit={}&q={}",
            self.page,
            self.limit,
            urlencoding::encode(&self.search)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_accepts_both_shapes() {
        let wrapped: Envelope<Vec<u32>> = serde_json::from_value(json!({"data": [1, 2]})).unwrap();
        let bare: Envelope<Vec<u32>> = serde_json::from_value(json!([3])).unwrap();
        assert_eq!(wrapped.into_inner(), vec![1, 2]);
        assert_eq!(bare.into_inner(), vec![3]);
    }

    #[test]
    fn query_string_encodes_search() {
        let query = ListQuery::new(2, 25).with_search("home & garden");
        assert_eq!(query.to_query_string(), "?page=2&limit=25&q=home%20%26%20garden");
    }

    #[test]
    fn query_clamps_to_first_page() {
        let query = ListQuery::new(0, 0);
        assert_eq!(query.page, 1);
        assert_eq!(query.limit, 1);
    }

    #[test]
    fn has_next_uses_total_pages() {
        let page = Page::<u8> {
            items: vec![],
            pagination: Pagination {
                total: 30,
                page: 2,
                limit: 10,
                total_pages: 3,
            },
        };
        assert!(page.has_next());
    }
}
