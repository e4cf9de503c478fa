use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Page size for the student listing. The listing always pages at this
/// size; clients only pick the page number.
pub const PAGE_SIZE: i64 = 10;

fn deserialize_optional_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.is_empty() => Ok(None),
        Some(s) => s.parse::<i64>().map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub has_more: bool,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct PaginationParams {
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    pub page: Option<i64>,
}

impl PaginationParams {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * PAGE_SIZE
    }
}

impl PaginationMeta {
    pub fn new(total: i64, page: i64) -> Self {
        Self {
            total,
            page,
            page_size: PAGE_SIZE,
            has_more: page * PAGE_SIZE < total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_page_is_first() {
        let params = PaginationParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn page_below_one_is_clamped() {
        let params = PaginationParams { page: Some(0) };
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn offset_follows_page() {
        let params = PaginationParams { page: Some(3) };
        assert_eq!(params.offset(), 2 * PAGE_SIZE);
    }

    #[test]
    fn meta_has_more_on_partial_page() {
        let meta = PaginationMeta::new(25, 1);
        assert!(meta.has_more);
        let meta = PaginationMeta::new(25, 3);
        assert!(!meta.has_more);
    }

    #[test]
    fn params_deserialize_from_query_strings() {
        let params: PaginationParams = serde_json::from_str(r#"{"page":"2"}"#).unwrap();
        assert_eq!(params.page(), 2);
        let params: PaginationParams = serde_json::from_str(r#"{"page":""}"#).unwrap();
        assert_eq!(params.page(), 1);
        let params: PaginationParams = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(params.page(), 1);
    }
}
