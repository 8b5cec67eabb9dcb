use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Page request as sent by the listing client. Both fields are optional.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<usize>,
    pub limit: Option<usize>,
}

/// Validated 1-based page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Page {
    pub page: usize,
    pub limit: usize,
}

impl Page {
    pub fn new(params: PageParams, default_limit: usize, max_limit: usize) -> Result<Self, AppError> {
        let page = params.page.unwrap_or(1);
        let limit = params.limit.unwrap_or(default_limit);

        if page == 0 {
            return Err(AppError::Validation("page must be 1 or greater".to_string()));
        }
        if !(1..=max_limit).contains(&limit) {
            return Err(AppError::Validation(format!(
                "limit must be between 1 and {max_limit}"
            )));
        }

        Ok(Self { page, limit })
    }

    /// The items on this page. Pages past the end are empty.
    pub fn slice<T>(&self, items: Vec<T>) -> Vec<T> {
        let offset = (self.page - 1).saturating_mul(self.limit);
        items.into_iter().skip(offset).take(self.limit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<usize>, limit: Option<usize>) -> PageParams {
        PageParams { page, limit }
    }

    #[test]
    fn test_defaults() {
        let page = Page::new(params(None, None), 20, 100).unwrap();
        assert_eq!(page, Page { page: 1, limit: 20 });
    }

    #[test]
    fn test_rejects_page_zero_and_bad_limits() {
        assert!(Page::new(params(Some(0), None), 20, 100).is_err());
        assert!(Page::new(params(None, Some(0)), 20, 100).is_err());
        assert!(Page::new(params(None, Some(101)), 20, 100).is_err());
        assert!(Page::new(params(None, Some(100)), 20, 100).is_ok());
    }

    #[test]
    fn test_slice_windows() {
        let items: Vec<u32> = (1..=7).collect();
        let page = Page { page: 2, limit: 3 };
        assert_eq!(page.slice(items.clone()), vec![4, 5, 6]);
        assert_eq!(Page { page: 3, limit: 3 }.slice(items.clone()), vec![7]);
        assert!(Page { page: 9, limit: 3 }.slice(items).is_empty());
    }
}
