//! Page requests and paged results

use crate::config::PaginationConfig;
use serde::Serialize;

/// A normalised, 1-indexed page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    per_page: u32,
}

impl PageRequest {
    /// Clamp typed values: page floored at 1, per_page into `[1, max_per_page]`
    pub fn new(page: i64, per_page: i64, config: &PaginationConfig) -> Self {
        let max = i64::from(config.max_per_page.max(1));
        Self {
            page: page.clamp(1, i64::from(u32::MAX)) as u32,
            per_page: per_page.clamp(1, max) as u32,
        }
    }

    /// Normalise raw query-string values.
    ///
    /// Missing or unparsable values fall back to the defaults; parsed values
    /// are clamped like [`PageRequest::new`].
    pub fn from_query(page: Option<&str>, per_page: Option<&str>, config: &PaginationConfig) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1);
        let per_page = per_page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or_else(|| i64::from(config.default_per_page));
        Self::new(page, per_page, config)
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    /// Number of items before this page
    pub fn offset(&self) -> usize {
        (self.page as usize - 1).saturating_mul(self.per_page as usize)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 10, &PaginationConfig::default())
    }
}

/// One page of an ordered result set
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    /// ceil(total / per_page), zero when nothing matched
    pub pages: usize,
    /// Number of matching items across all pages
    pub total: usize,
}

impl<T> Page<T> {
    /// Cut the requested page out of an already ordered result set
    pub fn slice(ordered: Vec<T>, request: PageRequest) -> Self {
        let total = ordered.len();
        let per_page = request.per_page() as usize;
        let items = ordered
            .into_iter()
            .skip(request.offset())
            .take(per_page)
            .collect();

        Self {
            items,
            page: request.page(),
            per_page: request.per_page(),
            pages: total.div_ceil(per_page),
            total,
        }
    }

    /// Project the items, keeping the page arithmetic
    pub fn try_map<U, E>(self, f: impl FnMut(T) -> Result<U, E>) -> Result<Page<U>, E> {
        let items = self.items.into_iter().map(f).collect::<Result<Vec<_>, E>>()?;
        Ok(Page {
            items,
            page: self.page,
            per_page: self.per_page,
            pages: self.pages,
            total: self.total,
        })
    }
}
