//! Page-number pagination and the `{count, next, previous, results}` envelope.

use serde::Serialize;

use crate::error::CoreError;
use crate::filter::{parse_param, QueryParams};

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound on a client-requested page size.
pub const MAX_PAGE_SIZE: i64 = 100;

pub const PAGE_PARAM: &str = "page";
pub const PAGE_SIZE_PARAM: &str = "page_size";

/// Server-side pagination limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSettings {
    pub default_size: i64,
    pub max_size: i64,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            default_size: DEFAULT_PAGE_SIZE,
            max_size: MAX_PAGE_SIZE,
        }
    }
}

/// A validated, 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Read `page` and `page_size` from the query map.
    ///
    /// Missing or blank values fall back to page 1 and the configured default
    /// size. Oversized pages are clamped to `max_size`.
    pub fn from_params(params: &QueryParams, settings: PageSettings) -> Result<Self, CoreError> {
        let page = positive_param(params, PAGE_PARAM)?.unwrap_or(1);
        let page_size = positive_param(params, PAGE_SIZE_PARAM)?
            .unwrap_or(settings.default_size)
            .min(settings.max_size);
        Ok(Self { page, page_size })
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// Number of pages needed for `total` items (zero when empty).
    pub fn page_count(&self, total: i64) -> i64 {
        if total <= 0 {
            0
        } else {
            (total + self.page_size - 1) / self.page_size
        }
    }

    pub fn has_next(&self, total: i64) -> bool {
        self.page < self.page_count(total)
    }

    /// The page `previous` should point at, if any.
    ///
    /// Past the end this is the last real page rather than `page - 1`.
    pub fn previous_page(&self, total: i64) -> Option<i64> {
        if self.page <= 1 {
            return None;
        }
        let target = (self.page - 1).min(self.page_count(total));
        (target >= 1).then_some(target)
    }
}

fn positive_param(params: &QueryParams, key: &str) -> Result<Option<i64>, CoreError> {
    match parse_param::<i64>(params, key)? {
        Some(value) if value < 1 => Err(CoreError::InvalidFilterValue {
            param: key.to_string(),
            value: value.to_string(),
        }),
        other => Ok(other),
    }
}

/// Builds `next`/`previous` URLs that preserve the rest of the query.
#[derive(Debug, Clone)]
pub struct PageLinks<'a> {
    base_url: Option<&'a str>,
    path: &'a str,
    params: &'a QueryParams,
}

impl<'a> PageLinks<'a> {
    /// * `base_url` - scheme and host for absolute links; `None` yields
    ///   root-relative links.
    /// * `path` - request path, e.g. `/movies/`.
    /// * `params` - the full request query.
    pub fn new(base_url: Option<&'a str>, path: &'a str, params: &'a QueryParams) -> Self {
        Self {
            base_url,
            path,
            params,
        }
    }

    /// URL for `page`. Page 1 is expressed by omitting the parameter.
    pub fn page_url(&self, page: i64) -> String {
        let mut query = url::form_urlencoded::Serializer::new(String::new());
        let page_value = page.to_string();
        let mut page_written = false;

        for (key, value) in self.params {
            if key == PAGE_PARAM {
                continue;
            }
            if !page_written && page > 1 && key.as_str() > PAGE_PARAM {
                query.append_pair(PAGE_PARAM, &page_value);
                page_written = true;
            }
            query.append_pair(key, value);
        }
        if !page_written && page > 1 {
            query.append_pair(PAGE_PARAM, &page_value);
        }

        let query = query.finish();
        let base = self.base_url.unwrap_or("").trim_end_matches('/');
        if query.is_empty() {
            format!("{base}{}", self.path)
        } else {
            format!("{base}{}?{query}", self.path)
        }
    }
}

/// Paginated list response.
#[derive(Debug, Clone, Serialize)]
pub struct Envelope<T> {
    pub count: i64,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

impl<T> Envelope<T> {
    /// Wrap one page of `results` drawn from `total` matching items.
    pub fn new(results: Vec<T>, total: i64, request: PageRequest, links: &PageLinks<'_>) -> Self {
        Self {
            count: total,
            next: request
                .has_next(total)
                .then(|| links.page_url(request.page + 1)),
            previous: request.previous_page(total).map(|p| links.page_url(p)),
            results,
        }
    }
}
