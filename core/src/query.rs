//! Pagination options and their query-string encoding.
//!
//! # Design
//! Callers pass a partial `Pagination`; every field left as `None` falls
//! back to the built-in default for that field only (`per=50`,
//! `sort=position`, `direction=desc`). `page` has no default. Parameters are
//! emitted in the fixed order `page`, `per`, `sort`, `direction`, `date`,
//! joined by `&` without a leading `?`. `date` is the cache-busting
//! timestamp and is only emitted when `force_refresh` is set.

use serde::{Deserialize, Serialize};

use crate::clock::Clock;

pub const DEFAULT_PER: u32 = 50;
pub const DEFAULT_SORT: &str = "position";
pub const DEFAULT_DIRECTION: Direction = Direction::Desc;

/// Sort direction of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Asc => "asc",
            Direction::Desc => "desc",
        }
    }
}

/// Per-request paging, sorting and cache-control options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Append `date=<now>` so intermediaries treat the request as uncached.
    #[serde(default)]
    pub force_refresh: bool,
}

impl Pagination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn per(mut self, per: u32) -> Self {
        self.per = Some(per);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    /// Fill every unset field that has a default.
    pub fn resolve(&self) -> Pagination {
        Pagination {
            per: self.per.or(Some(DEFAULT_PER)),
            page: self.page,
            sort: self.sort.clone().or_else(|| Some(DEFAULT_SORT.to_string())),
            direction: self.direction.or(Some(DEFAULT_DIRECTION)),
            force_refresh: self.force_refresh,
        }
    }

    /// Encode the resolved options. Zero numbers and empty strings count as
    /// unset and are skipped.
    pub fn to_query(&self, clock: &dyn Clock) -> String {
        let resolved = self.resolve();
        let mut params = Vec::with_capacity(5);
        if let Some(page) = resolved.page.filter(|page| *page > 0) {
            params.push(format!("page={page}"));
        }
        if let Some(per) = resolved.per.filter(|per| *per > 0) {
            params.push(format!("per={per}"));
        }
        if let Some(sort) = resolved.sort.as_deref().filter(|sort| !sort.is_empty()) {
            params.push(format!("sort={}", encode(sort)));
        }
        if let Some(direction) = resolved.direction {
            params.push(format!("direction={}", direction.as_str()));
        }
        if resolved.force_refresh {
            params.push(format!("date={}", clock.now()));
        }
        params.join("&")
    }
}

/// Query string for a paginated listing; `None` means all defaults.
pub fn pagination_query(options: Option<&Pagination>, clock: &dyn Clock) -> String {
    match options {
        Some(options) => options.to_query(clock),
        None => Pagination::default().to_query(clock),
    }
}

/// Query string for a search endpoint: `q=<term>` followed by pagination.
pub fn search_query(term: &str, options: Option<&Pagination>, clock: &dyn Clock) -> String {
    let pagination = pagination_query(options, clock);
    if pagination.is_empty() {
        format!("q={}", encode(term))
    } else {
        format!("q={}&{pagination}", encode(term))
    }
}

/// Append `query` to `path` with a `?`, unless it is empty.
pub(crate) fn with_query(path: &str, query: &str) -> String {
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

/// Percent-encode one path segment. Form encoding already escapes a literal
/// `+` as `%2B`, so every remaining `+` stands for a space.
pub(crate) fn path_segment(value: &str) -> String {
    encode(value).replace('+', "%20")
}
