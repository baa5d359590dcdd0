//! Offset/limit pagination with an optional count query.
//!
//! [`fetch_page`] runs a bounded query and, depending on the [`CountPolicy`],
//! a separate count query for the total number of matching rows.

use serde::Serialize;
use thiserror::Error;

/// Errors raised when a page request cannot be turned into a query.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("page limit must be greater than zero")]
    ZeroLimit,
    #[error("page bounds out of range: offset {offset}, limit {limit}")]
    OutOfRange { offset: usize, limit: usize },
    #[error("count query returned a negative total: {0}")]
    NegativeCount(i64),
}

/// A validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pageable {
    offset: usize,
    limit: usize,
}

impl Pageable {
    /// Creates a window of at most `limit` rows starting at `offset`.
    pub fn new(offset: usize, limit: usize) -> Result<Self, PaginationError> {
        if limit == 0 {
            return Err(PaginationError::ZeroLimit);
        }
        let fits = |value: usize| i64::try_from(value).is_ok();
        let end_fits = offset.checked_add(limit).is_some_and(fits);
        if !fits(offset) || !fits(limit) || !end_fits {
            return Err(PaginationError::OutOfRange { offset, limit });
        }
        Ok(Self { offset, limit })
    }

    /// Creates the window for a 1-based page number. Page `0` is treated as `1`.
    pub fn of_page(page: usize, per_page: usize) -> Result<Self, PaginationError> {
        let offset = page
            .max(1)
            .saturating_sub(1)
            .checked_mul(per_page)
            .ok_or(PaginationError::OutOfRange {
                offset: usize::MAX,
                limit: per_page,
            })?;
        Self::new(offset, per_page)
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    // Both values were checked against i64::MAX in `new`.
    fn sql_offset(&self) -> i64 {
        i64::try_from(self.offset).unwrap_or(i64::MAX)
    }

    fn sql_limit(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }
}

/// How the total of a page is obtained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CountPolicy {
    /// Always run the count query.
    Always,
    /// Skip the count query when the first page comes back short.
    #[default]
    Elide,
}

/// Where [`Page::total`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TotalSource {
    Counted,
    Derived,
}

/// One window of results plus the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub offset: usize,
    pub limit: usize,
    pub total: usize,
    pub total_source: TotalSource,
}

impl<T> Page<T> {
    /// Number of pages of `limit` rows needed to cover `total`.
    pub fn total_pages(&self) -> usize {
        self.total.div_ceil(self.limit.max(1))
    }

    /// Whether rows exist past the end of this window.
    pub fn has_next(&self) -> bool {
        self.offset + self.items.len() < self.total
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            items: self.items.into_iter().map(f).collect(),
            offset: self.offset,
            limit: self.limit,
            total: self.total,
            total_source: self.total_source,
        }
    }
}

/// Returns the total implied by the page bounds, if they determine it.
///
/// Only a first page holding fewer rows than requested is known to be the
/// whole result set.
pub fn derived_total(pageable: &Pageable, rows: usize) -> Option<usize> {
    (pageable.offset == 0 && rows < pageable.limit).then_some(pageable.offset + rows)
}

/// Loads one page of rows.
///
/// `fetch` receives the SQL offset and limit and runs the bounded select;
/// `count` runs the count query over the same filtered relation. Both run
/// against the same `ctx`, typically a single checked-out connection. Errors
/// from either closure are returned as is; a negative count is reported as
/// [`PaginationError::NegativeCount`].
pub fn fetch_page<Ctx, T, E, F, C>(
    ctx: &mut Ctx,
    pageable: &Pageable,
    policy: CountPolicy,
    fetch: F,
    count: C,
) -> Result<Page<T>, E>
where
    Ctx: ?Sized,
    F: FnOnce(&mut Ctx, i64, i64) -> Result<Vec<T>, E>,
    C: FnOnce(&mut Ctx) -> Result<i64, E>,
    E: From<PaginationError>,
{
    let items = fetch(ctx, pageable.sql_offset(), pageable.sql_limit())?;

    let elided = match policy {
        CountPolicy::Always => None,
        CountPolicy::Elide => derived_total(pageable, items.len()),
    };

    let (total, total_source) = match elided {
        Some(total) => {
            log::debug!(
                "Skipping count query: first page returned {} of {} rows",
                items.len(),
                pageable.limit
            );
            (total, TotalSource::Derived)
        }
        None => {
            let counted = count(ctx)?;
            let total = usize::try_from(counted)
                .map_err(|_| PaginationError::NegativeCount(counted))?;
            (total, TotalSource::Counted)
        }
    };

    Ok(Page {
        items,
        offset: pageable.offset,
        limit: pageable.limit,
        total,
        total_source,
    })
}
