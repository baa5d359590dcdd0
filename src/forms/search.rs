//! Member search form.

use serde::Deserialize;
use validator::Validate;

use crate::{
    forms::FormError,
    pagination::Pageable,
    repository::{MemberSearchCondition, MemberSort},
};

pub const DEFAULT_PAGE_SIZE: usize = 20;
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Default, Deserialize, Validate)]
/// Search parameters as submitted by a caller. Every field is optional.
pub struct MemberSearchForm {
    #[validate(length(max = 64))]
    pub username: Option<String>,
    #[validate(length(max = 64))]
    pub team_name: Option<String>,
    #[validate(range(min = 0))]
    pub age_goe: Option<i32>,
    #[validate(range(min = 0))]
    pub age_loe: Option<i32>,
    #[validate(length(max = 64))]
    pub username_contains: Option<String>,
    #[serde(default)]
    pub sort: MemberSort,
    /// 1-based page number.
    #[validate(range(min = 1))]
    pub page: Option<usize>,
    #[validate(range(min = 1, max = 100))]
    pub size: Option<usize>,
}

impl MemberSearchForm {
    /// The requested page window, defaulting to the first page.
    pub fn pageable(&self) -> Result<Pageable, FormError> {
        let size = self.size.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
        Pageable::of_page(self.page.unwrap_or(1), size)
            .map_err(|err| FormError::InvalidPage(err.to_string()))
    }

    pub fn to_condition(&self) -> MemberSearchCondition {
        MemberSearchCondition {
            username: self.username.clone(),
            team_name: self.team_name.clone(),
            age_goe: self.age_goe,
            age_loe: self.age_loe,
            username_contains: self.username_contains.clone(),
            sort: self.sort,
        }
    }
}
