use serde::Deserialize;

use crate::{
    db::{DbConnection, DbPool, get_connection},
    domain::{
        member::{Member, MemberTeam, NewMember},
        team::{NewTeam, Team},
        types::{MemberId, TeamId, TeamName, Username},
    },
    pagination::{CountPolicy, Page, Pageable},
    repository::errors::RepositoryResult,
};

pub mod errors;
pub mod member;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod predicate;
pub mod team;

/// Diesel-backed implementation of every repository trait.
///
/// Cloning shares the underlying pool. Each call checks out its own
/// connection, which goes back to the pool when the call returns.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Ordering of member search results. Ties are broken by member id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberSort {
    #[default]
    UsernameDesc,
    UsernameAsc,
    AgeDesc,
    AgeAsc,
}

/// Sparse member filter. Unset (or blank) fields do not constrain the search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberSearchCondition {
    pub username: Option<String>,
    pub team_name: Option<String>,
    pub age_goe: Option<i32>,
    pub age_loe: Option<i32>,
    pub username_contains: Option<String>,
    pub sort: MemberSort,
}

impl MemberSearchCondition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn team_name(mut self, team_name: impl Into<String>) -> Self {
        self.team_name = Some(team_name.into());
        self
    }

    pub fn age_goe(mut self, age: i32) -> Self {
        self.age_goe = Some(age);
        self
    }

    pub fn age_loe(mut self, age: i32) -> Self {
        self.age_loe = Some(age);
        self
    }

    pub fn username_contains(mut self, fragment: impl Into<String>) -> Self {
        self.username_contains = Some(fragment.into());
        self
    }

    pub fn sort(mut self, sort: MemberSort) -> Self {
        self.sort = sort;
        self
    }
}

pub trait MemberReader {
    fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>>;
    fn list_members(&self) -> RepositoryResult<Vec<Member>>;
    fn list_members_by_username(&self, username: &Username) -> RepositoryResult<Vec<Member>>;
    fn search_members(&self, condition: &MemberSearchCondition)
    -> RepositoryResult<Vec<MemberTeam>>;
    fn search_members_page(
        &self,
        condition: &MemberSearchCondition,
        pageable: &Pageable,
        policy: CountPolicy,
    ) -> RepositoryResult<Page<MemberTeam>>;
}

pub trait MemberWriter {
    fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member>;
    /// Inserts every member or none of them.
    fn create_members(&self, new_members: &[NewMember]) -> RepositoryResult<usize>;
    fn change_member_team(
        &self,
        member_id: MemberId,
        team_id: Option<TeamId>,
    ) -> RepositoryResult<Member>;
}

pub trait TeamReader {
    fn get_team_by_id(&self, id: TeamId) -> RepositoryResult<Option<Team>>;
    fn get_team_by_name(&self, name: &TeamName) -> RepositoryResult<Option<Team>>;
}

pub trait TeamWriter {
    fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team>;
}
