//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::member::{Member, MemberTeam, NewMember};
use crate::domain::team::{NewTeam, Team};
use crate::domain::types::{MemberId, TeamId, TeamName, Username};
use crate::pagination::{CountPolicy, Page, Pageable};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    MemberReader, MemberSearchCondition, MemberWriter, TeamReader, TeamWriter,
};

mock! {
    pub Repository {}

    impl MemberReader for Repository {
        fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>>;
        fn list_members(&self) -> RepositoryResult<Vec<Member>>;
        fn list_members_by_username(&self, username: &Username) -> RepositoryResult<Vec<Member>>;
        fn search_members(
            &self,
            condition: &MemberSearchCondition,
        ) -> RepositoryResult<Vec<MemberTeam>>;
        fn search_members_page(
            &self,
            condition: &MemberSearchCondition,
            pageable: &Pageable,
            policy: CountPolicy,
        ) -> RepositoryResult<Page<MemberTeam>>;
    }

    impl MemberWriter for Repository {
        fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member>;
        fn create_members(&self, new_members: &[NewMember]) -> RepositoryResult<usize>;
        fn change_member_team(
            &self,
            member_id: MemberId,
            team_id: Option<TeamId>,
        ) -> RepositoryResult<Member>;
    }

    impl TeamReader for Repository {
        fn get_team_by_id(&self, id: TeamId) -> RepositoryResult<Option<Team>>;
        fn get_team_by_name(&self, name: &TeamName) -> RepositoryResult<Option<Team>>;
    }

    impl TeamWriter for Repository {
        fn create_team(&self, new_team: &NewTeam) -> RepositoryResult<Team>;
    }
}
