//! Diesel models representing members and the member/team search projection.

use diesel::prelude::*;

use crate::domain::member::{
    Member as DomainMember, MemberTeam as DomainMemberTeam, NewMember as DomainNewMember,
};
use crate::domain::types::{Age, MemberId, TeamId, TypeConstraintError, Username};
use crate::schema::{members, teams};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = members)]
/// Diesel model for [`crate::domain::member::Member`].
pub struct Member {
    pub id: i32,
    pub username: String,
    pub age: i32,
    pub team_id: Option<i32>,
}

#[derive(Insertable)]
#[diesel(table_name = members)]
#[diesel(treat_none_as_default_value = false)]
/// Insertable form of [`Member`]. A missing team is written as `NULL`.
pub struct NewMember<'a> {
    pub username: &'a str,
    pub age: i32,
    pub team_id: Option<i32>,
}

/// Projection of `members LEFT JOIN teams` onto the search row.
///
/// Both tables have an `id` column, so each one is bound to its own field.
/// Team columns go through `nullable()` because the join is a left outer join.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = members)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MemberTeamRow {
    #[diesel(column_name = id)]
    pub member_id: i32,
    pub username: String,
    pub age: i32,
    #[diesel(select_expression = teams::id.nullable())]
    #[diesel(select_expression_type = diesel::dsl::Nullable<teams::id>)]
    pub team_id: Option<i32>,
    #[diesel(select_expression = teams::name.nullable())]
    #[diesel(select_expression_type = diesel::dsl::Nullable<teams::name>)]
    pub team_name: Option<String>,
}

impl TryFrom<Member> for DomainMember {
    type Error = TypeConstraintError;

    fn try_from(member: Member) -> Result<Self, Self::Error> {
        Ok(Self {
            id: MemberId::try_from(member.id)?,
            username: Username::new(member.username)?,
            age: Age::try_from(member.age)?,
            team_id: member.team_id.map(TeamId::try_from).transpose()?,
        })
    }
}

impl<'a> From<&'a DomainNewMember> for NewMember<'a> {
    fn from(member: &'a DomainNewMember) -> Self {
        Self {
            username: member.username.as_str(),
            age: member.age.get(),
            team_id: member.team_id.map(TeamId::get),
        }
    }
}

impl From<MemberTeamRow> for DomainMemberTeam {
    fn from(row: MemberTeamRow) -> Self {
        Self {
            member_id: row.member_id,
            username: row.username,
            age: row.age,
            team_id: row.team_id,
            team_name: row.team_name,
        }
    }
}
