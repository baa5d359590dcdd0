//! Repository implementation for members and the member/team search.

use diesel::dsl::{IntoBoxed, LeftJoin};
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::{
    db::DbConnection,
    domain::{
        member::{Member, MemberTeam, NewMember},
        types::{MemberId, TeamId, Username},
    },
    models::member::{Member as DbMember, MemberTeamRow, NewMember as DbNewMember},
    pagination::{CountPolicy, Page, Pageable, fetch_page},
    repository::{
        DieselRepository, MemberReader, MemberSearchCondition, MemberSort, MemberWriter,
        errors::{RepositoryError, RepositoryResult},
        predicate::search_predicate,
    },
    schema::{members, teams},
};

type MemberTeamQuery = IntoBoxed<'static, LeftJoin<members::table, teams::table>, Sqlite>;

/// `members LEFT JOIN teams` restricted by the search condition.
///
/// Without any condition the query carries no `WHERE` clause.
fn filtered_member_teams(condition: &MemberSearchCondition) -> MemberTeamQuery {
    let mut query = members::table.left_join(teams::table).into_boxed();
    if let Some(predicate) = search_predicate(condition) {
        query = query.filter(predicate);
    }
    query
}

fn sorted(query: MemberTeamQuery, sort: MemberSort) -> MemberTeamQuery {
    let query = match sort {
        MemberSort::UsernameDesc => query.order(members::username.desc()),
        MemberSort::UsernameAsc => query.order(members::username.asc()),
        MemberSort::AgeDesc => query.order(members::age.desc()),
        MemberSort::AgeAsc => query.order(members::age.asc()),
    };
    query.then_order_by(members::id.asc())
}

fn load_member_teams(
    conn: &mut DbConnection,
    condition: &MemberSearchCondition,
    bounds: Option<(i64, i64)>,
) -> RepositoryResult<Vec<MemberTeam>> {
    let mut query = sorted(filtered_member_teams(condition), condition.sort);
    if let Some((offset, limit)) = bounds {
        query = query.offset(offset).limit(limit);
    }

    let rows = query
        .select(MemberTeamRow::as_select())
        .load::<MemberTeamRow>(conn)?;

    Ok(rows.into_iter().map(MemberTeam::from).collect())
}

fn count_member_teams(
    conn: &mut DbConnection,
    condition: &MemberSearchCondition,
) -> RepositoryResult<i64> {
    Ok(filtered_member_teams(condition)
        .count()
        .get_result::<i64>(conn)?)
}

impl MemberReader for DieselRepository {
    fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>> {
        let mut conn = self.conn()?;
        let db_member = members::table
            .find(id.get())
            .select(DbMember::as_select())
            .first::<DbMember>(&mut conn)
            .optional()?;

        db_member
            .map(|member| Member::try_from(member).map_err(RepositoryError::from))
            .transpose()
    }

    fn list_members(&self) -> RepositoryResult<Vec<Member>> {
        let mut conn = self.conn()?;
        let db_members = members::table
            .order(members::id.asc())
            .select(DbMember::as_select())
            .load::<DbMember>(&mut conn)?;

        db_members
            .into_iter()
            .map(|member| Member::try_from(member).map_err(RepositoryError::from))
            .collect()
    }

    fn list_members_by_username(&self, username: &Username) -> RepositoryResult<Vec<Member>> {
        let mut conn = self.conn()?;
        let db_members = members::table
            .filter(members::username.eq(username.as_str()))
            .order(members::id.asc())
            .select(DbMember::as_select())
            .load::<DbMember>(&mut conn)?;

        db_members
            .into_iter()
            .map(|member| Member::try_from(member).map_err(RepositoryError::from))
            .collect()
    }

    fn search_members(
        &self,
        condition: &MemberSearchCondition,
    ) -> RepositoryResult<Vec<MemberTeam>> {
        let mut conn = self.conn()?;
        load_member_teams(&mut conn, condition, None)
    }

    fn search_members_page(
        &self,
        condition: &MemberSearchCondition,
        pageable: &Pageable,
        policy: CountPolicy,
    ) -> RepositoryResult<Page<MemberTeam>> {
        let mut conn = self.conn()?;
        // The window and the count must observe the same snapshot.
        conn.transaction(|conn| {
            fetch_page(
                conn,
                pageable,
                policy,
                |conn, offset, limit| load_member_teams(conn, condition, Some((offset, limit))),
                |conn| count_member_teams(conn, condition),
            )
        })
    }
}

impl MemberWriter for DieselRepository {
    fn create_member(&self, new_member: &NewMember) -> RepositoryResult<Member> {
        let mut conn = self.conn()?;
        let db_new_member: DbNewMember = new_member.into();

        let db_member = diesel::insert_into(members::table)
            .values(&db_new_member)
            .returning(DbMember::as_returning())
            .get_result::<DbMember>(&mut conn)?;

        Member::try_from(db_member).map_err(RepositoryError::from)
    }

    fn create_members(&self, new_members: &[NewMember]) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        let insertables: Vec<DbNewMember> = new_members.iter().map(Into::into).collect();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let affected = diesel::insert_into(members::table)
                .values(&insertables)
                .execute(conn)?;
            Ok(affected)
        })
    }

    fn change_member_team(
        &self,
        member_id: MemberId,
        team_id: Option<TeamId>,
    ) -> RepositoryResult<Member> {
        let mut conn = self.conn()?;

        let db_member = diesel::update(members::table.find(member_id.get()))
            .set(members::team_id.eq(team_id.map(TeamId::get)))
            .returning(DbMember::as_returning())
            .get_result::<DbMember>(&mut conn)?;

        Member::try_from(db_member).map_err(RepositoryError::from)
    }
}
