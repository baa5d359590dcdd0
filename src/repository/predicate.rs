//! Optional conditions over `members LEFT JOIN teams` and their composition.
//!
//! Every condition function returns `None` when its input is absent, so a
//! search condition with nothing set composes to `None`, which means the
//! query gets no `WHERE` clause at all.

use diesel::dsl::LeftJoinQuerySource;
use diesel::prelude::*;
use diesel::sql_types::{Bool, Nullable};
use diesel::sqlite::Sqlite;

use crate::repository::MemberSearchCondition;
use crate::schema::{members, teams};

/// Rows produced by joining every member to its (optional) team.
pub type MemberTeamSource = LeftJoinQuerySource<members::table, teams::table>;

/// A single boxed filter over [`MemberTeamSource`].
///
/// Team columns are nullable on the outer side of the join, so every
/// condition is typed as a nullable boolean.
pub type BoxedCondition = Box<dyn BoxableExpression<MemberTeamSource, Sqlite, SqlType = Nullable<Bool>>>;

const LIKE_ESCAPE: char = '\\';

/// Returns the trimmed text when it has at least one non-whitespace character.
pub fn has_text(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

pub fn username_eq(username: Option<&str>) -> Option<BoxedCondition> {
    has_text(username).map(|username| -> BoxedCondition {
        Box::new(members::username.eq(username.to_string()).nullable())
    })
}

pub fn team_name_eq(team_name: Option<&str>) -> Option<BoxedCondition> {
    has_text(team_name).map(|team_name| -> BoxedCondition {
        Box::new(teams::name.nullable().eq(team_name.to_string()))
    })
}

pub fn age_goe(age: Option<i32>) -> Option<BoxedCondition> {
    age.map(|age| -> BoxedCondition { Box::new(members::age.ge(age).nullable()) })
}

pub fn age_loe(age: Option<i32>) -> Option<BoxedCondition> {
    age.map(|age| -> BoxedCondition { Box::new(members::age.le(age).nullable()) })
}

/// Case-insensitive (for ASCII) substring match on the username.
pub fn username_contains(fragment: Option<&str>) -> Option<BoxedCondition> {
    has_text(fragment).map(|fragment| -> BoxedCondition {
        let pattern = format!("%{}%", escape_like(fragment));
        Box::new(
            members::username
                .like(pattern)
                .escape(LIKE_ESCAPE)
                .nullable(),
        )
    })
}

/// Escapes `LIKE` wildcards so the fragment matches literally.
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '%' | '_') || c == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

/// ANDs together every present condition.
///
/// Returns `None` when no condition is present, including for an empty input.
/// `None` must be read as "no filter", never as "match nothing".
pub fn all_of<I>(conditions: I) -> Option<BoxedCondition>
where
    I: IntoIterator<Item = Option<BoxedCondition>>,
{
    conditions
        .into_iter()
        .flatten()
        .reduce(|acc, next| -> BoxedCondition { Box::new(acc.and(next)) })
}

/// The conditions of a member search, in a fixed order.
pub fn search_conditions(condition: &MemberSearchCondition) -> Vec<Option<BoxedCondition>> {
    vec![
        username_eq(condition.username.as_deref()),
        team_name_eq(condition.team_name.as_deref()),
        age_goe(condition.age_goe),
        age_loe(condition.age_loe),
        username_contains(condition.username_contains.as_deref()),
    ]
}

/// Composes the full filter of a member search.
pub fn search_predicate(condition: &MemberSearchCondition) -> Option<BoxedCondition> {
    all_of(search_conditions(condition))
}
