//! Domain models for members and the member/team search projection.

use serde::{Deserialize, Serialize};

use crate::domain::types::{Age, MemberId, TeamId, Username};

/// A member as stored. The team is referenced by id only.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub id: MemberId,
    pub username: Username,
    pub age: Age,
    pub team_id: Option<TeamId>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewMember {
    pub username: Username,
    pub age: Age,
    pub team_id: Option<TeamId>,
}

impl NewMember {
    #[must_use]
    pub fn new(username: Username, age: Age, team_id: Option<TeamId>) -> Self {
        Self {
            username,
            age,
            team_id,
        }
    }
}

/// Flat row produced by the member search: a member joined with its team.
///
/// `team_id` and `team_name` are empty for members without a team, since the
/// search uses a left outer join.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MemberTeam {
    pub member_id: i32,
    pub username: String,
    pub age: i32,
    pub team_id: Option<i32>,
    pub team_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn member_team_serializes_disambiguated_ids() {
        let row = MemberTeam {
            member_id: 1,
            username: "member1".into(),
            age: 10,
            team_id: Some(2),
            team_name: Some("teamA".into()),
        };

        let value = serde_json::to_value(&row).expect("serializable row");

        assert_eq!(value["memberId"], 1);
        assert_eq!(value["teamId"], 2);
        assert_eq!(value["teamName"], "teamA");
        assert!(value.get("id").is_none());
    }
}
