//! Sample data for local development.

use crate::domain::member::NewMember;
use crate::domain::team::{NewTeam, Team};
use crate::domain::types::{Age, TeamName, Username};
use crate::repository::{MemberReader, MemberWriter, TeamReader, TeamWriter};
use crate::services::{ServiceError, ServiceResult};

pub const SAMPLE_TEAMS: [&str; 2] = ["teamA", "teamB"];

fn find_or_create_team<R>(repo: &R, name: &str) -> ServiceResult<Team>
where
    R: TeamReader + TeamWriter + ?Sized,
{
    let name = TeamName::new(name)?;
    match repo.get_team_by_name(&name)? {
        Some(team) => Ok(team),
        None => Ok(repo.create_team(&NewTeam::new(name))?),
    }
}

/// Creates `member0..member{count-1}` aged `0..count`, alternating between
/// the sample teams.
///
/// Does nothing when any member already exists. The members are inserted in a
/// single transaction, so a failed run leaves no members behind and the next
/// run starts over. Sample teams are looked up by name and reused. Returns the
/// number of members created.
pub fn seed_sample_members<R>(repo: &R, count: usize) -> ServiceResult<usize>
where
    R: MemberReader + MemberWriter + TeamReader + TeamWriter + ?Sized,
{
    if !repo.list_members()?.is_empty() {
        log::info!("Members already present, skipping seed");
        return Ok(0);
    }

    let teams = SAMPLE_TEAMS
        .iter()
        .map(|name| find_or_create_team(repo, name))
        .collect::<ServiceResult<Vec<Team>>>()?;

    let new_members = (0..count)
        .zip(0..=i32::MAX)
        .map(|(i, age)| -> ServiceResult<NewMember> {
            let team = &teams[i % teams.len()];
            Ok(NewMember::new(
                Username::new(format!("member{i}"))?,
                Age::new(age)?,
                Some(team.id),
            ))
        })
        .collect::<ServiceResult<Vec<NewMember>>>()?;

    let created = repo.create_members(&new_members).map_err(|err| {
        log::error!("Failed to insert sample members: {err}");
        ServiceError::from(err)
    })?;

    log::info!("Seeded {created} members across {} teams", teams.len());
    Ok(created)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::domain::member::Member;
    use crate::domain::types::{MemberId, TeamId};
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;

    fn existing_member() -> Member {
        Member {
            id: MemberId::new(1).unwrap(),
            username: Username::new("someone").unwrap(),
            age: Age::new(1).unwrap(),
            team_id: None,
        }
    }

    #[test]
    fn skips_when_members_exist() {
        let mut repo = MockRepository::new();
        repo.expect_list_members()
            .returning(|| Ok(vec![existing_member()]));
        repo.expect_create_team().times(0);
        repo.expect_create_members().times(0);

        assert_eq!(seed_sample_members(&repo, 10).unwrap(), 0);
    }

    #[test]
    fn alternates_members_between_sample_teams() {
        let mut repo = MockRepository::new();
        repo.expect_list_members().returning(|| Ok(vec![]));
        repo.expect_get_team_by_name().times(2).returning(|_| Ok(None));

        let next_team_id = Arc::new(Mutex::new(0));
        repo.expect_create_team().times(2).returning(move |new_team| {
            let mut id = next_team_id.lock().unwrap();
            *id += 1;
            Ok(Team {
                id: TeamId::new(*id).unwrap(),
                name: new_team.name.clone(),
            })
        });

        let created = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&created);
        repo.expect_create_member().times(0);
        repo.expect_create_members()
            .times(1)
            .returning(move |new_members| {
                sink.lock().unwrap().extend(new_members.iter().cloned());
                Ok(new_members.len())
            });

        assert_eq!(seed_sample_members(&repo, 4).unwrap(), 4);

        let members = created.lock().unwrap();
        let summary: Vec<(&str, i32, Option<i32>)> = members
            .iter()
            .map(|m| (m.username.as_str(), m.age.get(), m.team_id.map(TeamId::get)))
            .collect();
        assert_eq!(
            summary,
            vec![
                ("member0", 0, Some(1)),
                ("member1", 1, Some(2)),
                ("member2", 2, Some(1)),
                ("member3", 3, Some(2)),
            ]
        );
    }

    #[test]
    fn failed_batch_is_reported() {
        let mut repo = MockRepository::new();
        repo.expect_list_members().returning(|| Ok(vec![]));
        repo.expect_get_team_by_name().returning(|name| {
            Ok(Some(Team {
                id: TeamId::new(1).unwrap(),
                name: name.clone(),
            }))
        });
        repo.expect_create_members()
            .returning(|_| Err(RepositoryError::ConstraintViolation("aborted".into())));

        assert!(matches!(
            seed_sample_members(&repo, 3),
            Err(ServiceError::Repository(RepositoryError::ConstraintViolation(_)))
        ));
    }
}
