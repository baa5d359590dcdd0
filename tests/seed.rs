use diesel::connection::SimpleConnection;
use member_search::domain::types::TeamName;
use member_search::repository::{MemberReader, MemberSearchCondition, TeamReader};
use member_search::services::seed::{SAMPLE_TEAMS, seed_sample_members};

mod common;

#[test]
fn test_seed_is_idempotent() {
    let test_db = common::TestDb::new("test_seed_is_idempotent.db");
    let repo = test_db.repo();

    assert_eq!(seed_sample_members(&repo, 6).unwrap(), 6);
    assert_eq!(seed_sample_members(&repo, 6).unwrap(), 0);
    assert_eq!(repo.list_members().unwrap().len(), 6);

    for name in SAMPLE_TEAMS {
        let team = repo
            .get_team_by_name(&TeamName::new(name).unwrap())
            .unwrap();
        assert!(team.is_some(), "{name}");
    }

    let team_a = repo
        .search_members(&MemberSearchCondition::new().team_name("teamA"))
        .unwrap();
    assert_eq!(team_a.len(), 3);
}

#[test]
fn test_failed_seed_leaves_no_members() {
    let test_db = common::TestDb::new("test_failed_seed_leaves_no_members.db");
    let repo = test_db.repo();
    let mut conn = test_db.pool().get().unwrap();
    conn.batch_execute(
        "CREATE TRIGGER reject_member2 BEFORE INSERT ON members \
         WHEN NEW.username = 'member2' \
         BEGIN SELECT RAISE(ABORT, 'member2 rejected'); END;",
    )
    .unwrap();

    assert!(seed_sample_members(&repo, 6).is_err());
    assert!(repo.list_members().unwrap().is_empty());

    conn.batch_execute("DROP TRIGGER reject_member2;").unwrap();

    assert_eq!(seed_sample_members(&repo, 6).unwrap(), 6);
    assert_eq!(repo.list_members().unwrap().len(), 6);
    for name in SAMPLE_TEAMS {
        let team = repo
            .get_team_by_name(&TeamName::new(name).unwrap())
            .unwrap();
        assert!(team.is_some(), "{name}");
    }
}
