#![allow(dead_code)]

use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use member_search::db::{DbPool, establish_connection_pool};
use member_search::domain::member::NewMember;
use member_search::domain::team::{NewTeam, Team};
use member_search::domain::types::{Age, TeamName, Username};
use member_search::models::config::DatabaseConfig;
use member_search::repository::{DieselRepository, MemberWriter, TeamWriter};
use tempfile::TempDir;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// A migrated SQLite database living in its own temporary directory.
///
/// The directory and database files are removed when the value is dropped.
pub struct TestDb {
    pool: DbPool,
    _dir: TempDir,
}

impl TestDb {
    pub fn new(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("temporary directory");
        let url = dir.path().join(name).to_string_lossy().into_owned();
        let config = DatabaseConfig {
            url,
            enable_wal: true,
            enable_foreign_keys: true,
            busy_timeout_ms: Some(5_000),
        };
        let pool = establish_connection_pool(&config).expect("connection pool");

        let mut conn = pool.get().expect("pooled connection");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("migrations applied");

        Self { pool, _dir: dir }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.pool())
    }
}

pub fn create_team(repo: &DieselRepository, name: &str) -> Team {
    repo.create_team(&NewTeam::new(TeamName::new(name).unwrap()))
        .expect("team created")
}

pub fn create_member(repo: &DieselRepository, username: &str, age: i32, team: Option<&Team>) {
    let new_member = NewMember::new(
        Username::new(username).unwrap(),
        Age::new(age).unwrap(),
        team.map(|team| team.id),
    );
    repo.create_member(&new_member).expect("member created");
}

/// Two teams and four members:
/// `member1` (10) and `member2` (20) in `teamA`,
/// `member3` (30) and `member4` (40) in `teamB`.
pub fn seed_four_members(repo: &DieselRepository) -> (Team, Team) {
    let team_a = create_team(repo, "teamA");
    let team_b = create_team(repo, "teamB");
    create_member(repo, "member1", 10, Some(&team_a));
    create_member(repo, "member2", 20, Some(&team_a));
    create_member(repo, "member3", 30, Some(&team_b));
    create_member(repo, "member4", 40, Some(&team_b));
    (team_a, team_b)
}
