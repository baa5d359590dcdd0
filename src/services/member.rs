//! Member search services.

use validator::Validate;

use crate::domain::member::MemberTeam;
use crate::forms::FormError;
use crate::forms::search::MemberSearchForm;
use crate::pagination::{CountPolicy, Page};
use crate::repository::MemberReader;
use crate::services::{ServiceError, ServiceResult};

fn validate_form(form: &MemberSearchForm) -> ServiceResult<()> {
    form.validate().map_err(|err| {
        log::error!("Failed to validate search form: {err}");
        ServiceError::from(FormError::from(err))
    })
}

/// Returns every member matching the form, joined with its team.
pub fn search_members<R>(repo: &R, form: &MemberSearchForm) -> ServiceResult<Vec<MemberTeam>>
where
    R: MemberReader + ?Sized,
{
    validate_form(form)?;

    repo.search_members(&form.to_condition()).map_err(|err| {
        log::error!("Failed to search members: {err}");
        ServiceError::from(err)
    })
}

/// Returns the requested page of matching members.
pub fn search_members_page<R>(
    repo: &R,
    form: &MemberSearchForm,
    policy: CountPolicy,
) -> ServiceResult<Page<MemberTeam>>
where
    R: MemberReader + ?Sized,
{
    validate_form(form)?;

    let pageable = form.pageable()?;

    repo.search_members_page(&form.to_condition(), &pageable, policy)
        .map_err(|err| {
            log::error!("Failed to load member page: {err}");
            ServiceError::from(err)
        })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use mockall::predicate::eq;

    use super::*;
    use crate::pagination::TotalSource;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::repository::{MemberSearchCondition, MemberSort};

    fn row(id: i32, username: &str, age: i32) -> MemberTeam {
        MemberTeam {
            member_id: id,
            username: username.to_string(),
            age,
            team_id: Some(1),
            team_name: Some("teamA".to_string()),
        }
    }

    #[test]
    fn search_passes_condition_to_repository() {
        let mut repo = MockRepository::new();
        let expected = MemberSearchCondition::new()
            .team_name("teamA")
            .age_goe(10);
        repo.expect_search_members()
            .with(eq(expected))
            .times(1)
            .returning(|_| Ok(vec![row(1, "member1", 10)]));

        let form = MemberSearchForm {
            team_name: Some("teamA".into()),
            age_goe: Some(10),
            ..MemberSearchForm::default()
        };

        let rows = search_members(&repo, &form).expect("search succeeds");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].username, "member1");
    }

    #[test]
    fn invalid_form_never_reaches_repository() {
        let mut repo = MockRepository::new();
        repo.expect_search_members().times(0);
        repo.expect_search_members_page().times(0);

        let form = MemberSearchForm {
            age_loe: Some(-5),
            ..MemberSearchForm::default()
        };

        assert!(matches!(
            search_members(&repo, &form),
            Err(ServiceError::Form(_))
        ));
        assert!(matches!(
            search_members_page(&repo, &form, CountPolicy::Elide),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let mut repo = MockRepository::new();
        repo.expect_search_members_page().times(0);

        let form = MemberSearchForm {
            size: Some(0),
            ..MemberSearchForm::default()
        };

        for policy in [CountPolicy::Always, CountPolicy::Elide] {
            assert!(matches!(
                search_members_page(&repo, &form, policy),
                Err(ServiceError::Form(_))
            ));
        }
    }

    #[test]
    fn page_request_uses_form_window_and_policy() {
        let mut repo = MockRepository::new();
        repo.expect_search_members_page()
            .withf(|condition, pageable, policy| {
                condition.sort == MemberSort::UsernameAsc
                    && pageable.offset() == 2
                    && pageable.limit() == 2
                    && *policy == CountPolicy::Always
            })
            .times(1)
            .returning(|_, pageable, _| {
                Ok(Page {
                    items: vec![row(3, "member3", 30)],
                    offset: pageable.offset(),
                    limit: pageable.limit(),
                    total: 3,
                    total_source: TotalSource::Counted,
                })
            });

        let form = MemberSearchForm {
            sort: MemberSort::UsernameAsc,
            page: Some(2),
            size: Some(2),
            ..MemberSearchForm::default()
        };

        let page = search_members_page(&repo, &form, CountPolicy::Always).expect("page loads");
        assert_eq!(page.total, 3);
        assert!(!page.has_next());
    }

    #[test]
    fn store_errors_are_passed_through() {
        let mut repo = MockRepository::new();
        repo.expect_search_members()
            .returning(|_| Err(RepositoryError::ConnectionError("pool timed out".into())));

        let result = search_members(&repo, &MemberSearchForm::default());

        assert!(matches!(
            result,
            Err(ServiceError::Repository(RepositoryError::ConnectionError(msg))) if msg == "pool timed out"
        ));
    }
}
