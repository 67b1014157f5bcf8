//! Repository integration tests.
//!
//! These need a running PostgreSQL with the schema from `schema.sql`
//! applied and `DATABASE_URL` set (a dedicated test database is assumed;
//! every test truncates all tables first). Run with:
//!
//!   cargo test -p hirelist-db -- --ignored

use deadpool_postgres::Pool;

use hirelist_db::{create_pool, CompanyRepo, DbError, JobRepo, UserRepo};
use hirelist_models::{
    CompanyFilter, CompanyPatch, JobFilter, JobPatch, NewCompany, NewJob, NewUser,
};

const TEST_BCRYPT_COST: u32 = 4;

async fn test_pool() -> Pool {
    dotenvy::dotenv().ok();
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    create_pool(&url).expect("pool")
}

async fn reset(pool: &Pool) {
    let client = pool.get().await.expect("client");
    client
        .batch_execute("TRUNCATE applications, jobs, users, companies CASCADE")
        .await
        .expect("truncate");
}

fn company(handle: &str, name: &str, employees: i32) -> NewCompany {
    NewCompany {
        handle: handle.to_string(),
        name: name.to_string(),
        description: Some(format!("Desc{employees}")),
        num_employees: Some(employees),
        logo_url: None,
    }
}

async fn seed_companies(repo: &CompanyRepo) {
    repo.create(&company("c1", "C1", 1)).await.expect("c1");
    repo.create(&company("c2", "C2", 2)).await.expect("c2");
    repo.create(&company("c3", "C3", 3)).await.expect("c3");
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn company_create_list_and_duplicate() {
    let pool = test_pool().await;
    reset(&pool).await;
    let repo = CompanyRepo::new(pool);

    seed_companies(&repo).await;
    let all = repo.list().await.expect("list");
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].handle, "c1");

    let err = repo.create(&company("c1", "Other", 9)).await.unwrap_err();
    assert!(matches!(err, DbError::Duplicate(_)));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn company_search_matches_logical_predicate() {
    let pool = test_pool().await;
    reset(&pool).await;
    let repo = CompanyRepo::new(pool);
    seed_companies(&repo).await;

    // Substring match is case-insensitive.
    let by_name = repo
        .search(&CompanyFilter {
            name: Some("c1".to_string()),
            ..Default::default()
        })
        .await
        .expect("search");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].handle, "c1");

    let in_range = repo
        .search(&CompanyFilter {
            min_employees: Some(2),
            max_employees: Some(3),
            ..Default::default()
        })
        .await
        .expect("search");
    assert_eq!(
        in_range.iter().map(|c| c.handle.as_str()).collect::<Vec<_>>(),
        vec!["c2", "c3"]
    );

    // Empty filter returns the unfiltered collection.
    let all = repo.search(&CompanyFilter::default()).await.expect("search");
    assert_eq!(all.len(), 3);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn company_partial_update_only_touches_given_fields() {
    let pool = test_pool().await;
    reset(&pool).await;
    let repo = CompanyRepo::new(pool);
    seed_companies(&repo).await;

    let updated = repo
        .update(
            "c1",
            &CompanyPatch {
                name: Some("C1 Renamed".to_string()),
                num_employees: Some(10),
                ..Default::default()
            },
        )
        .await
        .expect("update");

    assert_eq!(updated.name, "C1 Renamed");
    assert_eq!(updated.num_employees, Some(10));
    assert_eq!(updated.description.as_deref(), Some("Desc1"));

    let err = repo
        .update("missing", &CompanyPatch::default())
        .await
        .unwrap_err();
    // Empty patch fails validation before the missing handle is noticed.
    assert!(matches!(err, DbError::Validation(_)));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn job_crud_and_search() {
    let pool = test_pool().await;
    reset(&pool).await;
    let companies = CompanyRepo::new(pool.clone());
    seed_companies(&companies).await;

    let repo = JobRepo::new(pool);
    let j1 = repo
        .create(&NewJob {
            title: "Engineer".to_string(),
            salary: Some(100_000),
            equity: Some(0.05),
            company_handle: "c1".to_string(),
        })
        .await
        .expect("j1");
    repo.create(&NewJob {
        title: "Designer".to_string(),
        salary: Some(80_000),
        equity: None,
        company_handle: "c2".to_string(),
    })
    .await
    .expect("j2");

    let rich = repo
        .search(&JobFilter {
            min_salary: Some(90_000),
            ..Default::default()
        })
        .await
        .expect("search");
    assert_eq!(rich.len(), 1);
    assert_eq!(rich[0].id, j1.id);

    let by_title = repo
        .search(&JobFilter {
            title: Some("ENGIN".to_string()),
            ..Default::default()
        })
        .await
        .expect("search");
    assert_eq!(by_title.len(), 1);

    let updated = repo
        .update(
            j1.id,
            &JobPatch {
                salary: Some(120_000),
                ..Default::default()
            },
        )
        .await
        .expect("update");
    assert_eq!(updated.salary, Some(120_000));
    assert_eq!(updated.title, "Engineer");

    repo.delete(j1.id).await.expect("delete");
    let err = repo.get(j1.id).await.unwrap_err();
    assert!(matches!(err, DbError::NotFound(_)));
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn user_register_authenticate_and_apply() {
    let pool = test_pool().await;
    reset(&pool).await;
    let companies = CompanyRepo::new(pool.clone());
    seed_companies(&companies).await;
    let jobs = JobRepo::new(pool.clone());
    let job = jobs
        .create(&NewJob {
            title: "Engineer".to_string(),
            salary: Some(100_000),
            equity: None,
            company_handle: "c1".to_string(),
        })
        .await
        .expect("job");

    let repo = UserRepo::new(pool);
    let user = repo
        .register(
            &NewUser {
                username: "u1".to_string(),
                password: "password1".to_string(),
                first_name: "U1F".to_string(),
                last_name: "U1L".to_string(),
                email: "u1@example.com".to_string(),
                is_admin: false,
            },
            TEST_BCRYPT_COST,
        )
        .await
        .expect("register");
    assert!(!user.is_admin);

    let authed = repo.authenticate("u1", "password1").await.expect("auth");
    assert_eq!(authed.username, "u1");

    let err = repo.authenticate("u1", "wrong").await.unwrap_err();
    assert!(matches!(err, DbError::InvalidCredentials));
    let err = repo.authenticate("nobody", "password1").await.unwrap_err();
    assert!(matches!(err, DbError::InvalidCredentials));

    repo.apply_for_job("u1", job.id).await.expect("apply");
    let err = repo.apply_for_job("u1", job.id).await.unwrap_err();
    assert!(matches!(err, DbError::Duplicate(_)));

    let detail = repo.get("u1").await.expect("get");
    assert_eq!(detail.jobs.len(), 1);
    assert_eq!(detail.jobs[0].id, job.id);
}

#[tokio::test]
#[ignore = "requires PostgreSQL"]
async fn user_update_rehashes_password() {
    let pool = test_pool().await;
    reset(&pool).await;
    let repo = UserRepo::new(pool);

    repo.register(
        &NewUser {
            username: "u1".to_string(),
            password: "password1".to_string(),
            first_name: "U1F".to_string(),
            last_name: "U1L".to_string(),
            email: "u1@example.com".to_string(),
            is_admin: false,
        },
        TEST_BCRYPT_COST,
    )
    .await
    .expect("register");

    repo.update(
        "u1",
        &hirelist_models::UserPatch {
            password: Some("newpassword".to_string()),
            first_name: Some("New".to_string()),
            ..Default::default()
        },
        TEST_BCRYPT_COST,
    )
    .await
    .expect("update");

    let authed = repo.authenticate("u1", "newpassword").await.expect("auth");
    assert_eq!(authed.first_name, "New");
}
