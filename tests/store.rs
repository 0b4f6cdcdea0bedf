//! Integration tests for the `Store` against a real PostgreSQL server.
//!
//! They only run when `STAFFSYNC_INTEGRATION` is set; connection settings
//! come from the usual `DB_*` variables (or `.env`). Each test works in a
//! throwaway schema created from `db/schema.sql` and dropped afterwards.

use rust_decimal::Decimal;
use staffsync::config::Config;
use staffsync::db::Store;
use staffsync::models::{DepartmentBudget, DepartmentGroup, ManagerGroup, NewEmployee, NewRole};
use staffsync::Error;

const SCHEMA_SQL: &str = include_str!("../db/schema.sql");

struct Scratch {
    store: Store,
    schema: String,
}

impl Scratch {
    async fn finish(self) {
        sqlx::raw_sql(&format!("DROP SCHEMA {} CASCADE", self.schema))
            .execute(self.store.pool())
            .await
            .unwrap();
        self.store.close().await;
    }
}

async fn scratch() -> Option<Scratch> {
    if std::env::var_os("STAFFSYNC_INTEGRATION").is_none() {
        eprintln!("STAFFSYNC_INTEGRATION is not set, skipping database test");
        return None;
    }
    let _ = dotenvy::dotenv();

    let schema = format!("staffsync_test_{}", uuid::Uuid::new_v4().simple());
    let mut config = Config::from_env().unwrap();
    config.schema = Some(schema.clone());
    config.max_connections = 1;

    let store = Store::connect(&config).await.unwrap();
    sqlx::raw_sql(&format!("CREATE SCHEMA {schema}"))
        .execute(store.pool())
        .await
        .unwrap();
    sqlx::raw_sql(SCHEMA_SQL)
        .execute(store.pool())
        .await
        .unwrap();
    Some(Scratch { store, schema })
}

fn dollars(amount: i64) -> Decimal {
    Decimal::new(amount, 0)
}

fn new_role(title: &str, salary: i64, department_id: i32) -> NewRole {
    NewRole {
        title: title.into(),
        salary: dollars(salary),
        department_id,
    }
}

fn new_employee(first: &str, last: &str, role_id: i32, manager_id: Option<i32>) -> NewEmployee {
    NewEmployee {
        first_name: first.into(),
        last_name: last.into(),
        role_id: Some(role_id),
        manager_id,
    }
}

#[tokio::test]
async fn test_added_department_is_listed_once() {
    let Some(db) = scratch().await else { return };
    let store = &db.store;

    let added = store.add_department("  Engineering ").await.unwrap();
    assert_eq!(added.name, "Engineering");
    store.add_department("Sales").await.unwrap();

    let departments = store.departments().await.unwrap();
    assert_eq!(departments.len(), 2);
    assert_eq!(
        departments
            .iter()
            .filter(|d| d.name == "Engineering")
            .count(),
        1
    );

    db.finish().await;
}

#[tokio::test]
async fn test_role_with_missing_department_is_rejected() {
    let Some(db) = scratch().await else { return };
    let store = &db.store;

    let err = store
        .add_role(&new_role("Ghost", 1000, 4242))
        .await
        .unwrap_err();
    match err {
        Error::Db(sqlx::Error::Database(db_err)) => assert!(db_err.is_foreign_key_violation()),
        other => panic!("expected a foreign-key violation, got {other:?}"),
    }
    assert!(store.roles().await.unwrap().is_empty());

    db.finish().await;
}

#[tokio::test]
async fn test_employee_cannot_manage_themselves() {
    let Some(db) = scratch().await else { return };
    let store = &db.store;

    let dept = store.add_department("Engineering").await.unwrap();
    let role = store.add_role(&new_role("Engineer", 80000, dept.id)).await.unwrap();
    let ada = store
        .add_employee(&new_employee("Ada", "Lovelace", role.id, None))
        .await
        .unwrap();
    let alan = store
        .add_employee(&new_employee("Alan", "Turing", role.id, None))
        .await
        .unwrap();

    let err = store
        .update_employee_manager(ada.id, Some(ada.id))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::SelfManager));

    let updated = store
        .update_employee_manager(alan.id, Some(ada.id))
        .await
        .unwrap();
    assert_eq!(updated.manager_id, Some(ada.id));

    let cleared = store.update_employee_manager(alan.id, None).await.unwrap();
    assert_eq!(cleared.manager_id, None);

    let employees = store.employees().await.unwrap();
    assert!(employees.iter().all(|e| e.manager_id != Some(e.id)));

    db.finish().await;
}

#[tokio::test]
async fn test_deleting_department_cascades_to_roles_and_employees() {
    let Some(db) = scratch().await else { return };
    let store = &db.store;

    let engineering = store.add_department("Engineering").await.unwrap();
    let sales = store.add_department("Sales").await.unwrap();
    let lead = store.add_role(&new_role("Lead", 120000, engineering.id)).await.unwrap();
    let engineer = store.add_role(&new_role("Engineer", 80000, engineering.id)).await.unwrap();
    let rep = store.add_role(&new_role("Rep", 50000, sales.id)).await.unwrap();

    let boss = store
        .add_employee(&new_employee("Grace", "Hopper", lead.id, None))
        .await
        .unwrap();
    store
        .add_employee(&new_employee("Ada", "Lovelace", engineer.id, Some(boss.id)))
        .await
        .unwrap();
    // Reports across departments: survives, but loses the manager.
    let sam = store
        .add_employee(&new_employee("Sam", "Seller", rep.id, Some(boss.id)))
        .await
        .unwrap();

    let removed = store.delete_department(engineering.id).await.unwrap();
    assert_eq!(removed.roles, 2);
    assert_eq!(removed.employees, 2);

    let departments = store.departments().await.unwrap();
    assert_eq!(departments.len(), 1);
    assert_eq!(departments[0].id, sales.id);

    let roles = store.roles().await.unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].id, rep.id);

    let employees = store.employees().await.unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].id, sam.id);
    assert_eq!(employees[0].manager_id, None);

    db.finish().await;
}

#[tokio::test]
async fn test_delete_missing_rows_reports_not_found() {
    let Some(db) = scratch().await else { return };
    let store = &db.store;

    assert!(matches!(
        store.delete_department(999).await.unwrap_err(),
        Error::NotFound { entity: "department", id: 999 }
    ));
    assert!(matches!(
        store.delete_role(999).await.unwrap_err(),
        Error::NotFound { entity: "role", id: 999 }
    ));
    assert!(matches!(
        store.delete_employee(999).await.unwrap_err(),
        Error::NotFound { entity: "employee", id: 999 }
    ));

    let dept = store.add_department("Engineering").await.unwrap();
    let role = store.add_role(&new_role("Engineer", 80000, dept.id)).await.unwrap();
    assert!(matches!(
        store.update_employee_role(999, role.id).await.unwrap_err(),
        Error::NotFound { entity: "employee", id: 999 }
    ));

    db.finish().await;
}

#[tokio::test]
async fn test_deleting_role_detaches_employees() {
    let Some(db) = scratch().await else { return };
    let store = &db.store;

    let dept = store.add_department("Engineering").await.unwrap();
    let role = store.add_role(&new_role("Engineer", 80000, dept.id)).await.unwrap();
    let ada = store
        .add_employee(&new_employee("Ada", "Lovelace", role.id, None))
        .await
        .unwrap();

    assert_eq!(store.delete_role(role.id).await.unwrap(), 1);
    assert!(store.roles().await.unwrap().is_empty());

    let employees = store.employees_detailed().await.unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].id, ada.id);
    assert_eq!(employees[0].title, None);
    assert_eq!(employees[0].salary, None);

    db.finish().await;
}

#[tokio::test]
async fn test_deleting_employee_clears_their_reports() {
    let Some(db) = scratch().await else { return };
    let store = &db.store;

    let dept = store.add_department("Engineering").await.unwrap();
    let role = store.add_role(&new_role("Engineer", 80000, dept.id)).await.unwrap();
    let ada = store
        .add_employee(&new_employee("Ada", "Lovelace", role.id, None))
        .await
        .unwrap();
    let alan = store
        .add_employee(&new_employee("Alan", "Turing", role.id, Some(ada.id)))
        .await
        .unwrap();

    store.delete_employee(ada.id).await.unwrap();

    let employees = store.employees().await.unwrap();
    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].id, alan.id);
    assert_eq!(employees[0].manager_id, None);

    db.finish().await;
}

#[tokio::test]
async fn test_update_employee_role() {
    let Some(db) = scratch().await else { return };
    let store = &db.store;

    let dept = store.add_department("Engineering").await.unwrap();
    let junior = store.add_role(&new_role("Engineer", 80000, dept.id)).await.unwrap();
    let senior = store.add_role(&new_role("Staff Engineer", 140000, dept.id)).await.unwrap();
    let ada = store
        .add_employee(&new_employee("Ada", "Lovelace", junior.id, None))
        .await
        .unwrap();

    let updated = store.update_employee_role(ada.id, senior.id).await.unwrap();
    assert_eq!(updated.role_id, Some(senior.id));

    let detailed = store.employees_detailed().await.unwrap();
    assert_eq!(detailed[0].title.as_deref(), Some("Staff Engineer"));
    assert_eq!(detailed[0].salary, Some(dollars(140000)));

    db.finish().await;
}

#[tokio::test]
async fn test_department_budgets_include_empty_departments() {
    let Some(db) = scratch().await else { return };
    let store = &db.store;

    let engineering = store.add_department("Engineering").await.unwrap();
    let hr = store.add_department("HR").await.unwrap();
    store.add_department("Empty").await.unwrap();

    let engineer = store.add_role(&new_role("Engineer", 80000, engineering.id)).await.unwrap();
    // Nobody holds these two, so they add nothing to the budget.
    store.add_role(&new_role("Architect", 200000, engineering.id)).await.unwrap();
    store.add_role(&new_role("Recruiter", 60000, hr.id)).await.unwrap();

    store
        .add_employee(&new_employee("Ada", "Lovelace", engineer.id, None))
        .await
        .unwrap();
    store
        .add_employee(&new_employee("Alan", "Turing", engineer.id, None))
        .await
        .unwrap();

    let budgets = store.department_budgets().await.unwrap();
    assert_eq!(
        budgets,
        vec![
            DepartmentBudget {
                department: "Engineering".into(),
                employee_count: 2,
                total_budget: dollars(160000),
            },
            DepartmentBudget {
                department: "Empty".into(),
                employee_count: 0,
                total_budget: Decimal::ZERO,
            },
            DepartmentBudget {
                department: "HR".into(),
                employee_count: 0,
                total_budget: Decimal::ZERO,
            },
        ]
    );

    db.finish().await;
}

#[tokio::test]
async fn test_grouping_by_manager_and_department() {
    let Some(db) = scratch().await else { return };
    let store = &db.store;

    let engineering = store.add_department("Engineering").await.unwrap();
    let research = store.add_department("Research").await.unwrap();
    let engineer = store.add_role(&new_role("Engineer", 80000, engineering.id)).await.unwrap();
    let scientist = store.add_role(&new_role("Scientist", 90000, research.id)).await.unwrap();

    let ada = store
        .add_employee(&new_employee("Ada", "Lovelace", scientist.id, None))
        .await
        .unwrap();
    store
        .add_employee(&new_employee("Alan", "Turing", engineer.id, Some(ada.id)))
        .await
        .unwrap();
    store
        .add_employee(&new_employee("Grace", "Hopper", engineer.id, Some(ada.id)))
        .await
        .unwrap();

    let by_manager = store.employees_by_manager().await.unwrap();
    assert_eq!(
        by_manager,
        vec![ManagerGroup {
            manager: "Ada Lovelace".into(),
            employees: "Alan Turing, Grace Hopper".into(),
            employee_count: 2,
        }]
    );

    let by_department = store.employees_by_department().await.unwrap();
    assert_eq!(
        by_department,
        vec![
            DepartmentGroup {
                department: "Engineering".into(),
                employees: "Alan Turing, Grace Hopper".into(),
                employee_count: 2,
            },
            DepartmentGroup {
                department: "Research".into(),
                employees: "Ada Lovelace".into(),
                employee_count: 1,
            },
        ]
    );

    db.finish().await;
}

#[tokio::test]
async fn test_engineering_walkthrough() {
    let Some(db) = scratch().await else { return };
    let store = &db.store;

    let engineering = store.add_department("Engineering").await.unwrap();
    let engineer = store.add_role(&new_role("Engineer", 80000, engineering.id)).await.unwrap();
    store
        .add_employee(&new_employee("Ada", "Lovelace", engineer.id, None))
        .await
        .unwrap();

    let roles = store.roles_detailed().await.unwrap();
    assert_eq!(roles.len(), 1);
    assert_eq!(roles[0].department.as_deref(), Some("Engineering"));

    let employees = store.employees_detailed().await.unwrap();
    assert_eq!(employees.len(), 1);
    let ada = &employees[0];
    assert_eq!(ada.first_name, "Ada");
    assert_eq!(ada.last_name, "Lovelace");
    assert_eq!(ada.title.as_deref(), Some("Engineer"));
    assert_eq!(ada.department.as_deref(), Some("Engineering"));
    assert_eq!(ada.salary, Some(dollars(80000)));
    assert_eq!(ada.manager, None);

    let rendered = staffsync::table::render(&employees).unwrap();
    assert!(rendered.contains("$80,000.00"));

    db.finish().await;
}
