// Data access module: a small handle around the PostgreSQL pool that
// knows every query the tool runs. Handlers receive a `&Store` instead of
// reaching for a global connection.

use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Executor;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{
    Department, DepartmentBudget, DepartmentGroup, DepartmentRemoval, Employee, EmployeeDetail,
    ManagerGroup, NewEmployee, NewRole, Role, RoleDetail,
};
use crate::validate;

/// Data-access handle. Cheap to clone; all clones share the same pool.
#[derive(Clone, Debug)]
pub struct Store {
    pool: PgPool,
}

impl Store {
    /// Connect using `config`. Fails when the database is unreachable, which
    /// is the one error the binary treats as fatal.
    pub async fn connect(config: &Config) -> Result<Self> {
        let mut options = PgPoolOptions::new().max_connections(config.max_connections);

        if let Some(schema) = &config.schema {
            // `Config` only accepts plain identifiers here, so no quoting needed.
            let statement = format!("SET search_path TO {schema}");
            options = options.after_connect(move |conn, _meta| {
                let statement = statement.clone();
                Box::pin(async move {
                    conn.execute(statement.as_str()).await?;
                    Ok(())
                })
            });
        }

        let pool = options.connect_with(config.connect_options()).await?;
        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "Connected to data store"
        );
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Close every pooled connection. Called once when the menu loop ends.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ---- Departments -------------------------------------------------

    pub async fn departments(&self) -> Result<Vec<Department>> {
        let rows = sqlx::query_as::<_, Department>("SELECT id, name FROM department ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn add_department(&self, name: &str) -> Result<Department> {
        validate::name("Department name", name).map_err(Error::Validation)?;
        let department = sqlx::query_as::<_, Department>(
            "INSERT INTO department (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name.trim())
        .fetch_one(&self.pool)
        .await?;
        tracing::info!(department_id = department.id, "Added department");
        Ok(department)
    }

    /// Delete a department together with its roles and the employees holding
    /// those roles. Anyone reporting to a removed employee loses their manager
    /// rather than being removed too. Runs in one transaction.
    pub async fn delete_department(&self, id: i32) -> Result<DepartmentRemoval> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<i32> =
            sqlx::query_scalar("SELECT id FROM department WHERE id = $1 FOR UPDATE")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Err(Error::not_found("department", id));
        }

        sqlx::query(
            "UPDATE employee SET manager_id = NULL
            WHERE manager_id IN (
                SELECT e.id FROM employee e
                JOIN role r ON e.role_id = r.id
                WHERE r.department_id = $1
            )",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let employees = sqlx::query(
            "DELETE FROM employee
            WHERE role_id IN (SELECT id FROM role WHERE department_id = $1)",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

        let roles = sqlx::query("DELETE FROM role WHERE department_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM department WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        tracing::info!(department_id = id, roles, employees, "Deleted department");
        Ok(DepartmentRemoval { roles, employees })
    }

    // ---- Roles -------------------------------------------------------

    pub async fn roles(&self) -> Result<Vec<Role>> {
        let rows = sqlx::query_as::<_, Role>(
            "SELECT id, title, salary, department_id FROM role ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Roles with their department name in place of the id.
    pub async fn roles_detailed(&self) -> Result<Vec<RoleDetail>> {
        let rows = sqlx::query_as::<_, RoleDetail>(
            "SELECT r.id, r.title, d.name AS department, r.salary
            FROM role r
            LEFT JOIN department d ON r.department_id = d.id
            ORDER BY r.id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert a role. A `department_id` that does not exist comes back as a
    /// foreign-key violation inside `Error::Db`.
    pub async fn add_role(&self, role: &NewRole) -> Result<Role> {
        validate::name("Role title", &role.title).map_err(Error::Validation)?;
        validate::non_negative(role.salary).map_err(Error::Validation)?;
        let created = sqlx::query_as::<_, Role>(
            "INSERT INTO role (title, salary, department_id) VALUES ($1, $2, $3)
            RETURNING id, title, salary, department_id",
        )
        .bind(role.title.trim())
        .bind(role.salary)
        .bind(role.department_id)
        .fetch_one(&self.pool)
        .await?;
        tracing::info!(
            role_id = created.id,
            department_id = role.department_id,
            "Added role"
        );
        Ok(created)
    }

    /// Delete a role. Employees holding it stay, with no role. Returns how
    /// many employees were detached.
    pub async fn delete_role(&self, id: i32) -> Result<u64> {
        let mut tx = self.pool.begin().await?;

        let detached = sqlx::query("UPDATE employee SET role_id = NULL WHERE role_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        let deleted = sqlx::query("DELETE FROM role WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(Error::not_found("role", id));
        }

        tx.commit().await?;
        tracing::info!(role_id = id, detached, "Deleted role");
        Ok(detached)
    }

    // ---- Employees ---------------------------------------------------

    pub async fn employees(&self) -> Result<Vec<Employee>> {
        let rows = sqlx::query_as::<_, Employee>(
            "SELECT id, first_name, last_name, role_id, manager_id FROM employee ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Employees with title, department, salary and manager name resolved.
    pub async fn employees_detailed(&self) -> Result<Vec<EmployeeDetail>> {
        let rows = sqlx::query_as::<_, EmployeeDetail>(
            "SELECT
                e.id,
                e.first_name,
                e.last_name,
                r.title,
                d.name AS department,
                r.salary,
                m.first_name || ' ' || m.last_name AS manager
            FROM employee e
            LEFT JOIN role r ON e.role_id = r.id
            LEFT JOIN department d ON r.department_id = d.id
            LEFT JOIN employee m ON e.manager_id = m.id
            ORDER BY e.id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn add_employee(&self, employee: &NewEmployee) -> Result<Employee> {
        validate::name("First name", &employee.first_name).map_err(Error::Validation)?;
        validate::name("Last name", &employee.last_name).map_err(Error::Validation)?;
        let created = sqlx::query_as::<_, Employee>(
            "INSERT INTO employee (first_name, last_name, role_id, manager_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, first_name, last_name, role_id, manager_id",
        )
        .bind(employee.first_name.trim())
        .bind(employee.last_name.trim())
        .bind(employee.role_id)
        .bind(employee.manager_id)
        .fetch_one(&self.pool)
        .await?;
        tracing::info!(employee_id = created.id, "Added employee");
        Ok(created)
    }

    pub async fn update_employee_role(&self, employee_id: i32, role_id: i32) -> Result<Employee> {
        let updated = sqlx::query_as::<_, Employee>(
            "UPDATE employee SET role_id = $1 WHERE id = $2
            RETURNING id, first_name, last_name, role_id, manager_id",
        )
        .bind(role_id)
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("employee", employee_id))?;
        tracing::info!(employee_id, role_id, "Updated employee role");
        Ok(updated)
    }

    /// Set or clear an employee's manager. Pointing an employee at themselves
    /// is rejected before the query runs.
    pub async fn update_employee_manager(
        &self,
        employee_id: i32,
        manager_id: Option<i32>,
    ) -> Result<Employee> {
        if manager_id == Some(employee_id) {
            return Err(Error::SelfManager);
        }
        let updated = sqlx::query_as::<_, Employee>(
            "UPDATE employee SET manager_id = $1 WHERE id = $2
            RETURNING id, first_name, last_name, role_id, manager_id",
        )
        .bind(manager_id)
        .bind(employee_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| Error::not_found("employee", employee_id))?;
        tracing::info!(employee_id, ?manager_id, "Updated employee manager");
        Ok(updated)
    }

    /// Delete an employee. Their direct reports are left without a manager.
    pub async fn delete_employee(&self, id: i32) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("UPDATE employee SET manager_id = NULL WHERE manager_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM employee WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();
        if deleted == 0 {
            return Err(Error::not_found("employee", id));
        }

        tx.commit().await?;
        tracing::info!(employee_id = id, "Deleted employee");
        Ok(())
    }

    // ---- Aggregates --------------------------------------------------

    /// Employees grouped under their manager. Employees without a manager
    /// are not listed.
    pub async fn employees_by_manager(&self) -> Result<Vec<ManagerGroup>> {
        let rows = sqlx::query_as::<_, ManagerGroup>(
            "SELECT
                m.first_name || ' ' || m.last_name AS manager,
                STRING_AGG(e.first_name || ' ' || e.last_name, ', ' ORDER BY e.id) AS employees,
                COUNT(*) AS employee_count
            FROM employee e
            JOIN employee m ON e.manager_id = m.id
            GROUP BY m.id, m.first_name, m.last_name
            ORDER BY m.first_name, m.last_name, m.id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Employees grouped by the department of their role. Employees without
    /// a role, and departments without employees, are not listed.
    pub async fn employees_by_department(&self) -> Result<Vec<DepartmentGroup>> {
        let rows = sqlx::query_as::<_, DepartmentGroup>(
            "SELECT
                d.name AS department,
                STRING_AGG(e.first_name || ' ' || e.last_name, ', ' ORDER BY e.id) AS employees,
                COUNT(*) AS employee_count
            FROM employee e
            JOIN role r ON e.role_id = r.id
            JOIN department d ON r.department_id = d.id
            GROUP BY d.id, d.name
            ORDER BY d.name, d.id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Head count and salary total per department. Each employee contributes
    /// their role's salary once; departments with nobody in them report zero.
    pub async fn department_budgets(&self) -> Result<Vec<DepartmentBudget>> {
        let rows = sqlx::query_as::<_, DepartmentBudget>(
            "SELECT
                d.name AS department,
                COUNT(e.id) AS employee_count,
                COALESCE(SUM(r.salary) FILTER (WHERE e.id IS NOT NULL), 0) AS total_budget
            FROM department d
            LEFT JOIN role r ON r.department_id = d.id
            LEFT JOIN employee e ON e.role_id = r.id
            GROUP BY d.id, d.name
            ORDER BY total_budget DESC, d.name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
