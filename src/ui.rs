// UI layer: the interactive menu loop and one handler per menu action.
// Handlers gather input through `prompts`, call the `Store`, and print the
// outcome. A failing handler never ends the loop; only Exit does.

use anyhow::Result;
use dialoguer::Select;
use serde::Serialize;

use crate::db::Store;
use crate::menu::Action;
use crate::models::{NewEmployee, NewRole};
use crate::prompts::{self, Choice};
use crate::table;

/// Main interactive menu. Runs until the user picks Exit.
///
/// Errors from a single action are logged and shown, then the menu comes
/// back. An error reading the menu selection itself (for example, stdin is
/// not a terminal) is returned to the caller.
pub async fn main_menu(store: &Store) -> Result<()> {
    let items = Action::menu_items();
    loop {
        let selection = Select::new()
            .with_prompt("What would you like to do?")
            .items(&items)
            .default(0)
            .interact()?;
        let action = Action::ALL[selection];

        if action == Action::Exit {
            println!("\nThank you for using StaffSync!\n");
            break;
        }

        if let Err(e) = run(action, store).await {
            tracing::error!(action = ?action, error = %e, "Operation failed");
            println!("Error: {e:#}");
        }
    }
    Ok(())
}

/// Route one action to its handler.
pub async fn run(action: Action, store: &Store) -> Result<()> {
    match action {
        Action::ViewDepartments => show(&store.departments().await?),
        Action::ViewRoles => show(&store.roles_detailed().await?),
        Action::ViewEmployees => show(&store.employees_detailed().await?),
        Action::AddDepartment => add_department(store).await,
        Action::AddRole => add_role(store).await,
        Action::AddEmployee => add_employee(store).await,
        Action::UpdateEmployeeRole => update_employee_role(store).await,
        Action::UpdateEmployeeManager => update_employee_manager(store).await,
        Action::ViewEmployeesByManager => show(&store.employees_by_manager().await?),
        Action::ViewEmployeesByDepartment => show(&store.employees_by_department().await?),
        Action::ViewDepartmentBudget => show(&store.department_budgets().await?),
        Action::DeleteDepartment => delete_department(store).await,
        Action::DeleteRole => delete_role(store).await,
        Action::DeleteEmployee => delete_employee(store).await,
        Action::Exit => Ok(()),
    }
}

fn show<T: Serialize>(rows: &[T]) -> Result<()> {
    println!("\n{}\n", table::render(rows)?);
    Ok(())
}

async fn add_department(store: &Store) -> Result<()> {
    let name = prompts::ask_name("What is the name of the department?", "Department name")?;
    let department = store.add_department(&name).await?;
    println!("Added {} to departments", department.name);
    Ok(())
}

async fn add_role(store: &Store) -> Result<()> {
    // Fetch departments first so the list reflects what exists right now.
    let departments = prompts::department_choices(&store.departments().await?);
    if departments.is_empty() {
        println!("\nNo departments available. Add a department first.");
        return Ok(());
    }

    let title = prompts::ask_name("What is the title of the role?", "Role title")?;
    let salary = prompts::ask_salary("What is the salary for this role?")?;
    let department_id = prompts::pick("Which department does this role belong to?", &departments)?;

    let role = store
        .add_role(&NewRole {
            title,
            salary,
            department_id,
        })
        .await?;
    println!("Added {} role", role.title);
    Ok(())
}

async fn add_employee(store: &Store) -> Result<()> {
    let roles = prompts::role_choices(&store.roles().await?);
    if roles.is_empty() {
        println!("\nNo roles available. Add a role first.");
        return Ok(());
    }
    let managers = prompts::manager_choices(&store.employees().await?, None);

    let first_name = prompts::ask_name("What is the employee's first name?", "First name")?;
    let last_name = prompts::ask_name("What is the employee's last name?", "Last name")?;
    let role_id = prompts::pick("What is the employee's role?", &roles)?;
    let manager_id = prompts::pick("Who is the employee's manager?", &managers)?;

    let employee = store
        .add_employee(&NewEmployee {
            first_name,
            last_name,
            role_id: Some(role_id),
            manager_id,
        })
        .await?;
    println!("Added {} to employees", employee.full_name());
    Ok(())
}

async fn update_employee_role(store: &Store) -> Result<()> {
    let employees = prompts::employee_choices(&store.employees().await?);
    let roles = prompts::role_choices(&store.roles().await?);
    if employees.is_empty() || roles.is_empty() {
        println!("\nNeed at least one employee and one role to update a role.");
        return Ok(());
    }

    let employee_id = prompts::pick("Which employee's role do you want to update?", &employees)?;
    let role_id = prompts::pick("Which role do you want to assign to the employee?", &roles)?;

    store.update_employee_role(employee_id, role_id).await?;
    println!("Employee role updated successfully");
    Ok(())
}

async fn update_employee_manager(store: &Store) -> Result<()> {
    let rows = store.employees().await?;
    let employees = prompts::employee_choices(&rows);
    if employees.is_empty() {
        println!("\nNo employees available.");
        return Ok(());
    }

    let employee_id = prompts::pick("Which employee's manager do you want to update?", &employees)?;
    // The employee being updated is left out of the manager list.
    let managers = prompts::manager_choices(&rows, Some(employee_id));
    let manager_id = prompts::pick("Who is the new manager?", &managers)?;

    store.update_employee_manager(employee_id, manager_id).await?;
    println!("Employee manager updated successfully");
    Ok(())
}

async fn delete_department(store: &Store) -> Result<()> {
    let departments = prompts::department_choices(&store.departments().await?);
    let Some(id) = pick_for_deletion(
        "departments",
        "Which department would you like to delete?",
        &departments,
        "WARNING: This will also delete all associated roles and employees. Are you sure?",
    )?
    else {
        return Ok(());
    };

    let removed = store.delete_department(id).await?;
    println!(
        "Department deleted successfully ({} roles and {} employees removed)",
        removed.roles, removed.employees
    );
    Ok(())
}

async fn delete_role(store: &Store) -> Result<()> {
    let roles = prompts::role_detail_choices(&store.roles_detailed().await?);
    let Some(id) = pick_for_deletion(
        "roles",
        "Which role would you like to delete?",
        &roles,
        "WARNING: This will remove this role from all employees. Are you sure?",
    )?
    else {
        return Ok(());
    };

    let detached = store.delete_role(id).await?;
    println!("Role deleted successfully ({detached} employees now have no role)");
    Ok(())
}

async fn delete_employee(store: &Store) -> Result<()> {
    let employees = prompts::employee_detail_choices(&store.employees_detailed().await?);
    let Some(id) = pick_for_deletion(
        "employees",
        "Which employee would you like to delete?",
        &employees,
        "Are you sure you want to delete this employee?",
    )?
    else {
        return Ok(());
    };

    store.delete_employee(id).await?;
    println!("Employee deleted successfully");
    Ok(())
}

/// Shared flow for the three deletes: bail out on an empty list, pick a row,
/// then confirm (default "no"). Returns the id only when confirmed.
fn pick_for_deletion(
    plural: &str,
    prompt: &str,
    choices: &[Choice<i32>],
    warning: &str,
) -> Result<Option<i32>> {
    if choices.is_empty() {
        println!("\nNo {plural} available to delete.");
        return Ok(None);
    }
    let id = prompts::pick(prompt, choices)?;
    if !prompts::confirm(warning)? {
        println!("Deletion cancelled");
        return Ok(None);
    }
    Ok(Some(id))
}
