// Prompt helpers built on `dialoguer`. The choice builders are plain
// functions over rows so they can be tested without a terminal; the
// `ask_*`/`pick`/`confirm` wrappers are the only parts that block on input.

use anyhow::Result;
use dialoguer::{Confirm, Input, Select};
use rust_decimal::Decimal;
use std::fmt;

use crate::models::{Department, Employee, EmployeeDetail, Role, RoleDetail};
use crate::validate;

/// One entry in a selection list: what the user sees and what it stands for.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice<T> {
    pub label: String,
    pub value: T,
}

impl<T> Choice<T> {
    pub fn new(label: impl Into<String>, value: T) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

impl<T> fmt::Display for Choice<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

pub fn department_choices(departments: &[Department]) -> Vec<Choice<i32>> {
    departments
        .iter()
        .map(|d| Choice::new(d.name.clone(), d.id))
        .collect()
}

pub fn role_choices(roles: &[Role]) -> Vec<Choice<i32>> {
    roles
        .iter()
        .map(|r| Choice::new(r.title.clone(), r.id))
        .collect()
}

pub fn employee_choices(employees: &[Employee]) -> Vec<Choice<i32>> {
    employees
        .iter()
        .map(|e| Choice::new(e.full_name(), e.id))
        .collect()
}

/// "None" first, then every employee except `exclude` (the employee whose
/// manager is being chosen).
pub fn manager_choices(employees: &[Employee], exclude: Option<i32>) -> Vec<Choice<Option<i32>>> {
    std::iter::once(Choice::new("None", None))
        .chain(
            employees
                .iter()
                .filter(|e| Some(e.id) != exclude)
                .map(|e| Choice::new(e.full_name(), Some(e.id))),
        )
        .collect()
}

/// Role list for deletion: "Title (Department)".
pub fn role_detail_choices(roles: &[RoleDetail]) -> Vec<Choice<i32>> {
    roles
        .iter()
        .map(|r| {
            let department = r.department.as_deref().unwrap_or("no department");
            Choice::new(format!("{} ({})", r.title, department), r.id)
        })
        .collect()
}

/// Employee list for deletion: "First Last - Title (Department)".
pub fn employee_detail_choices(employees: &[EmployeeDetail]) -> Vec<Choice<i32>> {
    employees
        .iter()
        .map(|e| {
            let title = e.title.as_deref().unwrap_or("no role");
            let department = e.department.as_deref().unwrap_or("no department");
            Choice::new(
                format!("{} {} - {} ({})", e.first_name, e.last_name, title, department),
                e.id,
            )
        })
        .collect()
}

/// Ask for a name-like field, re-prompting until it passes validation.
pub fn ask_name(prompt: &str, label: &str) -> Result<String> {
    let value = Input::<String>::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| validate::name(label, input))
        .interact_text()?;
    Ok(value.trim().to_string())
}

pub fn ask_salary(prompt: &str) -> Result<Decimal> {
    let raw = Input::<String>::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| validate::salary(input))
        .interact_text()?;
    validate::parse_salary(&raw).map_err(anyhow::Error::msg)
}

/// Show `choices` and return the chosen value. `choices` must not be empty.
pub fn pick<T: Clone>(prompt: &str, choices: &[Choice<T>]) -> Result<T> {
    let index = Select::new()
        .with_prompt(prompt)
        .items(choices)
        .default(0)
        .interact()?;
    Ok(choices[index].value.clone())
}

/// Yes/no question that defaults to "no".
pub fn confirm(prompt: &str) -> Result<bool> {
    Ok(Confirm::new().with_prompt(prompt).default(false).interact()?)
}
