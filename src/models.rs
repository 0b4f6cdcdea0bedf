//! Row types returned by the store.
//!
//! The first three mirror the tables one-to-one. The rest are read models
//! shaped for printing, so their field names double as table headers.

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;

use crate::table::{currency, currency_opt};

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Department {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Role {
    pub id: i32,
    pub title: String,
    #[serde(serialize_with = "currency")]
    pub salary: Decimal,
    pub department_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Employee {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub role_id: Option<i32>,
    pub manager_id: Option<i32>,
}

impl Employee {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// A role joined with its department name.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct RoleDetail {
    pub id: i32,
    pub title: String,
    pub department: Option<String>,
    #[serde(serialize_with = "currency")]
    pub salary: Decimal,
}

/// An employee joined with role, department and manager. Everything after
/// the name is optional since the role and manager links are nullable.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct EmployeeDetail {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub title: Option<String>,
    pub department: Option<String>,
    #[serde(serialize_with = "currency_opt")]
    pub salary: Option<Decimal>,
    pub manager: Option<String>,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct ManagerGroup {
    pub manager: String,
    pub employees: String,
    pub employee_count: i64,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct DepartmentGroup {
    pub department: String,
    pub employees: String,
    pub employee_count: i64,
}

#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct DepartmentBudget {
    pub department: String,
    pub employee_count: i64,
    #[serde(serialize_with = "currency")]
    pub total_budget: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRole {
    pub title: String,
    pub salary: Decimal,
    pub department_id: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub role_id: Option<i32>,
    pub manager_id: Option<i32>,
}

/// What a department delete took with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DepartmentRemoval {
    pub roles: u64,
    pub employees: u64,
}
