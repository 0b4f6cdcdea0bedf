//! The fixed set of menu actions and how they are grouped on screen.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Group {
    View,
    Add,
    Update,
    ViewBy,
    Delete,
    Exit,
}

impl Group {
    pub fn title(self) -> &'static str {
        match self {
            Group::View => "View",
            Group::Add => "Add",
            Group::Update => "Update",
            Group::ViewBy => "View By",
            Group::Delete => "Delete",
            Group::Exit => "Exit",
        }
    }
}

/// Every action the main menu offers. `ui::run` matches on this
/// exhaustively, so a new variant cannot go unhandled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ViewDepartments,
    ViewRoles,
    ViewEmployees,
    AddDepartment,
    AddRole,
    AddEmployee,
    UpdateEmployeeRole,
    UpdateEmployeeManager,
    ViewEmployeesByManager,
    ViewEmployeesByDepartment,
    ViewDepartmentBudget,
    DeleteDepartment,
    DeleteRole,
    DeleteEmployee,
    Exit,
}

impl Action {
    /// Menu order: grouped, with Exit last.
    pub const ALL: [Action; 15] = [
        Action::ViewDepartments,
        Action::ViewRoles,
        Action::ViewEmployees,
        Action::AddDepartment,
        Action::AddRole,
        Action::AddEmployee,
        Action::UpdateEmployeeRole,
        Action::UpdateEmployeeManager,
        Action::ViewEmployeesByManager,
        Action::ViewEmployeesByDepartment,
        Action::ViewDepartmentBudget,
        Action::DeleteDepartment,
        Action::DeleteRole,
        Action::DeleteEmployee,
        Action::Exit,
    ];

    pub fn group(self) -> Group {
        match self {
            Action::ViewDepartments | Action::ViewRoles | Action::ViewEmployees => Group::View,
            Action::AddDepartment | Action::AddRole | Action::AddEmployee => Group::Add,
            Action::UpdateEmployeeRole | Action::UpdateEmployeeManager => Group::Update,
            Action::ViewEmployeesByManager
            | Action::ViewEmployeesByDepartment
            | Action::ViewDepartmentBudget => Group::ViewBy,
            Action::DeleteDepartment | Action::DeleteRole | Action::DeleteEmployee => Group::Delete,
            Action::Exit => Group::Exit,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Action::ViewDepartments => "View All Departments",
            Action::ViewRoles => "View All Roles",
            Action::ViewEmployees => "View All Employees",
            Action::AddDepartment => "Add Department",
            Action::AddRole => "Add Role",
            Action::AddEmployee => "Add Employee",
            Action::UpdateEmployeeRole => "Update Employee Role",
            Action::UpdateEmployeeManager => "Update Employee Manager",
            Action::ViewEmployeesByManager => "View Employees by Manager",
            Action::ViewEmployeesByDepartment => "View Employees by Department",
            Action::ViewDepartmentBudget => "View Department Budget",
            Action::DeleteDepartment => "Delete Department",
            Action::DeleteRole => "Delete Role",
            Action::DeleteEmployee => "Delete Employee",
            Action::Exit => "Exit StaffSync",
        }
    }

    /// Labels for the selection list, in `ALL` order.
    pub fn menu_items() -> Vec<String> {
        Self::ALL.iter().map(ToString::to_string).collect()
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<8}│ {}", self.group().title(), self.label())
    }
}
