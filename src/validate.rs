//! Field predicates shared by the prompts and the store.
//!
//! Each predicate returns `Ok(())` or a message suitable for showing next to
//! the prompt. They are composed per field rather than attached as callbacks.

use rust_decimal::Decimal;
use std::str::FromStr;

/// Longest name, title, first or last name the schema accepts.
pub const MAX_NAME_LENGTH: usize = 30;

pub fn non_empty(label: &str, input: &str) -> Result<(), String> {
    if input.trim().is_empty() {
        return Err(format!("{label} cannot be empty"));
    }
    Ok(())
}

pub fn max_length(label: &str, max: usize, input: &str) -> Result<(), String> {
    if input.trim().chars().count() > max {
        return Err(format!("{label} must be at most {max} characters"));
    }
    Ok(())
}

/// Department names, role titles and employee names all follow the same rule.
pub fn name(label: &str, input: &str) -> Result<(), String> {
    non_empty(label, input)?;
    max_length(label, MAX_NAME_LENGTH, input)
}

pub fn parse_salary(input: &str) -> Result<Decimal, String> {
    let amount = Decimal::from_str(input.trim())
        .map_err(|_| "Please enter a valid salary".to_string())?;
    non_negative(amount)?;
    Ok(amount)
}

pub fn salary(input: &str) -> Result<(), String> {
    parse_salary(input).map(|_| ())
}

pub fn non_negative(amount: Decimal) -> Result<(), String> {
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err("Salary cannot be negative".to_string());
    }
    Ok(())
}
