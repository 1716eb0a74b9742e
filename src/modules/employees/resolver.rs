//! Turns an inbound [`EmployeeInput`] into a storable [`Employee`].

use crate::modules::departments::models::Department;

use super::models::{Employee, EmployeeInput};

/// Build the employee to persist from the submitted fields and the result of
/// looking up `input.department_id`.
///
/// The lookup happens before this call. When it found nothing the employee
/// is built without a department, even if an id was submitted. Names are
/// copied as given.
pub fn resolve(input: EmployeeInput, department: Option<Department>) -> Employee {
    Employee {
        employee_id: input.employee_id,
        first_name: input.first_name,
        last_name: input.last_name,
        department,
    }
}
