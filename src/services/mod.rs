pub mod todo_service;
pub mod validation;

pub use todo_service::{TodoError, TodoService};
pub use validation::{validate, Clock, FixedClock, SystemClock, ValidationError};
