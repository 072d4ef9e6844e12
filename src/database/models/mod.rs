pub mod todo;

pub use todo::{Pagination, TodoId, TodoItem, UserId};
