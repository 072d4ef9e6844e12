pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;

pub use manager::{DatabaseError, DatabaseManager};
pub use memory::InMemoryTodoRepository;
pub use models::{Pagination, TodoId, TodoItem, UserId};
pub use postgres::PgTodoRepository;
pub use repository::TodoGateway;
