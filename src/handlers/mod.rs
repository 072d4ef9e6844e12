pub mod system;
pub mod todo;
