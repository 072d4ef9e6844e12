// handlers/todo/mod.rs - To-do item handlers
//
// Writes answer 201 with the item, reads answer 200. Every failure is a 400
// error envelope produced by ApiError.

pub mod create;         // POST   /todo
pub mod delete;         // DELETE /todo
pub mod get_by_id;      // GET    /todo?id=&userId=
pub mod get_by_user_id; // GET    /todo/get-by-user-id?userId=
pub mod model;          // GET    /todo/get-model
pub mod params;
pub mod update;         // PUT    /todo

pub use create::todo_create;
pub use delete::todo_delete;
pub use get_by_id::todo_get_by_id;
pub use get_by_user_id::todo_get_by_user_id;
pub use model::todo_model;
pub use update::todo_update;
