pub mod content_type;
pub mod json;
pub mod response;

pub use content_type::require_content_type;
pub use json::JsonBody;
pub use response::{ApiResponse, ApiResult};
