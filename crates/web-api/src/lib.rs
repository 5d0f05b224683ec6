pub mod handlers;
pub mod response;
pub mod server;

pub use handlers::AppState;
pub use response::{ApiError, ApiResponse};
pub use server::ApiServer;
