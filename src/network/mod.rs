pub mod routes;
pub mod server;

pub use routes::FACIAL_ANALYSIS_PATH;
pub use server::{build_router, Server};
