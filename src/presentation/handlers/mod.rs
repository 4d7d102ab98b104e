mod health;
mod index;
mod process;

pub use health::health_handler;
pub use index::index_handler;
pub use process::{ErrorResponse, ProcessResponse, process_handler};
