mod basic_auth;

pub use basic_auth::{BasicAuthCredentials, basic_auth_middleware};
