pub mod access_jwt;
pub mod factory;
pub mod policy;

pub use access_jwt::AuthService;
pub use factory::build_auth_service;
pub use policy::{AccessPolicy, Decision, PolicyError, Role};
