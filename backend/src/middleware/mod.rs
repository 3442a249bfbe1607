pub mod auth;
pub mod logging;
pub mod rbac;
pub mod request_id;
