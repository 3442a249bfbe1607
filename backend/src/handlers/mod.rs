pub mod auth;
pub mod companies;
pub mod content;
pub mod jobs;
pub mod users;
