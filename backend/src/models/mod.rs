pub mod brand_settings;
pub mod company;
pub mod content_section;
pub mod job;
pub mod refresh_token;
pub mod user;
