pub mod auth;
pub mod courses;
pub mod posts;
pub mod response;
pub mod validation;
