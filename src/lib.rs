use std::sync::Arc;

use config::Config;
use repositories::{courses_repo::CourseRepository, posts_repo::PostRepository};
use services::{auth::AuthService, courses::CoursesService, posts::PostsService};

pub use self::errors::{Error, Result};

pub mod config;
pub mod docs;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod services;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub courses_service: CoursesService,
    pub posts_service: PostsService,
}

impl AppState {
    pub fn new(
        config: Config,
        courses_repo: Arc<dyn CourseRepository>,
        posts_repo: Arc<dyn PostRepository>,
    ) -> Self {
        Self {
            auth_service: AuthService::new(
                config.jwt_secret,
                config.jwt_maxage,
                config.api_key,
            ),
            courses_service: CoursesService::new(courses_repo),
            posts_service: PostsService::new(posts_repo),
        }
    }
}
