//! Shared application state
//!
//! Services are built once at startup over a set of repository
//! implementations and handed to every worker through `web::Data`.

use std::sync::Arc;

use sf_core::repositories::{
    BookRepository, CategoryRepository, CommentRepository, ProductRepository,
    ProfileImageRepository, UserRepository,
};
use sf_core::services::{
    AuthService, BookService, CategoryService, CommentService, ProductService,
    ProfileImageService, TokenService, UserService,
};
use sf_infra::{
    DatabasePool, MySqlBookRepository, MySqlCategoryRepository, MySqlCommentRepository,
    MySqlProductRepository, MySqlProfileImageRepository, MySqlUserRepository,
};
use sf_shared::JwtConfig;

/// Repository implementations the services run on
#[derive(Clone)]
pub struct Repositories {
    pub categories: Arc<dyn CategoryRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub users: Arc<dyn UserRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub books: Arc<dyn BookRepository>,
    pub profile_images: Arc<dyn ProfileImageRepository>,
}

impl Repositories {
    /// MySQL repositories sharing one pool
    pub fn mysql(pool: &DatabasePool) -> Self {
        let pool = pool.get_pool();
        Self {
            categories: Arc::new(MySqlCategoryRepository::new(pool.clone())),
            products: Arc::new(MySqlProductRepository::new(pool.clone())),
            users: Arc::new(MySqlUserRepository::new(pool.clone())),
            comments: Arc::new(MySqlCommentRepository::new(pool.clone())),
            books: Arc::new(MySqlBookRepository::new(pool.clone())),
            profile_images: Arc::new(MySqlProfileImageRepository::new(pool.clone())),
        }
    }
}

/// Application state shared across all handlers
pub struct AppState {
    pub categories: CategoryService,
    pub products: ProductService,
    pub users: UserService,
    pub auth: AuthService,
    pub comments: CommentService,
    pub books: BookService,
    pub profile_images: ProfileImageService,
}

impl AppState {
    pub fn new(repositories: Repositories, jwt: &JwtConfig) -> Self {
        let tokens = Arc::new(TokenService::new(jwt));
        Self {
            categories: CategoryService::new(repositories.categories),
            products: ProductService::new(repositories.products),
            users: UserService::new(repositories.users.clone()),
            auth: AuthService::new(repositories.users, tokens),
            comments: CommentService::new(repositories.comments),
            books: BookService::new(repositories.books),
            profile_images: ProfileImageService::new(repositories.profile_images),
        }
    }
}
