use std::sync::Arc;

use sea_orm::DatabaseConnection;
use service::product::{ProductService, SeaOrmProductRepository};

/// Shared handler state. The pool handle is moved into the repository; cloning the
/// state only clones the `Arc`.
#[derive(Clone)]
pub struct ServerState {
    pub products: Arc<ProductService<SeaOrmProductRepository>>,
}

impl ServerState {
    pub fn new(db: DatabaseConnection) -> Self {
        let repo = Arc::new(SeaOrmProductRepository::new(db));
        Self { products: Arc::new(ProductService::new(repo)) }
    }
}
