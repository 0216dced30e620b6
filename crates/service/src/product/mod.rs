//! Product catalog: rule sets, persistence accessor and the service tying them together.

pub mod repository;
pub mod service;
pub mod validation;

pub use repository::{ProductRepository, SeaOrmProductRepository};
pub use service::ProductService;
