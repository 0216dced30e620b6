//! Service layer providing the product catalog operations on top of models.
//! - Separates validation rule sets and persistence from the HTTP layer.
//! - Reuses entity definitions and storage-boundary checks in the `models` crate.

pub mod errors;
pub mod product;
