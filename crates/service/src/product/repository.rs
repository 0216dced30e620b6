use async_trait::async_trait;
use models::product::{self, NewProduct, ProductPatch};
use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;

/// The persistence accessor: one pass-through per store operation, no retries,
/// no transactions. Concurrent writers to one id are last-write-wins.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Every product, newest first.
    async fn list_all(&self) -> Result<Vec<product::Model>, ServiceError>;
    async fn create(&self, input: NewProduct) -> Result<product::Model, ServiceError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<product::Model>, ServiceError>;
    /// `Ok(None)` when no product has this id.
    async fn replace_by_id(&self, id: &str, patch: ProductPatch) -> Result<Option<product::Model>, ServiceError>;
    /// `Ok(false)` when no product has this id.
    async fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError>;
}

/// SeaORM-backed repository implementation. Owns a handle to the connection pool.
#[derive(Clone)]
pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn list_all(&self) -> Result<Vec<product::Model>, ServiceError> {
        Ok(product::list_all(&self.db).await?)
    }

    async fn create(&self, input: NewProduct) -> Result<product::Model, ServiceError> {
        Ok(product::create(&self.db, input).await?)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<product::Model>, ServiceError> {
        Ok(product::find_by_id(&self.db, id).await?)
    }

    async fn replace_by_id(&self, id: &str, patch: ProductPatch) -> Result<Option<product::Model>, ServiceError> {
        Ok(product::apply_patch(&self.db, id, patch).await?)
    }

    async fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError> {
        Ok(product::delete_by_id(&self.db, id).await?)
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    use chrono::Utc;
    use models::{object_id, product::Model};

    #[derive(Default)]
    pub struct MockProductRepository {
        // insertion order; listing reverses it
        items: Mutex<Vec<Model>>,
        fail_with: Mutex<Option<String>>,
    }

    impl MockProductRepository {
        /// Make every following call fail with a database error.
        pub fn fail_with(&self, message: &str) {
            *self.fail_with.lock().unwrap_or_else(PoisonError::into_inner) = Some(message.to_string());
        }

        fn items(&self) -> Result<MutexGuard<'_, Vec<Model>>, ServiceError> {
            if let Some(msg) = self.fail_with.lock().unwrap_or_else(PoisonError::into_inner).clone() {
                return Err(ServiceError::Db(msg));
            }
            Ok(self.items.lock().unwrap_or_else(PoisonError::into_inner))
        }
    }

    #[async_trait]
    impl ProductRepository for MockProductRepository {
        async fn list_all(&self) -> Result<Vec<Model>, ServiceError> {
            Ok(self.items()?.iter().rev().cloned().collect())
        }

        async fn create(&self, input: NewProduct) -> Result<Model, ServiceError> {
            let now = Utc::now().into();
            let m = Model {
                id: object_id::generate(),
                name: product::normalize_name(&input.name)?,
                description: input.description.map(|d| d.trim().to_string()),
                price: product::validate_price(input.price)?,
                category: product::normalize_category(&input.category)?,
                stock: product::validate_stock(input.stock)?,
                release_date: input.release_date.map(Into::into),
                created_at: now,
                updated_at: now,
            };
            self.items()?.push(m.clone());
            Ok(m)
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<Model>, ServiceError> {
            Ok(self.items()?.iter().find(|m| m.id == id).cloned())
        }

        async fn replace_by_id(&self, id: &str, patch: ProductPatch) -> Result<Option<Model>, ServiceError> {
            let mut items = self.items()?;
            let Some(m) = items.iter_mut().find(|m| m.id == id) else {
                return Ok(None);
            };
            let mut next = m.clone();
            if let Some(name) = patch.name { next.name = product::normalize_name(&name)?; }
            if let Some(d) = patch.description { next.description = Some(d.trim().to_string()); }
            if let Some(price) = patch.price { next.price = product::validate_price(price)?; }
            if let Some(c) = patch.category { next.category = product::normalize_category(&c)?; }
            if let Some(stock) = patch.stock { next.stock = product::validate_stock(stock)?; }
            if let Some(r) = patch.release_date { next.release_date = Some(r.into()); }
            next.updated_at = Utc::now().into();
            *m = next.clone();
            Ok(Some(next))
        }

        async fn delete_by_id(&self, id: &str) -> Result<bool, ServiceError> {
            let mut items = self.items()?;
            let before = items.len();
            items.retain(|m| m.id != id);
            Ok(items.len() != before)
        }
    }
}
