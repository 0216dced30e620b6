use std::sync::Arc;

use models::product::{Model, NewProduct, ProductPatch};
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use crate::product::repository::ProductRepository;

/// Application service for the catalog. Input arrives already validated by the
/// rule sets; every call is a single repository operation.
pub struct ProductService<R: ProductRepository> {
    repo: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<Model>, ServiceError> {
        self.repo.list_all().await
    }

    /// Store a new product.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use models::product::NewProduct;
    /// use service::product::{repository::mock::MockProductRepository, ProductService};
    /// let svc = ProductService::new(Arc::new(MockProductRepository::default()));
    /// let input = NewProduct { name: "Pen".into(), description: None, price: 1.5, category: "Office".into(), stock: 0, release_date: None };
    /// let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
    /// let created = rt.block_on(svc.create(input)).unwrap();
    /// assert_eq!(created.id.len(), 24);
    /// ```
    #[instrument(skip(self, input), fields(name = %input.name, category = %input.category))]
    pub async fn create(&self, input: NewProduct) -> Result<Model, ServiceError> {
        let created = self.repo.create(input).await?;
        info!(id = %created.id, "product_created");
        Ok(created)
    }

    pub async fn get(&self, id: &str) -> Result<Option<Model>, ServiceError> {
        self.repo.find_by_id(id).await
    }

    /// Apply `patch`; `ServiceError::NotFound` when the id is unknown.
    /// An empty patch writes nothing and returns the stored product as is.
    #[instrument(skip(self, patch))]
    pub async fn update(&self, id: &str, patch: ProductPatch) -> Result<Model, ServiceError> {
        let outcome = if patch.is_empty() {
            self.get(id).await?
        } else {
            self.repo.replace_by_id(id, patch).await?
        };
        match outcome {
            Some(m) => {
                info!(id = %m.id, "product_updated");
                Ok(m)
            }
            None => {
                warn!(%id, "update of unknown product");
                Err(ServiceError::not_found("product"))
            }
        }
    }

    /// `ServiceError::NotFound` when the id is unknown.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        if self.repo.delete_by_id(id).await? {
            info!(%id, "product_deleted");
            Ok(())
        } else {
            warn!(%id, "delete of unknown product");
            Err(ServiceError::not_found("product"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::product::repository::mock::MockProductRepository;
    use crate::product::validation::RuleSet;
    use serde_json::json;

    const MISSING: &str = "507f1f77bcf86cd799439011";

    fn svc() -> ProductService<MockProductRepository> {
        ProductService::new(Arc::new(MockProductRepository::default()))
    }

    fn input(name: &str) -> NewProduct {
        NewProduct::validate(&json!({
            "name": name,
            "description": "desc",
            "price": 500,
            "category": "Electronics",
            "stock": 20
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn create_then_list_newest_first() -> anyhow::Result<()> {
        let svc = svc();
        assert!(svc.list().await?.is_empty());
        let a = svc.create(input("Product 1")).await?;
        let b = svc.create(input("Product 2")).await?;
        let c = svc.create(input("Product 3")).await?;
        let ids: Vec<_> = svc.list().await?.into_iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![c.id, b.id, a.id]);
        Ok(())
    }

    #[tokio::test]
    async fn update_changes_only_given_fields() -> anyhow::Result<()> {
        let svc = svc();
        let original = svc.create(input("Old Product")).await?;
        let patch = ProductPatch::validate(&json!({"name": "X"}))?;
        let updated = svc.update(&original.id, patch).await?;
        assert_eq!(updated.name, "X");
        assert_eq!(updated.price, original.price);
        assert_eq!(updated.description, original.description);
        assert_eq!(updated.stock, original.stock);
        assert_eq!(svc.get(&original.id).await?.map(|m| m.name), Some("X".to_string()));
        Ok(())
    }

    #[tokio::test]
    async fn update_and_delete_unknown_id_are_not_found() -> anyhow::Result<()> {
        let svc = svc();
        let err = svc.update(MISSING, ProductPatch::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        let err = svc.delete(MISSING).await.unwrap_err();
        assert!(matches!(err, ServiceError::NotFound(_)));
        Ok(())
    }

    #[tokio::test]
    async fn empty_patch_leaves_product_untouched() -> anyhow::Result<()> {
        let svc = svc();
        let original = svc.create(input("Same")).await?;
        let updated = svc.update(&original.id, ProductPatch::default()).await?;
        assert_eq!(updated, original);
        Ok(())
    }

    #[tokio::test]
    async fn delete_makes_lookup_empty() -> anyhow::Result<()> {
        let svc = svc();
        let p = svc.create(input("Product to delete")).await?;
        svc.delete(&p.id).await?;
        assert!(svc.get(&p.id).await?.is_none());
        assert!(svc.list().await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn store_failures_surface_as_db_errors() {
        let repo = Arc::new(MockProductRepository::default());
        repo.fail_with("connection reset");
        let svc = ProductService::new(repo);
        let err = svc.list().await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(ref m) if m == "connection reset"));
    }

    #[tokio::test]
    async fn storage_bounds_surface_as_model_errors() {
        let svc = svc();
        let raw = NewProduct { name: "   ".into(), ..input("unused") };
        let err = svc.create(raw).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(models::errors::ModelError::Validation(_))));
    }
}
