use chrono::{DateTime, Utc};
use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{errors, object_id};

pub const NAME_MAX_CHARS: usize = 100;
pub const CATEGORY_MAX_CHARS: usize = 50;

/// A catalog entry. Serialized with the wire names clients see (`_id`, `releaseDate`, ...).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Fields of a product about to be inserted; id and timestamps come from the store.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    pub stock: i64,
    pub release_date: Option<DateTime<Utc>>,
}

/// Partial update: `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock: Option<i64>,
    pub release_date: Option<DateTime<Utc>>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

fn bounded_text(field: &str, raw: &str, max: usize) -> Result<String, errors::ModelError> {
    let v = raw.trim();
    if v.is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} is required")));
    }
    if v.chars().count() > max {
        return Err(errors::ModelError::Validation(format!("{field} must be at most {max} characters")));
    }
    Ok(v.to_string())
}

pub fn normalize_name(raw: &str) -> Result<String, errors::ModelError> {
    bounded_text("name", raw, NAME_MAX_CHARS)
}

pub fn normalize_category(raw: &str) -> Result<String, errors::ModelError> {
    bounded_text("category", raw, CATEGORY_MAX_CHARS)
}

pub fn validate_price(price: f64) -> Result<f64, errors::ModelError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(errors::ModelError::Validation("price must be greater than zero".into()));
    }
    Ok(price)
}

pub fn validate_stock(stock: i64) -> Result<i64, errors::ModelError> {
    if stock < 0 {
        return Err(errors::ModelError::Validation("stock must be zero or greater".into()));
    }
    Ok(stock)
}

fn db_err(e: DbErr) -> errors::ModelError {
    errors::ModelError::Db(e.to_string())
}

/// All products, newest first. Records created in the same instant fall back to id order,
/// which follows generation order.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .all(db)
        .await
        .map_err(db_err)
}

pub async fn find_by_id(db: &DatabaseConnection, id: &str) -> Result<Option<Model>, errors::ModelError> {
    Entity::find_by_id(id.to_owned()).one(db).await.map_err(db_err)
}

pub async fn create(db: &DatabaseConnection, input: NewProduct) -> Result<Model, errors::ModelError> {
    let name = normalize_name(&input.name)?;
    let category = normalize_category(&input.category)?;
    let price = validate_price(input.price)?;
    let stock = validate_stock(input.stock)?;
    let description = input.description.map(|d| d.trim().to_string());

    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = ActiveModel {
        id: Set(object_id::generate()),
        name: Set(name),
        description: Set(description),
        price: Set(price),
        category: Set(category),
        stock: Set(stock),
        release_date: Set(input.release_date.map(Into::into)),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(db_err)
}

/// Apply the provided fields to the product `id`. `Ok(None)` when no such product exists,
/// including when it disappears between the lookup and the write.
pub async fn apply_patch(
    db: &DatabaseConnection,
    id: &str,
    patch: ProductPatch,
) -> Result<Option<Model>, errors::ModelError> {
    let Some(found) = find_by_id(db, id).await? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    if let Some(name) = patch.name {
        am.name = Set(normalize_name(&name)?);
    }
    if let Some(description) = patch.description {
        am.description = Set(Some(description.trim().to_string()));
    }
    if let Some(price) = patch.price {
        am.price = Set(validate_price(price)?);
    }
    if let Some(category) = patch.category {
        am.category = Set(normalize_category(&category)?);
    }
    if let Some(stock) = patch.stock {
        am.stock = Set(validate_stock(stock)?);
    }
    if let Some(release_date) = patch.release_date {
        am.release_date = Set(Some(release_date.into()));
    }
    am.updated_at = Set(Utc::now().into());

    match am.update(db).await {
        Ok(m) => Ok(Some(m)),
        Err(DbErr::RecordNotUpdated) => {
            debug!(%id, "product vanished before update");
            Ok(None)
        }
        Err(e) => Err(db_err(e)),
    }
}

/// Returns whether a row was removed.
pub async fn delete_by_id(db: &DatabaseConnection, id: &str) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id.to_owned()).exec(db).await.map_err(db_err)?;
    Ok(res.rows_affected > 0)
}
