use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    #[schema(example = "OK")]
    pub status: String,
    #[schema(format = DateTime)]
    pub time_stamp: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductDoc {
    /// Auto-generated ID of the product
    #[serde(rename = "_id")]
    #[schema(example = "507f1f77bcf86cd799439011")]
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: String,
    /// Available stock quantity
    pub stock: i64,
    #[schema(format = DateTime)]
    pub release_date: Option<String>,
    #[schema(format = DateTime)]
    pub created_at: String,
    #[schema(format = DateTime)]
    pub updated_at: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductDoc {
    /// 1 to 100 characters
    #[schema(example = "iPhone 15 Pro")]
    pub name: String,
    pub description: Option<String>,
    /// Greater than zero
    #[schema(example = 1500)]
    pub price: f64,
    /// 1 to 50 characters
    #[schema(example = "Electronics")]
    pub category: String,
    /// Zero or greater, defaults to 0
    pub stock: Option<i64>,
    #[schema(format = DateTime)]
    pub release_date: Option<String>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock: Option<i64>,
    #[schema(format = DateTime)]
    pub release_date: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct ProductsDoc {
    pub products: Vec<ProductDoc>,
}

#[derive(Serialize, ToSchema)]
pub struct ProductListResponseDoc {
    pub success: bool,
    pub data: ProductsDoc,
}

#[derive(Serialize, ToSchema)]
pub struct ProductResponseDoc {
    pub success: bool,
    pub message: String,
    pub data: ProductDoc,
}

#[derive(Serialize, ToSchema)]
pub struct MessageResponseDoc {
    pub success: bool,
    pub message: String,
    pub error: Option<String>,
}

#[derive(Serialize, ToSchema)]
pub struct FieldIssueDoc {
    pub field: String,
    pub message: String,
}

#[derive(Serialize, ToSchema)]
pub struct ValidationErrorDoc {
    pub success: bool,
    #[schema(example = "Validation error")]
    pub message: String,
    pub error: Option<String>,
    pub errors: Option<Vec<FieldIssueDoc>>,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Products CRUD API",
        version = "1.0.0",
        description = "A simple Products CRUD API with axum, sea-orm and utoipa"
    ),
    paths(
        crate::routes::health,
        crate::routes::products::list,
        crate::routes::products::create,
        crate::routes::products::update,
        crate::routes::products::delete,
    ),
    components(
        schemas(
            HealthResponse,
            ProductDoc,
            CreateProductDoc,
            UpdateProductDoc,
            ProductsDoc,
            ProductListResponseDoc,
            ProductResponseDoc,
            MessageResponseDoc,
            FieldIssueDoc,
            ValidationErrorDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "Products")
    )
)]
pub struct ApiDoc;
