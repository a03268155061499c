//! Version 2.0 product routes under `/api/v2/products`.
//!
//! Compared with v1, every resource response carries navigation links and
//! timestamped metadata, the collection is paginated and filterable, misses
//! return a structured `RESOURCE_NOT_FOUND` error, and delete answers with a
//! confirmation document instead of `204`.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use url::form_urlencoded;
use utoipa::{IntoParams, ToSchema};

use super::{ApiVersion, ProductDocument, ProductListDocument};
use crate::domain::ProductId;
use crate::domain::ports::ProductDto;
use crate::inbound::http::ApiResult;
use crate::inbound::http::api_key::AuthenticatedClient;
use crate::inbound::http::error::ApiError;
use crate::inbound::http::json_api::{
    ErrorDocument, JsonApiDocument, Links, Meta, json_api_response,
};
use crate::inbound::http::state::HttpState;

const VERSION: ApiVersion = ApiVersion::V2;
const API_VERSION: &str = "v2";
const DEFAULT_PAGE_SIZE: usize = 20;
const MAX_PAGE_SIZE: usize = 100;
const COLLECTION_FEATURES: [&str; 3] = ["pagination", "filtering", "enhanced_metadata"];
const HEALTH_FEATURES: [&str; 4] = [
    "pagination",
    "filtering",
    "enhanced_metadata",
    "improved_error_handling",
];

fn not_found(id: ProductId) -> ApiError {
    ApiError::not_found(format!("Product with id {id} not found"))
}

fn meta(timestamp_key: &str, timestamp: String) -> Meta {
    Meta::new()
        .with("version", VERSION.version_tag().unwrap_or_default())
        .with("api_version", API_VERSION)
        .with(timestamp_key, timestamp)
}

fn resource_id(product: &ProductDto) -> &str {
    product.id.as_deref().unwrap_or_default()
}

/// Raw collection query; values are parsed by hand so type errors can name
/// the offending parameter.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Zero-based page number (default 0).
    #[param(value_type = Option<u32>)]
    pub page: Option<String>,
    /// Items per page, 1 to 100 (default 20).
    #[param(value_type = Option<u32>)]
    pub size: Option<String>,
    /// Case-insensitive substring filter on the product name.
    pub name: Option<String>,
}

/// Validated pagination request.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PageRequest {
    page: usize,
    size: usize,
    name: Option<String>,
}

fn parse_number(parameter: &str, raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            value
                .parse::<i64>()
                .map_err(|_| ApiError::type_mismatch(parameter, value))
        })
        .transpose()
}

fn out_of_range(parameter: &str, detail: &str) -> ApiError {
    ApiError::new(
        StatusCode::BAD_REQUEST,
        "VALIDATION_ERROR",
        "Validation Failed",
        detail,
    )
    .with_parameter(parameter)
}

impl TryFrom<ListQuery> for PageRequest {
    type Error = ApiError;

    fn try_from(query: ListQuery) -> Result<Self, Self::Error> {
        let page = match parse_number("page", query.page.as_deref())? {
            None => 0,
            Some(page) => usize::try_from(page)
                .map_err(|_| out_of_range("page", "Page number must not be negative"))?,
        };
        let size = match parse_number("size", query.size.as_deref())? {
            None => DEFAULT_PAGE_SIZE,
            Some(size) => usize::try_from(size)
                .ok()
                .filter(|size| (1..=MAX_PAGE_SIZE).contains(size))
                .ok_or_else(|| out_of_range("size", "Page size must be between 1 and 100"))?,
        };
        let name = query
            .name
            .map(|name| name.trim().to_owned())
            .filter(|name| !name.is_empty());
        Ok(Self { page, size, name })
    }
}

/// One page cut from the full snapshot.
#[derive(Debug)]
struct Page {
    items: Vec<ProductDto>,
    total: usize,
    total_pages: usize,
}

fn paginate(products: Vec<ProductDto>, request: &PageRequest) -> Page {
    let needle = request.name.as_deref().map(str::to_lowercase);
    let matching: Vec<ProductDto> = products
        .into_iter()
        .filter(|product| match &needle {
            Some(needle) => product
                .name()
                .is_some_and(|name| name.to_lowercase().contains(needle.as_str())),
            None => true,
        })
        .collect();
    let total = matching.len();
    let total_pages = total.div_ceil(request.size).max(1);
    let items = matching
        .into_iter()
        .skip(request.page.saturating_mul(request.size))
        .take(request.size)
        .collect();
    Page {
        items,
        total,
        total_pages,
    }
}

fn page_link(page: usize, request: &PageRequest) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());
    query
        .append_pair("page", &page.to_string())
        .append_pair("size", &request.size.to_string());
    if let Some(name) = &request.name {
        query.append_pair("name", name);
    }
    format!("{}?{}", VERSION.collection_path(), query.finish())
}

fn page_links(request: &PageRequest, page: &Page) -> Links {
    let last = page.total_pages - 1;
    let mut links = Links::new()
        .with("self", page_link(request.page, request))
        .with("first", page_link(0, request))
        .with("last", page_link(last, request));
    if request.page > 0 {
        links = links.with("prev", page_link((request.page - 1).min(last), request));
    }
    if request.page < last {
        links = links.with("next", page_link(request.page + 1, request));
    }
    links
}

/// Body returned by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteConfirmation {
    pub deleted: bool,
    pub id: i64,
    pub version: String,
    pub deleted_at: String,
    pub message: String,
}

/// Body returned by the v2 health check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct V2Health {
    pub status: String,
    pub version: String,
    pub api_version: String,
    pub timestamp: String,
    pub features: Vec<String>,
}

/// Create a product.
#[utoipa::path(
    post,
    path = "/api/v2/products",
    request_body(content = ProductDocument, content_type = "application/vnd.api+json"),
    responses(
        (status = 201, description = "Product created", body = ProductDocument),
        (status = 400, description = "Validation failed", body = ErrorDocument),
        (status = 401, description = "Missing or invalid API key", body = ErrorDocument),
        (status = 415, description = "Body is not JSON:API", body = ErrorDocument)
    ),
    tags = ["products-v2"],
    operation_id = "createProductV2"
)]
#[post("")]
pub async fn create_product(
    _client: AuthenticatedClient,
    state: web::Data<HttpState>,
    body: web::Json<ProductDocument>,
) -> ApiResult<HttpResponse> {
    let created = state
        .products
        .create_product(body.into_inner().data)
        .await
        .map_err(|error| VERSION.reject(error))?;
    let path = VERSION.resource_path(resource_id(&created));
    let links = Links::new()
        .with("self", path.clone())
        .with("edit", path)
        .with("collection", VERSION.collection_path());
    Ok(json_api_response(
        StatusCode::CREATED,
        &JsonApiDocument::data(created)
            .with_links(links)
            .with_meta(meta("created_at", state.timestamp())),
    ))
}

/// List products one page at a time.
#[utoipa::path(
    get,
    path = "/api/v2/products",
    params(ListQuery),
    responses(
        (status = 200, description = "A page of products", body = ProductListDocument),
        (status = 400, description = "Invalid pagination parameters", body = ErrorDocument),
        (status = 401, description = "Missing or invalid API key", body = ErrorDocument)
    ),
    tags = ["products-v2"],
    operation_id = "listProductsV2"
)]
#[get("")]
pub async fn list_products(
    _client: AuthenticatedClient,
    state: web::Data<HttpState>,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    let request = PageRequest::try_from(query.into_inner())?;
    let products = state
        .products
        .get_all_products()
        .await
        .map_err(|error| VERSION.reject(error))?;
    let page = paginate(products, &request);
    let links = page_links(&request, &page);
    let meta = meta("retrieved_at", state.timestamp())
        .with("count", page.items.len())
        .with("total", page.total)
        .with("page", request.page)
        .with("size", request.size)
        .with("total_pages", page.total_pages)
        .with("features", COLLECTION_FEATURES.to_vec());
    Ok(json_api_response(
        StatusCode::OK,
        &JsonApiDocument::data(page.items)
            .with_links(links)
            .with_meta(meta),
    ))
}

/// Report v2 route availability.
#[utoipa::path(
    get,
    path = "/api/v2/products/health",
    responses(
        (status = 200, description = "v2 routes are serving", body = V2Health),
        (status = 401, description = "Missing or invalid API key", body = ErrorDocument)
    ),
    tags = ["products-v2"],
    operation_id = "productsHealthV2"
)]
#[get("/health")]
pub async fn health(_client: AuthenticatedClient, state: web::Data<HttpState>) -> HttpResponse {
    json_api_response(
        StatusCode::OK,
        &V2Health {
            status: "UP".to_owned(),
            version: VERSION.version_tag().unwrap_or_default().to_owned(),
            api_version: API_VERSION.to_owned(),
            timestamp: state.timestamp(),
            features: HEALTH_FEATURES.iter().map(|f| (*f).to_owned()).collect(),
        },
    )
}

/// Fetch one product.
#[utoipa::path(
    get,
    path = "/api/v2/products/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product found", body = ProductDocument),
        (status = 400, description = "Identifier is not a number", body = ErrorDocument),
        (status = 401, description = "Missing or invalid API key", body = ErrorDocument),
        (status = 404, description = "No such product", body = ErrorDocument)
    ),
    tags = ["products-v2"],
    operation_id = "getProductV2"
)]
#[get("/{id}")]
pub async fn get_product(
    _client: AuthenticatedClient,
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = ProductId::new(id.into_inner());
    let product = state
        .products
        .get_product_by_id(id)
        .await
        .map_err(|error| VERSION.reject(error))?
        .ok_or_else(|| not_found(id))?;
    let path = VERSION.resource_path(id);
    let links = Links::new()
        .with("self", path.clone())
        .with("edit", path.clone())
        .with("delete", path)
        .with("collection", VERSION.collection_path());
    Ok(json_api_response(
        StatusCode::OK,
        &JsonApiDocument::data(product)
            .with_links(links)
            .with_meta(meta("retrieved_at", state.timestamp())),
    ))
}

/// Replace a product's attributes.
#[utoipa::path(
    put,
    path = "/api/v2/products/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    request_body(content = ProductDocument, content_type = "application/vnd.api+json"),
    responses(
        (status = 200, description = "Product updated", body = ProductDocument),
        (status = 400, description = "Validation failed", body = ErrorDocument),
        (status = 401, description = "Missing or invalid API key", body = ErrorDocument),
        (status = 404, description = "No such product", body = ErrorDocument),
        (status = 415, description = "Body is not JSON:API", body = ErrorDocument)
    ),
    tags = ["products-v2"],
    operation_id = "updateProductV2"
)]
#[put("/{id}")]
pub async fn update_product(
    _client: AuthenticatedClient,
    state: web::Data<HttpState>,
    id: web::Path<i64>,
    body: web::Json<ProductDocument>,
) -> ApiResult<HttpResponse> {
    let id = ProductId::new(id.into_inner());
    let product = state
        .products
        .update_product(id, body.into_inner().data)
        .await
        .map_err(|error| VERSION.reject(error))?
        .ok_or_else(|| not_found(id))?;
    let links = Links::new()
        .with("self", VERSION.resource_path(id))
        .with("collection", VERSION.collection_path());
    Ok(json_api_response(
        StatusCode::OK,
        &JsonApiDocument::data(product)
            .with_links(links)
            .with_meta(meta("updated_at", state.timestamp())),
    ))
}

/// Delete a product and confirm the removal.
#[utoipa::path(
    delete,
    path = "/api/v2/products/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "Product deleted", body = DeleteConfirmation),
        (status = 401, description = "Missing or invalid API key", body = ErrorDocument),
        (status = 404, description = "No such product", body = ErrorDocument)
    ),
    tags = ["products-v2"],
    operation_id = "deleteProductV2"
)]
#[delete("/{id}")]
pub async fn delete_product(
    _client: AuthenticatedClient,
    state: web::Data<HttpState>,
    id: web::Path<i64>,
) -> ApiResult<HttpResponse> {
    let id = ProductId::new(id.into_inner());
    let deleted = state
        .products
        .delete_product(id)
        .await
        .map_err(|error| VERSION.reject(error))?;
    if !deleted {
        return Err(not_found(id));
    }
    Ok(json_api_response(
        StatusCode::OK,
        &DeleteConfirmation {
            deleted: true,
            id: id.get(),
            version: VERSION.version_tag().unwrap_or_default().to_owned(),
            deleted_at: state.timestamp(),
            message: "Product successfully deleted".to_owned(),
        },
    ))
}

/// Register the v2 scope. `/health` precedes `/{id}` so it is not parsed as
/// an identifier.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(VERSION.collection_path())
            .service(create_product)
            .service(list_products)
            .service(health)
            .service(get_product)
            .service(update_product)
            .service(delete_product),
    );
}
