//! Product resource handlers.
//!
//! ```text
//! /api/products       legacy, mirrors v1 without version metadata
//! /api/v1/products    stable
//! /api/v2/products    extended links/meta, pagination, structured 404s
//! ```
//!
//! Every route group exposes the same CRUD surface over the
//! [`ProductUseCase`](crate::domain::ports::ProductUseCase) port. Legacy and
//! v1 share their handler bodies here; v2 builds richer envelopes in
//! [`v2`].

use std::fmt::Display;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;

use crate::domain::ports::ProductDto;
use crate::domain::{Error, ProductId};

use super::error::{ApiError, ApiResult, ValidationStyle};
use super::json_api::{JsonApiDocument, Links, Meta, json_api_response};
use super::state::HttpState;

/// Generate the CRUD handlers and scope registration of a route group that
/// answers misses with a bare 404.
///
/// The handlers delegate to the shared bodies in this module. Paths, tags and
/// operation ids are literals because the OpenAPI attributes require them.
macro_rules! bare_product_routes {
    (
        version: $version:expr,
        collection: $collection:tt,
        resource: $resource:tt,
        tag: $tag:tt,
        operation_ids: {
            create: $create_id:tt,
            list: $list_id:tt,
            get: $get_id:tt,
            update: $update_id:tt,
            delete: $delete_id:tt $(,)?
        } $(,)?
    ) => {
        use actix_web::{HttpResponse, web};

        use $crate::domain::ProductId;
        use $crate::inbound::http::ApiResult;
        use $crate::inbound::http::api_key::AuthenticatedClient;
        use $crate::inbound::http::json_api::ErrorDocument;
        use $crate::inbound::http::products::{ApiVersion, ProductDocument, ProductListDocument};
        use $crate::inbound::http::state::HttpState;

        const VERSION: ApiVersion = $version;

        /// Create a product.
        #[utoipa::path(
            post,
            path = $collection,
            request_body(content = ProductDocument, content_type = "application/vnd.api+json"),
            responses(
                (status = 201, description = "Product created", body = ProductDocument),
                (status = 400, description = "Invalid product data", body = ErrorDocument),
                (status = 401, description = "Missing or invalid API key", body = ErrorDocument),
                (status = 415, description = "Body is not JSON:API", body = ErrorDocument)
            ),
            tags = [$tag],
            operation_id = $create_id
        )]
        #[actix_web::post("")]
        pub async fn create_product(
            _client: AuthenticatedClient,
            state: web::Data<HttpState>,
            body: web::Json<ProductDocument>,
        ) -> ApiResult<HttpResponse> {
            $crate::inbound::http::products::create(&state, VERSION, body.into_inner()).await
        }

        /// List every product.
        #[utoipa::path(
            get,
            path = $collection,
            responses(
                (status = 200, description = "All products", body = ProductListDocument),
                (status = 401, description = "Missing or invalid API key", body = ErrorDocument)
            ),
            tags = [$tag],
            operation_id = $list_id
        )]
        #[actix_web::get("")]
        pub async fn list_products(
            _client: AuthenticatedClient,
            state: web::Data<HttpState>,
        ) -> ApiResult<HttpResponse> {
            $crate::inbound::http::products::list(&state, VERSION).await
        }

        /// Fetch one product.
        #[utoipa::path(
            get,
            path = $resource,
            params(("id" = i64, Path, description = "Product identifier")),
            responses(
                (status = 200, description = "Product found", body = ProductDocument),
                (status = 400, description = "Identifier is not a number", body = ErrorDocument),
                (status = 401, description = "Missing or invalid API key", body = ErrorDocument),
                (status = 404, description = "No such product; empty body")
            ),
            tags = [$tag],
            operation_id = $get_id
        )]
        #[actix_web::get("/{id}")]
        pub async fn get_product(
            _client: AuthenticatedClient,
            state: web::Data<HttpState>,
            id: web::Path<i64>,
        ) -> ApiResult<HttpResponse> {
            $crate::inbound::http::products::show(&state, VERSION, ProductId::new(id.into_inner()))
                .await
        }

        /// Replace a product's attributes.
        #[utoipa::path(
            put,
            path = $resource,
            params(("id" = i64, Path, description = "Product identifier")),
            request_body(content = ProductDocument, content_type = "application/vnd.api+json"),
            responses(
                (status = 200, description = "Product updated", body = ProductDocument),
                (status = 400, description = "Invalid product data", body = ErrorDocument),
                (status = 401, description = "Missing or invalid API key", body = ErrorDocument),
                (status = 404, description = "No such product; empty body"),
                (status = 415, description = "Body is not JSON:API", body = ErrorDocument)
            ),
            tags = [$tag],
            operation_id = $update_id
        )]
        #[actix_web::put("/{id}")]
        pub async fn update_product(
            _client: AuthenticatedClient,
            state: web::Data<HttpState>,
            id: web::Path<i64>,
            body: web::Json<ProductDocument>,
        ) -> ApiResult<HttpResponse> {
            $crate::inbound::http::products::update(
                &state,
                VERSION,
                ProductId::new(id.into_inner()),
                body.into_inner(),
            )
            .await
        }

        /// Delete a product.
        #[utoipa::path(
            delete,
            path = $resource,
            params(("id" = i64, Path, description = "Product identifier")),
            responses(
                (status = 204, description = "Product deleted"),
                (status = 401, description = "Missing or invalid API key", body = ErrorDocument),
                (status = 404, description = "No such product; empty body")
            ),
            tags = [$tag],
            operation_id = $delete_id
        )]
        #[actix_web::delete("/{id}")]
        pub async fn delete_product(
            _client: AuthenticatedClient,
            state: web::Data<HttpState>,
            id: web::Path<i64>,
        ) -> ApiResult<HttpResponse> {
            $crate::inbound::http::products::delete(&state, VERSION, ProductId::new(id.into_inner()))
                .await
        }

        /// Register the route group's scope.
        pub fn configure(cfg: &mut web::ServiceConfig) {
            cfg.service(
                web::scope(VERSION.collection_path())
                    .service(create_product)
                    .service(list_products)
                    .service(get_product)
                    .service(update_product)
                    .service(delete_product),
            );
        }
    };
}

pub mod legacy;
pub mod v1;
pub mod v2;

/// Request and single-resource response document.
pub type ProductDocument = JsonApiDocument<ProductDto>;

/// Collection response document.
pub type ProductListDocument = JsonApiDocument<Vec<ProductDto>>;

/// Route group a request arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiVersion {
    Legacy,
    V1,
    V2,
}

impl ApiVersion {
    /// Collection path, e.g. `/api/v1/products`.
    #[must_use]
    pub const fn collection_path(self) -> &'static str {
        match self {
            Self::Legacy => "/api/products",
            Self::V1 => "/api/v1/products",
            Self::V2 => "/api/v2/products",
        }
    }

    /// Path of one product.
    #[must_use]
    pub fn resource_path(self, id: impl Display) -> String {
        format!("{}/{id}", self.collection_path())
    }

    /// `meta.version` stamped on data responses, if any.
    #[must_use]
    pub const fn version_tag(self) -> Option<&'static str> {
        match self {
            Self::Legacy => None,
            Self::V1 => Some("1.0"),
            Self::V2 => Some("2.0"),
        }
    }

    const fn validation_style(self) -> ValidationStyle {
        match self {
            Self::Legacy | Self::V1 => ValidationStyle::BadRequest,
            Self::V2 => ValidationStyle::ValidationFailed,
        }
    }

    /// Map a use-case error with this group's validation labelling.
    pub fn reject(self, error: Error) -> ApiError {
        ApiError::from_domain(error, self.validation_style())
    }

    fn meta(self) -> Meta {
        match self.version_tag() {
            Some(tag) => Meta::new().with("version", tag),
            None => Meta::new(),
        }
    }
}

// Legacy and v1 handler bodies. Misses on these groups answer with a bare
// 404 and no document.

async fn create(
    state: &HttpState,
    version: ApiVersion,
    body: ProductDocument,
) -> ApiResult<HttpResponse> {
    let created = state
        .products
        .create_product(body.data)
        .await
        .map_err(|error| version.reject(error))?;
    Ok(json_api_response(
        StatusCode::CREATED,
        &JsonApiDocument::data(created).with_meta(version.meta()),
    ))
}

async fn show(state: &HttpState, version: ApiVersion, id: ProductId) -> ApiResult<HttpResponse> {
    let found = state
        .products
        .get_product_by_id(id)
        .await
        .map_err(|error| version.reject(error))?;
    Ok(match found {
        Some(product) => json_api_response(
            StatusCode::OK,
            &JsonApiDocument::data(product)
                .with_links(Links::new().with("self", version.resource_path(id)))
                .with_meta(version.meta()),
        ),
        None => HttpResponse::NotFound().finish(),
    })
}

async fn list(state: &HttpState, version: ApiVersion) -> ApiResult<HttpResponse> {
    let products = state
        .products
        .get_all_products()
        .await
        .map_err(|error| version.reject(error))?;
    let meta = version.meta().with("count", products.len());
    Ok(json_api_response(
        StatusCode::OK,
        &JsonApiDocument::data(products)
            .with_links(Links::new().with("self", version.collection_path()))
            .with_meta(meta),
    ))
}

async fn update(
    state: &HttpState,
    version: ApiVersion,
    id: ProductId,
    body: ProductDocument,
) -> ApiResult<HttpResponse> {
    let updated = state
        .products
        .update_product(id, body.data)
        .await
        .map_err(|error| version.reject(error))?;
    Ok(match updated {
        Some(product) => json_api_response(
            StatusCode::OK,
            &JsonApiDocument::data(product).with_meta(version.meta()),
        ),
        None => HttpResponse::NotFound().finish(),
    })
}

async fn delete(state: &HttpState, version: ApiVersion, id: ProductId) -> ApiResult<HttpResponse> {
    let deleted = state
        .products
        .delete_product(id)
        .await
        .map_err(|error| version.reject(error))?;
    Ok(if deleted {
        HttpResponse::NoContent().finish()
    } else {
        HttpResponse::NotFound().finish()
    })
}
