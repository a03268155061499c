//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] collects every product, connectivity and actuator endpoint,
//! the JSON:API envelope schemas and the `X-API-Key` security scheme. Swagger
//! UI serves it in debug builds and `cargo run --bin openapi-dump` prints it
//! for external tooling.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::ports::{ProductAttributes, ProductDto};
use crate::domain::{
    ConnectivityOverview, InventoryReport, OverallStatus, ProductServiceReport, ServiceStatus,
};
use crate::inbound::http::health::{HealthBody, ProbeStatus};
use crate::inbound::http::json_api::{ErrorDocument, ErrorSource, JsonApiError, Links, Meta};
use crate::inbound::http::products::v2::{DeleteConfirmation, V2Health};

/// Name of the security scheme registered by [`SecurityAddon`].
pub const API_KEY_SCHEME: &str = "ApiKey";

/// Enrich the generated document with the API key security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            API_KEY_SCHEME,
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "X-API-Key",
                "Shared API key configured through PRODUCT_API_API_KEY.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Product API",
        description = "JSON:API product catalogue with legacy, v1 and v2 route groups.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("ApiKey" = [])),
    paths(
        crate::inbound::http::products::legacy::create_product,
        crate::inbound::http::products::legacy::list_products,
        crate::inbound::http::products::legacy::get_product,
        crate::inbound::http::products::legacy::update_product,
        crate::inbound::http::products::legacy::delete_product,
        crate::inbound::http::products::v1::create_product,
        crate::inbound::http::products::v1::list_products,
        crate::inbound::http::products::v1::get_product,
        crate::inbound::http::products::v1::update_product,
        crate::inbound::http::products::v1::delete_product,
        crate::inbound::http::products::v2::create_product,
        crate::inbound::http::products::v2::list_products,
        crate::inbound::http::products::v2::health,
        crate::inbound::http::products::v2::get_product,
        crate::inbound::http::products::v2::update_product,
        crate::inbound::http::products::v2::delete_product,
        crate::inbound::http::connectivity::inventory,
        crate::inbound::http::connectivity::status,
        crate::inbound::http::health::health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ProductDto,
        ProductAttributes,
        Links,
        Meta,
        ErrorDocument,
        JsonApiError,
        ErrorSource,
        DeleteConfirmation,
        V2Health,
        InventoryReport,
        ProductServiceReport,
        ConnectivityOverview,
        ServiceStatus,
        OverallStatus,
        HealthBody,
        ProbeStatus,
    )),
    tags(
        (name = "products-legacy", description = "Unversioned product routes kept for existing clients"),
        (name = "products-v1", description = "Version 1.0 product routes"),
        (name = "products-v2", description = "Version 2.0 product routes with pagination and richer links"),
        (name = "connectivity", description = "Reachability of downstream services"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying document structure.
    //!
    //! Route coverage through the public crate surface lives in
    //! `backend/tests/openapi_document.rs`.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    /// Assert that an Object schema contains a field with the given name.
    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case("ProductDto", &["id", "type", "attributes"])]
    #[case("ProductAttributes", &["name", "price"])]
    #[case("JsonApiError", &["id", "status", "code", "title", "detail"])]
    #[case("ErrorDocument", &["errors"])]
    fn schemas_expose_wire_fields(#[case] name: &str, #[case] fields: &[&str]) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let schema = schemas.get(name).expect("schema registered");
        for field in fields {
            assert_object_schema_has_field(schema, field);
        }
    }

    #[rstest]
    fn meta_is_documented_as_free_form_object() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let meta = schemas.get("Meta").expect("Meta registered");
        assert!(matches!(meta, RefOr::T(Schema::Object(_))));
    }

    #[rstest]
    fn api_key_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.as_ref().expect("components");
        assert!(components.security_schemes.contains_key(API_KEY_SCHEME));
    }
}
