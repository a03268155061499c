//! Unversioned product routes under `/api/products`.
//!
//! Kept for clients that predate versioning; behaves like v1 without
//! `meta.version`.

bare_product_routes! {
    version: ApiVersion::Legacy,
    collection: "/api/products",
    resource: "/api/products/{id}",
    tag: "products-legacy",
    operation_ids: {
        create: "createProductLegacy",
        list: "listProductsLegacy",
        get: "getProductLegacy",
        update: "updateProductLegacy",
        delete: "deleteProductLegacy",
    },
}
