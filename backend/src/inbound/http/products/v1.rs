//! Version 1.0 product routes under `/api/v1/products`.
//!
//! Data responses carry `meta.version = "1.0"`; the collection adds
//! `meta.count`.

bare_product_routes! {
    version: ApiVersion::V1,
    collection: "/api/v1/products",
    resource: "/api/v1/products/{id}",
    tag: "products-v1",
    operation_ids: {
        create: "createProductV1",
        list: "listProductsV1",
        get: "getProductV1",
        update: "updateProductV1",
        delete: "deleteProductV1",
    },
}
