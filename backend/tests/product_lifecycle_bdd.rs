//! Behaviour tests for the product lifecycle across route groups.
//!
//! Each request builds a fresh application over shared dependencies, so the
//! in-memory repository carries state from step to step.

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use actix_web::http::Method;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::test::{self as actix_test, TestRequest};
use product_api::inbound::http::api_key::API_KEY_HEADER;
use product_api::inbound::http::json_api::JSON_API_MEDIA_TYPE;
use product_api::inbound::http::{AppDependencies, build_app};
use product_api::test_support::{InMemoryProductRepository, TEST_API_KEY, default_app_dependencies};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;

struct ProductWorld {
    deps: AppDependencies,
    repository: Arc<InMemoryProductRepository>,
    api_key: RefCell<Option<String>>,
    product_id: RefCell<Option<String>>,
    last_status: Cell<Option<u16>>,
    last_body: RefCell<Option<Value>>,
}

struct Outgoing<'a> {
    method: Method,
    path: &'a str,
    content_type: Option<&'a str>,
    body: Option<String>,
}

impl ProductWorld {
    fn new() -> Self {
        let (deps, repository) = default_app_dependencies();
        Self {
            deps,
            repository,
            api_key: RefCell::new(None),
            product_id: RefCell::new(None),
            last_status: Cell::new(None),
            last_body: RefCell::new(None),
        }
    }

    fn send(&self, outgoing: Outgoing<'_>) {
        let deps = self.deps.clone();
        let api_key = self.api_key.borrow().clone();
        let (status, body) = actix_rt::System::new().block_on(async move {
            let app = actix_test::init_service(build_app(deps)).await;
            let mut req = TestRequest::default()
                .method(outgoing.method)
                .uri(outgoing.path);
            if let Some(key) = api_key {
                req = req.insert_header((API_KEY_HEADER, key));
            }
            if let Some(content_type) = outgoing.content_type {
                req = req.insert_header((CONTENT_TYPE, content_type));
            }
            if let Some(body) = outgoing.body {
                req = req.set_payload(body);
            }
            let res = actix_test::call_service(&app, req.to_request()).await;
            let status = res.status().as_u16();
            let bytes = actix_test::read_body(res).await;
            let body = (!bytes.is_empty())
                .then(|| serde_json::from_slice::<Value>(&bytes).expect("JSON body"));
            (status, body)
        });
        self.last_status.set(Some(status));
        self.last_body.replace(body);
    }

    fn create(&self, path: &str, name: &str, price: &str) {
        let document = format!(
            r#"{{"data":{{"type":"products","attributes":{{"name":"{name}","price":{price}}}}}}}"#
        );
        self.send(Outgoing {
            method: Method::POST,
            path,
            content_type: Some(JSON_API_MEDIA_TYPE),
            body: Some(document),
        });
        let id = self
            .last_body
            .borrow()
            .as_ref()
            .and_then(|body| body.pointer("/data/id"))
            .and_then(Value::as_str)
            .map(str::to_owned);
        self.product_id.replace(id);
    }

    fn product_path(&self, base: &str) -> String {
        let id = self.product_id.borrow().clone().expect("product created");
        format!("{base}/{id}")
    }

    fn body_at(&self, pointer: &str) -> Value {
        self.last_body
            .borrow()
            .as_ref()
            .and_then(|body| body.pointer(pointer))
            .cloned()
            .unwrap_or_else(|| panic!("response should contain {pointer}"))
    }
}

#[fixture]
fn world() -> ProductWorld {
    ProductWorld::new()
}

#[given("a client holding a valid API key")]
fn a_client_holding_a_valid_api_key(world: &ProductWorld) {
    world.api_key.replace(Some(TEST_API_KEY.to_owned()));
}

#[given("a client without an API key")]
fn a_client_without_an_api_key(world: &ProductWorld) {
    world.api_key.replace(None);
}

#[given("a product named {name} priced {price} exists")]
fn a_product_exists(world: &ProductWorld, name: String, price: String) {
    world.create("/api/v1/products", &name, &price);
    assert_eq!(world.last_status.get(), Some(201), "seed product created");
}

#[given("{count} products exist")]
fn products_exist(world: &ProductWorld, count: usize) {
    for index in 0..count {
        world.create("/api/v1/products", &format!("Item {index}"), "1.00");
    }
    assert_eq!(world.repository.len(), count);
}

#[when("the client creates a product named {name} priced {price} on {path}")]
fn the_client_creates_a_product(world: &ProductWorld, name: String, price: String, path: String) {
    world.create(&path, &name, &price);
}

#[when("the client fetches {path}")]
fn the_client_fetches(world: &ProductWorld, path: String) {
    world.send(Outgoing {
        method: Method::GET,
        path: &path,
        content_type: None,
        body: None,
    });
}

#[when("the client reprices the product to {price} on {base}")]
fn the_client_reprices_the_product(world: &ProductWorld, price: String, base: String) {
    let path = world.product_path(&base);
    let document = format!(
        r#"{{"data":{{"type":"products","attributes":{{"name":"Widget","price":{price}}}}}}}"#
    );
    world.send(Outgoing {
        method: Method::PUT,
        path: &path,
        content_type: Some(JSON_API_MEDIA_TYPE),
        body: Some(document),
    });
}

#[when("the client deletes the product on {base}")]
fn the_client_deletes_the_product(world: &ProductWorld, base: String) {
    let path = world.product_path(&base);
    world.send(Outgoing {
        method: Method::DELETE,
        path: &path,
        content_type: None,
        body: None,
    });
}

#[when("the client sends plain JSON to {path}")]
fn the_client_sends_plain_json(world: &ProductWorld, path: String) {
    world.send(Outgoing {
        method: Method::POST,
        path: &path,
        content_type: Some("application/json"),
        body: Some(
            r#"{"data":{"type":"products","attributes":{"name":"Widget","price":9.99}}}"#
                .to_owned(),
        ),
    });
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &ProductWorld, status: u16) {
    assert_eq!(world.last_status.get(), Some(status));
}

#[then("the returned product is named {name} and priced {price}")]
fn the_returned_product_is(world: &ProductWorld, name: String, price: String) {
    assert_eq!(world.body_at("/data/attributes/name"), Value::from(name));
    assert_eq!(world.body_at("/data/attributes/price").to_string(), price);
}

#[then("the response version is {version}")]
fn the_response_version_is(world: &ProductWorld, version: String) {
    assert_eq!(world.body_at("/meta/version"), Value::from(version));
}

#[then("the first error code is {code}")]
fn the_first_error_code_is(world: &ProductWorld, code: String) {
    assert_eq!(world.body_at("/errors/0/code"), Value::from(code));
}

#[then("{count} products are stored")]
fn products_are_stored(world: &ProductWorld, count: usize) {
    assert_eq!(world.repository.len(), count);
}

#[then("the response holds {count} products")]
fn the_response_holds_products(world: &ProductWorld, count: usize) {
    let data = world.body_at("/data");
    assert_eq!(data.as_array().map(Vec::len), Some(count));
}

#[then("the response meta {key} is {value}")]
fn the_response_meta_is(world: &ProductWorld, key: String, value: String) {
    assert_eq!(world.body_at(&format!("/meta/{key}")).to_string(), value);
}

#[scenario(
    path = "tests/features/product_lifecycle.feature",
    name = "Creating a product on the v1 routes"
)]
fn creating_a_product_on_v1(world: ProductWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/product_lifecycle.feature",
    name = "Creating a product without an API key"
)]
fn creating_a_product_without_a_key(world: ProductWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/product_lifecycle.feature",
    name = "Fetching a product that does not exist"
)]
fn fetching_a_missing_product(world: ProductWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/product_lifecycle.feature",
    name = "Rejecting a negative price on the v2 routes"
)]
fn rejecting_a_negative_price_on_v2(world: ProductWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/product_lifecycle.feature",
    name = "Deleting a product twice"
)]
fn deleting_a_product_twice(world: ProductWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/product_lifecycle.feature",
    name = "Sending plain JSON"
)]
fn sending_plain_json(world: ProductWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/product_lifecycle.feature",
    name = "Paging through v2 products"
)]
fn paging_through_v2_products(world: ProductWorld) {
    drop(world);
}
