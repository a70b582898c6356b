use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use phonefinder::config::ServiceConfig;
use phonefinder::storage::{PersistenceStore, SledStore};
use phonefinder::ApiClient;

#[allow(dead_code)]
pub fn client_for(server: &MockServer) -> Arc<ApiClient> {
    let config = ServiceConfig {
        base_url: server.uri(),
    };
    Arc::new(ApiClient::new(&config).expect("failed to build client"))
}

#[allow(dead_code)]
pub fn temp_sled_store() -> (PersistenceStore, TempDir) {
    let tmp = TempDir::new().expect("failed to create tempdir");
    let store = SledStore::open(tmp.path().join("page-storage")).expect("failed to open sled");
    (PersistenceStore::new(Arc::new(store)), tmp)
}

#[allow(dead_code)]
pub fn phone_json(name: &str, brand: &str, price: f64, score: f64) -> Value {
    json!({
        "name": name,
        "brand": brand,
        "price": price,
        "battery": 4000,
        "camera_mp": 12,
        "ram": 6144,
        "match_percentage": score,
        "image_url": null,
        "reasons": ["Price within budget"],
        "screen": 6.1
    })
}

/// Mount `/brands` and `/price-range`
#[allow(dead_code)]
pub async fn mount_catalog(server: &MockServer, brands: &[&str], min: f64, max: f64) {
    Mock::given(method("GET"))
        .and(path("/brands"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(brands)))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/price-range"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "min": min, "max": max })))
        .mount(server)
        .await;
}
