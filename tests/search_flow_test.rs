//! Search page integration tests
//!
//! Drives `FilterStateController` against a `wiremock` catalog service.

mod common;

use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use phonefinder::details::DetailsView;
use phonefinder::search::{NumericField, ResultsView};
use phonefinder::{FilterCriteria, FilterStateController, PersistedSearchState, PersistenceStore};

use common::{client_for, mount_catalog, phone_json, temp_sled_store};

#[tokio::test]
async fn test_apple_search_renders_and_persists() {
    let server = MockServer::start().await;
    mount_catalog(&server, &["Apple", "Samsung"], 50.0, 1500.0).await;

    let expected_body = json!({
        "brand": "Apple",
        "min_price": 100.0,
        "max_price": 500.0,
        "min_battery": null,
        "min_ram": null,
        "min_camera_mp": null
    });
    Mock::given(method("POST"))
        .and(path("/filter"))
        .and(body_json(expected_body))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "results": [
                phone_json("iPhone 13", "Apple", 499.0, 80.0),
                phone_json("iPhone SE", "Apple", 299.0, 95.0)
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = FilterStateController::new(client_for(&server), PersistenceStore::in_memory());
    let report = page.load_page().await;
    assert_eq!(report.brands_loaded, 2);

    page.select_brand("Apple");
    page.range_mut().set([100.0, 500.0]);
    let results = page.search().await.unwrap().expect("slider attached");

    // Service order is kept even though it is not sorted by score
    assert_eq!(results.len(), 2);
    let names: Vec<&str> = page
        .view()
        .cards()
        .iter()
        .map(|c| c.phone.name.as_str())
        .collect();
    assert_eq!(names, vec!["iPhone 13", "iPhone SE"]);
    assert_eq!(page.renderer().render_count(), 1);

    let saved = page.store().load().expect("state persisted");
    assert_eq!(
        saved.filters,
        FilterCriteria {
            brand: Some("Apple".to_string()),
            min_price: 100.0,
            max_price: 500.0,
            min_battery: None,
            min_ram: None,
            min_camera_mp: None,
        }
    );
    assert_eq!(saved.results, results);
}

#[tokio::test]
async fn test_numeric_fields_are_sent() {
    let server = MockServer::start().await;
    mount_catalog(&server, &[], 0.0, 2000.0).await;

    Mock::given(method("POST"))
        .and(path("/filter"))
        .and(body_json(json!({
            "brand": null,
            "min_price": 0.0,
            "max_price": 2000.0,
            "min_battery": 5000.0,
            "min_ram": null,
            "min_camera_mp": 64.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let mut page = FilterStateController::new(client_for(&server), PersistenceStore::in_memory());
    page.load_page().await;
    page.set_field(NumericField::MinBattery, "5000");
    page.set_field(NumericField::MinRam, "plenty");
    page.set_field(NumericField::MinCamera, "64");

    let results = page.search().await.unwrap().unwrap();
    assert!(results.is_empty());
    assert_eq!(page.view(), &ResultsView::NoResults);
}

#[tokio::test]
async fn test_reload_always_starts_from_defaults() {
    let server = MockServer::start().await;
    mount_catalog(&server, &["Apple"], 50.0, 1500.0).await;

    let (store, _tmp) = temp_sled_store();
    store
        .save(&PersistedSearchState {
            filters: FilterCriteria {
                brand: Some("Apple".to_string()),
                min_price: 100.0,
                max_price: 500.0,
                min_battery: None,
                min_ram: None,
                min_camera_mp: None,
            },
            results: vec![serde_json::from_value(phone_json("Old", "Apple", 400.0, 70.0)).unwrap()],
        })
        .unwrap();

    let mut page = FilterStateController::new(client_for(&server), store);
    let report = page.load_page().await;

    assert!(!report.restored);
    assert_eq!(page.form().brand, "");
    assert_eq!(page.form().min_battery, "");
    assert_eq!(page.range().get(), Some([50.0, 1500.0]));
    assert_eq!(page.view(), &ResultsView::Blank);
    assert!(page.store().load().is_none());
}

#[tokio::test]
async fn test_search_failure_keeps_previous_results() {
    let server = MockServer::start().await;
    mount_catalog(&server, &[], 0.0, 1000.0).await;

    Mock::given(method("POST"))
        .and(path("/filter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [phone_json("First", "Nokia", 199.0, 60.0)]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/filter"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let mut page = FilterStateController::new(client_for(&server), PersistenceStore::in_memory());
    page.load_page().await;
    page.search().await.unwrap();
    assert_eq!(page.current_results().len(), 1);

    assert!(page.search().await.is_err());
    assert_eq!(page.current_results()[0].name, "First");
    assert_eq!(page.view().cards().len(), 1);
    assert_eq!(page.store().load().unwrap().results.len(), 1);
}

#[tokio::test]
async fn test_unavailable_price_range_blocks_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/brands"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["Apple"])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/price-range"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/filter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "results": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let mut page = FilterStateController::new(client_for(&server), PersistenceStore::in_memory());
    let report = page.load_page().await;

    assert_eq!(report.brands_loaded, 1);
    assert!(report.slider.is_none());
    assert_eq!(page.search().await.unwrap(), None);
}

#[tokio::test]
async fn test_select_hands_off_to_details_across_reopen() {
    let server = MockServer::start().await;
    mount_catalog(&server, &[], 0.0, 1000.0).await;
    Mock::given(method("POST"))
        .and(path("/filter"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [
                phone_json("A", "Xiaomi", 250.0, 90.0),
                phone_json("B", "Xiaomi", 350.0, 85.0)
            ]
        })))
        .mount(&server)
        .await;

    let tmp = tempfile::TempDir::new().unwrap();
    let db_path = tmp.path().join("page-storage");
    {
        let store = PersistenceStore::new(std::sync::Arc::new(
            phonefinder::storage::SledStore::open(&db_path).unwrap(),
        ));
        let mut page = FilterStateController::new(client_for(&server), store);
        page.load_page().await;
        page.search().await.unwrap();
        let selected = page.select(1).unwrap().cloned();
        assert_eq!(selected.map(|p| p.name), Some("B".to_string()));
    }

    // The details page is a fresh navigation reading the same storage
    let store = PersistenceStore::new(std::sync::Arc::new(
        phonefinder::storage::SledStore::open(&db_path).unwrap(),
    ));
    let details = DetailsView::load(&store).expect("selected phone stored");
    assert_eq!(details.phone.name, "B");
    assert_eq!(details.phone.price, 350.0);
    assert!(details.to_html().contains("Price within budget"));
}
