use data_loader::{Category, Ownership};
use sources::test_support::MockBackend;
use sources::{ASSOC_ATTRACTIONS_PATH, EH_PROPERTIES_PATH, SourceConfig};
use viewer::MapViewer;

const EH_BODY: &str = r#"{
    "2": {"name": "Stonehenge", "ownership": "ehProperty", "popular": true,
          "categories": ["Prehistoric"], "lat": 51.1789, "lng": -1.8262},
    "10": {"name": "Kenilworth Castle", "ownership": "ehProperty",
           "categories": ["Castle"], "lat": 52.3474, "lng": -1.5925}
}"#;

const ASSOC_BODY: &str = r#"{
    "500": {"name": "Leeds Castle", "ownership": "assocAttraction",
            "categories": ["Castle", "Garden"], "lat": 51.2489, "lng": 0.6304}
}"#;

async fn backend() -> MockBackend {
    MockBackend::start()
        .await
        .route(EH_PROPERTIES_PATH, 200, EH_BODY)
        .route(ASSOC_ATTRACTIONS_PATH, 200, ASSOC_BODY)
}

#[tokio::test]
async fn test_load_over_http() {
    let backend = backend().await;
    let mut viewer = MapViewer::from_config(&SourceConfig::new(backend.base_url())).unwrap();

    let loaded = viewer.load().await.unwrap();

    assert_eq!(loaded, 3);
    let ids: Vec<_> = viewer.attractions().iter().map(|a| a.id.as_str()).collect();
    assert_eq!(ids, vec!["2", "10", "500"], "EH records first, keys in numeric order");
    assert_eq!(viewer.markers().len(), 3);
}

#[tokio::test]
async fn test_filtering_after_http_load() {
    let backend = backend().await;
    let mut viewer = MapViewer::from_config(&SourceConfig::new(backend.base_url())).unwrap();
    viewer.load().await.unwrap();

    viewer.on_category_change(Category::Castle, true);
    let names: Vec<_> = viewer.visible().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Kenilworth Castle", "Leeds Castle"]);

    viewer.on_ownership_change(&Ownership::EhProperty, true);
    let names: Vec<_> = viewer.visible().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Stonehenge", "Kenilworth Castle", "Leeds Castle"]);
}

#[tokio::test]
async fn test_one_endpoint_down_loads_nothing() {
    let backend = MockBackend::start()
        .await
        .route(EH_PROPERTIES_PATH, 200, EH_BODY)
        .route(ASSOC_ATTRACTIONS_PATH, 500, r#"{"error": "boom"}"#);
    let mut viewer = MapViewer::from_config(&SourceConfig::new(backend.base_url())).unwrap();

    let err = viewer.load().await.unwrap_err();

    assert!(format!("{err:#}").contains("500"));
    assert!(viewer.attractions().is_empty());
}

#[tokio::test]
async fn test_load_from_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(data_loader::EH_PROPERTIES_FILE), EH_BODY).unwrap();
    std::fs::write(dir.path().join(data_loader::ASSOC_ATTRACTIONS_FILE), ASSOC_BODY).unwrap();

    let mut viewer = MapViewer::from_data_dir(dir.path());
    assert_eq!(viewer.load().await.unwrap(), 3);

    viewer.on_popular_change(true);
    let names: Vec<_> = viewer.visible().iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["Stonehenge"]);
}
