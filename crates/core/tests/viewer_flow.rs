use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use debox::prelude::*;
use debox::{DataSource, LoadCause};
use std::net::SocketAddr;

const SNOW: &str = r#"{"items":[
    {"id":"S-1","title":"세종로 제설함","dept":"종로구청","lat":37.5762,"lng":126.9770},
    {"id":"S-2","title":"사직로 제설함","dept":"종로구청","lat":37.5745,"lng":126.9740},
    {"id":"S-3","title":"을지로 제설함","dept":"중구청","lat":37.5660,"lng":126.9910}
]}"#;

const CALCIUM: &str = r#"{"items":[
    {"id":"C-1","title":"광화문 보관함","dept":"종로구청","lat":37.5758,"lng":126.9768,"type":"calcium"}
]}"#;

async fn serve(app: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

fn json(body: &'static str) -> ([(&'static str, &'static str); 1], &'static str) {
    ([("content-type", "application/json")], body)
}

fn headless(config: &Config) -> HeadlessMap {
    HeadlessMap::around(config.initial_center, 0.005, config.initial_level)
}

#[tokio::test]
async fn test_start_over_http_with_both_categories() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let app = Router::new()
        .route("/debox/snow_boxes_final.json", get(|| async { json(SNOW) }))
        .route("/debox/calcium_final.json", get(|| async { json(CALCIUM) }));
    let addr = serve(app).await;

    let config = Config::default().with_data_base(format!("http://{addr}/debox"));
    let map = headless(&config);
    let mut viewer = Viewer::start(config, map, StatusLine::default()).await?;

    assert_eq!(viewer.active_category(), Category::Snow);
    assert_eq!(viewer.map().markers().len(), 3);
    assert_eq!(viewer.map().markers()[0].id(), "S-1");
    // S-3 lies outside the ±0.005° window around Gwanghwamun.
    assert_eq!(viewer.display().visible_count, 2);

    viewer.switch_category(Category::Calcium);
    assert_eq!(viewer.map().markers().len(), 1);
    assert_eq!(viewer.display().label, "염화칼슘보관함");
    assert_eq!(viewer.display().visible_count, 1);
    Ok(())
}

#[tokio::test]
async fn test_one_category_failing_keeps_the_other() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let app = Router::new()
        .route("/debox/snow_boxes_final.json", get(|| async { json(SNOW) }))
        .route(
            "/debox/calcium_final.json",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
    let addr = serve(app).await;

    let config = Config::default().with_data_base(format!("http://{addr}/debox"));
    let loader = Loader::new(&config)?;
    let mut store = DataStore::new();
    let report = store.load_all(&loader, &config).await;

    assert!(report.failed(Category::Calcium));
    let (_, err) = &report.failures[0];
    assert!(err.origin.ends_with("/debox/calcium_final.json"));
    assert!(matches!(err.cause, LoadCause::Status(status) if status.as_u16() == 500));

    let map = headless(&config);
    let mut viewer = Viewer::with_store(config, store, map, StatusLine::default())?;
    assert_eq!(viewer.map().markers().len(), 3);

    let summary = viewer.switch_category(Category::Calcium).unwrap();
    assert_eq!(summary.placed, 0);
    assert_eq!(viewer.display().visible_count, 0);

    viewer.switch_category(Category::Snow);
    assert_eq!(viewer.map().markers().len(), 3);
    Ok(())
}

#[tokio::test]
async fn test_all_categories_failing_is_fatal() {
    let app = Router::new();
    let addr = serve(app).await;

    let config = Config::default().with_data_base(format!("http://{addr}/debox"));
    let map = headless(&config);
    let result = Viewer::start(config, map, StatusLine::default()).await;
    assert!(matches!(result, Err(ViewerError::NoData)));
}

#[tokio::test]
async fn test_malformed_documents() {
    let app = Router::new()
        .route("/no-items.json", get(|| async { json(r#"{"data":[]}"#) }))
        .route("/items-object.json", get(|| async { json(r#"{"items":{}}"#) }))
        .route("/garbage.json", get(|| async { json("<html></html>") }));
    let addr = serve(app).await;
    let loader = Loader::new(&Config::default()).unwrap();
    let base = format!("http://{addr}");

    for (file, shape) in [
        ("no-items.json", true),
        ("items-object.json", true),
        ("garbage.json", false),
    ] {
        let source = DataSource::resolve(&base, file).unwrap();
        let err = loader.load(&source).await.unwrap_err();
        match err.cause {
            LoadCause::Shape(_) => assert!(shape, "{file}"),
            LoadCause::Json(_) => assert!(!shape, "{file}"),
            other => panic!("{file}: unexpected cause {other}"),
        }
    }
}

#[tokio::test]
async fn test_reload_swaps_datasets() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    std::fs::write(dir.path().join("snow_boxes_final.json"), SNOW)?;
    std::fs::write(dir.path().join("calcium_final.json"), CALCIUM)?;

    let config = Config::default().with_data_base(dir.path().to_string_lossy());
    let loader = Loader::new(&config)?;
    let map = headless(&config);
    let mut viewer = Viewer::start(config, map, StatusLine::default()).await?;
    let before = viewer.store().current_dataset().clone();

    std::fs::write(
        dir.path().join("snow_boxes_final.json"),
        r#"{"items":[{"id":"S-9","title":"새 제설함","dept":"종로구청","lat":37.5759,"lng":126.9768}]}"#,
    )?;
    let report = viewer.reload(&loader).await;

    assert!(report.is_complete());
    assert_eq!(before.len(), 3);
    assert_eq!(viewer.store().current_dataset().len(), 1);
    assert_eq!(viewer.map().markers()[0].id(), "S-9");
    Ok(())
}
