use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use service::records::{Record, RecordStore};
use service::storage::csv_record_store::CsvRecordStore;
use tower::Service;
use uuid::Uuid;

use server::routes;
use server::state::AppState;

struct TestApp {
    router: Router,
    store: Arc<CsvRecordStore>,
    dir: PathBuf,
}

impl TestApp {
    async fn new() -> anyhow::Result<Self> {
        let dir = std::env::temp_dir().join(format!("record_routes_{}", Uuid::new_v4()));
        let store = CsvRecordStore::new(dir.join("data.csv"));
        store.ensure_initialized().await?;
        let router = routes::build_router(AppState::new(store.clone()));
        Ok(Self { router, store, dir })
    }

    async fn get(&self, uri: &str) -> anyhow::Result<Response> {
        let req = Request::builder().method("GET").uri(uri).body(Body::empty())?;
        Ok(self.router.clone().call(req).await?)
    }

    async fn post_form(&self, uri: &str, body: &str) -> anyhow::Result<Response> {
        let req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))?;
        Ok(self.router.clone().call(req).await?)
    }

    async fn records(&self) -> anyhow::Result<Vec<(String, String)>> {
        Ok(self
            .store
            .load_all()
            .await?
            .into_iter()
            .map(|r| (r.name, r.value))
            .collect())
    }

    async fn cleanup(self) {
        let _ = tokio::fs::remove_dir_all(&self.dir).await;
    }
}

async fn body_text(resp: Response) -> anyhow::Result<String> {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

fn assert_redirect_home(resp: &Response) {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(resp.headers().get(header::LOCATION).and_then(|v| v.to_str().ok()), Some("/"));
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items.iter().map(|(n, v)| (n.to_string(), v.to_string())).collect()
}

#[tokio::test]
async fn list_on_empty_store_renders_page() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let resp = app.get("/").await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let ct = resp.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()).unwrap_or_default().to_string();
    assert!(ct.starts_with("text/html"));
    let html = body_text(resp).await?;
    assert!(html.contains("<h3>Stored Data</h3>"));
    assert!(!html.contains("<td>"));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn add_then_list_shows_record() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let resp = app.post_form("/add", "name=Bob&value=5").await?;
    assert_redirect_home(&resp);

    let html = body_text(app.get("/").await?).await?;
    assert!(html.contains("<td>Bob</td>"));
    assert!(html.contains("<td>5</td>"));
    assert_eq!(app.records().await?, pairs(&[("Bob", "5")]));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn add_does_not_deduplicate() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    app.post_form("/add", "name=Bob&value=5").await?;
    app.post_form("/add", "name=bob&value=6").await?;
    app.post_form("/add", "name=Bob&value=7").await?;
    assert_eq!(
        app.records().await?,
        pairs(&[("Bob", "5"), ("bob", "6"), ("Bob", "7")])
    );
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn add_missing_field_is_rejected_without_saving() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let resp = app.post_form("/add", "name=Bob").await?;
    assert!(resp.status().is_client_error());
    assert!(app.records().await?.is_empty());
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn list_is_sorted_case_insensitively() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    for body in ["name=delta&value=4", "name=Charlie&value=3", "name=alpha&value=1", "name=Bravo&value=2"] {
        app.post_form("/add", body).await?;
    }
    let html = body_text(app.get("/").await?).await?;
    let positions: Vec<usize> = ["alpha", "Bravo", "Charlie", "delta"]
        .iter()
        .map(|n| html.find(&format!("<td>{n}</td>")).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn edit_form_prefills_first_match() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    app.store
        .save_all(&[Record::new("Bob", "5"), Record::new("bob", "6")])
        .await?;
    let resp = app.get("/edit/BOB").await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await?;
    assert!(html.contains("value=\"5\""));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn edit_form_for_missing_name_is_not_found() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let resp = app.get("/edit/nobody").await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let ct = resp.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()).unwrap_or_default().to_string();
    assert!(ct.starts_with("text/plain"));
    assert_eq!(body_text(resp).await?, "Not Found");
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn edit_updates_only_the_matching_record() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    app.post_form("/add", "name=alice&value=2").await?;
    app.post_form("/add", "name=Bob&value=5").await?;
    app.post_form("/add", "name=carol&value=7").await?;

    let resp = app.post_form("/edit/bob", "value=9").await?;
    assert_redirect_home(&resp);
    assert_eq!(
        app.records().await?,
        pairs(&[("alice", "2"), ("Bob", "9"), ("carol", "7")])
    );
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn edit_missing_name_is_not_found_and_leaves_store() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    app.post_form("/add", "name=alice&value=2").await?;
    let before = tokio::fs::read(app.store.path()).await?;

    let resp = app.post_form("/edit/zed", "value=1").await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(resp).await?, "Not Found");

    let after = tokio::fs::read(app.store.path()).await?;
    assert_eq!(before, after);
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn delete_removes_all_case_variants() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    for body in ["name=alice&value=1", "name=ALICE&value=2", "name=Bob&value=3", "name=Alice&value=4"] {
        app.post_form("/add", body).await?;
    }
    let resp = app.get("/delete/aLiCe").await?;
    assert_redirect_home(&resp);
    assert_eq!(app.records().await?, pairs(&[("Bob", "3")]));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn delete_without_match_still_redirects() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    app.post_form("/add", "name=Bob&value=3").await?;
    let resp = app.get("/delete/nobody").await?;
    assert_redirect_home(&resp);
    assert_eq!(app.records().await?, pairs(&[("Bob", "3")]));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn encoded_names_round_trip_through_paths() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    app.post_form("/add", "name=Mary+Ann&value=1").await?;

    let html = body_text(app.get("/").await?).await?;
    assert!(html.contains("href=\"/edit/Mary%20Ann\""));

    let resp = app.post_form("/edit/mary%20ann", "value=2").await?;
    assert_redirect_home(&resp);
    assert_eq!(app.records().await?, pairs(&[("Mary Ann", "2")]));

    app.get("/delete/MARY%20ANN").await?;
    assert!(app.records().await?.is_empty());
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn store_failure_is_a_server_error() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    // replace the file with a directory so reads fail
    tokio::fs::remove_file(app.store.path()).await?;
    tokio::fs::create_dir_all(app.store.path()).await?;

    let resp = app.get("/").await?;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn scenario_add_edit_delete() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    app.post_form("/add", "name=Bob&value=5").await?;
    app.post_form("/add", "name=alice&value=2").await?;
    assert_eq!(app.records().await?, pairs(&[("alice", "2"), ("Bob", "5")]));

    app.post_form("/edit/bob", "value=9").await?;
    assert_eq!(app.records().await?, pairs(&[("alice", "2"), ("Bob", "9")]));

    app.get("/delete/ALICE").await?;
    assert_eq!(app.records().await?, pairs(&[("Bob", "9")]));
    app.cleanup().await;
    Ok(())
}

#[tokio::test]
async fn health_reports_ok() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let resp = app.get("/health").await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = serde_json::from_str(&body_text(resp).await?)?;
    assert_eq!(body["status"], "ok");
    app.cleanup().await;
    Ok(())
}
