//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which wires an in-memory database and a
//! temporary uploads directory into a full [`AppContext`], plus helpers for
//! building multipart bodies and driving the router in-process.

#![allow(dead_code)]

use std::sync::Arc;

use angle_catalog::catalog::{AngleRepository, AngleService, CatalogSettings, SqliteAngleRepository};
use angle_catalog::config::Config;
use angle_catalog::images::LocalFileStore;
use angle_catalog::server::{create_router, AppContext};
use angle_catalog_common::{AngleId, Error, Result};
use angle_catalog_db::models::Angle;
use angle_catalog_db::pool::{init_memory_pool, DbPool};
use angle_catalog_db::queries::angles::{AngleFilter, Pagination};
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

pub const BOUNDARY: &str = "angle-catalog-test-boundary";

/// Test harness wrapping a fully-constructed [`AppContext`].
pub struct TestHarness {
    pub ctx: AppContext,
    pub pool: DbPool,
    pub files: LocalFileStore,
    uploads: Arc<TempDir>,
}

impl TestHarness {
    /// Default configuration, in-memory DB, temporary uploads directory.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self::build(config, new_pool(), new_uploads(), |repo| repo)
    }

    /// Route writes through a repository that always fails them.
    pub fn with_failing_writes() -> Self {
        Self::with_failing_writes_on(new_pool(), Config::default())
    }

    /// Failing writes over an existing database, so reads still see its
    /// records.
    pub fn with_failing_writes_on(pool: DbPool, config: Config) -> Self {
        Self::build(config, pool, new_uploads(), failing)
    }

    /// Failing writes over this harness's database and uploads directory.
    pub fn failing_writes_over(&self) -> Self {
        Self::build(
            (*self.ctx.config).clone(),
            self.pool.clone(),
            self.uploads.clone(),
            failing,
        )
    }

    fn build(
        mut config: Config,
        pool: DbPool,
        uploads: Arc<TempDir>,
        wrap: impl FnOnce(Arc<dyn AngleRepository>) -> Arc<dyn AngleRepository>,
    ) -> Self {
        config.storage.uploads_dir = uploads.path().to_path_buf();

        let files = LocalFileStore::for_angles(uploads.path());
        let repo = wrap(Arc::new(SqliteAngleRepository::new(pool.clone())));
        let angles = AngleService::new(
            repo,
            Arc::new(files.clone()),
            CatalogSettings::from(&config.catalog),
        );

        let ctx = AppContext {
            config: Arc::new(config),
            angles: Arc::new(angles),
        };

        Self {
            ctx,
            pool,
            files,
            uploads,
        }
    }

    pub fn router(&self) -> Router {
        create_router(self.ctx.clone())
    }

    /// Send one request through a fresh router.
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into()))
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, serde_json::Value) {
        self.send(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn post_form(&self, uri: &str, form: MultipartBody) -> (StatusCode, serde_json::Value) {
        self.send(form.into_request("POST", uri)).await
    }

    pub async fn put_form(&self, uri: &str, form: MultipartBody) -> (StatusCode, serde_json::Value) {
        self.send(form.into_request("PUT", uri)).await
    }

    /// Create a record through the API and return its JSON.
    pub async fn create(&self, form: MultipartBody) -> serde_json::Value {
        let (status, json) = self.post_form("/api/angles", form).await;
        assert_eq!(status, StatusCode::CREATED, "create failed: {json}");
        json["Angle"].clone()
    }

    /// Names of the files currently stored in the angle uploads directory.
    pub fn stored_files(&self) -> Vec<String> {
        let Ok(entries) = std::fs::read_dir(self.files.dir()) else {
            return Vec::new();
        };
        let mut names: Vec<String> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

fn new_uploads() -> Arc<TempDir> {
    Arc::new(tempfile::tempdir().expect("failed to create uploads dir"))
}

fn failing(repo: Arc<dyn AngleRepository>) -> Arc<dyn AngleRepository> {
    Arc::new(FailingRepository::new(repo))
}

fn new_pool() -> DbPool {
    init_memory_pool().expect("failed to create in-memory pool")
}

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct MultipartBody {
    body: Vec<u8>,
}

impl MultipartBody {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, data: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(data);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn image(self, file_name: &str) -> Self {
        self.file("avatarAngle", file_name, b"\x89PNG\r\n\x1a\nfake")
    }

    pub fn into_request(mut self, method: &str, uri: &str) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        Request::builder()
            .method(method)
            .uri(uri)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(self.body))
            .unwrap()
    }
}

/// Form for a typical record.
pub fn sample_form(name: &str, status: &str) -> MultipartBody {
    MultipartBody::new()
        .text("angle_name", name)
        .text("angledescription", "Corner profile")
        .text("border_radius", "4,2,4,8")
        .text("price", "120")
        .text("discount_option", "percentage")
        .text("discounted_percentage", "10")
        .text("discounted_price", "108")
        .text("vat_amount", "21.6")
        .text("status", status)
}

/// Repository wrapper whose writes always fail; reads pass through.
pub struct FailingRepository {
    inner: Arc<dyn AngleRepository>,
}

impl FailingRepository {
    pub fn new(inner: Arc<dyn AngleRepository>) -> Self {
        Self { inner }
    }
}

impl AngleRepository for FailingRepository {
    fn find_by_id(&self, id: AngleId) -> Result<Option<Angle>> {
        self.inner.find_by_id(id)
    }

    fn find(&self, filter: &AngleFilter, pagination: Option<Pagination>) -> Result<Vec<Angle>> {
        self.inner.find(filter, pagination)
    }

    fn count(&self, filter: &AngleFilter) -> Result<u64> {
        self.inner.count(filter)
    }

    fn create(&self, _angle: &Angle) -> Result<()> {
        Err(Error::database("simulated write failure"))
    }

    fn update(&self, _angle: &Angle) -> Result<()> {
        Err(Error::database("simulated write failure"))
    }

    fn delete(&self, _id: AngleId) -> Result<bool> {
        Err(Error::database("simulated write failure"))
    }
}
