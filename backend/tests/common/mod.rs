//! Helpers shared by the router tests

#![allow(dead_code)]

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use agri::ml::{ArtifactError, Classifier, Scaler};
use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Request, Response, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

const BODY_LIMIT: usize = 1024 * 1024;

/// Classifier that always predicts the same code and counts its calls
pub struct FixedClassifier {
    pub n_features: usize,
    pub code: i64,
    pub calls: AtomicUsize,
}

impl FixedClassifier {
    pub fn new(n_features: usize, code: i64) -> Arc<Self> {
        Arc::new(Self {
            n_features,
            code,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Classifier for FixedClassifier {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: &[f64]) -> Result<i64, ArtifactError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if features.len() != self.n_features {
            return Err(ArtifactError::FeatureCount {
                expected: self.n_features,
                actual: features.len(),
            });
        }
        Ok(self.code)
    }
}

/// Scaler that leaves `n` features unchanged
pub fn identity_scaler(n: usize) -> Scaler {
    Scaler::Standard {
        mean: vec![0.0; n],
        scale: vec![1.0; n],
    }
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), BODY_LIMIT)
        .await
        .expect("read body");
    serde_json::from_slice(&bytes).expect("parse json")
}

pub async fn post_json(app: Router, uri: &str, body: &Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("build request");

    let response = app.oneshot(request).await.expect("router call");
    let status = response.status();
    (status, json_body(response).await)
}

pub async fn post_raw(
    app: Router,
    uri: &str,
    content_type: &str,
    body: &'static str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .expect("build request");

    let response = app.oneshot(request).await.expect("router call");
    let status = response.status();
    (status, json_body(response).await)
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("build request");

    let response = app.oneshot(request).await.expect("router call");
    let status = response.status();
    (status, json_body(response).await)
}
