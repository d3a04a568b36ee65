//! Loopback mock of the QA backend for async tests.

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;

use crate::backend::HttpBackend;

/// Serve `router` on an ephemeral port and return its base URL.
pub async fn spawn_backend(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve mock backend");
    });
    format!("http://{addr}")
}

pub async fn backend_for(router: Router) -> HttpBackend {
    let base = spawn_backend(router).await;
    HttpBackend::new(&base, Duration::from_secs(5)).expect("backend client")
}
