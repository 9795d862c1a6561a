//! In-process stub of the vendor API

#![allow(dead_code)]

use axum::extract::{Request, State};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::Router;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use vendor_panel::api::ApiClient;
use vendor_panel::config::ApiConfig;

/// A running stub server and the number of requests it has seen
pub struct Stub {
    pub client: ApiClient,
    hits: Arc<AtomicUsize>,
}

impl Stub {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

async fn count_hits(State(hits): State<Arc<AtomicUsize>>, req: Request, next: Next) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    next.run(req).await
}

/// Serve `routes` under `/api` on an ephemeral port
pub async fn serve(routes: Router) -> Stub {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .nest("/api", routes)
        .layer(middleware::from_fn_with_state(hits.clone(), count_hits));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let config = ApiConfig::new(&format!("http://{}/api", addr)).unwrap();
    Stub {
        client: ApiClient::new(&config).unwrap(),
        hits,
    }
}
