use axum::body::Body;
use axum::http::Request;
use bb_server::{app_with_state, state::AppState};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::seq::SliceRandom;
use tokio::runtime::Runtime;
use tower::ServiceExt;

fn bench_http_health(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    c.bench_function("http_health_1000", |b| {
        b.iter(|| {
            rt.block_on(async {
                let state = AppState::new();
                for _ in 0..1000 {
                    let app = app_with_state(state.clone());
                    let req = Request::builder()
                        .uri("/health")
                        .body(Body::empty())
                        .unwrap();
                    let resp = app.oneshot(req).await.unwrap();
                    black_box(resp.status());
                }
            })
        })
    });
}

fn bench_http_session_create_get(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    c.bench_function("http_session_create_get_100", |b| {
        b.iter(|| {
            rt.block_on(async {
                let state = AppState::new();
                let mut ids = Vec::new();
                for _ in 0..100 {
                    let app = app_with_state(state.clone());
                    let req = Request::builder()
                        .method("POST")
                        .uri("/api/session")
                        .body(Body::empty())
                        .unwrap();
                    let resp = app.oneshot(req).await.unwrap();
                    black_box(resp.status());
                    ids.push(state.sessions.list().last().unwrap().id.clone());
                }
                let mut rng = rand::thread_rng();
                for _ in 0..100 {
                    let id = ids.choose(&mut rng).unwrap();
                    let app = app_with_state(state.clone());
                    let req = Request::builder()
                        .uri(format!("/api/session/{id}"))
                        .body(Body::empty())
                        .unwrap();
                    let resp = app.oneshot(req).await.unwrap();
                    black_box(resp.status());
                }
            })
        })
    });
}

criterion_group!(benches, bench_http_health, bench_http_session_create_get);
criterion_main!(benches);
