//! Integration tests for push-channel synchronization against a mock engine.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::extract::ws::{Message, WebSocketUpgrade};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::sync::{broadcast, Mutex};
use tokio::time::{sleep, timeout};

use boardmirror::{EngineClient, SyncChannel, RELOAD_EVENT};

/// In-memory stand-in for the chessboard engine: a full-state endpoint and
/// a push socket fed from a broadcast channel.
struct MockEngine {
    state: Mutex<Value>,
    reloads: broadcast::Sender<String>,
    fetch_count: AtomicUsize,
    fetch_delay_ms: AtomicU64,
    fail_fetches: AtomicBool,
}

impl MockEngine {
    fn shared(initial: Value) -> Arc<Self> {
        let (reloads, _) = broadcast::channel(16);
        Arc::new(Self {
            state: Mutex::new(initial),
            reloads,
            fetch_count: AtomicUsize::new(0),
            fetch_delay_ms: AtomicU64::new(0),
            fail_fetches: AtomicBool::new(false),
        })
    }

    async fn set_state(&self, body: Value) {
        *self.state.lock().await = body;
    }

    fn push(&self, frame: &str) {
        let _ = self.reloads.send(frame.to_string());
    }

    fn fetches(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }
}

fn body_for(fen: &str) -> Value {
    json!({"board_infos": {"board_fen": fen, "player_to_move": "w"}})
}

async fn engine_data(
    State(engine): State<Arc<MockEngine>>,
) -> Result<Json<Value>, StatusCode> {
    engine.fetch_count.fetch_add(1, Ordering::SeqCst);
    if engine.fail_fetches.load(Ordering::SeqCst) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }

    // Snapshot the state at request start, then simulate a slow response.
    let body = engine.state.lock().await.clone();
    let delay = engine.fetch_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        sleep(Duration::from_millis(delay)).await;
    }
    Ok(Json(body))
}

async fn ws_handler(
    State(engine): State<Arc<MockEngine>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let mut frames = engine.reloads.subscribe();
    ws.on_upgrade(move |mut socket| async move {
        while let Ok(frame) = frames.recv().await {
            if socket.send(Message::Text(frame.into())).await.is_err() {
                break;
            }
        }
    })
}

async fn start_mock(engine: Arc<MockEngine>) -> String {
    let app = Router::new()
        .route("/api/v1/chess_engine_data", get(engine_data))
        .route("/ws", get(ws_handler))
        .with_state(engine);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind failed");
    let addr = listener.local_addr().expect("no local addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("mock engine died");
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_initial_fetch_primes_subscribers() {
    let engine = MockEngine::shared(body_for("8/8/8/8/8/8/8/8"));
    let base_url = start_mock(engine.clone()).await;

    let client = EngineClient::new(&base_url).expect("client build failed");
    let sync = SyncChannel::connect(client).await.expect("connect failed");

    let rx = sync.subscribe();
    assert_eq!(rx.borrow().board_fen(), "8/8/8/8/8/8/8/8");
    assert_eq!(engine.fetches(), 1);
}

#[tokio::test]
async fn test_reload_triggers_refetch_and_publish() {
    let engine = MockEngine::shared(body_for("8/8/8/8/8/8/8/8"));
    let base_url = start_mock(engine.clone()).await;

    let client = EngineClient::new(&base_url).expect("client build failed");
    let sync = SyncChannel::connect(client).await.expect("connect failed");
    let mut rx = sync.subscribe();

    engine.set_state(body_for("4k3/8/8/8/8/8/8/4K3")).await;
    engine.push(RELOAD_EVENT);

    timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("no publish within deadline")
        .expect("channel closed");
    assert_eq!(rx.borrow_and_update().board_fen(), "4k3/8/8/8/8/8/8/4K3");
    assert_eq!(engine.fetches(), 2);
}

#[tokio::test]
async fn test_queued_reload_waits_for_inflight_fetch() {
    let engine = MockEngine::shared(body_for("8/8/8/8/8/8/8/8"));
    let base_url = start_mock(engine.clone()).await;

    let client = EngineClient::new(&base_url).expect("client build failed");
    let sync = SyncChannel::connect(client).await.expect("connect failed");
    let mut rx = sync.subscribe();

    // First reload: the fetch snapshots this state, then stalls.
    engine.set_state(body_for("4k3/8/8/8/8/8/8/4K3")).await;
    engine.fetch_delay_ms.store(300, Ordering::SeqCst);
    engine.push(RELOAD_EVENT);
    sleep(Duration::from_millis(100)).await;

    // Second reload while the first fetch is still in flight.
    engine.set_state(body_for("8/8/8/8/8/8/8/K6k")).await;
    engine.push(RELOAD_EVENT);

    // The first publish reflects the first fetch, not a torn mix.
    timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("no first publish")
        .expect("channel closed");
    assert_eq!(rx.borrow_and_update().board_fen(), "4k3/8/8/8/8/8/8/4K3");

    // The queued reload runs only after the first fetch completed, and the
    // final published state is the latest fetch's data.
    timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("no second publish")
        .expect("channel closed");
    assert_eq!(rx.borrow_and_update().board_fen(), "8/8/8/8/8/8/8/K6k");
    assert_eq!(engine.fetches(), 3);
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_snapshot() {
    let engine = MockEngine::shared(body_for("8/8/8/8/8/8/8/8"));
    let base_url = start_mock(engine.clone()).await;

    let client = EngineClient::new(&base_url).expect("client build failed");
    let sync = SyncChannel::connect(client).await.expect("connect failed");
    let mut rx = sync.subscribe();

    engine.fail_fetches.store(true, Ordering::SeqCst);
    engine.push(RELOAD_EVENT);
    sleep(Duration::from_millis(300)).await;

    // Nothing published; the cached snapshot is still the initial one.
    assert!(!rx.has_changed().expect("channel closed"));
    assert_eq!(rx.borrow().board_fen(), "8/8/8/8/8/8/8/8");

    // The next successful reload recovers.
    engine.fail_fetches.store(false, Ordering::SeqCst);
    engine.set_state(body_for("4k3/8/8/8/8/8/8/4K3")).await;
    engine.push(RELOAD_EVENT);

    timeout(Duration::from_secs(2), rx.changed())
        .await
        .expect("no recovery publish")
        .expect("channel closed");
    assert_eq!(rx.borrow_and_update().board_fen(), "4k3/8/8/8/8/8/8/4K3");
}

#[tokio::test]
async fn test_unknown_frames_are_ignored() {
    let engine = MockEngine::shared(body_for("8/8/8/8/8/8/8/8"));
    let base_url = start_mock(engine.clone()).await;

    let client = EngineClient::new(&base_url).expect("client build failed");
    let sync = SyncChannel::connect(client).await.expect("connect failed");
    let mut rx = sync.subscribe();

    engine.push("chat_message");
    sleep(Duration::from_millis(200)).await;

    assert!(!rx.has_changed().expect("channel closed"));
    assert_eq!(engine.fetches(), 1);
}

#[tokio::test]
async fn test_teardown_mid_flight_discards_fetch() {
    let engine = MockEngine::shared(body_for("8/8/8/8/8/8/8/8"));
    let base_url = start_mock(engine.clone()).await;

    let client = EngineClient::new(&base_url).expect("client build failed");
    let sync = SyncChannel::connect(client).await.expect("connect failed");
    let mut rx = sync.subscribe();

    // Stall the fetch so the teardown races ahead of its completion.
    engine.set_state(body_for("4k3/8/8/8/8/8/8/4K3")).await;
    engine.fetch_delay_ms.store(500, Ordering::SeqCst);
    engine.push(RELOAD_EVENT);
    sleep(Duration::from_millis(150)).await;

    drop(sync);
    sleep(Duration::from_millis(600)).await;

    // The in-flight fetch result is discarded unseen; the cached snapshot
    // is still the priming one.
    assert!(rx.has_changed().is_err(), "publisher should be gone");
    assert_eq!(rx.borrow().board_fen(), "8/8/8/8/8/8/8/8");
    assert_eq!(engine.fetches(), 2);
}

#[tokio::test]
async fn test_teardown_stops_publishing() {
    let engine = MockEngine::shared(body_for("8/8/8/8/8/8/8/8"));
    let base_url = start_mock(engine.clone()).await;

    let client = EngineClient::new(&base_url).expect("client build failed");
    let sync = SyncChannel::connect(client).await.expect("connect failed");
    let mut rx = sync.subscribe();

    drop(sync);
    sleep(Duration::from_millis(100)).await;

    // Reloads after teardown trigger neither fetches nor publishes.
    engine.push(RELOAD_EVENT);
    sleep(Duration::from_millis(200)).await;

    assert!(rx.has_changed().is_err(), "publisher should be gone");
    assert_eq!(engine.fetches(), 1);
}
