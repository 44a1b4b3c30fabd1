use chrono::Local;
use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use time_tracker::client::{ActionOutcome, Dashboard, HttpApi, RecordingNotifier, TimerState};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct TimelineRow {
    project_name: String,
    start_time: String,
    end_time: Option<String>,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::Once;
    use std::sync::atomic::{AtomicI32, Ordering};

    static REGISTER: Once = Once::new();
    static PID: AtomicI32 = AtomicI32::new(0);

    pub fn register(pid: u32) {
        REGISTER.call_once(|| {
            PID.store(pid as i32, Ordering::SeqCst);
            unsafe {
                libc::atexit(on_exit);
            }
        });
    }

    extern "C" fn on_exit() {
        let pid = PID.load(Ordering::SeqCst);
        if pid > 0 {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("time_tracker_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/health")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_time_tracker"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn timeline(client: &Client, base_url: &str) -> Vec<TimelineRow> {
    client
        .get(format!("{base_url}/api/timeline"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

fn today_at(clock: &str) -> String {
    format!("{}T{clock}", Local::now().date_naive())
}

#[tokio::test]
async fn http_health_reports_healthy() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let body: Value = Client::new()
        .get(format!("{}/health", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, serde_json::json!({ "status": "healthy" }));
}

#[tokio::test]
async fn http_start_closes_previous_timer_and_stop_closes_all() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/start_timer", server.base_url))
        .json(&serde_json::json!({ "project": "http-first" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Timer started");
    assert!(body["project_id"].is_u64());

    let response = client
        .post(format!("{}/api/start_timer", server.base_url))
        .json(&serde_json::json!({ "project": "http-second" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let rows = timeline(&client, &server.base_url).await;
    let open: Vec<_> = rows.iter().filter(|row| row.end_time.is_none()).collect();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].project_name, "http-second");
    assert!(
        rows.iter()
            .any(|row| row.project_name == "http-first" && row.end_time.is_some())
    );

    let response = client
        .post(format!("{}/api/stop_timer", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let rows = timeline(&client, &server.base_url).await;
    assert!(rows.iter().all(|row| row.end_time.is_some()));
}

#[tokio::test]
async fn http_blank_fields_are_bad_requests() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/start_timer", server.base_url))
        .json(&serde_json::json!({ "project": "  " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client
        .post(format!("{}/api/add_entry", server.base_url))
        .json(&serde_json::json!({ "project": "x", "start_time": "", "end_time": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn http_added_entry_counts_toward_analytics() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/add_entry", server.base_url))
        .json(&serde_json::json!({
            "project": "http-backfill",
            "start_time": today_at("00:00"),
            "end_time": today_at("00:45"),
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let rows = timeline(&client, &server.base_url).await;
    let row = rows
        .iter()
        .find(|row| row.project_name == "http-backfill")
        .expect("missing entry");
    assert_eq!(row.start_time, today_at("00:00"));
    assert_eq!(row.end_time.as_deref(), Some(today_at("00:45").as_str()));

    let analytics: Map<String, Value> = client
        .get(format!("{}/api/analytics", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(analytics["http-backfill"].as_f64(), Some(0.75));

    let hours: Vec<f64> = analytics.values().filter_map(Value::as_f64).collect();
    assert!(hours.windows(2).all(|pair| pair[0] >= pair[1]));
}

#[tokio::test]
async fn http_dashboard_session() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let api = HttpApi::new(&server.base_url).unwrap();
    let mut page = Dashboard::with_notifier(api, RecordingNotifier::default());

    page.load().await;
    assert!(!page.timeline.markup().is_empty());
    assert!(!page.analytics.markup().is_empty());

    page.timer.set_project("dashboard-session");
    assert_eq!(page.start_timer().await, ActionOutcome::Completed);
    assert!(matches!(page.timer.state(), TimerState::Running { .. }));
    assert!(page.timer.stop_enabled());
    assert!(
        page.timeline
            .markup()
            .contains("<strong>dashboard-session</strong>")
    );
    assert!(page.analytics.markup().contains("dashboard-session: "));

    assert_eq!(page.stop_timer().await, ActionOutcome::Completed);
    assert_eq!(page.timer.state(), TimerState::Idle);
    assert_eq!(page.timer.display_text(), "00:00:00");
    assert_eq!(page.timer.project(), "");

    page.entry.fill("dashboard-backfill", today_at("00:00"), today_at("01:00"));
    assert_eq!(page.add_entry().await, ActionOutcome::Completed);
    assert!(page.entry.project.is_empty());
    assert!(page.analytics.markup().contains("dashboard-backfill: 1.00 hours"));
    assert_eq!(page.notifier().last(), Some("Entry added successfully!"));

    let index = Client::new()
        .get(&server.base_url)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(index.contains("dashboard-backfill"));
}

#[tokio::test]
async fn http_unreachable_server_is_reported() {
    let port = pick_free_port();
    let api = HttpApi::new(&format!("http://127.0.0.1:{port}")).unwrap();
    let mut page = Dashboard::with_notifier(api, RecordingNotifier::default());

    page.load().await;
    assert_eq!(page.timeline.markup(), "Failed to load timeline.");
    assert_eq!(page.analytics.markup(), "Failed to load analytics.");

    page.timer.set_project("offline");
    assert_eq!(page.start_timer().await, ActionOutcome::Failed);
    assert_eq!(page.timer.state(), TimerState::Idle);
    assert_eq!(page.notifier().last(), Some("Failed to start timer."));
}
