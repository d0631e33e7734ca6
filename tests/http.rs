use habit_tracker::client::{HabitApi, HabitSubmission, HttpHabitApi};
use habit_tracker::errors::ClientError;
use habit_tracker::models::{
    HabitKind, HabitListResponse, HabitResponse, WishlistEntry, WishlistResponse,
};
use habit_tracker::page::{ClickOutcome, RequestOutcome, BAD_HABIT, CTA_BUTTON, GOOD_HABIT};
use habit_tracker::{MemoryDocument, Page, PageConfig};
use once_cell::sync::Lazy;
use reqwest::Client;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

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
    use std::sync::atomic::{AtomicI32, Ordering};
    use std::sync::Once;

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

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/habits")).send().await {
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
    let child = Command::new(env!("CARGO_BIN_EXE_habit_tracker"))
        .env("HOST", "127.0.0.1")
        .env("PORT", port.to_string())
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

async fn habits_named(base_url: &str, kind: HabitKind, name: &str) -> usize {
    let list: HabitListResponse = Client::new()
        .get(format!("{base_url}/api/habits?type={kind}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    list.habits.iter().filter(|habit| habit.habit_name == name).count()
}

#[tokio::test]
async fn http_index_serves_page_markup() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let html = Client::new()
        .get(&server.base_url)
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(html.contains(&format!("id=\"{CTA_BUTTON}\"")));
    assert!(html.contains(&format!("id=\"{}\"", GOOD_HABIT.modal)));
    assert!(html.contains(&format!("id=\"{}\"", BAD_HABIT.input)));
}

#[tokio::test]
async fn http_add_habit_defaults_to_good() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let response = Client::new()
        .post(format!("{}/addHabit", server.base_url))
        .json(&serde_json::json!({ "habit_name": "Stretch" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["habit_name"], "Stretch");
    assert_eq!(body["habit_type"], "good");
    assert_eq!(body["points"], 0);
}

#[tokio::test]
async fn http_add_habit_rejects_unknown_type() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;

    let response = Client::new()
        .post(format!("{}/addHabit?type=neutral", server.base_url))
        .json(&serde_json::json!({ "habit_name": "Nap" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn http_get_habit_by_id() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let api = HttpHabitApi::new(&server.base_url);
    let client = Client::new();

    let stored = api
        .add_habit(&HabitSubmission::new(HabitKind::Bad, "Late snacks"))
        .await
        .unwrap();

    let found: HabitResponse = client
        .get(format!("{}/api/habits/{}", server.base_url, stored.id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(found, stored);

    let response = client
        .delete(format!("{}/api/habits/{}", server.base_url, stored.id))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/api/habits/{}", server.base_url, stored.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn http_wishlist_add_and_delete() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let entry: WishlistEntry = client
        .post(format!("{}/api/wishlist", server.base_url))
        .json(&serde_json::json!({ "name": "Headphones", "cost": 80 }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(entry.name, "Headphones");
    assert_eq!(entry.cost, 80);

    let list: WishlistResponse = client
        .get(format!("{}/api/wishlist", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(list.entries.contains(&entry));

    let response = client
        .post(format!("{}/api/wishlist", server.base_url))
        .json(&serde_json::json!({ "name": "Watch", "cost": "lots" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_client_error());

    let response = client
        .delete(format!("{}/api/wishlist/{}", server.base_url, entry.id))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let response = client
        .delete(format!("{}/api/wishlist/{}", server.base_url, entry.id))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 404);
}

#[tokio::test]
async fn http_counter_accumulates() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let api = HttpHabitApi::new(&server.base_url);

    let first = api.increment_counter("http-counter", 1).await.unwrap();
    let second = api.increment_counter("http-counter", 2).await.unwrap();

    assert_eq!(second.new_count, first.new_count + 2);
}

#[tokio::test]
async fn page_saves_habits_against_the_server() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let api = Arc::new(HttpHabitApi::new(&server.base_url));
    let config = PageConfig {
        counter_id: Some("page-cta".into()),
    };
    let mut page = Page::bootstrap(MemoryDocument::complete(), api, config);

    page.click(BAD_HABIT.add);
    page.document_mut().set_value(BAD_HABIT.input, "Doomscrolling");
    let ClickOutcome::Submitted { task, .. } = page.click(BAD_HABIT.save) else {
        panic!("expected a submission");
    };
    assert!(!page.view().is_open(HabitKind::Bad));

    let habit = task.outcome().await.delivered().unwrap();
    assert_eq!(habit.habit_name, "Doomscrolling");
    assert_eq!(habit.habit_type, HabitKind::Bad);
    assert_eq!(habits_named(&server.base_url, HabitKind::Bad, "Doomscrolling").await, 1);
    assert_eq!(habits_named(&server.base_url, HabitKind::Good, "Doomscrolling").await, 0);

    let ClickOutcome::Acknowledged { counter: Some(task) } = page.click(CTA_BUTTON) else {
        panic!("expected a counter request");
    };
    let count = task.outcome().await.delivered().unwrap();
    assert!(count.new_count >= 1);
    assert_eq!(page.document().alerts().len(), 1);
}

#[tokio::test]
async fn page_logs_and_swallows_unreachable_backend() {
    let port = pick_free_port();
    let api = Arc::new(HttpHabitApi::new(format!("http://127.0.0.1:{port}")));
    let mut page = Page::bootstrap(MemoryDocument::complete(), api, PageConfig::default());

    page.click(GOOD_HABIT.add);
    page.document_mut().set_value(GOOD_HABIT.input, "Drink water");
    let ClickOutcome::Submitted { task, .. } = page.click(GOOD_HABIT.save) else {
        panic!("expected a submission");
    };

    assert!(matches!(
        task.outcome().await,
        RequestOutcome::Failed(ClientError::Transport(_))
    ));
    assert!(!page.view().is_open(HabitKind::Good));
}
