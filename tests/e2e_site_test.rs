//! End-to-end tests that drive the real router over HTTP with a
//! cookie-holding client.

use tempfile::TempDir;

use florin::config::{Cli, Config};
use florin::db;
use florin::state::{AppState, DbPool};

async fn spawn_app() -> (String, DbPool, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let cli = Cli {
        config: None,
        host: None,
        port: None,
        data_dir: Some(temp_dir.path().to_path_buf()),
    };
    let config = Config::load(&cli).unwrap();
    std::fs::create_dir_all(config.uploads_path()).unwrap();

    let pool = db::create_pool(config.db_path()).unwrap();
    db::run_migrations(&pool).unwrap();

    let app = florin::app(AppState {
        db: pool.clone(),
        config,
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), pool, temp_dir)
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .build()
        .unwrap()
}

async fn register_and_login(base: &str, client: &reqwest::Client, name: &str) {
    let email = format!("{name}@example.com");
    let resp = client
        .post(format!("{base}/register"))
        .form(&[
            ("username", name),
            ("email", email.as_str()),
            ("password", "hunter22"),
            ("confirm_password", "hunter22"),
        ])
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    assert_eq!(resp.url().path(), "/login");

    let resp = client
        .post(format!("{base}/login"))
        .form(&[("email", email.as_str()), ("password", "hunter22")])
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    assert_eq!(resp.url().path(), "/");
}

#[tokio::test]
async fn home_page_renders_anonymously() {
    let (base, _pool, _tmp) = spawn_app().await;

    let body = client()
        .get(format!("{base}/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    assert!(body.contains("Florin"));
    assert!(body.contains("No posts yet"));
}

#[tokio::test]
async fn protected_pages_redirect_to_login() {
    let (base, _pool, _tmp) = spawn_app().await;

    let bare = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap();

    for path in ["/account", "/post/new", "/quiz", "/lessons/paying-bills"] {
        let resp = bare.get(format!("{base}{path}")).send().await.unwrap();
        assert_eq!(resp.status(), 303, "{path} should redirect");
        let location = resp.headers()["location"].to_str().unwrap();
        assert_eq!(location, format!("/login?next={path}"));
    }
}

#[tokio::test]
async fn register_login_post_and_comment_flow() {
    let (base, pool, _tmp) = spawn_app().await;
    let alice = client();
    register_and_login(&base, &alice, "alice").await;

    // Create a post; the redirect lands on the post page
    let resp = alice
        .post(format!("{base}/post/new"))
        .form(&[("title", "Budgeting 101"), ("content", "Track every expense.")])
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let post_page = resp.text().await.unwrap();
    assert!(post_page.contains("Budgeting 101"));

    // It shows up on the home page
    let home = alice
        .get(format!("{base}/"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(home.contains("Budgeting 101"));

    let post_id: String = pool
        .get()
        .unwrap()
        .query_row("SELECT id FROM posts", [], |row| row.get(0))
        .unwrap();

    // Another user comments on it
    let bob = client();
    register_and_login(&base, &bob, "bob").await;

    let resp = bob
        .post(format!("{base}/post/{post_id}/comment"))
        .form(&[("content", "Very helpful, thanks!")])
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    assert!(resp.text().await.unwrap().contains("Very helpful, thanks!"));
}

#[tokio::test]
async fn only_the_owner_may_edit_or_delete() {
    let (base, pool, _tmp) = spawn_app().await;
    let alice = client();
    register_and_login(&base, &alice, "alice").await;

    alice
        .post(format!("{base}/post/new"))
        .form(&[("title", "Mine"), ("content", "Only I may change this.")])
        .send()
        .await
        .unwrap();

    let post_id: String = pool
        .get()
        .unwrap()
        .query_row("SELECT id FROM posts", [], |row| row.get(0))
        .unwrap();

    let bob = client();
    register_and_login(&base, &bob, "bob").await;

    let resp = bob
        .post(format!("{base}/post/{post_id}/edit"))
        .form(&[("title", "Hijacked"), ("content", "nope")])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    let resp = bob
        .post(format!("{base}/post/{post_id}/delete"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 403);

    // Untouched
    let title: String = pool
        .get()
        .unwrap()
        .query_row("SELECT title FROM posts WHERE id = ?1", [&post_id], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(title, "Mine");

    // The owner can delete it
    let resp = alice
        .post(format!("{base}/post/{post_id}/delete"))
        .send()
        .await
        .unwrap();
    assert!(resp.status().is_success());
    let count: i64 = pool
        .get()
        .unwrap()
        .query_row("SELECT COUNT(*) FROM posts", [], |row| row.get(0))
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn quiz_awards_points_through_the_handlers() {
    let (base, pool, _tmp) = spawn_app().await;
    let alice = client();
    register_and_login(&base, &alice, "alice").await;

    // One correct answer
    let body = alice
        .post(format!("{base}/quiz"))
        .form(&[("q1", "q1value4"), ("q2", "q2value1")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("scored 1/2"));

    // A submission missing an answer is rejected without touching the score
    let body = alice
        .post(format!("{base}/quiz"))
        .form(&[("q1", "q1value4")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(body.contains("Please answer both questions"));

    let score: i64 = pool
        .get()
        .unwrap()
        .query_row("SELECT score FROM users", [], |row| row.get(0))
        .unwrap();
    assert_eq!(score, 10);
}

#[tokio::test]
async fn logout_is_idempotent() {
    let (base, _pool, _tmp) = spawn_app().await;
    let alice = client();
    register_and_login(&base, &alice, "alice").await;

    let resp = alice.post(format!("{base}/logout")).send().await.unwrap();
    assert!(resp.status().is_success());

    // Logging out again while anonymous still succeeds
    let resp = alice.post(format!("{base}/logout")).send().await.unwrap();
    assert!(resp.status().is_success());
}
