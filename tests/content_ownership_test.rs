//! Post/comment lifecycle against the ownership rules, exercised the way
//! the handlers drive them: look up the post, check the owner, mutate.

use tempfile::TempDir;

use florin::auth::ownership;
use florin::db::{self, posts, users, StoreError};
use florin::state::DbPool;

fn setup() -> (TempDir, DbPool) {
    let temp_dir = TempDir::new().unwrap();
    let pool = db::create_pool(&temp_dir.path().join("test.db")).unwrap();
    db::run_migrations(&pool).unwrap();
    (temp_dir, pool)
}

fn seed_user(pool: &DbPool, name: &str) -> String {
    users::create_user(pool, name, &format!("{name}@example.com"), "hash").unwrap()
}

#[test]
fn owner_may_update_their_post() {
    let (_tmp, pool) = setup();
    let alice = seed_user(&pool, "alice");
    let post_id = posts::create_post(&pool, &alice, "Budgeting", "Track expenses").unwrap();

    let post = posts::get_post(&pool, &post_id).unwrap();
    ownership::require_owner(Some(&alice), &post.user_id).unwrap();
    posts::update_post(&pool, &post_id, "Budgeting 101", "Track every expense").unwrap();

    assert_eq!(posts::get_post(&pool, &post_id).unwrap().title, "Budgeting 101");
}

#[test]
fn non_owner_is_forbidden_before_any_mutation() {
    let (_tmp, pool) = setup();
    let alice = seed_user(&pool, "alice");
    let bob = seed_user(&pool, "bob");
    let post_id = posts::create_post(&pool, &alice, "Budgeting", "Track expenses").unwrap();

    let post = posts::get_post(&pool, &post_id).unwrap();
    assert!(ownership::require_owner(Some(&bob), &post.user_id).is_err());
    assert!(ownership::require_owner(None, &post.user_id).is_err());

    // Nothing was touched
    assert_eq!(posts::get_post(&pool, &post_id).unwrap().title, "Budgeting");
}

#[test]
fn delete_removes_post_and_all_its_comments() {
    let (_tmp, pool) = setup();
    let alice = seed_user(&pool, "alice");
    let bob = seed_user(&pool, "bob");
    let post_id = posts::create_post(&pool, &alice, "Budgeting", "Track expenses").unwrap();
    let other_post = posts::create_post(&pool, &alice, "Other", "Untouched").unwrap();

    posts::add_comment(&pool, &post_id, &bob, "useful").unwrap();
    posts::add_comment(&pool, &post_id, &alice, "thanks").unwrap();
    posts::add_comment(&pool, &other_post, &bob, "survives").unwrap();

    posts::delete_post(&pool, &post_id).unwrap();

    assert!(matches!(
        posts::get_post(&pool, &post_id).unwrap_err(),
        StoreError::NotFound
    ));
    assert!(posts::list_comments(&pool, &post_id).unwrap().is_empty());

    // The unrelated post and its comment are intact
    assert_eq!(posts::list_comments(&pool, &other_post).unwrap().len(), 1);
}

#[test]
fn any_authenticated_user_may_comment() {
    let (_tmp, pool) = setup();
    let alice = seed_user(&pool, "alice");
    let bob = seed_user(&pool, "bob");
    let post_id = posts::create_post(&pool, &alice, "Budgeting", "Track expenses").unwrap();

    // No ownership restriction on commenting
    posts::add_comment(&pool, &post_id, &bob, "not my post, still commenting").unwrap();

    let comments = posts::list_comments(&pool, &post_id).unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].author_username, "bob");
}
