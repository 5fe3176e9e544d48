use rusqlite::params;

use crate::db::models::{Comment, CommentWithAuthor, Post, PostWithAuthor};
use crate::db::StoreError;
use crate::state::DbPool;

pub fn create_post(
    pool: &DbPool,
    owner_id: &str,
    title: &str,
    content: &str,
) -> Result<String, StoreError> {
    let conn = pool.get()?;
    let id = uuid::Uuid::now_v7().to_string();

    conn.execute(
        "INSERT INTO posts (id, user_id, title, content) VALUES (?1, ?2, ?3, ?4)",
        params![id, owner_id, title, content],
    )?;

    Ok(id)
}

pub fn get_post(pool: &DbPool, post_id: &str) -> Result<Post, StoreError> {
    let conn = pool.get()?;
    conn.query_row(
        "SELECT id, user_id, title, content, created_at FROM posts WHERE id = ?1",
        params![post_id],
        |row| {
            Ok(Post {
                id: row.get(0)?,
                user_id: row.get(1)?,
                title: row.get(2)?,
                content: row.get(3)?,
                created_at: row.get(4)?,
            })
        },
    )
    .map_err(|e| match e {
        rusqlite::Error::QueryReturnedNoRows => StoreError::NotFound,
        other => other.into(),
    })
}

/// All posts, newest first, with author details for the listing page.
pub fn list_posts(pool: &DbPool) -> Result<Vec<PostWithAuthor>, StoreError> {
    let conn = pool.get()?;
    let mut stmt = conn.prepare(
        "SELECT p.id, p.user_id, p.title, p.content, p.created_at, u.username, u.image_file
         FROM posts p JOIN users u ON u.id = p.user_id
         ORDER BY p.created_at DESC, p.id DESC",
    )?;

    let posts = stmt
        .query_map([], |row| {
            Ok(PostWithAuthor {
                post: Post {
                    id: row.get(0)?,
                    user_id: row.get(1)?,
                    title: row.get(2)?,
                    content: row.get(3)?,
                    created_at: row.get(4)?,
                },
                author_username: row.get(5)?,
                author_image: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(posts)
}

/// Overwrite title and content in place; id, owner and creation timestamp
/// are preserved. Ownership is checked by the caller before this runs.
pub fn update_post(
    pool: &DbPool,
    post_id: &str,
    title: &str,
    content: &str,
) -> Result<(), StoreError> {
    let conn = pool.get()?;
    let rows = conn.execute(
        "UPDATE posts SET title = ?1, content = ?2 WHERE id = ?3",
        params![title, content, post_id],
    )?;
    if rows == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

/// Delete a post. Its comments go with it via the FK cascade.
pub fn delete_post(pool: &DbPool, post_id: &str) -> Result<(), StoreError> {
    let conn = pool.get()?;
    let rows = conn.execute("DELETE FROM posts WHERE id = ?1", params![post_id])?;
    if rows == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

pub fn add_comment(
    pool: &DbPool,
    post_id: &str,
    user_id: &str,
    content: &str,
) -> Result<String, StoreError> {
    let conn = pool.get()?;

    let post_exists: bool = conn.query_row(
        "SELECT COUNT(*) > 0 FROM posts WHERE id = ?1",
        params![post_id],
        |row| row.get(0),
    )?;
    if !post_exists {
        return Err(StoreError::NotFound);
    }

    let id = uuid::Uuid::now_v7().to_string();
    conn.execute(
        "INSERT INTO comments (id, post_id, user_id, content) VALUES (?1, ?2, ?3, ?4)",
        params![id, post_id, user_id, content],
    )?;

    Ok(id)
}

/// Comments on a post in creation order.
pub fn list_comments(pool: &DbPool, post_id: &str) -> Result<Vec<CommentWithAuthor>, StoreError> {
    let conn = pool.get()?;
    let mut stmt = conn.prepare(
        "SELECT c.id, c.post_id, c.user_id, c.content, c.created_at, u.username
         FROM comments c JOIN users u ON u.id = c.user_id
         WHERE c.post_id = ?1
         ORDER BY c.created_at ASC, c.id ASC",
    )?;

    let comments = stmt
        .query_map(params![post_id], |row| {
            Ok(CommentWithAuthor {
                comment: Comment {
                    id: row.get(0)?,
                    post_id: row.get(1)?,
                    user_id: row.get(2)?,
                    content: row.get(3)?,
                    created_at: row.get(4)?,
                },
                author_username: row.get(5)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(comments)
}
