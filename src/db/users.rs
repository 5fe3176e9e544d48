use rusqlite::{params, Row};

use crate::db::models::User;
use crate::db::{map_constraint, StoreError};
use crate::state::DbPool;

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        username: row.get(1)?,
        email: row.get(2)?,
        password_hash: row.get(3)?,
        image_file: row.get(4)?,
        score: row.get(5)?,
        created_at: row.get(6)?,
    })
}

const USER_COLUMNS: &str = "id, username, email, password_hash, image_file, score, created_at";

/// Insert a new user with a fresh id. The password must already be hashed.
pub fn create_user(
    pool: &DbPool,
    username: &str,
    email: &str,
    password_hash: &str,
) -> Result<String, StoreError> {
    let conn = pool.get()?;
    let id = uuid::Uuid::now_v7().to_string();

    conn.execute(
        "INSERT INTO users (id, username, email, password_hash) VALUES (?1, ?2, ?3, ?4)",
        params![id, username, email, password_hash],
    )
    .map_err(map_constraint)?;

    Ok(id)
}

pub fn find_by_email(pool: &DbPool, email: &str) -> Result<Option<User>, StoreError> {
    let conn = pool.get()?;
    let result = conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE email = ?1"),
        params![email],
        user_from_row,
    );
    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

pub fn find_by_id(pool: &DbPool, id: &str) -> Result<Option<User>, StoreError> {
    let conn = pool.get()?;
    let result = conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
        params![id],
        user_from_row,
    );
    match result {
        Ok(user) => Ok(Some(user)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Update username/email, and the profile image when a new one was uploaded.
pub fn update_profile(
    pool: &DbPool,
    user_id: &str,
    username: &str,
    email: &str,
    image_file: Option<&str>,
) -> Result<(), StoreError> {
    let conn = pool.get()?;

    let rows = match image_file {
        Some(image) => conn
            .execute(
                "UPDATE users SET username = ?1, email = ?2, image_file = ?3 WHERE id = ?4",
                params![username, email, image, user_id],
            )
            .map_err(map_constraint)?,
        None => conn
            .execute(
                "UPDATE users SET username = ?1, email = ?2 WHERE id = ?3",
                params![username, email, user_id],
            )
            .map_err(map_constraint)?,
    };

    if rows == 0 {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

/// Add points to a user's score with a single in-database increment, so
/// concurrent submissions cannot lose updates. Returns the new score.
pub fn add_score(pool: &DbPool, user_id: &str, points: i64) -> Result<i64, StoreError> {
    let conn = pool.get()?;

    let rows = conn.execute(
        "UPDATE users SET score = score + ?1 WHERE id = ?2",
        params![points, user_id],
    )?;
    if rows == 0 {
        return Err(StoreError::NotFound);
    }

    let score = conn.query_row(
        "SELECT score FROM users WHERE id = ?1",
        params![user_id],
        |row| row.get(0),
    )?;
    Ok(score)
}
