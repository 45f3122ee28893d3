use crate::{
    auth::{DbUser, User},
    error::AppError,
};
use chrono::Utc;
use sqlx::{Pool, Sqlite};
use tracing::{info, instrument};

use crate::models::{UserNote, UserProgress, UserProject};

pub const INVALID_CREDENTIALS: &str = "Invalid username or password";

#[instrument]
pub async fn get_user(pool: &Pool<Sqlite>, id: i64) -> Result<User, AppError> {
    info!("Fetching user by ID");
    let row = sqlx::query_as::<_, DbUser>(
        "SELECT id, username, email, created_at FROM users WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    match row {
        Some(user) => Ok(User::from(user)),
        _ => Err(AppError::NotFound(format!(
            "User with id {} not found in database",
            id
        ))),
    }
}

#[instrument]
pub async fn find_user_by_username(
    pool: &Pool<Sqlite>,
    username: &str,
) -> Result<Option<User>, AppError> {
    info!("Finding user by username");
    let row = sqlx::query_as::<_, DbUser>(
        "SELECT id, username, email, created_at FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(User::from))
}

#[instrument]
pub async fn find_user_by_email(
    pool: &Pool<Sqlite>,
    email: &str,
) -> Result<Option<User>, AppError> {
    info!("Finding user by email");
    let row = sqlx::query_as::<_, DbUser>(
        "SELECT id, username, email, created_at FROM users WHERE email = ?",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(User::from))
}

#[instrument(skip_all, fields(username = %username, email = %email))]
pub async fn create_user(
    pool: &Pool<Sqlite>,
    username: &str,
    email: &str,
    password: &str,
) -> Result<i64, AppError> {
    info!("Creating new user");

    if find_user_by_username(pool, username).await?.is_some() {
        return Err(AppError::Validation("Username already exists".to_string()));
    }

    if find_user_by_email(pool, email).await?.is_some() {
        return Err(AppError::Validation("Email already registered".to_string()));
    }

    let hashed_password = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;
    let now = Utc::now().naive_utc();

    let res = sqlx::query(
        "INSERT INTO users (username, email, password_hash, created_at) VALUES (?, ?, ?, ?)",
    )
    .bind(username)
    .bind(email)
    .bind(hashed_password)
    .bind(now)
    .execute(pool)
    .await?;

    Ok(res.last_insert_rowid())
}

/// Checks a username/password pair. Unknown users and wrong passwords fail
/// with the same error.
#[instrument(skip_all, fields(username = %username))]
pub async fn authenticate_user(
    pool: &Pool<Sqlite>,
    username: &str,
    password: &str,
) -> Result<User, AppError> {
    info!("Authenticating user");
    let row = sqlx::query_as::<_, (i64, String)>(
        "SELECT id, password_hash FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    let Some((id, password_hash)) = row else {
        return Err(AppError::Authentication(INVALID_CREDENTIALS.to_string()));
    };

    match bcrypt::verify(password, &password_hash) {
        Ok(true) => get_user(pool, id).await,
        _ => Err(AppError::Authentication(INVALID_CREDENTIALS.to_string())),
    }
}

/// Removes a user together with their progress, projects and notes.
#[instrument]
pub async fn delete_user(pool: &Pool<Sqlite>, user_id: i64) -> Result<(), AppError> {
    info!("Deleting user");
    let res = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;

    if res.rows_affected() == 0 {
        return Err(AppError::NotFound(format!(
            "User with id {} not found in database",
            user_id
        )));
    }

    Ok(())
}

/// Inserts into user-owned tables fail on the foreign key once the user is
/// gone; that case surfaces as `NotFound` rather than a storage fault.
fn owner_missing(user_id: i64) -> impl FnOnce(sqlx::Error) -> AppError {
    move |err| match &err {
        sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
            AppError::NotFound(format!("User with id {} not found in database", user_id))
        }
        _ => AppError::Database(err),
    }
}

#[instrument]
pub async fn mark_topic_complete(
    pool: &Pool<Sqlite>,
    user_id: i64,
    path_id: &str,
    topic_id: &str,
) -> Result<i64, AppError> {
    info!("Marking topic complete");
    let now = Utc::now().naive_utc();

    let existing = sqlx::query_as::<_, (i64,)>(
        "SELECT id FROM user_progress WHERE user_id = ? AND path_id = ? AND topic_id = ?",
    )
    .bind(user_id)
    .bind(path_id)
    .bind(topic_id)
    .fetch_optional(pool)
    .await?;

    if let Some((id,)) = existing {
        sqlx::query("UPDATE user_progress SET completed = TRUE, completed_at = ? WHERE id = ?")
            .bind(now)
            .bind(id)
            .execute(pool)
            .await?;
        return Ok(id);
    }

    let res = sqlx::query(
        "INSERT INTO user_progress (user_id, path_id, topic_id, completed, completed_at)
         VALUES (?, ?, ?, TRUE, ?)",
    )
    .bind(user_id)
    .bind(path_id)
    .bind(topic_id)
    .bind(now)
    .execute(pool)
    .await
    .map_err(owner_missing(user_id))?;

    Ok(res.last_insert_rowid())
}

#[instrument]
pub async fn get_user_progress(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<UserProgress>, AppError> {
    info!("Getting user progress");
    let rows = sqlx::query_as::<_, UserProgress>(
        "SELECT id, user_id, path_id, topic_id, completed, completed_at
         FROM user_progress
         WHERE user_id = ?
         ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[instrument]
pub async fn complete_project(
    pool: &Pool<Sqlite>,
    user_id: i64,
    project_id: &str,
    github_url: Option<&str>,
) -> Result<i64, AppError> {
    info!("Recording completed project");

    let existing = sqlx::query_as::<_, (i64,)>(
        "SELECT id FROM user_projects WHERE user_id = ? AND project_id = ?",
    )
    .bind(user_id)
    .bind(project_id)
    .fetch_optional(pool)
    .await?;

    if let Some((id,)) = existing {
        if github_url.is_some() {
            sqlx::query("UPDATE user_projects SET github_url = ? WHERE id = ?")
                .bind(github_url)
                .bind(id)
                .execute(pool)
                .await?;
        }
        return Ok(id);
    }

    let now = Utc::now().naive_utc();
    let res = sqlx::query(
        "INSERT INTO user_projects (user_id, project_id, github_url, completed_at)
         VALUES (?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(project_id)
    .bind(github_url)
    .bind(now)
    .execute(pool)
    .await
    .map_err(owner_missing(user_id))?;

    Ok(res.last_insert_rowid())
}

#[instrument]
pub async fn get_user_projects(
    pool: &Pool<Sqlite>,
    user_id: i64,
) -> Result<Vec<UserProject>, AppError> {
    info!("Getting completed projects");
    let rows = sqlx::query_as::<_, UserProject>(
        "SELECT id, user_id, project_id, github_url, completed_at
         FROM user_projects
         WHERE user_id = ?
         ORDER BY id",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

#[instrument(skip(notes))]
pub async fn save_note(
    pool: &Pool<Sqlite>,
    user_id: i64,
    content_type: &str,
    content_id: &str,
    notes: &str,
) -> Result<i64, AppError> {
    info!("Saving note");
    let now = Utc::now().naive_utc();

    let existing = sqlx::query_as::<_, (i64,)>(
        "SELECT id FROM user_notes WHERE user_id = ? AND content_type = ? AND content_id = ?",
    )
    .bind(user_id)
    .bind(content_type)
    .bind(content_id)
    .fetch_optional(pool)
    .await?;

    if let Some((id,)) = existing {
        sqlx::query("UPDATE user_notes SET notes = ?, updated_at = ? WHERE id = ?")
            .bind(notes)
            .bind(now)
            .bind(id)
            .execute(pool)
            .await?;
        return Ok(id);
    }

    let res = sqlx::query(
        "INSERT INTO user_notes (user_id, content_type, content_id, notes, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(content_type)
    .bind(content_id)
    .bind(notes)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(owner_missing(user_id))?;

    Ok(res.last_insert_rowid())
}

#[instrument]
pub async fn get_user_notes(pool: &Pool<Sqlite>, user_id: i64) -> Result<Vec<UserNote>, AppError> {
    info!("Getting user notes");
    let rows = sqlx::query_as::<_, UserNote>(
        "SELECT id, user_id, content_type, content_id, notes, created_at, updated_at
         FROM user_notes
         WHERE user_id = ?
         ORDER BY updated_at DESC",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
