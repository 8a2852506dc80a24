use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};
use student_registry::core::Locale;
use student_registry::{RegistryPage, Server, SqliteStudentStore};
use tempfile::TempDir;

pub fn database_url(dir: &TempDir) -> String {
    sqlite_url(&dir.path().join("student_db.sqlite"))
}

pub fn sqlite_url(path: &Path) -> String {
    format!("sqlite://{}", path.display())
}

/// Creates `student_db.sqlite` with a `students` table and the given rows.
pub async fn create_database(dir: &TempDir, rows: &[(&str, &str)]) -> anyhow::Result<String> {
    let url = database_url(dir);
    let mut conn = SqliteConnectOptions::from_str(&url)?
        .create_if_missing(true)
        .connect()
        .await?;

    sqlx::query(
        "CREATE TABLE students (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            age TEXT
        )",
    )
    .execute(&mut conn)
    .await?;

    for (name, age) in rows {
        sqlx::query("INSERT INTO students (name, age) VALUES (?, ?)")
            .bind(*name)
            .bind(*age)
            .execute(&mut conn)
            .await?;
    }

    conn.close().await?;
    Ok(url)
}

/// Starts the registry on an ephemeral port and returns its base URL.
pub async fn spawn_server(database_url: &str, locale: Locale) -> anyhow::Result<String> {
    let store = Arc::new(SqliteStudentStore::new(database_url)?);
    let page = RegistryPage::new(store, locale);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let router = Server::new(addr, page).router();

    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });

    Ok(format!("http://{}", addr))
}
