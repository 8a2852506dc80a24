use crate::domain::model::{Age, NewStudent, Student};
use crate::domain::ports::StudentStore;
use crate::utils::error::{RegistryError, Result};
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{ConnectOptions, Connection, Row};
use std::str::FromStr;

const LIST_STUDENTS_SQL: &str =
    "SELECT CAST(name AS TEXT) AS name, CAST(age AS TEXT) AS age FROM students";
const INSERT_STUDENT_SQL: &str = "INSERT INTO students (name, age) VALUES (?, ?)";

/// `students` table in a SQLite database. Holds only connection options;
/// each operation opens and closes its own connection.
#[derive(Debug, Clone)]
pub struct SqliteStudentStore {
    options: SqliteConnectOptions,
}

impl SqliteStudentStore {
    pub fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url).map_err(|e| {
            RegistryError::ConfigValidationError {
                field: "database.url".to_string(),
                message: e.to_string(),
            }
        })?;

        // 資料庫必須事先存在，不自動建立
        Ok(Self {
            options: options.create_if_missing(false),
        })
    }

    async fn connect(&self) -> Result<SqliteConnection> {
        let conn = self
            .options
            .connect()
            .await
            .map_err(RegistryError::connection)?;
        tracing::debug!("Opened database connection");
        Ok(conn)
    }

    /// Closes explicitly so a failed close is at least logged. Error paths
    /// drop the connection instead, which also releases it.
    async fn release(conn: SqliteConnection) {
        match conn.close().await {
            Ok(()) => tracing::debug!("Closed database connection"),
            Err(e) => tracing::warn!("Failed to close database connection cleanly: {}", e),
        }
    }
}

fn decode_student(index: usize, row: &SqliteRow) -> Result<Student> {
    let column = |name: &str| -> Result<String> {
        let value: Option<String> =
            row.try_get(name)
                .map_err(|e| RegistryError::RowDecodeError {
                    row: index,
                    message: format!("column '{}': {}", name, e),
                })?;
        value.ok_or_else(|| RegistryError::RowDecodeError {
            row: index,
            message: format!("column '{}' is NULL", name),
        })
    };

    Ok(Student {
        name: column("name")?,
        age: Age::from_stored(&column("age")?),
    })
}

#[async_trait]
impl StudentStore for SqliteStudentStore {
    async fn list_students(&self) -> Result<Vec<Student>> {
        let mut conn = self.connect().await?;

        let rows = sqlx::query(LIST_STUDENTS_SQL).fetch_all(&mut conn).await?;
        let students = rows
            .iter()
            .enumerate()
            .map(|(index, row)| decode_student(index, row))
            .collect::<Result<Vec<_>>>()?;

        Self::release(conn).await;
        tracing::debug!("Fetched {} students", students.len());
        Ok(students)
    }

    async fn add_student(&self, student: &NewStudent) -> Result<()> {
        let mut conn = self.connect().await?;

        sqlx::query(INSERT_STUDENT_SQL)
            .bind(&student.name)
            .bind(i64::from(student.age))
            .execute(&mut conn)
            .await?;

        Self::release(conn).await;
        tracing::info!("Inserted student '{}' (age {})", student.name, student.age);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tempfile::TempDir;

    async fn create_database(dir: &TempDir) -> String {
        let path = dir.path().join("student_db.sqlite");
        let url = format!("sqlite://{}", path.display());

        let mut conn = SqliteConnectOptions::from_str(&url)
            .unwrap()
            .create_if_missing(true)
            .connect()
            .await
            .unwrap();
        sqlx::query(
            "CREATE TABLE students (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT, age TEXT)",
        )
        .execute(&mut conn)
        .await
        .unwrap();
        conn.close().await.unwrap();

        url
    }

    #[tokio::test]
    async fn test_insert_then_list_in_insertion_order() {
        let dir = TempDir::new().unwrap();
        let store = SqliteStudentStore::new(&create_database(&dir).await).unwrap();

        for (name, age) in [("Alice", 20), ("Bob", 31)] {
            store
                .add_student(&NewStudent {
                    name: name.to_string(),
                    age,
                })
                .await
                .unwrap();
        }

        let students = store.list_students().await.unwrap();
        assert_eq!(
            students,
            vec![
                Student {
                    name: "Alice".to_string(),
                    age: Age::Years(20)
                },
                Student {
                    name: "Bob".to_string(),
                    age: Age::Years(31)
                },
            ]
        );
    }

    async fn execute(url: &str, sql: &str) {
        let mut conn = SqliteConnectOptions::from_str(url)
            .unwrap()
            .connect()
            .await
            .unwrap();
        sqlx::query(sql).execute(&mut conn).await.unwrap();
        conn.close().await.unwrap();
    }

    /// Fails immediately if any earlier connection still holds a lock.
    async fn assert_exclusive_lock_available(url: &str) {
        let mut conn = SqliteConnectOptions::from_str(url)
            .unwrap()
            .busy_timeout(Duration::ZERO)
            .connect()
            .await
            .unwrap();
        sqlx::query("BEGIN EXCLUSIVE").execute(&mut conn).await.unwrap();
        sqlx::query("ROLLBACK").execute(&mut conn).await.unwrap();
        conn.close().await.unwrap();
    }

    #[tokio::test]
    async fn test_legacy_free_text_age_is_kept() {
        let dir = TempDir::new().unwrap();
        let url = create_database(&dir).await;
        execute(&url, "INSERT INTO students (name, age) VALUES ('Carol', 'about 40')").await;

        let students = SqliteStudentStore::new(&url)
            .unwrap()
            .list_students()
            .await
            .unwrap();
        assert_eq!(students[0].age, Age::Text("about 40".to_string()));
    }

    #[tokio::test]
    async fn test_numeric_looking_legacy_ages_render_as_stored() {
        let dir = TempDir::new().unwrap();
        let url = create_database(&dir).await;
        execute(
            &url,
            "INSERT INTO students (name, age) VALUES ('A', '007'), ('B', '+5'), ('C', ' 20 ')",
        )
        .await;

        let students = SqliteStudentStore::new(&url)
            .unwrap()
            .list_students()
            .await
            .unwrap();
        let ages: Vec<String> = students.iter().map(|s| s.age.to_string()).collect();
        assert_eq!(ages, ["007", "+5", " 20 "]);
    }

    #[tokio::test]
    async fn test_null_name_is_a_decode_error() {
        let dir = TempDir::new().unwrap();
        let url = create_database(&dir).await;
        execute(&url, "INSERT INTO students (name, age) VALUES (NULL, '20')").await;

        let err = SqliteStudentStore::new(&url)
            .unwrap()
            .list_students()
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::RowDecodeError { row: 0, .. }));
    }

    #[tokio::test]
    async fn test_connection_released_after_decode_error() {
        let dir = TempDir::new().unwrap();
        let url = create_database(&dir).await;
        execute(&url, "INSERT INTO students (name, age) VALUES ('Dan', NULL)").await;

        let store = SqliteStudentStore::new(&url).unwrap();
        let err = store.list_students().await.unwrap_err();
        assert!(matches!(err, RegistryError::RowDecodeError { .. }));

        assert_exclusive_lock_available(&url).await;
    }

    #[tokio::test]
    async fn test_connection_released_after_query_error() {
        let dir = TempDir::new().unwrap();
        let url = create_database(&dir).await;
        execute(&url, "DROP TABLE students").await;

        let store = SqliteStudentStore::new(&url).unwrap();
        let err = store.list_students().await.unwrap_err();
        assert!(matches!(err, RegistryError::QueryError(_)));
        let err = store
            .add_student(&NewStudent {
                name: "Eve".to_string(),
                age: 30,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::QueryError(_)));

        assert_exclusive_lock_available(&url).await;
        std::fs::remove_file(dir.path().join("student_db.sqlite")).unwrap();
    }

    #[tokio::test]
    async fn test_missing_database_is_a_connection_error() {
        let dir = TempDir::new().unwrap();
        let url = format!("sqlite://{}", dir.path().join("absent.sqlite").display());

        let err = SqliteStudentStore::new(&url)
            .unwrap()
            .list_students()
            .await
            .unwrap_err();
        assert!(matches!(err, RegistryError::ConnectionError { .. }));
        assert!(!dir.path().join("absent.sqlite").exists());
    }
}
