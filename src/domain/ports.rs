use crate::domain::locale::Locale;
use crate::domain::model::{NewStudent, Student};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Access to the `students` table. Every call opens its own connection and
/// releases it before returning, whatever the outcome.
#[async_trait]
pub trait StudentStore: Send + Sync {
    async fn list_students(&self) -> Result<Vec<Student>>;
    async fn add_student(&self, student: &NewStudent) -> Result<()>;
}

pub trait ConfigProvider: Send + Sync {
    fn listen_addr(&self) -> &str;
    fn database_url(&self) -> &str;
    fn locale(&self) -> Locale;
}
