use crate::core::form::StudentForm;
use crate::core::template::RegistryTemplate;
use crate::domain::locale::{Labels, Locale};
use crate::domain::model::NewStudent;
use crate::domain::ports::StudentStore;
use crate::utils::error::{RegistryError, Result};
use askama::Template;
use std::sync::Arc;

/// The registry page: an add form plus every stored student.
#[derive(Clone)]
pub struct RegistryPage {
    store: Arc<dyn StudentStore>,
    locale: Locale,
}

impl RegistryPage {
    pub fn new(store: Arc<dyn StudentStore>, locale: Locale) -> Self {
        Self { store, locale }
    }

    pub fn labels(&self) -> &'static Labels {
        self.locale.labels()
    }

    /// Loads all students and renders the full HTML document.
    pub async fn render(&self) -> Result<String> {
        let students = self.store.list_students().await?;
        tracing::info!("Rendering registry page with {} students", students.len());

        let html = RegistryTemplate {
            labels: self.labels(),
            students: &students,
        }
        .render()?;
        Ok(html)
    }

    /// The localized line that replaces the page, if `err` is fatal to it.
    pub fn fatal_line(&self, err: &RegistryError) -> Option<String> {
        match err {
            RegistryError::ConnectionError { message } => {
                Some(self.labels().fatal_connection_line(message))
            }
            _ => None,
        }
    }

    pub async fn add_student(&self, form: StudentForm) -> Result<NewStudent> {
        let student = form.into_new_student()?;
        self.store.add_student(&student).await?;
        Ok(student)
    }
}
