use crate::domain::locale::Labels;
use crate::domain::model::Student;
use askama::Template;

#[derive(Template)]
#[template(path = "registry.html")]
pub struct RegistryTemplate<'a> {
    pub labels: &'a Labels,
    pub students: &'a [Student],
}
