pub mod form;
pub mod registry;
pub mod template;

pub use crate::domain::locale::{Labels, Locale};
pub use crate::domain::model::{Age, NewStudent, Student};
pub use crate::domain::ports::{ConfigProvider, StudentStore};
pub use crate::utils::error::Result;
