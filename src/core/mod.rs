pub mod blog;
pub mod catalog;
pub mod engine;
pub mod pages;
pub mod site;

pub use crate::domain::model::{BuildResult, PageRecord, SiteContent};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
