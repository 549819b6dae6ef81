pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
pub use config::toml_config::SiteConfig;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use self::core::blog::{get_all_posts, get_post_by_slug, BlogIndex};
pub use self::core::catalog::{
    all_area_params, all_service_area_params, all_service_params, get_all_areas,
    get_all_services, get_area_by_slug, get_service_by_slug, human_service_name, meta_for,
    title_for, Catalog,
};
pub use self::core::{engine::SiteEngine, site::SitePipeline};
pub use domain::model::{Area, BlogPost, BlogPostMeta, Faq, Service};
pub use utils::error::{Result, SiteError};
