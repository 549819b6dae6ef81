use crate::core::blog::{BlogIndex, MissingContent};
use crate::core::catalog::{Catalog, SERVICES_FILE};
use crate::core::pages::{enumerate_routes, page_meta, page_view, Route};
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{BuildResult, PageRecord, SiteContent, ViewFile};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::Validate;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const PAGES_JSON: &str = "pages.json";
pub const PAGES_CSV: &str = "pages.csv";
pub const VIEWS_DIR: &str = "views";

#[derive(Debug, Serialize)]
struct PageManifest<'a> {
    site_name: &'a str,
    generated_at: DateTime<Utc>,
    page_count: usize,
    pages: &'a [PageRecord],
}

/// Uses `<content_dir>/services/*.json` when present, the bundled catalog otherwise.
pub fn load_catalog(content_dir: &Path) -> Result<Catalog> {
    if content_dir.join(SERVICES_FILE).is_file() {
        tracing::debug!("Loading catalog from {}", content_dir.display());
        Catalog::from_dir(content_dir)
    } else {
        tracing::info!(
            "No catalog under {}, using the bundled catalog",
            content_dir.display()
        );
        Ok(Catalog::bundled().clone())
    }
}

/// Result of auditing a content directory without building.
#[derive(Debug, Clone, Serialize)]
pub struct ContentReport {
    pub services: usize,
    pub areas: usize,
    pub posts: usize,
    pub catalog_problems: Vec<String>,
    pub missing_posts: Vec<MissingContent>,
    pub duplicate_posts: Vec<String>,
}

impl ContentReport {
    pub fn is_clean(&self) -> bool {
        self.catalog_problems.is_empty()
            && self.missing_posts.is_empty()
            && self.duplicate_posts.is_empty()
    }
}

pub fn check_content(content_dir: &Path) -> Result<ContentReport> {
    let catalog = load_catalog(content_dir)?;
    let blog = BlogIndex::new(content_dir.join("blog"));

    Ok(ContentReport {
        services: catalog.services().len(),
        areas: catalog.areas().len(),
        posts: blog.all_posts().len(),
        catalog_problems: catalog.problems(),
        missing_posts: blog.audit(),
        duplicate_posts: blog.duplicate_slugs(),
    })
}

/// Loads and validates the catalog and blog manifest under `content_dir`.
/// Blocking; the pipeline runs it off the async runtime.
pub fn read_site_content(content_dir: &Path) -> Result<SiteContent> {
    let catalog = load_catalog(content_dir)?;
    catalog.validate()?;

    let blog = BlogIndex::new(content_dir.join("blog"));
    let posts = blog.all_posts();
    for missing in blog.audit() {
        tracing::warn!(
            "Post '{}' references unavailable content '{}' ({:?}); its page will be not-found",
            missing.slug,
            missing.file,
            missing.reason
        );
    }
    for slug in blog.duplicate_slugs() {
        tracing::warn!("Post slug '{}' appears more than once; the last entry is used", slug);
    }

    Ok(SiteContent {
        areas: catalog.areas().to_vec(),
        services: catalog.services().to_vec(),
        posts,
    })
}

fn view_path(route: &Route) -> String {
    format!("{}{}.json", VIEWS_DIR, route.path())
}

pub struct SitePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> SitePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn wants(&self, format: &str) -> bool {
        self.config.output_formats().iter().any(|f| f == format)
    }

    fn absolute_url(&self, path: &str) -> Option<String> {
        self.config
            .base_url()
            .map(|base| format!("{}{}", base.trim_end_matches('/'), path))
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for SitePipeline<S, C> {
    async fn extract(&self) -> Result<SiteContent> {
        let content_dir = PathBuf::from(self.config.content_dir());
        tokio::task::spawn_blocking(move || read_site_content(&content_dir))
            .await
            .map_err(|e| SiteError::IoError(std::io::Error::other(e)))?
    }

    async fn transform(&self, content: SiteContent) -> Result<BuildResult> {
        let catalog = Catalog::new(content.areas, content.services);
        let routes = enumerate_routes(&catalog, &content.posts);
        let site_name = self.config.site_name();

        let mut pages = Vec::with_capacity(routes.len());
        for route in &routes {
            let Some(meta) = page_meta(&catalog, &content.posts, route, site_name) else {
                tracing::warn!("Skipping {}: slug does not resolve", route.path());
                continue;
            };
            let path = route.path();
            pages.push(PageRecord {
                kind: route.kind(),
                url: self.absolute_url(&path),
                path,
                title: meta.title,
                description: meta.description,
            });
        }

        let manifest = PageManifest {
            site_name,
            generated_at: Utc::now(),
            page_count: pages.len(),
            pages: &pages,
        };
        let json_output = serde_json::to_string_pretty(&manifest)?;

        let csv_output = if self.wants("csv") {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for page in &pages {
                writer.serialize(page)?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| SiteError::IoError(e.into_error()))?;
            Some(String::from_utf8(bytes).map_err(|e| SiteError::ContentError {
                resource: PAGES_CSV.to_string(),
                message: e.to_string(),
            })?)
        } else {
            None
        };

        let mut views = Vec::new();
        if self.wants("views") {
            for route in &routes {
                if let Some(view) = page_view(&catalog, route, site_name) {
                    views.push(ViewFile {
                        path: view_path(route),
                        json: serde_json::to_string_pretty(&view)?,
                    });
                }
            }
        }

        Ok(BuildResult {
            pages,
            json_output,
            csv_output,
            views,
        })
    }

    async fn load(&self, result: BuildResult) -> Result<String> {
        self.storage
            .write_file(PAGES_JSON, result.json_output.as_bytes())
            .await?;
        tracing::debug!("Wrote {} ({} pages)", PAGES_JSON, result.pages.len());

        if let Some(csv) = &result.csv_output {
            self.storage.write_file(PAGES_CSV, csv.as_bytes()).await?;
            tracing::debug!("Wrote {}", PAGES_CSV);
        }

        for view in &result.views {
            self.storage.write_file(&view.path, view.json.as_bytes()).await?;
        }
        if !result.views.is_empty() {
            tracing::debug!("Wrote {} views under {}", result.views.len(), VIEWS_DIR);
        }

        Ok(self.storage.location(PAGES_JSON))
    }
}
