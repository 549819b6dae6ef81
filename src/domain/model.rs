use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Area {
    pub slug: String,
    pub name: String,
    pub borough: String,
    pub blurb: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Faq {
    pub q: String,
    pub a: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub slug: String,
    pub name: String,
    /// Page title with an `{area}` placeholder.
    pub title_template: String,
    /// Meta description with an `{area}` placeholder.
    pub meta_template: String,
    pub category: String,
    pub cta: String,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub checklist: Vec<String>,
    #[serde(default)]
    pub faqs: Vec<Faq>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPostMeta {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
}

/// A post with its rendered body, resolved on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    #[serde(flatten)]
    pub meta: BlogPostMeta,
    pub html: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceAreaParam {
    pub service: String,
    pub area: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ServiceParam {
    pub service: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AreaParam {
    pub area: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    ServicesHub,
    Service,
    Area,
    ServiceArea,
    BlogPost,
}

/// One row of the page manifest written by a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub kind: PageKind,
    pub path: String,
    pub url: Option<String>,
    pub title: String,
    pub description: String,
}

/// Everything a build reads before pages are enumerated.
#[derive(Debug, Clone, Default)]
pub struct SiteContent {
    pub areas: Vec<Area>,
    pub services: Vec<Service>,
    pub posts: Vec<BlogPostMeta>,
}

/// A rendered view model, stored at `path` relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewFile {
    pub path: String,
    pub json: String,
}

#[derive(Debug, Clone)]
pub struct BuildResult {
    pub pages: Vec<PageRecord>,
    pub json_output: String,
    pub csv_output: Option<String>,
    pub views: Vec<ViewFile>,
}
