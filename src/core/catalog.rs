//! Service/area catalog.
//!
//! The bundled catalog is compiled in from `content/services/*.json` and parsed
//! once, on first access. Lookups are linear scans; the collections hold tens of
//! entries.

use crate::domain::model::{Area, AreaParam, Service, ServiceAreaParam, ServiceParam};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{is_valid_slug, Validate};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::path::Path;
use std::sync::OnceLock;

pub const AREA_PLACEHOLDER: &str = "{area}";

pub const AREAS_FILE: &str = "services/areas.json";
pub const SERVICES_FILE: &str = "services/services.json";

const BUNDLED_AREAS: &str = include_str!("../../content/services/areas.json");
const BUNDLED_SERVICES: &str = include_str!("../../content/services/services.json");

static BUNDLED: OnceLock<Catalog> = OnceLock::new();

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    areas: Vec<Area>,
    services: Vec<Service>,
}

impl Catalog {
    pub fn new(areas: Vec<Area>, services: Vec<Service>) -> Self {
        Self { areas, services }
    }

    /// The catalog compiled into the binary.
    pub fn bundled() -> &'static Catalog {
        BUNDLED.get_or_init(|| {
            let areas = parse_or_empty::<Area>("areas.json", BUNDLED_AREAS);
            let services = parse_or_empty::<Service>("services.json", BUNDLED_SERVICES);
            tracing::debug!(
                "Loaded bundled catalog: {} services, {} areas",
                services.len(),
                areas.len()
            );
            Catalog::new(areas, services)
        })
    }

    pub fn from_json(areas_json: &str, services_json: &str) -> Result<Self> {
        let areas = parse_collection("areas.json", areas_json)?;
        let services = parse_collection("services.json", services_json)?;
        Ok(Self::new(areas, services))
    }

    /// Loads `services/areas.json` and `services/services.json` under `content_dir`.
    pub fn from_dir<P: AsRef<Path>>(content_dir: P) -> Result<Self> {
        let dir = content_dir.as_ref();
        let areas = std::fs::read_to_string(dir.join(AREAS_FILE))?;
        let services = std::fs::read_to_string(dir.join(SERVICES_FILE))?;
        Self::from_json(&areas, &services)
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn area_by_slug(&self, slug: &str) -> Option<&Area> {
        self.areas.iter().find(|a| a.slug == slug)
    }

    pub fn service_by_slug(&self, slug: &str) -> Option<&Service> {
        self.services.iter().find(|s| s.slug == slug)
    }

    /// Display name for a service slug, falling back to the humanized slug.
    pub fn human_service_name(&self, slug: &str) -> String {
        match self.service_by_slug(slug) {
            Some(service) if !service.name.is_empty() => service.name.clone(),
            _ => humanize_slug(slug),
        }
    }

    /// Every service crossed with every area, service-major.
    pub fn service_area_params(&self) -> Vec<ServiceAreaParam> {
        self.services
            .iter()
            .flat_map(|s| {
                self.areas.iter().map(move |a| ServiceAreaParam {
                    service: s.slug.clone(),
                    area: a.slug.clone(),
                })
            })
            .collect()
    }

    pub fn service_params(&self) -> Vec<ServiceParam> {
        self.services
            .iter()
            .map(|s| ServiceParam {
                service: s.slug.clone(),
            })
            .collect()
    }

    pub fn area_params(&self) -> Vec<AreaParam> {
        self.areas
            .iter()
            .map(|a| AreaParam {
                area: a.slug.clone(),
            })
            .collect()
    }

    /// All data problems found in the catalog, in source order.
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        check_slugs("area", self.areas.iter().map(|a| a.slug.as_str()), &mut problems);
        check_slugs(
            "service",
            self.services.iter().map(|s| s.slug.as_str()),
            &mut problems,
        );

        for service in &self.services {
            if !service.title_template.contains(AREA_PLACEHOLDER) {
                problems.push(format!(
                    "service '{}': titleTemplate has no {} placeholder",
                    service.slug, AREA_PLACEHOLDER
                ));
            }
            if !service.meta_template.contains(AREA_PLACEHOLDER) {
                problems.push(format!(
                    "service '{}': metaTemplate has no {} placeholder",
                    service.slug, AREA_PLACEHOLDER
                ));
            }
        }

        problems
    }
}

impl Validate for Catalog {
    fn validate(&self) -> Result<()> {
        let problems = self.problems();
        if problems.is_empty() {
            Ok(())
        } else {
            Err(SiteError::CatalogValidationError {
                message: problems.join("; "),
            })
        }
    }
}

fn check_slugs<'a>(kind: &str, slugs: impl Iterator<Item = &'a str>, problems: &mut Vec<String>) {
    let mut seen = HashSet::new();
    for slug in slugs {
        if !is_valid_slug(slug) {
            problems.push(format!("{} slug '{}' is not a valid slug", kind, slug));
        }
        if !seen.insert(slug) {
            problems.push(format!("duplicate {} slug '{}'", kind, slug));
        }
    }
}

fn parse_collection<T: DeserializeOwned>(resource: &str, raw: &str) -> Result<Vec<T>> {
    serde_json::from_str(raw).map_err(|e| SiteError::ContentError {
        resource: resource.to_string(),
        message: e.to_string(),
    })
}

fn parse_or_empty<T: DeserializeOwned>(resource: &str, raw: &str) -> Vec<T> {
    parse_collection(resource, raw).unwrap_or_else(|e| {
        tracing::error!("Bundled {} is unusable, treating it as empty: {}", resource, e);
        Vec::new()
    })
}

/// Replaces every `{area}` in `template` with `area_name`.
pub fn fill_area_template(template: &str, area_name: &str) -> String {
    template.replace(AREA_PLACEHOLDER, area_name)
}

pub fn title_for(service: &Service, area: &Area) -> String {
    fill_area_template(&service.title_template, &area.name)
}

pub fn meta_for(service: &Service, area: &Area) -> String {
    fill_area_template(&service.meta_template, &area.name)
}

/// `bed-bug-exterminators` -> `Bed Bug Exterminators`.
pub fn humanize_slug(slug: &str) -> String {
    let mut out = String::with_capacity(slug.len());
    let mut prev_is_word = false;
    for c in slug.chars() {
        let c = if c == '-' { ' ' } else { c };
        let is_word = c.is_ascii_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }
    out
}

pub fn get_all_areas() -> &'static [Area] {
    Catalog::bundled().areas()
}

pub fn get_all_services() -> &'static [Service] {
    Catalog::bundled().services()
}

pub fn get_area_by_slug(slug: &str) -> Option<&'static Area> {
    Catalog::bundled().area_by_slug(slug)
}

pub fn get_service_by_slug(slug: &str) -> Option<&'static Service> {
    Catalog::bundled().service_by_slug(slug)
}

pub fn human_service_name(slug: &str) -> String {
    Catalog::bundled().human_service_name(slug)
}

pub fn all_service_area_params() -> Vec<ServiceAreaParam> {
    Catalog::bundled().service_area_params()
}

pub fn all_service_params() -> Vec<ServiceParam> {
    Catalog::bundled().service_params()
}

pub fn all_area_params() -> Vec<AreaParam> {
    Catalog::bundled().area_params()
}
