use crate::core::catalog::{meta_for, title_for, Catalog};
use crate::domain::model::{BlogPostMeta, Faq, PageKind};
use serde::Serialize;
use std::collections::HashSet;

pub const DEFAULT_SITE_NAME: &str = "Building Health X";

const SERVICES_HUB_DESCRIPTION: &str = "Local NYC services aligned with renting and building living: movers, pest control, move-out cleaning, storage, tenant help, and more.";

/// One static page to pre-render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Route {
    ServicesHub,
    Service { service: String },
    Area { area: String },
    ServiceArea { service: String, area: String },
    BlogPost { slug: String },
}

impl Route {
    pub fn kind(&self) -> PageKind {
        match self {
            Route::ServicesHub => PageKind::ServicesHub,
            Route::Service { .. } => PageKind::Service,
            Route::Area { .. } => PageKind::Area,
            Route::ServiceArea { .. } => PageKind::ServiceArea,
            Route::BlogPost { .. } => PageKind::BlogPost,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::ServicesHub => "/services".to_string(),
            Route::Service { service } => format!("/services/{}", service),
            Route::Area { area } => format!("/areas/{}", area),
            Route::ServiceArea { service, area } => format!("/services/{}/{}", service, area),
            Route::BlogPost { slug } => format!("/blog/{}", slug),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub title: String,
    pub description: String,
}

/// Hub, then services, areas, service×area pairs (service-major) and posts.
/// Posts sharing a slug get a single route.
pub fn enumerate_routes(catalog: &Catalog, posts: &[BlogPostMeta]) -> Vec<Route> {
    let mut routes = Vec::with_capacity(
        1 + catalog.services().len() * (catalog.areas().len() + 1)
            + catalog.areas().len()
            + posts.len(),
    );

    routes.push(Route::ServicesHub);
    routes.extend(
        catalog
            .service_params()
            .into_iter()
            .map(|p| Route::Service { service: p.service }),
    );
    routes.extend(
        catalog
            .area_params()
            .into_iter()
            .map(|p| Route::Area { area: p.area }),
    );
    routes.extend(
        catalog
            .service_area_params()
            .into_iter()
            .map(|p| Route::ServiceArea {
                service: p.service,
                area: p.area,
            }),
    );
    let mut seen_posts = HashSet::new();
    routes.extend(
        posts
            .iter()
            .filter(|p| seen_posts.insert(p.slug.as_str()))
            .map(|p| Route::BlogPost {
                slug: p.slug.clone(),
            }),
    );

    routes
}

/// Title and description for `route`, or `None` when a slug does not resolve.
pub fn page_meta(
    catalog: &Catalog,
    posts: &[BlogPostMeta],
    route: &Route,
    site_name: &str,
) -> Option<PageMeta> {
    let meta = match route {
        Route::ServicesHub => PageMeta {
            title: format!("Services | {}", site_name),
            description: SERVICES_HUB_DESCRIPTION.to_string(),
        },
        Route::Service { service } => {
            let svc = catalog.service_by_slug(service)?;
            PageMeta {
                title: format!("{} by neighborhood | {}", svc.name, site_name),
                description: format!(
                    "Local {} pages for NYC neighborhoods with practical tips and a quick checklist.",
                    svc.name.to_lowercase()
                ),
            }
        }
        Route::Area { area } => {
            let area = catalog.area_by_slug(area)?;
            PageMeta {
                title: format!("Local services in {}, {} | {}", area.name, area.borough, site_name),
                description: area.blurb.clone(),
            }
        }
        Route::ServiceArea { service, area } => {
            let svc = catalog.service_by_slug(service)?;
            let area = catalog.area_by_slug(area)?;
            PageMeta {
                title: format!("{} | {}", title_for(svc, area), site_name),
                description: meta_for(svc, area),
            }
        }
        Route::BlogPost { slug } => {
            // Last entry wins, as in `BlogIndex`.
            let post = posts.iter().rev().find(|p| &p.slug == slug)?;
            PageMeta {
                title: format!("{} | {}", post.title, site_name),
                description: post.excerpt.clone(),
            }
        }
    };
    Some(meta)
}

const BASE_TIPS: [&str; 3] = [
    "Confirm building rules early (move windows, elevator bookings, deposits).",
    "Ask for pricing in writing and watch for common add-ons.",
    "Plan logistics (parking/loading, long carries, stairs) to avoid delays.",
];

fn service_tips(service_slug: &str) -> &'static [&'static str] {
    match service_slug {
        "moving-companies" => &[
            "If your building needs a COI, get the exact wording from management before booking.",
            "End-of-month demand spikes—weekday slots are usually cheaper and easier.",
        ],
        "move-out-cleaning" => &[
            "Ask what “move-out clean” includes (inside oven/fridge, baseboards, windows).",
            "If you have a management walkthrough, schedule cleaning the day before.",
        ],
        "storage-units" => &[
            "Check elevator access and loading rules at the facility (some require appointments).",
            "Climate control matters for wood furniture, art, and electronics.",
        ],
        "junk-removal" => &[
            "Ask about disposal fees for construction debris, electronics, and mattresses.",
            "If your building has a service entrance, confirm pickup location and timing.",
        ],
        "pest-control" => &[
            "Treating one unit is rarely enough—ask about building-wide coordination.",
            "Request clear prep instructions (laundry, bagging, access to baseboards).",
        ],
        "bed-bug-exterminators" => &[
            "Insist on a written treatment plan (follow-up visits + guarantees).",
            "Prep is everything—get a checklist and timeline before paying.",
        ],
        "rodent-control" => &[
            "Proofing (sealing entry points) is as important as baiting.",
            "Ask what’s included: inspection, exclusion, and follow-up visits.",
        ],
        "mold-remediation" => &[
            "Fix the moisture source first (leaks/condensation), then remediate.",
            "Ask whether containment and HEPA filtration are included.",
        ],
        "air-quality-testing" => &[
            "Decide what you’re testing for (mold spores, VOCs, particulate, CO2).",
            "Ask how results are interpreted and what actions they recommend.",
        ],
        "tenant-lawyers" => &[
            "Bring a timeline, photos, and copies of notices/complaints to the first call.",
            "Ask about expected outcomes, fees, and typical timeframes.",
        ],
        "home-inspection" => &[
            "For co-ops/condos, ask what can and can’t be inspected (common areas vs unit).",
            "Get photos and a prioritized repair list you can negotiate with.",
        ],
        "internet-providers" => &[
            "Ask your building which providers are wired—availability varies by address.",
            "For WFH, prioritize upload speeds and latency, not just download.",
        ],
        _ => &[],
    }
}

fn borough_note(borough: &str) -> &'static str {
    match borough {
        "Manhattan" => "In Manhattan, curb space and building move windows are often the biggest bottlenecks.",
        "Brooklyn" => "In Brooklyn, walk-ups and brownstone stairs can add time—plan for carrying distance.",
        "Queens" => "In Queens, parking is sometimes easier, but building rules still vary widely.",
        "Bronx" => "In the Bronx, confirm access routes and timing—some buildings have strict service-entry rules.",
        "Staten Island" => "In Staten Island, longer driveways and curb access help, but confirm HOA/building requirements.",
        _ => "",
    }
}

/// Service tips, then the borough note, then the general tips.
pub fn local_tips(service_slug: &str, borough: &str) -> Vec<String> {
    service_tips(service_slug)
        .iter()
        .copied()
        .chain(std::iter::once(borough_note(borough)))
        .chain(BASE_TIPS)
        .filter(|tip| !tip.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub label: String,
    pub href: Option<String>,
}

impl Breadcrumb {
    fn link(label: &str, href: String) -> Self {
        Self {
            label: label.to_string(),
            href: Some(href),
        }
    }

    fn current(label: &str) -> Self {
        Self {
            label: label.to_string(),
            href: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCard {
    pub name: String,
    pub category: String,
    pub href: String,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaCard {
    pub name: String,
    pub borough: String,
    pub blurb: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceHubView {
    pub name: String,
    pub checklist_preview: Vec<String>,
    pub areas: Vec<AreaCard>,
    pub breadcrumbs: Vec<Breadcrumb>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceAreaView {
    pub heading: String,
    pub meta: PageMeta,
    pub category: String,
    pub borough: String,
    pub area_name: String,
    pub area_blurb: String,
    pub highlights: Vec<String>,
    pub checklist: Vec<String>,
    pub tips: Vec<String>,
    pub faqs: Vec<Faq>,
    pub cta: String,
    pub cta_heading: String,
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// Cards for the services hub, in catalog order.
pub fn services_hub_view(catalog: &Catalog) -> Vec<ServiceCard> {
    catalog
        .services()
        .iter()
        .map(|s| ServiceCard {
            name: s.name.clone(),
            category: s.category.clone(),
            href: Route::Service {
                service: s.slug.clone(),
            }
            .path(),
            summary: s.highlights.iter().take(3).cloned().collect::<Vec<_>>().join(" • "),
        })
        .collect()
}

pub fn service_hub_view(catalog: &Catalog, service_slug: &str) -> Option<ServiceHubView> {
    let svc = catalog.service_by_slug(service_slug)?;

    let areas = catalog
        .areas()
        .iter()
        .map(|a| AreaCard {
            name: a.name.clone(),
            borough: a.borough.clone(),
            blurb: a.blurb.clone(),
            href: Route::ServiceArea {
                service: svc.slug.clone(),
                area: a.slug.clone(),
            }
            .path(),
        })
        .collect();

    Some(ServiceHubView {
        name: svc.name.clone(),
        checklist_preview: svc.checklist.iter().take(3).cloned().collect(),
        areas,
        breadcrumbs: vec![
            Breadcrumb::link("Services", Route::ServicesHub.path()),
            Breadcrumb::current(&svc.name),
        ],
    })
}

pub fn service_area_view(
    catalog: &Catalog,
    service_slug: &str,
    area_slug: &str,
    site_name: &str,
) -> Option<ServiceAreaView> {
    let svc = catalog.service_by_slug(service_slug)?;
    let area = catalog.area_by_slug(area_slug)?;
    let heading = title_for(svc, area);

    Some(ServiceAreaView {
        meta: PageMeta {
            title: format!("{} | {}", heading, site_name),
            description: meta_for(svc, area),
        },
        heading,
        category: svc.category.clone(),
        borough: area.borough.clone(),
        area_name: area.name.clone(),
        area_blurb: area.blurb.clone(),
        highlights: svc.highlights.iter().take(4).cloned().collect(),
        checklist: svc.checklist.clone(),
        tips: local_tips(&svc.slug, &area.borough),
        faqs: svc.faqs.clone(),
        cta: svc.cta.clone(),
        cta_heading: format!("{} in {}", svc.cta, area.name),
        breadcrumbs: vec![
            Breadcrumb::link("Services", Route::ServicesHub.path()),
            Breadcrumb::link(
                &svc.name,
                Route::Service {
                    service: svc.slug.clone(),
                }
                .path(),
            ),
            Breadcrumb::current(&area.name),
        ],
    })
}

/// View model for a route that has one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum PageView {
    ServicesHub { services: Vec<ServiceCard> },
    Service(ServiceHubView),
    ServiceArea(ServiceAreaView),
}

/// `None` for area and blog routes (no view model) and for unknown slugs.
pub fn page_view(catalog: &Catalog, route: &Route, site_name: &str) -> Option<PageView> {
    match route {
        Route::ServicesHub => Some(PageView::ServicesHub {
            services: services_hub_view(catalog),
        }),
        Route::Service { service } => service_hub_view(catalog, service).map(PageView::Service),
        Route::ServiceArea { service, area } => {
            service_area_view(catalog, service, area, site_name).map(PageView::ServiceArea)
        }
        Route::Area { .. } | Route::BlogPost { .. } => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Area, Service};

    fn catalog() -> Catalog {
        Catalog::new(
            vec![
                Area {
                    slug: "park-slope".to_string(),
                    name: "Park Slope".to_string(),
                    borough: "Brooklyn".to_string(),
                    blurb: "Brownstones.".to_string(),
                },
                Area {
                    slug: "astoria".to_string(),
                    name: "Astoria".to_string(),
                    borough: "Queens".to_string(),
                    blurb: "Two-family homes.".to_string(),
                },
            ],
            vec![Service {
                slug: "moving-companies".to_string(),
                name: "Moving Companies".to_string(),
                title_template: "Movers in {area}".to_string(),
                meta_template: "Compare movers in {area}.".to_string(),
                category: "Moving".to_string(),
                cta: "Get quotes".to_string(),
                highlights: (1..=5).map(|i| format!("h{}", i)).collect(),
                checklist: vec!["c1".to_string(), "c2".to_string()],
                faqs: vec![Faq {
                    q: "When?".to_string(),
                    a: "Soon.".to_string(),
                }],
            }],
        )
    }

    fn post(slug: &str) -> BlogPostMeta {
        BlogPostMeta {
            slug: slug.to_string(),
            title: "Moving Day".to_string(),
            excerpt: "What to expect.".to_string(),
            cover_image: None,
        }
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::ServicesHub.path(), "/services");
        assert_eq!(
            Route::ServiceArea {
                service: "pest-control".to_string(),
                area: "astoria".to_string()
            }
            .path(),
            "/services/pest-control/astoria"
        );
        assert_eq!(Route::Area { area: "harlem".to_string() }.path(), "/areas/harlem");
        assert_eq!(Route::BlogPost { slug: "x".to_string() }.path(), "/blog/x");
    }

    #[test]
    fn test_enumerate_routes_counts() {
        let routes = enumerate_routes(&catalog(), &[post("moving-day")]);
        // hub + 1 service + 2 areas + 2 pairs + 1 post
        assert_eq!(routes.len(), 7);
        assert_eq!(routes[0], Route::ServicesHub);
        assert_eq!(routes.last().map(Route::kind), Some(PageKind::BlogPost));
    }

    #[test]
    fn test_page_meta_for_service_area() {
        let route = Route::ServiceArea {
            service: "moving-companies".to_string(),
            area: "park-slope".to_string(),
        };
        let meta = page_meta(&catalog(), &[], &route, DEFAULT_SITE_NAME).unwrap();
        assert_eq!(meta.title, "Movers in Park Slope | Building Health X");
        assert_eq!(meta.description, "Compare movers in Park Slope.");
    }

    #[test]
    fn test_page_meta_for_service_hub() {
        let route = Route::Service {
            service: "moving-companies".to_string(),
        };
        let meta = page_meta(&catalog(), &[], &route, "Site").unwrap();
        assert_eq!(meta.title, "Moving Companies by neighborhood | Site");
        assert!(meta.description.starts_with("Local moving companies pages"));
    }

    #[test]
    fn test_page_meta_unknown_slug_is_none() {
        let route = Route::ServiceArea {
            service: "moving-companies".to_string(),
            area: "atlantis".to_string(),
        };
        assert!(page_meta(&catalog(), &[], &route, "Site").is_none());
        let route = Route::BlogPost {
            slug: "missing".to_string(),
        };
        assert!(page_meta(&catalog(), &[post("other")], &route, "Site").is_none());
    }

    #[test]
    fn test_local_tips_order() {
        let tips = local_tips("moving-companies", "Brooklyn");
        assert_eq!(tips.len(), 6);
        assert!(tips[0].contains("COI"));
        assert!(tips[2].starts_with("In Brooklyn"));
        assert_eq!(tips[5], BASE_TIPS[2]);
    }

    #[test]
    fn test_local_tips_unknown_service_and_borough() {
        let tips = local_tips("dog-walkers", "Hoboken");
        assert_eq!(tips, BASE_TIPS.iter().map(|t| t.to_string()).collect::<Vec<_>>());
    }

    #[test]
    fn test_service_area_view() {
        let view = service_area_view(&catalog(), "moving-companies", "astoria", "Site").unwrap();
        assert_eq!(view.heading, "Movers in Astoria");
        assert_eq!(view.highlights.len(), 4);
        assert_eq!(view.cta_heading, "Get quotes in Astoria");
        assert!(view.tips.iter().any(|t| t.starts_with("In Queens")));
        assert_eq!(view.breadcrumbs.len(), 3);
        assert_eq!(view.breadcrumbs[1].href.as_deref(), Some("/services/moving-companies"));
        assert!(service_area_view(&catalog(), "moving-companies", "nowhere", "Site").is_none());
    }

    #[test]
    fn test_hub_views() {
        let cards = services_hub_view(&catalog());
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].summary, "h1 • h2 • h3");

        let hub = service_hub_view(&catalog(), "moving-companies").unwrap();
        assert_eq!(hub.areas.len(), 2);
        assert_eq!(hub.areas[0].href, "/services/moving-companies/park-slope");
        assert_eq!(hub.checklist_preview, vec!["c1", "c2"]);
        assert!(service_hub_view(&catalog(), "nope").is_none());
    }

    #[test]
    fn test_local_tips_keep_source_punctuation() {
        let tips = local_tips("moving-companies", "Brooklyn");
        assert_eq!(
            tips[1],
            "End-of-month demand spikes—weekday slots are usually cheaper and easier."
        );
        let tips = local_tips("move-out-cleaning", "Queens");
        assert_eq!(
            tips[0],
            "Ask what “move-out clean” includes (inside oven/fridge, baseboards, windows)."
        );
    }

    #[test]
    fn test_duplicate_post_slugs_resolve_to_last_entry() {
        let posts = vec![
            BlogPostMeta {
                title: "Old".to_string(),
                ..post("a")
            },
            BlogPostMeta {
                title: "New".to_string(),
                ..post("a")
            },
        ];
        let routes = enumerate_routes(&Catalog::default(), &posts);
        let blog: Vec<_> = routes.iter().filter(|r| r.kind() == PageKind::BlogPost).collect();
        assert_eq!(blog, vec![&Route::BlogPost { slug: "a".to_string() }]);

        let meta = page_meta(&Catalog::default(), &posts, blog[0], "S").unwrap();
        assert_eq!(meta.title, "New | S");
    }

    #[test]
    fn test_page_view_by_route() {
        let catalog = catalog();
        let route = Route::ServiceArea {
            service: "moving-companies".to_string(),
            area: "park-slope".to_string(),
        };
        match page_view(&catalog, &route, "Site") {
            Some(PageView::ServiceArea(view)) => assert_eq!(view.heading, "Movers in Park Slope"),
            other => panic!("unexpected view: {:?}", other),
        }
        assert!(matches!(
            page_view(&catalog, &Route::ServicesHub, "Site"),
            Some(PageView::ServicesHub { services }) if services.len() == 1
        ));
        assert!(page_view(&catalog, &Route::Area { area: "astoria".to_string() }, "Site").is_none());
        assert!(page_view(&catalog, &Route::BlogPost { slug: "x".to_string() }, "Site").is_none());

        let json = serde_json::to_value(page_view(&catalog, &route, "Site").unwrap()).unwrap();
        assert_eq!(json["view"], "service_area");
        assert_eq!(json["area_name"], "Park Slope");
    }
}
