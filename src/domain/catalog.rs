//! Site content served by the API.
//!
//! The seed below is the only copy of the catalog. A restart resets nothing
//! because nothing here ever changes.

use crate::domain::model::{BudgetRange, CaseStudy, ServiceIcon, ServiceOffering, SiteOptions};
use std::sync::LazyLock;

pub const ALL_FILTER: &str = "All";

/// A Work page filter label and the case study categories it covers.
struct WorkFilter {
    label: &'static str,
    categories: &'static [&'static str],
}

const WORK_FILTERS: &[WorkFilter] = &[
    WorkFilter {
        label: ALL_FILTER,
        categories: &[],
    },
    WorkFilter {
        label: "App Development",
        categories: &["App Development", "Mobile"],
    },
    WorkFilter {
        label: "Cloud",
        categories: &["Cloud"],
    },
    WorkFilter {
        label: "Data",
        categories: &["Data", "Database", "Information Management"],
    },
    WorkFilter {
        label: "Design",
        categories: &["Design", "Web Design"],
    },
    WorkFilter {
        label: "Media",
        categories: &["Media", "Videography"],
    },
];

const BUDGET_RANGES: &[(&str, &str)] = &[
    ("10k-30k", "$10k - $30k"),
    ("30k-50k", "$30k - $50k"),
    ("50k-100k", "$50k - $100k"),
    ("100k+", "$100k+"),
];

const SERVICE_INTERESTS: &[&str] = &[
    "App Development",
    "Web Design",
    "Cloud",
    "Mobile",
    "Video",
    "Other",
];

static SERVICES: LazyLock<Vec<ServiceOffering>> = LazyLock::new(|| {
    let seed: [(u32, &str, &str, ServiceIcon); 10] = [
        (1, "Application Development", "Custom software tailored to your business needs.", ServiceIcon::Code),
        (2, "Cloud App Development", "Scalable cloud-native architectures.", ServiceIcon::Cloud),
        (3, "Database Development", "Robust data modeling and optimization.", ServiceIcon::Database),
        (4, "Information Management", "Organize and secure your enterprise data.", ServiceIcon::FileText),
        (5, "Mobile App Development", "Native and cross-platform mobile solutions.", ServiceIcon::Smartphone),
        (6, "iOS & Android Dev", "Dedicated development for Apple and Google ecosystems.", ServiceIcon::Smartphone),
        (7, "Web Design", "Visual storytelling and user-centric interfaces.", ServiceIcon::Layout),
        (8, "Visual Design", "Brand identity and graphic design assets.", ServiceIcon::PenTool),
        (9, "Videography", "Professional video production.", ServiceIcon::Video),
        (10, "Video Editing", "Post-production and motion graphics.", ServiceIcon::Film),
    ];

    seed.into_iter()
        .map(|(id, title, description, icon)| ServiceOffering {
            id,
            title: title.to_string(),
            description: description.to_string(),
            icon,
        })
        .collect()
});

struct CaseStudySeed {
    id: u32,
    title: &'static str,
    client: &'static str,
    category: &'static str,
    problem: &'static str,
    approach: &'static str,
    outcomes: &'static str,
    tech_stack: &'static [&'static str],
    image: &'static str,
}

const IMAGE_PARAMS: &str = "?auto=format&fit=crop&q=80&w=1000";

static CASE_STUDIES: LazyLock<Vec<CaseStudy>> = LazyLock::new(|| {
    let seed = [
        CaseStudySeed {
            id: 1,
            title: "Global Logistics Cloud Migration",
            client: "LogiGlobal",
            category: "Cloud",
            problem: "Legacy on-premise systems causing bottlenecks.",
            approach: "Migrated to AWS with microservices architecture.",
            outcomes: "40% cost reduction, 99.99% uptime.",
            tech_stack: &["AWS", "Docker", "Kubernetes", "Node.js"],
            image: "photo-1586528116311-ad8dd3c8310d",
        },
        CaseStudySeed {
            id: 2,
            title: "FinTech Mobile Banking App",
            client: "NeoBank",
            category: "Mobile",
            problem: "Need for a secure, user-friendly mobile banking experience.",
            approach: "Native iOS and Android apps with biometric security.",
            outcomes: "100k+ downloads in first month, 4.8 star rating.",
            tech_stack: &["Swift", "Kotlin", "Firebase", "Spring Boot"],
            image: "photo-1563986768609-322da13575f3",
        },
        CaseStudySeed {
            id: 3,
            title: "E-commerce Database Modernization",
            client: "ShopTrend",
            category: "Database",
            problem: "Slow query times during peak traffic.",
            approach: "Sharded MongoDB cluster implementation.",
            outcomes: "5x faster query speeds, linear scalability.",
            tech_stack: &["MongoDB", "Redis", "Express", "React"],
            image: "photo-1558494949-ef5487b67cf4",
        },
        CaseStudySeed {
            id: 4,
            title: "Corporate Knowledge Portal",
            client: "InfoCorp",
            category: "Information Management",
            problem: "Siloed information across departments.",
            approach: "SharePoint-based intranet with AI search.",
            outcomes: "30% increase in employee productivity.",
            tech_stack: &["SharePoint", "React", "Azure", "OpenAI"],
            image: "photo-1497215728101-856f4ea42174",
        },
        CaseStudySeed {
            id: 5,
            title: "Luxury Brand Redesign",
            client: "Aura",
            category: "Web Design",
            problem: "Outdated website not reflecting brand premiumness.",
            approach: "Minimalist, motion-heavy design system.",
            outcomes: "200% increase in lead conversion.",
            tech_stack: &["Framer Motion", "React", "TailwindCSS", "Sanity"],
            image: "photo-1600607686527-6fb886090705",
        },
        CaseStudySeed {
            id: 6,
            title: "Tech Conference Coverage",
            client: "DevCon",
            category: "Videography",
            problem: "Need high-quality recap videos for social media.",
            approach: "On-site videography and same-day editing.",
            outcomes: "1M+ views across social platforms.",
            tech_stack: &["Premiere Pro", "After Effects", "SonyFX3"],
            image: "photo-1574717432729-32130e927c36",
        },
    ];

    seed.into_iter()
        .map(|s| CaseStudy {
            id: s.id,
            title: s.title.to_string(),
            client: s.client.to_string(),
            category: s.category.to_string(),
            problem: s.problem.to_string(),
            approach: s.approach.to_string(),
            outcomes: s.outcomes.to_string(),
            tech_stack: s.tech_stack.iter().map(|t| t.to_string()).collect(),
            image_url: format!("https://images.unsplash.com/{}{}", s.image, IMAGE_PARAMS),
        })
        .collect()
});

pub fn list_services() -> &'static [ServiceOffering] {
    &SERVICES
}

pub fn list_case_studies() -> &'static [CaseStudy] {
    &CASE_STUDIES
}

/// Case studies shown under a Work page filter. `All` returns everything, a
/// group label widens to its member categories, anything else matches the
/// category exactly.
pub fn filter_case_studies(label: &str) -> Vec<&'static CaseStudy> {
    if label == ALL_FILTER {
        return list_case_studies().iter().collect();
    }

    let group = WORK_FILTERS.iter().find(|f| f.label == label);
    list_case_studies()
        .iter()
        .filter(|study| match group {
            Some(filter) => filter.categories.contains(&study.category.as_str()),
            None => study.category == label,
        })
        .collect()
}

pub fn work_filters() -> Vec<String> {
    WORK_FILTERS.iter().map(|f| f.label.to_string()).collect()
}

pub fn budget_ranges() -> Vec<BudgetRange> {
    BUDGET_RANGES
        .iter()
        .map(|(value, label)| BudgetRange {
            value: value.to_string(),
            label: label.to_string(),
        })
        .collect()
}

pub fn service_interests() -> Vec<String> {
    SERVICE_INTERESTS.iter().map(|s| s.to_string()).collect()
}

pub fn site_options() -> SiteOptions {
    SiteOptions {
        work_filters: work_filters(),
        budget_ranges: budget_ranges(),
        service_interests: service_interests(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clients(studies: &[&CaseStudy]) -> Vec<String> {
        studies.iter().map(|s| s.client.clone()).collect()
    }

    #[test]
    fn test_services_are_fixed_and_ordered() {
        let services = list_services();
        assert_eq!(services.len(), 10);
        let ids: Vec<u32> = services.iter().map(|s| s.id).collect();
        assert_eq!(ids, (1..=10).collect::<Vec<_>>());
        assert_eq!(services[0].title, "Application Development");
        assert_eq!(services[9].icon, ServiceIcon::Film);
        assert_eq!(list_services(), services);
    }

    #[test]
    fn test_case_studies_are_fixed() {
        let studies = list_case_studies();
        assert_eq!(studies.len(), 6);
        assert_eq!(studies[1].client, "NeoBank");
        assert_eq!(studies[5].tech_stack.len(), 3);
        assert!(studies
            .iter()
            .all(|s| s.image_url.starts_with("https://images.unsplash.com/photo-")));
    }

    #[test]
    fn test_filter_all_returns_everything() {
        assert_eq!(filter_case_studies("All").len(), 6);
    }

    #[test]
    fn test_filter_mobile_includes_neobank() {
        let mobile = filter_case_studies("Mobile");
        assert_eq!(clients(&mobile), vec!["NeoBank"]);
    }

    #[test]
    fn test_filter_groups_widen_to_member_categories() {
        assert_eq!(clients(&filter_case_studies("App Development")), vec!["NeoBank"]);
        assert_eq!(
            clients(&filter_case_studies("Data")),
            vec!["ShopTrend", "InfoCorp"]
        );
        assert_eq!(clients(&filter_case_studies("Design")), vec!["Aura"]);
        assert_eq!(clients(&filter_case_studies("Media")), vec!["DevCon"]);
    }

    #[test]
    fn test_filter_unknown_category_is_empty() {
        assert!(filter_case_studies("Blockchain").is_empty());
        assert!(filter_case_studies("mobile").is_empty());
    }

    #[test]
    fn test_site_options() {
        let options = site_options();
        assert_eq!(options.work_filters[0], ALL_FILTER);
        assert_eq!(options.work_filters.len(), 6);
        assert_eq!(options.budget_ranges[3].value, "100k+");
        assert!(options.service_interests.contains(&"Other".to_string()));
    }
}
