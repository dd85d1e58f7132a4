//! Built-in route table of the KVK portal.

use std::sync::LazyLock;

use super::route::Category::AllMasters;
use super::route::Category::Dashboard;
use super::route::Category::FormManagement;
use super::route::Category::Projects;
use super::route::RouteDescriptor as R;

const BASIC_MASTERS: [&str; 5] = [
    "/all-master/zone",
    "/all-master/state",
    "/all-master/district",
    "/all-master/organization",
    "/all-master/university",
];

const OFT_MASTERS: [&str; 2] = ["/all-master/oft/subject", "/all-master/oft/thematic-area"];

const FLD_MASTERS: [&str; 3] = [
    "/all-master/fld/sector",
    "/all-master/fld/thematic-area",
    "/all-master/fld/category",
];

const PROJECTS: [&str; 5] = [
    "/projects/cfld",
    "/projects/cra",
    "/projects/fpo",
    "/projects/drmr",
    "/projects/nari",
];

const ABOUT_KVK: [&str; 5] = [
    "/forms/about-kvk/bank-account",
    "/forms/about-kvk/employee",
    "/forms/about-kvk/vehicles",
    "/forms/about-kvk/equipments",
    "/forms/about-kvk/infrastructure",
];

const ACHIEVEMENTS: [&str; 3] = [
    "/forms/achievements/oft",
    "/forms/achievements/fld",
    "/forms/achievements/training",
];

static KVK_ROUTES: LazyLock<Vec<R>> = LazyLock::new(|| {
    vec![
        R::new("/dashboard", "Dashboard", Dashboard),
        R::new("/dashboard/reports", "Reports", Dashboard)
            .description("Consolidated reports per organizational unit")
            .parent("/dashboard"),
        // All masters
        R::new("/all-master", "All Masters", AllMasters),
        R::new("/all-master/zone", "Zone Master", AllMasters)
            .subcategory("Basic Masters")
            .siblings(BASIC_MASTERS),
        R::new("/all-master/state", "State Master", AllMasters)
            .subcategory("Basic Masters")
            .siblings(BASIC_MASTERS),
        R::new("/all-master/district", "District Master", AllMasters)
            .subcategory("Basic Masters")
            .siblings(BASIC_MASTERS),
        R::new("/all-master/organization", "Organization Master", AllMasters)
            .subcategory("Basic Masters")
            .siblings(BASIC_MASTERS),
        R::new("/all-master/university", "University Master", AllMasters)
            .subcategory("Basic Masters")
            .siblings(BASIC_MASTERS),
        R::new("/all-master/zone/:id", "Edit Zone", AllMasters)
            .subcategory("Basic Masters")
            .parent("/all-master/zone"),
        R::new("/all-master/district/:id", "Edit District", AllMasters)
            .subcategory("Basic Masters")
            .parent("/all-master/district"),
        R::new("/all-master/oft/subject", "OFT Subject", AllMasters)
            .subcategory("OFT Masters")
            .siblings(OFT_MASTERS),
        R::new("/all-master/oft/thematic-area", "OFT Thematic Area", AllMasters)
            .subcategory("OFT Masters")
            .siblings(OFT_MASTERS),
        R::new("/all-master/fld/sector", "FLD Sector", AllMasters)
            .subcategory("FLD Masters")
            .siblings(FLD_MASTERS),
        R::new("/all-master/fld/thematic-area", "FLD Thematic Area", AllMasters)
            .subcategory("FLD Masters")
            .siblings(FLD_MASTERS),
        R::new("/all-master/fld/category", "FLD Category", AllMasters)
            .subcategory("FLD Masters")
            .siblings(FLD_MASTERS),
        // Projects
        R::new("/projects", "Projects", Projects),
        R::new("/projects/cfld", "CFLD", Projects)
            .description("Cluster Frontline Demonstrations")
            .parent("/projects")
            .siblings(PROJECTS),
        R::new("/projects/cra", "CRA", Projects)
            .description("Climate Resilient Agriculture")
            .parent("/projects")
            .siblings(PROJECTS),
        R::new("/projects/fpo", "FPO", Projects)
            .description("Farmer Producer Organizations")
            .parent("/projects")
            .siblings(PROJECTS),
        R::new("/projects/drmr", "DRMR", Projects)
            .description("Rapeseed-Mustard Research")
            .parent("/projects")
            .siblings(PROJECTS),
        R::new("/projects/nari", "NARI", Projects)
            .description("Nutri-Sensitive Agricultural Resources and Innovations")
            .parent("/projects")
            .siblings(PROJECTS),
        R::new("/projects/cfld/:id", "CFLD Details", Projects).parent("/projects/cfld"),
        R::new("/projects/cra/:id", "CRA Details", Projects).parent("/projects/cra"),
        // Form management
        R::new("/forms", "Form Management", FormManagement),
        R::new("/forms/about-kvk", "About KVK", FormManagement).parent("/forms"),
        R::new("/forms/about-kvk/bank-account", "Bank Account Details", FormManagement)
            .subcategory_at("About KVK", "/forms/about-kvk")
            .parent("/forms/about-kvk")
            .siblings(ABOUT_KVK),
        R::new("/forms/about-kvk/employee", "Staff Details", FormManagement)
            .subcategory_at("About KVK", "/forms/about-kvk")
            .parent("/forms/about-kvk")
            .siblings(ABOUT_KVK),
        R::new("/forms/about-kvk/vehicles", "Vehicle Details", FormManagement)
            .subcategory_at("About KVK", "/forms/about-kvk")
            .parent("/forms/about-kvk")
            .siblings(ABOUT_KVK),
        R::new("/forms/about-kvk/equipments", "Equipment Details", FormManagement)
            .subcategory_at("About KVK", "/forms/about-kvk")
            .parent("/forms/about-kvk")
            .siblings(ABOUT_KVK),
        R::new("/forms/about-kvk/infrastructure", "Infrastructure Details", FormManagement)
            .subcategory_at("About KVK", "/forms/about-kvk")
            .parent("/forms/about-kvk")
            .siblings(ABOUT_KVK),
        R::new("/forms/about-kvk/vehicles/:id", "Vehicle Record", FormManagement)
            .subcategory_at("About KVK", "/forms/about-kvk")
            .parent("/forms/about-kvk/vehicles"),
        R::new("/forms/about-kvk/employee/:id", "Staff Record", FormManagement)
            .subcategory_at("About KVK", "/forms/about-kvk")
            .parent("/forms/about-kvk/employee"),
        R::new("/forms/achievements/oft", "On Farm Trials", FormManagement)
            .subcategory("Achievements")
            .parent("/forms/achievements")
            .siblings(ACHIEVEMENTS),
        R::new("/forms/achievements/fld", "Frontline Demonstrations", FormManagement)
            .subcategory("Achievements")
            .parent("/forms/achievements")
            .siblings(ACHIEVEMENTS),
        R::new("/forms/achievements/training", "Training Programmes", FormManagement)
            .subcategory("Achievements")
            .parent("/forms/achievements")
            .siblings(ACHIEVEMENTS),
    ]
});

/// Returns the built-in route table in declaration order.
pub fn kvk_routes() -> &'static [R] {
    &KVK_ROUTES
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_concrete_paths_are_unique() {
        let mut seen = HashSet::new();
        for route in kvk_routes().iter().filter(|r| !r.is_pattern()) {
            assert!(seen.insert(&route.path), "duplicate {}", route.path);
        }
    }

    #[test]
    fn test_sibling_groups_include_self() {
        for route in kvk_routes().iter().filter(|r| !r.siblings.is_empty()) {
            assert!(route.siblings.contains(&route.path), "{} missing from its tabs", route.path);
        }
    }

    #[test]
    fn test_sibling_paths_are_declared() {
        let paths: HashSet<&str> = kvk_routes().iter().map(|r| r.path.as_str()).collect();
        for route in kvk_routes() {
            for sibling in &route.siblings {
                assert!(paths.contains(sibling.as_str()), "unknown sibling {}", sibling);
            }
        }
    }
}
