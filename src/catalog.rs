//! Location catalog — the compiled-in list of hunt locations.
//!
//! The catalog is seeded once and never changes at runtime. Everything else
//! (visit records, stats, markers) refers to locations by their `id` slug.

use std::collections::HashSet;

use crate::error::CatalogError;

/// Category value that disables category filtering.
pub const ALL_CATEGORIES: &str = "All";

/// A single point of interest on the hunt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub story: &'static str,
    /// Extra lore shown in the detail view.
    pub secret: &'static str,
    pub points: u32,
    pub difficulty: &'static str,
    pub hint: &'static str,
    pub icon: &'static str,
    pub lat: f64,
    pub lng: f64,
}

/// Validated, immutable view over a location list.
#[derive(Debug, Clone, Copy)]
pub struct Catalog {
    locations: &'static [Location],
}

impl Catalog {
    /// Wrap a location list, rejecting empty lists and duplicate ids.
    pub fn new(locations: &'static [Location]) -> Result<Self, CatalogError> {
        if locations.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(locations.len());
        for loc in locations {
            if !seen.insert(loc.id) {
                return Err(CatalogError::DuplicateId(loc.id.to_string()));
            }
        }
        Ok(Self { locations })
    }

    /// The built-in Princeton campus catalog.
    pub fn princeton() -> Self {
        // PRINCETON is non-empty with unique ids (see tests).
        Self {
            locations: PRINCETON,
        }
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'static Location> {
        self.locations.iter()
    }

    pub fn find(&self, id: &str) -> Option<&'static Location> {
        self.locations.iter().find(|loc| loc.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.find(id).is_some()
    }

    /// Sum of every location's reward points.
    pub fn max_points(&self) -> u32 {
        self.locations.iter().map(|loc| loc.points).sum()
    }

    /// `"All"` followed by each distinct category in catalog order.
    pub fn categories(&self) -> Vec<&'static str> {
        let mut out = vec![ALL_CATEGORIES];
        for loc in self.locations {
            if !out.contains(&loc.category) {
                out.push(loc.category);
            }
        }
        out
    }

    /// Locations in the given category (case-insensitive), catalog order kept.
    /// `"All"` or an empty string returns every location.
    pub fn filter_by_category(&self, category: &str) -> Vec<&'static Location> {
        let category = category.trim();
        if category.is_empty() || category.eq_ignore_ascii_case(ALL_CATEGORIES) {
            return self.locations.iter().collect();
        }
        self.locations
            .iter()
            .filter(|loc| loc.category.eq_ignore_ascii_case(category))
            .collect()
    }
}

/// Princeton campus locations, in display order.
pub static PRINCETON: &[Location] = &[
    Location {
        id: "fitzrandolph",
        name: "FitzRandolph Gate",
        category: "Tradition",
        story: "The ceremonial entrance to campus, finished in 1905. Students avoid walking out through it before graduation.",
        secret: "Superstition says leaving through the gate early means never earning your degree.",
        points: 150,
        difficulty: "Easy",
        hint: "The main entrance on Nassau Street",
        icon: "🚪",
        lat: 40.3486,
        lng: -74.6593,
    },
    Location {
        id: "blair",
        name: "Blair Arch",
        category: "Architectural",
        story: "A Gothic arch joining Blair Hall to the rest of campus, famous for its echo and late-night a cappella sets.",
        secret: "Stand in the center and clap once to hear the arch answer back.",
        points: 125,
        difficulty: "Easy",
        hint: "Between Blair Hall and the train station",
        icon: "🏛️",
        lat: 40.3480,
        lng: -74.6612,
    },
    Location {
        id: "prospect",
        name: "Prospect Garden",
        category: "Hidden Gem",
        story: "Formal flower gardens behind Prospect House, tended since the middle of the nineteenth century.",
        secret: "A small sundial is tucked between the rose beds.",
        points: 100,
        difficulty: "Easy",
        hint: "Behind the President's house",
        icon: "🌸",
        lat: 40.3463,
        lng: -74.6545,
    },
    Location {
        id: "cannon",
        name: "Cannon Green",
        category: "Historic",
        story: "A Revolutionary War cannon buried muzzle-down behind Nassau Hall after years of rivalry with Rutgers.",
        secret: "The cannon changed hands between the two schools so often that its origin is still argued over.",
        points: 175,
        difficulty: "Medium",
        hint: "The green space behind Nassau Hall",
        icon: "💣",
        lat: 40.3484,
        lng: -74.6580,
    },
    Location {
        id: "eastpyne",
        name: "East Pyne Gargoyles",
        category: "Architectural",
        story: "Carved grotesques that have looked down from East Pyne Hall since 1897.",
        secret: "Students swear one of them follows you with its eyes after dark.",
        points: 200,
        difficulty: "Medium",
        hint: "Look up at East Pyne Hall",
        icon: "👹",
        lat: 40.3488,
        lng: -74.6569,
    },
    Location {
        id: "holder",
        name: "Holder Tower",
        category: "Hidden Gem",
        story: "The bell tower over Holder Hall, ringing the Westminster Quarters across the south side of campus.",
        secret: "A time capsule from 1911 is rumored to be sealed somewhere beneath the tower.",
        points: 250,
        difficulty: "Hard",
        hint: "The tower with the bells near Rockefeller",
        icon: "🏰",
        lat: 40.3475,
        lng: -74.6590,
    },
    Location {
        id: "dinky",
        name: "Dinky Station",
        category: "Historic",
        story: "Terminus of the Dinky, one of the shortest scheduled passenger rail lines in the country, running since 1865.",
        secret: "Einstein was a regular on the morning train.",
        points: 125,
        difficulty: "Easy",
        hint: "The small train station on campus",
        icon: "🚂",
        lat: 40.3435,
        lng: -74.6595,
    },
    Location {
        id: "firestone",
        name: "Firestone Library",
        category: "Adventure",
        story: "The main library, whose lower levels run far beneath the lawn outside.",
        secret: "Some of the deepest stacks are reachable only with a librarian escort.",
        points: 225,
        difficulty: "Hard",
        hint: "The main library with underground levels",
        icon: "📚",
        lat: 40.3493,
        lng: -74.6575,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    static TWINS: [Location; 2] = [
        Location {
            id: "a",
            name: "A",
            category: "X",
            story: "",
            secret: "",
            points: 1,
            difficulty: "Easy",
            hint: "",
            icon: "",
            lat: 0.0,
            lng: 0.0,
        },
        Location {
            id: "a",
            name: "A again",
            category: "X",
            story: "",
            secret: "",
            points: 2,
            difficulty: "Easy",
            hint: "",
            icon: "",
            lat: 0.0,
            lng: 0.0,
        },
    ];

    #[test]
    fn princeton_catalog_is_valid() {
        let catalog = Catalog::new(PRINCETON).unwrap();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.max_points(), 1350);
    }

    #[test]
    fn rejects_empty_catalog() {
        assert_eq!(Catalog::new(&[]).unwrap_err(), CatalogError::Empty);
    }

    #[test]
    fn rejects_duplicate_ids() {
        assert_eq!(
            Catalog::new(&TWINS).unwrap_err(),
            CatalogError::DuplicateId("a".to_string())
        );
    }

    #[test]
    fn categories_start_with_all_and_are_distinct() {
        let cats = Catalog::princeton().categories();
        assert_eq!(cats[0], "All");
        assert_eq!(
            cats,
            vec!["All", "Tradition", "Architectural", "Hidden Gem", "Historic", "Adventure"]
        );
    }

    #[test]
    fn filter_by_category_keeps_order() {
        let catalog = Catalog::princeton();
        let ids: Vec<_> = catalog
            .filter_by_category("hidden gem")
            .iter()
            .map(|l| l.id)
            .collect();
        assert_eq!(ids, vec!["prospect", "holder"]);
    }

    #[test]
    fn filter_all_or_blank_returns_everything() {
        let catalog = Catalog::princeton();
        assert_eq!(catalog.filter_by_category("All").len(), 8);
        assert_eq!(catalog.filter_by_category("  ").len(), 8);
        assert!(catalog.filter_by_category("Nature").is_empty());
    }

    #[test]
    fn find_by_id() {
        let catalog = Catalog::princeton();
        assert_eq!(catalog.find("dinky").map(|l| l.points), Some(125));
        assert!(!catalog.contains("nassau"));
    }
}
