//! The compiled-in catalog is consistent.

use gift_core::content::{self, Catalog, CatalogError};
use gift_core::sky;
use gift_core::{GiftSession, MemoryId, StarKind, WorldConfig};
use std::collections::HashSet;

#[test]
fn test_catalog_ids_unique_and_links_resolve() {
    let catalog = Catalog::default();
    assert_eq!(catalog.validate(), Ok(()));

    let memory_ids: HashSet<_> = catalog.memories.iter().map(|m| &m.id).collect();
    assert_eq!(memory_ids.len(), catalog.memories.len());

    let star_ids: HashSet<_> = catalog.stars.iter().map(|s| &s.id).collect();
    assert_eq!(star_ids.len(), catalog.stars.len());
    for star in &catalog.stars {
        assert!(star.connected_to.iter().all(|t| star_ids.contains(t)));
    }
}

#[test]
fn test_every_unlocked_star_points_at_a_memory() {
    for star in content::stars() {
        if star.kind == StarKind::Unlocked {
            assert!(star.memory.is_some(), "{} has no memory", star.id);
        }
    }
}

#[test]
fn test_sky_links_project_above_horizon() {
    let stars = content::stars();
    for (from, to) in sky::connections(&stars) {
        for id in [from, to] {
            let star = stars.iter().find(|s| s.id == id).unwrap();
            assert!(sky::project(star).y > 0.0, "{id} below the horizon");
        }
    }
}

#[test]
fn test_invalid_catalog_rejected_by_session() {
    let mut catalog = Catalog::default();
    catalog.stars[1].memory = Some(MemoryId::from("lost"));
    let result = GiftSession::with_catalog(WorldConfig::new().with_seed(1), catalog);
    assert!(matches!(result, Err(CatalogError::UnknownMemory { .. })));
}
