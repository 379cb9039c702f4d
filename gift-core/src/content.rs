//! Compiled-in content: memories, constellation stars and secret codes.
//!
//! The catalog is loaded once per session and never mutated, except for the
//! secret star whose kind the store flips on unlock.

use crate::secret::{Reward, SecretCode};
use crate::world::{
    CanvasPosition, GroundPosition, Memory, MemoryId, MemoryKind, Star, StarId, StarKind,
};
use chrono::NaiveDate;
use std::collections::HashSet;
use thiserror::Error;

/// Id of the star revealed by the `love` code.
pub const SECRET_STAR_ID: &str = "star-secret";

/// Upper bound on catalog sizes.
pub const MAX_MEMORIES: usize = 10;
pub const MAX_STARS: usize = 10;

/// Errors found while validating a catalog.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Duplicate memory id: {0}")]
    DuplicateMemory(MemoryId),
    #[error("Duplicate star id: {0}")]
    DuplicateStar(StarId),
    #[error("Duplicate secret code: {0}")]
    DuplicateCode(String),
    #[error("Star {star} links to unknown star {target}")]
    DanglingLink { star: StarId, target: StarId },
    #[error("Star {star} refers to unknown memory {memory}")]
    UnknownMemory { star: StarId, memory: MemoryId },
    #[error("Catalog holds {count} {what}, at most {max} are supported")]
    TooMany {
        what: &'static str,
        count: usize,
        max: usize,
    },
}

/// The full static catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub memories: Vec<Memory>,
    pub stars: Vec<Star>,
    pub secret_codes: Vec<SecretCode>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            memories: memories(),
            stars: stars(),
            secret_codes: secret_codes(),
        }
    }
}

impl Catalog {
    /// Check identifier uniqueness and that every reference resolves.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.memories.len() > MAX_MEMORIES {
            return Err(CatalogError::TooMany {
                what: "memories",
                count: self.memories.len(),
                max: MAX_MEMORIES,
            });
        }
        if self.stars.len() > MAX_STARS {
            return Err(CatalogError::TooMany {
                what: "stars",
                count: self.stars.len(),
                max: MAX_STARS,
            });
        }

        let mut memory_ids = HashSet::new();
        for memory in &self.memories {
            if !memory_ids.insert(&memory.id) {
                return Err(CatalogError::DuplicateMemory(memory.id.clone()));
            }
        }

        let mut star_ids = HashSet::new();
        for star in &self.stars {
            if !star_ids.insert(&star.id) {
                return Err(CatalogError::DuplicateStar(star.id.clone()));
            }
        }

        for star in &self.stars {
            for target in &star.connected_to {
                if !star_ids.contains(target) {
                    return Err(CatalogError::DanglingLink {
                        star: star.id.clone(),
                        target: target.clone(),
                    });
                }
            }
            if let Some(memory) = &star.memory {
                if !memory_ids.contains(memory) {
                    return Err(CatalogError::UnknownMemory {
                        star: star.id.clone(),
                        memory: memory.clone(),
                    });
                }
            }
        }

        let mut codes = HashSet::new();
        for secret in &self.secret_codes {
            if !codes.insert(secret.code.as_str()) {
                return Err(CatalogError::DuplicateCode(secret.code.clone()));
            }
        }

        Ok(())
    }
}

/// Default start of the shared timeline.
pub fn start_date() -> NaiveDate {
    ymd(2023, 6, 15)
}

fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn memory(
    id: &str,
    title: &str,
    description: &str,
    date: Option<NaiveDate>,
    kind: MemoryKind,
    icon: &str,
    (x, z): (f32, f32),
) -> Memory {
    Memory {
        id: MemoryId::from(id),
        title: title.to_string(),
        description: description.to_string(),
        date,
        kind,
        icon: icon.to_string(),
        position: GroundPosition { x, z },
        unlocked: true,
    }
}

/// The timeline memories, one building each.
pub fn memories() -> Vec<Memory> {
    vec![
        memory(
            "meeting",
            "Where We Met",
            "A game lobby, a voice that was not what I expected, and a match \
             that turned into the most important one I ever played.",
            Some(ymd(2024, 8, 2)),
            MemoryKind::Meeting,
            "🏡",
            (-3.0, -2.0),
        ),
        memory(
            "first-date",
            "Our First Date",
            "Not happened yet, but it is the first promise on this year's list. \
             When it does, it gets a coffee and a very long conversation.",
            None,
            MemoryKind::Date,
            "☕",
            (3.0, -1.0),
        ),
        memory(
            "hangout",
            "Our Special Day",
            "The day we finally said what we both felt. The day trust started \
             and a promise was made that will not be broken.",
            Some(ymd(2024, 12, 22)),
            MemoryKind::Hangout,
            "🌳",
            (-2.0, 3.0),
        ),
        memory(
            "chats",
            "Late Night Talks",
            "Countless messages, voice notes and video calls. Every word \
             brought us closer, bridging the distance between us.",
            Some(ymd(2023, 8, 1)),
            MemoryKind::Chat,
            "💬",
            (2.0, 2.0),
        ),
        memory(
            "milestone",
            "One Year Together",
            "A whole year of ups and downs, and still side by side. The second \
             year starts with every promise still standing.",
            Some(ymd(2025, 12, 22)),
            MemoryKind::Milestone,
            "💕",
            (0.0, -3.0),
        ),
    ]
}

fn star(id: &str, (x, y): (f32, f32), size: f32, kind: StarKind) -> Star {
    Star {
        id: StarId::from(id),
        position: CanvasPosition { x, y },
        size,
        kind,
        memory: None,
        connected_to: Vec::new(),
        label: None,
        date: None,
    }
}

/// The constellation. Unlocked stars trace the memories in order.
pub fn stars() -> Vec<Star> {
    let linked = |id: &str, pos, size, memory: &str, next: &str, label: &str| Star {
        memory: Some(MemoryId::from(memory)),
        connected_to: vec![StarId::from(next)],
        label: Some(label.to_string()),
        ..star(id, pos, size, StarKind::Unlocked)
    };

    vec![
        linked("star-1", (100.0, 80.0), 4.0, "meeting", "star-2", "First Meeting"),
        linked("star-2", (200.0, 120.0), 5.0, "first-date", "star-3", "First Date"),
        linked("star-3", (320.0, 90.0), 4.0, "hangout", "star-4", "Special Day"),
        linked("star-4", (440.0, 140.0), 5.0, "chats", "star-5", "Late Nights"),
        linked("star-5", (560.0, 100.0), 6.0, "milestone", "star-6", "One Year"),
        Star {
            connected_to: vec![StarId::from("star-7")],
            label: Some("Next Adventure".to_string()),
            date: Some(ymd(2027, 6, 15)),
            ..star("star-6", (680.0, 80.0), 4.0, StarKind::Future)
        },
        Star {
            label: Some("Future Mystery".to_string()),
            ..star("star-7", (780.0, 120.0), 3.0, StarKind::Locked)
        },
        Star {
            label: Some("Secret Star".to_string()),
            ..star(SECRET_STAR_ID, (400.0, 40.0), 8.0, StarKind::Secret)
        },
    ]
}

/// Registered secret codes, in match priority order.
pub fn secret_codes() -> Vec<SecretCode> {
    vec![
        SecretCode::new("forever", Reward::Fireworks),
        SecretCode::new("love", Reward::Star),
        SecretCode::new("us", Reward::Letter),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_is_valid() {
        assert_eq!(Catalog::default().validate(), Ok(()));
    }

    #[test]
    fn test_exactly_one_secret_star() {
        let secrets: Vec<_> = stars()
            .into_iter()
            .filter(|s| s.kind == StarKind::Secret)
            .collect();
        assert_eq!(secrets.len(), 1);
        assert_eq!(secrets[0].id.as_str(), SECRET_STAR_ID);
    }

    #[test]
    fn test_duplicate_memory_rejected() {
        let mut catalog = Catalog::default();
        let copy = catalog.memories[0].clone();
        catalog.memories.push(copy);
        assert_eq!(
            catalog.validate(),
            Err(CatalogError::DuplicateMemory(MemoryId::from("meeting")))
        );
    }

    #[test]
    fn test_dangling_link_rejected() {
        let mut catalog = Catalog::default();
        catalog.stars[6].connected_to.push(StarId::from("star-99"));
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::DanglingLink { .. })
        ));
    }

    #[test]
    fn test_unknown_memory_rejected() {
        let mut catalog = Catalog::default();
        catalog.stars[0].memory = Some(MemoryId::from("nowhere"));
        assert!(matches!(
            catalog.validate(),
            Err(CatalogError::UnknownMemory { .. })
        ));
    }

    #[test]
    fn test_secret_codes_start_locked() {
        assert!(secret_codes().iter().all(|c| !c.unlocked));
    }
}
