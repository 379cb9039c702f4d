//! Procedural generation of the living tree.
//!
//! The tree is a fixed trunk plus three recursively subdivided limbs. Each
//! branch spawns children at random angles with shrinking length until either
//! the depth limit or the minimum length is reached. Tips carry leaves (more
//! of them the longer the timeline) and sometimes a flower.
//!
//! Generation uses an explicit work stack, so branch count is bounded by the
//! parameters and not by the call stack.

use crate::world::Point3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

/// Shape parameters for the generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeParams {
    pub trunk_height: f32,
    pub trunk_segments: u32,
    /// Branches shorter than this are not emitted.
    pub min_length: f32,
    /// Deepest branch level emitted (limbs start at level 1).
    pub max_depth: u32,
    /// Each child is this fraction of its parent's length.
    pub length_decay: f32,
    /// Children deviate from the parent angle by up to half this spread.
    pub angle_spread: f32,
    /// Maximum leaves on a single tip.
    pub max_leaves_per_tip: u32,
    /// One extra leaf per tip for every this many days.
    pub days_per_leaf: u32,
    pub flower_chance: f64,
    pub firefly_count: usize,
}

impl Default for TreeParams {
    fn default() -> Self {
        Self {
            trunk_height: 2.5,
            trunk_segments: 5,
            min_length: 0.3,
            max_depth: 3,
            length_decay: 0.7,
            angle_spread: 1.5,
            max_leaves_per_tip: 3,
            days_per_leaf: 100,
            flower_chance: 0.3,
            firefly_count: 10,
        }
    }
}

impl TreeParams {
    /// Leaves attached to each tip for a timeline of `days`.
    pub fn leaves_per_tip(&self, days: u32) -> u32 {
        let per = self.days_per_leaf.max(1);
        (days / per + 1).min(self.max_leaves_per_tip)
    }
}

/// A straight segment of trunk or branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: String,
    pub start: Point3,
    pub end: Point3,
    /// Growth direction in the XY plane, radians from +X.
    pub angle: f32,
    /// 0 for the trunk, 1 for limbs, increasing outward.
    pub level: u32,
    pub milestone: Option<String>,
}

impl Branch {
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    pub fn midpoint(&self) -> Point3 {
        Point3::new(
            (self.start.x + self.end.x) / 2.0,
            (self.start.y + self.end.y) / 2.0,
            (self.start.z + self.end.z) / 2.0,
        )
    }

    /// Rendered radius; thinner further from the trunk.
    pub fn radius(&self) -> f32 {
        (0.09 - self.level as f32 * 0.02).max(0.015)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaf {
    pub id: String,
    pub position: Point3,
    pub day_number: u32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flower {
    pub position: Point3,
    pub label: String,
}

/// A firefly hovering around the crown at night.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Firefly {
    pub home: Point3,
    /// Phase offset of its drift, radians.
    pub phase: f32,
}

/// A generated tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub branches: Vec<Branch>,
    pub leaves: Vec<Leaf>,
    pub flowers: Vec<Flower>,
    pub fireflies: Vec<Firefly>,
}

impl Tree {
    /// Whether every generated coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.branches
            .iter()
            .all(|b| b.start.is_finite() && b.end.is_finite() && b.angle.is_finite())
            && self.leaves.iter().all(|l| l.position.is_finite())
            && self.flowers.iter().all(|f| f.position.is_finite())
            && self.fireflies.iter().all(|f| f.home.is_finite())
    }

    pub fn milestones(&self) -> impl Iterator<Item = &Branch> {
        self.branches.iter().filter(|b| b.milestone.is_some())
    }

    pub fn branch(&self, id: &str) -> Option<&Branch> {
        self.branches.iter().find(|b| b.id == id)
    }
}

/// Pending branch on the work stack.
struct Sprout {
    start: Point3,
    angle: f32,
    length: f32,
    level: u32,
}

/// Generates trees from a random source.
pub struct TreeGenerator<R: Rng> {
    rng: R,
    params: TreeParams,
}

impl TreeGenerator<StdRng> {
    /// Reproducible generator.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    /// Fresh generator, different on every run.
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> TreeGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            params: TreeParams::default(),
        }
    }

    pub fn with_params(mut self, params: TreeParams) -> Self {
        self.params = params;
        self
    }

    pub fn params(&self) -> &TreeParams {
        &self.params
    }

    /// Upper bound on branches emitted, trunk included.
    pub fn max_branches(&self) -> usize {
        // Limbs double until level 2, then continue singly.
        let mut per_limb = 0usize;
        let mut width = 1usize;
        for level in 1..=self.params.max_depth {
            per_limb += width;
            if level < 2 {
                width *= 2;
            }
        }
        self.params.trunk_segments as usize + 3 * per_limb
    }

    /// Grow a tree for a timeline of `days`.
    pub fn generate(&mut self, days: u32) -> Tree {
        let mut tree = Tree::default();
        let height = self.params.trunk_height;
        let segments = self.params.trunk_segments.max(1);

        for i in 0..segments {
            let y0 = i as f32 / segments as f32 * height;
            let y1 = (i + 1) as f32 / segments as f32 * height;
            tree.branches.push(Branch {
                id: format!("trunk-{i}"),
                start: Point3::new(0.0, y0, 0.0),
                end: Point3::new(0.0, y1, 0.0),
                angle: FRAC_PI_2,
                level: 0,
                milestone: None,
            });
        }

        let mut stack = vec![
            Sprout {
                start: Point3::new(0.0, height * 0.7, 0.0),
                angle: FRAC_PI_2 - 0.5,
                length: 0.8,
                level: 1,
            },
            Sprout {
                start: Point3::new(0.0, height * 0.7, 0.0),
                angle: FRAC_PI_2 + 0.5,
                length: 0.8,
                level: 1,
            },
            Sprout {
                start: Point3::new(0.0, height, 0.0),
                angle: FRAC_PI_2,
                length: 1.2,
                level: 1,
            },
        ];

        while let Some(sprout) = stack.pop() {
            if sprout.level > self.params.max_depth || sprout.length < self.params.min_length {
                continue;
            }
            let end = self.grow(&mut tree, &sprout, days);

            let children = if sprout.level < 2 { 2 } else { 1 };
            let mut next = Vec::with_capacity(children);
            for _ in 0..children {
                let deviation = (self.rng.gen::<f32>() - 0.5) * self.params.angle_spread;
                next.push(Sprout {
                    start: end,
                    angle: sprout.angle + deviation,
                    length: sprout.length * self.params.length_decay,
                    level: sprout.level + 1,
                });
            }
            // Reverse so the first child is grown first.
            stack.extend(next.into_iter().rev());
        }

        for _ in 0..self.params.firefly_count {
            let home = Point3::new(
                (self.rng.gen::<f32>() - 0.5) * 4.0,
                1.0 + self.rng.gen::<f32>() * 3.0,
                (self.rng.gen::<f32>() - 0.5) * 4.0,
            );
            let phase = self.rng.gen::<f32>() * std::f32::consts::TAU;
            tree.fireflies.push(Firefly { home, phase });
        }

        tracing::debug!(
            days,
            branches = tree.branches.len(),
            leaves = tree.leaves.len(),
            flowers = tree.flowers.len(),
            "tree generated"
        );
        tree
    }

    /// Emit one branch with its tip decorations; returns the branch end.
    fn grow(&mut self, tree: &mut Tree, sprout: &Sprout, days: u32) -> Point3 {
        let end = Point3::new(
            sprout.start.x + sprout.angle.cos() * sprout.length,
            sprout.start.y + sprout.angle.sin() * sprout.length,
            sprout.start.z + (self.rng.gen::<f32>() - 0.5) * 0.3,
        );

        let index = tree.branches.len();
        let id = format!("branch-{}-{index}", sprout.level);
        let milestone = (sprout.level == 2 && index % 3 == 0)
            .then(|| format!("Milestone {}", index / 3 + 1));

        if sprout.level >= 2 {
            for i in 0..self.params.leaves_per_tip(days) {
                let position = end.offset(
                    (self.rng.gen::<f32>() - 0.5) * 0.3,
                    (self.rng.gen::<f32>() - 0.5) * 0.3,
                    (self.rng.gen::<f32>() - 0.5) * 0.3,
                );
                let day_number = self.rng.gen_range(1..=days.max(1));
                tree.leaves.push(Leaf {
                    id: format!("leaf-{id}-{i}"),
                    position,
                    day_number,
                    message: format!("Day {day_number}: A moment of love"),
                });
            }

            if self.rng.gen_bool(self.params.flower_chance.clamp(0.0, 1.0)) {
                tree.flowers.push(Flower {
                    position: end.offset(0.0, 0.1, 0.0),
                    label: format!("Memory {}", tree.flowers.len() + 1),
                });
            }
        }

        tree.branches.push(Branch {
            id,
            start: sprout.start,
            end,
            angle: sprout.angle,
            level: sprout.level,
            milestone,
        });
        end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tree_shape() {
        let mut generator = TreeGenerator::from_seed(7);
        let tree = generator.generate(400);
        assert_eq!(tree.branches.len(), generator.max_branches());
        assert_eq!(tree.branches.len(), 20);
        assert_eq!(tree.branches.iter().filter(|b| b.level == 0).count(), 5);
        assert_eq!(tree.fireflies.len(), 10);
    }

    #[test]
    fn test_same_seed_same_tree() {
        let a = TreeGenerator::from_seed(42).generate(365);
        let b = TreeGenerator::from_seed(42).generate(365);
        assert_eq!(a, b);
    }

    #[test]
    fn test_leaf_count_scales_with_days() {
        let params = TreeParams::default();
        assert_eq!(params.leaves_per_tip(0), 1);
        assert_eq!(params.leaves_per_tip(99), 1);
        assert_eq!(params.leaves_per_tip(100), 2);
        assert_eq!(params.leaves_per_tip(250), 3);
        assert_eq!(params.leaves_per_tip(10_000), 3);

        let tree = TreeGenerator::from_seed(1).generate(150);
        let tips = tree.branches.iter().filter(|b| b.level >= 2).count();
        assert_eq!(tree.leaves.len(), tips * 2);
    }

    #[test]
    fn test_leaf_day_numbers_in_range() {
        let tree = TreeGenerator::from_seed(3).generate(30);
        assert!(tree
            .leaves
            .iter()
            .all(|l| (1..=30).contains(&l.day_number)));

        let tree = TreeGenerator::from_seed(3).generate(0);
        assert!(tree.leaves.iter().all(|l| l.day_number == 1));
    }

    #[test]
    fn test_milestones_on_second_level() {
        let tree = TreeGenerator::from_seed(9).generate(100);
        assert!(tree.milestones().count() > 0);
        assert!(tree.milestones().all(|b| b.level == 2));
    }

    #[test]
    fn test_min_length_cuts_recursion() {
        let params = TreeParams {
            min_length: 1.0,
            ..TreeParams::default()
        };
        let tree = TreeGenerator::from_seed(5)
            .with_params(params)
            .generate(10);
        // Only the 1.2 top limb is long enough.
        assert_eq!(tree.branches.iter().filter(|b| b.level > 0).count(), 1);
    }

    #[test]
    fn test_trunk_is_continuous() {
        let tree = TreeGenerator::from_seed(11).generate(10);
        let trunk: Vec<_> = tree.branches.iter().filter(|b| b.level == 0).collect();
        for pair in trunk.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(trunk.last().unwrap().end.y, 2.5);
    }
}
