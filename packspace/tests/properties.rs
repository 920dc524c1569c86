//! Checks that hold for every tree, over long pseudo-random insert sequences.

use packspace::{Leaf, PackingTree, Placement, Rect};

/// Small deterministic generator so runs are reproducible without extra
/// dependencies.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        (self.0 >> 33) as u32
    }

    fn size(&mut self, max: u32) -> (u32, u32) {
        (1 + self.next() % max, 1 + self.next() % max)
    }
}

fn assert_tiles_region(tree: &PackingTree) {
    let bounds = tree.bounds();
    let leaves: Vec<Leaf> = tree.leaves().collect();

    for (i, leaf) in leaves.iter().enumerate() {
        assert!(
            bounds.contains(&leaf.rect()),
            "leaf {:?} escapes {:?}",
            leaf,
            bounds
        );

        for other in &leaves[i + 1..] {
            assert!(
                !leaf.rect().intersects(&other.rect()),
                "{:?} overlaps {:?}",
                leaf,
                other
            );
        }
    }

    let covered: u64 = leaves.iter().map(|leaf| leaf.rect().area()).sum();
    assert_eq!(covered, bounds.area(), "leaves leave gaps in the region");
}

fn run(seed: u64, region: (u32, u32), max_side: u32, attempts: usize) -> Vec<Option<Rect>> {
    let mut rng = Lcg(seed);
    let mut tree = PackingTree::new(region).unwrap();

    (0..attempts)
        .map(|_| tree.insert(rng.size(max_side)).ok().map(|p| p.rect()))
        .collect()
}

#[test]
fn leaves_always_tile_the_region() {
    let mut rng = Lcg(7);
    let mut tree = PackingTree::new((64, 48)).unwrap();

    for _ in 0..300 {
        let _ = tree.insert(rng.size(16));
        assert_tiles_region(&tree);
    }
}

#[test]
fn placements_are_permanent() {
    let mut rng = Lcg(42);
    let mut tree = PackingTree::new((50, 50)).unwrap();
    let mut placed: Vec<Placement> = Vec::new();

    for _ in 0..250 {
        if let Ok(placement) = tree.insert(rng.size(12)) {
            assert_eq!(placement.size(), tree.get(placement.id()).unwrap().size());
            placed.push(placement);
        }

        for placement in &placed {
            assert_eq!(tree.get(placement.id()), Some(placement.rect()));
        }
    }

    assert_eq!(tree.len(), placed.len());
    assert_eq!(tree.placements().count(), placed.len());

    for (i, a) in placed.iter().enumerate() {
        for b in &placed[i + 1..] {
            assert!(!a.rect().intersects(&b.rect()));
        }
    }
}

#[test]
fn identical_sequences_give_identical_layouts() {
    let first = run(1234, (128, 96), 24, 400);
    let second = run(1234, (128, 96), 24, 400);

    assert_eq!(first, second);
    assert!(first.iter().any(Option::is_some));
    assert!(first.iter().any(Option::is_none));
}

#[test]
fn failed_inserts_change_nothing() {
    let mut rng = Lcg(99);
    let mut tree = PackingTree::new((40, 40)).unwrap();
    let mut failures = 0;

    for _ in 0..300 {
        let leaves_before: Vec<Leaf> = tree.leaves().collect();
        let placements_before: Vec<Placement> = tree.placements().collect();
        let nodes_before = tree.node_count();

        if tree.insert(rng.size(20)).is_err() {
            failures += 1;

            assert_eq!(tree.leaves().collect::<Vec<_>>(), leaves_before);
            assert_eq!(tree.placements().collect::<Vec<_>>(), placements_before);
            assert_eq!(tree.node_count(), nodes_before);
        }
    }

    assert!(failures > 0, "region never filled up");
}

#[test]
fn inserts_agree_with_can_fit() {
    let mut rng = Lcg(5);
    let mut tree = PackingTree::new((30, 30)).unwrap();

    for _ in 0..200 {
        let size = rng.size(10);
        let predicted = tree.can_fit(size);

        assert_eq!(tree.insert(size).is_ok(), predicted);
    }
}

#[test]
fn large_regions_do_not_overflow() {
    let mut tree = PackingTree::new((u32::MAX, u32::MAX)).unwrap();

    let a = tree.insert((u32::MAX, 1)).unwrap();
    let b = tree.insert((1, u32::MAX - 1)).unwrap();

    assert_eq!(a.position(), (0, 0));
    assert_eq!(b.position(), (0, 1));
    assert_eq!(b.max(), (1, u32::MAX));
    assert_tiles_region(&tree);
}
