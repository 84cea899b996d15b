use rand::rngs::StdRng;
use rand::SeedableRng;
use voxedit::{
    AccessorError, BlockAccessor, BlockMask, BlockPosition, BlockState, CuboidRegion, EditError,
    EditReport, EditSession, EditStatus, MemoryWorld, PatternEnum, PointSetRegion, Region,
    SingleBlockPattern,
};

fn block(name: &str) -> BlockState {
    BlockState::new(format!("minecraft:{}", name))
}

#[test]
fn test_set_blocks_fills_every_position() {
    let mut session = EditSession::new(MemoryWorld::new(0, 255));
    let region = CuboidRegion::new((0, 0, 0), (2, 2, 2));
    let pattern = SingleBlockPattern::new(block("stone"));
    let mut rng = StdRng::seed_from_u64(0);

    let report = session.set_blocks(&region, &pattern, &mut rng);

    assert_eq!(report, EditReport::completed(27));
    for pos in region.iter() {
        assert_eq!(session.world().block_at(pos), &block("stone"));
    }
}

#[test]
fn test_set_blocks_counts_unchanged_writes() {
    let mut world = MemoryWorld::new(0, 255);
    world.put((0, 0, 0), &block("stone"));
    let mut session = EditSession::new(world);
    let region = CuboidRegion::new((0, 0, 0), (1, 0, 0));

    let report = session.set_blocks_to(&region, &block("stone"));
    assert_eq!(report.affected, 2);
}

#[test]
fn test_weighted_set_is_reproducible() {
    let region = CuboidRegion::new((0, 0, 0), (7, 3, 7));
    let pattern: PatternEnum = "50%stone,50%dirt".parse().unwrap();

    let run = |seed: u64| {
        let mut session = EditSession::new(MemoryWorld::new(0, 255));
        let mut rng = StdRng::seed_from_u64(seed);
        let report = session.set_blocks(&region, &pattern, &mut rng);
        assert_eq!(report.affected, region.volume());
        region
            .iter()
            .map(|p| session.world().block_at(p).clone())
            .collect::<Vec<_>>()
    };

    let first = run(99);
    assert_eq!(first, run(99));
    assert!(first.contains(&block("stone")));
    assert!(first.contains(&block("dirt")));
}

#[test]
fn test_replace_only_matching_blocks() {
    let mut world = MemoryWorld::new(0, 255);
    let targets = [(0, 0, 0), (1, 1, 1), (2, 2, 2), (0, 2, 1), (2, 0, 1)];
    for &pos in &targets {
        world.put(pos, &block("dirt"));
    }
    let mut session = EditSession::new(world);
    let region = CuboidRegion::new((0, 0, 0), (2, 2, 2));
    let from: BlockMask = ["minecraft:dirt"].into_iter().collect();

    let report = session.replace_blocks_to(&region, Some(&from), &block("stone"));

    assert_eq!(report, EditReport::completed(5));
    for pos in region.iter() {
        let expected = if targets.contains(&pos.into()) {
            block("stone")
        } else {
            BlockState::air()
        };
        assert_eq!(session.world().block_at(pos), &expected);
    }
}

#[test]
fn test_replace_matches_by_name_ignoring_properties() {
    let mut world = MemoryWorld::new(0, 255);
    world.put((0, 0, 0), &block("oak_log").with_property("axis", "x"));
    world.put((1, 0, 0), &block("oak_log").with_property("axis", "y"));
    let mut session = EditSession::new(world);
    let from: BlockMask = ["minecraft:oak_log"].into_iter().collect();
    let pattern: PatternEnum = block("birch_log").into();
    let mut rng = StdRng::seed_from_u64(3);

    let report = session.replace_blocks(
        &CuboidRegion::new((0, 0, 0), (3, 0, 0)),
        Some(&from),
        &pattern,
        &mut rng,
    );
    assert_eq!(report.affected, 2);
    assert_eq!(session.world().count_blocks_named("minecraft:birch_log"), 2);
}

#[test]
fn test_replace_without_mask_is_set() {
    let mut session = EditSession::new(MemoryWorld::new(0, 255));
    let region = CuboidRegion::new((0, 0, 0), (1, 1, 1));
    let report = session.replace_blocks_to(&region, None, &block("glass"));
    assert_eq!(report.affected, 8);
    assert_eq!(session.world().count_blocks_named("minecraft:glass"), 8);
}

#[test]
fn test_replace_rerun_still_counts_matches() {
    let mut world = MemoryWorld::new(0, 255);
    world.put((0, 0, 0), &block("stone"));
    world.put((1, 0, 0), &block("dirt"));
    let mut session = EditSession::new(world);
    let region = CuboidRegion::new((0, 0, 0), (1, 0, 0));
    let from: BlockMask = ["minecraft:stone", "minecraft:cobblestone"]
        .into_iter()
        .collect();

    let first = session.replace_blocks_to(&region, Some(&from), &block("cobblestone"));
    let second = session.replace_blocks_to(&region, Some(&from), &block("cobblestone"));
    assert_eq!(first.affected, 1);
    assert_eq!(second.affected, 1);
    assert_eq!(session.world().block_at((1, 0, 0)), &block("dirt"));
}

#[test]
fn test_overlay_writes_one_block_above_surface() {
    let mut world = MemoryWorld::new(0, 255);
    for y in 0..=10 {
        world.put((5, y, 5), &block("stone"));
    }
    let mut session = EditSession::new(world);
    let region = CuboidRegion::new((5, 0, 5), (5, 20, 5));

    let report = session
        .overlay_cuboid_blocks(&region, &block("dirt"))
        .unwrap();

    assert_eq!(report, EditReport::completed(1));
    assert_eq!(session.world().block_at((5, 11, 5)), &block("dirt"));
    assert!(session.world().block_at((5, 12, 5)).is_air());
}

#[test]
fn test_overlay_skips_empty_columns_and_writes_once_per_column() {
    let mut world = MemoryWorld::new(0, 255);
    world.put((0, 3, 0), &block("stone"));
    world.put((0, 1, 0), &block("stone"));
    world.put((2, 6, 1), &block("sand"));
    let mut session = EditSession::new(world);
    let region = CuboidRegion::new((0, 0, 0), (2, 8, 1));

    let report = session
        .overlay_cuboid_blocks(&region, &block("snow"))
        .unwrap();

    assert_eq!(report.affected, 2);
    assert_eq!(session.world().block_at((0, 4, 0)), &block("snow"));
    assert_eq!(session.world().block_at((2, 7, 1)), &block("snow"));
    assert_eq!(session.world().count_blocks_named("minecraft:snow"), 2);
}

#[test]
fn test_overlay_ignores_blocks_above_region() {
    let mut world = MemoryWorld::new(0, 255);
    world.put((0, 2, 0), &block("stone"));
    world.put((0, 30, 0), &block("stone"));
    let mut session = EditSession::new(world);
    let region = CuboidRegion::new((0, 0, 0), (0, 10, 0));

    session
        .overlay_cuboid_blocks(&region, &block("dirt"))
        .unwrap();
    assert_eq!(session.world().block_at((0, 3, 0)), &block("dirt"));
    assert!(session.world().block_at((0, 31, 0)).is_air());
}

#[test]
fn test_overlay_treats_cave_air_as_empty() {
    let mut world = MemoryWorld::new(0, 255);
    world.put((0, 3, 0), &block("stone"));
    for y in 4..=8 {
        world.put((0, y, 0), &block("cave_air"));
    }
    world.put((1, 0, 0), &block("stone"));
    world.put((1, 1, 0), &block("void_air"));
    let mut session = EditSession::new(world);
    let region = CuboidRegion::new((0, 0, 0), (1, 8, 0));

    let report = session
        .overlay_cuboid_blocks(&region, &block("snow"))
        .unwrap();

    assert_eq!(report, EditReport::completed(2));
    assert_eq!(session.world().block_at((0, 4, 0)), &block("snow"));
    assert_eq!(session.world().block_at((1, 1, 0)), &block("snow"));
    assert!(session.world().block_at((0, 9, 0)).is_air());
}

#[test]
fn test_walls_leave_floor_ceiling_and_interior() {
    let mut session = EditSession::new(MemoryWorld::new(0, 255));
    let region = CuboidRegion::new((0, 0, 0), (4, 3, 5));

    let report = session.make_cuboid_walls(&region, &block("bricks")).unwrap();

    // Each layer is a ring of 2*5 + 2*6 - 4 = 18 blocks, 4 layers tall.
    assert_eq!(report.affected, 72);
    for pos in region.iter() {
        let placed = session.world().block_at(pos) == &block("bricks");
        assert_eq!(placed, region.is_on_walls(pos), "at {}", pos);
    }
}

#[test]
fn test_faces_build_complete_shell() {
    let mut session = EditSession::new(MemoryWorld::new(0, 255));
    let region = CuboidRegion::new((10, 10, 10), (12, 12, 12));

    let report = session.make_cuboid_faces(&region, &block("glass")).unwrap();

    assert_eq!(report.affected, 26);
    assert!(session.world().block_at((11, 11, 11)).is_air());
    for pos in region.iter() {
        let placed = session.world().block_at(pos) == &block("glass");
        assert_eq!(placed, region.is_on_shell(pos), "at {}", pos);
    }
}

#[test]
fn test_shell_operations_reject_empty_region() {
    let mut session = EditSession::new(MemoryWorld::new(0, 255));
    let empty = PointSetRegion::new();
    assert!(matches!(
        session.make_cuboid_walls(&empty, &block("stone")),
        Err(EditError::InvalidRegion(_))
    ));
    assert!(matches!(
        session.make_cuboid_faces(&empty, &block("stone")),
        Err(EditError::InvalidRegion(_))
    ));
    assert!(matches!(
        session.overlay_cuboid_blocks(&empty, &block("stone")),
        Err(EditError::InvalidRegion(_))
    ));
}

#[test]
fn test_set_on_point_set_region() {
    let mut session = EditSession::new(MemoryWorld::new(0, 255));
    let region: PointSetRegion = [(0, 0, 0), (5, 5, 5), (0, 0, 0)]
        .into_iter()
        .map(BlockPosition::from)
        .collect();
    let report = session.set_blocks_to(&region, &block("gold_block"));
    assert_eq!(report.affected, 2);
    assert_eq!(session.world().count_non_air_blocks(), 2);
}

#[test]
fn test_limit_stops_mid_operation_and_keeps_partial_writes() {
    let mut session = EditSession::new(MemoryWorld::new(0, 255));
    session.set_max_changes(Some(5));
    let region = CuboidRegion::new((0, 0, 0), (2, 2, 2));

    let report = session.set_blocks_to(&region, &block("stone"));

    assert_eq!(report.affected, 5);
    assert_eq!(report.status, EditStatus::LimitExceeded { limit: 5 });
    assert_eq!(session.world().count_non_air_blocks(), 5);
    assert!(matches!(
        report.into_result(),
        Err(EditError::BlockLimitExceeded {
            limit: 5,
            affected: 5
        })
    ));

    // The partial operation can still be rolled back.
    assert_eq!(session.undo().unwrap(), 5);
    assert_eq!(session.world().count_non_air_blocks(), 0);
}

#[test]
fn test_zero_limit_means_unlimited() {
    let mut session = EditSession::new(MemoryWorld::new(0, 255));
    session.set_max_changes(Some(0));
    assert_eq!(session.max_changes(), None);
    let report = session.set_blocks_to(&CuboidRegion::new((0, 0, 0), (9, 9, 9)), &block("stone"));
    assert_eq!(report, EditReport::completed(1000));
}

/// Accessor that refuses writes at one position.
struct FlakyWorld {
    inner: MemoryWorld,
    broken: BlockPosition,
}

impl BlockAccessor for FlakyWorld {
    fn get_block(&self, pos: BlockPosition) -> Result<BlockState, AccessorError> {
        self.inner.get_block(pos)
    }

    fn set_block(&mut self, pos: BlockPosition, block: &BlockState) -> Result<(), AccessorError> {
        if pos == self.broken {
            return Err(AccessorError::ReadOnly(pos));
        }
        self.inner.set_block(pos, block)
    }

    fn height_range(&self) -> (i32, i32) {
        self.inner.height_range()
    }
}

#[test]
fn test_accessor_failure_aborts_remaining_writes() {
    let broken = BlockPosition::new(2, 0, 0);
    let mut session = EditSession::new(FlakyWorld {
        inner: MemoryWorld::new(0, 255),
        broken,
    });
    let region = CuboidRegion::new((0, 0, 0), (4, 0, 0));

    let report = session.set_blocks_to(&region, &block("stone"));

    assert_eq!(report.affected, 2);
    assert_eq!(
        report.status,
        EditStatus::AccessorFailed {
            position: broken,
            source: AccessorError::ReadOnly(broken)
        }
    );
    assert_eq!(session.world().inner.count_non_air_blocks(), 2);
    assert!(session.world().inner.block_at((3, 0, 0)).is_air());
}

#[test]
fn test_unloaded_chunk_fails_reads() {
    let mut world = MemoryWorld::new(0, 255);
    world.unload_chunk(0, 0);
    let mut session = EditSession::new(world);
    let region = CuboidRegion::new((0, 0, 0), (0, 5, 0));
    let result = session.overlay_cuboid_blocks(&region, &block("stone")).unwrap();
    assert!(matches!(result.status, EditStatus::AccessorFailed { .. }));
    assert_eq!(result.affected, 0);
}

#[test]
fn test_session_over_borrowed_world() {
    let mut world = MemoryWorld::new(0, 255);
    {
        let mut session = EditSession::new(&mut world);
        session.set_blocks_to(&CuboidRegion::new((0, 0, 0), (1, 0, 0)), &block("stone"));
    }
    assert_eq!(world.count_non_air_blocks(), 2);
}
