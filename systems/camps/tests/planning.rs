use std::collections::BTreeSet;
use std::sync::Arc;

use strata_core::{
    CampOrdinal, Command, Level, LevelStage, Position, SectorBounds, WorldSeed, Zone,
    UNREACHABLE_DISTANCE,
};
use strata_system_camps::{quick_distance_to_camp, CampPlanner};
use strata_system_ordinals::{level_range, OrdinalMapper};
use strata_world::{apply, query, World};

#[test]
fn camps_partition_every_generated_level() {
    let mapper = Arc::new(OrdinalMapper::default());
    let planner = CampPlanner::new(Arc::clone(&mapper));
    let limit = mapper.constants().camp_ordinal_limit;

    for raw in -10..10 {
        let seed = WorldSeed::new(raw);
        let mut seen: BTreeSet<Level> = BTreeSet::new();
        for camp in 1..=limit {
            let levels = planner.levels_for_camp(seed, CampOrdinal::new(camp));
            assert!(mapper.is_campable_level(seed, levels[0]), "seed {raw} camp {camp}");
            for level in levels {
                assert!(seen.insert(level), "seed {raw} level {level} listed twice");
            }
        }
        let expected: BTreeSet<Level> = level_range(seed).collect();
        assert_eq!(seen, expected, "seed {raw}");
    }
}

/// Builds a 7x7 level with a wall in column 3 that leaves a gap at row 6.
fn walled_level() -> World {
    let mut world = World::new();
    let mut events = Vec::new();
    apply(
        &mut world,
        Command::AddLevel {
            level: 5,
            bounds: SectorBounds::new(0, 0, 6, 6),
            stages: vec![LevelStage::Early],
        },
        &mut events,
    );
    for y in 0..7 {
        for x in 0..7 {
            if x == 3 && y != 6 {
                continue;
            }
            apply(
                &mut world,
                Command::AddSector {
                    position: Position::new(5, x, y),
                    zone: Zone::PoiTemp,
                    is_camp: (x, y) == (1, 1),
                },
                &mut events,
            );
        }
    }
    assert!(events.iter().all(|event| !matches!(
        event,
        strata_core::Event::CommandRejected { .. }
    )));
    world
}

#[test]
fn straight_line_never_exceeds_path_distance() {
    let mut world = walled_level();
    let planner = CampPlanner::new(Arc::new(OrdinalMapper::default()));
    let positions: Vec<Position> = query::level(&world, 5)
        .expect("level exists")
        .sectors()
        .iter()
        .map(|sector| sector.position())
        .collect();

    let mut events = Vec::new();
    for position in positions {
        let path = planner.distance_to_camp(&mut world, position, &mut events);
        assert_ne!(path, UNREACHABLE_DISTANCE);
        let level = query::level(&world, 5).expect("level exists");
        let sector = level.sector_at(position).expect("sector exists");
        assert!(
            quick_distance_to_camp(level, sector) <= f64::from(path),
            "{position}: quick distance exceeds path distance {path}"
        );
    }
}

#[test]
fn walls_lengthen_the_route_to_camp() {
    let mut world = walled_level();
    let planner = CampPlanner::new(Arc::new(OrdinalMapper::default()));
    let mut events = Vec::new();
    // Straight across would be 4 steps; the detour through row 6 adds ten.
    assert_eq!(
        planner.distance_to_camp(&mut world, Position::new(5, 5, 1), &mut events),
        14
    );
}
