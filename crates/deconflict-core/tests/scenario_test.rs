//! End-to-end deconfliction scenarios.

use deconflict_core::{
    check_for_conflicts, position_at_time, ConflictType, Coordinate, Mission, SeparationRules,
    Waypoint,
};

fn primary_straight_2d() -> Mission {
    Mission::from_coordinates("P_Straight2D", [(0.0, 0.0), (100.0, 0.0)], 0.0, 10.0).unwrap()
}

fn primary_straight_3d() -> Mission {
    Mission::from_coordinates(
        "P_Straight3D",
        [(0.0, 0.0, 10.0), (100.0, 0.0, 10.0)],
        0.0,
        10.0,
    )
    .unwrap()
}

#[test]
fn parallel_far_apart_is_clear() {
    let other = Mission::new(
        "OtherFar",
        vec![Waypoint::new(0.0, 100.0, 0.0), Waypoint::new(100.0, 100.0, 10.0)],
    )
    .unwrap();
    let rules = SeparationRules::default().with_safety_buffer_2d(10.0);

    let conflicts = check_for_conflicts(&primary_straight_2d(), &[other], &rules);
    assert!(conflicts.is_empty());
}

#[test]
fn head_on_2d_conflicts_near_midpoint() {
    let other = Mission::new(
        "OtherHeadOn",
        vec![Waypoint::new(100.0, 0.0, 0.0), Waypoint::new(0.0, 0.0, 10.0)],
    )
    .unwrap();
    let rules = SeparationRules::default()
        .with_safety_buffer_2d(10.0)
        .with_time_step(0.1);

    let conflicts = check_for_conflicts(&primary_straight_2d(), &[other], &rules);
    assert!(!conflicts.is_empty());
    assert!(conflicts
        .iter()
        .any(|c| (c.time - 5.0).abs() < 0.1 && (c.primary_pos.x - 50.0).abs() < 1.0));
    assert_eq!(conflicts[0].conflict_type, ConflictType::Proximity2d);
    assert!(conflicts.windows(2).all(|w| w[0].time <= w[1].time));
}

#[test]
fn same_track_higher_altitude_is_3d_proximity() {
    let other = Mission::new(
        "Other3DClose",
        vec![
            Waypoint::new(0.0, 0.0, 0.0).with_altitude(15.0),
            Waypoint::new(100.0, 0.0, 10.0).with_altitude(15.0),
        ],
    )
    .unwrap();
    let rules = SeparationRules::default()
        .with_safety_buffer_3d(7.0)
        .with_vertical_separation(3.0)
        .with_time_step(0.1);

    let conflicts = check_for_conflicts(&primary_straight_3d(), &[other], &rules);
    assert!(!conflicts.is_empty());
    assert_eq!(conflicts[0].conflict_type, ConflictType::Proximity3d);
    assert!((conflicts[0].distance_3d.unwrap() - 5.0).abs() < 1e-9);

    let at_midpoint = conflicts
        .iter()
        .find(|c| (c.time - 5.0).abs() < 1e-6)
        .expect("conflict at t=5");
    assert!((at_midpoint.distance_3d.unwrap() - 5.0).abs() < 1e-9);
}

#[test]
fn small_3d_buffer_falls_through_to_vertical_separation() {
    let other = Mission::new(
        "OtherVertSep",
        vec![
            Waypoint::new(1.0, 0.0, 0.0).with_altitude(12.0),
            Waypoint::new(101.0, 0.0, 10.0).with_altitude(12.0),
        ],
    )
    .unwrap();

    let wide = SeparationRules::default()
        .with_safety_buffer_2d(5.0)
        .with_safety_buffer_3d(10.0)
        .with_vertical_separation(3.0)
        .with_time_step(0.1);
    let conflicts = check_for_conflicts(&primary_straight_3d(), &[other.clone()], &wide);
    assert!(!conflicts.is_empty());
    assert_eq!(conflicts[0].conflict_type, ConflictType::Proximity3d);
    assert!((conflicts[0].distance_3d.unwrap() - 5.0_f64.sqrt()).abs() < 1e-9);

    let narrow = wide.with_safety_buffer_3d(2.0);
    let conflicts = check_for_conflicts(&primary_straight_3d(), &[other], &narrow);
    assert!(!conflicts.is_empty());
    assert!(conflicts
        .iter()
        .all(|c| c.conflict_type == ConflictType::InsufficientVerticalSeparation));
}

#[test]
fn stationary_primary_spans_declared_window() {
    let primary =
        Mission::from_coordinates("Primary_Stationary", [(50.0, 50.0, 10.0)], 0.0, 10.0).unwrap();
    let crossing = Mission::new(
        "DroneX",
        vec![Waypoint::new(100.0, 50.0, 0.0), Waypoint::new(0.0, 50.0, 10.0)],
    )
    .unwrap();

    let conflicts = check_for_conflicts(&primary, &[crossing], &SeparationRules::default());
    assert!(!conflicts.is_empty());
    assert!(conflicts.iter().any(|c| (c.time - 5.0).abs() < 1e-9));
    assert!(conflicts
        .iter()
        .all(|c| c.conflict_type == ConflictType::Proximity2d));
}

#[test]
fn boundaries_return_first_and_last_waypoint() {
    let missions = [
        primary_straight_2d(),
        primary_straight_3d(),
        Mission::from_coordinates(
            "Zig",
            [
                Coordinate::from((0.0, 0.0, 5.0)),
                Coordinate::from((10.0, 10.0)),
                Coordinate::from((20.0, 0.0, 9.0)),
            ],
            2.0,
            8.0,
        )
        .unwrap(),
    ];

    for mission in &missions {
        let first = mission.waypoints().first().unwrap();
        let last = mission.waypoints().last().unwrap();

        let at_start = position_at_time(mission, mission.start_time()).unwrap();
        assert_eq!(at_start.position(), first.position());
        let at_end = position_at_time(mission, mission.end_time()).unwrap();
        assert_eq!(at_end.position(), last.position());

        assert!(position_at_time(mission, mission.start_time() - 0.01).is_none());
        assert!(position_at_time(mission, mission.end_time() + 0.01).is_none());
    }
}

#[test]
fn midpoint_is_mean_of_endpoints() {
    let mission = Mission::new(
        "Affine",
        vec![
            Waypoint::new(-4.0, 12.0, 1.0).with_altitude(30.0),
            Waypoint::new(16.0, -8.0, 3.0).with_altitude(10.0),
        ],
    )
    .unwrap();
    let mid = position_at_time(&mission, 2.0).unwrap();
    assert!((mid.x - 6.0).abs() < 1e-9);
    assert!((mid.y - 2.0).abs() < 1e-9);
    assert!((mid.z.unwrap() - 20.0).abs() < 1e-9);
}
