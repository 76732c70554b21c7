//! Unit tests for ps-agent.

use std::sync::Arc;

use ps_core::{AgentId, Crossing, CrossingId, TransitionZone, Vec2, WallContact, ZoneId};
use ps_route::{Behaviour, Destination, GoalSource, RouteEvent, SequenceState};

use crate::{
    AgentConfig, AgentError, AgentStoreBuilder, Kinematics, NoTargetError, Pedestrian,
    PhysicalParams, SocialForce, WallDecay, wall_force,
};

fn v(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

fn walker(id: u32, goal: Vec2) -> Pedestrian {
    Pedestrian::new(AgentConfig::new(AgentId(id), Vec2::ZERO, 1.5).goal(goal)).unwrap()
}

/// Contacts for a corridor bounded by y = 0 and y = 4.
fn corridor_contacts(p: Vec2, radius: f32) -> Vec<WallContact> {
    [WallContact::new(p.y.abs(), Vec2::Y), WallContact::new((4.0 - p.y).abs(), -Vec2::Y)]
        .into_iter()
        .filter(|c| c.distance < radius)
        .collect()
}

// ── Parameters ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod params {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let p = PhysicalParams::for_kind(Default::default(), 1.4);
        assert!(p.validate().is_ok());
        assert_eq!(p.radius, 0.25);
        assert_eq!(p.max_speed, 1.4);
        assert_eq!(p.slowing_distance, 2.0);
        assert_eq!(p.cruising().slowing_distance, 0.0);
        assert_eq!(p.cruising().max_speed, 1.4);
    }

    #[test]
    fn zero_radius_rejected() {
        let err = Pedestrian::new(AgentConfig::new(AgentId(0), Vec2::ZERO, 1.0).radius(0.0)).unwrap_err();
        assert_eq!(err, AgentError::Configuration { param: "radius", value: 0.0 });
    }

    #[test]
    fn negative_relaxation_rejected() {
        let err = Pedestrian::new(AgentConfig::new(AgentId(0), Vec2::ZERO, 1.0).relaxation_time(-0.5))
            .unwrap_err();
        assert!(matches!(err, AgentError::Configuration { param: "relaxation_time", .. }));
    }

    #[test]
    fn negative_magnitudes_rejected() {
        for cfg in [
            AgentConfig::new(AgentId(0), Vec2::ZERO, -1.0),
            AgentConfig::new(AgentId(0), Vec2::ZERO, 1.0).max_force(-1.0),
            AgentConfig::new(AgentId(0), Vec2::ZERO, 1.0).wall_repulsion(0.5, -2.0),
            AgentConfig::new(AgentId(0), Vec2::ZERO, 1.0).wall_repulsion(-0.5, 2.0),
            AgentConfig::new(AgentId(0), Vec2::ZERO, 1.0).slowing_distance(-1.0),
            AgentConfig::new(AgentId(0), Vec2::ZERO, f32::NAN),
        ] {
            assert!(matches!(Pedestrian::new(cfg), Err(AgentError::Configuration { .. })));
        }
    }

    #[test]
    fn zero_magnitudes_are_allowed() {
        let cfg = AgentConfig::new(AgentId(0), Vec2::ZERO, 0.0).max_force(0.0).wall_repulsion(0.0, 0.0);
        assert!(Pedestrian::new(cfg).is_ok());
    }

    #[test]
    fn non_finite_position_rejected() {
        let cfg = AgentConfig::new(AgentId(0), v(f32::NAN, 0.0), 1.0);
        assert!(matches!(
            Pedestrian::new(cfg),
            Err(AgentError::Configuration { param: "position", .. })
        ));
    }

    #[test]
    fn empty_crossing_rejected_at_construction() {
        let empty = Arc::new(Crossing::new(CrossingId(4), vec![]));
        let cfg = AgentConfig::new(AgentId(0), Vec2::ZERO, 1.0).crossing(empty);
        assert!(matches!(Pedestrian::new(cfg), Err(AgentError::Reference(_))));
    }
}

// ── Force model ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod force {
    use super::*;

    fn params() -> PhysicalParams {
        PhysicalParams::for_kind(Default::default(), 1.5)
    }

    #[test]
    fn wall_at_zero_distance_gives_full_magnitude() {
        let c = WallContact::new(0.0, Vec2::X);
        assert_eq!(wall_force(&params(), &c, WallDecay::Linear).length(), 2.0);
        let exp = WallDecay::Exponential { sharpness: 3.0 };
        assert_eq!(wall_force(&params(), &c, exp).length(), 2.0);
    }

    #[test]
    fn negative_distance_clamps_to_contact() {
        let c = WallContact::new(-0.3, Vec2::Y);
        assert_eq!(wall_force(&params(), &c, WallDecay::Linear), v(0.0, 2.0));
    }

    #[test]
    fn wall_at_radius_gives_nothing() {
        let p = params();
        for decay in [WallDecay::Linear, WallDecay::Exponential { sharpness: 4.0 }] {
            let at = WallContact::new(p.wall_repulsion_radius, Vec2::X);
            let beyond = WallContact::new(p.wall_repulsion_radius + 1.0, Vec2::X);
            assert_eq!(wall_force(&p, &at, decay), Vec2::ZERO);
            assert_eq!(wall_force(&p, &beyond, decay), Vec2::ZERO);
        }
    }

    #[test]
    fn decay_is_monotone() {
        for decay in [WallDecay::Linear, WallDecay::Exponential { sharpness: 2.5 }] {
            let mut last = f32::INFINITY;
            for i in 0..=60 {
                let m = decay.magnitude(i as f32 * 0.01, 0.6, 2.0);
                assert!(m <= last, "{decay:?} rose at step {i}");
                last = m;
            }
        }
    }

    #[test]
    fn zero_wall_radius_disables_repulsion() {
        assert_eq!(WallDecay::Linear.magnitude(0.0, 0.0, 2.0), 0.0);
    }

    #[test]
    fn wall_scenario_applied_force_is_exact() {
        // Agent at rest holding position, wall touching it.
        let mut ped = Pedestrian::new(AgentConfig::new(AgentId(0), v(1.0, 0.0), 1.5)).unwrap();
        let out = ped.step(&SocialForce::default(), &[WallContact::new(0.0, Vec2::Y)], 0.1);
        assert_eq!(out.force.length(), 2.0);
        assert_eq!(out.force, v(0.0, 2.0));
    }

    #[test]
    fn walls_sum_vectorially() {
        let p = params();
        let kin = Kinematics::at_rest(v(1.0, 1.0));
        let walls = [WallContact::new(0.3, Vec2::Y), WallContact::new(0.3, -Vec2::Y)];
        let f = crate::step(&SocialForce::default(), &p, &kin, kin.position, &walls, 0.1).force;
        assert!(f.length() < 1e-6);
    }

    #[test]
    fn net_force_is_clamped_with_direction_preserved() {
        let mut p = params();
        p.wall_repulsion_magnitude = 50.0;
        let kin = Kinematics::at_rest(Vec2::ZERO);
        let walls = [WallContact::new(0.0, v(0.6, 0.8))];
        let f = crate::step(&SocialForce::default(), &p, &kin, Vec2::ZERO, &walls, 0.1).force;
        assert!((f.length() - p.max_force).abs() < 1e-5);
        assert!((f.normalize() - v(0.6, 0.8)).length() < 1e-5);
    }

    #[test]
    fn desired_speed_tapers_near_goal() {
        let p = params();
        let kin = Kinematics::at_rest(Vec2::ZERO);
        // Far away: full speed, relaxed over τ.
        let f = crate::goal_force(&p, &kin, v(10.0, 0.0));
        assert!((f - v(3.0, 0.0)).length() < 1e-5);
        // Halfway into the slowing distance: half speed.
        let f = crate::goal_force(&p, &kin, v(1.0, 0.0));
        assert!((f - v(1.5, 0.0)).length() < 1e-5);
        // Taper off: full speed right up to the radius.
        let f = crate::goal_force(&p.cruising(), &kin, v(1.0, 0.0));
        assert!((f - v(3.0, 0.0)).length() < 1e-5);
        // Inside the radius: brake only.
        assert_eq!(crate::goal_force(&p, &kin, v(0.2, 0.0)), Vec2::ZERO);
    }

    #[test]
    fn zero_force_means_zero_acceleration() {
        let p = params();
        let kin = Kinematics::at_rest(v(3.0, 3.0));
        let r = crate::step(&SocialForce::default(), &p, &kin, kin.position, &[], 0.1);
        assert_eq!(r.kinematics.acceleration, Vec2::ZERO);
        assert_eq!(r.kinematics.position, kin.position);
    }
}

// ── Kinematic scenarios ───────────────────────────────────────────────────────

#[cfg(test)]
mod kinematics {
    use super::*;

    #[test]
    fn straight_walk_to_goal() {
        let mut ped = Pedestrian::new(
            AgentConfig::new(AgentId(0), Vec2::ZERO, 1.5)
                .relaxation_time(0.5)
                .goal(v(10.0, 0.0)),
        )
        .unwrap();
        let model = SocialForce::default();

        let mut xs = Vec::with_capacity(100);
        let mut max_vx = 0.0_f32;
        for _ in 0..100 {
            ped.step(&model, &[], 0.1);
            assert!(ped.velocity().x <= 1.5 + 1e-5);
            max_vx = max_vx.max(ped.velocity().x);
            xs.push(ped.position().x);
        }

        assert!(max_vx > 1.45, "never approached max speed: {max_vx}");
        for (t, w) in xs.windows(2).enumerate() {
            assert!(w[1] > w[0], "x did not increase at tick {}: {} -> {}", t + 1, w[0], w[1]);
        }
        let peak = xs.iter().copied().fold(f32::MIN, f32::max);
        assert!(peak < 10.05, "overshoot: {peak}");
        let last = xs[xs.len() - 1];
        assert!((last - 10.0).abs() < 0.15, "did not settle at goal: {last}");
    }

    #[test]
    fn path_waypoints_are_passed_at_full_speed() {
        let mut ped = Pedestrian::new(
            AgentConfig::new(AgentId(0), Vec2::ZERO, 1.5)
                .velocity(v(1.5, 0.0))
                .path(vec![v(1.0, 0.0), v(20.0, 0.0)]),
        )
        .unwrap();
        let model = SocialForce::default();
        // Heading into the first waypoint, already inside the slowing distance.
        let out = ped.step(&model, &[], 0.1);
        assert_eq!(out.resolution.source, GoalSource::Path);
        assert_eq!(out.force, Vec2::ZERO);
        assert_eq!(ped.velocity(), v(1.5, 0.0));
    }

    #[test]
    fn final_goal_slows_the_agent() {
        let mut ped = Pedestrian::new(
            AgentConfig::new(AgentId(0), Vec2::ZERO, 1.5).velocity(v(1.5, 0.0)).goal(v(1.0, 0.0)),
        )
        .unwrap();
        ped.step(&SocialForce::default(), &[], 0.1);
        assert!(ped.velocity().x < 1.5);
        assert!(ped.velocity().x > 0.0);
    }

    #[test]
    fn speed_and_force_bounds_hold_in_corridor() {
        let model = SocialForce::new(WallDecay::Exponential { sharpness: 3.0 });
        let starts = [v(0.0, 0.1), v(0.0, 2.0), v(0.0, 3.95), v(1.0, 0.0)];
        for (i, start) in starts.into_iter().enumerate() {
            let mut ped = Pedestrian::new(
                AgentConfig::new(AgentId(i as u32), start, 1.3 + i as f32 * 0.1)
                    .wall_repulsion(0.8, 12.0)
                    .max_force(4.0)
                    .path(vec![v(5.0, 0.3), v(10.0, 3.7), v(15.0, 2.0)])
                    .goal(v(20.0, 2.0)),
            )
            .unwrap();
            let max_speed = ped.params().max_speed;
            for _ in 0..300 {
                let walls = corridor_contacts(ped.position(), ped.params().wall_repulsion_radius);
                let out = ped.step(&model, &walls, 0.1);
                assert!(ped.velocity().length() <= max_speed * (1.0 + 1e-5));
                assert!(out.force.length() <= 4.0 * (1.0 + 1e-5));
            }
        }
    }

    #[test]
    fn identical_agents_produce_identical_trajectories() {
        let model = SocialForce::default();
        let mut a = walker(0, v(8.0, 3.0));
        let mut b = walker(0, v(8.0, 3.0));
        a.attach_path(vec![v(2.0, 2.0), v(4.0, 0.5)]);
        b.attach_path(vec![v(2.0, 2.0), v(4.0, 0.5)]);
        for _ in 0..200 {
            let wa = corridor_contacts(a.position(), 0.6);
            let wb = corridor_contacts(b.position(), 0.6);
            let oa = a.step(&model, &wa, 0.05);
            let ob = b.step(&model, &wb, 0.05);
            assert_eq!(a.snapshot(), b.snapshot());
            assert_eq!(oa, ob);
        }
    }

    #[test]
    fn no_target_is_reported_not_raised() {
        let mut ped = Pedestrian::new(AgentConfig::new(AgentId(9), v(2.0, 2.0), 1.0)).unwrap();
        let out = ped.step(&SocialForce::default(), &[], 0.1);
        assert_eq!(out.no_target, Some(NoTargetError(AgentId(9))));
        assert_eq!(out.resolution.source, GoalSource::Hold);
        assert_eq!(ped.position(), v(2.0, 2.0));
    }

    #[test]
    fn initial_velocity_is_clamped() {
        let ped = Pedestrian::new(AgentConfig::new(AgentId(0), Vec2::ZERO, 1.0).velocity(v(3.0, 4.0)))
            .unwrap();
        assert!((ped.velocity().length() - 1.0).abs() < 1e-6);
    }
}

// ── Targeting through the agent ───────────────────────────────────────────────

#[cfg(test)]
mod targeting {
    use super::*;

    #[test]
    fn path_advances_past_reached_waypoint() {
        let mut ped = Pedestrian::new(
            AgentConfig::new(AgentId(0), v(4.8, 0.0), 1.5)
                .radius(0.5)
                .path(vec![v(5.0, 0.0), v(10.0, 0.0)]),
        )
        .unwrap();
        let model = SocialForce::default();
        let first = ped.step(&model, &[], 0.1);
        assert_eq!(first.resolution.goal, v(10.0, 0.0));
        assert_eq!(first.events, vec![RouteEvent::PathWaypointReached { index: 0 }]);
        for _ in 0..20 {
            assert_eq!(ped.step(&model, &[], 0.1).resolution.goal, v(10.0, 0.0));
        }
    }

    #[test]
    fn behaviours_complete_then_crossing_takes_over() {
        let exit = Arc::new(Crossing::new(CrossingId(1), vec![v(10.0, 0.0), v(10.0, 4.0)]));
        let mut ped = Pedestrian::new(
            AgentConfig::new(AgentId(0), v(0.0, 2.0), 1.5)
                .crossing(exit)
                .behaviours(vec![
                    Behaviour::new(vec![v(3.0, 2.0)]),
                    Behaviour::new(vec![v(5.0, 3.0)]),
                ]),
        )
        .unwrap();
        let model = SocialForce::default();

        let mut completed_at = None;
        for tick in 0..200 {
            let out = ped.step(&model, &[], 0.1);
            if out.events.contains(&RouteEvent::SequenceCompleted) {
                assert_eq!(out.resolution.goal, v(10.0, 2.0));
                assert_eq!(out.resolution.source, GoalSource::Destination);
                completed_at = Some(tick);
                break;
            }
        }
        assert!(completed_at.is_some(), "sequence never completed");
        let seq = ped.targeting().sequence().unwrap();
        assert_eq!(seq.state(), SequenceState::Completed);

        // Keep walking: the crossing is reached exactly once.
        let mut reached = 0;
        for _ in 0..200 {
            let out = ped.step(&model, &[], 0.1);
            reached += out.events.iter().filter(|e| e.is_destination_reached()).count();
            assert!(ped.targeting().sequence().unwrap().is_completed());
        }
        assert_eq!(reached, 1);
    }

    #[test]
    fn failed_reassignment_keeps_destination() {
        let mut ped = walker(0, v(5.0, 0.0));
        let empty = Arc::new(TransitionZone::new(ZoneId(3), vec![]));
        assert!(ped.assign_destination(Destination::TransitionZone(empty)).is_err());
        assert_eq!(ped.targeting().destination(), &Destination::ExplicitGoal(v(5.0, 0.0)));
    }

    #[test]
    fn replanned_script_is_walked_to_its_end() {
        let model = SocialForce::default();
        let mut ped = Pedestrian::new(
            AgentConfig::new(AgentId(0), Vec2::ZERO, 1.5)
                .behaviours(vec![Behaviour::new(vec![v(3.0, 0.0)])]),
        )
        .unwrap();
        for _ in 0..100 {
            ped.step(&model, &[], 0.1);
        }
        assert!(ped.targeting().sequence().unwrap().is_completed());
        assert!(ped.position().distance(v(3.0, 0.0)) < 0.3);

        ped.attach_behaviours(vec![Behaviour::new(vec![v(3.0, 2.0)]), Behaviour::new(vec![v(0.0, 2.0)])]);
        let mut last = None;
        for _ in 0..200 {
            last = Some(ped.step(&model, &[], 0.1).resolution);
        }
        let last = last.unwrap();
        assert_eq!(last.source, GoalSource::ScriptEnd);
        assert_eq!(last.goal, v(0.0, 2.0));
        assert!(ped.position().distance(v(0.0, 2.0)) < 0.3);

        ped.clear_behaviours();
        let out = ped.step(&model, &[], 0.1);
        assert_eq!(out.resolution.source, GoalSource::Hold);
        assert_eq!(out.no_target, Some(NoTargetError(AgentId(0))));
    }

    #[test]
    fn set_goal_retargets() {
        let mut ped = walker(0, v(5.0, 0.0));
        ped.set_goal(v(-5.0, 0.0)).unwrap();
        let out = ped.step(&SocialForce::default(), &[], 0.1);
        assert_eq!(out.resolution.goal, v(-5.0, 0.0));
        assert!(ped.velocity().x < 0.0);
    }

    #[test]
    fn display_meta_is_carried() {
        let ped = Pedestrian::new(
            AgentConfig::new(AgentId(0), Vec2::ZERO, 1.0).display(crate::DisplayMeta(0xff00ff)),
        )
        .unwrap();
        assert_eq!(ped.display(), Some(crate::DisplayMeta(0xff00ff)));
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod store {
    use super::*;

    fn three() -> crate::AgentStore {
        AgentStoreBuilder::new()
            .agents((0..3).map(|i| AgentConfig::new(AgentId(i), v(i as f32, 0.0), 1.2)))
            .build()
            .unwrap()
    }

    #[test]
    fn builder_preserves_order() {
        let s = three();
        assert_eq!(s.agent_ids().collect::<Vec<_>>(), vec![AgentId(0), AgentId(1), AgentId(2)]);
    }

    #[test]
    fn duplicate_id_rejected() {
        let err = AgentStoreBuilder::new()
            .agent(AgentConfig::new(AgentId(5), Vec2::ZERO, 1.0))
            .agent(AgentConfig::new(AgentId(5), Vec2::ONE, 1.0))
            .build()
            .err();
        assert_eq!(err, Some(AgentError::DuplicateId(AgentId(5))));
    }

    #[test]
    fn sentinel_id_rejected() {
        let err = AgentStoreBuilder::new()
            .agent(AgentConfig::new(AgentId::INVALID, Vec2::ZERO, 1.0))
            .build()
            .err();
        assert_eq!(err, Some(AgentError::InvalidId(AgentId::INVALID)));
    }

    #[test]
    fn builder_surfaces_config_errors() {
        let res = AgentStoreBuilder::new()
            .agent(AgentConfig::new(AgentId(0), Vec2::ZERO, 1.0).radius(-1.0))
            .build();
        assert!(matches!(res, Err(AgentError::Configuration { param: "radius", .. })));
    }

    #[test]
    fn retire_keeps_order_and_index() {
        let mut s = three();
        assert_eq!(s.retire(&[AgentId(1), AgentId(42)]), 1);
        assert_eq!(s.len(), 2);
        assert!(!s.contains(AgentId(1)));
        assert_eq!(s.get(AgentId(2)).unwrap().position(), v(2.0, 0.0));
        assert_eq!(s.agent_ids().collect::<Vec<_>>(), vec![AgentId(0), AgentId(2)]);
    }

    #[test]
    fn get_mut_replans() {
        let mut s = three();
        s.get_mut(AgentId(2)).unwrap().set_goal(v(9.0, 9.0)).unwrap();
        assert_eq!(
            s.get(AgentId(2)).unwrap().targeting().destination(),
            &Destination::ExplicitGoal(v(9.0, 9.0))
        );
        assert!(s.get_mut(AgentId(7)).is_none());
    }

    #[test]
    fn snapshots_follow_slot_order() {
        let s = three();
        let snaps = s.snapshots();
        assert_eq!(snaps.len(), 3);
        assert_eq!(snaps[1].agent, AgentId(1));
        assert_eq!(snaps[1].speed(), 0.0);
    }
}
