//! Randomized properties of domain building and search.

use proptest::prelude::*;

use u_timetable::domain::{build_domains, Domains};
use u_timetable::models::{Assignment, DeliveryType, Instructor, Room, Session, TimeSlot};
use u_timetable::solver::{solve, SolveOutcome};

const COURSES: [&str; 3] = ["CSC 111", "MTH 212", "PHY 113"];
const COHORTS: [&str; 2] = ["1", "3"];

#[derive(Debug, Clone)]
struct Instance {
    sessions: Vec<Session>,
    instructors: Vec<Instructor>,
    rooms: Vec<Room>,
    slots: Vec<TimeSlot>,
}

fn slots() -> Vec<TimeSlot> {
    let mut slots = Vec::new();
    for day in ["Sunday", "Monday"] {
        for start in ["09:00", "10:00", "11:00"] {
            slots.push(TimeSlot::new(format!("{day} {start}"), day, start));
        }
    }
    slots
}

fn instance(max_sessions: usize) -> impl Strategy<Value = Instance> {
    let sessions = prop::collection::vec((0..3usize, 0..3usize, 0..2usize), 0..=max_sessions);
    let instructors = prop::collection::vec(
        (any::<bool>(), prop::collection::vec(any::<bool>(), COURSES.len())),
        1..4,
    );
    let rooms = prop::collection::vec(any::<bool>(), 1..4);

    (sessions, instructors, rooms).prop_map(|(sessions, instructors, rooms)| {
        let sessions = sessions
            .into_iter()
            .enumerate()
            .map(|(i, (course, delivery, cohort))| {
                let delivery = match delivery {
                    0 => DeliveryType::Lecture,
                    1 => DeliveryType::Tutorial,
                    _ => DeliveryType::Lab,
                };
                Session::new(format!("S{i}"), COURSES[course], delivery, COHORTS[cohort])
            })
            .collect();
        let instructors = instructors
            .into_iter()
            .enumerate()
            .map(|(i, (is_engineer, qualified))| {
                let base = if is_engineer {
                    Instructor::engineer(format!("I{i}"))
                } else {
                    Instructor::professor(format!("I{i}"))
                };
                base.with_courses(
                    COURSES
                        .iter()
                        .zip(qualified)
                        .filter(|(_, q)| *q)
                        .map(|(c, _)| *c),
                )
            })
            .collect();
        let rooms = rooms
            .into_iter()
            .enumerate()
            .map(|(i, is_lab)| {
                if is_lab {
                    Room::lab(format!("R{i}"))
                } else {
                    Room::lecture(format!("R{i}"))
                }
            })
            .collect();
        Instance {
            sessions,
            instructors,
            rooms,
            slots: slots(),
        }
    })
}

/// Exhaustive search without heuristics: does any conflict-free choice exist?
fn brute_force(order: &[&Session], domains: &Domains, chosen: &mut Vec<Assignment>) -> bool {
    let Some((session, rest)) = order.split_first() else {
        return true;
    };
    let Some(candidates) = domains.get(&session.id) else {
        return false;
    };
    for candidate in candidates {
        if chosen.iter().any(|c| c.conflicts_with(candidate)) {
            continue;
        }
        chosen.push(candidate.clone());
        if brute_force(rest, domains, chosen) {
            return true;
        }
        chosen.pop();
    }
    false
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_sessions_split_between_domains_and_diagnostics(inst in instance(8)) {
        let build = build_domains(&inst.sessions, &inst.instructors, &inst.rooms, &inst.slots)
            .unwrap();
        for session in &inst.sessions {
            let in_domains = build.domains.contains(&session.id);
            let in_diagnostics = build.diagnostics.contains(&session.id);
            prop_assert!(in_domains != in_diagnostics);
            if let Some(candidates) = build.domains.get(&session.id) {
                prop_assert!(!candidates.is_empty());
                for c in candidates {
                    prop_assert_eq!(&c.session_id, &session.id);
                    prop_assert_eq!(&c.cohort, &session.cohort);
                }
            }
        }
    }

    #[test]
    fn prop_domain_building_is_idempotent(inst in instance(8)) {
        let first = build_domains(&inst.sessions, &inst.instructors, &inst.rooms, &inst.slots);
        let second = build_domains(&inst.sessions, &inst.instructors, &inst.rooms, &inst.slots);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_solutions_are_conflict_free(inst in instance(8)) {
        let build = build_domains(&inst.sessions, &inst.instructors, &inst.rooms, &inst.slots)
            .unwrap();
        let solvable = build.solvable_sessions(&inst.sessions);
        let result = solve(&solvable, &build.domains).unwrap();

        if let Some(solution) = result.solution() {
            prop_assert_eq!(solution.len(), solvable.len());
            prop_assert!(solution.is_conflict_free());
            for session in &solvable {
                let a = solution.assignment_for_session(&session.id).unwrap();
                prop_assert!(build.domains.get(&session.id).unwrap().contains(a));
            }
            for diagnosed in build.diagnostics.iter().map(|(id, _)| id) {
                prop_assert!(solution.assignment_for_session(diagnosed).is_none());
            }
        }
    }

    #[test]
    fn prop_search_is_complete(inst in instance(5)) {
        let build = build_domains(&inst.sessions, &inst.instructors, &inst.rooms, &inst.slots)
            .unwrap();
        let solvable = build.solvable_sessions(&inst.sessions);
        let exists = brute_force(&solvable, &build.domains, &mut Vec::new());
        let result = solve(&solvable, &build.domains).unwrap();

        match result.outcome {
            SolveOutcome::Solved(_) => prop_assert!(exists),
            SolveOutcome::NoSolution => prop_assert!(!exists),
            SolveOutcome::Interrupted => prop_assert!(false, "unbounded search was interrupted"),
        }
    }

    #[test]
    fn prop_search_is_deterministic(inst in instance(8)) {
        let build = build_domains(&inst.sessions, &inst.instructors, &inst.rooms, &inst.slots)
            .unwrap();
        let solvable = build.solvable_sessions(&inst.sessions);
        let first = solve(&solvable, &build.domains).unwrap();
        let second = solve(&solvable, &build.domains).unwrap();
        prop_assert_eq!(first.outcome, second.outcome);
        prop_assert_eq!(first.stats.nodes, second.stats.nodes);
    }
}
