use beverage_bandits::path::plan_move;
use beverage_bandits::{Battle, Grid, Point, Round, Rules, Scenario, Side};
use proptest::prelude::*;
use std::collections::{HashMap, VecDeque};

/// Small walled caves, with at least one elf and one goblin.
fn cave() -> impl Strategy<Value = Scenario> {
    (1..6usize, 2..7usize).prop_flat_map(|(height, width)| {
        let square = prop_oneof![
            4 => Just('.'),
            1 => Just('#'),
            1 => Just('E'),
            1 => Just('G'),
        ];
        prop::collection::vec(square, height * width).prop_map(move |mut interior| {
            interior[0] = 'E';
            *interior.last_mut().unwrap() = 'G';

            let wall = "#".repeat(width + 2);
            let mut map = format!("{}\n", wall);
            for row in interior.chunks(width) {
                map.push('#');
                map.extend(row);
                map.push_str("#\n");
            }
            map.push_str(&wall);
            map.parse::<Scenario>().unwrap()
        })
    })
}

/// Distances from `from` to every square reachable through vacant squares.
fn distances(grid: &Grid, from: Point) -> HashMap<Point, usize> {
    let mut distances = HashMap::new();
    let mut queue = VecDeque::new();
    distances.insert(from, 0);
    queue.push_back(from);
    while let Some(p) = queue.pop_front() {
        let next = distances[&p] + 1;
        for n in grid.adjacent_open(p) {
            if !distances.contains_key(&n) {
                distances.insert(n, next);
                queue.push_back(n);
            }
        }
    }
    distances
}

fn next_to(grid: &Grid, p: Point, side: Side) -> bool {
    grid.neighbors(p)
        .any(|n| grid.occupant(n).map_or(false, |o| o.side == side))
}

proptest! {
    #[test]
    fn plans_follow_shortest_paths_in_reading_order(scenario in cave()) {
        let battle = Battle::new(&scenario, Rules::default());
        let grid = battle.grid();

        for unit in scenario.units() {
            let enemy = unit.side.enemy();
            let reachable = distances(grid, unit.position);
            let nearest = reachable
                .iter()
                .filter(|&(&p, _)| p != unit.position && next_to(grid, p, enemy))
                .map(|(&p, &d)| (d, p))
                .min();

            match plan_move(grid, unit.position, enemy) {
                None => {
                    prop_assert!(next_to(grid, unit.position, enemy) || nearest.is_none());
                }
                Some(plan) => {
                    prop_assert!(!next_to(grid, unit.position, enemy));
                    prop_assert_eq!(Some((plan.distance, plan.destination)), nearest);

                    let back = distances(grid, plan.destination);
                    let step = grid
                        .adjacent_open(unit.position)
                        .filter(|p| back.get(p) == Some(&(plan.distance - 1)))
                        .min();
                    prop_assert_eq!(Some(plan.step), step);
                }
            }
        }
    }

    #[test]
    fn replays_agree(scenario in cave()) {
        let mut first = Battle::new(&scenario, Rules::default());
        let mut second = Battle::new(&scenario, Rules::default());
        for _ in 0..40 {
            let round = first.round();
            prop_assert_eq!(round, second.round());
            prop_assert_eq!(first.snapshot(), second.snapshot());
            if round != Round::Complete {
                break;
            }
        }
        prop_assert_eq!(first.winner(), second.winner());
    }

    #[test]
    fn map_and_roster_agree(scenario in cave()) {
        let mut battle = Battle::new(&scenario, Rules::default());
        let mut hit_points = scenario.units().iter().map(|u| u.hit_points).sum::<usize>();
        for _ in 0..40 {
            let round = battle.round();

            let snapshot = battle.snapshot();
            let grid = battle.grid();
            for unit in snapshot.units() {
                prop_assert_eq!(grid.occupant(unit.position).map(|o| o.side), Some(unit.side));
            }
            let occupied = grid.terrain().indexed_iter()
                .filter(|&(p, _)| grid.occupant(p).is_some())
                .count();
            prop_assert_eq!(occupied, snapshot.units().len());

            let now = snapshot.units().iter().map(|u| u.hit_points).sum::<usize>();
            prop_assert!(now <= hit_points);
            hit_points = now;

            if round != Round::Complete {
                break;
            }
        }
    }
}
