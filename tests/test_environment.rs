use std::collections::VecDeque;

use maze_agent::simulation::grid::{Cell, Grid, Move, Position};
use maze_agent::simulation::params::{FOOD_VALUE, STARTING_LIVES, STEP_PENALTY, WIN_BONUS};
use maze_agent::simulation::{GameStatus, Maze, StepOutcome, World};
use maze_agent::Error;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_parse_symbols() {
    let maze = Maze::parse("XXXX\nXEoX\nX_SX\nXXXX\n").unwrap();
    assert_eq!(maze.dimensions(), (4, 4));
    assert_eq!(maze.start(), Position::new(1, 1));
    assert_eq!(maze.agent_position(), Position::new(1, 1));
    assert_eq!(maze.cell(Position::new(1, 1)), Cell::Open);
    assert_eq!(maze.cell(Position::new(1, 2)), Cell::Food);
    assert_eq!(maze.cell(Position::new(2, 2)), Cell::Exit);
    assert_eq!(maze.cell(Position::new(9, 9)), Cell::Unknown);
    assert_eq!(maze.total_food(), 1);
}

#[test]
fn test_parse_skips_blank_lines_and_crlf() {
    let maze = Maze::parse("\r\nXEX\r\n\r\nX_X\r\n").unwrap();
    assert_eq!(maze.dimensions(), (2, 3));
}

#[test]
fn test_parse_without_start_uses_first_floor() {
    let maze = Maze::parse("XXS\n_oX").unwrap();
    assert_eq!(maze.start(), Position::new(1, 0));
}

#[test]
fn test_parse_errors() {
    assert!(matches!(Maze::parse(""), Err(Error::EmptyMaze)));
    assert!(matches!(Maze::parse("\n  \n"), Err(Error::EmptyMaze)));
    assert!(matches!(
        Maze::parse("XXX\nXX"),
        Err(Error::RaggedMaze { line: 2, expected: 3, found: 2 })
    ));
    assert!(matches!(Maze::parse("XXX\nXSX"), Err(Error::NoStart)));
}

#[test]
fn test_load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope.txt");
    let err = Maze::load(&path).unwrap_err();
    assert!(matches!(err, Error::Io { .. }));
    assert!(err.to_string().contains("nope.txt"));
}

#[test]
fn test_load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("maze.txt");
    std::fs::write(&path, "XXXX\nXEXX\nXoSX\nXXXX\n").unwrap();
    let maze = Maze::load(&path).unwrap();
    assert_eq!(maze.layout(), Maze::fallback().layout());
}

#[test]
fn test_wall_move_refused() {
    let mut maze = Maze::fallback();
    let outcome = maze.apply(Move::UP);
    assert!(!outcome.moved);
    assert_eq!(maze.agent_position(), Position::new(1, 1));
    assert_eq!(maze.steps(), 0);
    assert_eq!(maze.score(), 0);
}

#[test]
fn test_stay_is_free() {
    let mut maze = Maze::fallback();
    assert_eq!(maze.apply(Move::STAY), StepOutcome::default());
    assert_eq!(maze.score(), 0);
}

#[test]
fn test_diagonal_move_refused() {
    let mut maze = Maze::parse("E_\n__").unwrap();
    let outcome = maze.apply(Move { d_col: 1, d_row: 1 });
    assert!(!outcome.moved);
    assert_eq!(maze.agent_position(), Position::new(0, 0));
}

#[test]
fn test_full_game_scoring() {
    let mut maze = Maze::fallback();

    let first = maze.apply(Move::DOWN);
    assert!(first.moved && first.ate_food && first.unlocked_exit);
    assert_eq!(maze.foods_left(), 0);
    assert_eq!(maze.cell(Position::new(2, 1)), Cell::Open);
    assert_eq!(maze.score(), STEP_PENALTY + FOOD_VALUE);

    let second = maze.apply(Move::RIGHT);
    assert!(second.won);
    assert_eq!(maze.status(), GameStatus::Won);
    assert_eq!(maze.steps(), 2);
    assert_eq!(maze.score(), 2 * STEP_PENALTY + FOOD_VALUE + WIN_BONUS);

    // Nothing moves after the game is won.
    assert!(!maze.apply(Move::LEFT).moved);
    assert_eq!(maze.agent_position(), Position::new(2, 2));
}

#[test]
fn test_locked_exit_is_refused_by_world() {
    let maze = Maze::parse("XXXXX\nXESoX\nXXXXX").unwrap();
    assert!(!maze.can_move_between(Position::new(1, 1), Position::new(1, 2)));
}

#[test]
fn test_hunger_death_respawns_at_start() {
    let mut maze = Maze::parse("XXXXXX\nXE_SoX\nXXXXXX").unwrap();
    assert!(maze.apply(Move::RIGHT).moved);
    let score = maze.score();

    let outcome = maze.apply(Move::RIGHT);
    assert!(outcome.starved);
    assert!(!outcome.moved);
    assert_eq!(maze.lives(), STARTING_LIVES - 1);
    assert_eq!(maze.agent_position(), maze.start());
    assert_eq!(maze.score(), score);
    assert_eq!(maze.steps(), 1);
    assert_eq!(maze.status(), GameStatus::Running);
    assert!(!maze.is_exit_unlocked());
}

#[test]
fn test_last_life_ends_the_game() {
    let mut maze = Maze::parse("XXXXX\nXESoX\nXXXXX").unwrap();
    for _ in 0..STARTING_LIVES {
        assert!(maze.apply(Move::RIGHT).starved);
    }
    assert_eq!(maze.lives(), 0);
    assert_eq!(maze.status(), GameStatus::Lost);

    // Nothing happens once the game is lost.
    assert_eq!(maze.apply(Move::RIGHT), StepOutcome::default());
    assert_eq!(maze.lives(), 0);

    maze.reset();
    assert_eq!(maze.lives(), STARTING_LIVES);
    assert_eq!(maze.status(), GameStatus::Running);
}

#[test]
fn test_unlocked_exit_is_no_hunger_death() {
    let mut maze = Maze::parse("XXXXX\nXEoSX\nXXXXX").unwrap();
    assert!(maze.apply(Move::RIGHT).unlocked_exit);
    let outcome = maze.apply(Move::RIGHT);
    assert!(outcome.won && !outcome.starved);
    assert_eq!(maze.lives(), STARTING_LIVES);
}

#[test]
fn test_diagonal_toward_locked_exit_is_just_refused() {
    let mut maze = Maze::fallback();
    let outcome = maze.apply(Move { d_col: 1, d_row: 1 });
    assert_eq!(outcome, StepOutcome::default());
    assert_eq!(maze.lives(), STARTING_LIVES);
}

#[test]
fn test_reset_restores_food() {
    let mut maze = Maze::fallback();
    maze.apply(Move::DOWN);
    assert!(maze.is_exit_unlocked());

    maze.reset();
    assert_eq!(maze.foods_left(), 1);
    assert_eq!(maze.cell(Position::new(2, 1)), Cell::Food);
    assert!(!maze.is_exit_unlocked());
    assert_eq!(maze.agent_position(), maze.start());
    assert_eq!(maze.score(), 0);
}

// ============== Generator ==============

fn reachable_from(layout: &Grid<Cell>, start: Position) -> usize {
    let mut seen = Grid::new(layout.rows(), layout.cols(), false);
    let mut queue = VecDeque::from([start]);
    seen.set(start, true);
    let mut count = 0;
    while let Some(pos) = queue.pop_front() {
        count += 1;
        for next in pos.neighbors() {
            if layout.get(next).is_some_and(|&c| c != Cell::Wall) && !seen[next] {
                seen.set(next, true);
                queue.push_back(next);
            }
        }
    }
    count
}

#[test]
fn test_generate_is_deterministic_per_seed() {
    let a = Maze::generate(9, 11, 3, &mut StdRng::seed_from_u64(7)).unwrap();
    let b = Maze::generate(9, 11, 3, &mut StdRng::seed_from_u64(7)).unwrap();
    assert_eq!(a.layout(), b.layout());
}

#[test]
fn test_generated_maze_is_well_formed() {
    for seed in 0..20 {
        let maze = Maze::generate(11, 13, 4, &mut StdRng::seed_from_u64(seed)).unwrap();
        let layout = maze.layout();
        let (rows, cols) = maze.dimensions();

        assert_eq!(maze.start(), Position::new(1, 1));
        assert_eq!(maze.total_food(), 4);
        assert_eq!(layout.iter().filter(|(_, &c)| c == Cell::Exit).count(), 1);

        for (pos, &cell) in layout.iter() {
            if pos.row == 0 || pos.col == 0 || pos.row == rows - 1 || pos.col == cols - 1 {
                assert_eq!(cell, Cell::Wall, "seed {seed}: border cell {pos} is open");
            }
        }

        let (exit, _) = layout.iter().find(|(_, &c)| c == Cell::Exit).unwrap();
        let exits = exit
            .neighbors()
            .filter(|&n| layout.get(n).is_some_and(|&c| c != Cell::Wall))
            .count();
        assert_eq!(exits, 1, "seed {seed}: exit {exit} is not a dead end");

        let open = layout.iter().filter(|(_, &c)| c != Cell::Wall).count();
        assert_eq!(reachable_from(layout, maze.start()), open, "seed {seed}");
    }
}

#[test]
fn test_generate_even_dimensions() {
    let maze = Maze::generate(8, 10, 2, &mut StdRng::seed_from_u64(3)).unwrap();
    assert_eq!(maze.dimensions(), (8, 10));
    assert_eq!(maze.total_food(), 2);
}

#[test]
fn test_generate_rejects_bad_requests() {
    let mut rng = StdRng::seed_from_u64(1);
    assert!(matches!(
        Maze::generate(2, 9, 0, &mut rng),
        Err(Error::Generate { rows: 2, .. })
    ));
    assert!(matches!(
        Maze::generate(5, 5, 100, &mut rng),
        Err(Error::Generate { .. })
    ));
}
