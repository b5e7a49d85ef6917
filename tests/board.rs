use rand::rngs::StdRng;
use rand::SeedableRng;
use simsnake::engines::simulation::{Board, MoveOutcome};
use simsnake::types::{Cell, Direction, Position};

fn empty_board(size: usize, max_hunger: u32) -> Board {
    let mut board = Board::new(size, max_hunger, StdRng::seed_from_u64(7));
    board.clear_pellets();
    board
}

/// Places a pellet next to the head and eats it
fn grow(board: &mut Board, direction: Direction) {
    board.clear_pellets();
    let target = board.head().step(direction);
    assert!(board.place_pellet(target));
    assert_eq!(board.move_head(direction), MoveOutcome::Ok);
    board.clear_pellets();
}

#[test]
fn test_new_board_layout() {
    let board = Board::new(32, 20, StdRng::seed_from_u64(3));
    assert_eq!(board.head(), Position::new(16, 16));
    assert_eq!(board.snake_len(), 1);
    assert_eq!(board.pellets().len(), 1);

    let pellet = board.pellets()[0];
    assert_eq!(board.cell(pellet), Some(Cell::Pellet));
    assert_ne!(pellet, board.head());
}

#[test]
fn test_eating_spawns_one_pellet_on_empty_cell() {
    let mut board = empty_board(8, 20);
    assert!(board.place_pellet(Position::new(5, 4)));

    assert_eq!(board.move_head(Direction::Right), MoveOutcome::Ok);
    assert_eq!(board.pellets_eaten(), 1);
    assert_eq!(board.snake_len(), 2);
    assert_eq!(board.hunger(), 1);

    assert_eq!(board.pellets().len(), 1);
    let spawned = board.pellets()[0];
    assert!(!board.snake().contains(&spawned));
    assert_eq!(board.cell(spawned), Some(Cell::Pellet));

    let pellet_cells = board.cells().iter().filter(|&&c| c == Cell::Pellet).count();
    assert_eq!(pellet_cells, 1);
}

#[test]
fn test_reversing_into_tail_collides() {
    let mut board = empty_board(8, 20);
    grow(&mut board, Direction::Right);
    assert_eq!(board.snake_len(), 2);

    // The tail would move away this turn, but it is checked first
    assert_eq!(board.move_head(Direction::Left), MoveOutcome::SelfCollision);
    assert_eq!(board.head(), Position::new(5, 4));
}

#[test]
fn test_turning_into_body_collides() {
    let mut board = empty_board(8, 20);
    grow(&mut board, Direction::Right);
    grow(&mut board, Direction::Right);
    grow(&mut board, Direction::Down);
    assert_eq!(board.snake_len(), 4);

    assert_eq!(board.move_head(Direction::Left), MoveOutcome::Ok);
    assert_eq!(board.cell(Position::new(4, 4)), Some(Cell::Empty));
    assert_eq!(board.move_head(Direction::Up), MoveOutcome::SelfCollision);
}

#[test]
fn test_starving_still_moves() {
    let mut board = empty_board(8, 3);
    assert_eq!(board.move_head(Direction::Left), MoveOutcome::Ok);
    assert_eq!(board.move_head(Direction::Right), MoveOutcome::Ok);

    let outcome = board.move_head(Direction::Up);
    assert_eq!(outcome, MoveOutcome::Starved);
    assert!(outcome.relocated());
    assert_eq!(board.head(), Position::new(4, 3));
}

#[test]
fn test_leaving_the_grid() {
    let mut board = empty_board(2, 20);
    assert_eq!(board.head(), Position::new(1, 1));
    assert_eq!(board.move_head(Direction::Down), MoveOutcome::OutOfBoard);
    assert!(!MoveOutcome::OutOfBoard.relocated());
    assert_eq!(board.head(), Position::new(1, 1));
}
