use crate::types::{Cell, Direction, Position};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::VecDeque;

/// Result of one attempted snake movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Ok,
    OutOfBoard,
    SelfCollision,
    /// The move happened, but the hunger budget is spent
    Starved,
}

impl MoveOutcome {
    /// Whether the snake actually changed position
    pub fn relocated(self) -> bool {
        matches!(self, MoveOutcome::Ok | MoveOutcome::Starved)
    }
}

/// The snake's world: a square grid, the snake body and the pellets.
///
/// Invariant: every `Cell::Snake` cell matches exactly one body entry, and
/// pellets never overlap the snake.
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
    snake: VecDeque<Position>,
    pellets: Vec<Position>,
    hunger: u32,
    max_hunger: u32,
    pellets_eaten: u32,
    rng: StdRng,
}

impl Board {
    /// Snake head at the center, one random pellet
    pub fn new(size: usize, max_hunger: u32, rng: StdRng) -> Self {
        let mut board = Self {
            size,
            cells: vec![Cell::Empty; size * size],
            snake: VecDeque::new(),
            pellets: Vec::new(),
            hunger: 0,
            max_hunger,
            pellets_eaten: 0,
            rng,
        };

        let center = (size / 2) as i32;
        let head = Position::new(center, center);
        board.snake.push_back(head);
        board.set_cell(head, Cell::Snake);
        board.spawn_pellet();
        board
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn contains(&self, pos: Position) -> bool {
        let size = self.size as i32;
        (0..size).contains(&pos.x) && (0..size).contains(&pos.y)
    }

    pub fn cell(&self, pos: Position) -> Option<Cell> {
        if self.contains(pos) {
            Some(self.cells[self.offset(pos)])
        } else {
            None
        }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn head(&self) -> Position {
        // The body is never empty: moves only pop the tail after pushing a head
        self.snake.front().copied().unwrap_or_default()
    }

    pub fn snake(&self) -> &VecDeque<Position> {
        &self.snake
    }

    pub fn snake_len(&self) -> usize {
        self.snake.len()
    }

    pub fn pellets(&self) -> &[Position] {
        &self.pellets
    }

    pub fn hunger(&self) -> u32 {
        self.hunger
    }

    pub fn pellets_eaten(&self) -> u32 {
        self.pellets_eaten
    }

    pub fn capacity(&self) -> usize {
        self.size * self.size
    }

    fn offset(&self, pos: Position) -> usize {
        pos.y as usize * self.size + pos.x as usize
    }

    fn set_cell(&mut self, pos: Position, cell: Cell) {
        let offset = self.offset(pos);
        self.cells[offset] = cell;
    }

    /// Removes every pellet from the board
    pub fn clear_pellets(&mut self) {
        for pos in std::mem::take(&mut self.pellets) {
            self.set_cell(pos, Cell::Empty);
        }
    }

    /// Places a pellet on an empty cell; returns `false` if the cell is taken or off-board
    pub fn place_pellet(&mut self, pos: Position) -> bool {
        if self.cell(pos) != Some(Cell::Empty) {
            return false;
        }
        self.pellets.push(pos);
        self.set_cell(pos, Cell::Pellet);
        true
    }

    /// Uniform rejection sampling over the grid until an empty cell is hit
    fn spawn_pellet(&mut self) -> Option<Position> {
        if !self.cells.contains(&Cell::Empty) {
            return None;
        }
        let size = self.size as i32;
        loop {
            let pos = Position::new(self.rng.gen_range(0..size), self.rng.gen_range(0..size));
            if self.place_pellet(pos) {
                return Some(pos);
            }
        }
    }

    pub fn move_head(&mut self, direction: Direction) -> MoveOutcome {
        let head = self.head().step(direction);

        let target = match self.cell(head) {
            Some(cell) => cell,
            None => return MoveOutcome::OutOfBoard,
        };

        // Checked before the tail is vacated, so following your own tail is fatal
        if target == Cell::Snake {
            return MoveOutcome::SelfCollision;
        }

        let ate = target == Cell::Pellet;
        if ate {
            self.hunger = 0;
            self.pellets_eaten += 1;
            self.set_cell(head, Cell::Empty);
            self.pellets.retain(|&p| p != head);
        }

        self.snake.push_front(head);
        self.set_cell(head, Cell::Snake);

        if ate {
            self.spawn_pellet();
        } else if let Some(tail) = self.snake.pop_back() {
            self.set_cell(tail, Cell::Empty);
        }

        self.hunger += 1;
        if self.hunger >= self.max_hunger {
            return MoveOutcome::Starved;
        }

        MoveOutcome::Ok
    }
}
