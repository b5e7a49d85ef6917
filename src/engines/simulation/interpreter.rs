use super::board::{Board, MoveOutcome};
use super::isa::Opcode;
use super::memory::GenomeMemory;
use crate::types::{Fault, Position};

/// What a single `step` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Continued,
    Moved,
    Faulted(Fault),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmState {
    Running,
    Halted(Fault),
}

/// An instruction as seen from one instruction pointer value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoded {
    pub opcode: Opcode,
    pub arg0: i32,
    pub arg1: i32,
}

/// Decodes the instruction at `ip`. Genomes rewrite themselves, so this runs
/// fresh on every step.
pub fn decode(memory: &GenomeMemory, ip: i32) -> Decoded {
    Decoded {
        opcode: Opcode::from_word(memory.get_or_zero(ip)),
        arg0: memory.get_or_zero(ip.wrapping_add(1)),
        arg1: memory.get_or_zero(ip.wrapping_add(2)),
    }
}

/// Two-register VM executing a genome against one board
pub struct Interpreter {
    memory: GenomeMemory,
    ip: i32,
    a: i32,
    b: i32,
    board: Board,
    state: VmState,
    executed: u64,
    moves: u64,
}

impl Interpreter {
    pub fn new(genome: &[i32], board: Board) -> Self {
        Self {
            memory: GenomeMemory::from_genome(genome),
            ip: 0,
            a: 0,
            b: 0,
            board,
            state: VmState::Running,
            executed: 0,
            moves: 0,
        }
    }

    pub fn ip(&self) -> i32 {
        self.ip
    }

    pub fn register_a(&self) -> i32 {
        self.a
    }

    pub fn register_b(&self) -> i32 {
        self.b
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn memory(&self) -> &GenomeMemory {
        &self.memory
    }

    pub fn state(&self) -> VmState {
        self.state
    }

    /// Instructions executed so far
    pub fn executed(&self) -> u64 {
        self.executed
    }

    /// Movements that relocated the snake
    pub fn moves(&self) -> u64 {
        self.moves
    }

    pub fn step(&mut self) -> StepOutcome {
        if let VmState::Halted(fault) = self.state {
            return StepOutcome::Faulted(fault);
        }

        let Decoded { opcode, arg0, arg1 } = decode(&self.memory, self.ip);
        self.executed += 1;

        let mut jumped = false;
        let mut moved = false;
        let mut fault = None;

        match opcode {
            Opcode::Nop => {}
            Opcode::ZeroA => self.a = 0,
            Opcode::ZeroB => self.b = 0,
            Opcode::GetPos => {
                let head = self.board.head();
                self.a = head.x;
                self.b = head.y;
            }
            Opcode::Board => match self.board.cell(Position::new(arg0, arg1)) {
                Some(cell) => self.a = cell.as_i32(),
                None => fault = Some(Fault::OutOfBounds),
            },
            Opcode::BSize => self.a = self.board.size() as i32,
            Opcode::SetA => self.a = arg0,
            Opcode::SetB => self.b = arg0,
            Opcode::Swap => std::mem::swap(&mut self.a, &mut self.b),
            Opcode::ReadA => match self.memory.get(self.a) {
                Some(value) => self.a = value,
                None => fault = Some(Fault::OutOfBounds),
            },
            Opcode::ReadB => match self.memory.get(self.b) {
                Some(value) => self.b = value,
                None => fault = Some(Fault::OutOfBounds),
            },
            Opcode::Write => {
                if !self.memory.set(self.a, self.b) {
                    fault = Some(Fault::OutOfBounds);
                }
            }
            Opcode::Add => self.a = self.a.wrapping_add(self.b),
            Opcode::Sub => self.a = self.a.wrapping_sub(self.b),
            Opcode::Mul => self.a = self.a.wrapping_mul(self.b),
            Opcode::Div => {
                if self.b == 0 {
                    fault = Some(Fault::DivByZero);
                } else {
                    self.a = self.a.wrapping_div(self.b);
                }
            }
            Opcode::Mod => {
                if self.b == 0 {
                    fault = Some(Fault::DivByZero);
                } else {
                    self.a = self.a.wrapping_rem(self.b);
                }
            }
            Opcode::Equal => self.a = (self.a == self.b) as i32,
            Opcode::NE => self.a = (self.a != self.b) as i32,
            Opcode::LT => self.a = (self.a < self.b) as i32,
            Opcode::GT => self.a = (self.a > self.b) as i32,
            Opcode::LTE => self.a = (self.a <= self.b) as i32,
            Opcode::GTE => self.a = (self.a >= self.b) as i32,
            Opcode::And => self.a = (self.a != 0 && self.b != 0) as i32,
            Opcode::Or => self.a = (self.a != 0 || self.b != 0) as i32,
            Opcode::Not => self.a = (self.a == 0) as i32,
            Opcode::IfJmp => {
                if self.a != 0 {
                    self.ip = self.ip.wrapping_add(arg0);
                    jumped = true;
                }
            }
            Opcode::Jmp => {
                self.ip = self.ip.wrapping_add(arg0);
                jumped = true;
            }
            Opcode::SetJmp => {
                self.ip = arg0;
                jumped = true;
            }
            Opcode::GoUp | Opcode::GoDown | Opcode::GoLeft | Opcode::GoRight => {
                if let Some(direction) = opcode.direction() {
                    moved = true;
                    let outcome = self.board.move_head(direction);
                    if outcome.relocated() {
                        self.moves += 1;
                    }
                    fault = match outcome {
                        MoveOutcome::Ok => None,
                        MoveOutcome::OutOfBoard => Some(Fault::OutOfBoard),
                        MoveOutcome::SelfCollision => Some(Fault::SelfCollision),
                        MoveOutcome::Starved => Some(Fault::Starved),
                    };
                }
            }
        }

        if !jumped {
            self.ip = self.ip.wrapping_add(opcode.width());
        }

        // Halting instruction faults win over the live checks, which win over
        // the non-halting divide-by-zero report
        let halting = fault
            .filter(|f| f.halts())
            .or_else(|| self.live_check());
        if let Some(halt) = halting {
            self.state = VmState::Halted(halt);
            return StepOutcome::Faulted(halt);
        }
        if let Some(report) = fault {
            return StepOutcome::Faulted(report);
        }

        if moved {
            StepOutcome::Moved
        } else {
            StepOutcome::Continued
        }
    }

    fn live_check(&self) -> Option<Fault> {
        if !GenomeMemory::contains(self.ip) {
            Some(Fault::OutOfBounds)
        } else if self.board.snake_len() >= self.board.capacity() {
            Some(Fault::BoardFilled)
        } else {
            None
        }
    }
}
