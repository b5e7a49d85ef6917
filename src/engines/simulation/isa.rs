/// Instruction set of the snake VM.
///
/// Opcodes are plain `i32` values stored in genome memory; any word can be read
/// as data or executed as code depending on where the instruction pointer lands.
/// Words outside `0..=32` decode as `Nop`.
use crate::types::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Opcode {
    Nop = 0,
    ZeroA = 1,
    ZeroB = 2,
    GetPos = 3,
    Board = 4,
    BSize = 5,
    SetA = 6,
    SetB = 7,
    Swap = 8,
    ReadA = 9,
    ReadB = 10,
    Write = 11,
    Add = 12,
    Sub = 13,
    Mul = 14,
    Div = 15,
    Mod = 16,
    Equal = 17,
    NE = 18,
    LT = 19,
    GT = 20,
    LTE = 21,
    GTE = 22,
    And = 23,
    Or = 24,
    Not = 25,
    IfJmp = 26,
    Jmp = 27,
    SetJmp = 28,
    GoUp = 29,
    GoDown = 30,
    GoLeft = 31,
    GoRight = 32,
}

pub const OPCODE_COUNT: usize = 33;

/// Indexed by opcode value
pub const ALL_OPCODES: [Opcode; OPCODE_COUNT] = [
    Opcode::Nop,
    Opcode::ZeroA,
    Opcode::ZeroB,
    Opcode::GetPos,
    Opcode::Board,
    Opcode::BSize,
    Opcode::SetA,
    Opcode::SetB,
    Opcode::Swap,
    Opcode::ReadA,
    Opcode::ReadB,
    Opcode::Write,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Mul,
    Opcode::Div,
    Opcode::Mod,
    Opcode::Equal,
    Opcode::NE,
    Opcode::LT,
    Opcode::GT,
    Opcode::LTE,
    Opcode::GTE,
    Opcode::And,
    Opcode::Or,
    Opcode::Not,
    Opcode::IfJmp,
    Opcode::Jmp,
    Opcode::SetJmp,
    Opcode::GoUp,
    Opcode::GoDown,
    Opcode::GoLeft,
    Opcode::GoRight,
];

impl Opcode {
    /// Total decode; unknown values are no-ops
    pub fn from_word(word: i32) -> Self {
        usize::try_from(word)
            .ok()
            .and_then(|index| ALL_OPCODES.get(index).copied())
            .unwrap_or(Opcode::Nop)
    }

    /// Case-sensitive lookup used by the assembler
    pub fn from_mnemonic(token: &str) -> Option<Self> {
        ALL_OPCODES.iter().copied().find(|op| op.mnemonic() == token)
    }

    pub fn as_i32(self) -> i32 {
        self as i32
    }

    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Nop => "Nop",
            Opcode::ZeroA => "ZeroA",
            Opcode::ZeroB => "ZeroB",
            Opcode::GetPos => "GetPos",
            Opcode::Board => "Board",
            Opcode::BSize => "BSize",
            Opcode::SetA => "SetA",
            Opcode::SetB => "SetB",
            Opcode::Swap => "Swap",
            Opcode::ReadA => "ReadA",
            Opcode::ReadB => "ReadB",
            Opcode::Write => "Write",
            Opcode::Add => "Add",
            Opcode::Sub => "Sub",
            Opcode::Mul => "Mul",
            Opcode::Div => "Div",
            Opcode::Mod => "Mod",
            Opcode::Equal => "Equal",
            Opcode::NE => "NE",
            Opcode::LT => "LT",
            Opcode::GT => "GT",
            Opcode::LTE => "LTE",
            Opcode::GTE => "GTE",
            Opcode::And => "And",
            Opcode::Or => "Or",
            Opcode::Not => "Not",
            Opcode::IfJmp => "IfJmp",
            Opcode::Jmp => "Jmp",
            Opcode::SetJmp => "SetJmp",
            Opcode::GoUp => "GoUp",
            Opcode::GoDown => "GoDown",
            Opcode::GoLeft => "GoLeft",
            Opcode::GoRight => "GoRight",
        }
    }

    /// Words consumed by the instruction, opcode included
    pub fn width(self) -> i32 {
        match self {
            Opcode::Board => 3,
            Opcode::SetA | Opcode::SetB | Opcode::IfJmp | Opcode::Jmp | Opcode::SetJmp => 2,
            _ => 1,
        }
    }

    pub fn is_jump(self) -> bool {
        matches!(self, Opcode::IfJmp | Opcode::Jmp | Opcode::SetJmp)
    }

    pub fn direction(self) -> Option<Direction> {
        match self {
            Opcode::GoUp => Some(Direction::Up),
            Opcode::GoDown => Some(Direction::Down),
            Opcode::GoLeft => Some(Direction::Left),
            Opcode::GoRight => Some(Direction::Right),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_matches_discriminants() {
        for (index, op) in ALL_OPCODES.iter().enumerate() {
            assert_eq!(op.as_i32() as usize, index);
            assert_eq!(Opcode::from_word(index as i32), *op);
        }
    }

    #[test]
    fn test_unknown_words_decode_as_nop() {
        assert_eq!(Opcode::from_word(-1), Opcode::Nop);
        assert_eq!(Opcode::from_word(33), Opcode::Nop);
        assert_eq!(Opcode::from_word(i32::MAX), Opcode::Nop);
    }

    #[test]
    fn test_mnemonics_are_case_sensitive() {
        assert_eq!(Opcode::from_mnemonic("GoRight"), Some(Opcode::GoRight));
        assert_eq!(Opcode::from_mnemonic("goright"), None);
        assert_eq!(Opcode::from_mnemonic("NE"), Some(Opcode::NE));
    }
}
