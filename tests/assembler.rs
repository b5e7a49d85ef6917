use rand::rngs::StdRng;
use rand::SeedableRng;
use simsnake::data::Assembler;
use simsnake::engines::simulation::{Board, Interpreter, Opcode, StepOutcome};
use simsnake::types::{Fault, Position};
use std::path::PathBuf;

fn empty_board(size: usize) -> Board {
    let mut board = Board::new(size, 20, StdRng::seed_from_u64(5));
    board.clear_pellets();
    board
}

fn script(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scripts").join(name)
}

#[test]
fn test_forward_jump_lands_on_label() {
    let assembly = Assembler::assemble(
        "Jmp skip\n\
         GoLeft\n\
         skip: GoRight\n",
    )
    .unwrap();
    let target = assembly.labels["skip"];
    assert_eq!(target, 3);

    let mut vm = Interpreter::new(&assembly.genome, empty_board(8));
    assert_eq!(vm.step(), StepOutcome::Continued);
    assert_eq!(vm.ip(), target as i32);
    assert_eq!(vm.step(), StepOutcome::Moved);
    assert_eq!(vm.board().head(), Position::new(5, 4));
}

#[test]
fn test_conditional_jump_both_ways() {
    let source = |a: i32| {
        format!(
            "SetA {}\n\
             IfJmp east\n\
             GoLeft\n\
             east: GoRight\n",
            a
        )
    };

    let taken = Assembler::assemble(&source(1)).unwrap();
    let mut vm = Interpreter::new(&taken.genome, empty_board(8));
    vm.step();
    vm.step();
    assert_eq!(vm.ip(), taken.labels["east"] as i32);

    let skipped = Assembler::assemble(&source(0)).unwrap();
    let mut vm = Interpreter::new(&skipped.genome, empty_board(8));
    vm.step();
    vm.step();
    assert_eq!(vm.ip(), 4);
    assert_eq!(vm.step(), StepOutcome::Moved);
    assert_eq!(vm.board().head(), Position::new(3, 4));
}

#[test]
fn test_set_jmp_goes_to_absolute_label() {
    let assembly = Assembler::assemble("Nop SetJmp there GoUp there: GoDown").unwrap();
    let mut vm = Interpreter::new(&assembly.genome, empty_board(8));
    vm.step();
    vm.step();
    assert_eq!(vm.ip(), assembly.labels["there"] as i32);
}

#[test]
fn test_seed_scripts_assemble() {
    for name in ["go_right.asm", "left_right_cycle.asm", "edge_walk.asm", "scan_fill.asm"] {
        let assembly = Assembler::load_file(script(name))
            .unwrap_or_else(|e| panic!("{} failed to assemble: {}", name, e));
        assert!(!assembly.genome.is_empty(), "{} is empty", name);
        assert!(assembly.warnings.is_empty(), "{} has warnings", name);
    }
}

#[test]
fn test_go_right_script_hits_the_wall() {
    let assembly = Assembler::load_file(script("go_right.asm")).unwrap();
    assert_eq!(assembly.genome[0], Opcode::GoRight.as_i32());

    let mut vm = Interpreter::new(&assembly.genome, empty_board(8));
    let fault = loop {
        if let StepOutcome::Faulted(fault) = vm.step() {
            break fault;
        }
    };
    assert_eq!(fault, Fault::OutOfBoard);
    assert_eq!(vm.moves(), 3);
}

#[test]
fn test_edge_walk_reaches_the_top_edge() {
    let assembly = Assembler::load_file(script("edge_walk.asm")).unwrap();
    let mut vm = Interpreter::new(&assembly.genome, empty_board(8));

    let mut moves = 0;
    while moves < 4 {
        match vm.step() {
            StepOutcome::Moved => moves += 1,
            StepOutcome::Continued => {}
            StepOutcome::Faulted(fault) => panic!("unexpected fault {}", fault),
        }
    }
    // Four moves up from the center, then the walk turns right
    assert_eq!(vm.board().head(), Position::new(4, 0));
}
