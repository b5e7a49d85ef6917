use crate::engines::generation::Genome;
use crate::engines::simulation::Opcode;
use crate::error::{Result, SimSnakeError};
use std::collections::HashMap;
use std::path::Path;

/// Output of a successful assembly
#[derive(Debug)]
pub struct Assembly {
    pub genome: Genome,
    pub labels: HashMap<String, usize>,
    /// Non-fatal problems, currently duplicate label definitions
    pub warnings: Vec<SimSnakeError>,
}

struct PendingReference {
    address: usize,
    label: String,
    absolute: bool,
}

/// Text format for hand-written genomes.
///
/// Tokens are whitespace separated and `;` starts a comment that runs to the
/// end of the line. Each token is, in order of priority:
///
/// 1. an opcode mnemonic (case-sensitive, e.g. `GoRight`)
/// 2. a signed decimal `i32` literal
/// 3. a label definition `name:`, bound to the current genome length
/// 4. a label reference, only directly after `IfJmp`, `Jmp` or `SetJmp`
///
/// Label names are case-insensitive. A reference after `IfJmp`/`Jmp` becomes
/// the relative offset `target - reference_address + 1`, which is what those
/// jumps add to the pointer of the opcode word; after `SetJmp` it becomes the
/// absolute target.
pub struct Assembler;

impl Assembler {
    pub fn load_file<P: AsRef<Path>>(path: P) -> Result<Assembly> {
        let source = std::fs::read_to_string(path.as_ref())?;
        let assembly = Self::assemble(&source)?;
        for warning in &assembly.warnings {
            log::warn!("{}: {}", path.as_ref().display(), warning);
        }
        Ok(assembly)
    }

    pub fn assemble(source: &str) -> Result<Assembly> {
        let mut genome = Genome::new();
        let mut labels: HashMap<String, usize> = HashMap::new();
        let mut pending: Vec<PendingReference> = Vec::new();
        let mut warnings = Vec::new();
        let mut after_jump: Option<Opcode> = None;

        for (line_index, line) in source.lines().enumerate() {
            let line_no = line_index + 1;
            let code = line.split(';').next().unwrap_or("");

            for token in code.split_whitespace() {
                let previous = after_jump.take();

                if let Some(opcode) = Opcode::from_mnemonic(token) {
                    genome.push(opcode.as_i32());
                    if opcode.is_jump() {
                        after_jump = Some(opcode);
                    }
                } else if let Ok(value) = token.parse::<i32>() {
                    genome.push(value);
                } else if let Some(name) = token.strip_suffix(':') {
                    if name.is_empty() {
                        return Err(SimSnakeError::BadToken {
                            line: line_no,
                            token: token.to_string(),
                        });
                    }
                    let name = name.to_lowercase();
                    if labels.contains_key(&name) {
                        warnings.push(SimSnakeError::DuplicateLabel {
                            line: line_no,
                            label: name,
                        });
                    } else {
                        labels.insert(name, genome.len());
                    }
                } else if let Some(jump) = previous {
                    pending.push(PendingReference {
                        address: genome.len(),
                        label: token.to_lowercase(),
                        absolute: jump == Opcode::SetJmp,
                    });
                    genome.push(0);
                } else {
                    return Err(SimSnakeError::BadToken {
                        line: line_no,
                        token: token.to_string(),
                    });
                }
            }
        }

        for reference in pending {
            let target = *labels.get(&reference.label).ok_or_else(|| {
                SimSnakeError::UnresolvedLabel {
                    label: reference.label.clone(),
                }
            })?;
            genome[reference.address] = if reference.absolute {
                target as i32
            } else {
                target as i32 - reference.address as i32 + 1
            };
        }

        Ok(Assembly {
            genome,
            labels,
            warnings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn op(opcode: Opcode) -> i32 {
        opcode.as_i32()
    }

    #[test]
    fn test_mnemonics_literals_and_comments() {
        let assembly = Assembler::assemble(
            "; header comment\n\
             SetA -12 ; trailing comment\n\
             SetB 7\tAdd\n",
        )
        .unwrap();
        assert_eq!(
            assembly.genome,
            vec![op(Opcode::SetA), -12, op(Opcode::SetB), 7, op(Opcode::Add)]
        );
        assert!(assembly.warnings.is_empty());
    }

    #[test]
    fn test_backward_label_offset() {
        let assembly = Assembler::assemble("Loop: GoRight Jmp loop").unwrap();
        // Jmp at 1, reference at 2: 0 - 2 + 1
        assert_eq!(assembly.genome, vec![op(Opcode::GoRight), op(Opcode::Jmp), -1]);
        assert_eq!(assembly.labels.get("loop"), Some(&0));
    }

    #[test]
    fn test_set_jmp_reference_is_absolute() {
        let assembly = Assembler::assemble("Nop Nop target: SetJmp TARGET").unwrap();
        assert_eq!(assembly.genome, vec![0, 0, op(Opcode::SetJmp), 2]);
    }

    #[test]
    fn test_unknown_token_is_fatal() {
        let err = Assembler::assemble("SetA 1\nMoveSideways").unwrap_err();
        assert!(matches!(err, SimSnakeError::BadToken { line: 2, .. }));
    }

    #[test]
    fn test_label_reference_needs_preceding_jump() {
        let err = Assembler::assemble("here: SetA here").unwrap_err();
        assert!(matches!(err, SimSnakeError::BadToken { .. }));
    }

    #[test]
    fn test_unresolved_label_is_fatal() {
        let err = Assembler::assemble("Jmp nowhere").unwrap_err();
        assert!(matches!(err, SimSnakeError::UnresolvedLabel { ref label } if label == "nowhere"));
    }

    #[test]
    fn test_duplicate_label_keeps_first_definition() {
        let assembly = Assembler::assemble("a: Nop A: Nop Jmp a").unwrap();
        assert_eq!(assembly.labels.get("a"), Some(&0));
        assert_eq!(assembly.warnings.len(), 1);
        assert!(matches!(assembly.warnings[0], SimSnakeError::DuplicateLabel { .. }));
        // Jmp at 2, reference at 3: 0 - 3 + 1
        assert_eq!(assembly.genome[3], -2);
    }

    #[test]
    fn test_literal_out_of_range_is_bad_token() {
        assert!(Assembler::assemble("SetA 4294967296").is_err());
    }
}
