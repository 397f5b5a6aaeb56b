use crate::common::*;
use crate::vm::opcodes::Opcode;

/// An opcode together with its decoded operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Instruction {
    Push(Word),
    Pop,
    Add,
    Sub,
    Mul,
    Print,
    Jmp(Word),
    JmpLt { value: Word, address: Word },
    JmpGt { value: Word, address: Word },
    JmpEq { value: Word, address: Word },
    Load(Word),
    Store(Word),
    Halt,
}

impl Instruction {
    /// `operands` must hold exactly `opcode.arity()` cells.
    pub fn decode(opcode: Opcode, operands: WordsSlice) -> Instruction {
        debug_assert_eq!(opcode.arity(), operands.len());

        match opcode {
            Opcode::Push => Instruction::Push(operands[0]),
            Opcode::Pop => Instruction::Pop,
            Opcode::Add => Instruction::Add,
            Opcode::Sub => Instruction::Sub,
            Opcode::Mul => Instruction::Mul,
            Opcode::Print => Instruction::Print,
            Opcode::Jmp => Instruction::Jmp(operands[0]),
            Opcode::JmpLt => {
                Instruction::JmpLt {
                    value: operands[0],
                    address: operands[1],
                }
            }
            Opcode::JmpGt => {
                Instruction::JmpGt {
                    value: operands[0],
                    address: operands[1],
                }
            }
            Opcode::JmpEq => {
                Instruction::JmpEq {
                    value: operands[0],
                    address: operands[1],
                }
            }
            Opcode::Load => Instruction::Load(operands[0]),
            Opcode::Store => Instruction::Store(operands[0]),
            Opcode::Halt => Instruction::Halt,
        }
    }

    pub fn opcode(&self) -> Opcode {
        match *self {
            Instruction::Push(_) => Opcode::Push,
            Instruction::Pop => Opcode::Pop,
            Instruction::Add => Opcode::Add,
            Instruction::Sub => Opcode::Sub,
            Instruction::Mul => Opcode::Mul,
            Instruction::Print => Opcode::Print,
            Instruction::Jmp(_) => Opcode::Jmp,
            Instruction::JmpLt { .. } => Opcode::JmpLt,
            Instruction::JmpGt { .. } => Opcode::JmpGt,
            Instruction::JmpEq { .. } => Opcode::JmpEq,
            Instruction::Load(_) => Opcode::Load,
            Instruction::Store(_) => Opcode::Store,
            Instruction::Halt => Opcode::Halt,
        }
    }

    pub fn encode(&self, code: &mut Words) {
        code.push(self.opcode().code());

        match *self {
            Instruction::Push(operand) |
            Instruction::Jmp(operand) |
            Instruction::Load(operand) |
            Instruction::Store(operand) => code.push(operand),
            Instruction::JmpLt { value, address } |
            Instruction::JmpGt { value, address } |
            Instruction::JmpEq { value, address } => {
                code.push(value);
                code.push(address);
            }
            Instruction::Pop | Instruction::Add | Instruction::Sub | Instruction::Mul |
            Instruction::Print | Instruction::Halt => (),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vm::opcodes::*;

    #[test]
    fn decode() {
        assert_eq!(Instruction::Push(7), Instruction::decode(Opcode::Push, &[7]));
        assert_eq!(Instruction::Halt, Instruction::decode(Opcode::Halt, &[]));
        assert_eq!(Instruction::JmpGt {
                       value: 10,
                       address: 4,
                   },
                   Instruction::decode(Opcode::JmpGt, &[10, 4]));
    }

    #[test]
    fn encode() {
        let mut code = vec![];
        Instruction::Push(-5).encode(&mut code);
        Instruction::JmpEq {
                value: 3,
                address: 0,
            }
            .encode(&mut code);
        Instruction::Print.encode(&mut code);

        assert_eq!(vec![PUSH, -5, JMPEQ, 3, 0, PRINT], code);
    }
}
