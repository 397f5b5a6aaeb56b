use crate::common::*;
use crate::errors::Fault;

pub const PUSH: Word = 0x00;
pub const ADD: Word = 0x01;
pub const PRINT: Word = 0x02;
pub const HALT: Word = 0x03;
pub const JMPLT: Word = 0x04;   // top < value
pub const SUB: Word = 0x05;
pub const MUL: Word = 0x06;
pub const STORE: Word = 0x07;   // stack -> memory
pub const LOAD: Word = 0x08;    // memory -> stack
pub const POP: Word = 0x09;
pub const JMP: Word = 0x0a;
pub const JMPGT: Word = 0x0b;   // top > value
pub const JMPEQ: Word = 0x0c;   // top == value

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Opcode {
    Push,
    Add,
    Print,
    Halt,
    JmpLt,
    Sub,
    Mul,
    Store,
    Load,
    Pop,
    Jmp,
    JmpGt,
    JmpEq,
}

/// Every opcode, in numeric order.
pub static CATALOG: [Opcode; 13] = [Opcode::Push,
                                    Opcode::Add,
                                    Opcode::Print,
                                    Opcode::Halt,
                                    Opcode::JmpLt,
                                    Opcode::Sub,
                                    Opcode::Mul,
                                    Opcode::Store,
                                    Opcode::Load,
                                    Opcode::Pop,
                                    Opcode::Jmp,
                                    Opcode::JmpGt,
                                    Opcode::JmpEq];

impl Opcode {
    pub fn from_word(word: Word) -> Option<Opcode> {
        let opcode = match word {
            PUSH => Opcode::Push,
            ADD => Opcode::Add,
            PRINT => Opcode::Print,
            HALT => Opcode::Halt,
            JMPLT => Opcode::JmpLt,
            SUB => Opcode::Sub,
            MUL => Opcode::Mul,
            STORE => Opcode::Store,
            LOAD => Opcode::Load,
            POP => Opcode::Pop,
            JMP => Opcode::Jmp,
            JMPGT => Opcode::JmpGt,
            JMPEQ => Opcode::JmpEq,
            _ => return None,
        };
        Some(opcode)
    }

    pub fn code(self) -> Word {
        match self {
            Opcode::Push => PUSH,
            Opcode::Add => ADD,
            Opcode::Print => PRINT,
            Opcode::Halt => HALT,
            Opcode::JmpLt => JMPLT,
            Opcode::Sub => SUB,
            Opcode::Mul => MUL,
            Opcode::Store => STORE,
            Opcode::Load => LOAD,
            Opcode::Pop => POP,
            Opcode::Jmp => JMP,
            Opcode::JmpGt => JMPGT,
            Opcode::JmpEq => JMPEQ,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Opcode::Push => "push",
            Opcode::Add => "add",
            Opcode::Print => "print",
            Opcode::Halt => "halt",
            Opcode::JmpLt => "jmplt",
            Opcode::Sub => "sub",
            Opcode::Mul => "mul",
            Opcode::Store => "store",
            Opcode::Load => "load",
            Opcode::Pop => "pop",
            Opcode::Jmp => "jmp",
            Opcode::JmpGt => "jmpgt",
            Opcode::JmpEq => "jmpeq",
        }
    }

    /// Number of inline operand cells following the opcode.
    pub fn arity(self) -> usize {
        match self {
            Opcode::Push | Opcode::Jmp | Opcode::Load | Opcode::Store => 1,
            Opcode::JmpLt | Opcode::JmpGt | Opcode::JmpEq => 2,
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Pop | Opcode::Print |
            Opcode::Halt => 0,
        }
    }
}

pub fn lookup(word: Word) -> Result<Opcode, Fault> {
    Opcode::from_word(word).ok_or(Fault::UnknownOpcode(word))
}
