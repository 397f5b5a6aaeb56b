use crate::common::*;
use crate::vm::opcodes::Opcode;
use crate::vm::State;
use std::io;
use std::result;
use thiserror::Error;

pub type Result<T> = result::Result<T, Error>;

/// A fault raised by one of the VM's parts, before the engine attaches
/// the address and opcode it happened at.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Fault {
    #[error("unknown opcode {0}")]
    UnknownOpcode(Word),

    #[error("unexpected end of program")]
    UnexpectedEndOfProgram,

    #[error("stack underflow")]
    StackUnderflow,

    #[error("stack overflow (capacity {capacity})")]
    StackOverflow { capacity: usize },

    #[error("invalid memory address {address} (capacity {capacity})")]
    InvalidMemoryAddress { address: Word, capacity: usize },

    #[error("arithmetic overflow on {lhs} and {rhs}")]
    ArithmeticOverflow { lhs: Word, rhs: Word },

    #[error("step limit of {0} exceeded")]
    StepLimitExceeded(u64),

    #[error("terminated")]
    Terminated,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{fault} at {pc:04}{}", describe_opcode(.opcode))]
    Fault {
        pc: Word,
        opcode: Option<Opcode>,
        fault: Fault,
    },

    #[error("malformed program at {offset:04}: {reason}")]
    MalformedProgram { offset: usize, reason: String },

    #[error("vm is not running ({0:?})")]
    NotRunning(State),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub fn fault(pc: Word, opcode: Option<Opcode>, fault: Fault) -> Error {
        Error::Fault {
            pc: pc,
            opcode: opcode,
            fault: fault,
        }
    }

    pub fn malformed<S: Into<String>>(offset: usize, reason: S) -> Error {
        Error::MalformedProgram {
            offset: offset,
            reason: reason.into(),
        }
    }

    /// The fault kind, if this error aborted a run.
    pub fn as_fault(&self) -> Option<&Fault> {
        match *self {
            Error::Fault { ref fault, .. } => Some(fault),
            _ => None,
        }
    }
}

fn describe_opcode(opcode: &Option<Opcode>) -> String {
    match *opcode {
        Some(opcode) => format!(" ({})", opcode.name()),
        None => String::new(),
    }
}
