pub const DEFAULT_STACK_SIZE: usize = 100;
pub const DEFAULT_MEMORY_SIZE: usize = 10;

// bytes per cell in the binary program format
pub const WORD_SIZE: usize = 8;

pub const MAGIC: &[u8; 4] = b"SVM1";

/// What ADD, SUB and MUL do when the result does not fit in a `Word`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overflow {
    /// Two's-complement wrap-around.
    Wrap,
    /// Fail the run with `Fault::ArithmeticOverflow`.
    Trap,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub stack_size: usize,
    pub memory_size: usize,

    /// Upper bound on executed instructions, `None` runs until HALT or a fault.
    pub max_steps: Option<u64>,

    /// Emit a trace line before every instruction.
    pub trace: bool,

    pub overflow: Overflow,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            stack_size: DEFAULT_STACK_SIZE,
            memory_size: DEFAULT_MEMORY_SIZE,
            max_steps: None,
            trace: true,
            overflow: Overflow::Wrap,
        }
    }
}
