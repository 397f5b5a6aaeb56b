use crate::common::*;
use crate::config::{Config, Overflow};
use crate::errors::{Error, Fault, Result};
use crate::utils::words_to_string;
use std::convert::TryFrom;
use std::fmt;
use std::io::Write;
use std::num::Wrapping;
use std::result;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

pub mod instruction;
pub mod memory;
pub mod opcodes;
pub mod program;
pub mod stack;
pub mod trace;


use self::instruction::Instruction;
use self::memory::Memory;
use self::opcodes::Opcode;
use self::program::Program;
use self::stack::Stack;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum State {
    Running,
    Halted,
    Faulted,
}

/// What the cycle has to do after an instruction was dispatched.
enum Effect {
    Continue,
    Print(Word),
    Halt,
}

pub struct VM<W: Write> {
    output: W,

    program: Program,
    config: Config,

    pc: Word,
    stack: Stack,
    memory: Memory,

    state: State,
    steps: u64,

    termination_scheduled: Option<Arc<AtomicBool>>,
}

impl<W: Write> VM<W> {
    pub fn new(output: W, program: Program) -> Self {
        Self::with_config(output, program, Config::default())
    }

    pub fn with_config(output: W, program: Program, config: Config) -> Self {
        let stack = Stack::new(config.stack_size);
        let memory = Memory::new(config.memory_size);

        VM {
            output: output,
            program: program,
            config: config,
            pc: 0,
            stack: stack,
            memory: memory,
            state: State::Running,
            steps: 0,
            termination_scheduled: None,
        }
    }

    /// The run stops with `Fault::Terminated` at the first fetch after
    /// `termination_scheduled` is set.
    pub fn with_termination(mut self, termination_scheduled: Arc<AtomicBool>) -> Self {
        self.termination_scheduled = Some(termination_scheduled);
        self
    }

    pub fn run(&mut self) -> Result<()> {
        while self.step()? == State::Running {}
        info!("halted after {} steps", self.steps);
        Ok(())
    }

    /// Runs one fetch-trace-dispatch cycle. A faulted VM is never resumed.
    pub fn step(&mut self) -> Result<State> {
        if self.state != State::Running {
            return Err(Error::NotRunning(self.state));
        }

        match self.cycle() {
            Ok(state) => Ok(state),
            Err(e) => {
                error!("{}", e);
                self.state = State::Faulted;
                Err(e)
            }
        }
    }

    /// Renders the trace line of the next instruction without executing it.
    pub fn trace(&self) -> Result<String> {
        let (opcode, operands) = self.decode()?;
        Ok(trace::render(self.pc, opcode, operands, self.stack()))
    }

    pub fn pc(&self) -> Word {
        self.pc
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    pub fn stack(&self) -> WordsSlice {
        self.stack.as_slice()
    }

    pub fn stack_pointer(&self) -> Option<usize> {
        self.stack.pointer()
    }

    pub fn memory(&self) -> WordsSlice {
        self.memory.cells()
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn cycle(&mut self) -> Result<State> {
        let pc = self.pc;
        self.check_limits().map_err(|fault| Error::fault(pc, None, fault))?;

        let (instruction, line) = {
            let (opcode, operands) = self.decode()?;
            debug!("fetch {:?}", self);

            let line = if self.config.trace {
                Some(trace::render(pc, opcode, operands, self.stack()))
            } else {
                None
            };

            (Instruction::decode(opcode, operands), line)
        };
        debug!("decode {:?}", instruction);

        if let Some(line) = line {
            writeln!(self.output, "{}", line)?;
        }

        let opcode = instruction.opcode();
        self.pc = pc + 1 + opcode.arity() as Word;
        self.steps += 1;

        let effect = self.execute(instruction)
            .map_err(|fault| Error::fault(pc, Some(opcode), fault))?;

        match effect {
            Effect::Continue => (),
            Effect::Print(value) => writeln!(self.output, "{}", value)?,
            Effect::Halt => {
                self.state = State::Halted;
                self.memory.dump(&mut self.output)?;
                self.output.flush()?;
            }
        }

        Ok(self.state)
    }

    fn check_limits(&self) -> result::Result<(), Fault> {
        if let Some(ref termination_scheduled) = self.termination_scheduled {
            if termination_scheduled.load(Ordering::Relaxed) {
                warn!("terminating at {}", to_addr!(self.pc));
                return Err(Fault::Terminated);
            }
        }

        if let Some(limit) = self.config.max_steps {
            if self.steps >= limit {
                return Err(Fault::StepLimitExceeded(limit));
            }
        }

        Ok(())
    }

    fn decode(&self) -> Result<(Opcode, WordsSlice)> {
        let pc = self.pc;
        self.program
            .fetch(pc)
            .map_err(|fault| Error::fault(pc, self.opcode_at(pc), fault))
    }

    fn opcode_at(&self, pc: Word) -> Option<Opcode> {
        usize::try_from(pc)
            .ok()
            .and_then(|index| self.program.code().get(index))
            .and_then(|&word| Opcode::from_word(word))
    }

    fn execute(&mut self, instruction: Instruction) -> result::Result<Effect, Fault> {
        debug!("execute {:?}", instruction);

        match instruction {
            Instruction::Push(value) => self.stack.push(value)?,
            Instruction::Pop => {
                self.stack.pop()?;
            }
            Instruction::Add => {
                self.arithmetic(|a, b| (Wrapping(a) + Wrapping(b)).0, Word::checked_add)?
            }
            Instruction::Sub => {
                self.arithmetic(|a, b| (Wrapping(a) - Wrapping(b)).0, Word::checked_sub)?
            }
            Instruction::Mul => {
                self.arithmetic(|a, b| (Wrapping(a) * Wrapping(b)).0, Word::checked_mul)?
            }
            Instruction::Print => {
                let value = self.stack.pop()?;
                return Ok(Effect::Print(value));
            }
            Instruction::Jmp(address) => self.pc = address,
            Instruction::JmpLt { value, address } => {
                if self.stack.peek()? < value {
                    self.pc = address;
                }
            }
            Instruction::JmpGt { value, address } => {
                if self.stack.peek()? > value {
                    self.pc = address;
                }
            }
            Instruction::JmpEq { value, address } => {
                if self.stack.peek()? == value {
                    self.pc = address;
                }
            }
            Instruction::Load(address) => {
                let value = self.memory.load(address)?;
                self.stack.push(value)?;
            }
            Instruction::Store(address) => {
                let value = self.stack.pop()?;
                self.memory.store(address, value)?;
            }
            Instruction::Halt => return Ok(Effect::Halt),
        }

        Ok(Effect::Continue)
    }

    // b is on top, so it is popped first
    fn arithmetic(&mut self,
                  wrapping: fn(Word, Word) -> Word,
                  checked: fn(Word, Word) -> Option<Word>)
                  -> result::Result<(), Fault> {
        let b = self.stack.pop()?;
        let a = self.stack.pop()?;

        let value = match self.config.overflow {
            Overflow::Wrap => wrapping(a, b),
            Overflow::Trap => {
                checked(a, b).ok_or(Fault::ArithmeticOverflow { lhs: a, rhs: b })?
            }
        };

        debug_assert_lt!(self.stack.as_slice().len(), self.stack.capacity());
        self.stack.push(value)
    }
}

impl<W: Write> fmt::Debug for VM<W> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "PC={} SP={:?} state={:?} steps={} stack={} memory={}",
               to_addr!(self.pc),
               self.stack.pointer(),
               self.state,
               self.steps,
               words_to_string(self.stack()),
               words_to_string(self.memory()))
    }
}
