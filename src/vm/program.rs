use byteorder::ByteOrder;
use crate::common::*;
use crate::config::{MAGIC, WORD_SIZE};
use crate::errors::{Error, Fault, Result};
use crate::utils::words_to_string;
use crate::vm::instruction::Instruction;
use crate::vm::opcodes::{self, Opcode};
use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

/// An immutable sequence of cells interleaving opcodes and their operands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Program {
    code: Words,
}

impl Program {
    /// Validates that walking `code` from cell 0 meets only known opcodes
    /// whose operands fit before the end.
    pub fn new(code: Words) -> Result<Program> {
        Self::validate(&code)?;
        Ok(Program { code: code })
    }

    /// Takes `code` as is. The engine still bounds-checks every fetch.
    pub fn raw(code: Words) -> Program {
        Program { code: code }
    }

    pub fn builder() -> Builder {
        Builder::new()
    }

    pub fn from_bytes(data: DataSlice) -> Result<Program> {
        if data.len() < MAGIC.len() || &data[..MAGIC.len()] != MAGIC {
            return Err(Error::malformed(0, "bad magic"));
        }

        let body = &data[MAGIC.len()..];
        if body.len() % WORD_SIZE != 0 {
            let offset = body.len() / WORD_SIZE;
            return Err(Error::malformed(offset, "truncated cell"));
        }

        let code = body.chunks(WORD_SIZE)
            .map(Endian::read_i64)
            .collect::<Words>();

        Self::new(code)
    }

    pub fn to_bytes(&self) -> Data {
        let mut data = Vec::with_capacity(MAGIC.len() + self.code.len() * WORD_SIZE);
        data.extend_from_slice(MAGIC);

        let mut cell = [0; WORD_SIZE];
        for &word in &self.code {
            Endian::write_i64(&mut cell, word);
            data.extend_from_slice(&cell);
        }

        data
    }

    /// The bundled demo program: prints 5, 10 and 88, leaves 88
    /// at address 0.
    pub fn demo() -> Program {
        use crate::vm::opcodes::*;

        #[cfg_attr(rustfmt, rustfmt_skip)]
        let code = vec![
            PUSH, 2,
            PUSH, 3,
            ADD,
            PRINT,                         // 5
            PUSH, 15,
            PUSH, 5,
            SUB,
            PRINT,                         // 10
            PUSH, 3,
            PUSH, 3,                       // 0x0e
            MUL,
            JMPLT, 10, 14,                 // if top < 10: goto 0x0e
            POP,
            PUSH, 88,
            STORE, 0,
            PUSH, 7,
            POP,
            LOAD, 0,
            PRINT,                         // 88
            HALT];

        Program::raw(code)
    }

    pub fn code(&self) -> WordsSlice {
        &self.code
    }

    pub fn len(&self) -> usize {
        self.code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.code.is_empty()
    }

    /// Decodes the opcode at `pc` and returns it with its operand cells.
    pub fn fetch(&self, pc: Word) -> std::result::Result<(Opcode, WordsSlice), Fault> {
        let begin = usize::try_from(pc).map_err(|_| Fault::UnexpectedEndOfProgram)?;
        let word = *self.code.get(begin).ok_or(Fault::UnexpectedEndOfProgram)?;
        let opcode = opcodes::lookup(word)?;

        let operands_begin = begin + 1;
        let operands_end = operands_begin + opcode.arity();
        if operands_end > self.code.len() {
            return Err(Fault::UnexpectedEndOfProgram);
        }

        Ok((opcode, &self.code[operands_begin..operands_end]))
    }

    fn validate(code: WordsSlice) -> Result<()> {
        let mut offset = 0;
        while offset < code.len() {
            let opcode = opcodes::lookup(code[offset])
                .map_err(|fault| Error::malformed(offset, fault.to_string()))?;

            let next = offset + 1 + opcode.arity();
            if next > code.len() {
                let reason = format!("operands of {} run past the end", opcode.name());
                return Err(Error::malformed(offset, reason));
            }

            offset = next;
        }

        Ok(())
    }
}

impl From<Program> for Words {
    fn from(program: Program) -> Words {
        program.code
    }
}

/// Text form: decimal cells separated by whitespace or commas, `#`
/// comments to the end of line.
impl FromStr for Program {
    type Err = Error;

    fn from_str(text: &str) -> Result<Program> {
        let mut code = vec![];

        for line in text.lines() {
            let line = match line.find('#') {
                Some(comment) => &line[..comment],
                None => line,
            };

            let cells = line.split(|c: char| c.is_whitespace() || c == ',')
                .filter(|cell| !cell.is_empty());
            for cell in cells {
                let word = cell.parse::<Word>()
                    .map_err(|_| Error::malformed(code.len(), format!("invalid cell {:?}", cell)))?;
                code.push(word);
            }
        }

        Program::new(code)
    }
}

/// A listing in the trace's layout, one instruction per line.
impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut pc = 0;
        while pc < self.code.len() {
            match self.fetch(pc as Word) {
                Ok((opcode, operands)) => {
                    writeln!(f,
                             "{}: {}\t{}",
                             to_addr!(pc),
                             opcode.name(),
                             words_to_string(operands))?;
                    pc += 1 + operands.len();
                }
                Err(_) => {
                    writeln!(f, "{}: .word\t{}", to_addr!(pc), self.code[pc])?;
                    pc += 1;
                }
            }
        }
        Ok(())
    }
}

pub struct Builder {
    code: Words,
}

impl Builder {
    pub fn new() -> Builder {
        Builder { code: vec![] }
    }

    /// Address the next emitted cell will have.
    pub fn position(&self) -> Word {
        self.code.len() as Word
    }

    pub fn instruction(mut self, instruction: Instruction) -> Builder {
        instruction.encode(&mut self.code);
        self
    }

    /// Emits a raw cell.
    pub fn word(mut self, word: Word) -> Builder {
        self.code.push(word);
        self
    }

    pub fn push(self, value: Word) -> Builder {
        self.instruction(Instruction::Push(value))
    }

    pub fn pop(self) -> Builder {
        self.instruction(Instruction::Pop)
    }

    pub fn add(self) -> Builder {
        self.instruction(Instruction::Add)
    }

    pub fn sub(self) -> Builder {
        self.instruction(Instruction::Sub)
    }

    pub fn mul(self) -> Builder {
        self.instruction(Instruction::Mul)
    }

    pub fn print(self) -> Builder {
        self.instruction(Instruction::Print)
    }

    pub fn jmp(self, address: Word) -> Builder {
        self.instruction(Instruction::Jmp(address))
    }

    pub fn jmplt(self, value: Word, address: Word) -> Builder {
        self.instruction(Instruction::JmpLt {
            value: value,
            address: address,
        })
    }

    pub fn jmpgt(self, value: Word, address: Word) -> Builder {
        self.instruction(Instruction::JmpGt {
            value: value,
            address: address,
        })
    }

    pub fn jmpeq(self, value: Word, address: Word) -> Builder {
        self.instruction(Instruction::JmpEq {
            value: value,
            address: address,
        })
    }

    pub fn load(self, address: Word) -> Builder {
        self.instruction(Instruction::Load(address))
    }

    pub fn store(self, address: Word) -> Builder {
        self.instruction(Instruction::Store(address))
    }

    pub fn halt(self) -> Builder {
        self.instruction(Instruction::Halt)
    }

    pub fn build(self) -> Result<Program> {
        Program::new(self.code)
    }
}

impl Default for Builder {
    fn default() -> Builder {
        Builder::new()
    }
}
