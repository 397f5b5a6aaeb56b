use crate::common::*;
use crate::utils::words_to_string;
use crate::vm::opcodes::Opcode;

/// One trace line: address, mnemonic, raw operands and the live stack.
pub fn render(pc: Word, opcode: Opcode, operands: WordsSlice, stack: WordsSlice) -> String {
    format!("{}: {}\t{}\t{}",
            to_addr!(pc),
            opcode.name(),
            words_to_string(operands),
            words_to_string(stack))
}
