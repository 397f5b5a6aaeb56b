use crate::common::*;
use crate::config::Config;
use crate::errors::Result;
use crate::vm::program::Program;
use crate::vm::VM;

macro_rules! to_addr {
   ($addr:expr) => {
       format!("{:04}", $addr)
   };
}

/// Renders words the way the trace shows them: `[1 2 3]`.
pub fn words_to_string(words: WordsSlice) -> String {
    let items = words.iter()
        .map(|i| i.to_string())
        .collect::<Vec<String>>()
        .join(" ");
    format!("[{}]", items)
}

pub fn test_run(code: Words) -> (Result<()>, String, VM<Data>) {
    test_run_with(code, Config::default())
}

/// Runs unvalidated `code` against an in-memory output buffer.
pub fn test_run_with(code: Words, config: Config) -> (Result<()>, String, VM<Data>) {
    let _ = env_logger::try_init();

    let program = Program::raw(code);
    let output: Data = vec![];

    let mut vm = VM::with_config(output, program, config);
    let result = vm.run();

    let output = String::from_utf8_lossy(vm.output()).into_owned();

    (result, output, vm)
}

/// Like `test_run_with`, with trace lines switched off so only PRINT
/// output and the dump remain.
pub fn test_run_quiet(code: Words) -> (Result<()>, String, VM<Data>) {
    let config = Config { trace: false, ..Config::default() };
    test_run_with(code, config)
}

/// PRINT output of a quiet run, the `DATA:` block excluded.
pub fn printed(output: &str) -> Vec<&str> {
    output.lines()
        .take_while(|line| *line != "DATA:")
        .collect()
}
