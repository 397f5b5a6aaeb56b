extern crate ctrlc;

extern crate stackvm;

#[macro_use]
extern crate log;
extern crate env_logger;

#[macro_use]
extern crate clap;

use clap::{App, ArgMatches};
use stackvm::{Config, Error, Overflow, Program, VM};
use std::env;
use std::fs::File;
use std::io::{stdout, Read, Write};
use std::process;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

fn main() {
    let matches = App::new("stackvm")
        .about("Runs integer-encoded stack machine programs")
        .args_from_usage("[FILE]                  'Program file, runs the demo program when omitted'
                          -b, --binary            'Read FILE in the binary format'
                          -d, --debug             'Enable debug messages'
                          -q, --quiet             'Do not trace instructions'
                          -l, --list              'Print the program listing and exit'
                          --checked               'Fail on arithmetic overflow instead of wrapping'
                          --stack-size=[N]        'Stack capacity'
                          --memory-size=[N]       'Memory bank capacity'
                          --max-steps=[N]         'Stop after N instructions'")
        .get_matches();

    match do_checked_main(&matches) {
        Ok(_) => (),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    }
}

fn do_checked_main(matches: &ArgMatches) -> Result<(), Error> {
    if matches.is_present("debug") {
        env::set_var("RUST_LOG", "stackvm::vm=debug,error,info,warn");
    }
    let _ = env_logger::try_init();

    let program = load_program(matches)?;

    if matches.is_present("list") {
        print!("{}", program);
        return Ok(());
    }

    let config = config_from(matches);
    debug!("{:?}", config);

    let termination_scheduled = Arc::new(AtomicBool::new(false));
    let r = termination_scheduled.clone();
    let handler = ctrlc::set_handler(move || {
        info!("Terminating...");
        r.store(true, Ordering::Relaxed);
    });
    if let Err(e) = handler {
        warn!("Ctrl-C handler is not installed: {}", e);
    }

    let stdout = stdout();
    let mut vm = VM::with_config(stdout.lock(), program, config)
        .with_termination(termination_scheduled);
    let result = vm.run();
    vm.into_output().flush()?;

    result
}

fn load_program(matches: &ArgMatches) -> Result<Program, Error> {
    let filename = match matches.value_of("FILE") {
        Some(filename) => filename,
        None => return Ok(Program::demo()),
    };

    let mut data = Vec::new();
    let mut file = File::open(filename)?;
    let _ = file.read_to_end(&mut data)?;

    if matches.is_present("binary") {
        Program::from_bytes(&data)
    } else {
        String::from_utf8_lossy(&data).parse()
    }
}

fn config_from(matches: &ArgMatches) -> Config {
    let defaults = Config::default();

    let stack_size = if matches.is_present("stack-size") {
        value_t_or_exit!(matches, "stack-size", usize)
    } else {
        defaults.stack_size
    };

    let memory_size = if matches.is_present("memory-size") {
        value_t_or_exit!(matches, "memory-size", usize)
    } else {
        defaults.memory_size
    };

    let max_steps = if matches.is_present("max-steps") {
        Some(value_t_or_exit!(matches, "max-steps", u64))
    } else {
        None
    };

    let overflow = if matches.is_present("checked") {
        Overflow::Trap
    } else {
        Overflow::Wrap
    };

    Config {
        stack_size: stack_size,
        memory_size: memory_size,
        max_steps: max_steps,
        trace: !matches.is_present("quiet"),
        overflow: overflow,
    }
}
