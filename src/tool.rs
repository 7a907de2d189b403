// Copyright (c) 2018 Fabian Schuiki

//! An interactive operator-precedence parser generator.

#[macro_use]
extern crate clap;
#[macro_use]
extern crate log;
extern crate memmap;
extern crate oprec;
extern crate stderrlog;

use std::fs::File;
use std::io::{self, BufRead, Write};
use std::str::{self, FromStr};

use clap::{App, Arg};
use memmap::Mmap;
use oprec::command::parse_line;
use oprec::Session;

const PROMPT: &str = "$> ";

fn main() {
    let matches = App::new(crate_name!())
        .version(crate_version!())
        .author(crate_authors!())
        .about("Builds operator-precedence parsers from grammars entered line by line.")
        .arg(
            Arg::with_name("verbosity")
                .short("v")
                .multiple(true)
                .help("Increase message verbosity"),
        )
        .arg(
            Arg::with_name("quiet")
                .short("q")
                .help("Silence all log output"),
        )
        .arg(
            Arg::with_name("timestamp")
                .short("t")
                .help("Prepend log lines with a timestamp")
                .takes_value(true)
                .possible_values(&["none", "sec", "ms", "ns"]),
        )
        .arg(
            Arg::with_name("SCRIPT")
                .help("A file of commands to run instead of reading from stdin"),
        )
        .get_matches();

    let ts = matches
        .value_of("timestamp")
        .and_then(|v| stderrlog::Timestamp::from_str(v).ok())
        .unwrap_or(stderrlog::Timestamp::Off);
    if let Err(e) = stderrlog::new()
        .module(module_path!())
        .quiet(matches.is_present("quiet"))
        .verbosity(matches.occurrences_of("verbosity") as usize)
        .timestamp(ts)
        .init()
    {
        eprintln!("unable to initialize logging: {}", e);
    }

    let mut session = Session::new();
    let result = match matches.value_of("SCRIPT") {
        Some(path) => run_script(path, &mut session),
        None => run_interactive(&mut session),
    };
    if let Err(e) = result {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

/// Run every line of a script, echoing each command after the prompt.
fn run_script(path: &str, session: &mut Session) -> io::Result<()> {
    let file = File::open(path)?;
    if file.metadata()?.len() == 0 {
        return Ok(());
    }
    let mmap = unsafe { Mmap::map(&file)? };
    let text = str::from_utf8(&mmap).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    info!("running {} lines from {}", text.lines().count(), path);
    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }
        println!("{}{}", PROMPT, line);
        if !run(line, session) {
            break;
        }
    }
    Ok(())
}

/// Read commands from stdin until `EXIT` or end of input.
fn run_interactive(session: &mut Session) -> io::Result<()> {
    println!("Operator-precedence parser generator {}", crate_version!());
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    loop {
        print!("{}", PROMPT);
        io::stdout().flush()?;
        let line = match lines.next() {
            Some(line) => line?,
            None => {
                println!();
                return Ok(());
            }
        };
        if !run(&line, session) {
            return Ok(());
        }
    }
}

/// Execute a single line and report the outcome.
///
/// Returns `false` once the session should end.
fn run(line: &str, session: &mut Session) -> bool {
    let cmd = match parse_line(line) {
        Ok(Some(cmd)) => cmd,
        Ok(None) => return true,
        Err(e) => {
            println!("ERROR: {}", e);
            return true;
        }
    };
    trace!("executing {:?}", cmd);
    match cmd.execute(session) {
        Ok(output) => println!("{}", output),
        Err(e) => println!("ERROR: {}", e),
    }
    !cmd.is_exit()
}
