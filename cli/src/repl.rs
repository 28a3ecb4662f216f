// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use crate::config::Config;
use crate::fmt::eval_line;
use crate::CaliperHelper;
use eyre::Result;
use rustyline::{config::Configurer, error::ReadlineError, CompletionType, Editor};
use std::io::{BufRead, ErrorKind};

pub fn noninteractive<T: BufRead>(mut f: T, config: &Config, show_prompt: bool) -> Result<bool> {
    use std::io::{stdout, Write};

    let mut ok = true;
    let mut line = String::new();
    loop {
        if show_prompt {
            print!("{}", config.caliper.prompt);
        }
        stdout().flush().unwrap();
        if f.read_line(&mut line).is_err() {
            return Ok(ok);
        }
        // a line without a trailing newline means the reader hit EOF
        if line.find('\n').is_none() {
            return Ok(ok);
        }
        let (output, success) = eval_line(config, line.trim());
        println!("{}", output);
        ok &= success;
        line.clear();
    }
}

pub const HELP_TEXT: &str = "\
Enter an expression like `5m + 3cm` or `12 kg*m/s^2`.
Tab completes unit names. To quit, type `quit` or press Ctrl+D.";

pub fn interactive(config: &Config) -> Result<()> {
    let mut rl = Editor::<CaliperHelper>::new();
    rl.set_helper(Some(CaliperHelper));
    rl.set_completion_type(CompletionType::List);

    let mut hpath = dirs::data_local_dir().map(|mut path| {
        path.push("caliper");
        path.push("history.txt");
        path
    });
    if let Some(ref mut path) = hpath {
        match rl.load_history(path) {
            // Ignore file not found errors.
            Err(ReadlineError::Io(ref err)) if err.kind() == ErrorKind::NotFound => (),
            Err(err) => eprintln!("Loading history failed: {}", err),
            Ok(()) => (),
        };
    }

    let save_history = |rl: &mut Editor<CaliperHelper>| {
        if let Some(ref path) = hpath {
            // ignore error - if this fails, the next line will as well.
            let _ = std::fs::create_dir_all(path.parent().unwrap());
            rl.save_history(path).unwrap_or_else(|e| {
                eprintln!("Saving history failed: {}", e);
            });
        }
    };

    loop {
        let readline = rl.readline(&config.caliper.prompt);
        match readline {
            Ok(ref line) if line == "help" => {
                println!("{}", HELP_TEXT);
            }
            Ok(ref line) if line == "quit" || line == ":q" || line == "exit" => {
                save_history(&mut rl);
                break;
            }
            Ok(line) => {
                rl.add_history_entry(&line);
                let (output, _) = eval_line(config, line.trim());
                println!("{}", output);
            }
            Err(ReadlineError::Interrupted) => {}
            Err(ReadlineError::Eof) => {
                save_history(&mut rl);
                break;
            }
            Err(err) => {
                println!("{:?}", eyre::eyre!(err).wrap_err("Readline"));
                break;
            }
        }
    }

    Ok(())
}
