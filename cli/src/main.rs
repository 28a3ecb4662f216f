// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use clap::{Arg, ArgAction, Command};
use eyre::{Result, WrapErr};
use std::fs::File;
use std::io::{stdin, BufReader};
use std::process::ExitCode;

use caliper::{config, fmt, repl};

fn main() -> Result<ExitCode> {
    let matches = Command::new("Caliper")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Dimensioned-quantity calculator")
        .arg(
            Arg::new("EXPR")
                .help("Evaluate a list of expressions. If no arguments are provided, an interactive session will start.")
                .num_args(..)
                .required(false),
        )
        .arg(
            Arg::new("file")
                .short('f')
                .long("file")
                .help("Reads expressions from a file"),
        )
        .arg(
            Arg::new("config-path")
                .long("config-path")
                .help("Prints a path to the config file, then exits")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .num_args(1)
                .long("config")
                .action(ArgAction::Set)
                .help("Set path to config.toml"),
        )
        .get_matches();

    color_eyre::install()?;
    let config = config::read_config(matches.get_one::<String>("config").map(|s| &**s))?;

    if matches.get_flag("config-path") {
        println!("{}", config::config_toml_path()?.display());
        Ok(ExitCode::SUCCESS)
    } else if let Some(filename) = matches.get_one::<String>("file") {
        let ok = match &filename[..] {
            "-" => {
                let stdin_handle = stdin();
                repl::noninteractive(stdin_handle.lock(), &config, false)?
            }
            _ => {
                let file = File::open(&filename)
                    .wrap_err(format!("Failed to open input file `{}`", filename))?;
                repl::noninteractive(BufReader::new(file), &config, false)?
            }
        };
        Ok(if ok {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        })
    } else if let Some(exprs) = matches.get_many::<String>("EXPR") {
        let mut exit_code = ExitCode::SUCCESS;
        for expr in exprs {
            println!("> {}", expr);
            let (output, ok) = fmt::eval_line(&config, expr);
            println!("{}", output);
            if !ok {
                exit_code = ExitCode::FAILURE;
            }
        }
        Ok(exit_code)
    } else {
        repl::interactive(&config)?;
        Ok(ExitCode::SUCCESS)
    }
}
