//! uicall - replay UI service calls against a terminal state block
//!
//! Reads a call script (stdin or --script FILE), dispatches each call and
//! prints the register-style result, stopping at RETURN.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::info;

use uicall::config::Config;
use uicall::script::{self, Call};
use uicall::ui::{Serialization, SerializationKind, SingleContext, SpinLocked, UiDispatcher};

fn print_help() {
    println!(
        r#"uicall {} - terminal state service call interface

USAGE:
    uicall [OPTIONS]

OPTIONS:
    -h, --help              Print this help message
    -V, --version           Print version information
    -s, --script FILE       Read calls from FILE instead of stdin
    -c, --config FILE       Use FILE instead of the default config search
    --dump-config           Print the effective config as TOML and exit
    --init-config           Write the default config file and exit

SCRIPT:
    One call per line: OPCODE [ARG]
    OPCODE is a name (SET_FG) or number (0x11); ARG is decimal, 0x hex or #RRGGBB.
    Output per call: "STATUS [VALUE]" (0 = ok, 1 = unknown opcode, 2 = invalid argument)

CONFIG FILE:
    $UICALL_CONFIG, ~/.config/uicall/config.toml, /etc/uicall/config.toml
"#,
        env!("CARGO_PKG_VERSION")
    );
}

/// Value following a flag: `--flag VALUE` or `--flag=VALUE`.
/// A flag given without its value is an error.
fn flag_value<'a>(args: &'a [String], short: &str, long: &str) -> Result<Option<&'a str>> {
    let prefix = format!("{}=", long);
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == short || arg == long {
            return match iter.next() {
                Some(value) if !value.starts_with('-') => Ok(Some(value)),
                _ => bail!("{} requires a value", long),
            };
        }
        if let Some(value) = arg.strip_prefix(&prefix) {
            if value.is_empty() {
                bail!("{} requires a value", long);
            }
            return Ok(Some(value));
        }
    }
    Ok(None)
}

fn read_script(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read script: {}", path)),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read script from stdin")?;
            Ok(text)
        }
    }
}

fn replay<S: Serialization>(config: &Config, calls: &[Call]) -> Result<()> {
    let dispatcher: UiDispatcher<S> = UiDispatcher::new(config.initial_state()?);
    let outcomes = script::run(&dispatcher, calls);
    info!("Dispatched {} of {} calls", outcomes.len(), calls.len());
    script::write_outcomes(&mut std::io::stdout().lock(), &outcomes)?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    // --help
    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    // --version
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("uicall {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.iter().any(|a| a == "--init-config") {
        let path = Config::write_default_config()?;
        println!("Config file generated: {}", path.display());
        return Ok(());
    }

    let config = match flag_value(&args, "-c", "--config")? {
        Some(path) => Config::load_from_file(Path::new(path))?,
        None => Config::load(),
    };

    if args.iter().any(|a| a == "--dump-config") {
        print!("{}", config.to_toml()?);
        return Ok(());
    }

    let text = read_script(flag_value(&args, "-s", "--script")?)?;
    let calls = script::parse(&text)?;
    info!(
        "Replaying {} calls ({:?} mode, {:?} serialization)",
        calls.len(),
        config.display.mode,
        config.dispatch.serialization
    );

    match config.dispatch.serialization {
        SerializationKind::Single => replay::<SingleContext>(&config, &calls),
        SerializationKind::Spin => replay::<SpinLocked>(&config, &calls),
    }
}
