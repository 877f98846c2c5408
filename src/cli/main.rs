/*!
A simple CLI interface to the library.

# Use

```sh
lidrup-check [options] [icnf] lidrup
```

With two files the interaction is cross-checked against the proof, line by line.
With one file the proof is checked on its own, and its interaction lines are taken on trust.

## Options

No option is required.
Though, of note:

- `--no-reuse` forbids a proof from ever reusing a clause identifier.
- `--pedantic` requires headers and conclusions which are otherwise optional.

For full documentation of the supported options, see the source of [cli] or pass `--help`.

## Exit codes

- `0` on full verification.
- `1` on any parse, check, or line error.
- `2` on a usage error.
*/

use std::{fs::File, path::PathBuf};

use clap::{value_parser, Arg, ArgAction, ArgGroup, Command};

use lidrup_check::{
    checker::Checker,
    config::{Config, Mode},
    types::err::ErrorKind,
};

/// The command, its options, and their help text.
fn cli() -> Command {
    Command::new("lidrup-check")
        .about("Checks incremental SAT solver proofs written in the LIDRUP format")
        .version(env!("CARGO_PKG_VERSION"))

        .arg(Arg::new("files")
            .required(true)
            .num_args(1..=2)
            .value_parser(value_parser!(PathBuf))
            .help("The interaction (icnf) and proof (lidrup) files, or the proof file alone."))

        .arg(Arg::new("quiet")
            .short('q')
            .long("quiet")
            .action(ArgAction::SetTrue)
            .help("Limit output to errors."))

        .arg(Arg::new("verbose")
            .short('v')
            .long("verbose")
            .action(ArgAction::Count)
            .help("Increase verbosity, once per occurrence."))

        .arg(Arg::new("logging")
            .short('l')
            .long("logging")
            .action(ArgAction::SetTrue)
            .help("Install a logger at the maximum level.")
            .long_help("Install a logger at the maximum level.

Logging is compiled out of release builds, and so requires a debug build.
Without this option a logger is still installed, following the RUST_LOG environment variable."))

        .arg(Arg::new("no_reuse")
            .short('n')
            .long("no-reuse")
            .action(ArgAction::SetTrue)
            .help("Forbid reusing clause identifiers, ever.")
            .long_help("Forbid reusing clause identifiers, ever.

By default an identifier may be used again once the clause holding it has been deleted."))

        .arg(Arg::new("strict")
            .long("strict")
            .action(ArgAction::SetTrue)
            .help("Check strictly (the default): headers are optional, conclusions are required."))

        .arg(Arg::new("relaxed")
            .long("relaxed")
            .action(ArgAction::SetTrue)
            .help("Tolerate a proof which omits conclusions (reported, not part-checked)."))

        .arg(Arg::new("pedantic")
            .long("pedantic")
            .action(ArgAction::SetTrue)
            .help("Require headers and interaction conclusions."))

        .group(ArgGroup::new("mode")
            .args(["strict", "relaxed", "pedantic"])
            .multiple(false))
}

/// Entrypoint to the CLI.
fn main() {
    let matches = cli().get_matches();

    let mut config = Config::default();

    if matches.get_flag("quiet") {
        config.verbosity = -1;
    } else {
        config.verbosity += matches.get_count("verbose") as i8;
    }

    config.no_reuse = matches.get_flag("no_reuse");

    config.mode = match (matches.get_flag("relaxed"), matches.get_flag("pedantic")) {
        (true, _) => Mode::Relaxed,
        (_, true) => Mode::Pedantic,
        _ => Mode::Strict,
    };

    match matches.get_flag("logging") {
        true => {
            if !cfg!(debug_assertions) {
                eprintln!("c logging requires a debug build");
            }
            env_logger::Builder::new()
                .filter_level(log::LevelFilter::Trace)
                .init();
        }
        false => env_logger::init(),
    }

    let files: Vec<PathBuf> = matches
        .get_many::<PathBuf>("files")
        .expect("files are required")
        .cloned()
        .collect();

    let (icnf_path, lidrup_path) = match files.as_slice() {
        [lidrup] => (None, lidrup.clone()),
        [icnf, lidrup] => (Some(icnf.clone()), lidrup.clone()),
        _ => unreachable!("clap bounds the file count"),
    };

    if config.verbosity >= 0 {
        println!("c lidrup-check version {}", env!("CARGO_PKG_VERSION"));
        if let Some(icnf) = &icnf_path {
            println!("c reading interaction from '{}'", icnf.display());
        }
        println!("c reading proof from '{}'", lidrup_path.display());
        println!("c checking in {} mode", config.mode);
    }

    let icnf = match &icnf_path {
        None => None,
        Some(path) => match File::open(path) {
            Ok(file) => Some(file),
            Err(e) => {
                eprintln!("lidrup-check: error: could not open '{}': {e}", path.display());
                std::process::exit(1);
            }
        },
    };

    let lidrup = match File::open(&lidrup_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!(
                "lidrup-check: error: could not open '{}': {e}",
                lidrup_path.display()
            );
            std::process::exit(1);
        }
    };

    let verbosity = config.verbosity;
    let mut checker = Checker::new(config);

    match checker.check(icnf, lidrup) {
        Ok(()) => {
            if verbosity >= 0 {
                print!("{}", checker.counters());
                println!(
                    "c {} variables, {} clauses active",
                    checker.atom_db.imported_count(),
                    checker.clause_db.active_count(),
                );
                println!("s VERIFIED");
            }
        }

        Err(e) => {
            if let ErrorKind::Line(line_error) = &e {
                eprintln!("{}", line_error.text);
            }
            eprintln!("lidrup-check: error: {e}");

            if verbosity >= 0 {
                print!("{}", checker.counters());
            }
            std::process::exit(1);
        }
    }
}
