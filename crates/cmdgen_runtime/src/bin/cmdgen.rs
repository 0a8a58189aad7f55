//! cmdgen CLI entry point.

use std::env;
use std::io;
use std::process::ExitCode;

use cmdgen_runtime::{Dataset, Repl, RunConfig, RunMode, Session, format_task};
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {e}\x1b[0m");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), Box<dyn std::error::Error>> {
    let config = RunConfig::from_args(args)?;

    if config.show_help {
        print_help();
        return Ok(());
    }

    if config.show_version {
        println!("cmdgen {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let level = if config.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.parse()?))
        .with_writer(io::stderr)
        .init();

    let mut generator = config.build_generator()?;

    match config.mode {
        RunMode::Interactive => {
            let mut repl = Repl::new(Session::new(generator))?;
            repl.run()?;
        }
        RunMode::Batch { count } => {
            for _ in 0..count {
                let task = generator.generate()?;
                println!("{}\n", format_task(&task, false));
            }
        }
        RunMode::Dataset { count } => {
            let dataset = match count {
                Some(count) => Dataset::random(&mut generator, count)?,
                None => Dataset::exhaustive(&generator, None)?,
            };
            match &config.output {
                Some(path) => {
                    dataset.save(path, config.format)?;
                    eprintln!("wrote {} tasks to {}", dataset.len(), path.display());
                }
                None => dataset.write_to(io::stdout().lock(), config.format)?,
            }
        }
    }
    Ok(())
}

fn print_help() {
    println!(
        "\x1b[1mcmdgen\x1b[0m - GPSR command generator

\x1b[1mUSAGE:\x1b[0m
    cmdgen [OPTIONS]

\x1b[1mOPTIONS:\x1b[0m
    -g, --grammar FILE    Load a grammar file (repeatable; later files are merged in)
    -d, --data FILE       Load the entity catalog from a JSON file
    -s, --seed N          Seed the random source for reproducible output
        --max-depth N     Recursion ceiling (default 1000)
    -n, --count N         Print N random tasks and exit
        --dataset [N]     Export N random tasks, or every task the grammar can produce
        --format FORMAT   Dataset format: json (default) or msgpack
    -o, --output FILE     Write the dataset to FILE instead of standard output
    -v, --verbose         Log at debug level (RUST_LOG also applies)
    -h, --help            Print help information
    -V, --version         Print version information

\x1b[1mEXAMPLES:\x1b[0m
    cmdgen                              Interactive session with the built-in grammar
    cmdgen -g gpsr.txt -d arena.json    Interactive session with your own files
    cmdgen -s 7 -n 10                   Ten reproducible tasks
    cmdgen --dataset 500 -o tasks.json  Export 500 random tasks
    cmdgen --dataset --format msgpack   Export every task as MessagePack

\x1b[1mSESSION COMMANDS:\x1b[0m
    <Enter>              Generate a random task
    path NAME[:I] ...    Generate following the given rule choices
    seed N               Restart the random source from N
    q                    Quit (Ctrl+D also works)"
    );
}
