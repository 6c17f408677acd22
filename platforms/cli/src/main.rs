use anyhow::{Context, Result};
use beaver::{MachineCatalog, RunConfig, Tape, TuringMachine};
use clap::Parser;

/// Runs a built-in busy beaver machine until it halts.
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
#[clap(after_help = "EXAMPLES:
  beaver-cli bb4 --show-tape
  RUST_LOG=info beaver-cli bb6 --preallocate 204000")]
struct Cli {
    /// Name of the built-in machine to run
    #[clap(default_value = "bb4")]
    machine: String,

    /// Print a progress line every N steps (a power of two)
    #[clap(short, long, default_value_t = 1 << 26)]
    report_interval: u64,

    /// Do not print progress lines
    #[clap(short, long)]
    quiet: bool,

    /// Give up after this many steps if the machine has not halted
    #[clap(short, long)]
    step_limit: Option<u64>,

    /// Number of tape cells to reserve up front
    #[clap(short, long, default_value_t = 0)]
    preallocate: usize,

    /// Print the final tape, marking the head position
    #[clap(short = 't', long)]
    show_tape: bool,

    /// Print the final result as JSON
    #[clap(short, long)]
    json: bool,

    /// List the built-in machines and exit
    #[clap(short, long)]
    list: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    if cli.list {
        return list(cli.json);
    }

    let entry = MachineCatalog::get_by_name(&cli.machine)?;
    let config = RunConfig::default()
        .with_report_interval((!cli.quiet).then_some(cli.report_interval))
        .with_step_limit(cli.step_limit)
        .with_preallocate(cli.preallocate);

    let mut machine = TuringMachine::with_capacity(entry.table.clone(), config.preallocate)?;
    let json = cli.json;
    let outcome = machine
        .run(&config, |progress| {
            // Keep stdout machine-readable in JSON mode.
            if json {
                eprintln!("{}", progress);
            } else {
                println!("{}", progress);
            }
        })
        .with_context(|| format!("failed to run '{}'", cli.machine))?;

    if cli.json {
        println!("{}", serde_json::to_string(&outcome)?);
    } else {
        println!("{}", outcome);
    }

    if cli.show_tape {
        println!("{}", render_tape(machine.tape()));
    }

    if outcome != entry.expected {
        log::warn!(
            "'{}' finished with {} but the known result is {}",
            cli.machine,
            outcome,
            entry.expected
        );
    }

    Ok(())
}

fn list(json: bool) -> Result<()> {
    for index in 0..MachineCatalog::count() {
        let info = MachineCatalog::info(index)?;
        if json {
            println!("{}", serde_json::to_string(&info)?);
        } else {
            println!(
                "{:<5} {} states  {:<40} {}",
                info.name, info.state_count, info.description, info.expected
            );
        }
    }
    Ok(())
}

/// Renders the tape left to right with the head cell in brackets.
fn render_tape(tape: &Tape) -> String {
    let head = (tape.head_offset() + tape.grown_left() as i64) as usize;
    tape.iter()
        .enumerate()
        .map(|(i, value)| {
            if i == head {
                format!("[{}]", value)
            } else {
                value.to_string()
            }
        })
        .collect()
}
