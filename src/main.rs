use clap::Parser;
use digits_core::Notification;
use digits_core::script::Session;
use mimalloc::MiMalloc;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[derive(Parser, Debug)]
#[command(name = "numfield")]
#[command(about = "Replay numeric field sessions and check their expectations")]
struct Args {
    /// Session scripts (TOML) to replay in order
    #[arg(required = true, value_name = "SESSION")]
    sessions: Vec<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let mut failed = false;
    for path in &args.sessions {
        if let Err(err) = replay(path) {
            eprintln!("{}: {err}", path.display());
            failed = true;
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn replay(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let source = std::fs::read_to_string(path)?;
    let session = Session::from_toml_str(&source)?;
    let outcome = session.run()?;
    log::info!("{}: {} steps replayed", path.display(), session.steps.len());

    println!("{}", path.display());
    println!("  value: {:?}", outcome.value);
    for notification in &outcome.notifications {
        match notification {
            Notification::ValueChanged(value) => println!("  value_changed {value:?}"),
            Notification::Change(event) => println!("  change after {event:?}"),
        }
    }
    let vetoes = outcome.vetoes();
    if !vetoes.is_empty() {
        println!("  vetoes: {}", vetoes.join(", "));
    }

    let Some(expect) = &session.expect else {
        return Ok(());
    };
    let mismatches = outcome.mismatches(expect);
    if !mismatches.is_empty() {
        return Err(mismatches.join("; ").into());
    }
    println!("  ok");
    Ok(())
}
