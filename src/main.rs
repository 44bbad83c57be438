// gck: compile a source file and browse its AST

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::Level;

use gck::frontend::{self, Frontend, SYNTAXES};
use gck::ui::App;

#[derive(Parser)]
#[command(name = "gck")]
#[command(about = "Compile a program and show its AST beside the source")]
struct Args {
    /// Source file to compile
    file: PathBuf,

    /// Surface syntax of the file
    #[arg(short, long, default_value = "myrmidon")]
    syntax: String,

    /// Print the AST (or the diagnostics) instead of opening the viewer
    #[arg(short, long)]
    dump: bool,

    /// Log compiler activity to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let Some(driver) = frontend::by_name(&args.syntax) else {
        eprintln!("Error: unknown syntax '{}'", args.syntax);
        eprintln!("Available syntaxes: {}", SYNTAXES.join(", "));
        return Ok(ExitCode::FAILURE);
    };

    let source = match fs::read_to_string(&args.file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", args.file.display(), e);
            return Ok(ExitCode::FAILURE);
        }
    };

    if args.dump {
        return Ok(dump(driver.as_ref(), &source));
    }

    let mut app = App::new(source, driver.as_ref());

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

/// Print the outline of the tree, or the first diagnostic
fn dump(driver: &dyn Frontend, source: &str) -> ExitCode {
    if let Err(err) = driver.compile(source) {
        eprintln!("{}", err);
        return ExitCode::FAILURE;
    }
    match driver.ast() {
        Ok(tree) => {
            print!("{}", tree.outline());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
