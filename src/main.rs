//! opsh: interactive line-oriented shell front end.

use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use opsh::config::{AstFormat, Config};
use opsh::logging;
use opsh::shell::{Shell, Step};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

#[derive(Parser)]
#[command(name = "opsh")]
#[command(about = "Line-oriented shell with an operator-precedence parser")]
#[command(version)]
struct Cli {
    /// Configuration file merged over the defaults
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Process one line and exit with its status
    #[arg(short = 'c', value_name = "LINE")]
    command: Option<String>,

    /// Print the merged configuration as TOML and exit
    #[arg(long)]
    dump_config: bool,

    /// Debug logging on stderr
    #[arg(short, long)]
    verbose: bool,

    /// Print the token list of each line
    #[arg(long)]
    tokens: bool,

    /// Parse and show, but do not run commands
    #[arg(long)]
    no_exec: bool,

    /// Show the syntax tree in this format
    #[arg(long, value_enum)]
    format: Option<AstFormat>,
}

fn main() {
    let args = Cli::parse();

    let mut config = Config::load(args.config.as_deref());
    if args.tokens {
        config.settings.show_tokens = true;
    }
    if args.no_exec {
        config.settings.execute = false;
    }
    if let Some(format) = args.format {
        config.settings.show_ast = true;
        config.settings.ast_format = format;
    }

    if args.dump_config {
        match config.to_toml() {
            Ok(text) => print!("{text}"),
            Err(e) => {
                eprintln!("opsh: cannot serialize config: {e}");
                exit(1);
            }
        }
        exit(0);
    }

    logging::init(
        logging::parse_level(&config.settings.log_level),
        config.settings.log_path().as_deref(),
        args.verbose,
    );

    let shell = Shell::new(config);

    if let Some(line) = args.command {
        let mut out = std::io::stdout();
        let mut err = std::io::stderr();
        let status = match shell.process_line(&line, &mut out, &mut err) {
            Ok(Step::Done(status)) => status,
            Ok(Step::Empty | Step::Exit) => 0,
            Err(e) => {
                eprintln!("opsh: {e}");
                1
            }
        };
        exit(status);
    }

    if let Err(e) = repl(&shell) {
        eprintln!("opsh: {e}");
        exit(1);
    }
}

/// Interactive loop with line editing and persistent history.
fn repl(shell: &Shell) -> rustyline::Result<()> {
    let mut rl = DefaultEditor::new()?;
    let history = shell.settings().history_path();
    if let Some(path) = &history
        && rl.load_history(path).is_err()
    {
        log::debug!("no history at {}", path.display());
    }

    let mut out = std::io::stdout();
    let mut err = std::io::stderr();
    loop {
        match rl.readline(&shell.settings().prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    rl.add_history_entry(line.as_str())?;
                }
                match shell.process_line(&line, &mut out, &mut err) {
                    Ok(Step::Exit) => {
                        println!("Exiting shell...");
                        break;
                    }
                    Ok(_) => {}
                    Err(e) => eprintln!("opsh: {e}"),
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e),
        }
    }

    if let Some(path) = &history {
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        if let Err(e) = rl.save_history(path) {
            log::warn!("cannot save history to {}: {e}", path.display());
        }
    }
    Ok(())
}
