use clap::{Parser, Subcommand};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Sender};
use voice_core::*;

mod render;

#[derive(Parser)]
#[command(name = "vox")]
#[command(about = "Guided vocal warm-up routine timer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Routine file to use instead of the configured or built-in one
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Override config file location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the routine interactively (default)
    Run {
        /// Exercise to begin at (1-based)
        #[arg(long)]
        from: Option<usize>,

        /// Start the countdown immediately
        #[arg(long)]
        auto_start: bool,

        /// Override tick length in milliseconds
        #[arg(long)]
        tick_millis: Option<u64>,

        /// Disable audio cues
        #[arg(long)]
        no_cues: bool,

        /// Only print transitions, not every tick
        #[arg(long)]
        quiet: bool,
    },

    /// List the exercises in the routine
    List {
        /// Print the routine as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show one exercise in detail
    Show {
        /// Exercise position (1-based)
        position: usize,
    },

    /// Check a routine file for errors
    Validate {
        path: PathBuf,
    },

    /// Print the effective configuration
    Config {
        /// Write the default configuration file
        #[arg(long)]
        init: bool,
    },
}

struct RunOptions {
    from: Option<usize>,
    auto_start: bool,
    tick_millis: Option<u64>,
    no_cues: bool,
    quiet: bool,
}

fn main() -> Result<()> {
    // Keep logs quiet unless asked; they share the terminal with the countdown
    voice_core::logging::init_with_level("warn");

    let cli = Cli::parse();

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(Config::default_config_path);
    let config = Config::load_or_default(&config_path)?;

    match cli.command {
        Some(Commands::List { json }) => cmd_list(&load_routine(&cli.catalog, &config)?, json),
        Some(Commands::Show { position }) => {
            cmd_show(&load_routine(&cli.catalog, &config)?, position)
        }
        Some(Commands::Validate { path }) => cmd_validate(&path),
        Some(Commands::Config { init }) => cmd_config(&config, &config_path, init),
        Some(Commands::Run {
            from,
            auto_start,
            tick_millis,
            no_cues,
            quiet,
        }) => cmd_run(
            load_routine(&cli.catalog, &config)?,
            &config,
            RunOptions {
                from,
                auto_start,
                tick_millis,
                no_cues,
                quiet,
            },
        ),
        None => cmd_run(
            load_routine(&cli.catalog, &config)?,
            &config,
            RunOptions {
                from: None,
                auto_start: false,
                tick_millis: None,
                no_cues: false,
                quiet: false,
            },
        ),
    }
}

fn load_routine(catalog: &Option<PathBuf>, config: &Config) -> Result<Routine> {
    match catalog {
        Some(path) => Routine::load_from(path),
        None => config.load_routine(),
    }
}

fn cmd_list(routine: &Routine, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&routine.exercises)?);
    } else {
        print!("{}", render::routine_table(routine));
    }
    Ok(())
}

fn cmd_show(routine: &Routine, position: usize) -> Result<()> {
    let exercise = position
        .checked_sub(1)
        .and_then(|i| routine.get(i))
        .ok_or_else(|| {
            Error::Other(format!(
                "No exercise at position {} (routine has {})",
                position,
                routine.len()
            ))
        })?;
    print!(
        "{}",
        render::exercise_details(position, exercise, position == routine.len())
    );
    Ok(())
}

fn cmd_validate(path: &Path) -> Result<()> {
    let routine = Routine::read_from(path)?;
    let errors = routine.validate();
    if !errors.is_empty() {
        eprintln!("Routine validation errors:");
        for error in &errors {
            eprintln!("  - {}", error);
        }
        return Err(Error::CatalogValidation(format!(
            "{} problem(s) in {}",
            errors.len(),
            path.display()
        )));
    }

    println!(
        "✓ {} is valid: {} exercises, {}",
        path.display(),
        routine.len(),
        render::format_clock(routine.total_seconds())
    );
    Ok(())
}

fn cmd_config(config: &Config, path: &Path, init: bool) -> Result<()> {
    if init {
        if path.exists() {
            println!("Config already exists at {}", path.display());
            return Ok(());
        }
        Config::default().save_to(path)?;
        println!("✓ Wrote default config to {}", path.display());
        return Ok(());
    }

    println!("# {}", path.display());
    print!("{}", config.to_toml()?);
    Ok(())
}

/// Rings the terminal bell. Write failures are ignored.
struct BellCues;

impl CueSink for BellCues {
    fn emit(&mut self, cue: Cue) {
        tracing::debug!(?cue, "bell");
        let mut stdout = io::stdout();
        let _ = stdout.write_all(b"\x07");
        let _ = stdout.flush();
    }
}

fn cue_sink(config: &Config, no_cues: bool) -> Box<dyn CueSink> {
    if no_cues || !config.cues.enabled {
        Box::new(NoopCues)
    } else if config.cues.bell {
        Box::new(BellCues)
    } else {
        Box::new(TracingCues)
    }
}

fn cmd_run(routine: Routine, config: &Config, opts: RunOptions) -> Result<()> {
    let mut engine = RoutineEngine::new(routine)?;

    if let Some(position) = opts.from {
        let index = position as i64 - 1;
        if !engine.jump_to_exercise(index) {
            return Err(Error::Other(format!(
                "No exercise at position {} (routine has {})",
                position,
                engine.routine().len()
            )));
        }
    }

    let interval = match opts.tick_millis {
        Some(0) => return Err(Error::Config("tick length must be positive".into())),
        Some(ms) => std::time::Duration::from_millis(ms),
        None => config.timer.interval(),
    };

    let (tx, rx) = channel();
    if opts.auto_start {
        let _ = tx.send(Command::Start);
    }
    spawn_input_reader(tx);

    if !opts.quiet {
        print_help();
    }
    println!(
        "Exercise {}/{}: {}",
        engine.state().exercise_index + 1,
        engine.routine().len(),
        engine.current_exercise().name
    );

    let mut countdown =
        Countdown::new(engine, cue_sink(config, opts.no_cues), interval).exit_on_finish(true);
    if !opts.quiet {
        show_status(countdown.engine());
    }

    let quiet = opts.quiet;
    let outcome = countdown.run(&rx, |engine, transition| {
        if let Some(t) = transition {
            println!("\r\x1b[2K{}", render::describe_transition(engine, t));
        }
        if !quiet {
            show_status(engine);
        }
    });

    match outcome {
        RunOutcome::Finished => {}
        RunOutcome::Quit | RunOutcome::Disconnected => {
            println!(
                "\nStopped at exercise {}/{} ({}% of routine)",
                countdown.engine().state().exercise_index + 1,
                countdown.engine().routine().len(),
                countdown.engine().overall_completion_percent()
            );
        }
    }
    Ok(())
}

fn show_status(engine: &RoutineEngine) {
    print!("\r\x1b[2K{}", render::status_line(engine));
    let _ = io::stdout().flush();
}

fn print_help() {
    println!("─────────────────────────────────────────");
    println!("Enter or 'p' + Enter  start / pause");
    println!("  'n' / 'b' + Enter   next / previous exercise");
    println!("  '+' / '-' + Enter   next / previous rep");
    println!("  'r' + Enter         reset");
    println!("  'q' + Enter         quit");
    println!("─────────────────────────────────────────");
}

fn parse_command(input: &str) -> Option<Command> {
    match input.trim().to_lowercase().as_str() {
        "" | "p" => Some(Command::Toggle),
        "r" => Some(Command::Reset),
        "n" => Some(Command::NextExercise),
        "b" => Some(Command::PreviousExercise),
        "+" => Some(Command::JumpToRepetition(1)),
        "-" => Some(Command::JumpToRepetition(-1)),
        "q" => Some(Command::Quit),
        _ => None,
    }
}

/// Forward stdin lines as commands until EOF or the countdown goes away
fn spawn_input_reader(tx: Sender<Command>) {
    std::thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            match parse_command(&line) {
                Some(command) => {
                    if tx.send(command).is_err() {
                        break;
                    }
                }
                None => tracing::debug!("Ignoring unknown input {:?}", line),
            }
        }
    });
}
