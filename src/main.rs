use clap::Parser;
use lptext::LpParser;

use log::info;

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lptext")]
#[command(about = "Parse a plain-text linear program into c, A, b, Eqin and MinMax", long_about = None)]
struct Cli {
    /// The LP file to parse
    input: PathBuf,

    /// Write the report here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fail if the constraints are not closed by an `end` line
    #[arg(long)]
    require_end: bool,

    /// Log more, repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logger(log_level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    use fern::colors::{Color, ColoredLevelConfig};
    let colors = ColoredLevelConfig::new()
        .debug(Color::White)
        .info(Color::Green)
        .warn(Color::BrightYellow)
        .error(Color::BrightRed);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "{} | {:5} | {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f"),
                colors.color(record.level()),
                message
            ))
        })
        .level(log_level)
        .chain(std::io::stderr())
        .apply()
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let prob = LpParser::new(cli.require_end).parse_file(&cli.input)?;

    match &cli.output {
        Some(path) => {
            prob.write_report(std::fs::File::create(path)?)?;
            info!("wrote report to {}", path.display());
        }

        None => prob.write_report(std::io::stdout().lock())?,
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    if let Err(e) = setup_logger(log_level) {
        eprintln!("could not set up logging: {}", e);
    }

    if let Err(e) = run(&cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}
