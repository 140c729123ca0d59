use clap::{Parser, Subcommand};
use nu_ansi_term::{Color, Style};
use obscura_utils::Result;

mod generate;

#[derive(Parser)]
#[command(version, author, long_about)]
struct TaskArgs {
    /// This option turns logging on.
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    #[command(subcommand)]
    subcommand: TaskSubcommand,
}

#[derive(Subcommand)]
enum TaskSubcommand {
    /// Generates something.
    Generate(self::generate::GenerateArgs),
}

fn main() -> Result<()> {
    obscura_utils::Error::init();
    obscura_utils::env::init();

    let args = TaskArgs::parse();
    let level = match args.debug {
        0 => log::LevelFilter::Off,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    pretty_env_logger::formatted_timed_builder()
        .filter_level(level)
        .format_timestamp_millis()
        .init();

    match args.subcommand {
        TaskSubcommand::Generate(cmd) => self::generate::run(&cmd),
    }
}

fn done_style() -> Style {
    Style::new().fg(Color::LightGreen).bold()
}
