use clap::{Args, Subcommand};
use obscura_utils::Result;

mod settings;

#[derive(Debug, Args)]
pub struct GenerateArgs {
    #[clap(subcommand)]
    subcommand: GenerateSubcommand,
}

#[derive(Debug, Subcommand)]
enum GenerateSubcommand {
    /// Generates the documented example of every setting Obscura
    /// reads and saves it in `config/obscura.example.toml`.
    Settings,
}

pub fn run(args: &GenerateArgs) -> Result<()> {
    match args.subcommand {
        GenerateSubcommand::Settings => self::settings::run(),
    }
}
