use clap::Parser;
use npcflip::cli::{check, explain, run, scan, Cli, Commands};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let result = match &cli.command {
        Commands::Run(args) => run::execute(&cli, args).await,
        Commands::Scan(args) => scan::execute(&cli, args).await,
        Commands::Check => {
            if !check::execute(&cli) {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Explain => {
            explain::execute();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
