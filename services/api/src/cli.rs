use crate::demo::{run_catalog_listing, run_seed_summary, CatalogArgs, SeedArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use mm_safaris::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "MM Africa Safaris",
    about = "Serve the MM Africa Safaris website or inspect its catalog from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Print the tour listing, filtered the same way as the tours page
    Catalog(CatalogArgs),
    /// Build the demo catalog and sample inquiries, then print what was loaded
    Seed(SeedArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Load tours from a CSV export instead of the bundled demo catalog
    #[arg(long)]
    pub(crate) catalog_csv: Option<PathBuf>,
    /// Start with an empty catalog when no CSV is given
    #[arg(long)]
    pub(crate) no_seed: bool,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Catalog(args) => run_catalog_listing(args),
        Command::Seed(args) => run_seed_summary(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_optional_and_accepts_catalog_flags() {
        let cli = Cli::try_parse_from([
            "mm-safaris-api",
            "serve",
            "--port",
            "8080",
            "--catalog-csv",
            "tours.csv",
        ])
        .expect("serve args parse");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert_eq!(args.catalog_csv, Some(PathBuf::from("tours.csv")));
                assert!(!args.no_seed);
            }
            other => panic!("expected serve command, got {other:?}"),
        }

        let bare = Cli::try_parse_from(["mm-safaris-api"]).expect("no subcommand parses");
        assert!(bare.command.is_none());
    }

    #[test]
    fn catalog_filters_are_taken_verbatim() {
        let cli = Cli::try_parse_from([
            "mm-safaris-api",
            "catalog",
            "--difficulty",
            "easy",
            "--max-price",
            "not-a-number",
        ])
        .expect("catalog args parse");
        match cli.command {
            Some(Command::Catalog(args)) => {
                assert_eq!(args.difficulty.as_deref(), Some("easy"));
                assert_eq!(args.max_price.as_deref(), Some("not-a-number"));
                assert!(args.q.is_none());
            }
            other => panic!("expected catalog command, got {other:?}"),
        }
    }
}
