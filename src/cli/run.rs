//! Handler for the `run` command.

use tracing::info;

use crate::adapter::presenter::{JsonPresenter, TerminalPresenter};
use crate::app::App;
use crate::cli::{banner, Cli, DashboardArgs};
use crate::error::Result;

/// Execute the run command.
pub async fn execute(cli: &Cli, args: &DashboardArgs) -> Result<()> {
    let mut config = cli.load_config()?;
    args.apply(&mut config)?;

    config.init_logging();

    if !args.no_banner && !args.json {
        banner::print_banner();
    }

    info!(
        api_url = %config.market.api_url,
        catalog = %config.catalog.location,
        mode = %config.dashboard.mode,
        "npcflip starting"
    );

    if args.json {
        App::run(config, JsonPresenter::stdout()).await
    } else {
        App::run(config, TerminalPresenter::stdout()).await
    }
}
