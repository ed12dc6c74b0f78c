//! Handler for the `scan` command.

use crate::adapter::presenter::{JsonPresenter, TerminalPresenter};
use crate::app::App;
use crate::cli::{Cli, DashboardArgs};
use crate::error::Result;

/// Execute the scan command: one fetch, one render.
pub async fn execute(cli: &Cli, args: &DashboardArgs) -> Result<()> {
    let mut config = cli.load_config()?;
    args.apply(&mut config)?;

    config.init_logging();

    if args.json {
        App::scan(config, JsonPresenter::stdout()).await?;
    } else {
        App::scan(config, TerminalPresenter::stdout()).await?;
    }
    Ok(())
}
