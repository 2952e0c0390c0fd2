//! refwidget - fetch the referral widget and show it.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use refwidget::{BrowserSurface, Cli, PrintSurface, StartupContext};
use refwidget_config::load_dotenv;
use refwidget_core::{EmbedOptions, RenderSurface, WidgetScreen};

mod main_helpers;

use main_helpers::initialize_tracing;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    // .env is optional
    load_dotenv();

    let args = Cli::parse();
    initialize_tracing(args.debug);

    let startup = StartupContext::from_cli_args(&args)?;
    let options = EmbedOptions::from_config(&startup.config.render);
    let screen = WidgetScreen::new(&startup.config, &startup.credentials);

    let mut surface: Box<dyn RenderSurface> = if args.print {
        Box::new(PrintSurface::stdio(options))
    } else {
        Box::new(BrowserSurface::stderr(
            options,
            args.output.clone(),
            !args.no_open,
        ))
    };

    surface.render(&screen.state())?;
    let state = screen.mount().await;
    surface.render(&state)?;

    Ok(if state.is_ready() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
