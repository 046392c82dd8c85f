mod api;
mod app;
mod cli;
mod config;
mod event;
mod terminal;
mod ui;

use api::ApiClient;
use app::App;
use clap::Parser;
use cli::CliArgs;
use color_eyre::Result;

#[tokio::main]
async fn main() -> Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let args = CliArgs::parse();
    args.apply_env_overrides();

    let config = config::init_app_config()?;
    let headless = args.headless || !is_terminal();

    // The interactive UI owns the screen, so it only logs when asked to
    if args.wants_logging(headless) {
        pretty_env_logger::init();
    }

    let api = ApiClient::new(&config)?;

    if let Some(text) = &args.suggest {
        return event::run_suggest(&api, args.name.as_deref().unwrap_or_default(), text).await;
    }

    if headless {
        return event::run_headless(&api, args.json).await;
    }

    let mut app = App::new(api);

    // Setup terminal
    let mut terminal = terminal::setup()?;

    // Run the application
    let result = event::run(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::cleanup(true, true);

    result
}

// Check if we're running in a terminal
fn is_terminal() -> bool {
    atty::is(atty::Stream::Stdout)
}
