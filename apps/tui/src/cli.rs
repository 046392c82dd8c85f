use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "nwi_dashboard", version, about = "NWI usage dashboard")]
pub struct CliArgs {
    /// Print stats and exit
    #[arg(long)]
    pub headless: bool,

    /// Print headless stats as JSON
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,

    /// Override the dashboard backend root
    #[arg(long = "base-url", value_name = "URL")]
    pub base_url: Option<String>,

    /// Override the world boundary dataset
    #[arg(long = "geometry-url", value_name = "URL")]
    pub geometry_url: Option<String>,

    /// Skip fetching and drawing the world map
    #[arg(long = "no-map")]
    pub no_map: bool,

    /// Submit a suggestion and exit
    #[arg(long, value_name = "TEXT")]
    pub suggest: Option<String>,

    /// Name to attach to --suggest
    #[arg(long, value_name = "NAME", requires = "suggest")]
    pub name: Option<String>,
}

impl CliArgs {
    pub fn apply_env_overrides(&self) {
        if let Some(url) = &self.base_url {
            std::env::set_var("DASHBOARD_URL", url);
        }
        if let Some(url) = &self.geometry_url {
            std::env::set_var("GEOMETRY_URL", url);
        }
        if self.no_map {
            std::env::set_var("DISABLE_MAP", "1");
        }
        if self.debug && std::env::var_os("RUST_LOG").is_none() {
            std::env::set_var("RUST_LOG", "debug");
        }
    }

    /// Whether the logger may write to the terminal.
    pub const fn wants_logging(&self, headless: bool) -> bool {
        headless || self.debug || self.suggest.is_some()
    }
}
