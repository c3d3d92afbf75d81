use std::env;
use std::path::PathBuf;

/// Runtime configuration read from the environment (after `dotenvy::dotenv`).
#[derive(Debug, Clone)]
pub struct Config {
    /// `HEADLESS`: anything but the literal "false" keeps Chrome headless.
    pub headless: bool,
    /// `CHROME_PATH`: optional path to a specific browser executable.
    pub browser_path: Option<PathBuf>,
    /// `WP_URL`: base URL of the import endpoint (wp-sync only).
    pub import_url: Option<String>,
    /// `WP_TOKEN`: bearer credential for the import endpoint (wp-sync only).
    pub import_token: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            headless: env::var("HEADLESS").map(|v| v != "false").unwrap_or(true),
            browser_path: env::var("CHROME_PATH").ok().map(PathBuf::from),
            import_url: env::var("WP_URL").ok(),
            import_token: env::var("WP_TOKEN").ok(),
        }
    }
}
