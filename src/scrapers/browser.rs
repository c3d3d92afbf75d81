use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use headless_chrome::{Browser, LaunchOptions, Tab};
use tracing::info;

use crate::config::Config;

/// Interval between checks of a polled page condition.
const POLL_INTERVAL: Duration = Duration::from_millis(500);

/// One headless Chrome session, reused for the whole run.
///
/// The browser process is released when the session is dropped, no matter
/// how the run terminates.
pub struct Session {
    #[allow(dead_code)]
    browser: Browser,
    tab: Arc<Tab>,
}

impl Session {
    /// Launch Chrome according to the configuration and open the single tab
    /// used for every navigation of the run.
    pub fn launch(config: &Config) -> Result<Self> {
        info!("Launching Chrome (headless: {})...", config.headless);

        let options = LaunchOptions::default_builder()
            .headless(config.headless)
            .path(config.browser_path.clone())
            .window_size(Some((1366, 900)))
            .idle_browser_timeout(Duration::from_secs(300))
            .build()
            .context("Failed to build launch options")?;

        let browser = Browser::new(options).context("Failed to launch Chrome browser")?;
        let tab = browser.new_tab()?;

        Ok(Self { browser, tab })
    }

    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab.navigate_to(url)?;
        self.tab.wait_until_navigated()?;
        Ok(())
    }

    /// Run a script in the page, returning whatever value it evaluates to.
    pub fn eval(&self, script: &str) -> Result<Option<serde_json::Value>> {
        Ok(self.tab.evaluate(script, false)?.value)
    }

    /// Run a script expected to evaluate to a boolean; anything else is false.
    pub fn eval_bool(&self, script: &str) -> Result<bool> {
        Ok(self.eval(script)?.and_then(|v| v.as_bool()).unwrap_or(false))
    }

    /// Capture the full rendered document for offline parsing.
    pub fn page_html(&self) -> Result<String> {
        let result = self.eval("document.documentElement.outerHTML")?;
        Ok(result.and_then(|v| v.as_str().map(str::to_string)).unwrap_or_default())
    }

    /// Block until `selector` is present, up to `timeout`.
    pub fn wait_for(&self, selector: &str, timeout: Duration) -> Result<()> {
        self.tab
            .wait_for_element_with_custom_timeout(selector, timeout)
            .with_context(|| format!("Timed out waiting for element {selector}"))?;
        Ok(())
    }
}

/// Poll `check` every 500 ms until it reports true or `timeout` elapses.
///
/// A timeout is a distinguishable error naming the awaited condition; errors
/// from `check` itself propagate immediately.
pub fn poll_until<F>(label: &str, timeout: Duration, mut check: F) -> Result<()>
where
    F: FnMut() -> Result<bool>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if check()? {
            return Ok(());
        }
        if Instant::now() >= deadline {
            bail!("Timed out after {}s waiting for {}", timeout.as_secs(), label);
        }
        thread::sleep(POLL_INTERVAL);
    }
}
