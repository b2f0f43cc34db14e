//! Browser launch support.
//!
//! Opening the default browser on startup is a fire-and-forget convenience.
//! The launcher sits behind a trait so tests can substitute a no-op and the
//! server can be exercised without spawning real browser processes.

use crate::logger;

/// Capability to open a URL in the operator's default browser.
pub trait BrowserLauncher {
    fn open_url(&self, url: &str) -> std::io::Result<()>;
}

/// Launches the host operating system's default browser.
pub struct SystemBrowser;

impl BrowserLauncher for SystemBrowser {
    fn open_url(&self, url: &str) -> std::io::Result<()> {
        open::that(url)
    }
}

/// No-op launcher for tests and headless environments.
pub struct NoBrowser;

impl BrowserLauncher for NoBrowser {
    fn open_url(&self, _url: &str) -> std::io::Result<()> {
        Ok(())
    }
}

/// Open `url` with the given launcher. Launch failure must never prevent
/// the server from serving, so it is logged and otherwise ignored.
pub fn launch(launcher: &dyn BrowserLauncher, url: &str) {
    logger::log_browser_opening(url);
    if let Err(e) = launcher.open_url(url) {
        logger::log_browser_launch_failed(&e);
    }
}
