//! Browser navigation
//!
//! Navigation is fire-and-forget; callers log failures and move on.

use crate::{Error, Result};

/// Opens URLs in some user-visible browser
pub trait Navigator: Send + Sync {
    /// Open `url`
    ///
    /// # Errors
    ///
    /// Returns error if the browser cannot be launched
    fn open(&self, url: &str) -> Result<()>;
}

/// Navigator backed by the system default browser
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemBrowser;

impl Navigator for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        webbrowser::open(url).map_err(|e| Error::Navigation(e.to_string()))?;
        tracing::debug!(url, "opened browser");
        Ok(())
    }
}
