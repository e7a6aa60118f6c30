use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::warn;

use crate::errors::GenError;
use crate::exec::run_tool;
use crate::pipeline::AssetProducer;

/// Token in the HTML template replaced with the current symbol.
const PLACEHOLDER: &str = "XXX";

const SCRATCH_PAGE: &str = "index.html";
const SCRATCH_SCREENSHOT: &str = "screenshot.png";

/// Produces one glyph image per symbol: render the template to a page, take a
/// headless-browser screenshot of it, trim the screenshot to its content
/// bounds in place.
pub struct GlyphProducer {
    browser_bin: String,
    trim_bin: String,
    template: String,
    page: PathBuf,
    screenshot: PathBuf,
    timeout: Duration,
}

impl GlyphProducer {
    /// `scratch_dir` must be an absolute path; the page is addressed with a
    /// `file://` URL and the browser writes its screenshot relative to it.
    pub fn new(browser_bin: &str, trim_bin: &str, template: String, scratch_dir: &Path, timeout: Duration) -> Self {
        Self {
            browser_bin: browser_bin.to_string(),
            trim_bin: trim_bin.to_string(),
            template,
            page: scratch_dir.join(SCRATCH_PAGE),
            screenshot: scratch_dir.join(SCRATCH_SCREENSHOT),
            timeout,
        }
    }
}

impl AssetProducer for GlyphProducer {
    async fn produce(&mut self, symbol: char, _input: &str) -> Result<(), GenError> {
        // A stale screenshot from the previous iteration must not survive a
        // failed capture, or it would be recorded for the wrong symbol.
        match fs::remove_file(&self.screenshot) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("could not remove stale {}: {}", self.screenshot.display(), e),
        }

        let page = render_page(&self.template, symbol);
        fs::write(&self.page, page)
            .map_err(|e| GenError::tool(symbol, format!("failed to write {}: {e}", self.page.display())))?;

        let url = format!("file://{}", self.page.display());
        let mut browser = Command::new(&self.browser_bin);
        browser
            .args(["--headless", "--disable-gpu", "--screenshot"])
            .arg(&url)
            .current_dir(self.screenshot.parent().unwrap_or(Path::new(".")))
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        run_tool("screenshot", symbol, &mut browser, self.timeout).await?;

        if !self.screenshot.exists() {
            return Err(GenError::MissingAsset {
                symbol,
                path: self.screenshot.clone(),
            });
        }

        let mut trim = Command::new(&self.trim_bin);
        trim.arg("-trim").arg(&self.screenshot).arg(&self.screenshot);
        run_tool("trim", symbol, &mut trim, self.timeout).await?;

        Ok(())
    }

    fn scratch_path(&self) -> &Path {
        &self.screenshot
    }
}

/// Substitute every occurrence of the placeholder token with the symbol,
/// HTML-escaped so markup-special characters render literally.
pub fn render_page(template: &str, symbol: char) -> String {
    template.replace(PLACEHOLDER, &escape_html(symbol))
}

fn escape_html(symbol: char) -> String {
    match symbol {
        '&' => "&amp;".to_string(),
        '<' => "&lt;".to_string(),
        '>' => "&gt;".to_string(),
        '"' => "&quot;".to_string(),
        '\'' => "&#39;".to_string(),
        other => other.to_string(),
    }
}
