use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::network::{
    EnableParams, EventLoadingFailed, EventLoadingFinished, EventRequestWillBeSent,
};
use chromiumoxide::cdp::browser_protocol::page::{CaptureScreenshotFormat, PrintToPdfParams};
use chromiumoxide::error::CdpError;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures_util::StreamExt;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::error::{ConvertError, Result};
use crate::options::{PdfOptions, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use crate::renderer::{RenderBackend, RenderSurface};

/// How long the network must stay quiet before content counts as loaded.
const NETWORK_IDLE_WINDOW: Duration = Duration::from_millis(500);

/// CSS reference pixels per inch, used to express pixel sizes as paper inches.
const CSS_PX_PER_INCH: f64 = 96.0;

#[derive(Debug, Clone, Default)]
pub struct BrowserOptions {
    /// Chrome/Chromium binary; auto-detected when unset.
    pub executable: Option<PathBuf>,
    /// Show the browser window instead of running headless.
    pub headed: bool,
}

/// Launches a fresh Chromium per conversion.
#[derive(Debug, Clone, Default)]
pub struct ChromiumBackend {
    options: BrowserOptions,
}

impl ChromiumBackend {
    pub fn new(options: BrowserOptions) -> Self {
        Self { options }
    }
}

#[async_trait]
impl RenderBackend for ChromiumBackend {
    type Surface = ChromiumSurface;

    async fn open(&self) -> Result<ChromiumSurface> {
        let mut builder = BrowserConfig::builder().window_size(DEFAULT_WIDTH, DEFAULT_HEIGHT);
        if self.options.headed {
            builder = builder.with_head();
        }
        if let Some(executable) = &self.options.executable {
            builder = builder.chrome_executable(executable);
        }
        let config = builder
            .build()
            .map_err(|e| ConvertError::render(format!("Failed to create browser config: {}", e)))?;

        let (mut browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| ConvertError::render(format!("Failed to launch browser: {}", e)))?;

        let handle = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if let Err(err) = h {
                    // Only log if it's not a common websocket deserialization error
                    let err_str = err.to_string();
                    if !err_str.contains("data did not match any variant")
                        && !err_str.contains("untagged enum Message")
                    {
                        error!("Browser handler error: {}", err);
                    } else {
                        debug!("Chrome protocol message ignored: {}", err);
                    }
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                browser.close().await.ok();
                handle.abort();
                return Err(ConvertError::render(format!(
                    "Failed to create new page: {}",
                    e
                )));
            }
        };

        debug!("Browser session opened");
        Ok(ChromiumSurface {
            browser,
            handle,
            page,
        })
    }
}

/// One browser with one tab.
pub struct ChromiumSurface {
    browser: Browser,
    handle: JoinHandle<()>,
    page: Page,
}

#[async_trait]
impl RenderSurface for ChromiumSurface {
    async fn set_viewport(&mut self, width: u32, height: u32) -> Result<()> {
        let params = SetDeviceMetricsOverrideParams::new(i64::from(width), i64::from(height), 1.0, false);
        self.page
            .execute(params)
            .await
            .map_err(|e| ConvertError::render(format!("Failed to set viewport: {}", e)))?;
        debug!("Viewport set to {}x{}", width, height);
        Ok(())
    }

    /// Returns once no request has been in flight for `NETWORK_IDLE_WINDOW`.
    ///
    /// There is no timeout: a page that keeps a request open forever (event
    /// streams, long polling, a stalled fetch) never becomes idle and this
    /// call does not return.
    async fn load_content(&mut self, html: &str) -> Result<()> {
        let listen_err = |e: CdpError| ConvertError::render(format!("Failed to watch network activity: {}", e));
        self.page.execute(EnableParams::default()).await.map_err(listen_err)?;
        let mut started = self
            .page
            .event_listener::<EventRequestWillBeSent>()
            .await
            .map_err(listen_err)?;
        let mut finished = self
            .page
            .event_listener::<EventLoadingFinished>()
            .await
            .map_err(listen_err)?;
        let mut failed = self
            .page
            .event_listener::<EventLoadingFailed>()
            .await
            .map_err(listen_err)?;

        self.page
            .set_content(html)
            .await
            .map_err(|e| ConvertError::render(format!("Failed to set page content: {}", e)))?;

        let mut in_flight: HashSet<String> = HashSet::new();
        loop {
            tokio::select! {
                Some(event) = started.next() => {
                    in_flight.insert(event.request_id.inner().clone());
                }
                Some(event) = finished.next() => {
                    in_flight.remove(event.request_id.inner());
                }
                Some(event) = failed.next() => {
                    in_flight.remove(event.request_id.inner());
                }
                _ = tokio::time::sleep(NETWORK_IDLE_WINDOW), if in_flight.is_empty() => break,
                else => break,
            }
        }

        debug!("Content loaded, network idle");
        Ok(())
    }

    async fn count_elements(&mut self, selector: &str) -> Result<usize> {
        let selector = serde_json::to_string(selector)
            .map_err(|e| ConvertError::render(format!("Invalid selector: {}", e)))?;
        let count = self
            .page
            .evaluate(format!("document.querySelectorAll({}).length", selector))
            .await
            .map_err(|e| ConvertError::render(format!("Failed to count elements: {}", e)))?
            .into_value::<u64>()
            .map_err(|e| ConvertError::render(format!("Failed to read element count: {}", e)))?;
        Ok(count as usize)
    }

    async fn inject_style(&mut self, css: &str) -> Result<()> {
        let css = serde_json::to_string(css)
            .map_err(|e| ConvertError::render(format!("Invalid style rule: {}", e)))?;
        let script = format!(
            r#"(() => {{
                const style = document.createElement('style');
                style.textContent = {};
                (document.head || document.documentElement).appendChild(style);
                return true;
            }})()"#,
            css
        );
        self.page
            .evaluate(script)
            .await
            .map_err(|e| ConvertError::render(format!("Failed to inject style: {}", e)))?;
        Ok(())
    }

    async fn capture_png(&mut self) -> Result<Vec<u8>> {
        let params = ScreenshotParams::builder()
            .format(CaptureScreenshotFormat::Png)
            .build();
        self.page
            .screenshot(params)
            .await
            .map_err(|e| ConvertError::render(format!("Failed to capture screenshot: {}", e)))
    }

    async fn export_pdf(&mut self, options: &PdfOptions) -> Result<Vec<u8>> {
        let params = PrintToPdfParams {
            scale: Some(options.scale),
            print_background: Some(options.print_background),
            paper_width: Some(f64::from(options.width) / CSS_PX_PER_INCH),
            paper_height: Some(f64::from(options.height) / CSS_PX_PER_INCH),
            margin_top: Some(options.margin_top),
            margin_right: Some(options.margin_right),
            margin_bottom: Some(options.margin_bottom),
            margin_left: Some(options.margin_left),
            ..Default::default()
        };

        self.page
            .pdf(params)
            .await
            .map_err(|e| ConvertError::render(format!("Failed to generate PDF: {}", e)))
    }

    async fn close(mut self) -> Result<()> {
        let result = self.browser.close().await;
        self.handle.abort();
        result
            .map(|_| debug!("Browser session closed"))
            .map_err(|e| ConvertError::render(format!("Failed to close browser: {}", e)))
    }
}
