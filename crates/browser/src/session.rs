//! Launch and supervision of the debuggable browser session.

use std::{collections::HashSet, time::Duration};

use {
    chromiumoxide::{
        Browser, BrowserConfig as CdpBrowserConfig,
        cdp::browser_protocol::target::EventTargetCreated,
    },
    futures::StreamExt,
    tokio::{task::JoinHandle, time::interval},
    tokio_util::sync::CancellationToken,
    tracing::{debug, info, warn},
};

use crate::{config::SessionConfig, detect, error::SessionError};

/// The running persistent-profile browser session.
///
/// Exclusively owned by the supervisor for the process lifetime; it is
/// destroyed only by cancellation or by the browser process dying underneath
/// us.
#[derive(Debug)]
pub struct BrowserSession {
    browser: Browser,
    /// Drives the CDP connection; ends when the browser goes away.
    event_loop: JoinHandle<()>,
    page_watcher: JoinHandle<()>,
}

impl BrowserSession {
    /// Launch the browser with a persistent profile and register the new-page
    /// hook.
    ///
    /// Fails fast on a missing extension directory or an unusable profile
    /// path. Engine-level failures (profile lock held by another process,
    /// debugging port already bound, binary crash during startup) surface as
    /// [`SessionError::LaunchFailed`]. Nothing is retried.
    pub async fn launch(config: &SessionConfig) -> Result<BrowserSession, SessionError> {
        // The engine validates the manifest; we only require a readable
        // directory so a bad path fails before any browser process exists.
        if !config.extension_dir.is_dir() {
            return Err(SessionError::ExtensionMissing {
                path: config.extension_dir.clone(),
            });
        }

        let profile_dir = config.profile_dir();
        tokio::fs::create_dir_all(&profile_dir)
            .await
            .map_err(|source| SessionError::ProfileDir {
                path: profile_dir.clone(),
                source,
            })?;

        let chrome = detect::locate_browser(config.chrome_path.as_deref())?;

        info!(
            browser = %chrome.display(),
            profile_dir = %profile_dir.display(),
            extension_dir = %config.extension_dir.display(),
            debug_port = config.debug_port,
            "launching browser session"
        );

        let mut builder = CdpBrowserConfig::builder()
            .chrome_executable(&chrome)
            .user_data_dir(&profile_dir)
            .window_size(config.viewport_width, config.viewport_height)
            .viewport(chromiumoxide::handler::viewport::Viewport {
                width: config.viewport_width,
                height: config.viewport_height,
                device_scale_factor: Some(1.0),
                emulating_mobile: false,
                is_landscape: true,
                has_touch: false,
            })
            .args(config.chrome_args());

        // with_head() shows the browser window; chromiumoxide defaults to
        // headless otherwise.
        if !config.headless {
            builder = builder.with_head();
        }

        let cdp_config = builder.build().map_err(SessionError::LaunchFailed)?;

        let (browser, mut handler) = Browser::launch(cdp_config).await.map_err(|e| {
            SessionError::LaunchFailed(format!("{e}\n\n{}", detect::install_instructions()))
        })?;

        // Drive the CDP connection. The loop ends when the connection closes,
        // which the supervisor treats as the browser dying.
        let event_loop = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                debug!(?event, "browser event");
            }
            debug!("browser event loop ended");
        });

        // Subscribe before enumerating existing pages so pages opened during
        // startup cannot be missed; the seen-set keeps each page reported
        // exactly once either way.
        let mut created = browser.event_listener::<EventTargetCreated>().await?;

        // Pages restored from the persistent profile are already open at this
        // point; report them in the engine's current order.
        let mut seen: HashSet<String> = HashSet::new();
        for page in browser.pages().await? {
            let url = page.url().await.ok().flatten().unwrap_or_default();
            report_page(&url);
            seen.insert(page.target_id().as_ref().to_string());
        }

        let page_watcher = tokio::spawn(async move {
            while let Some(event) = created.next().await {
                let target = &event.target_info;
                if target.r#type != "page" {
                    continue;
                }
                if !seen.insert(target.target_id.as_ref().to_string()) {
                    continue;
                }
                report_page(&target.url);
            }
        });

        info!(
            ws = %browser.websocket_address(),
            "browser session ready"
        );

        Ok(BrowserSession {
            browser,
            event_loop,
            page_watcher,
        })
    }

    /// Hold the session open until cancelled or until the browser dies.
    ///
    /// The idle phase does no periodic work; it only yields so event delivery
    /// keeps running. On cancellation the browser is closed gracefully; if
    /// the event loop ends first, the browser process died and the session
    /// reports [`SessionError::BrowserClosed`].
    pub async fn run_until_cancelled(
        mut self,
        cancel: CancellationToken,
    ) -> Result<(), SessionError> {
        match idle(&cancel, &mut self.event_loop).await {
            IdleExit::Cancelled => {
                info!("shutdown requested, closing browser session");
                self.page_watcher.abort();
                if let Err(e) = self.browser.close().await {
                    warn!(error = %e, "browser did not close cleanly");
                }
                let _ = self.browser.wait().await;
                self.event_loop.abort();
                Ok(())
            },
            IdleExit::BrowserExited => {
                self.page_watcher.abort();
                Err(SessionError::BrowserClosed)
            },
        }
    }
}

/// The new-page hook: one log line per page.
///
/// Must return promptly; anything heavier than reporting belongs in its own
/// task so delivery of subsequent page events is never stalled.
fn report_page(url: &str) {
    info!(url, "new page created");
}

#[derive(Debug, PartialEq, Eq)]
enum IdleExit {
    Cancelled,
    BrowserExited,
}

/// Idle cooperatively until cancellation or until the event-drive task ends.
async fn idle(cancel: &CancellationToken, event_loop: &mut JoinHandle<()>) -> IdleExit {
    let mut tick = interval(Duration::from_secs(1));
    loop {
        tokio::select! {
            _ = cancel.cancelled() => return IdleExit::Cancelled,
            _ = &mut *event_loop => return IdleExit::BrowserExited,
            _ = tick.tick() => {},
        }
    }
}
