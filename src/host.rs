// src/host.rs - window host: native window options, lifecycle and the view -> host channel
use crate::app_ui::ThroughputApp;
use crate::config::{Config, Mode, WindowConfig};
use crate::error::Result;
use crate::settings;
use eframe::egui;
use std::sync::mpsc::{self, Receiver, Sender};

/// Payload-free signals the view can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    Ping,
}

/// View-side end of the notification channel. Fire and forget.
#[derive(Clone)]
pub struct Notifier {
    tx: Sender<HostEvent>,
}

impl Notifier {
    pub fn notify(&self, event: HostEvent) {
        if self.tx.send(event).is_err() {
            log::trace!("Host gone, dropped {:?}", event);
        }
    }
}

/// What happens when the last window is asked to close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClosePolicy {
    QuitOnLastWindowClosed,
    /// Dock-activated platforms keep the app alive; the window goes to the dock.
    MinimizeToDock,
}

impl ClosePolicy {
    pub fn for_platform() -> Self {
        if cfg!(target_os = "macos") {
            ClosePolicy::MinimizeToDock
        } else {
            ClosePolicy::QuitOnLastWindowClosed
        }
    }
}

/// Host-side end of the channel plus the window lifecycle.
pub struct HostShell {
    events: Receiver<HostEvent>,
    policy: ClosePolicy,
    shown: bool,
    pings: u64,
}

pub fn channel(policy: ClosePolicy) -> (Notifier, HostShell) {
    let (tx, rx) = mpsc::channel();
    (
        Notifier { tx },
        HostShell {
            events: rx,
            policy,
            shown: false,
            pings: 0,
        },
    )
}

impl HostShell {
    pub fn pings(&self) -> u64 {
        self.pings
    }

    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Handles every pending notification. Returns how many were handled.
    pub fn drain(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(event) = self.events.try_recv() {
            match event {
                HostEvent::Ping => {
                    self.pings += 1;
                    log::info!("pong");
                }
            }
            handled += 1;
        }
        handled
    }

    pub fn begin_frame(&mut self, ctx: &egui::Context) {
        self.drain();
        if self.policy == ClosePolicy::MinimizeToDock
            && ctx.input(|i| i.viewport().close_requested())
        {
            log::info!("Close requested, minimizing to dock");
            ctx.send_viewport_cmd(egui::ViewportCommand::CancelClose);
            ctx.send_viewport_cmd(egui::ViewportCommand::Minimized(true));
        }
    }

    /// The window starts hidden; the first finished frame is the ready signal.
    pub fn end_frame(&mut self, ctx: &egui::Context) {
        if !self.shown {
            ctx.send_viewport_cmd(egui::ViewportCommand::Visible(true));
            self.shown = true;
            log::debug!("Window ready, showing");
        }
    }
}

/// Opens `url` in the platform browser rather than inside the app.
pub fn open_external(ctx: &egui::Context, url: &str) {
    log::info!("Opening {} in the default browser", url);
    ctx.open_url(egui::OpenUrl::new_tab(url));
}

pub fn native_options(window: &WindowConfig) -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(settings::APP_NAME)
            .with_app_id(settings::APP_ID)
            .with_inner_size(egui::vec2(window.width, window.height))
            .with_min_inner_size(egui::vec2(
                settings::MIN_WINDOW_WIDTH,
                settings::MIN_WINDOW_HEIGHT,
            ))
            .with_visible(false),
        multisampling: 4,
        depth_buffer: 0,
        stencil_buffer: 0,
        renderer: eframe::Renderer::Wgpu,
        run_and_return: true,
        ..Default::default()
    }
}

/// Creates the window and runs the view until the window closes.
pub fn launch(config: Config, mode: Mode) -> Result<()> {
    log::info!(
        "Launching {} ({:?} mode, {}x{})",
        settings::APP_NAME,
        mode,
        config.window.width,
        config.window.height
    );
    let (notifier, shell) = channel(ClosePolicy::for_platform());
    let options = native_options(&config.window);
    eframe::run_native(
        settings::APP_NAME,
        options,
        Box::new(move |cc| Ok(Box::new(ThroughputApp::new(cc, &config, mode, notifier, shell)))),
    )?;
    log::info!("Window closed, exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ping_is_delivered_once() {
        let (notifier, mut shell) = channel(ClosePolicy::QuitOnLastWindowClosed);
        notifier.notify(HostEvent::Ping);
        notifier.clone().notify(HostEvent::Ping);
        assert_eq!(shell.drain(), 2);
        assert_eq!(shell.drain(), 0);
        assert_eq!(shell.pings(), 2);
    }

    #[test]
    fn notify_after_host_is_gone_is_silent() {
        let (notifier, shell) = channel(ClosePolicy::QuitOnLastWindowClosed);
        drop(shell);
        notifier.notify(HostEvent::Ping);
    }

    #[test]
    fn first_frame_shows_the_window() {
        let (_notifier, mut shell) = channel(ClosePolicy::QuitOnLastWindowClosed);
        let ctx = egui::Context::default();
        assert!(!shell.is_shown());
        shell.end_frame(&ctx);
        assert!(shell.is_shown());
        shell.end_frame(&ctx);
        assert!(shell.is_shown());
    }

    #[test]
    fn window_starts_hidden_at_default_size() {
        let options = native_options(&WindowConfig::default());
        assert_eq!(options.viewport.visible, Some(false));
        assert_eq!(options.viewport.inner_size, Some(egui::vec2(900.0, 670.0)));
    }

    #[test]
    fn platform_policy() {
        let expected = if cfg!(target_os = "macos") {
            ClosePolicy::MinimizeToDock
        } else {
            ClosePolicy::QuitOnLastWindowClosed
        };
        assert_eq!(ClosePolicy::for_platform(), expected);
    }
}
