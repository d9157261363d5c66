use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use eframe::egui;

use crate::control::{LogMonitor, PollOutcome};
use crate::error::LogError;
use crate::state::theme::Theme;
use crate::ui::{legend, plot_panel};

/// Slot through which a fatal streaming error leaves the event loop.
pub type FatalSlot = Arc<Mutex<Option<LogError>>>;

/// The live log viewer window (streaming phase of the control loop).
pub struct LogPlotApp {
    monitor: LogMonitor,
    theme: Theme,
    sleep: Duration,
    last_poll: Instant,
    fatal: FatalSlot,
}

impl LogPlotApp {
    pub fn new(cc: &eframe::CreationContext<'_>, monitor: LogMonitor, fatal: FatalSlot) -> Self {
        let theme = monitor.config().theme;
        let sleep = monitor.config().sleep;

        let ctx = &cc.egui_ctx;
        let mut style = (*ctx.style()).clone();
        style.text_styles.insert(
            egui::TextStyle::Body,
            egui::FontId::proportional(14.0),
        );
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        ctx.set_style(style);
        ctx.set_visuals(theme.visuals());

        Self {
            monitor,
            theme,
            sleep,
            last_poll: Instant::now(),
            fatal,
        }
    }

    fn poll(&mut self, ctx: &egui::Context) {
        if self.last_poll.elapsed() < self.sleep {
            return;
        }
        self.last_poll = Instant::now();
        match self.monitor.poll() {
            Ok(PollOutcome::Updated { rows }) => tracing::trace!("Read {rows} rows"),
            Ok(PollOutcome::NoData) => tracing::debug!("No data in log file, keeping last frame"),
            Err(e) => {
                tracing::error!("Stopping: {e}");
                if let Ok(mut slot) = self.fatal.lock() {
                    *slot = Some(e);
                }
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }
}

impl eframe::App for LogPlotApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll(ctx);

        let plot = self.monitor.plot();
        egui::SidePanel::right("legend")
            .resizable(false)
            .min_width(140.0)
            .show(ctx, |ui| legend::show_legend(plot, ui, &self.theme));

        let frame = egui::Frame::central_panel(&ctx.style()).fill(self.theme.plot_bg());
        egui::CentralPanel::default()
            .frame(frame)
            .show(ctx, |ui| plot_panel::show_plot_panel(plot, ui, &self.theme));

        ctx.request_repaint_after(self.sleep);
    }
}
