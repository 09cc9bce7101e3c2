// app_ui.rs
use crate::config::{Config, Mode};
use crate::crosshair::Crosshair;
use crate::host::{self, HostEvent, HostShell, Notifier};
use crate::performance::FrameInfo;
use crate::series::Series;
use crate::slider::Slider;
use crate::stats::TrafficStats;
use crate::telemetry::SampleGenerator;
use crate::view::TelemetryView;
use crate::{areachart, axes, axes_util, settings};
use chrono::Utc;
use eframe::{egui, Frame};
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Graphs,
    Alerts,
    Contact,
    About,
}

impl Page {
    pub const ALL: [Page; 4] = [Page::Graphs, Page::Alerts, Page::Contact, Page::About];

    pub fn title(self) -> &'static str {
        match self {
            Page::Graphs => "Graphs",
            Page::Alerts => "Alerts",
            Page::Contact => "Contact",
            Page::About => "About",
        }
    }
}

pub struct ThroughputApp {
    shell: HostShell,
    notifier: Notifier,
    mode: Mode,
    view: TelemetryView,
    page: Page,
    slider: Slider,
    crosshair: Crosshair,
    frame_info: FrameInfo,
}

impl ThroughputApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: &Config,
        mode: Mode,
        notifier: Notifier,
        shell: HostShell,
    ) -> Self {
        log::info!("Creating ThroughputApp");
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let generator = SampleGenerator::from_entropy(config.series);
        let mut view = TelemetryView::new(config, generator);
        view.start(Instant::now(), Utc::now().timestamp_millis());

        Self {
            shell,
            notifier,
            mode,
            view,
            page: Page::Graphs,
            slider: Slider::default(),
            crosshair: Crosshair::default(),
            frame_info: FrameInfo::default(),
        }
    }

    fn header(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                ui.add_space((ui.available_width() / 2.0 - 160.0).max(0.0));
                for page in Page::ALL {
                    if ui.selectable_label(self.page == page, page.title()).clicked() {
                        self.notifier.notify(HostEvent::Ping);
                        self.page = page;
                    }
                    ui.add_space(12.0);
                }
            });
        });
    }

    fn legend(&mut self, ui: &mut egui::Ui) {
        for series in Series::ALL {
            let shown = self.view.data_window().is_visible(series);
            let color = if shown { series.color() } else { egui::Color32::GRAY };
            let text = egui::RichText::new(format!("● {}", series.label())).color(color);
            if ui.selectable_label(shown, text).clicked() {
                self.view.toggle_series(series);
            }
        }
    }

    fn history_controls(&mut self, ui: &mut egui::Ui) {
        let timeframe = *self.view.data_window().timeframe();
        if ui
            .add_enabled(timeframe.can_increase(), egui::Button::new("+"))
            .clicked()
        {
            self.view.increase_timeframe();
        }
        ui.label(timeframe.label());
        if ui
            .add_enabled(timeframe.can_decrease(), egui::Button::new("-"))
            .clicked()
        {
            self.view.decrease_timeframe();
        }
        ui.colored_label(axes::LABEL_COLOR, "History:");
    }

    fn main_chart(&mut self, ui: &mut egui::Ui, height: f32) {
        let (rect, response) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), height),
            egui::Sense::hover(),
        );
        let plot_rect = egui::Rect::from_min_max(
            egui::pos2(rect.left() + settings::CHART_LEFT_MARGIN, rect.top() + settings::CHART_MARGIN),
            egui::pos2(
                rect.right() - settings::CHART_MARGIN,
                rect.bottom() - settings::CHART_BOTTOM_MARGIN,
            ),
        );
        let painter = ui.painter_at(rect);

        let levels = self.view.data_window_mut().reference_levels().to_vec();
        let data_window = self.view.data_window();
        let value_range = axes_util::value_range(data_window.max_visible_value(), &levels);

        axes::draw(&painter, plot_rect, data_window.visible_samples(), &levels, value_range);
        areachart::draw(
            &painter,
            plot_rect,
            data_window.visible_samples(),
            data_window.visibility(),
            value_range,
            2.0,
        );

        if let Some(pos) = response.hover_pos() {
            if plot_rect.contains(pos) && !self.slider.is_dragging() {
                self.crosshair.draw(
                    &painter,
                    plot_rect,
                    data_window.visible_samples(),
                    data_window.visibility(),
                    pos,
                );
            }
        }
    }

    fn overview_chart(&self, ui: &mut egui::Ui) {
        let (rect, _) = ui.allocate_exact_size(
            egui::vec2(ui.available_width(), settings::OVERVIEW_CHART_HEIGHT),
            egui::Sense::hover(),
        );
        let painter = ui.painter_at(rect);
        painter.rect_filled(rect, 0.0, egui::Color32::from_rgb(0x18, 0x18, 0x18));

        let data_window = self.view.data_window();
        let visibility = data_window.visibility();
        let max = data_window
            .samples()
            .flat_map(|s| visibility.visible().map(move |k| s.value(k)))
            .fold(settings::REFERENCE_FLOOR, f64::max);
        areachart::draw(
            &painter,
            rect.shrink(2.0),
            data_window.samples(),
            visibility,
            (0.0, max * settings::Y_AXIS_HEADROOM),
            1.0,
        );
    }

    fn graphs_page(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            self.legend(ui);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                self.history_controls(ui);
            });
        });
        ui.add_space(8.0);

        let height = (ui.available_height() * settings::MAIN_CHART_HEIGHT_RATIO).max(120.0);
        self.main_chart(ui, height);
        ui.add_space(8.0);
        self.slider.show(ui, self.view.data_window_mut());
        ui.add_space(4.0);
        self.overview_chart(ui);
        ui.add_space(12.0);
        stats_panel(ui, self.view.stats());
    }

    fn about_page(&self, ui: &mut egui::Ui) {
        ui.heading(settings::APP_NAME);
        ui.label("Simulated network throughput viewer.");
        ui.label(format!("App id: {}", settings::APP_ID));
        ui.horizontal(|ui| {
            ui.label("Built with");
            if ui.link("egui").clicked() {
                host::open_external(ui.ctx(), settings::EGUI_URL);
            }
        });
    }
}

fn stats_panel(ui: &mut egui::Ui, stats: &TrafficStats) {
    ui.columns(3, |cols| {
        cols[0].colored_label(Series::Upload.color(), "Upload");
        cols[0].heading(format!("{:.1} KB", stats.upload_kb));
        cols[0].label(format!("{:.0} KB/s", stats.upload_speed));

        cols[1].colored_label(Series::Total.color(), "Total");
        cols[1].heading(format!("{:.1} KB", stats.total_kb));

        cols[2].colored_label(Series::Download.color(), "Download");
        cols[2].heading(format!("{:.1} KB", stats.download_kb));
        cols[2].label(format!("{:.0} KB/s", stats.download_speed));
    });
    ui.add_space(6.0);
    ui.columns(2, |cols| {
        for (col, name, value, scale) in [
            (0, "WAN", stats.wan_kb, settings::WAN_BAR_SCALE),
            (1, "LAN", stats.lan_kb, settings::LAN_BAR_SCALE),
        ] {
            cols[col].colored_label(axes::LABEL_COLOR, name);
            cols[col].label(format!("{:.1} KB", value));
            cols[col].add(egui::ProgressBar::new((value / scale).min(1.0) as f32));
        }
    });
}

impl eframe::App for ThroughputApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let frame_start = Instant::now();
        self.shell.begin_frame(ctx);
        self.view.poll(frame_start, Utc::now().timestamp_millis());

        self.header(ctx);

        if self.mode.is_dev() {
            egui::TopBottomPanel::bottom("dev").show(ctx, |ui| {
                ui.label(format!(
                    "{} | pings {} | {} samples",
                    self.frame_info.summary(),
                    self.shell.pings(),
                    self.view.data_window().len()
                ));
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.page {
            Page::Graphs => self.graphs_page(ui),
            Page::About => self.about_page(ui),
            Page::Alerts | Page::Contact => {
                ui.centered_and_justified(|ui| {
                    ui.label(format!("{} is not available yet.", self.page.title()));
                });
            }
        });

        self.shell.end_frame(ctx);
        if let Some(wait) = self.view.until_next_tick(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
        self.frame_info.record_frame_time(frame_start.elapsed());
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.view.stop();
    }
}
