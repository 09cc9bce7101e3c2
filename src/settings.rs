// settings.rs
pub const APP_NAME: &str = "muninn";
pub const APP_ID: &str = "com.hawkdotdev.muninn";
pub const EGUI_URL: &str = "https://www.egui.rs";

pub const DEV_ENV_VAR: &str = "MUNINN_DEV";
pub const CONFIG_ENV_VAR: &str = "MUNINN_CONFIG";

pub const MIN_WINDOW_WIDTH: f32 = 400.0;
pub const MIN_WINDOW_HEIGHT: f32 = 300.0;

pub const CHART_MARGIN: f32 = 8.0;
pub const CHART_LEFT_MARGIN: f32 = 72.0; // место под подписи оси Y
pub const CHART_BOTTOM_MARGIN: f32 = 20.0;
pub const MAIN_CHART_HEIGHT_RATIO: f32 = 0.55;
pub const OVERVIEW_CHART_HEIGHT: f32 = 48.0;
pub const SLIDER_HEIGHT: f32 = 24.0;
pub const SLIDER_HANDLE_RADIUS: f32 = 8.0;

pub const REFERENCE_FLOOR: f64 = 50.0; // минимальный диапазон для линий сетки
pub const REFERENCE_STEPS: u32 = 4;
pub const REFERENCE_HEADROOM: f64 = 1.1;
pub const Y_AXIS_HEADROOM: f64 = 1.1;
pub const X_LABEL_TARGET: usize = 10;

pub const STATS_UPDATE_PROBABILITY: f64 = 0.2;
pub const WAN_BAR_SCALE: f64 = 800.0;
pub const LAN_BAR_SCALE: f64 = 100.0;

pub const AVERAGE_FRAME_HISTORY_SIZE: usize = 60;
pub const CATCH_UP_WARN_TICKS: u32 = 1;
