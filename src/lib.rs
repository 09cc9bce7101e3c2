// lib.rs

pub mod app_ui;
pub mod areachart;
pub mod axes;
pub mod axes_util;
pub mod config;
pub mod crosshair;
pub mod datawindow;
pub mod drawing_util;
pub mod error;
pub mod host;
pub mod performance;
pub mod series;
pub mod settings;
pub mod slider;
pub mod stats;
pub mod telemetry;
pub mod ticker;
pub mod timeframe;
pub mod view;

pub use error::{Error, Result};
