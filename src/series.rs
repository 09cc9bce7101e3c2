// series.rs - the three throughput series, their generation parameters and visibility
use crate::error::Error;
use eframe::egui::Color32;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Series {
    Upload,
    Download,
    Total,
}

impl Series {
    pub const ALL: [Series; 3] = [Series::Upload, Series::Download, Series::Total];

    /// Back-to-front order the areas are painted in.
    pub const PAINT_ORDER: [Series; 3] = [Series::Total, Series::Upload, Series::Download];

    pub fn name(self) -> &'static str {
        match self {
            Series::Upload => "upload",
            Series::Download => "download",
            Series::Total => "total",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Series::Upload => "Upload",
            Series::Download => "Download",
            Series::Total => "Total",
        }
    }

    pub fn color(self) -> Color32 {
        match self {
            Series::Upload => Color32::from_rgb(0xEC, 0x48, 0x99),
            Series::Download => Color32::from_rgb(0x3B, 0x82, 0xF6),
            Series::Total => Color32::from_rgb(0x8B, 0x5C, 0xF6),
        }
    }

    /// Fill opacity at the top of the area; total is drawn lighter.
    pub fn fill_alpha(self) -> f32 {
        match self {
            Series::Total => 0.35,
            _ => 0.5,
        }
    }
}

impl fmt::Display for Series {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Series {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "upload" => Ok(Series::Upload),
            "download" => Ok(Series::Download),
            "total" => Ok(Series::Total),
            _ => Err(Error::UnknownSeries(s.to_string())),
        }
    }
}

/// `clamp(spread * U[0,1) + amplitude * sin(t / period) + offset, 0, ceiling)`
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesParams {
    pub spread: f64,
    pub amplitude: f64,
    pub period_ms: f64,
    pub offset: f64,
    pub ceiling: f64,
}

impl SeriesParams {
    pub const UPLOAD: SeriesParams = SeriesParams {
        spread: 150.0,
        amplitude: 80.0,
        period_ms: 15_000.0,
        offset: 50.0,
        ceiling: 450.0,
    };
    pub const DOWNLOAD: SeriesParams = SeriesParams {
        spread: 200.0,
        amplitude: 100.0,
        period_ms: 12_000.0,
        offset: 80.0,
        ceiling: 600.0,
    };
    pub const TOTAL: SeriesParams = SeriesParams {
        spread: 180.0,
        amplitude: 90.0,
        period_ms: 18_000.0,
        offset: 60.0,
        ceiling: 500.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeriesSet {
    pub upload: SeriesParams,
    pub download: SeriesParams,
    pub total: SeriesParams,
}

impl Default for SeriesSet {
    fn default() -> Self {
        Self {
            upload: SeriesParams::UPLOAD,
            download: SeriesParams::DOWNLOAD,
            total: SeriesParams::TOTAL,
        }
    }
}

impl SeriesSet {
    pub fn get(&self, series: Series) -> &SeriesParams {
        match series {
            Series::Upload => &self.upload,
            Series::Download => &self.download,
            Series::Total => &self.total,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeriesVisibility {
    upload: bool,
    download: bool,
    total: bool,
}

impl Default for SeriesVisibility {
    fn default() -> Self {
        Self {
            upload: true,
            download: true,
            total: true,
        }
    }
}

impl SeriesVisibility {
    pub fn is_visible(&self, series: Series) -> bool {
        match series {
            Series::Upload => self.upload,
            Series::Download => self.download,
            Series::Total => self.total,
        }
    }

    /// Flips the flag and returns the new state.
    pub fn toggle(&mut self, series: Series) -> bool {
        let flag = match series {
            Series::Upload => &mut self.upload,
            Series::Download => &mut self.download,
            Series::Total => &mut self.total,
        };
        *flag = !*flag;
        *flag
    }

    pub fn visible(&self) -> impl Iterator<Item = Series> + '_ {
        Series::ALL.into_iter().filter(|s| self.is_visible(*s))
    }

    pub fn any_visible(&self) -> bool {
        self.upload || self.download || self.total
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Upload".parse::<Series>().unwrap(), Series::Upload);
        assert_eq!(" DOWNLOAD ".parse::<Series>().unwrap(), Series::Download);
        assert_eq!("total".parse::<Series>().unwrap(), Series::Total);
    }

    #[test]
    fn unknown_name_is_an_error() {
        let err = "latency".parse::<Series>().unwrap_err();
        assert!(matches!(err, Error::UnknownSeries(ref name) if name == "latency"));
    }

    #[test]
    fn default_params_are_distinct() {
        let set = SeriesSet::default();
        assert_ne!(set.upload, set.download);
        assert_ne!(set.download, set.total);
        assert_ne!(set.upload, set.total);
    }

    #[test]
    fn toggle_flips_only_one_series() {
        let mut vis = SeriesVisibility::default();
        assert!(!vis.toggle(Series::Download));
        assert!(vis.is_visible(Series::Upload));
        assert!(!vis.is_visible(Series::Download));
        assert!(vis.is_visible(Series::Total));
        assert_eq!(vis.visible().collect::<Vec<_>>(), vec![Series::Upload, Series::Total]);
        assert!(vis.toggle(Series::Download));
        assert_eq!(vis, SeriesVisibility::default());
    }
}
