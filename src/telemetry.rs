// telemetry.rs - synthetic throughput samples
use crate::series::{Series, SeriesParams, SeriesSet};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub time: i64, // ms since epoch
    pub upload: f64,
    pub download: f64,
    pub total: f64,
}

impl Sample {
    pub fn value(&self, series: Series) -> f64 {
        match series {
            Series::Upload => self.upload,
            Series::Download => self.download,
            Series::Total => self.total,
        }
    }
}

pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Produces samples from a random source; generic so tests can seed it.
pub struct SampleGenerator<R = StdRng> {
    params: SeriesSet,
    rng: R,
}

impl SampleGenerator<StdRng> {
    pub fn from_entropy(params: SeriesSet) -> Self {
        Self::with_rng(params, StdRng::from_os_rng())
    }

    pub fn seeded(params: SeriesSet, seed: u64) -> Self {
        Self::with_rng(params, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SampleGenerator<R> {
    pub fn with_rng(params: SeriesSet, rng: R) -> Self {
        Self { params, rng }
    }

    pub fn params(&self) -> &SeriesSet {
        &self.params
    }

    pub fn rng(&mut self) -> &mut R {
        &mut self.rng
    }

    fn live_value(&mut self, p: &SeriesParams, time: i64) -> f64 {
        let noise = self.rng.random::<f64>() * p.spread;
        let wave = (time as f64 / p.period_ms).sin() * p.amplitude;
        round1((noise + wave + p.offset).clamp(0.0, p.ceiling))
    }

    fn backfill_value(&mut self, p: &SeriesParams) -> f64 {
        let noise = self.rng.random::<f64>() * p.spread;
        round1((noise + p.offset).clamp(0.0, p.ceiling))
    }

    pub fn generate(&mut self, time: i64) -> Sample {
        let SeriesSet { upload, download, total } = self.params;
        Sample {
            time,
            upload: self.live_value(&upload, time),
            download: self.live_value(&download, time),
            total: self.live_value(&total, time),
        }
    }

    /// `count` samples spaced `tick_ms` apart, the newest one tick before `now`.
    pub fn backfill(&mut self, now: i64, count: usize, tick_ms: i64) -> Vec<Sample> {
        let SeriesSet { upload, download, total } = self.params;
        (0..count)
            .map(|i| {
                let time = now - (count - i) as i64 * tick_ms;
                Sample {
                    time,
                    upload: self.backfill_value(&upload),
                    download: self.backfill_value(&download),
                    total: self.backfill_value(&total),
                }
            })
            .collect()
    }
}
