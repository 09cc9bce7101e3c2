// stats.rs - cumulative traffic counters shown next to the charts
use crate::settings::STATS_UPDATE_PROBABILITY;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrafficStats {
    pub upload_kb: f64,
    pub download_kb: f64,
    pub upload_speed: f64,
    pub download_speed: f64,
    pub wan_kb: f64,
    pub lan_kb: f64,
    pub total_kb: f64,
}

impl Default for TrafficStats {
    fn default() -> Self {
        Self {
            upload_kb: 521.8,
            download_kb: 235.4,
            upload_speed: 1.0,
            download_speed: 45.0,
            wan_kb: 717.4,
            lan_kb: 39.9,
            total_kb: 757.2,
        }
    }
}

fn walk(rng: &mut impl Rng, value: f64, amplitude: f64) -> f64 {
    (value + (rng.random::<f64>() - 0.5) * amplitude).max(0.0)
}

impl TrafficStats {
    /// Random-walks the counters on roughly one call in five. Returns whether anything changed.
    pub fn maybe_update(&mut self, rng: &mut impl Rng) -> bool {
        if !rng.random_bool(STATS_UPDATE_PROBABILITY) {
            return false;
        }
        self.update(rng);
        true
    }

    pub fn update(&mut self, rng: &mut impl Rng) {
        self.upload_kb = walk(rng, self.upload_kb, 10.0);
        self.download_kb = walk(rng, self.download_kb, 8.0);
        self.upload_speed = rng.random::<f64>() * 5.0;
        self.download_speed = rng.random::<f64>() * 100.0;
        self.wan_kb = walk(rng, self.wan_kb, 15.0);
        self.lan_kb = walk(rng, self.lan_kb, 5.0);
        self.total_kb = walk(rng, self.total_kb, 12.0);
    }
}
