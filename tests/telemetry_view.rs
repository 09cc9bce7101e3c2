use muninn::config::Config;
use muninn::datawindow::reference_levels;
use muninn::series::{Series, SeriesSet};
use muninn::telemetry::{Sample, SampleGenerator};
use muninn::view::TelemetryView;
use std::time::{Duration, Instant};

fn minute_config() -> Config {
    Config {
        min_timeframe_secs: 60,
        timeframe_step_secs: 60,
        initial_timeframe_secs: 60,
        backfill: false,
        ..Config::default()
    }
}

fn seeded(config: &Config, seed: u64) -> TelemetryView {
    TelemetryView::new(config, SampleGenerator::seeded(config.series, seed))
}

#[test]
fn sixty_second_timeframe_holds_thirty_samples() {
    let config = minute_config();
    let mut view = seeded(&config, 1);
    view.start(Instant::now(), 0);

    let mut first: Option<Sample> = None;
    for i in 1..=30 {
        let s = view.tick(i * 2_000);
        first.get_or_insert(s);
    }
    assert_eq!(view.data_window().len(), 30);
    assert_eq!(view.data_window().oldest().copied(), first);

    view.tick(31 * 2_000);
    let dw = view.data_window();
    assert_eq!(dw.len(), 30);
    assert_eq!(dw.oldest().unwrap().time, 4_000);
    assert_eq!(dw.newest().unwrap().time, 62_000);
}

#[test]
fn timer_driven_samples_respect_bounds_and_capacity() {
    let config = Config::default();
    let params = SeriesSet::default();
    let mut view = seeded(&config, 2);
    let t0 = Instant::now();
    view.start(t0, 1_700_000_000_000);

    for step in 1..=400u64 {
        let now = t0 + Duration::from_millis(step * 2_000);
        view.poll(now, 1_700_000_000_000 + step as i64 * 2_000);
        let dw = view.data_window();
        assert!(dw.len() <= dw.capacity());
    }
    let dw = view.data_window();
    assert_eq!(dw.len(), 150);
    assert!(dw.samples().zip(dw.samples().skip(1)).all(|(a, b)| a.time < b.time));
    for s in dw.samples() {
        for k in Series::ALL {
            let v = s.value(k);
            assert!(v >= 0.0 && v <= params.get(k).ceiling, "{} = {}", k, v);
        }
    }
}

#[test]
fn view_window_invariants_hold_under_arbitrary_input() {
    let config = Config::default();
    let mut view = seeded(&config, 3);
    let inputs = [
        (-100.0, 50.0),
        (10.0, 12.0),
        (299.0, 300.0),
        (400.0, -20.0),
        (150.0, 150.0),
        (0.0, 300.0),
    ];
    for (start, end) in inputs {
        let (s, e) = view.set_view_window(start, end);
        let tf = view.data_window().timeframe().secs() as f64;
        assert!(e - s >= view.data_window().min_window());
        assert!(0.0 <= s && s <= e && e <= tf);
    }

    for secs in [0.0, 42.0, 299.0, 1_000.0] {
        let dw = view.data_window_mut();
        for (s, e) in [dw.drag_start(secs), dw.drag_end(secs), dw.center_view_window(secs)] {
            assert!(e - s >= 30.0, "{}..{}", s, e);
            assert!(0.0 <= s && e <= 300.0);
        }
    }
}

#[test]
fn toggling_series_is_data_idempotent() {
    let config = Config::default();
    let mut view = seeded(&config, 4);
    view.start(Instant::now(), 10_000_000);
    let before: Vec<Sample> = view.data_window().samples().copied().collect();

    for name in ["upload", "Download", "TOTAL"] {
        view.toggle_series_named(name).unwrap();
        view.toggle_series_named(name).unwrap();
    }
    assert!(view.toggle_series_named("jitter").is_err());

    let after: Vec<Sample> = view.data_window().samples().copied().collect();
    assert_eq!(before, after);
    assert!(Series::ALL.iter().all(|&k| view.data_window().is_visible(k)));
}

#[test]
fn reference_levels_track_visible_maximum() {
    let config = Config::default();
    let mut view = seeded(&config, 5);
    view.start(Instant::now(), 10_000_000);
    view.set_view_window(0.0, 300.0);

    let max = view.data_window().max_visible_value().unwrap();
    let levels = view.data_window_mut().reference_levels().to_vec();
    assert_eq!(levels, reference_levels(Some(max)));
    assert!(levels.windows(2).all(|w| w[0] < w[1]));
    assert!(levels.iter().all(|&l| l < max.max(50.0) * 1.1));

    view.toggle_series(Series::Upload);
    view.toggle_series(Series::Download);
    let total_max = view
        .data_window()
        .visible_samples()
        .map(|s| s.total)
        .fold(f64::MIN, f64::max);
    assert_eq!(view.data_window().max_visible_value(), Some(total_max));
}

#[test]
fn timeframe_steps_clamp_and_keep_history() {
    let config = Config::default();
    let mut view = seeded(&config, 6);
    view.start(Instant::now(), 10_000_000);
    assert_eq!(view.set_timeframe(10), 300);
    assert_eq!(view.set_timeframe(99_999), 1_800);
    assert_eq!(view.data_window().len(), 150);
    assert_eq!(view.data_window().capacity(), 900);
    assert_eq!(view.decrease_timeframe(), 1_500);
    assert_eq!(view.set_timeframe(300), 300);
    assert_eq!(view.increase_timeframe(), 600);
    assert_eq!(view.data_window().view_window(), (540.0, 600.0));
}
