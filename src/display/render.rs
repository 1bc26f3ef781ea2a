use super::glyphs::{place, CAPS_LOCK, DEGREE, FLAME, GLYPH_COLUMN, PAIRED_GLYPH_COLUMN, WARNING};
use super::marquee::{Marquee, MarqueeView};
use crate::thermal::{ThresholdPair, Thresholds};

/// Flame glyph is shown on phases that are a multiple of this.
pub const FLAME_CADENCE_MS: i64 = 500;
/// Phases of the display cycle on which the warning glyph is shown.
pub const WARNING_PHASES: [i64; 5] = [2000, 1750, 1000, 750, 0];

/// The two text lines pushed to the screen for one tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub line1: String,
    pub line2: String,
}

/// Everything one frame depends on.
#[derive(Debug, Clone, Copy)]
pub struct RenderInput<'a> {
    pub cpu: Option<f32>,
    pub gpu: Option<f32>,
    pub hot_spot: Option<f32>,
    pub thresholds: &'a Thresholds,
    pub cpu_indicators: bool,
    pub gpu_indicators: bool,
    /// Caps-lock state, already masked by the indicator setting.
    pub caps_lock: bool,
    pub paste_alert: bool,
    pub phase: i64,
    pub marquee: &'a Marquee,
}

/// Where a temperature sits relative to its thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Band {
    Normal,
    Warning,
    Critical,
}

impl Band {
    pub fn classify(temp: f32, pair: &ThresholdPair) -> Self {
        if temp < pair.warning {
            Band::Normal
        } else if temp >= pair.midpoint() {
            Band::Critical
        } else {
            Band::Warning
        }
    }

    fn glyph(self, phase: i64) -> Option<char> {
        match self {
            Band::Normal => None,
            Band::Critical => (phase % FLAME_CADENCE_MS == 0).then_some(FLAME),
            Band::Warning => WARNING_PHASES.contains(&phase).then_some(WARNING),
        }
    }
}

pub fn render(input: &RenderInput<'_>) -> Frame {
    let line1 = cpu_line(
        input.cpu,
        &input.thresholds.cpu,
        input.cpu_indicators,
        input.caps_lock,
        input.phase,
    );
    let line2 = if input.paste_alert {
        match input.marquee.view() {
            MarqueeView::Banner(offset) => input.marquee.rotated(offset),
            MarqueeView::GpuTemperature => gpu_line(
                input.gpu,
                &input.thresholds.gpu,
                input.gpu_indicators,
                input.phase,
            ),
            MarqueeView::HotSpot => hot_spot_line(input.hot_spot),
        }
    } else {
        gpu_line(
            input.gpu,
            &input.thresholds.gpu,
            input.gpu_indicators,
            input.phase,
        )
    };
    Frame { line1, line2 }
}

fn cpu_line(
    temp: Option<f32>,
    pair: &ThresholdPair,
    indicators: bool,
    caps_lock: bool,
    phase: i64,
) -> String {
    let Some(temp) = temp else {
        return if caps_lock {
            place("CPU: N/A", GLYPH_COLUMN, &[CAPS_LOCK])
        } else {
            "CPU: N/A".to_string()
        };
    };

    let base = format_temperature("CPU: ", temp);
    let band = if indicators {
        Band::classify(temp, pair)
    } else {
        Band::Normal
    };
    match (band.glyph(phase), caps_lock) {
        (Some(glyph), true) => place(&base, PAIRED_GLYPH_COLUMN, &[CAPS_LOCK, glyph]),
        (Some(glyph), false) => place(&base, GLYPH_COLUMN, &[glyph]),
        // Keep the caps glyph where it sits while an alert blinks beside it.
        (None, true) if band != Band::Normal => place(&base, PAIRED_GLYPH_COLUMN, &[CAPS_LOCK]),
        (None, true) => place(&base, GLYPH_COLUMN, &[CAPS_LOCK]),
        (None, false) => base,
    }
}

fn gpu_line(temp: Option<f32>, pair: &ThresholdPair, indicators: bool, phase: i64) -> String {
    let Some(temp) = temp else {
        return "GPU: N/A".to_string();
    };
    let base = format_temperature("GPU: ", temp);
    if !indicators {
        return base;
    }
    match Band::classify(temp, pair).glyph(phase) {
        Some(glyph) => place(&base, GLYPH_COLUMN, &[glyph]),
        None => base,
    }
}

fn hot_spot_line(temp: Option<f32>) -> String {
    match temp {
        Some(temp) => format_temperature("HOTSPOT: ", temp),
        None => "HOT SPOT: N/A".to_string(),
    }
}

fn format_temperature(label: &str, temp: f32) -> String {
    format!("{label}{temp:.1}{DEGREE}C")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::marquee::{HOLD_TICKS, PASTE_BANNER};

    fn thresholds(warning: f32, critical: f32) -> Thresholds {
        let pair = ThresholdPair { warning, critical };
        Thresholds { cpu: pair, gpu: pair }
    }

    fn input<'a>(t: &'a Thresholds, m: &'a Marquee) -> RenderInput<'a> {
        RenderInput {
            cpu: None,
            gpu: None,
            hot_spot: None,
            thresholds: t,
            cpu_indicators: true,
            gpu_indicators: true,
            caps_lock: false,
            paste_alert: false,
            phase: 2000,
            marquee: m,
        }
    }

    #[test]
    fn missing_temperatures_render_not_available() {
        let t = thresholds(80.0, 100.0);
        let m = Marquee::default();
        let frame = render(&input(&t, &m));
        assert_eq!(frame.line1, "CPU: N/A");
        assert_eq!(frame.line2, "GPU: N/A");

        let caps = render(&RenderInput {
            caps_lock: true,
            ..input(&t, &m)
        });
        assert_eq!(caps.line1, "CPU: N/A      🡅");
        assert_eq!(caps.line2, "GPU: N/A");
    }

    #[test]
    fn normal_temperatures_render_plainly() {
        let t = thresholds(80.0, 100.0);
        let m = Marquee::default();
        let frame = render(&RenderInput {
            cpu: Some(45.3),
            gpu: Some(60.0),
            ..input(&t, &m)
        });
        assert_eq!(frame.line1, "CPU: 45.3°C");
        assert_eq!(frame.line2, "GPU: 60.0°C");
    }

    #[test]
    fn lower_band_warns_on_fixed_phases_only() {
        let t = thresholds(80.0, 100.0);
        let m = Marquee::default();
        for phase in (0..=2000).step_by(250) {
            let frame = render(&RenderInput {
                cpu: Some(85.0),
                phase,
                ..input(&t, &m)
            });
            if WARNING_PHASES.contains(&phase) {
                assert_eq!(frame.line1, "CPU: 85.0°C   ⚠", "phase {phase}");
            } else {
                assert_eq!(frame.line1, "CPU: 85.0°C", "phase {phase}");
            }
        }
    }

    #[test]
    fn upper_band_flames_every_half_second() {
        let t = thresholds(80.0, 100.0);
        let m = Marquee::default();
        let at = |phase| {
            render(&RenderInput {
                gpu: Some(90.0),
                phase,
                ..input(&t, &m)
            })
            .line2
        };
        assert_eq!(at(2000), "GPU: 90.0°C   🔥");
        assert_eq!(at(1500), "GPU: 90.0°C   🔥");
        assert_eq!(at(500), "GPU: 90.0°C   🔥");
        assert_eq!(at(1750), "GPU: 90.0°C");
        assert_eq!(at(250), "GPU: 90.0°C");
    }

    #[test]
    fn caps_lock_shares_the_line_with_alert_glyphs() {
        let t = thresholds(80.0, 100.0);
        let m = Marquee::default();
        let at = |cpu, phase| {
            render(&RenderInput {
                cpu: Some(cpu),
                caps_lock: true,
                phase,
                ..input(&t, &m)
            })
            .line1
        };
        assert_eq!(at(95.0, 1000), "CPU: 95.0°C 🡅🔥");
        assert_eq!(at(95.0, 1250), "CPU: 95.0°C 🡅");
        assert_eq!(at(85.0, 1750), "CPU: 85.0°C 🡅⚠");
        assert_eq!(at(85.0, 1500), "CPU: 85.0°C 🡅");
        assert_eq!(at(40.0, 2000), "CPU: 40.0°C   🡅");
    }

    #[test]
    fn disabled_indicators_suppress_glyphs() {
        let t = thresholds(80.0, 100.0);
        let m = Marquee::default();
        let frame = render(&RenderInput {
            cpu: Some(99.0),
            gpu: Some(99.0),
            cpu_indicators: false,
            gpu_indicators: false,
            ..input(&t, &m)
        });
        assert_eq!(frame.line1, "CPU: 99.0°C");
        assert_eq!(frame.line2, "GPU: 99.0°C");

        let caps = render(&RenderInput {
            cpu: Some(99.0),
            cpu_indicators: false,
            caps_lock: true,
            ..input(&t, &m)
        });
        assert_eq!(caps.line1, "CPU: 99.0°C   🡅");
    }

    #[test]
    fn glyph_column_is_independent_of_value_width() {
        let t = thresholds(5.0, 200.0);
        let m = Marquee::default();
        let short = render(&RenderInput {
            cpu: Some(9.0),
            ..input(&t, &m)
        });
        let long = render(&RenderInput {
            cpu: Some(100.0),
            ..input(&t, &m)
        });
        assert_eq!(short.line1.chars().position(|c| c == WARNING), Some(GLYPH_COLUMN));
        assert_eq!(long.line1.chars().position(|c| c == WARNING), Some(GLYPH_COLUMN));
    }

    #[test]
    fn paste_alert_cycles_through_views() {
        let t = thresholds(80.0, 100.0);
        let mut m = Marquee::default();
        let len = PASTE_BANNER.chars().count();

        m.advance();
        let frame = render(&RenderInput {
            gpu: Some(70.0),
            hot_spot: Some(92.0),
            paste_alert: true,
            ..input(&t, &m)
        });
        assert_eq!(frame.line2, crate::display::marquee::rotate(PASTE_BANNER, 1));

        for _ in 0..len {
            m.advance();
        }
        let frame = render(&RenderInput {
            gpu: Some(70.0),
            hot_spot: Some(92.0),
            paste_alert: true,
            ..input(&t, &m)
        });
        assert_eq!(frame.line2, "GPU: 70.0°C");

        for _ in 0..HOLD_TICKS {
            m.advance();
        }
        let with_hot_spot = render(&RenderInput {
            hot_spot: Some(92.0),
            paste_alert: true,
            ..input(&t, &m)
        });
        assert_eq!(with_hot_spot.line2, "HOTSPOT: 92.0°C");
        let without = render(&RenderInput {
            paste_alert: true,
            ..input(&t, &m)
        });
        assert_eq!(without.line2, "HOT SPOT: N/A");
    }

    #[test]
    fn render_is_deterministic() {
        let t = thresholds(80.0, 100.0);
        let m = Marquee::default();
        let args = RenderInput {
            cpu: Some(91.0),
            gpu: Some(84.0),
            caps_lock: true,
            phase: 1000,
            ..input(&t, &m)
        };
        assert_eq!(render(&args), render(&args));
    }
}
