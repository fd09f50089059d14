//! Setpoint generator node.

use crate::bus::Bus;
use crate::task::PeriodicTask;
use mc_control::SetpointGenerator;
use mc_core::{SetpointSample, Stamp};
use std::sync::Arc;

/// Publishes the reference waveform at a fixed period.
///
/// Elapsed time is nominal (tick count times period) from node start, so the
/// published values are a pure function of the tick index — independent of
/// scheduling jitter, and of the period itself at any fixed elapsed time.
pub struct SetpointNode {
    generator: SetpointGenerator,
    period_s: f64,
    bus: Arc<Bus>,
    seq: u64,
}

impl SetpointNode {
    pub fn new(generator: SetpointGenerator, period_s: f64, bus: Arc<Bus>) -> Self {
        Self {
            generator,
            period_s,
            bus,
            seq: 0,
        }
    }
}

impl PeriodicTask for SetpointNode {
    fn name(&self) -> &'static str {
        "setpoint"
    }

    fn tick(&mut self) {
        let stamp = Stamp::at_tick(self.seq, self.period_s);
        let value = self.generator.sample(stamp.elapsed_s);
        self.bus.setpoint.publish(SetpointSample::new(value, stamp));
        self.seq += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mc_control::Waveform;

    fn sine_node(period_s: f64) -> SetpointNode {
        let generator = SetpointGenerator::new(Waveform::Sine {
            amplitude: 2.0,
            omega_rad_s: 1.0,
        })
        .unwrap();
        SetpointNode::new(generator, period_s, Arc::new(Bus::new()))
    }

    #[test]
    fn publishes_sine_of_nominal_time() {
        let mut node = sine_node(0.01);
        for _ in 0..5 {
            node.tick();
        }
        let sample = node.bus.setpoint.latest().unwrap();
        assert_eq!(sample.stamp.seq, 4);
        assert_eq!(sample.value, 2.0 * (0.04f64).sin());
    }

    #[test]
    fn first_sample_is_zero_for_sine() {
        let mut node = sine_node(0.01);
        node.tick();
        assert_eq!(node.bus.setpoint.latest().unwrap().value, 0.0);
    }

    #[test]
    fn period_changes_density_not_values() {
        // Sampling t = 0.06 via 0.01 s or 0.02 s periods yields the same value.
        let mut fast = sine_node(0.01);
        let mut slow = sine_node(0.02);
        for _ in 0..7 {
            fast.tick();
        }
        for _ in 0..4 {
            slow.tick();
        }
        let fast_sample = fast.bus.setpoint.latest().unwrap();
        let slow_sample = slow.bus.setpoint.latest().unwrap();
        assert!((fast_sample.stamp.elapsed_s - slow_sample.stamp.elapsed_s).abs() < 1e-12);
        assert!((fast_sample.value - slow_sample.value).abs() < 1e-12);
    }

    #[test]
    fn stamps_are_monotonic() {
        let mut node = sine_node(0.01);
        node.tick();
        let first = node.bus.setpoint.latest().unwrap().stamp;
        node.tick();
        let second = node.bus.setpoint.latest().unwrap().stamp;
        assert!(second.follows(&first));
    }
}
