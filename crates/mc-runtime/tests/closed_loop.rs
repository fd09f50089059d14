//! Closed-loop scenarios: the three nodes wired over the bus, in lockstep
//! and in real time.

use mc_control::{PidConfig, Waveform};
use mc_plant::{IntegratorKind, PlantConfig};
use mc_runtime::{run_lockstep, LockstepOptions, Rig, RigConfig, SetpointConfig};
use std::path::Path;
use std::time::Duration;

/// The original motor-launch parameter set, with the derivative low-pass
/// that makes it stable (see DESIGN.md).
fn step_response_config() -> RigConfig {
    RigConfig {
        plant: PlantConfig {
            gain_k: 2.16,
            tau_t: 0.05,
            sample_time_s: 0.01,
            initial_output: 0.0,
            integrator: IntegratorKind::ForwardEuler,
        },
        setpoint: SetpointConfig {
            waveform: Waveform::Constant { value: 1.0 },
            timer_period_s: None,
        },
        controller: PidConfig {
            kp: 0.5,
            ki: 0.5,
            kd: 0.5,
            sample_time_s: 0.01,
            output_limits: None,
            integral_limit: None,
            derivative_filter_tau_s: Some(0.2),
        },
    }
}

#[test]
fn step_response_settles_within_two_percent() {
    let record = run_lockstep(
        &step_response_config(),
        &LockstepOptions {
            t_end_s: 10.0,
            ..Default::default()
        },
    )
    .expect("lockstep run should succeed");

    assert_eq!(record.len(), 1000, "expected one row per 10 ms round");

    // After 500 rounds (t = 5 s >> T) the output must be inside +/-2% of
    // the 1.0 step and stay there for the rest of the run.
    for (i, output) in record.output.iter().enumerate().skip(499) {
        assert!(
            (output - 1.0).abs() <= 0.02,
            "output {output} left the settling band at round {i}"
        );
    }
}

#[test]
fn step_response_settles_with_rk4_too() {
    let mut config = step_response_config();
    config.plant.integrator = IntegratorKind::Rk4;
    let record = run_lockstep(
        &config,
        &LockstepOptions {
            t_end_s: 10.0,
            ..Default::default()
        },
    )
    .expect("lockstep run should succeed");

    for output in record.output.iter().skip(499) {
        assert!((output - 1.0).abs() <= 0.02);
    }
}

#[test]
fn integrators_agree_on_the_settled_value() {
    let euler = run_lockstep(
        &step_response_config(),
        &LockstepOptions {
            t_end_s: 10.0,
            ..Default::default()
        },
    )
    .expect("euler run");
    let mut config = step_response_config();
    config.plant.integrator = IntegratorKind::Rk4;
    let rk4 = run_lockstep(
        &config,
        &LockstepOptions {
            t_end_s: 10.0,
            ..Default::default()
        },
    )
    .expect("rk4 run");

    let last_euler = *euler.output.last().expect("euler history");
    let last_rk4 = *rk4.output.last().expect("rk4 history");
    assert!(
        (last_euler - last_rk4).abs() < 1e-4,
        "integrators disagree: euler={last_euler} rk4={last_rk4}"
    );
}

#[test]
fn disabled_controller_leaves_plant_at_rest() {
    // With all gains zero the command is exactly zero, so the plant output
    // must remain exactly zero for all time.
    let mut config = step_response_config();
    config.controller.kp = 0.0;
    config.controller.ki = 0.0;
    config.controller.kd = 0.0;
    config.controller.derivative_filter_tau_s = None;
    config.setpoint.waveform = Waveform::Sine {
        amplitude: 2.0,
        omega_rad_s: 1.0,
    };

    let record = run_lockstep(
        &config,
        &LockstepOptions {
            t_end_s: 5.0,
            ..Default::default()
        },
    )
    .expect("lockstep run should succeed");

    assert!(record.command.iter().all(|&command| command == 0.0));
    assert!(record.output.iter().all(|&output| output == 0.0));
}

#[test]
fn sine_reference_keeps_the_loop_bounded() {
    let mut config = step_response_config();
    config.setpoint.waveform = Waveform::Sine {
        amplitude: 2.0,
        omega_rad_s: 1.0,
    };

    let record = run_lockstep(
        &config,
        &LockstepOptions {
            t_end_s: 20.0,
            ..Default::default()
        },
    )
    .expect("lockstep run should succeed");

    assert!(
        record.output.iter().all(|output| output.abs() < 3.0),
        "closed loop diverged under a sine reference"
    );
}

#[test]
fn demo_config_is_valid() {
    let config =
        RigConfig::load(Path::new("../../demos/motor_rig.yaml")).expect("demo config should load");
    config.validate().expect("demo config should validate");
    assert_eq!(config.plant.gain_k, 2.16);
    assert_eq!(config.setpoint_period_s(), config.plant.sample_time_s);
}

#[test]
fn realtime_rig_runs_and_stops_cleanly() {
    let mut config = step_response_config();
    // Fast periods keep the wall-clock cost of the test small.
    config.plant.sample_time_s = 0.002;
    config.controller.sample_time_s = 0.002;

    let rig = Rig::new(config).expect("config should validate");
    let running = rig.start().expect("rig should start");

    std::thread::sleep(Duration::from_millis(200));

    let measurement = running
        .bus()
        .measurement
        .latest()
        .expect("plant should have published");
    assert!(measurement.value.is_finite());
    let command_before = running
        .bus()
        .command
        .latest()
        .expect("controller should have published");

    // Producer stamps are monotonic across polls
    let later = running
        .bus()
        .measurement
        .latest()
        .expect("measurement still present");
    assert!(later.stamp.follows(&measurement.stamp));

    let bus = std::sync::Arc::clone(running.bus_arc());
    let reports = running.stop();
    assert_eq!(reports.len(), 3);
    for report in &reports {
        assert!(
            report.timing.ticks >= 20,
            "task {} ticked only {} times",
            report.name,
            report.timing.ticks
        );
    }

    // No dangling periodic callbacks: nothing publishes after stop()
    let seq_at_stop = bus.command.latest().expect("command present").stamp.seq;
    assert!(seq_at_stop >= command_before.stamp.seq);
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(
        bus.command.latest().expect("command present").stamp.seq,
        seq_at_stop
    );
}
