use clap::{Parser, Subcommand};
use mc_runtime::{run_lockstep, LockstepOptions, Rig, RigConfig, RuntimeResult};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Parser)]
#[command(name = "mc-cli")]
#[command(about = "Motorloop CLI - closed-loop DC motor control rig", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate rig configuration syntax and parameters
    Validate {
        /// Path to the rig YAML file
        config_path: PathBuf,
    },
    /// Run the closed loop on a virtual clock and export the timeseries
    Simulate {
        /// Path to the rig YAML file
        config_path: PathBuf,
        /// Final virtual time in seconds
        #[arg(long)]
        t_end: f64,
        /// Record every N-th round
        #[arg(long, default_value_t = 1)]
        record_every: usize,
        /// Output CSV file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run the three periodic tasks in real time
    Run {
        /// Path to the rig YAML file
        config_path: PathBuf,
        /// Wall-clock run duration in seconds
        #[arg(long)]
        duration: f64,
    },
}

fn main() -> RuntimeResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { config_path } => cmd_validate(&config_path),
        Commands::Simulate {
            config_path,
            t_end,
            record_every,
            output,
        } => cmd_simulate(&config_path, t_end, record_every, output.as_deref()),
        Commands::Run {
            config_path,
            duration,
        } => cmd_run(&config_path, duration),
    }
}

fn cmd_validate(config_path: &Path) -> RuntimeResult<()> {
    println!("Validating rig config: {}", config_path.display());
    let config = RigConfig::load(config_path)?;
    config.validate()?;
    println!("✓ Rig config is valid");
    println!(
        "  plant: K={}, T={} s, dt={} s",
        config.plant.gain_k, config.plant.tau_t, config.plant.sample_time_s
    );
    println!(
        "  controller: Kp={}, Ki={}, Kd={}, dt={} s",
        config.controller.kp,
        config.controller.ki,
        config.controller.kd,
        config.controller.sample_time_s
    );
    println!("  setpoint period: {} s", config.setpoint_period_s());
    Ok(())
}

fn cmd_simulate(
    config_path: &Path,
    t_end: f64,
    record_every: usize,
    output: Option<&Path>,
) -> RuntimeResult<()> {
    let config = RigConfig::load(config_path)?;
    let record = run_lockstep(
        &config,
        &LockstepOptions {
            t_end_s: t_end,
            record_every,
            ..Default::default()
        },
    )?;

    // Build CSV
    let mut csv = String::from("t_s,setpoint,command,output\n");
    for i in 0..record.len() {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            record.t_s[i], record.setpoint[i], record.command[i], record.output[i]
        ));
    }

    // Write to file or stdout
    if let Some(path) = output {
        std::fs::write(path, csv)?;
        println!("✓ Exported {} rows to {}", record.len(), path.display());
    } else {
        print!("{}", csv);
    }

    Ok(())
}

fn cmd_run(config_path: &Path, duration: f64) -> RuntimeResult<()> {
    let config = RigConfig::load(config_path)?;
    let rig = Rig::new(config)?;

    println!("Running rig for {:.3} s", duration);
    println!(
        "  plant dt = {} s, controller dt = {} s, setpoint period = {} s",
        rig.config().plant.sample_time_s,
        rig.config().controller.sample_time_s,
        rig.config().setpoint_period_s()
    );
    let running = rig.start()?;
    std::thread::sleep(Duration::from_secs_f64(duration.max(0.0)));

    if let Some(measurement) = running.bus().measurement.latest() {
        println!("  final output: {:.6}", measurement.value);
    }

    let reports = running.stop();
    println!("\n=== Task Timing ===");
    for report in &reports {
        println!(
            "  {:<12} {} ticks, {} overruns, max jitter {:.3} ms",
            report.name,
            report.timing.ticks,
            report.timing.overruns,
            report.timing.max_jitter_s * 1e3
        );
    }
    println!("===================");

    Ok(())
}
