use std::process::ExitCode;

use bevy::prelude::*;
use bevy::window::PresentMode;
use bevy::winit::WinitSettings;

use simulation::sim_params::SimParams;

mod headless;

/// Game time simulated by `--headless` when no duration is given.
const DEFAULT_HEADLESS_SECONDS: f32 = 30.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Mode {
    Windowed,
    Headless { seconds: f32 },
}

fn parse_args(args: &[String]) -> Result<Mode, String> {
    match args {
        [] => Ok(Mode::Windowed),
        [flag] if flag == "--headless" => Ok(Mode::Headless {
            seconds: DEFAULT_HEADLESS_SECONDS,
        }),
        [flag, secs] if flag == "--headless" => match secs.parse::<f32>() {
            Ok(seconds) if seconds > 0.0 && seconds.is_finite() => Ok(Mode::Headless { seconds }),
            _ => Err(format!("invalid duration: {secs}")),
        },
        other => Err(format!("unexpected arguments: {}", other.join(" "))),
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mode = match parse_args(&args) {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("{e}\nusage: cwtn [--headless [SECONDS]]");
            return ExitCode::FAILURE;
        }
    };

    match mode {
        Mode::Windowed => {
            run_windowed();
            ExitCode::SUCCESS
        }
        Mode::Headless { seconds } => {
            let mut app = headless::build_app();
            let report = headless::run(&mut app, seconds);
            match serde_json::to_string_pretty(&report) {
                Ok(json) => {
                    println!("{json}");
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    eprintln!("failed to encode report: {e}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}

fn run_windowed() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "City Without Thirteen".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }))
    .insert_resource(WinitSettings::game());

    // Read after DefaultPlugins so problems with the file are logged.
    app.insert_resource(SimParams::from_env()).add_plugins((
        simulation::SimulationPlugin,
        rendering::RenderingPlugin,
        ui::UiPlugin,
    ));

    app.run();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_no_arguments_opens_a_window() {
        assert_eq!(parse_args(&[]), Ok(Mode::Windowed));
    }

    #[test]
    fn test_headless_duration() {
        assert_eq!(
            parse_args(&args(&["--headless"])),
            Ok(Mode::Headless {
                seconds: DEFAULT_HEADLESS_SECONDS
            })
        );
        assert_eq!(
            parse_args(&args(&["--headless", "12.5"])),
            Ok(Mode::Headless { seconds: 12.5 })
        );
        assert!(parse_args(&args(&["--headless", "-1"])).is_err());
        assert!(parse_args(&args(&["--fast"])).is_err());
    }
}
