// main.rs — interactive navigator window, or headless replay of a gesture script
//
// Usage:
//   celestial-navigator [--config <path>]                     open a window, drag / pinch / twist to look around
//   celestial-navigator [--config <path>] --replay <script>   apply a script, print notifications as JSON lines
//                       [--view-size <W>x<H>]
//
// Keys: G gesture mode, M device-motion mode, R reset view, F11 fullscreen.

use anyhow::{bail, Context};
use celestial_navigator::{
    replay, CameraUniform, NavigationMode, Navigator, NavigatorConfig, Notification,
    UniformObserver, ViewSize, WinitGestureSource,
};
use std::path::Path;
use winit::{
    dpi::LogicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop},
    window::{Fullscreen, WindowBuilder},
};

const WINDOW_TITLE: &str = "Celestial Navigator";
const DEFAULT_VIEW_SIZE: (f32, f32) = (1280.0, 720.0);

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = NavigatorConfig::resolve().context("loading navigator config")?;
    let args: Vec<String> = std::env::args().collect();

    if let Some(script) = flag_value(&args, "--replay") {
        let view_size = match flag_value(&args, "--view-size") {
            Some(v) => parse_view_size(&v)?,
            None => ViewSize::new(DEFAULT_VIEW_SIZE.0, DEFAULT_VIEW_SIZE.1)?,
        };
        return run_replay(&config, Path::new(&script), view_size);
    }

    run_window(config)
}

fn flag_value(args: &[String], flag: &str) -> Option<String> {
    let mut it = args.iter();
    while let Some(a) = it.next() {
        if a == flag {
            return it.next().cloned();
        }
    }
    None
}

fn parse_view_size(value: &str) -> anyhow::Result<ViewSize> {
    let Some((w, h)) = value.split_once('x') else {
        bail!("view size must look like 1280x720, got {value:?}");
    };
    let width: f32 = w.trim().parse().with_context(|| format!("bad width in {value:?}"))?;
    let height: f32 = h.trim().parse().with_context(|| format!("bad height in {value:?}"))?;
    Ok(ViewSize::new(width, height)?)
}

fn run_replay(config: &NavigatorConfig, script: &Path, view_size: ViewSize) -> anyhow::Result<()> {
    let steps = replay::load_script(script)?;
    log::info!("replaying {} steps from {}", steps.len(), script.display());

    let mut navigator = Navigator::from_config(config, view_size, Vec::<Notification>::new())?;
    let outcome = replay::run_script(&mut navigator, &steps);

    for notification in navigator.observer() {
        println!("{}", serde_json::to_string(notification)?);
    }
    log::info!(
        "final: mode {:?}, fov {:.2}°, orientation {:?}",
        navigator.mode(),
        navigator.fov_degrees(),
        navigator.orientation().to_array()
    );

    outcome.with_context(|| format!("replaying {}", script.display()))
}

fn run_window(config: NavigatorConfig) -> anyhow::Result<()> {
    let event_loop = EventLoop::new();
    let window = WindowBuilder::new()
        .with_title(WINDOW_TITLE)
        .with_inner_size(LogicalSize::new(1280, 720))
        .build(&event_loop)
        .context("creating window")?;

    // The navigator keeps this size for its lifetime; resizes only change the projection aspect.
    let size = window.inner_size();
    let view_size = ViewSize::new(size.width as f32, size.height as f32)
        .context("window reported an unusable size")?;

    let state = config.initial_state(view_size)?;
    let uniforms = UniformObserver::new(state.orientation(), state.fov_degrees(), view_size.aspect());
    let mut navigator = Navigator::new(state, config.initial_mode, uniforms).configured(&config)?;

    let mut gestures = WinitGestureSource::new();
    let mut is_fullscreen = false;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    *control_flow = ControlFlow::Exit;
                }

                WindowEvent::Resized(new_size) => {
                    if new_size.width > 0 && new_size.height > 0 {
                        navigator
                            .observer_mut()
                            .set_aspect(new_size.width as f32 / new_size.height as f32);
                    }
                }

                WindowEvent::KeyboardInput { input, .. } if input.state == ElementState::Pressed => {
                    match input.virtual_keycode {
                        Some(VirtualKeyCode::G) => navigator.enter_gesture_mode(),
                        Some(VirtualKeyCode::M) => {
                            // no motion sensor on the desktop: hold the current orientation
                            let current = navigator.orientation();
                            if let Err(err) = navigator.enter_device_motion_mode(current) {
                                log::error!("cannot enter device motion mode: {err}");
                            }
                        }
                        Some(VirtualKeyCode::R) => navigator.reset(),
                        Some(VirtualKeyCode::F11) => {
                            is_fullscreen = !is_fullscreen;
                            if is_fullscreen {
                                window.set_fullscreen(Some(Fullscreen::Borderless(None)));
                            } else {
                                window.set_fullscreen(None);
                            }
                        }
                        _ => {}
                    }
                    window.request_redraw();
                }

                other => {
                    if let Some(gesture) = gestures.handle_event(&other) {
                        if let Err(err) = navigator.apply(gesture) {
                            log::debug!("gesture dropped: {err}");
                        }
                    }
                }
            },

            Event::MainEventsCleared => {
                if navigator.observer().is_dirty() {
                    window.request_redraw();
                }
            }

            Event::RedrawRequested(_) => {
                if let Some(uniform) = navigator.observer_mut().take_dirty() {
                    log::trace!(
                        "camera uniform {:?}, view-projection {:?}",
                        uniform,
                        uniform.view_projection(0.1, 100.0)
                    );
                }
                let uniform = *navigator.observer().uniform();
                window.set_title(&status_line(navigator.mode(), &uniform));
            }

            _ => {}
        }
    })
}

fn status_line(mode: NavigationMode, uniform: &CameraUniform) -> String {
    let mode = match mode {
        NavigationMode::Gesture => "gesture",
        NavigationMode::DeviceMotion => "device motion",
    };
    let direction = uniform.view_direction();
    let azimuth = direction.x.atan2(-direction.z).to_degrees();
    let altitude = direction.y.clamp(-1.0, 1.0).asin().to_degrees();
    format!(
        "{WINDOW_TITLE} | {mode} | FOV: {:.1}° | Az: {azimuth:.1}° | Alt: {altitude:.1}°",
        uniform.fov_rad.to_degrees()
    )
}
