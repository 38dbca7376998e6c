//! Entry point for the height-field viewer.

use anyhow::Result;
use clap::Parser;
use heightfield_viewer::{app::App, config::Config};
use std::sync::Arc;
use winit::{
    event::{Event, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

fn main() -> Result<()> {
    // Initialize logging; default to "info" if RUST_LOG is unset.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::parse();
    log::info!(
        "Starting with topology={} channel={} index-width={} sphere={}",
        config.topology,
        config.channel,
        config.index_width,
        config.sphere_method
    );

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Height Field Viewer")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
            .build(&event_loop)?,
    );

    let mut app = pollster::block_on(App::new(window.clone(), &config))?;

    if let Err(err) = app.open_images(&config.image) {
        log::error!("Failed to open images: {:#}", err);
    }
    window.request_redraw();

    // Frames are drawn only when something asked for one; winit folds
    // pending requests into a single RedrawRequested.
    event_loop.run(move |event, elwt| {
        elwt.set_control_flow(ControlFlow::Wait);

        if let Event::WindowEvent { window_id, event } = event {
            if window_id != window.id() || app.handle_event(&window, &event) {
                return;
            }

            match event {
                WindowEvent::CloseRequested => elwt.exit(),
                WindowEvent::KeyboardInput { event, .. } => {
                    if event.physical_key == PhysicalKey::Code(KeyCode::Escape) {
                        elwt.exit();
                    }
                }
                WindowEvent::RedrawRequested => match app.render(&window) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        app.resize(app.renderer.gfx.size);
                        window.request_redraw();
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("WGPU out of memory – exiting.");
                        elwt.exit();
                    }
                    Err(e) => log::error!("Render error: {:?}", e),
                },
                _ => {}
            }
        }
    })?;

    Ok(())
}
