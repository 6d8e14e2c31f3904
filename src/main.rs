use std::sync::Arc;

use anyhow::Result;
use glam::Vec2;
use log::{debug, error, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod engine;
mod game;

use engine::assets::AssetLoader;
use engine::game_loop::GameLoop;
use engine::input::InputManager;
use engine::renderer::Renderer;
use game::{Sandbox, CANVAS_HEIGHT, CANVAS_WIDTH};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Crate Drop...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Crate Drop")
        .with_inner_size(winit::dpi::LogicalSize::new(CANVAS_WIDTH, CANVAS_HEIGHT))
        .with_resizable(false)
        .build(&event_loop)?;
    let window = Arc::new(window);

    info!("Window created successfully");

    // Load assets and initialize the renderer
    let assets = AssetLoader::new("assets");
    let mut renderer = pollster::block_on(Renderer::new(
        window.clone(),
        &assets,
        CANVAS_WIDTH,
        CANVAS_HEIGHT,
    ))?;

    let mut sandbox = Sandbox::new();
    let mut input = InputManager::new();
    let mut game_loop = GameLoop::new();

    // Main event loop
    event_loop
        .run(move |event, elwt| {
            match event {
                Event::WindowEvent {
                    event: WindowEvent::CloseRequested,
                    ..
                } => {
                    info!("Close requested, shutting down...");
                    elwt.exit();
                }
                Event::WindowEvent {
                    event: WindowEvent::Resized(physical_size),
                    ..
                } => {
                    renderer.resize(physical_size);
                }
                Event::WindowEvent {
                    event: WindowEvent::KeyboardInput { event, .. },
                    ..
                } => {
                    input.process_keyboard_event(&event);
                }
                Event::WindowEvent {
                    event: WindowEvent::MouseInput { state, button, .. },
                    ..
                } => {
                    input.process_mouse_button(state, button);
                }
                Event::WindowEvent {
                    event: WindowEvent::CursorMoved { position, .. },
                    ..
                } => {
                    let screen = Vec2::new(position.x as f32, position.y as f32);
                    input.process_cursor_moved(renderer.camera().screen_to_canvas(screen));
                }
                Event::WindowEvent {
                    event: WindowEvent::RedrawRequested,
                    ..
                } => {
                    let steps = game_loop.begin_frame();

                    // Apply inputs, draw the pre-update positions, then step
                    sandbox.apply_input(&input);
                    input.update();

                    let status = sandbox.status_line();
                    if let Err(e) = renderer.render(sandbox.world().bodies(), &status) {
                        error!("Render error: {e}");
                    }

                    for _ in 0..steps {
                        sandbox.world_mut().step();
                    }

                    if game_loop.frame_count() % 600 == 0 {
                        debug!(
                            "{:.1} fps, {} steps",
                            game_loop.fps(),
                            game_loop.update_count()
                        );
                    }
                }
                Event::AboutToWait => {
                    // Request redraw on next frame
                    window.request_redraw();
                }
                _ => {}
            }
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
