//! Splat Range entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use glam::Vec2;
    use splat_range::Settings;
    use splat_range::consts::*;
    use splat_range::overhead::OverheadView;
    use splat_range::paint::{Coverage, PaintColor, analyze};
    use splat_range::sim::{SurfaceRole, TickInput, WorldState, tick};
    use splat_range::stage::{build_stage, floor_uv, stage_bounds};

    /// Game instance holding all state
    struct Game {
        world: WorldState,
        overhead: OverheadView,
        input: TickInput,
        settings: Settings,
        /// Last computed color tally for the floor, shown in the HUD
        coverage: Option<Coverage>,
        last_time: f64,
        /// Pending force for the next minimap redraw (stage load, clear)
        force_minimap: bool,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new(seed: u64, settings: Settings) -> Self {
            let mut world = WorldState::new(seed);
            world.selected_color = settings.paint_color;
            world.install_surfaces(build_stage());

            let mut overhead = OverheadView::new();
            if let Some(bounds) = stage_bounds(&world.surfaces) {
                overhead.frame(&bounds);
            }

            Self {
                world,
                overhead,
                input: TickInput::default(),
                settings,
                coverage: None,
                last_time: 0.0,
                force_minimap: true,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Run one simulation tick
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(MAX_FRAME_DT);
            let report = tick(&mut self.world, &self.input, dt);

            // Clear one-shot inputs after processing
            self.input.fire = false;
            self.input.clear_paint = false;

            if report.cleared {
                self.force_minimap = true;
                if self.settings.coverage_after_clear {
                    self.recompute_coverage();
                }
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Re-run the coverage analyzer over the floor's raster
        fn recompute_coverage(&mut self) {
            if let Some(floor) = self.world.surface_by_role(SurfaceRole::Floor) {
                self.coverage = Some(analyze(&floor.paint));
            }
        }

        fn set_paint_color(&mut self, color: PaintColor) {
            self.world.selected_color = color;
            self.settings.paint_color = color;
            self.settings.save();
            log::info!("Paint color: {}", color.as_str());
        }

        /// Redraw the overhead minimap if the throttle grants it
        fn redraw_minimap(&mut self, now: f64) {
            if !self.settings.minimap {
                return;
            }
            // Tolerate a missing display surface: keep any pending force
            let Some(canvas) = minimap_canvas() else {
                return;
            };
            if !self.overhead.should_redraw(now, self.force_minimap) {
                return;
            }
            self.force_minimap = false;

            let Ok(Some(ctx)) = canvas.get_context("2d") else {
                return;
            };
            let Ok(ctx) = ctx.dyn_into::<CanvasRenderingContext2d>() else {
                return;
            };

            let w = canvas.width() as usize;
            let h = canvas.height() as usize;
            if w == 0 || h == 0 {
                return;
            }

            // Top-down floor raster, nearest-sampled into the map
            let mut data = vec![0u8; w * h * 4];
            let floor = self.world.surface_by_role(SurfaceRole::Floor);
            for y in 0..h {
                for x in 0..w {
                    let map = Vec2::new(
                        (x as f32 + 0.5) / w as f32,
                        (y as f32 + 0.5) / h as f32,
                    );
                    let world_point = self.overhead.map_to_world(map);
                    let i = (y * w + x) * 4;
                    let rgb = floor
                        .and_then(|f| {
                            floor_uv(world_point).map(|uv| {
                                let size = f.paint.size();
                                let tx = ((uv.x * size as f32) as usize).min(size - 1);
                                let ty = (((1.0 - uv.y) * size as f32) as usize).min(size - 1);
                                f.paint.pixel(tx, ty)
                            })
                        })
                        .unwrap_or(splat_range::paint::Rgb::new(24, 24, 32));
                    data[i] = rgb.r;
                    data[i + 1] = rgb.g;
                    data[i + 2] = rgb.b;
                    data[i + 3] = 255;
                }
            }

            if let Ok(image) = web_sys::ImageData::new_with_u8_clamped_array_and_sh(
                Clamped(&data),
                w as u32,
                h as u32,
            ) {
                let _ = ctx.put_image_data(&image, 0.0, 0.0);
            }

            // Cube footprint and live projectiles on top of the floor
            if let Some(cube) = self.world.surface_by_role(SurfaceRole::Cube) {
                if let Some(aabb) = cube.mesh.aabb() {
                    let lo = self.overhead.world_to_map(aabb.min);
                    let hi = self.overhead.world_to_map(aabb.max);
                    ctx.set_stroke_style_str("#ff8c00");
                    ctx.stroke_rect(
                        (lo.x * w as f32) as f64,
                        (lo.y * h as f32) as f64,
                        ((hi.x - lo.x) * w as f32) as f64,
                        ((hi.y - lo.y) * h as f32) as f64,
                    );
                }
            }

            ctx.set_fill_style_str(&self.world.selected_color.rgb().css());
            for projectile in &self.world.projectiles {
                let p = self.overhead.world_to_map(projectile.pos);
                ctx.begin_path();
                let _ = ctx.arc(
                    (p.x * w as f32) as f64,
                    (p.y * h as f32) as f64,
                    2.5,
                    0.0,
                    std::f64::consts::TAU,
                );
                ctx.fill();
            }

            // Viewer marker
            let cam = self.overhead.world_to_map(self.world.camera.pos);
            ctx.set_fill_style_str("#e8e8e8");
            ctx.begin_path();
            let _ = ctx.arc(
                (cam.x * w as f32) as f64,
                (cam.y * h as f32) as f64,
                3.0,
                0.0,
                std::f64::consts::TAU,
            );
            ctx.fill();
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(coverage) = &self.coverage {
                for color in PaintColor::ALL {
                    let id = format!("coverage-{}", color.as_str().to_lowercase());
                    if let Some(el) = document.get_element_by_id(&id) {
                        el.set_text_content(Some(&format!("{:.1}%", coverage.percent(color))));
                    }
                }
            }

            if self.settings.show_fps {
                if let Some(el) = document.get_element_by_id("hud-fps") {
                    el.set_text_content(Some(&self.fps.to_string()));
                }
            }

            if let Some(el) = document.get_element_by_id("hud-shots") {
                el.set_text_content(Some(&self.world.projectiles.len().to_string()));
            }
        }
    }

    fn minimap_canvas() -> Option<HtmlCanvasElement> {
        web_sys::window()?
            .document()?
            .get_element_by_id("minimap")?
            .dyn_into()
            .ok()
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Splat Range starting...");

        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load();
        let game = Rc::new(RefCell::new(Game::new(seed, settings)));
        game.borrow_mut().recompute_coverage();

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Splat Range running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Held keys move; Space fires (edge-triggered, ignoring auto-repeat)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "w" | "W" | "ArrowUp" => g.input.move_forward = true,
                    "s" | "S" | "ArrowDown" => g.input.move_back = true,
                    "a" | "A" | "ArrowLeft" => g.input.move_left = true,
                    "d" | "D" | "ArrowRight" => g.input.move_right = true,
                    " " => {
                        event.prevent_default();
                        if !event.repeat() {
                            g.input.fire = true;
                        }
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "w" | "W" | "ArrowUp" => g.input.move_forward = false,
                    "s" | "S" | "ArrowDown" => g.input.move_back = false,
                    "a" | "A" | "ArrowLeft" => g.input.move_left = false,
                    "d" | "D" | "ArrowRight" => g.input.move_right = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Clear all paint (handled at the top of the next tick so the
        // raster replacement always precedes that frame's impacts)
        if let Some(btn) = document.get_element_by_id("clear-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.clear_paint = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Recompute coverage now
        if let Some(btn) = document.get_element_by_id("coverage-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().recompute_coverage();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Color swatches
        for color in PaintColor::ALL {
            let id = format!("color-{}", color.as_str().to_lowercase());
            if let Some(btn) = document.get_element_by_id(&id) {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().set_paint_color(color);
                });
                let _ =
                    btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                1.0 / 60.0
            };
            g.last_time = time;

            g.update(dt, time);
            g.redraw_minimap(time);
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Splat Range (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    println!("\nFiring a headless demo volley...");
    demo_volley();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn demo_volley() {
    use splat_range::paint::{PaintColor, analyze};
    use splat_range::sim::{SurfaceRole, TickInput, WorldState, tick};
    use splat_range::stage::build_stage;

    let mut world = WorldState::new(0xC0FFEE);
    world.install_surfaces(build_stage());
    // Aim well below the horizon so every shot lands on the stage
    world.camera.pitch = -0.6;

    let dt = 1.0 / 60.0;
    for frame in 0..600u32 {
        let input = TickInput {
            fire: frame < 120 && frame % 12 == 0,
            ..Default::default()
        };
        tick(&mut world, &input, dt);
    }
    assert!(world.projectiles.is_empty(), "volley should have settled");

    let floor = world
        .surface_by_role(SurfaceRole::Floor)
        .expect("stage floor");
    let coverage = analyze(&floor.paint);
    for color in PaintColor::ALL {
        println!("  {:>6}: {:.1}%", color.as_str(), coverage.percent(color));
    }
    println!("✓ Demo volley complete!");
}
