//! Breakdown entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, PointerEvent, TouchEvent};

    use breakdown::GameConfig;
    use breakdown::audio::{AudioManager, WebAudio};
    use breakdown::consts::*;
    use breakdown::sim::{Entity, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        config: GameConfig,
        state: GameState,
        audio: AudioManager,
        ctx: CanvasRenderingContext2d,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let events = tick(&mut self.state, &self.input, &self.config, SIM_DT);
                self.audio.handle_events(&events);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }
        }

        /// Draw one frame. Field y points up, canvas y points down.
        fn render(&self) {
            let field = self.state.field;
            self.ctx.set_fill_style_str("black");
            self.ctx
                .fill_rect(0.0, 0.0, field.width() as f64, field.height() as f64);

            for block in &self.state.blocks {
                self.fill_entity(block);
            }
            self.fill_entity(&self.state.paddle.body);
            self.fill_entity(&self.state.ball);
        }

        fn fill_entity(&self, entity: &Entity) {
            let field_height = self.state.field.height();
            let min = entity.rect.min();
            let max = entity.rect.max();
            self.ctx.set_fill_style_str(&entity.color.css());
            self.ctx.fill_rect(
                min.x as f64,
                (field_height - max.y) as f64,
                entity.rect.width() as f64,
                entity.rect.height() as f64,
            );
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Breakdown starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // One canvas pixel per field unit
        let width = canvas.client_width().max(1) as u32;
        let height = canvas.client_height().max(1) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let config = GameConfig::default()
            .with_field_size(width as f32, height as f32)
            .fit_ball_start();
        if let Err(e) = config.validate() {
            log::error!("Canvas {width}x{height} can't host a game: {e}");
            return;
        }
        let seed = config.seed.unwrap_or(js_sys::Date::now() as u64);
        let audio = AudioManager::new(
            Some(Box::new(WebAudio::new(config.audio.asset_dir.clone()))),
            &config.audio,
        );
        let state = GameState::new(&config, seed);

        let game = Rc::new(RefCell::new(Game {
            config,
            state,
            audio,
            ctx,
            accumulator: 0.0,
            last_time: 0.0,
            input: TickInput::default(),
        }));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Breakdown running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Pointer move (mouse and pen); latest position wins
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                game.borrow_mut().input.pointer_x = Some(event.offset_x() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    game.borrow_mut().input.pointer_x = Some(x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let game = game.clone();
            let Some(window) = web_sys::window() else { return };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "i" | "I" => {
                        g.input.idle_mode = !g.input.idle_mode;
                        log::info!("Idle mode: {}", g.input.idle_mode);
                    }
                    "m" | "M" => {
                        g.config.audio.muted = !g.config.audio.muted;
                        let muted = g.config.audio.muted;
                        g.audio.set_muted(muted);
                    }
                    _ => {}
                }
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
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

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Breakdown (native) starting...");
    log::info!("Native mode runs a headless autoplay session - use the wasm build to play");

    native::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use breakdown::audio::{AudioManager, FileAudio};
    use breakdown::consts::SIM_DT;
    use breakdown::GameConfig;
    use breakdown::sim::{GameEvent, GameState, TickInput, tick};

    use anyhow::{Context, Result};

    /// Simulated session length
    const DEMO_SECONDS: u64 = 180;

    /// Play one autoplay session and print a JSON summary.
    /// The only argument is an optional path to a JSON config.
    pub fn run() -> Result<()> {
        let config = match std::env::args().nth(1) {
            Some(path) => GameConfig::load(&path)
                .with_context(|| format!("failed to load config from {path}"))?,
            None => GameConfig::default(),
        };

        let seed = config.seed.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u64)
                .unwrap_or(0)
        });

        let audio = AudioManager::new(
            Some(Box::new(FileAudio::new(&config.audio.asset_dir))),
            &config.audio,
        );
        let mut state = GameState::new(&config, seed);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        let max_ticks = (DEMO_SECONDS as f32 / SIM_DT) as u64;
        let mut paddle_hits = 0u64;
        let mut cleared = false;
        while state.time_ticks < max_ticks && !cleared {
            let events = tick(&mut state, &input, &config, SIM_DT);
            audio.handle_events(&events);
            paddle_hits += events.iter().filter(|e| **e == GameEvent::PaddleHit).count() as u64;
            cleared = events.contains(&GameEvent::FieldCleared);
        }

        let summary = serde_json::json!({
            "seed": seed,
            "ticks": state.time_ticks,
            "seconds": state.time_ticks as f32 * SIM_DT,
            "score": state.score,
            "blocks_left": state.blocks.len(),
            "paddle_hits": paddle_hits,
            "cleared": cleared,
            "ball_speed": state.ball.vel.length(),
        });
        println!("{summary:#}");
        Ok(())
    }
}
