//! Wires input events to the particle scene and the page glue.

use backdrop_config::Config;
use backdrop_core::{InputEvent, KeyChord, Millis, RandomSource, Rect, RngSource, SwipeDirection, Vec2, Viewport};
use backdrop_page::{CardKind, Page, PageEffect, PageLayout, SimulatedPlayer};
use backdrop_render::{RasterSurface, RenderError};
use backdrop_simulation::{AdaptivePolicy, FrameDriver, FrameSummary, Scene, SceneSettings, SnakeSettings};
use log::{debug, info};

/// One page session: the backdrop scene, the page around it and the canvas.
pub struct App {
    driver: FrameDriver,
    page: Page<SimulatedPlayer>,
    raster: RasterSurface,
    touch_start_y: f32,
}

impl App {
    /// Builds a session seeded from the config, or from entropy when it has
    /// no seed.
    pub fn from_config(config: &Config, now: Millis) -> Result<Self, RenderError> {
        let rng: Box<dyn RandomSource> = match config.seed {
            Some(seed) => Box::new(RngSource::seeded(seed)),
            None => Box::new(RngSource::from_entropy()),
        };
        Self::new(config, rng, now)
    }

    pub fn new(config: &Config, rng: Box<dyn RandomSource>, now: Millis) -> Result<Self, RenderError> {
        let viewport = Viewport::new(config.viewport.width, config.viewport.height);
        let raster = RasterSurface::new(viewport.width.round() as u32, viewport.height.round() as u32)?;
        let scene = Scene::new(scene_settings(config), viewport, rng);
        info!(
            "Backdrop {}x{} with {} particles{}",
            viewport.width,
            viewport.height,
            scene.particles.len(),
            if config.reduced_motion { " (reduced motion)" } else { "" }
        );

        let player = SimulatedPlayer::new(config.video.available, config.video.autoplay_blocked);
        let page = Page::new(page_layout(config), player, config.mobile, now);

        Ok(Self {
            driver: FrameDriver::new(scene),
            page,
            raster,
            touch_start_y: 0.0,
        })
    }

    pub fn scene(&self) -> &Scene {
        self.driver.scene()
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        self.driver.scene_mut()
    }

    pub fn page(&self) -> &Page<SimulatedPlayer> {
        &self.page
    }

    pub fn raster(&self) -> &RasterSurface {
        &self.raster
    }

    pub fn frames(&self) -> u64 {
        self.driver.frames_driven()
    }

    pub fn handle(&mut self, event: &InputEvent, now: Millis) {
        debug!("Input at {:.0} ms: {:?}", now, event);
        let scene = self.driver.scene_mut();
        match *event {
            InputEvent::PointerMoved { x, y } => scene.pointer_moved(x, y),
            InputEvent::Resized { width, height } => {
                scene.resize(width, height);
                self.page.resized(height);
            }
            InputEvent::HeroHover => scene.emit_logo_burst(now),
            InputEvent::BrandHover => scene.snake.reveal(now),
            InputEvent::ButtonHover { bounds } => scene.emit_button_sparks(bounds, now),
            InputEvent::ButtonClick { bounds, x, y } => self.page.button_clicked(bounds, Vec2::new(x, y), now),
            InputEvent::PhoneFrameHover => self.page.phone_hovered(now),
            InputEvent::CardHover { index } => self.page.card_hovered(index, now),
            InputEvent::PhoneFrameClick => {
                self.page.boot_requested(now);
            }
            InputEvent::PowerPressed => {
                let effects = self.page.power_pressed(now);
                self.apply(effects, now);
            }
            InputEvent::VideoTapped => {
                let effects = self.page.video_tapped(now);
                self.apply(effects, now);
            }
            InputEvent::VideoError => {
                let effects = self.page.video_failed(now);
                self.apply(effects, now);
            }
            InputEvent::Key { chord } => self.handle_key(chord, now),
            InputEvent::TouchStart { y } => self.touch_start_y = y,
            InputEvent::TouchEnd { y } => {
                if let Some(direction) = SwipeDirection::from_touch(self.touch_start_y, y) {
                    scene.emit_swipe_burst(direction, now);
                }
            }
            InputEvent::Scrolled { y } => {
                self.page.scrolled(y, now);
            }
            InputEvent::HamburgerClicked => self.page.nav.toggle_menu(),
            InputEvent::MenuLinkClicked => self.page.nav.close_menu(),
        }
    }

    fn handle_key(&mut self, chord: KeyChord, now: Millis) {
        match chord {
            KeyChord::CtrlS => {
                let visible = self.driver.scene_mut().snake.toggle();
                info!("Snake mode: {}", if visible { "ON" } else { "OFF" });
            }
            KeyChord::CtrlN => {
                self.page.boot_requested(now);
            }
            KeyChord::Escape => self.page.nav.close_menu(),
            KeyChord::Other => {}
        }
    }

    /// Advances the page, then simulates and draws one backdrop frame.
    pub fn frame(&mut self, now: Millis) -> FrameSummary {
        let effects = self.page.tick(now);
        self.apply(effects, now);
        self.driver.step(now, &mut self.raster)
    }

    fn apply(&mut self, effects: Vec<PageEffect>, now: Millis) {
        for effect in effects {
            match effect {
                PageEffect::Celebrate { center } => self.driver.scene_mut().emit_celebration(center, now),
            }
        }
    }
}

pub fn scene_settings(config: &Config) -> SceneSettings {
    let adaptive = &config.adaptive;
    SceneSettings {
        area_per_particle: config.particles.area_per_particle,
        max_count: config.particles.max_count,
        attraction_radius: config.particles.attraction_radius,
        link_distance: config.particles.link_distance,
        adaptive: AdaptivePolicy {
            sample_ms: adaptive.sample_ms,
            low_fps: adaptive.low_fps,
            high_fps: adaptive.high_fps,
            min_count_to_shrink: adaptive.min_count_to_shrink,
            max_count_to_refill: adaptive.max_count_to_refill,
            shrink_factor: adaptive.shrink_factor,
        },
        snake: SnakeSettings {
            step: config.snake.step,
            turn_probability: config.snake.turn_probability,
            visible_ms: config.snake.visible_ms,
        },
        reduced_motion: config.reduced_motion,
        support_region: config.layout.support_section.map(|r| Rect::new(r.x, r.y, r.width, r.height)),
    }
}

pub fn page_layout(config: &Config) -> PageLayout {
    let layout = &config.layout;
    PageLayout {
        phone_frame: layout.phone_frame.map(|r| Rect::new(r.x, r.y, r.width, r.height)),
        viewport_height: config.viewport.height,
        document_height: layout.document_height,
        parallax_shapes: layout.parallax_shapes,
        hero_title: config.page.hero_title.clone(),
        counters: config.page.counters.clone(),
        cards: layout
            .cards
            .iter()
            .filter_map(|card| CardKind::from_class(&card.kind).map(|kind| (kind, card.top)))
            .collect(),
    }
}
