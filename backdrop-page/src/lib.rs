//! Page glue around the backdrop: the phone video demo, notices, the boot
//! overlay and the small scroll, text and click effects.
//!
//! Every feature is tied to an element of the page. When the element is
//! missing from the [`PageLayout`] the feature silently does nothing.

pub mod boot;
pub mod counter;
pub mod glow;
pub mod nav;
pub mod notice;
pub mod phone;
pub mod ripple;
pub mod scroll;
pub mod typewriter;

use backdrop_core::{Millis, Rect, Vec2};
use log::debug;

pub use boot::{BootOverlay, OverlayScreen};
pub use counter::Counter;
pub use glow::{Glow, GlowTarget, Glows};
pub use nav::NavBar;
pub use notice::{Notice, NoticeBoard, NoticeLevel};
pub use phone::{PhoneControl, PhoneEffect, PhoneState, PlaybackError, SimulatedPlayer, VideoPlayer};
pub use ripple::Ripple;
pub use scroll::{CardKind, ScrollEffects};
pub use typewriter::Typewriter;

/// Static description of the page the glue operates on.
#[derive(Debug, Clone, PartialEq)]
pub struct PageLayout {
    pub phone_frame: Option<Rect>,
    pub viewport_height: f32,
    pub document_height: f32,
    pub parallax_shapes: usize,
    pub hero_title: Option<String>,
    pub counters: Vec<String>,
    pub cards: Vec<(CardKind, f32)>,
}

impl Default for PageLayout {
    fn default() -> Self {
        Self {
            phone_frame: None,
            viewport_height: 720.0,
            document_height: 4000.0,
            parallax_shapes: 3,
            hero_title: None,
            counters: Vec::new(),
            cards: Vec::new(),
        }
    }
}

/// Requests from the page to the particle scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEffect {
    Celebrate { center: Vec2 },
}

pub struct Page<P: VideoPlayer> {
    pub notices: NoticeBoard,
    phone_frame: Option<Rect>,
    phone: Option<PhoneControl<P>>,
    boot: Option<BootOverlay>,
    typewriter: Option<Typewriter>,
    counters: Vec<Counter>,
    pub nav: NavBar,
    pub scroll: ScrollEffects,
    ripples: Vec<Ripple>,
    glows: Glows,
}

impl<P: VideoPlayer> Page<P> {
    pub fn new(layout: PageLayout, player: P, mobile: bool, now: Millis) -> Self {
        let phone_frame = layout.phone_frame;
        let counters: Vec<Counter> = layout.counters.iter().filter_map(|label| Counter::from_label(label)).collect();
        debug!(
            "Page ready: phone={} title={} counters={}",
            phone_frame.is_some(),
            layout.hero_title.is_some(),
            counters.len()
        );
        Self {
            notices: NoticeBoard::new(),
            phone_frame,
            phone: phone_frame.map(|_| PhoneControl::new(player, mobile)),
            boot: phone_frame.map(|_| BootOverlay::new()),
            typewriter: layout.hero_title.map(|title| Typewriter::new(title, now)),
            counters,
            nav: NavBar::new(),
            scroll: ScrollEffects::new(
                layout.document_height,
                layout.viewport_height,
                layout.parallax_shapes,
                layout.cards,
            ),
            ripples: Vec::new(),
            glows: Glows::default(),
        }
    }

    pub fn phone(&self) -> Option<&PhoneControl<P>> {
        self.phone.as_ref()
    }

    pub fn phone_mut(&mut self) -> Option<&mut PhoneControl<P>> {
        self.phone.as_mut()
    }

    pub fn is_video_playing(&self) -> bool {
        self.phone.as_ref().map_or(false, PhoneControl::is_playing)
    }

    pub fn power_pressed(&mut self, now: Millis) -> Vec<PageEffect> {
        let effects = match self.phone.as_mut() {
            Some(phone) => phone.press(now),
            None => return Vec::new(),
        };
        self.apply(effects, now)
    }

    pub fn video_tapped(&mut self, now: Millis) -> Vec<PageEffect> {
        let effects = match self.phone.as_mut() {
            Some(phone) => phone.tap(),
            None => return Vec::new(),
        };
        self.apply(effects, now)
    }

    pub fn video_failed(&mut self, now: Millis) -> Vec<PageEffect> {
        let effects = match self.phone.as_mut() {
            Some(phone) => phone.device_error(),
            None => return Vec::new(),
        };
        self.apply(effects, now)
    }

    /// Phone-frame click or the Ctrl+N chord.
    pub fn boot_requested(&mut self, now: Millis) -> bool {
        let playing = self.is_video_playing();
        self.boot.as_mut().map_or(false, |overlay| overlay.trigger(now, playing))
    }

    pub fn overlay_screen(&self, now: Millis) -> OverlayScreen {
        self.boot.as_ref().map_or(OverlayScreen::Original, |overlay| overlay.screen(now))
    }

    pub fn button_clicked(&mut self, button: Rect, click: Vec2, now: Millis) {
        self.ripples.push(Ripple::new(button, click, now));
    }

    pub fn ripples(&self) -> &[Ripple] {
        &self.ripples
    }

    /// Lights the phone screen; no-op without a phone frame.
    pub fn phone_hovered(&mut self, now: Millis) {
        if self.phone_frame.is_some() {
            self.glows.start(GlowTarget::PhoneScreen, now);
        }
    }

    /// Lights card `index` in layout order. Unknown cards and kinds without
    /// a hover glow are ignored.
    pub fn card_hovered(&mut self, index: usize, now: Millis) {
        if self.scroll.cards().get(index).map_or(false, |card| card.kind.glows_on_hover()) {
            self.glows.start(GlowTarget::Card(index), now);
        }
    }

    pub fn is_glowing(&self, target: GlowTarget, now: Millis) -> bool {
        self.glows.is_lit(target, now)
    }

    pub fn scrolled(&mut self, scroll_y: f32, now: Millis) -> Vec<CardKind> {
        self.nav.on_scroll(scroll_y);
        self.scroll.on_scroll(scroll_y, now)
    }

    pub fn resized(&mut self, viewport_height: f32) {
        self.scroll.set_viewport_height(viewport_height);
    }

    pub fn hero_title(&self, now: Millis) -> Option<&str> {
        self.typewriter.as_ref().map(|writer| writer.visible(now))
    }

    pub fn counter_texts(&self) -> Vec<String> {
        self.counters.iter().map(Counter::text).collect()
    }

    /// Per-frame housekeeping: due phone transitions, counter steps and
    /// removal of finished notices, ripples and overlays.
    pub fn tick(&mut self, now: Millis) -> Vec<PageEffect> {
        let effects = self.phone.as_mut().map(|phone| phone.tick(now)).unwrap_or_default();
        let page_effects = self.apply(effects, now);

        for counter in &mut self.counters {
            counter.step();
        }
        self.ripples.retain(|ripple| !ripple.is_finished(now));
        self.glows.tick(now);
        if let Some(overlay) = self.boot.as_mut() {
            overlay.tick(now);
        }
        self.notices.tick(now);
        page_effects
    }

    fn apply(&mut self, effects: Vec<PhoneEffect>, now: Millis) -> Vec<PageEffect> {
        let mut page_effects = Vec::new();
        for effect in effects {
            match effect {
                PhoneEffect::Notify(level, message) => self.notices.show(message, level, now),
                PhoneEffect::Celebrate => {
                    if let Some(frame) = self.phone_frame {
                        page_effects.push(PageEffect::Celebrate { center: frame.center() });
                    }
                }
            }
        }
        page_effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::phone::{MSG_MUTED_FALLBACK, MSG_OFF, MSG_ON};

    fn layout() -> PageLayout {
        PageLayout {
            phone_frame: Some(Rect::new(100.0, 100.0, 200.0, 400.0)),
            hero_title: Some("Nokia".to_string()),
            counters: vec!["50M+".to_string(), "Since 1865".to_string()],
            ..PageLayout::default()
        }
    }

    fn page(blocked: bool) -> Page<SimulatedPlayer> {
        Page::new(layout(), SimulatedPlayer::new(true, blocked), false, 0.0)
    }

    #[test]
    fn power_toggles_playback_with_notices() {
        let mut page = page(false);
        assert!(page.power_pressed(0.0).is_empty());

        let effects = page.tick(3300.0);
        assert_eq!(effects, vec![PageEffect::Celebrate { center: Vec2::new(200.0, 300.0) }]);
        assert!(page.is_video_playing());
        let notice = page.notices.current(3400.0).unwrap();
        assert_eq!((notice.level, notice.message.as_str()), (NoticeLevel::Success, MSG_ON));

        page.power_pressed(5000.0);
        assert!(!page.is_video_playing());
        let notice = page.notices.current(5100.0).unwrap();
        assert_eq!((notice.level, notice.message.as_str()), (NoticeLevel::Info, MSG_OFF));
    }

    #[test]
    fn muted_retry_warns_instead_of_failing() {
        let mut page = page(true);
        page.power_pressed(0.0);
        assert!(page.tick(3300.0).is_empty());
        assert!(page.notices.current(3300.0).is_none());

        assert_eq!(page.tick(3800.0).len(), 1);
        let notice = page.notices.current(3900.0).unwrap();
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert_eq!(notice.message, MSG_MUTED_FALLBACK);
    }

    #[test]
    fn missing_phone_frame_disables_phone_features() {
        let layout = PageLayout { phone_frame: None, ..layout() };
        let mut page = Page::new(layout, SimulatedPlayer::new(true, false), false, 0.0);

        assert!(page.power_pressed(0.0).is_empty());
        assert!(page.tick(10_000.0).is_empty());
        assert!(!page.boot_requested(0.0));
        assert!(page.video_tapped(0.0).is_empty());
        assert!(page.phone().is_none());
        assert!(page.notices.current(10_000.0).is_none());
    }

    #[test]
    fn boot_overlay_waits_for_video_to_stop() {
        let mut page = page(false);
        assert!(page.boot_requested(0.0));
        assert!(matches!(page.overlay_screen(400.0), OverlayScreen::Splash { text: "NOKIA", .. }));

        page.power_pressed(3000.0);
        page.tick(6300.0);
        assert!(page.is_video_playing());
        assert!(!page.boot_requested(6400.0));
    }

    #[test]
    fn text_effects_and_ripples_advance_with_ticks() {
        let mut page = page(false);
        assert_eq!(page.hero_title(500.0), Some("N"));
        assert_eq!(page.counter_texts(), vec!["0M+".to_string()]);

        page.button_clicked(Rect::new(0.0, 0.0, 100.0, 40.0), Vec2::new(50.0, 20.0), 100.0);
        assert_eq!(page.ripples().len(), 1);
        page.tick(700.0);
        assert!(page.ripples().is_empty());
        assert_eq!(page.counter_texts(), vec!["0M+".to_string()]);
    }

    #[test]
    fn hover_glows_need_their_element() {
        let layout = PageLayout { cards: vec![(CardKind::Why, 900.0), (CardKind::Timeline, 1200.0)], ..layout() };
        let mut page = Page::new(layout, SimulatedPlayer::new(true, false), false, 0.0);
        page.phone_hovered(0.0);
        page.card_hovered(0, 0.0);
        page.card_hovered(1, 0.0);
        page.card_hovered(5, 0.0);

        assert!(page.is_glowing(GlowTarget::Card(0), 100.0));
        assert!(!page.is_glowing(GlowTarget::Card(1), 0.0));
        assert!(!page.is_glowing(GlowTarget::Card(5), 0.0));

        page.tick(500.0);
        assert!(page.is_glowing(GlowTarget::PhoneScreen, 500.0));
        assert!(!page.is_glowing(GlowTarget::Card(0), 500.0));

        let mut bare = Page::new(PageLayout::default(), SimulatedPlayer::new(true, false), false, 0.0);
        bare.phone_hovered(0.0);
        assert!(!bare.is_glowing(GlowTarget::PhoneScreen, 0.0));
    }

    #[test]
    fn scrolling_updates_nav_and_progress() {
        let mut page = page(false);
        page.scrolled(1640.0, 0.0);
        assert!(page.nav.is_scrolled());
        assert!((page.scroll.progress() - 50.0).abs() < 1e-3);
    }
}
