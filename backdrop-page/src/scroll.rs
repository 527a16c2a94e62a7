//! Scroll-driven page effects: progress bar, parallax shapes, card reveals.

use backdrop_core::Millis;
use log::trace;

/// Scrolling counts as ongoing until this long after the last event.
pub const SCROLL_SETTLE_MS: Millis = 150.0;
/// Cards reveal once their top is this far above the viewport bottom.
pub const REVEAL_MARGIN: f32 = 100.0;
pub const PARALLAX_BASE_SPEED: f32 = 0.3;
pub const PARALLAX_SPEED_STEP: f32 = 0.1;
pub const PARALLAX_ROTATION: f32 = 0.05;

/// Percentage of the scrollable range covered, capped at 100. A page that
/// does not scroll reports 0.
pub fn scroll_progress(scroll_y: f32, document_height: f32, viewport_height: f32) -> f32 {
    let range = document_height - viewport_height;
    if range <= 0.0 {
        return 0.0;
    }
    (scroll_y.max(0.0) / range * 100.0).min(100.0)
}

/// Vertical offset (px) and rotation (degrees) of parallax shape `index`.
pub fn parallax(index: usize, scroll_y: f32) -> (f32, f32) {
    let speed = PARALLAX_BASE_SPEED + index as f32 * PARALLAX_SPEED_STEP;
    (scroll_y * speed, scroll_y * PARALLAX_ROTATION)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardKind {
    Why,
    Phone,
    Timeline,
    Competitor,
    Nokia,
    Support,
}

impl CardKind {
    pub fn from_class(class: &str) -> Option<Self> {
        match class {
            "why-card" => Some(CardKind::Why),
            "phone-card" => Some(CardKind::Phone),
            "timeline-item" => Some(CardKind::Timeline),
            "competitor-card" => Some(CardKind::Competitor),
            "nokia-card" => Some(CardKind::Nokia),
            "support-card" => Some(CardKind::Support),
            _ => None,
        }
    }

    /// Entrance animation played on reveal; other kinds only fade in.
    pub fn reveal_animation(self) -> Option<&'static str> {
        match self {
            CardKind::Why | CardKind::Phone => Some("fadeInUp"),
            CardKind::Timeline => Some("fadeInLeft"),
            _ => None,
        }
    }

    pub fn glows_on_hover(self) -> bool {
        matches!(self, CardKind::Why | CardKind::Phone | CardKind::Competitor)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub kind: CardKind,
    /// Document offset of the card's top edge.
    pub top: f32,
    pub revealed_at: Option<Millis>,
}

pub struct ScrollEffects {
    document_height: f32,
    viewport_height: f32,
    shapes: usize,
    scroll_y: f32,
    last_scroll_at: Option<Millis>,
    cards: Vec<Card>,
}

impl ScrollEffects {
    pub fn new(document_height: f32, viewport_height: f32, shapes: usize, cards: Vec<(CardKind, f32)>) -> Self {
        let mut effects = Self {
            document_height,
            viewport_height,
            shapes,
            scroll_y: 0.0,
            last_scroll_at: None,
            cards: cards.into_iter().map(|(kind, top)| Card { kind, top, revealed_at: None }).collect(),
        };
        effects.reveal_visible(0.0);
        effects
    }

    pub fn set_viewport_height(&mut self, height: f32) {
        self.viewport_height = height;
    }

    /// Records a scroll position; returns the cards revealed by it.
    pub fn on_scroll(&mut self, scroll_y: f32, now: Millis) -> Vec<CardKind> {
        self.scroll_y = scroll_y;
        self.last_scroll_at = Some(now);
        trace!("Scrolled to {} ({:.1}%)", scroll_y, self.progress());
        self.reveal_visible(now)
    }

    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    pub fn progress(&self) -> f32 {
        scroll_progress(self.scroll_y, self.document_height, self.viewport_height)
    }

    pub fn is_scrolling(&self, now: Millis) -> bool {
        self.last_scroll_at.map_or(false, |at| now - at < SCROLL_SETTLE_MS)
    }

    pub fn shape_transforms(&self) -> Vec<(f32, f32)> {
        (0..self.shapes).map(|index| parallax(index, self.scroll_y)).collect()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    fn reveal_visible(&mut self, now: Millis) -> Vec<CardKind> {
        let fold = self.scroll_y + self.viewport_height - REVEAL_MARGIN;
        self.cards
            .iter_mut()
            .filter(|card| card.revealed_at.is_none() && card.top < fold)
            .map(|card| {
                card.revealed_at = Some(now);
                card.kind
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_capped() {
        assert_eq!(scroll_progress(0.0, 3000.0, 1000.0), 0.0);
        assert_eq!(scroll_progress(1000.0, 3000.0, 1000.0), 50.0);
        assert_eq!(scroll_progress(5000.0, 3000.0, 1000.0), 100.0);
        assert_eq!(scroll_progress(10.0, 800.0, 1000.0), 0.0);
    }

    #[test]
    fn parallax_speeds_up_per_shape() {
        let close = |a: f32, b: f32| (a - b).abs() < 1e-4;
        let (offset, rotation) = parallax(0, 100.0);
        assert!(close(offset, 30.0) && close(rotation, 5.0));
        let (offset, rotation) = parallax(2, 100.0);
        assert!(close(offset, 50.0) && close(rotation, 5.0));
    }

    #[test]
    fn animation_names_by_kind() {
        assert_eq!(CardKind::from_class("why-card").unwrap().reveal_animation(), Some("fadeInUp"));
        assert_eq!(CardKind::Timeline.reveal_animation(), Some("fadeInLeft"));
        assert_eq!(CardKind::Support.reveal_animation(), None);
        assert_eq!(CardKind::from_class("footer"), None);
    }

    #[test]
    fn cards_reveal_once_when_scrolled_into_view() {
        let mut effects = ScrollEffects::new(
            4000.0,
            800.0,
            3,
            vec![(CardKind::Why, 300.0), (CardKind::Timeline, 1500.0)],
        );
        assert!(effects.cards()[0].revealed_at.is_some());

        assert!(effects.on_scroll(500.0, 10.0).is_empty());
        assert_eq!(effects.on_scroll(900.0, 20.0), vec![CardKind::Timeline]);
        assert!(effects.on_scroll(0.0, 30.0).is_empty());
        assert_eq!(effects.shape_transforms().len(), 3);
    }

    #[test]
    fn scrolling_flag_settles() {
        let mut effects = ScrollEffects::new(4000.0, 800.0, 0, Vec::new());
        assert!(!effects.is_scrolling(0.0));
        effects.on_scroll(10.0, 1000.0);
        assert!(effects.is_scrolling(1149.0));
        assert!(!effects.is_scrolling(1150.0));
    }
}
