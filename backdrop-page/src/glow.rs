//! Short-lived glows on hovered page elements.

use backdrop_core::Millis;

pub const PHONE_GLOW_MS: Millis = 2000.0;
pub const CARD_GLOW_MS: Millis = 300.0;

/// Element a glow is attached to. Cards are indexed in layout order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlowTarget {
    PhoneScreen,
    Card(usize),
}

impl GlowTarget {
    pub fn duration(self) -> Millis {
        match self {
            GlowTarget::PhoneScreen => PHONE_GLOW_MS,
            GlowTarget::Card(_) => CARD_GLOW_MS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub target: GlowTarget,
    pub started_at: Millis,
}

impl Glow {
    pub fn is_lit(&self, now: Millis) -> bool {
        now - self.started_at < self.target.duration()
    }
}

/// At most one glow per element; hovering again restarts it.
#[derive(Debug, Default)]
pub struct Glows {
    active: Vec<Glow>,
}

impl Glows {
    pub fn start(&mut self, target: GlowTarget, now: Millis) {
        self.active.retain(|glow| glow.target != target);
        self.active.push(Glow { target, started_at: now });
    }

    pub fn is_lit(&self, target: GlowTarget, now: Millis) -> bool {
        self.active.iter().any(|glow| glow.target == target && glow.is_lit(now))
    }

    pub fn active(&self) -> &[Glow] {
        &self.active
    }

    pub fn tick(&mut self, now: Millis) {
        self.active.retain(|glow| glow.is_lit(now));
    }
}
