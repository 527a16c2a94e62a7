//! Phone power control and the video it plays.
//!
//! The control walks a fixed boot sequence, then asks the player to start.
//! A refused start is retried once, forced muted, before giving up.

use backdrop_core::Millis;
use log::{error, info, warn};
use thiserror::Error;

use crate::notice::NoticeLevel;

pub const BOOT_DELAY_MS: Millis = 300.0;
pub const RETRY_DELAY_MS: Millis = 500.0;
pub const PLAYBACK_VOLUME: f32 = 0.8;

/// Loading-screen labels and how long each stays up.
pub const BOOT_STEPS: [(&str, Millis); 5] = [
    ("Initializing...", 600.0),
    ("Loading system files...", 700.0),
    ("Starting Nokia OS...", 800.0),
    ("Preparing experience...", 500.0),
    ("Ready to connect!", 400.0),
];

pub const MSG_ON: &str = "Nokia Experience ON!";
pub const MSG_TAP_TO_UNMUTE: &str = "Nokia Experience ON (tap to unmute)";
pub const MSG_MUTED_FALLBACK: &str = "Nokia Experience ON (muted)";
pub const MSG_UNAVAILABLE: &str = "Video not available";
pub const MSG_OFF: &str = "Nokia Experience OFF";
pub const MSG_SOUND_ON: &str = "Sound enabled!";

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("playback with sound was blocked by the autoplay policy")]
    Blocked,
    #[error("video source is not available")]
    Unavailable,
}

/// The video element, reduced to what the control commands and reads.
pub trait VideoPlayer {
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    fn rewind(&mut self);
    fn reload(&mut self);
    fn is_playing(&self) -> bool;

    fn is_muted(&self) -> bool;
    /// Mute state change backed by a user gesture; always honoured.
    fn set_muted(&mut self, muted: bool);
    /// Unmuting without a user gesture, which a policy may refuse.
    fn try_unmute(&mut self) -> Result<(), PlaybackError>;
    fn set_volume(&mut self, volume: f32);
}

/// Headless player following a browser-like autoplay policy.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulatedPlayer {
    pub available: bool,
    /// Refuse audible playback and programmatic unmuting.
    pub autoplay_blocked: bool,
    muted: bool,
    volume: f32,
    playing: bool,
    position_ms: Millis,
    reloads: u32,
}

impl SimulatedPlayer {
    pub fn new(available: bool, autoplay_blocked: bool) -> Self {
        Self {
            available,
            autoplay_blocked,
            muted: false,
            volume: 1.0,
            playing: false,
            position_ms: 0.0,
            reloads: 0,
        }
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn position_ms(&self) -> Millis {
        self.position_ms
    }

    pub fn reloads(&self) -> u32 {
        self.reloads
    }

    /// Moves the playhead while playing.
    pub fn advance(&mut self, elapsed: Millis) {
        if self.playing {
            self.position_ms += elapsed;
        }
    }
}

impl VideoPlayer for SimulatedPlayer {
    fn play(&mut self) -> Result<(), PlaybackError> {
        if !self.available {
            return Err(PlaybackError::Unavailable);
        }
        if self.autoplay_blocked && !self.muted {
            return Err(PlaybackError::Blocked);
        }
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn rewind(&mut self) {
        self.position_ms = 0.0;
    }

    fn reload(&mut self) {
        self.playing = false;
        self.position_ms = 0.0;
        self.reloads += 1;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn try_unmute(&mut self) -> Result<(), PlaybackError> {
        if self.autoplay_blocked {
            return Err(PlaybackError::Blocked);
        }
        self.muted = false;
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PhoneState {
    Off,
    /// `step` labels shown so far; the next one (or playback) is due at `due`.
    Booting { step: usize, due: Millis },
    Retrying { due: Millis },
    Playing { muted: bool },
}

/// What the rest of the page should do after a phone transition.
#[derive(Debug, Clone, PartialEq)]
pub enum PhoneEffect {
    Notify(NoticeLevel, &'static str),
    Celebrate,
}

pub struct PhoneControl<P: VideoPlayer> {
    player: P,
    state: PhoneState,
    mobile: bool,
    loading_text: Option<&'static str>,
}

impl<P: VideoPlayer> PhoneControl<P> {
    pub fn new(player: P, mobile: bool) -> Self {
        Self { player, state: PhoneState::Off, mobile, loading_text: None }
    }

    pub fn state(&self) -> PhoneState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        matches!(self.state, PhoneState::Playing { .. })
    }

    pub fn player(&self) -> &P {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut P {
        &mut self.player
    }

    /// Label on the loading screen while booting.
    pub fn loading_text(&self) -> Option<&'static str> {
        self.loading_text
    }

    /// The power button. Starts the boot sequence when off; otherwise stops
    /// everything, including a boot or retry in progress.
    pub fn press(&mut self, now: Millis) -> Vec<PhoneEffect> {
        match self.state {
            PhoneState::Off => {
                info!("Phone powering on");
                self.state = PhoneState::Booting { step: 0, due: now + BOOT_DELAY_MS };
                Vec::new()
            }
            PhoneState::Booting { .. } | PhoneState::Retrying { .. } | PhoneState::Playing { .. } => {
                info!("Phone powering off");
                self.stop();
                vec![PhoneEffect::Notify(NoticeLevel::Info, MSG_OFF)]
            }
        }
    }

    /// Runs every boot step and retry that has come due by `now`.
    pub fn tick(&mut self, now: Millis) -> Vec<PhoneEffect> {
        let mut effects = Vec::new();
        loop {
            match self.state {
                PhoneState::Booting { step, due } if now >= due => {
                    if let Some(&(label, hold)) = BOOT_STEPS.get(step) {
                        info!("Boot: {}", label);
                        self.loading_text = Some(label);
                        self.state = PhoneState::Booting { step: step + 1, due: due + hold };
                    } else {
                        self.loading_text = None;
                        effects.extend(self.start_playback(due));
                    }
                }
                PhoneState::Retrying { due } if now >= due => {
                    effects.extend(self.retry_muted());
                }
                _ => break,
            }
        }
        effects
    }

    /// Tapping the video unmutes a muted playback.
    pub fn tap(&mut self) -> Vec<PhoneEffect> {
        match self.state {
            PhoneState::Playing { muted: true } => {
                self.player.set_muted(false);
                self.state = PhoneState::Playing { muted: false };
                info!("Video unmuted by tap");
                vec![PhoneEffect::Notify(NoticeLevel::Success, MSG_SOUND_ON)]
            }
            _ => Vec::new(),
        }
    }

    /// The device reported an error.
    pub fn device_error(&mut self) -> Vec<PhoneEffect> {
        error!("Video device error in state {:?}", self.state);
        self.player.pause();
        self.loading_text = None;
        self.state = PhoneState::Off;
        vec![PhoneEffect::Notify(NoticeLevel::Error, MSG_UNAVAILABLE)]
    }

    fn stop(&mut self) {
        self.player.pause();
        self.player.rewind();
        self.loading_text = None;
        self.state = PhoneState::Off;
    }

    fn start_playback(&mut self, at: Millis) -> Vec<PhoneEffect> {
        self.player.set_muted(self.mobile);
        self.player.set_volume(PLAYBACK_VOLUME);

        match self.player.play() {
            Ok(()) => {
                let notice = if self.mobile && self.player.is_muted() {
                    match self.player.try_unmute() {
                        Ok(()) => {
                            self.state = PhoneState::Playing { muted: false };
                            PhoneEffect::Notify(NoticeLevel::Success, MSG_ON)
                        }
                        Err(err) => {
                            info!("Staying muted: {}", err);
                            self.state = PhoneState::Playing { muted: true };
                            PhoneEffect::Notify(NoticeLevel::Warning, MSG_TAP_TO_UNMUTE)
                        }
                    }
                } else {
                    self.state = PhoneState::Playing { muted: self.player.is_muted() };
                    PhoneEffect::Notify(NoticeLevel::Success, MSG_ON)
                };
                info!("Video playing");
                vec![notice, PhoneEffect::Celebrate]
            }
            Err(err) => {
                warn!("Video failed to start ({}), retrying muted", err);
                self.player.set_muted(true);
                self.player.reload();
                self.state = PhoneState::Retrying { due: at + RETRY_DELAY_MS };
                Vec::new()
            }
        }
    }

    fn retry_muted(&mut self) -> Vec<PhoneEffect> {
        match self.player.play() {
            Ok(()) => {
                info!("Video playing (muted fallback)");
                self.state = PhoneState::Playing { muted: true };
                vec![PhoneEffect::Notify(NoticeLevel::Warning, MSG_MUTED_FALLBACK), PhoneEffect::Celebrate]
            }
            Err(err) => {
                error!("Muted fallback failed: {}", err);
                self.state = PhoneState::Off;
                vec![PhoneEffect::Notify(NoticeLevel::Error, MSG_UNAVAILABLE)]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Time at which playback is first attempted after a press at 0.
    const PLAY_AT: Millis = 3300.0;

    fn control(available: bool, blocked: bool, mobile: bool) -> PhoneControl<SimulatedPlayer> {
        PhoneControl::new(SimulatedPlayer::new(available, blocked), mobile)
    }

    #[test]
    fn boot_steps_show_in_order() {
        let mut phone = control(true, false, false);
        phone.press(0.0);
        assert!(phone.tick(299.0).is_empty());
        assert_eq!(phone.loading_text(), None);

        phone.tick(300.0);
        assert_eq!(phone.loading_text(), Some("Initializing..."));
        phone.tick(900.0);
        assert_eq!(phone.loading_text(), Some("Loading system files..."));
        phone.tick(1600.0);
        assert_eq!(phone.loading_text(), Some("Starting Nokia OS..."));
        phone.tick(2900.0);
        assert_eq!(phone.loading_text(), Some("Ready to connect!"));
        assert!(matches!(phone.state(), PhoneState::Booting { step: 5, due } if due == PLAY_AT));
    }

    #[test]
    fn notices_carry_the_brand_name() {
        let mut phone = control(true, false, false);
        phone.press(0.0);
        let on = phone.tick(PLAY_AT);
        assert!(on.contains(&PhoneEffect::Notify(NoticeLevel::Success, "Nokia Experience ON!")));

        let off = phone.press(PLAY_AT + 1000.0);
        assert_eq!(off, vec![PhoneEffect::Notify(NoticeLevel::Info, "Nokia Experience OFF")]);
    }

    #[test]
    fn press_while_off_then_again_while_playing() {
        let mut phone = control(true, false, false);
        assert!(phone.press(0.0).is_empty());

        let effects = phone.tick(PLAY_AT);
        assert_eq!(
            effects,
            vec![PhoneEffect::Notify(NoticeLevel::Success, MSG_ON), PhoneEffect::Celebrate]
        );
        assert_eq!(phone.state(), PhoneState::Playing { muted: false });
        assert!(phone.player().is_playing());
        assert_eq!(phone.player().volume(), PLAYBACK_VOLUME);

        let effects = phone.press(5000.0);
        assert_eq!(effects, vec![PhoneEffect::Notify(NoticeLevel::Info, MSG_OFF)]);
        assert_eq!(phone.state(), PhoneState::Off);
        assert!(!phone.player().is_playing());
    }

    #[test]
    fn rejected_play_falls_back_to_muted() {
        let mut phone = control(true, true, false);
        phone.press(0.0);

        assert!(phone.tick(PLAY_AT).is_empty());
        assert_eq!(phone.state(), PhoneState::Retrying { due: PLAY_AT + RETRY_DELAY_MS });
        assert_eq!(phone.player().reloads(), 1);

        let effects = phone.tick(PLAY_AT + RETRY_DELAY_MS);
        assert_eq!(
            effects,
            vec![PhoneEffect::Notify(NoticeLevel::Warning, MSG_MUTED_FALLBACK), PhoneEffect::Celebrate]
        );
        assert_eq!(phone.state(), PhoneState::Playing { muted: true });
    }

    #[test]
    fn unavailable_video_reverts_to_off() {
        let mut phone = control(false, false, false);
        phone.press(0.0);
        let effects = phone.tick(10_000.0);
        assert_eq!(effects, vec![PhoneEffect::Notify(NoticeLevel::Error, MSG_UNAVAILABLE)]);
        assert_eq!(phone.state(), PhoneState::Off);
    }

    #[test]
    fn mobile_starts_muted_then_unmutes() {
        let mut phone = control(true, false, true);
        phone.press(0.0);
        let effects = phone.tick(PLAY_AT);
        assert_eq!(effects[0], PhoneEffect::Notify(NoticeLevel::Success, MSG_ON));
        assert_eq!(phone.state(), PhoneState::Playing { muted: false });
        assert!(!phone.player().is_muted());
    }

    #[test]
    fn mobile_blocked_unmute_asks_for_a_tap() {
        let mut phone = control(true, true, true);
        phone.press(0.0);
        let effects = phone.tick(PLAY_AT);
        assert_eq!(effects[0], PhoneEffect::Notify(NoticeLevel::Warning, MSG_TAP_TO_UNMUTE));
        assert_eq!(phone.state(), PhoneState::Playing { muted: true });

        let effects = phone.tap();
        assert_eq!(effects, vec![PhoneEffect::Notify(NoticeLevel::Success, MSG_SOUND_ON)]);
        assert!(!phone.player().is_muted());
        assert!(phone.tap().is_empty());
    }

    #[test]
    fn press_during_boot_aborts() {
        let mut phone = control(true, false, false);
        phone.press(0.0);
        phone.tick(1000.0);
        let effects = phone.press(1200.0);
        assert_eq!(effects, vec![PhoneEffect::Notify(NoticeLevel::Info, MSG_OFF)]);
        assert_eq!(phone.state(), PhoneState::Off);
        assert_eq!(phone.loading_text(), None);
        assert!(phone.tick(PLAY_AT).is_empty());
    }

    #[test]
    fn device_error_stops_playback() {
        let mut phone = control(true, false, false);
        phone.press(0.0);
        phone.tick(PLAY_AT);
        let effects = phone.device_error();
        assert_eq!(effects, vec![PhoneEffect::Notify(NoticeLevel::Error, MSG_UNAVAILABLE)]);
        assert!(!phone.is_playing());
        assert!(!phone.player().is_playing());
    }

    #[test]
    fn stop_rewinds_the_player() {
        let mut phone = control(true, false, false);
        phone.press(0.0);
        phone.tick(PLAY_AT);
        phone.player_mut().advance(1500.0);
        assert_eq!(phone.player().position_ms(), 1500.0);
        phone.press(5000.0);
        assert_eq!(phone.player().position_ms(), 0.0);
    }
}
