//! Audio system using Web Audio API
//!
//! Procedurally generated sound - no external files needed!
//! Playback failures are logged and swallowed; they never reach the game.

use crate::session::GameEvent;

/// Audio cues the game triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Garbage collected
    Collect,
    /// Session started - begin the background loop
    MusicStart,
    /// Session ended - stop the background loop
    MusicStop,
}

/// Cue (if any) for a session event
pub fn cue_for(event: &GameEvent) -> Option<Cue> {
    match event {
        GameEvent::Started { .. } => Some(Cue::MusicStart),
        GameEvent::Collected { .. } => Some(Cue::Collect),
        GameEvent::Ended { .. } => Some(Cue::MusicStop),
        GameEvent::TimeChanged { .. } => None,
    }
}

#[cfg(target_arch = "wasm32")]
pub use web::AudioManager;

#[cfg(target_arch = "wasm32")]
mod web {
    use web_sys::{AudioContext, GainNode, OscillatorNode, OscillatorType};

    use super::Cue;
    use crate::settings::Settings;

    /// Chime notes (Hz) and spacing (s)
    const COLLECT_NOTES: [f32; 3] = [600.0, 800.0, 1000.0];
    const COLLECT_NOTE_GAP: f64 = 0.06;
    /// Background pad voices: (frequency, waveform, relative level)
    const MUSIC_VOICES: [(f32, OscillatorType, f32); 3] = [
        (110.0, OscillatorType::Sine, 0.35),
        (164.81, OscillatorType::Triangle, 0.15),
        (220.0, OscillatorType::Sine, 0.1),
    ];
    /// Slow swell on the pad (Hz)
    const MUSIC_LFO_RATE: f32 = 0.25;

    /// A started note that can be cut short
    struct Voice {
        oscillators: Vec<OscillatorNode>,
        gain: GainNode,
    }

    impl Voice {
        fn stop(&self) {
            for osc in &self.oscillators {
                osc.stop().ok();
            }
            self.gain.disconnect().ok();
        }
    }

    /// Audio manager for the game
    pub struct AudioManager {
        ctx: Option<AudioContext>,
        sfx_gain: f32,
        music_gain: f32,
        muted: bool,
        collect_voice: Option<Voice>,
        music: Option<Voice>,
    }

    impl AudioManager {
        pub fn new(settings: &Settings) -> Self {
            // Try to create audio context (may fail if not in secure context)
            let ctx = AudioContext::new().ok();
            if ctx.is_none() {
                log::warn!("Failed to create AudioContext - audio disabled");
            }
            // Mute is tracked separately so blur/focus can toggle it
            let audible = Settings {
                muted: false,
                ..settings.clone()
            };
            Self {
                ctx,
                sfx_gain: audible.sfx_gain(),
                music_gain: audible.music_gain(),
                muted: settings.muted,
                collect_voice: None,
                music: None,
            }
        }

        /// Resume audio context (required after user gesture)
        pub fn resume(&self) {
            if let Some(ctx) = &self.ctx {
                let _ = ctx.resume();
            }
        }

        /// Mute/unmute all audio
        pub fn set_muted(&mut self, muted: bool) {
            self.muted = muted;
            if let (Some(ctx), Some(music)) = (&self.ctx, &self.music) {
                let level = if muted { 0.0 } else { self.music_gain };
                music
                    .gain
                    .gain()
                    .set_value_at_time(level, ctx.current_time())
                    .ok();
            }
        }

        pub fn play(&mut self, cue: Cue) {
            match cue {
                Cue::Collect => self.play_collect(),
                Cue::MusicStart => self.start_music(),
                Cue::MusicStop => self.stop_music(),
            }
        }

        fn live_context(&self) -> Option<&AudioContext> {
            let ctx = self.ctx.as_ref()?;
            // Resume context if suspended (browsers require user gesture)
            if ctx.state() == web_sys::AudioContextState::Suspended {
                let _ = ctx.resume();
            }
            Some(ctx)
        }

        /// Create an oscillator feeding the given node
        fn create_osc(
            ctx: &AudioContext,
            freq: f32,
            osc_type: OscillatorType,
            out: &GainNode,
        ) -> Option<OscillatorNode> {
            let osc = ctx.create_oscillator().ok()?;
            osc.set_type(osc_type);
            osc.frequency().set_value(freq);
            osc.connect_with_audio_node(out).ok()?;
            Some(osc)
        }

        fn create_output(ctx: &AudioContext, level: f32) -> Option<GainNode> {
            let gain = ctx.create_gain().ok()?;
            gain.gain().set_value(level);
            gain.connect_with_audio_node(&ctx.destination()).ok()?;
            Some(gain)
        }

        /// Collect - happy rising ding, restarted from the top if retriggered
        fn play_collect(&mut self) {
            if let Some(previous) = self.collect_voice.take() {
                previous.stop();
            }
            if self.muted || self.sfx_gain <= 0.0 {
                return;
            }
            let vol = self.sfx_gain;
            let Some(ctx) = self.live_context() else { return };
            let Some(gain) = Self::create_output(ctx, 0.0) else {
                log::warn!("Collect cue unavailable");
                return;
            };

            let t0 = ctx.current_time();
            let mut oscillators = Vec::with_capacity(COLLECT_NOTES.len());
            for (i, freq) in COLLECT_NOTES.iter().enumerate() {
                let Some(osc) = Self::create_osc(ctx, *freq, OscillatorType::Sine, &gain) else {
                    continue;
                };
                let t = t0 + i as f64 * COLLECT_NOTE_GAP;
                osc.start_with_when(t).ok();
                osc.stop_with_when(t + COLLECT_NOTE_GAP).ok();
                oscillators.push(osc);
            }

            let end = t0 + COLLECT_NOTES.len() as f64 * COLLECT_NOTE_GAP;
            gain.gain().set_value_at_time(vol * 0.3, t0).ok();
            gain.gain()
                .exponential_ramp_to_value_at_time(0.01, end)
                .ok();

            self.collect_voice = Some(Voice { oscillators, gain });
        }

        /// Background loop - a slow, swelling pad until stopped
        fn start_music(&mut self) {
            self.stop_music();
            let level = if self.muted { 0.0 } else { self.music_gain };
            let Some(ctx) = self.live_context() else { return };
            let Some(gain) = Self::create_output(ctx, level) else {
                log::warn!("Music unavailable");
                return;
            };

            let mut oscillators = Vec::with_capacity(MUSIC_VOICES.len() + 1);
            for (freq, wave, voice_level) in MUSIC_VOICES {
                let Some(voice_gain) = ctx.create_gain().ok() else {
                    continue;
                };
                voice_gain.gain().set_value(voice_level);
                if voice_gain.connect_with_audio_node(&gain).is_err() {
                    continue;
                }
                if let Some(osc) = Self::create_osc(ctx, freq, wave, &voice_gain) {
                    osc.start().ok();
                    oscillators.push(osc);
                }
            }

            // LFO on the master level for a gentle swell
            if let (Ok(lfo), Ok(depth)) = (ctx.create_oscillator(), ctx.create_gain()) {
                lfo.frequency().set_value(MUSIC_LFO_RATE);
                depth.gain().set_value(level * 0.3);
                if lfo.connect_with_audio_node(&depth).is_ok()
                    && depth.connect_with_audio_param(&gain.gain()).is_ok()
                {
                    lfo.start().ok();
                    oscillators.push(lfo);
                }
            }

            log::debug!("Music started ({} voices)", oscillators.len());
            self.music = Some(Voice { oscillators, gain });
        }

        fn stop_music(&mut self) {
            if let Some(music) = self.music.take() {
                music.stop();
                log::debug!("Music stopped");
            }
        }
    }
}
