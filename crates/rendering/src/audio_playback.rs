//! Audio collaborator: consumes the simulation's [`PlayCueEvent`]s.
//!
//! No sound assets ship with the game, so each cue is logged at debug level
//! with the volume it would play at.

use bevy::prelude::*;

use simulation::audio_cues::PlayCueEvent;

#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct AudioSettings {
    pub muted: bool,
    pub master_volume: f32,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            muted: false,
            master_volume: 0.8,
        }
    }
}

impl AudioSettings {
    pub fn effective_volume(&self, event: &PlayCueEvent) -> f32 {
        if self.muted {
            return 0.0;
        }
        (event.volume_scale * self.master_volume).clamp(0.0, 1.0)
    }
}

/// Number of cues played since startup, for the stats panel.
#[derive(Resource, Debug, Default)]
pub struct CuesPlayed(pub u64);

pub fn consume_cue_events(
    mut events: EventReader<PlayCueEvent>,
    settings: Res<AudioSettings>,
    mut played: ResMut<CuesPlayed>,
) {
    for event in events.read() {
        let volume = settings.effective_volume(event);
        if volume == 0.0 {
            continue;
        }
        played.0 += 1;
        debug!("cue {} vol={:.2}", event.cue.id(), volume);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use simulation::audio_cues::SfxCue;

    #[test]
    fn test_mute_silences_everything() {
        let settings = AudioSettings {
            muted: true,
            ..AudioSettings::default()
        };
        assert_eq!(settings.effective_volume(&PlayCueEvent::new(SfxCue::Story)), 0.0);
    }

    #[test]
    fn test_autoplay_cues_are_quieter() {
        let settings = AudioSettings::default();
        let full = settings.effective_volume(&PlayCueEvent::new(SfxCue::Demolish));
        let half = settings.effective_volume(&PlayCueEvent::with_volume(SfxCue::Demolish, 0.5));
        assert!((half * 2.0 - full).abs() < 1e-6);
    }

    #[test]
    fn test_consumer_counts_audible_cues() {
        let mut app = App::new();
        app.add_event::<PlayCueEvent>()
            .init_resource::<AudioSettings>()
            .init_resource::<CuesPlayed>()
            .add_systems(Update, consume_cue_events);
        app.world_mut().send_event(PlayCueEvent::new(SfxCue::Select));
        app.world_mut()
            .send_event(PlayCueEvent::with_volume(SfxCue::Hover, 0.0));
        app.update();
        assert_eq!(app.world().resource::<CuesPlayed>().0, 1);
    }
}
