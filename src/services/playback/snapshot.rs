use std::time::Duration;

use super::types::{ButtonState, RepeatMode, SequenceState};

/// Everything the UI needs to render playback at one point in time.
///
/// Snapshots are never mutated after publication. Every update builds a
/// new value from the latest one with some fields overridden.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PlaybackSnapshot {
    /// Last known playback cursor
    pub current_position: Duration,
    /// How far ahead data is ready to play
    pub buffered_position: Duration,
    /// Track length, zero until the engine resolves it
    pub total_duration: Duration,
    /// State of the play/pause button
    pub button_state: ButtonState,
    /// Repeat mode selected by the user
    pub repeat_mode: RepeatMode,
    /// Whether shuffle is on
    pub shuffle_enabled: bool,
    /// Label of the current track
    pub current_track_label: String,
    /// Labels in effective play order
    pub playlist: Vec<String>,
    /// Current track is the first of the effective sequence
    pub is_first_track: bool,
    /// Current track is the last of the effective sequence
    pub is_last_track: bool,
}

impl PlaybackSnapshot {
    /// Copy with a new playback cursor.
    pub fn with_position(&self, position: Duration) -> Self {
        Self {
            current_position: position,
            ..self.clone()
        }
    }

    /// Copy with a new buffered position.
    pub fn with_buffered_position(&self, buffered: Duration) -> Self {
        Self {
            buffered_position: buffered,
            ..self.clone()
        }
    }

    /// Copy with a new total duration. `None` means not yet resolved.
    pub fn with_total_duration(&self, duration: Option<Duration>) -> Self {
        Self {
            total_duration: duration.unwrap_or_default(),
            ..self.clone()
        }
    }

    /// Copy with a new button state.
    pub fn with_button_state(&self, button_state: ButtonState) -> Self {
        Self {
            button_state,
            ..self.clone()
        }
    }

    /// Copy with a new repeat mode.
    pub fn with_repeat_mode(&self, repeat_mode: RepeatMode) -> Self {
        Self {
            repeat_mode,
            ..self.clone()
        }
    }

    /// Copy with a new shuffle flag.
    pub fn with_shuffle_enabled(&self, shuffle_enabled: bool) -> Self {
        Self {
            shuffle_enabled,
            ..self.clone()
        }
    }

    /// Copy with every sequence-derived field taken from `sequence`.
    ///
    /// Edge flags compare the current item's identity against the ends of
    /// the effective sequence. With no current item or an empty sequence
    /// both flags are true, so navigation is disabled.
    pub fn with_sequence(&self, sequence: &SequenceState) -> Self {
        let current_track_label = sequence
            .current
            .as_ref()
            .map(|item| item.label.clone())
            .unwrap_or_default();

        let playlist = sequence
            .effective_sequence
            .iter()
            .map(|item| item.label.clone())
            .collect();

        let (is_first_track, is_last_track) = match (
            sequence.current.as_ref(),
            sequence.effective_sequence.first(),
            sequence.effective_sequence.last(),
        ) {
            (Some(current), Some(first), Some(last)) => {
                (current.id == first.id, current.id == last.id)
            }
            _ => (true, true),
        };

        Self {
            current_track_label,
            playlist,
            shuffle_enabled: sequence.shuffle_enabled,
            is_first_track,
            is_last_track,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::playback::types::{ItemId, SequenceItem, TrackSource};

    fn item(id: u64) -> SequenceItem {
        SequenceItem {
            id: ItemId(id),
            label: format!("Song {id}"),
            source: TrackSource::Asset(format!("assets/audio/{id}.mp3")),
        }
    }

    fn sequence(ids: &[u64], current: Option<u64>) -> SequenceState {
        SequenceState {
            current: current.map(item),
            effective_sequence: ids.iter().copied().map(item).collect(),
            shuffle_enabled: false,
        }
    }

    #[test]
    fn default_snapshot_is_zeroed() {
        let snapshot = PlaybackSnapshot::default();

        assert_eq!(snapshot.total_duration, Duration::ZERO);
        assert_eq!(snapshot.button_state, ButtonState::Paused);
        assert_eq!(snapshot.repeat_mode, RepeatMode::Off);
        assert!(snapshot.playlist.is_empty());
    }

    #[test]
    fn single_field_update_leaves_others_untouched() {
        let base = PlaybackSnapshot::default()
            .with_position(Duration::from_secs(4))
            .with_repeat_mode(RepeatMode::RepeatAll);

        let next = base.with_buffered_position(Duration::from_secs(9));

        assert_eq!(next.current_position, Duration::from_secs(4));
        assert_eq!(next.repeat_mode, RepeatMode::RepeatAll);
        assert_eq!(next.buffered_position, Duration::from_secs(9));
        assert_eq!(base.buffered_position, Duration::ZERO);
    }

    #[test]
    fn unresolved_duration_is_zero() {
        let snapshot = PlaybackSnapshot::default()
            .with_total_duration(Some(Duration::from_secs(30)))
            .with_total_duration(None);

        assert_eq!(snapshot.total_duration, Duration::ZERO);
    }

    #[test]
    fn empty_sequence_disables_navigation() {
        let snapshot = PlaybackSnapshot::default().with_sequence(&sequence(&[], None));

        assert!(snapshot.is_first_track);
        assert!(snapshot.is_last_track);
        assert_eq!(snapshot.current_track_label, "");
    }

    #[test]
    fn single_item_is_both_first_and_last() {
        let snapshot = PlaybackSnapshot::default().with_sequence(&sequence(&[1], Some(1)));

        assert!(snapshot.is_first_track);
        assert!(snapshot.is_last_track);
        assert_eq!(snapshot.current_track_label, "Song 1");
    }

    #[test]
    fn interior_item_is_neither_edge() {
        let snapshot = PlaybackSnapshot::default().with_sequence(&sequence(&[1, 2, 3], Some(2)));

        assert!(!snapshot.is_first_track);
        assert!(!snapshot.is_last_track);
        assert_eq!(snapshot.playlist, vec!["Song 1", "Song 2", "Song 3"]);
    }

    #[test]
    fn edges_follow_effective_order() {
        let snapshot = PlaybackSnapshot::default().with_sequence(&sequence(&[3, 1, 2], Some(1)));

        assert!(!snapshot.is_first_track);
        assert!(!snapshot.is_last_track);

        let snapshot = snapshot.with_sequence(&sequence(&[3, 1, 2], Some(3)));
        assert!(snapshot.is_first_track);
        assert!(!snapshot.is_last_track);
    }

    #[test]
    fn sequence_mirrors_shuffle_flag() {
        let mut state = sequence(&[1, 2], Some(1));
        state.shuffle_enabled = true;

        let snapshot = PlaybackSnapshot::default().with_sequence(&state);

        assert!(snapshot.shuffle_enabled);
    }
}
