//! MIDI output for generated scores.
//!
//! Serializes a [`Score`] to a single-track Standard MIDI File: one program
//! change, one tempo meta event, then the note events back to back at one
//! beat apiece.
//!
//! Uses the `midly` crate for SMF writing.

use midly::{
    num::{u15, u24, u28, u4, u7},
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};
use std::path::Path;

use crate::error::MusicError;
use crate::score::Score;

/// Writes a score as a Format 0 SMF at `path`.
pub fn write_midi(score: &Score, path: &Path) -> Result<(), MusicError> {
    let smf = score_to_smf(score);
    let mut buf = Vec::new();
    smf.write_std(&mut buf).map_err(MusicError::MidiEncode)?;
    std::fs::write(path, &buf).map_err(|source| MusicError::WriteScore {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Converts a score to an in-memory SMF.
fn score_to_smf(score: &Score) -> Smf<'static> {
    let mut smf = Smf::new(Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::new(score.ticks_per_beat)),
    ));

    let channel = u4::new(0);
    let mut track: Track<'static> = Vec::new();

    // Tempo in microseconds per quarter note
    let tempo_microseconds = 60_000_000 / score.tempo_bpm.max(1);
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(u24::new(tempo_microseconds))),
    });

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Midi {
            channel,
            message: MidiMessage::ProgramChange {
                program: u7::new(score.program.min(127)),
            },
        },
    });

    for event in &score.notes {
        let key = u7::new(event.note.min(127));
        let vel = u7::new(event.velocity.min(127));
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOn { key, vel },
            },
        });
        track.push(TrackEvent {
            delta: u28::new(u32::from(score.ticks_per_beat)),
            kind: TrackEventKind::Midi {
                channel,
                message: MidiMessage::NoteOff { key, vel },
            },
        });
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });
    smf.tracks.push(track);

    smf
}
