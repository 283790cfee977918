//! MIDI file export of scales.
//!
//! A scale is rendered as a single track playing one note per beat, starting at a configurable note and walking up
//! through the intervals until the octave is reached.

use std::path::{Path, PathBuf};

use clap::Parser;
use log::info;
use midly::{
    num::{u15, u24, u28, u4, u7},
    Format, Header, MetaMessage, MidiMessage, Smf, Timing, Track, TrackEvent, TrackEventKind,
};
use scalegen::scale::Scale;

use crate::{error::ResultExt, App, CliError, CliResult};

/// Ticks per quarter note, i.e. per beat.
const TICKS_PER_BEAT: u16 = 480;

const CHANNEL: u8 = 0;
const VELOCITY: u8 = 100;
const MAX_MIDI_NUMBER: u32 = 127;
const MAX_MICROSECONDS_PER_BEAT: u32 = 0x00ff_ffff;

#[derive(Parser)]
pub(crate) struct MidiOptions {
    /// Scale to export, e.g. 2,2,1,2,2,2,1
    scale: Scale,

    /// Location of the MIDI file to create
    file_name: PathBuf,

    #[clap(flatten)]
    settings: MidiSettings,
}

impl MidiOptions {
    pub fn run(&self, _app: &mut App) -> CliResult<()> {
        write_midi_file(&self.scale, &self.file_name, &self.settings)
    }
}

#[derive(Clone, Debug, Parser)]
pub(crate) struct MidiSettings {
    /// MIDI number of the first note. 69 is A4
    #[clap(long = "start-note", default_value = "69")]
    pub start_note: u8,

    /// Tempo in beats per minute
    #[clap(long = "tempo", default_value = "120")]
    pub tempo_bpm: u32,
}

impl Default for MidiSettings {
    fn default() -> Self {
        Self {
            start_note: 69,
            tempo_bpm: 120,
        }
    }
}

impl MidiSettings {
    fn microseconds_per_beat(&self) -> CliResult<u24> {
        let microseconds = 60_000_000u32
            .checked_div(self.tempo_bpm)
            .filter(|&microseconds| microseconds <= MAX_MICROSECONDS_PER_BEAT)
            .ok_or_else(|| format!("Tempo of {} bpm is out of range", self.tempo_bpm))?;
        Ok(u24::new(microseconds))
    }
}

/// The MIDI note numbers played for `scale`, including the note one octave above the start.
pub(crate) fn midi_notes(scale: &Scale, start_note: u8) -> CliResult<Vec<u7>> {
    scale
        .note_positions()
        .into_iter()
        .map(|position| {
            let midi_number = u32::from(start_note) + position;
            if midi_number > MAX_MIDI_NUMBER {
                return Err(CliError::CommandError(format!(
                    "Note {} of {} exceeds the MIDI range",
                    midi_number, scale
                )));
            }
            Ok(u7::new(midi_number as u8))
        })
        .collect()
}

/// Renders `scale` as a single-track Standard MIDI File named `track_name`.
pub(crate) fn scale_to_smf<'a>(
    scale: &Scale,
    track_name: &'a str,
    settings: &MidiSettings,
) -> CliResult<Smf<'a>> {
    let notes = midi_notes(scale, settings.start_note)?;

    let mut track: Track<'a> = Vec::with_capacity(2 * notes.len() + 3);
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::TrackName(track_name.as_bytes())),
    });
    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::Tempo(settings.microseconds_per_beat()?)),
    });

    for key in notes {
        track.push(TrackEvent {
            delta: u28::new(0),
            kind: TrackEventKind::Midi {
                channel: u4::new(CHANNEL),
                message: MidiMessage::NoteOn {
                    key,
                    vel: u7::new(VELOCITY),
                },
            },
        });
        track.push(TrackEvent {
            delta: u28::new(u32::from(TICKS_PER_BEAT)),
            kind: TrackEventKind::Midi {
                channel: u4::new(CHANNEL),
                message: MidiMessage::NoteOff {
                    key,
                    vel: u7::new(0),
                },
            },
        });
    }

    track.push(TrackEvent {
        delta: u28::new(0),
        kind: TrackEventKind::Meta(MetaMessage::EndOfTrack),
    });

    let mut smf = Smf::new(Header::new(
        Format::SingleTrack,
        Timing::Metrical(u15::new(TICKS_PER_BEAT)),
    ));
    smf.tracks.push(track);
    Ok(smf)
}

/// Writes `scale` to the MIDI file at `file_name`.
pub(crate) fn write_midi_file(
    scale: &Scale,
    file_name: &Path,
    settings: &MidiSettings,
) -> CliResult<()> {
    let track_name = format!("{:#}", scale);
    let smf = scale_to_smf(scale, &track_name, settings)?;
    smf.save(file_name)
        .handle_file_error::<CliError>("write MIDI file", file_name)?;
    info!("Wrote {} to {}", scale, file_name.display());
    Ok(())
}

/// The file name used when exporting the `index`-th scale of a list.
pub(crate) fn file_name_for(index: usize, scale: &Scale) -> String {
    format!("scale-{:03}-{:#}.mid", index, scale)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn major() -> Scale {
        "2,2,1,2,2,2,1".parse().unwrap()
    }

    fn note_on_keys(smf: &Smf) -> Vec<u8> {
        smf.tracks[0]
            .iter()
            .filter_map(|event| match event.kind {
                TrackEventKind::Midi {
                    message: MidiMessage::NoteOn { key, .. },
                    ..
                } => Some(key.as_int()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn major_scale_from_a4() {
        let smf = scale_to_smf(&major(), "major", &MidiSettings::default()).unwrap();

        assert_eq!(smf.header.format, Format::SingleTrack);
        assert_eq!(smf.tracks.len(), 1);
        assert_eq!(smf.tracks[0].len(), 3 + 2 * 8);
        assert_eq!(note_on_keys(&smf), [69, 71, 73, 74, 76, 78, 80, 81]);
        assert_eq!(
            smf.tracks[0][0].kind,
            TrackEventKind::Meta(MetaMessage::TrackName(b"major"))
        );
        assert_eq!(
            smf.tracks[0][1].kind,
            TrackEventKind::Meta(MetaMessage::Tempo(u24::new(500_000)))
        );
    }

    #[test]
    fn custom_start_note_and_tempo() {
        let settings = MidiSettings {
            start_note: 60,
            tempo_bpm: 60,
        };
        let smf = scale_to_smf(&"4,4,4".parse::<Scale>().unwrap(), "augmented", &settings).unwrap();

        assert_eq!(note_on_keys(&smf), [60, 64, 68, 72]);
        assert_eq!(
            smf.tracks[0][1].kind,
            TrackEventKind::Meta(MetaMessage::Tempo(u24::new(1_000_000)))
        );
    }

    #[test]
    fn notes_out_of_range() {
        let settings = MidiSettings {
            start_note: 120,
            ..Default::default()
        };
        assert!(scale_to_smf(&major(), "major", &settings).is_err());
    }

    #[test]
    fn tempo_out_of_range() {
        for tempo_bpm in [0, 1, 3] {
            let settings = MidiSettings {
                tempo_bpm,
                ..Default::default()
            };
            assert!(scale_to_smf(&major(), "major", &settings).is_err());
        }
    }

    #[test]
    fn export_file_names() {
        assert_eq!(file_name_for(7, &major()), "scale-007-2-2-1-2-2-2-1.mid");
    }
}
