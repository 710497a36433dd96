//! Database bootstrap and seed data

pub mod init;
pub mod seed;

pub use init::*;
pub use seed::{SampleChord, SampleSong, SAMPLE_CHORDS, SAMPLE_SONGS};
