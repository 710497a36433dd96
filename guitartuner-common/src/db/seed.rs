//! Sample songs and the chord diagram reference table
//!
//! Inserted on bootstrap into empty tables only, so re-opening a populated
//! database never duplicates rows.

use crate::models::DifficultyLevel;

/// A sample song in stored form
#[derive(Debug, Clone, Copy)]
pub struct SampleSong {
    pub title: &'static str,
    pub artist: &'static str,
    pub chords: &'static str,
    pub audio_path: &'static str,
}

/// A chord diagram reference row
#[derive(Debug, Clone, Copy)]
pub struct SampleChord {
    pub name: &'static str,
    pub image_path: &'static str,
    pub description: &'static str,
    pub difficulty_level: DifficultyLevel,
}

pub const SAMPLE_SONGS: &[SampleSong] = &[
    SampleSong {
        title: "Amara",
        artist: "Fayrouz",
        chords: "C,F,G",
        audio_path: "songs/amara.mp3",
    },
    SampleSong {
        title: "Hotel California",
        artist: "Eagles",
        chords: "Am,E7,G,D,F,C,Dm,E7",
        audio_path: "songs/hotel_california.mp3",
    },
    SampleSong {
        title: "Wish You Were Here",
        artist: "Pink Floyd",
        chords: "C,D,Am,G,D,C,Am,G",
        audio_path: "songs/wish_you_were_here.mp3",
    },
    SampleSong {
        title: "Sweet Child O'Mine",
        artist: "Guns N' Roses",
        chords: "D,C,G,D,C,G,D,C,G,F,G",
        audio_path: "songs/sweet_child_o_mine.mp3",
    },
    SampleSong {
        title: "Shayef",
        artist: "Adonis",
        chords: "A,B,E,G#m,F#m",
        audio_path: "songs/shayef.mp3",
    },
    SampleSong {
        title: "Stairway to Heaven",
        artist: "Led Zeppelin",
        chords: "Am,C,D,F,G,Am,C,D,F,Am",
        audio_path: "songs/stairway_to_heaven.mp3",
    },
    SampleSong {
        title: "Estesna'i",
        artist: "Adonis",
        chords: "E,G#m,A,B,A,E,C#m7,B",
        audio_path: "songs/estesnai.mp3",
    },
    SampleSong {
        title: "Nothing Else Matters",
        artist: "Metallica",
        chords: "Em,Am,C,D,Em,Am,C,D,G,B7",
        audio_path: "songs/nothing_else_matters.mp3",
    },
    SampleSong {
        title: "Creep",
        artist: "Radiohead",
        chords: "G,B,C,Cm",
        audio_path: "songs/creep.mp3",
    },
    SampleSong {
        title: "Law Baddak Yani",
        artist: "Adonis",
        chords: "C,Em,Am,G,Em,F,Dm,G,F,C,G",
        audio_path: "songs/law_baddak_yani.mp3",
    },
];

macro_rules! chord {
    ($name:expr, $image:expr, $description:expr, $level:ident) => {
        SampleChord {
            name: $name,
            image_path: $image,
            description: $description,
            difficulty_level: DifficultyLevel::$level,
        }
    };
}

pub const SAMPLE_CHORDS: &[SampleChord] = &[
    chord!("C", "assets/chords/c.png", "C Major chord", Beginner),
    chord!("D", "assets/chords/d.png", "D Major chord", Beginner),
    chord!("E", "assets/chords/e.png", "E Major chord", Beginner),
    chord!("F", "assets/chords/f.png", "F Major chord", Intermediate),
    chord!("G", "assets/chords/g.png", "G Major chord", Beginner),
    chord!("A", "assets/chords/a.png", "A Major chord", Beginner),
    chord!("B", "assets/chords/b.png", "B Major chord", Intermediate),
    chord!("Am", "assets/chords/am.png", "A Minor chord", Beginner),
    chord!("Cm", "assets/chords/cm.png", "C Minor chord", Intermediate),
    chord!("Dm", "assets/chords/dm.png", "D Minor chord", Beginner),
    chord!("Em", "assets/chords/em.png", "E Minor chord", Beginner),
    chord!("E7", "assets/chords/e7.png", "E Dominant 7th chord", Intermediate),
    chord!("Em7", "assets/chords/em7.png", "E Minor 7th chord", Intermediate),
    chord!("B7", "assets/chords/b7.png", "B Dominant 7th chord", Intermediate),
    chord!("F#m", "assets/chords/f#m.png", "F# Minor chord", Intermediate),
    chord!("G#m", "assets/chords/g#m.png", "G# Minor chord", Advanced),
    chord!("C#m7", "assets/chords/c#m7.png", "C# Minor 7th chord", Advanced),
];
