//! HTTP API handlers for guitartuner-api

pub mod chords;
pub mod envelope;
pub mod health;
pub mod params;
pub mod songs;

pub use chords::{get_chord, list_chords, songs_by_chord};
pub use envelope::ApiResponse;
pub use health::{health_routes, route_not_found};
pub use params::{PathText, SongId};
pub use songs::{
    create_song, delete_song, get_song, list_favorites, list_songs, search_songs,
    songs_by_artist, toggle_favorite, update_song,
};
