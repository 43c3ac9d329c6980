//! # Songbook Common Library
//!
//! Shared code for the songbook workspace:
//! - Domain models (songs, verses, fetched song details)
//! - Configuration file loading
//! - Common error type

pub mod config;
pub mod error;
pub mod models;

pub use error::{Error, Result};
pub use models::{NewSong, Song, SongDetails, SongUpdate, Verse};
