pub mod error;
pub mod song;
