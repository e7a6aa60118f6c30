pub mod alphabet;
pub mod document;
pub mod errors;
mod exec;
pub mod glyph;
pub mod pipeline;
pub mod tts;
