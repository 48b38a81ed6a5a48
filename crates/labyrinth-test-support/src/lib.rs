//! Shared test fakes and fixtures for the Labyrinth orchestrator.

mod clock;
mod fixtures;
mod ports;

pub use clock::{FixedClock, fixed_clock};
pub use fixtures::{
    book, chapter, correlation, question, question_with_answers, sample_campaign, trigger,
};
pub use ports::{AudioCall, RecordingAudio, RecordingSink, RecordingWorld, WorldCall};
