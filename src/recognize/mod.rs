pub mod client;
pub mod error;
pub mod vars;
pub mod wire;
pub mod worker;

pub use client::{calculate_url, RecognitionClient};
pub use error::RecognizeError;
pub use vars::VariableEnvironment;
pub use wire::{parse_response, RecognitionRecord};
pub use worker::{spawn_submission, RecognitionReply, Submission};
