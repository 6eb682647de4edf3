pub mod groups;
pub mod settings;

pub use groups::ConfirmPrompt;
