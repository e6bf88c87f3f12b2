//! Command handlers for the Japanese NER CLI

pub mod analyze;
pub mod config;
pub mod labels;
pub mod text;

pub use analyze::handle_analyze_command;
pub use config::handle_config_command;
pub use labels::handle_labels_command;
pub use text::handle_text_command;
