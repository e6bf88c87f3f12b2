pub mod args;
pub mod commands;
pub mod context;
pub mod handlers;
pub mod output;

pub use args::{Cli, OutputFormat};
pub use context::NerCliContext;
pub use output::{
    CliColors, format_error, format_info, format_label, format_success, format_warning,
    output_error, print_batch_summary, print_entity_table, print_label_list,
};
