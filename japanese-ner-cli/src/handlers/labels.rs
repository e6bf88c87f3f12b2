use crate::args::OutputFormat;
use crate::output::{label_infos, print_json, print_label_list};

pub fn handle_labels_command(format: OutputFormat) {
    if format.is_json() {
        print_json(&label_infos());
    } else {
        print_label_list();
    }
}
