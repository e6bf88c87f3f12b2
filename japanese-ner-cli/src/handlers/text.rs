use japanese_ner::Result;

use crate::args::{OutputFormat, TextArgs};
use crate::context::NerCliContext;
use crate::output::{format_warning, print_analysis_details, print_entity_table, print_json};

pub async fn handle_text_command(
    args: TextArgs,
    ctx: &NerCliContext,
    format: OutputFormat,
) -> Result<()> {
    let analysis = ctx.analyzer.analyze_detailed(&args.text).await?;

    if format.is_json() {
        if args.details {
            print_json(&analysis);
        } else {
            print_json(&analysis.entities);
        }
        return Ok(());
    }

    if args.details {
        print_analysis_details(&analysis);
    } else if analysis.is_partial() {
        println!(
            "{}",
            format_warning(&format!(
                "{} of {} chunk(s) failed; results may be incomplete",
                analysis.failed_chunks.len(),
                analysis.chunk_count
            ))
        );
    }
    print_entity_table(&analysis.entities);
    Ok(())
}
