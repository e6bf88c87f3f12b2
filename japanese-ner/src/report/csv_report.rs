//! CSV export of every extracted entity.

use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::batch::DocumentAnalysis;
use crate::{NerError, Result};

/// One CSV row
#[derive(Debug, Serialize)]
struct EntityRow<'a> {
    filename: &'a str,
    word: &'a str,
    entity_type: &'static str,
    entity_description: &'static str,
    score: f64,
    start_pos: usize,
    end_pos: usize,
    analysis_time: String,
}

/// Write one row per entity to `writer`, with a header row
pub fn write_csv<W: Write>(results: &[DocumentAnalysis], writer: W) -> Result<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    csv.write_record([
        "filename",
        "word",
        "entity_type",
        "entity_description",
        "score",
        "start_pos",
        "end_pos",
        "analysis_time",
    ])
    .map_err(report_error)?;

    for result in results {
        let analysis_time = result.analysis_time.to_rfc3339();
        for entity in &result.entities {
            csv.serialize(EntityRow {
                filename: &result.filename,
                word: &entity.word,
                entity_type: entity.label.tag(),
                entity_description: entity.label.description(),
                score: entity.score,
                start_pos: entity.start,
                end_pos: entity.end,
                analysis_time: analysis_time.clone(),
            })
            .map_err(report_error)?;
        }
    }

    csv.flush()?;
    Ok(())
}

/// Save the CSV report to `path`
pub fn save_csv_report(results: &[DocumentAnalysis], path: impl AsRef<Path>) -> Result<()> {
    let file = std::fs::File::create(path.as_ref())?;
    write_csv(results, file)
}

fn report_error(err: csv::Error) -> NerError {
    NerError::Report(format!("Failed to write CSV: {}", err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ner::{Entity, EntityLabel};
    use crate::report::test_support::analysis;

    #[test]
    fn test_csv_rows() {
        let results = vec![
            analysis(
                "a.txt",
                "田中太郎は東京大学の教授です。",
                vec![
                    Entity::new("田中太郎", EntityLabel::Person, 0.98, 0, 4),
                    Entity::new("東京大学", EntityLabel::Institution, 0.95, 5, 9),
                ],
            ),
            analysis("b.txt", "なし", vec![]),
        ];

        let mut buffer = Vec::new();
        write_csv(&results, &mut buffer).unwrap();
        let output = String::from_utf8(buffer).unwrap();
        let lines: Vec<_> = output.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "filename,word,entity_type,entity_description,score,start_pos,end_pos,analysis_time"
        );
        assert!(lines[1].starts_with("a.txt,田中太郎,PER,人名,0.98,0,4,"));
        assert!(lines[2].starts_with("a.txt,東京大学,INS,"));
    }

    #[test]
    fn test_header_only_when_empty() {
        let mut buffer = Vec::new();
        write_csv(&[], &mut buffer).unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap().lines().count(), 1);
    }
}
