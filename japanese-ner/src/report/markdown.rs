//! Markdown analysis report.

use chrono::{DateTime, Local};
use std::fmt::Write as _;
use std::path::Path;

use super::statistics::Statistics;
use crate::{NerError, Result};
use crate::batch::BatchFailure;
use crate::ner::EntityLabel;

/// Render the report. `generated_at` is printed as the analysis date.
pub fn render_markdown_report(
    stats: &Statistics,
    failures: &[BatchFailure],
    model_name: &str,
    generated_at: DateTime<Local>,
) -> Result<String> {
    let mut report = String::new();
    write_report(&mut report, stats, failures, model_name, generated_at)
        .map_err(|e| NerError::Report(format!("Failed to render markdown report: {}", e)))?;
    Ok(report)
}

fn write_report(
    out: &mut String,
    stats: &Statistics,
    failures: &[BatchFailure],
    model_name: &str,
    generated_at: DateTime<Local>,
) -> std::fmt::Result {
    writeln!(out, "# 固有表現抽出 分析レポート\n")?;
    writeln!(out, "## 分析概要")?;
    writeln!(out, "- **分析日時**: {}", generated_at.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out, "- **使用モデル**: {}", model_name)?;
    writeln!(out, "- **総ドキュメント数**: {}", stats.total_documents)?;
    writeln!(out, "- **総固有表現数**: {}", stats.total_entities)?;
    writeln!(
        out,
        "- **ドキュメント平均固有表現数**: {:.2}",
        stats.avg_entities_per_doc
    )?;
    if !failures.is_empty() {
        writeln!(out, "- **分析失敗ドキュメント数**: {}", failures.len())?;
    }

    writeln!(out, "\n## 固有表現タイプ別統計\n")?;
    writeln!(out, "| タイプ | 説明 | 出現回数 | 割合 |")?;
    writeln!(out, "|--------|------|----------|------|")?;
    for (label, count) in stats.labels_by_count() {
        let percentage = stats.label_distribution.get(&label).copied().unwrap_or(0.0);
        writeln!(
            out,
            "| {} | {} | {} | {:.1}% |",
            label.tag(),
            label.description(),
            count,
            percentage
        )?;
    }

    writeln!(out, "\n## 最頻出固有表現 (Top 10)\n")?;
    writeln!(out, "| 順位 | 固有表現 | 出現回数 |")?;
    writeln!(out, "|------|----------|----------|")?;
    for (rank, (word, count)) in stats.most_common.iter().enumerate() {
        writeln!(out, "| {} | {} | {} |", rank + 1, escape_cell(word), count)?;
    }

    writeln!(out, "\n## ドキュメント別詳細\n")?;
    writeln!(out, "| ファイル名 | 固有表現数 | ユニークタイプ数 | 文字数 |")?;
    writeln!(out, "|------------|------------|------------------|--------|")?;
    for doc in &stats.documents {
        writeln!(
            out,
            "| {} | {} | {} | {} |",
            escape_cell(&doc.filename),
            doc.entity_count,
            doc.unique_labels,
            doc.text_length
        )?;
    }

    if !failures.is_empty() {
        writeln!(out, "\n## 分析に失敗したドキュメント\n")?;
        writeln!(out, "| ファイル名 | エラー |")?;
        writeln!(out, "|------------|--------|")?;
        for failure in failures {
            writeln!(
                out,
                "| {} | {} |",
                escape_cell(&failure.filename),
                escape_cell(&failure.error)
            )?;
        }
    }

    writeln!(out, "\n## 分析結果ファイル\n")?;
    writeln!(out, "1. **CSV形式** (`ner_results.csv`): 全固有表現の詳細データ")?;
    writeln!(out, "2. **JSON形式** (`ner_results.json`): ドキュメント別の分析結果")?;

    writeln!(out, "\n## 使用した固有表現タイプ\n")?;
    for label in EntityLabel::ALL {
        writeln!(out, "- **{}**: {}", label.tag(), label.description())?;
    }

    Ok(())
}

/// Render the report and write it to `path`
pub fn save_markdown_report(
    stats: &Statistics,
    failures: &[BatchFailure],
    model_name: &str,
    path: impl AsRef<Path>,
) -> Result<()> {
    let report = render_markdown_report(stats, failures, model_name, Local::now())?;
    std::fs::write(path.as_ref(), report)?;
    Ok(())
}

/// Keep table cells on one line and away from column separators.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\r', '\n'], " ")
}
