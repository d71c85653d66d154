// CSV export of the displayed result rows.

use anyhow::{Context, Result, anyhow};
use csv::{QuoteStyle, Terminator, WriterBuilder};

use crate::models::KeywordResult;

pub const EXPORT_FILE_NAME: &str = "keyword_research.csv";
pub const EXPORT_CONTENT_TYPE: &str = "text/csv;charset=utf-8";

const HEADER: [&str; 3] = ["Keyword", "Monthly Searches", "Competition"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

/// Builds the download for `results`, or `None` when there is nothing to export.
pub fn export_results(results: &[KeywordResult]) -> Result<Option<CsvExport>> {
    if results.is_empty() {
        return Ok(None);
    }
    Ok(Some(CsvExport {
        file_name: EXPORT_FILE_NAME,
        content_type: EXPORT_CONTENT_TYPE,
        body: render_csv(results)?,
    }))
}

// Keywords are wrapped in quotes verbatim: embedded quotes and commas are
// not escaped. Rows are joined with '\n' and there is no trailing newline.
pub fn render_csv(results: &[KeywordResult]) -> Result<String> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER).context("Failed to write CSV header")?;
    for row in results {
        writer
            .write_record([
                format!("\"{}\"", row.keyword),
                row.avg_monthly_searches.to_string(),
                row.competition.clone(),
            ])
            .with_context(|| format!("Failed to write CSV row for '{}'", row.keyword))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow!("Failed to flush CSV buffer: {}", e.error()))?;
    let mut body = String::from_utf8(bytes).context("CSV output is not valid UTF-8")?;
    if body.ends_with('\n') {
        body.pop();
    }
    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn row(keyword: &str, searches: u64, competition: &str) -> KeywordResult {
        KeywordResult {
            keyword: keyword.to_string(),
            avg_monthly_searches: searches,
            competition: competition.to_string(),
        }
    }

    #[test]
    fn embedded_quote_is_not_escaped() {
        let csv = render_csv(&[row("a\"b", 1200, "HIGH")]).unwrap();
        assert_eq!(csv, "Keyword,Monthly Searches,Competition\n\"a\"b\",1200,HIGH");
    }

    #[test]
    fn rows_follow_result_order() {
        let csv = render_csv(&[
            row("seo tools", 12100, "HIGH"),
            row("keyword planner", 90500, "LOW"),
            row("serp, checker", 880, "MEDIUM"),
        ])
        .unwrap();

        assert_eq!(
            csv,
            "Keyword,Monthly Searches,Competition\n\
             \"seo tools\",12100,HIGH\n\
             \"keyword planner\",90500,LOW\n\
             \"serp, checker\",880,MEDIUM"
        );
    }

    #[test]
    fn empty_results_produce_no_file() {
        assert_eq!(export_results(&[]).unwrap(), None);
    }

    #[test]
    fn export_carries_file_name_and_media_type() {
        let export = export_results(&[row("x", 0, "UNSPECIFIED")]).unwrap().unwrap();
        assert_eq!(export.file_name, "keyword_research.csv");
        assert_eq!(export.content_type, "text/csv;charset=utf-8");
        assert_eq!(export.body, "Keyword,Monthly Searches,Competition\n\"x\",0,UNSPECIFIED");
    }
}
