//! Output formatting for scrape outcomes (table, JSON, markdown, CSV).

use crate::commands::SourceOutcome;
use crate::config::OutputFormat;

/// Formats scrape outcomes for output.
pub struct Formatter {
    format: OutputFormat,
}

impl Formatter {
    /// Creates a new formatter.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Formats one outcome per scraped source.
    pub fn format_outcomes(&self, outcomes: &[SourceOutcome]) -> String {
        if outcomes.is_empty() {
            return match self.format {
                OutputFormat::Json => "[]".to_string(),
                OutputFormat::Csv => self.csv_header(),
                _ => "No sources scraped.".to_string(),
            };
        }

        match self.format {
            OutputFormat::Json => self.json_outcomes(outcomes),
            OutputFormat::Table => self.table_outcomes(outcomes),
            OutputFormat::Markdown => self.markdown_outcomes(outcomes),
            OutputFormat::Csv => self.csv_outcomes(outcomes),
        }
    }

    // JSON formatting

    fn json_outcomes(&self, outcomes: &[SourceOutcome]) -> String {
        serde_json::to_string_pretty(outcomes).unwrap_or_else(|_| "[]".to_string())
    }

    // Table formatting

    fn table_outcomes(&self, outcomes: &[SourceOutcome]) -> String {
        let source_width = outcomes.iter().map(|o| o.source.len()).max().unwrap_or(0).max(6);
        let price_width = 12;

        let mut lines = Vec::new();

        lines.push(format!("Item: {}", outcomes[0].item));
        lines.push(String::new());
        lines.push(format!("{:<source_width$}  {:>price_width$}  {}", "Source", "Price", "Result"));
        lines.push(format!("{:-<source_width$}  {:-<price_width$}  {:-<40}", "", "", ""));

        for outcome in outcomes {
            let price_str = outcome.price.map(|p| format!("{:.2}", p)).unwrap_or_else(|| "N/A".to_string());
            let detail = match (&outcome.url, &outcome.error) {
                (Some(url), _) => url.clone(),
                (None, Some(err)) => format!("error: {}", err),
                (None, None) => String::new(),
            };

            lines.push(format!(
                "{:<source_width$}  {:>price_width$}  {}",
                outcome.source, price_str, detail
            ));
        }

        if let Some(best) = Self::cheapest(outcomes) {
            lines.push(String::new());
            lines.push(format!(
                "Best: {:.2} on {}",
                best.price.unwrap_or_default(),
                best.source
            ));
        }

        lines.join("\n")
    }

    // Markdown formatting

    fn markdown_outcomes(&self, outcomes: &[SourceOutcome]) -> String {
        let mut lines = Vec::new();

        lines.push(format!("## {}", outcomes[0].item));
        lines.push(String::new());
        lines.push("| Source | Price | Link |".to_string());
        lines.push("|--------|-------|------|".to_string());

        for outcome in outcomes {
            let price_str = outcome.price.map(|p| format!("{:.2}", p)).unwrap_or_else(|| "N/A".to_string());
            let link = match (&outcome.url, &outcome.error) {
                (Some(url), _) => format!("[View offer]({})", url),
                (None, Some(err)) => format!("*{}*", err),
                (None, None) => String::new(),
            };

            lines.push(format!("| {} | {} | {} |", outcome.source, price_str, link));
        }

        lines.join("\n")
    }

    // CSV formatting

    fn csv_header(&self) -> String {
        "item,source,price,url,error".to_string()
    }

    fn csv_outcomes(&self, outcomes: &[SourceOutcome]) -> String {
        let mut lines = Vec::new();
        lines.push(self.csv_header());

        for outcome in outcomes {
            lines.push(format!(
                "{},{},{},{},{}",
                Self::csv_escape(&outcome.item),
                Self::csv_escape(&outcome.source),
                outcome.price.map(|p| p.to_string()).unwrap_or_default(),
                outcome.url.as_deref().map(Self::csv_escape).unwrap_or_default(),
                outcome.error.as_deref().map(Self::csv_escape).unwrap_or_default(),
            ));
        }

        lines.join("\n")
    }

    fn csv_escape(s: &str) -> String {
        if s.contains(',') || s.contains('"') || s.contains('\n') {
            format!("\"{}\"", s.replace('"', "\"\""))
        } else {
            s.to_string()
        }
    }

    fn cheapest(outcomes: &[SourceOutcome]) -> Option<&SourceOutcome> {
        outcomes
            .iter()
            .filter(|o| o.price.is_some())
            .min_by(|a, b| a.price.partial_cmp(&b.price).unwrap_or(std::cmp::Ordering::Equal))
    }
}
