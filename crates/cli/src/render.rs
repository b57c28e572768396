use anyhow::Context;
use serde::Serialize;
use std::io::Write;

use replyrate_core::report::{ForecastReport, ResultCard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a ForecastReport,
    cards: Vec<ResultCard>,
}

pub fn write_report(
    out: &mut impl Write,
    report: &ForecastReport,
    currency_symbol: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let cards = report.cards(currency_symbol);
    match format {
        OutputFormat::Text => {
            let inputs = &report.inputs;
            writeln!(
                out,
                "prospects={} open={}% reply={}% meeting={}% deal={}",
                inputs.total_prospects,
                inputs.open_rate,
                inputs.reply_rate,
                inputs.meeting_conversion,
                inputs.avg_deal_value,
            )
            .context("failed to write report")?;
            for card in &cards {
                writeln!(out, "{}", card.render_line()).context("failed to write report")?;
            }
            writeln!(out).context("failed to write report")?;
        }
        OutputFormat::Json => {
            let doc = JsonReport { report, cards };
            serde_json::to_writer(&mut *out, &doc).context("failed to serialize report")?;
            writeln!(out).context("failed to write report")?;
        }
    }
    Ok(())
}
