use anyhow::Context;
use clap::Parser;
use std::io::{BufRead, Write};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use replyrate_core::config::Settings;
use replyrate_core::domain::forecast::ForecastInputs;
use replyrate_core::input::RawInputs;
use replyrate_core::session::ForecastSession;

mod render;

#[derive(Debug, Parser)]
#[command(name = "replyrate", about = "Estimate opens, replies, and meetings in seconds.")]
struct Args {
    /// Number of prospects in the campaign.
    #[arg(long, allow_hyphen_values = true)]
    total_prospects: Option<String>,

    /// Open rate, in percent.
    #[arg(long, allow_hyphen_values = true)]
    open_rate: Option<String>,

    /// Reply rate, in percent of opens.
    #[arg(long, allow_hyphen_values = true)]
    reply_rate: Option<String>,

    /// Meeting conversion, in percent of replies.
    #[arg(long, allow_hyphen_values = true)]
    meeting_conversion: Option<String>,

    /// Average deal value, in currency units.
    #[arg(long, allow_hyphen_values = true)]
    avg_deal_value: Option<String>,

    /// Print reports as JSON.
    #[arg(long)]
    json: bool,

    /// Read one scenario per stdin line and show trends between them.
    #[arg(long)]
    interactive: bool,
}

impl Args {
    fn raw_inputs(&self) -> RawInputs {
        let mut raw = RawInputs::from(&ForecastInputs::default());
        let overrides = [
            (&mut raw.total_prospects, &self.total_prospects),
            (&mut raw.open_rate, &self.open_rate),
            (&mut raw.reply_rate, &self.reply_rate),
            (&mut raw.meeting_conversion, &self.meeting_conversion),
            (&mut raw.avg_deal_value, &self.avg_deal_value),
        ];
        for (field, value) in overrides {
            if let Some(value) = value {
                *field = value.clone();
            }
        }
        raw
    }
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::from_env()?;
    let _sentry_guard = init_sentry(&settings);

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer())
        .init();

    let args = Args::parse();
    let format = if args.json {
        render::OutputFormat::Json
    } else {
        render::OutputFormat::Text
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let result = if args.interactive {
        let stdin = std::io::stdin();
        run_interactive(stdin.lock(), &mut out, &settings, format, args.raw_inputs())
    } else {
        run_once(&mut out, &settings, format, &args.raw_inputs())
    };

    if let Err(err) = &result {
        sentry_anyhow::capture_anyhow(err);
        tracing::error!(error = %err, "forecast run failed");
    }
    result
}

fn run_once(
    out: &mut impl Write,
    settings: &Settings,
    format: render::OutputFormat,
    raw: &RawInputs,
) -> anyhow::Result<()> {
    let mut session = ForecastSession::new();
    let report = session.calculate(raw.normalize(&settings.percent_bounds));
    render::write_report(out, &report, &settings.currency_symbol, format)
}

/// Each line is `prospects open reply meeting deal`; trailing fields left off
/// keep the previous line's values. A blank line, `q`, or EOF ends the session.
fn run_interactive(
    input: impl BufRead,
    out: &mut impl Write,
    settings: &Settings,
    format: render::OutputFormat,
    initial: RawInputs,
) -> anyhow::Result<()> {
    let mut session = ForecastSession::new();
    let mut raw = initial;
    let mut calculations = 0usize;

    for line in input.lines() {
        let line = line.context("failed to read scenario from stdin")?;
        let line = line.trim();
        if line.is_empty() || line.eq_ignore_ascii_case("q") {
            break;
        }

        raw = apply_line(raw, line);
        let report = session.calculate(raw.normalize(&settings.percent_bounds));
        render::write_report(out, &report, &settings.currency_symbol, format)?;
        calculations += 1;
    }

    tracing::info!(calculations, "interactive session finished");
    Ok(())
}

fn apply_line(mut raw: RawInputs, line: &str) -> RawInputs {
    let fields = [
        &mut raw.total_prospects,
        &mut raw.open_rate,
        &mut raw.reply_rate,
        &mut raw.meeting_conversion,
        &mut raw.avg_deal_value,
    ];
    for (field, token) in fields.into_iter().zip(line.split_whitespace()) {
        *field = token.to_string();
    }
    raw
}

fn init_sentry(settings: &Settings) -> Option<sentry::ClientInitGuard> {
    let dsn = settings.sentry_dsn.as_deref()?;
    Some(sentry::init((
        dsn,
        sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        },
    )))
}
