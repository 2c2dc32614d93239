//! Log output
//!
//! Log lines go to stdout as `LEVEL 19-10 at 14:03:52 message`. `RUST_LOG`
//! overrides the level chosen from `--verbose`.

use std::fmt;

use console::{Style, Term};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{ChronoLocal, FormatTime};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

const TIME_FORMAT: &str = "%d-%m at %H:%M:%S";

fn default_filter(verbose: bool) -> &'static str {
    if verbose { "debug" } else { "info" }
}

/// Event format putting the level before the timestamp
struct LevelFirst {
    timer: ChronoLocal,
}

impl LevelFirst {
    fn new() -> Self {
        Self {
            timer: ChronoLocal::new(TIME_FORMAT.to_string()),
        }
    }
}

fn level_label(level: Level, ansi: bool) -> String {
    let label = format!("{:<5}", level.as_str());
    if !ansi {
        return label;
    }
    let style = match level {
        Level::ERROR => Style::new().red().bold(),
        Level::WARN => Style::new().yellow().bold(),
        Level::INFO => Style::new().bold(),
        _ => Style::new().blue(),
    };
    style.force_styling(true).apply_to(label).to_string()
}

impl<S, N> FormatEvent<S, N> for LevelFirst
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let label = level_label(*event.metadata().level(), writer.has_ansi_escapes());
        write!(writer, "{label} ")?;
        self.timer.format_time(&mut writer)?;
        write!(writer, " ")?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the global subscriber; later calls are no-ops
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .with_ansi(Term::stdout().is_term())
        .event_format(LevelFirst::new())
        .try_init();

    tracing::debug!("logging initialized (verbose={verbose})");
}
