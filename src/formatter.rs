//! Log line formatting with the simulation tick stamped on every event.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use time::format_description::FormatItem;
use time::macros::format_description;
use time::OffsetDateTime;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, FormattedFields};
use tracing_subscriber::registry::LookupSpan;

/// Ticks simulated since startup.
static TICKS: AtomicU64 = AtomicU64::new(0);

/// Only the low 16 bits of the tick are printed.
const TICK_DISPLAY_MASK: u64 = 0xFFFF;

const TIMESTAMP: &[FormatItem<'static>] = format_description!("[hour]:[minute]:[second].[subsecond digits:4]");

/// Formats events as `time tick LEVEL span{fields}: target: message fields`.
///
/// The tick is printed as a 16-bit hexadecimal counter (`0x0000` through `0xFFFF`, then wrapping).
#[derive(Debug, Default, Clone, Copy)]
pub struct TickFormatter;

#[derive(Clone, Copy)]
enum Style {
    Dim,
    Bold,
    Level(Level),
}

impl Style {
    fn code(self) -> &'static str {
        match self {
            Style::Dim => "\x1b[2m",
            Style::Bold => "\x1b[1m",
            Style::Level(level) => match level {
                Level::TRACE => "\x1b[35m",
                Level::DEBUG => "\x1b[34m",
                Level::INFO => "\x1b[32m",
                Level::WARN => "\x1b[33m",
                Level::ERROR => "\x1b[31m",
            },
        }
    }
}

fn styled(writer: &mut Writer<'_>, style: Style, value: impl fmt::Display) -> fmt::Result {
    if writer.has_ansi_escapes() {
        write!(writer, "{}{}\x1b[0m", style.code(), value)
    } else {
        write!(writer, "{value}")
    }
}

/// The masked tick as it appears in a log line.
pub fn tick_label(ticks: u64) -> String {
    format!("0x{:04X}", ticks & TICK_DISPLAY_MASK)
}

impl<S, N> FormatEvent<S, N> for TickFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();

        let now = OffsetDateTime::now_utc().format(TIMESTAMP).map_err(|_| fmt::Error)?;
        styled(&mut writer, Style::Dim, now)?;
        writer.write_char(' ')?;
        styled(&mut writer, Style::Dim, tick_label(tick_count()))?;
        writer.write_char(' ')?;
        styled(&mut writer, Style::Level(*meta.level()), format_args!("{:>5}", meta.level().as_str()))?;
        writer.write_char(' ')?;

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                styled(&mut writer, Style::Bold, span.name())?;
                if let Some(fields) = span.extensions().get::<FormattedFields<N>>() {
                    if !fields.is_empty() {
                        write!(writer, "{{{fields}}}")?;
                    }
                }
                writer.write_str(": ")?;
            }
        }

        styled(&mut writer, Style::Dim, format_args!("{}:", meta.target()))?;
        writer.write_char(' ')?;
        ctx.format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Advances the tick stamp. Called once per simulated tick.
pub fn increment_tick() {
    TICKS.fetch_add(1, Ordering::Relaxed);
}

pub fn tick_count() -> u64 {
    TICKS.load(Ordering::Relaxed)
}
