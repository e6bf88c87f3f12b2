//! Console formatter for the default log format.

use std::fmt;
use time::OffsetDateTime;
use time::macros::format_description;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields, format};
use tracing_subscriber::registry::LookupSpan;

/// `HH:MM:SS LEVEL span: message key=value` on one line.
#[derive(Debug, Clone, Copy)]
pub struct ConsoleFormatter {
    ansi: bool,
}

impl ConsoleFormatter {
    pub fn new(ansi: bool) -> Self {
        Self { ansi }
    }

    fn level_str(&self, level: tracing::Level) -> &'static str {
        match (level, self.ansi) {
            (tracing::Level::TRACE, true) => "\x1b[36mTRACE\x1b[0m",
            (tracing::Level::DEBUG, true) => "\x1b[34mDEBUG\x1b[0m",
            (tracing::Level::INFO, true) => "\x1b[32mINFO \x1b[0m",
            (tracing::Level::WARN, true) => "\x1b[33mWARN \x1b[0m",
            (tracing::Level::ERROR, true) => "\x1b[31mERROR\x1b[0m",
            (tracing::Level::TRACE, false) => "TRACE",
            (tracing::Level::DEBUG, false) => "DEBUG",
            (tracing::Level::INFO, false) => "INFO ",
            (tracing::Level::WARN, false) => "WARN ",
            (tracing::Level::ERROR, false) => "ERROR",
        }
    }
}

impl<S, N> FormatEvent<S, N> for ConsoleFormatter
where
    S: tracing::Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> fmt::Result {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let time = now
            .format(format_description!("[hour]:[minute]:[second]"))
            .unwrap_or_default();

        write!(writer, "{} {} ", time, self.level_str(*event.metadata().level()))?;

        if let Some(scope) = ctx.event_scope() {
            for span in scope.from_root() {
                write!(writer, "{}: ", span.name())?;
            }
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;

        writeln!(writer)
    }
}
