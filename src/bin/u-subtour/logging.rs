use std::io::{self, Write};

use env_logger::{fmt::Formatter, Builder, Target};
use log::{Level, LevelFilter};

/// Installs the stderr logger; `-v` enables debug, `-vv` trace.
pub fn init_logger(verbosity: u8, quiet: bool) -> io::Result<()> {
    let level = match (quiet, verbosity) {
        (true, _) => LevelFilter::Warn,
        (false, 0) => LevelFilter::Info,
        (false, 1) => LevelFilter::Debug,
        (false, _) => LevelFilter::Trace,
    };
    let pretty = verbosity > 0;

    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .write_style(env_logger::WriteStyle::Never)
        .target(Target::Stderr)
        .format(move |buf: &mut Formatter, record| {
            if pretty {
                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    buf.timestamp_millis(),
                    level_tag(record.level()),
                    record.target(),
                    record.args()
                )
            } else {
                writeln!(buf, "{} {}", level_tag(record.level()), record.args())
            }
        });

    builder.try_init().map_err(io::Error::other)
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}
