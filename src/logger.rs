use chrono::Local;
use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;

/// Installs the global logger. `RUST_LOG` wins over `level` when set.
pub fn init(level: LevelFilter) {
    let mut builder = Builder::new();
    builder
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .filter(None, level)
        .parse_env(Env::default());

    // A second init (e.g. from tests) is harmless; keep the first logger.
    if builder.try_init().is_err() {
        return;
    }

    log::info!("Logger initialized at level {}.", level);
}
