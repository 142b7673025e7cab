//! Human-readable dump of a resolved configuration.

use std::io::Write;

use owo_colors::OwoColorize;

use crate::color::should_use_color;
use crate::config::Config;

/// Write every resolved value with its origin, then the recorded
/// overrides.
///
/// ```text
/// db.host = localhost        (app.toml: db.host)
/// db.port = 5432             (env: APP_DB__PORT)
///
/// overrides:
///   db.port: `5432` (layer `env`) overrides `5433` (layer `app.toml`)
/// ```
pub(crate) fn dump_config(config: &Config, writer: &mut dyn Write) -> std::io::Result<()> {
    let colors = should_use_color();

    let width = config
        .entries()
        .iter()
        .map(|(path, entry)| path.to_string().len() + entry.value.len())
        .max()
        .unwrap_or(0);

    for (path, entry) in config.entries() {
        let origin = match &entry.provenance {
            Some(provenance) => provenance.source_description(),
            None => format!("layer: {}", entry.layer),
        };
        let assignment = format!("{path} = {}", entry.value);
        let padding = width + 3 - path.to_string().len() - entry.value.len();
        if colors {
            writeln!(
                writer,
                "{}{}({})",
                assignment.bold(),
                " ".repeat(padding),
                origin.dimmed()
            )?;
        } else {
            writeln!(writer, "{}{}({})", assignment, " ".repeat(padding), origin)?;
        }
    }

    if !config.overrides().is_empty() {
        writeln!(writer)?;
        writeln!(writer, "overrides:")?;
        for record in config.overrides() {
            writeln!(writer, "  {record}")?;
        }
    }

    Ok(())
}
