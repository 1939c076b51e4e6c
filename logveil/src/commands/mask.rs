// logveil/src/commands/mask.rs
//! The stream-masking command: read log lines, sanitize, write.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use owo_colors::OwoColorize;
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};

use logveil_core::{
    merge_configs, DataType, EngineBuilder, MaskingConfig, MaskingEngine, SensitiveField,
};

use crate::cli::Cli;

/// Builds the engine from the embedded defaults, the optional user config
/// file, and the command-line overrides.
pub fn build_engine(cli: &Cli) -> Result<MaskingEngine> {
    let defaults = MaskingConfig::load_default_config()?;
    let user = match &cli.config {
        Some(path) => Some(
            MaskingConfig::load_from_file(path)
                .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        ),
        None => None,
    };
    let mut config = merge_configs(defaults, user);

    for spec in &cli.fields {
        let field = parse_field_spec(spec);
        // A redeclared name replaces the configured field; a second pattern
        // set for the same key would re-mask its own output.
        config
            .sensitive_fields
            .retain(|f| !f.name.eq_ignore_ascii_case(&field.name));
        config.sensitive_fields.push(field);
    }
    if !cli.disable.is_empty() {
        config
            .sensitive_fields
            .retain(|f| !cli.disable.iter().any(|d| d.eq_ignore_ascii_case(&f.name)));
    }
    if cli.no_auto_detect {
        config.auto_detect = false;
    }
    if let Some(mask_char) = cli.mask_char {
        config.mask_char = mask_char;
    }

    debug!(
        "Effective config: {} fields, auto_detect={}.",
        config.sensitive_fields.len(),
        config.auto_detect
    );
    let engine = EngineBuilder::from_config(config)
        .build()
        .context("Failed to configure the masking engine")?;
    Ok(engine)
}

/// Parses a `--field NAME[:TYPE]` declaration. Unknown types resolve to
/// generic, so a bare name is always accepted.
fn parse_field_spec(spec: &str) -> SensitiveField {
    match spec.split_once(':') {
        Some((name, data_type)) => SensitiveField::new(name, DataType::from_key(data_type)),
        None => SensitiveField::new(spec, DataType::Generic),
    }
}

/// Runs the line-buffered masking loop.
pub fn run(cli: &Cli) -> Result<()> {
    let engine = build_engine(cli)?;

    let reader: Box<dyn BufRead> = match &cli.input_file {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open input '{}'", path.display()))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut writer: Box<dyn Write> = match &cli.output_file {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create output '{}'", path.display()))?,
        )),
        None => Box::new(io::stdout().lock()),
    };

    let mut totals: BTreeMap<String, usize> = BTreeMap::new();
    let mut lines_in = 0u64;

    for line in reader.lines() {
        let line = line.context("Failed to read input line")?;
        lines_in += 1;

        let line = if cli.strip_ansi {
            String::from_utf8_lossy(&strip_ansi_escapes::strip(line.as_bytes())).into_owned()
        } else {
            line
        };

        if cli.stats {
            let (masked, summary) = engine.sanitize_with_summary(&line);
            for item in summary {
                *totals.entry(item.rule_name).or_default() += item.occurrences;
            }
            writeln!(writer, "{masked}")?;
        } else {
            writeln!(writer, "{}", engine.sanitize(&line))?;
        }
        // Line-buffered: each masked line is visible to the consumer
        // immediately, so logveil can sit inside a live pipeline.
        writer.flush()?;
    }

    info!("Processed {lines_in} lines.");
    if cli.stats {
        print_summary(&totals);
    }
    Ok(())
}

fn print_summary(totals: &BTreeMap<String, usize>) {
    if totals.is_empty() {
        eprintln!("logveil: no sensitive values masked");
        return;
    }

    let colored = io::stderr().is_terminal();
    if colored {
        eprintln!("{}", "Masking summary:".bold());
    } else {
        eprintln!("Masking summary:");
    }
    for (rule, count) in totals {
        if colored {
            eprintln!("  {}: {}", rule.cyan(), count);
        } else {
            eprintln!("  {rule}: {count}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_spec_with_type() {
        let field = parse_field_spec("documento:national-id");
        assert_eq!(field.name, "documento");
        assert_eq!(field.data_type, DataType::NationalId);
    }

    #[test]
    fn field_spec_without_type_is_generic() {
        let field = parse_field_spec("session");
        assert_eq!(field.name, "session");
        assert_eq!(field.data_type, DataType::Generic);
    }

    #[test]
    fn field_spec_with_unknown_type_is_generic() {
        let field = parse_field_spec("x:wat");
        assert_eq!(field.data_type, DataType::Generic);
    }
}
