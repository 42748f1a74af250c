use crate::commands::Command;
use crate::output::{render_reports, render_route, DurationReport, OutputSettings};
use anyhow::Context;
use async_trait::async_trait;
use clap::{Arg, ArgMatches, Command as ClapCommand};
use serde_json::Value;
use std::path::PathBuf;
use transit_lib::{route_transit, DurationInput, LegTransit};

pub struct FileCommand;

#[async_trait]
impl Command for FileCommand {
    fn name(&self) -> &'static str {
        "file"
    }

    async fn execute(&self, matches: &ArgMatches) -> anyhow::Result<()> {
        let settings = OutputSettings::resolve(matches)?;
        let path = matches
            .get_one::<PathBuf>("path")
            .context("missing file path")?;
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("unable to read {}", path.display()))?;

        match read_entries(&content)? {
            FileEntries::Values(values) => {
                crate::debug!("{} values read from {}", values.len(), path.display());
                let reports: Vec<DurationReport> =
                    values.into_iter().map(DurationReport::lenient).collect();
                println!("{}", render_reports(&reports, &settings)?);
            }
            FileEntries::Legs(legs) => {
                crate::debug!("{} legs read from {}", legs.len(), path.display());
                println!("{}", render_route(&route_transit(&legs), &settings)?);
            }
        }
        Ok(())
    }

    fn clap_command(&self) -> ClapCommand {
        ClapCommand::new(self.name())
            .about("Convert every transit time found in a file")
            .long_about(
                "Reads a JSON array of values (null, numbers, strings) or of leg objects \
                 ({\"sequence\": 1, \"transit_time\": \"2 days\"}), or a text file with one value per line.",
            )
            .arg(
                Arg::new("path")
                    .value_name("PATH")
                    .required(true)
                    .value_parser(clap::value_parser!(PathBuf)),
            )
    }
}

#[derive(Debug, PartialEq)]
pub enum FileEntries {
    Values(Vec<DurationInput>),
    Legs(Vec<LegTransit>),
}

pub fn read_entries(content: &str) -> anyhow::Result<FileEntries> {
    let trimmed = content.trim_start();
    if !trimmed.starts_with('[') {
        let values = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(DurationInput::from)
            .collect();
        return Ok(FileEntries::Values(values));
    }

    let items: Vec<Value> = serde_json::from_str(trimmed).context("invalid JSON array")?;
    if !items.is_empty() && items.iter().all(Value::is_object) {
        let legs = items
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<LegTransit>, _>>()
            .context("invalid leg entry")?;
        return Ok(FileEntries::Legs(legs));
    }

    let values = items
        .into_iter()
        .map(serde_json::from_value)
        .collect::<Result<Vec<DurationInput>, _>>()
        .context("entries must be null, numbers or strings")?;
    Ok(FileEntries::Values(values))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines() {
        let entries = read_entries("25 days\n\n  48h \n5\n").unwrap();
        assert_eq!(
            entries,
            FileEntries::Values(vec!["25 days".into(), "48h".into(), "5".into()])
        );
    }

    #[test]
    fn test_json_values() {
        let entries = read_entries(r#"[null, 5, "1d 12h"]"#).unwrap();
        assert_eq!(
            entries,
            FileEntries::Values(vec![
                DurationInput::Absent,
                DurationInput::Number(5.0),
                "1d 12h".into(),
            ])
        );
    }

    #[test]
    fn test_json_legs() {
        let entries = read_entries(
            r#"[{"sequence": 2, "transit_time": "12h"}, {"sequence": 1, "transit_time": 2}]"#,
        )
        .unwrap();
        let FileEntries::Legs(legs) = entries else {
            panic!("expected legs");
        };
        assert_eq!(route_transit(&legs).total_hours, Some(60));
    }

    #[test]
    fn test_mixed_json_is_rejected() {
        assert!(read_entries(r#"[{"sequence": 1}, [1, 2]]"#).is_err());
        assert!(read_entries("[1, 2").is_err());
    }

    #[test]
    fn test_empty_json_array() {
        assert_eq!(read_entries("[]").unwrap(), FileEntries::Values(vec![]));
    }
}
