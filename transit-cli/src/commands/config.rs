use crate::commands::Command;
use async_trait::async_trait;
use clap::{ArgMatches, Command as ClapCommand};
use toml::Value;
use transit_lib::config::TransitConfig;

pub struct ConfigCommand;

#[async_trait]
impl Command for ConfigCommand {
    fn name(&self) -> &'static str {
        "config"
    }

    async fn execute(&self, matches: &ArgMatches) -> anyhow::Result<()> {
        match matches.subcommand() {
            Some(("list", sub_matches)) => ConfigListCommand.execute(sub_matches).await,
            _ => anyhow::bail!("Invalid subcommand for config"),
        }
    }

    fn clap_command(&self) -> ClapCommand {
        ClapCommand::new(self.name())
            .about("Inspect configuration (transit.toml, TRANSIT_* variables)")
            .subcommand_required(true)
            .subcommand(ConfigListCommand.clap_command())
    }
}

pub struct ConfigListCommand;

#[async_trait]
impl Command for ConfigListCommand {
    fn name(&self) -> &'static str {
        "list"
    }

    async fn execute(&self, matches: &ArgMatches) -> anyhow::Result<()> {
        let config = TransitConfig::load()?;
        if matches.get_flag("json") {
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }
        let value = Value::try_from(&config)?;
        for line in flatten("", &value) {
            println!("{}", line);
        }
        Ok(())
    }

    fn clap_command(&self) -> ClapCommand {
        ClapCommand::new(self.name()).about("List effective configuration")
    }
}

fn flatten(prefix: &str, value: &Value) -> Vec<String> {
    match value {
        Value::Table(map) => map
            .iter()
            .flat_map(|(key, val)| {
                let new_prefix = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten(&new_prefix, val)
            })
            .collect(),
        Value::String(s) => vec![format!("{} = {}", prefix, s)],
        _ => vec![format!("{} = {}", prefix, value)],
    }
}
