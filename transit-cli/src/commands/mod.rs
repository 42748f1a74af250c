pub mod config;
pub mod file;
pub mod legs;
pub mod parse;

use async_trait::async_trait;
use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use std::collections::BTreeMap;

pub fn build_app(registry: &CommandRegistry) -> ClapCommand {
    let mut app = ClapCommand::new("transit")
        .about("Normalize free-form transit times into hours and days")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug logging")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print JSON instead of a table")
                .action(ArgAction::SetTrue)
                .global(true),
        );

    for subcommand in registry.commands.values() {
        app = app.subcommand(subcommand.clap_command());
    }

    app
}

#[async_trait]
pub trait Command {
    fn name(&self) -> &'static str;
    async fn execute(&self, matches: &ArgMatches) -> anyhow::Result<()>;
    fn clap_command(&self) -> ClapCommand;
}

pub struct CommandRegistry {
    pub commands: BTreeMap<&'static str, Box<dyn Command + Send + Sync>>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: BTreeMap::new(),
        }
    }

    pub fn register<C: Command + Send + Sync + 'static>(&mut self, command: C) {
        self.commands.insert(command.name(), Box::new(command));
    }

    pub async fn execute(&self, name: &str, matches: &ArgMatches) -> anyhow::Result<()> {
        match self.commands.get(name) {
            Some(command) => command.execute(matches).await,
            None => anyhow::bail!("{} not found", name),
        }
    }
}

/// Collects the positional `VALUE` arguments of a subcommand.
pub(crate) fn values_arg(matches: &ArgMatches) -> Vec<String> {
    matches
        .get_many::<String>("values")
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

pub(crate) fn values_clap_arg() -> Arg {
    Arg::new("values")
        .value_name("VALUE")
        .help("Transit times, e.g. \"25 days\", 48h, \"1d 12h\", 5")
        .num_args(1..)
        .required(true)
        .allow_negative_numbers(true)
}

#[cfg(test)]
pub(crate) fn test_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry.register(parse::ParseCommand);
    registry.register(legs::LegsCommand);
    registry.register(file::FileCommand);
    registry.register(config::ConfigCommand);
    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_is_consistent() {
        build_app(&test_registry()).debug_assert();
    }

    #[test]
    fn test_global_flags_reach_subcommands() {
        let matches = build_app(&test_registry())
            .try_get_matches_from(["transit", "parse", "--json", "48h", "1d 12h"])
            .unwrap();
        let (name, sub_matches) = matches.subcommand().unwrap();
        assert_eq!(name, "parse");
        assert!(sub_matches.get_flag("json"));
        assert_eq!(values_arg(sub_matches), vec!["48h", "1d 12h"]);
    }

    #[test]
    fn test_negative_values_are_accepted() {
        let matches = build_app(&test_registry())
            .try_get_matches_from(["transit", "parse", "-3"])
            .unwrap();
        let (_, sub_matches) = matches.subcommand().unwrap();
        assert_eq!(values_arg(sub_matches), vec!["-3"]);
    }

    #[tokio::test]
    async fn test_unknown_command() {
        let registry = test_registry();
        let matches = ArgMatches::default();
        assert!(registry.execute("nope", &matches).await.is_err());
    }
}
