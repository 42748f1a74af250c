use crate::commands::{values_arg, values_clap_arg, Command};
use crate::output::{render_reports, DurationReport, OutputSettings};
use async_trait::async_trait;
use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};

pub struct ParseCommand;

#[async_trait]
impl Command for ParseCommand {
    fn name(&self) -> &'static str {
        "parse"
    }

    async fn execute(&self, matches: &ArgMatches) -> anyhow::Result<()> {
        let settings = OutputSettings::resolve(matches)?;
        let strict = matches.get_flag("strict");
        let values = values_arg(matches);
        crate::debug!("parsing {} value(s), strict={}", values.len(), strict);

        let reports: Vec<DurationReport> = values
            .iter()
            .map(|value| {
                if strict {
                    DurationReport::strict(value)
                } else {
                    DurationReport::lenient(value.as_str().into())
                }
            })
            .collect();
        println!("{}", render_reports(&reports, &settings)?);

        let rejected = reports.iter().filter(|report| report.error.is_some()).count();
        if rejected > 0 {
            anyhow::bail!("{} value(s) rejected", rejected);
        }
        Ok(())
    }

    fn clap_command(&self) -> ClapCommand {
        ClapCommand::new(self.name())
            .about("Convert transit times to hours and days")
            .alias("p")
            .arg(values_clap_arg())
            .arg(
                Arg::new("strict")
                    .short('s')
                    .long("strict")
                    .help("fail on values that cannot be parsed and explain why")
                    .action(ArgAction::SetTrue),
            )
    }
}
