use crate::commands::{values_arg, values_clap_arg, Command};
use crate::output::{render_route, OutputSettings};
use async_trait::async_trait;
use clap::{ArgMatches, Command as ClapCommand};
use transit_lib::{route_transit, LegTransit};

pub struct LegsCommand;

#[async_trait]
impl Command for LegsCommand {
    fn name(&self) -> &'static str {
        "legs"
    }

    async fn execute(&self, matches: &ArgMatches) -> anyhow::Result<()> {
        let settings = OutputSettings::resolve(matches)?;
        let legs = LegTransit::sequenced(values_arg(matches));
        let route = route_transit(&legs);
        println!("{}", render_route(&route, &settings)?);

        if route.total_hours.is_none() {
            crate::warn!("none of the {} legs has a usable transit time", legs.len());
        }
        Ok(())
    }

    fn clap_command(&self) -> ClapCommand {
        ClapCommand::new(self.name())
            .about("Total the transit time of consecutive route legs")
            .arg(values_clap_arg())
    }
}
