use clap::ArgMatches;
use colored::{ColoredString, Colorize};
use serde::Serialize;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Color, Modify, Style};
use tabled::{Table, Tabled};
use transit_lib::config::{OutputFormat, TransitConfig};
use transit_lib::{DurationInput, RouteTransit, TransitTime};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSettings {
    pub format: OutputFormat,
    pub show_unparseable: bool,
}

impl OutputSettings {
    /// Effective settings: configuration file and environment, then `--json`.
    pub fn resolve(matches: &ArgMatches) -> anyhow::Result<Self> {
        let config = TransitConfig::load()?;
        if let Some(color) = color_override(&config) {
            colored::control::set_override(color);
        }
        Ok(Self::from_config(&config, matches.get_flag("json")))
    }

    pub fn from_config(config: &TransitConfig, json: bool) -> Self {
        Self {
            format: if json { OutputFormat::Json } else { config.output.format },
            show_unparseable: config.output.show_unparseable,
        }
    }
}

/// `color = true` leaves tty and `NO_COLOR` detection to `colored`.
fn color_override(config: &TransitConfig) -> Option<bool> {
    (!config.output.color).then_some(false)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DurationReport {
    pub input: DurationInput,
    pub hours: Option<u64>,
    pub days: Option<u64>,
    pub compact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DurationReport {
    pub fn lenient(input: DurationInput) -> Self {
        let transit = TransitTime::parse(&input);
        Self {
            input,
            hours: transit.map(|t| t.hours()),
            days: transit.map(|t| t.days()),
            compact: transit.map(|t| t.to_string()),
            error: None,
        }
    }

    pub fn strict(raw: &str) -> Self {
        match raw.parse::<TransitTime>() {
            Ok(transit) => Self {
                input: raw.into(),
                hours: Some(transit.hours()),
                days: Some(transit.days()),
                compact: Some(transit.to_string()),
                error: None,
            },
            Err(err) => Self {
                input: raw.into(),
                hours: None,
                days: None,
                compact: None,
                error: Some(err.to_string()),
            },
        }
    }

    pub fn is_parsed(&self) -> bool {
        self.hours.is_some()
    }
}

#[derive(Debug, Tabled)]
struct DurationRow {
    input: String,
    hours: ColoredString,
    days: ColoredString,
    compact: String,
}

impl DurationRow {
    fn new(report: &DurationReport) -> Self {
        let compact = match (&report.compact, &report.error) {
            (Some(compact), _) => compact.clone(),
            (None, Some(error)) => error.clone(),
            (None, None) => String::new(),
        };
        DurationRow {
            input: report.input.to_string(),
            hours: cell(report.hours),
            days: cell(report.days),
            compact,
        }
    }
}

#[derive(Debug, Tabled)]
struct LegRow {
    leg: u32,
    input: String,
    hours: ColoredString,
    compact: String,
}

fn cell(value: Option<u64>) -> ColoredString {
    match value {
        Some(value) => value.to_string().normal(),
        None => "-".red(),
    }
}

fn styled(mut table: Table) -> String {
    table.with(Style::modern().remove_horizontal());
    table.with(Modify::new(Columns::new(..)).with(Alignment::center()));
    table.with(
        Modify::new(Columns::first())
            .with(Color::BOLD | Color::FG_WHITE)
            .with(Alignment::left()),
    );
    table.to_string()
}

pub fn render_reports(reports: &[DurationReport], settings: &OutputSettings) -> anyhow::Result<String> {
    let visible: Vec<&DurationReport> = reports
        .iter()
        .filter(|report| settings.show_unparseable || report.is_parsed())
        .collect();

    match settings.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&visible)?),
        OutputFormat::Table => {
            let rows: Vec<DurationRow> = visible.iter().map(|report| DurationRow::new(report)).collect();
            let parsed = reports.iter().filter(|report| report.is_parsed()).count();
            Ok(format!(
                "{}\n{} of {} values parsed",
                styled(Table::new(rows)),
                parsed,
                reports.len()
            ))
        }
    }
}

pub fn render_route(route: &RouteTransit, settings: &OutputSettings) -> anyhow::Result<String> {
    let mut route = route.clone();
    if !settings.show_unparseable {
        route.legs.retain(|leg| leg.hours.is_some());
    }

    match settings.format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&route)?),
        OutputFormat::Table => {
            let rows: Vec<LegRow> = route
                .legs
                .iter()
                .map(|leg| LegRow {
                    leg: leg.sequence,
                    input: leg.input.to_string(),
                    hours: cell(leg.hours),
                    compact: leg
                        .hours
                        .and_then(TransitTime::from_hours)
                        .map(|t| t.to_string())
                        .unwrap_or_default(),
                })
                .collect();
            let total = match (route.total_hours, route.total_days) {
                (Some(hours), Some(days)) => format!("total transit: {}h ({} days)", hours, days),
                _ => "total transit: unknown".to_string(),
            };
            Ok(format!(
                "{}\n{}, {} unparseable leg(s)",
                styled(Table::new(rows)),
                total,
                route.unparseable_legs
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use transit_lib::{route_transit, LegTransit};

    fn settings(format: OutputFormat, show_unparseable: bool) -> OutputSettings {
        OutputSettings {
            format,
            show_unparseable,
        }
    }

    #[test]
    fn test_json_flag_overrides_config() {
        let config = TransitConfig::default();
        assert_eq!(OutputSettings::from_config(&config, true).format, OutputFormat::Json);
        assert_eq!(OutputSettings::from_config(&config, false).format, OutputFormat::Table);
    }

    #[test]
    fn test_color_is_only_forced_off() {
        let mut config = TransitConfig::default();
        assert_eq!(color_override(&config), None);
        config.output.color = false;
        assert_eq!(color_override(&config), Some(false));
    }

    #[test]
    fn test_strict_report_keeps_reason() {
        let report = DurationReport::strict("soon");
        assert!(!report.is_parsed());
        assert_eq!(report.error.as_deref(), Some("no duration found in 'soon'"));
        assert_eq!(DurationReport::strict("1d 12h").hours, Some(36));
    }

    #[test]
    fn test_render_reports_json() {
        let reports = vec![
            DurationReport::lenient("25 days".into()),
            DurationReport::lenient(DurationInput::Absent),
        ];
        let rendered = render_reports(&reports, &settings(OutputFormat::Json, true)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value[0]["hours"], 600);
        assert_eq!(value[0]["days"], 25);
        assert_eq!(value[0]["compact"], "25d");
        assert!(value[1]["hours"].is_null());
        assert!(value[1].get("error").is_none());
    }

    #[test]
    fn test_render_reports_hides_unparseable() {
        let reports = vec![
            DurationReport::lenient("48h".into()),
            DurationReport::lenient("abc".into()),
        ];
        let rendered = render_reports(&reports, &settings(OutputFormat::Json, false)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_render_reports_table() {
        colored::control::set_override(false);
        let reports = vec![DurationReport::lenient("1d 12h".into())];
        let rendered = render_reports(&reports, &settings(OutputFormat::Table, true)).unwrap();
        assert!(rendered.contains("36"));
        assert!(rendered.contains("1d 12h"));
        assert!(rendered.ends_with("1 of 1 values parsed"));
    }

    #[test]
    fn test_render_route_table() {
        colored::control::set_override(false);
        let route = route_transit(&LegTransit::sequenced(["2 days", "tbd", "12h"]));
        let rendered = render_route(&route, &settings(OutputFormat::Table, true)).unwrap();
        assert!(rendered.contains("total transit: 60h (3 days)"));
        assert!(rendered.ends_with("1 unparseable leg(s)"));
    }

    #[test]
    fn test_render_route_json() {
        let route = route_transit(&LegTransit::sequenced(["2 days", "tbd"]));
        let rendered = render_route(&route, &settings(OutputFormat::Json, false)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(value["legs"].as_array().unwrap().len(), 1);
        assert_eq!(value["total_hours"], 48);
        assert_eq!(value["unparseable_legs"], 1);
    }
}
