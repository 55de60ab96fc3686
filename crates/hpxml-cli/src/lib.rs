//! HPXML Calibrate
//!
//! Command-line front end for the mutation engine.
//!
//! - `modify`: apply a directive file to a document and write the result
//! - `inspect`: print fuel types and the populated representation of every
//!   locatable quantity

use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

use anyhow::Context;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use hpxml_model::{Building, BuildingDocument};
use hpxml_mutate::locate::survey;
use hpxml_mutate::{
    Diagnostic, DirectiveSet, MutationConfig, MutationEngine, MutationReport, Reporter,
    TracingReporter,
};
use tracing_subscriber::EnvFilter;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines
    Text,
    /// One JSON object per event
    Json,
}

/// Build the argument parser
#[must_use]
pub fn command() -> Command {
    Command::new("hpxml-calibrate")
        .version(hpxml_mutate::VERSION)
        .about("Apply calibration directives to HPXML building documents")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log at debug level unless RUST_LOG is set"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(
            Command::new("modify")
                .about("Apply a directive file to a document")
                .arg(path_arg("document", "Input document (.json, .yaml, .yml)").required(true))
                .arg(path_arg("directives", "Directive file (.json, .yaml, .yml)").required(true))
                .arg(path_arg("output", "Where to write the modified document").required(true))
                .arg(path_arg("config", "Mutation config file"))
                .arg(path_arg("report", "Write the mutation report as JSON"))
                .arg(
                    Arg::new("strict")
                        .long("strict")
                        .action(ArgAction::SetTrue)
                        .help("Abort without writing if any warning or ambiguity is raised"),
                )
                .arg(building_arg()),
        )
        .subcommand(
            Command::new("inspect")
                .about("Print fuel types and located representations")
                .arg(path_arg("document", "Input document (.json, .yaml, .yml)").required(true))
                .arg(building_arg()),
        )
}

fn path_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .value_name("PATH")
        .value_parser(value_parser!(PathBuf))
        .help(help)
}

fn building_arg() -> Arg {
    Arg::new("building")
        .long("building")
        .value_name("ID")
        .help("Building to operate on (default: first)")
}

/// Verbosity and format requested on the command line
#[must_use]
pub fn log_settings(matches: &ArgMatches) -> (bool, LogFormat) {
    let format = if matches.get_flag("log-json") {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    (matches.get_flag("verbose"), format)
}

/// Install the global subscriber
///
/// `RUST_LOG` wins when set; otherwise `info`, or `debug` when verbose.
pub fn init_tracing(verbose: bool, format: LogFormat) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    // A subscriber may already be installed when embedded
    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}

/// Arguments of `modify`
#[derive(Debug, Clone)]
pub struct ModifyArgs {
    /// Input document
    pub document: PathBuf,
    /// Directive file
    pub directives: PathBuf,
    /// Output document
    pub output: PathBuf,
    /// Optional config file
    pub config: Option<PathBuf>,
    /// Optional JSON report destination
    pub report: Option<PathBuf>,
    /// Strict mode override
    pub strict: bool,
    /// Building override
    pub building: Option<String>,
}

impl ModifyArgs {
    fn from_matches(args: &ArgMatches) -> anyhow::Result<Self> {
        Ok(Self {
            document: required_path(args, "document")?,
            directives: required_path(args, "directives")?,
            output: required_path(args, "output")?,
            config: args.get_one::<PathBuf>("config").cloned(),
            report: args.get_one::<PathBuf>("report").cloned(),
            strict: args.get_flag("strict"),
            building: args.get_one::<String>("building").cloned(),
        })
    }

    /// Effective configuration: file first, then command-line overrides
    ///
    /// # Errors
    /// Returns an error if the config file cannot be loaded
    pub fn config(&self) -> anyhow::Result<MutationConfig> {
        let mut config = match &self.config {
            Some(path) => MutationConfig::from_path(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => MutationConfig::default(),
        };
        if self.strict {
            config = config.with_strict(true);
        }
        if let Some(building) = &self.building {
            config = config.with_building_id(building.clone());
        }
        Ok(config)
    }
}

/// Arguments of `inspect`
#[derive(Debug, Clone)]
pub struct InspectArgs {
    /// Input document
    pub document: PathBuf,
    /// Building override
    pub building: Option<String>,
}

impl InspectArgs {
    fn from_matches(args: &ArgMatches) -> anyhow::Result<Self> {
        Ok(Self {
            document: required_path(args, "document")?,
            building: args.get_one::<String>("building").cloned(),
        })
    }
}

fn required_path(args: &ArgMatches, name: &str) -> anyhow::Result<PathBuf> {
    args.get_one::<PathBuf>(name)
        .cloned()
        .with_context(|| format!("missing --{name}"))
}

/// Dispatch a parsed command line, returning text for stdout
///
/// # Errors
/// Returns an error if any file cannot be read or written, the directives
/// are malformed, or a strict-mode pass aborts
pub fn run(matches: &ArgMatches) -> anyhow::Result<String> {
    match matches.subcommand() {
        Some(("modify", args)) => {
            let report = modify(&ModifyArgs::from_matches(args)?)?;
            Ok(ReportSummary(&report).to_string())
        }
        Some(("inspect", args)) => inspect(&InspectArgs::from_matches(args)?),
        Some((other, _)) => anyhow::bail!("unknown subcommand {other}"),
        None => anyhow::bail!("no subcommand given"),
    }
}

/// Apply a directive file to a document file, logging diagnostics
///
/// Nothing is written when the pass fails.
///
/// # Errors
/// See [`run`]
pub fn modify(args: &ModifyArgs) -> anyhow::Result<MutationReport> {
    modify_with(args, &mut TracingReporter)
}

/// [`modify`] with a caller-supplied diagnostic sink
///
/// Malformed directives are reported as fatal diagnostics before the error
/// is returned, as [`MutationEngine::apply_values`] does.
///
/// # Errors
/// See [`run`]
pub fn modify_with(
    args: &ModifyArgs,
    reporter: &mut dyn Reporter,
) -> anyhow::Result<MutationReport> {
    let config = args.config()?;
    let mut document = BuildingDocument::from_path(&args.document)
        .with_context(|| format!("failed to read document {}", args.document.display()))?;
    let directives = match DirectiveSet::from_path(&args.directives) {
        Ok(directives) => directives,
        Err(err) => {
            for problem in err.problems() {
                reporter.fatal(Diagnostic::malformed(problem));
            }
            return Err(err).with_context(|| {
                format!("failed to read directives {}", args.directives.display())
            });
        }
    };

    let engine = MutationEngine::new(config);
    let report = engine
        .apply(&mut document, &directives, reporter)
        .context("mutation pass failed")?;

    document
        .write_to_path(&args.output)
        .with_context(|| format!("failed to write document {}", args.output.display()))?;

    if let Some(path) = &args.report {
        let json = serde_json::to_string_pretty(&report).context("failed to encode report")?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report {}", path.display()))?;
    }

    tracing::info!(
        output = %args.output.display(),
        changed = report.changed_fields(),
        "document written"
    );
    Ok(report)
}

/// Describe a document's fuels and quantity representations
///
/// # Errors
/// Returns an error if the document cannot be read or the building is not
/// found
pub fn inspect(args: &InspectArgs) -> anyhow::Result<String> {
    let document = BuildingDocument::from_path(&args.document)
        .with_context(|| format!("failed to read document {}", args.document.display()))?;
    let building = document.building(args.building.as_deref())?;
    Ok(Inspection(building).to_string())
}

fn join(values: &BTreeSet<String>) -> String {
    if values.is_empty() {
        "none".to_string()
    } else {
        values.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Plain-text inspection listing for one building
#[derive(Debug, Clone, Copy)]
pub struct Inspection<'a>(pub &'a Building);

impl fmt::Display for Inspection<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let building = self.0;
        let fuels = building.fuel_summary();

        writeln!(f, "Building: {}", building.building_id)?;
        writeln!(f, "Heating fuels: {}", join(&fuels.heating))?;
        writeln!(f, "Cooling fuels: {}", join(&fuels.cooling))?;
        writeln!(f)?;

        for quantity in survey(building) {
            write!(
                f,
                "{} {:?} {}: ",
                quantity.entity_kind, quantity.entity_id, quantity.concept
            )?;
            match &quantity.representation {
                Ok(Some(found)) => writeln!(f, "{found}")?,
                Ok(None) => writeln!(f, "absent")?,
                Err(ambiguity) => writeln!(f, "AMBIGUOUS ({})", ambiguity.fields.join(", "))?,
            }
        }
        Ok(())
    }
}

/// Plain-text change listing for a finished pass
#[derive(Debug, Clone, Copy)]
pub struct ReportSummary<'a>(pub &'a MutationReport);

impl fmt::Display for ReportSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        for change in report.changes().filter(|change| change.is_change()) {
            writeln!(f, "{change}")?;
        }
        writeln!(
            f,
            "{} field(s) changed on {}; {} warning(s), {} ambiguity(ies)",
            report.changed_fields(),
            report.building_id,
            report.warnings(),
            report.ambiguities()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modify_flags() {
        let matches = command()
            .try_get_matches_from([
                "hpxml-calibrate",
                "-v",
                "modify",
                "--document",
                "in.json",
                "--directives",
                "d.yaml",
                "--output",
                "out.json",
                "--strict",
                "--building",
                "B2",
            ])
            .unwrap();

        assert_eq!(log_settings(&matches), (true, LogFormat::Text));
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, "modify");

        let args = ModifyArgs::from_matches(sub).unwrap();
        assert!(args.strict);
        assert_eq!(args.output, PathBuf::from("out.json"));

        let config = args.config().unwrap();
        assert!(config.strict);
        assert_eq!(config.building_id.as_deref(), Some("B2"));
    }

    #[test]
    fn modify_requires_output() {
        let result = command().try_get_matches_from([
            "hpxml-calibrate",
            "modify",
            "--document",
            "in.json",
            "--directives",
            "d.json",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn inspection_flags_ambiguous_entities() {
        let mut furnace = hpxml_model::HeatingSystem::new("h1");
        furnace.heating_efficiency_afue = Some(0.8);
        furnace.heating_efficiency_percent = Some(0.8);
        let mut building = Building::new("b1");
        building.heating_systems.push(furnace);

        let listing = Inspection(&building).to_string();

        assert!(listing.contains("Heating fuels: none\n"));
        assert!(listing.contains(
            "heating_system \"h1\" heating efficiency: AMBIGUOUS \
             (heating_efficiency_afue, heating_efficiency_percent)\n"
        ));
    }

    #[test]
    fn command_definition_is_consistent() {
        command().debug_assert();
    }
}
