use std::ffi::OsStr;
use std::path::Path;

use hpxml_cli::{command, inspect, modify, modify_with, run, InspectArgs, ModifyArgs};
use hpxml_model::{AirInfiltrationMeasurement, BuildingDocument};
use hpxml_mutate::{CollectingReporter, DiagnosticKind, DirectiveError, MutationError, Severity};
use hpxml_test_utils::{document_with, sample_building, sample_document};
use pretty_assertions::assert_eq;

fn modify_args(dir: &Path, directives: &str) -> ModifyArgs {
    let document = dir.join("in.json");
    sample_document().write_to_path(&document).unwrap();
    let directive_file = dir.join("directives.yaml");
    std::fs::write(&directive_file, directives).unwrap();

    ModifyArgs {
        document,
        directives: directive_file,
        output: dir.join("out.json"),
        config: None,
        report: None,
        strict: false,
        building: None,
    }
}

#[test]
fn test_modify_writes_mutated_document() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = modify_args(
        dir.path(),
        "heating_setpoint_offset: -1.5\nwindow_u_factor_pct_change: -0.1\n",
    );
    args.report = Some(dir.path().join("report.json"));

    let report = modify(&args).unwrap();
    assert_eq!(report.changed_fields(), 3);

    let written = BuildingDocument::from_path(&args.output).unwrap();
    let building = &written.buildings[0];
    assert_eq!(building.hvac_controls[0].heating_setpoint_temp, Some(66.5));
    assert_eq!(building.hvac_controls[0].heating_setback_temp, Some(62.5));
    assert_eq!(building.windows[0].u_factor, Some(0.3));
    assert_eq!(building.extra, sample_building().extra);

    let report_json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(dir.path().join("report.json")).unwrap())
            .unwrap();
    assert_eq!(report_json["building_id"], "MyBuilding");
}

#[test]
fn test_malformed_directives_write_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let args = modify_args(
        dir.path(),
        "heating_setpoint_offset: -1.5\nattic_pct_change: 0.1\nlighting_load_pct_change: -3\n",
    );

    let mut reporter = CollectingReporter::new();
    let err = modify_with(&args, &mut reporter).unwrap_err();

    let directive_err = err.downcast_ref::<DirectiveError>().unwrap();
    assert_eq!(directive_err.problems().len(), 2);
    assert!(!args.output.exists());

    let fatal: Vec<_> = reporter.with_severity(Severity::Fatal).collect();
    assert_eq!(fatal.len(), 2);
    assert!(fatal
        .iter()
        .all(|d| matches!(d.kind, DiagnosticKind::MalformedDirective { .. })));
}

#[test]
fn test_strict_abort_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = modify_args(dir.path(), "air_leakage_pct_change: -0.1\n");

    let mut building = sample_building();
    let mut measurement = AirInfiltrationMeasurement::new("AirInfiltrationMeasurement2");
    measurement.leakiness_description = Some("tight".into());
    building.air_infiltration_measurements.push(measurement);
    document_with(building).write_to_path(&args.document).unwrap();
    args.strict = true;

    let err = modify(&args).unwrap_err();

    assert!(err
        .downcast_ref::<MutationError>()
        .is_some_and(MutationError::is_strict_abort));
    assert!(!args.output.exists());
}

#[test]
fn test_config_file_is_applied() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = modify_args(dir.path(), "roof_r_value_pct_change: 1.0\n");
    let config = dir.path().join("config.json");
    std::fs::write(&config, r#"{"uninsulated_r_value_threshold": 2.0}"#).unwrap();
    args.config = Some(config);

    modify(&args).unwrap();

    let written = BuildingDocument::from_path(&args.output).unwrap();
    assert_eq!(written.buildings[0].roofs[0].insulation_assembly_r_value, Some(4.6));
}

#[test]
fn test_unknown_building_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = modify_args(dir.path(), "heating_setpoint_offset: 1\n");
    args.building = Some("Elsewhere".into());

    let err = modify(&args).unwrap_err();

    assert!(format!("{err:#}").contains("Elsewhere"));
    assert!(!args.output.exists());
}

#[test]
fn test_inspect_lists_fuels_and_representations() {
    let dir = tempfile::tempdir().unwrap();
    let document = dir.path().join("in.yaml");
    sample_document().write_to_path(&document).unwrap();

    let listing = inspect(&InspectArgs {
        document,
        building: None,
    })
    .unwrap();

    assert!(listing.starts_with("Building: MyBuilding\n"));
    assert!(listing.contains("Heating fuels: electricity, natural gas\n"));
    assert!(listing.contains("Cooling fuels: electricity\n"));
    assert!(listing.contains("heating_efficiency_afue = 0.92"));
}

#[test]
fn test_run_dispatches_modify() {
    let dir = tempfile::tempdir().unwrap();
    let args = modify_args(dir.path(), "arguments:\n  cooling_setpoint_offset: 2.5\n");

    let matches = command()
        .try_get_matches_from([
            OsStr::new("hpxml-calibrate"),
            OsStr::new("modify"),
            OsStr::new("--document"),
            args.document.as_os_str(),
            OsStr::new("--directives"),
            args.directives.as_os_str(),
            OsStr::new("--output"),
            args.output.as_os_str(),
        ])
        .unwrap();

    let output = run(&matches).unwrap();

    assert!(output.contains("cooling_setpoint_temp: 78 -> 80.5"));
    assert!(output
        .ends_with("2 field(s) changed on MyBuilding; 0 warning(s), 0 ambiguity(ies)\n"));
}
