use hpxml_model::{Building, BuildingDocument, HvacControl, Roof, Window};
use hpxml_mutate::transform::round_to;
use hpxml_mutate::{
    Category, CollectingReporter, DirectiveSet, HourlySchedule, MutationEngine, Precision,
};
use hpxml_test_utils::sample_document;
use proptest::prelude::*;

fn apply_one(document: &mut BuildingDocument, category: Category, value: f64) {
    let directives = DirectiveSet::builder().set(category, value).build().unwrap();
    MutationEngine::default()
        .apply(document, &directives, &mut CollectingReporter::new())
        .unwrap();
}

fn window_document(u_factor: Option<f64>, shgc: Option<f64>) -> BuildingDocument {
    let mut window = Window::new("Window1");
    window.u_factor = u_factor;
    window.shgc = shgc;
    let mut building = Building::new("b");
    building.windows.push(window);
    BuildingDocument::with_building(building)
}

fn is_rounded(value: f64, places: i32) -> bool {
    let scaled = value * 10f64.powi(places);
    (scaled - scaled.round()).abs() < 1e-6
}

#[test]
fn test_empty_directive_set_is_identity() {
    let mut document = sample_document();
    let before = document.clone();

    let report = MutationEngine::default()
        .apply(&mut document, &DirectiveSet::empty(), &mut CollectingReporter::new())
        .unwrap();

    assert_eq!(document, before);
    assert_eq!(report.changed_fields(), 0);
}

#[test]
fn test_minus_one_zeroes_a_percent_quantity() {
    let mut document = window_document(Some(0.33), None);
    apply_one(&mut document, Category::WindowUFactorPctChange, -1.0);
    assert_eq!(document.buildings[0].windows[0].u_factor, Some(0.0));
}

proptest! {
    #[test]
    fn prop_setpoint_offset_is_additive(
        setpoint in 40.0f64..90.0,
        delta in -10.0f64..10.0,
    ) {
        let mut control = HvacControl::new("c");
        control.heating_setpoint_temp = Some(setpoint);
        let mut building = Building::new("b");
        building.hvac_controls.push(control);
        let mut document = BuildingDocument::with_building(building);

        apply_one(&mut document, Category::HeatingSetpointOffset, delta);

        let after = document.buildings[0].hvac_controls[0].heating_setpoint_temp.unwrap();
        prop_assert!((after - (setpoint + delta)).abs() <= 0.005 + 1e-9);
        prop_assert!(is_rounded(after, 2));
    }

    #[test]
    fn prop_percent_change_is_multiplicative(
        u_factor in 0.1f64..1.5,
        pct in -1.0f64..2.0,
    ) {
        let mut document = window_document(Some(u_factor), None);

        apply_one(&mut document, Category::WindowUFactorPctChange, pct);

        let after = document.buildings[0].windows[0].u_factor.unwrap();
        prop_assert!((after - u_factor * (1.0 + pct)).abs() <= 0.005 + 1e-9);
        prop_assert!(is_rounded(after, 2));
    }

    #[test]
    fn prop_shgc_never_exceeds_ceiling(
        shgc in 0.05f64..0.99,
        pct in -1.0f64..5.0,
    ) {
        let mut document = window_document(None, Some(shgc));

        apply_one(&mut document, Category::WindowShgcPctChange, pct);

        let after = document.buildings[0].windows[0].shgc.unwrap();
        prop_assert!(after <= 0.99);
        prop_assert!(after >= 0.0);
    }

    #[test]
    fn prop_uninsulated_r_values_are_untouched(
        r_value in 0.0f64..=4.0,
        pct in -1.0f64..3.0,
    ) {
        let mut roof = Roof::new("Roof1");
        roof.insulation_assembly_r_value = Some(r_value);
        let mut building = Building::new("b");
        building.roofs.push(roof);
        let mut document = BuildingDocument::with_building(building);
        let before = document.clone();

        apply_one(&mut document, Category::RoofRValuePctChange, pct);

        prop_assert_eq!(document, before);
    }

    #[test]
    fn prop_absent_usage_multiplier_starts_from_unity(pct in -1.0f64..3.0) {
        let mut document = sample_document();

        apply_one(&mut document, Category::PlugLoadUsagePctChange, pct);

        let after = document.buildings[0].plug_loads[0].usage_multiplier.unwrap();
        prop_assert_eq!(after, round_to(1.0 + pct, Precision::TWO));
    }

    #[test]
    fn prop_absent_fields_stay_absent(pct in -1.0f64..3.0) {
        let mut document = window_document(None, Some(0.4));

        apply_one(&mut document, Category::WindowUFactorPctChange, pct);

        prop_assert_eq!(document.buildings[0].windows[0].u_factor, None);
    }

    #[test]
    fn prop_round_to_respects_precision(
        value in -1.0e4f64..1.0e4,
        places in 0u8..4,
    ) {
        let rounded = round_to(value, Precision::places(places));
        prop_assert!(is_rounded(rounded, i32::from(places)));
        prop_assert!((rounded - value).abs() <= 0.5 / 10f64.powi(i32::from(places)) + 1e-9);
    }

    #[test]
    fn prop_schedule_offset_preserves_shape(
        entries in proptest::collection::vec(50.0f64..85.0, 1..24),
        delta in -5.0f64..5.0,
    ) {
        let text = entries.iter().map(f64::to_string).collect::<Vec<_>>().join(",");
        let schedule: HourlySchedule = text.parse().unwrap();

        let shifted = schedule.offset(delta, Precision::TWO);

        prop_assert_eq!(shifted.len(), entries.len());
        for (after, before) in shifted.values().iter().zip(&entries) {
            prop_assert!((after - (before + delta)).abs() <= 0.005 + 1e-9);
        }
        let reparsed: HourlySchedule = shifted.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, shifted);
    }

    #[test]
    fn prop_percent_directives_below_minus_one_are_rejected(value in -100.0f64..-1.0001) {
        let result = DirectiveSet::builder()
            .set(Category::LightingLoadPctChange, value)
            .build();
        prop_assert!(result.is_err());
    }

    #[test]
    fn prop_offset_directives_accept_any_finite_value(value in -100.0f64..100.0) {
        let result = DirectiveSet::builder()
            .set(Category::CoolingSetpointOffset, value)
            .build();
        prop_assert!(result.is_ok());
    }
}
