//! Insulation R-value percentage changes
//!
//! Every R-value field is judged on its own: a field at or below the
//! uninsulated threshold is left alone even when a sibling field on the same
//! entity is scaled.

use hpxml_model::{Building, Entity, Floor, FoundationWall, RimJoist, Roof, Slab, Wall};

use crate::category::Category;
use crate::handler::{ApplyContext, CategoryHandler, Pass};
use crate::locate::FoundationWallInsulation;
use crate::outcome::MutationOutcome;
use crate::policy::FieldRule;

const ASSEMBLY: &str = "insulation_assembly_r_value";

/// Surfaces an insulation category applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsulationTarget {
    /// Roofs
    Roofs,
    /// Floors that are attic floors
    Ceilings,
    /// Above-grade walls and rim joists
    AboveGroundWalls,
    /// Foundation walls, as an assembly or as exterior/interior layers
    BelowGroundWalls,
    /// Under-slab, perimeter, exterior horizontal and gap insulation
    Slabs,
    /// Floors that are not attic floors
    Floors,
}

/// Scales insulation R-values above the uninsulated threshold
#[derive(Debug, Clone, Copy)]
pub struct InsulationHandler {
    target: InsulationTarget,
}

impl InsulationHandler {
    /// Handler for one group of surfaces
    #[must_use]
    pub const fn new(target: InsulationTarget) -> Self {
        Self { target }
    }

    fn floors(pass: &mut Pass<'_, '_>, floors: &mut [Floor], ceilings: bool) {
        for floor in floors.iter_mut().filter(|f| f.is_ceiling() == ceilings) {
            r_value(
                pass,
                Floor::KIND,
                &floor.id,
                ASSEMBLY,
                &mut floor.insulation_assembly_r_value,
            );
        }
    }

    fn foundation_walls(pass: &mut Pass<'_, '_>, walls: &mut [FoundationWall]) {
        const KIND: &str = FoundationWall::KIND;

        for wall in walls {
            match FoundationWallInsulation::locate(wall) {
                Ok(Some(FoundationWallInsulation::Assembly(_))) => {
                    r_value(pass, KIND, &wall.id, ASSEMBLY, &mut wall.insulation_assembly_r_value);
                }
                Ok(Some(FoundationWallInsulation::Layers { .. })) => {
                    r_value(
                        pass,
                        KIND,
                        &wall.id,
                        "insulation_exterior_r_value",
                        &mut wall.insulation_exterior_r_value,
                    );
                    r_value(
                        pass,
                        KIND,
                        &wall.id,
                        "insulation_interior_r_value",
                        &mut wall.insulation_interior_r_value,
                    );
                }
                Ok(None) => {}
                Err(ambiguity) => pass.ambiguous(KIND, &wall.id, ambiguity),
            }
        }
    }

    fn slabs(pass: &mut Pass<'_, '_>, slabs: &mut [Slab]) {
        for slab in slabs {
            let id = slab.id.as_str();
            r_value(
                pass,
                Slab::KIND,
                id,
                "under_slab_insulation_r_value",
                &mut slab.under_slab_insulation_r_value,
            );
            r_value(
                pass,
                Slab::KIND,
                id,
                "perimeter_insulation_r_value",
                &mut slab.perimeter_insulation_r_value,
            );
            r_value(
                pass,
                Slab::KIND,
                id,
                "exterior_horizontal_insulation_r_value",
                &mut slab.exterior_horizontal_insulation_r_value,
            );
            r_value(
                pass,
                Slab::KIND,
                id,
                "gap_insulation_r_value",
                &mut slab.gap_insulation_r_value,
            );
        }
    }
}

fn r_value(
    pass: &mut Pass<'_, '_>,
    kind: &'static str,
    id: &str,
    field: &'static str,
    slot: &mut Option<f64>,
) {
    pass.number(kind, id, field, slot, &FieldRule::R_VALUE);
}

impl CategoryHandler for InsulationHandler {
    fn category(&self) -> Category {
        match self.target {
            InsulationTarget::Roofs => Category::RoofRValuePctChange,
            InsulationTarget::Ceilings => Category::CeilingRValuePctChange,
            InsulationTarget::AboveGroundWalls => Category::AboveGroundWallsRValuePctChange,
            InsulationTarget::BelowGroundWalls => Category::BelowGroundWallsRValuePctChange,
            InsulationTarget::Slabs => Category::SlabRValuePctChange,
            InsulationTarget::Floors => Category::FloorRValuePctChange,
        }
    }

    fn apply(
        &self,
        building: &mut Building,
        directive: f64,
        ctx: &mut ApplyContext<'_>,
    ) -> MutationOutcome {
        let mut pass = Pass::new(self.category(), directive, ctx);

        match self.target {
            InsulationTarget::Roofs => {
                for roof in &mut building.roofs {
                    r_value(
                        &mut pass,
                        Roof::KIND,
                        &roof.id,
                        ASSEMBLY,
                        &mut roof.insulation_assembly_r_value,
                    );
                }
            }
            InsulationTarget::Ceilings => Self::floors(&mut pass, &mut building.floors, true),
            InsulationTarget::Floors => Self::floors(&mut pass, &mut building.floors, false),
            InsulationTarget::AboveGroundWalls => {
                for wall in &mut building.walls {
                    r_value(
                        &mut pass,
                        Wall::KIND,
                        &wall.id,
                        ASSEMBLY,
                        &mut wall.insulation_assembly_r_value,
                    );
                }
                for rim_joist in &mut building.rim_joists {
                    r_value(
                        &mut pass,
                        RimJoist::KIND,
                        &rim_joist.id,
                        ASSEMBLY,
                        &mut rim_joist.insulation_assembly_r_value,
                    );
                }
            }
            InsulationTarget::BelowGroundWalls => {
                Self::foundation_walls(&mut pass, &mut building.foundation_walls);
            }
            InsulationTarget::Slabs => Self::slabs(&mut pass, &mut building.slabs),
        }

        pass.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MutationConfig;
    use crate::handlers::testing::{apply, apply_with};
    use hpxml_model::FloorOrCeiling;

    #[test]
    fn threshold_is_exclusive() {
        let mut building = Building::new("b");
        for (id, r) in [("at", 4.0), ("above", 4.01)] {
            let mut roof = Roof::new(id);
            roof.insulation_assembly_r_value = Some(r);
            building.roofs.push(roof);
        }

        let (outcome, _) =
            apply(&InsulationHandler::new(InsulationTarget::Roofs), &mut building, 1.0);

        assert_eq!(building.roofs[0].insulation_assembly_r_value, Some(4.0));
        assert_eq!(building.roofs[1].insulation_assembly_r_value, Some(8.0));
        assert_eq!(outcome.ineligible, 1);
    }

    #[test]
    fn threshold_comes_from_config() {
        let mut roof = Roof::new("r");
        roof.insulation_assembly_r_value = Some(8.0);
        let mut building = Building::new("b");
        building.roofs.push(roof);

        let config = MutationConfig::new().with_uninsulated_r_value_threshold(10.0);
        apply_with(
            &InsulationHandler::new(InsulationTarget::Roofs),
            &mut building,
            0.5,
            &config,
        );

        assert_eq!(building.roofs[0].insulation_assembly_r_value, Some(8.0));
    }

    #[test]
    fn ceilings_and_floors_split_the_floor_collection() {
        let mut attic = Floor::new("attic");
        attic.exterior_adjacent_to = Some("attic - unvented".into());
        attic.insulation_assembly_r_value = Some(30.0);
        let mut floor = Floor::new("floor");
        floor.floor_or_ceiling = Some(FloorOrCeiling::Floor);
        floor.insulation_assembly_r_value = Some(20.0);
        let mut building = Building::new("b");
        building.floors = vec![attic, floor];

        apply(&InsulationHandler::new(InsulationTarget::Ceilings), &mut building, 0.1);
        assert_eq!(building.floors[0].insulation_assembly_r_value, Some(33.0));
        assert_eq!(building.floors[1].insulation_assembly_r_value, Some(20.0));

        apply(&InsulationHandler::new(InsulationTarget::Floors), &mut building, -0.5);
        assert_eq!(building.floors[0].insulation_assembly_r_value, Some(33.0));
        assert_eq!(building.floors[1].insulation_assembly_r_value, Some(10.0));
    }

    #[test]
    fn above_ground_walls_include_rim_joists() {
        let mut wall = Wall::new("w");
        wall.insulation_assembly_r_value = Some(13.0);
        let mut rim_joist = RimJoist::new("rj");
        rim_joist.insulation_assembly_r_value = Some(11.0);
        let mut building = Building::new("b");
        building.walls.push(wall);
        building.rim_joists.push(rim_joist);

        let (outcome, _) = apply(
            &InsulationHandler::new(InsulationTarget::AboveGroundWalls),
            &mut building,
            0.2,
        );

        assert_eq!(building.walls[0].insulation_assembly_r_value, Some(15.6));
        assert_eq!(building.rim_joists[0].insulation_assembly_r_value, Some(13.2));
        assert_eq!(outcome.changes.len(), 2);
    }

    #[test]
    fn foundation_wall_layers_are_judged_separately() {
        let mut wall = FoundationWall::new("fw");
        wall.insulation_exterior_r_value = Some(8.9);
        wall.insulation_interior_r_value = Some(0.0);
        let mut building = Building::new("b");
        building.foundation_walls.push(wall);

        apply(
            &InsulationHandler::new(InsulationTarget::BelowGroundWalls),
            &mut building,
            0.1,
        );

        let wall = &building.foundation_walls[0];
        assert_eq!(wall.insulation_exterior_r_value, Some(9.8));
        assert_eq!(wall.insulation_interior_r_value, Some(0.0));
        assert_eq!(wall.insulation_assembly_r_value, None);
    }

    #[test]
    fn foundation_wall_assembly_and_layer_is_ambiguous() {
        let mut wall = FoundationWall::new("fw");
        wall.insulation_assembly_r_value = Some(10.0);
        wall.insulation_exterior_r_value = Some(10.0);
        let mut building = Building::new("b");
        building.foundation_walls.push(wall.clone());

        let (outcome, _) = apply(
            &InsulationHandler::new(InsulationTarget::BelowGroundWalls),
            &mut building,
            0.1,
        );

        assert_eq!(building.foundation_walls[0], wall);
        assert_eq!(outcome.ambiguities, 1);
    }

    #[test]
    fn slab_fields_are_independent() {
        let mut slab = Slab::new("s");
        slab.perimeter_insulation_r_value = Some(10.0);
        slab.under_slab_insulation_r_value = Some(0.0);
        slab.gap_insulation_r_value = Some(5.0);
        let mut building = Building::new("b");
        building.slabs.push(slab);

        apply(&InsulationHandler::new(InsulationTarget::Slabs), &mut building, -0.25);

        let slab = &building.slabs[0];
        assert_eq!(slab.perimeter_insulation_r_value, Some(7.5));
        assert_eq!(slab.under_slab_insulation_r_value, Some(0.0));
        assert_eq!(slab.gap_insulation_r_value, Some(3.8));
        assert_eq!(slab.exterior_horizontal_insulation_r_value, None);
    }
}
