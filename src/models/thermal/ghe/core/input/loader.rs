use std::collections::{BTreeMap, BTreeSet};

use tracing::info;
use uom::si::f64::Length;

use crate::{
    models::thermal::ghe::core::{
        Borehole, BoreholeField, BoreholeProperties, LoadedSystem, ResponseFactors, Soil,
        pipe::positive,
    },
    support::plant::DesignFlowRegistry,
};

use super::{
    ArrayInput, InputError, InputErrors, ObjectKind, PropertiesInput, ResponseFactorsInput,
    SingleBoreholeInput, SystemInput,
};

/// Every input object of one simulation, prior to validation.
///
/// Objects refer to each other by name. Names are trimmed and compared
/// case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct InputSet {
    pub properties: Vec<PropertiesInput>,
    pub response_factors: Vec<ResponseFactorsInput>,
    pub arrays: Vec<ArrayInput>,
    pub boreholes: Vec<SingleBoreholeInput>,
    pub systems: Vec<SystemInput>,
}

/// A validated array, expanded per system once the soil is known.
struct ArrayTemplate {
    properties: BoreholeProperties,
    columns: usize,
    rows: usize,
    spacing: Length,
}

/// A validated single borehole awaiting a system.
struct Placement {
    properties: BoreholeProperties,
    x: Length,
    y: Length,
}

impl InputSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates every object and resolves the systems.
    ///
    /// Each system registers its design flow against its inlet node.
    /// Response factor sets are stamped with `max_simulation_years`.
    ///
    /// A single borehole is consumed by the first system that lists it.
    /// Later references to it are reported as not found.
    ///
    /// # Errors
    ///
    /// Returns every [`InputError`] found, after checking all objects.
    pub fn load(
        self,
        registry: &mut impl DesignFlowRegistry,
        max_simulation_years: f64,
    ) -> Result<Vec<LoadedSystem>, InputErrors> {
        let mut errors = Vec::new();

        let properties = load_properties(self.properties, &mut errors);
        let response_factors = load_response_factors(
            self.response_factors,
            &properties,
            max_simulation_years,
            &mut errors,
        );
        let arrays = load_arrays(self.arrays, &properties, &mut errors);
        let mut singles = load_boreholes(self.boreholes, &properties, &mut errors);

        let mut systems = Vec::new();
        let mut seen = BTreeSet::new();
        for input in self.systems {
            let Some(name) = claim_name(ObjectKind::System, &input.name, &mut seen, &mut errors)
            else {
                continue;
            };
            let loaded = resolve_system(
                &name,
                input,
                &response_factors,
                &arrays,
                &mut singles,
                &mut errors,
            );
            if let Some(system) = loaded {
                registry.register_design_flow(&system.inlet_node, system.design_flow);
                systems.push(system);
            }
        }

        InputErrors::check(errors)?;
        info!(systems = systems.len(), "ground heat exchanger input loaded");
        Ok(systems)
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_uppercase()
}

/// Normalizes an optional reference, treating blank as absent.
fn reference(name: Option<&String>) -> Option<String> {
    name.map(String::as_str).map(normalize).filter(|n| !n.is_empty())
}

/// Normalizes `raw` and records it, reporting blank and duplicate names.
fn claim_name(
    kind: ObjectKind,
    raw: &str,
    seen: &mut BTreeSet<String>,
    errors: &mut Vec<InputError>,
) -> Option<String> {
    let name = normalize(raw);
    if name.is_empty() {
        errors.push(InputError::BlankName { kind });
        return None;
    }
    if seen.insert(name.clone()) {
        Some(name)
    } else {
        errors.push(InputError::DuplicateName { kind, name });
        None
    }
}

/// Finds a referenced object or records that it is missing.
fn lookup<'a, T>(
    map: &'a BTreeMap<String, T>,
    kind: ObjectKind,
    raw: &str,
    referenced_by: &str,
    errors: &mut Vec<InputError>,
) -> Option<&'a T> {
    let name = normalize(raw);
    let found = map.get(&name);
    if found.is_none() {
        errors.push(InputError::NotFound {
            kind,
            name,
            referenced_by: referenced_by.to_owned(),
        });
    }
    found
}

fn load_properties(
    inputs: Vec<PropertiesInput>,
    errors: &mut Vec<InputError>,
) -> BTreeMap<String, BoreholeProperties> {
    let kind = ObjectKind::Properties;
    let mut seen = BTreeSet::new();
    let mut loaded = BTreeMap::new();

    for input in inputs {
        let Some(name) = claim_name(kind, &input.name, &mut seen, errors) else {
            continue;
        };
        match BoreholeProperties::new(&name, &input.design) {
            Ok(props) => {
                loaded.insert(name, props);
            }
            Err(source) => errors.push(InputError::InvalidParameter { kind, name, source }),
        }
    }
    loaded
}

fn load_response_factors(
    inputs: Vec<ResponseFactorsInput>,
    properties: &BTreeMap<String, BoreholeProperties>,
    max_simulation_years: f64,
    errors: &mut Vec<InputError>,
) -> BTreeMap<String, ResponseFactors> {
    let mut seen = BTreeSet::new();
    let mut loaded = BTreeMap::new();

    for input in inputs {
        let Some(name) = claim_name(ObjectKind::ResponseFactors, &input.name, &mut seen, errors)
        else {
            continue;
        };
        let props = lookup(properties, ObjectKind::Properties, &input.properties, &name, errors);

        if input.pairs.len() % 2 != 0 {
            errors.push(InputError::UnevenPairs {
                name,
                count: input.pairs.len(),
            });
            continue;
        }
        let Some(props) = props else {
            continue;
        };

        let (log_times, values): (Vec<f64>, Vec<f64>) =
            input.pairs.chunks_exact(2).map(|p| (p[0], p[1])).unzip();
        match ResponseFactors::new(&name, props.clone(), max_simulation_years, log_times, values) {
            Ok(factors) => {
                loaded.insert(name, factors);
            }
            Err(source) => errors.push(InputError::InvalidTable { name, source }),
        }
    }
    loaded
}

fn load_arrays(
    inputs: Vec<ArrayInput>,
    properties: &BTreeMap<String, BoreholeProperties>,
    errors: &mut Vec<InputError>,
) -> BTreeMap<String, ArrayTemplate> {
    let kind = ObjectKind::Array;
    let mut seen = BTreeSet::new();
    let mut loaded = BTreeMap::new();

    for input in inputs {
        let Some(name) = claim_name(kind, &input.name, &mut seen, errors) else {
            continue;
        };
        let props = lookup(properties, ObjectKind::Properties, &input.properties, &name, errors);

        if let Err(source) = positive("borehole spacing", &input.spacing) {
            errors.push(InputError::InvalidParameter { kind, name, source });
            continue;
        }
        if let Some(props) = props {
            loaded.insert(
                name,
                ArrayTemplate {
                    properties: props.clone(),
                    columns: input.columns,
                    rows: input.rows,
                    spacing: input.spacing,
                },
            );
        }
    }
    loaded
}

fn load_boreholes(
    inputs: Vec<SingleBoreholeInput>,
    properties: &BTreeMap<String, BoreholeProperties>,
    errors: &mut Vec<InputError>,
) -> BTreeMap<String, Placement> {
    let mut seen = BTreeSet::new();
    let mut loaded = BTreeMap::new();

    for input in inputs {
        let Some(name) = claim_name(ObjectKind::Borehole, &input.name, &mut seen, errors) else {
            continue;
        };
        if let Some(props) =
            lookup(properties, ObjectKind::Properties, &input.properties, &name, errors)
        {
            loaded.insert(
                name,
                Placement {
                    properties: props.clone(),
                    x: input.x,
                    y: input.y,
                },
            );
        }
    }
    loaded
}

fn resolve_system(
    name: &str,
    input: SystemInput,
    response_factors: &BTreeMap<String, ResponseFactors>,
    arrays: &BTreeMap<String, ArrayTemplate>,
    singles: &mut BTreeMap<String, Placement>,
    errors: &mut Vec<InputError>,
) -> Option<LoadedSystem> {
    let kind = ObjectKind::System;
    let errors_before = errors.len();

    let soil = Soil::new(input.soil_conductivity, input.soil_heat_capacity)
        .map_err(|source| {
            errors.push(InputError::InvalidParameter {
                kind,
                name: name.to_owned(),
                source,
            });
        })
        .ok();

    let mut factors = |reference_name: Option<String>| {
        reference_name.and_then(|rf| {
            lookup(response_factors, ObjectKind::ResponseFactors, &rf, name, errors).cloned()
        })
    };
    let eft_name = reference(input.eft_response_factors.as_ref());
    let bwt_name = reference(input.bwt_response_factors.as_ref());
    let needs_boreholes = eft_name.is_none() || bwt_name.is_none();
    let eft = factors(eft_name);
    let bwt = factors(bwt_name);

    let mut boreholes = Vec::new();
    if needs_boreholes {
        if let Some(array_name) = reference(input.array.as_ref()) {
            let array = lookup(arrays, ObjectKind::Array, &array_name, name, errors);
            if let (Some(array), Some(soil)) = (array, soil) {
                match BoreholeField::rectangular(
                    &array_name,
                    &array.properties,
                    array.columns,
                    array.rows,
                    array.spacing,
                    soil,
                ) {
                    Ok(field) => boreholes = field.into_boreholes(),
                    Err(source) => errors.push(InputError::InvalidParameter {
                        kind: ObjectKind::Array,
                        name: array_name.clone(),
                        source,
                    }),
                }
                check_count(name, input.borehole_count, boreholes.len(), errors, |found| {
                    InputError::ArrayCountMismatch {
                        system: name.to_owned(),
                        array: array_name.clone(),
                        declared: input.borehole_count,
                        found,
                    }
                });
            }
        } else {
            for bh_name in input.boreholes.iter().filter_map(|n| reference(Some(n))) {
                let Some(placement) = singles.remove(&bh_name) else {
                    errors.push(InputError::NotFound {
                        kind: ObjectKind::Borehole,
                        name: bh_name,
                        referenced_by: name.to_owned(),
                    });
                    continue;
                };
                if let Some(soil) = soil {
                    boreholes.push(Borehole::new(
                        &bh_name,
                        placement.properties,
                        placement.x,
                        placement.y,
                        soil,
                    ));
                }
            }
            if soil.is_some() && errors.len() == errors_before {
                check_count(name, input.borehole_count, boreholes.len(), errors, |found| {
                    InputError::BoreholeCountMismatch {
                        system: name.to_owned(),
                        declared: input.borehole_count,
                        found,
                    }
                });
            }
        }
    }

    let soil = soil?;
    if errors.len() > errors_before {
        return None;
    }

    Some(LoadedSystem {
        name: name.to_owned(),
        inlet_node: normalize(&input.inlet_node),
        outlet_node: normalize(&input.outlet_node),
        design_flow: input.design_flow,
        borehole_count: input.borehole_count,
        soil,
        ground: input.ground_temperature,
        eft,
        bwt,
        boreholes,
        location: None,
    })
}

/// Reports an empty field or a count mismatch.
fn check_count(
    system: &str,
    declared: usize,
    found: usize,
    errors: &mut Vec<InputError>,
    mismatch: impl FnOnce(usize) -> InputError,
) {
    if found == 0 {
        errors.push(InputError::NoBoreholeSource {
            system: system.to_owned(),
        });
    } else if found != declared {
        errors.push(mismatch(found));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::Arc;

    use uom::si::{
        f64::{ThermodynamicTemperature, VolumeRate},
        thermodynamic_temperature::degree_celsius,
        volume_rate::cubic_meter_per_second,
    };

    use crate::{
        models::thermal::ghe::core::test_support::{conductivity, meters, scenario_design},
        support::{ground::ConstantGroundTemperature, plant::DesignFlows, units::from_si},
    };

    fn properties(name: &str) -> PropertiesInput {
        PropertiesInput {
            name: name.to_owned(),
            design: scenario_design(),
        }
    }

    fn single(name: &str, x: f64) -> SingleBoreholeInput {
        SingleBoreholeInput {
            name: name.to_owned(),
            properties: "props".to_owned(),
            x: meters(x),
            y: meters(0.0),
        }
    }

    fn response_factors(name: &str) -> ResponseFactorsInput {
        ResponseFactorsInput {
            name: name.to_owned(),
            properties: "PROPS".to_owned(),
            pairs: vec![-15.0, -0.3, -10.0, 1.5, -5.0, 4.6, 0.0, 8.7],
        }
    }

    fn system(name: &str) -> SystemInput {
        SystemInput {
            name: name.to_owned(),
            inlet_node: "ghe inlet".to_owned(),
            outlet_node: "ghe outlet".to_owned(),
            design_flow: VolumeRate::new::<cubic_meter_per_second>(0.004),
            borehole_count: 4,
            soil_conductivity: conductivity(2.423),
            soil_heat_capacity: from_si(2.343e6),
            ground_temperature: Arc::new(ConstantGroundTemperature::new(
                ThermodynamicTemperature::new::<degree_celsius>(13.0),
            )),
            eft_response_factors: None,
            bwt_response_factors: None,
            array: Some("field".to_owned()),
            boreholes: Vec::new(),
        }
    }

    fn array_input() -> InputSet {
        InputSet {
            properties: vec![properties("props")],
            arrays: vec![ArrayInput {
                name: "Field".to_owned(),
                properties: "Props".to_owned(),
                columns: 2,
                rows: 2,
                spacing: meters(5.0),
            }],
            systems: vec![system("ghe 1")],
            ..InputSet::default()
        }
    }

    fn load(input: InputSet) -> Result<Vec<LoadedSystem>, InputErrors> {
        input.load(&mut DesignFlows::new(), 1.0)
    }

    fn single_error(input: InputSet) -> InputError {
        let errors = load(input).expect_err("input should be rejected");
        assert_eq!(errors.len(), 1, "unexpected errors: {errors}");
        errors.into_iter().next().unwrap()
    }

    #[test]
    fn array_system_loads_and_registers_flow() {
        let mut flows = DesignFlows::new();
        let systems = array_input().load(&mut flows, 1.0).expect("input should load");

        assert_eq!(systems.len(), 1);
        let ghe = &systems[0];
        assert_eq!(ghe.name(), "GHE 1");
        assert_eq!(ghe.boreholes().len(), 4);
        assert!(ghe.eft_response_factors().is_none());

        let flow = flows.get("GHE INLET").expect("design flow should be registered");
        assert_eq!(flow, VolumeRate::new::<cubic_meter_per_second>(0.004));
    }

    #[test]
    fn response_factor_only_system_needs_no_boreholes() {
        let mut input = InputSet {
            properties: vec![properties("props")],
            response_factors: vec![response_factors("eft"), response_factors("bwt")],
            systems: vec![system("ghe")],
            ..InputSet::default()
        };
        input.systems[0].array = None;
        input.systems[0].eft_response_factors = Some("EFT".to_owned());
        input.systems[0].bwt_response_factors = Some("bwt".to_owned());

        let systems = load(input).expect("input should load");
        let ghe = &systems[0];
        assert!(ghe.boreholes().is_empty());
        let bwt = ghe.bwt_response_factors().expect("BWT factors should resolve");
        assert_eq!(bwt.name(), "BWT");
        assert_eq!(bwt.g_function().log_times().len(), 4);
    }

    #[test]
    fn single_boreholes_are_consumed_once() {
        let mut first = system("first");
        first.array = None;
        first.borehole_count = 2;
        first.boreholes = vec!["bh a".to_owned(), "bh b".to_owned()];
        let mut second = first.clone();
        second.name = "second".to_owned();
        second.boreholes = vec!["bh b".to_owned(), "bh c".to_owned()];

        let input = InputSet {
            properties: vec![properties("props")],
            boreholes: vec![single("bh a", 0.0), single("bh b", 6.0), single("bh c", 12.0)],
            systems: vec![first, second],
            ..InputSet::default()
        };

        assert_eq!(
            single_error(input),
            InputError::NotFound {
                kind: ObjectKind::Borehole,
                name: "BH B".to_owned(),
                referenced_by: "SECOND".to_owned(),
            }
        );
    }

    #[test]
    fn duplicate_names_are_fatal() {
        let mut input = array_input();
        input.properties.push(properties(" PROPS "));

        assert_eq!(
            single_error(input),
            InputError::DuplicateName {
                kind: ObjectKind::Properties,
                name: "PROPS".to_owned(),
            }
        );
    }

    #[test]
    fn blank_names_are_fatal() {
        let mut input = array_input();
        input.systems.push(system("  "));

        assert_eq!(
            single_error(input),
            InputError::BlankName {
                kind: ObjectKind::System
            }
        );
    }

    #[test]
    fn missing_references_are_fatal() {
        let mut input = array_input();
        input.systems[0].array = Some("nowhere".to_owned());

        assert_eq!(
            single_error(input),
            InputError::NotFound {
                kind: ObjectKind::Array,
                name: "NOWHERE".to_owned(),
                referenced_by: "GHE 1".to_owned(),
            }
        );
    }

    #[test]
    fn array_count_must_match() {
        let mut input = array_input();
        input.systems[0].borehole_count = 9;

        assert!(matches!(
            single_error(input),
            InputError::ArrayCountMismatch { declared: 9, found: 4, .. }
        ));
    }

    #[test]
    fn single_borehole_count_must_match() {
        let mut input = array_input();
        input.boreholes = vec![single("bh a", 0.0)];
        input.systems[0].array = None;
        input.systems[0].boreholes = vec!["bh a".to_owned()];

        assert!(matches!(
            single_error(input),
            InputError::BoreholeCountMismatch { declared: 4, found: 1, .. }
        ));
    }

    #[test]
    fn system_without_any_source_is_fatal() {
        let mut input = array_input();
        input.systems[0].array = None;
        input.systems[0].bwt_response_factors = Some(String::new());

        assert_eq!(
            single_error(input),
            InputError::NoBoreholeSource {
                system: "GHE 1".to_owned()
            }
        );
    }

    #[test]
    fn uneven_pairs_are_fatal() {
        let mut rf = response_factors("bwt");
        rf.pairs.pop();
        let input = InputSet {
            properties: vec![properties("props")],
            response_factors: vec![rf],
            ..InputSet::default()
        };

        assert_eq!(
            single_error(input),
            InputError::UnevenPairs {
                name: "BWT".to_owned(),
                count: 7
            }
        );
    }

    #[test]
    fn errors_are_collected_across_objects() {
        let mut input = array_input();
        input.properties.push(properties("props"));
        input.systems.push(system(""));
        input.systems[0].array = Some("missing".to_owned());

        let errors = load(input).expect_err("input should be rejected");
        assert_eq!(errors.len(), 3);
    }
}
