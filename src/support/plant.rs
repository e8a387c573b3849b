//! Narrow interfaces to the plant loop that hosts a component.

use std::{collections::BTreeMap, fmt, sync::Arc};

use uom::si::f64::VolumeRate;

use crate::support::thermo::FluidProperties;

/// Receives design flow rates declared by components at load time.
///
/// The plant loop sizes its pumps and branches from these registrations.
pub trait DesignFlowRegistry {
    /// Registers `flow` as the design volume flow entering `inlet_node`.
    fn register_design_flow(&mut self, inlet_node: &str, flow: VolumeRate);
}

/// In-memory [`DesignFlowRegistry`] keyed by node name.
///
/// Registering a node twice keeps the larger flow.
#[derive(Debug, Clone, Default)]
pub struct DesignFlows {
    flows: BTreeMap<String, VolumeRate>,
}

impl DesignFlows {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the flow registered for `node`, if any.
    #[must_use]
    pub fn get(&self, node: &str) -> Option<VolumeRate> {
        self.flows.get(node).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}

impl DesignFlowRegistry for DesignFlows {
    fn register_design_flow(&mut self, inlet_node: &str, flow: VolumeRate) {
        self.flows
            .entry(inlet_node.to_owned())
            .and_modify(|existing| {
                if flow > *existing {
                    *existing = flow;
                }
            })
            .or_insert(flow);
    }
}

/// Where a component sits on a plant loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PlantLocation {
    pub loop_index: usize,
    pub branch: usize,
    pub component: usize,
}

/// The fluid circulating on one plant loop.
///
/// Cloning shares the underlying property source.
#[derive(Clone)]
pub struct Fluid {
    name: String,
    loop_index: usize,
    properties: Arc<dyn FluidProperties + Send + Sync>,
}

impl Fluid {
    #[must_use]
    pub fn new(
        name: &str,
        loop_index: usize,
        properties: Arc<dyn FluidProperties + Send + Sync>,
    ) -> Self {
        Self {
            name: name.trim().to_uppercase(),
            loop_index,
            properties,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn loop_index(&self) -> usize {
        self.loop_index
    }

    #[must_use]
    pub fn properties(&self) -> &(dyn FluidProperties + Send + Sync) {
        self.properties.as_ref()
    }
}

impl fmt::Debug for Fluid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fluid")
            .field("name", &self.name)
            .field("loop_index", &self.loop_index)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::{
        f64::ThermodynamicTemperature, thermodynamic_temperature::degree_celsius,
        volume_rate::cubic_meter_per_second,
    };

    use crate::support::thermo::{fluid::Water, model::ConstantProperties};

    #[test]
    fn keeps_largest_registration() {
        let mut flows = DesignFlows::new();
        flows.register_design_flow("GHE INLET", VolumeRate::new::<cubic_meter_per_second>(0.002));
        flows.register_design_flow("GHE INLET", VolumeRate::new::<cubic_meter_per_second>(0.001));
        flows.register_design_flow("OTHER", VolumeRate::new::<cubic_meter_per_second>(0.004));

        assert_eq!(flows.len(), 2);
        let flow = flows.get("GHE INLET").expect("node should be registered");
        assert_relative_eq!(flow.get::<cubic_meter_per_second>(), 0.002);
        assert!(flows.get("MISSING").is_none());
    }

    #[test]
    fn fluid_shares_its_property_source() {
        let water = Fluid::new("water", 1, Arc::new(ConstantProperties::<Water>::default()));
        let copy = water.clone();

        assert_eq!(copy.name(), "WATER");
        assert_eq!(copy.loop_index(), 1);
        let t = ThermodynamicTemperature::new::<degree_celsius>(20.0);
        let pr = copy.properties().prandtl(t).expect("water Prandtl number should evaluate");
        assert_relative_eq!(pr, 6.998, epsilon = 1e-3);
    }
}
