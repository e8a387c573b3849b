use uom::si::{f64::Length, length::meter};

use super::{Borehole, BoreholeProperties, GeometryError, Soil, pipe::positive};

/// A named collection of boreholes in one soil.
#[derive(Debug, Clone, PartialEq)]
pub struct BoreholeField {
    name: String,
    boreholes: Vec<Borehole>,
}

impl BoreholeField {
    /// Lays out `columns × rows` copies of a template on a square grid.
    ///
    /// Borehole `(i, j)` sits at `(i·spacing, j·spacing)`. Boreholes are
    /// ordered with `i` outer and `j` inner, which fixes the pair order of
    /// the line source sum.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError`] if the spacing is not strictly positive.
    pub fn rectangular(
        name: &str,
        properties: &BoreholeProperties,
        columns: usize,
        rows: usize,
        spacing: Length,
        soil: Soil,
    ) -> Result<Self, GeometryError> {
        positive("borehole spacing", &spacing)?;

        let name = name.trim().to_uppercase();
        let step = spacing.get::<meter>();
        let boreholes = (0..columns)
            .flat_map(|i| (0..rows).map(move |j| (i, j)))
            .map(|(i, j)| {
                Borehole::new(
                    &format!("{name} BH {}-{}", i + 1, j + 1),
                    properties.clone(),
                    Length::new::<meter>(i as f64 * step),
                    Length::new::<meter>(j as f64 * step),
                    soil,
                )
            })
            .collect();

        Ok(Self { name, boreholes })
    }

    /// Wraps an explicit list of boreholes.
    #[must_use]
    pub fn from_boreholes(name: &str, boreholes: Vec<Borehole>) -> Self {
        Self {
            name: name.trim().to_uppercase(),
            boreholes,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn boreholes(&self) -> &[Borehole] {
        &self.boreholes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.boreholes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boreholes.is_empty()
    }

    #[must_use]
    pub fn into_boreholes(self) -> Vec<Borehole> {
        self.boreholes
    }
}

/// Builds the representative borehole of a field.
///
/// Every template parameter is summed over `boreholes` and divided by
/// `count`, the declared borehole count. The result sits at the origin in
/// `soil`. Returns `None` when there is nothing to average.
#[must_use]
pub fn average_borehole(
    name: &str,
    boreholes: &[Borehole],
    count: usize,
    soil: Soil,
) -> Option<Borehole> {
    if boreholes.is_empty() || count == 0 {
        return None;
    }

    let properties = BoreholeProperties::mean(name, boreholes.iter().map(Borehole::properties), count);
    let origin = Length::new::<meter>(0.0);
    Some(Borehole::new(name, properties, origin, origin, soil))
}
