//! Per-model primitive table.

use log::{debug, info};

use crate::discretize::Discretizer;
use crate::error::ConfigError;
use crate::model::VehicleModel;

use super::{MotionPrimitive, PrimitiveId};

/// The complete primitive set of one vehicle model at one resolution,
/// indexed by start heading.
///
/// Construction is idempotent: the same model and discretizer always
/// produce the same table, with stable primitive ids. Once built or loaded
/// the table is immutable and may be shared read-only across concurrent
/// planning requests.
#[derive(Clone, Debug)]
pub struct PrimitiveTable {
    model: String,
    heading_count: u16,
    resolution: f32,
    sets: Vec<Vec<MotionPrimitive>>,
}

impl PrimitiveTable {
    /// Generate the table for a model (offline precomputation).
    ///
    /// Each heading is generated independently; primitives arrive already
    /// filtered by the model's kinematic feasibility test. A heading with
    /// no feasible primitives makes the whole model unusable.
    pub fn build(model: &dyn VehicleModel, disc: &Discretizer) -> Result<Self, ConfigError> {
        let mut sets = Vec::with_capacity(disc.heading_count() as usize);
        let mut next_id: PrimitiveId = 0;

        for heading in 0..disc.heading_count() {
            let mut prims = model.generate_primitives(disc, heading);
            if prims.is_empty() {
                return Err(ConfigError::DegenerateTable {
                    model: model.name().to_string(),
                    heading,
                });
            }
            for prim in &mut prims {
                prim.id = next_id;
                next_id += 1;
            }
            debug!(
                "[PrimitiveTable] model={} heading={} primitives={}",
                model.name(),
                heading,
                prims.len()
            );
            sets.push(prims);
        }

        info!(
            "[PrimitiveTable] built model={} headings={} total={}",
            model.name(),
            disc.heading_count(),
            next_id
        );

        Ok(Self {
            model: model.name().to_string(),
            heading_count: disc.heading_count(),
            resolution: disc.resolution(),
            sets,
        })
    }

    /// Reassemble a table from loaded records (used by the store).
    ///
    /// Records are grouped by start heading in arrival order. Any record
    /// referencing an out-of-range heading, a duplicated id, or a heading
    /// left without primitives is a fatal load error.
    pub(crate) fn from_parts(
        model: String,
        heading_count: u16,
        resolution: f32,
        records: Vec<MotionPrimitive>,
    ) -> Result<Self, ConfigError> {
        let mut sets: Vec<Vec<MotionPrimitive>> = vec![Vec::new(); heading_count as usize];
        let mut seen_ids = std::collections::HashSet::with_capacity(records.len());

        for prim in records {
            if prim.start_heading >= heading_count {
                return Err(ConfigError::CorruptRecord(format!(
                    "primitive {} starts at heading {} of {}",
                    prim.id, prim.start_heading, heading_count
                )));
            }
            if !seen_ids.insert(prim.id) {
                return Err(ConfigError::CorruptRecord(format!(
                    "duplicate primitive id {}",
                    prim.id
                )));
            }
            sets[prim.start_heading as usize].push(prim);
        }

        if let Some(heading) = sets.iter().position(|s| s.is_empty()) {
            return Err(ConfigError::DegenerateTable {
                model,
                heading: heading as u16,
            });
        }

        Ok(Self {
            model,
            heading_count,
            resolution,
            sets,
        })
    }

    /// Model name this table belongs to.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Heading discretization of this table.
    pub fn heading_count(&self) -> u16 {
        self.heading_count
    }

    /// Lattice resolution of this table (meters per cell).
    pub fn resolution(&self) -> f32 {
        self.resolution
    }

    /// Primitive set for a start heading.
    #[inline]
    pub fn primitives_at(&self, heading: u16) -> &[MotionPrimitive] {
        &self.sets[heading as usize]
    }

    /// Total number of primitives across all headings.
    pub fn len(&self) -> usize {
        self.sets.iter().map(|s| s.len()).sum()
    }

    /// True if the table holds no primitives.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterate over all primitives in heading order.
    pub fn iter(&self) -> impl Iterator<Item = &MotionPrimitive> {
        self.sets.iter().flat_map(|s| s.iter())
    }

    /// Look up a primitive by id.
    pub fn get(&self, id: PrimitiveId) -> Option<&MotionPrimitive> {
        self.iter().find(|p| p.id == id)
    }

    /// Check this table against the discretization a request will use.
    ///
    /// A mismatch means the table was generated for a different lattice
    /// and must not be used (startup-fatal, per the failure policy).
    pub fn validate_for(&self, model: &str, disc: &Discretizer) -> Result<(), ConfigError> {
        if self.model != model {
            return Err(ConfigError::ModelMismatch {
                expected: model.to_string(),
                found: self.model.clone(),
            });
        }
        if self.heading_count != disc.heading_count() {
            return Err(ConfigError::HeadingCountMismatch {
                expected: disc.heading_count(),
                found: self.heading_count,
            });
        }
        if (self.resolution - disc.resolution()).abs() > 1e-6 {
            return Err(ConfigError::ResolutionMismatch {
                expected: disc.resolution(),
                found: self.resolution,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BodyRect, CarModel};

    fn car() -> CarModel {
        CarModel::new(1.0, 0.6, 2.0, BodyRect::new(0.8, 0.5, 0.2))
    }

    #[test]
    fn test_build_assigns_stable_ids() {
        let disc = Discretizer::new(1.0, 8);
        let table = PrimitiveTable::build(&car(), &disc).unwrap();

        let ids: Vec<_> = table.iter().map(|p| p.id).collect();
        let expected: Vec<_> = (0..table.len() as u32).collect();
        assert_eq!(ids, expected);

        // Idempotent: rebuilding yields identical content
        let again = PrimitiveTable::build(&car(), &disc).unwrap();
        assert_eq!(table.len(), again.len());
        for (a, b) in table.iter().zip(again.iter()) {
            assert_eq!(a, b);
        }
    }

    #[test]
    fn test_lookup_by_id() {
        let disc = Discretizer::new(1.0, 8);
        let table = PrimitiveTable::build(&car(), &disc).unwrap();
        let first = table.primitives_at(0)[0].clone();
        assert_eq!(table.get(first.id), Some(&first));
        assert!(table.get(99_999).is_none());
    }

    #[test]
    fn test_validate_for_mismatches() {
        let disc = Discretizer::new(1.0, 8);
        let table = PrimitiveTable::build(&car(), &disc).unwrap();

        assert!(table.validate_for("car", &disc).is_ok());
        assert!(matches!(
            table.validate_for("unicycle", &disc),
            Err(ConfigError::ModelMismatch { .. })
        ));
        assert!(matches!(
            table.validate_for("car", &Discretizer::new(1.0, 16)),
            Err(ConfigError::HeadingCountMismatch { .. })
        ));
        assert!(matches!(
            table.validate_for("car", &Discretizer::new(0.5, 8)),
            Err(ConfigError::ResolutionMismatch { .. })
        ));
    }

    #[test]
    fn test_from_parts_rejects_bad_heading() {
        let disc = Discretizer::new(1.0, 8);
        let table = PrimitiveTable::build(&car(), &disc).unwrap();
        let mut records: Vec<_> = table.iter().cloned().collect();
        records[0].start_heading = 42;

        assert!(matches!(
            PrimitiveTable::from_parts("car".into(), 8, 1.0, records),
            Err(ConfigError::CorruptRecord(_))
        ));
    }
}
