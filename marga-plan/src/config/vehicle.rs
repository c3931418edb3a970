//! Vehicle configuration sections.

use serde::{Deserialize, Serialize};

use crate::model::{BodyRect, CarModel, LoadCarrierModel, UnicycleModel};

use super::defaults;

/// Footprint rectangle settings
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct FootprintSection {
    /// Rectangle length along the vehicle X axis (meters)
    pub length: f32,
    /// Rectangle width along the vehicle Y axis (meters)
    pub width: f32,
    /// Rectangle center offset forward of the reference point (meters)
    #[serde(default)]
    pub offset: f32,
}

impl FootprintSection {
    /// Convert to footprint geometry.
    pub fn to_body(&self) -> BodyRect {
        BodyRect::new(self.length, self.width, self.offset)
    }
}

/// Vehicles settings section
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct VehiclesSection {
    /// Car model settings
    #[serde(default)]
    pub car: CarSection,

    /// Articulated load-carrier settings
    #[serde(default)]
    pub load_carrier: CarrierSection,

    /// Unicycle cart settings
    #[serde(default)]
    pub unicycle: UnicycleSection,
}

/// Car model settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CarSection {
    /// Distance between axles (meters)
    #[serde(default = "defaults::car_wheelbase")]
    pub wheelbase: f32,

    /// Steering lock (radians)
    #[serde(default = "defaults::car_max_steering_angle")]
    pub max_steering_angle: f32,

    /// Cost multiplier for reverse motion
    #[serde(default = "defaults::reverse_cost_factor")]
    pub reverse_cost_factor: f32,

    /// Footprint relative to the rear axle
    #[serde(default = "CarSection::default_footprint")]
    pub footprint: FootprintSection,
}

impl CarSection {
    fn default_footprint() -> FootprintSection {
        FootprintSection {
            length: defaults::car_footprint_length(),
            width: defaults::car_footprint_width(),
            offset: defaults::car_footprint_offset(),
        }
    }

    /// Build the model.
    pub fn to_model(&self) -> CarModel {
        CarModel::new(
            self.wheelbase,
            self.max_steering_angle,
            self.reverse_cost_factor,
            self.footprint.to_body(),
        )
    }
}

impl Default for CarSection {
    fn default() -> Self {
        Self {
            wheelbase: defaults::car_wheelbase(),
            max_steering_angle: defaults::car_max_steering_angle(),
            reverse_cost_factor: defaults::reverse_cost_factor(),
            footprint: Self::default_footprint(),
        }
    }
}

/// Articulated load-carrier settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CarrierSection {
    /// Joint-to-axle distance (meters)
    #[serde(default = "defaults::carrier_hitch_length")]
    pub hitch_length: f32,

    /// Articulation limit (radians)
    #[serde(default = "defaults::carrier_max_articulation")]
    pub max_articulation_angle: f32,

    /// Cost multiplier for reverse motion
    #[serde(default = "defaults::carrier_reverse_cost_factor")]
    pub reverse_cost_factor: f32,

    /// Leading body relative to the articulation joint
    #[serde(default = "CarrierSection::default_tractor")]
    pub tractor: FootprintSection,

    /// Trailing body relative to the articulation joint
    #[serde(default = "CarrierSection::default_trailer")]
    pub trailer: FootprintSection,
}

impl CarrierSection {
    fn default_tractor() -> FootprintSection {
        FootprintSection {
            length: defaults::tractor_length(),
            width: defaults::tractor_width(),
            offset: defaults::tractor_offset(),
        }
    }

    fn default_trailer() -> FootprintSection {
        FootprintSection {
            length: defaults::trailer_length(),
            width: defaults::trailer_width(),
            offset: defaults::trailer_offset(),
        }
    }

    /// Build the model.
    pub fn to_model(&self) -> LoadCarrierModel {
        LoadCarrierModel::new(
            self.hitch_length,
            self.max_articulation_angle,
            self.reverse_cost_factor,
            self.tractor.to_body(),
            self.trailer.to_body(),
        )
    }
}

impl Default for CarrierSection {
    fn default() -> Self {
        Self {
            hitch_length: defaults::carrier_hitch_length(),
            max_articulation_angle: defaults::carrier_max_articulation(),
            reverse_cost_factor: defaults::carrier_reverse_cost_factor(),
            tractor: Self::default_tractor(),
            trailer: Self::default_trailer(),
        }
    }
}

/// Unicycle cart settings
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UnicycleSection {
    /// Cost per radian of in-place rotation
    #[serde(default = "defaults::turn_in_place_cost")]
    pub turn_in_place_cost: f32,

    /// Footprint relative to the axle center
    #[serde(default = "UnicycleSection::default_footprint")]
    pub footprint: FootprintSection,
}

impl UnicycleSection {
    fn default_footprint() -> FootprintSection {
        FootprintSection {
            length: defaults::unicycle_footprint_length(),
            width: defaults::unicycle_footprint_width(),
            offset: 0.0,
        }
    }

    /// Build the model.
    pub fn to_model(&self) -> UnicycleModel {
        UnicycleModel::new(self.footprint.to_body(), self.turn_in_place_cost)
    }
}

impl Default for UnicycleSection {
    fn default() -> Self {
        Self {
            turn_in_place_cost: defaults::turn_in_place_cost(),
            footprint: Self::default_footprint(),
        }
    }
}
