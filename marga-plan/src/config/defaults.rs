//! Serde default values for configuration sections.

pub fn resolution() -> f32 {
    0.25
}

pub fn heading_count() -> u16 {
    16
}

pub fn budget_check_interval() -> usize {
    64
}

pub fn epsilon_start() -> f32 {
    3.0
}

pub fn epsilon_step() -> f32 {
    0.5
}

// --- car ---

pub fn car_wheelbase() -> f32 {
    1.6
}

pub fn car_max_steering_angle() -> f32 {
    0.55
}

pub fn reverse_cost_factor() -> f32 {
    2.0
}

pub fn car_footprint_length() -> f32 {
    2.4
}

pub fn car_footprint_width() -> f32 {
    1.2
}

pub fn car_footprint_offset() -> f32 {
    0.8
}

// --- load carrier ---

pub fn carrier_hitch_length() -> f32 {
    1.5
}

pub fn carrier_max_articulation() -> f32 {
    0.75
}

pub fn carrier_reverse_cost_factor() -> f32 {
    2.5
}

pub fn tractor_length() -> f32 {
    1.8
}

pub fn tractor_width() -> f32 {
    1.4
}

pub fn tractor_offset() -> f32 {
    0.9
}

pub fn trailer_length() -> f32 {
    2.2
}

pub fn trailer_width() -> f32 {
    1.4
}

pub fn trailer_offset() -> f32 {
    -1.1
}

// --- unicycle ---

pub fn unicycle_footprint_length() -> f32 {
    0.8
}

pub fn unicycle_footprint_width() -> f32 {
    0.6
}

pub fn turn_in_place_cost() -> f32 {
    0.5
}
