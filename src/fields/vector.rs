//! Fields of the `velocity` vector files.

use super::descriptor::FieldDescriptor;

const KM_PER_S: &str = "km/s";
const PER_S: &str = "1/s";

pub const VELOCITY_I: FieldDescriptor = FieldDescriptor::given(
    0,
    "velocity_i",
    "i Component of 3-D Velocity Vector",
    KM_PER_S,
);
pub const VELOCITY_J: FieldDescriptor = FieldDescriptor::given(
    1,
    "velocity_j",
    "j Component of 3-D Velocity Vector",
    KM_PER_S,
);
pub const VELOCITY_K: FieldDescriptor = FieldDescriptor::given(
    2,
    "velocity_k",
    "k Component of 3-D Velocity Vector",
    KM_PER_S,
);

pub const CURL_X: FieldDescriptor = FieldDescriptor::derived(
    3,
    "curl_x",
    "x Component of the Curl of the 3-D Vector",
    PER_S,
    None,
);
pub const CURL_Y: FieldDescriptor = FieldDescriptor::derived(
    4,
    "curl_y",
    "y Component of the Curl of the 3-D Vector",
    PER_S,
    None,
);
/// Computed alongside the other components but never stored in a table.
pub const CURL_Z: FieldDescriptor = FieldDescriptor::derived(
    5,
    "curl_z",
    "z Component of the Curl of the 3-D Vector",
    PER_S,
    None,
);
pub const CURL_MAGNITUDE: FieldDescriptor = FieldDescriptor::derived(
    6,
    "curl_magnitude",
    "Magnitude of the Curl of the 3-D Vector",
    PER_S,
    None,
);

/// Number of columns in a raw velocity file.
pub const INPUT_COLUMNS: usize = 3;

/// Every vector field, given columns first.
pub const ALL: [FieldDescriptor; 7] = [
    VELOCITY_I,
    VELOCITY_J,
    VELOCITY_K,
    CURL_X,
    CURL_Y,
    CURL_Z,
    CURL_MAGNITUDE,
];

/// Velocity components in (i, j, k) order.
pub const VELOCITY: [FieldDescriptor; 3] = [VELOCITY_I, VELOCITY_J, VELOCITY_K];
