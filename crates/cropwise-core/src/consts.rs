/// Minimum candidate count to score crops with Rayon parallelism.
pub const PARALLEL_CANDIDATE_THRESHOLD: usize = 64;

/// Minimum pixel count (h*w) to build feature-map rows in parallel.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Number of channels in a pixel buffer and in a feature map (RGBA).
pub const CHANNEL_COUNT: usize = 4;

/// Feature-map channel holding the skin signal.
pub const SKIN_CHANNEL: usize = 0;

/// Feature-map channel holding the edge/detail signal.
pub const DETAIL_CHANNEL: usize = 1;

/// Feature-map channel holding the saturation signal.
pub const SATURATION_CHANNEL: usize = 2;

/// Feature-map channel holding the caller boost signal.
pub const BOOST_CHANNEL: usize = 3;

/// ITU-R BT.601 luminance coefficient for the red channel.
pub const LUMINANCE_R: f64 = 0.299;

/// ITU-R BT.601 luminance coefficient for the green channel.
pub const LUMINANCE_G: f64 = 0.587;

/// ITU-R BT.601 luminance coefficient for the blue channel.
pub const LUMINANCE_B: f64 = 0.114;

/// Reference skin color, compared against each pixel's unit RGB direction.
pub const DEFAULT_SKIN_COLOR: [f64; 3] = [0.78, 0.57, 0.44];

pub const DEFAULT_SKIN_BIAS: f64 = 0.01;
pub const DEFAULT_SKIN_BRIGHTNESS_MIN: f64 = 0.2;
pub const DEFAULT_SKIN_BRIGHTNESS_MAX: f64 = 1.0;
pub const DEFAULT_SKIN_THRESHOLD: f64 = 0.8;
pub const DEFAULT_SKIN_WEIGHT: f64 = 1.8;

pub const DEFAULT_SATURATION_BRIGHTNESS_MIN: f64 = 0.05;
pub const DEFAULT_SATURATION_BRIGHTNESS_MAX: f64 = 0.9;
pub const DEFAULT_SATURATION_THRESHOLD: f64 = 0.4;
pub const DEFAULT_SATURATION_BIAS: f64 = 0.2;
pub const DEFAULT_SATURATION_WEIGHT: f64 = 0.1;

pub const DEFAULT_DETAIL_WEIGHT: f64 = 0.2;
pub const DEFAULT_BOOST_WEIGHT: f64 = 100.0;

/// Penalty weight applied to content near a candidate's border (negative).
pub const DEFAULT_EDGE_WEIGHT: f64 = -20.0;

/// Fraction of the half-extent, measured inward from the border, where the edge penalty applies.
pub const DEFAULT_EDGE_RADIUS: f64 = 0.4;

/// Importance of a sample lying outside the candidate rectangle.
pub const DEFAULT_OUTSIDE_IMPORTANCE: f64 = -0.5;

/// Block size used to reduce the feature map before scoring.
pub const DEFAULT_SCORE_DOWN_SAMPLE: u32 = 8;

/// Candidate position stride in prescaled pixels.
pub const DEFAULT_STEP: u32 = 8;

pub const DEFAULT_SCALE_STEP: f64 = 0.1;
pub const DEFAULT_MIN_SCALE: f64 = 1.0;
pub const DEFAULT_MAX_SCALE: f64 = 1.0;

/// Prescale keeps the larger of (target/width, target/height) at this many pixels.
pub const DEFAULT_PRESCALE_TARGET: f64 = 256.0;

/// Lower bound for the orchestrator's minimum scale.
pub const DEFAULT_MIN_SCALE_THRESHOLD: f64 = 0.5;

/// Radial falloff offset of the importance function (≈ sqrt(2)).
pub const IMPORTANCE_RADIAL_OFFSET: f64 = 1.41;

/// Gain applied to the rule-of-thirds bonus.
pub const RULE_OF_THIRDS_GAIN: f64 = 1.2;

/// Tolerance used when stepping the scale range so the lower bound stays inclusive.
pub const SCALE_EPSILON: f64 = 1e-9;

/// Channel weighting used by the downsampler: (average share, block-max share).
pub const DOWNSAMPLE_SKIN_MIX: (f64, f64) = (0.5, 0.5);
pub const DOWNSAMPLE_DETAIL_MIX: (f64, f64) = (0.7, 0.3);

/// Quantization step (per channel) used by dominant-color averaging.
pub const DOMINANT_COLOR_BUCKET: u8 = 24;

/// Color returned when an average color cannot be computed.
pub const DEFAULT_NEUTRAL_COLOR: [u8; 4] = [0, 0, 0, 0];
