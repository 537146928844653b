//! Numeric constants shared by the simulators.

/// Tolerances and defaults used across the crate.
pub mod sim_constants {
    /// Probabilities are clipped to `[CLIP_EPSILON, 1 - CLIP_EPSILON]` before
    /// a logarithm is taken. Each clipped entropy term is off by at most
    /// about `CLIP_EPSILON * (log2(1 / CLIP_EPSILON) + 1 / ln 2)`, roughly 3.5e-9 bits.
    pub const CLIP_EPSILON: f64 = 1e-10;
    /// Allowed deviation of `sum |c_i|^2` (or of a distribution's total mass) from 1.
    pub const NORM_TOLERANCE: f64 = 1e-9;
    /// Squared norms at or below this are treated as zero.
    pub const ZERO_NORM_SQR: f64 = 1e-24;
    /// Default absolute tolerance on the bisection interval width.
    pub const DEFAULT_TOLERANCE: f64 = 1e-6;
    /// Trial count used when a configuration record does not name one.
    pub const DEFAULT_TRIALS: i64 = 100_000;
    /// Seed used when a configuration record does not name one.
    pub const DEFAULT_SEED: u64 = 0x5EED_2024;
    /// Used for rotation angles and the exchange-evolution time axis.
    pub const PI: f64 = std::f64::consts::PI;
}
