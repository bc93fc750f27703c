// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use crate::errors::{GeometryError, GeometryResult};
use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized tolerance used across the crate.
/// Defaults depend on precision (`f32` vs `f64`), but can be overridden:
///  1) **Build-time**: set env var `MESHCUT_TOLERANCE` (e.g. `MESHCUT_TOLERANCE=1e-6 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-4
    }
    #[cfg(feature = "f64")]
    {
        1e-6
    }
}

/// Returns the current tolerance value.
/// If not set yet, it tries `MESHCUT_TOLERANCE` (parsed as the active `Real`) and
/// falls back to the precision default.
///
/// This is the default welding distance of the vertex index and the
/// on-plane threshold used when classifying vertices against a cut plane.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("MESHCUT_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `meshcut::float_types::set_tolerance(1e-6);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Fraction of an edge's length, measured from either endpoint, inside which a
/// plane crossing is ignored by the triangle splitter.
pub const DEFAULT_EDGE_TOLERANCE: Real = 1e-4;

/// Caller-facing tolerance bundle.
///
/// `weld_epsilon` is an absolute distance, `edge_tolerance` a fraction of an
/// edge. Both are plain configuration; nothing is persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub weld_epsilon: Real,
    pub edge_tolerance: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            weld_epsilon: tolerance(),
            edge_tolerance: DEFAULT_EDGE_TOLERANCE,
        }
    }
}

impl Tolerances {
    /// Reject negative, NaN or infinite values, and edge fractions of one half or more.
    pub fn validate(&self) -> GeometryResult<()> {
        validate_epsilon(self.weld_epsilon)?;
        crate::mesh::split::EdgeTolerance::new(self.edge_tolerance)?;
        Ok(())
    }
}

pub(crate) fn validate_epsilon(epsilon: Real) -> GeometryResult<()> {
    if !epsilon.is_finite() || epsilon < 0.0 {
        return Err(GeometryError::InvalidArgument(format!(
            "tolerance must be finite and non-negative, got {epsilon}"
        )));
    }
    Ok(())
}

// Pi
/// Archimedes' constant (π)
#[cfg(feature = "f32")]
pub const PI: Real = core::f32::consts::PI;
/// Archimedes' constant (π)
#[cfg(feature = "f64")]
pub const PI: Real = core::f64::consts::PI;

// Tau
/// The full circle constant (τ)
#[cfg(feature = "f32")]
pub const TAU: Real = core::f32::consts::TAU;
/// The full circle constant (τ)
#[cfg(feature = "f64")]
pub const TAU: Real = core::f64::consts::TAU;
