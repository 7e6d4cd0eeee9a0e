//! Noise field sampling and cursor repulsion parameters.

use crate::error::{invalid, Result};

/// Noise field parameters (all distances in logical pixels)
#[derive(Debug, Clone)]
pub struct FieldParams {
    /// Spacing between grid nodes (px)
    pub cell_size: f32,

    /// Spatial frequency applied to node positions before sampling
    /// Small = broad, slowly varying hills
    pub noise_scale: f64,

    /// Time coordinate advance per rendered frame
    pub time_step: f64,

    /// Pointer influence radius (px)
    pub repel_radius: f32,

    /// Field depression at the pointer
    /// Formula: force = (1 - d / radius) * strength * exp(-d / 100)
    pub repel_strength: f32,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            cell_size: 10.0,
            noise_scale: 0.0015,
            time_step: 0.002,
            repel_radius: 200.0,
            repel_strength: 0.8,
        }
    }
}

impl FieldParams {
    pub fn validate(&self) -> Result<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(invalid(format!(
                "cell size must be > 0, got {}",
                self.cell_size
            )));
        }
        if !self.noise_scale.is_finite() || !self.time_step.is_finite() {
            return Err(invalid("noise scale and time step must be finite"));
        }
        if !(self.repel_radius.is_finite() && self.repel_radius >= 0.0) {
            return Err(invalid(format!(
                "repel radius must be >= 0, got {}",
                self.repel_radius
            )));
        }
        if !self.repel_strength.is_finite() {
            return Err(invalid("repel strength must be finite"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(FieldParams::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_cell_size() {
        let params = FieldParams {
            cell_size: 0.0,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_rejects_nan_scale() {
        let params = FieldParams {
            noise_scale: f64::NAN,
            ..Default::default()
        };
        assert!(params.validate().is_err());
    }
}
