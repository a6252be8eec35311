use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Crop parameters suitable for config files and presets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropParams {
    /// Flood-fill dilation radius in working-image pixels
    pub radius: u32,
    /// Padding around the detected box as a fraction of its size
    pub padding: f64,
    /// If true, write a JSON sidecar describing the crop next to the output
    pub sidecar: bool,
}

impl Default for CropParams {
    fn default() -> Self {
        Self {
            radius: 3,
            padding: 0.05,
            sidecar: false,
        }
    }
}

impl CropParams {
    pub fn validate(&self) -> Result<()> {
        if self.radius == 0 {
            return Err(Error::InvalidArgument {
                arg: "radius",
                value: self.radius.to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.padding) {
            return Err(Error::InvalidArgument {
                arg: "padding",
                value: self.padding.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_valid() {
        let params = CropParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.radius, 3);
        assert!((params.padding - 0.05).abs() < 1e-12);
    }

    #[test]
    fn zero_radius_rejected() {
        let params = CropParams {
            radius: 0,
            ..Default::default()
        };
        assert!(matches!(
            params.validate(),
            Err(Error::InvalidArgument { arg: "radius", .. })
        ));
    }

    #[test]
    fn padding_outside_unit_interval_rejected() {
        for padding in [-0.1, 1.5] {
            let params = CropParams {
                padding,
                ..Default::default()
            };
            assert!(matches!(
                params.validate(),
                Err(Error::InvalidArgument { arg: "padding", .. })
            ));
        }
    }
}
