use crate::error::{EditError, Result};

/// Square convolution kernel of side `2 * radius + 1`, normalized so the
/// weights sum to 1.
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    radius: usize,
    diameter: usize,
    data: Vec<f64>,
}

impl Kernel {
    /// Builds a kernel from row-major weights, normalizing them.
    pub fn new(radius: usize, data: Vec<f64>) -> Result<Self> {
        let diameter = 2 * radius + 1;
        if data.len() != diameter * diameter {
            return Err(EditError::InvalidKernel(format!(
                "expected {} weights for radius {}, got {}",
                diameter * diameter,
                radius,
                data.len()
            )));
        }
        if data.iter().any(|w| !w.is_finite() || *w < 0.0) {
            return Err(EditError::InvalidKernel(
                "weights must be non-negative numbers".to_string(),
            ));
        }
        let sum: f64 = data.iter().sum();
        if sum <= 0.0 {
            return Err(EditError::InvalidKernel(
                "weights must not all be zero".to_string(),
            ));
        }
        Ok(Self {
            radius,
            diameter,
            data: data.into_iter().map(|w| w / sum).collect(),
        })
    }

    /// Gaussian weights `exp(-d² / (2σ²))` over the square neighborhood,
    /// where `d` is the distance from the center cell.
    pub fn gaussian(radius: usize, sigma: f64) -> Result<Self> {
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(EditError::InvalidKernel(format!(
                "sigma must be positive, got {}",
                sigma
            )));
        }
        let r = radius as i64;
        let two_sigma_sq = 2.0 * sigma * sigma;
        let mut data = Vec::with_capacity((2 * radius + 1).pow(2));
        for dz in -r..=r {
            for dx in -r..=r {
                let d_sq = (dx * dx + dz * dz) as f64;
                data.push((-d_sq / two_sigma_sq).exp());
            }
        }
        Self::new(radius, data)
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn diameter(&self) -> usize {
        self.diameter
    }

    /// Weight at offset (dx, dz) from the center, zero outside the kernel.
    pub fn weight(&self, dx: i32, dz: i32) -> f64 {
        let r = self.radius as i32;
        if dx.abs() > r || dz.abs() > r {
            return 0.0;
        }
        let row = (dz + r) as usize;
        let col = (dx + r) as usize;
        self.data[row * self.diameter + col]
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }
}
