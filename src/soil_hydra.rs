// Soil hydraulic parameters (van Genuchten model)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VanGenuchten {
    pub theta_r: f64, // Residual water content [cm³/cm³]
    pub theta_s: f64, // Saturated water content [cm³/cm³]
    pub alpha: f64,   // van Genuchten parameter [1/cm]
    pub n: f64,       // van Genuchten parameter [-], n > 1
}

impl VanGenuchten {
    pub fn new(theta_r: f64, theta_s: f64, alpha: f64, n: f64) -> Self {
        VanGenuchten {
            theta_r,
            theta_s,
            alpha,
            n,
        }
    }

    pub fn m(&self) -> f64 {
        1.0 - 1.0 / self.n
    }

    // Effective saturation at suction head h [cm], h >= 0
    pub fn effective_saturation(&self, h: f64) -> f64 {
        let ah = self.alpha * h;
        1.0 / (1.0 + ah.powf(self.n)).powf(self.m())
    }

    // Water content as a function of suction head (h, cm)
    pub fn theta(&self, h: f64) -> f64 {
        self.theta_r + self.effective_saturation(h) * (self.theta_s - self.theta_r)
    }
}
