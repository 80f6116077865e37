use log::debug;
use nalgebra::DVector;

use crate::ptf::HydraulicParameters;

pub const CURVE_POINTS: usize = 100;
pub const MIN_HEAD_EXP: f64 = -1.0; // h = 0.1 cm
pub const MAX_HEAD_EXP: f64 = 3.2; // h ≈ 1585 cm
pub const CM_WATER_PER_KPA: f64 = 102.04;

// Suction head [cm of water] to suction [kPa]
pub fn cm_to_kpa(h: f64) -> f64 {
    h / CM_WATER_PER_KPA
}

// `count` values log-uniformly spaced from 10^start_exp to 10^end_exp, both ends included
pub fn logspace(start_exp: f64, end_exp: f64, count: usize) -> DVector<f64> {
    let step = if count > 1 {
        (end_exp - start_exp) / (count - 1) as f64
    } else {
        0.0
    };
    DVector::from_fn(count, |i, _| {
        let exp = if count > 1 && i == count - 1 {
            end_exp
        } else {
            start_exp + i as f64 * step
        };
        10f64.powf(exp)
    })
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    pub h_cm: f64,        // Suction head [cm]
    pub suction_kpa: f64, // Suction [kPa]
    pub theta: f64,       // Volumetric water content [cm³/cm³]
}

// Tabulated retention curve, ordered by increasing suction
#[derive(Debug, Clone, PartialEq)]
pub struct RetentionCurve {
    h: DVector<f64>,       // [cm]
    suction: DVector<f64>, // [kPa]
    theta: DVector<f64>,   // [cm³/cm³]
}

impl RetentionCurve {
    pub fn len(&self) -> usize {
        self.h.len()
    }

    pub fn is_empty(&self) -> bool {
        self.h.is_empty()
    }

    pub fn point(&self, i: usize) -> CurvePoint {
        CurvePoint {
            h_cm: self.h[i],
            suction_kpa: self.suction[i],
            theta: self.theta[i],
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = CurvePoint> + '_ {
        (0..self.len()).map(move |i| self.point(i))
    }

    pub fn heads(&self) -> &DVector<f64> {
        &self.h
    }

    pub fn suctions(&self) -> &DVector<f64> {
        &self.suction
    }

    pub fn water_contents(&self) -> &DVector<f64> {
        &self.theta
    }
}

/// Samples the van Genuchten curve of `params` at 100 suction heads between
/// 0.1 cm and 10^3.2 cm.
pub fn generate_curve(params: &HydraulicParameters) -> RetentionCurve {
    let vg = params.van_genuchten();
    let h = logspace(MIN_HEAD_EXP, MAX_HEAD_EXP, CURVE_POINTS);
    let suction = h.map(cm_to_kpa);
    let theta = h.map(|h| vg.theta(h));

    debug!(
        "retention curve: {} points, theta {:.4} .. {:.4}",
        h.len(),
        theta[0],
        theta[h.len() - 1]
    );

    RetentionCurve { h, suction, theta }
}
