use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use serde::Deserialize;

use crate::soil_hydra::VanGenuchten;
use crate::soil_sample::SoilSample;

pub const PARTICLE_DENSITY: f64 = 2.65; // Mineral particle density [g/cm³]
pub const THETA_R: f64 = 0.045; // Residual water content [cm³/cm³]
pub const ALPHA: f64 = 0.075; // van Genuchten alpha [1/cm]
pub const N: f64 = 1.89; // van Genuchten n [-]

// Rawls et al. log-linear coefficients for log10(Ks), percent-scale inputs
const KS_INTERCEPT: f64 = -0.884;
const KS_SAND: f64 = 0.0153;
const KS_CLAY: f64 = -0.0003;
const KS_BD: f64 = -0.197;
const KS_OM: f64 = 0.112;

const TEXTURE_TOTAL_TOLERANCE: f64 = 0.5; // [%]

// Field capacity and permanent wilting point estimation
pub trait PtfModel {
    // (CC, PMP) [cm³/cm³]
    fn compute_field_capacity_and_wilting_point(&self, sample: &SoilSample) -> (f64, f64);

    fn label(&self) -> &'static str;
}

// Saxton et al. (1986): percent-scale clay and om, raw results divided by 100 afterwards
#[derive(Debug, Clone, Copy, Default)]
pub struct Saxton1986;

impl PtfModel for Saxton1986 {
    fn compute_field_capacity_and_wilting_point(&self, sample: &SoilSample) -> (f64, f64) {
        let cc_raw = -0.251 + 0.195 * sample.clay + 0.011 * sample.om;
        let pmp_raw = -0.024 + 0.004 * sample.clay + 0.004 * sample.om;
        (cc_raw / 100.0, pmp_raw / 100.0)
    }

    fn label(&self) -> &'static str {
        "Saxton 1986"
    }
}

// Saxton & Rawls (2006): inputs converted to fractions first, results already in cm³/cm³
#[derive(Debug, Clone, Copy, Default)]
pub struct SaxtonRawls2006;

impl PtfModel for SaxtonRawls2006 {
    fn compute_field_capacity_and_wilting_point(&self, sample: &SoilSample) -> (f64, f64) {
        let sand = sample.sand / 100.0;
        let clay = sample.clay / 100.0;
        let om = sample.om / 100.0;

        // 33 kPa
        let cc = -0.251 + 0.195 * clay + 0.011 * om + 0.006 * clay * om - 0.027 * sand * om
            + 0.452 * sand * clay
            + 0.299;
        // 1500 kPa
        let pmp = -0.024 + 0.487 * clay + 0.006 * om + 0.005 * clay * om - 0.013 * sand * om
            + 0.068 * sand * clay
            + 0.031;
        (cc, pmp)
    }

    fn label(&self) -> &'static str {
        "Saxton & Rawls 2006"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum PtfModelVariant {
    #[default]
    #[serde(rename = "saxton1986")]
    Saxton1986,
    #[serde(rename = "saxton_rawls2006")]
    SaxtonRawls2006,
}

impl PtfModelVariant {
    pub const ALL: [PtfModelVariant; 2] =
        [PtfModelVariant::Saxton1986, PtfModelVariant::SaxtonRawls2006];

    pub fn key(&self) -> &'static str {
        match self {
            PtfModelVariant::Saxton1986 => "saxton1986",
            PtfModelVariant::SaxtonRawls2006 => "saxton_rawls2006",
        }
    }
}

impl PtfModel for PtfModelVariant {
    fn compute_field_capacity_and_wilting_point(&self, sample: &SoilSample) -> (f64, f64) {
        match self {
            PtfModelVariant::Saxton1986 => Saxton1986.compute_field_capacity_and_wilting_point(sample),
            PtfModelVariant::SaxtonRawls2006 => {
                SaxtonRawls2006.compute_field_capacity_and_wilting_point(sample)
            }
        }
    }

    fn label(&self) -> &'static str {
        match self {
            PtfModelVariant::Saxton1986 => Saxton1986.label(),
            PtfModelVariant::SaxtonRawls2006 => SaxtonRawls2006.label(),
        }
    }
}

impl fmt::Display for PtfModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PtfModelVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "saxton1986" | "1986" => Ok(PtfModelVariant::Saxton1986),
            "saxton_rawls2006" | "saxtonrawls2006" | "2006" => Ok(PtfModelVariant::SaxtonRawls2006),
            _ => Err(format!(
                "Unknown PTF model '{}' (expected 'saxton1986' or 'saxton_rawls2006')",
                s
            )),
        }
    }
}

// Everything estimated for one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydraulicParameters {
    pub ks: f64,      // Saturated hydraulic conductivity [cm/h]
    pub theta_s: f64, // Saturated water content [cm³/cm³]
    pub theta_r: f64, // Residual water content [cm³/cm³]
    pub alpha: f64,   // [1/cm]
    pub n: f64,       // [-]
    pub cc: f64,      // Field capacity [cm³/cm³]
    pub pmp: f64,     // Permanent wilting point [cm³/cm³]
    pub ad: f64,      // Available water, cc - pmp [cm³/cm³]
    pub variant: PtfModelVariant,
}

impl HydraulicParameters {
    pub fn van_genuchten(&self) -> VanGenuchten {
        VanGenuchten::new(self.theta_r, self.theta_s, self.alpha, self.n)
    }

    // Horizontal overlay lines for a retention plot: (label, theta)
    pub fn reference_lines(&self) -> [(String, f64); 2] {
        [
            (format!("CC ({})", self.variant.label()), self.cc),
            (format!("PMP ({})", self.variant.label()), self.pmp),
        ]
    }
}

// Rawls-type saturated hydraulic conductivity [cm/h], sand and clay in percent
pub fn saturated_conductivity(sample: &SoilSample) -> f64 {
    let log_ks = KS_INTERCEPT
        + KS_SAND * sample.sand
        + KS_CLAY * sample.clay
        + KS_BD * sample.bd
        + KS_OM * sample.om;
    10f64.powf(log_ks)
}

// Only theta_s depends on the sample (porosity from bulk density)
pub fn van_genuchten_params(sample: &SoilSample) -> VanGenuchten {
    VanGenuchten::new(THETA_R, 1.0 - sample.bd / PARTICLE_DENSITY, ALPHA, N)
}

/// Evaluates every PTF for `sample`. Inputs are not validated, and CC, PMP and AD
/// are not clamped: AD is negative whenever the chosen model puts CC below PMP.
pub fn estimate(sample: &SoilSample, variant: PtfModelVariant) -> HydraulicParameters {
    let ks = saturated_conductivity(sample);
    let vg = van_genuchten_params(sample);
    let (cc, pmp) = variant.compute_field_capacity_and_wilting_point(sample);
    let ad = cc - pmp;

    debug!(
        "{}: Ks={:.4} cm/h, theta_s={:.4}, CC={:.4}, PMP={:.4}, AD={:.4}",
        variant, ks, vg.theta_s, cc, pmp, ad
    );
    if (sample.texture_total() - 100.0).abs() > TEXTURE_TOTAL_TOLERANCE {
        warn!(
            "sand + silt + clay = {:.1}%, not 100%; estimating anyway",
            sample.texture_total()
        );
    }
    if ad < 0.0 {
        warn!(
            "{}: field capacity {:.4} is below wilting point {:.4} (negative available water)",
            variant, cc, pmp
        );
    }

    HydraulicParameters {
        ks,
        theta_s: vg.theta_s,
        theta_r: vg.theta_r,
        alpha: vg.alpha,
        n: vg.n,
        cc,
        pmp,
        ad,
        variant,
    }
}
