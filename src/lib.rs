mod curve;
mod error;
mod ptf;
pub mod report;
mod soil_hydra;
mod soil_sample;

pub use curve::{
    CM_WATER_PER_KPA, CURVE_POINTS, CurvePoint, RetentionCurve, cm_to_kpa, generate_curve,
    logspace,
};
pub use error::{Result, RosettaError};
pub use ptf::{
    ALPHA, HydraulicParameters, N, PARTICLE_DENSITY, PtfModel, PtfModelVariant, Saxton1986,
    SaxtonRawls2006, THETA_R, estimate, saturated_conductivity, van_genuchten_params,
};
pub use soil_hydra::VanGenuchten;
pub use soil_sample::{
    BULK_DENSITY_RANGE, ORGANIC_MATTER_RANGE, SampleLibrary, SampleOverrides, SoilSample,
    TEXTURE_RANGE,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_works() {
        let params = estimate(&SoilSample::default(), PtfModelVariant::default());
        let curve = generate_curve(&params);
        assert_eq!(curve.len(), CURVE_POINTS);
    }
}
