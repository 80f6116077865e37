use std::fmt;
use std::fs::File;
use std::io;
use std::path::Path;

use crate::curve::RetentionCurve;
use crate::error::Result;
use crate::ptf::{HydraulicParameters, PtfModel};

pub const DEFAULT_CSV_NAME: &str = "curva_retencion.csv";
pub const CSV_HEADER: [&str; 3] = ["h (cm)", "Suction (kPa)", "θ (cm³/cm³)"];

// Plain-text listing of estimated parameters
pub struct Summary<'a>(pub &'a HydraulicParameters);

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.0;
        let model = p.variant.label();
        writeln!(f, "Ks: {:.2} cm/h", p.ks)?;
        writeln!(f, "θs: {:.3}", p.theta_s)?;
        writeln!(f, "θr: {:.3}", p.theta_r)?;
        writeln!(f, "α: {:.3} 1/cm", p.alpha)?;
        writeln!(f, "n: {:.2}", p.n)?;
        writeln!(f, "Field capacity (CC, {}): {:.3} cm³/cm³", model, p.cc)?;
        writeln!(f, "Permanent wilting point (PMP, {}): {:.3} cm³/cm³", model, p.pmp)?;
        write!(f, "Available water (AD): {:.3} cm³/cm³", p.ad)
    }
}

// One CSV row per curve point, in order of increasing suction
pub fn write_curve_csv<W: io::Write>(curve: &RetentionCurve, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(CSV_HEADER)?;
    for pt in curve.iter() {
        wtr.write_record(&[
            pt.h_cm.to_string(),
            pt.suction_kpa.to_string(),
            pt.theta.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_curve_csv_file<P: AsRef<Path>>(curve: &RetentionCurve, path: P) -> Result<()> {
    let file = File::create(path)?;
    write_curve_csv(curve, file)
}

pub fn curve_to_csv_string(curve: &RetentionCurve) -> Result<String> {
    let mut buf = Vec::new();
    write_curve_csv(curve, &mut buf)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::{CURVE_POINTS, generate_curve};
    use crate::ptf::{PtfModelVariant, estimate};
    use crate::soil_sample::SoilSample;

    #[test]
    fn csv_has_header_and_one_row_per_point() {
        let p = estimate(&SoilSample::default(), PtfModelVariant::Saxton1986);
        let curve = generate_curve(&p);
        let csv = curve_to_csv_string(&curve).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), CURVE_POINTS + 1);
        assert_eq!(lines[0], "h (cm),Suction (kPa),θ (cm³/cm³)");

        let first: Vec<f64> = lines[1].split(',').map(|v| v.parse().unwrap()).collect();
        let pt = curve.point(0);
        assert_eq!(first, vec![pt.h_cm, pt.suction_kpa, pt.theta]);
    }

    #[test]
    fn summary_rounds_like_the_results_panel() {
        let p = estimate(&SoilSample::default(), PtfModelVariant::SaxtonRawls2006);
        let text = Summary(&p).to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], format!("Ks: {:.2} cm/h", p.ks));
        assert_eq!(lines[2], "θr: 0.045");
        assert_eq!(lines[3], "α: 0.075 1/cm");
        assert_eq!(lines[4], "n: 1.89");
        assert!(lines[5].starts_with("Field capacity (CC, Saxton & Rawls 2006)"));
    }

    #[test]
    fn summary_labels_cc_and_pmp_with_model() {
        let p = estimate(&SoilSample::default(), PtfModelVariant::Saxton1986);
        let text = Summary(&p).to_string();
        assert!(text.contains(&format!("Field capacity (CC, Saxton 1986): {:.3} cm³/cm³", p.cc)));
        assert!(text.contains(&format!(
            "Permanent wilting point (PMP, Saxton 1986): {:.3} cm³/cm³",
            p.pmp
        )));
        assert!(text.ends_with(&format!("Available water (AD): {:.3} cm³/cm³", p.ad)));
    }
}
