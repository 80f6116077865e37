use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, RosettaError};
use crate::ptf::PtfModelVariant;

pub const TEXTURE_RANGE: (f64, f64) = (0.0, 100.0); // sand, silt, clay [%]
pub const BULK_DENSITY_RANGE: (f64, f64) = (0.5, 2.2); // [g/cm³]
pub const ORGANIC_MATTER_RANGE: (f64, f64) = (0.0, 10.0); // [%]

// Soil texture, bulk density and organic matter of a single sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SoilSample {
    pub sand: f64, // Sand fraction [%]
    pub silt: f64, // Silt fraction [%], accepted but not used by any PTF
    pub clay: f64, // Clay fraction [%]
    pub bd: f64,   // Bulk density [g/cm³]
    pub om: f64,   // Organic matter [%]
}

impl Default for SoilSample {
    fn default() -> Self {
        SoilSample {
            sand: 65.0,
            silt: 25.0,
            clay: 10.0,
            bd: 1.45,
            om: 1.8,
        }
    }
}

impl SoilSample {
    pub fn new(sand: f64, silt: f64, clay: f64, bd: f64, om: f64) -> Self {
        SoilSample {
            sand,
            silt,
            clay,
            bd,
            om,
        }
    }

    // sand + silt + clay [%]; not required to be 100
    pub fn texture_total(&self) -> f64 {
        self.sand + self.silt + self.clay
    }

    // Input ranges of the entry form; estimate() never checks them
    pub fn check_ranges(&self) -> Result<()> {
        let fields = [
            ("sand", self.sand, TEXTURE_RANGE),
            ("silt", self.silt, TEXTURE_RANGE),
            ("clay", self.clay, TEXTURE_RANGE),
            ("bd", self.bd, BULK_DENSITY_RANGE),
            ("om", self.om, ORGANIC_MATTER_RANGE),
        ];
        for (field, value, (min, max)) in fields {
            if !(min..=max).contains(&value) {
                return Err(RosettaError::OutOfRange {
                    field,
                    value,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

// Named soil samples read from a TOML file, one table per sample, matched case-insensitively.
// A table may carry an optional `model = "saxton1986" | "saxton_rawls2006"` key.
#[derive(Debug, Clone, Default)]
pub struct SampleLibrary {
    samples: BTreeMap<String, LibraryEntry>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct LibraryEntry {
    sand: f64,
    silt: f64,
    clay: f64,
    bd: f64,
    om: f64,
    model: Option<PtfModelVariant>,
}

impl LibraryEntry {
    fn sample(&self) -> SoilSample {
        SoilSample::new(self.sand, self.silt, self.clay, self.bd, self.om)
    }
}

impl SampleLibrary {
    pub fn from_toml_str(toml_str: &str) -> Result<Self> {
        let raw: BTreeMap<String, LibraryEntry> = toml::from_str(toml_str)?;
        let samples = raw
            .into_iter()
            .map(|(name, entry)| (name.to_lowercase(), entry))
            .collect();
        Ok(SampleLibrary { samples })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let toml_str = fs::read_to_string(path)?;
        Self::from_toml_str(&toml_str)
    }

    fn entry(&self, name: &str) -> Result<&LibraryEntry> {
        self.samples
            .get(&name.to_lowercase())
            .ok_or_else(|| RosettaError::UnknownSample {
                name: name.to_string(),
            })
    }

    pub fn get(&self, name: &str) -> Result<SoilSample> {
        self.entry(name).map(LibraryEntry::sample)
    }

    // PTF model stored with the sample, if any
    pub fn model(&self, name: &str) -> Result<Option<PtfModelVariant>> {
        self.entry(name).map(|e| e.model)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.samples.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// Per-field replacements applied on top of a base sample (command-line flags)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampleOverrides {
    pub sand: Option<f64>,
    pub silt: Option<f64>,
    pub clay: Option<f64>,
    pub bd: Option<f64>,
    pub om: Option<f64>,
}

impl SampleOverrides {
    pub fn apply(&self, base: SoilSample) -> SoilSample {
        SoilSample {
            sand: self.sand.unwrap_or(base.sand),
            silt: self.silt.unwrap_or(base.silt),
            clay: self.clay.unwrap_or(base.clay),
            bd: self.bd.unwrap_or(base.bd),
            om: self.om.unwrap_or(base.om),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIBRARY: &str = r#"
[Sandy_Loam]
sand = 65.0
silt = 25.0
clay = 10.0
bd = 1.45
om = 1.8

[clay]
sand = 20.0
silt = 20.0
clay = 60.0
bd = 1.3
om = 3.0
model = "saxton_rawls2006"
"#;

    #[test]
    fn default_sample_matches_form_defaults() {
        let s = SoilSample::default();
        assert_eq!(s, SoilSample::new(65.0, 25.0, 10.0, 1.45, 1.8));
        assert_eq!(s.texture_total(), 100.0);
        assert!(s.check_ranges().is_ok());
    }

    #[test]
    fn range_check_names_offending_field() {
        let s = SoilSample::new(65.0, 25.0, 10.0, 2.5, 1.8);
        match s.check_ranges() {
            Err(RosettaError::OutOfRange { field, value, .. }) => {
                assert_eq!(field, "bd");
                assert_eq!(value, 2.5);
            }
            other => panic!("expected OutOfRange, got {:?}", other),
        }
        assert!(SoilSample::new(65.0, 25.0, 10.0, 1.45, 10.5).check_ranges().is_err());
        assert!(SoilSample::new(-1.0, 25.0, 10.0, 1.45, 1.8).check_ranges().is_err());
    }

    #[test]
    fn range_bounds_are_inclusive() {
        assert!(SoilSample::new(100.0, 0.0, 0.0, 0.5, 0.0).check_ranges().is_ok());
        assert!(SoilSample::new(0.0, 100.0, 100.0, 2.2, 10.0).check_ranges().is_ok());
    }

    #[test]
    fn texture_need_not_sum_to_100() {
        let s = SoilSample::new(80.0, 30.0, 20.0, 1.45, 1.8);
        assert_eq!(s.texture_total(), 130.0);
        assert!(s.check_ranges().is_ok());
    }

    #[test]
    fn library_lookup_is_case_insensitive() {
        let lib = SampleLibrary::from_toml_str(LIBRARY).unwrap();
        assert_eq!(lib.len(), 2);
        assert_eq!(lib.get("SANDY_LOAM").unwrap(), SoilSample::default());
        assert_eq!(lib.get("clay").unwrap().clay, 60.0);
        assert_eq!(lib.names().collect::<Vec<_>>(), vec!["clay", "sandy_loam"]);
    }

    #[test]
    fn unknown_sample_is_an_error() {
        let lib = SampleLibrary::from_toml_str(LIBRARY).unwrap();
        assert!(matches!(
            lib.get("peat"),
            Err(RosettaError::UnknownSample { .. })
        ));
    }

    #[test]
    fn missing_field_fails_to_parse() {
        let bad = "[loam]\nsand = 40.0\nsilt = 40.0\nclay = 20.0\nbd = 1.4\n";
        assert!(matches!(
            SampleLibrary::from_toml_str(bad),
            Err(RosettaError::Toml(_))
        ));
    }

    #[test]
    fn library_model_key_is_optional() {
        let lib = SampleLibrary::from_toml_str(LIBRARY).unwrap();
        assert_eq!(lib.model("sandy_loam").unwrap(), None);
        assert_eq!(
            lib.model("CLAY").unwrap(),
            Some(PtfModelVariant::SaxtonRawls2006)
        );
        assert!(lib.model("peat").is_err());
    }

    #[test]
    fn library_model_key_matches_variant_keys() {
        for variant in PtfModelVariant::ALL {
            let toml_str = format!(
                "[loam]\nsand = 40.0\nsilt = 40.0\nclay = 20.0\nbd = 1.4\nom = 2.5\nmodel = \"{}\"\n",
                variant.key()
            );
            let lib = SampleLibrary::from_toml_str(&toml_str).unwrap();
            assert_eq!(lib.model("loam").unwrap(), Some(variant));
        }
    }

    #[test]
    fn unknown_model_key_fails_to_parse() {
        let bad = "[loam]\nsand = 40.0\nsilt = 40.0\nclay = 20.0\nbd = 1.4\nom = 2.5\nmodel = \"rosetta3\"\n";
        assert!(matches!(
            SampleLibrary::from_toml_str(bad),
            Err(RosettaError::Toml(_))
        ));
    }

    #[test]
    fn overrides_replace_only_given_fields() {
        let lib = SampleLibrary::from_toml_str(LIBRARY).unwrap();
        let base = lib.get("clay").unwrap();
        let overrides = SampleOverrides {
            clay: Some(35.0),
            om: Some(0.0),
            ..SampleOverrides::default()
        };
        let s = overrides.apply(base);
        assert_eq!(s, SoilSample::new(20.0, 20.0, 35.0, 1.3, 0.0));
        assert_eq!(SampleOverrides::default().apply(base), base);
    }
}
