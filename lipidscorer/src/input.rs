use std::io;

use serde::{Deserialize, Serialize};

use lipidscore::{Annotation, IonizationMode, Lipid, Peak};

/// One annotation as it appears in the input document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub lipid: Lipid,
    pub mz: f64,
    pub intensity: f64,
    pub rt_min: f64,
    #[serde(default)]
    pub ionization_mode: IonizationMode,
    #[serde(default)]
    pub peaks: Vec<Peak>,
    /// An adduct hypothesis that takes the place of detection
    #[serde(default)]
    pub adduct: Option<String>,
}

impl From<AnnotationRecord> for Annotation {
    fn from(value: AnnotationRecord) -> Self {
        let annotation = Annotation::new(
            value.lipid,
            value.mz,
            value.intensity,
            value.rt_min,
            value.ionization_mode,
            value.peaks,
        );
        match value.adduct {
            Some(adduct) => annotation.with_adduct(adduct),
            None => annotation,
        }
    }
}

/// Read a JSON array of [`AnnotationRecord`]
pub fn read_annotation_records<R: io::Read>(
    reader: R,
) -> Result<Vec<AnnotationRecord>, serde_json::Error> {
    serde_json::from_reader(io::BufReader::new(reader))
}

#[cfg(test)]
mod test {
    use super::*;
    use lipidscore::LipidClass;

    #[test]
    fn test_read_records() {
        let text = r#"[
            {
                "lipid": {"id": 1, "name": "PC 34:1", "formula": "C42H82NO8P",
                          "lipid_class": "PC", "carbon_count": 34, "double_bond_count": 1},
                "mz": 760.5851,
                "intensity": 1e6,
                "rt_min": 6.5,
                "peaks": [{"mz": 782.567, "intensity": 2e5}, {"mz": 760.5851, "intensity": 1e6}]
            },
            {
                "lipid": {"id": 2, "name": "PE 34:1", "formula": "C39H76NO8P",
                          "lipid_class": "PE", "carbon_count": 34, "double_bond_count": 1},
                "mz": 716.5236,
                "intensity": 5e5,
                "rt_min": 6.1,
                "ionization_mode": "negative",
                "adduct": "[M+H]+"
            }
        ]"#;
        let records = read_annotation_records(text.as_bytes()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].lipid.lipid_class, LipidClass::PC);
        assert_eq!(records[0].ionization_mode, IonizationMode::Positive);
        assert_eq!(records[1].ionization_mode, IonizationMode::Negative);

        let annotations: Vec<Annotation> = records.into_iter().map(Annotation::from).collect();
        assert_eq!(annotations[0].peaks()[0].mz, 760.5851);
        assert_eq!(annotations[0].adduct(), None);
        assert_eq!(annotations[1].adduct(), Some("[M+H]+"));
        assert!(annotations[1].peaks().is_empty());
    }
}
