//! Static reference table: Implementation of ReferenceData.
//!
//! Ships with built-in guidance for the tomato diseases the bundled model
//! knows about. A `reference.json` in the model directory replaces it:
//!
//! ```json
//! {"late-blight": {"treatment": "...", "prevention": "..."}}
//! ```

use std::collections::HashMap;

use crate::domain::{CareAdvice, HEALTHY, NO_MATCH};
use crate::ports::ReferenceData;

/// Built-in (disease, treatment, prevention) rows.
const BUILTIN: &[(&str, &str, &str)] = &[
    (
        "early-blight",
        "Use copper-based fungicide. Remove affected leaves.",
        "Avoid overhead watering and rotate crops annually.",
    ),
    (
        "late-blight",
        "Apply fungicides with chlorothalonil. Remove infected plants.",
        "Avoid wet conditions. Use resistant tomato varieties.",
    ),
    (
        "septoria-leaf-spot",
        "Spray with copper fungicide weekly until controlled.",
        "Use disease-free seeds and practice crop rotation.",
    ),
    (
        "bacterial-spot",
        "Use copper-based bactericide. Remove infected plants.",
        "Avoid working with wet plants and sanitize tools.",
    ),
    (
        "tomato-mosaic-virus",
        "No chemical cure. Remove and destroy infected plants immediately.",
        "Sanitize tools regularly. Use virus-free seeds.",
    ),
    (
        "leaf-mold",
        "Improve air circulation. Use approved fungicides (e.g., chlorothalonil).",
        "Ventilate greenhouses. Avoid high humidity.",
    ),
    (
        "powdery-mildew",
        "Apply sulfur-based or copper-based fungicides.",
        "Ensure good air circulation and avoid excess nitrogen fertilization.",
    ),
    (
        "bacterial-canker",
        "Remove and destroy infected plants. Use copper sprays for management.",
        "Plant certified disease-free seeds/transplants. Strict sanitation.",
    ),
    (
        "fusarium-wilt",
        "No cure. Remove infected plants. Solarize soil.",
        "Use Fusarium wilt-resistant varieties (look for 'F' on labels).",
    ),
    (
        "verticillium-wilt",
        "No chemical cure. Remove and destroy infected plants.",
        "Use Verticillium wilt-resistant varieties (look for 'V' on labels).",
    ),
    (
        "alternaria-leaf-spot",
        "Use fungicides containing chlorothalonil.",
        "Practice crop rotation. Ensure adequate plant spacing.",
    ),
    (
        "damping-off",
        "Apply a fungicide drench to the soil surface.",
        "Use sterile potting mix and avoid overwatering seedlings.",
    ),
    (
        "tomato-yellow-leaf-curl-virus",
        "No cure. Remove and destroy infected plants.",
        "Control whiteflies (the vector) using insecticides or netting.",
    ),
    (
        "pith-necrosis",
        "No chemical treatment. Prune affected stems to promote recovery.",
        "Avoid excessive nitrogen fertilization and high humidity.",
    ),
    (
        "root-knot-nematode",
        "Soil solarization or application of biological nematicides.",
        "Plant resistant varieties or practice crop rotation with non-hosts.",
    ),
    (
        "blossom-end-rot",
        "Apply calcium foliar sprays immediately. Adjust soil pH.",
        "Ensure consistent watering and proper soil calcium levels.",
    ),
    (
        "southern-blight",
        "Remove infected plants and apply fungicides to the soil.",
        "Deep plowing or soil solarization to reduce fungal spores.",
    ),
    (
        "gray-leaf-spot",
        "Apply fungicides like chlorothalonil or maneb.",
        "Rotate crops and use drip irrigation.",
    ),
    (
        "sunscald",
        "Protect fruit from direct, intense sun (e.g., shade cloth).",
        "Maintain healthy foliage to provide natural shade.",
    ),
    (
        "tomato-rust",
        "Use copper or sulfur fungicides.",
        "Improve air circulation and reduce humidity.",
    ),
    (
        HEALTHY,
        "Maintain regular watering and fertilization schedule.",
        "Monitor plants weekly for early signs of disease.",
    ),
    (NO_MATCH, "Monitor closely.", "Re-check symptoms."),
];

/// Immutable disease → care advice table.
#[derive(Debug, Clone, Default)]
pub struct StaticReferenceTable {
    entries: HashMap<String, CareAdvice>,
}

impl StaticReferenceTable {
    /// The built-in guidance table.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .map(|(disease, treatment, prevention)| {
                (disease.to_string(), CareAdvice::new(*treatment, *prevention))
            })
            .collect()
    }

    /// Parse a table from JSON (`{disease: {treatment, prevention}}`).
    ///
    /// # Errors
    /// Returns a JSON error if the document does not have that shape.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        let entries: HashMap<String, CareAdvice> = serde_json::from_str(text)?;
        Ok(Self { entries })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, CareAdvice)> for StaticReferenceTable {
    fn from_iter<I: IntoIterator<Item = (String, CareAdvice)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl ReferenceData for StaticReferenceTable {
    fn lookup(&self, disease: &str) -> CareAdvice {
        self.entries
            .get(disease)
            .cloned()
            .unwrap_or_else(CareAdvice::placeholder)
    }
}
