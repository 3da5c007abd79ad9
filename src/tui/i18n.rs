//! Interface labels in English and Spanish.

/// Display language of the terminal interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    English,
    Spanish,
}

impl Language {
    /// The other language.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::English => Self::Spanish,
            Self::Spanish => Self::English,
        }
    }

    /// Short code shown in the header.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::English => "EN",
            Self::Spanish => "ES",
        }
    }

    #[must_use]
    pub fn labels(self) -> &'static Labels {
        match self {
            Self::English => &ENGLISH,
            Self::Spanish => &SPANISH,
        }
    }
}

/// Every user-visible string of the interface.
#[derive(Debug)]
pub struct Labels {
    pub title: &'static str,
    pub select_symptoms: &'static str,
    pub results: &'static str,
    pub disease: &'static str,
    pub final_trust: &'static str,
    pub ml_confidence: &'static str,
    pub rule_confidence: &'static str,
    pub tier: &'static str,
    pub treatment: &'static str,
    pub prevention: &'static str,
    pub healthy: &'static str,
    pub no_match: &'static str,
    pub diagnose: &'static str,
    pub toggle: &'static str,
    pub move_cursor: &'static str,
    pub reset: &'static str,
    pub language: &'static str,
    pub exit: &'static str,
    pub selected: &'static str,
    pub degraded: &'static str,
    pub disclaimer: &'static str,
    pub tier_high: &'static str,
    pub tier_medium: &'static str,
    pub tier_low: &'static str,
}

static ENGLISH: Labels = Labels {
    title: "Hybrid Tomato Disease Diagnoser",
    select_symptoms: "Select Symptoms Observed",
    results: "Diagnosis Results",
    disease: "Disease Name",
    final_trust: "FTS",
    ml_confidence: "ML",
    rule_confidence: "Rules",
    tier: "Tier",
    treatment: "Treatment",
    prevention: "Prevention",
    healthy: "Healthy",
    no_match: "No matching disease found",
    diagnose: "Diagnose",
    toggle: "Select",
    move_cursor: "Move",
    reset: "Reset",
    language: "Español",
    exit: "Exit",
    selected: "selected",
    degraded: "Partial evidence: unavailable source",
    disclaimer: "DISCLAIMER: Indicative estimates only. Confirm with a plant pathologist or extension service before treating.",
    tier_high: "high",
    tier_medium: "medium",
    tier_low: "low",
};

static SPANISH: Labels = Labels {
    title: "Herramienta de Diagnóstico de Enfermedades del Tomate",
    select_symptoms: "Seleccionar Síntomas Observados",
    results: "Resultados del Diagnóstico",
    disease: "Nombre de la Enfermedad",
    final_trust: "FTS",
    ml_confidence: "ML",
    rule_confidence: "Reglas",
    tier: "Nivel",
    treatment: "Tratamiento",
    prevention: "Prevención",
    healthy: "Sana",
    no_match: "No se encontró ninguna enfermedad coincidente",
    diagnose: "Diagnosticar",
    toggle: "Marcar",
    move_cursor: "Mover",
    reset: "Reiniciar",
    language: "English",
    exit: "Salir",
    selected: "seleccionados",
    degraded: "Evidencia parcial: fuente no disponible",
    disclaimer: "AVISO: Estimaciones orientativas. Confirme con un fitopatólogo o servicio de extensión antes de tratar.",
    tier_high: "alto",
    tier_medium: "medio",
    tier_low: "bajo",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        assert_eq!(Language::English.toggled(), Language::Spanish);
        assert_eq!(Language::English.toggled().toggled(), Language::English);
    }

    #[test]
    fn test_labels_differ_by_language() {
        assert_eq!(Language::English.labels().diagnose, "Diagnose");
        assert_eq!(Language::Spanish.labels().diagnose, "Diagnosticar");
        assert_ne!(
            Language::English.labels().no_match,
            Language::Spanish.labels().no_match
        );
    }
}
