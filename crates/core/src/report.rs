//! Analysis Report Types
//!
//! Wire types returned by `POST /analyze`. Field names follow the backend
//! JSON exactly; optional sections default to empty so older backends that
//! omit them still decode.

use serde::{Deserialize, Serialize};

/// Kind of urbanism application. Selects the backend ruleset only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CaseType {
    /// Permis de construire
    #[default]
    PC,
    /// Permis d'aménager
    PA,
}

impl CaseType {
    /// Query-parameter value.
    pub fn as_str(&self) -> &'static str {
        match self {
            CaseType::PC => "PC",
            CaseType::PA => "PA",
        }
    }

    /// Human-readable French label.
    pub fn label(&self) -> &'static str {
        match self {
            CaseType::PC => "Permis de construire",
            CaseType::PA => "Permis d'aménager",
        }
    }
}

impl std::fmt::Display for CaseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for CaseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PC" => Ok(CaseType::PC),
            "PA" => Ok(CaseType::PA),
            _ => Err(format!("Unknown case type: {}", s)),
        }
    }
}

/// Case-file artifact kinds recognized by the backend.
///
/// Codes outside the known set decode to `Unknown` and keep their raw value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DocumentType {
    Pc1,
    Pc2,
    Pc3,
    Pc4,
    Pc5,
    Pc6,
    Pc7,
    Pc8,
    Cerfa,
    AvisEp,
    AvisDea,
    Dpc,
    CoupeBassin,
    Autre,
    Unknown(String),
}

impl DocumentType {
    /// Wire code, e.g. `"PC2"` or `"AVIS_EP"`.
    pub fn code(&self) -> &str {
        match self {
            DocumentType::Pc1 => "PC1",
            DocumentType::Pc2 => "PC2",
            DocumentType::Pc3 => "PC3",
            DocumentType::Pc4 => "PC4",
            DocumentType::Pc5 => "PC5",
            DocumentType::Pc6 => "PC6",
            DocumentType::Pc7 => "PC7",
            DocumentType::Pc8 => "PC8",
            DocumentType::Cerfa => "CERFA",
            DocumentType::AvisEp => "AVIS_EP",
            DocumentType::AvisDea => "AVIS_DEA",
            DocumentType::Dpc => "DPC",
            DocumentType::CoupeBassin => "COUPE_BASSIN",
            DocumentType::Autre => "AUTRE",
            DocumentType::Unknown(code) => code,
        }
    }

    /// French display label. `None` for codes the client does not know.
    pub fn known_label(&self) -> Option<&'static str> {
        let label = match self {
            DocumentType::Pc1 => "Plan de situation",
            DocumentType::Pc2 => "Plan de masse",
            DocumentType::Pc3 => "Plan en coupe",
            DocumentType::Pc4 => "Notice descriptive",
            DocumentType::Pc5 => "Plan des façades",
            DocumentType::Pc6 => "Document d'insertion",
            DocumentType::Pc7 => "Photo env. proche",
            DocumentType::Pc8 => "Photo paysage lointain",
            DocumentType::Cerfa => "Formulaire CERFA",
            DocumentType::AvisEp => "Avis Eaux Pluviales",
            DocumentType::AvisDea => "Avis DEA",
            DocumentType::Dpc => "DPC",
            DocumentType::CoupeBassin => "Coupe bassin",
            DocumentType::Autre => "Autre document",
            DocumentType::Unknown(_) => return None,
        };
        Some(label)
    }

    /// Display label, falling back to the raw code.
    pub fn label(&self) -> &str {
        match self.known_label() {
            Some(label) => label,
            None => self.code(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, DocumentType::Unknown(_))
    }
}

impl From<String> for DocumentType {
    fn from(code: String) -> Self {
        match code.as_str() {
            "PC1" => DocumentType::Pc1,
            "PC2" => DocumentType::Pc2,
            "PC3" => DocumentType::Pc3,
            "PC4" => DocumentType::Pc4,
            "PC5" => DocumentType::Pc5,
            "PC6" => DocumentType::Pc6,
            "PC7" => DocumentType::Pc7,
            "PC8" => DocumentType::Pc8,
            "CERFA" => DocumentType::Cerfa,
            "AVIS_EP" => DocumentType::AvisEp,
            "AVIS_DEA" => DocumentType::AvisDea,
            "DPC" => DocumentType::Dpc,
            "COUPE_BASSIN" => DocumentType::CoupeBassin,
            "AUTRE" => DocumentType::Autre,
            _ => DocumentType::Unknown(code),
        }
    }
}

impl From<&str> for DocumentType {
    fn from(code: &str) -> Self {
        DocumentType::from(code.to_string())
    }
}

impl From<DocumentType> for String {
    fn from(doc_type: DocumentType) -> String {
        match doc_type {
            DocumentType::Unknown(code) => code,
            known => known.code().to_string(),
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Per-document compliance status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Conforme,
    NonConforme,
    Manquant,
}

impl std::fmt::Display for DocumentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentStatus::Conforme => write!(f, "conforme"),
            DocumentStatus::NonConforme => write!(f, "non_conforme"),
            DocumentStatus::Manquant => write!(f, "manquant"),
        }
    }
}

/// One analyzed document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub filename: String,
    pub document_type: DocumentType,
    pub status: DocumentStatus,
    /// Identification confidence in `[0, 1]`
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    #[serde(default)]
    pub issues: Vec<String>,
}

/// Project facts extracted by the backend. Every field may be absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProjectInfo {
    #[serde(default)]
    pub surface_m2: Option<f64>,
    /// `true` below 240 m²
    #[serde(default)]
    pub is_small_project: Option<bool>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
}

impl ProjectInfo {
    pub fn is_empty(&self) -> bool {
        self.surface_m2.is_none()
            && self.is_small_project.is_none()
            && self.address.is_none()
            && self.reference.is_none()
    }
}

/// Case-file level regulatory problem
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplianceIssue {
    /// Stable rule identifier, e.g. `MISSING_SURFACE`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub title: String,
    pub message: String,
    pub severity: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub related_documents: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<String>,
}

/// Result of one analysis submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_info: ProjectInfo,
    #[serde(default)]
    pub documents_conformes: Vec<Document>,
    #[serde(default)]
    pub documents_non_conformes: Vec<Document>,
    /// Document-type codes the backend expected but did not find
    #[serde(default)]
    pub documents_manquants: Vec<String>,
    pub total_documents: u32,
    /// Percentage in `[0, 100]`
    pub conformity_score: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub compliance_issues: Vec<ComplianceIssue>,
}

impl AnalysisReport {
    /// Conformity score formatted the way the UI prints it (`80`, `87.5`).
    pub fn score_display(&self) -> String {
        format_score(self.conformity_score)
    }
}

/// Print a score without a trailing `.0` for whole numbers.
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 && score.is_finite() {
        format!("{}", score as i64)
    } else {
        format!("{}", score)
    }
}

/// Treat an explicit JSON `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
