//! Report View Model
//!
//! Pure derivation of display groupings from an `AnalysisReport`: score
//! banding, document-type labels, project summary lines. Rendering code
//! only reads the resulting `ReportView`; no thresholds live in renderers.

use serde::Serialize;

use aqua_verify_core::{AnalysisReport, ComplianceIssue, Document, DocumentType};

/// Label shown for a missing document whose code is not recognized
pub const MISSING_DOCUMENT_FALLBACK_LABEL: &str = "Document obligatoire";

/// Surface threshold (m²) separating small and large projects
pub const SMALL_PROJECT_THRESHOLD_M2: u32 = 240;

/// Qualitative band of a conformity score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    /// 100 and above
    Excellent,
    /// 75 up to 100
    Good,
    /// 50 up to 75
    Fair,
    /// Below 50
    Poor,
}

impl ScoreBand {
    /// Band for a score; lower bounds are inclusive.
    pub fn from_score(score: f64) -> Self {
        if score >= 100.0 {
            ScoreBand::Excellent
        } else if score >= 75.0 {
            ScoreBand::Good
        } else if score >= 50.0 {
            ScoreBand::Fair
        } else {
            ScoreBand::Poor
        }
    }

    /// Palette name used for the score and progress bar.
    pub fn color(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "emerald",
            ScoreBand::Good => "amber",
            ScoreBand::Fair => "orange",
            ScoreBand::Poor => "red",
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreBand::Excellent => write!(f, "excellent"),
            ScoreBand::Good => write!(f, "good"),
            ScoreBand::Fair => write!(f, "fair"),
            ScoreBand::Poor => write!(f, "poor"),
        }
    }
}

/// A conformant or non-conformant document ready for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentView {
    pub document: Document,
    pub type_label: String,
    /// Rounded percentage; `None` when the backend reported no confidence
    pub confidence_percent: Option<u32>,
}

/// An expected document the backend did not find
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingDocumentView {
    pub code: String,
    pub label: String,
}

/// Display-ready form of an analysis report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportView {
    pub score: f64,
    pub score_display: String,
    pub band: ScoreBand,
    /// Palette name for the band, e.g. "amber"
    pub color: &'static str,
    pub total_documents: u32,
    /// e.g. "3 documents analysés"
    pub documents_caption: String,
    /// Empty when the backend extracted no surface, address or reference
    pub project_summary: Vec<String>,
    pub conformes: Vec<DocumentView>,
    pub non_conformes: Vec<DocumentView>,
    pub manquants: Vec<MissingDocumentView>,
    pub compliance_issues: Vec<ComplianceIssue>,
}

impl ReportView {
    pub fn has_project_summary(&self) -> bool {
        !self.project_summary.is_empty()
    }

    pub fn has_compliance_issues(&self) -> bool {
        !self.compliance_issues.is_empty()
    }
}

/// Derive the display model for a report. Same input, same output.
pub fn derive_view(report: &AnalysisReport) -> ReportView {
    let band = ScoreBand::from_score(report.conformity_score);
    ReportView {
        score: report.conformity_score,
        score_display: report.score_display(),
        band,
        color: band.color(),
        total_documents: report.total_documents,
        documents_caption: documents_caption(report.total_documents),
        project_summary: project_summary(report),
        conformes: report.documents_conformes.iter().map(document_view).collect(),
        non_conformes: report
            .documents_non_conformes
            .iter()
            .map(document_view)
            .collect(),
        manquants: report
            .documents_manquants
            .iter()
            .map(|code| missing_document_view(code))
            .collect(),
        compliance_issues: report.compliance_issues.clone(),
    }
}

fn document_view(document: &Document) -> DocumentView {
    let percent = (document.confidence * 100.0).round();
    DocumentView {
        type_label: document.document_type.label().to_string(),
        confidence_percent: if document.confidence > 0.0 {
            Some(percent.clamp(0.0, 100.0) as u32)
        } else {
            None
        },
        document: document.clone(),
    }
}

fn missing_document_view(code: &str) -> MissingDocumentView {
    let doc_type = DocumentType::from(code);
    MissingDocumentView {
        code: code.to_string(),
        label: doc_type
            .known_label()
            .unwrap_or(MISSING_DOCUMENT_FALLBACK_LABEL)
            .to_string(),
    }
}

fn documents_caption(total: u32) -> String {
    let plural = if total > 1 { "s" } else { "" };
    format!("{} document{} analysé{}", total, plural, plural)
}

fn project_summary(report: &AnalysisReport) -> Vec<String> {
    let info = &report.project_info;
    if info.is_empty() {
        return Vec::new();
    }
    let mut lines = Vec::new();

    if let Some(surface) = info.surface_m2.filter(|s| *s > 0.0) {
        let size = match info.is_small_project {
            Some(true) => format!(" (< {} m² - petit projet)", SMALL_PROJECT_THRESHOLD_M2),
            Some(false) => format!(" (≥ {} m² - gros projet)", SMALL_PROJECT_THRESHOLD_M2),
            None => String::new(),
        };
        lines.push(format!(
            "Surface : {} m²{}",
            aqua_verify_core::format_score(surface),
            size
        ));
    }
    if let Some(address) = info.address.as_deref().filter(|a| !a.trim().is_empty()) {
        lines.push(format!("Adresse : {}", address));
    }
    if let Some(reference) = info.reference.as_deref().filter(|r| !r.trim().is_empty()) {
        lines.push(format!("Référence : {}", reference));
    }

    lines
}
