//! Report View Integration Tests
//!
//! Backend JSON decoded into `AnalysisReport` and derived for display.

use aqua_verify::render::render_report;
use aqua_verify::services::report_view::{derive_view, ScoreBand, MISSING_DOCUMENT_FALLBACK_LABEL};
use aqua_verify::AnalysisReport;

use crate::support::report_json;

#[test]
fn test_backend_report_derives_full_view() {
    let report: AnalysisReport = serde_json::from_str(&report_json(80.0)).unwrap();
    let view = derive_view(&report);

    assert_eq!(view.score_display, "80");
    assert_eq!(view.band, ScoreBand::Good);
    assert_eq!(view.conformes.len(), 2);
    assert_eq!(view.conformes[0].type_label, "Plan de masse");
    assert_eq!(view.conformes[1].confidence_percent, Some(81));
    assert_eq!(view.manquants[0].code, "PC1");
    assert_ne!(view.manquants[0].label, MISSING_DOCUMENT_FALLBACK_LABEL);
    assert_eq!(
        view.project_summary,
        vec![
            "Surface : 180 m² (< 240 m² - petit projet)".to_string(),
            "Référence : PC 071 076 24 00012".to_string(),
        ]
    );
    assert!(!view.has_compliance_issues());
}

#[test]
fn test_minimal_report_tolerates_missing_sections() {
    let report: AnalysisReport = serde_json::from_str(
        r#"{
            "project_info": null,
            "documents_conformes": [],
            "documents_non_conformes": [
                {"filename": "scan.pdf", "document_type": "ZZZ", "status": "non_conforme", "confidence": 0.2, "issues": ["Illisible"]}
            ],
            "documents_manquants": ["XYZ"],
            "total_documents": 1,
            "conformity_score": 0
        }"#,
    )
    .unwrap();

    let view = derive_view(&report);

    assert_eq!(view.band, ScoreBand::Poor);
    assert!(!view.has_project_summary());
    assert_eq!(view.non_conformes[0].type_label, "ZZZ");
    assert_eq!(view.manquants[0].label, MISSING_DOCUMENT_FALLBACK_LABEL);

    let text = render_report(&view);
    assert!(text.contains("✗ scan.pdf - ZZZ (20%)"));
    assert!(text.contains("- Illisible"));
    assert!(text.contains("• XYZ - Document obligatoire"));
}

#[test]
fn test_compliance_issues_pass_through_in_order() {
    let report: AnalysisReport = serde_json::from_str(
        r#"{
            "documents_conformes": [],
            "documents_non_conformes": [],
            "documents_manquants": [],
            "total_documents": 0,
            "conformity_score": 100,
            "compliance_issues": [
                {"code": "A", "title": "Premier", "message": "m1", "severity": "error", "related_documents": null},
                {"title": "Second", "message": "m2", "severity": "info"}
            ]
        }"#,
    )
    .unwrap();

    let view = derive_view(&report);

    assert_eq!(view.band, ScoreBand::Excellent);
    let titles: Vec<_> = view.compliance_issues.iter().map(|i| i.title.as_str()).collect();
    assert_eq!(titles, vec!["Premier", "Second"]);
    assert!(view.compliance_issues[0].related_documents.is_empty());
}
