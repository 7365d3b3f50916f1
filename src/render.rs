//! Terminal Rendering
//!
//! Plain-text layout of report views and transcript entries for the CLI.
//! All thresholds and labels come from `ReportView`; this module only lays
//! them out.

use std::fmt::Write;

use aqua_verify_core::{ChatMessage, ChatRole};

use crate::services::chat_format::{render_markdown, MarkdownStyle};
use crate::services::report_view::{DocumentView, ReportView};
use crate::services::upload_session::UploadSnapshot;

const PROGRESS_WIDTH: usize = 20;

fn progress_bar(score: f64) -> String {
    let filled = ((score.clamp(0.0, 100.0) / 100.0) * PROGRESS_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(PROGRESS_WIDTH - filled))
}

fn write_document(out: &mut String, marker: &str, doc: &DocumentView) {
    let _ = write!(out, "  {} {} - {}", marker, doc.document.filename, doc.type_label);
    if let Some(percent) = doc.confidence_percent {
        let _ = write!(out, " ({}%)", percent);
    }
    out.push('\n');
    for issue in &doc.document.issues {
        let _ = writeln!(out, "      - {}", issue);
    }
}

/// Render a report view as terminal text.
pub fn render_report(view: &ReportView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Score de conformité : {}% {} ({})",
        view.score_display,
        progress_bar(view.score),
        view.band
    );
    let _ = writeln!(out, "{}", view.documents_caption);

    if view.has_project_summary() {
        out.push_str("\nProjet\n");
        for line in &view.project_summary {
            let _ = writeln!(out, "  {}", line);
        }
    }

    if !view.conformes.is_empty() {
        let _ = writeln!(out, "\nDocuments conformes ({})", view.conformes.len());
        for doc in &view.conformes {
            write_document(&mut out, "✓", doc);
        }
    }

    if !view.non_conformes.is_empty() {
        let _ = writeln!(out, "\nDocuments non conformes ({})", view.non_conformes.len());
        for doc in &view.non_conformes {
            write_document(&mut out, "✗", doc);
        }
    }

    if !view.manquants.is_empty() {
        let _ = writeln!(out, "\nDocuments manquants ({})", view.manquants.len());
        for missing in &view.manquants {
            let _ = writeln!(out, "  • {} - {}", missing.code, missing.label);
        }
    }

    if view.has_compliance_issues() {
        out.push_str("\nPoints de conformité\n");
        for issue in &view.compliance_issues {
            let _ = writeln!(out, "  [{}] {}", issue.severity, issue.title);
            let _ = writeln!(out, "      {}", issue.message);
            if !issue.related_documents.is_empty() {
                let _ = writeln!(out, "      Documents : {}", issue.related_documents.join(", "));
            }
        }
    }

    out
}

/// Render one transcript entry with a speaker prefix.
pub fn render_chat_entry(message: &ChatMessage, style: MarkdownStyle) -> String {
    let speaker = match message.role {
        ChatRole::User => "Vous",
        ChatRole::Assistant => "Aqua Verify",
    };
    format!("{} > {}", speaker, render_markdown(&message.content, style))
}

/// Render the staged file list.
pub fn render_staged(snapshot: &UploadSnapshot) -> String {
    let mut out = String::new();
    for file in &snapshot.files {
        let _ = writeln!(out, "  {}. {} ({} KB)", file.index + 1, file.filename, file.size_kb);
    }
    out
}
