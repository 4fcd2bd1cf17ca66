//! Class helpers that map domain states onto the stylesheet's palette.

use crate::domain::{RiskLevel, Severity};

// ============================================
// BADGES
// ============================================

pub fn risk_badge(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => "badge badge-good",
        RiskLevel::Medium => "badge badge-warn",
        RiskLevel::High | RiskLevel::Critical => "badge badge-bad",
        RiskLevel::Unknown => "badge badge-muted",
    }
}

pub fn severity_badge(severity: Severity) -> &'static str {
    match severity {
        Severity::Critical => "badge badge-bad",
        Severity::Warning => "badge badge-warn",
        Severity::Info => "badge badge-info",
    }
}

pub fn severity_row(severity: Severity, read: bool, selected: bool) -> String {
    let accent = match severity {
        Severity::Critical => "row-bad",
        Severity::Warning => "row-warn",
        Severity::Info => "row-info",
    };
    let mut class = format!("alert-row {accent}");
    if !read {
        class.push_str(" unread");
    }
    if selected {
        class.push_str(" selected");
    }
    class
}

/// Vendor trust score, 0..=1.
pub fn trust_badge(score: f32) -> &'static str {
    match score {
        s if s >= 0.75 => "badge badge-good",
        s if s >= 0.45 => "badge badge-warn",
        _ => "badge badge-bad",
    }
}

// ============================================
// BUTTONS / NAV
// ============================================

pub fn nav_item(active: bool) -> &'static str {
    if active {
        "nav-item active"
    } else {
        "nav-item"
    }
}

pub fn chip(active: bool) -> &'static str {
    if active {
        "chip active"
    } else {
        "chip"
    }
}

// ============================================
// TEXT
// ============================================

/// Green for money saved, red for money lost.
pub fn delta_text(delta: f64) -> &'static str {
    if delta > 0.0 {
        "text-good"
    } else if delta < 0.0 {
        "text-bad"
    } else {
        "text-muted"
    }
}
