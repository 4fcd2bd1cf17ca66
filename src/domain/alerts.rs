#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Critical => "CRITICAL",
            Severity::Warning => "WARNING",
            Severity::Info => "INFO",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub id: u32,
    pub severity: Severity,
    pub title: String,
    pub detail: String,
    pub time: String,
    pub read: bool,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AlertFilter {
    #[default]
    All,
    Only(Severity),
}

impl AlertFilter {
    fn admits(&self, alert: &Alert) -> bool {
        match self {
            AlertFilter::All => true,
            AlertFilter::Only(severity) => alert.severity == *severity,
        }
    }
}

/// Page-local notification list.
#[derive(Clone, Debug, PartialEq)]
pub struct AlertFeed {
    alerts: Vec<Alert>,
    pub filter: AlertFilter,
    pub selected: Option<u32>,
}

impl AlertFeed {
    pub fn new(alerts: Vec<Alert>) -> Self {
        let selected = alerts.first().map(|alert| alert.id);
        Self {
            alerts,
            filter: AlertFilter::All,
            selected,
        }
    }

    pub fn visible(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter().filter(|alert| self.filter.admits(alert))
    }

    pub fn unread(&self) -> usize {
        self.alerts.iter().filter(|alert| !alert.read).count()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.alerts
            .iter()
            .filter(|alert| alert.severity == severity)
            .count()
    }

    pub fn selected(&self) -> Option<&Alert> {
        let id = self.selected?;
        self.alerts.iter().find(|alert| alert.id == id)
    }

    /// Selecting an alert also marks it read.
    pub fn select(&mut self, id: u32) {
        if let Some(alert) = self.alerts.iter_mut().find(|alert| alert.id == id) {
            alert.read = true;
            self.selected = Some(id);
        }
    }

    pub fn mark_all_read(&mut self) {
        for alert in &mut self.alerts {
            alert.read = true;
        }
    }
}

impl Default for AlertFeed {
    fn default() -> Self {
        Self::new(sample_alerts())
    }
}

/// Alert thresholds shown beside the feed.
pub const THRESHOLDS: [(&str, &str); 4] = [
    ("Landed cost per shipment", "$15,000"),
    ("Effective duty rate", "10%"),
    ("FX rate AED/USD", "3.70"),
    ("Transit time (days)", "25 days"),
];

pub fn sample_alerts() -> Vec<Alert> {
    let alert = |id, severity, title: &str, detail: &str, time: &str, read| Alert {
        id,
        severity,
        title: title.to_string(),
        detail: detail.to_string(),
        time: time.to_string(),
        read,
    };

    vec![
        alert(1, Severity::Critical, "25% Tariff on HS 8471.30 Effective March 1",
            "New Section 301 tariff will increase your effective duty from 3.5% to 28.5% on all laptops imported from China.",
            "2h ago", false),
        alert(2, Severity::Critical, "Certificate of Origin Expires in 7 Days",
            "Your Form A GSP certificate for shipment #CN-2026-0441 expires Feb 28. Renewal required to keep the 0% preferential rate.",
            "5h ago", false),
        alert(3, Severity::Warning, "Landed Cost Exceeded $15,000 Threshold",
            "Your latest shipment estimate came in at $16,200, $1,200 above your configured cost alert threshold.",
            "Yesterday", false),
        alert(4, Severity::Warning, "AED/USD Rate Alert: 3.74 (above 3.70)",
            "Your FX alert for AED/USD has been triggered. This may affect CIF valuations for UAE-routed shipments.",
            "Yesterday", true),
        alert(5, Severity::Warning, "UN Sanctions List Updated: Re-screening Required",
            "OFAC published 14 new entity additions. Re-run compliance screening for all active supplier relationships.",
            "2d ago", false),
        alert(6, Severity::Info, "GSP Eligibility Reminder: Vietnam Route Available",
            "Your product HS 8471.30 qualifies for 0% duty via the Vietnam GSP route. Current route incurs 3.5%.",
            "3d ago", true),
        alert(7, Severity::Info, "HS 2025 Nomenclature Update: March 1 Deadline",
            "WCO HS 2025 changes may affect your HS classification. Review before the deadline.",
            "3d ago", true),
        alert(8, Severity::Info, "Q1 2026 Compliance Report Ready",
            "Your quarterly trade compliance summary is ready. 94% pass rate across 38 shipments reviewed.",
            "4d ago", true),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_match_fixture() {
        let feed = AlertFeed::default();
        assert_eq!(feed.unread(), 4);
        assert_eq!(feed.count(Severity::Critical), 2);
        assert_eq!(feed.count(Severity::Warning), 3);
        assert_eq!(feed.count(Severity::Info), 3);
        assert_eq!(feed.selected().map(|a| a.id), Some(1));
    }

    #[test]
    fn selecting_marks_read() {
        let mut feed = AlertFeed::default();
        feed.select(3);
        assert_eq!(feed.selected().map(|a| a.id), Some(3));
        assert_eq!(feed.unread(), 3);

        feed.select(99);
        assert_eq!(feed.selected().map(|a| a.id), Some(3));
    }

    #[test]
    fn filter_limits_visible_alerts() {
        let mut feed = AlertFeed::default();
        feed.filter = AlertFilter::Only(Severity::Warning);
        assert!(feed.visible().all(|a| a.severity == Severity::Warning));
        assert_eq!(feed.visible().count(), 3);

        feed.mark_all_read();
        assert_eq!(feed.unread(), 0);
    }
}
