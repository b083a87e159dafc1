//! Item remarks with an embedded audit trail
//!
//! Remarks are stored as a single text field whose segments are joined with
//! `" | "`. Each segment is either free text entered by a user or an audit
//! line written by a stock transaction:
//!
//! ```text
//! Keep away from sunlight | [2024-03-01 10:15:00] Issued 3 (office) | [2024-03-02 09:00:00] Received 10 (PO-17)
//! ```
//!
//! Parsing is lossless: text only becomes an [`AuditEntry`] when rendering
//! that entry reproduces it byte for byte, so
//! `Remarks::parse(s).to_string() == s` for every input. A reason may contain
//! the separator itself; such an entry spans several split pieces.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::entities::item::format_timestamp;

/// Separator placed between remark segments in the stored text
pub const SEPARATOR: &str = " | ";

/// Characters trimmed from the ends of the remarks text when appending
const TRIM_CHARS: &[char] = &[' ', '|'];

/// Stock movement recorded in an audit line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Issued,
    Received,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Issued => write!(f, "Issued"),
            Action::Received => write!(f, "Received"),
        }
    }
}

impl FromStr for Action {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Issued" => Ok(Action::Issued),
            "Received" => Ok(Action::Received),
            _ => Err(format!("Unknown stock action: {}", s)),
        }
    }
}

/// One transaction line in an item's remarks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEntry {
    /// Timestamp text as written, `YYYY-MM-DD HH:MM:SS`
    pub timestamp: String,
    pub action: Action,
    pub qty: u32,
    pub reason: String,
}

impl AuditEntry {
    pub fn new(now: NaiveDateTime, action: Action, qty: u32, reason: impl Into<String>) -> Self {
        Self {
            timestamp: format_timestamp(now),
            action,
            qty,
            reason: reason.into(),
        }
    }

    /// Parse a single remarks segment, returning `None` for free text
    pub fn parse(segment: &str) -> Option<Self> {
        let rest = segment.strip_prefix('[')?;
        let (timestamp, rest) = rest.split_once("] ")?;
        let (action, rest) = rest.split_once(' ')?;
        let (qty, rest) = rest.split_once(" (")?;
        let reason = rest.strip_suffix(')')?;

        let entry = Self {
            timestamp: timestamp.to_string(),
            action: action.parse().ok()?,
            qty: qty.parse().ok()?,
            reason: reason.to_string(),
        };

        // "+3", "03" and friends parse but would not render back identically
        (entry.to_string() == segment).then_some(entry)
    }
}

impl fmt::Display for AuditEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {} {} ({})",
            self.timestamp, self.action, self.qty, self.reason
        )
    }
}

/// A piece of the remarks text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Note(String),
    Audit(AuditEntry),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Note(text) => f.write_str(text),
            Segment::Audit(entry) => entry.fmt(f),
        }
    }
}

/// Free-text remarks plus the append-only transaction history of an item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Remarks {
    segments: Vec<Segment>,
}

impl Remarks {
    /// Split stored remarks text into notes and audit entries
    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            return Self::default();
        }

        let parts: Vec<&str> = text.split(SEPARATOR).collect();
        let mut segments = Vec::with_capacity(parts.len());
        let mut i = 0;

        while i < parts.len() {
            match Self::parse_entry_at(&parts[i..]) {
                Some((entry, used)) => {
                    segments.push(Segment::Audit(entry));
                    i += used;
                }
                None => {
                    segments.push(Segment::Note(parts[i].to_string()));
                    i += 1;
                }
            }
        }

        Self { segments }
    }

    /// Audit entry starting at `parts[0]`, and how many parts it spans.
    ///
    /// A reason may itself contain the separator, so an entry is retried
    /// against the following parts rejoined with it.
    fn parse_entry_at(parts: &[&str]) -> Option<(AuditEntry, usize)> {
        let first = parts.first()?;
        if !first.starts_with('[') {
            return None;
        }

        let mut candidate = first.to_string();
        for used in 1..=parts.len() {
            if used > 1 {
                candidate.push_str(SEPARATOR);
                candidate.push_str(parts[used - 1]);
            }
            if let Some(entry) = AuditEntry::parse(&candidate) {
                return Some((entry, used));
            }
        }
        None
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Audit entries in the order they were appended
    pub fn entries(&self) -> impl Iterator<Item = &AuditEntry> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Audit(entry) => Some(entry),
            Segment::Note(_) => None,
        })
    }

    /// Free-text segments, skipping blank ones
    pub fn notes(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Note(text) if !text.trim().is_empty() => Some(text.as_str()),
            _ => None,
        })
    }

    /// Append an audit entry.
    ///
    /// The stored text becomes `prior | entry` with leading and trailing
    /// spaces and pipes trimmed, so appending to empty remarks yields just
    /// the entry.
    pub fn push(&mut self, entry: AuditEntry) {
        let prior = self.to_string();
        let prior = prior.trim_start_matches(TRIM_CHARS);

        let mut segments = if prior.is_empty() {
            Vec::new()
        } else {
            Self::parse(prior).segments
        };
        segments.push(Segment::Audit(entry));
        self.segments = segments;
    }
}

impl fmt::Display for Remarks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(SEPARATOR)?;
            }
            segment.fmt(f)?;
        }
        Ok(())
    }
}

impl Serialize for Remarks {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_audit_entry_format() {
        let entry = AuditEntry::new(at(10, 15), Action::Issued, 3, "office");
        assert_eq!(entry.to_string(), "[2024-03-01 10:15:00] Issued 3 (office)");
    }

    #[test]
    fn test_audit_entry_parse() {
        let entry = AuditEntry::parse("[2024-03-01 10:15:00] Received 12 (PO (rush))").unwrap();
        assert_eq!(entry.action, Action::Received);
        assert_eq!(entry.qty, 12);
        assert_eq!(entry.reason, "PO (rush)");
        assert_eq!(entry.timestamp, "2024-03-01 10:15:00");
    }

    #[test]
    fn test_audit_entry_rejects_non_canonical_lines() {
        assert!(AuditEntry::parse("[2024-03-01 10:15:00] Issue 3 (office)").is_none());
        assert!(AuditEntry::parse("[2024-03-01 10:15:00] Issued 03 (office)").is_none());
        assert!(AuditEntry::parse("[2024-03-01 10:15:00] Issued +3 (office)").is_none());
        assert!(AuditEntry::parse("Issued 3 (office)").is_none());
        assert!(AuditEntry::parse("").is_none());
    }

    #[test]
    fn test_parse_is_lossless() {
        let samples = [
            "",
            "plain note",
            "a |  | b",
            " | leading pipe",
            "note | [2024-03-01 10:15:00] Issued 3 (office)",
            "[2024-03-01 10:15:00] Issue 3 (legacy) | [2024-03-01 10:16:00] Received 4 ()",
            "[2024-03-01 10:15:00] Issued 3 (a | b) | tail",
            "[2024-03-01 10:15:00] Issued 3 (open | note",
        ];
        for text in samples {
            assert_eq!(Remarks::parse(text).to_string(), text);
        }
    }

    #[test]
    fn test_reason_containing_separator_stays_one_entry() {
        let mut remarks = Remarks::parse("Keep dry");
        remarks.push(AuditEntry::new(at(9, 0), Action::Issued, 2, "PO 5 | urgent"));
        remarks.push(AuditEntry::new(at(9, 5), Action::Received, 1, "a | b | c"));

        let text = remarks.to_string();
        assert_eq!(
            text,
            "Keep dry | [2024-03-01 09:00:00] Issued 2 (PO 5 | urgent) | [2024-03-01 09:05:00] Received 1 (a | b | c)"
        );

        let reparsed = Remarks::parse(&text);
        assert_eq!(reparsed, remarks);
        let reasons: Vec<&str> = reparsed.entries().map(|e| e.reason.as_str()).collect();
        assert_eq!(reasons, vec!["PO 5 | urgent", "a | b | c"]);
        assert_eq!(reparsed.notes().collect::<Vec<_>>(), vec!["Keep dry"]);
    }

    #[test]
    fn test_unclosed_entry_falls_back_to_notes() {
        let text = "[2024-03-01 09:00:00] Issued 2 (PO 5 | urgent";
        let remarks = Remarks::parse(text);
        assert_eq!(remarks.entries().count(), 0);
        assert_eq!(
            remarks.notes().collect::<Vec<_>>(),
            vec!["[2024-03-01 09:00:00] Issued 2 (PO 5", "urgent"]
        );
        assert_eq!(remarks.to_string(), text);
    }

    #[test]
    fn test_push_onto_empty_remarks() {
        let mut remarks = Remarks::default();
        remarks.push(AuditEntry::new(at(9, 0), Action::Received, 5, "PO-1"));
        assert_eq!(remarks.to_string(), "[2024-03-01 09:00:00] Received 5 (PO-1)");
        assert_eq!(remarks.entries().count(), 1);
    }

    #[test]
    fn test_push_joins_with_separator() {
        let mut remarks = Remarks::parse("Keep dry");
        remarks.push(AuditEntry::new(at(9, 0), Action::Issued, 2, "desk"));
        assert_eq!(
            remarks.to_string(),
            "Keep dry | [2024-03-01 09:00:00] Issued 2 (desk)"
        );
        assert_eq!(remarks.notes().collect::<Vec<_>>(), vec!["Keep dry"]);
    }

    #[test]
    fn test_push_trims_leading_separators() {
        let mut remarks = Remarks::parse(" | ");
        remarks.push(AuditEntry::new(at(9, 0), Action::Issued, 1, "x"));
        assert_eq!(remarks.to_string(), "[2024-03-01 09:00:00] Issued 1 (x)");
    }

    #[test]
    fn test_push_keeps_existing_entries_typed() {
        let mut remarks = Remarks::default();
        remarks.push(AuditEntry::new(at(9, 0), Action::Issued, 1, "a"));
        remarks.push(AuditEntry::new(at(9, 5), Action::Received, 1, "b"));

        let actions: Vec<Action> = remarks.entries().map(|e| e.action).collect();
        assert_eq!(actions, vec![Action::Issued, Action::Received]);
        assert_eq!(Remarks::parse(&remarks.to_string()), remarks);
    }
}
