//! Canonical column names and the header rename pass.
//!
//! Dashboard exports label their columns in Portuguese and not always with
//! consistent casing. A fixed map takes the known labels to canonical
//! snake_case field names; anything outside the map passes through unchanged.

use crate::types::TicketTable;

/// Ticket identifier.
pub const TICKET_ID: &str = "ticket_id";
/// Ticket/demand type.
pub const TICKET_TYPE: &str = "ticket_type";
/// Raw responsible-party name as exported (often an e-mail local part).
pub const RESPONSIBLE: &str = "responsible";
/// Normalized display name derived from [`RESPONSIBLE`].
pub const RESPONSIBLE_NAME: &str = "responsible_name";
/// Ticket status.
pub const STATUS: &str = "status";
/// Creation timestamp.
pub const CREATED_AT: &str = "created_at";
/// Last-modification timestamp.
pub const MODIFIED_AT: &str = "modified_at";
/// Name of the last modifier.
pub const MODIFIED_BY: &str = "modified_by";
/// Ticket priority.
pub const PRIORITY: &str = "priority";
/// Synchronization/reconciliation state.
pub const SYNC_STATE: &str = "sync_state";
/// Owning SRE.
pub const SRE: &str = "sre";
/// Requesting company.
pub const COMPANY: &str = "company";
/// Revision count; coerced to integer, unparsable values become 0.
pub const REVISIONS: &str = "revisions";

/// Derived from [`CREATED_AT`]: year number.
pub const YEAR: &str = "year";
/// Derived from [`CREATED_AT`]: month number (1-12).
pub const MONTH: &str = "month";
/// Derived from [`CREATED_AT`]: month abbreviation.
pub const MONTH_ABBR: &str = "month_abbr";
/// Derived from [`CREATED_AT`]: day of month.
pub const DAY: &str = "day";
/// Derived from [`CREATED_AT`]: hour of day (0-23).
pub const HOUR: &str = "hour";

/// Known source labels (lowercase) and the canonical names they map to.
const RENAME_MAP: &[(&str, &str)] = &[
    ("id da demanda", TICKET_ID),
    ("tipo de demanda", TICKET_TYPE),
    ("responsável", RESPONSIBLE),
    ("status", STATUS),
    ("data de criação", CREATED_AT),
    ("data de modificação", MODIFIED_AT),
    ("modificado por", MODIFIED_BY),
    ("prioridade", PRIORITY),
    ("sincronizado", SYNC_STATE),
    ("sre", SRE),
    ("empresa", COMPANY),
    ("revisões", REVISIONS),
];

/// Canonical name for a source column label, if the label is known.
///
/// Matching trims surrounding whitespace and ignores case.
pub fn canonical_name(label: &str) -> Option<&'static str> {
    let key = label.trim().to_lowercase();
    RENAME_MAP
        .iter()
        .find(|(source, _)| *source == key)
        .map(|(_, canonical)| *canonical)
}

/// Rename every known column in place; unknown columns are left untouched.
pub fn rename_columns(table: &mut TicketTable) {
    for field in &mut table.schema.fields {
        if let Some(canonical) = canonical_name(&field.name) {
            field.name = canonical.to_owned();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_map_case_insensitively() {
        assert_eq!(canonical_name("Responsável"), Some(RESPONSIBLE));
        assert_eq!(canonical_name("RESPONSÁVEL"), Some(RESPONSIBLE));
        assert_eq!(canonical_name("  Data de Criação "), Some(CREATED_AT));
        assert_eq!(canonical_name("sre"), Some(SRE));
    }

    #[test]
    fn unknown_labels_pass_through() {
        assert_eq!(canonical_name("Observações"), None);
    }
}
