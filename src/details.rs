// 🗂️ Detail Sorter - Breach details, most recent first
//
// Records carry typed dates, so a malformed date is rejected when the record
// is built (ProfileBuilder::detail_record), never here.

use crate::model::DetailRecord;

#[derive(Debug, Clone, Default)]
pub struct DetailSorter;

impl DetailSorter {
    /// Breach date descending; equal dates keep their input order
    pub fn sort(mut records: Vec<DetailRecord>) -> Vec<DetailRecord> {
        // sort_by is stable
        records.sort_by(|a, b| b.breach_date.cmp(&a.breach_date));
        records
    }
}
