//! Flat tabular export

use super::dataset::ExportRow;
use super::ExportError;

/// Header line followed by one line per row, `\n`-terminated
pub fn render_csv(rows: &[ExportRow]) -> Result<String, ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(ExportRow::FIELDS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io {
            path: "<memory>".into(),
            source: e.into_error(),
        })?;
    String::from_utf8(bytes).map_err(|e| ExportError::Encoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::loader::sample_rfps;
    use crate::entities::{Rfp, RfpStatus};
    use crate::export::dataset::build_dataset;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn rows() -> Vec<ExportRow> {
        let at = Utc.with_ymd_and_hms(2024, 10, 14, 9, 30, 0).unwrap();
        build_dataset(&sample_rfps().unwrap(), at)
    }

    #[test]
    fn test_header_then_one_line_per_row() {
        let csv = render_csv(&rows()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 9);
        assert_eq!(lines[0], ExportRow::FIELDS.join(","));
        assert!(csv.ends_with('\n'));
    }

    #[test]
    fn test_row_rendering() {
        let csv = render_csv(&rows()).unwrap();
        let first = csv.lines().nth(1).unwrap();
        assert_eq!(
            first,
            "RFP001,ABC Corp,Gears,Sales_A,Fulfilled,2024-10-01,2024-10-03,2024-10-06,2024-10-12,\
             15000,15000,2,3,6,11,true,false,false,100,true,true,true,Fast,Fast,Q4 2024,October 2024,\
             40,3,67,2024-10-14T09:30:00.000Z,1.0"
        );

        let second = csv.lines().nth(2).unwrap();
        assert!(second.starts_with(
            "RFP002,Delta Inc,Bearings,Sales_B,Quotation Pending,2024-10-02,N/A,N/A,N/A,0,0,N/A,N/A,N/A,N/A,"
        ));
    }

    #[test]
    fn test_values_with_separators_are_quoted() {
        let rfp = Rfp::new(
            "RFP050",
            "Smith, Jones & \"Sons\"",
            "Gears",
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            RfpStatus::QuotationPending,
            "Sales_A",
        );
        let at = Utc.with_ymd_and_hms(2024, 10, 14, 0, 0, 0).unwrap();
        let csv = render_csv(&build_dataset(&[rfp], at)).unwrap();

        assert!(csv.contains(r#"RFP050,"Smith, Jones & ""Sons""",Gears"#));
    }

    #[test]
    fn test_empty_rows_yield_header_only() {
        let csv = render_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
