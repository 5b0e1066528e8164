#![cfg(feature = "excel_test_writer")]

use demand_ingest::ingestion::{columns, parse_bytes, FileFormat};
use demand_ingest::session::{LoadOutcome, Session};
use demand_ingest::types::Value;

fn demandas_xlsx() -> Vec<u8> {
    use rust_xlsxwriter::Workbook;

    let mut wb = Workbook::new();
    let ws = wb.add_worksheet();

    let headers = [
        "ID da Demanda",
        "Responsável",
        "Status",
        "Data de Criação",
        "Revisões",
    ];
    for (col, header) in headers.iter().enumerate() {
        ws.write_string(0, col as u16, *header).unwrap();
    }

    ws.write_string(1, 0, "1001").unwrap();
    ws.write_string(1, 1, "maria.da.silva@example.com").unwrap();
    ws.write_string(1, 2, "Aberto").unwrap();
    ws.write_string(1, 3, "2024-03-05 14:30:00").unwrap();
    ws.write_number(1, 4, 2).unwrap();

    ws.write_number(2, 0, 1002).unwrap();
    ws.write_string(2, 1, "john.doe@example.com").unwrap();
    ws.write_string(2, 2, "Fechado").unwrap();
    ws.write_string(2, 3, "not-a-date").unwrap();
    ws.write_string(2, 4, "").unwrap();

    wb.save_to_buffer().unwrap()
}

#[test]
fn xlsx_bytes_ingest_through_the_full_pipeline() {
    let output = parse_bytes(&demandas_xlsx(), FileFormat::Xlsx).unwrap();
    let table = &output.table;

    assert_eq!(table.row_count(), 2);
    assert_eq!(output.skipped_rows, 0);

    assert_eq!(
        table.get(0, columns::RESPONSIBLE_NAME),
        Some(&Value::Utf8("Maria da Silva".into()))
    );
    assert_eq!(table.get(0, columns::YEAR), Some(&Value::Int64(2024)));
    assert_eq!(
        table.get(0, columns::MONTH_ABBR),
        Some(&Value::Utf8("Mar".into()))
    );
    assert_eq!(table.get(0, columns::REVISIONS), Some(&Value::Int64(2)));

    // Numeric cell for the id still comes through as text.
    assert_eq!(
        table.get(1, columns::TICKET_ID),
        Some(&Value::Utf8("1002".into()))
    );
    // Unparsable date: temporal fields stay null for that row.
    assert_eq!(table.get(1, columns::YEAR), Some(&Value::Null));
    assert_eq!(table.get(1, columns::REVISIONS), Some(&Value::Int64(0)));
}

#[test]
fn xlsx_upload_goes_through_the_session() {
    let bytes = demandas_xlsx();
    let mut session = Session::new();

    let outcome = session.load_from_upload(&bytes, "demandas.xlsx").unwrap();
    let LoadOutcome::Loaded(summary) = outcome else {
        panic!("expected a fresh load");
    };
    assert_eq!(summary.rows, 2);

    // Re-uploading the identical workbook is a no-op.
    assert_eq!(
        session.load_from_upload(&bytes, "demandas.xlsx").unwrap(),
        LoadOutcome::AlreadyLoaded
    );
    assert_eq!(session.history(10).len(), 1);
}
