//! End-to-end tests for the batch pipeline: a ledger CSV and a generated
//! template in a temp dir should come out as loadable statement PDFs with
//! the template's page count.

use std::fs;
use std::path::Path;

use lopdf::{dictionary, Document, Object, Stream};
use pretty_assertions::assert_eq;

use crate::config::Settings;
use crate::run::{self, StatementKind};

fn write_template(path: &Path, pages: usize) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for number in 0..pages {
        let text = format!("BT /F1 12 Tf 50 700 Td (Template page {}) Tj ET", number + 1);
        let content_id = doc.add_object(Stream::new(dictionary! {}, text.into_bytes()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "Contents" => Object::Reference(content_id),
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.save(path).unwrap();
}

fn write_ledger(path: &Path, rows: &str) {
    let csv = format!("Date,Payee,Debit,Credit,Closing Balance\n{}", rows);
    fs::write(path, csv).unwrap();
}

fn settings(dir: &Path, kind: StatementKind) -> Settings {
    Settings {
        ledger: dir.join("ledger.csv"),
        template: dir.join("template.pdf"),
        out_dir: dir.join("out"),
        kind,
        period: None,
        keep_overlays: false,
    }
}

#[test]
fn test_chequing_batch_writes_one_pdf_per_month() {
    let dir = tempfile::tempdir().unwrap();
    write_ledger(
        &dir.path().join("ledger.csv"),
        "2022-03-01,CLIENT PAYMENT,,1500.00,12115.55\n\
         2022-04-02,OFFICE SUPPLY CO,245.10,,11870.45\n",
    );
    write_template(&dir.path().join("template.pdf"), 2);

    let settings = settings(dir.path(), StatementKind::Chequing);
    run::run(&settings).unwrap();

    let march = settings.out_dir.join("chequing_statement_2022_03.pdf");
    let april = settings.out_dir.join("chequing_statement_2022_04.pdf");
    assert!(march.exists(), "March statement missing");
    assert!(april.exists(), "April statement missing");

    let doc = Document::load(&march).unwrap();
    assert_eq!(doc.get_pages().len(), 2, "template page count preserved");
}

#[test]
fn test_months_without_transactions_produce_no_file() {
    let dir = tempfile::tempdir().unwrap();
    write_ledger(
        &dir.path().join("ledger.csv"),
        "2022-03-01,CLIENT PAYMENT,,1500.00,12115.55\n\
         2022-05-10,COURIER SERVICE,38.25,,12077.30\n",
    );
    write_template(&dir.path().join("template.pdf"), 1);

    let settings = settings(dir.path(), StatementKind::Chequing);
    run::run(&settings).unwrap();

    assert!(settings.out_dir.join("chequing_statement_2022_03.pdf").exists());
    assert!(
        !settings.out_dir.join("chequing_statement_2022_04.pdf").exists(),
        "empty April should be skipped"
    );
    assert!(settings.out_dir.join("chequing_statement_2022_05.pdf").exists());
}

#[test]
fn test_single_period_run_generates_only_that_statement() {
    let dir = tempfile::tempdir().unwrap();
    write_ledger(
        &dir.path().join("ledger.csv"),
        "2022-02-26,PAYMENT RECEIVED,,800.00,\n\
         2022-03-10,CLOUD HOSTING,129.99,,\n\
         2022-04-05,COURIER SERVICE,38.25,,\n",
    );
    write_template(&dir.path().join("template.pdf"), 3);

    let mut settings = settings(dir.path(), StatementKind::CreditCard);
    settings.period = Some((2022, 3));
    run::run(&settings).unwrap();

    let march = settings.out_dir.join("credit_card_statement_2022_03.pdf");
    assert!(march.exists());
    assert!(
        !settings.out_dir.join("credit_card_statement_2022_04.pdf").exists(),
        "only the requested period should be generated"
    );

    let doc = Document::load(&march).unwrap();
    assert_eq!(doc.get_pages().len(), 3);
}

#[test]
fn test_missing_template_is_logged_not_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write_ledger(
        &dir.path().join("ledger.csv"),
        "2022-03-01,CLIENT PAYMENT,,1500.00,12115.55\n",
    );
    // No template.pdf on disk

    let settings = settings(dir.path(), StatementKind::Chequing);
    run::run(&settings).unwrap();

    assert!(
        !settings.out_dir.join("chequing_statement_2022_03.pdf").exists(),
        "nothing to write without a template"
    );
}

#[test]
fn test_keep_overlays_writes_the_intermediate_pdf() {
    let dir = tempfile::tempdir().unwrap();
    write_ledger(
        &dir.path().join("ledger.csv"),
        "2022-03-01,CLIENT PAYMENT,,1500.00,12115.55\n",
    );
    write_template(&dir.path().join("template.pdf"), 1);

    let mut settings = settings(dir.path(), StatementKind::Chequing);
    settings.keep_overlays = true;
    run::run(&settings).unwrap();

    let overlay = settings.out_dir.join("overlay_chequing_statement_2022_03.pdf");
    assert!(overlay.exists());

    let doc = Document::load(&overlay).unwrap();
    assert_eq!(doc.get_pages().len(), 1);
}

#[test]
fn test_file_names_follow_kind_and_period() {
    let period = statement_core::StatementPeriod::new(
        statement_core::PeriodScheme::CalendarMonth,
        2022,
        3,
    )
    .unwrap();

    assert_eq!(
        StatementKind::Chequing.file_name(&period),
        "chequing_statement_2022_03.pdf"
    );
    assert_eq!(
        StatementKind::CreditCard.file_name(&period),
        "credit_card_statement_2022_03.pdf"
    );
}

#[test]
fn test_output_directory_is_created() {
    let dir = tempfile::tempdir().unwrap();
    write_ledger(
        &dir.path().join("ledger.csv"),
        "2022-03-01,CLIENT PAYMENT,,1500.00,12115.55\n",
    );
    write_template(&dir.path().join("template.pdf"), 1);

    let mut settings = settings(dir.path(), StatementKind::Chequing);
    settings.out_dir = dir.path().join("deep").join("out");
    run::run(&settings).unwrap();

    assert!(settings.out_dir.join("chequing_statement_2022_03.pdf").exists());
}
