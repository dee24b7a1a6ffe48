//! Human-readable rendering of records and reports.

use vrnt_core::StudentRecord;
use vrnt_import::{ImportReport, RowOutcome, SeedReport};
use vrnt_storage::StorageCheckReport;

fn dash(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("-")
}

pub fn print_search_results(records: &[StudentRecord]) {
    if records.is_empty() {
        println!("No students found.");
        return;
    }
    println!("{:<12} {:<36} {:<8} {:<36}", "UID", "NAME", "CATEGORY", "ID");
    println!("{}", "-".repeat(95));
    for record in records {
        println!(
            "{:<12} {:<36} {:<8} {:<36}",
            dash(&record.uid),
            dash(&record.name_aadhar),
            record.category.map(|c| c.as_str()).unwrap_or("-"),
            record.id
        );
    }
    println!("\n{} student(s)", records.len());
}

pub fn print_record(record: &StudentRecord) {
    let rows: [(&str, &Option<String>); 22] = [
        ("UID", &record.uid),
        ("Name (as in Aadhaar)", &record.name_aadhar),
        ("Mobile Number", &record.mobile_number),
        ("Email Address", &record.email_address),
        ("Email ID", &record.email_id),
        ("Aadhaar Number", &record.aadhaar_number),
        ("Date of Birth", &record.date_of_birth),
        ("Father Name", &record.father_name),
        ("Address", &record.address),
        ("Vedham", &record.vedham),
        ("Shaka", &record.shaka),
        ("Gothram", &record.gothram),
        ("Soothram", &record.soothram),
        ("Certified In", &record.certified_in),
        ("Year of Certification", &record.year_of_certification),
        ("School", &record.school),
        ("Veda Adhyapakar Name", &record.veda_adhyapakar_name),
        ("Passport Photo", &record.passport_photo_url),
        ("Certificate", &record.certificate_url),
        ("Aadhaar Card", &record.aadhaar_card_url),
        ("Created", &record.created_at),
        ("Updated", &record.updated_at),
    ];
    println!("{:<22} {}", "ID", record.id);
    for (label, value) in rows {
        println!("{:<22} {}", label, dash(value));
    }
    println!(
        "{:<22} {}",
        "Category",
        record.category.map(|c| c.as_str()).unwrap_or("-")
    );
}

pub fn print_import_report(report: &ImportReport) {
    for row in &report.rows {
        let uid = dash(&row.uid);
        match &row.outcome {
            RowOutcome::Imported { id, documents } => {
                println!("✅ Row {}: {uid} created ({id}), {documents} file(s)", row.row)
            }
            RowOutcome::Failed { reason } => println!("❌ Row {}: {uid} failed: {reason}", row.row),
        }
    }
    println!("\nImport Summary:");
    println!("   Success: {}", report.succeeded);
    println!("   Failed:  {}", report.failed);
    println!("   Total:   {}", report.total());
}

pub fn print_seed_report(report: &SeedReport) {
    if report.added.is_empty() && report.failed.is_empty() {
        println!("All sample students already exist. No new students to add.");
        return;
    }
    println!("Added:   {}", report.added.len());
    println!("Skipped: {}", report.skipped.len());
    if !report.failed.is_empty() {
        println!("Failed:  {} ({})", report.failed.len(), report.failed.join(", "));
    }
}

pub fn print_storage_check(bucket: &str, report: &StorageCheckReport) {
    let mark = |ok: bool| if ok { "✓" } else { "✗" };
    println!("Bucket \"{bucket}\"");
    println!("  {} bucket exists", mark(report.bucket_exists));
    println!("  {} upload", mark(report.can_upload));
    println!("  {} public read", mark(report.can_read));
    println!("  {} cleanup", mark(report.cleaned_up));
    for error in &report.errors {
        println!("  error: {error}");
    }
}
