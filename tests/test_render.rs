use std::io::{Cursor, Read};

use chrono::NaiveDate;
use menu_flyers::archive::*;
use menu_flyers::menu::{Filters, extract_day};
use menu_flyers::nutrislice::parse_week;
use menu_flyers::render::*;
use menu_flyers::school::{Meal, School, SchoolLevel};

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
}

fn parkland() -> School {
    School { name: "Parkland High".into(), slug: "parkland".into(), level: SchoolLevel::High }
}

fn document_xml(docx: &[u8]) -> String {
    let mut zip = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut xml = String::new();
    zip.by_name("word/document.xml").unwrap().read_to_string(&mut xml).unwrap();
    xml
}

fn rendered() -> Vec<u8> {
    render_with(&Logos::default()).unwrap()
}

#[test]
fn test_render_flyer_is_docx() {
    let bytes = rendered();
    assert!(bytes.starts_with(b"PK"));
    let xml = document_xml(&bytes);
    assert!(xml.contains("Parkland High"));
}

#[test]
fn test_render_flyer_has_every_station_and_item() {
    let xml = document_xml(&rendered());
    for text in ["MAIN LINE", "DELI", "Cheese Pizza", "Green Beans", "Turkey Sub"] {
        assert!(xml.contains(text), "missing {text}");
    }
    assert!(!xml.contains("Salsa Cup"));
}

#[test]
fn test_render_flyer_has_date_and_disclaimer() {
    let xml = document_xml(&rendered());
    assert!(xml.contains("Lunch Menu: Monday, January 8, 2024"));
    assert!(xml.contains("reimbursable meal"));
}

#[test]
fn test_long_date() {
    assert_eq!(long_date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()), "Friday, March 1, 2024");
}

#[test]
fn test_flyer_file_name() {
    assert_eq!(flyer_file_name(&parkland(), Meal::Breakfast, monday()), "parkland/2024-01-08_breakfast.docx");
}

/// PNG signature, a 300x120 IHDR chunk with zeroed CRC, and no image data.
fn png_header() -> Vec<u8> {
    let mut bytes = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR".to_vec();
    bytes.extend_from_slice(&300u32.to_be_bytes());
    bytes.extend_from_slice(&120u32.to_be_bytes());
    bytes.extend_from_slice(&[8, 6, 0, 0, 0]);
    bytes.extend_from_slice(&[0, 0, 0, 0]);
    bytes
}

fn render_with(logos: &Logos) -> menu_flyers::Result<Vec<u8>> {
    let week = parse_week(include_str!("fixtures/week_lunch.json")).unwrap();
    let filters = Filters::for_audience(SchoolLevel::High, Meal::Lunch);
    let menu = extract_day(week.day(monday()).unwrap(), &filters);
    render_flyer(&parkland(), Meal::Lunch, monday(), &menu, logos, &FlyerStyle::default())
}

#[test]
fn test_png_dimensions() {
    assert_eq!(png_header().len(), 33);
    assert_eq!(png_dimensions(&png_header()), Some((300, 120)));
}

#[test]
fn test_png_dimensions_requires_full_ihdr() {
    assert_eq!(png_dimensions(&png_header()[..24]), None);
    assert_eq!(png_dimensions(&png_header()[..32]), None);
}

#[test]
fn test_png_dimensions_rejects_other_formats() {
    assert_eq!(png_dimensions(b"\xff\xd8\xff\xe0 not a png at all, padded out past 33"), None);
    assert_eq!(png_dimensions(b""), None);
}

#[test]
fn test_render_truncated_logo_is_skipped() {
    let logos = Logos { district: Some(png_header()[..24].to_vec()), vendor: None };
    let xml = document_xml(&render_with(&logos).unwrap());
    assert!(xml.contains("Parkland High"));
    assert!(!xml.contains("<pic:pic"));
}

#[test]
fn test_render_logo_without_image_data_does_not_decode() {
    let logos = Logos { district: Some(png_header()), vendor: Some(b"not a png".to_vec()) };
    let bytes = render_with(&logos).unwrap();
    assert!(document_xml(&bytes).contains("Parkland High"));
}

#[test]
fn test_breakfast_disclaimer_text() {
    use menu_flyers::templates::{BREAKFAST_DISCLAIMER, disclaimer};
    assert_eq!(disclaimer(Meal::Breakfast), BREAKFAST_DISCLAIMER);
    assert!(BREAKFAST_DISCLAIMER.contains("(one (1) can be a fruit juice, and one (1) milk."));
    assert!(BREAKFAST_DISCLAIMER.ends_with("and skim chocolate"));
}

#[test]
fn test_archive_roundtrip_entries() {
    let mut builder = ArchiveBuilder::new();
    builder.add("parkland/2024-01-08_lunch.docx", b"one").unwrap();
    builder.add("parkland/2024-01-09_lunch.docx", b"two").unwrap();
    assert_eq!(builder.len(), 2);

    let bytes = builder.finish().unwrap();
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    assert_eq!(zip.len(), 2);

    let mut body = String::new();
    zip.by_name("parkland/2024-01-09_lunch.docx").unwrap().read_to_string(&mut body).unwrap();
    assert_eq!(body, "two");
}

#[test]
fn test_archive_rejects_duplicate_entry() {
    let mut builder = ArchiveBuilder::new();
    builder.add("a.docx", b"x").unwrap();
    assert!(builder.add("a.docx", b"y").is_err());
    assert_eq!(builder.len(), 1);
}

#[test]
fn test_write_archive_creates_parent_dirs() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("menus.zip");

    let mut builder = ArchiveBuilder::new();
    builder.add("a.docx", b"x").unwrap();
    write_archive(&path, &builder.finish().unwrap()).unwrap();

    assert!(path.exists());
}
