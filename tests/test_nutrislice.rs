use std::io::{Read, Write};
use std::net::TcpListener;
use std::thread;

use chrono::NaiveDate;
use menu_flyers::MenuError;
use menu_flyers::nutrislice::*;
use menu_flyers::school::Meal;
use menu_flyers::source::{self, Source};

/// Answers exactly one request with `status` and `body`; returns the base URL.
fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut req: Vec<u8> = Vec::new();
        let mut buf = [0u8; 1024];
        while !req.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            req.extend_from_slice(&buf[..n]);
        }
        let resp = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(resp.as_bytes()).unwrap();
    });
    format!("http://{addr}")
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 8).unwrap()
}

#[test]
fn test_week_url_format() {
    let date = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
    assert_eq!(
        week_url("https://wsfcs.api.nutrislice.com/", "east-forsyth", "lunch", date),
        "https://wsfcs.api.nutrislice.com/menu/api/weeks/school/east-forsyth/menu-type/lunch/2024/01/07/"
    );
}

#[test]
fn test_parse_week_fixture() {
    let week = parse_week(include_str!("fixtures/week_lunch.json")).unwrap();
    assert_eq!(week.days.len(), 4);
    assert!(week.days[2].menu_items.is_empty());
}

#[test]
fn test_parse_week_tolerates_missing_and_null_fields() {
    let week = parse_week(
        r#"{"days": [{"date": "2024-02-05", "menu_items": [
            {"text": null, "is_station_header": null, "food": {"name": null}},
            {"food": {"name": "Tacos"}}
        ]}]}"#,
    )
    .unwrap();
    let items = &week.days[0].menu_items;
    assert!(!items[0].is_header());
    assert_eq!(items[0].food_name(), None);
    assert_eq!(items[1].food_name(), Some("Tacos"));
}

#[test]
fn test_parse_week_null_days() {
    let week = parse_week(r#"{"days": null}"#).unwrap();
    assert!(week.days.is_empty());
}

#[test]
fn test_parse_week_rejects_non_json() {
    assert!(parse_week("<html>maintenance</html>").is_err());
}

#[test]
fn test_week_day_lookup() {
    let week = parse_week(include_str!("fixtures/week_lunch.json")).unwrap();
    assert!(week.day(NaiveDate::from_ymd_opt(2024, 1, 10).unwrap()).is_some());
    assert!(week.day(NaiveDate::from_ymd_opt(2024, 1, 11).unwrap()).is_none());
}

#[test]
fn test_section_title_counts_as_header() {
    let week = parse_week(
        r#"{"days": [{"date": "2024-02-05", "menu_items": [{"text": "Deli", "is_section_title": true}]}]}"#,
    )
    .unwrap();
    assert!(week.days[0].menu_items[0].is_header());
}

#[test]
fn test_fetch_week_non_200_is_http_error() {
    let base = serve_once("404 Not Found", "");
    let client = Client::new(source::agent(), base);

    let err = client.fetch_week("closed-school", Meal::Lunch, monday()).unwrap_err();
    match err {
        MenuError::Http { status, url } => {
            assert_eq!(status, 404);
            assert!(url.ends_with("/school/closed-school/menu-type/lunch/2024/01/08/"), "{url}");
        }
        other => panic!("expected Http error, got {other}"),
    }
}

#[test]
fn test_fetch_week_decodes_body() {
    let base = serve_once("200 OK", include_str!("fixtures/week_lunch.json"));
    let client = Client::new(source::agent(), base);

    let week = client.fetch_week("parkland", Meal::Lunch, monday()).unwrap();
    assert_eq!(week.days.len(), 4);
}

#[test]
fn test_fetch_week_bad_json_is_decode_error() {
    let base = serve_once("200 OK", "<html>maintenance</html>");
    let client = Client::new(source::agent(), base);

    let err = client.fetch_week("parkland", Meal::Breakfast, monday()).unwrap_err();
    assert!(matches!(err, MenuError::Decode(_)), "{err}");
}

#[test]
fn test_source_url_non_200_is_http_error() {
    let base = serve_once("500 Internal Server Error", "oops");
    let src = Source::parse(&format!("{base}/Schools.csv"));

    let err = src.read_bytes(&source::agent()).unwrap_err();
    assert!(matches!(err, MenuError::Http { status: 500, .. }), "{err}");
}
