use std::io::Cursor;

use chrono::NaiveDate;
use docx_rs::{AlignmentType, BreakType, Docx, PageMargin, Paragraph, Pic, Run, RunFonts};
use tracing::warn;

use crate::error::{MenuError, Result};
use crate::menu::StationMenu;
use crate::school::{Meal, School};
use crate::templates;

const TWIPS_PER_INCH: f64 = 1440.0;
const EMU_PER_INCH: f64 = 914_400.0;
const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

#[derive(Debug, Clone, PartialEq)]
pub struct FlyerStyle {
    pub margin_in: f64,
    pub font: String,
    pub title_pt: usize,
    pub subtitle_pt: usize,
    pub station_pt: usize,
    pub item_pt: usize,
    pub disclaimer_pt: usize,
    pub logo_width_in: f64,
}

impl Default for FlyerStyle {
    fn default() -> Self {
        Self {
            margin_in: 0.5,
            font: "Arial".to_string(),
            title_pt: 20,
            subtitle_pt: 14,
            station_pt: 18,
            item_pt: 14,
            disclaimer_pt: 8,
            logo_width_in: 1.5,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Logos {
    pub district: Option<Vec<u8>>,
    pub vendor: Option<Vec<u8>>,
}

impl Logos {
    fn iter(&self) -> impl Iterator<Item = &[u8]> {
        [&self.district, &self.vendor].into_iter().flatten().map(Vec::as_slice)
    }
}

/// Signature plus the complete IHDR chunk (length, type, 13 data bytes, CRC).
const PNG_HEADER_LEN: usize = 33;

/// Pixel size read from a PNG IHDR chunk.
pub fn png_dimensions(bytes: &[u8]) -> Option<(u32, u32)> {
    if bytes.len() < PNG_HEADER_LEN
        || !bytes.starts_with(PNG_MAGIC)
        || &bytes[12..16] != b"IHDR"
    {
        return None;
    }
    let w = u32::from_be_bytes(bytes[16..20].try_into().ok()?);
    let h = u32::from_be_bytes(bytes[20..24].try_into().ok()?);
    (w > 0 && h > 0).then_some((w, h))
}

pub fn flyer_file_name(school: &School, meal: Meal, date: NaiveDate) -> String {
    format!("{}/{}_{}.docx", school.slug, date.format("%Y-%m-%d"), meal.menu_type())
}

pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

fn pt(points: usize) -> usize {
    // docx run sizes are half-points
    points * 2
}

fn centered(run: Run) -> Paragraph {
    Paragraph::new().add_run(run).align(AlignmentType::Center)
}

fn logo_row(logos: &Logos, style: &FlyerStyle) -> Option<Paragraph> {
    let mut para = Paragraph::new().align(AlignmentType::Center);
    let mut any = false;

    for bytes in logos.iter() {
        let Some((w, h)) = png_dimensions(bytes) else {
            warn!(len = bytes.len(), "skipping logo without a complete PNG header");
            continue;
        };
        let width = style.logo_width_in * EMU_PER_INCH;
        let height = width * f64::from(h) / f64::from(w);
        // Pic::new decodes the image and panics on truncated data
        let pic = Pic::new_with_dimensions(bytes.to_vec(), w, h)
            .size(width as u32, height as u32);
        para = para.add_run(Run::new().add_image(pic)).add_run(Run::new().add_text("    "));
        any = true;
    }

    any.then_some(para)
}

/// Build one `.docx` for a school-day: a page per station, each carrying the
/// header block, the station's items and the meal disclaimer.
pub fn render_flyer(
    school: &School,
    meal: Meal,
    date: NaiveDate,
    menu: &StationMenu,
    logos: &Logos,
    style: &FlyerStyle,
) -> Result<Vec<u8>> {
    let margin = (style.margin_in * TWIPS_PER_INCH) as i32;
    let mut doc = Docx::new()
        .page_margin(PageMargin::new().top(margin).bottom(margin).left(margin).right(margin))
        .default_fonts(RunFonts::new().ascii(&style.font).hi_ansi(&style.font).cs(&style.font));

    let subtitle = format!("{} Menu: {}", meal.label(), long_date(date));

    for (i, station) in menu.iter().enumerate() {
        if i > 0 {
            let page_break = Run::new().add_break(BreakType::Page);
            doc = doc.add_paragraph(Paragraph::new().add_run(page_break));
        }

        if let Some(row) = logo_row(logos, style) {
            doc = doc.add_paragraph(row);
        }

        doc = doc
            .add_paragraph(centered(
                Run::new().add_text(&school.name).bold().size(pt(style.title_pt)),
            ))
            .add_paragraph(centered(Run::new().add_text(&subtitle).size(pt(style.subtitle_pt))))
            .add_paragraph(Paragraph::new())
            .add_paragraph(centered(
                Run::new().add_text(station.name.to_uppercase()).bold().size(pt(style.station_pt)),
            ));

        for item in &station.items {
            doc = doc.add_paragraph(centered(Run::new().add_text(item).size(pt(style.item_pt))));
        }

        doc = doc.add_paragraph(Paragraph::new()).add_paragraph(centered(
            Run::new().add_text(templates::disclaimer(meal)).italic().size(pt(style.disclaimer_pt)),
        ));
    }

    let mut buf = Cursor::new(Vec::new());
    doc.build().pack(&mut buf).map_err(|e| MenuError::Render(e.to_string()))?;
    Ok(buf.into_inner())
}
