use crate::error::Result;
use crate::services::import_service::TEMPLATE_COLUMNS;
use rust_xlsxwriter::*;

pub const TEMPLATE_FILENAME: &str = "candidate_template.xlsx";

/// Example rows shown to recruiters, one entry per template column.
const EXAMPLE_ROWS: [[&str; 12]; 2] = [
    [
        "John Doe",
        "john@example.com",
        "9876543210",
        "Mumbai",
        "3",
        "Software Developer",
        "Tech Corp",
        "Python,Flask,JavaScript",
        "B.Tech Computer Science",
        "8-12 LPA",
        "30 days",
        "Experienced developer with web technologies",
    ],
    [
        "Jane Smith",
        "jane@example.com",
        "9876543211",
        "Delhi",
        "5",
        "Senior Developer",
        "Innovation Ltd",
        "React,Node.js,MongoDB",
        "M.Tech Software Engineering",
        "15-20 LPA",
        "Immediate",
        "Full-stack developer with 5+ years experience",
    ],
];

pub struct TemplateService;

impl TemplateService {
    /// Builds the bulk-upload template workbook in memory.
    pub fn generate_candidate_template() -> Result<Vec<u8>> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Candidates")?;

        let header_format = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(0x0F172A))
            .set_border(FormatBorder::Thin);

        for (col, name) in TEMPLATE_COLUMNS.iter().enumerate() {
            let col = col as u16;
            let width = if *name == "summary" { 45.0 } else { 22.0 };
            worksheet.set_column_width(col, width)?;
            worksheet.write_string_with_format(0, col, *name, &header_format)?;
        }

        for (idx, example) in EXAMPLE_ROWS.iter().enumerate() {
            let row = (idx + 1) as u32;
            for (col, value) in example.iter().enumerate() {
                let col = col as u16;
                // Years go in as a number cell, like a recruiter would type them.
                if TEMPLATE_COLUMNS[col as usize] == "experience_years" {
                    let years: f64 = value.parse().unwrap_or(0.0);
                    worksheet.write_number(row, col, years)?;
                } else {
                    worksheet.write_string(row, col, *value)?;
                }
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}
