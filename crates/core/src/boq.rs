//! Bill-of-quantities unit conversion.
//!
//! A static table maps trade units (cft, bags, ft, ...) to a standard unit and
//! a multiplicative factor. Uploaded sheets arrive as CSV or as a workbook;
//! every data row is converted independently and problems are reported per
//! row as warnings rather than failing the upload.

use std::io::Cursor;

use calamine::{Data, Reader};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::units::round_to;

/// Decimal places of a converted quantity.
pub const CONVERTED_DECIMALS: i32 = 2;

/// A standard unit and the factor that converts into it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitConversion {
    pub standard_unit: &'static str,
    pub factor: f64,
}

const fn conversion(standard_unit: &'static str, factor: f64) -> UnitConversion {
    UnitConversion {
        standard_unit,
        factor,
    }
}

/// Lowercased unit spelling to its conversion.
const CONVERSIONS: &[(&str, UnitConversion)] = &[
    ("cft", conversion("m³", 0.028_316_8)),
    ("cu ft", conversion("m³", 0.028_316_8)),
    ("ft³", conversion("m³", 0.028_316_8)),
    ("cubic feet", conversion("m³", 0.028_316_8)),
    ("cum", conversion("m³", 1.0)),
    ("m3", conversion("m³", 1.0)),
    ("m³", conversion("m³", 1.0)),
    ("bags", conversion("kg", 50.0)),
    ("kg", conversion("kg", 1.0)),
    ("lbs", conversion("kg", 0.453_592)),
    ("nos", conversion("pcs", 1.0)),
    ("pcs", conversion("pcs", 1.0)),
    ("ft", conversion("m", 0.3048)),
    ("inch", conversion("m", 0.0254)),
    ("yard", conversion("m", 0.9144)),
    ("sq ft", conversion("m²", 0.092_903)),
    ("ft²", conversion("m²", 0.092_903)),
    ("square feet", conversion("m²", 0.092_903)),
    ("gallons", conversion("L", 3.785_41)),
];

/// Look up a unit, ignoring case and surrounding whitespace.
pub fn lookup_unit(unit: &str) -> Option<UnitConversion> {
    let key = unit.trim().to_lowercase();
    CONVERSIONS
        .iter()
        .find(|(spelling, _)| *spelling == key)
        .map(|(_, conversion)| *conversion)
}

// ---------------------------------------------------------------------------
// Rows
// ---------------------------------------------------------------------------

/// One converted BOQ line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoqRow {
    /// 1-based data row number (the header is not counted).
    pub row: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_unit: Option<String>,
    pub converted_quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard_unit: Option<String>,
    pub converted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Convert a quantity given in `unit`.
///
/// Known units are scaled and rounded to two decimals. An unknown or missing
/// unit passes the quantity through unchanged and records a warning.
pub fn convert_row(row: usize, quantity: f64, unit: Option<&str>) -> BoqRow {
    let unit = unit.map(str::trim).filter(|u| !u.is_empty());
    let mut row = BoqRow {
        row,
        description: None,
        quantity,
        original_unit: unit.map(str::to_string),
        converted_quantity: quantity,
        standard_unit: None,
        converted: false,
        warning: None,
    };

    match unit {
        None => row.warning = Some("missing unit".to_string()),
        Some(unit) => match lookup_unit(unit) {
            Some(conversion) => {
                row.converted_quantity = round_to(quantity * conversion.factor, CONVERTED_DECIMALS);
                row.standard_unit = Some(conversion.standard_unit.to_string());
                row.converted = true;
            }
            None => row.warning = Some(format!("unknown unit '{unit}'")),
        },
    }
    row
}

impl BoqRow {
    fn push_warning(&mut self, warning: String) {
        self.warning = Some(match self.warning.take() {
            Some(existing) => format!("{warning}; {existing}"),
            None => warning,
        });
    }
}

// ---------------------------------------------------------------------------
// Sheets
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoqSummary {
    pub total_rows: usize,
    pub converted_rows: usize,
    pub warnings: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoqSheet {
    pub rows: Vec<BoqRow>,
    pub summary: BoqSummary,
}

impl BoqSheet {
    fn from_rows(rows: Vec<BoqRow>) -> Self {
        let summary = BoqSummary {
            total_rows: rows.len(),
            converted_rows: rows.iter().filter(|r| r.converted).count(),
            warnings: rows.iter().filter(|r| r.warning.is_some()).count(),
        };
        Self { rows, summary }
    }
}

/// Column positions resolved from the header row.
struct Columns {
    quantity: usize,
    unit: Option<usize>,
    description: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &[String]) -> CoreResult<Self> {
        if headers.iter().all(|h| h.is_empty()) {
            return Err(CoreError::Parse("BOQ file has no header row".to_string()));
        }
        let position = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
        Ok(Self {
            quantity: position("quantity").unwrap_or(0),
            unit: position("unit"),
            description: position("description"),
        })
    }

    /// Convert one data row. Blank rows yield `None`.
    fn convert(&self, number: usize, record: &[String]) -> Option<BoqRow> {
        if record.iter().all(|field| field.is_empty()) {
            return None;
        }
        let field = |i: usize| record.get(i).map(String::as_str);

        let raw_quantity = field(self.quantity).unwrap_or("");
        let parsed = raw_quantity.parse::<f64>().ok().filter(|q| q.is_finite());
        let unit = self.unit.and_then(field);

        let mut row = convert_row(number, parsed.unwrap_or(0.0), unit);
        row.description = self
            .description
            .and_then(field)
            .filter(|d| !d.is_empty())
            .map(str::to_string);
        if parsed.is_none() {
            row.push_warning(format!("unparseable quantity '{raw_quantity}', using 0"));
        }
        Some(row)
    }
}

// ---------------------------------------------------------------------------
// Readers
// ---------------------------------------------------------------------------

/// Upload formats, told apart by content first and file extension second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoqFormat {
    Csv,
    /// `.xlsx`, `.xls` or `.ods`; the first sheet is read.
    Workbook,
}

const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const WORKBOOK_EXTENSIONS: [&str; 4] = ["xlsx", "xlsm", "xls", "ods"];

impl BoqFormat {
    pub fn detect(file_name: Option<&str>, data: &[u8]) -> Self {
        if data.starts_with(ZIP_MAGIC) || data.starts_with(OLE_MAGIC) {
            return Self::Workbook;
        }
        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());
        match extension {
            Some(ext) if WORKBOOK_EXTENSIONS.contains(&ext.as_str()) => Self::Workbook,
            _ => Self::Csv,
        }
    }

    pub fn parse(self, data: &[u8]) -> CoreResult<BoqSheet> {
        match self {
            Self::Csv => parse_boq_csv(data),
            Self::Workbook => parse_boq_workbook(data),
        }
    }
}

/// Read an uploaded sheet in whichever format it arrived.
pub fn parse_boq(file_name: Option<&str>, data: &[u8]) -> CoreResult<BoqSheet> {
    BoqFormat::detect(file_name, data).parse(data)
}

/// Read a CSV sheet with a header row and convert every data row.
///
/// Blank lines are skipped. An unparseable quantity becomes 0 with a warning.
/// Malformed CSV fails with [`CoreError::Parse`].
pub fn parse_boq_csv(data: &[u8]) -> CoreResult<BoqSheet> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| CoreError::Parse(format!("Invalid BOQ header row: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();
    let columns = Columns::from_headers(&headers)?;

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let number = index + 1;
        let record =
            record.map_err(|e| CoreError::Parse(format!("Invalid BOQ record {number}: {e}")))?;
        let fields: Vec<String> = record.iter().map(str::to_string).collect();
        rows.extend(columns.convert(number, &fields));
    }

    Ok(BoqSheet::from_rows(rows))
}

/// Read the first sheet of a workbook. Its first row is the header row.
pub fn parse_boq_workbook(data: &[u8]) -> CoreResult<BoqSheet> {
    let mut workbook = calamine::open_workbook_auto_from_rs(Cursor::new(data))
        .map_err(|e| CoreError::Parse(format!("Invalid BOQ workbook: {e}")))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| CoreError::Parse("BOQ workbook has no sheets".to_string()))?
        .map_err(|e| CoreError::Parse(format!("Invalid BOQ worksheet: {e}")))?;

    let mut records = range
        .rows()
        .map(|cells| cells.iter().map(cell_text).collect::<Vec<String>>());
    let headers = records
        .next()
        .ok_or_else(|| CoreError::Parse("BOQ file has no header row".to_string()))?;
    let columns = Columns::from_headers(&headers)?;

    let rows = records
        .enumerate()
        .filter_map(|(index, record)| columns.convert(index + 1, &record))
        .collect();
    Ok(BoqSheet::from_rows(rows))
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(text) => text.trim().to_string(),
        other => other.to_string(),
    }
}
