use crate::domain::model::CommodityCode;
use crate::utils::error::Result;
use std::io::Read;
use std::path::Path;

/// Read-only commodity code table, loaded once at startup and shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommodityCatalog {
    codes: Vec<CommodityCode>,
}

impl CommodityCatalog {
    pub fn new(codes: Vec<CommodityCode>) -> Self {
        if codes.is_empty() {
            return Self::placeholder();
        }
        Self { codes }
    }

    /// Used whenever the catalog source is missing or unusable so later
    /// stages always see at least one code.
    pub fn placeholder() -> Self {
        Self {
            codes: vec![CommodityCode::new("915", "CATERING SERVICES")],
        }
    }

    /// 載入 CSV；任何錯誤都回傳 placeholder，不往上拋
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let file = match std::fs::File::open(path) {
            Ok(file) => file,
            Err(e) => {
                tracing::warn!(
                    "⚠️ Catalog '{}' not readable ({}), using placeholder codes",
                    path.display(),
                    e
                );
                return Self::placeholder();
            }
        };

        match Self::parse_csv(file) {
            Ok(codes) if !codes.is_empty() => {
                tracing::info!("📚 Successfully loaded {} commodity codes", codes.len());
                Self { codes }
            }
            Ok(_) => {
                tracing::warn!(
                    "⚠️ Catalog '{}' has no usable rows, using placeholder codes",
                    path.display()
                );
                Self::placeholder()
            }
            Err(e) => {
                tracing::error!("❌ Error loading catalog '{}': {}", path.display(), e);
                Self::placeholder()
            }
        }
    }

    pub fn from_reader<R: Read>(reader: R) -> Self {
        match Self::parse_csv(reader) {
            Ok(codes) => Self::new(codes),
            Err(e) => {
                tracing::error!("❌ Error parsing catalog: {}", e);
                Self::placeholder()
            }
        }
    }

    /// Columns are class, item, description; the header row is skipped and
    /// rows with fewer than three columns are ignored.
    fn parse_csv<R: Read>(reader: R) -> Result<Vec<CommodityCode>> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut codes = Vec::new();
        for row in csv_reader.records() {
            let row = row?;
            if row.len() < 3 {
                continue;
            }
            let class = row.get(0).unwrap_or_default().trim();
            let item = row.get(1).unwrap_or_default().trim();
            let description = row.get(2).unwrap_or_default().trim();
            codes.push(CommodityCode::new(format!("{}-{}", class, item), description));
        }

        Ok(codes)
    }

    pub fn codes(&self) -> &[CommodityCode] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// One `code: description` line per entry, embedded verbatim in prompts.
    pub fn render_as_text(&self) -> String {
        self.codes
            .iter()
            .map(|c| format!("{}: {}", c.code, c.description))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
