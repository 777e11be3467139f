mod csv_import;
mod detect;

pub(crate) use csv_import::CsvImporter;
pub(crate) use detect::LedgerColumns;
