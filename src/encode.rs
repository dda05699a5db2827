/// PNG encoding for export.
pub mod png;
