use std::path::PathBuf;

#[derive(Debug)]
pub struct BatchResult {
    pub form: String,
    pub output_dir: PathBuf,
    pub documents: Vec<DocumentSummary>,
    pub errors: Vec<String>,
    pub has_errors: bool,
}

#[derive(Debug)]
pub struct DocumentSummary {
    pub subject_id: String,
    pub output: PathBuf,
    pub found: usize,
    pub searched: usize,
    pub blank: usize,
    /// Leaf values in the written document, reserved paths included.
    pub values: usize,
    pub form_variant: bool,
}
