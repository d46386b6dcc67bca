use crate::core::AnnotationLayer;

/// What happened to one document of a batch.
#[derive(Debug)]
pub struct DocumentOutcome {
    /// Document id if it has one, else its path relative to the batch root.
    pub name: String,
    /// The annotation layer, or why the document was rejected.
    pub result: Result<AnnotationLayer, String>,
}

/// Result of running `batch` over a directory.
#[derive(Debug, Default)]
pub struct BatchSummary {
    pub outcomes: Vec<DocumentOutcome>,
    /// Files skipped by `ignores` patterns.
    pub ignored_count: usize,
}

impl BatchSummary {
    pub fn annotated_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }
}
