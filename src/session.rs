//! The state one user works on: chosen paths, processed data, and a status line.

use std::path::{Path, PathBuf};

use crate::aggregate::aggregate_invoices;
use crate::core::{Customer, FilterError, InvoiceTotal};
use crate::extract::parse_customers;
use crate::filter::{OutputPathMode, filter_selection, output_path};
use crate::summary::{CustomerRow, Selection, summarize};
use crate::xml::{Document, load_document, write_document};

/// Result of the last successful processing run.
#[derive(Debug, Clone)]
pub struct Processed {
    pub document: Document,
    pub customers: Vec<Customer>,
    pub totals: Vec<InvoiceTotal>,
    pub selection: Selection,
}

impl Processed {
    /// Extract and aggregate an already loaded document.
    pub fn from_document(document: Document) -> Self {
        let customers = parse_customers(&document);
        let totals = aggregate_invoices(&document, &customers);
        let selection = Selection::new(customers.len());
        Self {
            document,
            customers,
            totals,
            selection,
        }
    }

    /// Mark the customers numbered `ids` for removal; returns unknown ids.
    pub fn exclude_ids<'a, I>(&mut self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.selection.select_ids(&self.customers, ids)
    }

    pub fn rows(&self) -> Vec<CustomerRow> {
        summarize(&self.customers, &self.totals, &self.selection)
    }
}

/// Drives load → process → save for one export.
#[derive(Debug, Clone, Default)]
pub struct Session {
    source: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    path_mode: OutputPathMode,
    processed: Option<Processed>,
    status: String,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path_mode(mut self, mode: OutputPathMode) -> Self {
        self.path_mode = mode;
        self
    }

    pub fn select_source(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.status = format!("Selected XML: {}", path.display());
        self.source = Some(path);
    }

    pub fn select_output_dir(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        self.status = format!("Selected Output Folder: {}", path.display());
        self.output_dir = Some(path);
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// Last status message shown to the user.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn processed(&self) -> Option<&Processed> {
        self.processed.as_ref()
    }

    pub fn processed_mut(&mut self) -> Option<&mut Processed> {
        self.processed.as_mut()
    }

    /// Removal flags of the current table, `None` before processing.
    pub fn selection_mut(&mut self) -> Option<&mut Selection> {
        self.processed.as_mut().map(|p| &mut p.selection)
    }

    /// Customer rows of the current table, empty before processing.
    pub fn rows(&self) -> Vec<CustomerRow> {
        self.processed
            .as_ref()
            .map(Processed::rows)
            .unwrap_or_default()
    }

    /// Load the source file and rebuild the customer table.
    ///
    /// Both paths must be selected. A load failure leaves the previous
    /// table in place and is returned as-is.
    pub fn process(&mut self) -> Result<(), FilterError> {
        let (Some(source), Some(_)) = (&self.source, &self.output_dir) else {
            self.status = "Please select XML and output folder".into();
            return Err(FilterError::Precondition(self.status.clone()));
        };

        let document = load_document(source)?;
        self.processed = Some(Processed::from_document(document));
        self.status = "Display Complete".into();
        Ok(())
    }

    /// Write the filtered export and return where it went.
    pub fn save(&mut self) -> Result<PathBuf, FilterError> {
        let ready = self
            .processed
            .as_ref()
            .filter(|p| !p.customers.is_empty())
            .zip(self.source.as_deref())
            .zip(self.output_dir.as_deref());
        let Some(((processed, source), output_dir)) = ready else {
            self.status = "Nothing to save, run processing first".into();
            return Err(FilterError::Precondition(self.status.clone()));
        };

        let filtered = filter_selection(
            &processed.document,
            &processed.customers,
            &processed.selection,
        )?;
        let path = output_path(output_dir, source, self.path_mode)?;
        write_document(&filtered, &path)?;

        self.status = format!("Filtered XML saved to {}", path.display());
        Ok(path)
    }
}
