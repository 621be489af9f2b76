use jiff::civil::Date;

use crate::dates;
use crate::document::{Category, Document, DocumentDate, DocumentUpdate};
use crate::{Error, Result};

/// Edit dialog state for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditForm {
    pub id: i64,
    pub name: String,
    pub category: Category,
    /// Normalised for a date input; falls back to today.
    pub date: Date,
    /// A save is in flight.
    pub saving: bool,
}

impl EditForm {
    /// Prefills the form from `document`.
    pub fn from_document(document: &Document, today: Date) -> Self {
        Self {
            id: document.id,
            name: document.name.clone(),
            category: document.category,
            date: dates::to_date_input_value(Some(document.date.as_str()), today),
            saving: false,
        }
    }

    /// Validates the form and builds the update to send.
    pub fn to_update(&self) -> Result<DocumentUpdate> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::validation("name is required"));
        }

        Ok(DocumentUpdate {
            name: Some(name.to_owned()),
            category: Some(self.category),
            date: Some(DocumentDate::from(self.date)),
        })
    }

    /// Marks the form as saving and returns the update, unless a save is already running.
    pub fn begin_save(&mut self) -> Result<Option<DocumentUpdate>> {
        if self.saving {
            return Ok(None);
        }
        let update = self.to_update()?;
        self.saving = true;
        Ok(Some(update))
    }

    /// Clears the in-flight flag.
    pub fn finish_save(&mut self) {
        self.saving = false;
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::ErrorKind;

    #[test]
    fn normalises_the_stored_date() {
        let doc = Document::new(4, "SPPD", Category::Bku, "2024-03-05 14:30:00");
        let form = EditForm::from_document(&doc, date(2030, 1, 1));
        assert_eq!(form.date, date(2024, 3, 5));
    }

    #[test]
    fn unparseable_dates_fall_back_to_today() {
        let doc = Document::new(4, "SPPD", Category::Bku, "");
        let today = date(2024, 12, 31);
        assert_eq!(EditForm::from_document(&doc, today).date, today);
    }

    #[test]
    fn produces_a_full_update() {
        let doc = Document::new(4, "SPPD", Category::Bku, "2024-03-05")
            .with_file_path("uploads/file-4.pdf");
        let mut form = EditForm::from_document(&doc, date(2030, 1, 1));
        form.name = "  SPPD Bandung ".into();
        form.category = Category::Sts;

        let update = form.begin_save().unwrap().unwrap();
        assert!(form.saving);
        assert_eq!(form.begin_save().unwrap(), None);

        let merged = update.merge_into(&doc).unwrap();
        assert_eq!(merged.name, "SPPD Bandung");
        assert_eq!(merged.category, Category::Sts);
        assert_eq!(merged.date.as_str(), "2024-03-05");
        assert_eq!(merged.file_path, doc.file_path);
    }

    #[test]
    fn blank_name_is_rejected() {
        let doc = Document::new(4, "SPPD", Category::Bku, "2024-03-05");
        let mut form = EditForm::from_document(&doc, date(2030, 1, 1));
        form.name = " ".into();

        assert_eq!(form.to_update().unwrap_err().kind(), ErrorKind::Validation);
        assert!(form.begin_save().is_err());
        assert!(!form.saving);
    }
}
