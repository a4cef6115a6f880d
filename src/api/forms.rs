//! Decoding of urlencoded visit forms
//!
//! Forms are read as ordered key/value pairs so that a repeated `mushrooms`
//! key (one per selected option) keeps every value.

use crate::services::VisitForm;

pub type FormPairs = Vec<(String, String)>;

pub fn decode_visit_form(pairs: FormPairs) -> VisitForm {
    let mut form = VisitForm::default();

    for (key, value) in pairs {
        match key.as_str() {
            "id" => form.id = Some(value),
            "hunter" => form.hunter = Some(value),
            "forest" => form.forest = Some(value),
            "date" => form.date = Some(value),
            "note" => form.note = Some(value),
            "mushrooms" | "mushrooms[]" => form.mushrooms.push(value),
            other => tracing::debug!("Ignoring unknown form field '{}'", other),
        }
    }

    form
}
