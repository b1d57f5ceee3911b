//! Contact form wire schema and the normalized submission record.

use serde::Deserialize;

/// Marker rendered for any field the visitor left out.
pub const NOT_AVAILABLE: &str = "N/A";

/// Name used in the subject line when the visitor left the name out.
pub const UNKNOWN_SENDER: &str = "Desconocido";

/// Raw contact form payload (form-encoded data).
///
/// Field names match the public form's input names. Every field is
/// optional and unknown fields are ignored.
#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub empresa: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub servicio: Option<String>,
    #[serde(default)]
    pub mensaje: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// A single contact request, normalized and ready to be notified.
///
/// Blank values are stored as absent, so accessors only ever return
/// either trimmed visitor input or [`NOT_AVAILABLE`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactSubmission {
    name: Option<String>,
    company: Option<String>,
    phone: Option<String>,
    service: Option<String>,
    message: Option<String>,
    email: Option<String>,
}

impl ContactSubmission {
    /// Build a submission from the raw form, dropping blank fields.
    pub fn from_form(form: ContactForm) -> Self {
        Self {
            name: normalize(form.nombre),
            company: normalize(form.empresa),
            phone: normalize(form.telefono),
            service: normalize(form.servicio),
            message: normalize(form.mensaje),
            email: normalize(form.email),
        }
    }

    pub fn name(&self) -> &str {
        or_not_available(&self.name)
    }

    pub fn company(&self) -> &str {
        or_not_available(&self.company)
    }

    pub fn phone(&self) -> &str {
        or_not_available(&self.phone)
    }

    pub fn service(&self) -> &str {
        or_not_available(&self.service)
    }

    pub fn message(&self) -> &str {
        or_not_available(&self.message)
    }

    pub fn email(&self) -> &str {
        or_not_available(&self.email)
    }

    /// Name for the subject line; [`UNKNOWN_SENDER`] when absent.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN_SENDER)
    }

    /// The submitted name, if any.
    pub fn provided_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The submitted email address, if any. Not validated.
    pub fn provided_email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Number of fields the visitor actually filled in.
    pub fn provided_fields(&self) -> usize {
        [
            &self.name,
            &self.company,
            &self.phone,
            &self.service,
            &self.message,
            &self.email,
        ]
        .iter()
        .filter(|f| f.is_some())
        .count()
    }
}

fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn or_not_available(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(NOT_AVAILABLE)
}
