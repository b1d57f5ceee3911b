//! Notification message composition.
//!
//! Builds the subject, the plain-text body, and the final RFC 5322 message
//! for a contact submission. No I/O happens here.

use lettre::message::{header::ContentType, Mailbox};
use lettre::{Address, Message};
use tracing::{debug, warn};

use super::NotifyError;
use crate::contact::ContactSubmission;

/// Subject line for a submission.
pub fn render_subject(submission: &ContactSubmission) -> String {
    format!("Nuevo Contacto: {}", submission.display_name())
}

/// Plain-text body listing every field in a fixed order.
pub fn render_body(submission: &ContactSubmission) -> String {
    format!(
        "¡Nuevo mensaje de contacto recibido!\n\
         -----------------------------------\n\
         Nombre: {}\n\
         Correo: {}\n\
         Empresa: {}\n\
         Teléfono: {}\n\
         Servicio Solicitado: {}\n\
         Mensaje:\n\
         ---\n\
         {}\n",
        submission.name(),
        submission.email(),
        submission.company(),
        submission.phone(),
        submission.service(),
        submission.message(),
    )
}

/// Compose the full notification message.
///
/// `from` and `to` come from configuration. The visitor's address, when it
/// parses, becomes the Reply-To so the team can answer directly.
pub fn compose_message(
    submission: &ContactSubmission,
    from: &str,
    to: &str,
) -> Result<Message, NotifyError> {
    let from: Mailbox = from
        .parse()
        .map_err(|source| NotifyError::InvalidAddress {
            field: "sender",
            source,
        })?;
    let to: Mailbox = to
        .parse()
        .map_err(|source| NotifyError::InvalidAddress {
            field: "recipient",
            source,
        })?;

    let mut builder = Message::builder()
        .from(from)
        .to(to)
        .subject(render_subject(submission));

    if let Some(reply_to) = reply_to_mailbox(submission) {
        builder = builder.reply_to(reply_to);
    }

    let message = builder
        .header(ContentType::TEXT_PLAIN)
        .body(render_body(submission))?;

    debug!(
        provided_fields = submission.provided_fields(),
        "notification_message_composed"
    );

    Ok(message)
}

fn reply_to_mailbox(submission: &ContactSubmission) -> Option<Mailbox> {
    let raw = submission.provided_email()?;

    match raw.parse::<Address>() {
        Ok(address) => Some(Mailbox::new(
            submission.provided_name().and_then(display_name),
            address,
        )),
        Err(e) => {
            warn!(error = %e, "notification_reply_to_invalid");
            None
        }
    }
}

/// Header-safe display name: control characters become spaces and runs of
/// whitespace collapse. Lettre cannot render a name with line breaks.
fn display_name(name: &str) -> Option<String> {
    let cleaned = name
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    (!cleaned.is_empty()).then_some(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::ContactForm;
    use mailparse::{parse_mail, MailHeaderMap};

    fn submission(form: ContactForm) -> ContactSubmission {
        ContactSubmission::from_form(form)
    }

    fn full_form() -> ContactForm {
        ContactForm {
            nombre: Some("Ana López".to_string()),
            empresa: Some("Acme".to_string()),
            telefono: Some("5512345678".to_string()),
            servicio: Some("Consultoría".to_string()),
            mensaje: Some("Necesito una cotización".to_string()),
            email: Some("ana@example.com".to_string()),
        }
    }

    #[test]
    fn test_render_subject() {
        assert_eq!(render_subject(&submission(full_form())), "Nuevo Contacto: Ana López");
        assert_eq!(
            render_subject(&submission(ContactForm::default())),
            "Nuevo Contacto: Desconocido"
        );
    }

    #[test]
    fn test_render_body_field_order() {
        let body = render_body(&submission(full_form()));

        let positions: Vec<usize> = [
            "Nombre: Ana López",
            "Correo: ana@example.com",
            "Empresa: Acme",
            "Teléfono: 5512345678",
            "Servicio Solicitado: Consultoría",
            "Necesito una cotización",
        ]
        .iter()
        .map(|needle| body.find(needle).unwrap_or_else(|| panic!("missing {needle}")))
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_render_body_missing_fields() {
        let body = render_body(&submission(ContactForm {
            nombre: Some("Ana".to_string()),
            mensaje: Some("Hola".to_string()),
            ..Default::default()
        }));

        assert!(body.contains("Nombre: Ana\n"));
        assert!(body.contains("Empresa: N/A\n"));
        assert!(body.contains("Teléfono: N/A\n"));
        assert!(body.contains("Servicio Solicitado: N/A\n"));
        assert!(body.contains("Correo: N/A\n"));
        assert!(body.ends_with("---\nHola\n"));
    }

    #[test]
    fn test_compose_message_headers_and_body() {
        let message = compose_message(
            &submission(full_form()),
            "ventas@example.com",
            "equipo@example.com",
        )
        .unwrap();

        let raw = message.formatted();
        let parsed = parse_mail(&raw).unwrap();

        assert_eq!(
            parsed.headers.get_first_value("From").as_deref(),
            Some("ventas@example.com")
        );
        assert_eq!(
            parsed.headers.get_first_value("To").as_deref(),
            Some("equipo@example.com")
        );
        assert_eq!(
            parsed.headers.get_first_value("Subject").as_deref(),
            Some("Nuevo Contacto: Ana López")
        );
        assert!(parsed
            .headers
            .get_first_value("Reply-To")
            .unwrap()
            .contains("ana@example.com"));
        assert_eq!(parsed.ctype.mimetype, "text/plain");

        let body = parsed.get_body().unwrap();
        assert!(body.contains("Teléfono: 5512345678"));
        assert!(body.contains("Necesito una cotización"));
    }

    #[test]
    fn test_compose_message_invalid_reply_to_is_dropped() {
        let form = ContactForm {
            email: Some("no-es-un-correo".to_string()),
            ..full_form()
        };

        let message =
            compose_message(&submission(form), "ventas@example.com", "equipo@example.com")
                .unwrap();
        let raw = message.formatted();
        let parsed = parse_mail(&raw).unwrap();

        assert!(parsed.headers.get_first_value("Reply-To").is_none());
        assert!(parsed.get_body().unwrap().contains("Correo: no-es-un-correo"));
    }

    #[test]
    fn test_display_name_strips_line_breaks() {
        assert_eq!(display_name("Ana\r\nLópez").as_deref(), Some("Ana López"));
        assert_eq!(display_name("Ana\tL\u{7}ópez").as_deref(), Some("Ana L ópez"));
        assert_eq!(display_name("\n\r"), None);
    }

    #[test]
    fn test_compose_message_multiline_name_with_reply_to() {
        let form = ContactForm {
            nombre: Some("Ana\r\nLópez".to_string()),
            ..full_form()
        };

        let message =
            compose_message(&submission(form), "ventas@example.com", "equipo@example.com")
                .unwrap();
        let raw = message.formatted();
        let parsed = parse_mail(&raw).unwrap();

        let reply_to = parsed.headers.get_first_value("Reply-To").unwrap();
        assert!(reply_to.contains("ana@example.com"));
        assert!(reply_to.contains("Ana López"));
        let body = parsed.get_body().unwrap();
        assert!(body.contains("Nombre: Ana"));
        assert!(body.contains("López"));
    }

    #[test]
    fn test_compose_message_invalid_sender() {
        let result = compose_message(
            &submission(full_form()),
            "not an address",
            "equipo@example.com",
        );

        match result {
            Err(NotifyError::InvalidAddress { field, .. }) => assert_eq!(field, "sender"),
            other => panic!("Expected InvalidAddress, got {:?}", other.map(|_| ())),
        }
    }
}
