//! HTML fragments returned to the page.
//!
//! The contact form swaps these straight into its response container, so
//! they are snippets rather than full documents.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

pub const SUCCESS_FRAGMENT: &str = "<div class='p-4 bg-green-100 border-l-4 border-green-500 text-green-700' role='alert'><p class='font-bold'>¡Mensaje recibido con éxito!</p><p>Te contactaremos pronto. Se ha enviado una notificación por correo.</p></div>";

pub const ERROR_FRAGMENT: &str = "<div class='p-4 bg-red-100 border-l-4 border-red-500 text-red-700' role='alert'><p class='font-bold'>Error al enviar el mensaje.</p><p>Por favor, inténtalo de nuevo.</p></div>";

pub const ROOT_BANNER: &str = "<h1>Servidor de Contacto funcionando.</h1>";

/// An HTML response with an explicit UTF-8 content type.
pub fn html(status: StatusCode, body: &'static str) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
        body,
    )
        .into_response()
}

pub fn success() -> Response {
    html(StatusCode::OK, SUCCESS_FRAGMENT)
}

pub fn error() -> Response {
    html(StatusCode::INTERNAL_SERVER_ERROR, ERROR_FRAGMENT)
}
