//! Single boundary between the backend wire shape and application errors.
//!
//! Every backend call yields a [`ResponseEnvelope`]; this module turns it into
//! either the payload or a [`DomainError`], and maps raw transport failures to
//! the one message shown to the user.

use serde_json::Value;

use crate::domain::{
    error::DomainError,
    models::{envelope::ResponseEnvelope, transport::TransportFailure},
};

/// Tracing target for envelope normalization.
pub const TRACING_TARGET: &str = "couple_planner::normalizer";

pub const BACKEND_ERROR_FALLBACK: &str = "Error del backend";

/// Marker left in the failure message when a body could not be parsed.
pub const PARSE_FAILURE_SIGNATURE: &str = "Http failure during parsing";

const PARSE_ERROR_MESSAGE: &str = "La respuesta del servidor no pudo ser procesada";
const BAD_REQUEST_MESSAGE: &str = "Solicitud incorrecta";
const UNAUTHORIZED_MESSAGE: &str = "No autorizado. Inicia sesión de nuevo";
const FORBIDDEN_MESSAGE: &str = "Acceso prohibido";
const NOT_FOUND_MESSAGE: &str = "Recurso no encontrado";
const INTERNAL_ERROR_MESSAGE: &str = "Error interno del servidor";
const NO_CONNECTION_MESSAGE: &str = "No se pudo conectar con el servidor";
const UNKNOWN_ERROR_MESSAGE: &str = "Ha ocurrido un error desconocido";

/// Unwrap the payload of a successful envelope.
///
/// # Errors
///
/// - [`DomainError::MalformedResponse`] when there is no envelope
/// - [`DomainError::BackendLogic`] when the backend reported `success=false`
pub fn extract_payload<T>(envelope: Option<ResponseEnvelope<T>>) -> Result<T, DomainError> {
    let Some(envelope) = envelope else {
        tracing::debug!(target: TRACING_TARGET, "Missing response envelope");
        return Err(DomainError::MalformedResponse);
    };

    if envelope.success {
        return Ok(envelope.payload);
    }

    let message = envelope
        .error_message
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| BACKEND_ERROR_FALLBACK.to_string());

    tracing::debug!(
        target: TRACING_TARGET,
        error = %message,
        "Backend reported failure"
    );

    Err(DomainError::BackendLogic(message))
}

/// Parse a raw body into an envelope with an untyped payload.
pub fn parse_envelope(body: &[u8]) -> Result<ResponseEnvelope<Value>, DomainError> {
    serde_json::from_slice(body).map_err(|err| {
        tracing::debug!(target: TRACING_TARGET, error = %err, "Body is not a response envelope");
        DomainError::MalformedResponse
    })
}

/// Same as [`parse_envelope`] for an already decoded JSON document.
pub fn envelope_from_value(value: Value) -> Result<ResponseEnvelope<Value>, DomainError> {
    serde_json::from_value(value).map_err(|err| {
        tracing::debug!(target: TRACING_TARGET, error = %err, "Document is not a response envelope");
        DomainError::MalformedResponse
    })
}

/// Resolve the user facing message for a transport failure.
///
/// Total over its input: any failure, including none at all, produces a
/// non-empty message.
pub fn transport_error_message(failure: Option<&TransportFailure>) -> String {
    let Some(failure) = failure else {
        return UNKNOWN_ERROR_MESSAGE.to_string();
    };

    let raw_message = failure.message.as_deref().map(str::trim);

    if raw_message.is_some_and(|message| message.contains(PARSE_FAILURE_SIGNATURE)) {
        return PARSE_ERROR_MESSAGE.to_string();
    }

    if let Some(status) = failure.status {
        let message = match status {
            400 => BAD_REQUEST_MESSAGE,
            401 => UNAUTHORIZED_MESSAGE,
            403 => FORBIDDEN_MESSAGE,
            404 => NOT_FOUND_MESSAGE,
            500 => INTERNAL_ERROR_MESSAGE,
            0 => NO_CONNECTION_MESSAGE,
            other => return format!("Error del servidor ({other})"),
        };
        return message.to_string();
    }

    match raw_message {
        Some(message) if !message.is_empty() => message.to_string(),
        _ => UNKNOWN_ERROR_MESSAGE.to_string(),
    }
}

/// Convert a transport failure into the error surfaced to callers.
pub fn translate_transport_error(failure: Option<&TransportFailure>) -> DomainError {
    let message = transport_error_message(failure);

    tracing::warn!(
        target: TRACING_TARGET,
        status = ?failure.and_then(|failure| failure.status),
        error = %message,
        "Transport failure"
    );

    DomainError::Transport(message)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_extract_payload_returns_payload_unchanged() {
        let payload = json!({"id": 7, "title": "Cena"});
        let envelope = ResponseEnvelope::success("ok", payload.clone());

        assert_eq!(extract_payload(Some(envelope)).unwrap(), payload);
    }

    #[test]
    fn test_extract_payload_ignores_stray_error_message_on_success() {
        let mut envelope = ResponseEnvelope::success("ok", 3);
        envelope.error_message = Some("ignored".to_string());

        assert_eq!(extract_payload(Some(envelope)).unwrap(), 3);
    }

    #[rstest]
    #[case::backend_message(Some("Regalo duplicado"), "Regalo duplicado")]
    #[case::null_message(None, BACKEND_ERROR_FALLBACK)]
    #[case::empty_message(Some(""), BACKEND_ERROR_FALLBACK)]
    fn test_extract_payload_failure_message(
        #[case] error_message: Option<&str>,
        #[case] expected: &str,
    ) {
        let envelope = ResponseEnvelope {
            success: false,
            message: String::new(),
            error_message: error_message.map(str::to_string),
            payload: Value::Null,
        };

        match extract_payload(Some(envelope)) {
            Err(DomainError::BackendLogic(message)) => assert_eq!(message, expected),
            other => panic!("expected backend logic error, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_payload_without_envelope_is_malformed() {
        let result = extract_payload::<Value>(None);
        assert!(matches!(result, Err(DomainError::MalformedResponse)));
    }

    #[rstest]
    #[case::not_json(b"<html>oops</html>".as_slice())]
    #[case::null(b"null".as_slice())]
    #[case::wrong_shape(br#"{"data": []}"#.as_slice())]
    #[case::numeric_success(br#"{"success": 1, "message": "", "errorMessage": null, "payload": 1}"#.as_slice())]
    fn test_parse_envelope_rejects_malformed_bodies(#[case] body: &[u8]) {
        assert!(matches!(
            parse_envelope(body),
            Err(DomainError::MalformedResponse)
        ));
    }

    #[test]
    fn test_parse_envelope_accepts_failure_with_null_payload() {
        let body = br#"{"success": false, "message": "", "errorMessage": "Sin permiso", "payload": null}"#;
        let envelope = parse_envelope(body).unwrap();

        assert!(!envelope.is_success());
        assert_eq!(envelope.error_message(), Some("Sin permiso"));
    }

    #[rstest]
    #[case(400, BAD_REQUEST_MESSAGE)]
    #[case(401, UNAUTHORIZED_MESSAGE)]
    #[case(403, FORBIDDEN_MESSAGE)]
    #[case(404, NOT_FOUND_MESSAGE)]
    #[case(500, INTERNAL_ERROR_MESSAGE)]
    #[case(0, NO_CONNECTION_MESSAGE)]
    fn test_status_table(#[case] status: u16, #[case] expected: &str) {
        let failure = TransportFailure::with_status(status, "Http failure response");
        assert_eq!(transport_error_message(Some(&failure)), expected);
    }

    #[test]
    fn test_unknown_status_includes_code() {
        let failure = TransportFailure::with_status(503, "Service Unavailable");
        assert_eq!(
            transport_error_message(Some(&failure)),
            "Error del servidor (503)"
        );
    }

    #[test]
    fn test_parse_signature_wins_over_status() {
        let failure = TransportFailure::with_status(
            200,
            "Http failure during parsing for http://localhost/api/notes",
        );
        assert_eq!(transport_error_message(Some(&failure)), PARSE_ERROR_MESSAGE);
    }

    #[rstest]
    #[case::raw_message(TransportFailure::with_message("socket closed"), "socket closed")]
    #[case::blank_message(TransportFailure::with_message("   "), UNKNOWN_ERROR_MESSAGE)]
    #[case::empty_failure(TransportFailure::default(), UNKNOWN_ERROR_MESSAGE)]
    fn test_fallbacks(#[case] failure: TransportFailure, #[case] expected: &str) {
        assert_eq!(transport_error_message(Some(&failure)), expected);
    }

    #[test]
    fn test_translate_is_total() {
        match translate_transport_error(None) {
            DomainError::Transport(message) => {
                assert!(!message.is_empty());
                assert_eq!(message, UNKNOWN_ERROR_MESSAGE);
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }
}
