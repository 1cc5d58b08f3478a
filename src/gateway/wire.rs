// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Modelshelf-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Modelshelf and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Decoding of the backend's JSON envelope.
//!
//! Every endpoint answers `{"status": "success" | "error", "message"?: ..., <payload>}`.
//! These helpers turn a response body into domain values so HTTP-backed gateways only have to
//! move bytes.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use super::{GatewayError, NotesExport, NotesPayload, ReplyStatus, SaveReply, TemplateInfo};
use crate::model::{BackupEntry, ModelRecord};

type Envelope = Map<String, Value>;

fn parse_object(body: &str) -> Result<Envelope, GatewayError> {
    let value: Value =
        serde_json::from_str(body).map_err(|err| GatewayError::Malformed(err.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        other => Err(GatewayError::Malformed(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

fn status_of(envelope: &Envelope) -> Result<ReplyStatus, GatewayError> {
    let raw = envelope
        .get("status")
        .cloned()
        .ok_or_else(|| GatewayError::Malformed("missing `status`".to_owned()))?;
    serde_json::from_value(raw).map_err(|err| GatewayError::Malformed(format!("status: {err}")))
}

fn message_of(envelope: &Envelope) -> Option<String> {
    envelope.get("message").and_then(Value::as_str).map(str::to_owned)
}

fn rejection(envelope: &Envelope) -> GatewayError {
    let message = message_of(envelope).unwrap_or_else(|| "request failed".to_owned());
    if message.to_lowercase().contains("not found") {
        GatewayError::NotFound(message)
    } else {
        GatewayError::Rejected(message)
    }
}

/// Parses the body and fails unless the envelope reports success.
fn success_envelope(body: &str) -> Result<Envelope, GatewayError> {
    let envelope = parse_object(body)?;
    match status_of(&envelope)? {
        ReplyStatus::Success => Ok(envelope),
        ReplyStatus::Error => Err(rejection(&envelope)),
    }
}

fn take_field<T: DeserializeOwned>(envelope: &mut Envelope, key: &str) -> Result<T, GatewayError> {
    let raw = envelope
        .remove(key)
        .ok_or_else(|| GatewayError::Malformed(format!("missing `{key}`")))?;
    serde_json::from_value(raw).map_err(|err| GatewayError::Malformed(format!("{key}: {err}")))
}

fn take_optional<T: DeserializeOwned + Default>(
    envelope: &mut Envelope,
    key: &str,
) -> Result<T, GatewayError> {
    match envelope.remove(key) {
        None | Some(Value::Null) => Ok(T::default()),
        Some(raw) => serde_json::from_value(raw)
            .map_err(|err| GatewayError::Malformed(format!("{key}: {err}"))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// `GET models/` → `{"models": [...]}`.
pub fn decode_models(body: &str) -> Result<Vec<ModelRecord>, GatewayError> {
    let mut envelope = success_envelope(body)?;
    take_field(&mut envelope, "models")
}

/// `GET models/<id>` → `{"model": {...}}`.
pub fn decode_model(body: &str) -> Result<ModelRecord, GatewayError> {
    let mut envelope = success_envelope(body)?;
    take_field(&mut envelope, "model")
}

/// `GET notes/<id>` → `{"content": "...", "backups": [...]}`.
///
/// A "not found" answer means the model has no notes yet and decodes to an empty payload.
pub fn decode_notes(body: &str) -> Result<NotesPayload, GatewayError> {
    let mut envelope = match success_envelope(body) {
        Ok(envelope) => envelope,
        Err(GatewayError::NotFound(_)) => return Ok(NotesPayload::default()),
        Err(err) => return Err(err),
    };
    let content: Option<String> = take_optional(&mut envelope, "content")?;
    let backups: Vec<BackupEntry> = take_optional(&mut envelope, "backups")?;
    Ok(NotesPayload {
        content: content.unwrap_or_default(),
        backups,
    })
}

/// `POST notes/<id>`. An error status is a failed save, not a gateway error.
pub fn decode_save(body: &str) -> Result<SaveReply, GatewayError> {
    let envelope = parse_object(body)?;
    let status = status_of(&envelope)?;
    Ok(SaveReply {
        status,
        message: message_of(&envelope),
    })
}

/// `GET notes/<id>/template/<template_id>` → `{"content": "..."}`.
pub fn decode_template(body: &str) -> Result<String, GatewayError> {
    let mut envelope = success_envelope(body)?;
    take_field(&mut envelope, "content")
}

/// `GET notes/templates` → `{"templates": [...]}`.
pub fn decode_templates(body: &str) -> Result<Vec<TemplateInfo>, GatewayError> {
    let mut envelope = success_envelope(body)?;
    take_optional(&mut envelope, "templates")
}

/// `POST notes/<id>/restore`. The backend answers with the result of re-saving the snapshot.
pub fn decode_restore(body: &str) -> Result<(), GatewayError> {
    success_envelope(body).map(|_| ())
}

/// `GET notes/export` → `{"data": {"version", "exported_at", "notes": [...]}, "count": n}`.
pub fn decode_export(body: &str) -> Result<NotesExport, GatewayError> {
    let mut envelope = success_envelope(body)?;
    take_field(&mut envelope, "data")
}
