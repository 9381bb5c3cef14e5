//! Form snapshots and client data
//!
//! A snapshot is the JSON of the whole form graph, variant tags included,
//! encoded with standard base64 so it can ride in a hidden input without
//! escaping and without ever looking like markup or a placeholder.

use crate::form::Form;
use crate::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::collections::BTreeMap;
use tracing::debug;

/// Encode `form` into an opaque snapshot
pub fn serialize_form(form: &Form) -> Result<String> {
    let json = serde_json::to_vec(form)?;
    debug!(form_id = %form.id(), bytes = json.len(), "Serialized form");
    Ok(STANDARD.encode(json))
}

/// Rebuild a form from a snapshot produced by [`serialize_form`]
///
/// Fields are re-inserted through the validating field list, so a tampered
/// snapshot with duplicate keys is rejected.
pub fn deserialize_form(snapshot: &str) -> Result<Form> {
    let json = STANDARD.decode(snapshot.trim())?;
    let form: Form = serde_json::from_slice(&json)?;
    debug!(form_id = %form.id(), fields = form.fields().len(), "Deserialized form");
    Ok(form)
}

/// JSON object of field key to client-visible data, for fields that have any
pub fn client_data_json(form: &Form) -> Result<String> {
    let data: BTreeMap<&str, BTreeMap<&str, &serde_json::Value>> = form
        .fields()
        .iter()
        .filter(|f| f.has_client_data())
        .map(|f| (f.key(), f.client_data()))
        .collect();
    Ok(serde_json::to_string(&data)?)
}
