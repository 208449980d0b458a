use serde::{Deserialize, Serialize};

/// Server-assigned record identifier
pub type RecordId = i64;

/// One logged utterance/response pair as served by `GET /historial`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(
        rename = "comando_usuario",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_label"
    )]
    pub user_utterance: String,
    #[serde(
        rename = "respuesta_asistente",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_label"
    )]
    pub assistant_response: String,
    #[serde(
        rename = "fecha_hora",
        default,
        deserialize_with = "crate::parsers::deserializers::deserialize_label"
    )]
    pub timestamp_label: String,
    #[serde(rename = "comando_ejecutado", default)]
    pub command_type: Option<String>,
}

impl Record {
    /// Display name for the executed command type
    pub fn command_label(&self) -> String {
        match self.command_type.as_deref() {
            Some(kind) => command_type_label(kind),
            None => "Command".to_string(),
        }
    }
}

/// Body of `PUT /historial/{id}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordUpdate {
    #[serde(rename = "comando_usuario")]
    pub user_utterance: String,
    #[serde(rename = "respuesta_asistente")]
    pub assistant_response: String,
}

/// Map known assistant command keys to readable names; unknown keys pass through.
pub fn command_type_label(kind: &str) -> String {
    match kind {
        "reproduce" => "Play".to_string(),
        "busca en youtube" => "YouTube search".to_string(),
        "hora" => "Time query".to_string(),
        "busca en google" => "Google search".to_string(),
        "busca en wikipedia" => "Wikipedia lookup".to_string(),
        "informacion" => "Information".to_string(),
        other => other.to_string(),
    }
}
