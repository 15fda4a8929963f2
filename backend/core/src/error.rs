use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure categories a consultation can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    UnknownPersona,
    MissingCredential,
    ProviderError,
    EmptyInput,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::UnknownPersona => "unknown_persona",
            ErrorKind::MissingCredential => "missing_credential",
            ErrorKind::ProviderError => "provider_error",
            ErrorKind::EmptyInput => "empty_input",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level error type for a consultation.
///
/// The `Display` output is what the end user sees in place of an answer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsultError {
    #[error("エラー: 不明な専門家です: {0}")]
    UnknownPersona(String),

    #[error("エラー: OpenAI APIキーが設定されていません。.envファイルでOPENAI_API_KEYを設定してください。")]
    MissingCredential,

    #[error("エラーが発生しました: {0}")]
    Provider(String),

    #[error("質問を入力してください。")]
    EmptyInput,
}

impl ConsultError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ConsultError::UnknownPersona(_) => ErrorKind::UnknownPersona,
            ConsultError::MissingCredential => ErrorKind::MissingCredential,
            ConsultError::Provider(_) => ErrorKind::ProviderError,
            ConsultError::EmptyInput => ErrorKind::EmptyInput,
        }
    }
}

impl From<anyhow::Error> for ConsultError {
    fn from(err: anyhow::Error) -> Self {
        // `{:#}` keeps the context chain on one line.
        ConsultError::Provider(format!("{err:#}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(
            ConsultError::UnknownPersona("x".into()).kind(),
            ErrorKind::UnknownPersona
        );
        assert_eq!(ConsultError::MissingCredential.kind(), ErrorKind::MissingCredential);
        assert_eq!(ConsultError::Provider("boom".into()).kind(), ErrorKind::ProviderError);
        assert_eq!(ConsultError::EmptyInput.kind(), ErrorKind::EmptyInput);
    }

    #[test]
    fn test_missing_credential_message_names_the_variable() {
        let msg = ConsultError::MissingCredential.to_string();
        assert!(msg.contains("OPENAI_API_KEY"));
        assert!(msg.contains(".env"));
    }

    #[test]
    fn test_provider_error_keeps_context_chain() {
        let err = anyhow::anyhow!("connection refused").context("OpenAI HTTP request failed");
        let consult: ConsultError = err.into();
        let msg = consult.to_string();
        assert!(msg.contains("OpenAI HTTP request failed"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn test_kind_serializes_snake_case() {
        let json = serde_json::to_string(&ErrorKind::MissingCredential).unwrap();
        assert_eq!(json, "\"missing_credential\"");
    }
}
