//! Domain-specific error types for authentication and account recovery
//!
//! Error messages are bilingual (English | Portuguese) in a single string;
//! the presentation side picks a half with the `extract_*_message` helpers.

use thiserror::Error;

/// Authentication-related errors with bilingual messages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// One message for unknown email and wrong password, so responses
    /// never reveal whether an address is registered
    #[error("Incorrect email or password | Email ou senha incorretos")]
    InvalidCredentials,

    #[error("Incomplete profile | Perfil incompleto")]
    IncompleteProfile,

    #[error("Email service failure. Please try again later | Falha no serviço de email, tente novamente mais tarde")]
    MailServiceFailure,
}

/// Rate limiting errors with bilingual messages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RateLimitError {
    #[error("Too many attempts. Please try again in {minutes} minutes | Muitas tentativas. Tente novamente em {minutes} minutos")]
    Exceeded { minutes: u32 },
}

impl RateLimitError {
    /// Build from a retry-after in seconds, rounding up to whole minutes
    pub fn from_retry_after(retry_after_seconds: u64) -> Self {
        let minutes = retry_after_seconds.div_ceil(60).max(1) as u32;
        Self::Exceeded { minutes }
    }
}

/// Password recovery errors with bilingual messages
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecoveryError {
    #[error("Recovery session is invalid or expired. Please start over | Sessão de recuperação inválida ou expirada. Recomece o processo")]
    InvalidToken,

    #[error("Verification code expired. Please request a new one | Código de verificação expirado. Solicite um novo")]
    CodeExpired,

    #[error("Incorrect verification code | Código de verificação incorreto")]
    CodeMismatch,

    #[error("Verification is required before choosing a new password | É necessário verificar o código antes de escolher uma nova senha")]
    NotVerified,
}

/// Extract the English half of a bilingual error string
pub fn extract_english_message(error_msg: &str) -> String {
    if let Some(pipe_index) = error_msg.find(" | ") {
        error_msg[..pipe_index].to_string()
    } else {
        error_msg.to_string()
    }
}

/// Extract the Portuguese half of a bilingual error string
pub fn extract_portuguese_message(error_msg: &str) -> String {
    if let Some(pipe_index) = error_msg.find(" | ") {
        error_msg[pipe_index + 3..].to_string()
    } else {
        error_msg.to_string()
    }
}
