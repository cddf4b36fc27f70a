use thiserror::Error;

/// Failures a view can surface to the user.
///
/// Superseded requests are not represented here: a cancelled request is
/// dropped before it can produce an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// No response at all (DNS, CORS, connection reset).
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx with a structured `{error}` body.
    #[error("{message}")]
    Server { status: u16, message: String },

    /// Non-2xx without a readable body.
    #[error("API error: {0}")]
    Status(u16),

    #[error("unexpected response: {0}")]
    Decode(String),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

impl ApiError {
    /// Text shown in the view's banner. Server messages are shown verbatim,
    /// transport and decoding problems collapse to the view's own fallback.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::Invalid(invalid) => invalid.to_string(),
            _ => fallback.to_string(),
        }
    }
}

/// Client-side checks that short-circuit before any request is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Digite um comentário antes de enviar.")]
    EmptyComment,
    #[error("O texto da resposta não pode ficar vazio.")]
    EmptyReply,
    #[error("O comentário não pode estar vazio.")]
    EmptyEdit,
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("{}", .0.prompt())]
    LoginRequired(GuardedAction),
}

/// Actions that need a signed-in user, each with its own prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardedAction {
    /// Favouriting from the car's own page.
    Favorite,
    /// Favouriting from the inventory listing.
    FavoriteFromListing,
    Comment,
    Reply,
    Like,
}

impl GuardedAction {
    pub fn prompt(self) -> &'static str {
        match self {
            GuardedAction::Favorite => "Faça login para favoritar este carro.",
            GuardedAction::FavoriteFromListing => "Faça login para favoritar carros da sua coleção.",
            GuardedAction::Comment => "É necessário estar logado para comentar.",
            GuardedAction::Reply => "Faça login para responder a um comentário.",
            GuardedAction::Like => "Faça login para curtir comentários.",
        }
    }
}

/// Non-empty after trimming, or the given validation error.
pub fn require_text(text: &str, empty: ValidationError) -> Result<String, ValidationError> {
    if text.trim().is_empty() {
        Err(empty)
    } else {
        Ok(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn server_message_is_shown_verbatim() {
        let err = ApiError::Server {
            status: 404,
            message: "Carro não encontrado.".into(),
        };
        assert_eq!(err.user_message("fallback"), "Carro não encontrado.");
    }

    #[rstest]
    #[case(ApiError::Network("connection refused".into()))]
    #[case(ApiError::Status(502))]
    #[case(ApiError::Decode("missing field `cars`".into()))]
    #[case(ApiError::Server { status: 500, message: "  ".into() })]
    fn other_failures_use_the_fallback(#[case] err: ApiError) {
        assert_eq!(err.user_message("Unable to load cars."), "Unable to load cars.");
    }

    #[test]
    fn validation_errors_carry_their_own_message() {
        let err = ApiError::from(ValidationError::PasswordMismatch);
        assert_eq!(err.user_message("ignored"), "Passwords do not match.");
        let err = ApiError::from(ValidationError::LoginRequired(GuardedAction::Like));
        assert_eq!(err.user_message("ignored"), "Faça login para curtir comentários.");
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    fn blank_text_is_rejected(#[case] text: &str) {
        assert_eq!(
            require_text(text, ValidationError::EmptyReply),
            Err(ValidationError::EmptyReply)
        );
    }

    #[test]
    fn text_is_kept_untrimmed() {
        assert_eq!(
            require_text("  ok ", ValidationError::EmptyEdit).as_deref(),
            Ok("  ok ")
        );
    }

    #[rstest]
    #[case(GuardedAction::Favorite, "Faça login para favoritar este carro.")]
    #[case(GuardedAction::FavoriteFromListing, "Faça login para favoritar carros da sua coleção.")]
    #[case(GuardedAction::Reply, "Faça login para responder a um comentário.")]
    fn each_guarded_action_has_its_own_prompt(#[case] action: GuardedAction, #[case] prompt: &str) {
        assert_eq!(action.prompt(), prompt);
    }
}
