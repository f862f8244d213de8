//! ConversationRunner - drives one scheduling conversation over a transport.
//!
//! Sign-in happens before the first stage. After that the runner only moves
//! text between the transport and `MeetingDialog::handle_turn` until the
//! dialog reaches a terminal stage or the user goes away.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::application::handlers::scheduling::{with_timeout, MeetingDialog};
use crate::domain::foundation::{AccessToken, AuthError, ErrorCode};
use crate::domain::scheduling::{DialogStage, MeetingSession, SchedulingError};
use crate::ports::{
    AccessTokenProvider, AuthRequest, ConversationTransport, TransportError, UserDirectory,
};

const PLAIN_GREETING: &str = "Hello!";
const SIGN_IN_FAILED: &str = "Sign-in failed, so I cannot reach your calendar.";

/// Errors that end a conversation early.
#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("authentication failed: {0}")]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Scheduling(#[from] SchedulingError),
}

impl RunnerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            RunnerError::Auth(_) => ErrorCode::Unauthorized,
            RunnerError::Transport(_) => ErrorCode::TransportError,
            RunnerError::Scheduling(err) => err.code(),
        }
    }
}

/// Runs conversations against shared adapters.
pub struct ConversationRunner {
    tokens: Arc<dyn AccessTokenProvider>,
    directory: Arc<dyn UserDirectory>,
    dialog: MeetingDialog,
    auth_request: AuthRequest,
    call_timeout: Duration,
}

impl ConversationRunner {
    pub fn new(
        tokens: Arc<dyn AccessTokenProvider>,
        directory: Arc<dyn UserDirectory>,
        dialog: MeetingDialog,
        auth_request: AuthRequest,
        call_timeout: Duration,
    ) -> Self {
        Self {
            tokens,
            directory,
            dialog,
            auth_request,
            call_timeout,
        }
    }

    /// Runs one conversation to completion and returns the stage it ended in.
    ///
    /// # Errors
    ///
    /// - `RunnerError::Auth` if no token could be acquired; nothing else runs.
    /// - `RunnerError::Scheduling` if booking failed; the user is told first.
    /// - `RunnerError::Transport` if the channel broke.
    pub async fn run<T>(&self, transport: &mut T) -> Result<DialogStage, RunnerError>
    where
        T: ConversationTransport + ?Sized,
    {
        let token = match self.tokens.acquire(&self.auth_request).await {
            Ok(token) => token,
            Err(err) => {
                tracing::error!(error = %err, "could not acquire access token");
                if let Err(send_err) = transport.send(SIGN_IN_FAILED).await {
                    tracing::debug!(error = %send_err, "could not report sign-in failure");
                }
                return Err(err.into());
            }
        };

        let greeting = self.greeting(&token).await;
        let mut session = MeetingSession::new(token);
        tracing::info!(conversation_id = %session.id(), "conversation started");

        transport.send(&greeting).await?;
        transport.send(self.dialog.opening_prompt()).await?;

        while session.stage().accepts_input() {
            let Some(input) = transport.receive().await? else {
                tracing::info!(
                    conversation_id = %session.id(),
                    stage = %session.stage(),
                    "user left before finishing"
                );
                break;
            };

            match self.dialog.handle_turn(&mut session, &input).await {
                Ok(outcome) => {
                    for message in &outcome.messages {
                        transport.send(message).await?;
                    }
                }
                Err(err) => {
                    transport
                        .send(&format!("Sorry, the meeting could not be booked: {}", err))
                        .await?;
                    return Err(err.into());
                }
            }
        }

        tracing::info!(
            conversation_id = %session.id(),
            stage = %session.stage(),
            "conversation ended"
        );
        Ok(session.stage())
    }

    /// `Hello {name}!`, or a plain greeting if the profile lookup fails.
    async fn greeting(&self, token: &AccessToken) -> String {
        match with_timeout(self.call_timeout, self.directory.current_user(token)).await {
            Ok(profile) => match profile.greeting_name() {
                Some(name) => format!("Hello {}!", name),
                None => PLAIN_GREETING.to_string(),
            },
            Err(err) => {
                tracing::warn!(error = %err, "profile lookup failed");
                PLAIN_GREETING.to_string()
            }
        }
    }
}
