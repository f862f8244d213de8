//! meeting-scheduler - book a meeting from the terminal.
//!
//! Reads configuration from `MEETING_SCHEDULER__*` environment variables (and
//! `.env`), then runs one scheduling conversation over stdin/stdout. Logs go
//! to stderr so they never interleave with the conversation.

use std::process::ExitCode;
use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use meeting_scheduler::adapters::auth::StaticTokenProvider;
use meeting_scheduler::adapters::calendar::{GraphCalendarService, GraphConfig};
use meeting_scheduler::adapters::transport::ConsoleTransport;
use meeting_scheduler::application::{
    BookMeetingHandler, ConversationRunner, EventTemplate, MeetingDialog,
    SuggestMeetingTimesHandler, SuggestionPolicy,
};
use meeting_scheduler::config::{AppConfig, AppSettings, ValidationError};
use meeting_scheduler::ports::AuthRequest;

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("invalid configuration: {}", e);
        return ExitCode::FAILURE;
    }

    init_logging(&config.app);

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "conversation failed");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(settings: &AppSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    if settings.log_json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

async fn run(config: AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    let call_timeout = config.calendar.timeout();

    let calendar = Arc::new(GraphCalendarService::new(
        GraphConfig::new()
            .with_base_url(&config.calendar.base_url)
            .with_timeout(call_timeout),
    )?);

    let token = config
        .auth
        .access_token
        .clone()
        .ok_or(ValidationError::MissingRequired("AUTH__ACCESS_TOKEN"))?;
    let tokens = Arc::new(StaticTokenProvider::new(token, config.auth.scopes_list()));

    let policy = SuggestionPolicy {
        day_window: config.scheduling.day_window()?,
        max_candidates: config.scheduling.max_candidates,
        call_timeout,
    };
    let template = EventTemplate {
        body: config.scheduling.event_body.clone(),
        location: config.scheduling.event_location.clone(),
    };

    let dialog = MeetingDialog::new(
        SuggestMeetingTimesHandler::new(calendar.clone(), policy),
        BookMeetingHandler::new(calendar.clone(), template, call_timeout),
    );
    let runner = ConversationRunner::new(
        tokens,
        calendar,
        dialog,
        AuthRequest::for_scheduling(config.auth.redirect_url.clone()),
        call_timeout,
    );

    tracing::info!(
        environment = ?config.app.environment,
        calendar = %config.calendar.base_url,
        "starting conversation"
    );

    let mut transport = ConsoleTransport::stdio();
    let stage = runner.run(&mut transport).await.map_err(|e| {
        tracing::warn!(code = %e.code(), "conversation ended early");
        e
    })?;
    tracing::info!(%stage, "done");
    Ok(())
}
