//! Wiring: adapters chosen from configuration, handlers, notifier and router.

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use secrecy::ExposeSecret;

use crate::adapters::events::InMemoryEventBus;
use crate::adapters::http::{
    api_router, ApiHandlers, BallotHandlers, CharterHandlers, DocumentHandlers, HttpSettings,
};
use crate::adapters::mail::{LogMailer, ResendConfig, ResendMailer};
use crate::adapters::memory::{
    InMemoryDocEventStore, InMemoryDocumentRepository, InMemoryGroupRepository,
    InMemoryPersonDirectory,
};
use crate::adapters::postgres::{
    connect, PostgresDocEventStore, PostgresDocumentRepository, PostgresGroupRepository,
    PostgresPersonDirectory,
};
use crate::adapters::storage::{InMemoryCharterTextStorage, LocalCharterTextStorage};
use crate::application::handlers::ballot::{
    BallotSummaryHandler, CloseBallotHandler, EditPositionHandler, IssueBallotHandler,
    SendPositionEmailHandler,
};
use crate::application::handlers::charter::{
    ApproveCharterHandler, ChangeCharterStateHandler, ListMilestonesHandler,
    StartCharteringHandler, SubmitCharterTextHandler,
};
use crate::application::handlers::document::{
    AddCommentHandler, ChangeDraftStateHandler, GetDocumentHandler, GetDocumentHistoryHandler,
    RegisterDraftHandler, SubmitDraftRevisionHandler,
};
use crate::application::{DocEventRecorder, DocLocks, MailNotifier};
use crate::config::{AppConfig, MailConfig, MailTransport};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::mail::MessageComposer;
use crate::ports::{
    CharterTextStorage, DocEventStore, DocumentRepository, EventSubscriber, GroupRepository,
    Mailer, PersonDirectory,
};

/// The port implementations shared by every handler.
#[derive(Clone)]
pub struct Services {
    pub documents: Arc<dyn DocumentRepository>,
    pub events: Arc<dyn DocEventStore>,
    pub groups: Arc<dyn GroupRepository>,
    pub people: Arc<dyn PersonDirectory>,
    pub texts: Arc<dyn CharterTextStorage>,
    pub mailer: Arc<dyn Mailer>,
    pub bus: Arc<InMemoryEventBus>,
    pub locks: DocLocks,
}

impl Services {
    /// In-memory stores with the given mailer.
    pub fn in_memory(mailer: Arc<dyn Mailer>) -> Self {
        Self {
            documents: Arc::new(InMemoryDocumentRepository::new()),
            events: Arc::new(InMemoryDocEventStore::new()),
            groups: Arc::new(InMemoryGroupRepository::new()),
            people: Arc::new(InMemoryPersonDirectory::new()),
            texts: Arc::new(InMemoryCharterTextStorage::new()),
            mailer,
            bus: Arc::new(InMemoryEventBus::new()),
            locks: DocLocks::new(),
        }
    }

    /// Stores and transports selected by configuration.
    pub async fn from_config(config: &AppConfig) -> Result<Self, DomainError> {
        let mailer = build_mailer(&config.mail)?;
        let mut services = Self::in_memory(mailer);
        services.bus = Arc::new(InMemoryEventBus::dispatch_only());

        if let Some(database) = &config.database {
            let pool = connect(database).await?;
            services.documents = Arc::new(PostgresDocumentRepository::new(pool.clone()));
            services.events = Arc::new(PostgresDocEventStore::new(pool.clone()));
            services.groups = Arc::new(PostgresGroupRepository::new(pool.clone()));
            services.people = Arc::new(PostgresPersonDirectory::new(pool));
        } else {
            tracing::warn!("No database configured, using in-memory stores");
        }

        if !config.storage.in_memory {
            services.texts = Arc::new(LocalCharterTextStorage::new(config.storage.charter_path.clone()));
        }
        Ok(services)
    }

    pub fn recorder(&self) -> DocEventRecorder {
        DocEventRecorder::new(self.events.clone())
    }

    /// Subscribes the mail notifier to document events.
    pub fn subscribe_notifier(&self, composer: MessageComposer) {
        let notifier = Arc::new(MailNotifier::new(
            self.documents.clone(),
            self.groups.clone(),
            self.people.clone(),
            self.texts.clone(),
            self.mailer.clone(),
            composer,
        ));
        self.bus.subscribe_all(&MailNotifier::EVENT_TYPES, notifier);
    }

    /// Builds every command and query handler.
    pub fn handlers(&self, composer: MessageComposer) -> ApiHandlers {
        let documents = DocumentHandlers::new(
            Arc::new(RegisterDraftHandler::new(
                self.documents.clone(),
                self.groups.clone(),
                self.recorder(),
                self.bus.clone(),
                self.locks.clone(),
            )),
            Arc::new(SubmitDraftRevisionHandler::new(
                self.documents.clone(),
                self.recorder(),
                self.bus.clone(),
                self.locks.clone(),
            )),
            Arc::new(ChangeDraftStateHandler::new(
                self.documents.clone(),
                self.recorder(),
                self.bus.clone(),
                self.locks.clone(),
            )),
            Arc::new(AddCommentHandler::new(
                self.documents.clone(),
                self.recorder(),
                self.bus.clone(),
                self.locks.clone(),
            )),
            Arc::new(GetDocumentHandler::new(
                self.documents.clone(),
                self.events.clone(),
            )),
            Arc::new(GetDocumentHistoryHandler::new(
                self.documents.clone(),
                self.events.clone(),
            )),
        );

        let ballots = BallotHandlers::new(
            Arc::new(IssueBallotHandler::new(
                self.documents.clone(),
                self.groups.clone(),
                self.people.clone(),
                self.recorder(),
                self.bus.clone(),
                self.locks.clone(),
            )),
            Arc::new(CloseBallotHandler::new(
                self.documents.clone(),
                self.recorder(),
                self.bus.clone(),
                self.locks.clone(),
            )),
            Arc::new(EditPositionHandler::new(
                self.documents.clone(),
                self.groups.clone(),
                self.people.clone(),
                self.recorder(),
                self.bus.clone(),
                self.locks.clone(),
            )),
            Arc::new(SendPositionEmailHandler::new(
                self.documents.clone(),
                self.events.clone(),
                self.groups.clone(),
                self.people.clone(),
                self.mailer.clone(),
                composer,
            )),
            Arc::new(BallotSummaryHandler::new(
                self.documents.clone(),
                self.events.clone(),
                self.groups.clone(),
                self.people.clone(),
            )),
        );

        let charters = CharterHandlers::new(
            Arc::new(StartCharteringHandler::new(
                self.documents.clone(),
                self.groups.clone(),
                self.texts.clone(),
                self.recorder(),
                self.bus.clone(),
                self.locks.clone(),
            )),
            Arc::new(ChangeCharterStateHandler::new(
                self.documents.clone(),
                self.groups.clone(),
                self.texts.clone(),
                self.recorder(),
                self.bus.clone(),
                self.locks.clone(),
            )),
            Arc::new(SubmitCharterTextHandler::new(
                self.documents.clone(),
                self.texts.clone(),
                self.recorder(),
                self.bus.clone(),
                self.locks.clone(),
            )),
            Arc::new(ApproveCharterHandler::new(
                self.documents.clone(),
                self.groups.clone(),
                self.texts.clone(),
                self.recorder(),
                self.bus.clone(),
                self.locks.clone(),
            )),
            Arc::new(ListMilestonesHandler::new(self.groups.clone())),
        );

        ApiHandlers {
            documents,
            ballots,
            charters,
        }
    }

    /// Subscribes the notifier and returns the full router.
    pub fn router(&self, composer: MessageComposer, settings: &HttpSettings) -> Router {
        self.subscribe_notifier(composer.clone());
        api_router(self.handlers(composer), settings)
    }
}

fn build_mailer(config: &MailConfig) -> Result<Arc<dyn Mailer>, DomainError> {
    match (config.transport, &config.resend_api_key) {
        (MailTransport::Resend, Some(key)) => {
            let resend = ResendConfig::new(key.expose_secret().clone())
                .with_base_url(config.resend_base_url.clone())
                .with_timeout(Duration::from_secs(config.timeout_secs));
            Ok(Arc::new(ResendMailer::new(resend)?))
        }
        (MailTransport::Resend, None) => Err(DomainError::new(
            ErrorCode::MailError,
            "resend transport needs an API key",
        )),
        (MailTransport::Log, _) => Ok(Arc::new(LogMailer::new())),
    }
}
