//! In-memory wiring shared by the handler tests.

use std::sync::Arc;

use crate::adapters::events::InMemoryEventBus;
use crate::adapters::mail::RecordingMailer;
use crate::adapters::memory::{
    InMemoryDocEventStore, InMemoryDocumentRepository, InMemoryGroupRepository,
    InMemoryPersonDirectory,
};
use crate::adapters::storage::InMemoryCharterTextStorage;
use crate::domain::doc_event::DocEventLog;
use crate::domain::document::{Document, NewDraft, StdLevel, Stream};
use crate::domain::foundation::{CommandMetadata, DocName, GroupAcronym, PersonId};
use crate::domain::group::{Group, GroupState, GroupType, Role, RoleName};
use crate::domain::mail::{MailSettings, MessageComposer};
use crate::domain::person::Person;
use crate::ports::{DocEventStore, DocumentRepository, GroupRepository, PersonDirectory};

use super::support::{DocEventRecorder, DocLocks};

pub struct TestWorld {
    pub documents: Arc<InMemoryDocumentRepository>,
    pub events: Arc<InMemoryDocEventStore>,
    pub groups: Arc<InMemoryGroupRepository>,
    pub people: Arc<InMemoryPersonDirectory>,
    pub texts: Arc<InMemoryCharterTextStorage>,
    pub mailer: Arc<RecordingMailer>,
    pub bus: Arc<InMemoryEventBus>,
    pub locks: DocLocks,
    pub secretary: PersonId,
    /// IESG area directors; the first one is responsible for the `art` area.
    pub ads: Vec<PersonId>,
    pub irsg: Vec<PersonId>,
    pub chair: PersonId,
}

impl TestWorld {
    pub async fn new() -> Self {
        let world = Self {
            documents: Arc::new(InMemoryDocumentRepository::new()),
            events: Arc::new(InMemoryDocEventStore::new()),
            groups: Arc::new(InMemoryGroupRepository::new()),
            people: Arc::new(InMemoryPersonDirectory::new()),
            texts: Arc::new(InMemoryCharterTextStorage::new()),
            mailer: Arc::new(RecordingMailer::new()),
            bus: Arc::new(InMemoryEventBus::new()),
            locks: DocLocks::new(),
            secretary: PersonId::new(),
            ads: (0..3).map(|_| PersonId::new()).collect(),
            irsg: (0..3).map(|_| PersonId::new()).collect(),
            chair: PersonId::new(),
        };
        world.seed().await;
        world
    }

    async fn seed(&self) {
        self.person(self.secretary, "Sec Retary", "secretary@ietf.org").await;
        self.person(self.chair, "Wendy Chair", "wendy@example.com").await;

        let mut iesg = Group::new(acronym("iesg"), "IESG", GroupType::Ietf, GroupState::Active).unwrap();
        for (i, ad) in self.ads.iter().enumerate() {
            let email = format!("ad{}@ietf.org", i);
            self.person(*ad, &format!("Area Director {}", i), &email).await;
            iesg.add_role(Role::new(RoleName::Ad, *ad, email));
        }
        self.groups.save(&iesg).await.unwrap();

        let mut irsg = Group::new(acronym("irsg"), "IRSG", GroupType::Irtf, GroupState::Active).unwrap();
        for (i, member) in self.irsg.iter().enumerate() {
            let email = format!("irsg{}@irtf.org", i);
            self.person(*member, &format!("Research Chair {}", i), &email).await;
            irsg.add_role(Role::new(RoleName::Member, *member, email));
        }
        self.groups.save(&irsg).await.unwrap();

        let area = Group::new(acronym("art"), "Applications and Real-Time Area", GroupType::Area, GroupState::Active)
            .unwrap()
            .with_role(Role::new(RoleName::Ad, self.ads[0], "ad0@ietf.org"));
        self.groups.save(&area).await.unwrap();

        let wg = Group::new(acronym("foo"), "Foo Protocol", GroupType::Wg, GroupState::Bof)
            .unwrap()
            .with_parent(acronym("art"))
            .with_list_email("foo@ietf.org")
            .with_role(Role::new(RoleName::Chair, self.chair, "wendy@example.com"));
        self.groups.save(&wg).await.unwrap();
    }

    async fn person(&self, id: PersonId, name: &str, email: &str) {
        self.people
            .save(&Person::new(id, name, email).unwrap())
            .await
            .unwrap();
    }

    pub fn metadata(&self) -> CommandMetadata {
        CommandMetadata::new(self.secretary).with_correlation_id("test-correlation")
    }

    pub fn metadata_for(&self, actor: PersonId) -> CommandMetadata {
        CommandMetadata::new(actor)
    }

    pub fn recorder(&self) -> DocEventRecorder {
        DocEventRecorder::new(self.events.clone())
    }

    pub fn composer(&self) -> MessageComposer {
        MessageComposer::new(MailSettings {
            from: "IETF Secretariat <ietf-secretariat-reply@ietf.org>".to_string(),
            announce_from: "The IESG <iesg-secretary@ietf.org>".to_string(),
            base_url: "https://datatracker.ietf.org".to_string(),
        })
    }

    /// Stores a draft directly, bypassing the register handler.
    pub async fn draft(&self, name: &str, stream: Stream, level: Option<StdLevel>) -> Document {
        let doc = Document::new_draft(NewDraft {
            name: DocName::new(name).unwrap(),
            title: format!("The {} protocol", name),
            group: Some(acronym("foo")),
            stream,
            intended_std_level: level,
            ad: Some(self.ads[0]),
            notify: vec!["authors@example.com".to_string()],
        })
        .unwrap();
        self.documents.save(&doc).await.unwrap();
        doc
    }

    pub async fn reload(&self, name: &DocName) -> Document {
        self.documents.find_by_name(name).await.unwrap().unwrap()
    }

    pub async fn log(&self, name: &DocName) -> DocEventLog {
        self.events.log_for(name).await.unwrap()
    }

    pub async fn group(&self, name: &str) -> Group {
        self.groups.find_by_acronym(&acronym(name)).await.unwrap().unwrap()
    }
}

pub fn acronym(value: &str) -> GroupAcronym {
    GroupAcronym::new(value).unwrap()
}

pub fn doc_name(value: &str) -> DocName {
    DocName::new(value).unwrap()
}
