//! The client file event hierarchy
//!
//! Every event carries the same identity block (event id, owning client file,
//! 1-based sequential number, timestamp, operator) plus a variant payload.
//! Constructing an event performs no validation; whether a transition is
//! meaningful is decided by the fold in [`crate::client_file`].
use crate::client_file::{ClientFile, TaskType};
use crate::types::{TimeStamp, Uid};
use chrono::Utc;

#[derive(Debug, Clone, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub struct ClientFileEvent {
    #[n(0)]
    pub event_id: Uid,
    #[n(1)]
    pub client_file_id: Uid,
    #[n(2)]
    pub event_number: u64,
    #[n(3)]
    pub date_time: TimeStamp<Utc>,
    #[n(4)]
    pub operator_id: Uid,
    #[n(5)]
    pub payload: EventPayload,
}

#[derive(Debug, Clone, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub enum EventPayload {
    #[n(0)]
    Creation {
        #[n(0)]
        participant: ParticipantData,
        #[n(1)]
        tasks: Vec<TaskData>,
    },
    #[n(1)]
    DocumentStart {
        #[n(0)]
        task_id: String,
    },
    #[n(2)]
    Document {
        #[n(0)]
        task_id: String,
        #[n(1)]
        participant_name_found: String,
    },
    #[n(3)]
    Signature {
        #[n(0)]
        task_id: String,
    },
    #[n(4)]
    Acceptation,
    #[n(5)]
    AutoAcceptation,
    #[n(6)]
    Reopen {
        #[n(0)]
        task_ids: Vec<String>,
    },
    #[n(7)]
    Update {
        #[n(0)]
        new_name: String,
    },
}

/// Participant seed carried by a creation event.
#[derive(Debug, Clone, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub struct ParticipantData {
    #[n(0)]
    pub participant_id: Uid,
    #[n(1)]
    pub name: String,
    #[n(2)]
    pub email: String,
}

/// Task seed carried by a creation event: a unique name and a fixed type.
#[derive(Debug, Clone, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub struct TaskData {
    #[n(0)]
    pub name: String,
    #[n(1)]
    pub task_type: TaskType,
}

impl ClientFileEvent {
    /// A creation event is always number 1 in its stream.
    pub fn creation(
        client_file_id: Uid,
        operator_id: Uid,
        participant: ParticipantData,
        tasks: Vec<TaskData>,
    ) -> Self {
        Self {
            event_id: Uid::new(),
            client_file_id,
            event_number: 1,
            date_time: TimeStamp::new(),
            operator_id,
            payload: EventPayload::Creation { participant, tasks },
        }
    }

    pub fn document_start(file: &ClientFile, operator_id: Uid, task_id: &str) -> Self {
        Self::next(
            file,
            operator_id,
            EventPayload::DocumentStart {
                task_id: task_id.to_owned(),
            },
        )
    }

    pub fn document(
        file: &ClientFile,
        operator_id: Uid,
        task_id: &str,
        participant_name_found: &str,
    ) -> Self {
        Self::next(
            file,
            operator_id,
            EventPayload::Document {
                task_id: task_id.to_owned(),
                participant_name_found: participant_name_found.to_owned(),
            },
        )
    }

    /// Signatures are recorded by the signing provider, not a human operator.
    pub fn signature(file: &ClientFile, task_id: &str) -> Self {
        Self::next(
            file,
            Uid::system(),
            EventPayload::Signature {
                task_id: task_id.to_owned(),
            },
        )
    }

    pub fn acceptation(file: &ClientFile, operator_id: Uid) -> Self {
        Self::next(file, operator_id, EventPayload::Acceptation)
    }

    pub fn auto_acceptation(file: &ClientFile) -> Self {
        Self::next(file, Uid::system(), EventPayload::AutoAcceptation)
    }

    pub fn reopen(file: &ClientFile, operator_id: Uid, task_ids: Vec<String>) -> Self {
        Self::next(file, operator_id, EventPayload::Reopen { task_ids })
    }

    pub fn update(file: &ClientFile, operator_id: Uid, new_name: &str) -> Self {
        Self::next(
            file,
            operator_id,
            EventPayload::Update {
                new_name: new_name.to_owned(),
            },
        )
    }

    // Stamps the identity block from the current aggregate: next sequential
    // number, fresh event id, current wall clock.
    fn next(file: &ClientFile, operator_id: Uid, payload: EventPayload) -> Self {
        Self {
            event_id: Uid::new(),
            client_file_id: file.client_file_id().clone(),
            event_number: file.event_count() + 1,
            date_time: TimeStamp::new(),
            operator_id,
            payload,
        }
    }
}
