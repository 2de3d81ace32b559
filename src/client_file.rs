//! The client file aggregate and its fold
//!
//! A [`ClientFile`] is rebuilt by folding its ordered event stream: `create`
//! seeds the aggregate from the creation event, `apply_event` folds every
//! subsequent one. The fold is total: no event is ever rejected based on task
//! state, and operations naming an unknown task id are no-ops.
use crate::error::EventStreamError;
use crate::event::{ClientFileEvent, EventPayload};
use crate::fetcher::CompanyFetcher;
use crate::types::{TimeStamp, Uid};
use chrono::Utc;

#[derive(Debug, Clone, PartialEq, Eq, minicbor::Encode, minicbor::Decode)]
pub enum TaskType {
    #[n(0)]
    Document,
    #[n(1)]
    Signature,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Unavailable,
    Todo,
    InProgress,
    Done,
}

/// One unit of work tracked within a client file. Identity and type are fixed
/// at creation; only the state moves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    task_id: String,
    task_type: TaskType,
    state: TaskState,
}

impl Task {
    pub fn task_id(&self) -> &str {
        &self.task_id
    }
    pub fn task_type(&self) -> &TaskType {
        &self.task_type
    }
    pub fn state(&self) -> &TaskState {
        &self.state
    }
}

/// The person the file is about. Identity and email never change; the display
/// name moves through Update events only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    participant_id: Uid,
    email: String,
    name: String,
}

impl Participant {
    pub fn participant_id(&self) -> &Uid {
        &self.participant_id
    }
    pub fn email(&self) -> &str {
        &self.email
    }
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFile {
    client_file_id: Uid,
    creation_date: TimeStamp<Utc>,
    participant: Participant,
    // Fixed at creation. Never reordered, grown or shrunk.
    tasks: Vec<Task>,
    acceptation_date: Option<TimeStamp<Utc>>,
    event_count: u64,
}

impl ClientFile {
    /// Build the initial aggregate from a creation event.
    ///
    /// Seeds the participant and one `Unavailable` task per entry in the
    /// event's task list, then folds the same creation event in, so the
    /// returned aggregate is already at event count 1 with every Document
    /// task in `Todo` and every Signature task in `Unavailable`.
    ///
    /// Errors only when handed a non-creation event.
    pub fn create(
        event: &ClientFileEvent,
        fetcher: &dyn CompanyFetcher,
    ) -> Result<Self, EventStreamError> {
        let EventPayload::Creation { participant, tasks } = &event.payload else {
            return Err(EventStreamError::NotCreation);
        };

        // Consulted at creation for downstream consumers; the aggregate
        // itself does not record the result.
        let _company_name = fetcher.company_name();

        let mut file = Self {
            client_file_id: event.client_file_id.clone(),
            creation_date: event.date_time.clone(),
            participant: Participant {
                participant_id: participant.participant_id.clone(),
                email: participant.email.clone(),
                name: participant.name.clone(),
            },
            tasks: tasks
                .iter()
                .map(|t| Task {
                    task_id: t.name.clone(),
                    task_type: t.task_type.clone(),
                    state: TaskState::Unavailable,
                })
                .collect(),
            acceptation_date: None,
            event_count: 0,
        };
        file.apply_event(event);
        Ok(file)
    }

    /// Fold one event into the aggregate, in place, and return it so folds
    /// can be chained.
    ///
    /// Four independent sub-steps: event counter, task states, participant
    /// name, acceptation date. Each touches a disjoint piece of state.
    pub fn apply_event(&mut self, event: &ClientFileEvent) -> &mut Self {
        self.apply_event_count(event);
        self.apply_task_state(event);
        self.apply_participant_name(event);
        self.apply_acceptation_date(event);
        self
    }

    fn apply_event_count(&mut self, _event: &ClientFileEvent) {
        self.event_count += 1;
    }

    fn apply_task_state(&mut self, event: &ClientFileEvent) {
        match &event.payload {
            EventPayload::Creation { .. } => {
                for task in &mut self.tasks {
                    task.state = TaskState::Unavailable;
                }
                for task in self.document_tasks_mut() {
                    task.state = TaskState::Todo;
                }
            }

            EventPayload::DocumentStart { task_id } => {
                if let Some(task) = self.task_by_id_mut(task_id) {
                    task.state = TaskState::InProgress;
                }
            }

            EventPayload::Document { task_id, .. } => {
                if let Some(task) = self.task_by_id_mut(task_id) {
                    task.state = TaskState::Done;
                }

                // Completing any single document task unlocks every signature
                // task, even while other document tasks remain open.
                for task in self.signature_tasks_mut() {
                    task.state = TaskState::Todo;
                }
            }

            EventPayload::Signature { task_id } => {
                if let Some(task) = self.task_by_id_mut(task_id) {
                    task.state = TaskState::Done;
                }
            }

            EventPayload::Reopen { task_ids } => {
                // Unknown ids are dropped before the branch is chosen.
                let reopened: Vec<usize> = task_ids
                    .iter()
                    .filter_map(|id| self.tasks.iter().position(|t| t.task_id == *id))
                    .collect();
                let has_document = reopened
                    .iter()
                    .any(|&i| self.tasks[i].task_type == TaskType::Document);

                for &i in &reopened {
                    // With at least one document task in the set, only the
                    // document members reopen; otherwise the whole set does.
                    if !has_document || self.tasks[i].task_type == TaskType::Document {
                        self.tasks[i].state = TaskState::Todo;
                    }
                }
            }

            EventPayload::Acceptation | EventPayload::AutoAcceptation => {
                for task in &mut self.tasks {
                    task.state = TaskState::Unavailable;
                }
            }

            EventPayload::Update { .. } => {}
        }
    }

    fn apply_participant_name(&mut self, event: &ClientFileEvent) {
        if let EventPayload::Update { new_name } = &event.payload {
            self.participant.name = new_name.clone();
        }
    }

    fn apply_acceptation_date(&mut self, event: &ClientFileEvent) {
        match &event.payload {
            EventPayload::Acceptation | EventPayload::AutoAcceptation => {
                // First applied acceptance wins, manual or automatic.
                if self.acceptation_date.is_none() {
                    self.acceptation_date = Some(event.date_time.clone());
                }
            }
            _ => {}
        }
    }

    pub fn task_by_id(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.task_id == id)
    }

    fn task_by_id_mut(&mut self, id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.task_id == id)
    }

    fn document_tasks_mut(&mut self) -> impl Iterator<Item = &mut Task> {
        self.tasks
            .iter_mut()
            .filter(|t| t.task_type == TaskType::Document)
    }

    fn signature_tasks_mut(&mut self) -> impl Iterator<Item = &mut Task> {
        self.tasks
            .iter_mut()
            .filter(|t| t.task_type == TaskType::Signature)
    }

    pub fn client_file_id(&self) -> &Uid {
        &self.client_file_id
    }

    pub fn creation_date(&self) -> &TimeStamp<Utc> {
        &self.creation_date
    }

    pub fn participant(&self) -> &Participant {
        &self.participant
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn acceptation_date(&self) -> Option<&TimeStamp<Utc>> {
        self.acceptation_date.as_ref()
    }

    pub fn event_count(&self) -> u64 {
        self.event_count
    }
}
