//! End-to-end workflow scenarios folding full event sequences into a client
//! file, mirroring how an embedding system drives the aggregate.

use client_file::{
    client_file::{ClientFile, Task, TaskState, TaskType},
    event::{ClientFileEvent, ParticipantData, TaskData},
    fetcher::StubFetcher,
    types::Uid,
};

/// A file with one identity document task and one contract signature task.
fn creation_event() -> ClientFileEvent {
    ClientFileEvent::creation(
        Uid::new(),
        Uid::new(),
        ParticipantData {
            participant_id: Uid::new(),
            name: "Jean".to_owned(),
            email: "jean@test.com".to_owned(),
        },
        vec![
            TaskData {
                name: "cni".to_owned(),
                task_type: TaskType::Document,
            },
            TaskData {
                name: "contract".to_owned(),
                task_type: TaskType::Signature,
            },
        ],
    )
}

fn given_cni_and_contract_client_file() -> ClientFile {
    ClientFile::create(&creation_event(), &StubFetcher).unwrap()
}

fn cni(file: &ClientFile) -> &Task {
    file.task_by_id("cni").unwrap()
}

fn contract(file: &ClientFile) -> &Task {
    file.task_by_id("contract").unwrap()
}

#[test]
fn event_count_starts_at_1() {
    let mut file = given_cni_and_contract_client_file();
    assert_eq!(file.event_count(), 1);

    let event = ClientFileEvent::document_start(&file, Uid::new(), "cni");
    file.apply_event(&event);
    assert_eq!(file.event_count(), 2);
}

#[test]
fn creation_to_acceptance_standard_flow() {
    let mut file = given_cni_and_contract_client_file();

    assert_eq!(*cni(&file).state(), TaskState::Todo);
    assert_eq!(*contract(&file).state(), TaskState::Unavailable);

    let event = ClientFileEvent::document_start(&file, Uid::new(), "cni");
    file.apply_event(&event);
    assert_eq!(*cni(&file).state(), TaskState::InProgress);
    assert_eq!(*contract(&file).state(), TaskState::Unavailable);

    let event = ClientFileEvent::document(&file, Uid::new(), "cni", "John");
    file.apply_event(&event);
    assert_eq!(*cni(&file).state(), TaskState::Done);
    assert_eq!(*contract(&file).state(), TaskState::Todo);

    let event = ClientFileEvent::signature(&file, "contract");
    file.apply_event(&event);
    assert_eq!(*cni(&file).state(), TaskState::Done);
    assert_eq!(*contract(&file).state(), TaskState::Done);

    let event = ClientFileEvent::acceptation(&file, Uid::new());
    file.apply_event(&event);
    assert_eq!(*cni(&file).state(), TaskState::Unavailable);
    assert_eq!(*contract(&file).state(), TaskState::Unavailable);

    assert_eq!(file.event_count(), 5);
}

#[test]
fn update_and_reopen_tasks_before_acceptation() {
    let mut file = given_cni_and_contract_client_file();

    let event = ClientFileEvent::document_start(&file, Uid::new(), "cni");
    file.apply_event(&event);
    let event = ClientFileEvent::document(&file, Uid::new(), "cni", "Jane");
    file.apply_event(&event);
    let event = ClientFileEvent::signature(&file, "contract");
    file.apply_event(&event);
    assert_eq!(*cni(&file).state(), TaskState::Done);
    assert_eq!(*contract(&file).state(), TaskState::Done);
    assert_eq!(file.participant().name(), "Jean");

    let event = ClientFileEvent::update(&file, Uid::new(), "Jane");
    file.apply_event(&event);
    assert_eq!(file.participant().name(), "Jane");

    // Both tasks named, but only the document member reopens.
    let event = ClientFileEvent::reopen(
        &file,
        Uid::new(),
        vec!["cni".to_owned(), "contract".to_owned()],
    );
    file.apply_event(&event);
    assert_eq!(*cni(&file).state(), TaskState::Todo);
    assert_eq!(*contract(&file).state(), TaskState::Done);

    let event = ClientFileEvent::document_start(&file, Uid::new(), "cni");
    file.apply_event(&event);
    assert_eq!(*cni(&file).state(), TaskState::InProgress);
    assert_eq!(*contract(&file).state(), TaskState::Done);

    let event = ClientFileEvent::document(&file, Uid::new(), "cni", "Jean");
    file.apply_event(&event);
    assert_eq!(*cni(&file).state(), TaskState::Done);
    assert_eq!(*contract(&file).state(), TaskState::Todo);

    let event = ClientFileEvent::signature(&file, "contract");
    file.apply_event(&event);
    assert_eq!(*cni(&file).state(), TaskState::Done);
    assert_eq!(*contract(&file).state(), TaskState::Done);

    // A signature-only set reopens all of its members.
    let event = ClientFileEvent::reopen(&file, Uid::new(), vec!["contract".to_owned()]);
    file.apply_event(&event);
    assert_eq!(*cni(&file).state(), TaskState::Done);
    assert_eq!(*contract(&file).state(), TaskState::Todo);

    let event = ClientFileEvent::signature(&file, "contract");
    file.apply_event(&event);
    assert_eq!(*cni(&file).state(), TaskState::Done);
    assert_eq!(*contract(&file).state(), TaskState::Done);

    let event = ClientFileEvent::acceptation(&file, Uid::new());
    file.apply_event(&event);
    assert_eq!(*cni(&file).state(), TaskState::Unavailable);
    assert_eq!(*contract(&file).state(), TaskState::Unavailable);
}

#[test]
fn update_events_change_the_participant_name() {
    let mut file = given_cni_and_contract_client_file();
    assert_eq!(file.participant().name(), "Jean");

    let event = ClientFileEvent::update(&file, Uid::new(), "Jane");
    file.apply_event(&event);

    assert_eq!(file.participant().name(), "Jane");
}

#[test]
fn first_acceptation_wins() {
    let mut file = given_cni_and_contract_client_file();
    assert!(file.acceptation_date().is_none());

    let event = ClientFileEvent::acceptation(&file, Uid::new());
    file.apply_event(&event);
    assert_eq!(file.acceptation_date(), Some(&event.date_time));

    // A later automatic acceptance never overwrites the recorded date.
    let event2 = ClientFileEvent::auto_acceptation(&file);
    file.apply_event(&event2);
    assert_eq!(file.acceptation_date(), Some(&event.date_time));
}

#[test]
fn auto_acceptation_behaves_like_manual_acceptation() {
    let mut file = given_cni_and_contract_client_file();

    let event = ClientFileEvent::auto_acceptation(&file);
    file.apply_event(&event);

    assert_eq!(*cni(&file).state(), TaskState::Unavailable);
    assert_eq!(*contract(&file).state(), TaskState::Unavailable);
    assert_eq!(file.acceptation_date(), Some(&event.date_time));
    assert!(event.operator_id.is_system());
}
