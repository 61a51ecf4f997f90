use crate::actions::{
    ActionService, ActionServiceTrait, MastodonApiTrait, MuteDuration, Poll, PollOption,
    Relationship, Status,
};
use crate::errors::{Error, NetworkError, Result};
use crate::events::{DomainEvent, MockDomainEventSink};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};

// --- Mock remote API ---
#[derive(Default)]
pub(crate) struct MockMastodonApi {
    calls: Mutex<Vec<String>>,
    failure: Mutex<Option<NetworkError>>,
}

impl MockMastodonApi {
    pub(crate) fn failing_with(error: NetworkError) -> Self {
        let api = Self::default();
        *api.failure.lock().unwrap() = Some(error);
        api
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn respond<T>(&self, call: String, value: T) -> Result<T> {
        self.calls.lock().unwrap().push(call);
        match self.failure.lock().unwrap().clone() {
            Some(err) => Err(Error::NetworkFailure(err)),
            None => Ok(value),
        }
    }
}

fn status(id: &str) -> Status {
    Status {
        id: id.to_string(),
        author_account_id: "author".to_string(),
        content: "<p>hello</p>".to_string(),
        text: None,
        created_at: Utc::now(),
        reblogged: false,
        favourited: false,
        bookmarked: false,
        pinned: false,
        muted: false,
        poll: None,
    }
}

fn poll(id: &str, own_votes: &[u32]) -> Poll {
    Poll {
        id: id.to_string(),
        expires_at: None,
        expired: false,
        multiple: own_votes.len() > 1,
        votes_count: 10,
        voters_count: Some(10),
        options: vec![
            PollOption {
                title: "a".to_string(),
                votes_count: Some(6),
            },
            PollOption {
                title: "b".to_string(),
                votes_count: Some(4),
            },
        ],
        voted: true,
        own_votes: own_votes.to_vec(),
    }
}

fn relationship(id: &str) -> Relationship {
    Relationship {
        id: id.to_string(),
        ..Default::default()
    }
}

#[async_trait]
impl MastodonApiTrait for MockMastodonApi {
    async fn reblog_status(&self, status_id: &str) -> Result<Status> {
        self.respond(format!("reblog {}", status_id), status(status_id))
    }
    async fn unreblog_status(&self, status_id: &str) -> Result<Status> {
        self.respond(format!("unreblog {}", status_id), status(status_id))
    }
    async fn favourite_status(&self, status_id: &str) -> Result<Status> {
        self.respond(format!("favourite {}", status_id), status(status_id))
    }
    async fn unfavourite_status(&self, status_id: &str) -> Result<Status> {
        self.respond(format!("unfavourite {}", status_id), status(status_id))
    }
    async fn bookmark_status(&self, status_id: &str) -> Result<Status> {
        self.respond(format!("bookmark {}", status_id), status(status_id))
    }
    async fn unbookmark_status(&self, status_id: &str) -> Result<Status> {
        self.respond(format!("unbookmark {}", status_id), status(status_id))
    }
    async fn mute_conversation(&self, status_id: &str) -> Result<Status> {
        self.respond(format!("mute_conversation {}", status_id), status(status_id))
    }
    async fn unmute_conversation(&self, status_id: &str) -> Result<Status> {
        self.respond(format!("unmute_conversation {}", status_id), status(status_id))
    }
    async fn pin_status(&self, status_id: &str) -> Result<Status> {
        self.respond(format!("pin {}", status_id), status(status_id))
    }
    async fn unpin_status(&self, status_id: &str) -> Result<Status> {
        self.respond(format!("unpin {}", status_id), status(status_id))
    }
    async fn delete_status(&self, status_id: &str) -> Result<Status> {
        self.respond(format!("delete {}", status_id), status(status_id))
    }
    async fn vote_in_poll(&self, poll_id: &str, choices: &[u32]) -> Result<Poll> {
        self.respond(
            format!("vote {} {:?}", poll_id, choices),
            poll(poll_id, choices),
        )
    }
    async fn mute_account(
        &self,
        account_id: &str,
        notifications: bool,
        duration: MuteDuration,
    ) -> Result<Relationship> {
        self.respond(
            format!(
                "mute_account {} {} {}",
                account_id,
                notifications,
                duration.as_secs()
            ),
            relationship(account_id),
        )
    }
    async fn block_account(&self, account_id: &str) -> Result<Relationship> {
        self.respond(format!("block {}", account_id), relationship(account_id))
    }
    async fn unfollow_account(&self, account_id: &str) -> Result<Relationship> {
        self.respond(format!("unfollow {}", account_id), relationship(account_id))
    }
    async fn authorize_follow_request(&self, account_id: &str) -> Result<Relationship> {
        self.respond(format!("authorize {}", account_id), relationship(account_id))
    }
    async fn reject_follow_request(&self, account_id: &str) -> Result<Relationship> {
        self.respond(format!("reject {}", account_id), relationship(account_id))
    }
}

fn create_service(
    api: MockMastodonApi,
) -> (ActionService, Arc<MockMastodonApi>, MockDomainEventSink) {
    let api = Arc::new(api);
    let sink = MockDomainEventSink::new();
    let service = ActionService::new(api.clone(), Arc::new(sink.clone()));
    (service, api, sink)
}

pub(crate) fn server_error(status: u16, message: &str) -> NetworkError {
    NetworkError::http(status, format!(r#"{{"error":"{}"}}"#, message))
}

#[tokio::test]
async fn test_reblog_publishes_event_after_success() {
    let (service, api, sink) = create_service(MockMastodonApi::default());

    let result = service.reblog("42", true).await.unwrap();

    assert_eq!(result.id, "42");
    assert_eq!(api.calls(), vec!["reblog 42"]);
    assert_eq!(sink.events(), vec![DomainEvent::reblogged("42", true)]);
}

#[tokio::test]
async fn test_on_and_off_use_distinct_remote_calls() {
    let (service, api, sink) = create_service(MockMastodonApi::default());

    service.reblog("1", false).await.unwrap();
    service.favourite("1", true).await.unwrap();
    service.favourite("1", false).await.unwrap();
    service.bookmark("1", true).await.unwrap();
    service.bookmark("1", false).await.unwrap();
    service.mute_conversation("1", true).await.unwrap();
    service.mute_conversation("1", false).await.unwrap();
    service.pin("1", true).await.unwrap();
    service.pin("1", false).await.unwrap();

    assert_eq!(
        api.calls(),
        vec![
            "unreblog 1",
            "favourite 1",
            "unfavourite 1",
            "bookmark 1",
            "unbookmark 1",
            "mute_conversation 1",
            "unmute_conversation 1",
            "pin 1",
            "unpin 1",
        ]
    );
    assert_eq!(
        sink.events(),
        vec![
            DomainEvent::reblogged("1", false),
            DomainEvent::favourited("1", true),
            DomainEvent::favourited("1", false),
            DomainEvent::bookmarked("1", true),
            DomainEvent::bookmarked("1", false),
            DomainEvent::conversation_muted("1", true),
            DomainEvent::conversation_muted("1", false),
            DomainEvent::pinned("1", true),
            DomainEvent::pinned("1", false),
        ]
    );
}

#[tokio::test]
async fn test_failed_actions_publish_nothing_and_propagate() {
    let (service, api, sink) =
        create_service(MockMastodonApi::failing_with(NetworkError::http(500, "")));

    for on in [true, false] {
        assert!(matches!(
            service.reblog("1", on).await,
            Err(Error::NetworkFailure(_))
        ));
        assert!(matches!(
            service.favourite("1", on).await,
            Err(Error::NetworkFailure(_))
        ));
        assert!(matches!(
            service.bookmark("1", on).await,
            Err(Error::NetworkFailure(_))
        ));
        assert!(matches!(
            service.mute_conversation("1", on).await,
            Err(Error::NetworkFailure(_))
        ));
        assert!(matches!(
            service.pin("1", on).await,
            Err(Error::ServerRejected(_))
        ));
    }
    assert!(matches!(
        service.delete("1").await,
        Err(Error::NetworkFailure(_))
    ));
    assert!(matches!(
        service.vote_in_poll("1", "p1", vec![0]).await,
        Err(Error::NetworkFailure(_))
    ));
    assert!(matches!(
        service.unfollow("a1").await,
        Err(Error::NetworkFailure(_))
    ));
    assert!(matches!(
        service.accept_follow_request("a1").await,
        Err(Error::NetworkFailure(_))
    ));
    assert!(matches!(
        service.reject_follow_request("a1").await,
        Err(Error::NetworkFailure(_))
    ));

    assert_eq!(
        api.calls(),
        vec![
            "reblog 1",
            "favourite 1",
            "bookmark 1",
            "mute_conversation 1",
            "pin 1",
            "unreblog 1",
            "unfavourite 1",
            "unbookmark 1",
            "unmute_conversation 1",
            "unpin 1",
            "delete 1",
            "vote p1 [0]",
            "unfollow a1",
            "authorize a1",
            "reject a1",
        ]
    );
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_network_failure_keeps_status_code() {
    let (service, _api, _sink) =
        create_service(MockMastodonApi::failing_with(NetworkError::http(404, "")));

    match service.favourite("9", true).await {
        Err(Error::NetworkFailure(err)) => assert_eq!(err.status, Some(404)),
        other => panic!("Expected NetworkFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_pin_failure_becomes_server_rejected() {
    let (service, api, sink) = create_service(MockMastodonApi::failing_with(server_error(
        422,
        "Too many pinned statuses",
    )));

    match service.pin("7", true).await {
        Err(Error::ServerRejected(message)) => assert_eq!(message, "Too many pinned statuses"),
        other => panic!("Expected ServerRejected, got {:?}", other),
    }
    assert_eq!(api.calls(), vec!["pin 7"]);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_unpin_failure_without_server_message_uses_http_message() {
    let (service, _api, sink) =
        create_service(MockMastodonApi::failing_with(NetworkError::http(503, "")));

    match service.pin("7", false).await {
        Err(Error::ServerRejected(message)) => assert_eq!(message, "HTTP 503"),
        other => panic!("Expected ServerRejected, got {:?}", other),
    }
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_pin_transport_failure_stays_network_failure() {
    let (service, api, sink) = create_service(MockMastodonApi::failing_with(
        NetworkError::transport("connection reset"),
    ));

    match service.pin("7", true).await {
        Err(Error::NetworkFailure(err)) => {
            assert_eq!(err.status, None);
            assert_eq!(err.message, "connection reset");
        }
        other => panic!("Expected NetworkFailure, got {:?}", other),
    }
    assert_eq!(api.calls(), vec!["pin 7"]);
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_vote_with_empty_choices_is_rejected_without_remote_call() {
    let (service, api, sink) = create_service(MockMastodonApi::default());

    let result = service.vote_in_poll("s1", "p1", vec![]).await;

    assert!(matches!(result, Err(Error::InvalidArgument(_))));
    assert!(api.calls().is_empty());
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_vote_publishes_updated_poll() {
    let (service, api, sink) = create_service(MockMastodonApi::default());

    let updated = service.vote_in_poll("s1", "p1", vec![0, 1]).await.unwrap();

    assert_eq!(updated.own_votes, vec![0, 1]);
    assert_eq!(api.calls(), vec!["vote p1 [0, 1]"]);
    assert_eq!(sink.events(), vec![DomainEvent::poll_voted("s1", updated)]);
}

#[tokio::test]
async fn test_delete_and_account_actions_publish_matching_events() {
    let (service, _api, sink) = create_service(MockMastodonApi::default());

    service.delete("5").await.unwrap();
    service.unfollow("a1").await.unwrap();
    service.accept_follow_request("a2").await.unwrap();
    service.reject_follow_request("a3").await.unwrap();

    assert_eq!(
        sink.events(),
        vec![
            DomainEvent::status_deleted("5"),
            DomainEvent::unfollowed("a1"),
            DomainEvent::follow_request_answered("a2", true),
            DomainEvent::follow_request_answered("a3", false),
        ]
    );
}

#[tokio::test]
async fn test_mute_and_block_account_publish_on_success() {
    let (service, api, sink) = create_service(MockMastodonApi::default());

    service
        .mute_account("a1", true, MuteDuration::Seconds(3600))
        .await;
    service.block_account("a2").await;

    assert_eq!(api.calls(), vec!["mute_account a1 true 3600", "block a2"]);
    assert_eq!(
        sink.events(),
        vec![
            DomainEvent::account_muted("a1"),
            DomainEvent::account_blocked("a2"),
        ]
    );
}

#[tokio::test]
async fn test_mute_and_block_account_swallow_failures() {
    let (service, api, sink) =
        create_service(MockMastodonApi::failing_with(NetworkError::http(503, "")));

    service
        .mute_account("a1", false, MuteDuration::Indefinite)
        .await;
    service.block_account("a2").await;

    assert_eq!(api.calls(), vec!["mute_account a1 false 0", "block a2"]);
    assert!(sink.is_empty());
}
