//! Conversation controller.
//!
//! Drives one chat: validates input and configuration, appends the user turn
//! optimistically, hands the request to the [`Exchange`], then either appends
//! the assistant reply or rolls the user turn back and produces a
//! [`Notification`].
//!
//! States are `Idle`, `AwaitingConfig` and `Sending`. At most one exchange is
//! in flight: a submit while `Sending` is rejected, never queued.
//!
//! Submitting is split into [`ConversationController::begin_submit`] and
//! [`ConversationController::complete`] so a UI can keep polling its input
//! while the request runs. [`ConversationController::submit`] does both.

use std::sync::Arc;

use medassist_types::chat::{ChatTurn, SessionId};
use medassist_types::error::{ConfigError, ExchangeError};
use medassist_types::exchange::{ExchangeRequest, FALLBACK_REPLY};
use medassist_types::notification::Notification;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::chat::conversation::Conversation;
use crate::config::endpoint::EndpointSettings;
use crate::config::store::ConfigStore;
use crate::exchange::transport::Exchange;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Idle,
    /// The configuration prompt is open.
    AwaitingConfig,
    /// An exchange is in flight.
    Sending,
}

/// Why a submit did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Empty or whitespace-only input.
    Blank,
    /// Another exchange is already in flight.
    Busy,
}

/// An exchange that has been dispatched but not yet completed.
///
/// The user turn it refers to is already in the conversation.
#[derive(Debug)]
pub struct PendingExchange {
    turn_id: Uuid,
    request: ExchangeRequest,
}

impl PendingExchange {
    pub fn turn_id(&self) -> Uuid {
        self.turn_id
    }

    pub fn request(&self) -> &ExchangeRequest {
        &self.request
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Ignored(IgnoreReason),
    /// No endpoint configured; the controller moved to `AwaitingConfig`.
    NeedsConfig(Notification),
    Dispatched(PendingExchange),
}

#[derive(Debug)]
pub enum ExchangeOutcome {
    /// The assistant reply was appended.
    Replied(ChatTurn),
    /// The reply had no usable text; the fallback turn was appended.
    Fallback(ChatTurn),
    /// The user turn was rolled back.
    Failed(Notification),
    /// The conversation was reset while the request was in flight.
    Discarded,
}

#[derive(Debug)]
pub enum SubmitResult {
    Ignored(IgnoreReason),
    NeedsConfig(Notification),
    Completed(ExchangeOutcome),
}

pub struct ConversationController<E: Exchange, S: ConfigStore> {
    exchange: Arc<E>,
    settings: EndpointSettings<S>,
    conversation: Conversation,
    session_id: SessionId,
    state: ControllerState,
}

impl<E: Exchange, S: ConfigStore> ConversationController<E, S> {
    /// Create a controller with a fresh session id and an empty conversation.
    ///
    /// Starts in `AwaitingConfig` when no endpoint is configured.
    pub fn new(exchange: Arc<E>, settings: EndpointSettings<S>) -> Self {
        let state = if settings.is_configured() {
            ControllerState::Idle
        } else {
            ControllerState::AwaitingConfig
        };
        let session_id = SessionId::generate();
        debug!(session_id = %session_id, ?state, "Conversation controller created");

        Self {
            exchange,
            settings,
            conversation: Conversation::new(),
            session_id,
            state,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn endpoint(&self) -> Option<&str> {
        self.settings.get()
    }

    pub fn is_configured(&self) -> bool {
        self.settings.is_configured()
    }

    /// Shared handle to the exchange, for callers driving `begin_submit`
    /// and `complete` themselves.
    pub fn exchange(&self) -> Arc<E> {
        Arc::clone(&self.exchange)
    }

    /// Validate input and, if accepted, append the user turn and enter
    /// `Sending`.
    pub fn begin_submit(&mut self, text: &str) -> SubmitOutcome {
        let text = text.trim();
        if text.is_empty() {
            return SubmitOutcome::Ignored(IgnoreReason::Blank);
        }
        if self.state == ControllerState::Sending {
            debug!("Submit rejected, exchange already in flight");
            return SubmitOutcome::Ignored(IgnoreReason::Busy);
        }

        let Some(endpoint) = self.settings.get() else {
            info!("Submit without a webhook URL, opening settings");
            self.state = ControllerState::AwaitingConfig;
            return SubmitOutcome::NeedsConfig(Notification::config_required());
        };

        let request = ExchangeRequest {
            session_id: self.session_id.clone(),
            chat_input: text.to_string(),
            endpoint: endpoint.to_string(),
        };
        let turn_id = self.conversation.push(ChatTurn::user(text));
        self.state = ControllerState::Sending;

        SubmitOutcome::Dispatched(PendingExchange { turn_id, request })
    }

    /// Apply the result of a dispatched exchange and return to `Idle`.
    pub fn complete(
        &mut self,
        pending: PendingExchange,
        result: Result<String, ExchangeError>,
    ) -> ExchangeOutcome {
        self.state = ControllerState::Idle;

        match result {
            Ok(text) => self.append_reply(&pending, text, false),
            Err(ExchangeError::EmptyResponse) => {
                self.append_reply(&pending, FALLBACK_REPLY.to_string(), true)
            }
            Err(err) => {
                self.conversation.remove(&pending.turn_id);
                warn!(error = %err, "Exchange failed, user turn rolled back");
                match Notification::for_exchange_error(&err) {
                    Some(notification) => ExchangeOutcome::Failed(notification),
                    None => ExchangeOutcome::Discarded,
                }
            }
        }
    }

    fn append_reply(
        &mut self,
        pending: &PendingExchange,
        text: String,
        fallback: bool,
    ) -> ExchangeOutcome {
        if !self.conversation.contains(&pending.turn_id) {
            info!("Conversation was reset during the exchange, discarding reply");
            return ExchangeOutcome::Discarded;
        }

        let turn = ChatTurn::assistant(text);
        self.conversation.push(turn.clone());
        if fallback {
            ExchangeOutcome::Fallback(turn)
        } else {
            ExchangeOutcome::Replied(turn)
        }
    }

    /// Submit `text` and wait for the exchange to settle.
    #[tracing::instrument(name = "submit", skip_all, fields(session_id = %self.session_id))]
    pub async fn submit(&mut self, text: &str) -> SubmitResult {
        let pending = match self.begin_submit(text) {
            SubmitOutcome::Ignored(reason) => return SubmitResult::Ignored(reason),
            SubmitOutcome::NeedsConfig(notification) => {
                return SubmitResult::NeedsConfig(notification);
            }
            SubmitOutcome::Dispatched(pending) => pending,
        };

        let exchange = self.exchange();
        let result = exchange.send(pending.request()).await;
        SubmitResult::Completed(self.complete(pending, result))
    }

    /// Clear the conversation. Does not touch an in-flight request.
    ///
    /// Returns the number of turns removed.
    pub fn reset(&mut self) -> usize {
        let removed = self.conversation.clear();
        info!(removed, "Conversation cleared");
        removed
    }

    /// Open the configuration prompt. Ignored while `Sending`.
    pub fn open_settings(&mut self) {
        if self.state != ControllerState::Sending {
            self.state = ControllerState::AwaitingConfig;
        }
    }

    /// Close the configuration prompt without saving.
    pub fn close_settings(&mut self) {
        if self.state == ControllerState::AwaitingConfig {
            self.state = ControllerState::Idle;
        }
    }

    /// Validate and persist a new webhook URL, closing the prompt on success.
    pub async fn configure(&mut self, url: &str) -> Result<(), ConfigError> {
        self.settings.set(url).await?;
        self.close_settings();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use medassist_types::chat::TurnRole;
    use medassist_types::notification::NotificationKind;

    use crate::config::endpoint::ENDPOINT_KEY;
    use crate::config::store::MemoryConfigStore;
    use crate::exchange::deadline::with_deadline;

    const WEBHOOK: &str = "https://n8n.example.com/webhook/med";
    const FEVER: &str = "I have a fever, cough, and chest pains";

    /// Exchange double that replays scripted results and records requests.
    #[derive(Default)]
    struct ScriptedExchange {
        replies: Mutex<VecDeque<Result<String, ExchangeError>>>,
        requests: Mutex<Vec<ExchangeRequest>>,
        calls: AtomicUsize,
    }

    impl ScriptedExchange {
        fn replying(replies: Vec<Result<String, ExchangeError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                ..Default::default()
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl Exchange for ScriptedExchange {
        async fn send(&self, request: &ExchangeRequest) -> Result<String, ExchangeError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.requests.lock().unwrap().push(request.clone());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(ExchangeError::EmptyResponse))
        }
    }

    /// Backend that answers long after the deadline.
    struct SlowExchange {
        limit: Duration,
    }

    impl Exchange for SlowExchange {
        async fn send(&self, _request: &ExchangeRequest) -> Result<String, ExchangeError> {
            with_deadline(self.limit, async {
                tokio::time::sleep(Duration::from_secs(600)).await;
                Ok("too late".to_string())
            })
            .await
        }
    }

    async fn controller_with<E: Exchange>(
        exchange: Arc<E>,
        url: Option<&str>,
    ) -> ConversationController<E, MemoryConfigStore> {
        let store = match url {
            Some(url) => MemoryConfigStore::with_entry(ENDPOINT_KEY, url),
            None => MemoryConfigStore::new(),
        };
        let settings = EndpointSettings::load(store).await.unwrap();
        ConversationController::new(exchange, settings)
    }

    fn contents(controller: &ConversationController<impl Exchange, MemoryConfigStore>) -> Vec<(TurnRole, String)> {
        controller
            .conversation()
            .turns()
            .iter()
            .map(|t| (t.role, t.content.clone()))
            .collect()
    }

    #[tokio::test]
    async fn test_begin_submit_appends_user_turn_before_exchange() {
        let exchange = ScriptedExchange::replying(vec![]);
        let mut controller = controller_with(exchange.clone(), Some(WEBHOOK)).await;

        let outcome = controller.begin_submit("  I have a headache  ");
        let SubmitOutcome::Dispatched(pending) = outcome else {
            panic!("expected dispatch");
        };

        assert_eq!(controller.state(), ControllerState::Sending);
        assert_eq!(controller.conversation().len(), 1);
        assert_eq!(exchange.calls(), 0);

        let turn = &controller.conversation().turns()[0];
        assert_eq!(turn.role, TurnRole::User);
        assert_eq!(turn.content, "I have a headache");
        assert_eq!(turn.id, pending.turn_id());
        assert_eq!(pending.request().chat_input, "I have a headache");
        assert_eq!(pending.request().endpoint, WEBHOOK);
        assert_eq!(&pending.request().session_id, controller.session_id());
    }

    #[tokio::test]
    async fn test_blank_submit_is_noop() {
        let exchange = ScriptedExchange::replying(vec![]);
        let mut controller = controller_with(exchange.clone(), Some(WEBHOOK)).await;

        for blank in ["", "   ", "\n\t"] {
            let result = controller.submit(blank).await;
            assert!(matches!(result, SubmitResult::Ignored(IgnoreReason::Blank)));
        }
        assert!(controller.conversation().is_empty());
        assert_eq!(controller.state(), ControllerState::Idle);
        assert_eq!(exchange.calls(), 0);
    }

    #[tokio::test]
    async fn test_unconfigured_starts_awaiting_config() {
        let controller = controller_with(ScriptedExchange::replying(vec![]), None).await;
        assert_eq!(controller.state(), ControllerState::AwaitingConfig);
        assert!(!controller.is_configured());
    }

    #[tokio::test]
    async fn test_submit_without_endpoint_never_calls_exchange() {
        let exchange = ScriptedExchange::replying(vec![Ok("unused".to_string())]);
        let mut controller = controller_with(exchange.clone(), None).await;
        controller.close_settings();
        assert_eq!(controller.state(), ControllerState::Idle);

        let result = controller.submit(FEVER).await;
        let SubmitResult::NeedsConfig(notification) = result else {
            panic!("expected NeedsConfig");
        };

        assert_eq!(notification.kind, NotificationKind::ConfigRequired);
        assert_eq!(controller.state(), ControllerState::AwaitingConfig);
        assert!(controller.conversation().is_empty());
        assert_eq!(exchange.calls(), 0);
    }

    #[tokio::test]
    async fn test_configure_then_submit() {
        let exchange = ScriptedExchange::replying(vec![Ok("Rest and fluids.".to_string())]);
        let mut controller = controller_with(exchange.clone(), None).await;

        let err = controller.configure("   ").await.unwrap_err();
        assert!(matches!(err, ConfigError::EmptyUrl));
        assert_eq!(controller.state(), ControllerState::AwaitingConfig);

        controller.configure(WEBHOOK).await.unwrap();
        assert_eq!(controller.state(), ControllerState::Idle);
        assert_eq!(controller.endpoint(), Some(WEBHOOK));

        let result = controller.submit("sore throat").await;
        assert!(matches!(
            result,
            SubmitResult::Completed(ExchangeOutcome::Replied(_))
        ));
        assert_eq!(exchange.requests.lock().unwrap()[0].endpoint, WEBHOOK);
    }

    #[tokio::test]
    async fn test_fever_scenario_yields_two_turns() {
        let exchange = ScriptedExchange::replying(vec![Ok(
            "Possible conditions: flu, bronchitis...".to_string(),
        )]);
        let mut controller = controller_with(exchange, Some(WEBHOOK)).await;

        let result = controller.submit(FEVER).await;
        assert!(matches!(
            result,
            SubmitResult::Completed(ExchangeOutcome::Replied(_))
        ));
        assert_eq!(
            contents(&controller),
            vec![
                (TurnRole::User, FEVER.to_string()),
                (TurnRole::Assistant, "Possible conditions: flu, bronchitis...".to_string()),
            ]
        );
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[tokio::test]
    async fn test_empty_response_appends_fallback() {
        let exchange = ScriptedExchange::replying(vec![Err(ExchangeError::EmptyResponse)]);
        let mut controller = controller_with(exchange, Some(WEBHOOK)).await;

        let result = controller.submit(FEVER).await;
        assert!(matches!(
            result,
            SubmitResult::Completed(ExchangeOutcome::Fallback(_))
        ));
        assert_eq!(
            contents(&controller),
            vec![
                (TurnRole::User, FEVER.to_string()),
                (TurnRole::Assistant, FALLBACK_REPLY.to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_failures_roll_back_to_prior_turns() {
        let failures = vec![
            (ExchangeError::Timeout, NotificationKind::Timeout),
            (
                ExchangeError::Http { status: 502, body: "bad gateway".to_string() },
                NotificationKind::Http,
            ),
            (ExchangeError::Network("connection refused".to_string()), NotificationKind::Network),
            (ExchangeError::Decode("expected value".to_string()), NotificationKind::Decode),
        ];

        for (error, expected_kind) in failures {
            let exchange = ScriptedExchange::replying(vec![Ok("first answer".to_string()), Err(error)]);
            let mut controller = controller_with(exchange, Some(WEBHOOK)).await;

            controller.submit("first question").await;
            let before = contents(&controller);
            assert_eq!(before.len(), 2);

            let result = controller.submit("second question").await;
            let SubmitResult::Completed(ExchangeOutcome::Failed(notification)) = result else {
                panic!("expected failure");
            };

            assert_eq!(notification.kind, expected_kind);
            assert_eq!(contents(&controller), before);
            assert_eq!(controller.state(), ControllerState::Idle);
        }
    }

    #[tokio::test]
    async fn test_http_500_notification_hides_body() {
        let exchange = ScriptedExchange::replying(vec![Err(ExchangeError::Http {
            status: 500,
            body: "oops".to_string(),
        })]);
        let mut controller = controller_with(exchange, Some(WEBHOOK)).await;

        let result = controller.submit(FEVER).await;
        let SubmitResult::Completed(ExchangeOutcome::Failed(notification)) = result else {
            panic!("expected failure");
        };

        assert_eq!(notification.kind, NotificationKind::Http);
        assert!(notification.message.contains("500"));
        assert!(!notification.message.contains("oops"));
        assert!(controller.conversation().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_backend_slower_than_deadline_times_out() {
        let exchange = Arc::new(SlowExchange {
            limit: Duration::from_millis(120_000),
        });
        let mut controller = controller_with(exchange, Some(WEBHOOK)).await;

        let result = controller.submit(FEVER).await;
        let SubmitResult::Completed(ExchangeOutcome::Failed(notification)) = result else {
            panic!("expected timeout");
        };

        assert_eq!(notification.kind, NotificationKind::Timeout);
        assert!(controller.conversation().is_empty());
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[tokio::test]
    async fn test_rapid_submits_dispatch_one_exchange() {
        let exchange = ScriptedExchange::replying(vec![Ok("answer".to_string())]);
        let mut controller = controller_with(exchange.clone(), Some(WEBHOOK)).await;

        let SubmitOutcome::Dispatched(pending) = controller.begin_submit("first") else {
            panic!("first submit should dispatch");
        };
        let second = controller.begin_submit("second");
        assert!(matches!(second, SubmitOutcome::Ignored(IgnoreReason::Busy)));

        let result = controller.exchange().send(pending.request()).await;
        controller.complete(pending, result);

        assert_eq!(exchange.calls(), 1);
        assert_eq!(
            contents(&controller),
            vec![
                (TurnRole::User, "first".to_string()),
                (TurnRole::Assistant, "answer".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_reset_is_idempotent() {
        let exchange = ScriptedExchange::replying(vec![Ok("answer".to_string())]);
        let mut controller = controller_with(exchange, Some(WEBHOOK)).await;
        controller.submit(FEVER).await;

        assert_eq!(controller.reset(), 2);
        assert!(controller.conversation().is_empty());
        assert_eq!(controller.reset(), 0);
        assert!(controller.conversation().is_empty());
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[tokio::test]
    async fn test_reset_during_send_discards_reply() {
        let exchange = ScriptedExchange::replying(vec![Ok("late answer".to_string())]);
        let mut controller = controller_with(exchange, Some(WEBHOOK)).await;

        let SubmitOutcome::Dispatched(pending) = controller.begin_submit(FEVER) else {
            panic!("submit should dispatch");
        };
        controller.reset();
        assert_eq!(controller.state(), ControllerState::Sending);

        let result = controller.exchange().send(pending.request()).await;
        let outcome = controller.complete(pending, result);

        assert!(matches!(outcome, ExchangeOutcome::Discarded));
        assert!(controller.conversation().is_empty());
        assert_eq!(controller.state(), ControllerState::Idle);
    }

    #[tokio::test]
    async fn test_session_id_is_stable_across_exchanges() {
        let exchange = ScriptedExchange::replying(vec![Ok("a".to_string()), Ok("b".to_string())]);
        let mut controller = controller_with(exchange.clone(), Some(WEBHOOK)).await;

        controller.submit("one").await;
        controller.submit("two").await;

        let requests = exchange.requests.lock().unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].session_id, requests[1].session_id);
        assert_eq!(&requests[0].session_id, controller.session_id());
    }

    #[tokio::test]
    async fn test_settings_transitions() {
        let mut controller = controller_with(ScriptedExchange::replying(vec![]), Some(WEBHOOK)).await;

        controller.open_settings();
        assert_eq!(controller.state(), ControllerState::AwaitingConfig);
        controller.close_settings();
        assert_eq!(controller.state(), ControllerState::Idle);

        let SubmitOutcome::Dispatched(_pending) = controller.begin_submit("hello") else {
            panic!("submit should dispatch");
        };
        controller.open_settings();
        assert_eq!(controller.state(), ControllerState::Sending);
    }
}
