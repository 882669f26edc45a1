use std::rc::Rc;

use log::{debug, error, warn};
use tokio::sync::watch;

use crate::bridge::TopicSubscription;
use crate::filter_view::FilterView;
use crate::knowledge::{KnowledgeTables, TopicTable};
use crate::models::{ChatMessage, FaqEntry, Topic};
use crate::sanitize::{InputFilter, filter_input};
use crate::service::AnswerService;

pub const SEED_MESSAGE: &str =
    "Hi! I'm the FAQ assistant. Ask me a question or pick a topic from the sidebar.";
pub const ERROR_MESSAGE: &str =
    "Sorry, something went wrong while fetching an answer. Please try again.";

/// Everything the chat panel shows. Published as a whole on every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelState {
    pub transcript: Vec<ChatMessage>,
    pub topic: Option<Topic>,
    pub busy: bool,
    pub feedback: Option<String>,
    pub last_query: Option<String>,
    /// `None` means unfiltered: the full transcript is shown.
    pub filter: Option<FilterView>,
}

impl PanelState {
    fn seeded(topic: Option<Topic>) -> Self {
        Self {
            transcript: vec![ChatMessage::assistant(SEED_MESSAGE)],
            topic,
            busy: false,
            feedback: None,
            last_query: None,
            filter: None,
        }
    }

    /// Messages matching the last query, or the whole transcript when unfiltered.
    pub fn visible_messages(&self) -> &[ChatMessage] {
        match &self.filter {
            Some(view) => &view.messages,
            None => &self.transcript,
        }
    }

    fn refresh_filter(&mut self, faqs: &TopicTable<FaqEntry>) {
        if let Some(query) = &self.last_query {
            self.filter = Some(FilterView::compute(query, &self.transcript, faqs, self.topic));
        }
    }

    fn reset_filter(&mut self) {
        self.last_query = None;
        self.filter = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Another submit was still in flight.
    Ignored,
    /// Nothing left to send after cleaning the input.
    Rejected,
    Answered,
    /// The answer service failed and an error message was appended instead.
    Failed,
}

/// Owns the conversation for one session and drives the answer service.
///
/// All mutation goes through `watch::Sender::send_modify`, so state is never
/// borrowed across the await on the service.
pub struct ChatPanel<S> {
    service: S,
    tables: Rc<KnowledgeTables>,
    state: watch::Sender<PanelState>,
}

impl<S: AnswerService> ChatPanel<S> {
    /// `topic` is the initial context and does not produce a notice.
    pub fn new(service: S, tables: Rc<KnowledgeTables>, topic: Option<Topic>) -> Self {
        let (state, _rx) = watch::channel(PanelState::seeded(topic));
        Self { service, tables, state }
    }

    pub fn snapshot(&self) -> PanelState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified after every state change.
    pub fn watch(&self) -> watch::Receiver<PanelState> {
        self.state.subscribe()
    }

    pub async fn submit(&self, raw: &str) -> SubmitOutcome {
        if self.state.borrow().busy {
            debug!("submit ignored: a request is already in flight");
            return SubmitOutcome::Ignored;
        }

        let InputFilter { cleaned, feedback } = filter_input(raw);
        let Some(question) = cleaned else {
            self.state.send_modify(|s| s.feedback = feedback);
            return SubmitOutcome::Rejected;
        };

        let mut topic = None;
        self.state.send_modify(|s| {
            s.transcript.push(ChatMessage::user(question.clone()));
            s.busy = true;
            s.feedback = feedback;
            s.last_query = Some(question.clone());
            s.refresh_filter(&self.tables.faqs);
            topic = s.topic;
        });

        let (reply, outcome) = match self.service.ask(&question, topic.map(|t| t.id())).await {
            Ok(reply) => (reply, SubmitOutcome::Answered),
            Err(e) => {
                if e.is_transport() {
                    warn!("answer backend unreachable: {e}");
                } else {
                    error!("answer service failed: {e}");
                }
                (ChatMessage::assistant_error(ERROR_MESSAGE), SubmitOutcome::Failed)
            }
        };

        self.state.send_modify(|s| {
            s.transcript.push(reply);
            s.busy = false;
            s.refresh_filter(&self.tables.faqs);
        });
        outcome
    }

    /// Resets the transcript to the seed message and drops any filter.
    pub fn clear(&self) {
        self.state.send_modify(|s| {
            s.transcript = vec![ChatMessage::assistant(SEED_MESSAGE)];
            s.feedback = None;
            s.reset_filter();
        });
    }

    /// Switches the topic context. Unchanged topics are ignored.
    pub fn set_topic(&self, topic: Option<Topic>) {
        self.state.send_if_modified(|s| {
            if s.topic == topic {
                return false;
            }
            s.topic = topic;
            s.transcript.push(ChatMessage::topic_notice(topic));
            s.reset_filter();
            true
        });
    }

    /// Applies every topic published on `topics` until its bridge goes away.
    pub async fn follow(&self, mut topics: TopicSubscription) {
        while let Some(topic) = topics.changed().await {
            self.set_topic(topic);
        }
        debug!("topic bridge closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bridge::TopicBridge;
    use crate::config::LatencyProfile;
    use crate::error::WidgetError;
    use crate::models::Role;
    use crate::sanitize::{EMPTY_INPUT_FEEDBACK, MASKED_FEEDBACK};
    use crate::service::MockRagService;
    use crate::service::tests::TokioSleep;

    struct FailingService;

    impl AnswerService for FailingService {
        async fn ask(&self, _question: &str, _topic: Option<&str>) -> Result<ChatMessage, WidgetError> {
            tokio::time::sleep(std::time::Duration::from_millis(100)).await;
            Err(WidgetError::service("boom"))
        }
    }

    fn mock_panel(topic: Option<Topic>) -> ChatPanel<MockRagService<TokioSleep>> {
        let tables = Rc::new(KnowledgeTables::builtin());
        let service = MockRagService::new(tables.clone(), LatencyProfile::default(), TokioSleep);
        ChatPanel::new(service, tables, topic)
    }

    #[tokio::test(start_paused = true)]
    async fn rate_limit_question_end_to_end() {
        let panel = mock_panel(Some(Topic::Api));

        let (outcome, ()) = tokio::join!(panel.submit("What are the rate limits?"), async {
            // The user message lands before the answer arrives.
            let state = panel.snapshot();
            assert!(state.busy);
            assert_eq!(state.transcript.len(), 2);
            assert_eq!(state.transcript[1], ChatMessage::user("What are the rate limits?"));
        });

        assert_eq!(outcome, SubmitOutcome::Answered);
        let state = panel.snapshot();
        assert!(!state.busy);
        assert_eq!(state.transcript.len(), 3);

        let reply = &state.transcript[2];
        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.content.starts_with("Here's what I found using api.docs.search:"));
        assert!(reply.content.contains("Rate limits are 100 requests per minute per API key"));
    }

    #[tokio::test(start_paused = true)]
    async fn submit_while_busy_is_a_no_op() {
        let panel = mock_panel(None);

        let (first, second) = tokio::join!(panel.submit("first question"), panel.submit("second question"));

        assert_eq!(first, SubmitOutcome::Answered);
        assert_eq!(second, SubmitOutcome::Ignored);
        let transcript = panel.snapshot().transcript;
        assert_eq!(transcript.len(), 3);
        assert!(!transcript.iter().any(|m| m.content == "second question"));
    }

    #[tokio::test(start_paused = true)]
    async fn service_failure_appends_error_message_and_clears_busy() {
        let tables = Rc::new(KnowledgeTables::builtin());
        let panel = ChatPanel::new(FailingService, tables, None);

        assert_eq!(panel.submit("anything").await, SubmitOutcome::Failed);

        let state = panel.snapshot();
        assert!(!state.busy);
        let last = state.transcript.last().unwrap();
        assert_eq!(last, &ChatMessage::assistant_error(ERROR_MESSAGE));

        // The filter is recomputed over the transcript that holds the error.
        let view = state.filter.as_ref().expect("filter view after failure");
        assert_eq!(view.query, "anything");
        assert_eq!(view.messages, vec![ChatMessage::user("anything")]);

        // The panel is usable again afterwards.
        assert_eq!(panel.submit("went wrong").await, SubmitOutcome::Failed);
        let state = panel.snapshot();
        assert_eq!(state.transcript.len(), 5);
        let view = state.filter.as_ref().expect("filter view after second failure");
        assert_eq!(
            view.messages,
            vec![
                ChatMessage::assistant_error(ERROR_MESSAGE),
                ChatMessage::user("went wrong"),
                ChatMessage::assistant_error(ERROR_MESSAGE),
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn empty_input_never_reaches_the_transcript() {
        let panel = mock_panel(None);

        assert_eq!(panel.submit(" \n\t ").await, SubmitOutcome::Rejected);

        let state = panel.snapshot();
        assert_eq!(state.transcript.len(), 1);
        assert_eq!(state.feedback.as_deref(), Some(EMPTY_INPUT_FEEDBACK));
        assert!(!state.busy);
        assert_eq!(state.filter, None);
    }

    #[tokio::test(start_paused = true)]
    async fn masked_input_is_still_sent() {
        let panel = mock_panel(None);

        assert_eq!(panel.submit("this is  OFFENSIVE <b>").await, SubmitOutcome::Answered);

        let state = panel.snapshot();
        assert_eq!(state.transcript[1].content, "this is **** b");
        assert_eq!(state.feedback.as_deref(), Some(MASKED_FEEDBACK));
    }

    #[tokio::test(start_paused = true)]
    async fn filter_view_reflects_final_transcript() {
        let panel = mock_panel(Some(Topic::Api));

        panel.submit("rate limits").await;

        let state = panel.snapshot();
        let view = state.filter.as_ref().expect("filter view after submit");
        assert_eq!(view.query, "rate limits");
        assert_eq!(view.messages.len(), 2);
        assert_eq!(view.messages[0].role, Role::User);
        assert_eq!(view.messages[1].role, Role::Assistant);
        assert_eq!(view.faqs.len(), 1);
        assert_eq!(state.visible_messages(), view.messages.as_slice());
        assert_eq!(state.transcript.len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn clear_resets_to_single_seed_message() {
        let panel = mock_panel(Some(Topic::Api));
        panel.submit("rate limits").await;

        panel.clear();

        let state = panel.snapshot();
        assert_eq!(state.transcript, vec![ChatMessage::assistant(SEED_MESSAGE)]);
        assert_eq!(state.filter, None);
        assert_eq!(state.last_query, None);
        assert_eq!(state.visible_messages(), state.transcript.as_slice());
    }

    #[tokio::test(start_paused = true)]
    async fn topic_change_appends_notice_and_resets_filter() {
        let panel = mock_panel(Some(Topic::Api));
        let mut rx = panel.watch();
        panel.submit("rate limits").await;
        assert!(panel.snapshot().filter.is_some());

        panel.set_topic(Some(Topic::Security));

        let state = rx.borrow_and_update().clone();
        assert_eq!(state.topic, Some(Topic::Security));
        assert_eq!(state.filter, None);
        assert_eq!(state.transcript.last(), Some(&ChatMessage::topic_notice(Some(Topic::Security))));

        panel.set_topic(Some(Topic::Security));
        assert!(!rx.has_changed().unwrap());
        assert_eq!(panel.snapshot().transcript.len(), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn active_topic_is_forwarded_to_the_service() {
        let panel = mock_panel(Some(Topic::Security));

        panel.submit("sso setup").await;

        let reply = panel.snapshot().transcript.last().cloned().unwrap();
        assert!(reply.content.contains("security.policy.fetch"));
        assert!(reply.content.contains("SSO is available via SAML 2.0"));
    }

    #[tokio::test(start_paused = true)]
    async fn panel_follows_topic_bridge() {
        let bridge = TopicBridge::new();
        let panel = mock_panel(bridge.current());
        panel.submit("getting started").await;
        assert!(panel.snapshot().filter.is_some());

        let topics = bridge.subscribe();
        tokio::join!(panel.follow(topics), async move {
            bridge.set_topic(Some(Topic::Security));
            tokio::task::yield_now().await;
            bridge.set_topic(Some(Topic::Security));
            drop(bridge);
        });

        let state = panel.snapshot();
        assert_eq!(state.topic, Some(Topic::Security));
        assert_eq!(state.filter, None);
        assert_eq!(state.transcript.len(), 4);
        assert_eq!(state.transcript.last(), Some(&ChatMessage::topic_notice(Some(Topic::Security))));
    }
}
