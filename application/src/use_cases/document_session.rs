//! Document session use case.
//!
//! The single owner of the chat [`Session`]: ingests documents, sends
//! questions, starts new threads and tracks the context view toggle.
//!
//! All operations take `&self`. Session state sits behind a mutex that is
//! never held across an `.await`, so the presentation can read a
//! [`snapshot`](DocumentSessionUseCase::snapshot) and the in-flight
//! [`Activity`] while an ingest or send is suspended at the adapter
//! boundary. At most one ingest or send runs at a time; a second one
//! started meanwhile is ignored.

use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::document_extractor::{DocumentTextExtractor, ExtractionError};
use crate::ports::model_client::ConversationalModelClient;
use crate::ports::progress::{NoProgress, SessionProgressNotifier};
use paperchat_domain::util::preview;
use paperchat_domain::{Announcement, DocumentUpload, Message, Question, Session};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// What the session is currently waiting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Idle,
    /// A document is being extracted
    Ingesting,
    /// A question is with the model
    Thinking,
}

impl Activity {
    fn to_u8(self) -> u8 {
        match self {
            Activity::Idle => 0,
            Activity::Ingesting => 1,
            Activity::Thinking => 2,
        }
    }

    fn from_u8(value: u8) -> Self {
        match value {
            1 => Activity::Ingesting,
            2 => Activity::Thinking,
            _ => Activity::Idle,
        }
    }
}

/// Why a send was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The input was empty or whitespace only
    EmptyInput,
    /// Another ingest or send is in flight
    Busy,
    /// No document context is loaded
    NoContext,
}

/// Result of [`DocumentSessionUseCase::send`].
///
/// Model failures are not errors here: they are recorded in the transcript
/// as an agent message and reported as [`SendOutcome::Failed`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Nothing was appended and no call was made
    Ignored(SkipReason),
    /// The model answered; carries the appended agent message
    Answered(Message),
    /// The model call failed; carries the appended error message
    Failed(Message),
}

/// Summary of a successful ingestion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestReport {
    pub document_name: String,
    /// Context length in characters
    pub characters: usize,
    pub pages: usize,
}

/// Result of [`DocumentSessionUseCase::ingest`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestOutcome {
    Ingested(IngestReport),
    /// Another ingest or send is in flight; nothing happened
    Ignored,
}

/// Clears the activity flag when the operation ends, on every exit path.
struct InFlight<'a> {
    activity: &'a AtomicU8,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.activity.store(Activity::Idle.to_u8(), Ordering::Release);
    }
}

/// Use case owning a document chat session.
pub struct DocumentSessionUseCase {
    extractor: Arc<dyn DocumentTextExtractor>,
    model_client: Arc<dyn ConversationalModelClient>,
    conversation_logger: Arc<dyn ConversationLogger>,
    session: Mutex<Session>,
    activity: AtomicU8,
    context_view: AtomicBool,
}

impl DocumentSessionUseCase {
    pub fn new(
        extractor: Arc<dyn DocumentTextExtractor>,
        model_client: Arc<dyn ConversationalModelClient>,
    ) -> Self {
        Self {
            extractor,
            model_client,
            conversation_logger: Arc::new(NoConversationLogger),
            session: Mutex::new(Session::new()),
            activity: AtomicU8::new(Activity::Idle.to_u8()),
            context_view: AtomicBool::new(false),
        }
    }

    /// Create with a conversation logger.
    pub fn with_conversation_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.conversation_logger = logger;
        self
    }

    // ==================== State accessors ====================

    /// Copy of the current session, for rendering
    pub fn snapshot(&self) -> Session {
        self.lock_session().clone()
    }

    pub fn activity(&self) -> Activity {
        Activity::from_u8(self.activity.load(Ordering::Acquire))
    }

    pub fn is_ingesting(&self) -> bool {
        self.activity() == Activity::Ingesting
    }

    pub fn is_thinking(&self) -> bool {
        self.activity() == Activity::Thinking
    }

    /// Whether an ingest or send is in flight
    pub fn is_busy(&self) -> bool {
        self.activity() != Activity::Idle
    }

    pub fn context_view_visible(&self) -> bool {
        self.context_view.load(Ordering::Acquire)
    }

    // ==================== Operations ====================

    /// Extract `upload` and make it the active document.
    ///
    /// On failure the session is left exactly as it was and the error is
    /// returned for display.
    pub async fn ingest(&self, upload: &DocumentUpload) -> Result<IngestOutcome, ExtractionError> {
        self.ingest_with_progress(upload, &NoProgress).await
    }

    pub async fn ingest_with_progress(
        &self,
        upload: &DocumentUpload,
        progress: &dyn SessionProgressNotifier,
    ) -> Result<IngestOutcome, ExtractionError> {
        let Some(_in_flight) = self.begin(Activity::Ingesting) else {
            debug!("Ignoring ingest of {}: another operation is in flight", upload.name());
            return Ok(IngestOutcome::Ignored);
        };

        info!(
            "Ingesting document {} ({} bytes)",
            upload.name(),
            upload.bytes().len()
        );
        progress.on_ingest_start(upload.name());
        let extracted = self.extractor.extract(upload.bytes()).await;
        progress.on_ingest_end(extracted.is_ok());

        let document = match extracted {
            Ok(document) => document,
            Err(e) => {
                warn!(
                    "Extraction of {} failed: {} ({})",
                    upload.name(),
                    e,
                    e.detail().unwrap_or("no detail")
                );
                return Err(e);
            }
        };

        let context = document.to_context();
        let report = {
            let mut session = self.lock_session();
            session.load_document(upload.name(), context);
            IngestReport {
                document_name: upload.name().to_string(),
                characters: session.context_chars(),
                pages: document.page_count(),
            }
        };

        info!(
            "Ingested {}: {} pages, {} characters",
            report.document_name, report.pages, report.characters
        );
        self.conversation_logger.log(ConversationEvent::document_ingested(
            &report.document_name,
            report.characters,
            report.pages,
        ));

        Ok(IngestOutcome::Ingested(report))
    }

    /// Ask a question about the loaded document.
    pub async fn send(&self, text: &str) -> SendOutcome {
        self.send_with_progress(text, &NoProgress).await
    }

    pub async fn send_with_progress(
        &self,
        text: &str,
        progress: &dyn SessionProgressNotifier,
    ) -> SendOutcome {
        let Some(question) = Question::try_new(text) else {
            return SendOutcome::Ignored(SkipReason::EmptyInput);
        };
        let Some(_in_flight) = self.begin(Activity::Thinking) else {
            debug!("Ignoring send: another operation is in flight");
            return SendOutcome::Ignored(SkipReason::Busy);
        };

        // History and context are captured before the new message is added,
        // so the in-flight question is never part of its own history.
        let (context, history, user_message) = {
            let mut session = self.lock_session();
            if !session.has_context() {
                debug!("Ignoring send: no document loaded");
                return SendOutcome::Ignored(SkipReason::NoContext);
            }
            let history = session.history();
            let context = session.context().to_string();
            let user_message = Message::human(question.content());
            session.push(user_message.clone());
            (context, history, user_message)
        };

        info!("Question: {}", preview(question.content(), 100));
        self.conversation_logger
            .log(ConversationEvent::user_message(&user_message));

        progress.on_thinking_start();
        let result = self
            .model_client
            .ask(question.content(), &context, &history)
            .await;
        progress.on_thinking_end(result.is_ok());

        match result {
            Ok(answer) => {
                debug!(
                    "Answer from {} ({} bytes)",
                    self.model_client.model_name(),
                    answer.len()
                );
                let message = Message::agent(answer);
                self.lock_session().push(message.clone());
                self.conversation_logger.log(ConversationEvent::agent_message(
                    &message,
                    self.model_client.model_name(),
                ));
                SendOutcome::Answered(message)
            }
            Err(e) => {
                warn!("Model call failed: {}", e);
                let message = Message::agent(Announcement::model_failure(&e));
                self.lock_session().push(message.clone());
                self.conversation_logger
                    .log(ConversationEvent::agent_error(&message, &e.to_string()));
                SendOutcome::Failed(message)
            }
        }
    }

    /// Start a new thread over the current document.
    ///
    /// Returns the refresh announcement when a document is loaded.
    pub fn reset(&self) -> Option<Message> {
        let (announcement, document_name) = {
            let mut session = self.lock_session();
            let announcement = session.reset().cloned();
            (announcement, session.document_name().map(str::to_string))
        };
        info!(
            "Session reset (document: {})",
            document_name.as_deref().unwrap_or("none")
        );
        self.conversation_logger
            .log(ConversationEvent::session_reset(document_name.as_deref()));
        announcement
    }

    /// Flip the context view flag and return the new value.
    pub fn toggle_context_view(&self) -> bool {
        !self.context_view.fetch_xor(true, Ordering::AcqRel)
    }

    // ==================== Helpers ====================

    fn begin(&self, activity: Activity) -> Option<InFlight<'_>> {
        self.activity
            .compare_exchange(
                Activity::Idle.to_u8(),
                activity.to_u8(),
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .ok()
            .map(|_| InFlight {
                activity: &self.activity,
            })
    }

    fn lock_session(&self) -> MutexGuard<'_, Session> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::model_client::ModelError;
    use async_trait::async_trait;
    use paperchat_domain::{
        CONFIGURATION_GUIDANCE, ExtractedDocument, ExtractedPage, Sender, Turn, TurnRole,
    };
    use std::collections::VecDeque;
    use tokio::sync::Notify;

    // ==================== Test Mocks ====================

    struct StubExtractor {
        result: Result<ExtractedDocument, ExtractionError>,
    }

    impl StubExtractor {
        fn pages(pages: &[&str]) -> Self {
            let pages = pages
                .iter()
                .map(|p| ExtractedPage::new(vec![p.to_string()]))
                .collect();
            Self {
                result: Ok(ExtractedDocument::new(pages)),
            }
        }

        fn failing(error: ExtractionError) -> Self {
            Self { result: Err(error) }
        }
    }

    #[async_trait]
    impl DocumentTextExtractor for StubExtractor {
        async fn extract(&self, _payload: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
            self.result.clone()
        }
    }

    /// Extractor that blocks until released, to observe in-flight state.
    struct GatedExtractor {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl DocumentTextExtractor for GatedExtractor {
        async fn extract(&self, _payload: &[u8]) -> Result<ExtractedDocument, ExtractionError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok(ExtractedDocument::new(vec![ExtractedPage::new(vec![
                "gated".to_string(),
            ])]))
        }
    }

    #[derive(Debug, Clone)]
    struct RecordedCall {
        question: String,
        context: String,
        history: Vec<Turn>,
    }

    struct MockModelClient {
        responses: Mutex<VecDeque<Result<String, ModelError>>>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl MockModelClient {
        fn new(responses: Vec<Result<String, ModelError>>) -> Self {
            Self {
                responses: Mutex::new(VecDeque::from(responses)),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ConversationalModelClient for MockModelClient {
        fn model_name(&self) -> &str {
            "mock-model"
        }

        async fn ask(
            &self,
            question: &str,
            context: &str,
            history: &[Turn],
        ) -> Result<String, ModelError> {
            self.calls.lock().unwrap().push(RecordedCall {
                question: question.to_string(),
                context: context.to_string(),
                history: history.to_vec(),
            });
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ModelError::Connection("no more responses".to_string())))
        }
    }

    /// Model client that blocks until released.
    struct GatedModelClient {
        entered: Notify,
        release: Notify,
    }

    #[async_trait]
    impl ConversationalModelClient for GatedModelClient {
        fn model_name(&self) -> &str {
            "gated-model"
        }

        async fn ask(
            &self,
            _question: &str,
            _context: &str,
            _history: &[Turn],
        ) -> Result<String, ModelError> {
            self.entered.notify_one();
            self.release.notified().await;
            Ok("released".to_string())
        }
    }

    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ConversationLogger for RecordingLogger {
        fn log(&self, event: ConversationEvent) {
            self.events.lock().unwrap().push(event.kind());
        }
    }

    #[derive(Default)]
    struct RecordingProgress {
        events: Mutex<Vec<String>>,
    }

    impl SessionProgressNotifier for RecordingProgress {
        fn on_ingest_start(&self, document_name: &str) {
            self.events
                .lock()
                .unwrap()
                .push(format!("ingest_start:{}", document_name));
        }

        fn on_ingest_end(&self, success: bool) {
            self.events
                .lock()
                .unwrap()
                .push(format!("ingest_end:{}", success));
        }

        fn on_thinking_start(&self) {
            self.events.lock().unwrap().push("thinking_start".to_string());
        }

        fn on_thinking_end(&self, success: bool) {
            self.events
                .lock()
                .unwrap()
                .push(format!("thinking_end:{}", success));
        }
    }

    fn upload(name: &str) -> DocumentUpload {
        DocumentUpload::pdf(name, b"%PDF-1.5".to_vec()).unwrap()
    }

    fn use_case(
        extractor: StubExtractor,
        client: Arc<MockModelClient>,
    ) -> DocumentSessionUseCase {
        DocumentSessionUseCase::new(Arc::new(extractor), client)
    }

    async fn loaded_use_case(client: Arc<MockModelClient>) -> DocumentSessionUseCase {
        let uc = use_case(StubExtractor::pages(&["Hello", "World"]), client);
        uc.ingest(&upload("a.pdf")).await.unwrap();
        uc
    }

    // ==================== Ingest ====================

    #[tokio::test]
    async fn test_ingest_two_page_document() {
        let client = Arc::new(MockModelClient::new(vec![]));
        let uc = use_case(StubExtractor::pages(&["Hello", "World"]), client);

        let outcome = uc.ingest(&upload("a.pdf")).await.unwrap();

        assert_eq!(
            outcome,
            IngestOutcome::Ingested(IngestReport {
                document_name: "a.pdf".to_string(),
                characters: 28,
                pages: 2,
            })
        );
        let session = uc.snapshot();
        assert_eq!(session.context(), "Page 1:\nHello\n\nPage 2:\nWorld");
        assert_eq!(session.document_name(), Some("a.pdf"));
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].sender(), Sender::Agent);
        assert_eq!(
            session.messages()[0].text(),
            "Document analysis initialized for \"a.pdf\". I've ingested 28 characters of context. You may begin your inquiry."
        );
        assert!(!uc.is_busy());
    }

    #[tokio::test]
    async fn test_ingest_replaces_previous_document_and_transcript() {
        let client = Arc::new(MockModelClient::new(vec![Ok("answer".to_string())]));
        let uc = loaded_use_case(client).await;
        uc.send("question").await;
        assert_eq!(uc.snapshot().messages().len(), 3);

        let second = DocumentSessionUseCase {
            extractor: Arc::new(StubExtractor::pages(&["Other"])),
            ..uc
        };
        second.ingest(&upload("b.pdf")).await.unwrap();

        let session = second.snapshot();
        assert_eq!(session.document_name(), Some("b.pdf"));
        assert_eq!(session.context(), "Page 1:\nOther");
        assert_eq!(session.messages().len(), 1);
        assert!(session.messages()[0].text().contains("\"b.pdf\""));
    }

    #[tokio::test]
    async fn test_failed_ingest_leaves_state_untouched() {
        let client = Arc::new(MockModelClient::new(vec![Ok("answer".to_string())]));
        let uc = loaded_use_case(client).await;
        uc.send("question").await;
        let before = uc.snapshot();

        let uc = DocumentSessionUseCase {
            extractor: Arc::new(StubExtractor::failing(ExtractionError::Corrupted(
                "invalid file header".to_string(),
            ))),
            ..uc
        };
        let result = uc.ingest(&upload("broken.pdf")).await;

        assert_eq!(
            result,
            Err(ExtractionError::Corrupted("invalid file header".to_string()))
        );
        assert_eq!(uc.snapshot(), before);
        assert!(!uc.is_busy());
    }

    #[tokio::test]
    async fn test_failed_ingest_on_empty_session() {
        let client = Arc::new(MockModelClient::new(vec![]));
        let uc = use_case(StubExtractor::failing(ExtractionError::Protected), client);

        let err = uc.ingest(&upload("locked.pdf")).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            "Could not read the PDF file. It might be corrupted or protected."
        );
        let session = uc.snapshot();
        assert!(session.messages().is_empty());
        assert!(!session.has_context());
        assert_eq!(session.document_name(), None);
    }

    #[tokio::test]
    async fn test_ingest_progress_callbacks() {
        let client = Arc::new(MockModelClient::new(vec![]));
        let uc = use_case(StubExtractor::failing(ExtractionError::NoPages), client);
        let progress = RecordingProgress::default();

        let _ = uc.ingest_with_progress(&upload("a.pdf"), &progress).await;

        assert_eq!(
            *progress.events.lock().unwrap(),
            vec!["ingest_start:a.pdf".to_string(), "ingest_end:false".to_string()]
        );
    }

    #[tokio::test]
    async fn test_ingest_reports_in_flight_and_blocks_other_operations() {
        let extractor = Arc::new(GatedExtractor {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let client = Arc::new(MockModelClient::new(vec![]));
        let uc = Arc::new(DocumentSessionUseCase::new(extractor.clone(), client.clone()));

        let task = {
            let uc = uc.clone();
            tokio::spawn(async move { uc.ingest(&upload("slow.pdf")).await })
        };
        extractor.entered.notified().await;

        assert!(uc.is_ingesting());
        assert_eq!(uc.activity(), Activity::Ingesting);
        assert_eq!(
            uc.ingest(&upload("other.pdf")).await,
            Ok(IngestOutcome::Ignored)
        );
        assert_eq!(uc.send("hello").await, SendOutcome::Ignored(SkipReason::Busy));

        extractor.release.notify_one();
        let outcome = task.await.unwrap().unwrap();

        assert!(matches!(outcome, IngestOutcome::Ingested(ref r) if r.document_name == "slow.pdf"));
        assert!(!uc.is_busy());
        assert!(client.calls().is_empty());
    }

    // ==================== Send ====================

    #[tokio::test]
    async fn test_send_appends_human_then_agent() {
        let client = Arc::new(MockModelClient::new(vec![Ok("It says Hello.".to_string())]));
        let uc = loaded_use_case(client.clone()).await;

        let outcome = uc.send("  What is on page 1?  ").await;

        let session = uc.snapshot();
        assert_eq!(session.messages().len(), 3);
        let human = &session.messages()[1];
        let agent = &session.messages()[2];
        assert_eq!(human.sender(), Sender::Human);
        assert_eq!(human.text(), "What is on page 1?");
        assert_eq!(agent.sender(), Sender::Agent);
        assert_eq!(agent.text(), "It says Hello.");
        assert!(human.id() < agent.id());
        assert_eq!(outcome, SendOutcome::Answered(agent.clone()));

        let calls = client.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].question, "What is on page 1?");
        assert_eq!(calls[0].context, "Page 1:\nHello\n\nPage 2:\nWorld");
    }

    #[tokio::test]
    async fn test_send_history_excludes_in_flight_message() {
        let client = Arc::new(MockModelClient::new(vec![
            Ok("first answer".to_string()),
            Ok("second answer".to_string()),
        ]));
        let uc = loaded_use_case(client.clone()).await;

        uc.send("first question").await;
        uc.send("second question").await;

        let calls = client.calls();
        assert_eq!(calls.len(), 2);

        // First call only sees the ingestion announcement
        assert_eq!(calls[0].history.len(), 1);
        assert_eq!(calls[0].history[0].role(), TurnRole::Model);

        let second: Vec<_> = calls[1]
            .history
            .iter()
            .map(|t| (t.role(), t.text().to_string()))
            .collect();
        assert_eq!(second.len(), 3);
        assert_eq!(second[1], (TurnRole::User, "first question".to_string()));
        assert_eq!(second[2], (TurnRole::Model, "first answer".to_string()));
        assert!(!second.iter().any(|(_, text)| text == "second question"));
    }

    #[tokio::test]
    async fn test_send_failure_is_absorbed_into_transcript() {
        let client = Arc::new(MockModelClient::new(vec![Err(ModelError::MissingCredential)]));
        let uc = loaded_use_case(client).await;

        let outcome = uc.send("question").await;

        let session = uc.snapshot();
        assert_eq!(session.messages().len(), 3);
        assert_eq!(session.messages()[1].sender(), Sender::Human);
        let error = &session.messages()[2];
        assert_eq!(error.sender(), Sender::Agent);
        assert_eq!(
            error.text(),
            "Error: API Key is missing. Please ensure environment variables are set.. Ensure your environment is properly configured."
        );
        assert!(error.text().contains(CONFIGURATION_GUIDANCE));
        assert_eq!(outcome, SendOutcome::Failed(error.clone()));
        assert!(!uc.is_busy());
    }

    #[tokio::test]
    async fn test_send_rejected_error_text_propagates() {
        let client = Arc::new(MockModelClient::new(vec![Err(ModelError::Rejected {
            status: 403,
            message: "API key not valid".to_string(),
        })]));
        let uc = loaded_use_case(client).await;

        let SendOutcome::Failed(message) = uc.send("question").await else {
            panic!("Expected Failed");
        };
        assert!(message.text().starts_with("Error: Request rejected (403): API key not valid."));
    }

    #[tokio::test]
    async fn test_send_ignores_blank_input() {
        let client = Arc::new(MockModelClient::new(vec![Ok("unused".to_string())]));
        let uc = loaded_use_case(client.clone()).await;

        assert_eq!(uc.send("").await, SendOutcome::Ignored(SkipReason::EmptyInput));
        assert_eq!(
            uc.send(" \n\t ").await,
            SendOutcome::Ignored(SkipReason::EmptyInput)
        );
        assert_eq!(uc.snapshot().messages().len(), 1);
        assert!(client.calls().is_empty());
    }

    #[tokio::test]
    async fn test_send_ignored_without_context() {
        let client = Arc::new(MockModelClient::new(vec![Ok("unused".to_string())]));
        let uc = use_case(StubExtractor::pages(&["x"]), client.clone());

        assert_eq!(
            uc.send("anyone there?").await,
            SendOutcome::Ignored(SkipReason::NoContext)
        );
        assert!(uc.snapshot().messages().is_empty());
        assert!(client.calls().is_empty());
        assert!(!uc.is_busy());
    }

    #[tokio::test]
    async fn test_send_while_thinking_is_ignored() {
        let client = Arc::new(GatedModelClient {
            entered: Notify::new(),
            release: Notify::new(),
        });
        let uc = Arc::new(DocumentSessionUseCase::new(
            Arc::new(StubExtractor::pages(&["Hello"])),
            client.clone(),
        ));
        uc.ingest(&upload("a.pdf")).await.unwrap();

        let task = {
            let uc = uc.clone();
            tokio::spawn(async move { uc.send("first").await })
        };
        client.entered.notified().await;

        assert!(uc.is_thinking());
        // The human message is visible while the model is working
        let during = uc.snapshot();
        assert_eq!(during.messages().len(), 2);
        assert_eq!(during.messages()[1].text(), "first");

        assert_eq!(uc.send("second").await, SendOutcome::Ignored(SkipReason::Busy));
        assert_eq!(
            uc.ingest(&upload("b.pdf")).await,
            Ok(IngestOutcome::Ignored)
        );
        assert_eq!(uc.snapshot().messages().len(), 2);

        client.release.notify_one();
        let outcome = task.await.unwrap();

        assert!(matches!(outcome, SendOutcome::Answered(ref m) if m.text() == "released"));
        assert_eq!(uc.snapshot().messages().len(), 3);
        assert!(!uc.is_busy());
    }

    #[tokio::test]
    async fn test_send_progress_callbacks() {
        let client = Arc::new(MockModelClient::new(vec![Err(ModelError::Connection(
            "refused".to_string(),
        ))]));
        let uc = loaded_use_case(client).await;
        let progress = RecordingProgress::default();

        uc.send_with_progress("question", &progress).await;

        assert_eq!(
            *progress.events.lock().unwrap(),
            vec!["thinking_start".to_string(), "thinking_end:false".to_string()]
        );
    }

    // ==================== Reset / context view ====================

    #[tokio::test]
    async fn test_reset_with_document() {
        let client = Arc::new(MockModelClient::new(vec![Ok("answer".to_string())]));
        let uc = loaded_use_case(client).await;
        uc.send("question").await;

        let announcement = uc.reset().unwrap();

        let session = uc.snapshot();
        assert_eq!(session.messages(), &[announcement.clone()]);
        assert_eq!(
            announcement.text(),
            "Refreshed analysis session for \"a.pdf\". Past context is retained."
        );
        assert_eq!(session.context(), "Page 1:\nHello\n\nPage 2:\nWorld");
        assert_eq!(session.document_name(), Some("a.pdf"));
    }

    #[tokio::test]
    async fn test_reset_without_document() {
        let client = Arc::new(MockModelClient::new(vec![]));
        let uc = use_case(StubExtractor::pages(&["x"]), client);

        assert!(uc.reset().is_none());
        let session = uc.snapshot();
        assert!(session.messages().is_empty());
        assert_eq!(session.context(), "");
        assert_eq!(session.document_name(), None);
    }

    #[tokio::test]
    async fn test_send_after_reset_uses_fresh_history() {
        let client = Arc::new(MockModelClient::new(vec![
            Ok("one".to_string()),
            Ok("two".to_string()),
        ]));
        let uc = loaded_use_case(client.clone()).await;
        uc.send("before reset").await;
        uc.reset();
        uc.send("after reset").await;

        let calls = client.calls();
        let history = &calls[1].history;
        assert_eq!(history.len(), 1);
        assert!(history[0].text().starts_with("Refreshed analysis session"));
    }

    #[test]
    fn test_toggle_context_view() {
        let client = Arc::new(MockModelClient::new(vec![]));
        let uc = use_case(StubExtractor::pages(&["x"]), client);

        assert!(!uc.context_view_visible());
        assert!(uc.toggle_context_view());
        assert!(uc.context_view_visible());
        assert!(!uc.toggle_context_view());
        assert!(!uc.context_view_visible());
        assert_eq!(uc.snapshot(), Session::new());
    }

    // ==================== Logging ====================

    #[tokio::test]
    async fn test_conversation_events_are_logged() {
        let logger = Arc::new(RecordingLogger {
            events: Mutex::new(Vec::new()),
        });
        let client = Arc::new(MockModelClient::new(vec![
            Ok("answer".to_string()),
            Err(ModelError::Connection("refused".to_string())),
        ]));
        let uc = use_case(StubExtractor::pages(&["Hello"]), client)
            .with_conversation_logger(logger.clone());

        uc.ingest(&upload("a.pdf")).await.unwrap();
        uc.send("q1").await;
        uc.send("q2").await;
        uc.reset();

        assert_eq!(
            *logger.events.lock().unwrap(),
            vec![
                "document_ingested",
                "user_message",
                "agent_message",
                "user_message",
                "agent_error",
                "session_reset"
            ]
        );
    }
}
