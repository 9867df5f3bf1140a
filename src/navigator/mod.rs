//! Single-page article navigation.
//!
//! A [`Navigator`] keeps exactly one article visible, slides between
//! articles, keeps the host location in step with the visible article and
//! runs the submit/validate cycle for the form on the active article.

pub mod article;
pub mod counter;
pub mod form;
pub mod history;
pub mod transition;
pub mod transport;

pub use article::{Article, ArticleContent, ArticleSet, ArticleSetError};
pub use counter::{CharCounter, CounterLevel, CounterReading};
pub use form::{
    ButtonState, ErrorAnchor, ErrorList, ErrorMap, ErrorTargets, Field, FieldKind, Form,
    SubmitButton,
};
pub use history::{Location, MemoryHistory};
pub use transition::{Direction, HeadlessStage, Slide, Stage};
pub use transport::{FormTransport, HttpTransport, SubmitRequest, TransportError, TransportResponse};

use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Idle,
    Transitioning,
    AwaitingSubmitResult,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NavError {
    #[error("navigator is busy ({0:?})")]
    Busy(NavState),
    #[error("article '{0}' has no form")]
    NoForm(String),
    #[error("no submission in flight")]
    NoSubmission,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Server accepted the form; the thanks article is sliding in.
    Accepted,
    /// Field errors were rendered on the form.
    Invalid(ErrorMap),
    /// The reply could not be understood; its text was shown to the user.
    Failed(String),
}

pub type OnComplete = Box<dyn FnOnce()>;

struct PendingTransition {
    on_complete: Option<OnComplete>,
    restore_button: Option<usize>,
}

pub struct Navigator<L: Location, S: Stage> {
    articles: ArticleSet,
    targets: ErrorTargets,
    location: L,
    stage: S,
    current: usize,
    state: NavState,
    pending: Option<PendingTransition>,
    submitting: Option<usize>,
    history_moved: bool,
}

impl<L: Location, S: Stage> Navigator<L, S> {
    /// Starts on the first article that already shows errors, otherwise on
    /// whatever the location points at.
    pub fn new(mut articles: ArticleSet, targets: ErrorTargets, mut location: L, stage: S) -> Self {
        let with_errors = articles
            .iter()
            .find(|article| article.form().is_some_and(Form::has_errors))
            .map(|article| article.ordinal);

        let current = match with_errors {
            Some(idx) => {
                location.replace_address(&format!("#{}", articles.get(idx).id));
                idx
            }
            None => articles.resolve(&location.current_address()),
        };
        for idx in 0..articles.len() {
            articles.get_mut(idx).visible = idx == current;
        }
        debug!("starting on article '{}'", articles.get(current).id);

        Self {
            articles,
            targets,
            location,
            stage,
            current,
            state: NavState::Idle,
            pending: None,
            submitting: None,
            history_moved: false,
        }
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn current(&self) -> &Article {
        self.articles.get(self.current)
    }

    pub fn articles(&self) -> &ArticleSet {
        &self.articles
    }

    pub fn resolve_article(&self, address: &str) -> &Article {
        self.articles.get(self.articles.resolve(address))
    }

    pub fn form(&self, id: &str) -> Option<&Form> {
        self.articles.find(id).and_then(Article::form)
    }

    pub fn form_mut(&mut self, id: &str) -> Option<&mut Form> {
        let idx = self.articles.position(id)?;
        self.articles.get_mut(idx).form_mut()
    }

    pub fn location(&self) -> &L {
        &self.location
    }

    pub fn location_mut(&mut self) -> &mut L {
        &mut self.location
    }

    pub fn stage(&self) -> &S {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut S {
        &mut self.stage
    }

    pub fn navigate_to(
        &mut self,
        address: &str,
        push_history: bool,
        on_complete: Option<OnComplete>,
    ) -> Result<(), NavError> {
        if self.state != NavState::Idle {
            warn!("navigation to '{address}' rejected while {:?}", self.state);
            return Err(NavError::Busy(self.state));
        }
        let target = self.articles.resolve(address);
        self.start_transition(target, push_history, on_complete, None);
        Ok(())
    }

    /// Back/forward already moved the location; follow it without adding an
    /// entry. If busy, the move is replayed once the navigator is idle again.
    pub fn handle_browser_back(&mut self) {
        if self.state != NavState::Idle {
            debug!("history moved while {:?}, deferring", self.state);
            self.history_moved = true;
            return;
        }
        let target = self.articles.resolve(&self.location.current_address());
        self.start_transition(target, false, None, None);
    }

    /// Called by the host when the running slide ends. Returns false if no
    /// slide was running.
    pub fn finish_transition(&mut self) -> bool {
        let Some(pending) = self.pending.take() else {
            return false;
        };
        self.state = NavState::Idle;

        let leaving: Vec<usize> = (0..self.articles.len())
            .filter(|&idx| idx != self.current)
            .collect();
        for idx in leaving {
            self.articles.get_mut(idx).visible = false;
        }

        if let Some(idx) = pending.restore_button {
            self.restore_button(idx);
        }
        if let Some(callback) = pending.on_complete {
            callback();
        }
        self.replay_history();
        true
    }

    fn start_transition(
        &mut self,
        target: usize,
        push_history: bool,
        on_complete: Option<OnComplete>,
        restore_button: Option<usize>,
    ) {
        if target == self.current {
            self.state = NavState::Idle;
            if let Some(idx) = restore_button {
                self.restore_button(idx);
            }
            if let Some(callback) = on_complete {
                callback();
            }
            return;
        }

        let from = self.current;
        let target_id = self.articles.get(target).id.clone();
        if push_history {
            self.location.push_address(&format!("#{target_id}"));
        }

        self.articles.get_mut(from).visible = false;
        self.articles.get_mut(target).visible = true;
        self.current = target;

        let slide = {
            let old = self.articles.get(from);
            let new = self.articles.get(target);
            Slide::plan(&old.id, old.ordinal, &new.id, new.ordinal, self.stage.viewport_width())
        };
        debug!("sliding {:?} from '{}' to '{}'", slide.direction, slide.from, slide.to);
        self.stage.begin_slide(&slide);

        self.state = NavState::Transitioning;
        self.pending = Some(PendingTransition {
            on_complete,
            restore_button,
        });
    }

    fn replay_history(&mut self) {
        if self.state == NavState::Idle && self.history_moved {
            self.history_moved = false;
            self.handle_browser_back();
        }
    }

    fn restore_button(&mut self, idx: usize) {
        if let Some(form) = self.articles.get_mut(idx).form_mut() {
            form.button_mut().set_state(ButtonState::Default);
        }
    }

    /// First half of a submission: clears old errors, puts the button into
    /// its waiting state and builds the request for the active form.
    pub fn begin_submit(&mut self) -> Result<SubmitRequest, NavError> {
        if self.state != NavState::Idle {
            warn!("submit rejected while {:?}", self.state);
            return Err(NavError::Busy(self.state));
        }
        let idx = self.current;
        let article = self.articles.get_mut(idx);
        let id = article.id.clone();
        let form = article.form_mut().ok_or(NavError::NoForm(id))?;

        form.clear_errors();
        form.button_mut().set_state(ButtonState::Waiting);
        let request = SubmitRequest {
            action: form.action.clone(),
            fields: form.serialize(),
        };

        self.state = NavState::AwaitingSubmitResult;
        self.submitting = Some(idx);
        Ok(request)
    }

    /// Second half of a submission: applies the server's answer.
    pub fn complete_submit(
        &mut self,
        result: Result<TransportResponse, TransportError>,
    ) -> Result<SubmitOutcome, NavError> {
        let idx = self.submitting.take().ok_or(NavError::NoSubmission)?;
        let id = self.articles.get(idx).id.clone();

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                warn!("submit of '{id}' failed: {err}");
                return Ok(self.fail_submit(idx, err.to_string()));
            }
        };

        if response.is_success() {
            info!("submit of '{id}' accepted");
            if let Some(form) = self.articles.get_mut(idx).form_mut() {
                form.clear_inputs();
            }
            let thanks = self.articles.thanks_idx();
            self.start_transition(thanks, true, None, Some(idx));
            if self.state == NavState::Idle {
                self.replay_history();
            }
            return Ok(SubmitOutcome::Accepted);
        }

        let errors: ErrorMap = match serde_json::from_str(&response.body) {
            Ok(errors) => errors,
            Err(err) => {
                warn!(
                    "unreadable error reply for '{id}' (status {}): {err}",
                    response.status
                );
                return Ok(self.fail_submit(idx, response.body));
            }
        };

        let form = self
            .articles
            .get_mut(idx)
            .form_mut()
            .ok_or_else(|| NavError::NoForm(id.clone()))?;
        for (key, messages) in &errors {
            let anchor = self.targets.anchor_for(form, key);
            form.attach_errors(anchor, messages.clone());
        }
        form.button_mut().set_state(ButtonState::Default);
        debug!("submit of '{id}' returned {} error lists", errors.len());

        self.state = NavState::Idle;
        self.replay_history();
        Ok(SubmitOutcome::Invalid(errors))
    }

    fn fail_submit(&mut self, idx: usize, message: String) -> SubmitOutcome {
        self.stage.alert(&message);
        self.restore_button(idx);
        self.state = NavState::Idle;
        self.replay_history();
        SubmitOutcome::Failed(message)
    }

    /// Runs a whole submission of the active form through `transport`.
    pub async fn submit_active_form<T: FormTransport>(
        &mut self,
        transport: &T,
    ) -> Result<SubmitOutcome, NavError> {
        let request = self.begin_submit()?;
        let result = transport.submit(&request).await;
        self.complete_submit(result)
    }
}
