//! Interaction controller.
//!
//! Pure state machine in the host-ops style: the controller mutates the
//! transcript and its own mode, while a host starts exchanges and feeds
//! terminal events back in. Submit and publish share one busy gate, so at
//! most one exchange of any kind is outstanding at a time.

use completion_api::strip_publish_affordance;

use crate::transcript::{EntryId, Sender, Transcript};

/// Identifier for one in-flight exchange.
pub type RequestId = u64;

/// Fixed fence language for user entries.
pub const CODE_FENCE_LANG: &str = "javascript";

pub const STATUS_IDLE: &str = "Paste code to document it.";
pub const STATUS_CONVERTING: &str = "Converting table markup for the wiki.";
pub const STATUS_UPLOADING: &str = "Uploading the page to the wiki.";

/// The one generic message every completion failure collapses to. Diagnostic
/// detail is logged by the runtime, never surfaced here.
pub const ERROR_COMPLETION_FAILED: &str = "Error processing code";

pub const ALERT_BUSY: &str = "An exchange is already in progress.";
pub const ALERT_TITLE_REQUIRED: &str = "No title was entered. Please try again.";
pub const ALERT_NOT_PUBLISHABLE: &str = "That entry has no table to publish.";
pub const ALERT_PUBLISH_DISABLED: &str = "Publishing is not configured.";
pub const ALERT_PUBLISH_FAILED: &str = "Publishing failed. Please try again.";
pub const ALERT_PUBLISHED: &str = "The page was published to the wiki!";
pub const ALERT_PUBLISH_REJECTED: &str =
    "The wiki rejected the request. The title may be a duplicate; try a different one.";

/// Main-flow submission state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Submitting {
        request_id: RequestId,
        placeholder: EntryId,
    },
}

/// Short-lived publish sub-flow state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishState {
    Idle,
    Converting { request_id: RequestId, title: String },
    Uploading { request_id: RequestId },
}

/// Host side of the controller: starts exchanges and schedules renders.
pub trait HostOps {
    /// Starts an analysis completion exchange for the submitted code.
    fn start_completion(&mut self, code: String) -> Result<RequestId, String>;
    /// Starts a table-mode completion exchange converting markdown to
    /// storage markup.
    fn start_conversion(&mut self, markup: String) -> Result<RequestId, String>;
    /// Starts a page-creation exchange with the wiki.
    fn start_publish(&mut self, title: String, markup: String) -> Result<RequestId, String>;
    fn request_render(&mut self);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct App {
    pub mode: Mode,
    publish: PublishState,
    transcript: Transcript,
    last_error: Option<String>,
    status_text: String,
    alert: Option<String>,
    publish_enabled: bool,
}

impl App {
    pub fn new(publish_enabled: bool) -> Self {
        Self {
            mode: Mode::Idle,
            publish: PublishState::Idle,
            transcript: Transcript::new(),
            last_error: None,
            status_text: STATUS_IDLE.to_string(),
            alert: None,
            publish_enabled,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn publish_state(&self) -> &PublishState {
        &self.publish
    }

    /// One busy gate covers the main flow and the publish sub-flow.
    pub fn is_busy(&self) -> bool {
        !matches!(self.mode, Mode::Idle) || !matches!(self.publish, PublishState::Idle)
    }

    pub fn status_text(&self) -> &str {
        &self.status_text
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Takes the pending alert message, if any.
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    /// Submits code for analysis: appends a fenced user entry plus one
    /// placeholder and asks the host to start the exchange. Rejected while
    /// any exchange is outstanding.
    pub fn on_submit(&mut self, code: &str, host: &mut dyn HostOps) {
        if code.trim().is_empty() {
            host.request_render();
            return;
        }

        self.last_error = None;

        if self.is_busy() {
            self.alert = Some(ALERT_BUSY.to_string());
            host.request_render();
            return;
        }

        self.transcript
            .append_user(format!("```{CODE_FENCE_LANG}\n{code}\n```"));
        let placeholder = self.transcript.append_placeholder();

        match host.start_completion(code.to_string()) {
            Ok(request_id) => {
                self.mode = Mode::Submitting {
                    request_id,
                    placeholder,
                };
            }
            Err(_) => {
                // Same shape as a failed exchange: the user entry stays.
                self.transcript.remove_placeholder(placeholder);
                self.last_error = Some(ERROR_COMPLETION_FAILED.to_string());
            }
        }

        host.request_render();
    }

    /// Applies a finished completion exchange to whichever flow owns it.
    pub fn on_completion_finished(
        &mut self,
        request_id: RequestId,
        text: String,
        host: &mut dyn HostOps,
    ) {
        if let Mode::Submitting {
            request_id: active,
            placeholder,
        } = self.mode
        {
            if active == request_id {
                self.transcript.replace_placeholder(placeholder, text);
                self.mode = Mode::Idle;
                host.request_render();
                return;
            }
        }

        if let PublishState::Converting {
            request_id: active,
            title,
        } = &self.publish
        {
            if *active == request_id {
                let title = title.clone();
                match host.start_publish(title, text) {
                    Ok(request_id) => {
                        self.publish = PublishState::Uploading { request_id };
                        self.status_text = STATUS_UPLOADING.to_string();
                    }
                    Err(_) => self.fail_publish(ALERT_PUBLISH_FAILED),
                }
                host.request_render();
            }
        }
    }

    /// Applies a failed completion exchange. The error detail is discarded
    /// here by design; the runtime already logged it.
    pub fn on_completion_failed(
        &mut self,
        request_id: RequestId,
        _error: &str,
        host: &mut dyn HostOps,
    ) {
        if let Mode::Submitting {
            request_id: active,
            placeholder,
        } = self.mode
        {
            if active == request_id {
                self.transcript.remove_placeholder(placeholder);
                self.last_error = Some(ERROR_COMPLETION_FAILED.to_string());
                self.mode = Mode::Idle;
                host.request_render();
                return;
            }
        }

        if let PublishState::Converting {
            request_id: active, ..
        } = &self.publish
        {
            if *active == request_id {
                self.fail_publish(ALERT_PUBLISH_FAILED);
                host.request_render();
            }
        }
    }

    /// Starts the publish sub-flow for a rendered response entry.
    ///
    /// An empty or cancelled title aborts before any exchange starts, and the
    /// transcript is never mutated by this flow.
    pub fn on_publish(
        &mut self,
        entry_id: EntryId,
        title: Option<String>,
        host: &mut dyn HostOps,
    ) {
        if !self.publish_enabled {
            self.alert = Some(ALERT_PUBLISH_DISABLED.to_string());
            host.request_render();
            return;
        }

        if self.is_busy() {
            self.alert = Some(ALERT_BUSY.to_string());
            host.request_render();
            return;
        }

        let markup = match self.transcript.get(entry_id) {
            Some(entry) if entry.sender == Sender::Bot && !entry.placeholder => {
                let (body, can_publish) = strip_publish_affordance(&entry.text);
                if !can_publish {
                    self.alert = Some(ALERT_NOT_PUBLISHABLE.to_string());
                    host.request_render();
                    return;
                }
                body.to_string()
            }
            _ => {
                self.alert = Some(ALERT_NOT_PUBLISHABLE.to_string());
                host.request_render();
                return;
            }
        };

        let title = match title.map(|title| title.trim().to_string()) {
            Some(title) if !title.is_empty() => title,
            _ => {
                self.alert = Some(ALERT_TITLE_REQUIRED.to_string());
                host.request_render();
                return;
            }
        };

        match host.start_conversion(markup) {
            Ok(request_id) => {
                self.publish = PublishState::Converting { request_id, title };
                self.status_text = STATUS_CONVERTING.to_string();
            }
            Err(_) => self.fail_publish(ALERT_PUBLISH_FAILED),
        }

        host.request_render();
    }

    pub fn on_publish_finished(&mut self, request_id: RequestId, host: &mut dyn HostOps) {
        if matches!(self.publish, PublishState::Uploading { request_id: active } if active == request_id)
        {
            self.publish = PublishState::Idle;
            self.status_text = STATUS_IDLE.to_string();
            self.alert = Some(ALERT_PUBLISHED.to_string());
            host.request_render();
        }
    }

    pub fn on_publish_failed(
        &mut self,
        request_id: RequestId,
        _error: &str,
        host: &mut dyn HostOps,
    ) {
        if matches!(self.publish, PublishState::Uploading { request_id: active } if active == request_id)
        {
            self.fail_publish(ALERT_PUBLISH_REJECTED);
            host.request_render();
        }
    }

    fn fail_publish(&mut self, alert: &str) {
        self.publish = PublishState::Idle;
        self.status_text = STATUS_IDLE.to_string();
        self.alert = Some(alert.to_string());
    }
}
