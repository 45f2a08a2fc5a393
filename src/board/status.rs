use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::AbortHandle;
use tracing::debug;

use super::view::lock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Success,
    Error,
}

impl StatusKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatusKind::Success => "success",
            StatusKind::Error => "error",
        }
    }
}

/// How long each controller's messages stay visible.
#[derive(Debug, Clone, Copy)]
pub struct StatusDelays {
    pub signup: Duration,
    pub unregister: Duration,
}

impl Default for StatusDelays {
    fn default() -> Self {
        Self {
            signup: Duration::from_secs(5),
            unregister: Duration::from_secs(4),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub text: String,
    pub kind: Option<StatusKind>,
    pub hidden: bool,
}

impl StatusSnapshot {
    pub fn css_class(&self) -> String {
        let mut class = self.kind.map(StatusKind::as_str).unwrap_or_default().to_string();
        if self.hidden {
            if !class.is_empty() {
                class.push(' ');
            }
            class.push_str("hidden");
        }
        class
    }
}

#[derive(Debug)]
struct StatusState {
    text: String,
    kind: Option<StatusKind>,
    hidden: bool,
    generation: u64,
    pending_hide: Option<AbortHandle>,
}

impl Default for StatusState {
    fn default() -> Self {
        Self {
            text: String::new(),
            kind: None,
            hidden: true,
            generation: 0,
            pending_hide: None,
        }
    }
}

/// The transient status element. At most one hide task is pending at a time.
#[derive(Debug, Clone, Default)]
pub struct StatusMessage {
    state: Arc<Mutex<StatusState>>,
}

impl StatusMessage {
    /// Shows `text` and schedules it to hide after `hide_after`, replacing any
    /// visible message and cancelling its hide task.
    pub fn show(&self, kind: StatusKind, text: impl Into<String>, hide_after: Duration) {
        let mut state = lock(&self.state);
        if let Some(pending) = state.pending_hide.take() {
            pending.abort();
        }
        state.text = text.into();
        state.kind = Some(kind);
        state.hidden = false;
        state.generation += 1;
        let generation = state.generation;

        // Outside a runtime the message simply stays up.
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            debug!("no runtime available, status message will not auto-hide");
            return;
        };
        let shared = Arc::clone(&self.state);
        let task = runtime.spawn(async move {
            tokio::time::sleep(hide_after).await;
            let mut state = lock(&shared);
            // An aborted task can still be past its sleep.
            if state.generation == generation {
                state.hidden = true;
                state.pending_hide = None;
            }
        });
        state.pending_hide = Some(task.abort_handle());
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        let state = lock(&self.state);
        StatusSnapshot {
            text: state.text.clone(),
            kind: state.kind,
            hidden: state.hidden,
        }
    }

    pub fn is_visible(&self) -> bool {
        !lock(&self.state).hidden
    }

    pub fn pending_hide_tasks(&self) -> usize {
        usize::from(lock(&self.state).pending_hide.is_some())
    }
}
