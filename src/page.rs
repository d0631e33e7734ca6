use crate::client::{HabitApi, HabitSubmission};
use crate::errors::ClientError;
use crate::models::{CountResponse, HabitKind, HabitResponse};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

pub const CTA_BUTTON: &str = "cta-button";
pub const CTA_MESSAGE: &str = "Welcome! This is your starting point.";
pub const OPEN_CLASS: &str = "open";

/// Element ids of one add-habit flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HabitElements {
    pub add: &'static str,
    pub modal: &'static str,
    pub input: &'static str,
    pub save: &'static str,
    pub close: &'static str,
}

pub const GOOD_HABIT: HabitElements = HabitElements {
    add: "addGoodHabit",
    modal: "goodHabitModal",
    input: "goodHabitInput",
    save: "saveGoodHabit",
    close: "closeGoodHabit",
};

pub const BAD_HABIT: HabitElements = HabitElements {
    add: "addBadHabit",
    modal: "badHabitModal",
    input: "badHabitInput",
    save: "saveBadHabit",
    close: "closeBadHabit",
};

pub fn habit_elements(kind: HabitKind) -> HabitElements {
    match kind {
        HabitKind::Good => GOOD_HABIT,
        HabitKind::Bad => BAD_HABIT,
    }
}

/// Every id the page markup is expected to provide.
pub const ELEMENT_IDS: [&str; 11] = [
    CTA_BUTTON,
    GOOD_HABIT.add,
    GOOD_HABIT.modal,
    GOOD_HABIT.input,
    GOOD_HABIT.save,
    GOOD_HABIT.close,
    BAD_HABIT.add,
    BAD_HABIT.modal,
    BAD_HABIT.input,
    BAD_HABIT.save,
    BAD_HABIT.close,
];

/// The slice of the DOM the page depends on.
pub trait Document {
    fn has_element(&self, id: &str) -> bool;

    /// Current `.value` of an input, `None` if the element is missing.
    fn input_value(&self, id: &str) -> Option<String>;

    fn set_open(&mut self, id: &str, open: bool);

    fn alert(&mut self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewState {
    good: ModalState,
    bad: ModalState,
}

impl ViewState {
    pub fn modal(&self, kind: HabitKind) -> ModalState {
        match kind {
            HabitKind::Good => self.good,
            HabitKind::Bad => self.bad,
        }
    }

    pub fn is_open(&self, kind: HabitKind) -> bool {
        self.modal(kind) == ModalState::Open
    }

    pub fn open(&mut self, kind: HabitKind) {
        *self.slot(kind) = ModalState::Open;
    }

    pub fn close(&mut self, kind: HabitKind) {
        *self.slot(kind) = ModalState::Closed;
    }

    fn slot(&mut self, kind: HabitKind) -> &mut ModalState {
        match kind {
            HabitKind::Good => &mut self.good,
            HabitKind::Bad => &mut self.bad,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PageConfig {
    /// When set, CTA clicks also bump this server-side counter.
    pub counter_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Acknowledge,
    OpenModal(HabitKind),
    CloseModal(HabitKind),
    SaveHabit(HabitKind),
}

fn binding_table() -> [(&'static str, Action); 7] {
    [
        (CTA_BUTTON, Action::Acknowledge),
        (GOOD_HABIT.add, Action::OpenModal(HabitKind::Good)),
        (GOOD_HABIT.close, Action::CloseModal(HabitKind::Good)),
        (GOOD_HABIT.save, Action::SaveHabit(HabitKind::Good)),
        (BAD_HABIT.add, Action::OpenModal(HabitKind::Bad)),
        (BAD_HABIT.close, Action::CloseModal(HabitKind::Bad)),
        (BAD_HABIT.save, Action::SaveHabit(HabitKind::Bad)),
    ]
}

#[derive(Debug)]
pub enum RequestOutcome<T> {
    Delivered(T),
    Failed(ClientError),
}

impl<T> RequestOutcome<T> {
    pub fn delivered(self) -> Option<T> {
        match self {
            RequestOutcome::Delivered(value) => Some(value),
            RequestOutcome::Failed(_) => None,
        }
    }
}

/// A fire-and-forget request. Awaiting it is optional.
#[derive(Debug)]
pub struct RequestTask<T> {
    state: TaskState<T>,
}

#[derive(Debug)]
enum TaskState<T> {
    Spawned(JoinHandle<RequestOutcome<T>>),
    Finished(RequestOutcome<T>),
}

impl<T> RequestTask<T> {
    pub fn is_finished(&self) -> bool {
        match &self.state {
            TaskState::Spawned(handle) => handle.is_finished(),
            TaskState::Finished(_) => true,
        }
    }

    pub async fn outcome(self) -> RequestOutcome<T> {
        match self.state {
            TaskState::Spawned(handle) => match handle.await {
                Ok(outcome) => outcome,
                Err(err) => RequestOutcome::Failed(ClientError::Transport(err.to_string())),
            },
            TaskState::Finished(outcome) => outcome,
        }
    }
}

fn spawn_request<T, F, L>(label: &'static str, request: F, on_delivered: L) -> RequestTask<T>
where
    T: Send + 'static,
    F: Future<Output = Result<T, ClientError>> + Send + 'static,
    L: FnOnce(&T) + Send + 'static,
{
    let Ok(runtime) = Handle::try_current() else {
        let err = ClientError::NoRuntime;
        error!("{label} request failed: {err}");
        return RequestTask {
            state: TaskState::Finished(RequestOutcome::Failed(err)),
        };
    };

    let handle = runtime.spawn(async move {
        match request.await {
            Ok(value) => {
                on_delivered(&value);
                RequestOutcome::Delivered(value)
            }
            Err(err) => {
                error!("{label} request failed: {err}");
                RequestOutcome::Failed(err)
            }
        }
    });
    RequestTask {
        state: TaskState::Spawned(handle),
    }
}

#[derive(Debug)]
pub enum ClickOutcome {
    /// No handler is bound to the clicked id.
    Ignored,
    Acknowledged {
        counter: Option<RequestTask<CountResponse>>,
    },
    Opened(HabitKind),
    Closed(HabitKind),
    /// Save clicked with an empty input; nothing changed.
    Aborted(HabitKind),
    Submitted {
        kind: HabitKind,
        task: RequestTask<HabitResponse>,
    },
}

pub struct Page<D> {
    document: D,
    api: Arc<dyn HabitApi>,
    config: PageConfig,
    handlers: HashMap<&'static str, Action>,
    view: ViewState,
}

impl<D: Document> Page<D> {
    pub fn bootstrap(document: D, api: Arc<dyn HabitApi>, config: PageConfig) -> Self {
        let mut handlers = HashMap::new();
        for (id, action) in binding_table() {
            if document.has_element(id) {
                handlers.insert(id, action);
            } else {
                debug!("element #{id} not found, skipping");
            }
        }

        let mut page = Self {
            document,
            api,
            config,
            handlers,
            view: ViewState::default(),
        };
        page.sync_modal(HabitKind::Good);
        page.sync_modal(HabitKind::Bad);
        info!(bound = page.handlers.len(), "page loaded");
        page
    }

    pub fn is_bound(&self, id: &str) -> bool {
        self.handlers.contains_key(id)
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut D {
        &mut self.document
    }

    pub fn click(&mut self, id: &str) -> ClickOutcome {
        let Some(action) = self.handlers.get(id).copied() else {
            return ClickOutcome::Ignored;
        };

        match action {
            Action::Acknowledge => self.acknowledge(),
            Action::OpenModal(kind) => {
                self.view.open(kind);
                self.sync_modal(kind);
                ClickOutcome::Opened(kind)
            }
            Action::CloseModal(kind) => {
                self.view.close(kind);
                self.sync_modal(kind);
                ClickOutcome::Closed(kind)
            }
            Action::SaveHabit(kind) => self.save(kind),
        }
    }

    fn acknowledge(&mut self) -> ClickOutcome {
        debug!("cta button clicked");
        self.document.alert(CTA_MESSAGE);

        let counter = self.config.counter_id.clone().map(|id| {
            let api = Arc::clone(&self.api);
            spawn_request(
                "counter",
                async move { api.increment_counter(&id, 1).await },
                |response: &CountResponse| info!(new_count = response.new_count, "counter updated"),
            )
        });
        ClickOutcome::Acknowledged { counter }
    }

    fn save(&mut self, kind: HabitKind) -> ClickOutcome {
        let input = habit_elements(kind).input;
        let habit_name = self
            .document
            .input_value(input)
            .filter(|value| !value.is_empty());
        let Some(habit_name) = habit_name else {
            debug!("#{input} is empty, not saving");
            return ClickOutcome::Aborted(kind);
        };

        let submission = HabitSubmission::new(kind, habit_name);
        let api = Arc::clone(&self.api);
        let task = spawn_request(
            "add habit",
            async move { api.add_habit(&submission).await },
            |habit: &HabitResponse| info!(kind = %habit.habit_type, "saved habit {:?}", habit.habit_name),
        );

        self.view.close(kind);
        self.sync_modal(kind);
        ClickOutcome::Submitted { kind, task }
    }

    fn sync_modal(&mut self, kind: HabitKind) {
        let modal = habit_elements(kind).modal;
        if self.document.has_element(modal) {
            self.document.set_open(modal, self.view.is_open(kind));
        }
    }
}

/// Headless [`Document`] for driving a [`Page`] outside a browser.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    elements: BTreeSet<String>,
    values: BTreeMap<String, String>,
    open: BTreeSet<String>,
    alerts: Vec<String>,
}

impl MemoryDocument {
    /// A document carrying every contract element.
    pub fn complete() -> Self {
        Self::with_elements(ELEMENT_IDS)
    }

    pub fn with_elements<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            elements: ids.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn without(mut self, id: &str) -> Self {
        self.elements.remove(id);
        self.values.remove(id);
        self
    }

    pub fn set_value(&mut self, id: &str, value: impl Into<String>) {
        if self.elements.contains(id) {
            self.values.insert(id.to_string(), value.into());
        }
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.open.contains(id)
    }

    pub fn alerts(&self) -> &[String] {
        &self.alerts
    }
}

impl Document for MemoryDocument {
    fn has_element(&self, id: &str) -> bool {
        self.elements.contains(id)
    }

    fn input_value(&self, id: &str) -> Option<String> {
        if !self.elements.contains(id) {
            return None;
        }
        Some(self.values.get(id).cloned().unwrap_or_default())
    }

    fn set_open(&mut self, id: &str, open: bool) {
        if open {
            self.open.insert(id.to_string());
        } else {
            self.open.remove(id);
        }
    }

    fn alert(&mut self, message: &str) {
        self.alerts.push(message.to_string());
    }
}
