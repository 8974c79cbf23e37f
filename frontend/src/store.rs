use gloo_storage::{SessionStorage, Storage};
use shared::models::*;
use std::rc::Rc;
use yew::prelude::*;

const STORAGE_KEY: &str = "story-maker.form";

#[derive(Clone, Debug, PartialEq)]
pub struct State {
    pub form: StoryRequest,
    /// Details the current story was requested with
    pub subject: Option<StoryRequest>,
    pub output: StoryOutput,
    pub is_generating: bool,
    pub warning: Option<String>,
    pub model: Option<String>,
}

impl Default for State {
    fn default() -> Self {
        let form = SessionStorage::get(STORAGE_KEY).unwrap_or_else(|_| StoryRequest::default());
        Self {
            form,
            subject: None,
            output: StoryOutput::default(),
            is_generating: false,
            warning: None,
            model: None,
        }
    }
}

pub enum Action {
    UpdateForm(StoryRequest),
    Warn(String),
    StartStory,
    Receive(StreamEvent),
    SetModel(String),
}

impl Reducible for State {
    type Action = Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();

        match action {
            Action::UpdateForm(form) => {
                let _ = SessionStorage::set(STORAGE_KEY, &form);
                next.form = form;
                next.warning = None;
            }
            Action::Warn(message) => {
                next.warning = Some(message);
            }
            Action::StartStory => {
                next.subject = Some(next.form.clone());
                next.output = StoryOutput::default();
                next.is_generating = true;
                next.warning = None;
            }
            Action::Receive(event) => {
                next.output.apply(event);
                if next.output.finished {
                    next.is_generating = false;
                }
            }
            Action::SetModel(model) => {
                next.model = Some(model);
            }
        }

        next.into()
    }
}

pub type StoreContext = UseReducerHandle<State>;
