use crate::api;
use crate::store::{Action, StoreContext};
use shared::models::{LENGTH_OPTIONS, SETTING_OPTIONS, StoryRequest, THEME_OPTIONS};
use yew::prelude::*;

/// Builds a callback that copies an input's value into one field of the form.
fn text_field(
    store: &StoreContext,
    apply: fn(&mut StoryRequest, String),
) -> Callback<InputEvent> {
    let store = store.clone();
    Callback::from(move |e: InputEvent| {
        let input: web_sys::HtmlInputElement = e.target_unchecked_into();
        let mut form = store.form.clone();
        apply(&mut form, input.value());
        store.dispatch(Action::UpdateForm(form));
    })
}

fn select_field(store: &StoreContext, apply: fn(&mut StoryRequest, String)) -> Callback<Event> {
    let store = store.clone();
    Callback::from(move |e: Event| {
        let select: web_sys::HtmlSelectElement = e.target_unchecked_into();
        let mut form = store.form.clone();
        apply(&mut form, select.value());
        store.dispatch(Action::UpdateForm(form));
    })
}

fn select_options(choices: &[&str], current: &str) -> Html {
    let mut nodes: Vec<Html> = choices
        .iter()
        .map(|choice| {
            html! { <option value={choice.to_string()} selected={*choice == current}>{*choice}</option> }
        })
        .collect();
    // Keep a value restored from storage visible even if it is not in the list.
    if !choices.iter().any(|choice| *choice == current) {
        nodes.push(html! { <option value={current.to_string()} selected=true>{current}</option> });
    }
    html! { { for nodes } }
}

#[function_component(StoryForm)]
pub fn story_form() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");
    let form = &store.form;

    let on_name_input = text_field(&store, |f, v| f.name = v);
    let on_trait_input = text_field(&store, |f, v| f.personality = v);
    let on_hobby_input = text_field(&store, |f, v| f.hobby = v);
    let on_setting_change = select_field(&store, |f, v| f.setting = v);
    let on_theme_change = select_field(&store, |f, v| f.theme = v);
    let on_length_change = select_field(&store, |f, v| {
        if let Ok(length) = v.parse() {
            f.length = length;
        }
    });

    let on_generate = {
        let store = store.clone();
        Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            if store.is_generating {
                return;
            }
            let request = store.form.clone();
            if let Err(err) = request.validate() {
                store.dispatch(Action::Warn(err.to_string()));
                return;
            }
            store.dispatch(Action::StartStory);
            wasm_bindgen_futures::spawn_local(api::stream_story(store.clone(), request));
        })
    };

    html! {
        <form class="story-form">
            <h2>{"Character & Story Details"}</h2>
            <div class="form-group">
                <label>{"Main Character's Name:"}</label>
                <input type="text" value={form.name.clone()} oninput={on_name_input} />
            </div>
            <div class="form-group">
                <label>{"Main Personality Trait (e.g., Curious, Brave):"}</label>
                <input type="text" value={form.personality.clone()} oninput={on_trait_input} />
            </div>
            <div class="form-group">
                <label>{"A favorite hobby/interest:"}</label>
                <input type="text" value={form.hobby.clone()} oninput={on_hobby_input} />
            </div>

            <h3>{"World Details"}</h3>
            <div class="form-group">
                <label>{"Key Setting/Location:"}</label>
                <select onchange={on_setting_change}>
                    { select_options(&SETTING_OPTIONS, &form.setting) }
                </select>
            </div>
            <div class="form-group">
                <label>{"Story Theme/Genre:"}</label>
                <select onchange={on_theme_change}>
                    { select_options(&THEME_OPTIONS, &form.theme) }
                </select>
            </div>
            <div class="form-group">
                <label>{"Story Length (approximate words):"}</label>
                <select onchange={on_length_change}>
                    { for LENGTH_OPTIONS.iter().map(|length| html! {
                        <option value={length.to_string()} selected={*length == form.length}>
                            {length.to_string()}
                        </option>
                    }) }
                </select>
            </div>

            if let Some(warning) = &store.warning {
                <div class="warning">{warning.clone()}</div>
            }

            <button
                class="btn btn-primary btn-block"
                onclick={on_generate}
                disabled={store.is_generating}
            >
                {"Generate My Personalized Story!"}
            </button>
        </form>
    }
}
