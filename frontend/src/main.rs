mod api;
mod components;
mod store;

use components::story_form::StoryForm;
use components::story_stage::StoryStage;
use store::{Action, State, StoreContext};
use yew::prelude::*;

#[function_component(App)]
fn app() -> Html {
    let store = use_reducer(State::default);

    {
        let store = store.clone();
        use_effect_with((), move |_| {
            wasm_bindgen_futures::spawn_local(async move {
                match api::fetch_info().await {
                    Ok(info) => store.dispatch(Action::SetModel(info.model)),
                    Err(e) => tracing::error!("Failed to fetch service info: {:?}", e),
                }
            });
            || ()
        });
    }

    let caption = match &store.model {
        Some(model) => format!("Powered by {}.", model),
        None => "Powered by a streaming language model.".to_string(),
    };

    html! {
        <ContextProvider<StoreContext> context={store.clone()}>
            <div class="app-container">
                <div class="sidebar-container">
                    <StoryForm />
                </div>
                <div class="main-stage">
                    <h1>{"✨ Personalized Story Maker"}</h1>
                    <p class="subtitle">
                        {"Enter details about your character and world, and let the model weave a unique tale!"}
                    </p>
                    <hr />
                    <StoryStage />
                    <hr />
                    <footer class="caption">{caption}</footer>
                </div>
            </div>
        </ContextProvider<StoreContext>>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
