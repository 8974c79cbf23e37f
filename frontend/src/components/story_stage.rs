use crate::store::StoreContext;
use wasm_bindgen_futures::JsFuture;
use yew::prelude::*;

#[function_component(StoryStage)]
pub fn story_stage() -> Html {
    let store = use_context::<StoreContext>().expect("Store context not found");
    let output = &store.output;

    let Some(subject) = store.subject.clone() else {
        return html! {
            <div class="story-empty">
                {"Fill in your character and world, then generate a story."}
            </div>
        };
    };

    let on_copy = {
        let content = output.text.clone();
        Callback::from(move |_: MouseEvent| {
            let content = content.clone();
            yew::platform::spawn_local(async move {
                if let Some(window) = web_sys::window() {
                    let clipboard = window.navigator().clipboard();
                    let promise = clipboard.write_text(&content);
                    if let Err(e) = JsFuture::from(promise).await {
                        tracing::error!("Failed to copy story: {:?}", e);
                    }
                }
            });
        })
    };

    html! {
        <div class="story">
            <h2 class="story-title">{format!("📖 The Story of {}", subject.name.trim())}</h2>

            if store.is_generating && output.text.is_empty() {
                <div class="spinner">
                    {format!("Weaving a {} tale about {}...", subject.theme, subject.name.trim())}
                </div>
            }

            <div class="story-text">
                <super::markdown::Markdown content={output.text.clone()} />
            </div>

            if let Some(error) = &output.error {
                <div class="error">
                    {format!("An error occurred during story generation: {}", error)}
                </div>
            }

            if output.finished && output.error.is_none() && !output.text.is_empty() {
                <div class="story-actions">
                    <button class="btn btn-secondary btn-sm" onclick={on_copy}>{"Copy story"}</button>
                </div>
            }
        </div>
    }
}
