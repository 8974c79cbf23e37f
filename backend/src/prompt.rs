use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs,
};
use async_openai::error::OpenAIError;
use shared::models::StoryRequest;

pub const SYSTEM_INSTRUCTION: &str = "You are a magical storyteller. You must write a creative, \
engaging, and unique short story based ONLY on the user's provided details. Structure the story \
with an introduction, conflict, and resolution. The story should have a clear beginning and end.";

/// Interpolates the story details into the user prompt.
pub fn build_prompt(request: &StoryRequest) -> String {
    let name = request.name.trim();
    format!(
        "Please write a personalized story for the main character named '{name}'.\n\
         \n\
         Story Theme/Genre: {theme}\n\
         Key Setting/Location: {setting}\n\
         Length: {length} words.\n\
         \n\
         The main character, {name}, loves {hobby} and their defining personality trait is {personality}.\n\
         Begin the story now:",
        theme = request.theme.trim(),
        setting = request.setting.trim(),
        length = request.length,
        hobby = request.hobby.trim(),
        personality = request.personality.trim(),
    )
}

/// System instruction followed by the user prompt.
pub fn build_conversation(
    request: &StoryRequest,
) -> Result<Vec<ChatCompletionRequestMessage>, OpenAIError> {
    let system = ChatCompletionRequestSystemMessageArgs::default()
        .content(SYSTEM_INSTRUCTION)
        .build()?;
    let user = ChatCompletionRequestUserMessageArgs::default()
        .content(build_prompt(request))
        .build()?;

    Ok(vec![
        ChatCompletionRequestMessage::System(system),
        ChatCompletionRequestMessage::User(user),
    ])
}
