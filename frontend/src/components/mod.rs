pub mod markdown;
pub mod story_form;
pub mod story_stage;
