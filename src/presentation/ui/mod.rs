mod layout;
mod render;
mod widgets;

pub use layout::{
    AUDIO_FIELD, GUIDANCE_SCALE_FIELD, INFERENCE_STEPS_FIELD, PROCESS_BUTTON_ID, SEED_FIELD,
    VIDEO_FIELD, VIDEO_OUTPUT_ID, guidance_scale_slider, inference_steps_slider, lip_sync_blocks,
};
pub use render::render_page;
pub use widgets::{Blocks, Slider, Widget};
