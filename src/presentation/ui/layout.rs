use super::widgets::{Blocks, Slider, Widget};
use crate::domain::{GuidanceScale, InferenceSteps};

pub const VIDEO_FIELD: &str = "video";
pub const AUDIO_FIELD: &str = "audio";
pub const GUIDANCE_SCALE_FIELD: &str = "guidance_scale";
pub const INFERENCE_STEPS_FIELD: &str = "inference_steps";
pub const SEED_FIELD: &str = "seed";

pub const PROCESS_BUTTON_ID: &str = "process_btn";
pub const VIDEO_OUTPUT_ID: &str = "video_output";

const TITLE: &str = "唇形同步";

const CSS: &str = r#"
.footer {
  position: fixed;
  bottom: 0;
  left: 0;
  width: 100%;
  height: 80px;
  background-color: white;
}
"#;

pub fn guidance_scale_slider() -> Slider {
    Slider {
        name: GUIDANCE_SCALE_FIELD.to_string(),
        label: "引导尺度".to_string(),
        info: "较高的值可以提高唇形同步精度，但可能会导致视频失真或抖动。".to_string(),
        minimum: GuidanceScale::MIN,
        maximum: GuidanceScale::MAX,
        value: GuidanceScale::DEFAULT,
        step: GuidanceScale::STEP,
    }
}

pub fn inference_steps_slider() -> Slider {
    Slider {
        name: INFERENCE_STEPS_FIELD.to_string(),
        label: "推理步数".to_string(),
        info: "值越高，视频质量越好，但生成速度越慢。".to_string(),
        minimum: InferenceSteps::MIN as f64,
        maximum: InferenceSteps::MAX as f64,
        value: InferenceSteps::DEFAULT as f64,
        step: InferenceSteps::STEP as f64,
    }
}

/// Inputs on the left, generated video on the right, blank footer pinned to the bottom.
pub fn lip_sync_blocks() -> Blocks {
    let inputs = Widget::Column(vec![
        Widget::VideoInput {
            name: VIDEO_FIELD.to_string(),
            label: "上传视频".to_string(),
        },
        Widget::AudioInput {
            name: AUDIO_FIELD.to_string(),
            label: "上传音频".to_string(),
        },
        Widget::Row(vec![
            Widget::Slider(guidance_scale_slider()),
            Widget::Slider(inference_steps_slider()),
        ]),
        Widget::Button {
            id: PROCESS_BUTTON_ID.to_string(),
            label: "生成视频".to_string(),
        },
    ]);

    let outputs = Widget::Column(vec![Widget::VideoOutput {
        id: VIDEO_OUTPUT_ID.to_string(),
        label: "输出视频".to_string(),
    }]);

    Blocks {
        title: TITLE.to_string(),
        css: CSS.to_string(),
        children: vec![
            Widget::Heading(TITLE.to_string()),
            Widget::Row(vec![inputs, outputs]),
            Widget::Html(r#"<div class="footer"></div>"#.to_string()),
        ],
    }
}
