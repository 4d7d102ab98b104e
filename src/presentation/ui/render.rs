use std::fmt::Write;

use super::layout::{PROCESS_BUTTON_ID, VIDEO_OUTPUT_ID};
use super::widgets::{Blocks, Slider, Widget};

const PROCESS_ENDPOINT: &str = "/api/v1/process";

const BASE_CSS: &str = r#"
body { font-family: system-ui, sans-serif; margin: 0 auto; max-width: 1200px; padding: 16px 16px 96px; }
.row { display: flex; gap: 16px; flex-wrap: wrap; }
.column { display: flex; flex-direction: column; gap: 12px; flex: 1 1 360px; }
.block { border: 1px solid #e5e7eb; border-radius: 8px; padding: 12px; }
.block label { display: block; font-weight: 600; margin-bottom: 6px; }
.block .info { color: #6b7280; font-size: 0.85em; margin: 0 0 6px; }
.slider { flex: 1 1 200px; }
.slider input[type=range] { width: 100%; }
video { width: 100%; max-height: 480px; background: #000; }
button.primary { background: #f97316; color: white; border: none; border-radius: 8px; padding: 12px; font-size: 1em; cursor: pointer; }
button.primary:disabled { opacity: 0.6; cursor: wait; }
.error { color: #b91c1c; white-space: pre-wrap; }
"#;

/// Renders the widget tree as a self-contained HTML page.
pub fn render_page(blocks: &Blocks) -> String {
    let mut body = String::new();
    for widget in &blocks.children {
        render_widget(widget, &mut body);
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="zh">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{base_css}{css}</style>
</head>
<body>
<form id="lipsync-form" onsubmit="return false;">
{body}
</form>
<script>{script}</script>
</body>
</html>
"#,
        title = escape(&blocks.title),
        base_css = BASE_CSS,
        css = blocks.css,
        body = body,
        script = submit_script(blocks),
    )
}

fn render_widget(widget: &Widget, out: &mut String) {
    match widget {
        Widget::Heading(text) => {
            let _ = writeln!(out, r#"<h1 align="center">{}</h1>"#, escape(text));
        }
        Widget::Row(children) => render_container("row", children, out),
        Widget::Column(children) => render_container("column", children, out),
        Widget::VideoInput { name, label } => {
            render_file_input(name, label, "video/*", out);
        }
        Widget::AudioInput { name, label } => {
            render_file_input(name, label, "audio/*", out);
        }
        Widget::Slider(slider) => render_slider(slider, out),
        Widget::Button { id, label } => {
            let _ = writeln!(
                out,
                r#"<button type="button" class="primary" id="{}">{}</button>"#,
                escape(id),
                escape(label)
            );
        }
        Widget::VideoOutput { id, label } => {
            let _ = writeln!(
                out,
                r#"<div class="block"><label for="{id}">{label}</label><video id="{id}" controls></video><p class="error" id="{id}_error"></p></div>"#,
                id = escape(id),
                label = escape(label)
            );
        }
        Widget::Html(raw) => {
            let _ = writeln!(out, "{}", raw);
        }
    }
}

fn render_container(class: &str, children: &[Widget], out: &mut String) {
    let _ = writeln!(out, r#"<div class="{}">"#, class);
    for child in children {
        render_widget(child, out);
    }
    let _ = writeln!(out, "</div>");
}

fn render_file_input(name: &str, label: &str, accept: &str, out: &mut String) {
    let _ = writeln!(
        out,
        r#"<div class="block"><label for="{name}">{label}</label><input type="file" id="{name}" name="{name}" accept="{accept}" required></div>"#,
        name = escape(name),
        label = escape(label),
        accept = accept
    );
}

fn render_slider(slider: &Slider, out: &mut String) {
    let _ = writeln!(
        out,
        r#"<div class="block slider"><label for="{name}">{label} <output id="{name}_value">{value}</output></label><p class="info">{info}</p><input type="range" id="{name}" name="{name}" min="{min}" max="{max}" step="{step}" value="{value}" oninput="document.getElementById('{name}_value').value = this.value"></div>"#,
        name = escape(&slider.name),
        label = escape(&slider.label),
        info = escape(&slider.info),
        min = slider.minimum,
        max = slider.maximum,
        step = slider.step,
        value = slider.value,
    );
}

fn submit_script(blocks: &Blocks) -> String {
    let fields: Vec<String> = blocks
        .widgets()
        .into_iter()
        .filter_map(|w| match w {
            Widget::VideoInput { name, .. } | Widget::AudioInput { name, .. } => {
                Some(format!("['{}', true]", name))
            }
            Widget::Slider(slider) => Some(format!("['{}', false]", slider.name)),
            _ => None,
        })
        .collect();

    format!(
        r#"
(function () {{
  const fields = [{fields}];
  const button = document.getElementById('{button}');
  const output = document.getElementById('{output}');
  const error = document.getElementById('{output}_error');
  button.addEventListener('click', async function () {{
    const form = new FormData();
    for (const [name, isFile] of fields) {{
      const input = document.getElementById(name);
      if (isFile) {{
        if (!input.files.length) {{ error.textContent = 'Missing ' + name + ' file'; return; }}
        form.append(name, input.files[0]);
      }} else {{
        form.append(name, input.value);
      }}
    }}
    button.disabled = true;
    error.textContent = '';
    try {{
      const response = await fetch('{endpoint}', {{ method: 'POST', body: form, credentials: 'same-origin' }});
      const body = await response.json().catch(() => ({{ error: response.statusText }}));
      if (!response.ok) {{ error.textContent = body.error || response.statusText; return; }}
      output.src = body.video_url;
      output.load();
    }} catch (e) {{
      error.textContent = String(e);
    }} finally {{
      button.disabled = false;
    }}
  }});
}})();
"#,
        fields = fields.join(", "),
        button = PROCESS_BUTTON_ID,
        output = VIDEO_OUTPUT_ID,
        endpoint = PROCESS_ENDPOINT,
    )
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
