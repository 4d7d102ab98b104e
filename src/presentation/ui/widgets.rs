/// Declarative widget tree of the single-page UI.
#[derive(Debug, Clone, PartialEq)]
pub struct Blocks {
    pub title: String,
    pub css: String,
    pub children: Vec<Widget>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Heading(String),
    Row(Vec<Widget>),
    Column(Vec<Widget>),
    VideoInput { name: String, label: String },
    AudioInput { name: String, label: String },
    Slider(Slider),
    Button { id: String, label: String },
    VideoOutput { id: String, label: String },
    Html(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Slider {
    pub name: String,
    pub label: String,
    pub info: String,
    pub minimum: f64,
    pub maximum: f64,
    pub value: f64,
    pub step: f64,
}

impl Blocks {
    /// Depth-first walk over every widget.
    pub fn widgets(&self) -> Vec<&Widget> {
        fn walk<'a>(widgets: &'a [Widget], out: &mut Vec<&'a Widget>) {
            for widget in widgets {
                out.push(widget);
                if let Widget::Row(children) | Widget::Column(children) = widget {
                    walk(children, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(&self.children, &mut out);
        out
    }

    pub fn sliders(&self) -> Vec<&Slider> {
        self.widgets()
            .into_iter()
            .filter_map(|w| match w {
                Widget::Slider(slider) => Some(slider),
                _ => None,
            })
            .collect()
    }
}
