use bridge_core::bridge::{Figure, RenderError};

use models::FigureOptions;

/// Figure whose rendered HTML is fixed, standing in for a plotting library.
pub struct StaticFigure {
    pub type_name: &'static str,
    pub html: String,
}

impl StaticFigure {
    pub fn panel(html: &str) -> Self {
        Self {
            type_name: "panel.template.base.BaseTemplate",
            html: html.to_string(),
        }
    }
}

impl Figure for StaticFigure {
    fn type_name(&self) -> &str {
        self.type_name
    }

    fn options(&self) -> FigureOptions {
        FigureOptions::new(Some(640.0), Some(480.0))
    }

    fn render_html(&self) -> Result<String, RenderError> {
        Ok(self.html.clone())
    }
}

/// Pull the redirect target out of a written redirect document.
pub fn redirect_target(document: &str) -> Option<&str> {
    let start = document.find("url='")? + "url='".len();
    let end = document[start..].find('\'')?;
    Some(&document[start..start + end])
}
