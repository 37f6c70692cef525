use models::FigureOptions;

use std::error::Error as StdError;

/// Error produced by an external renderer.
pub type RenderError = Box<dyn StdError + Send + Sync>;

/// Opaque visualization object handed to a bridge by the host.
///
/// Rendering belongs to the plotting library; the bridge only asks for the
/// finished HTML and the figure's declared size.
pub trait Figure: Send + Sync {
    /// Fully qualified type name, e.g. `panel.viewable.Viewable`.
    fn type_name(&self) -> &str;

    fn options(&self) -> FigureOptions {
        FigureOptions::default()
    }

    fn render_html(&self) -> Result<String, RenderError>;
}
