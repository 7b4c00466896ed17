use std::path::Path;

use minijinja::{Environment, context, path_loader};

use crate::models::Piece;

/// Renders the listing page from the template directory.
pub struct PageRenderer {
    env: Environment<'static>,
}

impl PageRenderer {
    /// The listing template, looked up in the template directory
    pub const LISTING_TEMPLATE: &'static str = "index.html";

    pub fn new(template_dir: impl AsRef<Path>) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(template_dir.as_ref().to_path_buf()));

        Self { env }
    }

    pub fn render_listing(&self, pieces: &[Piece]) -> Result<String, minijinja::Error> {
        let template = self.env.get_template(Self::LISTING_TEMPLATE)?;
        template.render(context! { pieces => pieces })
    }
}
