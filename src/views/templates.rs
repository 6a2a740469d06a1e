use handlebars::{Handlebars, TemplateError};
use std::sync::Arc;

pub type Hbs = Arc<Handlebars<'static>>;

const TEMPLATES: &[(&str, &str)] = &[
    ("layouts/base", include_str!("../../templates/layouts/base.hbs")),
    ("pages/home", include_str!("../../templates/pages/home.hbs")),
    ("pages/not_found", include_str!("../../templates/pages/not_found.hbs")),
];

/// Registers the embedded page templates.
pub fn build_handlebars() -> Result<Hbs, TemplateError> {
    let mut hb = Handlebars::new();
    hb.set_strict_mode(false);

    for (name, source) in TEMPLATES {
        hb.register_template_string(name, source)?;
    }

    Ok(Arc::new(hb))
}
