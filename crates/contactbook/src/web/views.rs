//! HTML templates for the web layer.
//!
//! Templates are compiled into the binary and registered once. Names end in
//! `.html`, so minijinja escapes every interpolated value.

use minijinja::Environment;
use serde::Serialize;

use crate::error::Result;

const TEMPLATES: &[(&str, &str)] = &[
    ("layout.html", include_str!("../../templates/layout.html")),
    ("form_fields.html", include_str!("../../templates/form_fields.html")),
    ("index.html", include_str!("../../templates/index.html")),
    ("new.html", include_str!("../../templates/new.html")),
    ("show.html", include_str!("../../templates/show.html")),
    ("edit.html", include_str!("../../templates/edit.html")),
];

/// Compiled page templates.
#[derive(Debug)]
pub struct Views {
    env: Environment<'static>,
}

impl Views {
    /// Compile all page templates.
    ///
    /// # Errors
    ///
    /// Returns a template error if any template fails to parse.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        for &(name, source) in TEMPLATES {
            env.add_template(name, source)?;
        }
        Ok(Self { env })
    }

    /// Render the named template with the given context.
    ///
    /// # Errors
    ///
    /// Returns a template error if the template is unknown or rendering fails.
    pub fn render<S: Serialize>(&self, name: &str, ctx: S) -> Result<String> {
        let template = self.env.get_template(name)?;
        Ok(template.render(ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::Contact;
    use minijinja::context;

    #[test]
    fn test_all_templates_compile() {
        assert!(Views::new().is_ok());
    }

    #[test]
    fn test_index_lists_contacts() {
        let views = Views::new().unwrap();
        let contacts = vec![Contact::new(7, "Ann", "ann@x.io", "555")];
        let html = views
            .render("index.html", context! { contacts => contacts, q => "" })
            .unwrap();
        assert!(html.contains("Ann"));
        assert!(html.contains("/contacts/7/edit"));
    }

    #[test]
    fn test_index_empty_with_query() {
        let views = Views::new().unwrap();
        let contacts: Vec<Contact> = Vec::new();
        let html = views
            .render("index.html", context! { contacts => contacts, q => "zz" })
            .unwrap();
        assert!(html.contains("No contacts"));
    }

    #[test]
    fn test_values_are_escaped() {
        let views = Views::new().unwrap();
        let contact = Contact::new(1, "<b>Ann</b>", "a@b", "");
        let html = views
            .render("show.html", context! { contact => contact })
            .unwrap();
        assert!(html.contains("&lt;b&gt;Ann"));
        assert!(!html.contains("<b>Ann</b>"));
    }

    #[test]
    fn test_unknown_template() {
        let views = Views::new().unwrap();
        assert!(views.render("missing.html", context! {}).is_err());
    }
}
