use std::sync::Arc;

use axum::response::Html;
use error_stack::ResultExt;
use handlebars::Handlebars;
use kernel::KernelError;
use serde::Serialize;

pub const HOME: &str = "home";
pub const BOOK_LIST: &str = "book_list";

const TEMPLATES: [(&str, &str); 2] = [
    (HOME, include_str!("../templates/home.hbs")),
    (BOOK_LIST, include_str!("../templates/book_list.hbs")),
];

/// Compiled page templates, shared read-only by every request.
#[derive(Clone)]
pub struct Pages(Arc<Handlebars<'static>>);

impl Pages {
    pub fn new() -> error_stack::Result<Self, KernelError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        for (name, template) in TEMPLATES {
            registry
                .register_template_string(name, template)
                .change_context(KernelError::Internal)
                .attach_printable_lazy(|| format!("Failed to compile template {name}"))?;
        }
        Ok(Self(Arc::new(registry)))
    }

    pub fn render<T: Serialize>(
        &self,
        name: &str,
        data: &T,
    ) -> error_stack::Result<Html<String>, KernelError> {
        self.0
            .render(name, data)
            .map(Html)
            .change_context(KernelError::Internal)
            .attach_printable_lazy(|| format!("Failed to render template {name}"))
    }
}

#[cfg(test)]
mod test {
    use serde::Serialize;

    use crate::page::{Pages, HOME};

    #[derive(Serialize)]
    struct Empty {}

    #[test]
    fn templates_compile() {
        assert!(Pages::new().is_ok());
    }

    #[derive(Serialize)]
    struct Users {
        users: Vec<Name>,
    }

    #[derive(Serialize)]
    struct Name {
        id: u32,
        name: &'static str,
    }

    #[test]
    fn escapes_interpolated_values() {
        let pages = Pages::new().expect("templates compile");
        let users = Users {
            users: vec![Name {
                id: 1,
                name: "<script>alert(1)</script>",
            }],
        };
        let html = pages.render(HOME, &users).expect("home renders").0;
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn unknown_template_fails() {
        let pages = Pages::new().expect("templates compile");
        assert!(pages.render("missing", &Empty {}).is_err());
    }
}
