use handlebars::Handlebars;
use serde::Serialize;

use crate::error::DashboardResult;

/// Page title shown in the browser tab and the landing heading
pub const PAGE_TITLE: &str = "Student Performance Dashboard";

const TEMPLATES: [(&str, &str); 3] = [
    ("landing", include_str!("./templates/landing.hbs")),
    ("track", include_str!("./templates/track.hbs")),
    ("student", include_str!("./templates/student.hbs")),
];

const PARTIALS: [(&str, &str); 2] = [
    ("header", include_str!("./templates/header.hbs")),
    ("footer", include_str!("./templates/footer.hbs")),
];

#[derive(Serialize)]
struct Page<'a, T: Serialize> {
    title: &'a str,
    #[serde(flatten)]
    view: &'a T,
}

/// HTML renderer for the screens
///
/// Templates are compiled into the binary and registered once at startup.
/// Values are HTML-escaped by handlebars.
pub struct Renderer {
    registry: Handlebars<'static>,
}

impl Renderer {
    pub fn new() -> DashboardResult<Self> {
        let mut registry = Handlebars::new();
        for (name, source) in PARTIALS {
            registry.register_partial(name, source)?;
        }
        for (name, source) in TEMPLATES {
            registry.register_template_string(name, source)?;
        }
        Ok(Self { registry })
    }

    /// Render one screen template with its view model
    pub fn render<T: Serialize>(&self, template: &str, view: &T) -> DashboardResult<String> {
        let page = Page {
            title: PAGE_TITLE,
            view,
        };
        Ok(self.registry.render(template, &page)?)
    }
}
