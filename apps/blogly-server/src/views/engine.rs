use chrono::DateTime;
use minijinja::{Environment, Value, default_auto_escape_callback};

pub trait TemplateEngine: Send + Sync {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error>;
}

pub struct MiniJinjaEngine {
    env: Environment<'static>,
}

impl MiniJinjaEngine {
    pub fn new() -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(default_auto_escape_callback);
        env.set_loader(embedded_template_loader);
        env.add_filter("datetime", format_datetime);
        Self { env }
    }
}

impl Default for MiniJinjaEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for MiniJinjaEngine {
    fn render(&self, template_name: &str, context: Value) -> Result<String, minijinja::Error> {
        let tmpl = self.env.get_template(template_name)?;
        tmpl.render(context)
    }
}

/// `{{ post.created_at|datetime }}` - e.g. "Tue Mar 5 2024, 4:07 PM".
fn format_datetime(value: &str) -> String {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.format("%a %b %-d %Y, %-I:%M %p").to_string())
        .unwrap_or_else(|_| value.to_string())
}

/// Template loader for minijinja that loads from embedded sources
fn embedded_template_loader(name: &str) -> Result<Option<String>, minijinja::Error> {
    let template_content = match name {
        "base.html" => Some(include_str!("../../templates/base.html")),
        "home.html" => Some(include_str!("../../templates/home.html")),
        "error.html" => Some(include_str!("../../templates/error.html")),

        // Users
        "users/list.html" => Some(include_str!("../../templates/users/list.html")),
        "users/new.html" => Some(include_str!("../../templates/users/new.html")),
        "users/show.html" => Some(include_str!("../../templates/users/show.html")),
        "users/edit.html" => Some(include_str!("../../templates/users/edit.html")),

        // Posts
        "posts/new.html" => Some(include_str!("../../templates/posts/new.html")),
        "posts/show.html" => Some(include_str!("../../templates/posts/show.html")),
        "posts/edit.html" => Some(include_str!("../../templates/posts/edit.html")),

        // Tags
        "tags/list.html" => Some(include_str!("../../templates/tags/list.html")),
        "tags/new.html" => Some(include_str!("../../templates/tags/new.html")),
        "tags/show.html" => Some(include_str!("../../templates/tags/show.html")),
        "tags/edit.html" => Some(include_str!("../../templates/tags/edit.html")),

        _ => None,
    };

    Ok(template_content.map(|s| s.to_string()))
}
