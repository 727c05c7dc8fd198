use std::path::Path;

/// Name of the optional template inside the document root.
pub const TEMPLATE_FILE: &str = "error.html";

/// Token replaced by the error title in the template.
pub const PLACEHOLDER: &str = "{{error}}";

/// Renders the HTML body for an error status such as `"404 Not Found"`.
///
/// Uses `error.html` from the document root when it can be read, and a
/// minimal inline page otherwise.
pub async fn render(root: &Path, title: &str) -> String {
    let template_path = root.join(TEMPLATE_FILE);

    match tokio::fs::read_to_string(&template_path).await {
        Ok(template) => template.replace(PLACEHOLDER, title),
        Err(e) => {
            tracing::debug!(
                path = %template_path.display(),
                error = %e,
                "No error template, using inline page"
            );
            fallback(title)
        }
    }
}

pub fn fallback(title: &str) -> String {
    format!("<html><body><h1>{}</h1></body></html>", title)
}
