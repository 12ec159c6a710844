//! Welcome page served at `/`.

use axum::{Extension, response::Html};

use crate::middleware::context::DisplayName;

pub async fn welcome(Extension(DisplayName(name)): Extension<DisplayName>) -> Html<String> {
    let name_insert = if name.is_empty() {
        String::new()
    } else {
        format!(" {name}")
    };

    Html(format!(
        "\n    <h2>Lambda Hubs API</h2>\n    <p>Welcome{name_insert} to the Lambda Hubs API</p>\n    "
    ))
}
