// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jesof

use axum::response::Html;

const INDEX_PAGE: &str = r#"<html>
<head><title>BT Home Hub Exporter</title></head>
<body>
<h1>BT Home Hub Exporter</h1>
<p><a href="/metrics">Metrics</a></p>
</body>
</html>
"#;

/// GET /
pub async fn index() -> Html<&'static str> {
    Html(INDEX_PAGE)
}
