//! Static landing page for `GET /`.

use axum::response::Html;

const INDEX: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>http-inspector</title>
</head>
<body>
<h1>http-inspector</h1>
<p>See what the server sees of your request, and make it answer the way you ask.</p>
<h2>Request inspection</h2>
<ul>
<li><code>GET /headers</code> request headers</li>
<li><code>GET /ip</code> caller address</li>
<li><code>GET /user_agent</code> caller user agent</li>
<li><code>* /anything[/path]</code> the whole request as JSON</li>
</ul>
<h2>Response behavior</h2>
<ul>
<li><code>* /status/{codes}</code> answer with one of the given codes</li>
<li><code>* /response_headers</code> headers of an empty response</li>
<li><code>GET /cache</code> 304 when conditional headers are sent</li>
<li><code>GET /etag/{etag}</code> If-None-Match / If-Match handling</li>
</ul>
<h2>Cookies</h2>
<ul>
<li><code>GET /cookies</code>, <code>POST /cookies</code></li>
<li><code>GET|PUT|DELETE /cookies/{name}</code></li>
</ul>
</body>
</html>
"#;

pub async fn index() -> Html<&'static str> {
    Html(INDEX)
}
