//! Static landing page: a small form that turns a raw calendar URL into a
//! sealed subscription link.

use salvo::writing::Text;
use salvo::{Response, Router, handler};

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Calendar Subscription Enhancer</title>
    <link rel="stylesheet" href="/styles.css">
</head>
<body>
    <div class="container">
        <header>
            <h1>Calendar Subscription Enhancer</h1>
            <p class="subtitle">Cleaner titles · privacy filter · map-friendly locations</p>
        </header>
        <main>
            <div class="card">
                <h2>Generate secure link</h2>
                <form id="enhanceForm">
                    <label for="calendarUrl">Paste your campus iCal URL</label>
                    <input type="url" id="calendarUrl" name="calendarUrl"
                           placeholder="https://srh-community.campusweb.cloud/..." required>
                    <button type="submit" class="btn-primary">Encrypt &amp; enhance</button>
                </form>
            </div>
            <div id="result" class="card" style="display: none;">
                <h2>Your subscription link</h2>
                <p class="instruction">Subscribe to this URL in your calendar app:</p>
                <input type="text" id="enhancedUrl" readonly>
                <div class="button-group">
                    <button id="copyBtn">Copy</button>
                    <button id="webcalBtn">Open in calendar app</button>
                </div>
            </div>
            <div id="error" class="card error-card" style="display: none;">
                <p id="errorMessage"></p>
            </div>
        </main>
    </div>
    <script src="/app.js"></script>
</body>
</html>"#;

const STYLES_CSS: &str = r#"
:root { --bg: #0f172a; --card: rgba(30, 41, 59, 0.85); --accent: #d44407; --text: #f1f5f9; }
body {
    font-family: system-ui, sans-serif;
    background: var(--bg);
    color: var(--text);
    min-height: 100vh;
    display: flex;
    justify-content: center;
    margin: 0;
    padding: 2rem;
}
.container { max-width: 600px; width: 100%; }
h1 { text-align: center; color: var(--accent); }
.subtitle { text-align: center; color: #94a3b8; margin-bottom: 2rem; }
.card {
    background: var(--card);
    border: 1px solid rgba(255, 255, 255, 0.1);
    border-radius: 1rem;
    padding: 1.5rem;
    margin-bottom: 1.5rem;
}
label { display: block; font-size: 0.875rem; margin-bottom: 0.5rem; }
input {
    width: 100%;
    box-sizing: border-box;
    padding: 0.75rem;
    border: 1px solid rgba(255, 255, 255, 0.15);
    border-radius: 0.5rem;
    background: rgba(15, 23, 42, 0.6);
    color: var(--text);
    margin-bottom: 1rem;
}
button {
    padding: 0.75rem 1rem;
    border: none;
    border-radius: 0.5rem;
    background: var(--accent);
    color: white;
    cursor: pointer;
}
.button-group { display: flex; gap: 0.5rem; margin-top: 0.5rem; }
.error-card { border-color: #b91c1c; color: #fca5a5; }
"#;

const APP_JS: &str = r#"
document.getElementById('enhanceForm').addEventListener('submit', async (e) => {
    e.preventDefault();
    const err = document.getElementById('errorMessage');
    const result = document.getElementById('result');
    const input = document.getElementById('calendarUrl');
    err.parentElement.style.display = 'none';
    result.style.display = 'none';
    try {
        const response = await fetch('/api/generate?url=' + encodeURIComponent(input.value));
        const data = await response.json();
        if (!response.ok) throw new Error(data.error);
        document.getElementById('enhancedUrl').value = data.enhancedUrl;
        result.style.display = 'block';
    } catch (e) {
        err.textContent = e.message;
        err.parentElement.style.display = 'block';
    }
});
document.getElementById('copyBtn').addEventListener('click', () => {
    navigator.clipboard.writeText(document.getElementById('enhancedUrl').value);
});
document.getElementById('webcalBtn').addEventListener('click', () => {
    const url = document.getElementById('enhancedUrl').value;
    if (url) window.location.href = url.replace(/^https?:\/\//, 'webcal://');
});
"#;

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .get(index)
        .push(Router::with_path("index.html").get(index))
        .push(Router::with_path("styles.css").get(styles))
        .push(Router::with_path("app.js").get(script))
}

#[handler]
pub async fn index(res: &mut Response) {
    res.render(Text::Html(INDEX_HTML));
}

#[handler]
pub async fn styles(res: &mut Response) {
    res.render(Text::Css(STYLES_CSS));
}

#[handler]
pub async fn script(res: &mut Response) {
    res.render(Text::Js(APP_JS));
}
