//! HTML escaping and the server-rendered pages.
//!
//! Pages are plain format strings; every user-originated value goes through
//! [`escape_html`] before it is embedded. The raw endpoint never uses any of
//! this.

use crate::model::HistoryEntry;

pub const NOT_FOUND_PAGE: &str = "<h1>Paste not found</h1>";

/// Maps the characters `& < > " ' ` = /` to their HTML entities; everything
/// else passes through unchanged.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            '`' => out.push_str("&#x60;"),
            '=' => out.push_str("&#x3D;"),
            '/' => out.push_str("&#x2F;"),
            _ => out.push(ch),
        }
    }
    out
}

const PAGE_STYLE: &str = r#"
    body {
        font-family: 'Arial', sans-serif;
        background-color: #f4f7fb;
        color: #333;
        margin: 0;
        padding: 0;
    }
    .container {
        max-width: 900px;
        margin: 30px auto;
        background-color: #ffffff;
        padding: 40px;
        border-radius: 12px;
        box-shadow: 0 12px 20px rgba(0, 0, 0, 0.1);
    }
    h2 {
        text-align: center;
        font-size: 30px;
        color: #2c6bed;
        margin-bottom: 20px;
    }
    pre {
        white-space: pre-wrap;
        word-wrap: break-word;
        background: #f7f7f7;
        padding: 20px;
        border-radius: 10px;
        font-size: 18px;
        color: #444;
        border: 1px solid #ddd;
    }
    p {
        text-align: center;
        font-size: 18px;
        color: #777;
    }
    table {
        width: 100%;
        border-collapse: collapse;
        margin-top: 20px;
    }
    th, td {
        padding: 12px;
        border: 1px solid #ddd;
        text-align: center;
        font-size: 16px;
    }
    th {
        background-color: #2c6bed;
        color: white;
    }
    td {
        background-color: #f9f9f9;
    }
    .btn-container {
        text-align: center;
        margin-top: 20px;
    }
    .btn {
        background-color: #2c6bed;
        color: white;
        padding: 12px 24px;
        border: none;
        border-radius: 5px;
        cursor: pointer;
        text-decoration: none;
        font-size: 16px;
    }
    .btn:hover {
        background-color: #1d4a99;
    }
    .copy-btn {
        margin-right: 15px;
    }
    .copy-message {
        display: none;
        margin-top: 10px;
        color: #2c6bed;
        font-size: 16px;
        text-align: center;
    }
"#;

const COPY_SCRIPT: &str = r#"
    const copyButton = document.getElementById('copyButton');
    const copyMessage = document.getElementById('copyMessage');
    const pasteContent = document.getElementById('pasteContent');

    copyButton.addEventListener('click', () => {
        navigator.clipboard.writeText(pasteContent.innerText).then(() => {
            copyMessage.style.display = 'inline';
            setTimeout(() => copyMessage.style.display = 'none', 2000);
        });
    });
"#;

/// Rendered view of a paste: escaped content, a raw-view link, and a
/// clipboard-copy button.
pub fn paste_page(id: &str, content: &str) -> String {
    let id = escape_html(id);
    format!(
        r#"<html>
<head>
    <title>Pistebin</title>
    <style>{style}</style>
</head>
<body>
    <div class="container">
        <h2>Your Paste</h2>
        <div class="btn-container">
            <a href="/raw/{id}" class="btn">View Raw</a>
            <button id="copyButton" class="btn copy-btn">Copy to Clipboard</button>
        </div>
        <pre id="pasteContent">{content}</pre>
        <span id="copyMessage" class="copy-message">Copied to Clipboard!</span>
    </div>
    <script>{script}</script>
</body>
</html>"#,
        style = PAGE_STYLE,
        id = id,
        content = escape_html(content),
        script = COPY_SCRIPT,
    )
}

pub fn history_empty_page() -> String {
    format!(
        r#"<html>
<head>
    <title>History - No Pastes</title>
    <style>{style}</style>
</head>
<body>
    <div class="container">
        <h2>Your Paste History</h2>
        <p>No pastes found.</p>
    </div>
</body>
</html>"#,
        style = PAGE_STYLE,
    )
}

pub fn history_page(entries: &[HistoryEntry]) -> String {
    let rows: String = entries
        .iter()
        .map(|entry| {
            let id = escape_html(&entry.id);
            format!(
                r#"
                <tr>
                    <td>{id}</td>
                    <td><a href="/paste/{id}" class="btn">View Paste</a></td>
                </tr>"#,
            )
        })
        .collect();

    format!(
        r#"<html>
<head>
    <title>Paste History</title>
    <style>{style}</style>
</head>
<body>
    <div class="container">
        <h2>Your Paste History</h2>
        <table>
            <thead>
                <tr>
                    <th>ID</th>
                    <th>Action</th>
                </tr>
            </thead>
            <tbody>{rows}
            </tbody>
        </table>
    </div>
</body>
</html>"#,
        style = PAGE_STYLE,
        rows = rows,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_every_special_character() {
        assert_eq!(escape_html("&"), "&amp;");
        assert_eq!(escape_html("<"), "&lt;");
        assert_eq!(escape_html(">"), "&gt;");
        assert_eq!(escape_html("\""), "&quot;");
        assert_eq!(escape_html("'"), "&#x27;");
        assert_eq!(escape_html("`"), "&#x60;");
        assert_eq!(escape_html("="), "&#x3D;");
        assert_eq!(escape_html("/"), "&#x2F;");
    }

    #[test]
    fn passes_other_text_through() {
        assert_eq!(escape_html("hello world"), "hello world");
        assert_eq!(escape_html("héllo ✓"), "héllo ✓");
        assert_eq!(escape_html(""), "");
    }

    #[test]
    fn neutralizes_script_tags() {
        let escaped = escape_html("<script>alert(1)</script>");
        assert!(!escaped.contains('<'));
        assert!(!escaped.contains('>'));
        assert_eq!(escaped, "&lt;script&gt;alert(1)&lt;&#x2F;script&gt;");
    }

    #[test]
    fn paste_page_embeds_escaped_content_in_pre() {
        let page = paste_page("deadbeef", "hello world");
        assert!(page.contains(r#"<pre id="pasteContent">hello world</pre>"#));
        assert!(page.contains(r#"href="/raw/deadbeef""#));

        let hostile = paste_page("deadbeef", "<script>alert(1)</script>");
        assert!(!hostile.contains("<script>alert(1)</script>"));
        assert!(hostile.contains("&lt;script&gt;alert(1)&lt;&#x2F;script&gt;"));
    }

    #[test]
    fn history_page_lists_and_escapes_ids() {
        let entries = vec![
            HistoryEntry {
                id: "aaaa1111".to_string(),
                content: "one".to_string(),
            },
            HistoryEntry {
                id: "<evil>".to_string(),
                content: "two".to_string(),
            },
        ];
        let page = history_page(&entries);
        assert!(page.contains(r#"href="/paste/aaaa1111""#));
        assert!(page.contains("&lt;evil&gt;"));
        assert!(!page.contains("<evil>"));
    }

    #[test]
    fn empty_history_states_no_pastes() {
        let page = history_empty_page();
        assert!(page.contains("No pastes found."));
        assert!(!page.contains("<table"));
    }
}
