//! Server-rendered HTML pages.
//!
//! Pages are plain `String`s built from small render functions; every value
//! that came from a user goes through [`escape_html`].

pub mod account;
pub mod cheese;

use std::fmt::Write;

use axum::http::StatusCode;

pub const LIST_PATH: &str = "/cheeses/";
pub const ADD_PATH: &str = "/cheeses/add/";
pub const LOGIN_PATH: &str = "/accounts/login/";
pub const LOGOUT_PATH: &str = "/accounts/logout/";
pub const SIGNUP_PATH: &str = "/accounts/signup/";

pub fn detail_path(slug: &str) -> String {
    format!("/cheeses/{}/", encode_path(slug))
}

pub fn update_path(slug: &str) -> String {
    format!("/cheeses/{}/update/", encode_path(slug))
}

/// Where anonymous visitors of `path` are sent.
pub fn login_redirect_target(path: &str) -> String {
    format!("{LOGIN_PATH}?next={}", encode_path(path))
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Percent-encode everything except unreserved characters and `/`.
fn encode_path(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for b in s.bytes() {
        if b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~' | b'/') {
            out.push(b as char);
        } else {
            let _ = write!(out, "%{b:02X}");
        }
    }
    out
}

/// Wrap `body` in the site layout. `user` is the logged-in username, if any.
pub fn layout(title: &str, user: Option<&str>, body: &str) -> String {
    let account = match user {
        Some(username) => format!(
            r#"<span>Signed in as {}</span>
      <form method="post" action="{LOGOUT_PATH}"><button type="submit">Log out</button></form>"#,
            escape_html(username)
        ),
        None => format!(
            r#"<a href="{LOGIN_PATH}">Log in</a>
      <a href="{SIGNUP_PATH}">Sign up</a>"#
        ),
    };

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <title>{title} | EveryCheese</title>
  </head>
  <body>
    <nav>
      <a href="{LIST_PATH}">EveryCheese</a>
      {account}
    </nav>
    <main>
{body}
    </main>
  </body>
</html>
"#,
        title = escape_html(title),
    )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let title = status.canonical_reason().unwrap_or("Error");
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"{LIST_PATH}\">Back to the cheese list</a></p>",
        escape_html(title),
        escape_html(message)
    );
    layout(title, None, &body)
}

/// `<p class="error">` for a field message, or nothing.
pub(crate) fn field_error(message: Option<&str>) -> String {
    message
        .map(|m| format!("<p class=\"error\">{}</p>\n", escape_html(m)))
        .unwrap_or_default()
}
