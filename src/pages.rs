//! Server-rendered HTML for the landing page and the account forms.

use axum::response::Html;

pub const MAIN_TITLE: &str = "Main";
pub const REGISTRATION_TITLE: &str = "Registration";
pub const LOGIN_TITLE: &str = "Logging in";

pub fn main_page(login: Option<&str>) -> Html<String> {
    let body = match login {
        Some(_) => r#"<p>Browse the catalog at <a href="/data">/data</a>.</p>"#.to_string(),
        None => r#"<p>Register or log in to access the catalog.</p>"#.to_string(),
    };
    layout(MAIN_TITLE, "", login, &body)
}

pub fn registration_page(message: &str) -> Html<String> {
    let form = r#"<form method="post" action="/reg">
    <label>Login <input type="text" name="login"></label>
    <label>Password <input type="password" name="pass"></label>
    <label>Repeat password <input type="password" name="rep_pass"></label>
    <button type="submit">Register</button>
</form>"#;
    layout(REGISTRATION_TITLE, message, None, form)
}

pub fn login_page(message: &str) -> Html<String> {
    let form = r#"<form method="post" action="/login">
    <label>Login <input type="text" name="login"></label>
    <label>Password <input type="password" name="pass"></label>
    <button type="submit">Log in</button>
</form>"#;
    layout(LOGIN_TITLE, message, None, form)
}

fn layout(title: &str, message: &str, login: Option<&str>, body: &str) -> Html<String> {
    let user_line = match login {
        Some(login) => format!(r#"<p class="user">Signed in as <b>{}</b></p>"#, escape(login)),
        None => String::new(),
    };
    let message_line = if message.is_empty() {
        String::new()
    } else {
        format!(r#"<p class="message">{}</p>"#, escape(message))
    };

    Html(format!(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="utf-8">
    <title>{title}</title>
</head>
<body>
<nav>
    <a href="/">Main</a>
    <a href="/reg">Registration</a>
    <a href="/login">Log in</a>
    <a href="/logout">Log out</a>
</nav>
<h1>{title}</h1>
{user_line}
{message_line}
{body}
</body>
</html>
"#,
        title = escape(title),
    ))
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_is_escaped_on_main_page() {
        let Html(page) = main_page(Some("<script>"));
        assert!(page.contains("&lt;script&gt;"));
        assert!(!page.contains("<b><script>"));
    }

    #[test]
    fn message_appears_only_when_set() {
        let Html(empty) = login_page("");
        assert!(!empty.contains(r#"class="message""#));
        let Html(with) = login_page("Passwords do not match");
        assert!(with.contains("Passwords do not match"));
    }

    #[test]
    fn registration_form_posts_expected_fields() {
        let Html(page) = registration_page("");
        for field in ["name=\"login\"", "name=\"pass\"", "name=\"rep_pass\""] {
            assert!(page.contains(field), "missing {field}");
        }
    }
}
