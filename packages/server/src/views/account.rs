use super::{LOGIN_PATH, SIGNUP_PATH, escape_html, field_error, layout};

pub fn login_page(username: &str, next: Option<&str>, error: Option<&str>) -> String {
    let next_field = next
        .map(|n| {
            format!(
                "<input type=\"hidden\" name=\"next\" value=\"{}\">\n",
                escape_html(n)
            )
        })
        .unwrap_or_default();

    let body = format!(
        r#"<h2>Log In</h2>
{error}<form method="post" action="{LOGIN_PATH}">
<label for="id_username">Username</label>
<input type="text" name="username" id="id_username" value="{username}" required>
<label for="id_password">Password</label>
<input type="password" name="password" id="id_password" required>
{next_field}<button type="submit">Log in</button>
</form>
<p>No account yet? <a href="{SIGNUP_PATH}">Sign up</a></p>
"#,
        error = field_error(error),
        username = escape_html(username),
    );

    layout("Log In", None, &body)
}

pub fn signup_page(username: &str, error: Option<&str>) -> String {
    let body = format!(
        r#"<h2>Sign Up</h2>
{error}<form method="post" action="{SIGNUP_PATH}">
<label for="id_username">Username</label>
<input type="text" name="username" id="id_username" maxlength="32" value="{username}" required>
<label for="id_password">Password</label>
<input type="password" name="password" id="id_password" minlength="8" maxlength="128" required>
<button type="submit">Sign up</button>
</form>
<p>Already registered? <a href="{LOGIN_PATH}">Log in</a></p>
"#,
        error = field_error(error),
        username = escape_html(username),
    );

    layout("Sign Up", None, &body)
}
