use std::fmt::Write;

use everycheese_common::Firmness;

use super::{ADD_PATH, detail_path, escape_html, field_error, layout, update_path};
use crate::models::cheese::CheeseForm;
use crate::models::shared::FieldErrors;
use crate::store::{CheeseRecord, Country};

pub fn list_page(cheeses: &[CheeseRecord], user: Option<&str>) -> String {
    let mut body = String::from("<h2>Cheese List</h2>\n");

    if cheeses.is_empty() {
        body.push_str("<p>No cheeses yet.</p>\n");
    } else {
        body.push_str("<ul>\n");
        for cheese in cheeses {
            let _ = writeln!(
                body,
                "  <li><a href=\"{}\">{}</a></li>",
                detail_path(&cheese.slug),
                escape_html(&cheese.name)
            );
        }
        body.push_str("</ul>\n");
    }

    if user.is_some() {
        let _ = writeln!(body, "<p><a href=\"{ADD_PATH}\">Add Cheese</a></p>");
    }

    layout("Cheese List", user, &body)
}

pub fn detail_page(cheese: &CheeseRecord, user: Option<&str>) -> String {
    let mut body = format!("<h2>{}</h2>\n", escape_html(&cheese.name));

    let _ = writeln!(body, "<p>Firmness: {}</p>", cheese.firmness.label());
    if let Some(ref country) = cheese.country {
        let _ = writeln!(
            body,
            "<p>Country of Origin: {}</p>",
            escape_html(&country.name)
        );
    }
    if !cheese.description.is_empty() {
        let _ = writeln!(
            body,
            "<p class=\"description\">{}</p>",
            escape_html(&cheese.description)
        );
    }
    let _ = writeln!(
        body,
        "<p>Added by {}</p>",
        escape_html(&cheese.creator.username)
    );
    let _ = writeln!(
        body,
        "<p><a href=\"{}\">Update</a></p>",
        update_path(&cheese.slug)
    );

    layout(&cheese.name, user, &body)
}

/// Which form is being shown; update forms lock the identity fields.
#[derive(Clone, Copy)]
pub enum FormMode<'a> {
    Add,
    Update(&'a CheeseRecord),
}

impl FormMode<'_> {
    fn heading(&self) -> &'static str {
        match self {
            Self::Add => "Add Cheese",
            Self::Update(_) => "Update Cheese",
        }
    }

    fn action(&self) -> String {
        match self {
            Self::Add => ADD_PATH.to_string(),
            Self::Update(cheese) => update_path(&cheese.slug),
        }
    }
}

fn firmness_select(selected: &str) -> String {
    let mut out = String::from("<select name=\"firmness\" id=\"id_firmness\">\n");
    for firmness in Firmness::ALL {
        let _ = writeln!(
            out,
            "  <option value=\"{code}\"{sel}>{label}</option>",
            code = firmness.code(),
            sel = if firmness.code() == selected { " selected" } else { "" },
            label = firmness.label(),
        );
    }
    out.push_str("</select>\n");
    out
}

fn country_select(countries: &[Country], selected: &str) -> String {
    let mut out =
        String::from("<select name=\"country_of_origin\" id=\"id_country_of_origin\">\n");
    out.push_str("  <option value=\"\">---------</option>\n");
    for country in countries {
        let sel = if country.code.eq_ignore_ascii_case(selected.trim()) {
            " selected"
        } else {
            ""
        };
        let _ = writeln!(
            out,
            "  <option value=\"{}\"{sel}>{}</option>",
            escape_html(&country.code),
            escape_html(&country.name)
        );
    }
    out.push_str("</select>\n");
    out
}

/// Add or update form, prefilled with `form` and annotated with `errors`.
pub fn form_page(
    mode: FormMode<'_>,
    form: &CheeseForm,
    errors: &FieldErrors,
    countries: &[Country],
    user: Option<&str>,
) -> String {
    let heading = mode.heading();
    let mut body = format!("<h2>{heading}</h2>\n");
    let _ = writeln!(body, "<form method=\"post\" action=\"{}\">", mode.action());

    match mode {
        FormMode::Add => {
            let _ = writeln!(
                body,
                "<label for=\"id_name\">Name</label>\n<input type=\"text\" name=\"name\" id=\"id_name\" maxlength=\"255\" value=\"{}\" required>",
                escape_html(&form.name)
            );
            body.push_str(&field_error(errors.get("name")));
        }
        FormMode::Update(cheese) => {
            let _ = writeln!(body, "<p>Name: {}</p>", escape_html(&cheese.name));
        }
    }

    let _ = writeln!(
        body,
        "<label for=\"id_description\">Description</label>\n<textarea name=\"description\" id=\"id_description\">{}</textarea>",
        escape_html(&form.description)
    );
    body.push_str(&field_error(errors.get("description")));

    body.push_str("<label for=\"id_firmness\">Firmness</label>\n");
    body.push_str(&firmness_select(form.firmness.trim()));
    body.push_str(&field_error(errors.get("firmness")));

    match mode {
        FormMode::Add => {
            body.push_str("<label for=\"id_country_of_origin\">Country of Origin</label>\n");
            body.push_str(&country_select(countries, &form.country_of_origin));
            body.push_str(&field_error(errors.get("country_of_origin")));
        }
        FormMode::Update(cheese) => {
            if let Some(ref country) = cheese.country {
                let _ = writeln!(
                    body,
                    "<p>Country of Origin: {}</p>",
                    escape_html(&country.name)
                );
            }
        }
    }

    let _ = writeln!(body, "<button type=\"submit\">Save</button>\n</form>");

    layout(heading, user, &body)
}
