//! HTML rendering for pages and themed forms.
//!
//! Every dynamic string goes through `escape` before it lands in markup.

use std::fmt::Write;

use crate::forms::{FieldSpec, Form, FormData, FormErrors, InputKind, widget_attrs};

#[must_use]
pub fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
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

/// Full document with the site chrome. `body` must already be escaped.
#[must_use]
pub fn page(site_name: &str, title: &str, body: &str) -> String {
    let site = escape(site_name);
    let title = escape(title);
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{title} | {site}</title>\n</head>\n\
         <body class=\"bg-cyber-dark text-white\">\n<main class=\"container mx-auto\">\n\
         <h1>{title}</h1>\n{body}\n</main>\n</body>\n</html>\n"
    )
}

fn error_list(out: &mut String, messages: &[String]) {
    if messages.is_empty() {
        return;
    }
    out.push_str("<ul class=\"errorlist\">");
    for message in messages {
        let _ = write!(out, "<li>{}</li>", escape(message));
    }
    out.push_str("</ul>\n");
}

fn widget(out: &mut String, field: &FieldSpec, value: &str) {
    let attrs = widget_attrs(field);
    let name = field.name;
    let common = format!(
        "name=\"{name}\" id=\"id_{name}\" class=\"{}\" placeholder=\"{}\"{}",
        attrs.class,
        escape(&attrs.placeholder),
        if field.required { " required" } else { "" }
    );
    match field.kind {
        InputKind::TextArea => {
            let _ = write!(out, "<textarea {common}>{}</textarea>", escape(value));
        }
        InputKind::Select(choices) => {
            let _ = write!(out, "<select {common}>");
            for (choice, label) in choices {
                let selected = if *choice == value { " selected" } else { "" };
                let _ = write!(out, "<option value=\"{choice}\"{selected}>{}</option>", escape(label));
            }
            out.push_str("</select>");
        }
        _ => {
            let _ = write!(out, "<input type=\"{}\" {common} value=\"{}\">", attrs.input_type, escape(value));
        }
    }
}

/// Render `form` posting to `action`, echoing `data` and showing `errors`.
///
/// Password values are never echoed.
#[must_use]
pub fn form(
    form: &Form,
    action: &str,
    submit: &str,
    data: Option<&FormData>,
    errors: Option<&FormErrors>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<form method=\"post\" action=\"{}\">", escape(action));
    if let Some(errors) = errors {
        error_list(&mut out, errors.non_field());
    }

    for field in form.fields() {
        let value = match data {
            Some(data) if field.redisplay() => data.get(field.name).unwrap_or_default(),
            _ => "",
        };
        let _ = write!(out, "<p><label for=\"id_{}\">{}</label>", field.name, escape(field.label));
        widget(&mut out, field, value);
        out.push_str("</p>\n");
        if let Some(errors) = errors {
            error_list(&mut out, errors.for_field(field.name));
        }
    }

    let _ = writeln!(out, "<button type=\"submit\">{}</button>\n</form>", escape(submit));
    out
}

/// Anchor with an escaped label.
#[must_use]
pub fn link(href: &str, label: &str) -> String {
    format!("<a href=\"{}\">{}</a>", escape(href), escape(label))
}

#[cfg(test)]
#[path = "render_test.rs"]
mod tests;
