use super::*;
use crate::forms::registration::RegistrationForm;
use crate::forms::{FieldSpec, THEME_INPUT_CLASS};

#[test]
fn escape_replaces_markup_characters() {
    assert_eq!(escape(r#"<a href="x">'&'</a>"#), "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;");
    assert_eq!(escape("plain"), "plain");
}

#[test]
fn page_escapes_title_and_site() {
    let html = page("Neon <Desk>", "Orders & more", "<p>ok</p>");
    assert!(html.contains("<title>Orders &amp; more | Neon &lt;Desk&gt;</title>"));
    assert!(html.contains("<p>ok</p>"));
}

#[test]
fn registration_form_renders_every_widget_with_placeholder() {
    let registration = RegistrationForm::default();
    let html = form(registration.form(), "/accounts/signup/", "Create account", None, None);
    for name in ["username", "email", "password1", "password2"] {
        assert!(html.contains(&format!("name=\"{name}\"")), "missing {name}");
        let placeholder = format!("placeholder=\"Enter your {name}\"");
        assert!(html.contains(&placeholder), "missing placeholder for {name}");
    }
    assert_eq!(html.matches(THEME_INPUT_CLASS).count(), 4);
    assert!(html.contains("type=\"email\""));
}

#[test]
fn form_echoes_values_but_not_passwords() {
    let registration = RegistrationForm::default();
    let data = FormData::new()
        .with("username", "bob")
        .with("email", "bob@x.com")
        .with("password1", "p@ss1234")
        .with("password2", "different");
    let html = form(registration.form(), "/accounts/signup/", "Create account", Some(&data), None);
    assert!(html.contains("value=\"bob\""));
    assert!(html.contains("value=\"bob@x.com\""));
    assert!(!html.contains("p@ss1234"));
    assert!(!html.contains("different"));
}

#[test]
fn form_renders_field_and_non_field_errors() {
    let registration = RegistrationForm::default();
    let mut errors = FormErrors::new();
    errors.add("password2", "The two password fields didn't match.");
    errors.add_non_field("Try again <later>");
    let html = form(registration.form(), "/x/", "Go", None, Some(&errors));
    assert!(html.contains("<li>The two password fields didn&#x27;t match.</li>"));
    assert!(html.contains("<li>Try again &lt;later&gt;</li>"));
}

#[test]
fn echoed_values_are_escaped() {
    let fields = crate::forms::Form::new(vec![FieldSpec::new("name", "Name", InputKind::Text)]);
    let data = FormData::new().with("name", "\"><script>");
    let html = form(&fields, "/x/", "Go", Some(&data), None);
    assert!(html.contains("value=\"&quot;&gt;&lt;script&gt;\""));
    assert!(!html.contains("<script>"));
}

#[test]
fn select_marks_submitted_choice() {
    let fields = crate::forms::Form::new(vec![FieldSpec::new(
        "side",
        "Side",
        InputKind::Select(&[("buy", "Buy"), ("sell", "Sell")]),
    )]);
    let html = form(&fields, "/x/", "Go", Some(&FormData::new().with("side", "sell")), None);
    assert!(html.contains("<option value=\"sell\" selected>Sell</option>"));
    assert!(html.contains("<option value=\"buy\">Buy</option>"));
}

#[test]
fn textarea_renders_value_as_content() {
    let fields = crate::forms::Form::new(vec![FieldSpec::new("message", "Message", InputKind::TextArea)]);
    let html = form(&fields, "/x/", "Go", Some(&FormData::new().with("message", "hi & bye")), None);
    assert!(html.contains(">hi &amp; bye</textarea>"));
}

#[test]
fn link_escapes_href_and_label() {
    assert_eq!(link("/a?b=1&c=2", "A & B"), "<a href=\"/a?b=1&amp;c=2\">A &amp; B</a>");
}
