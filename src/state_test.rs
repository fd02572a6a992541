use super::*;

#[test]
fn url_for_reverses_declared_names() {
    let state = test_helpers::test_app_state();
    assert_eq!(state.url_for("home").unwrap(), "/");
    assert_eq!(state.url_for("close_position").unwrap(), "/assets/portfolio/close-position/");
}

#[test]
fn url_for_unknown_name_is_error() {
    let state = test_helpers::test_app_state();
    assert!(matches!(state.url_for("aboutus"), Err(AppError::UnknownRoute("aboutus"))));
}

#[test]
fn forms_follow_configured_password_policy() {
    let config = AppConfig {
        password_policy: crate::forms::registration::PasswordPolicy { min_length: 20 },
        ..AppConfig::default()
    };
    let forms = Forms::new(&config);
    let data = crate::forms::FormData::new()
        .with("username", "bob")
        .with("email", "bob@x.com")
        .with("password1", "p@ss1234")
        .with("password2", "p@ss1234");
    let errors = forms.registration.validate(&data, &AccountStore::new()).unwrap_err();
    assert!(errors.has("password1"));
}

#[test]
fn page_uses_configured_site_name() {
    let state = test_helpers::test_app_state();
    let Html(html) = state.page("Orders", "<p>x</p>");
    assert!(html.contains("Orders | CyberDesk"));
}

#[test]
fn clones_share_stores() {
    let state = test_helpers::test_app_state();
    let clone = state.clone();
    assert!(Arc::ptr_eq(&state.accounts, &clone.accounts));
    assert!(Arc::ptr_eq(&state.urls, &clone.urls));
}
