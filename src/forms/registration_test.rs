use super::*;
use crate::forms::{THEME_INPUT_CLASS, widget_attrs};

#[derive(Default)]
struct FakeAccounts {
    usernames: Vec<&'static str>,
    emails: Vec<&'static str>,
}

impl AccountLookup for FakeAccounts {
    fn username_taken(&self, username: &str) -> bool {
        self.usernames.contains(&username)
    }

    fn email_taken(&self, email: &str) -> bool {
        self.emails.iter().any(|e| e.eq_ignore_ascii_case(email))
    }
}

fn bob(password2: &str) -> FormData {
    FormData::new()
        .with("username", "bob")
        .with("email", "bob@x.com")
        .with("password1", "p@ss1234")
        .with("password2", password2)
}

#[test]
fn matching_passwords_validate() {
    let registration = RegistrationForm::default()
        .validate(&bob("p@ss1234"), &FakeAccounts::default())
        .unwrap();
    assert_eq!(registration.username, "bob");
    assert_eq!(registration.email, "bob@x.com");
    assert_eq!(registration.password, "p@ss1234");
}

#[test]
fn mismatched_passwords_error_on_password2() {
    let errors = RegistrationForm::default()
        .validate(&bob("different"), &FakeAccounts::default())
        .unwrap_err();
    assert_eq!(errors.for_field("password2"), [PASSWORD_MISMATCH.to_owned()]);
    assert!(!errors.has("password1"));
}

#[test]
fn invalid_email_rejected() {
    let data = bob("p@ss1234").with("email", "not-an-email");
    let errors = RegistrationForm::default().validate(&data, &FakeAccounts::default()).unwrap_err();
    assert!(errors.has("email"));
    assert_eq!(errors.fields().collect::<Vec<_>>(), ["email"]);
}

#[test]
fn email_is_required() {
    let data = bob("p@ss1234").with("email", "");
    let errors = RegistrationForm::default().validate(&data, &FakeAccounts::default()).unwrap_err();
    assert_eq!(errors.for_field("email"), [crate::forms::REQUIRED_MESSAGE.to_owned()]);
}

#[test]
fn well_formed_email_is_lowercased() {
    let data = bob("p@ss1234").with("email", "User@Example.com");
    let registration = RegistrationForm::default().validate(&data, &FakeAccounts::default()).unwrap();
    assert_eq!(registration.email, "user@example.com");
}

#[test]
fn username_charset_enforced() {
    let data = bob("p@ss1234").with("username", "bob smith");
    let errors = RegistrationForm::default().validate(&data, &FakeAccounts::default()).unwrap_err();
    assert!(errors.has("username"));
}

#[test]
fn username_length_enforced() {
    let long = "b".repeat(USERNAME_MAX_LEN + 1);
    let data = bob("p@ss1234").with("username", &long);
    let errors = RegistrationForm::default().validate(&data, &FakeAccounts::default()).unwrap_err();
    assert!(errors.has("username"));
}

#[test]
fn short_password_rejected_on_password1() {
    let data = bob("p@ss1").with("password1", "p@ss1");
    let errors = RegistrationForm::default().validate(&data, &FakeAccounts::default()).unwrap_err();
    assert!(errors.has("password1"));
    assert!(!errors.has("password2"));
}

#[test]
fn policy_min_length_is_configurable() {
    let form = RegistrationForm::new(PasswordPolicy { min_length: 12 });
    let errors = form.validate(&bob("p@ss1234"), &FakeAccounts::default()).unwrap_err();
    assert!(errors.has("password1"));
}

#[test]
fn numeric_password_rejected() {
    let data = bob("12345678").with("password1", "12345678");
    let errors = RegistrationForm::default().validate(&data, &FakeAccounts::default()).unwrap_err();
    assert!(errors.has("password1"));
}

fn signup(username: &str, password: &str) -> FormData {
    FormData::new()
        .with("username", username)
        .with("email", "neo@x.com")
        .with("password1", password)
        .with("password2", password)
}

#[test]
fn password_similar_to_username_rejected() {
    let data = signup("cyberpunk", "CyberPunk1");
    let errors = RegistrationForm::default().validate(&data, &FakeAccounts::default()).unwrap_err();
    assert_eq!(errors.for_field("password1"), [PASSWORD_TOO_SIMILAR.to_owned()]);
}

#[test]
fn password_similar_to_username_part_rejected() {
    let data = signup("trinity.matrix.neo", "matrix!!");
    let errors = RegistrationForm::default().validate(&data, &FakeAccounts::default()).unwrap_err();
    assert!(errors.has("password1"));
}

#[test]
fn short_username_does_not_block_passwords() {
    let registration = RegistrationForm::default()
        .validate(&signup("s", "p@ss1234"), &FakeAccounts::default())
        .unwrap();
    assert_eq!(registration.username, "s");
}

#[test]
fn password_containing_short_username_accepted() {
    let result = RegistrationForm::default().validate(&signup("bob", "xBOBx123"), &FakeAccounts::default());
    assert!(result.is_ok());
}

#[test]
fn similarity_ratio_threshold() {
    // 2 * 6 / (6 + 8) ~= 0.86
    assert!(too_similar("abcdef12", "abcdef"));
    // 2 * 4 / (4 + 8) ~= 0.67
    assert!(!too_similar("abcd1234", "abcd"));
    assert!(!too_similar("p@ss1234", "s"));
}

#[test]
fn common_subsequence_counts_ordered_matches() {
    let chars = |s: &str| s.chars().collect::<Vec<_>>();
    assert_eq!(common_subsequence_len(&chars("abcbdab"), &chars("bdcaba")), 4);
    assert_eq!(common_subsequence_len(&chars("abc"), &chars("")), 0);
    assert_eq!(common_subsequence_len(&chars("neo"), &chars("neo")), 3);
}

#[test]
fn duplicate_username_rejected() {
    let accounts = FakeAccounts { usernames: vec!["bob"], ..FakeAccounts::default() };
    let errors = RegistrationForm::default().validate(&bob("p@ss1234"), &accounts).unwrap_err();
    assert_eq!(errors.for_field("username"), [USERNAME_TAKEN.to_owned()]);
}

#[test]
fn duplicate_email_rejected_case_insensitively() {
    let accounts = FakeAccounts { emails: vec!["BOB@X.COM"], ..FakeAccounts::default() };
    let errors = RegistrationForm::default().validate(&bob("p@ss1234"), &accounts).unwrap_err();
    assert_eq!(errors.for_field("email"), [EMAIL_TAKEN.to_owned()]);
}

#[test]
fn declared_fields_in_order() {
    let form = RegistrationForm::default();
    let names = form.form().fields().iter().map(|f| f.name).collect::<Vec<_>>();
    assert_eq!(names, FIELDS);
}

#[test]
fn every_widget_has_placeholder_naming_its_field() {
    let form = RegistrationForm::default();
    for field in form.form().fields() {
        let attrs = widget_attrs(field);
        assert!(!attrs.placeholder.is_empty());
        assert!(attrs.placeholder.contains(field.name), "placeholder for {}", field.name);
        assert_eq!(attrs.class, THEME_INPUT_CLASS);
    }
}

#[test]
fn email_widget_is_email_input() {
    let form = RegistrationForm::default();
    let attrs = widget_attrs(form.form().field("email").unwrap());
    assert_eq!(attrs.input_type, "email");
    assert_eq!(attrs.placeholder, "Enter your email");
}

#[test]
fn registration_debug_redacts_password() {
    let registration = Registration {
        username: "bob".into(),
        email: "bob@x.com".into(),
        password: "p@ss1234".into(),
    };
    let rendered = format!("{registration:?}");
    assert!(!rendered.contains("p@ss1234"));
    assert!(rendered.contains("<redacted>"));
}
