// Registration, login and bearer-token authentication.
// Passwords are argon2-hashed; tokens are HS256 JWTs (short-lived access, longer refresh).

pub mod extractor;
pub mod handlers;
pub mod password;
pub mod store;
pub mod tokens;

pub use extractor::AuthUser;

use serde::Deserialize;

use crate::validation::{is_valid_email, FieldErrors, BAD_EMAIL, REQUIRED};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegisterInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub password: Option<String>,
    pub password_confirm: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

impl RegisterInput {
    pub fn validate(self) -> Result<NewUser, FieldErrors> {
        let mut e = FieldErrors::new();

        let username = e.required_text("username", self.username, 150);
        if !username.is_empty() && !username.chars().all(is_username_char) {
            e.add(
                "username",
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
            );
        }

        let email = e.required_text("email", self.email.map(|s| s.trim().to_string()), 254);
        if !email.is_empty() && !is_valid_email(&email) {
            e.add("email", BAD_EMAIL);
        }

        let first_name = e.optional_text("first_name", self.first_name, 150);
        let last_name = e.optional_text("last_name", self.last_name, 150);

        let password = match self.password {
            Some(p) if !p.is_empty() => p,
            _ => {
                e.add("password", REQUIRED);
                String::new()
            }
        };
        match self.password_confirm {
            Some(c) if !c.is_empty() => {
                if !password.is_empty() && c != password {
                    e.add("non_field_errors", "Passwords don't match");
                }
            }
            _ => e.add("password_confirm", REQUIRED),
        }

        e.into_result(|| NewUser {
            username,
            email,
            first_name,
            last_name,
            password,
        })
    }
}

fn is_username_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> RegisterInput {
        RegisterInput {
            username: Some("ada".to_string()),
            email: Some(" ada@example.com ".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: None,
            password: Some("s3cret!".to_string()),
            password_confirm: Some("s3cret!".to_string()),
        }
    }

    #[test]
    fn test_valid_registration() {
        let new = valid().validate().unwrap();
        assert_eq!(new.email, "ada@example.com");
        assert_eq!(new.last_name, "");
    }

    #[test]
    fn test_password_mismatch() {
        let input = RegisterInput {
            password_confirm: Some("other".to_string()),
            ..valid()
        };
        let errors = input.validate().unwrap_err();
        assert_eq!(
            errors.get("non_field_errors"),
            Some(&["Passwords don't match".to_string()][..])
        );
    }

    #[test]
    fn test_username_charset_and_email() {
        let input = RegisterInput {
            username: Some("ada lovelace".to_string()),
            email: Some("nope".to_string()),
            ..valid()
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.get("username").is_some());
        assert_eq!(errors.get("email"), Some(&[BAD_EMAIL.to_string()][..]));
    }

    #[test]
    fn test_missing_everything() {
        let errors = RegisterInput::default().validate().unwrap_err();
        for field in ["username", "email", "password", "password_confirm"] {
            assert_eq!(errors.get(field), Some(&[REQUIRED.to_string()][..]), "{field}");
        }
        assert!(errors.get("non_field_errors").is_none());
    }
}
