pub mod handlers;
pub mod store;

use serde::Deserialize;

use crate::models::profile::ProfileRow;
use crate::validation::FieldErrors;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileInput {
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub linkedin: Option<String>,
    pub github: Option<String>,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewProfile {
    pub phone: String,
    pub bio: String,
    pub linkedin: String,
    pub github: String,
    pub location: String,
}

impl ProfileInput {
    pub fn validate(self) -> Result<NewProfile, FieldErrors> {
        let mut e = FieldErrors::new();
        let new = NewProfile {
            phone: e.optional_text("phone", self.phone, 15),
            bio: self.bio.unwrap_or_default(),
            linkedin: e.optional_url("linkedin", self.linkedin, 200),
            github: e.optional_url("github", self.github, 200),
            location: e.optional_text("location", self.location, 100),
        };
        e.into_result(|| new)
    }

    /// Fills fields missing from this input with the stored values.
    pub fn or_stored(self, stored: &ProfileRow) -> Self {
        Self {
            phone: self.phone.or_else(|| Some(stored.phone.clone())),
            bio: self.bio.or_else(|| Some(stored.bio.clone())),
            linkedin: self.linkedin.or_else(|| Some(stored.linkedin.clone())),
            github: self.github.or_else(|| Some(stored.github.clone())),
            location: self.location.or_else(|| Some(stored.location.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resume::aggregator::fixtures;
    use crate::validation::BAD_URL;

    #[test]
    fn test_blank_profile_is_valid() {
        let new = ProfileInput::default().validate().unwrap();
        assert_eq!(new.phone, "");
        assert_eq!(new.linkedin, "");
    }

    #[test]
    fn test_phone_and_links_checked() {
        let input = ProfileInput {
            phone: Some("+1 (555) 010-0000 ext 9".to_string()),
            github: Some("github.com/ada".to_string()),
            ..Default::default()
        };
        let errors = input.validate().unwrap_err();
        assert!(errors.get("phone").is_some());
        assert_eq!(errors.get("github"), Some(&[BAD_URL.to_string()][..]));
    }

    #[test]
    fn test_partial_update_keeps_stored_values() {
        let mut stored = fixtures::profile();
        stored.bio = "Analyst".to_string();
        stored.location = "London".to_string();
        let patch = ProfileInput {
            location: Some("Paris".to_string()),
            ..Default::default()
        };
        let new = patch.or_stored(&stored).validate().unwrap();
        assert_eq!(new.bio, "Analyst");
        assert_eq!(new.location, "Paris");
    }
}
