//! Contact form validation.

use serde::Deserialize;

use crate::models::ContactMessage;

/// Raw contact form input, exactly as posted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Subject,
    Message,
}

impl ContactField {
    pub fn name(self) -> &'static str {
        match self {
            ContactField::Name => "name",
            ContactField::Email => "email",
            ContactField::Subject => "subject",
            ContactField::Message => "message",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldProblem {
    Required,
    InvalidEmail,
}

impl FieldProblem {
    /// Catalogue key of the message shown next to the field.
    pub fn message_key(self) -> &'static str {
        match self {
            FieldProblem::Required => "contact.errors.required",
            FieldProblem::InvalidEmail => "contact.errors.email",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: ContactField,
    pub problem: FieldProblem,
}

impl ContactForm {
    /// Checks required fields and the email shape, returning every problem at once.
    pub fn validate(&self) -> Result<ContactMessage, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut require = |field: ContactField, value: &str| {
            if value.trim().is_empty() {
                errors.push(FieldError { field, problem: FieldProblem::Required });
                false
            } else {
                true
            }
        };

        require(ContactField::Name, &self.name);
        let email_present = require(ContactField::Email, &self.email);
        require(ContactField::Subject, &self.subject);
        require(ContactField::Message, &self.message);

        if email_present && !looks_like_email(self.email.trim()) {
            errors.push(FieldError {
                field: ContactField::Email,
                problem: FieldProblem::InvalidEmail,
            });
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        let phone = self.phone.trim();
        Ok(ContactMessage {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: (!phone.is_empty()).then(|| phone.to_string()),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        })
    }
}

/// `local@domain` with no whitespace and a non-empty part on each side.
pub fn looks_like_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactForm {
        ContactForm {
            name: " Jane Doe ".into(),
            email: "jane@example.com".into(),
            phone: String::new(),
            subject: "Laser consultation".into(),
            message: "Is there downtime?".into(),
        }
    }

    #[test]
    fn valid_form_is_trimmed_and_phone_optional() {
        let message = filled().validate().unwrap();
        assert_eq!(message.name, "Jane Doe");
        assert_eq!(message.phone, None);
    }

    #[test]
    fn every_missing_field_is_reported() {
        let errors = ContactForm::default().validate().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec![ContactField::Name, ContactField::Email, ContactField::Subject, ContactField::Message]
        );
        assert!(errors.iter().all(|e| e.problem == FieldProblem::Required));
    }

    #[test]
    fn malformed_email_is_rejected() {
        let form = ContactForm { email: "jane.example.com".into(), ..filled() };
        assert_eq!(
            form.validate().unwrap_err(),
            vec![FieldError { field: ContactField::Email, problem: FieldProblem::InvalidEmail }]
        );
        assert!(!looks_like_email("a@b@c"));
        assert!(!looks_like_email("jane @example.com"));
        assert!(looks_like_email("info@drdermatology.com"));
    }
}
