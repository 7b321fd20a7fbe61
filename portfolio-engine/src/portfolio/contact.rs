use bevy::prelude::*;
use constants::portfolio::{
    CONTACT_EMAIL_MAX_LEN, CONTACT_MESSAGE_MAX_LEN, CONTACT_NAME_MAX_LEN, MSG_MISSING_FIELDS,
    MSG_SEND_FAILED, MSG_SENT,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

impl ContactField {
    pub const ALL: [ContactField; 3] = [ContactField::Name, ContactField::Email, ContactField::Message];

    pub fn placeholder(&self) -> &'static str {
        match self {
            ContactField::Name => "Your Name",
            ContactField::Email => "Your Email",
            ContactField::Message => "Your Message",
        }
    }

    pub fn max_len(&self) -> usize {
        match self {
            ContactField::Name => CONTACT_NAME_MAX_LEN,
            ContactField::Email => CONTACT_EMAIL_MAX_LEN,
            ContactField::Message => CONTACT_MESSAGE_MAX_LEN,
        }
    }

    pub fn multiline(&self) -> bool {
        matches!(self, ContactField::Message)
    }
}

/// The three contact fields. Never absent: an untouched field is `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl ContactForm {
    pub fn field(&self, field: ContactField) -> &str {
        match field {
            ContactField::Name => &self.name,
            ContactField::Email => &self.email,
            ContactField::Message => &self.message,
        }
    }

    pub fn set_field(&mut self, field: ContactField, value: &str) {
        let slot = match field {
            ContactField::Name => &mut self.name,
            ContactField::Email => &mut self.email,
            ContactField::Message => &mut self.message,
        };
        *slot = value.to_string();
    }

    pub fn is_complete(&self) -> bool {
        ContactField::ALL
            .iter()
            .all(|field| !self.field(*field).trim().is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Sending,
    Sent,
    Failed,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRefusal {
    AlreadySending,
    MissingFields,
}

/// Form contents plus the state of the one submission allowed in flight.
#[derive(Resource, Debug, Clone, Default)]
pub struct ContactSubmission {
    form: ContactForm,
    status: SubmissionStatus,
}

impl ContactSubmission {
    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn status(&self) -> SubmissionStatus {
        self.status
    }

    pub fn is_sending(&self) -> bool {
        self.status == SubmissionStatus::Sending
    }

    pub fn set_field(&mut self, field: ContactField, value: &str) {
        self.form.set_field(field, value);
    }

    pub fn button_label(&self) -> &'static str {
        if self.is_sending() { "Sending..." } else { "Ping" }
    }

    pub fn status_message(&self) -> Option<&'static str> {
        match self.status {
            SubmissionStatus::Idle | SubmissionStatus::Sending => None,
            SubmissionStatus::Sent => Some(MSG_SENT),
            SubmissionStatus::Failed => Some(MSG_SEND_FAILED),
            SubmissionStatus::Rejected => Some(MSG_MISSING_FIELDS),
        }
    }

    /// Start sending. Returns a snapshot of the form to deliver.
    pub fn submit(&mut self) -> Result<ContactForm, SubmitRefusal> {
        if self.is_sending() {
            return Err(SubmitRefusal::AlreadySending);
        }
        if !self.form.is_complete() {
            self.status = SubmissionStatus::Rejected;
            return Err(SubmitRefusal::MissingFields);
        }

        self.status = SubmissionStatus::Sending;
        Ok(self.form.clone())
    }

    /// Settle the in-flight submission. Success clears every field; failure
    /// leaves them as they are. Returns whether this call settled anything.
    pub fn finish(&mut self, delivered: bool) -> bool {
        if !self.is_sending() {
            return false;
        }

        if delivered {
            self.form = ContactForm::default();
            self.status = SubmissionStatus::Sent;
        } else {
            self.status = SubmissionStatus::Failed;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> ContactSubmission {
        let mut submission = ContactSubmission::default();
        submission.set_field(ContactField::Name, "Ada");
        submission.set_field(ContactField::Email, "ada@example.com");
        submission.set_field(ContactField::Message, "Hello there");
        submission
    }

    #[test]
    fn fields_start_empty_not_absent() {
        let submission = ContactSubmission::default();
        for field in ContactField::ALL {
            assert_eq!(submission.form().field(field), "");
        }
        assert_eq!(submission.button_label(), "Ping");
        assert_eq!(submission.status_message(), None);
    }

    #[test]
    fn only_one_submission_in_flight() {
        let mut submission = filled();
        let payload = submission.submit().expect("complete form submits");
        assert_eq!(payload.name, "Ada");
        assert_eq!(submission.button_label(), "Sending...");
        assert_eq!(submission.submit(), Err(SubmitRefusal::AlreadySending));
        assert!(submission.is_sending());
    }

    #[test]
    fn failure_keeps_fields_and_can_retry() {
        let mut submission = filled();
        let before = submission.form().clone();
        submission.submit().expect("complete form submits");
        assert!(submission.finish(false));

        assert_eq!(submission.form(), &before);
        assert_eq!(submission.status_message(), Some("Failed to send. Try again!"));

        // Settling twice changes nothing.
        assert!(!submission.finish(true));
        assert_eq!(submission.form(), &before);

        assert!(submission.submit().is_ok());
        assert!(submission.finish(false));
        assert_eq!(submission.form(), &before);
    }

    #[test]
    fn success_clears_fields_once() {
        let mut submission = filled();
        submission.submit().expect("complete form submits");
        assert!(submission.finish(true));

        assert_eq!(submission.form(), &ContactForm::default());
        assert_eq!(submission.status_message(), Some("Message sent via email!"));
        assert!(!submission.finish(true));
        assert_eq!(submission.status(), SubmissionStatus::Sent);
    }

    #[test]
    fn blank_fields_are_rejected_locally() {
        let mut submission = filled();
        submission.set_field(ContactField::Email, "   ");
        assert_eq!(submission.submit(), Err(SubmitRefusal::MissingFields));
        assert_eq!(submission.status(), SubmissionStatus::Rejected);
        assert_eq!(submission.status_message(), Some("Please fill in every field."));
        assert_eq!(submission.form().name, "Ada");
    }
}
