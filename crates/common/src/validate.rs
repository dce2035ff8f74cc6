use validator::{ValidationError, ValidationErrors};

/// Field value must be digits only. Length bounds are declared separately on
/// the field, so this composes with `length(equal = ..)`.
pub fn all_digits(value: &str) -> Result<(), ValidationError> {
    if !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::new("digits"))
    }
}

/// Flattens derive-produced errors into the single human-readable string the
/// API envelope carries. Field order is made deterministic for clients and
/// tests.
pub fn error_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by_key(|(field, _)| *field);

    let mut parts: Vec<String> = Vec::new();
    for (_, errs) in fields {
        for err in errs {
            if let Some(msg) = &err.message {
                parts.push(msg.to_string());
            }
        }
    }
    if parts.is_empty() {
        "Please Fill Full Form!".to_string()
    } else {
        parts.join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct Probe {
        #[validate(custom(function = all_digits, message = "Phone number must be 11 digits!"))]
        phone: String,
    }

    #[test]
    fn digits_accepts_numeric_strings_only() {
        assert!(all_digits("01712345678").is_ok());
        assert!(all_digits("0171234567a").is_err());
        assert!(all_digits("").is_err());
    }

    #[test]
    fn error_message_surfaces_the_declared_text() {
        let probe = Probe {
            phone: "not-a-phone".to_string(),
        };
        let errs = probe.validate().unwrap_err();
        assert_eq!(error_message(&errs), "Phone number must be 11 digits!");
    }
}
