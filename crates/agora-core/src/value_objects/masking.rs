//! Contact detail masking for member views embedded in posts and comments

const MASKED_EMAIL: &str = "*****";
const MASKED_PHONE: &str = "****";

/// Mask an email address, keeping the first (and last) character of the local part
///
/// ```
/// use agora_core::mask_email;
/// assert_eq!(mask_email(Some("jane.doe@email.com")), "j****e@email.com");
/// assert_eq!(mask_email(Some("jd@email.com")), "j****@email.com");
/// assert_eq!(mask_email(None), "*****");
/// ```
pub fn mask_email(email: Option<&str>) -> String {
    let Some((local, domain)) = email.and_then(|e| e.split_once('@')) else {
        return MASKED_EMAIL.to_string();
    };

    let mut chars = local.chars();
    let Some(first) = chars.next() else {
        return format!("****@{domain}");
    };

    if local.chars().count() <= 2 {
        return format!("{first}****@{domain}");
    }

    let last = local.chars().next_back().unwrap_or(first);
    format!("{first}****{last}@{domain}")
}

/// Mask a phone number, keeping the first and last two digits
///
/// ```
/// use agora_core::mask_phone;
/// assert_eq!(mask_phone(Some("9876543210")), "98****10");
/// assert_eq!(mask_phone(Some("123")), "****");
/// ```
pub fn mask_phone(phone: Option<&str>) -> String {
    let Some(phone) = phone else {
        return MASKED_PHONE.to_string();
    };

    let chars: Vec<char> = phone.chars().collect();
    if chars.len() < 4 {
        return MASKED_PHONE.to_string();
    }

    let start: String = chars[..2].iter().collect();
    let end: String = chars[chars.len() - 2..].iter().collect();
    format!("{start}****{end}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_email_without_at() {
        assert_eq!(mask_email(Some("not-an-email")), "*****");
    }

    #[test]
    fn test_mask_email_short_local_part() {
        assert_eq!(mask_email(Some("a@x.io")), "a****@x.io");
    }

    #[test]
    fn test_mask_email_regular() {
        assert_eq!(mask_email(Some("john.doe@email.com")), "j****e@email.com");
    }

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask_phone(None), "****");
        assert_eq!(mask_phone(Some("1234")), "12****34");
        assert_eq!(mask_phone(Some("9876543211")), "98****11");
    }
}
