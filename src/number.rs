// Input cleaning and validation. Invalid input is a normal outcome here,
// never an error.

// Strip an Indian country-code prefix and all non-digit characters.
// Returns None only when no input was given.
pub fn clean_number(raw: Option<&str>) -> Option<String> {
    let raw = raw?;
    let mut cleaned = raw.trim();

    if let Some(rest) = cleaned.strip_prefix("+91") {
        cleaned = rest;
    }
    // bare "91" prefix only when 10 digits remain, applied on top of
    // whatever the "+91" strip left
    if cleaned.len() == 12 {
        if let Some(rest) = cleaned.strip_prefix("91") {
            cleaned = rest;
        }
    }

    Some(cleaned.chars().filter(char::is_ascii_digit).collect())
}

// Indian mobile format: exactly 10 digits, leading digit 6-9
pub fn validate_mobile(number: &str) -> bool {
    number.len() == 10
        && number.bytes().all(|b| b.is_ascii_digit())
        && matches!(number.as_bytes()[0], b'6'..=b'9')
}

// Same acceptance as the email path's ^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$
pub fn validate_email(raw: &str) -> bool {
    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty()
        || !local
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'%' | b'+' | b'-'))
    {
        return false;
    }

    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty()
        && host
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'-'))
        && tld.len() >= 2
        && tld.bytes().all(|b| b.is_ascii_alphabetic())
}
