// Field-level checks shared by the request DTOs.

pub fn require(value: &str, message: &'static str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        Err(message)
    } else {
        Ok(())
    }
}

pub fn require_opt(value: Option<&str>, message: &'static str) -> Result<(), &'static str> {
    value.map_or(Ok(()), |v| require(v, message))
}

// Deliberately loose: one '@', something on both sides, a dot in the domain.
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}
