use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

const MAX_FULL_NAME_LEN: usize = 100;
const MIN_PASSWORD_LEN: usize = 8;

const COMMON_PASSWORDS: &[&str] = &[
    "password1",
    "qwerty123",
    "abcd1234",
    "letmein1",
    "welcome1",
    "teacher1",
    "student1",
];

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email.trim()) {
        return Err("Email format is invalid");
    }
    Ok(())
}

pub fn validate_full_name(name: &str) -> Result<(), &'static str> {
    let name = name.trim();
    if name.is_empty() {
        return Err("Full name must not be empty");
    }
    if name.chars().count() > MAX_FULL_NAME_LEN {
        return Err("Full name must be at most 100 characters");
    }
    Ok(())
}

/// 密码强度规则：(检查, 失败信息)
const PASSWORD_RULES: &[(fn(&str) -> bool, &str)] = &[
    (
        |p| p.chars().count() >= MIN_PASSWORD_LEN,
        "Password must be at least 8 characters long",
    ),
    (
        |p| p.chars().any(|c| c.is_ascii_uppercase()),
        "Password must contain at least one uppercase letter",
    ),
    (
        |p| p.chars().any(|c| c.is_ascii_lowercase()),
        "Password must contain at least one lowercase letter",
    ),
    (
        |p| p.chars().any(|c| c.is_ascii_digit()),
        "Password must contain at least one digit",
    ),
    (
        |p| !COMMON_PASSWORDS.iter().any(|weak| p.eq_ignore_ascii_case(weak)),
        "Password is too common, please choose a stronger password",
    ),
];

/// 返回所有未通过的规则
pub fn password_problems(password: &str) -> Vec<&'static str> {
    PASSWORD_RULES
        .iter()
        .filter(|(check, _)| !check(password))
        .map(|(_, message)| *message)
        .collect()
}

pub fn validate_password(password: &str) -> Result<(), String> {
    let problems = password_problems(password);
    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("ada@example.com").is_ok());
        assert!(validate_email(" ada@school.edu ").is_ok());
        assert!(validate_email("ada@example").is_err());
        assert!(validate_email("not an email").is_err());
    }

    #[test]
    fn test_full_name() {
        assert!(validate_full_name("Ada Lovelace").is_ok());
        assert!(validate_full_name("   ").is_err());
        assert!(validate_full_name(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_strong_password() {
        assert!(validate_password("SecurePass123").is_ok());
    }

    #[test]
    fn test_weak_password_reports_every_problem() {
        let problems = password_problems("abc");
        assert!(problems.contains(&"Password must be at least 8 characters long"));
        assert!(problems.contains(&"Password must contain at least one uppercase letter"));
        assert!(problems.contains(&"Password must contain at least one digit"));
        assert!(!problems.contains(&"Password must contain at least one lowercase letter"));
    }

    #[test]
    fn test_common_password() {
        let err = validate_password("Student1").unwrap_err();
        assert!(err.contains("too common"));
    }
}
