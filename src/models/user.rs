use serde::{Deserialize, Serialize};

pub const MAX_EMAIL_LEN: usize = 255;

/// 登録済みユーザー。
/// パスワードハッシュは JSON に出さないよう `skip_serializing` を付けている。
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
}

/// `POST /signup` のペイロード。
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

/// `POST /login` のペイロード。
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// サインアップ成功時のレスポンス。ハッシュは含めない。
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub id: i32,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: &'static str,
    pub user_id: i32,
}

impl From<User> for SignupResponse {
    fn from(user: User) -> Self {
        SignupResponse {
            id: user.id,
            email: user.email,
        }
    }
}

impl SignupRequest {
    /// メール形式と長さを検証する。パスワードには制約を課さない。
    pub fn validate(&self) -> Result<(), String> {
        validate_email(&self.email)
    }

    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), String> {
        validate_email(&self.email)
    }

    pub fn normalized_email(&self) -> String {
        normalize_email(&self.email)
    }
}

/// 保存前と照合前の両方でここを通す。
/// ローカル部は大小を区別するのでそのまま残し、ドメインだけを小文字化する。
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();

    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }

    if email.len() > MAX_EMAIL_LEN {
        return Err(format!("Email cannot exceed {} characters", MAX_EMAIL_LEN));
    }

    if !is_valid_email(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// シンプルなメールフォーマット検証。
/// 正規表現を使わず、`split('@')` などで最小限のルールをチェックしている。
fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if domain.contains('@') {
        return false;
    }

    if local.is_empty() || local.len() > 64 {
        return false;
    }

    if domain.is_empty() || domain.len() > 253 || !domain.contains('.') {
        return false;
    }

    // Labels like "a..b" or ".com" are not deliverable
    if domain.split('.').any(str::is_empty) {
        return false;
    }

    let valid_local = |c: char| c.is_alphanumeric() || ".-_+".contains(c);
    let valid_domain = |c: char| c.is_alphanumeric() || ".-".contains(c);

    local.chars().all(valid_local) && domain.chars().all(valid_domain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("user.name@domain.co.uk"));
        assert!(is_valid_email("user+tag@example.org"));

        assert!(!is_valid_email("invalid"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("user@"));
        assert!(!is_valid_email("user@domain"));
        assert!(!is_valid_email("user@@example.com"));
        assert!(!is_valid_email("user@example..com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_signup_request_validation() {
        let valid = SignupRequest {
            email: "chef@valora.test".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(valid.validate().is_ok());

        let invalid = SignupRequest {
            email: "not-an-email".to_string(),
            password: "hunter2".to_string(),
        };
        assert!(invalid.validate().is_err());

        let too_long = SignupRequest {
            email: format!("{}@valora.test", "a".repeat(250)),
            password: String::new(),
        };
        assert!(too_long.validate().is_err());
    }

    #[test]
    fn test_email_normalization() {
        let request = LoginRequest {
            email: "  Chef@Valora.TEST ".to_string(),
            password: "x".to_string(),
        };
        assert!(request.validate().is_ok());
        assert_eq!(request.normalized_email(), "Chef@valora.test");
        assert_eq!(normalize_email("chef@VALORA.test"), "chef@valora.test");
        assert_ne!(normalize_email("Chef@valora.test"), normalize_email("chef@valora.test"));
    }

    #[test]
    fn test_user_serialization_hides_password_hash() {
        let user = User {
            id: 7,
            email: "chef@valora.test".to_string(),
            password_hash: "deadbeef".to_string(),
        };

        let json = serde_json::to_string(&user).expect("Failed to serialize user");
        assert_eq!(json, r#"{"id":7,"email":"chef@valora.test"}"#);
    }

    #[test]
    fn test_signup_request_deserialization() {
        let json = r#"{"email":"chef@valora.test","password":"secret"}"#;
        let request: SignupRequest = serde_json::from_str(json).expect("Failed to deserialize SignupRequest");

        assert_eq!(request.email, "chef@valora.test");
        assert_eq!(request.password, "secret");

        let missing_password = r#"{"email":"chef@valora.test"}"#;
        assert!(serde_json::from_str::<SignupRequest>(missing_password).is_err());
    }
}
