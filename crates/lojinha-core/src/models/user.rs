use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
}

/// Payload for `POST /api/user`. Field names match the registration form.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub cpf: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_serializes_confirm_password_camel_case() {
        let request = RegisterRequest {
            name: "Ana".to_string(),
            cpf: "123.456.789-00".to_string(),
            email: "ana@example.com".to_string(),
            password: "s3gredo".to_string(),
            confirm_password: "s3gredo".to_string(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("confirmPassword").is_some());
        assert!(json.get("confirm_password").is_none());
    }

    #[test]
    fn parses_login_response() {
        let response: LoginResponse = serde_json::from_str(r#"{"token":"abc123"}"#).unwrap();
        assert_eq!(response.token, "abc123");
    }
}
