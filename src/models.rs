use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One Chief Minister record as served by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChiefMinister {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub party: String,
    pub state: String,
    pub age: u32,
    pub gender: Gender,
    #[serde(default)]
    pub term_start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub term_end: Option<DateTime<Utc>>,
    #[serde(default)]
    pub is_current: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn as_str(&self) -> &str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }

    pub fn all() -> [Gender; 3] {
        [Gender::Male, Gender::Female, Gender::Other]
    }

    pub fn parse(s: &str) -> Option<Gender> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Some(Gender::Male),
            "female" => Some(Gender::Female),
            "other" => Some(Gender::Other),
            _ => None,
        }
    }
}

/// One quiz question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "_id")]
    pub id: String,
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// One registered player/admin account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    pub username: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
    pub role: Role,
    #[serde(rename = "isVerified", default)]
    pub is_verified: bool,
    #[serde(default)]
    pub avatar: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s.trim().to_ascii_lowercase().as_str() {
            "user" => Some(Role::User),
            "admin" => Some(Role::Admin),
            _ => None,
        }
    }
}

/// Trimmed, normalized create/update body for a CM record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CmPayload {
    pub name: String,
    pub party: String,
    pub state: String,
    pub age: u32,
    pub gender: Gender,
    pub term_start: Option<NaiveDate>,
    pub term_end: Option<NaiveDate>,
    pub is_current: bool,
}

/// Trimmed, normalized create/update body for a question.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuestionPayload {
    pub question_text: String,
    pub options: Vec<String>,
    pub correct_option_index: usize,
}

/// Page of questions as nested inside the list envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionPage {
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(rename = "currentPage", default = "first_page")]
    pub current_page: u32,
    #[serde(rename = "totalQuestions", default)]
    pub total_questions: u64,
}

/// Page of users as nested inside the list envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct UserPage {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(rename = "currentPage", default = "first_page")]
    pub current_page: u32,
    #[serde(rename = "totalPages", default = "first_page")]
    pub total_pages: u32,
}

fn first_page() -> u32 {
    1
}

/// Server-side filters for the users listing. Only non-empty filters are
/// encoded into the querystring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserFilters {
    pub username: String,
    pub email: String,
    pub role: Option<Role>,
    pub verified: Option<bool>,
}

impl UserFilters {
    pub fn query_pairs(&self, page: u32) -> Vec<(&'static str, String)> {
        let mut pairs = vec![("page", page.to_string())];
        let username = self.username.trim();
        if !username.is_empty() {
            pairs.push(("username", username.to_string()));
        }
        let email = self.email.trim();
        if !email.is_empty() {
            pairs.push(("email", email.to_string()));
        }
        if let Some(role) = self.role {
            pairs.push(("role", role.as_str().to_string()));
        }
        if let Some(verified) = self.verified {
            pairs.push(("isVerified", verified.to_string()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chief_minister_deserialization() {
        let sample = r#"{
            "_id": "66aa01",
            "name": "A. Sharma",
            "party": "Unity Party",
            "state": "Rajasthan",
            "age": 58,
            "gender": "female",
            "term_start": "2019-12-17T00:00:00.000Z",
            "is_current": true
        }"#;

        let cm: ChiefMinister = serde_json::from_str(sample).unwrap();
        assert_eq!(cm.id, "66aa01");
        assert_eq!(cm.gender, Gender::Female);
        assert_eq!(cm.term_start.unwrap().date_naive().to_string(), "2019-12-17");
        assert!(cm.term_end.is_none());
        assert!(cm.is_current);
    }

    #[test]
    fn test_question_page_deserialization_with_defaults() {
        let sample = r#"{
            "questions": [
                {
                    "_id": "q1",
                    "question_text": "Capital of France?",
                    "options": ["Paris", "Lyon"],
                    "correct_option_index": 0,
                    "createdAt": "2025-06-01T10:30:00.000Z"
                }
            ],
            "totalQuestions": 41
        }"#;

        let page: QuestionPage = serde_json::from_str(sample).unwrap();
        assert_eq!(page.questions.len(), 1);
        assert_eq!(page.questions[0].options.len(), 2);
        assert_eq!(page.questions[0].correct_option_index, 0);
        assert_eq!(page.current_page, 1);
        assert_eq!(page.total_questions, 41);
    }

    #[test]
    fn test_user_page_deserialization() {
        let sample = r#"{
            "users": [
                {
                    "_id": "u1",
                    "username": "priya",
                    "fullName": "Priya Nair",
                    "email": "priya@example.com",
                    "role": "admin",
                    "isVerified": true,
                    "avatar": null
                }
            ],
            "currentPage": 2,
            "totalPages": 7
        }"#;

        let page: UserPage = serde_json::from_str(sample).unwrap();
        assert_eq!(page.users[0].role, Role::Admin);
        assert!(page.users[0].avatar.is_none());
        assert_eq!(page.current_page, 2);
        assert_eq!(page.total_pages, 7);
    }

    #[test]
    fn test_cm_payload_serializes_dates_as_plain_days() {
        let payload = CmPayload {
            name: "A. Sharma".to_string(),
            party: "Unity Party".to_string(),
            state: "Rajasthan".to_string(),
            age: 58,
            gender: Gender::Female,
            term_start: NaiveDate::from_ymd_opt(2019, 12, 17),
            term_end: None,
            is_current: true,
        };

        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["term_start"], "2019-12-17");
        assert_eq!(value["term_end"], serde_json::Value::Null);
        assert_eq!(value["gender"], "female");
    }

    #[test]
    fn test_user_filters_encode_only_non_empty_values() {
        let filters = UserFilters {
            username: "  ".to_string(),
            email: "a@b.c".to_string(),
            role: Some(Role::User),
            verified: None,
        };

        let pairs = filters.query_pairs(3);
        assert_eq!(
            pairs,
            vec![
                ("page", "3".to_string()),
                ("email", "a@b.c".to_string()),
                ("role", "user".to_string()),
            ]
        );
    }

    #[test]
    fn test_enum_parsing() {
        assert_eq!(Gender::parse(" Male "), Some(Gender::Male));
        assert_eq!(Gender::parse("x"), None);
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::parse(""), None);
    }
}
