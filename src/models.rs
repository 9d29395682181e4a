use crate::schema::*;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Category id to label, ordered by id.
pub type CategoryMap = BTreeMap<i32, String>;

#[derive(Queryable, Serialize, Clone, Debug, PartialEq)]
pub struct Question {
    pub id: i32,
    pub question: String,
    pub answer: String,
    pub category: i32,
    pub difficulty: i32,
}

#[derive(Queryable, Clone, Debug, PartialEq)]
pub struct Category {
    pub id: i32,
    pub type_: String,
}

#[derive(Insertable)]
#[table_name = "questions"]
pub struct NewQuestion<'a> {
    pub question: &'a str,
    pub answer: &'a str,
    pub category: i32,
    pub difficulty: i32,
}

#[derive(Insertable)]
#[table_name = "categories"]
pub struct NewCategory<'a> {
    pub type_: &'a str,
}

/// Body of `POST /questions`, which either searches or creates.
#[derive(Deserialize, Debug, PartialEq)]
#[serde(untagged)]
pub enum QuestionsBody {
    Search {
        #[serde(rename = "searchTerm")]
        search_term: String,
    },
    Create(CreateQuestion),
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct CreateQuestion {
    pub question: String,
    pub answer: String,
    #[serde(deserialize_with = "number")]
    pub category: i32,
    #[serde(deserialize_with = "number")]
    pub difficulty: i32,
}

impl CreateQuestion {
    pub fn as_insertable(&self) -> NewQuestion<'_> {
        NewQuestion {
            question: &self.question,
            answer: &self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct QuizRequest {
    pub quiz_category: QuizCategory,
    pub previous_questions: Vec<i32>,
}

#[derive(Deserialize, Debug, PartialEq)]
pub struct QuizCategory {
    #[serde(default, deserialize_with = "optional_number")]
    pub id: Option<i32>,
}

// The web client sends select values either as numbers or as numeric strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum NumberRepr {
    Int(i32),
    Text(String),
}

impl NumberRepr {
    fn into_i32<E: serde::de::Error>(self) -> Result<i32, E> {
        match self {
            NumberRepr::Int(n) => Ok(n),
            NumberRepr::Text(s) => s.trim().parse().map_err(E::custom),
        }
    }
}

fn number<'de, D>(deserializer: D) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    NumberRepr::deserialize(deserializer)?.into_i32()
}

fn optional_number<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberRepr>::deserialize(deserializer)?
        .map(NumberRepr::into_i32)
        .transpose()
}

/// Query string carrying the `page` parameter; a repeated key keeps its first value.
#[derive(Deserialize, Default, Debug, PartialEq)]
#[serde(from = "Vec<(String, String)>")]
pub struct PageQuery {
    pub page: Option<String>,
}

impl From<Vec<(String, String)>> for PageQuery {
    fn from(pairs: Vec<(String, String)>) -> Self {
        PageQuery {
            page: pairs
                .into_iter()
                .find(|(key, _)| key == "page")
                .map(|(_, value)| value),
        }
    }
}

impl PageQuery {
    /// Requested page; absent or non-integer values fall back to the first page.
    pub fn page(&self) -> i64 {
        self.page
            .as_ref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub categories: CategoryMap,
}

#[derive(Serialize)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub categories: CategoryMap,
    pub current_category: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub success: bool,
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: String,
}

#[derive(Serialize)]
pub struct CategoryQuestions {
    pub questions: Vec<Question>,
    pub total_questions: usize,
    pub current_category: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizResponse {
    pub previous_questions: Vec<i32>,
    pub question: Option<Question>,
}

#[derive(Serialize)]
pub struct Success {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created: Option<i32>,
}
