use crate::models::{Category, CategoryMap, Question};

pub fn format_categories(categories: Vec<Category>) -> CategoryMap {
    categories
        .into_iter()
        .map(|category| (category.id, category.type_))
        .collect()
}

/// One-line rendering used by `triviactl`.
pub fn question_line(q: &Question, categories: &CategoryMap) -> String {
    let question = q
        .question
        .lines()
        .map(|s| s.trim())
        .filter(|s| *s != "")
        .collect::<Vec<_>>()
        .join(" ");
    let category = categories
        .get(&q.category)
        .map(|s| &s[..])
        .unwrap_or("UNKNOWN CATEGORY");
    format!(
        "{} [{}, difficulty {}] {} => {}",
        q.id,
        category,
        q.difficulty,
        question,
        q.answer.trim()
    )
}
