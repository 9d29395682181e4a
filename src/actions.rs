use crate::models::*;
use crate::schema::*;
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::QueryResult;

pub fn get_categories(conn: &PgConnection) -> QueryResult<Vec<Category>> {
    categories::table
        .order(categories::id)
        .load::<Category>(conn)
}

pub fn find_category(conn: &PgConnection, id: i32) -> QueryResult<Option<Category>> {
    categories::table
        .find(id)
        .get_result::<Category>(conn)
        .optional()
}

pub fn insert_category(conn: &PgConnection, label: &str) -> QueryResult<Category> {
    diesel::insert_into(categories::table)
        .values(&NewCategory { type_: label })
        .get_result(conn)
}

pub fn get_questions(conn: &PgConnection) -> QueryResult<Vec<Question>> {
    questions::table
        .order(questions::id)
        .load::<Question>(conn)
}

pub fn get_questions_in_category(conn: &PgConnection, category: i32) -> QueryResult<Vec<Question>> {
    questions::table
        .filter(questions::category.eq(category))
        .order(questions::id)
        .load::<Question>(conn)
}

/// Questions in `category` (or every category) whose id is not in `excluded`.
pub fn questions_excluding(
    conn: &PgConnection,
    category: Option<i32>,
    excluded: &[i32],
) -> QueryResult<Vec<Question>> {
    let mut query: questions::BoxedQuery<Pg> = questions::table.order(questions::id).into_boxed();
    if let Some(category) = category {
        query = query.filter(questions::category.eq(category));
    }
    if !excluded.is_empty() {
        query = query.filter(questions::id.ne_all(excluded.to_vec()));
    }
    query.load::<Question>(conn)
}

/// Case-insensitive substring search over the question text.
pub fn search_questions(conn: &PgConnection, term: &str) -> QueryResult<Vec<Question>> {
    questions::table
        .filter(questions::question.ilike(like_pattern(term)))
        .order(questions::id)
        .load::<Question>(conn)
}

pub fn insert_question(conn: &PgConnection, question: &NewQuestion<'_>) -> QueryResult<Question> {
    diesel::insert_into(questions::table)
        .values(question)
        .get_result(conn)
}

/// Deletes one question; `NotFound` when no row has `id`.
pub fn delete_question(conn: &PgConnection, id: i32) -> QueryResult<()> {
    match diesel::delete(questions::table.find(id)).execute(conn)? {
        0 => Err(diesel::result::Error::NotFound),
        _ => Ok(()),
    }
}

// Postgres LIKE treats `%`, `_` and `\` specially.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if c == '%' || c == '_' || c == '\\' {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
